//! Delete confirmation dialog.
//!
//! `Idle -> PendingConfirmation(id)` on request; confirm issues the delete and
//! returns to `Idle` before the outcome is known; cancel returns to `Idle`
//! without a call. A request while pending replaces the target.

use std::sync::Arc;

use shared::BookId;
use tracing::debug;

use crate::controller::{DeleteOrigin, MutationSync, MutationTask, Route};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteConfirmation {
    #[default]
    Idle,
    PendingConfirmation(BookId),
}

impl DeleteConfirmation {
    pub fn request(&mut self, id: BookId) {
        *self = DeleteConfirmation::PendingConfirmation(id);
    }

    pub fn cancel(&mut self) {
        *self = DeleteConfirmation::Idle;
    }

    /// Leaves the pending state, handing back the target if there was one.
    pub fn confirm(&mut self) -> Option<BookId> {
        match std::mem::take(self) {
            DeleteConfirmation::PendingConfirmation(id) => Some(id),
            DeleteConfirmation::Idle => None,
        }
    }

    pub fn pending(&self) -> Option<&BookId> {
        match self {
            DeleteConfirmation::PendingConfirmation(id) => Some(id),
            DeleteConfirmation::Idle => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.pending().is_some()
    }
}

/// The confirmation dialog as mounted in the list view or the edit form.
pub struct DeleteDialog {
    state: DeleteConfirmation,
    origin: DeleteOrigin,
}

impl DeleteDialog {
    pub fn new(origin: DeleteOrigin) -> Self {
        Self {
            state: DeleteConfirmation::Idle,
            origin,
        }
    }

    pub fn state(&self) -> &DeleteConfirmation {
        &self.state
    }

    pub fn request(&mut self, id: BookId) {
        debug!(%id, origin = ?self.origin, "delete requested");
        self.state.request(id);
    }

    pub fn cancel(&mut self) {
        self.state.cancel();
    }

    /// Closes the dialog and spawns the delete. From the form the view also
    /// returns to the list right away.
    pub fn confirm(&mut self, sync: &Arc<MutationSync>) -> Option<MutationTask> {
        let id = self.state.confirm()?;
        let task = sync.spawn_delete(id, self.origin);
        if self.origin == DeleteOrigin::Form {
            sync.navigate(Route::List);
        }
        Some(task)
    }
}

#[cfg(test)]
#[path = "tests/delete_flow_tests.rs"]
mod tests;
