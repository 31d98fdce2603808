//! Create/edit form session.

use std::sync::Arc;

use shared::{BookDraft, BookField, BookId, ValidationErrors};
use tracing::debug;

use crate::{
    controller::{DeleteOrigin, MutationSync, MutationTask, NotificationKind, Route},
    delete_flow::DeleteDialog,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update(BookId),
}

impl FormMode {
    pub fn heading(&self) -> &'static str {
        match self {
            FormMode::Create => "Add New Book",
            FormMode::Update(_) => "Update Book",
        }
    }
}

pub struct FormSession {
    sync: Arc<MutationSync>,
    mode: FormMode,
    initial: BookDraft,
    draft: BookDraft,
    errors: ValidationErrors,
    delete: DeleteDialog,
}

impl FormSession {
    /// Opens the form. In update mode the existing record is loaded; if that
    /// fails the failure is notified and the form starts from empty values.
    pub async fn open(sync: Arc<MutationSync>, mode: FormMode) -> Self {
        let initial = match &mode {
            FormMode::Create => BookDraft::empty(),
            FormMode::Update(id) => match sync.get(id).await {
                Ok(book) => BookDraft::from_book(&book),
                Err(_) => {
                    sync.notify(NotificationKind::Error, "Error fetching book details!");
                    BookDraft::empty()
                }
            },
        };

        Self {
            sync,
            mode,
            draft: initial.clone(),
            initial,
            errors: ValidationErrors::new(),
            delete: DeleteDialog::new(DeleteOrigin::Form),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &BookDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn set_field(&mut self, field: BookField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Validates and, if valid, spawns the create/update, resets the form and
    /// returns to the list without waiting for the remote outcome.
    ///
    /// Invalid drafts stay on the form with per-field errors.
    pub fn submit(&mut self) -> Result<MutationTask, ValidationErrors> {
        let payload = match self.draft.validate() {
            Ok(payload) => payload,
            Err(errors) => {
                debug!(fields = errors.len(), "form submission blocked by validation");
                self.errors = errors.clone();
                return Err(errors);
            }
        };

        let task = match &self.mode {
            FormMode::Create => self.sync.spawn_create(payload),
            FormMode::Update(id) => self.sync.spawn_update(id.clone(), payload),
        };

        self.draft = self.initial.clone();
        self.errors = ValidationErrors::new();
        self.sync.navigate(Route::List);
        Ok(task)
    }

    pub fn cancel(&self) {
        self.sync.navigate(Route::List);
    }

    /// Opens the delete dialog. Only an existing record can be deleted.
    pub fn request_delete(&mut self) -> bool {
        match &self.mode {
            FormMode::Update(id) => {
                self.delete.request(id.clone());
                true
            }
            FormMode::Create => false,
        }
    }

    pub fn cancel_delete(&mut self) {
        self.delete.cancel();
    }

    pub fn confirm_delete(&mut self) -> Option<MutationTask> {
        self.delete.confirm(&self.sync)
    }

    pub fn delete_dialog(&self) -> &DeleteDialog {
        &self.delete
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
