//! List view state: filters, pagination, search debouncing and row actions.

use std::{
    num::NonZeroUsize,
    sync::Arc,
    time::{Duration, Instant},
};

use shared::{BookId, BookStatus, Genre};

use crate::{
    controller::{DeleteOrigin, MutationSync, MutationTask, Route},
    debounce::SearchDebouncer,
    delete_flow::DeleteDialog,
    projection::{project, FilterSpec, Pagination, ProjectedPage, Selection},
};

pub const FETCH_ERROR_MESSAGE: &str = "Error while fetching data!";
pub const NO_DATA_MESSAGE: &str = "No data Found!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView {
    /// The collection could not be fetched; no table is shown.
    Error(&'static str),
    Empty(&'static str),
    Table(ProjectedPage),
}

pub struct ListView {
    sync: Arc<MutationSync>,
    filter: FilterSpec,
    pagination: Pagination,
    search: SearchDebouncer,
    delete: DeleteDialog,
}

impl ListView {
    pub fn new(sync: Arc<MutationSync>, page_size: NonZeroUsize, search_quiet: Duration) -> Self {
        Self {
            sync,
            filter: FilterSpec::default(),
            pagination: Pagination::new(page_size),
            search: SearchDebouncer::new(search_quiet),
            delete: DeleteDialog::new(DeleteOrigin::Table),
        }
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn search_draft(&self) -> &str {
        self.search.draft()
    }

    /// Records a keystroke in the search box. Nothing changes until the quiet
    /// period passes and [`tick`](Self::tick) commits it.
    pub fn type_search(&mut self, text: impl Into<String>, now: Instant) {
        self.search.input(text, now);
    }

    /// Commits a settled search draft. Returns true if the filter changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(committed) = self.search.poll(now) else {
            return false;
        };
        self.filter.search = committed.to_string();
        self.pagination.page = 0;
        true
    }

    /// Waits out the quiet period of a pending search draft, then commits it.
    pub async fn settle_search(&mut self) -> bool {
        let Some(deadline) = self.search.deadline() else {
            return false;
        };
        tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
        self.tick(deadline.max(Instant::now()))
    }

    /// Sets the search text immediately, bypassing the debounce.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search.commit_now(text);
        self.filter.search = self.search.committed().to_string();
        self.pagination.page = 0;
    }

    pub fn set_genre(&mut self, genre: Selection<Genre>) {
        self.filter.genre = genre;
        self.pagination.page = 0;
    }

    pub fn set_status(&mut self, status: Selection<BookStatus>) {
        self.filter.status = status;
        self.pagination.page = 0;
    }

    pub fn set_page_size(&mut self, size: NonZeroUsize) {
        self.pagination = Pagination::new(size);
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.page = page;
    }

    /// Projects the current filters over the (possibly re-fetched) collection.
    pub async fn render(&self) -> TableView {
        let books = match self.sync.list().await {
            Ok(books) => books,
            Err(_) => return TableView::Error(FETCH_ERROR_MESSAGE),
        };

        let page = project(&books, &self.filter, self.pagination);
        if page.is_empty() {
            TableView::Empty(NO_DATA_MESSAGE)
        } else {
            TableView::Table(page)
        }
    }

    pub fn add_new(&self) {
        self.sync.navigate(Route::NewBook);
    }

    pub fn edit(&self, id: BookId) {
        self.sync.navigate(Route::EditBook(id));
    }

    pub fn request_delete(&mut self, id: BookId) {
        self.delete.request(id);
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
#[path = "tests/dashboard_tests.rs"]
mod tests;
