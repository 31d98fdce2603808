//! Book collection client: REST transport, query cache, list projection and
//! the view state that keeps them in sync after mutations.

pub mod cache;
pub mod controller;
pub mod dashboard;
pub mod debounce;
pub mod delete_flow;
pub mod error;
pub mod form;
pub mod projection;
pub mod transport;

pub use cache::{QueryCache, QueryKey};
pub use controller::{
    BookCache, ClientEvent, DeleteOrigin, MutationSync, MutationTask, Notification,
    NotificationKind, Route,
};
pub use dashboard::{ListView, TableView};
pub use debounce::SearchDebouncer;
pub use delete_flow::{DeleteConfirmation, DeleteDialog};
pub use error::{ClientError, FetchError};
pub use form::{FormMode, FormSession};
pub use projection::{project, FilterSpec, Pagination, ProjectedPage, Selection};
pub use transport::{BookApi, HttpBookApi};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
