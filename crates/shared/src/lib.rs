pub mod domain;
pub mod error;
pub mod schema;

pub use domain::{Book, BookId, BookPayload, BookStatus, Genre};
pub use error::{BookField, ValidationErrors};
pub use schema::BookDraft;
