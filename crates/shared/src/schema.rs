//! Book form values and the rules they must satisfy before submission.

use serde::{Deserialize, Serialize};

use crate::{
    domain::{Book, BookPayload, BookStatus, Genre},
    error::{BookField, ValidationErrors},
};

/// Raw form values. Every field is free text until [`BookDraft::validate`]
/// turns the draft into a [`BookPayload`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: String,
    pub status: String,
}

impl BookDraft {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.to_string(),
            year: book.year.clone(),
            status: book.status.to_string(),
        }
    }

    pub fn set(&mut self, field: BookField, value: impl Into<String>) {
        let value = value.into();
        match field {
            BookField::Title => self.title = value,
            BookField::Author => self.author = value,
            BookField::Genre => self.genre = value,
            BookField::Year => self.year = value,
            BookField::Status => self.status = value,
        }
    }

    /// Checks every field and reports all failures at once.
    pub fn validate(&self) -> Result<BookPayload, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = required(&self.title, BookField::Title, "Title is required", &mut errors);
        let author = required(&self.author, BookField::Author, "Author is required", &mut errors);

        let genre = required(&self.genre, BookField::Genre, "Genre is required", &mut errors)
            .and_then(|raw| match raw.parse::<Genre>() {
                Ok(genre) => Some(genre),
                Err(_) => {
                    errors.add(BookField::Genre, "Select a valid genre");
                    None
                }
            });

        let year = required(
            &self.year,
            BookField::Year,
            "Published year is required",
            &mut errors,
        )
        .and_then(|_| {
            if is_four_digit_year(&self.year) {
                Some(self.year.as_str())
            } else {
                errors.add(BookField::Year, "Enter a valid year (e.g. 2021)");
                None
            }
        });

        let status = required(&self.status, BookField::Status, "Status is required", &mut errors)
            .and_then(|raw| match raw.parse::<BookStatus>() {
                Ok(status) => Some(status),
                Err(_) => {
                    errors.add(BookField::Status, "Select a valid status");
                    None
                }
            });

        match (title, author, genre, year, status) {
            (Some(title), Some(author), Some(genre), Some(year), Some(status))
                if errors.is_empty() =>
            {
                Ok(BookPayload {
                    title: title.to_string(),
                    author: author.to_string(),
                    genre,
                    year: year.to_string(),
                    status,
                })
            }
            _ => Err(errors),
        }
    }
}

fn required<'a>(
    value: &'a str,
    field: BookField,
    message: &str,
    errors: &mut ValidationErrors,
) -> Option<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, message);
        None
    } else {
        Some(trimmed)
    }
}

fn is_four_digit_year(value: &str) -> bool {
    value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
#[path = "tests/schema_tests.rs"]
mod tests;
