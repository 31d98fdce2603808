use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Form fields of a book, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookField {
    Title,
    Author,
    Genre,
    Year,
    Status,
}

impl BookField {
    pub fn as_str(self) -> &'static str {
        match self {
            BookField::Title => "title",
            BookField::Author => "author",
            BookField::Genre => "genre",
            BookField::Year => "year",
            BookField::Status => "status",
        }
    }
}

impl fmt::Display for BookField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-scoped validation failures, one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    fields: BTreeMap<BookField, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure for `field`. The first message recorded for a field wins.
    pub fn add(&mut self, field: BookField, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, field: BookField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: BookField) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BookField, &str)> {
        self.fields.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid book: ")?;
        for (idx, (field, message)) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
