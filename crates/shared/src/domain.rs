use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Server-assigned book identifier. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub String);

impl BookId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseVariantError {
    pub kind: &'static str,
    pub value: String,
}

/// Generates a set of known text values. Wire values match
/// case-insensitively and unknown text is kept as `Unlisted`; `FromStr`
/// accepts only the known values.
macro_rules! text_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// Text the server sent that is not one of the known values.
            Unlisted(String),
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $text,)+
                    $name::Unlisted(text) => text,
                }
            }

            fn known(text: &str) -> Option<Self> {
                let text = text.trim();
                Self::ALL
                    .iter()
                    .find(|variant| variant.as_str().eq_ignore_ascii_case(text))
                    .cloned()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseVariantError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::known(s).ok_or_else(|| ParseVariantError {
                    kind: $kind,
                    value: s.trim().to_string(),
                })
            }
        }

        impl From<String> for $name {
            fn from(text: String) -> Self {
                Self::known(&text).unwrap_or($name::Unlisted(text))
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Unlisted(text) => text,
                    known => known.as_str().to_string(),
                }
            }
        }
    };
}

text_enum!(Genre, "genre", {
    Fiction => "Fiction",
    NonFiction => "Non-Fiction",
    SciFi => "Sci-Fi",
    Fantasy => "Fantasy",
    Mystery => "Mystery",
    Thriller => "Thriller",
    Romance => "Romance",
    Horror => "Horror",
    Biography => "Biography",
    History => "History",
    Poetry => "Poetry",
    SelfHelp => "Self-Help",
});

text_enum!(BookStatus, "status", {
    Available => "Available",
    Issued => "Issued",
});

/// A book as stored by the remote collection resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BookRecord")]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub year: String,
    pub status: BookStatus,
}

/// Wire shape of a stored book. Document stores send `_id`, some also add a
/// virtual `id`; `_id` wins when both are present.
#[derive(Deserialize)]
struct BookRecord {
    #[serde(rename = "_id")]
    document_id: Option<BookId>,
    id: Option<BookId>,
    title: String,
    author: String,
    genre: Genre,
    year: String,
    status: BookStatus,
}

impl TryFrom<BookRecord> for Book {
    type Error = &'static str;

    fn try_from(record: BookRecord) -> Result<Self, Self::Error> {
        let id = record
            .document_id
            .or(record.id)
            .ok_or("book record has neither `_id` nor `id`")?;
        Ok(Book {
            id,
            title: record.title,
            author: record.author,
            genre: record.genre,
            year: record.year,
            status: record.status,
        })
    }
}

/// Body of `POST` and `PUT` requests. Only produced by validating a
/// [`BookDraft`](crate::schema::BookDraft).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPayload {
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub year: String,
    pub status: BookStatus,
}

impl BookPayload {
    pub fn with_id(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            genre: self.genre,
            year: self.year,
            status: self.status,
        }
    }
}
