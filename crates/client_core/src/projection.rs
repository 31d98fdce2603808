//! Client-side filtering and pagination of the book collection.

use std::{fmt, num::NonZeroUsize, str::FromStr};

use shared::{Book, BookStatus, Genre};

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => unreachable!(),
};

/// Either every value, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("all"),
            Selection::Only(value) => value.fmt(f),
        }
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    /// `""` and `"all"` (any case) select everything.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(Selection::All)
        } else {
            s.parse().map(Selection::Only)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub search: String,
    pub genre: Selection<Genre>,
    pub status: Selection<BookStatus>,
}

impl FilterSpec {
    fn matcher(&self) -> Matcher<'_> {
        Matcher {
            needle: self.search.to_lowercase(),
            spec: self,
        }
    }
}

struct Matcher<'a> {
    needle: String,
    spec: &'a FilterSpec,
}

impl Matcher<'_> {
    fn matches(&self, book: &Book) -> bool {
        let matches_search = self.needle.is_empty()
            || book.title.to_lowercase().contains(&self.needle)
            || book.author.to_lowercase().contains(&self.needle);

        matches_search && self.spec.genre.admits(&book.genre) && self.spec.status.admits(&book.status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub size: NonZeroUsize,
}

impl Pagination {
    pub fn new(size: NonZeroUsize) -> Self {
        Self { page: 0, size }
    }

    pub fn at(page: usize, size: NonZeroUsize) -> Self {
        Self { page, size }
    }

    fn bounds(&self, len: usize) -> (usize, usize) {
        let start = self.page.saturating_mul(self.size.get()).min(len);
        let end = start.saturating_add(self.size.get()).min(len);
        (start, end)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// One visible page plus the number of records matching the filter overall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedPage {
    pub rows: Vec<Book>,
    pub total_matches: usize,
    pub pagination: Pagination,
}

impl ProjectedPage {
    /// 1-based serial number of the first row.
    pub fn first_serial(&self) -> usize {
        self.pagination
            .page
            .saturating_mul(self.pagination.size.get())
            .saturating_add(1)
    }

    pub fn page_count(&self) -> usize {
        self.total_matches.div_ceil(self.pagination.size.get())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Filters `records` in their received order and cuts out the requested page.
pub fn project(records: &[Book], filter: &FilterSpec, pagination: Pagination) -> ProjectedPage {
    let matcher = filter.matcher();
    let matched: Vec<&Book> = records.iter().filter(|book| matcher.matches(book)).collect();
    let (start, end) = pagination.bounds(matched.len());

    ProjectedPage {
        rows: matched[start..end].iter().map(|book| (*book).clone()).collect(),
        total_matches: matched.len(),
        pagination,
    }
}

#[cfg(test)]
#[path = "tests/projection_tests.rs"]
mod tests;
