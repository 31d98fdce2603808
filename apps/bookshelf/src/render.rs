//! Plain-text rendering of the list view and form values.

use std::fmt::Write as _;

use client_core::{Notification, NotificationKind, ProjectedPage, TableView};
use shared::{BookDraft, ValidationErrors};

const HEADERS: [&str; 7] = ["S.No.", "Title", "Author", "Genre", "Published Year", "Status", "ID"];

pub fn table_view(view: &TableView) -> String {
    match view {
        TableView::Error(message) | TableView::Empty(message) => format!("{message}\n"),
        TableView::Table(page) => table(page),
    }
}

fn table(page: &ProjectedPage) -> String {
    let rows: Vec<[String; 7]> = page
        .rows
        .iter()
        .enumerate()
        .map(|(idx, book)| {
            [
                (page.first_serial() + idx).to_string(),
                book.title.clone(),
                book.author.clone(),
                book.genre.to_string(),
                book.year.clone(),
                book.status.to_string(),
                book.id.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &widths, HEADERS.iter().copied());
    push_row(&mut out, &widths, widths.map(|w| "-".repeat(w)).iter().map(String::as_str));
    for row in &rows {
        push_row(&mut out, &widths, row.iter().map(String::as_str));
    }

    let first = page.first_serial();
    let last = first + page.rows.len().saturating_sub(1);
    let _ = writeln!(
        out,
        "{first}-{last} of {} (page {} of {})",
        page.total_matches,
        page.pagination.page + 1,
        page.page_count()
    );
    out
}

fn push_row<'a>(out: &mut String, widths: &[usize; 7], cells: impl Iterator<Item = &'a str>) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

pub fn draft(draft: &BookDraft) -> String {
    format!(
        "Title:          {}\nAuthor:         {}\nGenre:          {}\nPublished Year: {}\nStatus:         {}\n",
        draft.title, draft.author, draft.genre, draft.year, draft.status
    )
}

pub fn validation_errors(errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {field}: {message}\n"))
        .collect()
}

pub fn notification(notification: &Notification) -> String {
    let tag = match notification.kind {
        NotificationKind::Success => "ok",
        NotificationKind::Error => "error",
    };
    format!("[{tag}] {}", notification.message)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use client_core::Pagination;
    use shared::{Book, BookField, BookId, BookStatus, Genre};

    use super::*;

    fn page() -> ProjectedPage {
        ProjectedPage {
            rows: vec![Book {
                id: BookId::new("65f0"),
                title: "Dune".into(),
                author: "Herbert".into(),
                genre: Genre::SciFi,
                year: "1965".into(),
                status: BookStatus::Available,
            }],
            total_matches: 11,
            pagination: Pagination::at(1, NonZeroUsize::new(10).expect("size")),
        }
    }

    #[test]
    fn table_numbers_rows_from_the_page_offset() {
        let text = table_view(&TableView::Table(page()));
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("S.No.  Title"));
        assert!(lines[2].starts_with("11     Dune"));
        assert!(lines[2].ends_with("65f0"));
        assert_eq!(lines[3], "11-11 of 11 (page 2 of 2)");
    }

    #[test]
    fn error_and_empty_views_print_their_message() {
        assert_eq!(
            table_view(&TableView::Error("Error while fetching data!")),
            "Error while fetching data!\n"
        );
        assert_eq!(table_view(&TableView::Empty("No data Found!")), "No data Found!\n");
    }

    #[test]
    fn validation_errors_list_each_field() {
        let mut errors = ValidationErrors::new();
        errors.add(BookField::Year, "Enter a valid year (e.g. 2021)");
        errors.add(BookField::Title, "Title is required");
        assert_eq!(
            validation_errors(&errors),
            "  title: Title is required\n  year: Enter a valid year (e.g. 2021)\n"
        );
    }
}
