// Local search and sort over one loaded page of books

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};

use super::models::{SortDirection, SortField, SortKey};
use crate::books_client::Book;

/// Books whose title or any author contains `term`, ignoring case.
/// Order is preserved; an empty term matches everything.
pub fn filter_books<'a>(books: &'a [Book], term: &str) -> Vec<&'a Book> {
    let needle = term.to_lowercase();
    books
        .iter()
        .filter(|book| {
            let info = &book.volume_info;
            info.title_or_empty().to_lowercase().contains(&needle)
                || info
                    .authors
                    .iter()
                    .flatten()
                    .any(|author| author.to_lowercase().contains(&needle))
        })
        .collect()
}

/// A sorted copy of `books`. The sort is stable, so equal keys keep page order.
pub fn sort_books(books: &[Book], key: SortKey) -> Vec<Book> {
    let mut sorted = books.to_vec();
    sorted.sort_by(|a, b| match key.direction {
        SortDirection::Asc => compare_by(key.field, a, b),
        SortDirection::Desc => compare_by(key.field, b, a),
    });
    sorted
}

fn compare_by(field: SortField, a: &Book, b: &Book) -> Ordering {
    match field {
        SortField::Title => locale_cmp(
            a.volume_info.title_or_empty(),
            b.volume_info.title_or_empty(),
        ),
        SortField::Author => locale_cmp(
            a.volume_info.first_author(),
            b.volume_info.first_author(),
        ),
        SortField::Date => published_on(a.volume_info.published_date.as_deref())
            .cmp(&published_on(b.volume_info.published_date.as_deref())),
    }
}

/// Case-insensitive ordering; lowercase sorts before uppercase on ties.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Publication date as a calendar day. Accepts `YYYY`, `YYYY-MM`,
/// `YYYY-MM-DD`, RFC 3339 timestamps and offset-less `YYYY-MM-DDTHH:MM:SS`;
/// anything else is the Unix epoch.
pub fn published_on(raw: Option<&str>) -> NaiveDate {
    let epoch = DateTime::<Utc>::UNIX_EPOCH.date_naive();
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return epoch;
    };
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(&Utc).date_naive();
    }
    let day_part = raw.split(['T', ' ']).next().unwrap_or(raw);
    let mut parts = day_part.splitn(3, '-');
    let year = parts.next().and_then(|y| y.parse::<i32>().ok());
    let month = match parts.next() {
        Some(m) => m.parse::<u32>().ok(),
        None => Some(1),
    };
    let day = match parts.next() {
        Some(d) => d.parse::<u32>().ok(),
        None => Some(1),
    };
    match (year, month, day) {
        (Some(y), Some(m), Some(d)) => NaiveDate::from_ymd_opt(y, m, d).unwrap_or(epoch),
        _ => epoch,
    }
}
