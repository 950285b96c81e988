// Mapping from catalog records to view models

use super::models::{BookCard, BookDetail};
use crate::books_client::Book;

pub const CARD_PLACEHOLDER: &str = "/api/placeholder/100/150";
pub const DETAIL_PLACEHOLDER: &str = "/api/placeholder/300/450";
pub const DETAIL_PAGE_PATH: &str = "/bookLib/bookDetail.html";

fn join_or(values: Option<&Vec<String>>, fallback: &str) -> String {
    match values {
        Some(v) if !v.is_empty() => v.join(", "),
        _ => fallback.to_string(),
    }
}

fn or_default(value: Option<&String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.clone(),
        _ => fallback.to_string(),
    }
}

pub fn detail_href(book_id: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(book_id.as_bytes()).collect();
    format!("{}?id={}", DETAIL_PAGE_PATH, encoded)
}

pub fn map_book_to_card(book: &Book) -> BookCard {
    let info = &book.volume_info;
    BookCard {
        id: book.id.clone(),
        thumbnail: info.thumbnail().unwrap_or(CARD_PLACEHOLDER).to_string(),
        title: info.title_or_empty().to_string(),
        authors: join_or(info.authors.as_ref(), "Unknown"),
        published: or_default(info.published_date.as_ref(), "N/A"),
        detail_href: detail_href(&book.id),
    }
}

pub fn map_books_to_cards<'a>(books: impl IntoIterator<Item = &'a Book>) -> Vec<BookCard> {
    books.into_iter().map(map_book_to_card).collect()
}

pub fn map_book_to_detail(book: &Book) -> BookDetail {
    let info = &book.volume_info;
    BookDetail {
        thumbnail: info.thumbnail().unwrap_or(DETAIL_PLACEHOLDER).to_string(),
        title: info.title_or_empty().to_string(),
        subtitle: or_default(info.subtitle.as_ref(), ""),
        authors: join_or(info.authors.as_ref(), "Unknown"),
        publisher: or_default(info.publisher.as_ref(), "N/A"),
        published_date: or_default(info.published_date.as_ref(), "N/A"),
        categories: join_or(info.categories.as_ref(), "N/A"),
        description: or_default(info.description.as_ref(), "No description available."),
        preview_link: or_default(info.preview_link.as_ref(), ""),
        info_link: or_default(info.info_link.as_ref(), ""),
    }
}
