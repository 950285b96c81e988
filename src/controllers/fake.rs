// In-memory BookSource for controller tests

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use anyhow::anyhow;
use tokio::sync::Notify;

use crate::books_client::{Book, BookSource, BooksPage, VolumeInfo};

pub fn book(id: &str, title: &str, authors: &[&str]) -> Book {
    Book {
        id: id.into(),
        volume_info: VolumeInfo {
            title: Some(title.into()),
            authors: Some(authors.iter().map(|a| a.to_string()).collect()),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[derive(Default)]
pub struct FakeSource {
    pages: HashMap<u32, BooksPage>,
    books: HashMap<String, Book>,
    held_page: Option<u32>,
    entered: Arc<Notify>,
    released: Arc<Notify>,
    pub page_calls: AtomicUsize,
    pub book_calls: AtomicUsize,
}

impl FakeSource {
    /// `total` full pages whose books are named `p{page}-{index}`.
    pub fn paged(total: u32) -> Self {
        let mut source = FakeSource::default();
        for page in 1..=total {
            let data = (0..10)
                .map(|i| {
                    let id = format!("p{}-{}", page, i);
                    book(&id, &format!("Book {}", id), &["Anon"])
                })
                .collect();
            source.pages.insert(page, page_of(data, total));
        }
        source
    }

    pub fn with_page(total: u32, data: Vec<Book>) -> Self {
        let mut source = FakeSource::default();
        source.pages.insert(1, page_of(data, total));
        source
    }

    pub fn with_book(mut self, book: Book) -> Self {
        self.books.insert(book.id.clone(), book);
        self
    }

    /// Requests for `page` block until `release` is called.
    pub fn hold_page(mut self, page: u32) -> Self {
        self.held_page = Some(page);
        self
    }

    pub async fn wait_until_held(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.released.notify_one();
    }
}

fn page_of(data: Vec<Book>, total_pages: u32) -> BooksPage {
    BooksPage {
        data,
        total_pages,
        page: None,
        limit: Some(10),
        total_items: None,
        current_page_items: None,
        previous_page: None,
        next_page: None,
    }
}

#[async_trait::async_trait]
impl BookSource for FakeSource {
    async fn fetch_page(&self, page: u32, _limit: u32) -> anyhow::Result<BooksPage> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        if self.held_page == Some(page) {
            self.entered.notify_one();
            self.released.notified().await;
        }
        self.pages
            .get(&page)
            .cloned()
            .ok_or_else(|| anyhow!("no page {}", page))
    }

    async fn fetch_book(&self, id: &str) -> anyhow::Result<Book> {
        self.book_calls.fetch_add(1, Ordering::SeqCst);
        self.books
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow!("no book {}", id))
    }
}
