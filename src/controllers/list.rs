use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::Mutex;

use crate::{
    books_client::{Book, BookSource, BooksPage},
    domain::{
        catalog,
        mapping::map_books_to_cards,
        models::{ListView, Pagination, SortKey, ViewMode},
    },
};

/// Books requested per page.
pub const PAGE_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page replaced the loaded books and was rendered.
    Applied,
    /// A newer fetch was issued while this one was in flight; response dropped.
    Stale,
    /// The request or its body failed; previous state and render kept.
    Failed,
}

#[derive(Debug)]
struct ListState {
    books: Vec<Book>,
    current_page: u32,
    total_pages: u32,
    loaded: bool,
    view: ListView,
}

impl Default for ListState {
    fn default() -> Self {
        ListState {
            books: Vec::new(),
            current_page: 1,
            total_pages: 1,
            loaded: false,
            view: ListView::default(),
        }
    }
}

impl ListState {
    fn apply_page(&mut self, page: u32, fetched: BooksPage) {
        self.books = fetched.data;
        self.total_pages = fetched.total_pages;
        self.current_page = page;
        self.loaded = true;
        self.view.pagination = Pagination::for_page(page, self.total_pages);
        self.view.cards = map_books_to_cards(&self.books);
    }
}

/// Owns one loaded page of books and the view rendered from it.
pub struct ListController {
    source: Arc<dyn BookSource>,
    state: Mutex<ListState>,
    latest_request: AtomicU64,
}

impl ListController {
    pub fn new(source: Arc<dyn BookSource>) -> Self {
        Self {
            source,
            state: Mutex::new(ListState::default()),
            latest_request: AtomicU64::new(0),
        }
    }

    pub async fn view(&self) -> ListView {
        self.state.lock().await.view.clone()
    }

    pub async fn is_loaded(&self) -> bool {
        self.state.lock().await.loaded
    }

    pub async fn books(&self) -> Vec<Book> {
        self.state.lock().await.books.clone()
    }

    /// Load `page` and render it. Only the most recently issued fetch may
    /// update state; the lock is not held across the request.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn fetch_books(&self, page: u32) -> FetchOutcome {
        let seq = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(page, seq, "fetching books page");

        let fetched = match self.source.fetch_page(page, PAGE_LIMIT).await {
            Ok(fetched) => fetched,
            Err(e) => {
                tracing::error!(error = %format!("{:?}", e), page, "failed to fetch books");
                return FetchOutcome::Failed;
            }
        };

        let mut state = self.state.lock().await;
        let latest = self.latest_request.load(Ordering::SeqCst);
        if latest != seq {
            tracing::warn!(page, seq, latest, "discarding stale books response");
            return FetchOutcome::Stale;
        }
        let count = fetched.data.len();
        state.apply_page(page, fetched);
        tracing::info!(page, total_pages = state.total_pages, count, "books page loaded");
        FetchOutcome::Applied
    }

    /// Fetch the following page unless already on the last one.
    pub async fn next_page(&self) -> Option<FetchOutcome> {
        let target = {
            let state = self.state.lock().await;
            (state.current_page < state.total_pages).then(|| state.current_page + 1)
        };
        match target {
            Some(page) => Some(self.fetch_books(page).await),
            None => None,
        }
    }

    /// Fetch the preceding page unless already on the first one.
    pub async fn prev_page(&self) -> Option<FetchOutcome> {
        let target = {
            let state = self.state.lock().await;
            (state.current_page > 1).then(|| state.current_page - 1)
        };
        match target {
            Some(page) => Some(self.fetch_books(page).await),
            None => None,
        }
    }

    /// Render the loaded books whose title or an author contains `term`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn filter_books(&self, term: &str) -> ListView {
        let mut state = self.state.lock().await;
        let cards = map_books_to_cards(catalog::filter_books(&state.books, term));
        tracing::debug!(matches = cards.len(), "filtered books");
        state.view.cards = cards;
        state.view.search_term = term.to_string();
        state.view.clone()
    }

    /// Render a sorted copy of the loaded books.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn sort_books(&self, key: SortKey) -> ListView {
        let mut state = self.state.lock().await;
        let sorted = catalog::sort_books(&state.books, key);
        state.view.cards = map_books_to_cards(&sorted);
        state.view.sort = Some(key);
        state.view.clone()
    }

    pub async fn toggle_view(&self, mode: ViewMode) -> ListView {
        let mut state = self.state.lock().await;
        state.view.view_mode = mode;
        state.view.clone()
    }
}
