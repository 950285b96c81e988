use std::sync::Arc;

use crate::{
    books_client::BookSource,
    domain::{mapping::map_book_to_detail, models::DetailView},
};

pub struct DetailController {
    source: Arc<dyn BookSource>,
}

impl DetailController {
    pub fn new(source: Arc<dyn BookSource>) -> Self {
        Self { source }
    }

    /// Build the detail view for the `id` taken from the page URL.
    /// No request is made when the id is absent or blank.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn load(&self, book_id: Option<&str>) -> DetailView {
        let Some(book_id) = book_id.map(str::trim).filter(|id| !id.is_empty()) else {
            tracing::debug!("no book id in request");
            return DetailView::NoSelection;
        };

        match self.source.fetch_book(book_id).await {
            Ok(book) => DetailView::Loaded(Box::new(map_book_to_detail(&book))),
            Err(e) => {
                tracing::error!(
                    error = %format!("{:?}", e),
                    %book_id,
                    "failed to fetch book details"
                );
                DetailView::Unavailable
            }
        }
    }
}
