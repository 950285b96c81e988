use poem_openapi::payload::PlainText;

use crate::books_client::BookSource;

pub struct HealthService<'a> {
    pub source: &'a dyn BookSource,
}

impl<'a> HealthService<'a> {
    pub fn new(source: &'a dyn BookSource) -> Self {
        Self { source }
    }

    /// Asks the catalog for a one-item page to confirm it answers.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn status_text(&self) -> PlainText<String> {
        match self.source.fetch_page(1, 1).await {
            Ok(page) => PlainText(format!("catalog=reachable total_pages={}", page.total_pages)),
            Err(e) => {
                tracing::warn!(error = %format!("{:?}", e), "catalog health check failed");
                PlainText(format!("error: {}", e))
            }
        }
    }
}
