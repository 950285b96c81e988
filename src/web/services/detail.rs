use poem_openapi::payload::Html;

use crate::{controllers::DetailController, web::pages};

pub struct DetailPageService<'a> {
    pub detail: &'a DetailController,
}

impl<'a> DetailPageService<'a> {
    pub fn new(detail: &'a DetailController) -> Self {
        Self { detail }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn render(&self, book_id: Option<&str>) -> Html<String> {
        let view = self.detail.load(book_id).await;
        Html(pages::detail_page(&view))
    }
}
