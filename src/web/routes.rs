use std::sync::Arc;

use poem_openapi::{
    OpenApi,
    param::Query,
    payload::{Html, PlainText},
};

use super::services::{
    detail::DetailPageService,
    health::HealthService,
    list::{ListEvents, ListPageService},
};
use crate::{
    books_client::BookSource,
    controllers::{DetailController, ListController},
};

pub struct BookLibApi {
    pub source: Arc<dyn BookSource>,
    pub list: Arc<ListController>,
    pub detail: Arc<DetailController>,
}

impl BookLibApi {
    pub fn new(source: Arc<dyn BookSource>) -> Self {
        Self {
            list: Arc::new(ListController::new(source.clone())),
            detail: Arc::new(DetailController::new(source.clone())),
            source,
        }
    }
}

#[OpenApi]
impl BookLibApi {
    /// Book list page
    #[oai(path = "/", method = "get")]
    #[tracing::instrument(level = "debug", skip(self, page, nav, view, sort, search))]
    async fn list_page(
        &self,
        /// Page to load, starting at 1
        Query(page): Query<Option<u32>>,
        /// "prev" or "next"
        Query(nav): Query<Option<String>>,
        /// "list" or "grid"
        Query(view): Query<Option<String>>,
        /// Sort selector, e.g. "title-asc" or "date-desc"
        Query(sort): Query<Option<String>>,
        /// Case-insensitive title/author search over the loaded page
        Query(search): Query<Option<String>>,
    ) -> Html<String> {
        tracing::debug!(
            page = page.unwrap_or(0),
            nav = nav.as_deref().unwrap_or(""),
            view = view.as_deref().unwrap_or(""),
            sort = sort.as_deref().unwrap_or(""),
            "handling list page"
        );
        ListPageService::new(&self.list)
            .handle(ListEvents {
                page,
                nav,
                view,
                sort,
                search,
            })
            .await
    }

    /// Single book detail page
    #[oai(path = "/bookLib/bookDetail.html", method = "get")]
    #[tracing::instrument(level = "debug", skip(self, id))]
    async fn detail_page(&self, Query(id): Query<Option<String>>) -> Html<String> {
        DetailPageService::new(&self.detail)
            .render(id.as_deref())
            .await
    }

    /// Upstream catalog reachability
    #[oai(path = "/status", method = "get")]
    #[tracing::instrument(level = "debug", skip(self))]
    async fn status(&self) -> PlainText<String> {
        tracing::debug!("handling /status");
        HealthService::new(self.source.as_ref()).status_text().await
    }
}
