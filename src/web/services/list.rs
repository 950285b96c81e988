use poem_openapi::payload::Html;

use crate::{
    controllers::ListController,
    domain::models::{SortKey, ViewMode},
    web::pages,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Prev,
    Next,
}

/// Page events carried by one list page request, as raw query values.
#[derive(Debug, Default)]
pub struct ListEvents {
    pub page: Option<u32>,
    pub nav: Option<String>,
    pub view: Option<String>,
    pub sort: Option<String>,
    pub search: Option<String>,
}

fn parse_event<T>(
    name: &str,
    raw: Option<&str>,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Option<T> {
    let raw = raw?;
    match parse(raw) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(event = name, error = %e, "ignoring invalid list event");
            None
        }
    }
}

fn parse_nav(raw: &str) -> Result<Nav, String> {
    match raw {
        "prev" => Ok(Nav::Prev),
        "next" => Ok(Nav::Next),
        other => Err(format!("unknown navigation: {}", other)),
    }
}

pub struct ListPageService<'a> {
    pub list: &'a ListController,
}

impl<'a> ListPageService<'a> {
    pub fn new(list: &'a ListController) -> Self {
        Self { list }
    }

    /// Apply events in order (page or nav, view, sort, search) and render
    /// whatever the controller shows afterwards.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn handle(&self, events: ListEvents) -> Html<String> {
        let page = events.page.filter(|p| {
            if *p == 0 {
                tracing::warn!("ignoring page 0; pages start at 1");
            }
            *p >= 1
        });
        let nav = parse_event("nav", events.nav.as_deref(), parse_nav);
        let view = parse_event("view", events.view.as_deref(), str::parse::<ViewMode>);
        let sort = parse_event("sort", events.sort.as_deref(), str::parse::<SortKey>);

        if let Some(page) = page {
            self.list.fetch_books(page).await;
        } else {
            if !self.list.is_loaded().await {
                self.list.fetch_books(1).await;
            }
            match nav {
                Some(Nav::Prev) => {
                    self.list.prev_page().await;
                }
                Some(Nav::Next) => {
                    self.list.next_page().await;
                }
                None => {}
            }
        }

        if let Some(mode) = view {
            self.list.toggle_view(mode).await;
        }
        if let Some(key) = sort {
            self.list.sort_books(key).await;
        }
        if let Some(term) = events.search.as_deref() {
            self.list.filter_books(term).await;
        }

        Html(pages::list_page(&self.list.view().await))
    }
}
