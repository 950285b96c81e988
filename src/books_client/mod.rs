// Client for the public books catalog API

use anyhow::Context;
use reqwest::Url;
use serde::Deserialize;

/// Fields requested from the list endpoint.
pub const LIST_INCLUDE: &str = "kind,id,etag,volumeInfo";

/// Upstream source of book records. Controllers only talk to this trait.
#[async_trait::async_trait]
pub trait BookSource: Send + Sync {
    async fn fetch_page(&self, page: u32, limit: u32) -> anyhow::Result<BooksPage>;
    async fn fetch_book(&self, id: &str) -> anyhow::Result<Book>;
}

#[derive(Clone, Debug)]
pub struct BooksClient {
    base_url: String,
    client: reqwest::Client,
}

impl BooksClient {
    /// Create a new client with the given base URL (e.g. "https://api.freeapi.app/api/v1/public").
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().build()?;
        let base_url_str = base_url.into();
        tracing::debug!(base_url = %base_url_str, "creating BooksClient");
        Ok(BooksClient {
            base_url: base_url_str.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// URL of a single book; the id is percent-encoded as one path segment.
    fn book_url(&self, book_id: &str) -> anyhow::Result<Url> {
        let mut url = Url::parse(&self.url("/books"))
            .with_context(|| format!("invalid books API URL: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| {
                anyhow::anyhow!("books API URL cannot take a path: {}", self.base_url)
            })?
            .push(book_id);
        Ok(url)
    }

    /// GET /books?page&limit&inc
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_books(
        &self,
        page: u32,
        limit: u32,
        include: Option<&str>,
    ) -> anyhow::Result<BooksPageResponse> {
        let url = self.url("/books");
        tracing::debug!(%url, page, limit, include = include.unwrap_or(""), "GET books");
        let mut q: Vec<(&str, String)> =
            vec![("page", page.to_string()), ("limit", limit.to_string())];
        if let Some(inc) = include {
            q.push(("inc", inc.to_string()));
        }

        let resp = self.client.get(&url).query(&q).send().await?;
        let status = resp.error_for_status()?;
        let body = status.text().await?;
        parse_body::<BooksPageResponse>(&body)
    }

    /// GET /books/:id
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_book(&self, book_id: &str) -> anyhow::Result<BookResponse> {
        let url = self.book_url(book_id)?;
        tracing::debug!(%url, "GET book");
        let resp = self.client.get(url).send().await?;
        let status = resp.error_for_status()?;
        let body = status.text().await?;
        parse_body::<BookResponse>(&body)
    }
}

#[async_trait::async_trait]
impl BookSource for BooksClient {
    async fn fetch_page(&self, page: u32, limit: u32) -> anyhow::Result<BooksPage> {
        let resp = self
            .get_books(page, limit, Some(LIST_INCLUDE))
            .await
            .with_context(|| format!("failed to fetch books page {}", page))?;
        Ok(resp.data)
    }

    async fn fetch_book(&self, id: &str) -> anyhow::Result<Book> {
        let resp = self
            .get_book(id)
            .await
            .with_context(|| format!("failed to fetch book {}", id))?;
        Ok(resp.data)
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> anyhow::Result<T> {
    match serde_json::from_str::<T>(body) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            let mut snippet_len = body.len().min(2000);
            while !body.is_char_boundary(snippet_len) {
                snippet_len -= 1;
            }
            let snippet = &body[..snippet_len];
            tracing::error!(error = %e, body_snippet = %snippet, "failed to parse books response");
            Err(e.into())
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BooksPageResponse {
    pub status_code: Option<u16>,
    pub data: BooksPage,
    pub message: Option<String>,
    pub success: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BooksPage {
    pub data: Vec<Book>,
    pub total_pages: u32,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub total_items: Option<u32>,
    pub current_page_items: Option<u32>,
    pub previous_page: Option<bool>,
    pub next_page: Option<bool>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub status_code: Option<u16>,
    pub data: Book,
    pub message: Option<String>,
    pub success: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(deserialize_with = "de::string_from_str_or_num")]
    pub id: String,
    pub kind: Option<String>,
    pub etag: Option<String>,
    /// Records missing this block still render, with every field defaulted.
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub authors: Option<Vec<String>>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub categories: Option<Vec<String>>,
    pub description: Option<String>,
    pub preview_link: Option<String>,
    pub info_link: Option<String>,
    pub image_links: Option<ImageLinks>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageLinks {
    pub small_thumbnail: Option<String>,
    pub thumbnail: Option<String>,
}

impl VolumeInfo {
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn first_author(&self) -> &str {
        self.authors
            .as_ref()
            .and_then(|a| a.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.image_links
            .as_ref()
            .and_then(|l| l.thumbnail.as_deref())
            .filter(|t| !t.is_empty())
    }
}

/// Internal serde helpers
pub mod de {
    use serde::{Deserialize, Deserializer};

    /// Accept an id given either as a string or a number.
    pub fn string_from_str_or_num<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NumOrStr {
            Num(i64),
            Str(String),
        }

        Ok(match NumOrStr::deserialize(deserializer)? {
            NumOrStr::Num(n) => n.to_string(),
            NumOrStr::Str(s) => s,
        })
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn url_joins_paths() {
        let c = BooksClient::new("https://api.freeapi.app/api/v1/public/").unwrap();
        assert_eq!(
            c.url("/books/abc"),
            "https://api.freeapi.app/api/v1/public/books/abc"
        );
        assert_eq!(c.url("books"), "https://api.freeapi.app/api/v1/public/books");
    }

    #[test]
    fn book_url_encodes_reserved_characters() {
        let c = BooksClient::new("https://api.freeapi.app/api/v1/public").unwrap();
        assert_eq!(
            c.book_url("9HEEAQAAMAAJ").unwrap().as_str(),
            "https://api.freeapi.app/api/v1/public/books/9HEEAQAAMAAJ"
        );
        assert_eq!(
            c.book_url("a#b/c?d").unwrap().as_str(),
            "https://api.freeapi.app/api/v1/public/books/a%23b%2Fc%3Fd"
        );
    }

    #[test]
    fn books_page_deserialize_example() {
        let json = r#"{
    "statusCode": 200,
    "data": {
        "page": 1,
        "limit": 10,
        "totalPages": 22,
        "previousPage": false,
        "nextPage": true,
        "totalItems": 214,
        "currentPageItems": 2,
        "data": [
            {
                "kind": "books#volume",
                "id": "9HEEAQAAMAAJ",
                "etag": "q4nfsfWDs00",
                "volumeInfo": {
                    "title": "The Hobbit",
                    "authors": ["J.R.R. Tolkien"],
                    "publisher": "Houghton Mifflin",
                    "publishedDate": "1937-09-21",
                    "categories": ["Fiction"],
                    "imageLinks": {
                        "smallThumbnail": "http://books.google.com/s.jpg",
                        "thumbnail": "http://books.google.com/t.jpg"
                    },
                    "previewLink": "http://books.google.com/preview",
                    "infoLink": "http://books.google.com/info",
                    "pageCount": 310
                }
            },
            { "id": "no-volume-info" }
        ]
    },
    "message": "Books fetched successfully",
    "success": true
}"#;

        let parsed: BooksPageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data.total_pages, 22);
        assert_eq!(parsed.data.total_items, Some(214));
        assert_eq!(parsed.data.data.len(), 2);
        let hobbit = &parsed.data.data[0];
        assert_eq!(hobbit.kind.as_deref(), Some("books#volume"));
        assert_eq!(hobbit.volume_info.first_author(), "J.R.R. Tolkien");
        assert_eq!(
            hobbit.volume_info.thumbnail(),
            Some("http://books.google.com/t.jpg")
        );
        let bare = &parsed.data.data[1];
        assert_eq!(bare.volume_info, VolumeInfo::default());
        assert_eq!(bare.volume_info.title_or_empty(), "");
    }

    #[test]
    fn numeric_id_is_accepted() {
        let book: Book = serde_json::from_str(r#"{ "id": 42, "volumeInfo": {} }"#).unwrap();
        assert_eq!(book.id, "42");
    }

    #[tokio::test]
    async fn get_books_sends_paging_and_include() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/books")
                .query_param("page", "3")
                .query_param("limit", "10")
                .query_param("inc", LIST_INCLUDE);
            then.status(200).json_body(json!({
                "data": { "data": [{ "id": "a", "volumeInfo": { "title": "A" } }], "totalPages": 5 }
            }));
        });

        let client = BooksClient::new(server.base_url()).unwrap();
        let page = client.fetch_page(3, 10).await.unwrap();
        mock.assert();
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.data[0].volume_info.title.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn get_book_unwraps_data() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/books/xyz");
            then.status(200).json_body(json!({
                "statusCode": 200,
                "data": { "id": "xyz", "volumeInfo": { "title": "Dune", "subtitle": "A novel" } },
                "success": true
            }));
        });

        let client = BooksClient::new(server.base_url()).unwrap();
        let book = client.fetch_book("xyz").await.unwrap();
        mock.assert();
        assert_eq!(book.id, "xyz");
        assert_eq!(book.volume_info.subtitle.as_deref(), Some("A novel"));
    }

    #[tokio::test]
    async fn reserved_characters_stay_in_the_id() {
        let server = MockServer::start_async().await;
        let truncated = server.mock(|when, then| {
            when.method(GET).path("/books/a");
            then.status(200).json_body(json!({
                "data": { "id": "a", "volumeInfo": { "title": "Wrong" } }
            }));
        });

        let client = BooksClient::new(server.base_url()).unwrap();
        let result = client.fetch_book("a#b").await;
        assert_eq!(truncated.hits(), 0);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn error_status_is_a_failure() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/books/missing");
            then.status(404).body("not found");
        });

        let client = BooksClient::new(server.base_url()).unwrap();
        assert!(client.fetch_book("missing").await.is_err());
    }

    #[tokio::test]
    async fn malformed_body_is_a_failure() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/books");
            then.status(200).body("<html>oops</html>");
        });

        let client = BooksClient::new(server.base_url()).unwrap();
        assert!(client.fetch_page(1, 10).await.is_err());
    }
}
