#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub books_api_url: String,
    pub bind_addr: String,
    pub public_url: String,
}

const DEFAULT_BOOKS_API_URL: &str = "https://api.freeapi.app/api/v1/public";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let books_api_url = lookup("BOOKS_API_URL").unwrap_or(DEFAULT_BOOKS_API_URL.into());
        let bind_addr = lookup("BIND_ADDR").unwrap_or(DEFAULT_BIND_ADDR.into());
        let public_url = lookup("PUBLIC_URL").unwrap_or(DEFAULT_PUBLIC_URL.into());
        Config {
            books_api_url,
            bind_addr,
            public_url,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.books_api_url.is_empty() {
            return Err("BOOKS_API_URL is missing".into());
        }
        let url = &self.books_api_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(format!(
                "BOOKS_API_URL must be an http(s) URL, got {}",
                self.books_api_url
            ));
        }
        if self.bind_addr.is_empty() {
            return Err("BIND_ADDR is missing".into());
        }
        Ok(())
    }
}
