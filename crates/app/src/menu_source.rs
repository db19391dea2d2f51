//! Menu catalog loader.
//!
//! Fetches the item list from the server's `GET /api/menu` endpoint. Any
//! non-success status, transport failure or undecodable body is a load
//! failure; there are no retries.

use std::future::Future;

use thiserror::Error;
use url::Url;

use food3d_core::MenuItem;

/// Path of the menu endpoint relative to the API base URL.
pub const MENU_PATH: &str = "api/menu";

/// Errors that can occur when loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("HTTP error! Status: {0}")]
    Status(u16),

    /// Response body is not a JSON array of menu items.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured base URL cannot be joined with the menu path.
    #[error("invalid menu URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Something that can produce the full menu.
pub trait MenuSource {
    /// Fetch the complete item list.
    fn fetch_menu(&self) -> impl Future<Output = Result<Vec<MenuItem>, CatalogError>> + Send;
}

/// Loads the menu over HTTP.
#[derive(Debug, Clone)]
pub struct HttpMenuSource {
    client: reqwest::Client,
    menu_url: Url,
}

impl HttpMenuSource {
    /// Create a loader for the server at `api_url`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidUrl` if the menu URL cannot be built and
    /// `CatalogError::Http` if the HTTP client fails to build.
    pub fn new(api_url: &Url) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            menu_url: menu_url(api_url)?,
        })
    }
}

impl MenuSource for HttpMenuSource {
    #[tracing::instrument(skip(self), fields(url = %self.menu_url))]
    async fn fetch_menu(&self) -> Result<Vec<MenuItem>, CatalogError> {
        let response = self.client.get(self.menu_url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Menu request failed");
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let items: Vec<MenuItem> = serde_json::from_slice(&body)?;
        tracing::debug!(count = items.len(), "Menu fetched");
        Ok(items)
    }
}

/// `{api_url}/api/menu`, keeping any path prefix on the base URL.
fn menu_url(api_url: &Url) -> Result<Url, url::ParseError> {
    let mut base = api_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(MENU_PATH)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_url_from_bare_host() {
        let url = menu_url(&Url::parse("http://localhost:5000").unwrap()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/menu");
    }

    #[test]
    fn test_menu_url_keeps_prefix() {
        let url = menu_url(&Url::parse("https://example.com/food3d").unwrap()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/food3d/api/menu");

        let url = menu_url(&Url::parse("https://example.com/food3d/").unwrap()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/food3d/api/menu");
    }

    #[test]
    fn test_status_error_display() {
        assert_eq!(
            CatalogError::Status(503).to_string(),
            "HTTP error! Status: 503"
        );
    }
}
