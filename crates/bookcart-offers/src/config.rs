//! Offers endpoint configuration.
//!
//! Embedded as the `[offers]` section of the application config file:
//!
//! ```toml
//! [offers]
//! base_url = "http://henri-potier.xebia.fr"
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{OffersError, OffersResult};

/// Catalogue serving `/books/{isbns}/commercialOffers`.
pub const DEFAULT_BASE_URL: &str = "http://henri-potier.xebia.fr";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffersConfig {
    /// Base URL of the catalogue, without the `/books` path.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for OffersConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl OffersConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Checks that `base_url` is an absolute http(s) URL.
    pub fn validate(&self) -> OffersResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(OffersError::InvalidConfig("base_url is required".into()));
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| OffersError::InvalidUrl(format!("{}: {e}", self.base_url)))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(OffersError::InvalidUrl(format!(
                "{}: unsupported scheme '{other}'",
                self.base_url
            ))),
        }
    }

    /// Builds the commercial offers URL for `isbns`, in the given order.
    pub fn offers_url<I, T>(&self, isbns: I) -> String
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let joined = isbns
            .into_iter()
            .map(|isbn| urlencoding::encode(isbn.as_ref()).into_owned())
            .collect::<Vec<_>>()
            .join(",");

        format!(
            "{}/books/{joined}/commercialOffers",
            self.base_url.trim_end_matches('/')
        )
    }
}
