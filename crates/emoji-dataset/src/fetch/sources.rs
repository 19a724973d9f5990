mod cldr;
mod emoji_test;
mod github;

pub use cldr::{CldrAnnotations, CldrSource};
pub use emoji_test::EmojiTestSource;
pub use github::GithubSource;

use crate::error::{BuildError, Result};
use std::fmt;
use std::path::PathBuf;

/// Where a feed's bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Downloaded over HTTP(S); redirects are followed
    Http(String),
    /// Read from the local filesystem
    Local(PathBuf),
}

impl Location {
    pub async fn read_bytes(&self, client: &reqwest::Client) -> Result<Vec<u8>> {
        match self {
            Location::Http(url) => {
                let response = get(client, url).await?;
                let bytes = response.bytes().await.map_err(|source| BuildError::Fetch {
                    url: url.clone(),
                    source,
                })?;
                Ok(bytes.to_vec())
            }
            Location::Local(path) => Ok(tokio::fs::read(path).await?),
        }
    }

    pub async fn read_text(&self, client: &reqwest::Client) -> Result<String> {
        match self {
            Location::Http(url) => {
                let response = get(client, url).await?;
                response.text().await.map_err(|source| BuildError::Fetch {
                    url: url.clone(),
                    source,
                })
            }
            Location::Local(path) => Ok(tokio::fs::read_to_string(path).await?),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Http(url) => f.write_str(url),
            Location::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

async fn get(client: &reqwest::Client, url: &str) -> Result<reqwest::Response> {
    client
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|source| BuildError::Fetch {
            url: url.to_string(),
            source,
        })
}

/// One upstream feed that can be retrieved and parsed on its own
pub trait FeedSource {
    type Output;

    fn fetch(&self, client: &reqwest::Client) -> impl Future<Output = Result<Self::Output>>;
}
