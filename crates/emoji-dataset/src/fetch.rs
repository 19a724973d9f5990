pub mod config;
pub mod sources;

pub use config::Config;
pub use sources::{FeedSource, Location};

use crate::dataset::Dataset;
use crate::error::{BuildError, Result};
use crate::reconcile::Sources;

/// User agent sent with every request; the GitHub API rejects requests without one.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Retrieves and parses all upstream feeds
pub struct Fetcher {
    config: Config,
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(config: Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| BuildError::Client { source })?;
        Ok(Self { config, client })
    }

    /// Fetch and parse every feed concurrently.
    ///
    /// Returns only once all of them have completed; the first failure aborts
    /// the rest.
    pub async fn fetch_all(&self) -> Result<Sources> {
        let (cldr, categories, aliases) = tokio::try_join!(
            self.config.cldr.fetch(&self.client),
            self.config.emoji_test.fetch(&self.client),
            self.config.github.fetch(&self.client),
        )?;

        Ok(Sources {
            annotations: cldr.annotations,
            derived_annotations: cldr.derived,
            categories,
            aliases,
        })
    }

    /// Fetch everything and reconcile it into a dataset
    pub async fn build(&self) -> Result<Dataset> {
        let sources = self.fetch_all().await?;
        let dataset = sources.reconcile()?;
        tracing::info!(
            emoji = dataset.emoji.len(),
            fitzpatrick = dataset.fitzpatrick_count(),
            "reconciled emoji dataset"
        );
        Ok(dataset)
    }
}
