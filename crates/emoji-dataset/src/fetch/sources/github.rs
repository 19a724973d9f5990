use super::{FeedSource, Location};
use crate::aliases::{AliasTable, parse_aliases};
use crate::error::Result;

/// GitHub's emoji short-name registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubSource {
    pub location: Location,
}

impl FeedSource for GithubSource {
    type Output = AliasTable;

    #[tracing::instrument(name = "fetch_github", level = "debug", skip_all, fields(location = %self.location))]
    async fn fetch(&self, client: &reqwest::Client) -> Result<AliasTable> {
        let json = self.location.read_text(client).await?;
        let aliases = parse_aliases(&json)?;

        tracing::info!(characters = aliases.len(), "loaded GitHub aliases");
        Ok(aliases)
    }
}
