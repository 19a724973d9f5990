use super::{FeedSource, Location};
use crate::categories::{CategoryEntry, parse_categories};
use crate::error::Result;

/// The Unicode `emoji-test.txt` enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiTestSource {
    pub location: Location,
}

impl FeedSource for EmojiTestSource {
    type Output = Vec<CategoryEntry>;

    #[tracing::instrument(name = "fetch_emoji_test", level = "debug", skip_all, fields(location = %self.location))]
    async fn fetch(&self, client: &reqwest::Client) -> Result<Vec<CategoryEntry>> {
        let text = self.location.read_text(client).await?;
        let categories = parse_categories(&text)?;

        tracing::info!(count = categories.len(), "loaded emoji categories");
        Ok(categories)
    }
}
