// crates/core/src/types.rs

use serde::{Deserialize, Serialize};

/// Channel identifier as accepted by the YouTube Data API (e.g. "UCBR8-60-B28hp2BmDPdntcQ").
pub type ChannelId = String;

/// Identifier of a channel's "uploads" playlist (usually "UU" + the channel suffix).
pub type PlaylistId = String;

/// Free-form idea text returned verbatim from the model.
pub type IdeaText = String;

/// Recent upload titles in API response order (typically newest first).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoTitleList(pub Vec<String>);

impl VideoTitleList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Titles joined one per line, the shape the prompt embeds.
    pub fn joined(&self) -> String {
        self.0.join("\n")
    }
}

impl From<Vec<String>> for VideoTitleList {
    fn from(titles: Vec<String>) -> Self {
        Self(titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_keeps_order() {
        let titles = VideoTitleList::from(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(titles.joined(), "A\nB");
        assert_eq!(titles.len(), 2);
    }

    #[test]
    fn test_empty_list_joins_to_empty_string() {
        let titles = VideoTitleList::default();
        assert!(titles.is_empty());
        assert_eq!(titles.joined(), "");
    }
}
