use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::optimizer::Category;

/// A saved original/optimized prompt pair
///
/// Serialized with camelCase keys; `createdAt` is an RFC 3339 string and
/// `rating` is omitted until set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id:         String,
    pub original:   String,
    pub optimized:  String,
    pub category:   Category,
    pub tags:       Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating:     Option<u8>,
}

impl Record {
    pub fn is_rated(&self) -> bool {
        self.rating.is_some()
    }

    /// Rating with unrated treated as zero, used for sorting and averages
    pub fn rating_or_zero(&self) -> u8 {
        self.rating.unwrap_or(0)
    }
}
