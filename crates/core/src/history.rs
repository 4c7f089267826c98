//! History browsing: search, category filter, sort and summary stats

use serde::{Deserialize, Serialize};

use crate::{optimizer::Category, store::Record};

/// Ratings at or above this count as high quality
pub const HIGH_QUALITY_RATING: u8 = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    /// Highest rating first, unrated last
    Rating,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryQuery {
    /// Case-insensitive text matched against original, optimized and tags
    pub search:   Option<String>,
    /// `None` means every category
    pub category: Option<Category>,
    pub sort:     SortOrder,
}

impl HistoryQuery {
    fn matches(&self, record: &Record, needle: Option<&str>) -> bool {
        if let Some(category) = &self.category {
            if &record.category != category {
                return false;
            }
        }

        match needle {
            None => true,
            Some(needle) => {
                record.original.to_lowercase().contains(needle)
                    || record.optimized.to_lowercase().contains(needle)
                    || record.tags.iter().any(|t| t.to_lowercase().contains(needle))
            },
        }
    }

    /// Filter and sort `records`, which are expected newest-first
    pub fn apply(&self, records: &[Record]) -> Vec<Record> {
        let needle = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut out: Vec<Record> = records
            .iter()
            .filter(|r| self.matches(r, needle.as_deref()))
            .cloned()
            .collect();

        match self.sort {
            SortOrder::Newest => out.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOrder::Oldest => out.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortOrder::Rating => out.sort_by(|a, b| b.rating_or_zero().cmp(&a.rating_or_zero())),
        }
        out
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub total:          usize,
    pub high_quality:   usize,
    /// Unrated records count as zero
    pub average_rating: f64,
}

impl HistoryStats {
    pub fn from_records(records: &[Record]) -> Self {
        let total = records.len();
        let high_quality = records
            .iter()
            .filter(|r| r.rating_or_zero() >= HIGH_QUALITY_RATING)
            .count();
        let sum: u32 = records.iter().map(|r| u32::from(r.rating_or_zero())).sum();
        let average_rating = if total == 0 {
            0.0
        } else {
            f64::from(sum) / total as f64
        };

        Self {
            total,
            high_quality,
            average_rating,
        }
    }
}
