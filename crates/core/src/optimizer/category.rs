//! Prompt categories and target-model labels
//!
//! Both parse from any string without failing. Unrecognized values are kept
//! verbatim so records written by other versions still load.

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Domain a prompt belongs to, selects the rewrite rule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Creative,
    Technical,
    Business,
    Educational,
    Research,
    /// Anything outside the fixed set, rewritten with the fallback rule
    Unknown(String),
}

impl Category {
    /// All known categories in display order
    pub const KNOWN: [Category; 5] = [
        Category::Creative,
        Category::Technical,
        Category::Business,
        Category::Educational,
        Category::Research,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw {
            "creative" => Category::Creative,
            "technical" => Category::Technical,
            "business" => Category::Business,
            "educational" => Category::Educational,
            "research" => Category::Research,
            other => Category::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Creative => "creative",
            Category::Technical => "technical",
            Category::Business => "business",
            Category::Educational => "educational",
            Category::Research => "research",
            Category::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Unknown(_))
    }

    /// Display label shown by the views
    pub fn label(&self) -> &str {
        match self {
            Category::Creative => "创意写作",
            Category::Technical => "技术开发",
            Category::Business => "商业分析",
            Category::Educational => "教育培训",
            Category::Research => "学术研究",
            Category::Unknown(raw) => raw,
        }
    }
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Category::parse(s))
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        match Category::parse(&raw) {
            Category::Unknown(_) => Category::Unknown(raw),
            known => known,
        }
    }
}

impl From<&str> for Category {
    fn from(raw: &str) -> Self {
        Category::parse(raw)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model the optimized prompt is aimed at
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Target {
    ChatGpt,
    Claude,
    Gemini,
    #[default]
    General,
    Other(String),
}

impl Target {
    /// Parse an optional label, blank or missing means `General`
    pub fn from_label(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Target::General,
            Some("chatgpt") => Target::ChatGpt,
            Some("claude") => Target::Claude,
            Some("gemini") => Target::Gemini,
            Some("general") => Target::General,
            Some(other) => Target::Other(other.to_string()),
        }
    }

    /// Parse a label the user may have left unset, blank or missing is `None`
    pub fn picked(raw: Option<&str>) -> Option<Self> {
        raw.map(str::trim)
            .filter(|label| !label.is_empty())
            .map(|label| Target::from_label(Some(label)))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Target::ChatGpt => "chatgpt",
            Target::Claude => "claude",
            Target::Gemini => "gemini",
            Target::General => "general",
            Target::Other(raw) => raw,
        }
    }
}

impl From<String> for Target {
    fn from(raw: String) -> Self {
        Target::from_label(Some(&raw))
    }
}

impl From<Target> for String {
    fn from(target: Target) -> Self {
        target.as_str().to_string()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
