//! Catalog records
//!
//! Projects and blog posts are loaded once from JSON fixtures and never
//! mutated afterwards. Field names follow the fixture format (camelCase).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A portfolio project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub description: String,
    /// Single category used by the category filter (e.g. "Backend")
    pub category: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    pub date: NaiveDate,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub github_repo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_demo: Option<String>,
}

/// A blog article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: u32,
    /// URL slug used by the detail route
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    /// Full article body
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    pub date: NaiveDate,
    #[serde(default)]
    pub author: String,
    /// Display string such as "5 min read"
    #[serde(default)]
    pub read_time: String,
    #[serde(default)]
    pub image: String,
}

/// Common view over projects and blog posts used by the filter engine.
///
/// `needle` arguments are already lowercased.
pub trait CatalogItem {
    /// Whether the item belongs to the given category or tag.
    fn in_selection(&self, selection: &str) -> bool;

    fn is_featured(&self) -> bool;

    /// Case-insensitive substring match across the item's searchable fields.
    fn matches_search(&self, needle: &str) -> bool;

    fn date(&self) -> NaiveDate;
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl CatalogItem for Project {
    fn in_selection(&self, selection: &str) -> bool {
        self.category == selection
    }

    fn is_featured(&self) -> bool {
        self.featured
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.title, needle)
            || contains_ci(&self.description, needle)
            || self.technologies.iter().any(|tech| contains_ci(tech, needle))
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl CatalogItem for BlogPost {
    fn in_selection(&self, selection: &str) -> bool {
        self.tags.iter().any(|tag| tag == selection)
    }

    fn is_featured(&self) -> bool {
        self.featured
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.title, needle)
            || contains_ci(&self.excerpt, needle)
            || contains_ci(&self.content, needle)
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}
