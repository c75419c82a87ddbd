//! Catalog store
//!
//! Holds the project and blog fixtures for the lifetime of the process and
//! answers listing, detail and related-item queries over them.

use serde::Serialize;
use std::path::Path;
use tracing::info;

use super::filter::{filter_blogs, filter_projects, paginate, FilterState, Page, ALL};
use super::models::{BlogPost, Project};
use crate::types::{FolioError, Result};

/// Related items shown under a detail page
pub const RELATED_LIMIT: usize = 3;

/// Immutable project and blog collections
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    projects: Vec<Project>,
    blogs: Vec<BlogPost>,
}

/// A filtered listing page plus the context a listing UI needs
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView<'a, T> {
    #[serde(flatten)]
    pub page: Page<'a, T>,
    /// Items matching the filters (all pages)
    pub matched: usize,
    /// Items in the whole collection
    pub total: usize,
    /// Selector values, starting with "All"
    pub selections: Vec<String>,
    pub filters: FilterState,
    /// True when an empty result should offer "clear filters"
    pub filters_active: bool,
    /// First featured item of the filtered result (blogs only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotlight: Option<&'a T>,
}

impl Catalog {
    pub fn new(projects: Vec<Project>, blogs: Vec<BlogPost>) -> Self {
        Self { projects, blogs }
    }

    /// Load both collections from JSON fixture files
    pub fn load(projects_path: &Path, blogs_path: &Path) -> Result<Self> {
        let projects: Vec<Project> = read_fixture(projects_path)?;
        let blogs: Vec<BlogPost> = read_fixture(blogs_path)?;

        info!(
            "Catalog loaded: {} projects from {}, {} blog posts from {}",
            projects.len(),
            projects_path.display(),
            blogs.len(),
            blogs_path.display()
        );

        Ok(Self::new(projects, blogs))
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn blogs(&self) -> &[BlogPost] {
        &self.blogs
    }

    /// "All" followed by each project category in first-appearance order
    pub fn categories(&self) -> Vec<String> {
        distinct_with_all(self.projects.iter().map(|p| p.category.as_str()))
    }

    /// "All" followed by each blog tag in first-appearance order
    pub fn tags(&self) -> Vec<String> {
        distinct_with_all(
            self.blogs
                .iter()
                .flat_map(|b| b.tags.iter().map(String::as_str)),
        )
    }

    pub fn project(&self, id: u32) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn blog(&self, slug: &str) -> Option<&BlogPost> {
        self.blogs.iter().find(|b| b.slug == slug)
    }

    /// Other projects in the same category, fixture order
    pub fn related_projects(&self, project: &Project) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| p.id != project.id && p.category == project.category)
            .take(RELATED_LIMIT)
            .collect()
    }

    /// Other posts sharing at least one tag, fixture order
    pub fn related_blogs(&self, post: &BlogPost) -> Vec<&BlogPost> {
        self.blogs
            .iter()
            .filter(|b| b.id != post.id && b.tags.iter().any(|tag| post.tags.contains(tag)))
            .take(RELATED_LIMIT)
            .collect()
    }

    /// Filtered project listing page
    pub fn query_projects(&self, mut filters: FilterState, page_size: usize) -> CatalogView<'_, Project> {
        let filtered = filter_projects(&self.projects, &filters);
        let matched = filtered.len();
        let page = paginate(filtered, filters.page, page_size);
        filters.page = page.page;

        CatalogView {
            page,
            matched,
            total: self.projects.len(),
            selections: self.categories(),
            filters_active: filters.is_active(),
            filters,
            spotlight: None,
        }
    }

    /// Filtered blog listing page, newest first
    pub fn query_blogs(&self, mut filters: FilterState, page_size: usize) -> CatalogView<'_, BlogPost> {
        let filtered = filter_blogs(&self.blogs, &filters);
        let matched = filtered.len();
        let spotlight = filtered.iter().find(|b| b.featured).copied();
        let page = paginate(filtered, filters.page, page_size);
        filters.page = page.page;

        CatalogView {
            page,
            matched,
            total: self.blogs.len(),
            selections: self.tags(),
            filters_active: filters.is_active(),
            filters,
            spotlight,
        }
    }
}

fn read_fixture<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        FolioError::Storage(format!("Failed to read {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&raw)
        .map_err(|e| FolioError::Storage(format!("Invalid fixture {}: {}", path.display(), e)))
}

fn distinct_with_all<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out = vec![ALL.to_string()];
    for value in values {
        if !out.iter().any(|seen| seen == value) {
            out.push(value.to_string());
        }
    }
    out
}
