//! Catalog routes
//!
//! - GET /api/projects?category=&featured=&q=&page=
//! - GET /api/projects/{id}
//! - GET /api/blogs?tag=&featured=&q=&page=
//! - GET /api/blogs/{slug}

use hyper::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::helpers::{error_response, json_response, missing_item_response, BoxBody};
use crate::catalog::{BlogPost, FilterState, Project};
use crate::server::AppState;
use crate::types::{FolioError, Result};

/// Listing query string; `category` applies to projects, `tag` to blogs
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub featured: Option<bool>,
    #[serde(alias = "search")]
    pub q: Option<String>,
    pub page: Option<usize>,
}

impl ListingQuery {
    pub fn parse(query: Option<&str>) -> Result<Self> {
        match query {
            None | Some("") => Ok(Self::default()),
            Some(raw) => serde_urlencoded::from_str(raw)
                .map_err(|e| FolioError::BadRequest(format!("Invalid query string: {}", e))),
        }
    }

    fn into_filters(self, selection: Option<String>) -> FilterState {
        let mut filters = FilterState::default();
        if let Some(selection) = selection.filter(|s| !s.trim().is_empty()) {
            filters = filters.with_selection(selection);
        }
        filters
            .with_featured_only(self.featured.unwrap_or(false))
            .with_search(self.q.unwrap_or_default())
            .with_page(self.page.unwrap_or(1))
    }

    pub fn project_filters(mut self) -> FilterState {
        let selection = self.category.take();
        self.into_filters(selection)
    }

    pub fn blog_filters(mut self) -> FilterState {
        let selection = self.tag.take();
        self.into_filters(selection)
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectDetail<'a> {
    pub project: &'a Project,
    pub related: Vec<&'a Project>,
}

#[derive(Debug, Serialize)]
pub struct BlogDetail<'a> {
    pub post: &'a BlogPost,
    pub related: Vec<&'a BlogPost>,
}

/// GET /api/projects
pub fn handle_list_projects(state: &AppState, query: Option<&str>) -> Response<BoxBody> {
    let filters = match ListingQuery::parse(query) {
        Ok(q) => q.project_filters(),
        Err(e) => return error_response(&e),
    };

    let view = state
        .catalog
        .query_projects(filters, state.args.projects_page_size);
    debug!(matched = view.matched, page = view.page.page, "Project listing");
    json_response(StatusCode::OK, &view)
}

/// GET /api/blogs
pub fn handle_list_blogs(state: &AppState, query: Option<&str>) -> Response<BoxBody> {
    let filters = match ListingQuery::parse(query) {
        Ok(q) => q.blog_filters(),
        Err(e) => return error_response(&e),
    };

    let view = state.catalog.query_blogs(filters, state.args.blogs_page_size);
    debug!(matched = view.matched, page = view.page.page, "Blog listing");
    json_response(StatusCode::OK, &view)
}

/// GET /api/projects/{id}
pub fn handle_get_project(state: &AppState, raw_id: &str) -> Response<BoxBody> {
    let project = raw_id
        .trim_end_matches('/')
        .parse::<u32>()
        .ok()
        .and_then(|id| state.catalog.project(id));

    match project {
        Some(project) => json_response(
            StatusCode::OK,
            &ProjectDetail {
                project,
                related: state.catalog.related_projects(project),
            },
        ),
        None => missing_item_response(format!("Project {} does not exist", raw_id), "/projects"),
    }
}

/// GET /api/blogs/{slug}
pub fn handle_get_blog(state: &AppState, raw_slug: &str) -> Response<BoxBody> {
    let slug = urlencoding::decode(raw_slug.trim_end_matches('/'))
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw_slug.to_string());

    match state.catalog.blog(&slug) {
        Some(post) => json_response(
            StatusCode::OK,
            &BlogDetail {
                post,
                related: state.catalog.related_blogs(post),
            },
        ),
        None => missing_item_response(format!("Blog post '{}' does not exist", slug), "/blog"),
    }
}
