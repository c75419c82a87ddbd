//! Catalog filter engine
//!
//! Pure functions from `(items, FilterState)` to an ordered, paginated view.
//! Nothing here performs I/O or fails: unknown selections simply match
//! nothing, and out-of-range pages are clamped.

use serde::Serialize;

use super::models::{BlogPost, CatalogItem, Project};

/// Selection sentinel that disables the category/tag predicate
pub const ALL: &str = "All";

/// Filter inputs for a catalog listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Category (projects) or tag (blogs); `"All"` means no filter
    pub selection: String,
    pub featured_only: bool,
    pub search: String,
    /// 1-based page number
    pub page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            selection: ALL.to_string(),
            featured_only: false,
            search: String::new(),
            page: 1,
        }
    }
}

impl FilterState {
    pub fn with_selection(mut self, selection: impl Into<String>) -> Self {
        self.selection = selection.into();
        self
    }

    pub fn with_featured_only(mut self, featured_only: bool) -> Self {
        self.featured_only = featured_only;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Whether any predicate is active (drives the "clear filters" affordance)
    pub fn is_active(&self) -> bool {
        self.selection != ALL || self.featured_only || !self.search.trim().is_empty()
    }

    /// Reset every predicate and return to the first page
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Lowercased, trimmed search term, or None when search is disabled
    fn needle(&self) -> Option<String> {
        let term = self.search.trim();
        if term.is_empty() {
            None
        } else {
            Some(term.to_lowercase())
        }
    }
}

/// Apply selection, featured and search predicates, preserving input order.
pub fn apply_filters<'a, T: CatalogItem>(items: &'a [T], state: &FilterState) -> Vec<&'a T> {
    let needle = state.needle();

    items
        .iter()
        .filter(|item| state.selection == ALL || item.in_selection(&state.selection))
        .filter(|item| !state.featured_only || item.is_featured())
        .filter(|item| match &needle {
            Some(needle) => item.matches_search(needle),
            None => true,
        })
        .collect()
}

/// Filter projects; fixture order is preserved.
pub fn filter_projects<'a>(projects: &'a [Project], state: &FilterState) -> Vec<&'a Project> {
    apply_filters(projects, state)
}

/// Filter blog posts, newest first. Posts sharing a date keep fixture order.
pub fn filter_blogs<'a>(posts: &'a [BlogPost], state: &FilterState) -> Vec<&'a BlogPost> {
    let mut filtered = apply_filters(posts, state);
    filtered.sort_by(|a, b| b.date().cmp(&a.date()));
    filtered
}

/// One page of a filtered listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a, T> {
    pub items: Vec<&'a T>,
    /// Page actually served, after clamping
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Number of pages needed for `count` items
pub fn page_count(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Slice a filtered listing into a page.
///
/// The page index is clamped to `[1, total_pages]` (to 1 for an empty list).
pub fn paginate<'a, T>(items: Vec<&'a T>, page: usize, page_size: usize) -> Page<'a, T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = page_count(total_items, page_size);
    let page = page.clamp(1, total_pages.max(1));

    let start = ((page - 1) * page_size).min(total_items);
    let end = (start + page_size).min(total_items);

    let items = items.into_iter().skip(start).take(end - start).collect();

    Page {
        items,
        page,
        page_size,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn project(id: u32, category: &str, featured: bool) -> Project {
        Project {
            id,
            title: format!("Project {id}"),
            description: format!("Description of project {id}"),
            category: category.to_string(),
            technologies: vec!["React".to_string(), "Node.js".to_string()],
            featured,
            date: NaiveDate::from_ymd_opt(2024, 1, id).unwrap(),
            image: String::new(),
            github_repo: String::new(),
            live_demo: None,
        }
    }

    fn post(id: u32, date: &str, tags: &[&str], featured: bool) -> BlogPost {
        BlogPost {
            id,
            slug: format!("post-{id}"),
            title: format!("Post {id}"),
            excerpt: format!("Excerpt {id}"),
            content: format!("Body of post {id}"),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            featured,
            date: date.parse().unwrap(),
            author: "Me".to_string(),
            read_time: "2 min read".to_string(),
            image: String::new(),
        }
    }

    /// 8 projects, 3 of them Backend, 2 of those featured
    fn fixture() -> Vec<Project> {
        vec![
            project(1, "Frontend", true),
            project(2, "Backend", true),
            project(3, "Full Stack", false),
            project(4, "Backend", false),
            project(5, "Frontend", false),
            project(6, "Mobile", true),
            project(7, "Backend", true),
            project(8, "Full Stack", false),
        ]
    }

    fn ids(items: &[&Project]) -> Vec<u32> {
        items.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_default_state_returns_everything_in_order() {
        let projects = fixture();
        let result = filter_projects(&projects, &FilterState::default());
        assert_eq!(ids(&result), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_featured_only() {
        let projects = fixture();
        let state = FilterState::default().with_featured_only(true);
        let result = filter_projects(&projects, &state);
        assert!(!result.is_empty());
        assert!(result.iter().all(|p| p.featured));
    }

    #[test]
    fn test_category_filter() {
        let projects = fixture();
        let state = FilterState::default().with_selection("Frontend");
        let result = filter_projects(&projects, &state);
        assert_eq!(ids(&result), vec![1, 5]);
        assert!(result.iter().all(|p| p.category == "Frontend"));
    }

    #[test]
    fn test_backend_and_featured() {
        let projects = fixture();
        let state = FilterState::default()
            .with_selection("Backend")
            .with_featured_only(true);
        let result = filter_projects(&projects, &state);
        assert_eq!(ids(&result), vec![2, 7]);
    }

    #[test]
    fn test_unknown_category_matches_nothing() {
        let projects = fixture();
        let state = FilterState::default().with_selection("Embedded");
        assert!(filter_projects(&projects, &state).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let projects = fixture();
        let upper = filter_projects(&projects, &FilterState::default().with_search("REACT"));
        let lower = filter_projects(&projects, &FilterState::default().with_search("react"));
        assert_eq!(ids(&upper), ids(&lower));
        assert_eq!(upper.len(), 8);

        let title = filter_projects(&projects, &FilterState::default().with_search("project 4"));
        assert_eq!(ids(&title), vec![4]);
    }

    #[test]
    fn test_search_ands_with_other_filters() {
        let projects = fixture();
        let state = FilterState::default()
            .with_selection("Backend")
            .with_search("project 2");
        assert_eq!(ids(&filter_projects(&projects, &state)), vec![2]);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let projects = fixture();
        let state = FilterState::default().with_search("   ");
        assert_eq!(filter_projects(&projects, &state).len(), 8);
        assert!(!state.is_active());
    }

    #[test]
    fn test_blogs_newest_first() {
        let posts = vec![
            post(1, "2024-01-01", &["Rust"], false),
            post(2, "2025-06-01", &["Rust"], false),
        ];
        let result = filter_blogs(&posts, &FilterState::default());
        assert_eq!(result[0].id, 2);
        assert_eq!(result[1].id, 1);
    }

    #[test]
    fn test_blog_tag_membership_and_content_search() {
        let posts = vec![
            post(1, "2024-01-01", &["Rust", "Async"], false),
            post(2, "2024-02-01", &["React"], true),
            post(3, "2024-03-01", &["Async"], false),
        ];

        let async_posts = filter_blogs(&posts, &FilterState::default().with_selection("Async"));
        let ids: Vec<u32> = async_posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1]);

        let by_body = filter_blogs(&posts, &FilterState::default().with_search("BODY OF POST 2"));
        assert_eq!(by_body.len(), 1);
        assert_eq!(by_body[0].id, 2);
    }

    #[test]
    fn test_equal_dates_keep_fixture_order() {
        let posts = vec![
            post(1, "2024-05-05", &[], false),
            post(2, "2024-05-05", &[], false),
            post(3, "2024-05-05", &[], false),
        ];
        let ids: Vec<u32> = filter_blogs(&posts, &FilterState::default())
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_first_page_length() {
        let projects = fixture();
        let page = paginate(filter_projects(&projects, &FilterState::default()), 1, 6);
        assert_eq!(page.items.len(), 6);
        assert_eq!(page.total_pages, 2);

        let few = &projects[..3];
        let page = paginate(filter_projects(few, &FilterState::default()), 1, 6);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_page_beyond_last_clamps() {
        let projects = fixture();
        let page = paginate(filter_projects(&projects, &FilterState::default()), 99, 6);
        assert_eq!(page.page, 2);
        assert_eq!(ids(&page.items), vec![7, 8]);

        let page = paginate(filter_projects(&projects, &FilterState::default()), 0, 6);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_empty_result_pagination() {
        let projects = fixture();
        let state = FilterState::default().with_selection("Embedded");
        let page = paginate(filter_projects(&projects, &state), 3, 6);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_clear_resets_state() {
        let mut state = FilterState::default()
            .with_selection("Backend")
            .with_featured_only(true)
            .with_search("api")
            .with_page(3);
        assert!(state.is_active());

        state.clear();
        assert_eq!(state, FilterState::default());
        assert!(!state.is_active());
    }
}
