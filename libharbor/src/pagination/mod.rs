//! Pagination headers and list query options.
//!
//! List endpoints report the total number of items in `X-Total-Count` and
//! point at the following page with an RFC 5988 `Link` header.

use reqwest::header::{HeaderMap, LINK};
use url::form_urlencoded;

#[cfg(test)]
mod tests;

/// Header carrying the total number of items of a list endpoint.
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items of this page.
    pub items: Vec<T>,
    /// Total number of items across all pages, when the server reports it.
    pub total: Option<u64>,
    /// Target of the `rel="next"` link, when there is a following page.
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// Builds a page from decoded items and the response headers.
    pub fn from_headers(items: Vec<T>, headers: &HeaderMap) -> Self {
        Self {
            items,
            total: total_count(headers),
            next: next_link(headers),
        }
    }

    /// Returns true when the server advertised a following page.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// Extracts the `rel="next"` target from the `Link` header.
///
/// `Link: </api/v2.0/projects?page=2&page_size=10>; rel="next"`
pub fn next_link(headers: &HeaderMap) -> Option<String> {
    let link_header = headers.get(LINK)?;
    let link_str = link_header.to_str().ok()?;

    for link_part in link_str.split(',') {
        let link_part = link_part.trim();

        if (link_part.contains("rel=\"next\"") || link_part.contains("rel='next'"))
            && let Some(start) = link_part.find('<')
            && let Some(end) = link_part.find('>')
            && start < end
        {
            return Some(link_part[start + 1..end].to_string());
        }
    }

    None
}

/// Reads `X-Total-Count`, ignoring values that are not integers.
pub fn total_count(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(TOTAL_COUNT_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// Paging, query and sort options shared by the list endpoints.
///
/// Unset fields are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    /// Harbor query expression, e.g. `name=~nginx`.
    pub q: Option<String>,
    /// Sort expression, e.g. `-creation_time`.
    pub sort: Option<String>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_query<S: Into<String>>(mut self, q: S) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn with_sort<S: Into<String>>(mut self, sort: S) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Appends the set options to `query`.
    pub fn append_to(&self, query: &mut QueryBuilder) {
        query
            .push_opt("page", self.page)
            .push_opt("page_size", self.page_size)
            .push_opt("q", self.q.as_deref())
            .push_opt("sort", self.sort.as_deref());
    }

    /// Encodes the options as a query string without the leading `?`.
    ///
    /// # Examples
    ///
    /// ```
    /// use libharbor::pagination::ListOptions;
    ///
    /// let options = ListOptions::new().with_page(2).with_page_size(50);
    /// assert_eq!(options.to_query(), "page=2&page_size=50");
    /// ```
    pub fn to_query(&self) -> String {
        let mut query = QueryBuilder::new();
        self.append_to(&mut query);
        query.finish()
    }
}

/// Builds `application/x-www-form-urlencoded` query strings.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    pairs: Vec<(String, String)>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `key=value`.
    pub fn push<V: ToString>(&mut self, key: &str, value: V) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Appends `key=value` when a value is present.
    pub fn push_opt<V: ToString>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the encoded query string without the leading `?`.
    pub fn finish(self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs)
            .finish()
    }

    /// Appends the encoded query to `path`, adding `?` only when needed.
    pub fn apply_to(self, path: &str) -> String {
        if self.is_empty() {
            return path.to_string();
        }
        let separator = if path.contains('?') { '&' } else { '?' };
        format!("{}{}{}", path, separator, self.finish())
    }
}
