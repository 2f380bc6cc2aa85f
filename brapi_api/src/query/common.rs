//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] paging
//! fields, and the free-form [`QueryParams`].

use url::Url;

/// Anything that can contribute query-string parameters to a request.
///
/// `Send + Sync` so a borrowed query can be held across an `.await` inside a
/// spawned task.
pub trait Query: Send + Sync {
    /// The `name=value` pairs this query sends, in order.
    fn query_pairs(&self) -> Vec<(String, String)>;

    /// Appends this query's parameters to the given URL, returning the
    /// modified URL. A query without parameters leaves the URL untouched, so
    /// no dangling `?` is produced.
    fn add_to_url(&self, url: &Url) -> Url {
        let pairs = self.query_pairs();
        let mut url = url.clone();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(&pairs);
        }
        url
    }
}

/// Builder methods for typed queries that carry [`QueryCommon`] fields.
pub trait PagedQuery: Query {
    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets the page number (0-indexed, as BrAPI counts pages).
    fn with_page(mut self, page: u64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page = Some(page);
        self
    }

    /// Sets the number of results per page.
    fn with_page_size(mut self, page_size: u64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page_size = Some(page_size);
        self
    }
}

/// Paging fields shared by typed queries. `None` leaves the server default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueryCommon {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl QueryCommon {
    pub fn push_pairs(&self, pairs: &mut Vec<(String, String)>) {
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("pageSize".to_string(), page_size.to_string()));
        }
    }
}

/// Caller-supplied `name -> value` string pairs, forwarded verbatim.
///
/// This is what a page load derives from the browser URL: the client does
/// not interpret the values, it only encodes them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the query string of `url`, preserving order and repeats.
    pub fn from_url(url: &Url) -> Self {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Appends a pair. Repeated names are kept.
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.pairs.push((name.to_string(), value.to_string()));
        self
    }

    /// Replaces every pair named `name` with a single pair.
    pub fn set(&mut self, name: &str, value: &str) {
        self.pairs.retain(|(k, _)| k != name);
        self.pairs.push((name.to_string(), value.to_string()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}

impl FromIterator<(String, String)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl Query for QueryParams {
    fn query_pairs(&self) -> Vec<(String, String)> {
        self.pairs.clone()
    }
}
