//! Query string building and parsing.
//!
//! [`Query`] is an ordered mapping from keys to scalar or repeated
//! values. Serialization keeps insertion order, renders one parameter
//! per element of a repeated value, and drops empty entries entirely.
//!
//! # Example
//!
//! ```
//! use skiff_core::Query;
//!
//! let query = Query::new()
//!     .with("q", "rust")
//!     .with("tags", vec!["http", "async"])
//!     .with("page", None::<u32>);
//! assert_eq!(query.to_query_string(), "?q=rust&tags=http&tags=async");
//! ```

use url::form_urlencoded;

use crate::Result;

/// A value attached to a query key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// A single rendered value.
    One(String),
    /// One query parameter per element, under the same key, in order.
    Many(Vec<String>),
    /// Renders nothing; the whole pair is skipped.
    Empty,
}

impl QueryValue {
    /// Returns `true` if this value renders no query parameter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(_) => false,
            Self::Many(values) => values.is_empty(),
            Self::Empty => true,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Self::Empty
        } else {
            Self::One(value.to_string())
        }
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Self::Empty
        } else {
            Self::One(value)
        }
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::One(value.to_string())
    }
}

macro_rules! query_value_from_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    Self::One(value.to_string())
                }
            }
        )*
    };
}

query_value_from_number!(i32, i64, u32, u64, usize, f64);

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        let rendered = values
            .into_iter()
            .filter_map(|value| match value.into() {
                Self::One(v) => Some(v),
                Self::Many(vs) => vs.into_iter().next(),
                Self::Empty => None,
            })
            .collect::<Vec<_>>();
        if rendered.is_empty() {
            Self::Empty
        } else {
            Self::Many(rendered)
        }
    }
}

/// An ordered query parameter mapping.
///
/// Keys keep their insertion order; repeated values keep their element
/// order. Empty values ([`QueryValue::Empty`]) are retained in the
/// mapping but never rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, QueryValue)>,
}

impl Query {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a key/value pair, keeping insertion order.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Appends a key/value pair, builder-style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Returns `true` if no pair would render a query parameter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.iter().all(|(_, value)| value.is_empty())
    }

    /// Iterate over the pairs, including empty ones.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.pairs.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Builds a query from any serializable value.
    ///
    /// Uses `serde_html_form`, so `Vec<T>` fields become repeated keys
    /// and `Option::None` fields (with `skip_serializing_if`) are
    /// omitted.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn from_params<T: serde::Serialize>(params: &T) -> Result<Self> {
        let encoded = serde_html_form::to_string(params)?;
        Ok(Self::parse(&encoded))
    }

    /// Parses a query string, with or without the leading `?`.
    ///
    /// Repeated keys are grouped into [`QueryValue::Many`] in first-seen
    /// key order; a key seen once stays [`QueryValue::One`].
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.strip_prefix('?').unwrap_or(input);
        let mut query = Self::new();
        for (key, value) in form_urlencoded::parse(input.as_bytes()) {
            let existing = query
                .pairs
                .iter_mut()
                .find(|(existing, _)| existing.as_str() == key.as_ref());
            if let Some((_, slot)) = existing {
                match slot {
                    QueryValue::One(first) => {
                        let first = std::mem::take(first);
                        *slot = QueryValue::Many(vec![first, value.into_owned()]);
                    }
                    QueryValue::Many(values) => values.push(value.into_owned()),
                    QueryValue::Empty => *slot = QueryValue::One(value.into_owned()),
                }
            } else {
                query
                    .pairs
                    .push((key.into_owned(), QueryValue::One(value.into_owned())));
            }
        }
        query
    }

    /// Serializes to a URL-encoded query string with a leading `?`.
    ///
    /// Returns the empty string when nothing renders.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            match value {
                QueryValue::One(v) => {
                    serializer.append_pair(key, v);
                }
                QueryValue::Many(vs) => {
                    for v in vs {
                        serializer.append_pair(key, v);
                    }
                }
                QueryValue::Empty => {}
            }
        }
        let encoded = serializer.finish();
        if encoded.is_empty() {
            String::new()
        } else {
            format!("?{encoded}")
        }
    }

    /// Appends the rendered pairs to a URL's query.
    ///
    /// A query with nothing to render leaves the URL untouched (no
    /// stray `?`).
    pub fn append_to(&self, url: &mut url::Url) {
        if self.is_empty() {
            return;
        }
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &self.pairs {
            match value {
                QueryValue::One(v) => {
                    pairs.append_pair(key, v);
                }
                QueryValue::Many(vs) => {
                    for v in vs {
                        pairs.append_pair(key, v);
                    }
                }
                QueryValue::Empty => {}
            }
        }
    }
}

impl IntoIterator for Query {
    type Item = (String, QueryValue);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl<K: Into<String>, V: Into<QueryValue>> Extend<(K, V)> for Query {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.pairs.extend(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_render_nothing() {
        let query = Query::new()
            .with("a", "")
            .with("b", None::<&str>)
            .with("c", Vec::<String>::new());

        assert!(query.is_empty());
        assert_eq!(query.to_query_string(), "");
    }

    #[test]
    fn single_values_render_in_insertion_order() {
        let query = Query::new().with("q", "rust").with("page", 2_u32);
        assert_eq!(query.to_query_string(), "?q=rust&page=2");
    }

    #[test]
    fn array_values_repeat_the_key_in_order() {
        let query = Query::new().with("tags", vec!["b", "a", "c"]);
        assert_eq!(query.to_query_string(), "?tags=b&tags=a&tags=c");
    }

    #[test]
    fn zero_and_false_are_rendered() {
        // Only empty/absent values are skipped.
        let query = Query::new().with("count", 0_u32).with("draft", false);
        assert_eq!(query.to_query_string(), "?count=0&draft=false");
    }

    #[test]
    fn values_are_url_encoded() {
        let query = Query::new().with("q", "a b&c");
        assert_eq!(query.to_query_string(), "?q=a+b%26c");
    }

    #[test]
    fn skips_empty_but_keeps_later_pairs() {
        let query = Query::new()
            .with("a", "")
            .with("b", "2")
            .with("c", None::<u32>)
            .with("d", "4");
        assert_eq!(query.to_query_string(), "?b=2&d=4");
    }

    #[test]
    fn parse_groups_repeated_keys() {
        let query = Query::parse("?a=1&b=2&b=3");
        let pairs: Vec<_> = query.pairs().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs.first(), Some(&("a", &QueryValue::One("1".into()))));
        assert_eq!(
            pairs.get(1),
            Some(&("b", &QueryValue::Many(vec!["2".into(), "3".into()])))
        );
    }

    #[test]
    fn round_trip() {
        let query = Query::new().with("a", "1").with("b", vec!["2", "3"]);
        let parsed = Query::parse(&query.to_query_string());
        assert_eq!(parsed, query);
    }

    #[test]
    fn parse_decodes_percent_encoding() {
        let query = Query::parse("q=a+b%26c");
        assert_eq!(
            query.pairs().next(),
            Some(("q", &QueryValue::One("a b&c".into())))
        );
    }

    #[test]
    fn from_params_uses_serde() {
        #[derive(serde::Serialize)]
        struct Params {
            q: String,
            tags: Vec<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            page: Option<u32>,
        }

        let query = Query::from_params(&Params {
            q: "rust".to_string(),
            tags: vec!["http".to_string(), "async".to_string()],
            page: None,
        })
        .expect("serialize");

        assert_eq!(query.to_query_string(), "?q=rust&tags=http&tags=async");
    }

    #[test]
    fn append_to_url() {
        let mut url = url::Url::parse("https://api.example.com/posts").expect("valid URL");
        Query::new().with("userId", 7_u32).append_to(&mut url);
        assert_eq!(url.as_str(), "https://api.example.com/posts?userId=7");
    }
}
