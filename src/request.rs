use std::{borrow::Cow, time::Duration};

use http::Method;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use url::Url;

use crate::Result;

/// A request with its `Authorization` value computed, ready for a
/// [`Transport`](crate::Transport).
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: Method,
    /// Resource URL including the signed query string.
    pub url: Url,
    /// Value of the single `Authorization` header.
    pub authorization: String,
    pub body: RequestBody,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// Sent as-is; never part of the signature.
    Raw(Vec<u8>),
    /// Sent as `multipart/form-data`; never part of the signature.
    Multipart(Form),
}

impl RequestBody {
    pub fn is_empty(&self) -> bool {
        matches!(self, RequestBody::Empty)
    }
}

/// Ordered `multipart/form-data` fields.
///
/// ```
/// # use twitter_api_thin::Form;
/// let form = Form::new()
///     .text("media_category", "tweet_image")
///     .file("media", "cat.png", vec![0x89, 0x50, 0x4e, 0x47]);
/// assert_eq!(form.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    fields: Vec<(String, Part)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    Bytes {
        data: Vec<u8>,
        file_name: Option<String>,
    },
}

impl Form {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add a text field.
    pub fn text<K, V>(self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.part(name, Part::Text(value.into()))
    }

    /// Add a binary field without a file name.
    pub fn bytes<K, V>(self, name: K, data: V) -> Self
    where
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        self.part(
            name,
            Part::Bytes {
                data: data.into(),
                file_name: None,
            },
        )
    }

    /// Add a binary field announced with `filename=` in its disposition.
    pub fn file<K, F, V>(self, name: K, file_name: F, data: V) -> Self
    where
        K: Into<String>,
        F: Into<String>,
        V: Into<Vec<u8>>,
    {
        self.part(
            name,
            Part::Bytes {
                data: data.into(),
                file_name: Some(file_name.into()),
            },
        )
    }

    pub fn part<K: Into<String>>(mut self, name: K, part: Part) -> Self {
        self.fields.push((name.into(), part));
        self
    }

    pub fn fields(&self) -> &[(String, Part)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl IntoIterator for Form {
    type Item = (String, Part);
    type IntoIter = std::vec::IntoIter<(String, Part)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Splits `base_url` into its query-less form and the urlencoded query that
/// will be both signed and sent.
///
/// A query already present on `base_url` is kept in front of `params`.
pub(crate) fn resource_query<T: Serialize + ?Sized>(
    base_url: &str,
    params: &T,
) -> Result<(Url, String)> {
    let mut url = Url::parse(base_url)?;
    let mut query = match url.query() {
        None | Some("") => String::new(),
        Some(q) => q.to_string(),
    };
    url.set_query(None);
    // never sent, so never signed
    url.set_fragment(None);

    let encoded = serde_urlencoded::to_string(params)?;
    if !encoded.is_empty() {
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(&encoded);
    }
    Ok((url, query))
}

/// `base_url` with `query` attached; no `?` is added for an empty query.
pub(crate) fn with_query(base_url: &Url, query: &str) -> Url {
    let mut url = base_url.clone();
    if !query.is_empty() {
        url.set_query(Some(query));
    }
    url
}

// RFC 3986 unreserved characters stay as they are
pub(crate) const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encodes `value` for use as one path segment.
pub(crate) fn path_segment(value: &str) -> Cow<str> {
    utf8_percent_encode(value, UNRESERVED).into()
}
