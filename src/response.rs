use std::{borrow::Cow, collections::HashMap, fmt, io::Read};

use http::{
    header::{HeaderName, HeaderValue},
    HeaderMap, StatusCode,
};
use log::debug;

use crate::Result;

/// What a transport produced, before normalization.
pub enum RawResult {
    /// Body still to be pulled from a reader; headers as plain metadata.
    Streamed(Streamed),
    /// Body already in memory; headers as plain metadata.
    Buffered {
        meta: HashMap<String, String>,
        body: Vec<u8>,
    },
    /// A complete HTTP response.
    Protocol(http::Response<Vec<u8>>),
    /// Anything else. Normalizes to a response without headers or body.
    Unrecognized,
}

pub struct Streamed {
    pub status: Option<StatusCode>,
    pub meta: HashMap<String, String>,
    pub reader: Box<dyn Read + Send>,
}

impl RawResult {
    pub fn streamed<R>(
        status: Option<StatusCode>,
        meta: HashMap<String, String>,
        reader: R,
    ) -> Self
    where
        R: Read + Send + 'static,
    {
        RawResult::Streamed(Streamed {
            status,
            meta,
            reader: Box::new(reader),
        })
    }

    /// Extracts status, headers and the whole body, draining a streamed body.
    ///
    /// `None` for [`RawResult::Unrecognized`].
    fn into_parts(self) -> Result<Option<(Option<StatusCode>, HeaderMap, Vec<u8>)>> {
        let parts = match self {
            RawResult::Streamed(mut streamed) => {
                let mut body = Vec::new();
                streamed.reader.read_to_end(&mut body)?;
                Some((streamed.status, headers_from_meta(&streamed.meta), body))
            }
            RawResult::Buffered { meta, body } => Some((None, headers_from_meta(&meta), body)),
            RawResult::Protocol(response) => {
                let (parts, body) = response.into_parts();
                Some((Some(parts.status), parts.headers, body))
            }
            RawResult::Unrecognized => None,
        };
        Ok(parts)
    }
}

impl fmt::Debug for RawResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawResult::Streamed(streamed) => f
                .debug_struct("Streamed")
                .field("status", &streamed.status)
                .field("meta", &streamed.meta)
                .finish(),
            RawResult::Buffered { meta, body } => f
                .debug_struct("Buffered")
                .field("meta", meta)
                .field("body_len", &body.len())
                .finish(),
            RawResult::Protocol(response) => f.debug_tuple("Protocol").field(response).finish(),
            RawResult::Unrecognized => f.write_str("Unrecognized"),
        }
    }
}

fn headers_from_meta(meta: &HashMap<String, String>) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(meta.len());
    for (name, value) in meta {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.append(name, value);
            }
            _ => debug!("skipping unrepresentable response header {:?}", name),
        }
    }
    headers
}

/// The outcome of one API call.
///
/// Headers and body are materialized when the response is built; the
/// transport result is never touched again. Status codes are not
/// interpreted: a 401 is as much a `Response` as a 200.
#[derive(Debug, Clone)]
pub struct Response {
    status: Option<StatusCode>,
    headers: Option<HeaderMap>,
    body: Option<Vec<u8>>,
}

impl Response {
    /// Normalizes `raw`, reading a streamed body to its end.
    ///
    /// # Errors
    ///
    /// Fails if reading a streamed body fails.
    pub fn new(raw: RawResult) -> Result<Self> {
        let response = match raw.into_parts()? {
            Some((status, headers, body)) => Response {
                status,
                headers: Some(headers),
                body: Some(body),
            },
            None => Response {
                status: None,
                headers: None,
                body: None,
            },
        };
        Ok(response)
    }

    /// Response headers, case-insensitive.
    ///
    /// Only a [`RawResult::Protocol`] keeps repeated headers apart; metadata
    /// of streamed and buffered results holds one value per name, so repeats
    /// arrive joined with `, ` (as [`ReqwestTransport`](crate::ReqwestTransport)
    /// does for `GET`).
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.headers.as_ref()
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// The body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> Option<Cow<'_, str>> {
        self.body.as_deref().map(String::from_utf8_lossy)
    }

    /// Status code, when the transport reported one.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn into_body(self) -> Option<Vec<u8>> {
        self.body
    }
}
