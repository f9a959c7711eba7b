use std::collections::HashMap;

use http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderMap, Method,
};
use log::{debug, warn};
use reqwest::blocking::{multipart, Client as ReqwestClient};

use crate::{Config, Form, Part, RawResult, RequestBody, Result, SignedRequest};

/// Performs the network round-trip of a signed request.
///
/// Implementations must send `authorization` as the only `Authorization`
/// header and must not interpret the response status.
pub trait Transport {
    fn send(&self, request: SignedRequest) -> Result<RawResult>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: SignedRequest) -> Result<RawResult> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: SignedRequest) -> Result<RawResult> {
        (**self).send(request)
    }
}

/// Blocking transport backed by `reqwest`.
///
/// `GET` responses are handed over unread as [`RawResult::Streamed`];
/// `POST` responses are read here and returned as [`RawResult::Protocol`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: ReqwestClient,
}

impl ReqwestTransport {
    pub fn new(config: &Config) -> Result<Self> {
        let builder = ReqwestClient::builder()
            .user_agent(config.user_agent.as_ref())
            .https_only(config.https_only)
            .timeout(config.timeout);

        if config.accept_invalid_certs {
            warn!("TLS certificate verification is disabled");
        }
        #[cfg(any(feature = "rustls-tls", feature = "native-tls"))]
        let builder = builder.danger_accept_invalid_certs(config.accept_invalid_certs);

        Ok(ReqwestTransport {
            inner: builder.build()?,
        })
    }

    /// Wraps an already configured `reqwest` blocking client.
    pub fn with_client(client: ReqwestClient) -> Self {
        ReqwestTransport { inner: client }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: SignedRequest) -> Result<RawResult> {
        let SignedRequest {
            method,
            url,
            authorization,
            body,
            timeout,
        } = request;
        debug!("{} {}{}", method, url.origin().ascii_serialization(), url.path());

        let streamed = method == Method::GET;
        let mut builder = self
            .inner
            .request(method, url)
            .header(AUTHORIZATION, authorization);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Raw(data) => builder.body(data),
            RequestBody::Multipart(form) if form.is_empty() => {
                // reqwest streams nothing at all for a form without parts
                let form = multipart::Form::new();
                builder
                    .header(
                        CONTENT_TYPE,
                        format!("multipart/form-data; boundary={}", form.boundary()),
                    )
                    .body(format!("--{}--\r\n", form.boundary()))
            }
            RequestBody::Multipart(form) => builder.multipart(multipart_form(form)),
        };

        let response = builder.send()?;
        let status = response.status();
        debug!("{} received", status);

        if streamed {
            let meta = meta_from_headers(response.headers());
            Ok(RawResult::streamed(Some(status), meta, response))
        } else {
            let headers = response.headers().clone();
            let body = response.bytes()?.to_vec();
            let mut raw = http::Response::new(body);
            *raw.status_mut() = status;
            *raw.headers_mut() = headers;
            Ok(RawResult::Protocol(raw))
        }
    }
}

fn multipart_form(form: Form) -> multipart::Form {
    form.into_iter()
        .fold(multipart::Form::new(), |acc, (name, part)| match part {
            Part::Text(value) => acc.text(name, value),
            Part::Bytes { data, file_name } => {
                let part = multipart::Part::bytes(data);
                let part = match file_name {
                    Some(file_name) => part.file_name(file_name),
                    None => part,
                };
                acc.part(name, part)
            }
        })
}

/// Flattens headers into single-valued metadata, joining repeats with `, `.
fn meta_from_headers(headers: &HeaderMap) -> HashMap<String, String> {
    let mut meta: HashMap<String, String> = HashMap::with_capacity(headers.keys_len());
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        meta.entry(name.as_str().to_string())
            .and_modify(|joined| {
                joined.push_str(", ");
                joined.push_str(&value);
            })
            .or_insert_with(|| value.to_string());
    }
    meta
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    #[test]
    fn meta_joins_repeated_headers() {
        let mut headers = HeaderMap::new();
        headers.append("content-type", HeaderValue::from_static("application/json"));
        headers.append("vary", HeaderValue::from_static("Accept"));
        headers.append("vary", HeaderValue::from_static("Origin"));

        let meta = meta_from_headers(&headers);
        assert_eq!(meta.len(), 2);
        assert_eq!(meta["content-type"], "application/json");
        assert_eq!(meta["vary"], "Accept, Origin");
    }

    #[test]
    fn builds_with_defaults() {
        assert!(ReqwestTransport::new(&Config::new()).is_ok());
        assert!(ReqwestTransport::new(&Config::new().danger_accept_invalid_certs(true)).is_ok());
    }
}
