use std::time::Duration;

use http::Method;
use log::debug;
use oauth1_request::signature_method::SignatureMethod;
use oauth1_request::HmacSha1;
use serde::Serialize;

use crate::request::{resource_query, with_query};
use crate::{
    Config, Credentials, Endpoint, Form, OAuthParameters, ReqwestTransport, RequestBody, Response,
    Result, SignedRequest, Signer, Transport, Verb,
};

/// OAuth 1.0a signing API client.
///
/// Every call signs its parameters with the credentials given at
/// construction, sends them in the query string and wraps whatever the
/// server answered in a [`Response`]. Only failures to obtain a response
/// are errors.
#[derive(Debug)]
pub struct Client<'a, T = ReqwestTransport, TSignatureMethod = HmacSha1>
where
    TSignatureMethod: SignatureMethod + Clone,
{
    credentials: Credentials<'a>,
    parameters: OAuthParameters<'a, TSignatureMethod>,
    transport: T,
    timeout: Option<Duration>,
}

impl<'a> Client<'a> {
    /// Constructs a new `Client` with the default [`Config`].
    ///
    /// # Errors
    ///
    /// This method fails if the TLS backend cannot be initialized.
    pub fn new(credentials: Credentials<'a>) -> Result<Self> {
        Self::with_config(credentials, Config::new())
    }

    /// Constructs a new `Client` with specifying its transport settings.
    pub fn with_config(credentials: Credentials<'a>, config: Config) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Client::with_transport(credentials, transport))
    }
}

impl<'a, T> Client<'a, T>
where
    T: Transport,
{
    /// Constructs a new `Client` sending its requests through `transport`.
    pub fn with_transport(credentials: Credentials<'a>, transport: T) -> Self {
        Client {
            credentials,
            parameters: OAuthParameters::new(),
            transport,
            timeout: None,
        }
    }
}

impl<'a, T, TSignatureMethod> Client<'a, T, TSignatureMethod>
where
    T: Transport,
    TSignatureMethod: SignatureMethod + Clone,
{
    /// Replaces the OAuth parameters used for every signature.
    ///
    /// A fixed nonce or timestamp set here is reused by every call.
    pub fn oauth_parameters<TSM>(
        self,
        parameters: OAuthParameters<'a, TSM>,
    ) -> Client<'a, T, TSM>
    where
        TSM: SignatureMethod + Clone,
    {
        Client {
            credentials: self.credentials,
            parameters,
            transport: self.transport,
            timeout: self.timeout,
        }
    }

    /// Bounds each call, overriding the transport-wide timeout.
    pub fn timeout(self, timeout: Duration) -> Self {
        Client {
            timeout: Some(timeout),
            ..self
        }
    }

    pub fn credentials(&self) -> &Credentials<'a> {
        &self.credentials
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends a signed `GET` to `base_url` with `params` in the query string.
    pub fn get<P>(&self, base_url: &str, params: &P) -> Result<Response>
    where
        P: Serialize + ?Sized,
    {
        self.dispatch(Method::GET, base_url, params, RequestBody::Empty)
    }

    /// Sends a signed `POST` to `base_url` with `params` in the query string
    /// and `data`, if any, as the raw body.
    pub fn post<P>(&self, base_url: &str, params: &P, data: Option<Vec<u8>>) -> Result<Response>
    where
        P: Serialize + ?Sized,
    {
        let body = data.map(RequestBody::Raw).unwrap_or(RequestBody::Empty);
        self.dispatch(Method::POST, base_url, params, body)
    }

    /// Sends a signed `POST` to `base_url` with `params` in the query string
    /// and `form` as a `multipart/form-data` body.
    ///
    /// Only `params` are signed; the form fields never are.
    pub fn post_multipart<P>(&self, base_url: &str, params: &P, form: Form) -> Result<Response>
    where
        P: Serialize + ?Sized,
    {
        self.dispatch(Method::POST, base_url, params, RequestBody::Multipart(form))
    }

    /// Invokes a catalog endpoint; multipart endpoints get an empty form.
    pub fn call<P>(&self, endpoint: &Endpoint, params: &P) -> Result<Response>
    where
        P: Serialize + ?Sized,
    {
        let (url, rest) = self.resolve(endpoint, params)?;
        match endpoint.verb {
            Verb::Get => self.get(&url, &rest),
            Verb::Post => self.post(&url, &rest, None),
            Verb::Multipart => self.post_multipart(&url, &rest, Form::new()),
        }
    }

    /// Invokes a catalog endpoint as a multipart `POST` carrying `form`.
    pub fn call_multipart<P>(
        &self,
        endpoint: &Endpoint,
        params: &P,
        form: Form,
    ) -> Result<Response>
    where
        P: Serialize + ?Sized,
    {
        let (url, rest) = self.resolve(endpoint, params)?;
        self.post_multipart(&url, &rest, form)
    }

    /// Builds the request `dispatch` would send, without sending it.
    pub fn sign_request<P>(
        &self,
        method: Method,
        base_url: &str,
        params: &P,
        body: RequestBody,
    ) -> Result<SignedRequest>
    where
        P: Serialize + ?Sized,
    {
        let (url, query) = resource_query(base_url, params)?;
        let authorization =
            Signer::new(&self.credentials, self.parameters.clone()).sign(&method, &url, &query);
        Ok(SignedRequest {
            url: with_query(&url, &query),
            method,
            authorization,
            body,
            timeout: self.timeout,
        })
    }

    fn dispatch<P>(
        &self,
        method: Method,
        base_url: &str,
        params: &P,
        body: RequestBody,
    ) -> Result<Response>
    where
        P: Serialize + ?Sized,
    {
        let request = self.sign_request(method, base_url, params, body)?;
        let raw = self.transport.send(request)?;
        Response::new(raw)
    }

    fn resolve<P>(
        &self,
        endpoint: &Endpoint,
        params: &P,
    ) -> Result<(String, Vec<(String, String)>)>
    where
        P: Serialize + ?Sized,
    {
        debug!("calling {}", endpoint.name);
        let encoded = serde_urlencoded::to_string(params)?;
        let pairs = url::form_urlencoded::parse(encoded.as_bytes())
            .into_owned()
            .collect();
        endpoint.resolve(pairs)
    }
}
