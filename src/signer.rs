use std::borrow::Cow;

use http::Method;
use oauth1_request::signature_method::SignatureMethod;
use oauth1_request::signer::Signer as OAuthSigner;
use oauth1_request::{HmacSha1, Options};
use percent_encoding::utf8_percent_encode;
use serde::Serialize;
use url::Url;

use crate::request::UNRESERVED;
use crate::{CredentialsProvider, Result, OAUTH_KEY_PREFIX, REALM_KEY};

/// Computes the `Authorization` header value of one request.
///
/// The signer is consumed by [`Signer::sign`]; build a new one per request.
#[derive(Debug, Clone)]
pub struct Signer<'a, TCredentials, TSignatureMethod>
where
    TCredentials: CredentialsProvider,
    TSignatureMethod: SignatureMethod + Clone,
{
    credentials: &'a TCredentials,
    parameters: OAuthParameters<'a, TSignatureMethod>,
}

impl<'a, TCredentials, TSignatureMethod> Signer<'a, TCredentials, TSignatureMethod>
where
    TCredentials: CredentialsProvider,
    TSignatureMethod: SignatureMethod + Clone,
{
    pub fn new(
        credentials: &'a TCredentials,
        parameters: OAuthParameters<'a, TSignatureMethod>,
    ) -> Self {
        Signer {
            credentials,
            parameters,
        }
    }

    /// Signs a request to `base_url` carrying the urlencoded `query`.
    ///
    /// `base_url` must not contain a query; `query` must be the exact
    /// parameter string sent on the wire so that the signed set and the sent
    /// set cannot diverge. `oauth_*` keys found in `query` are not signed.
    pub fn sign(self, method: &Method, base_url: &Url, query: &str) -> String {
        let (consumer_key, consumer_secret) = self.credentials.consumer_pair();
        let (token, token_secret) = self.credentials.token_pair();
        let options = self.parameters.build_options(token);

        let (before_oauth, after_oauth) = split_at_oauth(query);

        let mut signer = OAuthSigner::with_signature_method(
            self.parameters.signature_method.clone(),
            method.as_str(),
            base_url.clone(),
            consumer_secret,
            Some(token_secret),
        );
        // parameters must reach the signer in byte order of their encoded
        // form, with the oauth_* block at its own sorted position. Keys enter
        // the base string verbatim, so they are handed over encoded twice.
        for (key, value) in &before_oauth {
            signer.parameter_encoded(&encode(key), value);
        }
        let mut signer = signer.oauth_parameters(consumer_key, &options);
        for (key, value) in &after_oauth {
            signer.parameter_encoded(&encode(key), value);
        }

        let sign = signer.finish().authorization;

        if let Some(ref realm) = self.parameters.realm {
            // OAuth oauth_...,realm="realm"
            format!("{},{}=\"{}\"", sign, REALM_KEY, realm)
        } else {
            sign
        }
    }
}

/// Re-encodes `query` the RFC 5849 way, drops `oauth_*` keys, sorts the
/// encoded pairs and divides them into those before and after the `oauth_`
/// block.
fn split_at_oauth(query: &str) -> (Vec<(String, String)>, Vec<(String, String)>) {
    let mut pairs: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| !key.starts_with(OAUTH_KEY_PREFIX))
        .map(|(key, value)| (encode(&key), encode(&value)))
        .collect();
    pairs.sort();
    let at = pairs
        .iter()
        .position(|(key, _)| key.as_str() > OAUTH_KEY_PREFIX)
        .unwrap_or(pairs.len());
    let after = pairs.split_off(at);
    (pairs, after)
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, UNRESERVED).to_string()
}

/// Signs `params` for `method` and `base_url` with freshly generated nonce
/// and timestamp.
pub fn authorization<T, TCredentials>(
    method: &Method,
    base_url: &Url,
    params: &T,
    credentials: &TCredentials,
) -> Result<String>
where
    T: Serialize + ?Sized,
    TCredentials: CredentialsProvider,
{
    let query = serde_urlencoded::to_string(params)?;
    Ok(Signer::new(credentials, OAuthParameters::new()).sign(method, base_url, &query))
}

/// The `oauth_*` values that are not derived from the credentials.
///
/// Nonce and timestamp are generated per request unless fixed here; fixing
/// them is meant for tests and reproducible signatures.
#[derive(Debug, Clone)]
pub struct OAuthParameters<'a, TSignatureMethod>
where
    TSignatureMethod: SignatureMethod + Clone,
{
    nonce: Option<Cow<'a, str>>,
    realm: Option<Cow<'a, str>>,
    signature_method: TSignatureMethod,
    timestamp: Option<u64>,
    version: bool,
}

impl<'a> Default for OAuthParameters<'a, HmacSha1> {
    fn default() -> Self {
        OAuthParameters {
            nonce: None,
            realm: None,
            signature_method: HmacSha1,
            timestamp: None,
            version: true,
        }
    }
}

impl<'a> OAuthParameters<'a, HmacSha1> {
    pub fn new() -> Self {
        Default::default()
    }
}

impl<'a, T> OAuthParameters<'a, T>
where
    T: SignatureMethod + Clone,
{
    /// set the oauth_nonce value
    pub fn nonce<N>(self, nonce: N) -> Self
    where
        N: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            nonce: Some(nonce.into()),
            ..self
        }
    }

    /// set the realm value appended to the header
    pub fn realm<R>(self, realm: R) -> Self
    where
        R: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            realm: Some(realm.into()),
            ..self
        }
    }

    /// set the oauth_timestamp value
    pub fn timestamp<S>(self, timestamp: S) -> Self
    where
        S: Into<u64>,
    {
        OAuthParameters {
            timestamp: Some(timestamp.into()),
            ..self
        }
    }

    /// set whether `oauth_version="1.0"` is sent (default: sent)
    pub fn version(self, version: bool) -> Self {
        OAuthParameters { version, ..self }
    }

    pub fn signature_method<TSignatureMethod>(
        self,
        signature_method: TSignatureMethod,
    ) -> OAuthParameters<'a, TSignatureMethod>
    where
        TSignatureMethod: SignatureMethod + Clone,
    {
        OAuthParameters {
            signature_method,
            nonce: self.nonce,
            realm: self.realm,
            timestamp: self.timestamp,
            version: self.version,
        }
    }

    fn build_options(&'a self, token: &'a str) -> Options<'a> {
        let mut opt = Options::new();

        // NOTE: items must be added by alphabetical order
        if let Some(ref nonce) = self.nonce {
            opt.nonce(nonce.as_ref());
        }
        if let Some(timestamp) = self.timestamp {
            opt.timestamp(timestamp);
        }
        opt.token(token);
        opt.version(self.version);

        opt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Credentials;

    fn extract_signature(auth_header: &str) -> String {
        let content = auth_header.strip_prefix("OAuth ").unwrap();
        let mapped_header = content
            .split(',')
            .map(|item| item.splitn(2, '=').collect::<Vec<&str>>())
            .filter(|v| v.len() == 2)
            .map(|v| (v[0], v[1]))
            .collect::<Vec<(&str, &str)>>();
        let sig_content = mapped_header.iter().find(|(k, _)| k == &"oauth_signature");
        percent_encoding::percent_decode_str(sig_content.unwrap().1.trim_matches('"'))
            .decode_utf8_lossy()
            .to_string()
    }

    fn twitter_sample() -> Credentials<'static> {
        // https://developer.twitter.com/en/docs/authentication/oauth-1-0a/creating-a-signature
        Credentials::new(
            "xvz1evFS4wEEPTGEFPHBog",
            "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
            "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
            "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
        )
    }

    fn twitter_sample_params() -> OAuthParameters<'static, HmacSha1> {
        OAuthParameters::new()
            .nonce("kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg")
            .timestamp(1_318_622_958u64)
    }

    #[test]
    fn sign_twitter_post_sample() {
        let credentials = twitter_sample();
        let url = Url::parse("https://api.twitter.com/1.1/statuses/update.json").unwrap();
        let query = serde_urlencoded::to_string(&[
            ("include_entities", "true"),
            (
                "status",
                "Hello Ladies + Gentlemen, a signed OAuth request!",
            ),
        ])
        .unwrap();

        let sign =
            Signer::new(&credentials, twitter_sample_params()).sign(&Method::POST, &url, &query);
        assert_eq!(extract_signature(&sign), "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
        assert!(sign.starts_with("OAuth "));
        assert!(sign.contains("oauth_version=\"1.0\""));
        assert!(sign.contains("oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\""));
    }

    #[test]
    fn sign_rfc5849_get_sample() {
        // https://tools.ietf.org/html/rfc5849#section-1.2
        let credentials = Credentials::new(
            "dpf43f3p2l4k3l03",
            "kd94hf93k423kf44",
            "nnch734d00sl2jdk",
            "pfkkdhi9sl3r4s00",
        );
        let params = OAuthParameters::new()
            .nonce("chapoH")
            .timestamp(137_131_202u64)
            .realm("Photos")
            .version(false);
        let url = Url::parse("http://photos.example.net/photos").unwrap();

        let sign = Signer::new(&credentials, params).sign(
            &Method::GET,
            &url,
            "file=vacation.jpg&size=original",
        );
        assert_eq!(extract_signature(&sign), "MdpQcU8iPSUjWoN/UDMsK2sui9I=");
        assert!(sign.ends_with(",realm=\"Photos\""));
        assert!(!sign.contains("oauth_version"));
    }

    #[test]
    fn fixed_nonce_and_timestamp_are_deterministic() {
        let credentials = twitter_sample();
        let url = Url::parse("https://api.twitter.com/1.1/search/tweets.json").unwrap();
        let query = "q=rust&count=10";

        let first =
            Signer::new(&credentials, twitter_sample_params()).sign(&Method::GET, &url, query);
        let second =
            Signer::new(&credentials, twitter_sample_params()).sign(&Method::GET, &url, query);
        assert_eq!(first, second);
    }

    #[test]
    fn generated_nonce_varies() {
        let credentials = twitter_sample();
        let url = Url::parse("https://api.twitter.com/1.1/search/tweets.json").unwrap();

        let first =
            Signer::new(&credentials, OAuthParameters::new()).sign(&Method::GET, &url, "q=a");
        let second =
            Signer::new(&credentials, OAuthParameters::new()).sign(&Method::GET, &url, "q=a");
        assert_ne!(first, second);
    }

    #[test]
    fn parameter_order_does_not_matter() {
        let credentials = twitter_sample();
        let url = Url::parse("https://api.twitter.com/1.1/statuses/update.json").unwrap();

        let forward = Signer::new(&credentials, twitter_sample_params()).sign(
            &Method::POST,
            &url,
            "include_entities=true&status=hi",
        );
        let backward = Signer::new(&credentials, twitter_sample_params()).sign(
            &Method::POST,
            &url,
            "status=hi&include_entities=true",
        );
        assert_eq!(forward, backward);
    }

    #[test]
    fn every_parameter_is_signed() {
        let credentials = twitter_sample();
        let url = Url::parse("https://api.twitter.com/1.1/statuses/update.json").unwrap();

        let without = Signer::new(&credentials, twitter_sample_params()).sign(
            &Method::POST,
            &url,
            "status=hi",
        );
        let with_media = Signer::new(&credentials, twitter_sample_params()).sign(
            &Method::POST,
            &url,
            "media=x&status=hi",
        );
        assert_ne!(extract_signature(&without), extract_signature(&with_media));
    }

    #[test]
    fn user_supplied_oauth_keys_are_ignored() {
        let credentials = twitter_sample();
        let url = Url::parse("https://api.twitter.com/1.1/statuses/update.json").unwrap();

        let plain = Signer::new(&credentials, twitter_sample_params()).sign(
            &Method::POST,
            &url,
            "status=hi",
        );
        let spoofed = Signer::new(&credentials, twitter_sample_params()).sign(
            &Method::POST,
            &url,
            "oauth_token=evil&status=hi",
        );
        assert_eq!(plain, spoofed);
    }

    #[test]
    fn split_places_oauth_block() {
        let (before, after) = split_at_oauth("zeta=1&alpha=2&oauth_nonce=x&mid=3");
        let before: Vec<_> = before.iter().map(|(k, _)| k.as_str()).collect();
        let after: Vec<_> = after.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(before, vec!["alpha", "mid"]);
        assert_eq!(after, vec!["zeta"]);
    }

    fn plain_sample() -> (Credentials<'static>, OAuthParameters<'static, HmacSha1>, Url) {
        (
            Credentials::new("ck", "cs", "tk", "ts"),
            OAuthParameters::new().nonce("n").timestamp(1u64),
            Url::parse("https://api.example.com/r").unwrap(),
        )
    }

    #[test]
    fn keys_sort_by_encoded_bytes() {
        // `a%7B` sorts before `aA`, although `{` sorts after `A`
        let (credentials, params, url) = plain_sample();
        let sign = Signer::new(&credentials, params).sign(&Method::GET, &url, "aA=1&a%7B=2");
        assert_eq!(extract_signature(&sign), "h4R8G1pu8FJQ/oQAitM5M1rTsmE=");
    }

    #[test]
    fn repeated_values_sort_by_encoded_bytes() {
        // `%C3%A9` sorts before `~`, although `é` sorts after it
        let (credentials, params, url) = plain_sample();
        let sign = Signer::new(&credentials, params).sign(&Method::GET, &url, "q=%C3%A9&q=~");
        assert_eq!(extract_signature(&sign), "Tkkdb+ftcydLxJqHFgINrUnXpXA=");

        let (credentials, params, url) = plain_sample();
        let swapped = Signer::new(&credentials, params).sign(&Method::GET, &url, "q=~&q=%C3%A9");
        assert_eq!(sign, swapped);
    }

    #[test]
    fn split_keeps_pairs_encoded() {
        let (before, after) = split_at_oauth("q=%C3%A9&q=~&a+b=c%2Bd");
        assert_eq!(before, vec![("a%20b".to_string(), "c%2Bd".to_string())]);
        assert_eq!(
            after,
            vec![
                ("q".to_string(), "%C3%A9".to_string()),
                ("q".to_string(), "~".to_string()),
            ]
        );
    }

    #[test]
    fn authorization_serializes_params() {
        let credentials = twitter_sample();
        let url = Url::parse("https://api.twitter.com/1.1/statuses/user_timeline.json").unwrap();
        let header = authorization(
            &Method::GET,
            &url,
            &[("screen_name", "alice"), ("count", "1")],
            &credentials,
        )
        .unwrap();
        assert!(header.starts_with("OAuth "));
        assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(header.contains("oauth_nonce="));
        assert!(header.contains("oauth_timestamp="));
    }
}
