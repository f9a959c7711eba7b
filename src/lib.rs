/*!
twitter-api-thin: a thin OAuth 1.0a signed client for the Twitter REST API.

# Overview

This library signs requests with the OAuth 1.0a HMAC-SHA1 scheme using the
[oauth1-request](https://crates.io/crates/oauth1-request) crate, sends them
with a blocking [reqwest](https://crates.io/crates/reqwest) client and hands
back every answer as a [`Response`] exposing its headers and body.

Request parameters always travel in the query string and are exactly the
set that gets signed. Raw and `multipart/form-data` bodies are never signed.

# How to use

## Basic usecase 1 - reading a timeline

```no_run
use twitter_api_thin::{Client, Credentials};

# fn main() -> twitter_api_thin::Result<()> {
let credentials = Credentials::new(
    "[CONSUMER_KEY]",
    "[CONSUMER_SECRET]",
    "[ACCESS_TOKEN]",
    "[TOKEN_SECRET]",
);
let client = Client::new(credentials)?;

let resp = client.get(
    "https://api.twitter.com/1.1/statuses/user_timeline.json",
    &[("screen_name", "twitterapi"), ("count", "1")],
)?;
println!("{:?}", resp.text());
# Ok(())
# }
```

## Basic usecase 2 - uploading an image and tweeting it

```no_run
use twitter_api_thin::{endpoints, Client, Credentials, Form};

# fn main() -> twitter_api_thin::Result<()> {
# let credentials = Credentials::new("k", "s", "t", "ts");
let client = Client::new(credentials)?;

let image = std::fs::read("cat.png")?;
let no_params: Vec<(&str, &str)> = Vec::new();
let uploaded = client.call_multipart(
    &endpoints::MEDIA_UPLOAD,
    &no_params,
    Form::new().file("media", "cat.png", image),
)?;
println!("{:?}", uploaded.text());

let resp = client.call(
    &endpoints::STATUSES_UPDATE,
    &[("status", "Hello, Twitter!"), ("media_ids", "[MEDIA_ID]")],
)?;
println!("{:?}", resp.status());
# Ok(())
# }
```

## Transport settings

TLS certificates are verified and plain `http://` is refused unless
[`Config`] says otherwise. Every call is bounded by a 30 second timeout by
default; nothing is retried.

```no_run
use std::time::Duration;
use twitter_api_thin::{Client, Config, Credentials};

# fn main() -> twitter_api_thin::Result<()> {
# let credentials = Credentials::new("k", "s", "t", "ts");
let client = Client::with_config(credentials, Config::new().timeout(Duration::from_secs(5)))?;
# Ok(())
# }
```
*/
mod client;
mod config;
mod credentials;
pub mod endpoints;
mod error;
mod request;
mod response;
mod signer;
mod transport;

// exposed to external program
pub use client::Client;
pub use config::Config;
pub use credentials::{Credentials, CredentialsProvider};
pub use endpoints::{Endpoint, Verb};
pub use error::{Error, Result};
pub use request::{Form, Part, RequestBody, SignedRequest};
pub use response::{RawResult, Response, Streamed};
pub use signer::{authorization, OAuthParameters, Signer};
pub use transport::{ReqwestTransport, Transport};

pub use oauth1_request::signature_method::{HmacSha1, SignatureMethod};

// exposed constant variables
/// Represents `realm`.
pub const REALM_KEY: &str = "realm";

// crate-private constant variables
pub(crate) const OAUTH_KEY_PREFIX: &str = "oauth_";
