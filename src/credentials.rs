use std::borrow::Cow;
use std::fmt;

/// Gives the signer access to the key/secret pairs.
pub trait CredentialsProvider {
    fn consumer_pair<'a>(&'a self) -> (&'a str, &'a str);

    fn token_pair<'a>(&'a self) -> (&'a str, &'a str);
}

/// The consumer key/secret and access token/secret of one application/user.
///
/// Nothing is validated here. Malformed values produce a signature the
/// remote service will reject.
#[derive(Clone)]
pub struct Credentials<'a> {
    consumer_key: Cow<'a, str>,
    consumer_secret: Cow<'a, str>,
    token: Cow<'a, str>,
    token_secret: Cow<'a, str>,
}

impl<'a> Credentials<'a> {
    pub fn new<TConsumerKey, TConsumerSecret, TToken, TTokenSecret>(
        consumer_key: TConsumerKey,
        consumer_secret: TConsumerSecret,
        token: TToken,
        token_secret: TTokenSecret,
    ) -> Self
    where
        TConsumerKey: Into<Cow<'a, str>>,
        TConsumerSecret: Into<Cow<'a, str>>,
        TToken: Into<Cow<'a, str>>,
        TTokenSecret: Into<Cow<'a, str>>,
    {
        Credentials {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: token.into(),
            token_secret: token_secret.into(),
        }
    }

    /// Detaches the credentials from borrowed input.
    pub fn into_owned(self) -> Credentials<'static> {
        Credentials {
            consumer_key: Cow::Owned(self.consumer_key.into_owned()),
            consumer_secret: Cow::Owned(self.consumer_secret.into_owned()),
            token: Cow::Owned(self.token.into_owned()),
            token_secret: Cow::Owned(self.token_secret.into_owned()),
        }
    }
}

impl CredentialsProvider for Credentials<'_> {
    fn consumer_pair<'a>(&'a self) -> (&'a str, &'a str) {
        (&self.consumer_key, &self.consumer_secret)
    }

    fn token_pair<'a>(&'a self) -> (&'a str, &'a str) {
        (&self.token, &self.token_secret)
    }
}

impl fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("token", &self.token)
            .field("token_secret", &"<redacted>")
            .finish()
    }
}
