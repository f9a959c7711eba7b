//! Catalog of Twitter REST API 1.1 resources.
//!
//! Each entry is data: a name as used in the API reference, the way it is
//! dispatched and a URL template. `:name` path segments are filled from the
//! request parameter of the same name, which is then not sent as a query
//! parameter. Use [`Client::call`](crate::Client::call) to invoke one.

use crate::{request::path_segment, Error, Result};

/// How an endpoint is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    /// `POST` with a `multipart/form-data` body.
    Multipart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub verb: Verb,
    pub url: &'static str,
}

macro_rules! endpoints {
    ($($(#[$attr:meta])* $ident:ident => $verb:ident $name:literal $url:literal;)*) => {
        $(
            $(#[$attr])*
            pub const $ident: Endpoint = Endpoint {
                name: $name,
                verb: Verb::$verb,
                url: $url,
            };
        )*

        /// Every endpoint of the catalog.
        pub const ALL: &[Endpoint] = &[$($ident),*];
    };
}

endpoints! {
    /// GET search/tweets
    SEARCH_TWEETS => Get "search/tweets" "https://api.twitter.com/1.1/search/tweets.json";
    /// GET statuses/mentions_timeline
    STATUSES_MENTIONS_TIMELINE => Get "statuses/mentions_timeline"
        "https://api.twitter.com/1.1/statuses/mentions_timeline.json";
    /// GET statuses/user_timeline
    STATUSES_USER_TIMELINE => Get "statuses/user_timeline"
        "https://api.twitter.com/1.1/statuses/user_timeline.json";
    /// GET statuses/home_timeline
    STATUSES_HOME_TIMELINE => Get "statuses/home_timeline"
        "https://api.twitter.com/1.1/statuses/home_timeline.json";
    /// GET statuses/retweets_of_me
    STATUSES_RETWEETS_OF_ME => Get "statuses/retweets_of_me"
        "https://api.twitter.com/1.1/statuses/retweets_of_me.json";
    /// GET statuses/show
    STATUSES_SHOW => Get "statuses/show" "https://api.twitter.com/1.1/statuses/show.json";
    /// GET statuses/lookup
    STATUSES_LOOKUP => Get "statuses/lookup" "https://api.twitter.com/1.1/statuses/lookup.json";
    /// POST statuses/update
    STATUSES_UPDATE => Post "statuses/update" "https://api.twitter.com/1.1/statuses/update.json";
    /// POST statuses/retweet/:id
    STATUSES_RETWEET_ID => Post "statuses/retweet/:id"
        "https://api.twitter.com/1.1/statuses/retweet/:id.json";
    /// POST statuses/destroy/:id
    STATUSES_DESTROY_ID => Post "statuses/destroy/:id"
        "https://api.twitter.com/1.1/statuses/destroy/:id.json";
    /// GET users/show
    USERS_SHOW => Get "users/show" "https://api.twitter.com/1.1/users/show.json";
    /// GET users/lookup
    USERS_LOOKUP => Get "users/lookup" "https://api.twitter.com/1.1/users/lookup.json";
    /// GET favorites/list
    FAVORITES_LIST => Get "favorites/list" "https://api.twitter.com/1.1/favorites/list.json";
    /// POST favorites/create
    FAVORITES_CREATE => Post "favorites/create" "https://api.twitter.com/1.1/favorites/create.json";
    /// POST favorites/destroy
    FAVORITES_DESTROY => Post "favorites/destroy"
        "https://api.twitter.com/1.1/favorites/destroy.json";
    /// GET geo/id/:place_id
    GEO_ID_PLACE_ID => Get "geo/id/:place_id" "https://api.twitter.com/1.1/geo/id/:place_id.json";
    /// GET geo/search
    GEO_SEARCH => Get "geo/search" "https://api.twitter.com/1.1/geo/search.json";
    /// GET geo/reverse_geocode
    GEO_REVERSE_GEOCODE => Get "geo/reverse_geocode"
        "https://api.twitter.com/1.1/geo/reverse_geocode.json";
    /// POST media/upload
    MEDIA_UPLOAD => Multipart "media/upload" "https://upload.twitter.com/1.1/media/upload.json";
}

/// Looks an endpoint up by its API reference name, e.g. `"statuses/update"`.
pub fn find(name: &str) -> Option<&'static Endpoint> {
    ALL.iter().find(|endpoint| endpoint.name == name)
}

impl Endpoint {
    /// Fills the URL template from `params`.
    ///
    /// Returns the resource URL and the parameters that were not consumed by
    /// the template, in their original order.
    pub fn resolve(
        &self,
        mut params: Vec<(String, String)>,
    ) -> Result<(String, Vec<(String, String)>)> {
        let mut resolved = String::with_capacity(self.url.len());
        let mut rest = self.url;
        while let Some(at) = rest.find("/:") {
            resolved.push_str(&rest[..=at]);
            let tail = &rest[at + 2..];
            let end = tail
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or_else(|| tail.len());
            let name = &tail[..end];
            let position = params
                .iter()
                .position(|(key, _)| key == name)
                .ok_or_else(|| Error::MissingPathParameter {
                    endpoint: self.name,
                    name: name.to_string(),
                })?;
            let (_, value) = params.remove(position);
            resolved.push_str(&path_segment(&value));
            rest = &tail[end..];
        }
        resolved.push_str(rest);
        Ok((resolved, params))
    }
}
