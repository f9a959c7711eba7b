use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("request parameters could not be urlencoded : {0}")]
    Params(#[from] serde_urlencoded::ser::Error),
    #[error("invalid resource url : {0}")]
    Url(#[from] url::ParseError),
    #[error("endpoint {endpoint} requires the path parameter {name}")]
    MissingPathParameter {
        endpoint: &'static str,
        name: String,
    },
    #[error("request failed : {0}")]
    Request(#[from] reqwest::Error),
    #[error("reading response body failed : {0}")]
    Io(#[from] std::io::Error),
}
