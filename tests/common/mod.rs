//! Local stand-in for the API host.
//!
//! Records every request it receives and answers by path, so tests can drive
//! the real reqwest transport over plain HTTP and inspect what went out.

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    Router,
};

#[derive(Debug, Clone)]
pub struct Captured {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Vec<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

pub type Log = Arc<Mutex<Vec<Captured>>>;

/// How long `/1.1/slow.json` keeps the client waiting before answering.
pub const SLOW_REPLY: Duration = Duration::from_secs(2);

pub struct MockApi {
    pub addr: SocketAddr,
    pub log: Log,
}

impl MockApi {
    pub fn start() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new().fallback(capture).with_state(log.clone());

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                axum::serve(listener, app).await
            })
            .unwrap();
        });

        MockApi { addr, log }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn last(&self) -> Captured {
        self.log.lock().unwrap().last().cloned().unwrap()
    }
}

async fn capture(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let authorization = headers
        .get_all(header::AUTHORIZATION)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    log.lock().unwrap().push(Captured {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization,
        content_type,
        body: body.to_vec(),
    });

    if uri.path() == "/1.1/slow.json" {
        tokio::time::sleep(SLOW_REPLY).await;
    }

    let (status, body) = match uri.path() {
        "/1.1/statuses/user_timeline.json" => (StatusCode::OK, "[{}]"),
        "/1.1/statuses/update.json" => (StatusCode::OK, "{\"id\":1}"),
        "/1.1/media/upload.json" => (StatusCode::OK, "{\"media_id\":710511363345354753}"),
        "/1.1/slow.json" => (StatusCode::OK, "{}"),
        _ => (
            StatusCode::UNAUTHORIZED,
            "{\"errors\":[{\"code\":32,\"message\":\"Could not authenticate you.\"}]}",
        ),
    };
    (
        status,
        [
            (header::CONTENT_TYPE, "application/json;charset=utf-8"),
            (header::HeaderName::from_static("x-rate-limit-remaining"), "899"),
        ],
        body,
    )
}
