//! Test utilities: a local GraphQL stand-in and canned responses.
//!
//! The server answers each request with the next queued response and
//! records every JSON request body so tests can assert on the variables
//! that went over the wire.

use assert_cmd::Command;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Request, Response, StatusCode, body::Incoming, server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use serde_json::{Value, json};
use std::{
    collections::VecDeque,
    io::ErrorKind,
    net::SocketAddr,
    sync::{Arc, Mutex},
};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

/// Queued `(status, body)` pairs served in order.
pub type Responses = Arc<Mutex<VecDeque<(u16, String)>>>;

/// JSON bodies of the requests received so far.
pub type Captured = Arc<Mutex<Vec<Value>>>;

/// Handle returned by [`start_server`] for shutting down the server.
pub struct ShutdownHandle {
    join: JoinHandle<()>,
    stop: oneshot::Sender<()>,
}

impl ShutdownHandle {
    /// Signal the server to stop and await shutdown.
    pub async fn shutdown(self) {
        let _ = self.stop.send(());
        let _ = self.join.await;
    }
}

pub struct MockServer {
    pub addr: SocketAddr,
    pub captured: Captured,
    pub shutdown: ShutdownHandle,
}

impl MockServer {
    #[allow(dead_code, reason = "used by some test crates only")]
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}/graphql", self.addr)
    }

    /// Snapshot of the request bodies received so far.
    ///
    /// # Panics
    ///
    /// Panics if the capture lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<Value> {
        self.captured.lock().expect("lock captured").clone()
    }
}

fn respond(responses: &Responses, body: &Bytes, captured: &Captured) -> Response<Full<Bytes>> {
    if let Ok(json) = serde_json::from_slice::<Value>(body) {
        captured.lock().expect("lock captured").push(json);
    }
    let next = responses.lock().expect("lock responses").pop_front();
    let (status, body) = next.unwrap_or((404, "No response queued".to_owned()));
    Response::builder()
        .status(StatusCode::from_u16(status).expect("status"))
        .header("Content-Type", "application/json")
        .body(Full::from(body))
        .expect("build response")
}

/// Start an HTTP server answering with `responses` in order.
///
/// # Errors
///
/// Returns an error if the server fails to bind to a local port.
#[expect(
    clippy::integer_division_remainder_used,
    reason = "tokio::select! uses % internally"
)]
pub async fn start_server(
    responses: impl IntoIterator<Item = (u16, String)>,
) -> Result<MockServer, std::io::Error> {
    let responses: Responses = Arc::new(Mutex::new(responses.into_iter().collect()));
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, mut rx) = oneshot::channel();

    let served = Arc::clone(&responses);
    let seen = Arc::clone(&captured);
    let join = tokio::spawn(async move {
        loop {
            tokio::select! {
                res = listener.accept() => match res {
                    Ok((stream, _)) => {
                        let io = TokioIo::new(stream);
                        let served = Arc::clone(&served);
                        let seen = Arc::clone(&seen);
                        let service = service_fn(move |req: Request<Incoming>| {
                            let served = Arc::clone(&served);
                            let seen = Arc::clone(&seen);
                            async move {
                                let body = req
                                    .into_body()
                                    .collect()
                                    .await
                                    .map(http_body_util::Collected::to_bytes)
                                    .unwrap_or_default();
                                Ok::<_, std::convert::Infallible>(respond(&served, &body, &seen))
                            }
                        });
                        tokio::spawn(async move {
                            let _ = http1::Builder::new().serve_connection(io, service).await;
                        });
                    }
                    Err(e) => {
                        eprintln!("accept error: {e}");
                        match e.kind() {
                            ErrorKind::ConnectionAborted
                            | ErrorKind::ConnectionReset
                            | ErrorKind::Interrupted
                            | ErrorKind::WouldBlock => {}
                            _ => break,
                        }
                    }
                },
                _ = &mut rx => break,
            }
        }
    });

    Ok(MockServer {
        addr,
        captured,
        shutdown: ShutdownHandle { join, stop: tx },
    })
}

/// Create a `lastfive` command pointed at the mock server with colour
/// disabled and no user configuration.
///
/// # Panics
///
/// Panics if the binary cannot be located.
#[allow(dead_code, reason = "used by some test crates only")]
#[must_use]
pub fn lastfive_cmd(addr: SocketAddr) -> Command {
    let mut cmd = Command::cargo_bin("lastfive").expect("binary");
    cmd.env("GITHUB_GRAPHQL_URL", format!("http://{addr}/graphql"))
        .env("GITHUB_TOKEN", "dummy")
        .env("NO_COLOR", "1")
        .env_remove("LASTFIVE_CONFIG_PATH")
        .env_remove("LASTFIVE_GITHUB_TOKEN")
        .env_remove("LASTFIVE_CMDS_ISSUES_PATH")
        .env_remove("LASTFIVE_CMDS_ISSUES_MODE");
    cmd
}

/// A successful response with `count` issues, oldest first.
#[allow(dead_code, reason = "used by some test crates only")]
#[must_use]
pub fn issues_body(organization: &str, repository: &str, count: usize) -> String {
    let edges: Vec<Value> = (1..=count)
        .map(|n| {
            json!({
                "node": {
                    "id": format!("I_{n}"),
                    "title": format!("Issue {n}"),
                    "url": format!("https://github.com/{organization}/{repository}/issues/{n}"),
                }
            })
        })
        .collect();
    json!({
        "data": {
            "organization": {
                "name": organization,
                "url": format!("https://github.com/{organization}"),
                "repository": {
                    "name": repository,
                    "url": format!("https://github.com/{organization}/{repository}"),
                    "issues": { "edges": edges }
                }
            }
        }
    })
    .to_string()
}

/// A response carrying a GraphQL error and a null organization.
#[allow(dead_code, reason = "used by some test crates only")]
#[must_use]
pub fn not_found_body() -> String {
    json!({
        "data": { "organization": null },
        "errors": [{ "message": "Not Found", "type": "NOT_FOUND", "path": ["organization"] }]
    })
    .to_string()
}

/// Variables of the `index`th captured request as `(organization, repository)`.
///
/// # Panics
///
/// Panics if the request is missing or lacks the variables.
#[allow(dead_code, reason = "used by some test crates only")]
#[must_use]
pub fn variables_of(requests: &[Value], index: usize) -> (String, String) {
    let vars = &requests.get(index).expect("request")["variables"];
    (
        vars["organization"].as_str().expect("organization").to_owned(),
        vars["repository"].as_str().expect("repository").to_owned(),
    )
}
