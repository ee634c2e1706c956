//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::io;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use tracing::subscriber::DefaultGuard;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CHECK_PATH: &str = "/api/v1/system/alerts/check";

/// Log lines written by the fmt subscriber installed by [`capture_logs`].
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        let buf = self.0.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Lines whose level column equals `level` (`INFO`, `WARN`, `ERROR`).
    pub fn lines_with_level(&self, level: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.split_whitespace().nth(1) == Some(level))
            .map(str::to_owned)
            .collect()
    }

    /// Warn lines listing one triggered alert each.
    pub fn alert_lines(&self) -> Vec<String> {
        self.lines_with_level("WARN")
            .into_iter()
            .filter(|line| line.contains("- Alert: "))
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.contents().contains(needle)
    }
}

struct BufWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for BufWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route this thread's tracing output into memory until the guard drops.
///
/// `#[tokio::test]` runs on a current-thread runtime, so spawned tasks are
/// polled on the same thread and log into the same buffer.
pub fn capture_logs() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let buf = logs.0.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || BufWriter(buf.clone()))
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}

/// A mock API answering the alerts check with `status` and a JSON `body`.
pub async fn api_responding(status: u16, body: Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&server)
        .await;
    server
}

pub fn triggered_body(total: u64, triggered: usize) -> Value {
    let alerts: Vec<Value> = (0..triggered)
        .map(|i| {
            json!({
                "alert_id": i + 1,
                "ticker": format!("GGAL{i}"),
                "condition": "price_above",
                "threshold": 1500.0
            })
        })
        .collect();
    json!({
        "total_alerts_checked": total,
        "triggered_alerts": alerts
    })
}

/// A base URL nothing listens on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
