//! Remote execution fallback: batch compile-and-run over HTTP for the
//! language whose toolchain is not available inside the sandbox.
//!
//! One synchronous request/response per run: no streaming, no retry,
//! and no client-side timeout; callers needing a bound wrap the call in
//! `tokio::time::timeout`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::PlaygroundConfig;

/// What the remote service reported about a run. `success == false`
/// means the submitted code failed to compile or run; transport-level
/// problems are an `Err` instead, so callers can tell "your code is
/// wrong" apart from "the service is unreachable".
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteOutcome {
    pub success: bool,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
}

#[async_trait]
pub trait RemoteRunner: Send + Sync {
    async fn run(&self, source: &str) -> Result<RemoteOutcome>;
}

#[derive(Serialize)]
struct ExecuteRequest<'a> {
    channel: &'a str,
    mode: &'a str,
    edition: &'a str,
    #[serde(rename = "crateType")]
    crate_type: &'a str,
    tests: bool,
    code: &'a str,
    backtrace: bool,
}

pub struct PlaygroundClient {
    client: Client,
    config: PlaygroundConfig,
}

impl PlaygroundClient {
    pub fn new(client: Client, config: PlaygroundConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl RemoteRunner for PlaygroundClient {
    async fn run(&self, source: &str) -> Result<RemoteOutcome> {
        let payload = ExecuteRequest {
            channel: &self.config.channel,
            mode: &self.config.mode,
            edition: &self.config.edition,
            crate_type: &self.config.crate_type,
            tests: false,
            code: source,
            backtrace: false,
        };

        tracing::debug!(
            endpoint = %self.config.endpoint,
            bytes = source.len(),
            "delegating run to remote execution service"
        );

        let resp = self
            .client
            .post(&self.config.endpoint)
            .json(&payload)
            .send()
            .await
            .context("failed to reach remote execution service")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("remote execution service error {status}: {body}");
        }

        resp.json()
            .await
            .context("failed to parse remote execution response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> PlaygroundClient {
        let config = PlaygroundConfig {
            endpoint: format!("{}/execute", server.uri()),
            ..PlaygroundConfig::default()
        };
        PlaygroundClient::new(Client::new(), config)
    }

    #[tokio::test]
    async fn successful_run_returns_stdout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/execute"))
            .and(body_partial_json(json!({
                "channel": "stable",
                "mode": "debug",
                "edition": "2021",
                "crateType": "bin",
                "tests": false,
                "code": "fn main() { println!(\"hi\"); }",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "stdout": "hi\n",
                "stderr": "",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .run("fn main() { println!(\"hi\"); }")
            .await
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.stdout, "hi\n");
        assert!(outcome.stderr.is_empty());
    }

    #[tokio::test]
    async fn compile_failure_is_an_outcome_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/execute"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "stdout": "",
                "stderr": "syntax error line 3",
            })))
            .mount(&server)
            .await;

        let outcome = client_for(&server).run("fn main( {").await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.stderr, "syntax error line 3");
    }

    #[tokio::test]
    async fn server_error_status_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/execute"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = client_for(&server).run("fn main() {}").await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/execute"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).run("fn main() {}").await.unwrap_err();
        assert!(err.to_string().contains("parse"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        // Port 1 should refuse connections.
        let config = PlaygroundConfig {
            endpoint: "http://127.0.0.1:1/execute".into(),
            ..PlaygroundConfig::default()
        };
        let client = PlaygroundClient::new(Client::new(), config);
        let err = client.run("fn main() {}").await.unwrap_err();
        assert!(err.to_string().contains("remote execution service"));
    }

    #[tokio::test]
    async fn missing_output_fields_default_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/execute"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true })),
            )
            .mount(&server)
            .await;

        let outcome = client_for(&server).run("fn main() {}").await.unwrap();
        assert!(outcome.success);
        assert!(outcome.stdout.is_empty());
        assert!(outcome.stderr.is_empty());
    }
}
