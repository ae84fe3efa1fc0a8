// Mission server client
//
// The game itself (scoring, AI adversary, level gating) lives behind a
// small HTTP API; this module is the only place that knows about the
// wire format. The `GameClient` trait lets the dispatcher be tested
// against a canned in-memory client with no network involved.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// One entry from `GET /levels`
#[derive(Debug, Clone, Deserialize)]
pub struct Mission {
    pub index: usize,
    pub name: String,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub completed: bool,
}

/// Response to `POST /start`
///
/// A rejected start (locked level, invalid index) comes back with a
/// `message` only; a successful one carries briefing and objective.
/// The server also returns a `tools` hint list we don't consume.
#[derive(Debug, Clone, Deserialize)]
pub struct StartResponse {
    pub message: String,
    pub briefing: Option<String>,
    pub objective: Option<String>,
}

/// Response to `POST /action` - every field is optional, the engine
/// only sets what the turn produced.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionResponse {
    pub result: Option<String>,
    pub ai_response: Option<String>,
    pub ai_mutation: Option<String>,
    pub score: Option<i64>,
    pub status: Option<String>,
}

impl ActionResponse {
    /// Whether the mission reached a terminal state this turn
    pub fn is_terminal(&self) -> bool {
        matches!(self.status.as_deref(), Some("win") | Some("lose"))
    }
}

/// The three calls the terminal makes. Failures are uniform: the
/// caller never distinguishes timeout from 4xx from 5xx.
pub trait GameClient {
    async fn levels(&self) -> Result<Vec<Mission>>;
    async fn start(&self, level: usize) -> Result<StartResponse>;
    async fn action(&self, tool: &str) -> Result<ActionResponse>;
}

/// reqwest-backed client talking to the real mission server
pub struct HttpGameClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGameClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl GameClient for HttpGameClient {
    async fn levels(&self) -> Result<Vec<Mission>> {
        let missions = self
            .http
            .get(self.url("/levels"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(missions)
    }

    async fn start(&self, level: usize) -> Result<StartResponse> {
        let response = self
            .http
            .post(self.url("/start"))
            .json(&serde_json::json!({ "level": level }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response)
    }

    async fn action(&self, tool: &str) -> Result<ActionResponse> {
        let response = self
            .http
            .post(self.url("/action"))
            .json(&serde_json::json!({ "tool": tool }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_stripped() {
        let client =
            HttpGameClient::new("http://127.0.0.1:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.url("/levels"), "http://127.0.0.1:8000/levels");
    }

    #[test]
    fn start_response_rejection_shape() {
        // Locked level: message only, no briefing/objective
        let res: StartResponse =
            serde_json::from_str(r#"{"message":"🔒 Secret level is locked."}"#).unwrap();
        assert!(res.briefing.is_none());
        assert!(res.objective.is_none());
    }

    #[test]
    fn action_response_ignores_extra_fields() {
        // Live server also sends tool_used and tools; we only keep what we render
        let res: ActionResponse = serde_json::from_str(
            r#"{"tool_used":"Nmap Scan","result":"✅ Exploit successful","status":"ongoing"}"#,
        )
        .unwrap();
        assert_eq!(res.result.as_deref(), Some("✅ Exploit successful"));
        assert!(!res.is_terminal());
    }

    #[test]
    fn terminal_status_detection() {
        let win = ActionResponse {
            status: Some("win".into()),
            ..Default::default()
        };
        let ongoing = ActionResponse {
            status: Some("ongoing".into()),
            ..Default::default()
        };
        assert!(win.is_terminal());
        assert!(!ongoing.is_terminal());
        assert!(!ActionResponse::default().is_terminal());
    }
}
