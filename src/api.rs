// API client module: a small blocking HTTP client for the users and posts
// endpoints. It is intentionally synchronous; one request is in flight at
// a time and the prompt waits for it.
//
// Transport problems never escape this module as errors. `get` reports
// them on the console and returns `None`, and the fetch functions turn
// that into "not found" or "no posts".

use crate::config::Settings;
use crate::models::{Post, User, UserId};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Sent with every request so the remote side can tell who is calling.
pub const USER_AGENT: &str = "api-validator/1.0";

/// Response body after decoding: JSON when it parses, otherwise the raw
/// text. Callers must check the shape before reading fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    pub fn decode(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(text),
        }
    }

    /// Deserialize a JSON object body into `T`. Arrays, scalars and raw
    /// text yield `None`, as does an object that `T` rejects.
    pub fn into_record<T: DeserializeOwned>(self) -> Option<T> {
        match self {
            Payload::Json(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }

    /// The elements of a JSON array body, or `None` for any other shape.
    pub fn into_items(self) -> Option<Vec<Value>> {
        match self {
            Payload::Json(Value::Array(items)) => Some(items),
            _ => None,
        }
    }
}

/// Status line and decoded body of a completed request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub payload: Payload,
}

/// Holds a reqwest blocking client (timeout and user-agent baked in) and
/// the endpoint settings it was built from.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    settings: Settings,
}

impl ApiClient {
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient { client, settings })
    }

    /// Create an ApiClient configured from the `API_VALIDATOR_*`
    /// environment variables. See `config::Settings::from_env`.
    pub fn from_env() -> Result<Self> {
        let settings = Settings::from_env().context("Invalid configuration")?;
        Self::new(settings)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Perform one GET. `params` are URL-encoded into the query string.
    ///
    /// Returns `Some` for any response the server sent, whatever its
    /// status, and `None` if no response could be read. The failure cause
    /// is written to `out`; the `io::Result` only carries errors writing
    /// to `out` itself.
    pub fn get<W: Write>(
        &self,
        url: &str,
        params: &[(&str, &str)],
        out: &mut W,
    ) -> io::Result<Option<HttpResponse>> {
        match self.try_get(url, params) {
            Ok(response) => Ok(Some(response)),
            Err(err) => {
                debug!(url, error = ?err, "request failed");
                writeln!(out, "⚠ Error connecting: {:#}", err)?;
                Ok(None)
            }
        }
    }

    fn try_get(&self, url: &str, params: &[(&str, &str)]) -> Result<HttpResponse> {
        let mut req = self.client.get(url);
        if !params.is_empty() {
            req = req.query(params);
        }
        let res = req.send()?;
        let status = res.status();
        debug!(url = %res.url(), %status, "response received");

        let bytes = res.bytes().context("Failed to read response body")?;
        let text = String::from_utf8(bytes.to_vec()).context("Response body is not valid UTF-8")?;
        Ok(HttpResponse {
            status,
            payload: Payload::decode(text),
        })
    }

    /// `GET {users_url}/{id}`. Any status other than 200, a failed
    /// request, or a body that is not a user object means "not found".
    pub fn fetch_user<W: Write>(&self, id: &UserId, out: &mut W) -> io::Result<Option<User>> {
        writeln!(out, "\n🔍 Fetching user {}...", id)?;
        self.pace(&format!("Fetching user {}...", id));

        let url = format!("{}/{}", self.settings.users_url, id);
        let user = self
            .get(&url, &[], out)?
            .filter(|res| res.status == StatusCode::OK)
            .and_then(|res| res.payload.into_record::<User>());
        if user.is_none() {
            writeln!(out, "❌ User not found.")?;
        }
        Ok(user)
    }

    /// `GET {posts_url}?userId={id}`. Never absent: failures and a user
    /// without posts both come back as an empty list.
    pub fn fetch_posts<W: Write>(&self, id: &UserId, out: &mut W) -> io::Result<Vec<Post>> {
        writeln!(out, "\n📝 Fetching posts for user {}...", id)?;
        self.pace(&format!("Fetching posts for user {}...", id));

        match self.get(&self.settings.posts_url, &[("userId", id.as_str())], out)? {
            Some(res) if res.status == StatusCode::OK => Ok(res
                .payload
                .into_items()
                // A malformed element still counts as a post.
                .map(|items| items.into_iter().map(Post::from_value).collect::<Vec<Post>>())
                .unwrap_or_default()),
            _ => {
                writeln!(out, "❌ Error fetching posts.")?;
                Ok(Vec::new())
            }
        }
    }

    // Cosmetic pause before a fetch, with a spinner so the wait is visible.
    fn pace(&self, message: &str) {
        if self.settings.pacing.is_zero() {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        thread::sleep(self.settings.pacing);
        spinner.finish_and_clear();
    }
}
