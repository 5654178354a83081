use crate::models::{Movie, MoviePage};
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "https://jsonfakery.com/movies/paginated";

/// Why a page could not be loaded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Failed to fetch movies (HTTP {0})")]
    Status(u16),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("API response format error: {0}")]
    Format(String),
}

impl LoadError {
    /// Transport errors never reached a usable body; format errors did.
    pub fn is_transport(&self) -> bool {
        matches!(self, LoadError::Status(_) | LoadError::Transport(_))
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => LoadError::Status(status.as_u16()),
            None => LoadError::Transport(e.to_string()),
        }
    }
}

/// Anything that can hand out one page of the catalogue.
pub trait MovieSource: Send + Sync + 'static {
    fn fetch_page(&self, page: u32) -> impl Future<Output = Result<MoviePage, LoadError>> + Send;
}

/// The remote paginated endpoint, `GET {base}?page={n}`.
pub struct HttpMovieSource {
    client: reqwest::Client,
    base: String,
}

impl HttpMovieSource {
    pub fn new(base: impl Into<String>, timeout: Option<Duration>) -> Result<Self, LoadError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base: base.into(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }
}

impl MovieSource for HttpMovieSource {
    async fn fetch_page(&self, page: u32) -> Result<MoviePage, LoadError> {
        debug!(page, base = %self.base, "requesting page");
        let response = self
            .client
            .get(&self.base)
            .query(&[("page", page)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_page(&body)
    }
}

/// Validate a response body and extract the movies and pagination bounds.
pub fn parse_page(body: &str) -> Result<MoviePage, LoadError> {
    let json: Value = serde_json::from_str(body)
        .map_err(|e| LoadError::Format(format!("body is not valid JSON ({e})")))?;

    let entries = json
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| LoadError::Format("no \"data\" array".to_string()))?;

    let movies = entries
        .iter()
        .map(Movie::deserialize)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| LoadError::Format(format!("unexpected movie entry ({e})")))?;

    let meta = json.get("meta");
    Ok(MoviePage {
        movies,
        current_page: page_number(meta, "current_page"),
        last_page: page_number(meta, "last_page"),
    })
}

/// Missing, null, zero, negative or fractional page numbers all count as 1.
fn page_number(meta: Option<&Value>, key: &str) -> u32 {
    let value = match meta.and_then(|m| m.get(key)) {
        Some(v) => v,
        None => return 1,
    };
    let n = value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0 && *f > 0.0).map(|f| f as u64));
    match n {
        Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => 1,
    }
}
