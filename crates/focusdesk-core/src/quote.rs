//! Quote of the day.
//!
//! One read-only GET against a public quote service. Every failure mode ends
//! in the same fixed fallback quote; callers of [`load_quote`] never see an
//! error.

use std::future::Future;
use std::time::Duration;

use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::QuoteError;
use crate::storage::QuoteConfig;

pub const DEFAULT_ENDPOINT: &str = "https://api.quotable.io/random";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

const FALLBACK_TEXT: &str = "Those who simply wait for information to find them, spend a lot of time sitting by the phone. Those who go out and find it themselves, have something to say when it rings.";
const FALLBACK_AUTHOR: &str = "Dawson";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

impl Quote {
    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_TEXT.into(),
            author: FALLBACK_AUTHOR.into(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.text == FALLBACK_TEXT && self.author == FALLBACK_AUTHOR
    }

    /// Quoted text line.
    pub fn text_line(&self) -> String {
        format!("“{}”", self.text)
    }

    /// Attribution line.
    pub fn author_line(&self) -> String {
        format!("— {}", self.author)
    }
}

/// Wire shape of the quote service response. Extra fields are ignored.
#[derive(Debug, Deserialize)]
struct QuotePayload {
    #[serde(default)]
    content: String,
    #[serde(default)]
    author: Option<String>,
}

/// Anything that can produce a quote.
pub trait QuoteSource {
    fn fetch(&self) -> impl Future<Output = Result<Quote, QuoteError>> + Send;
}

/// HTTP-backed quote source.
#[derive(Debug, Clone)]
pub struct HttpQuoteSource {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpQuoteSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, QuoteError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    pub fn from_config(cfg: &QuoteConfig) -> Result<Self, QuoteError> {
        Self::new(cfg.endpoint.clone(), Duration::from_secs(cfg.timeout_secs))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request(&self) -> Result<Quote, QuoteError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(QuoteError::Status(status.as_u16()));
        }

        let payload: QuotePayload = resp.json().await?;
        let text = payload.content.trim();
        if text.is_empty() {
            return Err(QuoteError::Empty);
        }
        let author = payload
            .author
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());

        Ok(Quote {
            text: text.to_string(),
            author,
        })
    }
}

impl QuoteSource for HttpQuoteSource {
    fn fetch(&self) -> impl Future<Output = Result<Quote, QuoteError>> + Send {
        async move {
            let timeout_secs = self.timeout.as_secs().max(1);
            tokio::time::timeout(self.timeout, self.request())
                .await
                .map_err(|_| QuoteError::Timeout { timeout_secs })?
        }
    }
}

/// Fetch a quote, substituting the fallback on any failure.
pub async fn load_quote<Q: QuoteSource>(source: &Q) -> Quote {
    match source.fetch().await {
        Ok(quote) => quote,
        Err(e) => {
            tracing::warn!(error = %e, "quote fetch failed, using fallback");
            Quote::fallback()
        }
    }
}
