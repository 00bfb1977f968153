//! Async HTTP client wrapping the contactbook JSON API.

use anyhow::{Context, Result, anyhow};
use contactbook_core::contact::{Contact, NewContact};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

/// Connection settings for the contactbook API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  /// Server origin, e.g. `http://localhost:5000`.
  pub base_url: String,
}

/// Result of a create request that reached the server.
#[derive(Debug)]
pub enum CreateOutcome {
  Created,
  /// Non-success status; `error` is the body's `error` string, if any.
  Rejected {
    status: StatusCode,
    error:  Option<String>,
  },
}

#[derive(Deserialize)]
struct ErrorBody {
  error: Option<String>,
}

/// Async HTTP client for the contactbook JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  /// No request timeout is configured: a hung request stays pending.
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  pub fn base_url(&self) -> &str { &self.config.base_url }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  /// `GET /api/contacts`
  pub async fn list_contacts(&self) -> Result<Vec<Contact>> {
    let resp = self
      .client
      .get(self.url("/contacts"))
      .send()
      .await
      .context("GET /contacts failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /contacts → {}", resp.status()));
    }
    resp.json().await.context("deserialising contacts")
  }

  /// `POST /api/contacts`
  ///
  /// `Err` means the request never completed (connection refused, reset,
  /// ...). Any HTTP response, success or not, is an `Ok`.
  pub async fn create_contact(
    &self,
    contact: &NewContact,
  ) -> Result<CreateOutcome, reqwest::Error> {
    let resp = self
      .client
      .post(self.url("/contacts"))
      .json(contact)
      .send()
      .await?;

    let status = resp.status();
    if status.is_success() {
      return Ok(CreateOutcome::Created);
    }

    let error = resp
      .json::<ErrorBody>()
      .await
      .ok()
      .and_then(|body| body.error);
    Ok(CreateOutcome::Rejected { status, error })
  }
}
