//! Remote Sync
//!
//! Optional synchronization of a model with the HTTP endpoint named by its
//! `endpoint` configuration field. This is the only asynchronous boundary in
//! the runtime: one request, one response, and on success a field-by-field
//! re-entry into the synchronous mutation pipeline — each applied field
//! persists and re-renders like any other write.
//!
//! A model with no `endpoint` configured makes both operations a reported
//! no-op. Failures reject to the caller; there is no retry and no rollback,
//! so fields applied before a mid-loop failure stay applied.

use serde_json::Value;

use crate::error::{Result, TetherError};
use crate::model::Model;

/// HTTP client for the model synchronization contract.
#[derive(Debug, Default)]
pub struct RemoteClient {
    http: reqwest::Client,
}

impl RemoteClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Fetch the model's remote state and apply it field by field.
    ///
    /// Expects a JSON object response; each returned key is applied iff the
    /// model already declares that field, unknown keys are ignored.
    pub async fn fetch(&self, model: &Model) -> Result<()> {
        let endpoint = match model.endpoint() {
            Some(endpoint) => endpoint,
            None => {
                tracing::warn!(model = model.name(), "fetch skipped: no endpoint configured");
                return Ok(());
            }
        };

        tracing::debug!(model = model.name(), %endpoint, "fetching remote state");
        let response = self.http.get(&endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TetherError::EndpointStatus {
                status: status.as_u16(),
            });
        }

        let payload: Value = response.json().await?;
        apply_payload(model, payload)
    }

    /// Send the model's public-field snapshot to its endpoint.
    ///
    /// On success, an object response body is applied the same way
    /// [`fetch`](Self::fetch) applies one; any other body is ignored.
    pub async fn send(&self, model: &Model) -> Result<()> {
        let endpoint = match model.endpoint() {
            Some(endpoint) => endpoint,
            None => {
                tracing::warn!(model = model.name(), "send skipped: no endpoint configured");
                return Ok(());
            }
        };

        tracing::debug!(model = model.name(), %endpoint, "sending snapshot");
        let response = self
            .http
            .post(&endpoint)
            .json(&model.public_fields())
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TetherError::EndpointStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        match serde_json::from_str::<Value>(&body) {
            Ok(payload) => apply_payload(model, payload),
            Err(_) => {
                tracing::debug!(model = model.name(), "ignoring non-JSON response body");
                Ok(())
            }
        }
    }
}

/// Apply a response payload through the mutation pipeline.
fn apply_payload(model: &Model, payload: Value) -> Result<()> {
    let object = match payload {
        Value::Object(object) => object,
        other => {
            tracing::warn!(
                model = model.name(),
                "expected a JSON object payload, ignoring {}",
                kind_of(&other)
            );
            return Ok(());
        }
    };

    for (field, value) in object {
        if !model.has_field(&field) {
            continue;
        }
        model.set(&field, value)?;
    }
    Ok(())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
