//! Error taxonomy at the collaborator boundary.
//!
//! Three kinds of failure reach a form: local validation (computed before
//! any request), a server rejection with field-keyed messages, and
//! transport/unexpected failures. The first two merge into one
//! [`FormErrors`] surface; the third becomes a generic retry message and
//! never clears what the user typed.

use std::collections::BTreeMap;

use thiserror::Error;

use stockdesk_orders::DraftRejection;

/// Result of a backend call.
pub type ApiResult<T> = Result<T, ApiError>;

/// Field-keyed messages from a structured 400 response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors {
    /// The `detail` key, when the backend sends a single message.
    pub detail: Option<String>,
    pub fields: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    /// Interpret a 400 response body. Values may be a string or an array of
    /// strings per field; anything else is carried as its JSON text.
    pub fn from_body(body: &serde_json::Value) -> Self {
        let mut errors = FieldErrors::default();

        let Some(object) = body.as_object() else {
            errors.detail = Some(body.to_string());
            return errors;
        };

        for (key, value) in object {
            let messages: Vec<String> = match value {
                serde_json::Value::String(s) => vec![s.clone()],
                serde_json::Value::Array(items) => items
                    .iter()
                    .map(|item| match item {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
                other => vec![other.to_string()],
            };

            if key == "detail" {
                errors.detail = messages.into_iter().next();
            } else {
                errors.fields.insert(key.clone(), messages);
            }
        }

        errors
    }
}

/// Failure of one backend operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server rejected the request with structured validation errors
    /// (HTTP 400 with a JSON body).
    #[error("request rejected by server")]
    Rejected(FieldErrors),

    /// Transport or unexpected failure: connection refused, 5xx, malformed
    /// body. The caller shows a generic retry message.
    #[error("transport failure: {0}")]
    Transport(#[from] anyhow::Error),
}

/// The single error surface of a form: one top-level message, per-field
/// messages, and per-line problem strings. Local rejections and server
/// rejections land in the same place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormErrors {
    pub message: Option<String>,
    pub fields: BTreeMap<String, String>,
    pub items: Vec<String>,
}

impl FormErrors {
    pub fn clear(&mut self) {
        *self = FormErrors::default();
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.fields.is_empty() && self.items.is_empty()
    }

    /// Adopt a local validation rejection.
    pub fn set_rejection(&mut self, rejection: DraftRejection) {
        self.message = rejection.header;
        self.items = rejection.items;
    }

    /// Merge a failed submission into the surface. `rejected_message` is the
    /// headline for a structured 400; `generic_message` covers transport.
    pub fn absorb_api_error(
        &mut self,
        error: &ApiError,
        rejected_message: &str,
        generic_message: &str,
    ) {
        match error {
            ApiError::Rejected(field_errors) => {
                self.message = Some(
                    field_errors
                        .detail
                        .clone()
                        .unwrap_or_else(|| rejected_message.to_owned()),
                );
                for (field, messages) in &field_errors.fields {
                    if field == "items" {
                        self.items.extend(messages.iter().cloned());
                    } else {
                        self.fields.insert(field.clone(), messages.join(" "));
                    }
                }
            }
            ApiError::Transport(cause) => {
                tracing::error!(error = %cause, "request failed");
                self.message = Some(generic_message.to_owned());
            }
        }
    }
}
