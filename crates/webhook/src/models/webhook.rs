//! Dialogflow ES fulfillment wire types.
//!
//! Only the fields the webhook reads are modelled; everything else in the
//! request is ignored by serde.
//!
//! ```json
//! {
//!   "responseId": "5b2a...",
//!   "queryResult": {
//!     "queryText": "add 2 milk",
//!     "intent": { "displayName": "add.product" },
//!     "parameters": { "product": ["Milk"], "number": [2] },
//!     "outputContexts": [
//!       { "name": "projects/p/agent/sessions/abc/contexts/ongoing-order" }
//!     ]
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use sales_chatbot_core::SessionId;

/// Inbound fulfillment request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    /// Unique ID of this detect-intent response, used for log correlation.
    #[serde(default)]
    pub response_id: Option<String>,
    /// Result of intent detection.
    pub query_result: QueryResult,
}

/// Intent detection result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// What the end user said.
    #[serde(default)]
    pub query_text: Option<String>,
    /// Matched intent.
    pub intent: IntentRef,
    /// Extracted entity values keyed by parameter name.
    #[serde(default)]
    pub parameters: Parameters,
    /// Contexts active after this turn; their names carry the session ID.
    #[serde(default)]
    pub output_contexts: Vec<OutputContext>,
}

/// Matched intent reference.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRef {
    /// Human-readable intent name, e.g. `add.product`.
    pub display_name: String,
}

/// An active output context.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputContext {
    /// Full context resource name.
    pub name: String,
}

impl WebhookRequest {
    /// The intent display name.
    #[must_use]
    pub fn intent_name(&self) -> &str {
        &self.query_result.intent.display_name
    }

    /// Resolve the session from the first output context.
    ///
    /// Returns `None` when the request carries no output contexts at all. A
    /// context name without a session segment resolves to the anonymous
    /// session.
    #[must_use]
    pub fn session_id(&self) -> Option<SessionId> {
        self.query_result
            .output_contexts
            .first()
            .map(|context| SessionId::from_context_name(&context.name))
    }
}

/// Outbound fulfillment response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    /// Text shown to the end user.
    pub fulfillment_text: String,
}

impl WebhookResponse {
    /// Create a text response.
    #[must_use]
    pub fn text(fulfillment_text: impl Into<String>) -> Self {
        Self {
            fulfillment_text: fulfillment_text.into(),
        }
    }
}

/// A parameter required by the intent is missing or unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    /// Parameter absent, null, empty or an empty list.
    #[error("missing parameter: {0}")]
    Missing(String),

    /// Parameter present but not convertible.
    #[error("invalid parameter {name}: {reason}")]
    Invalid {
        /// Parameter name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Entity values extracted by Dialogflow.
///
/// Depending on how the intent's parameters are configured, a value is either
/// a scalar or a list (`"is list"` parameters). The accessors read the first
/// value in both cases.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Parameters(Map<String, Value>);

impl Parameters {
    /// The first value of a parameter, or `None` when absent, null or an empty list.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&Value> {
        match self.0.get(name)? {
            Value::Null => None,
            Value::Array(values) => values.first().filter(|v| !v.is_null()),
            value => Some(value),
        }
    }

    /// The first non-empty text value of a parameter.
    ///
    /// List parameters skip leading nulls, non-strings and empty strings.
    #[must_use]
    pub fn first_text(&self, name: &str) -> Option<&str> {
        match self.0.get(name)? {
            Value::String(s) => Some(s.as_str()).filter(|s| !s.is_empty()),
            Value::Array(values) => values
                .iter()
                .filter_map(Value::as_str)
                .find(|s| !s.is_empty()),
            _ => None,
        }
    }

    /// The first value of a parameter as a positive whole quantity.
    ///
    /// Dialogflow's `@sys.number` arrives as a JSON float (`2.0`); numeric
    /// strings are accepted too.
    ///
    /// # Errors
    ///
    /// Returns `ParameterError::Missing` if the parameter has no value and
    /// `ParameterError::Invalid` if it is not a whole number between 1 and
    /// `i32::MAX`.
    pub fn first_quantity(&self, name: &str) -> Result<i32, ParameterError> {
        let value = self
            .first(name)
            .ok_or_else(|| ParameterError::Missing(name.to_owned()))?;

        let invalid = |reason: String| ParameterError::Invalid {
            name: name.to_owned(),
            reason,
        };

        let number = match value {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| invalid(format!("{n} is not representable")))?,
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| invalid(format!("'{s}' is not a number")))?,
            other => return Err(invalid(format!("expected a number, got {other}"))),
        };

        if !number.is_finite() || number.fract() != 0.0 {
            return Err(invalid(format!("{number} is not a whole number")));
        }
        if number < 1.0 || number > f64::from(i32::MAX) {
            return Err(invalid(format!("{number} is out of range")));
        }

        #[allow(clippy::cast_possible_truncation)] // Range and fraction checked above
        Ok(number as i32)
    }
}

impl From<Map<String, Value>> for Parameters {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
