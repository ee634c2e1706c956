//! The body returned by the alerts check endpoint.
//!
//! The server owns the shape of this document. Only two keys are read here,
//! `total_alerts_checked` and `triggered_alerts`, and both fall back to an
//! empty value when missing or of an unexpected type. Everything else is kept
//! as-is and handed back to the caller.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const TOTAL_ALERTS_CHECKED: &str = "total_alerts_checked";
pub const TRIGGERED_ALERTS: &str = "triggered_alerts";

/// A parsed response. Deserializing fails unless the JSON is an object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertCheckResponse(Map<String, Value>);

impl AlertCheckResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    pub fn total_alerts_checked(&self) -> u64 {
        self.0
            .get(TOTAL_ALERTS_CHECKED)
            .and_then(Value::as_u64)
            .unwrap_or(0)
    }

    /// The count exactly as the server sent it, `0` when absent.
    pub fn total_alerts_checked_raw(&self) -> Value {
        self.0
            .get(TOTAL_ALERTS_CHECKED)
            .cloned()
            .unwrap_or_else(|| Value::from(0u64))
    }

    pub fn triggered_alerts(&self) -> &[Value] {
        self.0
            .get(TRIGGERED_ALERTS)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn triggered_count(&self) -> usize {
        self.triggered_alerts().len()
    }

    pub fn summary(&self) -> CheckSummary {
        CheckSummary {
            total_checked: self.total_alerts_checked_raw(),
            triggered: self.triggered_count(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for AlertCheckResponse {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// What gets logged after a successful check. The checked count is kept
/// verbatim, so `-1` or `3.0` from the server shows up as such.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckSummary {
    pub total_checked: Value,
    pub triggered: usize,
}

impl Default for CheckSummary {
    fn default() -> Self {
        Self {
            total_checked: Value::from(0u64),
            triggered: 0,
        }
    }
}

impl fmt::Display for CheckSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.total_checked {
            Value::String(raw) => write!(f, "{raw}")?,
            other => write!(f, "{other}")?,
        }
        write!(f, " alerts checked, {} triggered", self.triggered)
    }
}
