use derive_getters::Getters;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{value::RawValue, Number};
use std::fmt;

pub const ALERTNAME_LABEL: &str = "alertname";
pub const SEVERITY_LABEL: &str = "severity";
pub const PROMETHEUS_LABEL: &str = "prometheus";
pub const DESCRIPTION_ANNOTATION: &str = "description";
pub const RUNBOOK_ANNOTATION: &str = "runbook_url";

/// Labels that drive the card layout and are left out of the label block.
pub const RESERVED_LABELS: [&str; 3] = [ALERTNAME_LABEL, SEVERITY_LABEL, PROMETHEUS_LABEL];

/// Alertmanager webhook body. Only `alerts` is required.
#[derive(Debug, Deserialize, Getters)]
pub struct Message {
    #[serde(default)]
    receiver: Option<String>,
    alerts: Vec<Alert>,
    #[serde(rename = "externalURL", default)]
    external_url: Option<String>,
}

impl Message {
    pub fn into_alerts(self) -> Vec<Alert> {
        self.alerts
    }
}

/// A single alert as sent by Alertmanager.
///
/// `raw` is the alert exactly as it appeared in the input, byte for byte.
#[derive(Clone, Debug, Deserialize, Getters)]
#[serde(try_from = "Box<RawValue>")]
pub struct Alert {
    status: Status,
    labels: IndexMap<String, String>,
    annotations: IndexMap<String, String>,
    starts_at: Timestamp,
    ends_at: Timestamp,
    generator_url: Option<String>,
    external_url: Option<String>,
    raw: Box<RawValue>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlertFields {
    status: Status,
    labels: IndexMap<String, String>,
    annotations: IndexMap<String, String>,
    starts_at: Timestamp,
    ends_at: Timestamp,
    #[serde(rename = "generatorURL", default)]
    generator_url: Option<String>,
    #[serde(rename = "externalURL", default)]
    external_url: Option<String>,
}

impl TryFrom<Box<RawValue>> for Alert {
    type Error = serde_json::Error;

    fn try_from(raw: Box<RawValue>) -> Result<Self, Self::Error> {
        let fields: AlertFields = serde_json::from_str(raw.get())?;
        Ok(Alert {
            status: fields.status,
            labels: fields.labels,
            annotations: fields.annotations,
            starts_at: fields.starts_at,
            ends_at: fields.ends_at,
            generator_url: fields.generator_url,
            external_url: fields.external_url,
            raw,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Firing,
    Resolved,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    /// `None` for anything outside the three known levels.
    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "critical" => Some(Severity::Critical),
            "warning" => Some(Severity::Warning),
            "info" => Some(Severity::Info),
            _ => None,
        }
    }
}

/// Either an RFC 3339 string or milliseconds since the epoch. Epoch values may
/// carry a fractional part.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    EpochMillis(Number),
    Text(String),
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::EpochMillis(millis) => write!(f, "{millis}"),
            Timestamp::Text(text) => f.write_str(text),
        }
    }
}

impl Alert {
    /// The alert document as received, used for the action payload.
    pub fn raw_json(&self) -> &str {
        self.raw.get()
    }

    pub fn is_resolved(&self) -> bool {
        self.status == Status::Resolved
    }

    pub fn alertname(&self) -> Option<&str> {
        self.labels.get(ALERTNAME_LABEL).map(String::as_str)
    }

    /// Raw severity label, which may hold values outside [`Severity`].
    pub fn severity_label(&self) -> Option<&str> {
        self.labels.get(SEVERITY_LABEL).map(String::as_str)
    }

    pub fn severity(&self) -> Option<Severity> {
        self.severity_label().and_then(Severity::from_label)
    }

    pub fn description(&self) -> Option<&str> {
        self.annotations
            .get(DESCRIPTION_ANNOTATION)
            .map(String::as_str)
    }

    pub fn runbook_url(&self) -> Option<&str> {
        self.annotations.get(RUNBOOK_ANNOTATION).map(String::as_str)
    }

    /// Labels outside [`RESERVED_LABELS`], in the order they were received.
    pub fn extra_labels(&self) -> Vec<(&str, &str)> {
        self.labels
            .iter()
            .filter(|(key, _)| !RESERVED_LABELS.contains(&key.as_str()))
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect()
    }
}
