use crate::{
    errors::CardError,
    models::{
        alertmanager::{
            Alert, Severity, ALERTNAME_LABEL, DESCRIPTION_ANNOTATION, SEVERITY_LABEL,
        },
        card::{
            ActionComponent, ActionValue, Card, Element, Field, Header, HeaderTemplate,
            SelectOption, Text,
        },
    },
    time::format_time,
};
use serde::Deserialize;

const INHIBIT_OPTIONS: [(&str, &str); 4] = [
    ("Inhibit 30mins", "time_30m"),
    ("Inhibit 1h", "time_1h"),
    ("Inhibit 4h", "time_4h"),
    ("Inhibit 24h", "time_24h"),
];
const INHIBIT_PLACEHOLDER: &str = "Inhibit Temporary";
const LINK_SEPARATOR: &str = " | ";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardOptions {
    /// Attach the inhibit menu to firing alerts.
    pub with_actions: bool,
    pub field_policy: FieldPolicy,
    /// Alertmanager link for alerts whose own `externalURL` is absent or
    /// empty. Only the link bar uses it.
    pub fallback_external_url: Option<String>,
}

/// What to do when `alertname`, `description` or (on a firing alert)
/// `severity` is absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldPolicy {
    /// Render the missing value as an empty string.
    #[default]
    Permissive,
    /// Fail with [`CardError::MissingField`].
    Strict,
}

/// Decodes an alert from JSON and builds its card.
pub fn build_card_from_json(json: &str, options: &CardOptions) -> Result<Card, CardError> {
    let alert: Alert = serde_json::from_str(json)?;
    build_card(&alert, options)
}

/// Maps one alert onto a Lark interactive card.
///
/// Element order is fixed: body, then the divider and label block when the
/// alert has non-reserved labels, then the link bar, then the inhibit menu
/// when requested for a firing alert.
pub fn build_card(alert: &Alert, options: &CardOptions) -> Result<Card, CardError> {
    let policy = options.field_policy;
    let alertname = required(alert.alertname(), ALERTNAME_LABEL, policy)?;
    let description = required(alert.description(), DESCRIPTION_ANNOTATION, policy)?;
    if !alert.is_resolved() {
        required(alert.severity_label(), SEVERITY_LABEL, policy)?;
    }

    let header = header(alert, alertname);
    let body = body(alert, alertname, description)?;
    let (divider, labels) = match label_block(alert) {
        Some(block) => (Some(Element::Hr), Some(block)),
        None => (None, None),
    };
    let link_bar = link_bar(alert, options.fallback_external_url.as_deref());
    let actions = (options.with_actions && !alert.is_resolved()).then(|| action_menu(alert));

    let elements: Vec<Element> = [Some(body), divider, labels, Some(link_bar), actions]
        .into_iter()
        .flatten()
        .collect();

    let card = Card::new(header, elements);
    log::trace!("Built = {:?}", card);
    Ok(card)
}

fn required<'a>(
    value: Option<&'a str>,
    name: &'static str,
    policy: FieldPolicy,
) -> Result<&'a str, CardError> {
    match (value, policy) {
        (Some(value), _) => Ok(value),
        (None, FieldPolicy::Permissive) => {
            log::debug!("Alert has no '{name}', rendering it empty");
            Ok("")
        }
        (None, FieldPolicy::Strict) => Err(CardError::MissingField(name)),
    }
}

fn header(alert: &Alert, alertname: &str) -> Header {
    if alert.is_resolved() {
        return Header::new(HeaderTemplate::Green, format!("✅ Resolved: {alertname}"));
    }
    let (template, prefix) = match alert.severity() {
        Some(Severity::Critical) => (HeaderTemplate::Red, "🚨 Critical"),
        Some(Severity::Warning) => (HeaderTemplate::Yellow, "⚠️ Warning"),
        Some(Severity::Info) => (HeaderTemplate::Blue, "ℹ️ Info"),
        None => (HeaderTemplate::Unset, ""),
    };
    Header::new(template, format!("{prefix}: {alertname}"))
}

fn body(alert: &Alert, alertname: &str, description: &str) -> Result<Element, CardError> {
    let time = if alert.is_resolved() {
        format!("**🕐 EndsAt：**\n{}", format_time(alert.ends_at())?)
    } else {
        format!("**🕐 StartsAt：**\n{}", format_time(alert.starts_at())?)
    };

    Ok(Element::Div {
        fields: vec![
            Field::short(time),
            Field::short(format!("**🏷️ EventType：**\n{alertname}")),
            Field::wide(""),
            Field::wide(format!("**📝 Description: **\n{description}")),
        ],
    })
}

fn label_block(alert: &Alert) -> Option<Element> {
    let extra = alert.extra_labels();
    if extra.is_empty() {
        return None;
    }
    let content = extra
        .iter()
        .map(|(key, value)| format!("**{key}:** {value}"))
        .collect::<Vec<_>>()
        .join("\n");
    Some(Element::Markdown { content })
}

fn link_bar(alert: &Alert, fallback_external_url: Option<&str>) -> Element {
    let external_url = alert
        .external_url()
        .as_deref()
        .filter(|url| !url.is_empty())
        .or(fallback_external_url)
        .unwrap_or_default();
    let prometheus = alert
        .generator_url()
        .as_deref()
        .filter(|url| !url.is_empty())
        .map(|url| format!("🔗 [prometheus]({url})"));
    let runbook = alert
        .runbook_url()
        .filter(|url| !url.is_empty())
        .map(|url| format!("📒 [runbook]({url})"));

    let content = [
        Some(format!("🚨 [alertmanager]({external_url})")),
        prometheus,
        runbook,
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(LINK_SEPARATOR);
    Element::Markdown { content }
}

/// The payload is the alert document exactly as it was received.
fn action_menu(alert: &Alert) -> Element {
    let options = INHIBIT_OPTIONS
        .iter()
        .map(|(label, value)| SelectOption::new(*label, *value))
        .collect();

    Element::Action {
        actions: vec![ActionComponent::SelectStatic {
            options,
            placeholder: Text::plain(INHIBIT_PLACEHOLDER),
            value: ActionValue::new(alert.raw_json().to_string()),
        }],
    }
}
