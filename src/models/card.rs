//! Lark interactive card documents.
//!
//! Field names and `tag` values follow the Lark card schema so that
//! `serde_json::to_string(&card)` is the wire format.
use derive_getters::Getters;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize, Getters)]
pub struct Card {
    config: CardConfig,
    header: Header,
    elements: Vec<Element>,
}

impl Card {
    pub(crate) fn new(header: Header, elements: Vec<Element>) -> Self {
        Card {
            config: CardConfig::default(),
            header,
            elements,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Getters)]
pub struct CardConfig {
    wide_screen_mode: bool,
}

impl Default for CardConfig {
    fn default() -> Self {
        CardConfig {
            wide_screen_mode: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Getters)]
pub struct Header {
    template: HeaderTemplate,
    title: Text,
}

impl Header {
    pub(crate) fn new(template: HeaderTemplate, title: impl Into<String>) -> Self {
        Header {
            template,
            title: Text::plain(title),
        }
    }
}

/// Header color. `Unset` serializes as an empty string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderTemplate {
    Green,
    Red,
    Yellow,
    Blue,
    #[serde(rename = "")]
    Unset,
}

#[derive(Clone, Debug, PartialEq, Serialize, Getters)]
pub struct Text {
    content: String,
    tag: TextTag,
}

impl Text {
    pub fn plain(content: impl Into<String>) -> Self {
        Text {
            content: content.into(),
            tag: TextTag::PlainText,
        }
    }

    pub fn lark_md(content: impl Into<String>) -> Self {
        Text {
            content: content.into(),
            tag: TextTag::LarkMd,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextTag {
    PlainText,
    LarkMd,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum Element {
    Div { fields: Vec<Field> },
    Hr,
    Markdown { content: String },
    Action { actions: Vec<ActionComponent> },
}

#[derive(Clone, Debug, PartialEq, Serialize, Getters)]
pub struct Field {
    is_short: bool,
    text: Text,
}

impl Field {
    pub fn short(content: impl Into<String>) -> Self {
        Field {
            is_short: true,
            text: Text::lark_md(content),
        }
    }

    pub fn wide(content: impl Into<String>) -> Self {
        Field {
            is_short: false,
            text: Text::lark_md(content),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum ActionComponent {
    SelectStatic {
        options: Vec<SelectOption>,
        placeholder: Text,
        value: ActionValue,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Getters)]
pub struct SelectOption {
    text: Text,
    value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        SelectOption {
            text: Text::plain(label),
            value: value.into(),
        }
    }
}

/// Opaque value handed back by Lark when an option is picked.
#[derive(Clone, Debug, PartialEq, Serialize, Getters)]
pub struct ActionValue {
    alert: String,
}

impl ActionValue {
    pub fn new(alert: String) -> Self {
        ActionValue { alert }
    }
}

/// Envelope for posting a card through a Lark bot webhook.
#[derive(Debug, Serialize)]
pub struct LarkMessage {
    msg_type: &'static str,
    card: Card,
}

impl From<Card> for LarkMessage {
    fn from(card: Card) -> Self {
        LarkMessage {
            msg_type: "interactive",
            card,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn elements_serialize_with_tags() {
        let elements = vec![
            Element::Div {
                fields: vec![Field::short("a"), Field::wide("")],
            },
            Element::Hr,
            Element::Markdown {
                content: "**host:** a1".to_string(),
            },
        ];
        let value = serde_json::to_value(&elements).expect("Failed to serialize elements");
        assert_eq!(
            value,
            json!([
                {
                    "tag": "div",
                    "fields": [
                        {"is_short": true, "text": {"content": "a", "tag": "lark_md"}},
                        {"is_short": false, "text": {"content": "", "tag": "lark_md"}}
                    ]
                },
                {"tag": "hr"},
                {"tag": "markdown", "content": "**host:** a1"}
            ])
        );
    }

    #[test]
    fn unset_template_is_empty_string() {
        let header = Header::new(HeaderTemplate::Unset, ": X");
        let value = serde_json::to_value(&header).expect("Failed to serialize header");
        assert_eq!(
            value,
            json!({"template": "", "title": {"content": ": X", "tag": "plain_text"}})
        );
    }

    #[test]
    fn select_static_shape() {
        let action = Element::Action {
            actions: vec![ActionComponent::SelectStatic {
                options: vec![SelectOption::new("Inhibit 1h", "time_1h")],
                placeholder: Text::plain("Inhibit Temporary"),
                value: ActionValue::new("{}".to_string()),
            }],
        };
        let value = serde_json::to_value(&action).expect("Failed to serialize action");
        assert_eq!(
            value,
            json!({
                "tag": "action",
                "actions": [{
                    "tag": "select_static",
                    "options": [{"text": {"content": "Inhibit 1h", "tag": "plain_text"}, "value": "time_1h"}],
                    "placeholder": {"content": "Inhibit Temporary", "tag": "plain_text"},
                    "value": {"alert": "{}"}
                }]
            })
        );
    }

    #[test]
    fn message_envelope() {
        let card = Card::new(Header::new(HeaderTemplate::Green, "t"), vec![Element::Hr]);
        let value =
            serde_json::to_value(LarkMessage::from(card)).expect("Failed to serialize message");
        assert_eq!(value["msg_type"], "interactive");
        assert_eq!(value["card"]["config"]["wide_screen_mode"], true);
        assert_eq!(value["card"]["header"]["template"], "green");
        assert_eq!(value["card"]["elements"], json!([{"tag": "hr"}]));
    }
}
