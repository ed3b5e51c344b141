//! Renders Prometheus Alertmanager alerts as Lark (Feishu) interactive cards.
//!
//! [`build_card`] is the whole transformation. The `lark-alert-card` binary
//! wraps it to turn a webhook body on stdin into Lark messages on stdout.
pub mod builder;
pub mod errors;
pub mod time;

pub mod models {
    pub mod alertmanager;
    pub mod card;
    pub mod config;
}

pub mod controllers {
    pub mod driver;
}

#[cfg(test)]
mod test {
    pub(crate) mod consts;
}

pub use builder::{build_card, build_card_from_json, CardOptions, FieldPolicy};
pub use errors::CardError;
pub use models::{alertmanager::Alert, card::Card};
pub use time::format_time;
