use crate::{
    builder::build_card,
    errors::RunError,
    models::{alertmanager::Message, card::LarkMessage, config::Config},
};
use std::io::{Read, Write};

/// Reads one Alertmanager webhook body from `input` and writes one Lark
/// message per alert to `output`. Returns the number of messages written.
///
/// Every card is built before anything is written, so a failing alert leaves
/// `output` untouched.
pub fn run<R: Read, W: Write>(
    config: &Config,
    mut input: R,
    mut output: W,
) -> Result<usize, RunError> {
    let mut body = String::new();
    input.read_to_string(&mut body)?;
    log::trace!("Request =\n{}\nEOF", body);

    let message: Message = serde_json::from_str(&body).map_err(RunError::BadJson)?;
    log::debug!(
        "Received {} alerts for receiver {:?}",
        message.alerts().len(),
        message.receiver()
    );

    let mut options = config.card_options();
    if let Some(url) = message.external_url() {
        options.fallback_external_url = Some(url.clone());
    }

    let mut rendered = vec![];
    for alert in message.into_alerts() {
        let has_url = alert.external_url().as_deref().map_or(false, |u| !u.is_empty());
        if !has_url && options.fallback_external_url.is_none() {
            log::warn!(
                "No externalURL for {:?}, alertmanager link will be empty",
                alert.alertname()
            );
        }
        let card = build_card(&alert, &options)?;
        let lark_message = LarkMessage::from(card);
        let line = if *config.pretty() {
            serde_json::to_string_pretty(&lark_message)
        } else {
            serde_json::to_string(&lark_message)
        }
        .map_err(RunError::Encode)?;
        rendered.push(line);
    }

    for line in &rendered {
        writeln!(output, "{line}")?;
    }
    output.flush()?;
    log::debug!("Wrote {} cards", rendered.len());

    Ok(rendered.len())
}
