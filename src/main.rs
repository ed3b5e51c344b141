use lark_alert_card::{controllers::driver, errors::RunError, models::config::Config};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    match render() {
        Ok(count) => {
            log::info!("Rendered {count} cards");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to render alerts: {e}");
            ExitCode::FAILURE
        }
    }
}

fn render() -> Result<usize, RunError> {
    let config = Config::load(std::env::args().nth(1))?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    driver::run(&config, stdin.lock(), stdout.lock())
}
