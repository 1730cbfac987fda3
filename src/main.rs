// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, create the API client and hand it
//   to the prompt loop.
// - Returns `anyhow::Result` so startup errors print with their context.

use api_validator::{api::ApiClient, ui::main_menu};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    // Endpoints, timeout and pacing come from `API_VALIDATOR_*` variables
    // or fall back to the public jsonplaceholder API. See `config::Settings`.
    let api = ApiClient::from_env()?;

    // Blocks until the user types an exit keyword or interrupts the prompt.
    main_menu(&api)?;
    Ok(())
}
