use anyhow::Result;
use minikanban::api::{self, AppState};
use minikanban::backend::create_backend;
use minikanban::config::Config;
use minikanban::logger;
use std::path::PathBuf;

const GENERATE_CONFIG_FLAG: &str = "--generate-config";

#[tokio::main]
async fn main() -> Result<()> {
    // `minikanban --generate-config [PATH]` writes a default config and exits
    let mut args = std::env::args().skip(1);
    if let Some(arg) = args.next() {
        if arg != GENERATE_CONFIG_FLAG {
            anyhow::bail!("Unknown argument '{}'. Usage: minikanban [{} [PATH]]", arg, GENERATE_CONFIG_FLAG);
        }
        let path = match args.next() {
            Some(path) => PathBuf::from(path),
            None => Config::get_default_config_path()?,
        };
        return Config::generate_default_config(path);
    }

    let config = Config::load()?;
    logger::init(&config.logging)?;

    let backend = create_backend(&config.storage).await?;
    let state = AppState::new(backend.clone(), config.resolve_api_key());

    let served = api::serve(config.bind_address()?, state, api::shutdown_signal()).await;

    // Flush even when the server stopped on an error
    if let Err(e) = backend.shutdown().await {
        log::error!("Failed to shut down {} backend: {}", backend.backend_type(), e);
        served?;
        return Err(e.into());
    }

    served
}
