pub mod app;
pub mod background;
pub mod config;
pub mod server;
pub mod services;

use config::AppConfig;

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load environment and runtime configuration.
pub fn init_foundation() -> AppConfig {
    load_dotenv();
    let config = AppConfig::load();
    tracing::info!(
        host = %config.host,
        port = config.server_port,
        max_sessions = config.max_sessions,
        "Settings loaded"
    );
    config
}
