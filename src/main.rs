mod assets;
mod config;
mod errors;
mod fs;
mod logging;
mod server;

use crate::config::RootRegistry;
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path = PathBuf::from("vitrine.toml");
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("--config requires a path");
                    std::process::exit(2);
                }
                config_path = PathBuf::from(&args[i]);
            }
            _ => {}
        }
        i += 1;
    }

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5000);

    let registry = RootRegistry::new(config_path.clone());

    // Best-effort: try to fetch a local Bootstrap copy; never blocks startup.
    tokio::spawn(assets::ensure_bootstrap_local(PathBuf::from(
        server::STATIC_DIR,
    )));

    info!(config = %config_path.display(), port = port, "vitrine starting");

    server::serve(registry, port).await
}
