use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

const BOOTSTRAP_URL: &str = "https://unpkg.com/bootstrap@5.3.3/dist/css/bootstrap.min.css";

/// Fetch a local Bootstrap copy for offline use. Failures are logged and
/// otherwise swallowed; the page falls back to a CDN.
pub async fn ensure_bootstrap_local(static_dir: PathBuf) {
    let target = static_dir.join("bootstrap.min.css");
    if target.exists() {
        return;
    }
    if let Err(err) = fetch_bootstrap(&static_dir, &target).await {
        debug!(error = %err, "bootstrap fetch skipped");
    }
}

async fn fetch_bootstrap(static_dir: &std::path::Path, target: &std::path::Path) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(static_dir).await?;
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;
    let body = client
        .get(BOOTSTRAP_URL)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    tokio::fs::write(target, &body).await?;
    Ok(())
}
