use std::net::SocketAddr;

use server::{config::load_settings, router};
use server_api::ApiContext;
use storage::Storage;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (settings, warnings) = load_settings();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    for warning in &warnings {
        warn!("{warning}");
    }

    let app = router(ApiContext {
        storage: Storage::new(settings.course_policy),
    });

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, policy = %settings.course_policy, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
