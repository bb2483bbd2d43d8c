use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use control::Dispatcher;
use device::{DeviceEndpoint, TcpTransport, Transport};

mod config;
mod discovery;
mod http;
mod mqtt;
mod version;

use config::load_settings;
use http::{build_router, AppState};

fn default_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(default_env_filter())
        .init();

    let settings = load_settings();
    info!(
        beamer = %format!("{}:{}", settings.beamer_host, settings.beamer_port),
        git_hash = version::git_hash(),
        "starting beamer bridge"
    );

    let endpoint = DeviceEndpoint::new(settings.beamer_host.clone(), settings.beamer_port);
    let transport: Arc<dyn Transport> = Arc::new(TcpTransport::new(endpoint));
    let dispatcher = Arc::new(Dispatcher::new(transport.clone()));

    let state = Arc::new(AppState {
        dispatcher: dispatcher.clone(),
        transport,
    });
    let app = build_router(state, Path::new(&settings.www_dir));

    let addr: SocketAddr = settings.http_bind.parse()?;
    info!(%addr, "bridge listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Either front end failing to come up is fatal; past startup, the mqtt
    // task retries internally and only returns on a pre-ConnAck error.
    tokio::select! {
        result = mqtt::run(settings.clone(), dispatcher) => {
            result?;
            anyhow::bail!("mqtt front end exited unexpectedly");
        }
        result = async { axum::serve(listener, app).await } => {
            result?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_filter_falls_back_to_info() {
        std::env::remove_var("RUST_LOG");
        assert_eq!(default_env_filter().to_string(), "info");
    }
}
