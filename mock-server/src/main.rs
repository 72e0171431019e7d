use std::time::Duration;

use hostio_mock::MockConfig;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let token = std::env::var("HOSTIO_TOKEN").unwrap_or_else(|_| "secret".to_string());
    let latency_ms = std::env::var("LATENCY_MS")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0);

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    let config = MockConfig::new(token).with_latency(Duration::from_millis(latency_ms));
    hostio_mock::run(listener, config).await
}
