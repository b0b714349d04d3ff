use std::io::{Error, ErrorKind};

use mock_server::Fixture;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// `none` models an empty table; unset falls back to `default`.
fn parse_count(key: &str, raw: Option<String>, default: u64) -> Result<Option<u64>, Error> {
    match raw {
        None => Ok(Some(default)),
        Some(val) if val.eq_ignore_ascii_case("none") => Ok(None),
        Some(val) => val.trim().parse().map(Some).map_err(|_| {
            Error::new(
                ErrorKind::InvalidInput,
                format!("{key} must be a non-negative integer or \"none\", got {val:?}"),
            )
        }),
    }
}

fn env_count(key: &str, default: u64) -> Result<Option<u64>, Error> {
    parse_count(key, std::env::var(key).ok(), default)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let fixture = Fixture {
        households: env_count("MOCK_HOUSEHOLDS", 42)?,
        population: env_count("MOCK_POPULATION", 128)?,
    };
    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, ?fixture, "listening");
    mock_server::run(listener, fixture).await
}
