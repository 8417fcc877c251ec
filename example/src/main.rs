use std::env;

use barbican_client::{BarbicanError, Client, ListParams};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Lists the project's secrets, optionally filtered by the name given as first argument.
///
/// Connection settings come from `BARBICAN_ENDPOINT`, `OS_PROJECT_ID` and `OS_AUTH_TOKEN`.
#[tokio::main]
async fn main() -> Result<(), BarbicanError> {
    let _guard = init_logger();

    let client = Client::from_env().await?;

    let mut params = ListParams::new(10, 0);
    if let Some(name) = env::args().nth(1) {
        params = params.name(name);
    }

    let secrets = client.secrets();
    let mut page = secrets.list(&params).await?;
    loop {
        for secret in &page.items {
            tracing::info!(
                secret_ref = %secret.secret_ref,
                "{} ({})",
                secret.name.as_deref().unwrap_or("<unnamed>"),
                secret.status.as_deref().unwrap_or("UNKNOWN")
            );
        }
        match page.next.take() {
            Some(next) => page = secrets.list_page(&next).await?,
            None => break,
        }
    }

    Ok(())
}

/// Plain fmt output unless `JSON_LOG=true`, which switches to bunyan JSON on a
/// non-blocking stdout. The returned guard flushes that writer on drop.
fn init_logger() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("JSON_LOG")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(false);

    let (layer, guard) = if json {
        let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        let bunyan = BunyanFormattingLayer::new(env!("CARGO_PKG_NAME").to_string(), writer);
        (JsonStorageLayer.and_then(bunyan).boxed(), Some(guard))
    } else {
        (tracing_subscriber::fmt::layer().boxed(), None)
    };

    // `init` also forwards reqwest's `log` records into tracing
    tracing_subscriber::registry().with(filter).with(layer).init();
    guard
}
