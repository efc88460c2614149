use std::{io, sync::OnceLock};

use application::{terminal, Args, Config, Service};
use service::infra::Http;
use tokio::{io::BufReader, task::LocalSet};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Rendered views go to stdout, so logs never do.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || LOG_LEVEL.get().copied().unwrap_or(log::Level::INFO)
                            >= *meta.level()
                })),
        )
        .init();

    _ = LocalSet::new().run_until(start()).await;
}

async fn start() -> Result<(), ()> {
    let Args { config } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config { source, view, log } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let http = Http::new(&source.into()).map_err(|e| {
        log::error!("failed to initialize `Http` source: {e}");
    })?;
    let service = Service::new(view.into(), http);

    terminal::run(
        service,
        BufReader::new(tokio::io::stdin()),
        io::stdout().lock(),
    )
    .await
    .map_err(|e| log::error!("terminal failed: {e}"))
}
