//! Main entry point for the gateway server.

use anyhow::Context as _;
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

use calendly_gateway::build_schema;
use calendly_gateway::server::app;
use calendly_gateway::server::GatewayState;

/// Options for the gateway.
#[derive(Parser, Debug)]
#[command(
    name = "calendly-gateway",
    about = "GraphQL gateway in front of the Calendly REST API"
)]
struct Opt {
    /// Log level (off|error|warn|info|debug|trace).
    #[arg(long = "log", default_value = "info", env = "CALENDLY_GATEWAY_LOG")]
    log_level: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 4000, env = "PORT")]
    port: u16,

    /// Base URL of the upstream API.
    #[arg(
        long,
        default_value = "https://api.calendly.com",
        env = "CALENDLY_API_URL"
    )]
    upstream: Url,
}

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&opt.log_level).context("could not parse log configuration")?,
        )
        .init();

    let state = GatewayState {
        schema: build_schema(),
        upstream: opt.upstream,
    };

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", opt.port))
        .await
        .with_context(|| format!("could not bind to port {}", opt.port))?;
    tracing::info!(
        "gateway ready at http://{}",
        listener.local_addr().context("no local address")?
    );

    axum::serve(listener, app(state))
        .await
        .context("server exited with an error")?;

    Ok(())
}
