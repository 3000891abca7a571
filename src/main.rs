use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use waste_classifier::models::Config;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Parser)]
#[command(name = "waste-classifier")]
#[command(about = "Relay waste classification requests to Azure OpenAI")]
struct CliArgs {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on. Falls back to $PORT, then 8080.
    #[arg(long, value_parser = parse_port_arg)]
    port: Option<u16>,
}

fn parse_port_arg(input: &str) -> std::result::Result<u16, String> {
    input
        .trim()
        .parse::<u16>()
        .ok()
        .filter(|port| *port != 0)
        .ok_or_else(|| format!("Invalid port '{}'. Expected 1-65535", input))
}

fn resolve_port(arg: Option<u16>, env_port: Option<&str>) -> std::result::Result<u16, String> {
    match (arg, env_port) {
        (Some(port), _) => Ok(port),
        (None, Some(raw)) => parse_port_arg(raw),
        (None, None) => Ok(DEFAULT_PORT),
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "waste_classifier=info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let port = resolve_port(args.port, std::env::var("PORT").ok().as_deref())
        .map_err(anyhow::Error::msg)?;

    info!("Starting waste-classifier");

    let config = Config::from_env().context("Failed to load configuration")?;
    waste_classifier::server::run(config, &args.host, port)
        .await
        .context("Server terminated with an error")?;

    Ok(())
}
