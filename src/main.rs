use anyhow::Context;
use clap::Parser;

use openlink::cli::{Cli, Commands};
use openlink::config::init_config_from;
use openlink::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_config_from(cli.config.as_deref());
    let config = openlink::config::get_config();

    match cli.command {
        None | Some(Commands::Serve) => {
            let _guard = init_logging(&config.logging).context("Failed to initialize logging")?;
            openlink::runtime::modes::run_server().await
        }
        Some(command) => {
            if let Err(e) = openlink::runtime::modes::run_cli(command).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
