#![warn(clippy::pedantic)]

use std::fs::File;
use std::io::{self, BufReader, Read};

use anyhow::{Context, Result};
use clap::Parser;
use secrecy::ExposeSecret;

mod cli;
mod commands;
mod constants;
mod convert;
mod event;
#[cfg(test)]
mod fixtures;
mod hook;
mod model;
mod server;
mod status;
mod utils;

#[tokio::main]
async fn main() -> Result<()> {
    cli::init_tracing();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Commands::Serve(args) => {
            server::serve(args).await?;
        }
        cli::Commands::Convert(args) => {
            let config = args.hook.try_into_config()?;
            let body: Box<dyn Read> = match &args.file {
                Some(path) => Box::new(BufReader::new(
                    File::open(path).with_context(|| format!("failed to open {path:?}"))?,
                )),
                None => Box::new(io::stdin().lock()),
            };
            let hook = hook::parse_hook(body, &args.event, &config).await?;
            if hook.is_none() {
                tracing::info!("{} does not trigger a build", args.event);
            }
            match (args.clone_url, &hook) {
                (true, Some(hook)) => match &config.legacy_auth {
                    Some(auth) => {
                        println!("{}", auth.authenticated_clone_url(&hook.repo)?.expose_secret());
                    }
                    None => println!("{}", hook.repo.clone),
                },
                (true, None) => {}
                (false, _) => {
                    serde_json::to_writer_pretty(io::stdout().lock(), &hook)?;
                    println!();
                }
            }
        }
        cli::Commands::Status(args) => {
            let status = status::BuildStatus::new(&args.status, args.key, args.name, args.url);
            serde_json::to_writer_pretty(io::stdout().lock(), &status)?;
            println!();
        }
    }
    Ok(())
}
