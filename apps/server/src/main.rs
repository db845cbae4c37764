#![warn(clippy::all, clippy::pedantic)]

use std::io::{self, Read};

use actix_web::{App, HttpServer};
use anyhow::Context;
use clap::Parser;
use reqdash::parser::{ParserOptions, parse_with};
use tracing::{info, level_filters::LevelFilter};

mod cli;
mod config;
mod cors;
mod error;
mod report;
mod routes;
mod state;

use cli::{Cli, Command, ParseArgs, ServeArgs};
use config::Config;
use error::AppError;
use logger::{init_tracing, init_with_level};
use report::ParseReport;
use state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => {
            init_tracing();
            let config =
                Config::from_config(cli.config.as_ref())?.with_overrides(args.bind, args.port);
            run_server(config).await?;
        }
        Command::Parse(args) => {
            init_with_level(LevelFilter::WARN);
            print_parse(args)?;
        }
        Command::Config => {
            let config = Config::from_config(cli.config.as_ref())?;
            println!("{config}");
        }
    }

    Ok(())
}

async fn run_server(config: Config) -> Result<(), AppError> {
    let state = AppState::from_config(&config).await?;
    let cors = config.cors.clone();

    info!(bind = %config.server.bind, port = config.server.port, "Starting reqdash server");

    HttpServer::new(move || {
        let state = state.clone();
        App::new().wrap(cors::build_cors(&cors)).configure(move |cfg| state.configure(cfg))
    })
    .bind((config.server.bind.as_str(), config.server.port))?
    .run()
    .await?;

    Ok(())
}

fn print_parse(args: ParseArgs) -> anyhow::Result<()> {
    let command = match args.command {
        Some(command) => command,
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input).context("Failed to read command from stdin")?;
            input
        }
    };

    let options =
        if args.payload_only { ParserOptions::payload_only() } else { ParserOptions::default() };
    let report = ParseReport::from(parse_with(&command, &options));

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
