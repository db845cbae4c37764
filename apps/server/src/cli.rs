use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Parse curl commands and relay requests for the reqdash UI
#[derive(Debug, Parser)]
#[command(name = "reqdash-server", version, about)]
pub struct Cli {
    /// Config file (created with defaults when missing)
    #[arg(short, long, global = true, env = "REQDASH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve(ServeArgs),
    /// Parse a curl command and print the request descriptor as JSON
    Parse(ParseArgs),
    /// Print the effective configuration
    Config,
}

#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Address to bind, overrides `server.bind`
    #[arg(long)]
    pub bind: Option<String>,

    /// Port to listen on, overrides `server.port`
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Derive the method from payload flags only, ignoring -X/--request
    #[arg(long)]
    pub payload_only: bool,

    /// Command text; read from stdin when omitted
    pub command: Option<String>,
}
