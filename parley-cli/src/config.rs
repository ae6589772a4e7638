use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;

#[derive(Debug, Parser)]
#[command(name = "parley", version, about = "Room-based signaling hub")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub serve: ServeArgs,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP/WebSocket server (the default).
    Serve(ServeArgs),

    /// Print a fresh key usable as a room management key or client key.
    Keygen,
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to listen on.
    #[arg(long, env = "PARLEY_BIND", default_value = "0.0.0.0:8090")]
    pub bind: SocketAddr,

    /// Origin allowed by CORS. Repeat or comma-separate; none allows any.
    #[arg(
        long = "allowed-origin",
        env = "PARLEY_ALLOWED_ORIGINS",
        value_delimiter = ','
    )]
    pub allowed_origins: Vec<String>,

    /// Tracing filter, e.g. `info` or `parley_server=debug`.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// The subcommand to run, falling back to `serve` with the top-level
    /// flags.
    pub fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Serve(self.serve))
    }
}
