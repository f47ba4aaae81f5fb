use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "viewport",
    about = "Viewport Server - server-side breakpoint detection",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, env = "VIEWPORT_PORT", default_value = "8046")]
    pub port: u16,

    #[arg(short, long, env = "VIEWPORT_CONFIG", help = "Path to a JSON options override file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    #[arg(long, default_value = "250", help = "User-agent classification budget in milliseconds")]
    pub classifier_timeout_ms: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start the HTTP server (default if no command specified)")]
    Serve {
        #[arg(short, long, env = "VIEWPORT_PORT", default_value = "8046")]
        port: u16,
    },

    #[command(about = "Detect the breakpoint for a request described on the command line")]
    Detect {
        #[arg(short, long, help = "User-Agent header value")]
        user_agent: Option<String>,

        #[arg(long, help = "Value of the breakpoint cookie")]
        cookie: Option<String>,

        #[arg(
            long = "header",
            value_name = "NAME=VALUE",
            help = "Extra request header, repeatable"
        )]
        headers: Vec<String>,
    },

    #[command(about = "Print the media queries built from the options")]
    Queries {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Validate the options file")]
    Validate,
}
