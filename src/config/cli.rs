use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};

/// Command-line arguments for the Slate binary.
#[derive(Debug, Parser)]
#[command(name = "slate", version, about = "Slate blog server")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "SLATE_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the blog HTTP server.
    Serve(Box<ServeArgs>),
    /// Load the posts file and print the derived slugs and dates.
    Check(CheckArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ContentOverrides {
    /// Override the path of the JSON posts file.
    #[arg(long = "posts-file", value_name = "PATH")]
    pub posts_file: Option<PathBuf>,

    /// Override the time zone used to format post dates (IANA name).
    #[arg(long = "site-timezone", value_name = "ZONE")]
    pub site_timezone: Option<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    #[command(flatten)]
    pub content: ContentOverrides,

    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the graceful shutdown timeout.
    #[arg(long = "server-graceful-shutdown-seconds", value_name = "SECONDS")]
    pub server_graceful_shutdown_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the directory served at the site root.
    #[arg(long = "static-public-dir", value_name = "PATH")]
    pub static_public_dir: Option<PathBuf>,

    /// Override the directory served under `/css`.
    #[arg(long = "static-css-dir", value_name = "PATH")]
    pub static_css_dir: Option<PathBuf>,

    /// Override the directory served under `/js`.
    #[arg(long = "static-js-dir", value_name = "PATH")]
    pub static_js_dir: Option<PathBuf>,

    /// Override the directory served under `/assets`.
    #[arg(long = "static-assets-dir", value_name = "PATH")]
    pub static_assets_dir: Option<PathBuf>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub content: ContentOverrides,
}
