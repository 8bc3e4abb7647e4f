//! CLI command handling

pub mod notify;

pub use notify::*;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "gchat-notify")]
#[command(about = "Send CI/CD pipeline results to Google Chat")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub notify: NotifyArgs,
}
