//! Google Chat Notify CLI
//!
//! 在 workflow 步骤中把 job 状态发送到 Google Chat

use anyhow::Result;
use clap::Parser;
use google_chat_notify::cli::{handle_notify, Cli};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // 通过 RUST_LOG 环境变量控制日志级别，默认为 info
    // stdout 留给 --dry-run 输出的 JSON
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("google_chat_notify=info,gchat_notify=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();
    handle_notify(cli.notify)
}
