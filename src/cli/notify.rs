// src/cli/notify.rs
//! notify 命令处理
//!
//! 参数既可以通过命令行传入，也可以读取 GitHub Action 的 `INPUT_*` 变量，
//! 因此同一个二进制既能在 shell 步骤里调用，也能作为 container action 运行。

use anyhow::Result;
use clap::Args;
use tracing::{error, info};

use crate::notification::webhook::redact_webhook_url;
use crate::notification::{
    NotificationRequest, Notifier, NotifyError, PipelineContext, Status, WebhookConfig,
    DEFAULT_TIMEOUT_SECS,
};

/// notify 命令参数
#[derive(Args, Debug, Clone)]
pub struct NotifyArgs {
    /// 卡片标题
    #[arg(long, short = 'n', env = "INPUT_NAME")]
    pub name: String,
    /// Google Chat incoming webhook URL
    #[arg(long, env = "INPUT_URL", hide_env_values = true)]
    pub url: String,
    /// Pipeline 状态: success | cancelled | failure
    #[arg(long, short = 's', env = "INPUT_STATUS")]
    pub status: String,
    /// 卡片副标题（可选）
    #[arg(long, env = "INPUT_SUBTITLE")]
    pub subtitle: Option<String>,
    /// Thread key，相同 key 的消息归到同一个 thread
    #[arg(long, env = "INPUT_THREADKEY")]
    pub thread_key: Option<String>,
    /// 请求超时（秒）
    #[arg(long, env = "GCHAT_NOTIFY_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
    /// Dry-run 模式（只打印 JSON 不发送）
    #[arg(long)]
    pub dry_run: bool,
}

impl NotifyArgs {
    /// 在边界处校验 status 与 webhook URL，空字符串视为未设置
    pub fn to_request(&self) -> Result<NotificationRequest, NotifyError> {
        let status: Status = self.status.parse()?;
        validate_webhook_url(&self.url)?;

        let mut request = NotificationRequest::new(self.name.clone(), self.url.trim(), status);
        if let Some(subtitle) = non_empty(self.subtitle.as_deref()) {
            request = request.with_subtitle(subtitle);
        }
        if let Some(thread_key) = non_empty(self.thread_key.as_deref()) {
            request = request.with_thread_key(thread_key);
        }
        Ok(request)
    }

    pub fn webhook_config(&self) -> WebhookConfig {
        WebhookConfig {
            timeout_secs: self.timeout,
            ..Default::default()
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// 只接受 http / https；错误里只保留去掉 query 的地址
pub fn validate_webhook_url(url: &str) -> Result<(), NotifyError> {
    let invalid = || NotifyError::InvalidWebhookUrl(redact_webhook_url(url.trim()).to_string());
    let parsed = reqwest::Url::parse(url.trim()).map_err(|_| invalid())?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(invalid()),
    }
}

/// 处理 notify 命令
pub fn handle_notify(args: NotifyArgs) -> Result<()> {
    let request = args.to_request()?;
    let context = PipelineContext::from_env();

    if args.dry_run {
        let message = Notifier::build_message(&request, &context);
        println!("{}", serde_json::to_string_pretty(&message)?);
        info!(status = %request.status, "Dry-run, notification not sent");
        return Ok(());
    }

    let notifier = Notifier::with_config(args.webhook_config())?;
    if let Err(e) = notifier.notify(&request, &context) {
        let e = e.without_url();
        error!(error = %e, status = %request.status, "Failed to send Google Chat notification");
        return Err(e.into());
    }

    Ok(())
}
