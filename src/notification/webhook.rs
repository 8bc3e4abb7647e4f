//! Google Chat Webhook 客户端模块
//!
//! 通过 incoming webhook 投递 card 消息，每次调用只发送一次，不重试

use regex::Regex;
use reqwest::blocking::Client;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::error::NotifyError;
use super::payload::CardMessage;

/// 默认超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Webhook 客户端配置
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// 超时时间 (秒)
    pub timeout_secs: u64,
    /// User-Agent header
    pub user_agent: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("gchat-notify/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// 静态编译的 spaces key 正则
static SPACES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"spaces/(.*)/").expect("Invalid spaces regex"));

/// 从 webhook URL 中提取 spaces key
///
/// 匹配 `spaces/<key>/`（贪婪匹配到最后一个 `/`），不匹配时返回 `None`，
/// 调用方据此跳过 thread 而不是报错
pub fn extract_spaces_key(webhook_url: &str) -> Option<String> {
    SPACES_RE
        .captures(webhook_url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// 脱敏后的 webhook 地址（去掉 query 中的 key / token）
pub fn redact_webhook_url(webhook_url: &str) -> &str {
    webhook_url.split('?').next().unwrap_or(webhook_url)
}

/// Google Chat Webhook 客户端
#[derive(Debug)]
pub struct WebhookClient {
    client: Client,
    config: WebhookConfig,
}

impl WebhookClient {
    /// 创建新的 Webhook 客户端
    pub fn new(config: WebhookConfig) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    /// 发送 card 消息
    ///
    /// 仅 HTTP 200 视为成功；传输层错误原样返回
    pub fn send(&self, webhook_url: &str, message: &CardMessage) -> Result<(), NotifyError> {
        let target = redact_webhook_url(webhook_url);
        debug!(
            url = %target,
            threaded = message.thread.is_some(),
            timeout_secs = self.config.timeout_secs,
            "Posting card message to Google Chat"
        );

        let start = std::time::Instant::now();
        let response = self
            .client
            .post(webhook_url)
            .json(message)
            .send()
            .map_err(|e| {
                // reqwest 的错误文本包含完整 URL（含 key / token），只记录类型
                warn!(
                    url = %target,
                    connect = e.is_connect(),
                    timeout = e.is_timeout(),
                    "Webhook request failed"
                );
                NotifyError::Transport(e)
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            warn!(
                url = %target,
                status,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Google Chat rejected notification"
            );
            return Err(NotifyError::Delivery { status });
        }

        info!(
            url = %target,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Notification delivered"
        );
        Ok(())
    }
}
