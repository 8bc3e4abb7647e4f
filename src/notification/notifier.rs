//! Google Chat 通知发送器
//!
//! 流程：构建 card → 按需挂 thread → 单次 POST

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::context::PipelineContext;
use super::error::NotifyError;
use super::payload::{CardBuilder, CardMessage, Thread};
use super::status::Status;
use super::webhook::{extract_spaces_key, WebhookClient, WebhookConfig};

/// 一次通知的输入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub title: String,
    pub subtitle: Option<String>,
    pub webhook_url: String,
    pub status: Status,
    /// 用于把多条通知归到同一个 thread
    pub thread_key: Option<String>,
}

impl NotificationRequest {
    pub fn new(title: impl Into<String>, webhook_url: impl Into<String>, status: Status) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            webhook_url: webhook_url.into(),
            status,
            thread_key: None,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_thread_key(mut self, thread_key: impl Into<String>) -> Self {
        self.thread_key = Some(thread_key.into());
        self
    }
}

/// Google Chat 通知器
#[derive(Debug)]
pub struct Notifier {
    client: WebhookClient,
}

impl Notifier {
    /// 使用默认配置创建
    pub fn new() -> Result<Self, NotifyError> {
        Self::with_config(WebhookConfig::default())
    }

    pub fn with_config(config: WebhookConfig) -> Result<Self, NotifyError> {
        Ok(Self {
            client: WebhookClient::new(config)?,
        })
    }

    /// 构建待发送的消息（不发送）
    ///
    /// 只有同时拿到 thread key 和 spaces key 时才挂 thread
    pub fn build_message(request: &NotificationRequest, context: &PipelineContext) -> CardMessage {
        let message = CardBuilder::new(request.title.clone(), request.status, context)
            .subtitle(request.subtitle.as_deref())
            .build();

        let spaces_key = extract_spaces_key(&request.webhook_url);
        match (request.thread_key.as_deref(), spaces_key) {
            (Some(thread_key), Some(spaces_key)) if !thread_key.is_empty() && !spaces_key.is_empty() => {
                debug!(spaces_key = %spaces_key, thread_key = %thread_key, "Attaching thread");
                message.with_thread(Thread::new(&spaces_key, thread_key))
            }
            (Some(_), None) => {
                debug!("No spaces key in webhook url, sending unthreaded");
                message
            }
            _ => message,
        }
    }

    /// 构建并发送通知
    pub fn notify(
        &self,
        request: &NotificationRequest,
        context: &PipelineContext,
    ) -> Result<(), NotifyError> {
        let message = Self::build_message(request, context);

        info!(
            status = %request.status,
            repository = %context.full_name(),
            event = %context.event_name,
            thread = ?message.thread.as_ref().map(|t| t.name.as_str()),
            "Sending Google Chat notification"
        );

        self.client.send(&request.webhook_url, &message)
    }
}
