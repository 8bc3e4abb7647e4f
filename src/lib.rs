//! Google Chat Notify - 将 CI/CD pipeline 结果以 card 消息发送到 Google Chat

pub mod cli;
pub mod notification;

pub use notification::{
    CardMessage, NotificationRequest, Notifier, NotifyError, PipelineContext, Status,
    WebhookConfig,
};
