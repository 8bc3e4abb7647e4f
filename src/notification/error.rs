//! 通知错误类型

use thiserror::Error;

/// Google Chat 通知错误
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Webhook 返回了非 200 状态码
    #[error("Google Chat notification failed. response status={status}")]
    Delivery { status: u16 },

    /// 网络 / DNS / TLS 错误，原样透传 reqwest 的错误
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("unknown status '{0}' (expected success, cancelled or failure)")]
    InvalidStatus(String),

    /// 只保存去掉 query 后的地址
    #[error("invalid webhook url '{0}'")]
    InvalidWebhookUrl(String),
}

impl NotifyError {
    /// 打印前去掉 reqwest 错误中携带的 webhook URL（query 里有 key / token）
    pub fn without_url(self) -> Self {
        match self {
            NotifyError::Transport(e) => NotifyError::Transport(e.without_url()),
            other => other,
        }
    }
}
