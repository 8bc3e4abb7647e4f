//! 通知层 - 将 pipeline 结果发送到 Google Chat
//!
//! # 使用示例
//! ```ignore
//! use google_chat_notify::notification::{NotificationRequest, Notifier, PipelineContext, Status};
//!
//! let request = NotificationRequest::new("Build", webhook_url, Status::Success)
//!     .with_thread_key("release-1.2");
//! let context = PipelineContext::from_env();
//! Notifier::new()?.notify(&request, &context)?;
//! ```

pub mod context;
pub mod error;
pub mod formatter;
pub mod notifier;
pub mod payload;
pub mod status;
pub mod webhook;

pub use context::PipelineContext;
pub use error::NotifyError;
pub use formatter::{msg, sanitize_rich_text, EventLinks};
pub use notifier::{NotificationRequest, Notifier};
pub use payload::{CardBuilder, CardMessage, Thread};
pub use status::Status;
pub use webhook::{extract_spaces_key, WebhookClient, WebhookConfig, DEFAULT_TIMEOUT_SECS};
