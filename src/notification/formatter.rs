//! 消息格式化模块 - 卡片中的文本与链接
//!
//! 主要功能：
//! - 富文本转义：subtitle 会被渲染为 Google Chat 的 HTML 子集
//! - 状态标签：加粗 + 着色的状态文字
//! - 链接推导：仓库、事件（commit / PR）、checks 页面

use super::context::PipelineContext;
use super::status::Status;

/// Card text constants
pub mod msg {
    // Button labels
    pub const OPEN_REPOSITORY: &str = "OPEN REPOSITORY";
    pub const OPEN_EVENT: &str = "OPEN EVENT";
    pub const OPEN_CHECKS: &str = "OPEN CHECKS";

    // Field labels
    pub const LABEL_REPOSITORY: &str = "repository";
    pub const LABEL_EVENT_NAME: &str = "event name";
    pub const LABEL_REF: &str = "ref";
}

/// 将换行（`\r\n` / `\n` / `\r`）折叠为单个空格
pub fn collapse_line_breaks(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// 转义 `&`、`<`、`>`、`"`
///
/// `&` 必须最先替换，否则会二次转义其他实体
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// 渲染为富文本前的完整清洗；`None` 渲染为空串
pub fn sanitize_rich_text(text: Option<&str>) -> String {
    text.map(|t| escape_html(&collapse_line_breaks(t)))
        .unwrap_or_default()
}

/// `<b><font color="#2cbe4e">SUCCEEDED</font></b>`
pub fn status_label(status: Status) -> String {
    format!(
        "<b><font color=\"{}\">{}</font></b>",
        status.color(),
        status.text()
    )
}

/// 卡片按钮使用的链接
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLinks {
    pub repo_url: String,
    pub event_url: String,
    pub checks_url: String,
}

impl EventLinks {
    /// PR 事件指向 `/pull/{number}`，其他事件指向 `/commit/{sha}`；
    /// checks 链接复用同一路径
    pub fn from_context(context: &PipelineContext) -> Self {
        let repo_url = format!(
            "{}/{}/{}",
            context.server_url, context.owner, context.repo
        );
        let event_path = event_path(context);
        let event_url = format!("{}{}", repo_url, event_path);
        let checks_url = format!("{}/checks", event_url);

        Self {
            repo_url,
            event_url,
            checks_url,
        }
    }
}

fn event_path(context: &PipelineContext) -> String {
    if context.is_pull_request() {
        // 没有编号时保留 `/pull/`，不视为错误
        let number = context
            .issue_number
            .map(|n| n.to_string())
            .unwrap_or_default();
        format!("/pull/{}", number)
    } else {
        format!("/commit/{}", context.sha)
    }
}
