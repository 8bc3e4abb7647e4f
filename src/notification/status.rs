//! Pipeline status for Google Chat notifications
//!
//! 每个状态对应三组固定展示值：
//! - color: 状态标签的字体颜色
//! - text: 大写的状态文字
//! - icon: 卡片头部的圆形图标

use std::str::FromStr;

use super::error::NotifyError;

/// 图标仓库地址
const ICON_BASE_URL: &str =
    "https://raw.githubusercontent.com/nakamuraos/google-chat-notifications/master/icons";

/// Pipeline result
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Cancelled,
    Failure,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = NotifyError;

    /// `job.status` 传入小写，手写的 workflow 里也可能出现 `Success`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "success" => Ok(Status::Success),
            "cancelled" => Ok(Status::Cancelled),
            "failure" => Ok(Status::Failure),
            _ => Err(NotifyError::InvalidStatus(s.to_string())),
        }
    }
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Cancelled => "cancelled",
            Status::Failure => "failure",
        }
    }

    /// 状态标签颜色（hex）
    pub fn color(&self) -> &'static str {
        match self {
            Status::Success => "#2cbe4e",
            Status::Cancelled => "#ffc107",
            Status::Failure => "#ff0000",
        }
    }

    /// 状态标签文字
    pub fn text(&self) -> &'static str {
        match self {
            Status::Success => "SUCCEEDED",
            Status::Cancelled => "CANCELLED",
            Status::Failure => "FAILED",
        }
    }

    /// 卡片头部图标 URL
    pub fn icon_url(&self) -> String {
        format!("{}/{}.png", ICON_BASE_URL, self.as_str())
    }
}
