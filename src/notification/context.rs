//! Pipeline context - 触发通知的 workflow 运行环境快照
//!
//! 从 GitHub Actions 注入的环境变量读取：
//! - `GITHUB_REPOSITORY` → owner / repo
//! - `GITHUB_EVENT_NAME`, `GITHUB_SHA`, `GITHUB_REF`, `GITHUB_SERVER_URL`
//! - `GITHUB_EVENT_PATH` 指向的事件 JSON → issue / PR 编号
//!
//! 所有字段按原样信任，缺失时退化为空字符串或 `None`，不做校验。

use serde::{Deserialize, Serialize};
use std::fs;
use tracing::{debug, warn};

/// 默认 GitHub 地址（GHES 通过 `GITHUB_SERVER_URL` 覆盖）
pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// 触发事件的只读快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineContext {
    pub server_url: String,
    pub owner: String,
    pub repo: String,
    /// 触发事件名称，如 `push`、`pull_request`
    pub event_name: String,
    pub sha: String,
    /// 分支或 tag ref，如 `refs/heads/main`
    pub git_ref: String,
    /// issue 或 PR 编号（仅在事件 payload 中存在时）
    pub issue_number: Option<u64>,
}

impl Default for PipelineContext {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            owner: String::new(),
            repo: String::new(),
            event_name: String::new(),
            sha: String::new(),
            git_ref: String::new(),
            issue_number: None,
        }
    }
}

impl PipelineContext {
    /// 从当前进程环境变量读取
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// 通过 lookup 函数读取变量（测试时可注入，无需修改进程环境）
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let (owner, repo) = lookup("GITHUB_REPOSITORY")
            .map(|r| split_repository(&r))
            .unwrap_or_default();

        let server_url = lookup("GITHUB_SERVER_URL")
            .filter(|u| !u.is_empty())
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let issue_number = lookup("GITHUB_EVENT_PATH")
            .filter(|p| !p.is_empty())
            .and_then(|path| read_issue_number(&path));

        let context = Self {
            server_url,
            owner,
            repo,
            event_name: lookup("GITHUB_EVENT_NAME").unwrap_or_default(),
            sha: lookup("GITHUB_SHA").unwrap_or_default(),
            git_ref: lookup("GITHUB_REF").unwrap_or_default(),
            issue_number,
        };

        debug!(
            repository = %context.full_name(),
            event = %context.event_name,
            git_ref = %context.git_ref,
            issue_number = ?context.issue_number,
            "Loaded pipeline context"
        );

        context
    }

    /// `owner/repo`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    pub fn is_pull_request(&self) -> bool {
        self.event_name == "pull_request"
    }
}

/// 拆分 `owner/repo`，没有 `/` 时整串视为 owner
fn split_repository(repository: &str) -> (String, String) {
    match repository.split_once('/') {
        Some((owner, repo)) => (owner.to_string(), repo.to_string()),
        None => (repository.to_string(), String::new()),
    }
}

/// 从事件 payload 提取编号
///
/// 优先级与 Actions toolkit 的 `context.issue` 一致：
/// `issue.number` → `pull_request.number` → 顶层 `number`
fn read_issue_number(path: &str) -> Option<u64> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %path, error = %e, "Cannot read event payload");
            return None;
        }
    };

    let json: serde_json::Value = match serde_json::from_str(&content) {
        Ok(j) => j,
        Err(e) => {
            warn!(path = %path, error = %e, "Event payload is not valid JSON");
            return None;
        }
    };

    issue_number_from_payload(&json)
}

fn issue_number_from_payload(payload: &serde_json::Value) -> Option<u64> {
    payload
        .get("issue")
        .and_then(|i| i.get("number"))
        .or_else(|| payload.get("pull_request").and_then(|p| p.get("number")))
        .or_else(|| payload.get("number"))
        .and_then(|n| n.as_u64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_from_vars_reads_github_variables() {
        let ctx = PipelineContext::from_vars(lookup_from(&[
            ("GITHUB_REPOSITORY", "octo/hello-world"),
            ("GITHUB_EVENT_NAME", "push"),
            ("GITHUB_SHA", "abc123"),
            ("GITHUB_REF", "refs/heads/main"),
        ]));

        assert_eq!(ctx.owner, "octo");
        assert_eq!(ctx.repo, "hello-world");
        assert_eq!(ctx.event_name, "push");
        assert_eq!(ctx.sha, "abc123");
        assert_eq!(ctx.git_ref, "refs/heads/main");
        assert_eq!(ctx.server_url, DEFAULT_SERVER_URL);
        assert_eq!(ctx.issue_number, None);
        assert_eq!(ctx.full_name(), "octo/hello-world");
    }

    #[test]
    fn test_from_vars_missing_everything_degrades() {
        let ctx = PipelineContext::from_vars(|_| None);
        assert_eq!(ctx, PipelineContext::default());
    }

    #[test]
    fn test_server_url_trailing_slash_trimmed() {
        let ctx = PipelineContext::from_vars(lookup_from(&[(
            "GITHUB_SERVER_URL",
            "https://github.example.com/",
        )]));
        assert_eq!(ctx.server_url, "https://github.example.com");
    }

    #[test]
    fn test_issue_number_from_pull_request_event_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"number": 42, "pull_request": {{"number": 42}}}}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let ctx = PipelineContext::from_vars(lookup_from(&[
            ("GITHUB_EVENT_NAME", "pull_request"),
            ("GITHUB_EVENT_PATH", path.as_str()),
        ]));

        assert!(ctx.is_pull_request());
        assert_eq!(ctx.issue_number, Some(42));
    }

    #[test]
    fn test_unreadable_event_file_yields_none() {
        let ctx = PipelineContext::from_vars(lookup_from(&[(
            "GITHUB_EVENT_PATH",
            "/nonexistent/event.json",
        )]));
        assert_eq!(ctx.issue_number, None);
    }

    #[test]
    fn test_issue_number_priority() {
        let payload = serde_json::json!({
            "number": 3,
            "issue": { "number": 1 },
            "pull_request": { "number": 2 }
        });
        assert_eq!(issue_number_from_payload(&payload), Some(1));

        let payload = serde_json::json!({ "number": 3, "pull_request": { "number": 2 } });
        assert_eq!(issue_number_from_payload(&payload), Some(2));

        let payload = serde_json::json!({ "number": 3 });
        assert_eq!(issue_number_from_payload(&payload), Some(3));

        let payload = serde_json::json!({ "ref": "refs/heads/main" });
        assert_eq!(issue_number_from_payload(&payload), None);
    }

    #[test]
    fn test_split_repository_without_slash() {
        assert_eq!(
            split_repository("lonely"),
            ("lonely".to_string(), String::new())
        );
    }
}
