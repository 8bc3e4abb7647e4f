//! Payload 构建模块 - Google Chat cardsV2 消息
//!
//! Payload 格式：
//! ```json
//! {
//!   "cardsV2": [{
//!     "cardId": "google-chat-notifications",
//!     "card": {
//!       "header": { "title": "...", "subtitle": "...", "imageUrl": "...", "imageType": "CIRCLE" },
//!       "sections": [ { "widgets": [ ... ] }, ... ]
//!     }
//!   }],
//!   "thread": { "name": "spaces/AAAA/threads/key" }
//! }
//! ```

use serde::Serialize;

use super::context::PipelineContext;
use super::formatter::{msg, sanitize_rich_text, status_label, EventLinks};
use super::status::Status;

/// 固定的 card ID
pub const CARD_ID: &str = "google-chat-notifications";

/// 头部图标裁剪方式
pub const IMAGE_TYPE_CIRCLE: &str = "CIRCLE";

/// 发送到 webhook 的完整消息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardMessage {
    #[serde(rename = "cardsV2")]
    pub cards_v2: Vec<CardWithId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread: Option<Thread>,
}

impl CardMessage {
    /// 挂到已有 thread 下
    pub fn with_thread(mut self, thread: Thread) -> Self {
        self.thread = Some(thread);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardWithId {
    pub card_id: String,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub header: CardHeader,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardHeader {
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub image_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub widgets: Vec<Widget>,
}

/// Card widget（按 Google Chat schema 以字段名区分类型）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Widget {
    TextParagraph(TextParagraph),
    DecoratedText(DecoratedText),
    ButtonList(ButtonList),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextParagraph {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecoratedText {
    pub top_label: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<Button>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonList {
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    pub text: String,
    pub on_click: OnClick,
}

impl Button {
    /// 点击后打开链接的文字按钮
    pub fn open_link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            on_click: OnClick {
                open_link: OpenLink { url: url.into() },
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnClick {
    pub open_link: OpenLink,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenLink {
    pub url: String,
}

/// Thread 引用：`spaces/{spacesKey}/threads/{threadKey}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thread {
    pub name: String,
}

impl Thread {
    pub fn new(spaces_key: &str, thread_key: &str) -> Self {
        Self {
            name: format!("spaces/{}/threads/{}", spaces_key, thread_key),
        }
    }
}

/// Card 构建器
pub struct CardBuilder<'a> {
    title: String,
    subtitle: Option<String>,
    status: Status,
    context: &'a PipelineContext,
}

impl<'a> CardBuilder<'a> {
    pub fn new(title: impl Into<String>, status: Status, context: &'a PipelineContext) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            status,
            context,
        }
    }

    /// 设置 subtitle（原文，构建时清洗）
    pub fn subtitle(mut self, subtitle: Option<impl Into<String>>) -> Self {
        self.subtitle = subtitle.map(Into::into);
        self
    }

    /// 构建不带 thread 的消息
    pub fn build(self) -> CardMessage {
        let subtitle = sanitize_rich_text(self.subtitle.as_deref());
        let links = EventLinks::from_context(self.context);

        let header = CardHeader {
            title: self.title,
            subtitle: subtitle.clone(),
            image_url: self.status.icon_url(),
            image_type: IMAGE_TYPE_CIRCLE.to_string(),
        };

        let status_section = Section {
            widgets: vec![
                Widget::TextParagraph(TextParagraph {
                    text: status_label(self.status),
                }),
                Widget::TextParagraph(TextParagraph { text: subtitle }),
            ],
        };

        let details_section = Section {
            widgets: vec![
                Widget::DecoratedText(DecoratedText {
                    top_label: msg::LABEL_REPOSITORY.to_string(),
                    text: self.context.full_name(),
                    button: Some(Button::open_link(msg::OPEN_REPOSITORY, &links.repo_url)),
                }),
                Widget::DecoratedText(DecoratedText {
                    top_label: msg::LABEL_EVENT_NAME.to_string(),
                    text: self.context.event_name.clone(),
                    button: Some(Button::open_link(msg::OPEN_EVENT, &links.event_url)),
                }),
                Widget::DecoratedText(DecoratedText {
                    top_label: msg::LABEL_REF.to_string(),
                    text: self.context.git_ref.clone(),
                    button: None,
                }),
            ],
        };

        let actions_section = Section {
            widgets: vec![Widget::ButtonList(ButtonList {
                buttons: vec![Button::open_link(msg::OPEN_CHECKS, &links.checks_url)],
            })],
        };

        CardMessage {
            cards_v2: vec![CardWithId {
                card_id: CARD_ID.to_string(),
                card: Card {
                    header,
                    sections: vec![status_section, details_section, actions_section],
                },
            }],
            thread: None,
        }
    }
}
