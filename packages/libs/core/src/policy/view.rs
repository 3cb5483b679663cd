//! 응답 투영
//!
//! 초안 본문은 공개 대상이 아니므로 클라이언트 응답에서 제외합니다.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Article, ArticleId, ArticleStatus, ColumnTag, Principal, UserId};

/// 호출자에게 보여줄 기사
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleView {
    pub id: ArticleId,
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft_content: Option<String>,
    pub published_content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub original_publication_at: DateTime<Utc>,
    pub last_publication_update_at: DateTime<Utc>,
    pub author: Option<UserId>,
    pub status: ArticleStatus,
    pub column: Option<ColumnTag>,
}

/// 주체에 맞게 기사 투영
pub fn project(principal: &Principal, article: Article) -> ArticleView {
    let draft_content = match principal {
        Principal::Employee { .. } => Some(article.draft_content),
        Principal::Client { .. } => None,
    };

    ArticleView {
        id: article.id,
        title: article.title,
        subtitle: article.subtitle,
        draft_content,
        published_content: article.published_content,
        created_at: article.created_at,
        updated_at: article.updated_at,
        original_publication_at: article.original_publication_at,
        last_publication_update_at: article.last_publication_update_at,
        author: article.author,
        status: article.status,
        column: article.column,
    }
}
