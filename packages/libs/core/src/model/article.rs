//! 뉴스 기사 모델
//!
//! 기사 레코드와 생성/수정 페이로드를 정의합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::user::UserId;
use crate::error::{Error, Result};

/// 제목 최대 길이 (문자 수)
pub const TITLE_MAX_LEN: usize = 200;

/// 부제목 최대 길이 (문자 수)
pub const SUBTITLE_MAX_LEN: usize = 500;

/// 기사 ID
///
/// ULID 문자열입니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub String);

impl ArticleId {
    /// 기존 ID 래핑
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// 새 ID 생성
    pub fn generate() -> Self {
        Self(ulid::Ulid::new().to_string())
    }

    /// 내부 값 참조
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArticleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 기사 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArticleStatus {
    /// 초안 (작성자/관리자만 볼 수 있음)
    #[serde(rename = "DRAF")]
    Draft,

    /// 발행됨
    #[serde(rename = "PUBD")]
    Published,
}

impl ArticleStatus {
    /// 저장/전송용 코드
    pub fn as_code(&self) -> &'static str {
        match self {
            ArticleStatus::Draft => "DRAF",
            ArticleStatus::Published => "PUBD",
        }
    }

    /// 코드에서 파싱
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "DRAF" => Ok(ArticleStatus::Draft),
            "PUBD" => Ok(ArticleStatus::Published),
            other => Err(Error::UnknownCode {
                kind: "article status",
                code: other.to_string(),
            }),
        }
    }
}

/// 기사 칼럼 태그
///
/// 클라이언트 열람 범위를 제한하는 주제 분류입니다.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ColumnTag {
    #[serde(rename = "POW")]
    Power,
    #[serde(rename = "TAX")]
    Taxes,
    #[serde(rename = "HLTH")]
    Health,
    #[serde(rename = "EN")]
    Energy,
    #[serde(rename = "LAB")]
    Labor,
}

impl ColumnTag {
    /// 전체 태그 목록
    pub const ALL: [ColumnTag; 5] = [
        ColumnTag::Power,
        ColumnTag::Taxes,
        ColumnTag::Health,
        ColumnTag::Energy,
        ColumnTag::Labor,
    ];

    /// 저장/전송용 코드
    pub fn as_code(&self) -> &'static str {
        match self {
            ColumnTag::Power => "POW",
            ColumnTag::Taxes => "TAX",
            ColumnTag::Health => "HLTH",
            ColumnTag::Energy => "EN",
            ColumnTag::Labor => "LAB",
        }
    }

    /// 코드에서 파싱
    pub fn from_code(code: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_code() == code)
            .ok_or_else(|| Error::UnknownCode {
                kind: "article column",
                code: code.to_string(),
            })
    }

    /// 선택적 코드 파싱 (빈 문자열 = 미지정)
    pub fn from_optional_code(code: Option<&str>) -> Result<Option<Self>> {
        match code {
            None | Some("") => Ok(None),
            Some(code) => Self::from_code(code).map(Some),
        }
    }
}

/// 뉴스 기사
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub subtitle: String,

    /// 초안 본문 (공개되지 않음)
    pub draft_content: String,

    /// 발행 본문
    pub published_content: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// 최초 발행 시각
    pub original_publication_at: DateTime<Utc>,

    /// 마지막 발행 갱신 시각
    pub last_publication_update_at: DateTime<Utc>,

    /// 작성자 (서버가 설정, 사용자 삭제 시 None)
    pub author: Option<UserId>,

    pub status: ArticleStatus,

    /// 칼럼 (None = 미지정, 모든 클라이언트에게 노출)
    #[serde(default, deserialize_with = "deserialize_blank_column")]
    pub column: Option<ColumnTag>,
}

impl Article {
    /// 발행 여부
    pub fn is_published(&self) -> bool {
        self.status == ArticleStatus::Published
    }

    /// 특정 사용자가 작성했는지 확인
    pub fn is_authored_by(&self, user: &UserId) -> bool {
        self.author.as_ref() == Some(user)
    }
}

/// 기사 생성/전체 수정 페이로드
///
/// `author`, `created_at`, `updated_at`은 읽기 전용이라 받지 않습니다.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleInput {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub draft_content: String,
    #[serde(default)]
    pub published_content: String,
    #[serde(default)]
    pub original_publication_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_publication_update_at: Option<DateTime<Utc>>,
    pub status: ArticleStatus,
    #[serde(default, deserialize_with = "deserialize_blank_column")]
    pub column: Option<ColumnTag>,
}

impl ArticleInput {
    /// 필드 검증
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        validate_subtitle(&self.subtitle)
    }

    /// 새 기사 생성
    ///
    /// 작성자는 항상 호출자 ID로 지정됩니다.
    pub fn into_article(self, author: UserId, now: DateTime<Utc>) -> Article {
        Article {
            id: ArticleId::generate(),
            title: self.title,
            subtitle: self.subtitle,
            draft_content: self.draft_content,
            published_content: self.published_content,
            created_at: now,
            updated_at: now,
            original_publication_at: self.original_publication_at.unwrap_or(now),
            last_publication_update_at: self.last_publication_update_at.unwrap_or(now),
            author: Some(author),
            status: self.status,
            column: self.column,
        }
    }

    /// 기존 기사의 쓰기 가능한 필드를 전부 교체
    pub fn replace(self, article: &mut Article, now: DateTime<Utc>) {
        article.title = self.title;
        article.subtitle = self.subtitle;
        article.draft_content = self.draft_content;
        article.published_content = self.published_content;
        if let Some(at) = self.original_publication_at {
            article.original_publication_at = at;
        }
        if let Some(at) = self.last_publication_update_at {
            article.last_publication_update_at = at;
        }
        article.status = self.status;
        article.column = self.column;
        article.updated_at = now;
    }
}

/// 기사 부분 수정 페이로드
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticlePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub draft_content: Option<String>,
    #[serde(default)]
    pub published_content: Option<String>,
    #[serde(default)]
    pub original_publication_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_publication_update_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<ArticleStatus>,

    /// None = 변경 없음, Some(None) = 칼럼 해제
    #[serde(default, deserialize_with = "deserialize_column_patch")]
    pub column: Option<Option<ColumnTag>>,
}

impl ArticlePatch {
    /// 필드 검증
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(subtitle) = &self.subtitle {
            validate_subtitle(subtitle)?;
        }
        Ok(())
    }

    /// 기사에 적용
    pub fn apply(self, article: &mut Article, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            article.title = title;
        }
        if let Some(subtitle) = self.subtitle {
            article.subtitle = subtitle;
        }
        if let Some(content) = self.draft_content {
            article.draft_content = content;
        }
        if let Some(content) = self.published_content {
            article.published_content = content;
        }
        if let Some(at) = self.original_publication_at {
            article.original_publication_at = at;
        }
        if let Some(at) = self.last_publication_update_at {
            article.last_publication_update_at = at;
        }
        if let Some(status) = self.status {
            article.status = status;
        }
        if let Some(column) = self.column {
            article.column = column;
        }
        article.updated_at = now;
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::validation("title", "must not be empty"));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(Error::validation(
            "title",
            format!("must be at most {} characters", TITLE_MAX_LEN),
        ));
    }
    Ok(())
}

fn validate_subtitle(subtitle: &str) -> Result<()> {
    if subtitle.chars().count() > SUBTITLE_MAX_LEN {
        return Err(Error::validation(
            "subtitle",
            format!("must be at most {} characters", SUBTITLE_MAX_LEN),
        ));
    }
    Ok(())
}

/// `null`, `""`, 코드 문자열을 모두 받는 칼럼 역직렬화
pub fn deserialize_blank_column<'de, D>(deserializer: D) -> std::result::Result<Option<ColumnTag>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    ColumnTag::from_optional_code(raw.as_deref()).map_err(serde::de::Error::custom)
}

fn deserialize_column_patch<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Option<ColumnTag>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_blank_column(deserializer).map(Some)
}
