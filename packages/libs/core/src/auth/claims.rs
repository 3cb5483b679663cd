//! 토큰 Claims
//!
//! Access Token과 Refresh Token의 페이로드 구조입니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{UserId, UserProfile};

/// 토큰 용도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// API 호출용 단기 토큰
    Access,

    /// Access Token 재발급용 장기 토큰
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

/// 토큰 Claims (PASETO v4.local 페이로드)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (사용자 ID)
    pub sub: String,

    /// 발급 시점의 사용자 종류
    pub profile: UserProfile,

    /// 토큰 용도
    pub token_type: TokenType,

    /// 토큰 ID
    pub jti: String,

    /// 발급 시각
    pub iat: DateTime<Utc>,

    /// 만료 시각
    pub exp: DateTime<Utc>,
}

impl TokenClaims {
    /// 새 claims 생성
    pub fn new(user_id: &UserId, profile: UserProfile, token_type: TokenType, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.as_str().to_string(),
            profile,
            token_type,
            jti: ulid::Ulid::new().to_string(),
            iat: now,
            exp: now + chrono::Duration::seconds(ttl_seconds),
        }
    }

    /// 사용자 ID
    pub fn user_id(&self) -> UserId {
        UserId::new(self.sub.clone())
    }
}
