//! 공통 에러 타입
//!
//! Newsdesk 전체에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Newsdesk 공통 에러
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────────
    // Validation Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("invalid field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("unknown code '{code}' for {kind}")]
    UnknownCode { kind: &'static str, code: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Auth Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token expired")]
    TokenExpired,

    #[error("invalid token: {reason}")]
    InvalidToken { reason: String },

    #[error("token issue failed: {message}")]
    TokenIssue { message: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Serialization Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// 필드 검증 에러 생성
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// HTTP 상태 코드로 변환
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Error::Validation { .. } | Error::UnknownCode { .. } | Error::Json(_) => 400,

            // 401 Unauthorized
            Error::InvalidCredentials | Error::TokenExpired | Error::InvalidToken { .. } => 401,

            // 500 Internal Server Error
            Error::TokenIssue { .. } => 500,
        }
    }

    /// 에러 코드 (클라이언트용)
    pub fn code(&self) -> &'static str {
        match self {
            Error::Validation { .. } => "VALIDATION_ERROR",
            Error::UnknownCode { .. } => "UNKNOWN_CODE",
            Error::InvalidCredentials => "INVALID_CREDENTIALS",
            Error::TokenExpired => "TOKEN_EXPIRED",
            Error::InvalidToken { .. } => "INVALID_TOKEN",
            Error::TokenIssue { .. } => "TOKEN_ISSUE_FAILED",
            Error::Json(_) => "JSON_ERROR",
        }
    }
}
