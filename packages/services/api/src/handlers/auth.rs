//! 인증 핸들러
//!
//! - `POST /users/token`: 이메일/비밀번호로 토큰 쌍 발급
//! - `POST /users/token/refresh`: Refresh Token으로 Access Token 재발급
//!
//! 다른 핸들러는 [`authenticate`]로 요청 주체를 얻습니다.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use serde::{Deserialize, Serialize};

use nd_core::auth::{bearer_token, verify_password, TokenPair, TokenType};
use nd_core::model::{normalize_email, Principal};

use crate::error::{ApiError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Serialize)]
pub struct AccessResponse {
    pub access: String,
}

/// 토큰 쌍 발급
pub async fn obtain_token(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<TokenPair>> {
    let Json(req) = payload?;

    let user = state
        .db
        .get_user_by_email(&normalize_email(&req.email))
        .await?
        .filter(|user| verify_password(&req.password, &user.password_hash))
        .ok_or(nd_core::Error::InvalidCredentials)?;

    let pair = state.tokens.issue_pair(&user)?;
    tracing::info!("Issued tokens for user {}", user.id);
    Ok(Json(pair))
}

/// Access Token 재발급
///
/// 사용자가 삭제되었으면 거부합니다.
pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<AccessResponse>> {
    let Json(req) = payload?;

    let claims = state.tokens.validate(&req.refresh, TokenType::Refresh)?;
    let user = state
        .db
        .get_user(&claims.user_id())
        .await?
        .ok_or_else(|| ApiError::Unauthorized {
            message: "user no longer exists".to_string(),
        })?;

    let access = state.tokens.issue(&user, TokenType::Access)?;
    Ok(Json(AccessResponse { access }))
}

/// 요청 주체 확인
///
/// `Authorization` 헤더가 없으면 `None`(미인증)입니다.
/// 헤더가 있는데 토큰이 잘못되었거나 만료되었으면 401입니다.
/// 권한은 토큰이 아니라 현재 사용자 레코드에서 가져옵니다.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Option<Principal>> {
    let Some(raw) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let token = raw
        .to_str()
        .ok()
        .and_then(|value| bearer_token(Some(value)))
        .ok_or_else(|| ApiError::Unauthorized {
            message: "expected a Bearer token".to_string(),
        })?;

    let claims = state.tokens.validate(token, TokenType::Access)?;
    let user = state
        .db
        .get_user(&claims.user_id())
        .await?
        .ok_or_else(|| ApiError::Unauthorized {
            message: "user no longer exists".to_string(),
        })?;

    Ok(Some(user.principal()))
}
