//! 사용자 관리 핸들러
//!
//! 자가 가입(`/users/self_register`)을 제외하면 관리자 전용입니다.
//! 본인 레코드 조회만 예외입니다.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;

use nd_core::auth::hash_password;
use nd_core::model::{normalize_email, NewUser, Principal, User, UserId, UserPatch};
use nd_core::policy::{decide_user, UserOperation};

use crate::error::{ApiError, Result};
use crate::handlers::auth::authenticate;
use crate::state::AppState;

const RESOURCE: &str = "user";

/// `POST /users/self_register`
///
/// 항상 클라이언트로 가입되며 열람 칼럼은 비어 있습니다.
pub async fn self_register(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<User>)> {
    check(None, UserOperation::Register, None)?;

    let Json(payload) = payload?;
    let payload = payload.into_self_registration()?;
    let user = create(&state, payload).await?;

    tracing::info!("Client {} self-registered", user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users/users`
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<User>>> {
    let principal = authenticate(&state, &headers).await?;
    check(principal.as_ref(), UserOperation::List, None)?;

    Ok(Json(state.db.list_users().await?))
}

/// `POST /users/users`
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: std::result::Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<User>)> {
    let principal = authenticate(&state, &headers).await?;
    check(principal.as_ref(), UserOperation::Create, None)?;

    let Json(payload) = payload?;
    let user = create(&state, payload).await?;

    tracing::info!(
        "User {} ({}) created by {:?}",
        user.id,
        user.profile.as_code(),
        principal.as_ref().map(|p| p.id().as_str())
    );
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users/users/:id`
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<User>> {
    let id = UserId::new(id);
    let principal = authenticate(&state, &headers).await?;
    check(principal.as_ref(), UserOperation::Read, Some(&id))?;

    Ok(Json(find(&state, &id).await?))
}

/// `PUT /users/users/:id`
///
/// 보낸 필드만 바꿉니다. 사용자 종류는 바꿀 수 없습니다.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UserPatch>, JsonRejection>,
) -> Result<Json<User>> {
    let id = UserId::new(id);
    let principal = authenticate(&state, &headers).await?;
    check(principal.as_ref(), UserOperation::Update, Some(&id))?;

    let mut user = find(&state, &id).await?;

    let Json(patch) = payload?;
    patch.validate_for(&user)?;

    if let Some(email) = &patch.email {
        let email = normalize_email(email);
        if email != user.email {
            ensure_email_free(&state, &email).await?;
        }
    }

    let password_hash = patch.password.as_deref().map(hash_password);
    patch.apply(&mut user, password_hash, Utc::now());
    state.db.update_user(&user).await?;

    tracing::info!("User {} updated", user.id);
    Ok(Json(user))
}

/// `DELETE /users/users/:id`
///
/// 작성한 기사는 작성자 없이 남습니다.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = UserId::new(id);
    let principal = authenticate(&state, &headers).await?;
    check(principal.as_ref(), UserOperation::Delete, Some(&id))?;

    let user = find(&state, &id).await?;
    state.db.delete_user(&user.id).await?;

    tracing::info!("User {} deleted", user.id);
    Ok(StatusCode::NO_CONTENT)
}

async fn create(state: &AppState, payload: NewUser) -> Result<User> {
    payload.validate()?;
    ensure_email_free(state, &normalize_email(&payload.email)).await?;

    let password_hash = hash_password(&payload.password);
    let user = payload.into_user(password_hash, Utc::now());
    state.db.insert_user(&user).await?;
    Ok(user)
}

async fn find(state: &AppState, id: &UserId) -> Result<User> {
    state
        .db
        .get_user(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("{} not found", RESOURCE),
        })
}

async fn ensure_email_free(state: &AppState, email: &str) -> Result<()> {
    if state.db.get_user_by_email(email).await?.is_some() {
        return Err(ApiError::Conflict {
            message: format!("user with email '{}' already exists", email),
        });
    }
    Ok(())
}

fn check(principal: Option<&Principal>, op: UserOperation, target: Option<&UserId>) -> Result<()> {
    decide_user(principal, op, target).into_result().map_err(|reason| {
        tracing::debug!(
            "Denied {:?} on user {:?} for {:?}: {:?}",
            op,
            target.map(UserId::as_str),
            principal.map(|p| p.id().as_str()),
            reason
        );
        ApiError::denied(reason, RESOURCE)
    })
}
