//! 기사 핸들러
//!
//! 모든 접근 판단은 `nd_core::policy::decide`에 맡깁니다.
//! 단건 작업은 기사를 먼저 읽은 뒤 결정하며, 보이지 않는 기사는 404로 숨깁니다.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use nd_core::model::{Article, ArticleId, ArticleInput, ArticlePatch, Principal};
use nd_core::policy::{
    decide, project, ArticleView, Decision, DenyReason, Operation, VisibilityFilter,
};
use nd_sql::ListParams;

use crate::error::{ApiError, Result};
use crate::handlers::auth::authenticate;
use crate::state::AppState;

const RESOURCE: &str = "article";

/// 목록 응답
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub data: Vec<ArticleView>,
    pub meta: ListMeta,
}

#[derive(Debug, Serialize)]
pub struct ListMeta {
    /// 필터를 통과한 전체 개수 (페이지 크기 아님)
    pub count: i64,
}

/// `GET /news`
pub async fn list_news(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ListResponse>> {
    let principal = authenticate(&state, &headers).await?;
    let Query(params) = params?;
    let query = params.resolve(state.config.default_page_size, state.config.max_page_size)?;

    let filter = match decide(principal.as_ref(), Operation::List, None) {
        Decision::Filter(filter) => filter,
        Decision::Deny(reason) => return Err(ApiError::denied(reason, RESOURCE)),
        Decision::Allow => VisibilityFilter::All,
    };

    // 미인증 호출자는 빈 목록
    let principal = match principal {
        Some(principal) if !filter.is_nothing() => principal,
        _ => {
            return Ok(Json(ListResponse {
                data: Vec::new(),
                meta: ListMeta { count: 0 },
            }))
        }
    };

    let (articles, count) = state.db.list_articles(&filter, &query).await?;
    let data = articles
        .into_iter()
        .map(|article| project(&principal, article))
        .collect();

    Ok(Json(ListResponse {
        data,
        meta: ListMeta { count },
    }))
}

/// `POST /news`
///
/// 작성자는 항상 요청 주체입니다.
pub async fn create_news(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: std::result::Result<Json<ArticleInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ArticleView>)> {
    let principal = require_principal(&state, &headers, Operation::Create).await?;
    check(Some(&principal), Operation::Create, None)?;

    let Json(input) = payload?;
    input.validate()?;

    let article = input.into_article(principal.id().clone(), Utc::now());
    state.db.insert_article(&article).await?;
    tracing::info!("Article {} created by {}", article.id, principal.id());

    Ok((StatusCode::CREATED, Json(project(&principal, article))))
}

/// `GET /news/:id`
pub async fn get_news(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ArticleView>> {
    let (principal, article) = load_for(&state, &headers, Operation::Read, &ArticleId::new(id)).await?;
    Ok(Json(project(&principal, article)))
}

/// `PUT /news/:id`
pub async fn replace_news(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ArticleInput>, JsonRejection>,
) -> Result<Json<ArticleView>> {
    let (principal, mut article) =
        load_for(&state, &headers, Operation::Update, &ArticleId::new(id)).await?;

    let Json(input) = payload?;
    input.validate()?;
    input.replace(&mut article, Utc::now());

    state.db.update_article(&article).await?;
    tracing::info!("Article {} replaced by {}", article.id, principal.id());
    Ok(Json(project(&principal, article)))
}

/// `PATCH /news/:id`
pub async fn patch_news(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ArticlePatch>, JsonRejection>,
) -> Result<Json<ArticleView>> {
    let (principal, mut article) =
        load_for(&state, &headers, Operation::Update, &ArticleId::new(id)).await?;

    let Json(patch) = payload?;
    patch.validate()?;
    patch.apply(&mut article, Utc::now());

    state.db.update_article(&article).await?;
    tracing::info!("Article {} updated by {}", article.id, principal.id());
    Ok(Json(project(&principal, article)))
}

/// `DELETE /news/:id`
pub async fn delete_news(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let (principal, article) =
        load_for(&state, &headers, Operation::Delete, &ArticleId::new(id)).await?;

    state.db.delete_article(&article.id).await?;
    tracing::info!("Article {} deleted by {}", article.id, principal.id());
    Ok(StatusCode::NO_CONTENT)
}

/// 인증된 주체 요구
///
/// 미인증 호출자는 정책 결정과 같은 401입니다.
async fn require_principal(state: &AppState, headers: &HeaderMap, op: Operation) -> Result<Principal> {
    match authenticate(state, headers).await? {
        Some(principal) => Ok(principal),
        None => {
            check(None, op, None)?;
            Err(ApiError::denied(DenyReason::Unauthenticated, RESOURCE))
        }
    }
}

/// 단건 작업 대상 조회 및 결정
///
/// 미인증이면 기사를 조회하지 않습니다.
async fn load_for(
    state: &AppState,
    headers: &HeaderMap,
    op: Operation,
    id: &ArticleId,
) -> Result<(Principal, Article)> {
    let principal = require_principal(state, headers, op).await?;

    let Some(article) = state.db.get_article(id).await? else {
        tracing::debug!("Article {} not found", id);
        return Err(ApiError::denied(DenyReason::NotFound, RESOURCE));
    };

    check(Some(&principal), op, Some(&article))?;
    Ok((principal, article))
}

fn check(principal: Option<&Principal>, op: Operation, article: Option<&Article>) -> Result<()> {
    decide(principal, op, article).into_result().map_err(|reason| {
        tracing::debug!(
            "Denied {} on {} for {:?}: {:?}",
            op.as_str(),
            article.map(|a| a.id.as_str()).unwrap_or("-"),
            principal.map(|p| p.id().as_str()),
            reason
        );
        ApiError::denied(reason, RESOURCE)
    })
}
