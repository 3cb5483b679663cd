//! 기사 접근 결정
//!
//! 주체, 작업, 대상 기사를 받아 허용/거부/가시성 필터 중 하나를 돌려줍니다.
//! 입력만 보고 결정하는 순수 함수이므로 동시에 자유롭게 호출할 수 있습니다.

use super::filter::{FilterExpr, VisibilityFilter};
use crate::model::{Article, Principal};

/// 기사 작업 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Read,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// 문자열로 변환
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Read => "read",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// 데이터를 변경하는 작업인지
    pub fn is_mutation(&self) -> bool {
        matches!(self, Operation::Create | Operation::Update | Operation::Delete)
    }
}

/// 거부 사유
///
/// 호출자에게 어떻게 보일지를 결정합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// 존재하지 않는 것처럼 응답 (404)
    NotFound,

    /// 명시적 금지 (403)
    Forbidden,

    /// 인증 필요 (401)
    Unauthenticated,
}

/// 정책 결정
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),

    /// 목록 조회 전용
    Filter(VisibilityFilter),
}

impl Decision {
    /// 허용 여부
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// 단건 결정을 `Result`로 변환
    ///
    /// 필터 결정은 허용으로 취급합니다.
    pub fn into_result(self) -> Result<(), DenyReason> {
        match self {
            Decision::Deny(reason) => Err(reason),
            Decision::Allow | Decision::Filter(_) => Ok(()),
        }
    }
}

/// 기사 접근 결정
///
/// # Arguments
/// * `principal` - 인증된 주체 (None = 미인증)
/// * `op` - 작업 타입
/// * `article` - 대상 기사 (Read/Update/Delete 필수, List/Create는 None)
pub fn decide(principal: Option<&Principal>, op: Operation, article: Option<&Article>) -> Decision {
    let Some(principal) = principal else {
        return match op {
            Operation::List => Decision::Filter(VisibilityFilter::Nothing),
            _ => Decision::Deny(DenyReason::Unauthenticated),
        };
    };

    match op {
        Operation::List => Decision::Filter(list_filter(principal)),
        Operation::Create => {
            if principal.is_employee() {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::Forbidden)
            }
        }
        Operation::Read | Operation::Update | Operation::Delete => {
            // 대상 기사는 호출 전에 조회되어 있어야 함
            debug_assert!(article.is_some(), "object-level check without an article");
            match article {
                Some(article) => decide_object(principal, op, article),
                None => Decision::Deny(DenyReason::NotFound),
            }
        }
    }
}

/// 목록 조회용 가시성 필터
pub fn list_filter(principal: &Principal) -> VisibilityFilter {
    match principal {
        Principal::Employee { is_admin: true, .. } => VisibilityFilter::All,
        Principal::Employee { id, .. } => VisibilityFilter::Where(FilterExpr::employee_visibility(id)),
        Principal::Client {
            accessible_columns, ..
        } => VisibilityFilter::Where(FilterExpr::client_visibility(accessible_columns)),
    }
}

/// 개별 기사 단위 결정
fn decide_object(principal: &Principal, op: Operation, article: &Article) -> Decision {
    match principal {
        Principal::Employee { is_admin: true, .. } => Decision::Allow,
        Principal::Employee { id, .. } => {
            if article.is_authored_by(id) {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::NotFound)
            }
        }
        Principal::Client {
            accessible_columns, ..
        } => {
            let visible = FilterExpr::client_visibility(accessible_columns).matches(article);
            match (visible, op.is_mutation()) {
                (false, _) => Decision::Deny(DenyReason::NotFound),
                (true, true) => Decision::Deny(DenyReason::Forbidden),
                (true, false) => Decision::Allow,
            }
        }
    }
}
