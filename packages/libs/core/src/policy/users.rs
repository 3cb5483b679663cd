//! 사용자 관리 접근 결정
//!
//! 자가 가입을 제외한 사용자 관리는 관리자 직원만 할 수 있습니다.
//! 본인 레코드 조회는 예외로 허용합니다.

use super::articles::{Decision, DenyReason};
use crate::model::{Principal, UserId};

/// 사용자 관리 작업 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserOperation {
    /// 클라이언트 자가 가입 (공개)
    Register,
    List,
    Create,
    Read,
    Update,
    Delete,
}

/// 사용자 관리 접근 결정
pub fn decide_user(
    principal: Option<&Principal>,
    op: UserOperation,
    target: Option<&UserId>,
) -> Decision {
    if op == UserOperation::Register {
        return Decision::Allow;
    }

    let Some(principal) = principal else {
        return Decision::Deny(DenyReason::Unauthenticated);
    };

    if principal.is_admin() {
        return Decision::Allow;
    }

    match (op, target) {
        (UserOperation::Read, Some(target)) if target == principal.id() => Decision::Allow,
        _ => Decision::Deny(DenyReason::Forbidden),
    }
}
