//! 인증된 주체
//!
//! 토큰 검증과 사용자 조회를 거쳐 확정된 호출자 정보입니다.
//! 정책은 이 값만 보고 결정을 내립니다.

use std::collections::BTreeSet;

use super::article::ColumnTag;
use super::user::UserId;

/// 인증된 주체
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// 직원 (기사 작성 가능)
    Employee { id: UserId, is_admin: bool },

    /// 클라이언트 (읽기 전용, 칼럼 허용 목록으로 제한)
    Client {
        id: UserId,
        accessible_columns: BTreeSet<ColumnTag>,
    },
}

impl Principal {
    /// 일반 직원
    pub fn employee(id: impl Into<String>) -> Self {
        Principal::Employee {
            id: UserId::new(id),
            is_admin: false,
        }
    }

    /// 관리자 직원
    pub fn admin(id: impl Into<String>) -> Self {
        Principal::Employee {
            id: UserId::new(id),
            is_admin: true,
        }
    }

    /// 클라이언트
    pub fn client(id: impl Into<String>, columns: impl IntoIterator<Item = ColumnTag>) -> Self {
        Principal::Client {
            id: UserId::new(id),
            accessible_columns: columns.into_iter().collect(),
        }
    }

    /// 주체 ID
    pub fn id(&self) -> &UserId {
        match self {
            Principal::Employee { id, .. } => id,
            Principal::Client { id, .. } => id,
        }
    }

    /// 관리자 직원인지 확인
    pub fn is_admin(&self) -> bool {
        matches!(self, Principal::Employee { is_admin: true, .. })
    }

    /// 직원인지 확인
    pub fn is_employee(&self) -> bool {
        matches!(self, Principal::Employee { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_accessors() {
        let admin = Principal::admin("carol");
        assert_eq!(admin.id().as_str(), "carol");
        assert!(admin.is_admin());
        assert!(admin.is_employee());

        let employee = Principal::employee("alice");
        assert!(!employee.is_admin());

        let client = Principal::client("dana", [ColumnTag::Power]);
        assert!(!client.is_employee());
        assert!(!client.is_admin());
    }
}
