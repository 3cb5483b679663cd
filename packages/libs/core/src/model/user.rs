//! 사용자 모델
//!
//! 직원(Employee)과 클라이언트(Client) 두 종류의 사용자를 하나의 레코드로 다룹니다.
//! 정책 평가에는 [`User::principal`]로 변환한 태그드 값을 사용합니다.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::article::ColumnTag;
use super::principal::Principal;
use crate::error::{Error, Result};

/// 이름 최대 길이 (문자 수)
pub const NAME_MAX_LEN: usize = 200;

/// 사용자 ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// 기존 ID 래핑
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// 새 ID 생성 (ULID)
    pub fn generate() -> Self {
        Self(ulid::Ulid::new().to_string())
    }

    /// 내부 값 참조
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 사용자 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserProfile {
    #[serde(rename = "EMP")]
    Employee,
    #[serde(rename = "CLI")]
    Client,
}

impl UserProfile {
    pub fn as_code(&self) -> &'static str {
        match self {
            UserProfile::Employee => "EMP",
            UserProfile::Client => "CLI",
        }
    }

    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "EMP" => Ok(UserProfile::Employee),
            "CLI" => Ok(UserProfile::Client),
            other => Err(Error::UnknownCode {
                kind: "user profile",
                code: other.to_string(),
            }),
        }
    }
}

/// 사용자 레코드
///
/// 비밀번호 해시는 직렬화되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: String,

    #[serde(skip)]
    pub password_hash: String,

    pub name: String,

    #[serde(rename = "user_profile")]
    pub profile: UserProfile,

    /// 사번 (직원 전용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,

    /// 관리자 여부 (직원 전용)
    pub is_admin: bool,

    /// 구독 플랜 (클라이언트 전용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,

    /// 열람 가능한 칼럼 (클라이언트 전용)
    pub accessible_columns: BTreeSet<ColumnTag>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 정책 평가용 주체로 변환
    pub fn principal(&self) -> Principal {
        match self.profile {
            UserProfile::Employee => Principal::Employee {
                id: self.id.clone(),
                is_admin: self.is_admin,
            },
            UserProfile::Client => Principal::Client {
                id: self.id.clone(),
                accessible_columns: self.accessible_columns.clone(),
            },
        }
    }
}

/// 사용자 생성 페이로드
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
    pub user_profile: UserProfile,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub accessible_columns: BTreeSet<ColumnTag>,
}

impl NewUser {
    /// 자가 가입 정규화
    ///
    /// 자가 가입은 항상 클라이언트이며, 열람 칼럼은 관리자가 부여합니다.
    pub fn into_self_registration(mut self) -> Result<Self> {
        if self.user_profile != UserProfile::Client {
            return Err(Error::validation(
                "user_profile",
                "self-registration is only available for clients",
            ));
        }
        self.is_admin = false;
        self.employee_id = None;
        self.accessible_columns.clear();
        Ok(self)
    }

    /// 필드 검증
    pub fn validate(&self) -> Result<()> {
        validate_email(&self.email)?;
        validate_name(&self.name)?;
        if self.password.is_empty() {
            return Err(Error::validation("password", "must not be empty"));
        }

        match self.user_profile {
            UserProfile::Employee => {
                if self.employee_id.as_deref().map_or(true, |id| id.trim().is_empty()) {
                    return Err(Error::validation("employee_id", "required for employees"));
                }
                if self.plan.is_some() {
                    return Err(Error::validation("plan", "not applicable to employees"));
                }
                if !self.accessible_columns.is_empty() {
                    return Err(Error::validation(
                        "accessible_columns",
                        "not applicable to employees",
                    ));
                }
            }
            UserProfile::Client => {
                if self.plan.as_deref().map_or(true, |plan| plan.trim().is_empty()) {
                    return Err(Error::validation("plan", "required for clients"));
                }
                if self.is_admin {
                    return Err(Error::validation("is_admin", "not applicable to clients"));
                }
                if self.employee_id.is_some() {
                    return Err(Error::validation("employee_id", "not applicable to clients"));
                }
            }
        }
        Ok(())
    }

    /// 레코드 생성 (비밀번호는 호출자가 해시)
    pub fn into_user(self, password_hash: String, now: DateTime<Utc>) -> User {
        User {
            id: UserId::generate(),
            email: normalize_email(&self.email),
            password_hash,
            name: self.name,
            profile: self.user_profile,
            employee_id: self.employee_id,
            is_admin: self.is_admin,
            plan: self.plan,
            accessible_columns: self.accessible_columns,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 사용자 부분 수정 페이로드
///
/// 사용자 종류(`user_profile`)는 변경할 수 없습니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub is_admin: Option<bool>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub accessible_columns: Option<BTreeSet<ColumnTag>>,
}

impl UserPatch {
    /// 대상 사용자 기준 검증
    pub fn validate_for(&self, user: &User) -> Result<()> {
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if matches!(&self.password, Some(p) if p.is_empty()) {
            return Err(Error::validation("password", "must not be empty"));
        }

        match user.profile {
            UserProfile::Employee => {
                if self.plan.is_some() {
                    return Err(Error::validation("plan", "not applicable to employees"));
                }
                if self.accessible_columns.is_some() {
                    return Err(Error::validation(
                        "accessible_columns",
                        "not applicable to employees",
                    ));
                }
            }
            UserProfile::Client => {
                if self.is_admin.is_some() {
                    return Err(Error::validation("is_admin", "not applicable to clients"));
                }
                if self.employee_id.is_some() {
                    return Err(Error::validation("employee_id", "not applicable to clients"));
                }
            }
        }
        Ok(())
    }

    /// 사용자에 적용
    ///
    /// `password_hash`는 새 비밀번호가 있을 때 호출자가 계산해 넘깁니다.
    pub fn apply(self, user: &mut User, password_hash: Option<String>, now: DateTime<Utc>) {
        if let Some(email) = self.email {
            user.email = normalize_email(&email);
        }
        if let Some(hash) = password_hash {
            user.password_hash = hash;
        }
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(employee_id) = self.employee_id {
            user.employee_id = Some(employee_id);
        }
        if let Some(is_admin) = self.is_admin {
            user.is_admin = is_admin;
        }
        if let Some(plan) = self.plan {
            user.plan = Some(plan);
        }
        if let Some(columns) = self.accessible_columns {
            user.accessible_columns = columns;
        }
        user.updated_at = now;
    }
}

/// 이메일 정규화 (공백 제거, 소문자)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(Error::validation("email", "must be a valid email address")),
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("name", "must not be empty"));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(Error::validation(
            "name",
            format!("must be at most {} characters", NAME_MAX_LEN),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_payload() -> NewUser {
        serde_json::from_str(
            r#"{
                "email": "NewClient@Test.com",
                "password": "client_password",
                "name": "New Client",
                "user_profile": "CLI",
                "plan": "INFO",
                "accessible_columns": ["POW"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_employee_requires_employee_id() {
        let payload: NewUser = serde_json::from_str(
            r#"{
                "email": "newemployee@test.com",
                "password": "emp_password",
                "name": "New Employee",
                "user_profile": "EMP"
            }"#,
        )
        .unwrap();
        assert!(payload.validate().is_err());

        let payload = NewUser {
            employee_id: Some("EMP003".to_string()),
            ..payload
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_client_cannot_be_admin() {
        let mut payload = client_payload();
        payload.is_admin = true;
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_self_registration_drops_columns() {
        let payload = client_payload().into_self_registration().unwrap();
        assert!(payload.accessible_columns.is_empty());
        assert!(payload.validate().is_ok());

        let user = payload.into_user("hash".to_string(), Utc::now());
        assert_eq!(user.email, "newclient@test.com");
        assert_eq!(user.profile, UserProfile::Client);
    }

    #[test]
    fn test_self_registration_rejects_employee() {
        let mut payload = client_payload();
        payload.user_profile = UserProfile::Employee;
        assert!(payload.into_self_registration().is_err());
    }

    #[test]
    fn test_principal_conversion() {
        let user = client_payload().into_user("hash".to_string(), Utc::now());
        match user.principal() {
            Principal::Client {
                id,
                accessible_columns,
            } => {
                assert_eq!(id, user.id);
                assert!(accessible_columns.contains(&ColumnTag::Power));
            }
            other => panic!("expected client principal, got {:?}", other),
        }
    }

    #[test]
    fn test_user_serialization_hides_password() {
        let user = client_payload().into_user("secret-hash".to_string(), Utc::now());
        let value = serde_json::to_value(&user).unwrap();

        assert!(value.get("password_hash").is_none());
        assert_eq!(value["user_profile"], "CLI");
        assert_eq!(value["accessible_columns"], serde_json::json!(["POW"]));
    }

    #[test]
    fn test_patch_validation_by_profile() {
        let user = client_payload().into_user("hash".to_string(), Utc::now());

        let patch: UserPatch = serde_json::from_str(r#"{"accessible_columns": ["TAX", "EN"]}"#).unwrap();
        assert!(patch.validate_for(&user).is_ok());

        let patch: UserPatch = serde_json::from_str(r#"{"is_admin": true}"#).unwrap();
        assert!(patch.validate_for(&user).is_err());
    }
}
