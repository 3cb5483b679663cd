//! API 앱 상태

use chrono::Utc;

use nd_core::auth::{hash_password, TokenService};
use nd_core::model::{normalize_email, NewUser, UserProfile};

use crate::config::Config;
use crate::db::NewsDb;

/// 앱 상태
///
/// 모든 핸들러에서 공유하는 상태입니다.
pub struct AppState {
    /// 설정
    pub config: Config,

    /// 토큰 발급/검증
    pub tokens: TokenService,

    /// 저장소
    pub db: NewsDb,
}

impl AppState {
    /// 새 상태 생성
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let tokens = match &config.token_key {
            Some(raw) => TokenService::from_key_material(
                raw,
                config.access_ttl_secs,
                config.refresh_ttl_secs,
            )?,
            None => {
                tracing::warn!(
                    "NEWSDESK_TOKEN_KEY is not set; using a random key (tokens will not survive a restart)"
                );
                TokenService::random(config.access_ttl_secs, config.refresh_ttl_secs)
            }
        };

        let db = NewsDb::connect(&config.db_url).await?;

        let state = Self::from_parts(config.clone(), tokens, db);
        state.bootstrap_admin().await?;
        Ok(state)
    }

    pub fn from_parts(config: Config, tokens: TokenService, db: NewsDb) -> Self {
        Self { config, tokens, db }
    }

    /// 설정된 관리자 계정이 없으면 생성
    pub async fn bootstrap_admin(&self) -> anyhow::Result<()> {
        let (Some(email), Some(password)) = (&self.config.admin_email, &self.config.admin_password)
        else {
            return Ok(());
        };

        if self.db.get_user_by_email(&normalize_email(email)).await?.is_some() {
            tracing::debug!("Admin account {} already exists", email);
            return Ok(());
        }

        let payload = NewUser {
            email: email.clone(),
            password: password.clone(),
            name: "Administrator".to_string(),
            user_profile: UserProfile::Employee,
            employee_id: Some("ADMIN".to_string()),
            is_admin: true,
            plan: None,
            accessible_columns: Default::default(),
        };
        payload.validate()?;

        let user = payload.into_user(hash_password(password), Utc::now());
        self.db.insert_user(&user).await?;
        tracing::info!("Created admin account {}", user.email);
        Ok(())
    }
}
