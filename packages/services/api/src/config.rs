//! API 서비스 설정

use std::env;

/// API 서비스 설정
#[derive(Clone)]
pub struct Config {
    /// 서버 포트
    pub port: u16,

    /// SQLite URL
    pub db_url: String,

    /// 토큰 대칭키 (hex, base64, raw 32바이트). 없으면 프로세스마다 임의 생성
    pub token_key: Option<String>,

    /// Access Token TTL (초)
    pub access_ttl_secs: i64,

    /// Refresh Token TTL (초)
    pub refresh_ttl_secs: i64,

    /// 목록 기본 페이지 크기
    pub default_page_size: u64,

    /// 목록 최대 페이지 크기
    pub max_page_size: u64,

    /// 시작 시 생성할 관리자 계정
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            db_url: "sqlite://data/newsdesk.db".to_string(),
            token_key: None,
            access_ttl_secs: 300,
            refresh_ttl_secs: 86400,
            default_page_size: 50,
            max_page_size: 200,
            admin_email: None,
            admin_password: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("db_url", &self.db_url)
            .field("token_key", &self.token_key.as_ref().map(|_| "<redacted>"))
            .field("access_ttl_secs", &self.access_ttl_secs)
            .field("refresh_ttl_secs", &self.refresh_ttl_secs)
            .field("default_page_size", &self.default_page_size)
            .field("max_page_size", &self.max_page_size)
            .field("admin_email", &self.admin_email)
            .finish()
    }
}

impl Config {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            port: env::var("NEWSDESK_PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse()?,

            db_url: env::var("NEWSDESK_DB_URL").unwrap_or(defaults.db_url),

            token_key: non_empty_var("NEWSDESK_TOKEN_KEY"),

            access_ttl_secs: env::var("NEWSDESK_ACCESS_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.access_ttl_secs),

            refresh_ttl_secs: env::var("NEWSDESK_REFRESH_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.refresh_ttl_secs),

            default_page_size: env::var("NEWSDESK_DEFAULT_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_page_size),

            max_page_size: env::var("NEWSDESK_MAX_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_page_size),

            admin_email: non_empty_var("NEWSDESK_ADMIN_EMAIL"),
            admin_password: non_empty_var("NEWSDESK_ADMIN_PASSWORD"),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
