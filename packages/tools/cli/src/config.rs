//! CLI 설정

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// 서버 URL 기본값
pub const DEFAULT_SERVER: &str = "http://localhost:8000";

/// CLI 설정 (`~/.newsdesk/config.json`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// 저장된 Access Token
    pub access_token: Option<String>,

    /// 저장된 Refresh Token
    pub refresh_token: Option<String>,

    /// 기본 서버 URL
    pub server: Option<String>,
}

impl CliConfig {
    /// 설정 파일 경로
    fn config_path() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?;
        Ok(home.join(".newsdesk").join("config.json"))
    }

    /// 설정 로드
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: CliConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// 설정 저장
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// 서버 URL 결정 (옵션 > NEWSDESK_URL > 저장값 > 기본값)
    pub fn server_url(&self, flag: Option<&str>) -> String {
        let url = flag
            .map(str::to_string)
            .or_else(|| std::env::var("NEWSDESK_URL").ok().filter(|v| !v.is_empty()))
            .or_else(|| self.server.clone())
            .unwrap_or_else(|| DEFAULT_SERVER.to_string());
        url.trim_end_matches('/').to_string()
    }

    /// Access Token 결정
    pub fn get_access_token(&self) -> anyhow::Result<String> {
        self.access_token
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Not logged in. Use 'nd login' first."))
    }

    /// 토큰 삭제
    pub fn clear_tokens(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_flag_wins() {
        let config = CliConfig {
            server: Some("http://saved:9000".to_string()),
            ..Default::default()
        };
        assert_eq!(config.server_url(Some("http://flag:8000/")), "http://flag:8000");
    }

    #[test]
    fn test_clear_tokens() {
        let mut config = CliConfig {
            access_token: Some("a".to_string()),
            refresh_token: Some("r".to_string()),
            server: None,
        };
        config.clear_tokens();
        assert!(config.get_access_token().is_err());
        assert!(config.refresh_token.is_none());
    }
}
