//! CLI 명령어 구현

pub mod auth;
pub mod http;
pub mod news;
pub mod users;

use serde_json::Value;

/// 출력 형식
#[derive(Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// JSON이면 그대로, 텍스트면 `text`로 출력
    pub fn print(&self, value: &Value, text: impl FnOnce(&Value)) -> anyhow::Result<()> {
        match self {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Text => text(value),
        }
        Ok(())
    }
}

/// 문자열 필드 (없으면 "-")
pub(crate) fn field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("-")
}
