//! 사용자 관리 명령어 (관리자 전용)

use serde::Serialize;
use serde_json::Value;

use super::{field, http::Api, OutputFormat};

/// 사용자 생성 필드
#[derive(Debug, Serialize)]
pub struct NewUserArgs {
    pub email: String,
    pub password: String,
    pub name: String,
    pub user_profile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    pub is_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    pub accessible_columns: Vec<String>,
}

pub async fn list(api: &mut Api<'_>, format: OutputFormat) -> anyhow::Result<()> {
    let url = api.url("/users/users");
    let users: Value = api.call(|c| c.get(&url)).await?;

    format.print(&users, |users| {
        let items = users.as_array().map(Vec::as_slice).unwrap_or_default();
        if items.is_empty() {
            println!("No users found.");
            return;
        }
        for user in items {
            let admin = if user["is_admin"].as_bool().unwrap_or(false) { " admin" } else { "" };
            let columns = user["accessible_columns"]
                .as_array()
                .map(|cols| cols.iter().filter_map(Value::as_str).collect::<Vec<_>>().join(","))
                .unwrap_or_default();
            println!(
                "- {} {} ({}{}) columns=[{}]",
                field(user, "id"),
                field(user, "email"),
                field(user, "user_profile"),
                admin,
                columns,
            );
        }
    })
}

pub async fn create(api: &mut Api<'_>, format: OutputFormat, args: &NewUserArgs) -> anyhow::Result<()> {
    let url = api.url("/users/users");
    let user: Value = api.call(|c| c.post(&url).json(args)).await?;

    format.print(&user, |user| {
        println!("Created user {} ({})", field(user, "email"), field(user, "id"));
    })
}

pub async fn delete(api: &mut Api<'_>, id: &str) -> anyhow::Result<()> {
    let url = api.url(&format!("/users/users/{}", id));
    api.call_empty(|c| c.delete(&url)).await?;
    println!("Deleted user {}", id);
    Ok(())
}
