//! 인증 명령어

use serde::{Deserialize, Serialize};

use super::{field, http, OutputFormat};
use crate::config::CliConfig;

pub async fn login(config: &mut CliConfig, server: &str, email: &str, password: &str) -> anyhow::Result<()> {
    #[derive(Serialize)]
    struct Req<'a> {
        email: &'a str,
        password: &'a str,
    }

    #[derive(Deserialize)]
    struct Resp {
        access: String,
        refresh: String,
    }

    let url = format!("{}/users/token", server);
    let resp: Resp = http::send_json(http::client().post(url).json(&Req { email, password })).await?;

    config.access_token = Some(resp.access);
    config.refresh_token = Some(resp.refresh);
    config.server = Some(server.to_string());
    config.save()?;

    println!("Logged in as {}", email);
    Ok(())
}

pub fn logout(config: &mut CliConfig) -> anyhow::Result<()> {
    if config.access_token.is_none() && config.refresh_token.is_none() {
        println!("Not logged in");
        return Ok(());
    }
    config.clear_tokens();
    config.save()?;
    println!("Logged out");
    Ok(())
}

pub async fn register(
    server: &str,
    format: OutputFormat,
    email: &str,
    password: &str,
    name: &str,
    plan: &str,
) -> anyhow::Result<()> {
    let body = serde_json::json!({
        "email": email,
        "password": password,
        "name": name,
        "user_profile": "CLI",
        "plan": plan,
    });

    let url = format!("{}/users/self_register", server);
    let user: serde_json::Value = http::send_json(http::client().post(url).json(&body)).await?;

    format.print(&user, |user| {
        println!("Registered {} ({})", field(user, "email"), field(user, "id"));
        println!("Use 'nd login' to sign in.");
    })
}
