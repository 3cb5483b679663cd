use anyhow::Context as _;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::CliConfig;

pub fn client() -> Client {
    Client::new()
}

pub async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> anyhow::Result<T> {
    let resp = req.send().await.context("request failed")?;
    read_json(resp).await
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> anyhow::Result<T> {
    let resp = check_status(resp).await?;
    let body = resp.json::<T>().await.context("invalid json response")?;
    Ok(body)
}

async fn check_status(resp: Response) -> anyhow::Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    #[derive(Deserialize)]
    struct ErrorResponse {
        error: ErrorBody,
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        code: String,
        message: String,
    }

    let text = resp.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(body) => Err(anyhow::anyhow!(
            "request failed ({}): {} {}",
            status,
            body.error.code,
            body.error.message
        )),
        Err(_) => Err(anyhow::anyhow!("request failed ({}): {}", status, text)),
    }
}

/// 토큰이 있으면 Bearer 헤더 추가
pub fn with_auth(req: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => req.bearer_auth(token),
        None => req,
    }
}

/// API 호출 (저장된 토큰 사용)
///
/// Access Token이 만료되어 401이 오면 Refresh Token으로 한 번 갱신 후 재시도합니다.
pub struct Api<'a> {
    config: &'a mut CliConfig,
    server: String,
    client: Client,
}

impl<'a> Api<'a> {
    pub fn new(config: &'a mut CliConfig, server: String) -> Self {
        Self {
            config,
            server,
            client: client(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.server, path)
    }

    /// JSON 응답 호출 (로그인 필요)
    pub async fn call<T, F>(&mut self, build: F) -> anyhow::Result<T>
    where
        T: DeserializeOwned,
        F: Fn(&Client) -> RequestBuilder,
    {
        self.config.get_access_token()?;
        let resp = self.send(build).await?;
        read_json(resp).await
    }

    /// JSON 응답 호출 (토큰이 없으면 익명으로)
    pub async fn call_public<T, F>(&mut self, build: F) -> anyhow::Result<T>
    where
        T: DeserializeOwned,
        F: Fn(&Client) -> RequestBuilder,
    {
        let resp = self.send(build).await?;
        read_json(resp).await
    }

    /// 본문 없는 응답 호출 (204)
    pub async fn call_empty<F>(&mut self, build: F) -> anyhow::Result<()>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        self.config.get_access_token()?;
        let resp = self.send(build).await?;
        check_status(resp).await?;
        Ok(())
    }

    async fn send<F>(&mut self, build: F) -> anyhow::Result<Response>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let token = self.config.access_token.clone();
        let resp = with_auth(build(&self.client), token.as_deref())
            .send()
            .await
            .context("request failed")?;

        if token.is_none()
            || resp.status() != StatusCode::UNAUTHORIZED
            || self.config.refresh_token.is_none()
        {
            return Ok(resp);
        }

        let token = self.refresh().await?;
        with_auth(build(&self.client), Some(&token))
            .send()
            .await
            .context("request failed")
    }

    async fn refresh(&mut self) -> anyhow::Result<String> {
        #[derive(serde::Serialize)]
        struct Req<'r> {
            refresh: &'r str,
        }

        #[derive(Deserialize)]
        struct Resp {
            access: String,
        }

        let refresh = self
            .config
            .refresh_token
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Session expired. Use 'nd login' again."))?;

        let resp: Resp = send_json(
            self.client
                .post(self.url("/users/token/refresh"))
                .json(&Req { refresh: &refresh }),
        )
        .await
        .context("Session expired. Use 'nd login' again.")?;

        self.config.access_token = Some(resp.access.clone());
        self.config.save()?;
        Ok(resp.access)
    }
}
