//! 기사 명령어

use serde::Serialize;
use serde_json::Value;

use super::{field, http::Api, OutputFormat};

/// 목록 조회 옵션
#[derive(Debug, Default, Serialize)]
pub struct ListArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

/// 생성/수정 필드
///
/// 수정(PATCH) 시 지정하지 않은 필드는 보내지 않습니다.
#[derive(Debug, Default, Serialize)]
pub struct ArticleArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// 빈 문자열이면 칼럼 해제
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_content: Option<String>,
}

pub async fn list(api: &mut Api<'_>, format: OutputFormat, args: &ListArgs) -> anyhow::Result<()> {
    let url = api.url("/news");
    let resp: Value = api.call_public(|c| c.get(&url).query(args)).await?;

    format.print(&resp, |resp| {
        let items = resp["data"].as_array().map(Vec::as_slice).unwrap_or_default();
        let total = resp["meta"]["count"].as_i64().unwrap_or(0);
        if items.is_empty() {
            println!("No articles found.");
            return;
        }
        for item in items {
            print_row(item);
        }
        println!("{} of {} article(s)", items.len(), total);
    })
}

pub async fn get(api: &mut Api<'_>, format: OutputFormat, id: &str) -> anyhow::Result<()> {
    let url = api.url(&format!("/news/{}", id));
    let article: Value = api.call(|c| c.get(&url)).await?;

    format.print(&article, print_detail)
}

pub async fn create(api: &mut Api<'_>, format: OutputFormat, args: &ArticleArgs) -> anyhow::Result<()> {
    let url = api.url("/news");
    let article: Value = api.call(|c| c.post(&url).json(args)).await?;

    format.print(&article, |article| {
        println!("Created article {}", field(article, "id"));
    })
}

pub async fn update(api: &mut Api<'_>, format: OutputFormat, id: &str, args: &ArticleArgs) -> anyhow::Result<()> {
    let url = api.url(&format!("/news/{}", id));
    let article: Value = api.call(|c| c.patch(&url).json(args)).await?;

    format.print(&article, |article| {
        println!("Updated article {}", field(article, "id"));
    })
}

pub async fn delete(api: &mut Api<'_>, id: &str) -> anyhow::Result<()> {
    let url = api.url(&format!("/news/{}", id));
    api.call_empty(|c| c.delete(&url)).await?;
    println!("Deleted article {}", id);
    Ok(())
}

fn print_row(item: &Value) {
    println!(
        "- {} [{}] {} (column: {})",
        field(item, "id"),
        field(item, "status"),
        field(item, "title"),
        field(item, "column"),
    );
}

fn print_detail(article: &Value) {
    println!("ID:        {}", field(article, "id"));
    println!("Title:     {}", field(article, "title"));
    println!("Subtitle:  {}", field(article, "subtitle"));
    println!("Status:    {}", field(article, "status"));
    println!("Column:    {}", field(article, "column"));
    println!("Author:    {}", field(article, "author"));
    println!("Published: {}", field(article, "original_publication_at"));
    println!("Updated:   {}", field(article, "updated_at"));
    if let Some(draft) = article.get("draft_content").and_then(Value::as_str) {
        println!();
        println!("[draft]");
        println!("{}", draft);
    }
    println!();
    println!("{}", field(article, "published_content"));
}
