//! 기사/사용자 저장소
//!
//! SQL은 `nd-sql`이 만들고, 이 모듈은 실행과 행 변환만 담당합니다.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Arguments, SqlitePool};

use nd_core::model::{Article, ArticleId, ArticleStatus, ColumnTag, User, UserId, UserProfile};
use nd_core::policy::VisibilityFilter;
use nd_sql::{decode_column_set, ArticleQuery, ListQuery, Statement, UserQuery, Value, Values};

use crate::error::{ApiError, Result};

#[derive(Clone)]
pub struct NewsDb {
    pool: SqlitePool,
}

impl NewsDb {
    /// 연결 후 스키마 생성
    pub async fn connect(db_url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(db_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.init().await?;
        Ok(db)
    }

    /// 테스트용 인메모리 DB
    ///
    /// 연결마다 별도 DB가 생기므로 연결을 하나로 고정합니다.
    #[cfg(test)]
    pub async fn in_memory() -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.init().await?;
        Ok(db)
    }

    async fn init(&self) -> anyhow::Result<()> {
        for statement in nd_sql::schema_statements() {
            sqlx::query(&statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Articles
    // ─────────────────────────────────────────────────────────────────────────

    /// 필터를 통과하는 기사 한 페이지와 전체 개수
    pub async fn list_articles(
        &self,
        filter: &VisibilityFilter,
        query: &ListQuery,
    ) -> Result<(Vec<Article>, i64)> {
        let Statement { sql, values } = ArticleQuery::count(filter, query);
        let count: i64 = sqlx::query_scalar_with(&sql, sqlite_args(values)?)
            .fetch_one(&self.pool)
            .await?;

        let Statement { sql, values } = ArticleQuery::select_page(filter, query);
        let rows = sqlx::query_as_with::<_, ArticleRow, _>(&sql, sqlite_args(values)?)
            .fetch_all(&self.pool)
            .await?;

        let articles = rows
            .into_iter()
            .map(ArticleRow::into_article)
            .collect::<Result<Vec<_>>>()?;
        Ok((articles, count))
    }

    pub async fn get_article(&self, id: &ArticleId) -> Result<Option<Article>> {
        let Statement { sql, values } = ArticleQuery::select_by_id(id);
        let row = sqlx::query_as_with::<_, ArticleRow, _>(&sql, sqlite_args(values)?)
            .fetch_optional(&self.pool)
            .await?;
        row.map(ArticleRow::into_article).transpose()
    }

    pub async fn insert_article(&self, article: &Article) -> Result<()> {
        self.execute(ArticleQuery::insert(article)).await
    }

    pub async fn update_article(&self, article: &Article) -> Result<()> {
        self.execute(ArticleQuery::update(article)).await
    }

    pub async fn delete_article(&self, id: &ArticleId) -> Result<()> {
        self.execute(ArticleQuery::delete(id)).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let Statement { sql, values } = UserQuery::select_all();
        let rows = sqlx::query_as_with::<_, UserRow, _>(&sql, sqlite_args(values)?)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(UserRow::into_user).collect()
    }

    pub async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        self.fetch_user(UserQuery::select_by_id(id)).await
    }

    /// 이메일로 조회 (정규화된 값으로 호출)
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.fetch_user(UserQuery::select_by_email(email)).await
    }

    /// 사용자 생성
    ///
    /// 이메일 중복은 `Conflict`로 돌려줍니다.
    pub async fn insert_user(&self, user: &User) -> Result<()> {
        self.execute(UserQuery::insert(user))
            .await
            .map_err(|e| conflict_on_unique(e, &user.email))
    }

    pub async fn update_user(&self, user: &User) -> Result<()> {
        self.execute(UserQuery::update(user))
            .await
            .map_err(|e| conflict_on_unique(e, &user.email))
    }

    /// 사용자 삭제
    ///
    /// 작성한 기사는 남기고 작성자만 비웁니다.
    pub async fn delete_user(&self, id: &UserId) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let Statement { sql, values } = ArticleQuery::clear_author(id);
        sqlx::query_with(&sql, sqlite_args(values)?)
            .execute(&mut *tx)
            .await?;

        let Statement { sql, values } = UserQuery::delete(id);
        sqlx::query_with(&sql, sqlite_args(values)?)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn fetch_user(&self, statement: Statement) -> Result<Option<User>> {
        let Statement { sql, values } = statement;
        let row = sqlx::query_as_with::<_, UserRow, _>(&sql, sqlite_args(values)?)
            .fetch_optional(&self.pool)
            .await?;
        row.map(UserRow::into_user).transpose()
    }

    async fn execute(&self, statement: Statement) -> Result<()> {
        let Statement { sql, values } = statement;
        sqlx::query_with(&sql, sqlite_args(values)?)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// SeaQuery 값을 sqlx 인자로 변환
fn sqlite_args<'q>(values: Values) -> Result<SqliteArguments<'q>> {
    let mut args = SqliteArguments::default();
    for value in values.0 {
        let added = match value {
            Value::Bool(v) => args.add(v),
            Value::Int(v) => args.add(v),
            Value::BigInt(v) => args.add(v),
            Value::Unsigned(v) => args.add(v.map(i64::from)),
            Value::BigUnsigned(v) => args.add(v.map(|n| i64::try_from(n).unwrap_or(i64::MAX))),
            Value::String(v) => args.add(v.map(|s| *s)),
            other => {
                return Err(ApiError::Internal {
                    message: format!("unsupported bind value: {:?}", other),
                })
            }
        };
        added.map_err(|e| ApiError::Internal {
            message: format!("failed to bind value: {}", e),
        })?;
    }
    Ok(args)
}

fn conflict_on_unique(e: ApiError, email: &str) -> ApiError {
    match e {
        ApiError::Database(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            ApiError::Conflict {
                message: format!("user with email '{}' already exists", email),
            }
        }
        other => other,
    }
}

fn parse_timestamp(column: &str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ApiError::corrupt(column, e))
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct ArticleRow {
    id: String,
    title: String,
    subtitle: String,
    draft_content: String,
    published_content: String,
    created_at: String,
    updated_at: String,
    original_publication_at: String,
    last_publication_update_at: String,
    author_id: Option<String>,
    status: String,
    column_tag: Option<String>,
}

impl ArticleRow {
    fn into_article(self) -> Result<Article> {
        Ok(Article {
            id: ArticleId::new(self.id),
            title: self.title,
            subtitle: self.subtitle,
            draft_content: self.draft_content,
            published_content: self.published_content,
            created_at: parse_timestamp("created_at", &self.created_at)?,
            updated_at: parse_timestamp("updated_at", &self.updated_at)?,
            original_publication_at: parse_timestamp(
                "original_publication_at",
                &self.original_publication_at,
            )?,
            last_publication_update_at: parse_timestamp(
                "last_publication_update_at",
                &self.last_publication_update_at,
            )?,
            author: self.author_id.map(UserId::new),
            status: ArticleStatus::from_code(&self.status)
                .map_err(|e| ApiError::corrupt("status", e))?,
            column: ColumnTag::from_optional_code(self.column_tag.as_deref())
                .map_err(|e| ApiError::corrupt("column_tag", e))?,
        })
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct UserRow {
    id: String,
    email: String,
    password_hash: String,
    name: String,
    user_profile: String,
    employee_id: Option<String>,
    is_admin: bool,
    plan: Option<String>,
    accessible_columns: String,
    created_at: String,
    updated_at: String,
}

impl UserRow {
    fn into_user(self) -> Result<User> {
        Ok(User {
            id: UserId::new(self.id),
            email: self.email,
            password_hash: self.password_hash,
            name: self.name,
            profile: UserProfile::from_code(&self.user_profile)
                .map_err(|e| ApiError::corrupt("user_profile", e))?,
            employee_id: self.employee_id,
            is_admin: self.is_admin,
            plan: self.plan,
            accessible_columns: decode_column_set(&self.accessible_columns)
                .map_err(|e| ApiError::corrupt("accessible_columns", e))?,
            created_at: parse_timestamp("created_at", &self.created_at)?,
            updated_at: parse_timestamp("updated_at", &self.updated_at)?,
        })
    }
}
