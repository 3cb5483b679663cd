//! CRUD SQL 빌더
//!
//! 기사와 사용자 테이블용 SELECT/INSERT/UPDATE/DELETE 문을 생성합니다.
//! 결과는 `?` 자리표시자가 들어간 SQL과 바인딩 값 목록입니다.

use std::collections::BTreeSet;

use sea_query::{
    Alias, Expr, Func, Order, Query, QueryStatementWriter, SelectStatement, SimpleExpr,
    SqliteQueryBuilder,
};

use nd_core::model::{Article, ArticleId, ColumnTag, User, UserId};
use nd_core::policy::VisibilityFilter;

use crate::condition::filter_condition;
use crate::params::{ListQuery, Ordering};
use crate::table::{Articles, Users};

/// 실행 가능한 SQL
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub values: sea_query::Values,
}

impl Statement {
    fn sqlite<S: QueryStatementWriter>(stmt: &S) -> Self {
        let (sql, values) = stmt.build(SqliteQueryBuilder);
        Self { sql, values }
    }
}

/// 기사 쿼리 빌더
pub struct ArticleQuery;

impl ArticleQuery {
    /// 목록 페이지 조회
    ///
    /// 가시성 필터와 사용자 조건을 AND로 묶은 뒤 정렬/페이지네이션합니다.
    pub fn select_page(filter: &VisibilityFilter, query: &ListQuery) -> Statement {
        let mut select = Self::filtered(filter, query);
        select.columns(Articles::COLUMNS.map(|c| (Articles::Table, c)));

        let (column, order) = match query.ordering {
            Ordering::CreatedAtAsc => (Articles::CreatedAt, Order::Asc),
            Ordering::CreatedAtDesc => (Articles::CreatedAt, Order::Desc),
            Ordering::UpdatedAtAsc => (Articles::UpdatedAt, Order::Asc),
            Ordering::UpdatedAtDesc => (Articles::UpdatedAt, Order::Desc),
            Ordering::TitleAsc => (Articles::Title, Order::Asc),
            Ordering::TitleDesc => (Articles::Title, Order::Desc),
        };
        // id로 순서 고정 (같은 시각에 만든 기사)
        select
            .order_by((Articles::Table, column), order.clone())
            .order_by((Articles::Table, Articles::Id), order)
            .limit(query.limit)
            .offset(query.offset);

        Statement::sqlite(&select)
    }

    /// 필터를 통과하는 전체 개수
    pub fn count(filter: &VisibilityFilter, query: &ListQuery) -> Statement {
        let mut select = Self::filtered(filter, query);
        select.expr_as(
            Func::count(Expr::col((Articles::Table, Articles::Id))),
            Alias::new("count"),
        );
        Statement::sqlite(&select)
    }

    fn filtered(filter: &VisibilityFilter, query: &ListQuery) -> SelectStatement {
        let narrowed = query
            .conditions
            .iter()
            .cloned()
            .fold(filter.clone(), VisibilityFilter::narrow);

        let mut select = Query::select();
        select.from(Articles::Table);
        // All은 WHERE 없이
        if narrowed != VisibilityFilter::All {
            select.cond_where(filter_condition(&narrowed));
        }
        select
    }

    /// ID로 단건 조회
    pub fn select_by_id(id: &ArticleId) -> Statement {
        let select = Query::select()
            .columns(Articles::COLUMNS.map(|c| (Articles::Table, c)))
            .from(Articles::Table)
            .and_where(Expr::col((Articles::Table, Articles::Id)).eq(id.as_str()))
            .to_owned();
        Statement::sqlite(&select)
    }

    /// INSERT
    pub fn insert(article: &Article) -> Statement {
        let values: Vec<SimpleExpr> = article_values(article)
            .into_iter()
            .map(|(_, v)| v)
            .collect();

        let insert = Query::insert()
            .into_table(Articles::Table)
            .columns(Articles::COLUMNS)
            .values_panic(values)
            .to_owned();
        Statement::sqlite(&insert)
    }

    /// 쓰기 가능한 필드 전체 UPDATE
    ///
    /// `id`, `created_at`, `author_id`는 바꾸지 않습니다.
    pub fn update(article: &Article) -> Statement {
        let values = article_values(article).into_iter().filter(|(col, _)| {
            !matches!(
                col,
                Articles::Id | Articles::CreatedAt | Articles::AuthorId
            )
        });

        let update = Query::update()
            .table(Articles::Table)
            .values(values)
            .and_where(Expr::col(Articles::Id).eq(article.id.as_str()))
            .to_owned();
        Statement::sqlite(&update)
    }

    /// DELETE
    pub fn delete(id: &ArticleId) -> Statement {
        let delete = Query::delete()
            .from_table(Articles::Table)
            .and_where(Expr::col(Articles::Id).eq(id.as_str()))
            .to_owned();
        Statement::sqlite(&delete)
    }

    /// 삭제된 사용자의 작성자 표시 해제
    pub fn clear_author(user: &UserId) -> Statement {
        let update = Query::update()
            .table(Articles::Table)
            .value(Articles::AuthorId, Option::<String>::None)
            .and_where(Expr::col(Articles::AuthorId).eq(user.as_str()))
            .to_owned();
        Statement::sqlite(&update)
    }
}

fn article_values(article: &Article) -> Vec<(Articles, SimpleExpr)> {
    vec![
        (Articles::Id, article.id.as_str().into()),
        (Articles::Title, article.title.as_str().into()),
        (Articles::Subtitle, article.subtitle.as_str().into()),
        (Articles::DraftContent, article.draft_content.as_str().into()),
        (Articles::PublishedContent, article.published_content.as_str().into()),
        (Articles::CreatedAt, article.created_at.to_rfc3339().into()),
        (Articles::UpdatedAt, article.updated_at.to_rfc3339().into()),
        (
            Articles::OriginalPublicationAt,
            article.original_publication_at.to_rfc3339().into(),
        ),
        (
            Articles::LastPublicationUpdateAt,
            article.last_publication_update_at.to_rfc3339().into(),
        ),
        (
            Articles::AuthorId,
            article.author.as_ref().map(|a| a.as_str().to_string()).into(),
        ),
        (Articles::Status, article.status.as_code().into()),
        (
            Articles::ColumnTag,
            article.column.map(|c| c.as_code().to_string()).into(),
        ),
    ]
}

/// 사용자 쿼리 빌더
pub struct UserQuery;

impl UserQuery {
    /// 전체 목록 (가입 순)
    pub fn select_all() -> Statement {
        let select = Query::select()
            .columns(Users::COLUMNS)
            .from(Users::Table)
            .order_by(Users::CreatedAt, Order::Asc)
            .order_by(Users::Id, Order::Asc)
            .to_owned();
        Statement::sqlite(&select)
    }

    /// ID로 조회
    pub fn select_by_id(id: &UserId) -> Statement {
        let select = Query::select()
            .columns(Users::COLUMNS)
            .from(Users::Table)
            .and_where(Expr::col(Users::Id).eq(id.as_str()))
            .to_owned();
        Statement::sqlite(&select)
    }

    /// 이메일로 조회 (정규화된 이메일 기준)
    pub fn select_by_email(email: &str) -> Statement {
        let select = Query::select()
            .columns(Users::COLUMNS)
            .from(Users::Table)
            .and_where(Expr::col(Users::Email).eq(email))
            .to_owned();
        Statement::sqlite(&select)
    }

    /// INSERT
    pub fn insert(user: &User) -> Statement {
        let values: Vec<SimpleExpr> = user_values(user).into_iter().map(|(_, v)| v).collect();
        let insert = Query::insert()
            .into_table(Users::Table)
            .columns(Users::COLUMNS)
            .values_panic(values)
            .to_owned();
        Statement::sqlite(&insert)
    }

    /// UPDATE (`id`, `user_profile`, `created_at` 제외)
    pub fn update(user: &User) -> Statement {
        let values = user_values(user).into_iter().filter(|(col, _)| {
            !matches!(col, Users::Id | Users::UserProfile | Users::CreatedAt)
        });
        let update = Query::update()
            .table(Users::Table)
            .values(values)
            .and_where(Expr::col(Users::Id).eq(user.id.as_str()))
            .to_owned();
        Statement::sqlite(&update)
    }

    /// DELETE
    pub fn delete(id: &UserId) -> Statement {
        let delete = Query::delete()
            .from_table(Users::Table)
            .and_where(Expr::col(Users::Id).eq(id.as_str()))
            .to_owned();
        Statement::sqlite(&delete)
    }
}

fn user_values(user: &User) -> Vec<(Users, SimpleExpr)> {
    vec![
        (Users::Id, user.id.as_str().into()),
        (Users::Email, user.email.as_str().into()),
        (Users::PasswordHash, user.password_hash.as_str().into()),
        (Users::Name, user.name.as_str().into()),
        (Users::UserProfile, user.profile.as_code().into()),
        (Users::EmployeeId, user.employee_id.clone().into()),
        (Users::IsAdmin, user.is_admin.into()),
        (Users::Plan, user.plan.clone().into()),
        (
            Users::AccessibleColumns,
            encode_column_set(&user.accessible_columns).into(),
        ),
        (Users::CreatedAt, user.created_at.to_rfc3339().into()),
        (Users::UpdatedAt, user.updated_at.to_rfc3339().into()),
    ]
}

/// 칼럼 집합 저장 형식 (`POW,TAX`)
pub fn encode_column_set(columns: &BTreeSet<ColumnTag>) -> String {
    columns
        .iter()
        .map(|c| c.as_code())
        .collect::<Vec<_>>()
        .join(",")
}

/// 저장된 칼럼 집합 파싱
pub fn decode_column_set(raw: &str) -> nd_core::Result<BTreeSet<ColumnTag>> {
    raw.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(ColumnTag::from_code)
        .collect()
}
