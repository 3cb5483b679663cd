//! 가시성 필터
//!
//! 목록 조회 시 정책이 반환하는 술어입니다. 영속성 계층은 이를 쿼리 조건으로
//! 변환하거나(`nd-sql`), 메모리상의 기사 목록에 직접 적용할 수 있습니다.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::{Article, ArticleStatus, ColumnTag, UserId};

/// 기사 컬렉션에 대한 가시성 필터
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "expr", rename_all = "snake_case")]
pub enum VisibilityFilter {
    /// 제한 없음
    All,

    /// 빈 결과
    Nothing,

    /// 조건부
    Where(FilterExpr),
}

/// 필터 표현식 트리
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterExpr {
    And(Vec<FilterExpr>),
    Or(Vec<FilterExpr>),
    StatusIs(ArticleStatus),
    ColumnUnset,

    /// 빈 집합이면 항상 false
    ColumnIn(BTreeSet<ColumnTag>),

    AuthoredBy(UserId),
}

impl FilterExpr {
    /// 클라이언트 가시성: 발행됨 AND (칼럼 미지정 OR 허용 칼럼)
    pub fn client_visibility(accessible_columns: &BTreeSet<ColumnTag>) -> Self {
        FilterExpr::And(vec![
            FilterExpr::StatusIs(ArticleStatus::Published),
            FilterExpr::Or(vec![
                FilterExpr::ColumnUnset,
                FilterExpr::ColumnIn(accessible_columns.clone()),
            ]),
        ])
    }

    /// 일반 직원 가시성: 발행됨 OR 본인 작성
    pub fn employee_visibility(id: &UserId) -> Self {
        FilterExpr::Or(vec![
            FilterExpr::StatusIs(ArticleStatus::Published),
            FilterExpr::AuthoredBy(id.clone()),
        ])
    }

    /// 기사 하나에 대해 평가
    pub fn matches(&self, article: &Article) -> bool {
        match self {
            FilterExpr::And(exprs) => exprs.iter().all(|e| e.matches(article)),
            FilterExpr::Or(exprs) => exprs.iter().any(|e| e.matches(article)),
            FilterExpr::StatusIs(status) => article.status == *status,
            FilterExpr::ColumnUnset => article.column.is_none(),
            FilterExpr::ColumnIn(columns) => article
                .column
                .map_or(false, |column| columns.contains(&column)),
            FilterExpr::AuthoredBy(id) => article.is_authored_by(id),
        }
    }
}

impl VisibilityFilter {
    /// 기사 하나에 대해 평가
    pub fn matches(&self, article: &Article) -> bool {
        match self {
            VisibilityFilter::All => true,
            VisibilityFilter::Nothing => false,
            VisibilityFilter::Where(expr) => expr.matches(article),
        }
    }

    /// 결과가 항상 비어 있는지
    pub fn is_nothing(&self) -> bool {
        matches!(self, VisibilityFilter::Nothing)
    }

    /// 추가 조건으로 좁히기 (AND)
    pub fn narrow(self, extra: FilterExpr) -> Self {
        match self {
            VisibilityFilter::All => VisibilityFilter::Where(extra),
            VisibilityFilter::Nothing => VisibilityFilter::Nothing,
            VisibilityFilter::Where(expr) => VisibilityFilter::Where(FilterExpr::And(vec![expr, extra])),
        }
    }

    /// 메모리상의 기사 목록에 적용
    pub fn apply<'a, I>(&self, articles: I) -> Vec<&'a Article>
    where
        I: IntoIterator<Item = &'a Article>,
    {
        articles.into_iter().filter(|a| self.matches(a)).collect()
    }
}
