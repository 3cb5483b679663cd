//! 가시성 필터 → WHERE 조건 변환
//!
//! 정책이 돌려준 [`VisibilityFilter`]를 SeaQuery `Condition`으로 옮깁니다.
//! 메모리상 평가(`VisibilityFilter::matches`)와 같은 결과를 내야 합니다.

use sea_query::{Condition, Expr};

use nd_core::policy::{FilterExpr, VisibilityFilter};

use crate::table::Articles;

/// 필터를 WHERE 조건으로 변환
pub fn filter_condition(filter: &VisibilityFilter) -> Condition {
    match filter {
        VisibilityFilter::All => Condition::all(),
        VisibilityFilter::Nothing => never(),
        VisibilityFilter::Where(expr) => expr_condition(expr),
    }
}

fn expr_condition(expr: &FilterExpr) -> Condition {
    match expr {
        FilterExpr::And(exprs) => exprs
            .iter()
            .fold(Condition::all(), |cond, e| cond.add(expr_condition(e))),
        FilterExpr::Or(exprs) if exprs.is_empty() => never(),
        FilterExpr::Or(exprs) => exprs
            .iter()
            .fold(Condition::any(), |cond, e| cond.add(expr_condition(e))),
        FilterExpr::StatusIs(status) => {
            Condition::all().add(Expr::col((Articles::Table, Articles::Status)).eq(status.as_code()))
        }
        FilterExpr::ColumnUnset => {
            Condition::all().add(Expr::col((Articles::Table, Articles::ColumnTag)).is_null())
        }
        FilterExpr::ColumnIn(columns) if columns.is_empty() => never(),
        FilterExpr::ColumnIn(columns) => Condition::all().add(
            Expr::col((Articles::Table, Articles::ColumnTag))
                .is_in(columns.iter().map(|c| c.as_code())),
        ),
        FilterExpr::AuthoredBy(id) => {
            Condition::all().add(Expr::col((Articles::Table, Articles::AuthorId)).eq(id.as_str()))
        }
    }
}

/// 항상 거짓인 조건
fn never() -> Condition {
    Condition::all().add(Expr::cust("1 = 0"))
}
