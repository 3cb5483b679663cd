//! 접근 정책
//!
//! # 개요
//!
//! 기사 가시성/변경 정책과 사용자 관리 정책을 순수 함수로 제공합니다.
//! HTTP 계층은 결정을 상태 코드로 옮기고, 영속성 계층은 가시성 필터를 쿼리에 적용합니다.
//!
//! # 모듈 구조
//!
//! - `articles`: 기사 작업 결정 (`decide`)
//! - `filter`: 목록 조회용 가시성 필터
//! - `users`: 사용자 관리 결정 (`decide_user`)
//! - `view`: 주체별 응답 투영

mod articles;
mod filter;
mod users;
mod view;

pub use articles::{decide, list_filter, Decision, DenyReason, Operation};
pub use filter::{FilterExpr, VisibilityFilter};
pub use users::{decide_user, UserOperation};
pub use view::{project, ArticleView};
