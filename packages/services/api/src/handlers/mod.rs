//! HTTP 핸들러
//!
//! - `health`: 헬스 체크
//! - `auth`: 토큰 발급/갱신, 요청 주체 확인
//! - `news`: 기사 CRUD
//! - `users`: 사용자 관리, 자가 가입

pub mod auth;
pub mod health;
pub mod news;
pub mod users;
