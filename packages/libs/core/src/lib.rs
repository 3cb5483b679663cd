//! nd-core: Newsdesk 공통 핵심 라이브러리
//!
//! API 서비스와 SQL 계층이 공유하는 핵심 타입과 정책 로직을 제공합니다.
//!
//! # 모듈 구조
//!
//! - `model`: 기사/사용자 도메인 모델과 요청 페이로드
//! - `policy`: 기사/사용자 접근 정책 (순수 결정 함수)
//! - `auth`: 토큰 발급/검증 및 비밀번호 해시
//! - `error`: 공통 에러 타입

pub mod auth;
pub mod error;
pub mod model;
pub mod policy;

pub use error::{Error, Result};
