//! nd-sql: Newsdesk SQL 생성 라이브러리
//!
//! 기사/사용자 테이블에 대한 SQL을 SeaQuery로 생성합니다.
//! 값은 모두 바인딩 파라미터로 분리되므로 SQL Injection이 발생하지 않습니다.
//!
//! # 모듈 구조
//!
//! - `table`: 테이블/컬럼 식별자
//! - `ddl`: CREATE TABLE/INDEX 생성기
//! - `condition`: 가시성 필터 → WHERE 조건 변환
//! - `params`: 목록 조회 파라미터 파싱/검증
//! - `builder`: 기사/사용자 CRUD 빌더

pub mod builder;
pub mod condition;
pub mod ddl;
pub mod params;
pub mod table;

pub use builder::{
    decode_column_set, encode_column_set, ArticleQuery, Statement, UserQuery,
};
pub use condition::filter_condition;
pub use ddl::schema_statements;
pub use params::{ListParams, ListQuery, Ordering, ParamsError};
pub use sea_query::{Value, Values};
