//! 인증 관련 타입 및 로직
//!
//! # 개요
//!
//! 이메일/비밀번호로 로그인하면 Access/Refresh 토큰 쌍을 발급합니다.
//! API는 요청마다 Bearer 토큰을 검증한 뒤 사용자를 다시 조회해
//! [`Principal`](crate::model::Principal)을 만듭니다.
//!
//! # 토큰 종류
//!
//! - **Access Token**: PASETO v4.local, 단기
//! - **Refresh Token**: PASETO v4.local, 장기, Access Token 재발급 전용

mod claims;
mod password;
mod token;

pub use claims::{TokenClaims, TokenType};
pub use password::{hash_password, verify_password};
pub use token::{bearer_token, TokenPair, TokenService};
