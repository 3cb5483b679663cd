//! 토큰 발급 및 검증
//!
//! PASETO v4.local 대칭키로 토큰을 암호화합니다.

use base64::{engine::general_purpose, Engine as _};
use rand::RngCore;
use rusty_paseto::prelude::*;
use serde::Serialize;

use super::claims::{TokenClaims, TokenType};
use crate::error::{Error, Result};
use crate::model::User;

/// 발급된 토큰 쌍
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// `Authorization: Bearer ...` 헤더에서 토큰 추출
pub fn bearer_token(auth_header: Option<&str>) -> Option<&str> {
    auth_header?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// 토큰 서비스
///
/// 서비스 수명 동안 하나의 대칭키를 사용합니다.
#[derive(Clone)]
pub struct TokenService {
    key: [u8; 32],
    access_ttl: i64,
    refresh_ttl: i64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("key", &"<redacted>")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl TokenService {
    /// 새 서비스 생성
    pub fn new(key: [u8; 32], access_ttl: i64, refresh_ttl: i64) -> Self {
        Self {
            key,
            access_ttl,
            refresh_ttl,
        }
    }

    /// 키 문자열(hex, base64, raw 32바이트)에서 생성
    pub fn from_key_material(raw: &str, access_ttl: i64, refresh_ttl: i64) -> Result<Self> {
        let key = parse_key_material(raw).ok_or_else(|| Error::InvalidToken {
            reason: "token key must be 32 bytes (hex, base64, or raw)".to_string(),
        })?;
        Ok(Self::new(key, access_ttl, refresh_ttl))
    }

    /// 임의 키로 생성 (프로세스 재시작 시 기존 토큰 무효)
    pub fn random(access_ttl: i64, refresh_ttl: i64) -> Self {
        let mut key = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut key);
        Self::new(key, access_ttl, refresh_ttl)
    }

    /// Access/Refresh 토큰 쌍 발급
    pub fn issue_pair(&self, user: &User) -> Result<TokenPair> {
        Ok(TokenPair {
            access: self.issue(user, TokenType::Access)?,
            refresh: self.issue(user, TokenType::Refresh)?,
        })
    }

    /// 토큰 발급
    pub fn issue(&self, user: &User, token_type: TokenType) -> Result<String> {
        let ttl = match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };
        let claims = TokenClaims::new(&user.id, user.profile, token_type, ttl);
        self.encrypt(&claims)
    }

    /// Claims 암호화
    pub fn encrypt(&self, claims: &TokenClaims) -> Result<String> {
        let key = PasetoSymmetricKey::<V4, Local>::from(Key::from(self.key));
        let iat = claims.iat.to_rfc3339();
        let exp = claims.exp.to_rfc3339();

        let mut builder = PasetoBuilder::<V4, Local>::default();
        builder
            .set_claim(SubjectClaim::from(claims.sub.as_str()))
            .set_claim(TokenIdentifierClaim::from(claims.jti.as_str()))
            .set_claim(IssuedAtClaim::try_from(iat).map_err(issue_error)?)
            .set_claim(ExpirationClaim::try_from(exp).map_err(issue_error)?)
            .set_claim(CustomClaim::try_from(("profile", claims.profile.as_code())).map_err(issue_error)?)
            .set_claim(CustomClaim::try_from(("token_type", claims.token_type.as_str())).map_err(issue_error)?);

        builder.build(&key).map_err(issue_error)
    }

    /// 토큰 검증 및 Claims 추출
    ///
    /// 용도가 다른 토큰(예: Access 자리에 Refresh)은 거부합니다.
    pub fn validate(&self, token: &str, expected: TokenType) -> Result<TokenClaims> {
        let key = PasetoSymmetricKey::<V4, Local>::from(Key::from(self.key));
        let value = PasetoParser::<V4, Local>::default()
            .parse(token.trim(), &key)
            .map_err(parse_error)?;

        let claims: TokenClaims = serde_json::from_value(value)?;

        if claims.token_type != expected {
            return Err(Error::InvalidToken {
                reason: format!("expected {} token", expected.as_str()),
            });
        }

        Ok(claims)
    }
}

fn parse_error(e: GenericParserError) -> Error {
    match e {
        GenericParserError::ClaimError {
            source: PasetoClaimError::Expired,
        } => Error::TokenExpired,
        other => Error::InvalidToken {
            reason: other.to_string(),
        },
    }
}

fn issue_error(e: impl std::fmt::Display) -> Error {
    Error::TokenIssue {
        message: e.to_string(),
    }
}

fn parse_key_material(raw: &str) -> Option<[u8; 32]> {
    let trimmed = raw.trim();

    if trimmed.len() == 64 && trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        let bytes = decode_hex(trimmed)?;
        return bytes.as_slice().try_into().ok();
    }

    if let Ok(bytes) = general_purpose::URL_SAFE_NO_PAD.decode(trimmed) {
        if bytes.len() == 32 {
            return bytes.as_slice().try_into().ok();
        }
    }

    if let Ok(bytes) = general_purpose::STANDARD.decode(trimmed) {
        if bytes.len() == 32 {
            return bytes.as_slice().try_into().ok();
        }
    }

    let raw_bytes = trimmed.as_bytes();
    if raw_bytes.len() == 32 {
        return raw_bytes.try_into().ok();
    }

    None
}

fn decode_hex(input: &str) -> Option<Vec<u8>> {
    if input.len() % 2 != 0 {
        return None;
    }

    let mut bytes = Vec::with_capacity(input.len() / 2);
    let mut chars = input.chars();
    while let (Some(h), Some(l)) = (chars.next(), chars.next()) {
        let hi = h.to_digit(16)?;
        let lo = l.to_digit(16)?;
        bytes.push(((hi << 4) | lo) as u8);
    }
    Some(bytes)
}
