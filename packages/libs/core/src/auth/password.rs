//! 비밀번호 해시
//!
//! PBKDF2-HMAC-SHA256으로 키를 유도합니다.
//! 저장 형식: `pbkdf2_sha256$<rounds>$<salt>$<digest>` (salt/digest는 base64url)

use base64::{engine::general_purpose, Engine as _};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

const SCHEME: &str = "pbkdf2_sha256";
const ROUNDS: u32 = 100_000;
const SALT_LEN: usize = 16;
const DIGEST_LEN: usize = 32;

/// 비밀번호 해시 생성
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let digest = derive(password.as_bytes(), &salt, ROUNDS);

    format!(
        "{}${}${}${}",
        SCHEME,
        ROUNDS,
        general_purpose::URL_SAFE_NO_PAD.encode(salt),
        general_purpose::URL_SAFE_NO_PAD.encode(digest)
    )
}

/// 비밀번호 검증
///
/// 형식이 잘못된 해시는 항상 불일치로 처리합니다.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let parts: Vec<&str> = stored.split('$').collect();
    let [scheme, rounds, salt, digest] = parts.as_slice() else {
        return false;
    };
    if *scheme != SCHEME {
        return false;
    }

    let Some(rounds) = rounds.parse::<u32>().ok().filter(|r| *r > 0) else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (
        general_purpose::URL_SAFE_NO_PAD.decode(salt),
        general_purpose::URL_SAFE_NO_PAD.decode(digest),
    ) else {
        return false;
    };

    let actual = derive(password.as_bytes(), &salt, rounds);
    bool::from(actual.as_slice().ct_eq(expected.as_slice()))
}

fn derive(password: &[u8], salt: &[u8], rounds: u32) -> [u8; DIGEST_LEN] {
    let mut digest = [0u8; DIGEST_LEN];
    pbkdf2_hmac::<Sha256>(password, salt, rounds, &mut digest);
    digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("admin_password");
        assert!(hash.starts_with("pbkdf2_sha256$100000$"));
        assert!(verify_password("admin_password", &hash));
        assert!(!verify_password("wrong_password", &hash));
    }

    #[test]
    fn test_salt_differs() {
        assert_ne!(hash_password("same"), hash_password("same"));
    }

    #[test]
    fn test_known_vector() {
        // RFC 7914 §11 PBKDF2-HMAC-SHA256 (c = 1, dkLen = 32 앞부분)
        let digest = derive(b"passwd", b"salt", 1);
        assert_eq!(
            &digest[..8],
            &[0x55, 0xac, 0x04, 0x6e, 0x56, 0xe3, 0x08, 0x9f]
        );
    }

    #[test]
    fn test_rounds_are_read_from_hash() {
        let salt = general_purpose::URL_SAFE_NO_PAD.encode(b"fixed-salt");
        let digest = general_purpose::URL_SAFE_NO_PAD.encode(derive(b"secret", b"fixed-salt", 3));
        let stored = format!("pbkdf2_sha256$3${}${}", salt, digest);

        assert!(verify_password("secret", &stored));
        assert!(!verify_password("secret", &stored.replacen("$3$", "$4$", 1)));
    }

    #[test]
    fn test_malformed_hash() {
        assert!(!verify_password("x", ""));
        assert!(!verify_password("x", "plaintext"));
        assert!(!verify_password("x", "md5$1$abc$def"));
        assert!(!verify_password("x", "pbkdf2_sha256$0$abc$def"));
        // 길이가 다른 digest
        let salt = general_purpose::URL_SAFE_NO_PAD.encode(b"s");
        assert!(!verify_password("x", &format!("pbkdf2_sha256$1${}$AAAA", salt)));
    }
}
