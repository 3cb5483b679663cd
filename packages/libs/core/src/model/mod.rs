//! 도메인 모델
//!
//! - `article`: 뉴스 기사, 상태, 칼럼 태그
//! - `user`: 직원/클라이언트 사용자 레코드
//! - `principal`: 정책 평가용 인증 주체

mod article;
mod principal;
mod user;

pub use article::{
    deserialize_blank_column, Article, ArticleId, ArticleInput, ArticlePatch, ArticleStatus,
    ColumnTag, SUBTITLE_MAX_LEN, TITLE_MAX_LEN,
};
pub use principal::Principal;
pub use user::{normalize_email, NewUser, User, UserId, UserPatch, UserProfile, NAME_MAX_LEN};
