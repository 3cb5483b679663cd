//! 테이블/컬럼 식별자

use sea_query::Iden;

/// `news_articles` 테이블
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Articles {
    Table,
    Id,
    Title,
    Subtitle,
    DraftContent,
    PublishedContent,
    CreatedAt,
    UpdatedAt,
    OriginalPublicationAt,
    LastPublicationUpdateAt,
    AuthorId,
    Status,
    ColumnTag,
}

impl Articles {
    /// SELECT 대상 컬럼 (순서 고정)
    pub const COLUMNS: [Articles; 12] = [
        Articles::Id,
        Articles::Title,
        Articles::Subtitle,
        Articles::DraftContent,
        Articles::PublishedContent,
        Articles::CreatedAt,
        Articles::UpdatedAt,
        Articles::OriginalPublicationAt,
        Articles::LastPublicationUpdateAt,
        Articles::AuthorId,
        Articles::Status,
        Articles::ColumnTag,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Articles::Table => "news_articles",
            Articles::Id => "id",
            Articles::Title => "title",
            Articles::Subtitle => "subtitle",
            Articles::DraftContent => "draft_content",
            Articles::PublishedContent => "published_content",
            Articles::CreatedAt => "created_at",
            Articles::UpdatedAt => "updated_at",
            Articles::OriginalPublicationAt => "original_publication_at",
            Articles::LastPublicationUpdateAt => "last_publication_update_at",
            Articles::AuthorId => "author_id",
            Articles::Status => "status",
            Articles::ColumnTag => "column_tag",
        }
    }
}

impl Iden for Articles {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "{}", self.as_str()).unwrap();
    }
}

/// `users` 테이블
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Users {
    Table,
    Id,
    Email,
    PasswordHash,
    Name,
    UserProfile,
    EmployeeId,
    IsAdmin,
    Plan,
    AccessibleColumns,
    CreatedAt,
    UpdatedAt,
}

impl Users {
    /// SELECT 대상 컬럼 (순서 고정)
    pub const COLUMNS: [Users; 11] = [
        Users::Id,
        Users::Email,
        Users::PasswordHash,
        Users::Name,
        Users::UserProfile,
        Users::EmployeeId,
        Users::IsAdmin,
        Users::Plan,
        Users::AccessibleColumns,
        Users::CreatedAt,
        Users::UpdatedAt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Users::Table => "users",
            Users::Id => "id",
            Users::Email => "email",
            Users::PasswordHash => "password_hash",
            Users::Name => "name",
            Users::UserProfile => "user_profile",
            Users::EmployeeId => "employee_id",
            Users::IsAdmin => "is_admin",
            Users::Plan => "plan",
            Users::AccessibleColumns => "accessible_columns",
            Users::CreatedAt => "created_at",
            Users::UpdatedAt => "updated_at",
        }
    }
}

impl Iden for Users {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "{}", self.as_str()).unwrap();
    }
}
