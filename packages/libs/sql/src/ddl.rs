//! DDL 생성기
//!
//! 서비스 시작 시 실행할 CREATE TABLE/INDEX 문을 생성합니다.
//! 모두 `IF NOT EXISTS`이므로 여러 번 실행해도 안전합니다.

use sea_query::{ColumnDef, ForeignKey, ForeignKeyAction, Index, SqliteQueryBuilder, Table};

use crate::table::{Articles, Users};

/// 전체 스키마 DDL (실행 순서대로)
pub fn schema_statements() -> Vec<String> {
    vec![
        create_users(),
        create_articles(),
        Index::create()
            .if_not_exists()
            .name("idx_news_articles_status")
            .table(Articles::Table)
            .col(Articles::Status)
            .to_string(SqliteQueryBuilder),
        Index::create()
            .if_not_exists()
            .name("idx_news_articles_author_id")
            .table(Articles::Table)
            .col(Articles::AuthorId)
            .to_string(SqliteQueryBuilder),
    ]
}

fn create_users() -> String {
    Table::create()
        .table(Users::Table)
        .if_not_exists()
        .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
        .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
        .col(ColumnDef::new(Users::PasswordHash).string().not_null())
        .col(ColumnDef::new(Users::Name).string().not_null())
        .col(ColumnDef::new(Users::UserProfile).string().not_null())
        .col(ColumnDef::new(Users::EmployeeId).string().null())
        .col(ColumnDef::new(Users::IsAdmin).boolean().not_null().default(false))
        .col(ColumnDef::new(Users::Plan).string().null())
        .col(ColumnDef::new(Users::AccessibleColumns).string().not_null().default(""))
        .col(ColumnDef::new(Users::CreatedAt).string().not_null())
        .col(ColumnDef::new(Users::UpdatedAt).string().not_null())
        .to_string(SqliteQueryBuilder)
}

fn create_articles() -> String {
    Table::create()
        .table(Articles::Table)
        .if_not_exists()
        .col(ColumnDef::new(Articles::Id).string().not_null().primary_key())
        .col(ColumnDef::new(Articles::Title).string().not_null())
        .col(ColumnDef::new(Articles::Subtitle).text().not_null().default(""))
        .col(ColumnDef::new(Articles::DraftContent).text().not_null().default(""))
        .col(ColumnDef::new(Articles::PublishedContent).text().not_null().default(""))
        .col(ColumnDef::new(Articles::CreatedAt).string().not_null())
        .col(ColumnDef::new(Articles::UpdatedAt).string().not_null())
        .col(ColumnDef::new(Articles::OriginalPublicationAt).string().not_null())
        .col(ColumnDef::new(Articles::LastPublicationUpdateAt).string().not_null())
        .col(ColumnDef::new(Articles::AuthorId).string().null())
        .col(ColumnDef::new(Articles::Status).string().not_null())
        .col(ColumnDef::new(Articles::ColumnTag).string().null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_news_articles_author")
                .from(Articles::Table, Articles::AuthorId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::SetNull),
        )
        .to_string(SqliteQueryBuilder)
}
