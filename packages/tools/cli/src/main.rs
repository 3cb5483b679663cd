//! Newsdesk CLI (`nd`)
//!
//! 뉴스 API에 로그인해 기사와 사용자를 관리하는 명령줄 클라이언트입니다.

use clap::{Parser, Subcommand};

mod commands;
mod config;

use commands::http::Api;
use commands::news::{ArticleArgs, ListArgs};
use commands::users::NewUserArgs;
use commands::OutputFormat;
use config::CliConfig;

#[derive(Parser)]
#[command(name = "nd")]
#[command(author, version, about = "Newsdesk CLI - client for the news API", long_about = None)]
struct Cli {
    /// Server URL (overrides NEWSDESK_URL and saved config)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    // ─────────────────────────────────────────────────────────────────────────
    // Auth
    // ─────────────────────────────────────────────────────────────────────────
    /// Obtain and save tokens
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Remove saved tokens
    Logout,

    /// Register a new client account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        plan: String,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Resources
    // ─────────────────────────────────────────────────────────────────────────
    /// Manage news articles
    News {
        #[command(subcommand)]
        action: NewsAction,
    },

    /// Manage users (admin only)
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
}

#[derive(Subcommand)]
enum NewsAction {
    /// List visible articles
    List {
        /// DRAF or PUBD
        #[arg(long)]
        status: Option<String>,
        /// Column code (POW, TAX, HLTH, EN, LAB); empty for unset
        #[arg(long)]
        column: Option<String>,
        /// e.g. -created_at, title
        #[arg(long)]
        ordering: Option<String>,
        #[arg(long)]
        limit: Option<u64>,
        #[arg(long)]
        offset: Option<u64>,
    },
    /// Show an article
    Get { id: String },
    /// Create an article
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        subtitle: Option<String>,
        #[arg(long, default_value = "DRAF")]
        status: String,
        #[arg(long)]
        column: Option<String>,
        #[arg(long)]
        draft_content: Option<String>,
        #[arg(long)]
        published_content: Option<String>,
    },
    /// Update fields of an article
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        subtitle: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// Column code; empty to unset
        #[arg(long)]
        column: Option<String>,
        #[arg(long)]
        draft_content: Option<String>,
        #[arg(long)]
        published_content: Option<String>,
    },
    /// Delete an article
    Delete { id: String },
}

#[derive(Subcommand)]
enum UsersAction {
    /// List users
    List,
    /// Create a user
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
        /// EMP or CLI
        #[arg(long, default_value = "CLI")]
        profile: String,
        #[arg(long)]
        employee_id: Option<String>,
        #[arg(long)]
        admin: bool,
        #[arg(long)]
        plan: Option<String>,
        /// Accessible columns (comma-separated)
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,
    },
    /// Delete a user
    Delete { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // 설정 로드
    let mut config = CliConfig::load()?;

    // 서버 결정 (CLI 옵션 > NEWSDESK_URL > 저장값)
    let server = config.server_url(cli.server.as_deref());
    let format = cli.format;

    // 명령 실행
    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&mut config, &server, &email, &password).await
        }
        Commands::Logout => commands::auth::logout(&mut config),
        Commands::Register {
            email,
            password,
            name,
            plan,
        } => commands::auth::register(&server, format, &email, &password, &name, &plan).await,

        Commands::News { action } => {
            let mut api = Api::new(&mut config, server);
            match action {
                NewsAction::List {
                    status,
                    column,
                    ordering,
                    limit,
                    offset,
                } => {
                    let args = ListArgs {
                        status,
                        column,
                        ordering,
                        limit,
                        offset,
                    };
                    commands::news::list(&mut api, format, &args).await
                }
                NewsAction::Get { id } => commands::news::get(&mut api, format, &id).await,
                NewsAction::Create {
                    title,
                    subtitle,
                    status,
                    column,
                    draft_content,
                    published_content,
                } => {
                    let args = ArticleArgs {
                        title: Some(title),
                        subtitle,
                        status: Some(status),
                        column,
                        draft_content,
                        published_content,
                    };
                    commands::news::create(&mut api, format, &args).await
                }
                NewsAction::Update {
                    id,
                    title,
                    subtitle,
                    status,
                    column,
                    draft_content,
                    published_content,
                } => {
                    let args = ArticleArgs {
                        title,
                        subtitle,
                        status,
                        column,
                        draft_content,
                        published_content,
                    };
                    commands::news::update(&mut api, format, &id, &args).await
                }
                NewsAction::Delete { id } => commands::news::delete(&mut api, &id).await,
            }
        }

        Commands::Users { action } => {
            let mut api = Api::new(&mut config, server);
            match action {
                UsersAction::List => commands::users::list(&mut api, format).await,
                UsersAction::Create {
                    email,
                    password,
                    name,
                    profile,
                    employee_id,
                    admin,
                    plan,
                    columns,
                } => {
                    let args = NewUserArgs {
                        email,
                        password,
                        name,
                        user_profile: profile,
                        employee_id,
                        is_admin: admin,
                        plan,
                        accessible_columns: columns,
                    };
                    commands::users::create(&mut api, format, &args).await
                }
                UsersAction::Delete { id } => commands::users::delete(&mut api, &id).await,
            }
        }
    }
}
