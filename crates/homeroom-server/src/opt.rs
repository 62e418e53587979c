use clap::{Args, Parser, Subcommand};
use homeroom_core::account::TeacherAccount;
use std::net::IpAddr;
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "homeroom", about = "Run the homeroom survey server")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    Run(Run),
}

#[derive(Debug, Clone, Args)]
pub(crate) struct Db {
    #[arg(long, env = "DATABASE_URL", help = "sqlite://<path>?mode=rwc or postgres://...")]
    pub(crate) db_url: Url,

    #[arg(long, help = "Min connections")]
    pub(crate) db_min_connections: Option<u32>,

    #[arg(long, help = "Max connections")]
    pub(crate) db_max_connections: Option<u32>,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct Teacher {
    #[arg(long, env = "DEFAULT_TEACHER_EMAIL")]
    pub(crate) teacher_email: String,

    #[arg(long, env = "DEFAULT_TEACHER_PASSWORD", hide_env_values = true)]
    pub(crate) teacher_password: String,

    #[arg(long, env = "DEFAULT_TEACHER_FIRST_NAME", default_value = "School")]
    pub(crate) teacher_first_name: String,

    #[arg(long, env = "DEFAULT_TEACHER_LAST_NAME", default_value = "Teacher")]
    pub(crate) teacher_last_name: String,
}

impl From<Teacher> for TeacherAccount {
    fn from(teacher: Teacher) -> Self {
        TeacherAccount::builder()
            .email(teacher.teacher_email)
            .password(teacher.teacher_password)
            .first_name(teacher.teacher_first_name)
            .last_name(teacher.teacher_last_name)
            .build()
    }
}

#[derive(Debug, Clone, Parser)]
pub(crate) struct Run {
    #[arg(long)]
    pub(crate) host: Option<IpAddr>,

    #[arg(short, long)]
    pub(crate) port: Option<u16>,

    #[arg(long, value_delimiter = ',', help = "Origins allowed to call the api from a browser")]
    pub(crate) origins: Vec<String>,

    #[command(flatten)]
    pub(crate) db: Db,

    #[command(flatten)]
    pub(crate) teacher: Teacher,

    #[arg(long = "sentry-dsn", env = "SENTRY_DSN", help = "Sentry url")]
    pub(crate) sentry_dsn: Option<String>,

    #[arg(
        long,
        default_value = "dev",
        help = "Set the environment used by sentry and prometheus"
    )]
    pub(crate) env: String,
}
