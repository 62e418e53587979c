pub mod fixtures;

use sea_orm::{ConnectionTrait, DbConn, DbErr};

const ACCOUNTS: &str =
    include_str!("../../../homeroom-server/migrations/sqlite/2025-09-01-000000_create_accounts/up.sql");
const SURVEYS: &str = include_str!("../../../homeroom-server/migrations/sqlite/2025-09-01-000100_create_surveys/up.sql");

pub async fn setup_schema(db: &DbConn) -> Result<(), DbErr> {
    db.execute_unprepared(ACCOUNTS).await?;
    db.execute_unprepared(SURVEYS).await?;
    Ok(())
}
