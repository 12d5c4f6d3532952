
use sea_orm::DatabaseConnection;

use crate::db::{connect, ensure_tables};

/// Connect and make sure both tables exist; `None` when the database is
/// unreachable so the caller can skip.
pub(crate) async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = ensure_tables(&db).await {
        eprintln!("skip: cannot create tables: {}", e);
        return None;
    }
    Some(db)
}
