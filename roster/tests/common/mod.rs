use migration::{Migrator, MigratorTrait};
use platform_db::{DatabaseSettings, DbPool, connect};

pub async fn setup_db() -> DbPool {
    let db = connect(&DatabaseSettings::new("sqlite::memory:"))
        .await
        .unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}
