use std::path::Path;

use anyhow::Result;
use folio_chat_migration::{Migrator, MigratorTrait};
use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sea_orm::sqlx::Executor;
use sea_orm::{DatabaseConnection, SqlxSqliteConnector};
use tracing::debug;

fn database_path(data_dir: &Path) -> std::path::PathBuf {
    data_dir.join("data.sqlite")
}

/// 创建 SQLite 连接选项（WAL + busy_timeout）
fn create_sqlite_options(data_dir: &Path) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(database_path(data_dir))
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30))
        .pragma("cache_size", "-16384")
        .pragma("temp_store", "MEMORY")
}

async fn database_connection(data_dir: &Path) -> Result<DatabaseConnection> {
    // after_connect 回调确保每个连接都执行 PRAGMA
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute("PRAGMA busy_timeout = 30000;").await?;
                conn.execute("PRAGMA journal_mode = WAL;").await?;
                conn.execute("PRAGMA synchronous = NORMAL;").await?;
                Ok(())
            })
        })
        .connect_with(create_sqlite_options(data_dir))
        .await?;

    let connection = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);
    debug!("SQLite 连接池已创建，WAL 模式，30 秒 busy_timeout");
    Ok(connection)
}

async fn migrate_database(data_dir: &Path) -> Result<()> {
    if !database_path(data_dir).exists() {
        debug!("数据库文件不存在，将创建新的数据库");
    }

    // 迁移使用单连接池，避免多连接导致的迁移顺序问题
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(create_sqlite_options(data_dir))
        .await?;

    let connection = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool.clone());
    Migrator::up(&connection, None).await?;

    // 显式关闭，确保释放数据库锁
    pool.close().await;
    debug!("迁移完成，已关闭迁移连接池");

    Ok(())
}

/// 进行数据库迁移并获取数据库连接，供外部使用
pub async fn setup_database(data_dir: &Path) -> Result<DatabaseConnection> {
    if !data_dir.exists() {
        std::fs::create_dir_all(data_dir)?;
    }
    migrate_database(data_dir).await?;
    database_connection(data_dir).await
}
