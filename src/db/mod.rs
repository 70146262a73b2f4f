use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::models::issue::IssueTag;
use crate::models::result::{ResultInput, ResultStatus, SessionResult};
use crate::models::session::{Session, SessionSearch};

pub mod migrator;
pub mod repositories;

/// Facade over the pooled connection. Constructed once at startup, handed
/// into the API as an explicit dependency, and closed on shutdown.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // An in-memory sqlite db exists per connection; pooling beyond one
        // would hand out empty databases without the migrated schema.
        let max_connections = if in_memory { 1 } else { max_connections };
        let min_connections = min_connections.min(max_connections);

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    pub async fn close(&self) -> Result<()> {
        self.conn.clone().close().await?;
        Ok(())
    }

    fn session_repo(&self) -> repositories::session::SessionRepository {
        repositories::session::SessionRepository::new(self.conn.clone())
    }

    fn search_repo(&self) -> repositories::search::SearchRepository {
        repositories::search::SearchRepository::new(self.conn.clone())
    }

    fn result_repo(&self) -> repositories::result::ResultRepository {
        repositories::result::ResultRepository::new(self.conn.clone())
    }

    pub async fn create_session(&self) -> Result<Session> {
        self.session_repo().create().await
    }

    pub async fn session_exists(&self, id: i32) -> Result<bool> {
        self.session_repo().exists(id).await
    }

    pub async fn list_sessions(&self, offset: u64, limit: u64) -> Result<Vec<Session>> {
        self.session_repo().list(offset, limit).await
    }

    pub async fn get_search(&self, session_id: i32) -> Result<Option<SessionSearch>> {
        self.search_repo().get_by_session(session_id).await
    }

    pub async fn upsert_search(
        &self,
        session_id: i32,
        query: &str,
        issues: &[IssueTag],
        max_results: i32,
    ) -> Result<SessionSearch> {
        self.search_repo()
            .upsert(session_id, query, issues, max_results)
            .await
    }

    pub async fn record_search_progress(
        &self,
        session_id: i32,
        checked_websites_count: i32,
        last_search_cursor: Option<&str>,
    ) -> Result<()> {
        self.search_repo()
            .record_progress(session_id, checked_websites_count, last_search_cursor)
            .await
    }

    pub async fn complete_search(
        &self,
        session_id: i32,
        completed_at: DateTime<Utc>,
    ) -> Result<()> {
        self.search_repo().complete(session_id, completed_at).await
    }

    pub async fn list_results(
        &self,
        session_id: i32,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<SessionResult>> {
        self.result_repo()
            .list_for_session(session_id, offset, limit)
            .await
    }

    pub async fn update_result(
        &self,
        session_id: i32,
        result_id: i32,
        tier: Option<f64>,
        status: Option<ResultStatus>,
    ) -> Result<Option<SessionResult>> {
        self.result_repo()
            .update(session_id, result_id, tier, status)
            .await
    }

    pub async fn insert_result(&self, input: &ResultInput) -> Result<SessionResult> {
        self.result_repo().insert(input).await
    }
}
