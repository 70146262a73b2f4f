use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set,
};
use tracing::info;

use crate::entities::{prelude::*, session_searches, sessions};
use crate::models::session::{DEFAULT_SESSION_NAME, Session};

pub struct SessionRepository {
    conn: DatabaseConnection,
}

impl SessionRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model_to_session(
        model: sessions::Model,
        search: Option<&session_searches::Model>,
    ) -> Session {
        Session {
            id: model.id,
            created_at: model.created_at,
            name: model.name,
            is_configured: search.is_some(),
            is_completed: search.is_some_and(|s| s.completed_at.is_some()),
        }
    }

    pub async fn create(&self) -> anyhow::Result<Session> {
        let active_model = sessions::ActiveModel {
            created_at: Set(Utc::now()),
            name: Set(DEFAULT_SESSION_NAME.to_string()),
            ..Default::default()
        };

        let model = active_model.insert(&self.conn).await?;

        info!("Created session {}", model.id);
        Ok(Self::map_model_to_session(model, None))
    }

    pub async fn exists(&self, id: i32) -> anyhow::Result<bool> {
        Ok(Sessions::find_by_id(id).one(&self.conn).await?.is_some())
    }

    /// Page of sessions, newest first, each joined with its search row so
    /// the configured/completed flags can be derived without extra queries.
    pub async fn list(&self, offset: u64, limit: u64) -> anyhow::Result<Vec<Session>> {
        let rows = Sessions::find()
            .find_also_related(session_searches::Entity)
            .order_by_desc(sessions::Column::CreatedAt)
            .order_by_desc(sessions::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(session, search)| Self::map_model_to_session(session, search.as_ref()))
            .collect())
    }
}
