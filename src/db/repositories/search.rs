use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use tracing::info;

use crate::entities::{prelude::*, session_searches};
use crate::models::issue::{IssueTag, decode_tags, encode_tags};
use crate::models::session::SessionSearch;

pub struct SearchRepository {
    conn: DatabaseConnection,
}

impl SearchRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model_to_search(model: session_searches::Model) -> SessionSearch {
        SessionSearch {
            session_id: model.session_id,
            query: model.query,
            issues: decode_tags(Some(&model.issues_filter)),
            max_results_requested: model.max_results_requested,
            checked_websites_count: model.checked_websites_count,
            last_search_cursor: model.last_search_cursor,
            is_completed: model.completed_at.is_some(),
        }
    }

    pub async fn get_by_session(&self, session_id: i32) -> anyhow::Result<Option<SessionSearch>> {
        let model = SessionSearches::find()
            .filter(session_searches::Column::SessionId.eq(session_id))
            .one(&self.conn)
            .await?;

        Ok(model.map(Self::map_model_to_search))
    }

    /// Single atomic insert-or-update keyed on the unique `session_id`
    /// column. The conflict branch only replaces the caller-owned fields;
    /// the worker-owned progress columns are never listed, so they survive
    /// reconfiguration untouched.
    pub async fn upsert(
        &self,
        session_id: i32,
        query: &str,
        issues: &[IssueTag],
        max_results: i32,
    ) -> anyhow::Result<SessionSearch> {
        let active_model = session_searches::ActiveModel {
            session_id: Set(session_id),
            query: Set(query.to_string()),
            issues_filter: Set(encode_tags(issues)?),
            max_results_requested: Set(max_results),
            checked_websites_count: Set(0),
            status: Set("pending".to_string()),
            ..Default::default()
        };

        SessionSearches::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(session_searches::Column::SessionId)
                    .update_columns([
                        session_searches::Column::Query,
                        session_searches::Column::IssuesFilter,
                        session_searches::Column::MaxResultsRequested,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        let model = SessionSearches::find()
            .filter(session_searches::Column::SessionId.eq(session_id))
            .one(&self.conn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("search row missing after upsert for session {session_id}"))?;

        info!("Configured search for session {}: {:?}", session_id, model.query);
        Ok(Self::map_model_to_search(model))
    }

    /// Worker-side progress write: how many websites have been checked and
    /// where to resume from.
    pub async fn record_progress(
        &self,
        session_id: i32,
        checked_websites_count: i32,
        last_search_cursor: Option<&str>,
    ) -> anyhow::Result<()> {
        SessionSearches::update_many()
            .col_expr(
                session_searches::Column::CheckedWebsitesCount,
                sea_orm::sea_query::Expr::value(checked_websites_count),
            )
            .col_expr(
                session_searches::Column::LastSearchCursor,
                sea_orm::sea_query::Expr::value(last_search_cursor.map(ToString::to_string)),
            )
            .filter(session_searches::Column::SessionId.eq(session_id))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    /// Worker-side completion stamp; its presence is what flips
    /// `is_completed` on the session and the search.
    pub async fn complete(
        &self,
        session_id: i32,
        completed_at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        SessionSearches::update_many()
            .col_expr(
                session_searches::Column::CompletedAt,
                sea_orm::sea_query::Expr::value(completed_at),
            )
            .col_expr(
                session_searches::Column::Status,
                sea_orm::sea_query::Expr::value("completed"),
            )
            .filter(session_searches::Column::SessionId.eq(session_id))
            .exec(&self.conn)
            .await?;
        Ok(())
    }
}
