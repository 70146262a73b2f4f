use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::entities::{prelude::*, session_results};
use crate::models::issue::{decode_tags, encode_tags};
use crate::models::result::{ResultInput, ResultStatus, SessionResult};

pub struct ResultRepository {
    conn: DatabaseConnection,
}

impl ResultRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model_to_result(model: session_results::Model) -> anyhow::Result<SessionResult> {
        Ok(SessionResult {
            id: model.id,
            created_at: model.created_at,
            session_id: model.session_id,
            url: model.url,
            domain: model.domain,
            page_count: model.page_count,
            tier: model.tier,
            issues_detected: decode_tags(model.issues_detected.as_deref()),
            lighthouse_json: model.lighthouse_json,
            contact_email: model.contact_email,
            status: ResultStatus::from_db(&model.status)?,
        })
    }

    pub async fn list_for_session(
        &self,
        session_id: i32,
        offset: u64,
        limit: u64,
    ) -> anyhow::Result<Vec<SessionResult>> {
        let rows = SessionResults::find()
            .filter(session_results::Column::SessionId.eq(session_id))
            .order_by_desc(session_results::Column::CreatedAt)
            .order_by_desc(session_results::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.conn)
            .await?;

        rows.into_iter().map(Self::map_model_to_result).collect()
    }

    /// Partial update of a single result. Returns `None` when the row does
    /// not exist or belongs to a different session; both look the same to
    /// the caller. An update with neither field performs no write and hands
    /// back the row as stored.
    pub async fn update(
        &self,
        session_id: i32,
        result_id: i32,
        tier: Option<f64>,
        status: Option<ResultStatus>,
    ) -> anyhow::Result<Option<SessionResult>> {
        let Some(model) = SessionResults::find_by_id(result_id).one(&self.conn).await? else {
            return Ok(None);
        };
        if model.session_id != session_id {
            return Ok(None);
        }

        if tier.is_none() && status.is_none() {
            return Self::map_model_to_result(model).map(Some);
        }

        let mut active_model = model.into_active_model();
        if let Some(tier) = tier {
            active_model.tier = Set(tier);
        }
        if let Some(status) = status {
            active_model.status = Set(status.as_str().to_string());
        }

        let updated = active_model.update(&self.conn).await?;
        Self::map_model_to_result(updated).map(Some)
    }

    /// Worker-side insert for an audited website.
    pub async fn insert(&self, input: &ResultInput) -> anyhow::Result<SessionResult> {
        let active_model = session_results::ActiveModel {
            created_at: Set(Utc::now()),
            session_id: Set(input.session_id),
            url: Set(input.url.clone()),
            domain: Set(input.domain.clone()),
            page_count: Set(input.page_count),
            tier: Set(input.tier),
            issues_detected: Set(Some(encode_tags(&input.issues_detected)?)),
            lighthouse_json: Set(input.lighthouse_json.clone()),
            contact_email: Set(input.contact_email.clone()),
            status: Set(input.status.as_str().to_string()),
            ..Default::default()
        };

        let model = active_model.insert(&self.conn).await?;
        Self::map_model_to_result(model)
    }
}
