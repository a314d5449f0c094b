use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};

pub struct AuditRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AuditRepository<'a, C> {
    /// Creates a new instance of [`AuditRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn record(
        &self,
        actor: &str,
        action: &str,
        source_type: &str,
        source_id: i32,
        detail: serde_json::Value,
    ) -> Result<entity::audit_record::Model, DbErr> {
        entity::audit_record::ActiveModel {
            actor: ActiveValue::Set(actor.to_string()),
            action: ActiveValue::Set(action.to_string()),
            source_type: ActiveValue::Set(source_type.to_string()),
            source_id: ActiveValue::Set(source_id),
            detail: ActiveValue::Set(detail),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
