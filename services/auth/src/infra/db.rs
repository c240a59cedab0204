use std::sync::Arc;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, SqlErr, TransactionError, TransactionTrait,
};

use rentwise_auth_schema::{email_otps, outbox_events, profiles};
use rentwise_domain::id::{OtpId, UserId};

use crate::domain::repository::{OtpRepository, ProfileRepository};
use crate::domain::types::{OtpRecord, OutboxEvent, ProfileRole};
use crate::error::AuthServiceError;

// ── Email OTP repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: Arc<DatabaseConnection>,
}

impl OtpRepository for DbOtpRepository {
    async fn find_valid(
        &self,
        user_id: UserId,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, AuthServiceError> {
        let model = email_otps::Entity::find()
            .filter(email_otps::Column::UserId.eq(user_id.0))
            .filter(email_otps::Column::Code.eq(code))
            .filter(email_otps::Column::ExpiresAt.gt(now))
            .order_by_desc(email_otps::Column::CreatedAt)
            .one(self.db.as_ref())
            .await
            .context("find valid email otp")?;
        Ok(model.map(otp_from_model))
    }

    async fn consume(&self, id: OtpId, now: DateTime<Utc>) -> Result<bool, AuthServiceError> {
        // Single conditional DELETE: of two racing callers only one sees a row affected.
        let result = email_otps::Entity::delete_many()
            .filter(email_otps::Column::Id.eq(id.0))
            .filter(email_otps::Column::ExpiresAt.gt(now))
            .exec(self.db.as_ref())
            .await
            .context("consume email otp")?;
        Ok(result.rows_affected == 1)
    }

    async fn replace_for_user(
        &self,
        record: &OtpRecord,
        event: &OutboxEvent,
    ) -> Result<(), AuthServiceError> {
        let result = self
            .db
            .transaction::<_, (), DbErr>(|txn| {
                let record = record.clone();
                let event = event.clone();
                Box::pin(async move {
                    email_otps::Entity::delete_many()
                        .filter(email_otps::Column::UserId.eq(record.user_id.0))
                        .exec(txn)
                        .await?;
                    insert_otp(txn, &record).await?;
                    insert_outbox_event(txn, &event).await?;
                    Ok(())
                })
            })
            .await;
        match result {
            Ok(()) => Ok(()),
            // email_otps.user_id references profiles.id
            Err(TransactionError::Transaction(e)) if is_missing_profile(&e) => {
                Err(AuthServiceError::ProfileNotFound)
            }
            Err(e) => Err(anyhow::Error::new(e)
                .context("replace email otp with outbox")
                .into()),
        }
    }
}

fn is_missing_profile(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}

async fn insert_otp(txn: &DatabaseTransaction, record: &OtpRecord) -> Result<(), DbErr> {
    let model = email_otps::ActiveModel {
        id: Set(record.id.0),
        user_id: Set(record.user_id.0),
        code: Set(record.code.clone()),
        expires_at: Set(record.expires_at),
        created_at: Set(record.created_at),
    };
    email_otps::Entity::insert(model)
        .exec_without_returning(txn)
        .await?;
    Ok(())
}

async fn insert_outbox_event(
    txn: &DatabaseTransaction,
    event: &OutboxEvent,
) -> Result<(), DbErr> {
    let now = Utc::now();
    let model = outbox_events::ActiveModel {
        id: Set(event.id),
        kind: Set(event.kind.clone()),
        payload: Set(event.payload.clone()),
        idempotency_key: Set(event.idempotency_key.clone()),
        attempts: Set(0),
        last_error: Set(None),
        created_at: Set(now),
        next_attempt_at: Set(now),
        processed_at: Set(None),
        failed_at: Set(None),
    };
    outbox_events::Entity::insert(model)
        .exec_without_returning(txn)
        .await?;
    Ok(())
}

fn otp_from_model(model: email_otps::Model) -> OtpRecord {
    OtpRecord {
        id: OtpId(model.id),
        user_id: UserId(model.user_id),
        code: model.code,
        expires_at: model.expires_at,
        created_at: model.created_at,
    }
}

// ── Profile repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: Arc<DatabaseConnection>,
}

impl ProfileRepository for DbProfileRepository {
    async fn find_role(&self, user_id: UserId) -> Result<Option<ProfileRole>, AuthServiceError> {
        let model = profiles::Entity::find_by_id(user_id.0)
            .one(self.db.as_ref())
            .await
            .context("find profile role")?;
        Ok(model.map(|m| ProfileRole {
            user_id: UserId(m.id),
            kind_of_user: m.kind_of_user,
        }))
    }
}
