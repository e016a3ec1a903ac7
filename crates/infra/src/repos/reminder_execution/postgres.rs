use super::IReminderExecutionRepo;
use pillbox_domain::{ExecutionScope, ExecutionStatistics, ExecutionStatus, ReminderExecution, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::{error, warn};

pub struct PostgresReminderExecutionRepo {
    pool: PgPool,
}

impl PostgresReminderExecutionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderExecutionRaw {
    execution_uid: Uuid,
    reminder_uid: Uuid,
    user_uid: Uuid,
    status: String,
    sent_at: i64,
    confirmed_at: Option<i64>,
    created: i64,
}

#[derive(Debug, FromRow)]
struct ExecutionStatisticsRaw {
    total_sent: i64,
    total_confirmed: i64,
    total_skipped: i64,
}

impl From<ReminderExecutionRaw> for ReminderExecution {
    fn from(raw: ReminderExecutionRaw) -> Self {
        let status = raw.status.parse::<ExecutionStatus>().unwrap_or_else(|e| {
            warn!(
                "Execution: {} has an invalid status: {:?}, treating it as sent",
                raw.execution_uid, e
            );
            ExecutionStatus::Sent
        });
        Self {
            id: raw.execution_uid.into(),
            reminder_id: raw.reminder_uid.into(),
            user_id: raw.user_uid.into(),
            status,
            sent_at: raw.sent_at,
            confirmed_at: raw.confirmed_at,
            created: raw.created,
        }
    }
}

#[async_trait::async_trait]
impl IReminderExecutionRepo for PostgresReminderExecutionRepo {
    async fn insert(&self, execution: &ReminderExecution) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_executions
            (execution_uid, reminder_uid, user_uid, status, sent_at, confirmed_at, created)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(execution.id.inner_ref())
        .bind(execution.reminder_id.inner_ref())
        .bind(execution.user_id.inner_ref())
        .bind(execution.status.as_str())
        .bind(execution.sent_at)
        .bind(execution.confirmed_at)
        .bind(execution.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, execution_id: &ID) -> Option<ReminderExecution> {
        match sqlx::query_as::<_, ReminderExecutionRaw>(
            r#"
            SELECT * FROM reminder_executions AS e
            WHERE e.execution_uid = $1
            "#,
        )
        .bind(execution_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        {
            Ok(execution) => execution.map(|e| e.into()),
            Err(e) => {
                error!("Unable to find execution: {:?}. Error: {:?}", execution_id, e);
                None
            }
        }
    }

    async fn update_status(
        &self,
        execution_id: &ID,
        status: ExecutionStatus,
        confirmed_at: Option<i64>,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE reminder_executions
            SET status = $2,
            confirmed_at = $3
            WHERE execution_uid = $1
            "#,
        )
        .bind(execution_id.inner_ref())
        .bind(status.as_str())
        .bind(confirmed_at)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() > 0)
    }

    async fn find_by_reminder(
        &self,
        reminder_id: &ID,
        limit: i64,
    ) -> anyhow::Result<Vec<ReminderExecution>> {
        let executions = sqlx::query_as::<_, ReminderExecutionRaw>(
            r#"
            SELECT * FROM reminder_executions AS e
            WHERE e.reminder_uid = $1
            ORDER BY e.sent_at DESC
            LIMIT $2
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(executions.into_iter().map(|e| e.into()).collect())
    }

    async fn find_by_user(
        &self,
        user_id: &ID,
        limit: i64,
    ) -> anyhow::Result<Vec<ReminderExecution>> {
        let executions = sqlx::query_as::<_, ReminderExecutionRaw>(
            r#"
            SELECT * FROM reminder_executions AS e
            WHERE e.user_uid = $1
            ORDER BY e.sent_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(executions.into_iter().map(|e| e.into()).collect())
    }

    async fn get_statistics(
        &self,
        scope: &ExecutionScope,
        from: i64,
        to: i64,
    ) -> anyhow::Result<ExecutionStatistics> {
        let (query, id) = match scope {
            ExecutionScope::User(user_id) => (
                r#"
                SELECT COUNT(*) FILTER (WHERE e.status = 'sent') AS total_sent,
                COUNT(*) FILTER (WHERE e.status = 'confirmed') AS total_confirmed,
                COUNT(*) FILTER (WHERE e.status = 'skipped') AS total_skipped
                FROM reminder_executions AS e
                WHERE e.user_uid = $1 AND e.sent_at >= $2 AND e.sent_at <= $3
                "#,
                user_id,
            ),
            ExecutionScope::Reminder(reminder_id) => (
                r#"
                SELECT COUNT(*) FILTER (WHERE e.status = 'sent') AS total_sent,
                COUNT(*) FILTER (WHERE e.status = 'confirmed') AS total_confirmed,
                COUNT(*) FILTER (WHERE e.status = 'skipped') AS total_skipped
                FROM reminder_executions AS e
                WHERE e.reminder_uid = $1 AND e.sent_at >= $2 AND e.sent_at <= $3
                "#,
                reminder_id,
            ),
        };

        let stats = sqlx::query_as::<_, ExecutionStatisticsRaw>(query)
            .bind(id.inner_ref())
            .bind(from)
            .bind(to)
            .fetch_one(&self.pool)
            .await?;

        Ok(ExecutionStatistics::new(
            stats.total_sent,
            stats.total_confirmed,
            stats.total_skipped,
        ))
    }
}
