use super::IReminderRepo;
use pillbox_domain::{Recurrence, Reminder, TimeOfDay, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::{error, warn};

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    user_uid: Uuid,
    title: String,
    comment: Option<String>,
    image_url: Option<String>,
    kind: String,
    interval_hours: Option<i64>,
    time_of_day: Option<String>,
    is_active: bool,
    last_sent_at: Option<i64>,
    next_send_at: Option<i64>,
    created: i64,
    updated: i64,
}

/// Flattens a `Recurrence` into the `kind`, `interval_hours` and `time_of_day` columns
fn recurrence_columns(recurrence: &Recurrence) -> (&'static str, Option<i64>, Option<String>) {
    match recurrence {
        Recurrence::Custom { interval_hours } => (recurrence.kind(), Some(*interval_hours), None),
        Recurrence::Specific { time_of_day } => {
            (recurrence.kind(), None, Some(time_of_day.to_string()))
        }
        _ => (recurrence.kind(), None, None),
    }
}

fn parse_recurrence(
    kind: &str,
    interval_hours: Option<i64>,
    time_of_day: Option<&str>,
) -> Option<Recurrence> {
    let recurrence = match kind {
        "daily" => Recurrence::Daily,
        "weekly" => Recurrence::Weekly,
        "custom" => Recurrence::Custom {
            interval_hours: interval_hours?,
        },
        "specific" => Recurrence::Specific {
            time_of_day: time_of_day?.parse::<TimeOfDay>().ok()?,
        },
        _ => return None,
    };
    if recurrence.is_valid() {
        Some(recurrence)
    } else {
        None
    }
}

impl From<ReminderRaw> for Reminder {
    fn from(raw: ReminderRaw) -> Self {
        let recurrence = parse_recurrence(
            &raw.kind,
            raw.interval_hours,
            raw.time_of_day.as_deref(),
        )
        .unwrap_or_else(|| {
            warn!(
                "Reminder: {} has an invalid recurrence of kind: {}, falling back to every 24 hours",
                raw.reminder_uid, raw.kind
            );
            Recurrence::Custom { interval_hours: 24 }
        });

        Self {
            id: raw.reminder_uid.into(),
            user_id: raw.user_uid.into(),
            title: raw.title,
            comment: raw.comment,
            image_url: raw.image_url,
            recurrence,
            is_active: raw.is_active,
            last_sent_at: raw.last_sent_at,
            next_send_at: raw.next_send_at,
            created: raw.created,
            updated: raw.updated,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        let (kind, interval_hours, time_of_day) = recurrence_columns(&reminder.recurrence);
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, user_uid, title, comment, image_url, kind, interval_hours, time_of_day,
             is_active, last_sent_at, next_send_at, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.user_id.inner_ref())
        .bind(&reminder.title)
        .bind(&reminder.comment)
        .bind(&reminder.image_url)
        .bind(kind)
        .bind(interval_hours)
        .bind(time_of_day)
        .bind(reminder.is_active)
        .bind(reminder.last_sent_at)
        .bind(reminder.next_send_at)
        .bind(reminder.created)
        .bind(reminder.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        let (kind, interval_hours, time_of_day) = recurrence_columns(&reminder.recurrence);
        sqlx::query(
            r#"
            UPDATE reminders
            SET title = $2,
            comment = $3,
            image_url = $4,
            kind = $5,
            interval_hours = $6,
            time_of_day = $7,
            is_active = $8,
            next_send_at = $9,
            updated = $10
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(&reminder.title)
        .bind(&reminder.comment)
        .bind(&reminder.image_url)
        .bind(kind)
        .bind(interval_hours)
        .bind(time_of_day)
        .bind(reminder.is_active)
        .bind(reminder.next_send_at)
        .bind(reminder.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        match sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        {
            Ok(reminder) => reminder.map(|r| r.into()),
            Err(e) => {
                error!("Unable to find reminder: {:?}. Error: {:?}", reminder_id, e);
                None
            }
        }
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.user_uid = $1
            ORDER BY r.created
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn find_active_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.user_uid = $1 AND r.is_active
            ORDER BY r.created
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn find_due(&self, now: i64) -> anyhow::Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT r.* FROM reminders AS r
            INNER JOIN users AS u ON u.user_uid = r.user_uid
            WHERE r.is_active AND u.is_active AND
            (r.next_send_at IS NULL OR r.next_send_at <= $1)
            ORDER BY r.next_send_at ASC NULLS LAST
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn update_next_send_at(&self, reminder_id: &ID, next_send_at: i64) -> anyhow::Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE reminders
            SET next_send_at = $2
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(next_send_at)
        .execute(&self.pool)
        .await?;

        if res.rows_affected() == 0 {
            anyhow::bail!("Reminder: {} not found", reminder_id);
        }
        Ok(())
    }

    async fn update_last_sent_at(&self, reminder_id: &ID, last_sent_at: i64) -> anyhow::Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE reminders
            SET last_sent_at = $2
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(last_sent_at)
        .execute(&self.pool)
        .await?;

        if res.rows_affected() == 0 {
            anyhow::bail!("Reminder: {} not found", reminder_id);
        }
        Ok(())
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        match sqlx::query_as::<_, ReminderRaw>(
            r#"
            DELETE FROM reminders AS r
            WHERE r.reminder_uid = $1
            RETURNING *
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        {
            Ok(reminder) => reminder.map(|r| r.into()),
            Err(e) => {
                error!("Unable to delete reminder: {:?}. Error: {:?}", reminder_id, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recurrence_columns_round_trip() {
        let recurrences = vec![
            Recurrence::Daily,
            Recurrence::Weekly,
            Recurrence::Custom { interval_hours: 8 },
            Recurrence::Specific {
                time_of_day: TimeOfDay::new(21, 30).expect("Valid time of day"),
            },
        ];
        for recurrence in recurrences {
            let (kind, interval_hours, time_of_day) = recurrence_columns(&recurrence);
            assert_eq!(
                parse_recurrence(kind, interval_hours, time_of_day.as_deref()),
                Some(recurrence)
            );
        }
    }

    #[test]
    fn rejects_inconsistent_columns() {
        assert_eq!(parse_recurrence("custom", None, None), None);
        assert_eq!(parse_recurrence("custom", Some(0), None), None);
        assert_eq!(parse_recurrence("specific", None, Some("25:00")), None);
        assert_eq!(parse_recurrence("specific", None, None), None);
        assert_eq!(parse_recurrence("monthly", None, None), None);
    }
}
