mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
use pillbox_domain::{Reminder, ID};
pub use postgres::PostgresReminderRepo;

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>>;
    async fn find_active_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>>;
    /// Active `Reminder`s of active `User`s that were never scheduled or
    /// are scheduled at or before `now`, the earliest first and the
    /// unscheduled ones last
    async fn find_due(&self, now: i64) -> anyhow::Result<Vec<Reminder>>;
    async fn update_next_send_at(&self, reminder_id: &ID, next_send_at: i64) -> anyhow::Result<()>;
    async fn update_last_sent_at(&self, reminder_id: &ID, last_sent_at: i64) -> anyhow::Result<()>;
    async fn delete(&self, reminder_id: &ID) -> Option<Reminder>;
}

#[cfg(test)]
mod tests {
    use crate::{setup_inmemory_context, PillboxContext};
    use pillbox_domain::{Recurrence, Reminder, User, ID};

    const HOUR: i64 = 1000 * 60 * 60;

    async fn insert_user(ctx: &PillboxContext, is_active: bool) -> User {
        let mut user = User::new(0);
        user.is_active = is_active;
        ctx.repos.users.insert(&user).await.expect("To insert user");
        user
    }

    async fn insert_reminder(ctx: &PillboxContext, user: &User, next_send_at: Option<i64>) -> Reminder {
        let mut reminder = Reminder::new(
            user.id.clone(),
            "Magnesium".into(),
            Recurrence::Custom { interval_hours: 6 },
            0,
        );
        reminder.next_send_at = next_send_at;
        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .expect("To insert reminder");
        reminder
    }

    #[tokio::test]
    async fn finds_due_reminders_in_order() {
        let ctx = setup_inmemory_context();
        let user = insert_user(&ctx, true).await;
        let now = 10 * HOUR;

        let later = insert_reminder(&ctx, &user, Some(now - HOUR)).await;
        let unscheduled = insert_reminder(&ctx, &user, None).await;
        let earliest = insert_reminder(&ctx, &user, Some(now - 2 * HOUR)).await;
        let exactly_now = insert_reminder(&ctx, &user, Some(now)).await;
        let _future = insert_reminder(&ctx, &user, Some(now + 1)).await;
        let mut inactive = insert_reminder(&ctx, &user, Some(now - HOUR)).await;
        inactive.is_active = false;
        ctx.repos.reminders.save(&inactive).await.expect("To save");

        let due = ctx.repos.reminders.find_due(now).await.expect("To find due");
        let due_ids = due.into_iter().map(|r| r.id).collect::<Vec<_>>();
        assert_eq!(
            due_ids,
            vec![earliest.id, later.id, exactly_now.id, unscheduled.id]
        );
    }

    #[tokio::test]
    async fn skips_reminders_of_inactive_users() {
        let ctx = setup_inmemory_context();
        let active = insert_user(&ctx, true).await;
        let inactive = insert_user(&ctx, false).await;

        let due = insert_reminder(&ctx, &active, Some(0)).await;
        insert_reminder(&ctx, &inactive, Some(0)).await;

        let found = ctx.repos.reminders.find_due(HOUR).await.expect("To find due");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, due.id);
    }

    #[tokio::test]
    async fn updates_single_columns() {
        let ctx = setup_inmemory_context();
        let user = insert_user(&ctx, true).await;
        let reminder = insert_reminder(&ctx, &user, Some(HOUR)).await;

        ctx.repos
            .reminders
            .update_next_send_at(&reminder.id, 7 * HOUR)
            .await
            .expect("To update next send at");
        ctx.repos
            .reminders
            .update_last_sent_at(&reminder.id, HOUR)
            .await
            .expect("To update last sent at");

        let found = ctx
            .repos
            .reminders
            .find(&reminder.id)
            .await
            .expect("To find reminder");
        assert_eq!(found.next_send_at, Some(7 * HOUR));
        assert_eq!(found.last_sent_at, Some(HOUR));
        assert_eq!(found.title, reminder.title);

        assert!(ctx
            .repos
            .reminders
            .update_next_send_at(&ID::default(), HOUR)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn finds_reminders_by_user() {
        let ctx = setup_inmemory_context();
        let user = insert_user(&ctx, true).await;
        let other_user = insert_user(&ctx, true).await;
        let active = insert_reminder(&ctx, &user, None).await;
        let mut inactive = insert_reminder(&ctx, &user, None).await;
        inactive.is_active = false;
        ctx.repos.reminders.save(&inactive).await.expect("To save");
        insert_reminder(&ctx, &other_user, None).await;

        let all = ctx
            .repos
            .reminders
            .find_by_user(&user.id)
            .await
            .expect("To find reminders");
        assert_eq!(all.len(), 2);

        let only_active = ctx
            .repos
            .reminders
            .find_active_by_user(&user.id)
            .await
            .expect("To find reminders");
        assert_eq!(only_active.len(), 1);
        assert_eq!(only_active[0].id, active.id);

        assert!(ctx.repos.reminders.delete(&active.id).await.is_some());
        assert!(ctx.repos.reminders.find(&active.id).await.is_none());
    }
}
