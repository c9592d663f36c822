use crate::repository::adalo::RecordStore;
use crate::repository::order::{Order, OrderPatch};
use crate::repository::user::User;
use crate::utils::{notification::sms::SmsSender, phone};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SweepSummary {
    pub date: NaiveDate,
    pub pickup_reminders_sent: u32,
    pub return_reminders_sent: u32,
}

/// Only the two collection listings are fatal; everything past the join is
/// recovered per order so one bad record cannot block the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    OrdersFetchFailed,
    UsersFetchFailed,
}

#[derive(Clone, Copy, Debug)]
enum ReminderEvent {
    Pickup,
    Return,
}

impl ReminderEvent {
    fn label(&self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Return => "return",
        }
    }
}

#[derive(Clone, Copy)]
enum Role {
    Renter,
    Lister,
}

/// Scan every order, send the due pickup/return reminders, and mark each
/// dispatched event so it is never notified twice. `as_of` overrides "today"
/// for tests and backfill runs; counters count successfully-sent messages,
/// not order-events.
///
/// At-least-once: the marker is written after the sends, so a crash between
/// send and write-back (or a failed write-back) can duplicate a send on the
/// next run.
pub async fn run_sweep(
    store: &dyn RecordStore,
    sms: &dyn SmsSender,
    as_of: Option<NaiveDate>,
) -> Result<SweepSummary, Error> {
    let date = as_of.unwrap_or_else(|| Utc::now().date_naive());

    let (orders, users) = tokio::try_join!(
        async {
            store.list_orders().await.map_err(|_| {
                tracing::error!("Aborting sweep: order listing failed");
                Error::OrdersFetchFailed
            })
        },
        async {
            store.list_users().await.map_err(|_| {
                tracing::error!("Aborting sweep: user listing failed");
                Error::UsersFetchFailed
            })
        },
    )?;

    tracing::info!(
        "Sweeping {} orders against {} users for {}",
        orders.len(),
        users.len(),
        date
    );

    let users_by_id: HashMap<String, User> =
        users.into_iter().map(|u| (u.id.clone(), u)).collect();

    let mut summary = SweepSummary {
        date,
        pickup_reminders_sent: 0,
        return_reminders_sent: 0,
    };

    for order in &orders {
        summary.pickup_reminders_sent +=
            process_event(store, sms, &users_by_id, order, ReminderEvent::Pickup, date).await;
        summary.return_reminders_sent +=
            process_event(store, sms, &users_by_id, order, ReminderEvent::Return, date).await;
    }

    Ok(summary)
}

/// Handle one (order, event) pair. Returns the number of messages that went
/// out. Whenever the event was due and unmarked, the marker is written once
/// afterwards, even if no party was eligible or a send failed.
async fn process_event(
    store: &dyn RecordStore,
    sms: &dyn SmsSender,
    users_by_id: &HashMap<String, User>,
    order: &Order,
    event: ReminderEvent,
    date: NaiveDate,
) -> u32 {
    if !order.is_paid {
        return 0;
    }

    let (due, already_notified) = match event {
        ReminderEvent::Pickup => (order.pickup_due, order.pickup_notified_at.is_some()),
        ReminderEvent::Return => (order.return_due, order.return_notified_at.is_some()),
    };

    let Some(due) = due else { return 0 };
    if due != date || already_notified {
        return 0;
    }

    let mut sent = 0;

    for (role, user_id) in [
        (Role::Renter, order.renter.as_deref()),
        (Role::Lister, order.lister.as_deref()),
    ] {
        let Some(user_id) = user_id else { continue };
        let Some(user) = users_by_id.get(user_id) else {
            tracing::debug!(
                "Order {}: no user record for reference {}",
                order.id,
                user_id
            );
            continue;
        };
        if !user.sms_opt_in {
            continue;
        }
        let Some(to) = user
            .phone_number
            .as_deref()
            .and_then(phone::normalize_us_phone)
        else {
            tracing::debug!("Order {}: user {} has no usable phone", order.id, user.id);
            continue;
        };

        match sms.send(&to, &message_for(event, role, due)).await {
            Ok(()) => sent += 1,
            Err(_) => {
                tracing::error!(
                    "Failed to send {} reminder for order {} to user {}",
                    event.label(),
                    order.id,
                    user.id
                );
            }
        }
    }

    let patch = match event {
        ReminderEvent::Pickup => OrderPatch::pickup_notified(Utc::now()),
        ReminderEvent::Return => OrderPatch::return_notified(Utc::now()),
    };
    if store.patch_order(&order.id, patch).await.is_err() {
        // The reminder will naturally go out again next run.
        tracing::error!(
            "Failed to mark {} reminder as sent for order {}",
            event.label(),
            order.id
        );
    }

    sent
}

fn message_for(event: ReminderEvent, role: Role, due: NaiveDate) -> String {
    let due = due.format("%Y-%m-%d");
    match (event, role) {
        (ReminderEvent::Pickup, Role::Renter) => format!(
            "GetSuited: Your item is scheduled for pickup today ({}). After you pick it up, open GetSuited and tap \"Confirm Pick Up.\"",
            due
        ),
        (ReminderEvent::Pickup, Role::Lister) => format!(
            "GetSuited: A renter is scheduled to pick up your item today ({}). Once they've collected it, open GetSuited to monitor the order status.",
            due
        ),
        (ReminderEvent::Return, Role::Renter) => format!(
            "GetSuited: Your item rental is due back today ({}). After you return it, open GetSuited and tap \"Mark Item as Returned.\"",
            due
        ),
        (ReminderEvent::Return, Role::Lister) => format!(
            "GetSuited: A renter is scheduled to return your item today ({}). Once you receive it, open GetSuited and tap \"Mark Item as Dropped Off,\" then tap \"Approve Return\" to finish the order.",
            due
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::adalo::Error as StoreError;
    use crate::utils::notification::sms;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeStore {
        orders: Vec<Order>,
        users: Vec<User>,
        fail_orders: bool,
        fail_users: bool,
        fail_patch: bool,
        patches: Mutex<Vec<(String, OrderPatch)>>,
    }

    impl FakeStore {
        fn new(orders: Vec<Order>, users: Vec<User>) -> Self {
            Self {
                orders,
                users,
                fail_orders: false,
                fail_users: false,
                fail_patch: false,
                patches: Mutex::new(vec![]),
            }
        }

        fn patches(&self) -> Vec<(String, OrderPatch)> {
            self.patches.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RecordStore for FakeStore {
        async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
            if self.fail_orders {
                return Err(StoreError::UnexpectedError);
            }
            Ok(self.orders.clone())
        }

        async fn list_users(&self) -> Result<Vec<User>, StoreError> {
            if self.fail_users {
                return Err(StoreError::UnexpectedError);
            }
            Ok(self.users.clone())
        }

        async fn patch_order(&self, id: &str, patch: OrderPatch) -> Result<(), StoreError> {
            if self.fail_patch {
                return Err(StoreError::UnexpectedError);
            }
            self.patches.lock().unwrap().push((id.to_string(), patch));
            Ok(())
        }
    }

    struct FakeSms {
        fail: bool,
        sent: Mutex<Vec<(String, String)>>,
    }

    impl FakeSms {
        fn new() -> Self {
            Self {
                fail: false,
                sent: Mutex::new(vec![]),
            }
        }

        fn sent(&self) -> Vec<(String, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SmsSender for FakeSms {
        async fn send(&self, to: &str, body: &str) -> sms::Result<()> {
            if self.fail {
                return Err(sms::Error::NotSent);
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), body.to_string()));
            Ok(())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn order(id: &str) -> Order {
        Order {
            id: id.to_string(),
            renter: None,
            lister: None,
            pickup_due: None,
            return_due: None,
            pickup_notified_at: None,
            return_notified_at: None,
            is_paid: true,
        }
    }

    fn user(id: &str, phone: &str, opted_in: bool) -> User {
        User {
            id: id.to_string(),
            phone_number: Some(phone.to_string()),
            sms_opt_in: opted_in,
        }
    }

    #[tokio::test]
    async fn sends_due_pickup_reminder_and_marks_order() {
        let mut a = order("a");
        a.renter = Some("r".to_string());
        a.pickup_due = Some(today());

        let store = FakeStore::new(vec![a], vec![user("r", "5550001111", true)]);
        let sms = FakeSms::new();

        let summary = run_sweep(&store, &sms, Some(today())).await.unwrap();

        assert_eq!(summary.pickup_reminders_sent, 1);
        assert_eq!(summary.return_reminders_sent, 0);

        let sent = sms.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "+15550001111");
        assert!(sent[0].1.contains("pickup today (2025-06-01)"));

        let patches = store.patches();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].0, "a");
        assert!(patches[0].1.pickup_sms_sent_at.is_some());
        assert!(patches[0].1.return_sms_sent_at.is_none());
    }

    #[tokio::test]
    async fn counts_one_message_per_recipient() {
        let mut a = order("a");
        a.renter = Some("r".to_string());
        a.lister = Some("l".to_string());
        a.return_due = Some(today());

        let store = FakeStore::new(
            vec![a],
            vec![
                user("r", "5550001111", true),
                user("l", "5550002222", true),
            ],
        );
        let sms = FakeSms::new();

        let summary = run_sweep(&store, &sms, Some(today())).await.unwrap();

        assert_eq!(summary.return_reminders_sent, 2);
        assert_eq!(sms.sent().len(), 2);
        // One event, one marker write.
        assert_eq!(store.patches().len(), 1);
    }

    #[tokio::test]
    async fn already_marked_events_send_nothing() {
        let mut b = order("b");
        b.renter = Some("r".to_string());
        b.return_due = Some(today());
        b.return_notified_at = Some("2025-05-31T12:00:00Z".to_string());

        let store = FakeStore::new(vec![b], vec![user("r", "5550001111", true)]);
        let sms = FakeSms::new();

        let summary = run_sweep(&store, &sms, Some(today())).await.unwrap();

        assert_eq!(summary.return_reminders_sent, 0);
        assert!(sms.sent().is_empty());
        assert!(store.patches().is_empty());
    }

    #[tokio::test]
    async fn mixed_batch_matches_expected_counts() {
        // Order A due for pickup with an opted-in renter; order B due for
        // return but already notified.
        let mut a = order("a");
        a.renter = Some("r".to_string());
        a.pickup_due = Some(today());

        let mut b = order("b");
        b.renter = Some("r".to_string());
        b.return_due = Some(today());
        b.return_notified_at = Some("2025-05-31T12:00:00Z".to_string());

        let store = FakeStore::new(vec![a, b], vec![user("r", "5550001111", true)]);
        let sms = FakeSms::new();

        let summary = run_sweep(&store, &sms, Some(today())).await.unwrap();

        assert_eq!(summary.pickup_reminders_sent, 1);
        assert_eq!(summary.return_reminders_sent, 0);
        assert_eq!(sms.sent().len(), 1);
    }

    #[tokio::test]
    async fn opted_out_or_phoneless_users_are_skipped_silently() {
        let mut a = order("a");
        a.renter = Some("optout".to_string());
        a.lister = Some("nophone".to_string());
        a.pickup_due = Some(today());

        let opted_out = user("optout", "5550001111", false);
        let no_phone = User {
            id: "nophone".to_string(),
            phone_number: None,
            sms_opt_in: true,
        };

        let store = FakeStore::new(vec![a], vec![opted_out, no_phone]);
        let sms = FakeSms::new();

        let summary = run_sweep(&store, &sms, Some(today())).await.unwrap();

        assert_eq!(summary.pickup_reminders_sent, 0);
        assert!(sms.sent().is_empty());
        // The event was still due and unmarked, so the marker lands anyway.
        assert_eq!(store.patches().len(), 1);
    }

    #[tokio::test]
    async fn unpaid_orders_are_ignored_entirely() {
        let mut a = order("a");
        a.renter = Some("r".to_string());
        a.pickup_due = Some(today());
        a.is_paid = false;

        let store = FakeStore::new(vec![a], vec![user("r", "5550001111", true)]);
        let sms = FakeSms::new();

        let summary = run_sweep(&store, &sms, Some(today())).await.unwrap();

        assert_eq!(summary.pickup_reminders_sent, 0);
        assert!(sms.sent().is_empty());
        assert!(store.patches().is_empty());
    }

    #[tokio::test]
    async fn orders_not_due_today_are_ignored() {
        let mut a = order("a");
        a.renter = Some("r".to_string());
        a.pickup_due = NaiveDate::from_ymd_opt(2025, 6, 2);

        let store = FakeStore::new(vec![a], vec![user("r", "5550001111", true)]);
        let sms = FakeSms::new();

        let summary = run_sweep(&store, &sms, Some(today())).await.unwrap();

        assert_eq!(summary.pickup_reminders_sent, 0);
        assert!(store.patches().is_empty());
    }

    #[tokio::test]
    async fn order_listing_failure_aborts_before_any_side_effect() {
        let mut a = order("a");
        a.renter = Some("r".to_string());
        a.pickup_due = Some(today());

        let mut store = FakeStore::new(vec![a], vec![user("r", "5550001111", true)]);
        store.fail_orders = true;
        let sms = FakeSms::new();

        let err = run_sweep(&store, &sms, Some(today())).await.unwrap_err();

        assert_eq!(err, Error::OrdersFetchFailed);
        assert!(sms.sent().is_empty());
        assert!(store.patches().is_empty());
    }

    #[tokio::test]
    async fn user_listing_failure_is_fatal_too() {
        let mut store = FakeStore::new(vec![], vec![]);
        store.fail_users = true;
        let sms = FakeSms::new();

        let err = run_sweep(&store, &sms, Some(today())).await.unwrap_err();
        assert_eq!(err, Error::UsersFetchFailed);
    }

    #[tokio::test]
    async fn failed_sends_are_not_counted_but_still_marked() {
        let mut a = order("a");
        a.renter = Some("r".to_string());
        a.pickup_due = Some(today());

        let store = FakeStore::new(vec![a], vec![user("r", "5550001111", true)]);
        let mut sms = FakeSms::new();
        sms.fail = true;

        let summary = run_sweep(&store, &sms, Some(today())).await.unwrap();

        assert_eq!(summary.pickup_reminders_sent, 0);
        assert_eq!(store.patches().len(), 1);
    }

    #[tokio::test]
    async fn failed_marker_writes_do_not_abort_the_run() {
        let mut a = order("a");
        a.renter = Some("r".to_string());
        a.pickup_due = Some(today());

        let mut b = order("b");
        b.renter = Some("r".to_string());
        b.return_due = Some(today());

        let mut store = FakeStore::new(vec![a, b], vec![user("r", "5550001111", true)]);
        store.fail_patch = true;
        let sms = FakeSms::new();

        let summary = run_sweep(&store, &sms, Some(today())).await.unwrap();

        // Both sends still go out and the run finishes; the unmarked events
        // will be retried next run.
        assert_eq!(summary.pickup_reminders_sent, 1);
        assert_eq!(summary.return_reminders_sent, 1);
        assert_eq!(sms.sent().len(), 2);
        assert!(store.patches().is_empty());
    }

    #[tokio::test]
    async fn rerunning_after_markers_landed_sends_nothing() {
        let mut a = order("a");
        a.renter = Some("r".to_string());
        a.pickup_due = Some(today());

        let users = vec![user("r", "5550001111", true)];
        let store = FakeStore::new(vec![a.clone()], users.clone());
        let sms = FakeSms::new();

        let first = run_sweep(&store, &sms, Some(today())).await.unwrap();
        assert_eq!(first.pickup_reminders_sent, 1);

        // Apply the marker the first run wrote, as the real store would.
        a.pickup_notified_at = store.patches()[0].1.pickup_sms_sent_at.clone();
        let store = FakeStore::new(vec![a], users);

        let second = run_sweep(&store, &sms, Some(today())).await.unwrap();
        assert_eq!(second.pickup_reminders_sent, 0);
        assert!(store.patches().is_empty());
    }

    #[tokio::test]
    async fn dangling_user_reference_is_not_an_error() {
        let mut a = order("a");
        a.renter = Some("ghost".to_string());
        a.pickup_due = Some(today());

        let store = FakeStore::new(vec![a], vec![]);
        let sms = FakeSms::new();

        let summary = run_sweep(&store, &sms, Some(today())).await.unwrap();
        assert_eq!(summary.pickup_reminders_sent, 0);
    }
}
