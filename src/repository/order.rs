use super::{RecordId, RecordRef};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Canonical order as the rest of the service sees it. The sweep only ever
/// reads these fields and writes the two notified-at markers.
#[derive(Serialize, Clone, Debug)]
pub struct Order {
    pub id: String,
    pub renter: Option<String>,
    pub lister: Option<String>,
    pub pickup_due: Option<NaiveDate>,
    pub return_due: Option<NaiveDate>,
    /// Idempotency markers. Presence is the guard; the contents are
    /// timestamps we write but never interpret.
    pub pickup_notified_at: Option<String>,
    pub return_notified_at: Option<String>,
    pub is_paid: bool,
}

/// Order exactly as the record store delivers it. Field keys must match the
/// collection's API property names, not the pretty labels in the UI; aliases
/// cover the snake_case spellings older revisions of the app used.
#[derive(Deserialize, Debug)]
pub struct RawOrder {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, rename = "_id")]
    pub legacy_id: Option<RecordId>,
    #[serde(default, rename = "Renter", alias = "renter")]
    pub renter: Option<RecordRef>,
    #[serde(default, rename = "Lister", alias = "lister")]
    pub lister: Option<RecordRef>,
    #[serde(default, rename = "Item Pick Up Date", alias = "pickup_date")]
    pub pickup_date: Option<String>,
    #[serde(default, rename = "Return Due Date", alias = "return_date")]
    pub return_date: Option<String>,
    #[serde(default)]
    pub pickup_sms_sent_at: Option<String>,
    #[serde(default)]
    pub return_sms_sent_at: Option<String>,
    #[serde(default, rename = "isPaid", alias = "is_paid")]
    pub is_paid: Option<bool>,
}

impl RawOrder {
    /// Records without any usable id are dropped, matching how the original
    /// app skipped them. Malformed dates become `None` so the affected event
    /// is simply never due.
    pub fn into_order(self) -> Option<Order> {
        let id = self.id.or(self.legacy_id)?.into_string();
        Some(Order {
            id,
            renter: self.renter.and_then(RecordRef::first),
            lister: self.lister.and_then(RecordRef::first),
            pickup_due: self.pickup_date.as_deref().and_then(parse_calendar_day),
            return_due: self.return_date.as_deref().and_then(parse_calendar_day),
            pickup_notified_at: self.pickup_sms_sent_at,
            return_notified_at: self.return_sms_sent_at,
            is_paid: self.is_paid.unwrap_or(false),
        })
    }
}

/// The store may hold a bare date or a full timestamp; only the leading
/// calendar-day component matters, whatever the time-of-day says.
fn parse_calendar_day(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let day = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Partial update sent back to the store. Unset fields are omitted so the
/// PATCH never clobbers anything besides the marker being written.
#[derive(Serialize, Clone, Debug, Default)]
pub struct OrderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_sms_sent_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_sms_sent_at: Option<String>,
}

impl OrderPatch {
    pub fn pickup_notified(at: DateTime<Utc>) -> Self {
        Self {
            pickup_sms_sent_at: Some(at.to_rfc3339()),
            ..Self::default()
        }
    }

    pub fn return_notified(at: DateTime<Utc>) -> Self {
        Self {
            return_sms_sent_at: Some(at.to_rfc3339()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn adapts_pretty_label_keys() {
        let raw: RawOrder = serde_json::from_value(json!({
            "id": 7,
            "Renter": [3],
            "Lister": 4,
            "Item Pick Up Date": "2025-06-01T23:00:00Z",
            "Return Due Date": "2025-06-08",
            "isPaid": true
        }))
        .unwrap();

        let order = raw.into_order().unwrap();
        assert_eq!(order.id, "7");
        assert_eq!(order.renter.as_deref(), Some("3"));
        assert_eq!(order.lister.as_deref(), Some("4"));
        assert_eq!(
            order.pickup_due,
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
        assert_eq!(
            order.return_due,
            NaiveDate::from_ymd_opt(2025, 6, 8)
        );
        assert!(order.is_paid);
        assert!(order.pickup_notified_at.is_none());
    }

    #[test]
    fn adapts_snake_case_aliases() {
        let raw: RawOrder = serde_json::from_value(json!({
            "_id": "abc",
            "renter": "r1",
            "pickup_date": "2025-06-01",
            "pickup_sms_sent_at": "2025-06-01T08:00:00Z",
            "is_paid": true
        }))
        .unwrap();

        let order = raw.into_order().unwrap();
        assert_eq!(order.id, "abc");
        assert_eq!(order.renter.as_deref(), Some("r1"));
        assert!(order.pickup_notified_at.is_some());
        assert!(order.lister.is_none());
        assert!(order.return_due.is_none());
    }

    #[test]
    fn drops_records_without_an_id() {
        let raw: RawOrder = serde_json::from_value(json!({ "isPaid": true })).unwrap();
        assert!(raw.into_order().is_none());
    }

    #[test]
    fn malformed_dates_become_never_due() {
        let raw: RawOrder = serde_json::from_value(json!({
            "id": 1,
            "Item Pick Up Date": "next tuesday",
            "isPaid": true
        }))
        .unwrap();
        assert!(raw.into_order().unwrap().pickup_due.is_none());
    }

    #[test]
    fn marker_patch_serializes_only_its_own_field() {
        let patch = OrderPatch::pickup_notified(Utc::now());
        let value = serde_json::to_value(&patch).unwrap();
        assert!(value.get("pickup_sms_sent_at").is_some());
        assert!(value.get("return_sms_sent_at").is_none());
    }
}
