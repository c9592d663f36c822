use serde::Deserialize;

/// Slice of a Stripe PaymentIntent needed to validate a refund. All amounts
/// are integer cents. `amount_refunded` is only present on some API shapes,
/// so its absence reads as zero.
#[derive(Deserialize, Debug, Clone)]
pub struct PaymentIntent {
    pub id: String,
    pub status: String,
    pub amount: i64,
    #[serde(default)]
    pub amount_received: Option<i64>,
    #[serde(default)]
    pub amount_refunded: Option<i64>,
}

impl PaymentIntent {
    pub fn received_cents(&self) -> i64 {
        self.amount_received.unwrap_or(self.amount)
    }

    pub fn refunded_cents(&self) -> i64 {
        self.amount_refunded.unwrap_or(0)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Refund {
    pub id: String,
    pub status: String,
    pub amount: i64,
}
