/// Cents still refundable on a payment after earlier partial refunds.
pub fn max_refundable(received_cents: i64, refunded_cents: i64) -> i64 {
    (received_cents - refunded_cents).max(0)
}

pub enum AmountError {
    NotPositive,
    ExceedsMaxRefundable(i64),
}

/// Resolve the refund amount: omitted means "everything remaining";
/// anything explicit must be a positive amount within what is left.
pub fn resolve_refund_amount(
    requested_cents: Option<i64>,
    max_refundable_cents: i64,
) -> Result<i64, AmountError> {
    let amount = requested_cents.unwrap_or(max_refundable_cents);
    if amount <= 0 {
        return Err(AmountError::NotPositive);
    }
    if amount > max_refundable_cents {
        return Err(AmountError::ExceedsMaxRefundable(max_refundable_cents));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_refundable_never_goes_negative() {
        assert_eq!(max_refundable(2500, 0), 2500);
        assert_eq!(max_refundable(2500, 1000), 1500);
        assert_eq!(max_refundable(2500, 3000), 0);
    }

    #[test]
    fn omitted_amount_refunds_the_remainder() {
        assert!(matches!(resolve_refund_amount(None, 1500), Ok(1500)));
    }

    #[test]
    fn explicit_amount_is_bounded() {
        assert!(matches!(resolve_refund_amount(Some(500), 1500), Ok(500)));
        assert!(matches!(
            resolve_refund_amount(Some(0), 1500),
            Err(AmountError::NotPositive)
        ));
        assert!(matches!(
            resolve_refund_amount(Some(-5), 1500),
            Err(AmountError::NotPositive)
        ));
        assert!(matches!(
            resolve_refund_amount(Some(2000), 1500),
            Err(AmountError::ExceedsMaxRefundable(1500))
        ));
    }
}
