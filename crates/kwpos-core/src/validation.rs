//! # Validation Module
//!
//! Input validation for everything the API accepts. All checks run before
//! any state is touched; a failure here never leaves a partial write behind.

use crate::error::{ValidationError, ValidationResult};
use crate::types::PaymentMethod;
use crate::MAX_LINE_QUANTITY;

/// Maximum length for item names (both languages).
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length for free-text fields (refund reason, sale notes).
pub const MAX_TEXT_LENGTH: usize = 500;

/// Maximum length for payment references (KNET ref, cheque number).
pub const MAX_REFERENCE_LENGTH: usize = 50;

// =============================================================================
// Quantities and Prices
// =============================================================================

/// Validates a line quantity: whole units in `1..=MAX_LINE_QUANTITY`.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 || quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a unit price in fils: strictly positive.
///
/// Zero-priced catalog items are rejected; a free giveaway is a discount,
/// not a price.
pub fn validate_price_fils(price_fils: i64) -> ValidationResult<()> {
    if price_fils <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Text Fields
// =============================================================================

/// Validates an item display name: non-empty after trimming, bounded length.
pub fn validate_item_name(field: &str, name: &str) -> ValidationResult<()> {
    validate_text(field, name, MAX_NAME_LENGTH)
}

/// Validates a refund reason: required, non-blank, bounded length.
pub fn validate_reason(reason: &str) -> ValidationResult<()> {
    validate_text("reason", reason, MAX_TEXT_LENGTH)
}

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Payment
// =============================================================================

/// Validates the payment method against its required reference fields.
///
/// ```text
/// cash   - no reference
/// knet   - knet_reference required
/// cheque - cheque_number required
/// credit - rejected (no credit-ledger integration yet)
/// ```
///
/// A reference supplied for a method that does not use it is rejected too,
/// so a stray cheque number can never end up attached to a cash sale.
pub fn validate_payment(
    method: PaymentMethod,
    knet_reference: Option<&str>,
    cheque_number: Option<&str>,
) -> ValidationResult<()> {
    let has_knet = knet_reference.is_some_and(|r| !r.trim().is_empty());
    let has_cheque = cheque_number.is_some_and(|r| !r.trim().is_empty());

    match method {
        PaymentMethod::Cash => {
            if has_knet || has_cheque {
                return Err(ValidationError::InvalidFormat {
                    field: "payment".to_string(),
                    reason: "cash sales carry no payment reference".to_string(),
                });
            }
        }
        PaymentMethod::Knet => {
            if !has_knet {
                return Err(ValidationError::Required {
                    field: "knet_reference".to_string(),
                });
            }
            if has_cheque {
                return Err(ValidationError::InvalidFormat {
                    field: "cheque_number".to_string(),
                    reason: "not allowed for knet sales".to_string(),
                });
            }
            validate_reference("knet_reference", knet_reference)?;
        }
        PaymentMethod::Cheque => {
            if !has_cheque {
                return Err(ValidationError::Required {
                    field: "cheque_number".to_string(),
                });
            }
            if has_knet {
                return Err(ValidationError::InvalidFormat {
                    field: "knet_reference".to_string(),
                    reason: "not allowed for cheque sales".to_string(),
                });
            }
            validate_reference("cheque_number", cheque_number)?;
        }
        PaymentMethod::Credit => {
            return Err(ValidationError::NotAllowed {
                field: "payment_method".to_string(),
                allowed: vec![
                    "cash".to_string(),
                    "knet".to_string(),
                    "cheque".to_string(),
                ],
            });
        }
    }
    Ok(())
}

fn validate_reference(field: &str, value: Option<&str>) -> ValidationResult<()> {
    if let Some(v) = value {
        if v.chars().count() > MAX_REFERENCE_LENGTH {
            return Err(ValidationError::TooLong {
                field: field.to_string(),
                max: MAX_REFERENCE_LENGTH,
            });
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-5).is_err());
        assert!(validate_quantity(1_000).is_err());
    }

    #[test]
    fn test_price_must_be_positive() {
        assert!(validate_price_fils(1).is_ok());
        assert!(validate_price_fils(15_500).is_ok());
        assert!(validate_price_fils(0).is_err());
        assert!(validate_price_fils(-100).is_err());
    }

    #[test]
    fn test_item_name() {
        assert!(validate_item_name("name_en", "Washed Sand").is_ok());
        assert!(validate_item_name("name_en", "").is_err());
        assert!(validate_item_name("name_en", "   ").is_err());
        assert!(validate_item_name("name_en", &"x".repeat(101)).is_err());
    }

    #[test]
    fn test_reason_required() {
        assert!(validate_reason("customer returned delivery").is_ok());
        assert!(validate_reason("").is_err());
        assert!(validate_reason("  ").is_err());
        assert!(validate_reason(&"x".repeat(501)).is_err());
    }

    #[test]
    fn test_cash_takes_no_reference() {
        assert!(validate_payment(PaymentMethod::Cash, None, None).is_ok());
        assert!(validate_payment(PaymentMethod::Cash, Some("KN-1"), None).is_err());
        assert!(validate_payment(PaymentMethod::Cash, None, Some("CHQ-1")).is_err());
        // blank strings count as absent
        assert!(validate_payment(PaymentMethod::Cash, Some("  "), None).is_ok());
    }

    #[test]
    fn test_knet_requires_reference() {
        assert!(validate_payment(PaymentMethod::Knet, Some("KN-4821"), None).is_ok());
        assert!(validate_payment(PaymentMethod::Knet, None, None).is_err());
        assert!(validate_payment(PaymentMethod::Knet, Some(""), None).is_err());
        assert!(validate_payment(PaymentMethod::Knet, Some("KN-1"), Some("CHQ-1")).is_err());
    }

    #[test]
    fn test_cheque_requires_number() {
        assert!(validate_payment(PaymentMethod::Cheque, None, Some("100234")).is_ok());
        assert!(validate_payment(PaymentMethod::Cheque, None, None).is_err());
        assert!(validate_payment(PaymentMethod::Cheque, Some("KN-1"), Some("100234")).is_err());
    }

    #[test]
    fn test_credit_is_rejected() {
        let err = validate_payment(PaymentMethod::Credit, None, None).unwrap_err();
        assert!(err.to_string().contains("payment_method"));
    }
}
