//! # Validation Module
//!
//! Input validation utilities for Almox.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end                                                    │
//! │  ├── Required fields, numeric ranges, form feedback                    │
//! │  └── Owns user-facing messages                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Only what the data model needs to stay consistent:                │
//! │      stock never negative, units positive, identity fields present     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use almox_core::validation::{validate_stock_level, validate_units};
//!
//! assert!(validate_stock_level(0).is_ok());
//! assert!(validate_units(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{NewProduct, ProductPatch};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length for names (products and accounts).
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a product or account display name.
///
/// ## Rules
/// - Must not be blank
/// - At most [`MAX_NAME_LEN`] characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    require(field, name)?;

    if name.trim().chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an account email.
///
/// Uniqueness is checked by the roster, not here. Comparison elsewhere is
/// case-sensitive, so the value is not normalized.
///
/// ```rust
/// use almox_core::validation::validate_email;
///
/// assert!(validate_email("admin@hospital.com").is_ok());
/// assert!(validate_email("admin").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    require("email", email)?;

    if !email.contains('@') {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must contain '@'".to_string(),
        });
    }

    Ok(())
}

/// Validates an account password. Only presence is required.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock level. Zero is allowed.
pub fn validate_stock_level(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates an alarm threshold. Absent or zero are allowed.
pub fn validate_alarm_quantity(alarm: Option<i64>) -> ValidationResult<()> {
    match alarm {
        Some(value) if value < 0 => Err(ValidationError::Negative {
            field: "alarm quantity".to_string(),
        }),
        _ => Ok(()),
    }
}

/// Validates the unit count of a withdraw / replenish operation.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_units(units: i64) -> ValidationResult<()> {
    if units <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a product draft before registration.
pub fn validate_new_product(draft: &NewProduct) -> ValidationResult<()> {
    validate_name("name", &draft.name)?;
    validate_stock_level(draft.quantity)?;
    validate_alarm_quantity(draft.alarm_quantity)?;
    Ok(())
}

/// Validates the fields a patch would change.
pub fn validate_patch(patch: &ProductPatch) -> ValidationResult<()> {
    if let Some(name) = &patch.name {
        validate_name("name", name)?;
    }
    if let Some(quantity) = patch.quantity {
        validate_stock_level(quantity)?;
    }
    if let Some(alarm) = patch.alarm_quantity {
        validate_alarm_quantity(alarm)?;
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
    fn test_validate_name() {
        assert!(validate_name("name", "Monitor LG 24\"").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@hospital.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("user.hospital.com").is_err());
    }

    #[test]
    fn test_validate_stock_level() {
        assert!(validate_stock_level(0).is_ok());
        assert!(validate_stock_level(25).is_ok());
        assert!(validate_stock_level(-1).is_err());
    }

    #[test]
    fn test_validate_units() {
        assert!(validate_units(1).is_ok());
        assert!(validate_units(0).is_err());
        assert!(validate_units(-3).is_err());
    }

    #[test]
    fn test_validate_patch() {
        assert!(validate_patch(&ProductPatch::default()).is_ok());

        let patch = ProductPatch {
            alarm_quantity: Some(None),
            ..Default::default()
        };
        assert!(validate_patch(&patch).is_ok());

        let patch = ProductPatch {
            alarm_quantity: Some(Some(-2)),
            ..Default::default()
        };
        assert!(validate_patch(&patch).is_err());

        let patch = ProductPatch {
            quantity: Some(-1),
            ..Default::default()
        };
        assert!(validate_patch(&patch).is_err());
    }
}
