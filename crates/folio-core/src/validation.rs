//! # Validation Module
//!
//! Input validation applied at the catalog boundary.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI parsing                                                  │
//! │  ├── Typed quantity strings → parse_quantity (rejects "-3", "abc")     │
//! │  └── Typed price strings → Money::from_str                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Catalog operations                                           │
//! │  ├── THIS MODULE: field presence, non-negative price                   │
//! │  └── Runs before any mutation                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog file decoding (folio-store)                          │
//! │  └── Same price rules, so a saved file always loads back               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use folio_core::validation::{parse_quantity, validate_title};
//!
//! assert!(validate_title("Dune").is_ok());
//! assert_eq!(parse_quantity("12").unwrap(), 12);
//! assert!(parse_quantity("-3").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

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

/// Validates a book title.
///
/// ## Rules
/// - Must not be empty or whitespace only
/// - Must not start with whitespace (the catalog file drops it on load)
pub fn validate_title(title: &str) -> ValidationResult<()> {
    require("title", title)?;
    if title.starts_with(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "title".to_string(),
            reason: "must not start with whitespace".to_string(),
        });
    }
    Ok(())
}

/// Validates a customer name.
///
/// ## Rules
/// - Must not be empty or whitespace only
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    require("customer", name)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (giveaways)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Parses a typed quantity.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Sell Book                                                              │
/// │                                                                         │
/// │  User enters quantity: "-3"                                            │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  parse_quantity("-3") ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── leading '-'? → Error: "quantity must not be negative"         │
/// │       │                                                                 │
/// │       ├── not a number / too big? → Error: out of range                │
/// │       │                                                                 │
/// │       └── OK → u32 handed to Catalog::sell                             │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn parse_quantity(input: &str) -> ValidationResult<u32> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: "quantity".to_string(),
        });
    }

    if let Some(digits) = input.strip_prefix('-') {
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::MustBeNonNegative {
                field: "quantity".to_string(),
            });
        }
    }

    input.parse::<u32>().map_err(|_| ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 0,
        max: i64::from(u32::MAX),
    })
}

/// Parses a typed price and checks it is non-negative.
pub fn parse_price(input: &str) -> ValidationResult<Money> {
    let price: Money = input.parse()?;
    validate_price(price)?;
    Ok(price)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert!(validate_title("1984").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn test_validate_title_leading_whitespace() {
        assert!(matches!(
            validate_title("  Dune"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(validate_title("\tDune").is_err());
        assert!(validate_title("Dune ").is_ok());
        assert!(validate_title("The Road").is_ok());
    }

    #[test]
    fn test_validate_customer_name() {
        assert!(validate_customer_name("Bob").is_ok());
        assert_eq!(
            validate_customer_name("\t"),
            Err(ValidationError::Required {
                field: "customer".to_string()
            })
        );
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0").unwrap(), 0);
        assert_eq!(parse_quantity(" 42 ").unwrap(), 42);

        assert!(matches!(
            parse_quantity("-3"),
            Err(ValidationError::MustBeNonNegative { .. })
        ));
        assert!(matches!(
            parse_quantity("abc"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_quantity("99999999999"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_quantity(""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("9.99").unwrap().cents(), 999);
        assert_eq!(parse_price("0").unwrap(), Money::zero());
        assert!(matches!(
            parse_price("-1"),
            Err(ValidationError::MustBeNonNegative { .. })
        ));
        assert!(matches!(
            parse_price("cheap"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}
