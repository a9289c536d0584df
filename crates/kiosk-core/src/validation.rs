//! # Validation Module
//!
//! Operator input validation for the kiosk.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Every Prompt Follows This Path                     │
//! │                                                                         │
//! │  raw line from console                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  format_input()   ── strip newline, reject blank / overlong, fix case  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_number() / validate_zip_code() / select_from_set()           │
//! │  validate_percentage() (number + at most two decimals)                 │
//! │       │                                                                 │
//! │       ├── Err(ValidationError) → console prints nothing new, re-asks   │
//! │       │                                                                 │
//! │       └── Ok(value) → flow moves to its next state                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kiosk_core::validation::{format_input, validate_zip_code};
//!
//! let name = format_input("lOWER\n", 10).unwrap();
//! assert_eq!(name, "Lower");
//!
//! assert!(validate_zip_code("80202").is_ok());
//! ```

use std::fmt;

use crate::error::ValidationError;
use crate::types::CharityRate;
use crate::ZIP_CODE_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Range
// =============================================================================

/// The bounds a typed number must fall in.
///
/// Prices use a closed range, the charity percentage a half-open one whose
/// lower bound is excluded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
    pub min_inclusive: bool,
}

impl NumericRange {
    /// `[min, max]`
    pub const fn inclusive(min: f64, max: f64) -> Self {
        NumericRange {
            min,
            max,
            min_inclusive: true,
        }
    }

    /// `(min, max]`
    pub const fn exclusive_min(min: f64, max: f64) -> Self {
        NumericRange {
            min,
            max,
            min_inclusive: false,
        }
    }

    /// Checks whether `value` lies inside the range.
    pub fn contains(&self, value: f64) -> bool {
        let above_min = if self.min_inclusive {
            value >= self.min
        } else {
            value > self.min
        };
        above_min && value <= self.max
    }

    /// Whether the range admits at least one value.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && (self.min < self.max || (self.min_inclusive && self.min == self.max))
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min_inclusive {
            write!(f, "between {} and {}", self.min, self.max)
        } else {
            write!(f, "above {} and at most {}", self.min, self.max)
        }
    }
}

// =============================================================================
// String Normalization
// =============================================================================

/// Normalizes one line of operator input.
///
/// ## Rules
/// - One trailing `\n` (or `\r\n`) is removed, then surrounding whitespace
/// - Must not be empty
/// - Must be at most `max_len` characters (rejected, never truncated)
/// - First character upper case, the rest lower case
///
/// ## Example
/// ```rust
/// use kiosk_core::validation::format_input;
///
/// assert_eq!(format_input("upper deck\n", 20).unwrap(), "Upper deck");
/// assert_eq!(format_input("q\n", 10).unwrap(), "Q");
/// assert!(format_input("\n", 10).is_err());
/// assert!(format_input("much too long for this\n", 10).is_err());
/// ```
pub fn format_input(raw: &str, max_len: usize) -> ValidationResult<String> {
    let line = raw
        .strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(raw)
        .trim();

    if line.is_empty() {
        return Err(ValidationError::Required {
            field: "input".to_string(),
        });
    }

    if line.chars().count() > max_len {
        return Err(ValidationError::TooLong {
            field: "input".to_string(),
            max: max_len,
        });
    }

    Ok(normalize_case(line))
}

/// Upper-cases the first character and lower-cases the rest.
///
/// Used on its own to compare configured values (PIN, keys) with input
/// that went through [`format_input`].
pub fn normalize_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a number and checks it against `range`.
///
/// ## Rules
/// - The whole trimmed text must be a base-10 real number
/// - No trailing characters ("12abc" fails)
/// - `inf` / `NaN` are not numbers here
///
/// ## Example
/// ```rust
/// use kiosk_core::validation::{validate_number, NumericRange};
///
/// let price = NumericRange::inclusive(10.0, 500.0);
/// assert_eq!(validate_number("150", &price).unwrap(), 150.0);
/// assert!(validate_number("9.999", &price).is_err());
/// assert!(validate_number("150 dollars", &price).is_err());
/// ```
pub fn validate_number(text: &str, range: &NumericRange) -> ValidationResult<f64> {
    let text = text.trim();

    let value: f64 = text
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| ValidationError::NotANumber {
            field: "value".to_string(),
            value: text.to_string(),
        })?;

    if !range.contains(value) {
        return Err(ValidationError::OutOfRange {
            field: "value".to_string(),
            range: range.to_string(),
        });
    }

    Ok(value)
}

/// Parses a charity percentage: in `range`, at most two decimal places.
///
/// The bound is checked again on the stored basis points, so the session
/// never runs at a rate the range excludes.
///
/// ## Example
/// ```rust
/// use kiosk_core::validation::{validate_percentage, NumericRange};
///
/// let charity = NumericRange::exclusive_min(9.99, 30.0);
/// assert_eq!(validate_percentage("12.34", &charity).unwrap().bps(), 1234);
/// assert!(validate_percentage("9.991", &charity).is_err());
/// ```
pub fn validate_percentage(text: &str, range: &NumericRange) -> ValidationResult<CharityRate> {
    let pct = validate_number(text, range)?;

    let rate = CharityRate::from_percentage(pct).ok_or_else(|| ValidationError::InvalidFormat {
        field: "percentage".to_string(),
        reason: "use at most two decimal places".to_string(),
    })?;

    if !range.contains(rate.percentage()) {
        return Err(ValidationError::OutOfRange {
            field: "percentage".to_string(),
            range: range.to_string(),
        });
    }

    Ok(rate)
}

// =============================================================================
// Format Validators
// =============================================================================

/// Validates a zip code: exactly five ASCII digits.
///
/// The zip is only checked, never stored.
pub fn validate_zip_code(text: &str) -> ValidationResult<()> {
    if text.len() != ZIP_CODE_LENGTH || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "zip code".to_string(),
            reason: format!("must be exactly {} digits", ZIP_CODE_LENGTH),
        });
    }

    Ok(())
}

/// Accepts a single character from `allowed`.
///
/// ## Example
/// ```rust
/// use kiosk_core::validation::select_from_set;
///
/// assert_eq!(select_from_set("Y", &['Y', 'N']).unwrap(), 'Y');
/// assert!(select_from_set("Yes", &['Y', 'N']).is_err());
/// assert!(select_from_set("5", &['1', '2', '3', '4']).is_err());
/// ```
pub fn select_from_set(text: &str, allowed: &[char]) -> ValidationResult<char> {
    let mut chars = text.trim().chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) if allowed.contains(&c) => Ok(c),
        _ => Err(ValidationError::NotAllowed {
            field: "selection".to_string(),
            allowed: allowed.to_vec(),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
