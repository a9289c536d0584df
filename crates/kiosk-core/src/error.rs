//! # Error Types
//!
//! Domain-specific error types for kiosk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kiosk-core errors (this file)                                         │
//! │  ├── CoreError        - Registry and sale failures                     │
//! │  └── ValidationError  - Operator input failures                        │
//! │                                                                         │
//! │  kiosk-console errors (app)                                            │
//! │  ├── ConfigError      - kiosk.toml / environment problems              │
//! │  └── AppError         - I/O, closed input                              │
//! │                                                                         │
//! │  ValidationError ──► re-prompt (never leaves the prompt loop)          │
//! │  CoreError       ──► warning line, session continues                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// A section with this name is already registered.
    ///
    /// ## When This Occurs
    /// - Admin types a seat level name twice during setup
    ///
    /// The registry is left untouched.
    #[error("Section already exists: {0}")]
    DuplicateSection(String),

    /// No section with this name.
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    /// Storage for a new section could not be reserved.
    ///
    /// The section is not added; setup carries on with the next one.
    #[error("No memory to create section for {name}")]
    AllocationFailed { name: String },

    /// Package number outside the offered set.
    #[error("Package {number} is not offered (1-{max})")]
    InvalidPackage { number: u32, max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These never surface as hard failures: every prompt loop catches them and
/// asks again.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Text is not a plain base-10 number.
    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: String, value: String },

    /// Numeric value is outside the accepted range.
    #[error("{field} must be {range}")]
    OutOfRange { field: String, range: String },

    /// Invalid format (e.g., zip code with letters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<char> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
