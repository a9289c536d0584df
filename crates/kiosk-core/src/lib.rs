//! # kiosk-core: Pure Business Logic for the Charity Ticket Kiosk
//!
//! This crate is the **heart** of the kiosk. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Charity Kiosk Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 kiosk-console (stdin / stdout)                  │   │
//! │  │    PIN gate ──► Admin Setup ──► Purchase Loop ──► Summary       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kiosk-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ registry  │  │ validation│  │   │
//! │  │   │  Section  │  │   Money   │  │  sorted   │  │  numbers  │  │   │
//! │  │   │  Package  │  │ Charity % │  │ by price  │  │  zip, y/n │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                         ┌───────────┐                          │   │
//! │  │                         │  report   │                          │   │
//! │  │                         │  pricing  │                          │   │
//! │  │                         │  summary  │                          │   │
//! │  │                         └───────────┘                          │   │
//! │  │   NO I/O • NO FILES • NO STDIN • PURE FUNCTIONS                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Section, Package, CharityRate, Receipt)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`registry`] - Sections kept sorted by descending price
//! - [`report`] - Pricing sheet and sales summary
//! - [`error`] - Domain error types
//! - [`validation`] - Operator input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use kiosk_core::{CharityRate, Money, SectionRegistry};
//!
//! let mut registry = SectionRegistry::new();
//! registry.insert_sorted("Lower", Money::from_cents(15000)).unwrap();
//!
//! let sale = registry.record_sale("Lower", 2).unwrap();
//! assert_eq!(sale.cents(), 30000);
//!
//! let donation = sale.charity_share(CharityRate::from_bps(1500));
//! assert_eq!(donation.cents(), 4500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod registry;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use registry::SectionRegistry;
pub use report::{PricingSheet, SalesSummary, SectionSales};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Length of a valid zip code.
pub const ZIP_CODE_LENGTH: usize = 5;

/// Highest number of packages that can be offered.
///
/// Packages are picked with a single digit key, so `1..=9`.
pub const MAX_PACKAGES: usize = 9;
