//! # Domain Types
//!
//! Core domain types used throughout the kiosk.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Section      │   │    Package      │   │    Receipt      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name (unique)  │   │  number (1..)   │   │  id (UUID)      │       │
//! │  │  price          │   │  label          │   │  issued_at      │       │
//! │  │  units_sold     │   │  tickets = num  │   │  sale, donation │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │  CharityRate    │                                                    │
//! │  │  bps (u32)      │                                                    │
//! │  │  1500 = 15%     │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

// =============================================================================
// Charity Rate
// =============================================================================

const BPS_TOLERANCE: f64 = 1e-6;

/// Charity percentage represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1500 bps = 15.00%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharityRate(u32);

impl CharityRate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        CharityRate(bps)
    }

    /// Creates a rate from a percentage with at most two decimal places.
    ///
    /// Returns `None` when the percentage is negative, not finite, or finer
    /// than one basis point: `9.991` is never silently stored as `9.99`.
    ///
    /// ```rust
    /// use kiosk_core::types::CharityRate;
    ///
    /// assert_eq!(CharityRate::from_percentage(15.0).unwrap().bps(), 1500);
    /// assert_eq!(CharityRate::from_percentage(12.34).unwrap().bps(), 1234);
    /// assert!(CharityRate::from_percentage(9.991).is_none());
    /// ```
    pub fn from_percentage(pct: f64) -> Option<Self> {
        let bps = pct * 100.0;
        let whole = bps.round();

        if !bps.is_finite() || whole < 0.0 || whole > u32::MAX as f64 {
            return None;
        }
        // float noise only; 19.99 * 100 is 1998.9999999999998
        if (bps - whole).abs() > BPS_TOLERANCE {
            return None;
        }

        Some(CharityRate(whole as u32))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

/// Two decimal places, no percent sign: `15.00`.
impl fmt::Display for CharityRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// =============================================================================
// Section
// =============================================================================

/// One seating level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Case-normalized display name, unique within the registry.
    pub name: String,

    /// Per-ticket price. Fixed once the section is created.
    pub price: Money,

    /// Tickets sold so far this session.
    pub units_sold: u32,
}

impl Section {
    /// Creates a section with nothing sold.
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Section {
            name: name.into(),
            price,
            units_sold: 0,
        }
    }

    /// Revenue for this section: `price × units_sold`.
    #[inline]
    pub fn sales_total(&self) -> Money {
        self.price * self.units_sold
    }
}

// =============================================================================
// Package
// =============================================================================

/// A ticket bundle a customer can pick.
///
/// Package `n` holds `n` tickets and is selected by typing the digit `n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// 1-based position, also the ticket count.
    pub number: u32,

    /// Display label, e.g. "Family Pack".
    pub label: String,
}

impl Package {
    /// Number of tickets in this package.
    #[inline]
    pub fn tickets(&self) -> u32 {
        self.number
    }

    /// The key that selects this package.
    pub fn key(&self) -> char {
        char::from_digit(self.number, 10).unwrap_or('?')
    }
}

/// Default package labels, in order of ticket count.
pub const DEFAULT_PACKAGE_LABELS: [&str; 4] =
    ["Single Pack", "Double Pack", "Triple Pack", "Family Pack"];

/// The ordered set of packages on offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSet {
    packages: Vec<Package>,
}

impl PackageSet {
    /// Builds a set from labels; the i-th label becomes package `i + 1`.
    ///
    /// ## Errors
    /// `InvalidPackage` if there are no labels or more than
    /// [`crate::MAX_PACKAGES`]; `Validation` if a label is blank.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> CoreResult<Self> {
        if labels.is_empty() || labels.len() > crate::MAX_PACKAGES {
            return Err(CoreError::InvalidPackage {
                number: labels.len() as u32,
                max: crate::MAX_PACKAGES,
            });
        }

        if labels.iter().any(|l| l.as_ref().trim().is_empty()) {
            return Err(ValidationError::Required {
                field: "package label".to_string(),
            }
            .into());
        }

        let packages = labels
            .iter()
            .enumerate()
            .map(|(i, label)| Package {
                number: i as u32 + 1,
                label: label.as_ref().to_string(),
            })
            .collect();

        Ok(PackageSet { packages })
    }

    /// Looks a package up by its selection key.
    pub fn by_key(&self, key: char) -> CoreResult<&Package> {
        let number = key.to_digit(10).unwrap_or(0);
        self.packages
            .iter()
            .find(|p| p.number == number)
            .ok_or(CoreError::InvalidPackage {
                number,
                max: self.packages.len(),
            })
    }

    /// Keys accepted at the package prompt.
    pub fn keys(&self) -> Vec<char> {
        self.packages.iter().map(Package::key).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        self.packages.iter()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl Default for PackageSet {
    fn default() -> Self {
        PackageSet {
            packages: DEFAULT_PACKAGE_LABELS
                .iter()
                .enumerate()
                .map(|(i, label)| Package {
                    number: i as u32 + 1,
                    label: (*label).to_string(),
                })
                .collect(),
        }
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// Printed proof of a single purchase. Never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    /// Unique identifier (UUID v4), handy for matching log lines.
    pub id: Uuid,

    /// When the receipt was issued.
    pub issued_at: DateTime<Utc>,

    pub event_name: String,
    pub section: String,
    pub package_label: String,

    /// What the customer paid.
    pub total_cost: Money,

    /// Share of `total_cost` going to charity.
    pub donation: Money,
}

impl Receipt {
    /// Issues a receipt for a completed sale.
    pub fn issue(
        event_name: &str,
        section: &Section,
        package: &Package,
        sale: Money,
        rate: CharityRate,
    ) -> Self {
        Receipt {
            id: Uuid::new_v4(),
            issued_at: Utc::now(),
            event_name: event_name.to_string(),
            section: section.name.clone(),
            package_label: package.label.clone(),
            total_cost: sale,
            donation: sale.charity_share(rate),
        }
    }

    /// Renders the receipt block shown to the customer.
    pub fn render(&self) -> String {
        format!(
            "\n{}\nCharity Ticket Receipt\nReceipt #{}\nIssued {}\n{} : {}\nTotal Cost: {}\nDonation to Charity: {}\n",
            self.event_name,
            self.id.simple(),
            self.issued_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.section,
            self.package_label,
            self.total_cost,
            self.donation,
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
