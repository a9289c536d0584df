//! # Section Registry
//!
//! The seating sections on offer, kept sorted by descending price.
//!
//! ## Ordering
//! ```text
//! insert_sorted("Club", $150.00) into [Lower $150.00, Upper $75.00]
//!
//!   index:      0               1
//!             ┌───────────────┬───────────────┐
//!             │ Lower $150.00 │ Upper $75.00  │
//!             └───────────────┴───────────────┘
//!                               ▲
//!                               first price < $150.00 → insert here
//!
//!   result:   [Lower $150.00, Club $150.00, Upper $75.00]
//! ```
//! Equal prices keep insertion order, so the report order is stable.
//!
//! ## Lifecycle
//! Created empty, filled during admin setup, only the `units_sold`
//! counters change during sales.

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Section;

/// Sections sorted by descending price with unique names.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        SectionRegistry::default()
    }

    /// Adds a section at its price position.
    ///
    /// ## Errors
    /// - `DuplicateSection` if the name is taken (registry unchanged)
    /// - `AllocationFailed` if room for one more entry cannot be reserved
    ///   (registry unchanged)
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::{Money, SectionRegistry};
    ///
    /// let mut registry = SectionRegistry::new();
    /// registry.insert_sorted("Upper", Money::from_cents(7500)).unwrap();
    /// registry.insert_sorted("Lower", Money::from_cents(15000)).unwrap();
    ///
    /// let names: Vec<_> = registry.iter().map(|s| s.name.as_str()).collect();
    /// assert_eq!(names, ["Lower", "Upper"]);
    /// ```
    pub fn insert_sorted(&mut self, name: &str, price: Money) -> CoreResult<&Section> {
        if self.contains(name) {
            return Err(CoreError::DuplicateSection(name.to_string()));
        }

        self.sections
            .try_reserve(1)
            .map_err(|_| CoreError::AllocationFailed {
                name: name.to_string(),
            })?;

        let index = self.sections.partition_point(|s| s.price >= price);
        self.sections.insert(index, Section::new(name, price));

        Ok(&self.sections[index])
    }

    /// Finds a section by its exact (normalized) name.
    pub fn find_by_name(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Mutable lookup, for counter updates.
    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find_by_name(name).is_some()
    }

    /// Books a sale of `tickets` in the named section.
    ///
    /// Increments `units_sold` and returns `price × tickets`.
    pub fn record_sale(&mut self, name: &str, tickets: u32) -> CoreResult<Money> {
        let section = self
            .find_by_name_mut(name)
            .ok_or_else(|| CoreError::SectionNotFound(name.to_string()))?;

        section.units_sold += tickets;
        Ok(section.price * tickets)
    }

    /// Sections in report order (highest price first).
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl<'a> IntoIterator for &'a SectionRegistry {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
