//! # Reports
//!
//! The two screens built from the registry: the pricing sheet customers
//! browse, and the sales summary printed when the kiosk closes.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SectionRegistry ──► PricingSheet::from_registry ──► render() ──► text  │
//! │         │                                                               │
//! │         └─────────► SalesSummary::from_registry ──► render() ──► text  │
//! │                          │                                              │
//! │                          └── totals summed from the per-section lines, │
//! │                              never from a running counter              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both are snapshots: building them does not touch the registry, so
//! rendering twice without a sale in between gives identical text.

use serde::Serialize;
use std::fmt::Write as _;

use crate::money::Money;
use crate::registry::SectionRegistry;
use crate::types::CharityRate;

const PRICING_NAME_WIDTH: usize = 25;
const SUMMARY_COLUMN_WIDTH: usize = 20;

// =============================================================================
// Pricing Sheet
// =============================================================================

/// One line of the pricing sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceLine {
    pub name: String,
    pub price: Money,
}

/// What customers see before choosing a seat level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingSheet {
    pub event_name: String,
    pub charity: CharityRate,
    pub lines: Vec<PriceLine>,
}

impl PricingSheet {
    pub fn from_registry(event_name: &str, charity: CharityRate, registry: &SectionRegistry) -> Self {
        PricingSheet {
            event_name: event_name.to_string(),
            charity,
            lines: registry
                .iter()
                .map(|s| PriceLine {
                    name: s.name.clone(),
                    price: s.price,
                })
                .collect(),
        }
    }

    /// Renders the sheet, one section per line in registry order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "\nYou can purchase tickets to {} and {}% of your ticket purchase will go to charity.",
            self.event_name, self.charity
        );
        let _ = writeln!(
            out,
            "\n{:<width$}Price per person",
            "Section",
            width = PRICING_NAME_WIDTH
        );
        for line in &self.lines {
            let _ = writeln!(
                out,
                "{:<width$}{}",
                line.name,
                line.price,
                width = PRICING_NAME_WIDTH
            );
        }
        out
    }
}

// =============================================================================
// Sales Summary
// =============================================================================

/// Per-section figures in the closing summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionSales {
    pub name: String,
    pub price: Money,
    pub units_sold: u32,
    /// `price × units_sold`
    pub sales_total: Money,
    /// `sales_total × charity%`
    pub charity_total: Money,
}

/// Closing report: every section plus grand totals.
///
/// ## Example
/// ```rust
/// use kiosk_core::{CharityRate, Money, SalesSummary, SectionRegistry};
///
/// let mut registry = SectionRegistry::new();
/// registry.insert_sorted("Lower", Money::from_cents(15000)).unwrap();
/// registry.record_sale("Lower", 2).unwrap();
///
/// let summary = SalesSummary::from_registry(CharityRate::from_bps(1500), &registry);
/// assert_eq!(summary.total_sales.cents(), 30000);
/// assert_eq!(summary.total_charity.cents(), 4500);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub charity: CharityRate,
    pub total_sales: Money,
    pub total_charity: Money,
    pub lines: Vec<SectionSales>,
}

impl SalesSummary {
    /// Computes the summary fresh from the registry.
    pub fn from_registry(charity: CharityRate, registry: &SectionRegistry) -> Self {
        let lines: Vec<SectionSales> = registry
            .iter()
            .map(|s| {
                let sales_total = s.sales_total();
                SectionSales {
                    name: s.name.clone(),
                    price: s.price,
                    units_sold: s.units_sold,
                    sales_total,
                    charity_total: sales_total.charity_share(charity),
                }
            })
            .collect();

        let total_sales = lines.iter().map(|l| l.sales_total).sum();
        let total_charity = lines.iter().map(|l| l.charity_total).sum();

        SalesSummary {
            charity,
            total_sales,
            total_charity,
            lines,
        }
    }

    /// Total tickets sold across all sections.
    pub fn tickets_sold(&self) -> u32 {
        self.lines.iter().map(|l| l.units_sold).sum()
    }

    pub fn render(&self) -> String {
        let w = SUMMARY_COLUMN_WIDTH;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "\nSummary of ticket sales where {}% goes to charity",
            self.charity
        );
        let _ = writeln!(
            out,
            "\n{:<w$}{:<w$}{:<w$}{:<w$}{}",
            "Level", "Price", "Sold", "Sales Total", "Charity Total"
        );
        for line in &self.lines {
            let _ = writeln!(
                out,
                "{:<w$}{:<w$}{:<w$}{:<w$}{}",
                line.name, line.price, line.units_sold, line.sales_total, line.charity_total
            );
        }
        let _ = writeln!(out, "\nTotal ticket sales: {}", self.total_sales);
        let _ = writeln!(out, "Total raised for charity: {}", self.total_charity);
        out
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
