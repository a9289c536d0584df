//! # Purchase Loop
//!
//! Customer-facing ticket sales, modelled as an explicit state machine.
//!
//! ## States
//! ```text
//!            ┌──────────────── no ─────────────────┐
//!            ▼                                     │
//!      ┌──────────┐  section name   ┌───────────────────┐
//!  ┌──►│ Browsing │ ───────────────►│ ConfirmingSection │
//!  │   └────┬─────┘                 └─────────┬─────────┘
//!  │        │ Q                               │ yes
//!  │        ▼                                 ▼
//!  │   ┌──────────┐ denied          ┌──────────────────┐ ◄── no ──┐
//!  │   │ PIN gate │ ──► Browsing    │ SelectingPackage │          │
//!  │   └────┬─────┘                 └────────┬─────────┘          │
//!  │        │ granted                        │ 1..4               │
//!  │        ▼                                ▼                    │
//!  │     ┌──────┐                   ┌───────────────────┐         │
//!  │     │ Done │                   │ ConfirmingPackage │ ────────┘
//!  │     └──────┘                   └────────┬──────────┘
//!  │                                         │ yes: sale booked
//!  │                                         ▼
//!  │   ┌─────────────────┐          ┌─────────────┐
//!  └───│ OfferingReceipt │ ◄────────│ EnteringZip │
//!      └─────────────────┘  5 digits└─────────────┘
//! ```
//!
//! The sale is booked on the registry as soon as the package is confirmed.
//! The zip code is validated but not kept.

use std::io::{BufRead, Write};

use kiosk_core::validation::{select_from_set, validate_zip_code};
use kiosk_core::{CharityRate, CoreError, Money, Package, PackageSet, PricingSheet, Receipt, SectionRegistry};
use tracing::{debug, info};

use crate::admin::{check_pin, AccessOutcome};
use crate::config::KioskConfig;
use crate::console::Console;
use crate::error::AppResult;

/// Where the customer is in a purchase.
#[derive(Debug, Clone, PartialEq)]
pub enum PurchaseState {
    Browsing,
    ConfirmingSection { section: String },
    SelectingPackage { section: String },
    ConfirmingPackage { section: String, package: Package },
    EnteringZip { section: String, package: Package, sale: Money },
    OfferingReceipt { section: String, package: Package, sale: Money },
    Done,
}

/// Counters for the finished purchase loop, logged at session end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurchaseStats {
    pub sales: u32,
    pub receipts: u32,
}

/// Drives one purchase loop until an operator quits with the PIN.
pub struct PurchaseFlow<'a> {
    config: &'a KioskConfig,
    registry: &'a mut SectionRegistry,
    packages: PackageSet,
    charity: CharityRate,
    stats: PurchaseStats,
}

impl<'a> PurchaseFlow<'a> {
    pub fn new(
        config: &'a KioskConfig,
        registry: &'a mut SectionRegistry,
        packages: PackageSet,
        charity: CharityRate,
    ) -> Self {
        PurchaseFlow {
            config,
            registry,
            packages,
            charity,
            stats: PurchaseStats::default(),
        }
    }

    /// Runs until `Done`.
    pub fn run<R: BufRead, W: Write>(mut self, console: &mut Console<R, W>) -> AppResult<PurchaseStats> {
        let mut state = PurchaseState::Browsing;
        while state != PurchaseState::Done {
            state = self.step(console, state)?;
        }
        Ok(self.stats)
    }

    /// Performs one state's interaction and returns the next state.
    pub fn step<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        state: PurchaseState,
    ) -> AppResult<PurchaseState> {
        let keys = self.config.confirm_keys();

        let next = match state {
            PurchaseState::Browsing => self.browse(console)?,

            PurchaseState::ConfirmingSection { section } => {
                console.say(&format!("Is this selection[{}] correct, ", section))?;
                if console.confirm(keys)? {
                    self.list_packages(console)?;
                    PurchaseState::SelectingPackage { section }
                } else {
                    PurchaseState::Browsing
                }
            }

            PurchaseState::SelectingPackage { section } => {
                let allowed = self.packages.keys();
                let prompt = format!("\n\nEnter {} to select your package\n", describe_keys(&allowed));
                let key = console.prompt_until(&prompt, |line| select_from_set(line, &allowed))?;
                let package = self.packages.by_key(key)?.clone();
                PurchaseState::ConfirmingPackage { section, package }
            }

            PurchaseState::ConfirmingPackage { section, package } => {
                console.say(&format!("Is this selection[{}] correct, ", package.key()))?;
                if console.confirm(keys)? {
                    let sale = self.registry.record_sale(&section, package.tickets())?;
                    self.stats.sales += 1;
                    info!(
                        section = %section,
                        package = package.number,
                        cents = sale.cents(),
                        "Sale recorded"
                    );
                    PurchaseState::EnteringZip { section, package, sale }
                } else {
                    PurchaseState::SelectingPackage { section }
                }
            }

            PurchaseState::EnteringZip { section, package, sale } => {
                let prompt = format!("\nYour cost is {} Enter your 5 digit zip code\n", sale);
                console.prompt_until(&prompt, validate_zip_code)?;
                PurchaseState::OfferingReceipt { section, package, sale }
            }

            PurchaseState::OfferingReceipt { section, package, sale } => {
                console.say("Do you want a receipt, ")?;
                if console.confirm(keys)? {
                    self.print_receipt(console, &section, &package, sale)?;
                }
                PurchaseState::Browsing
            }

            PurchaseState::Done => PurchaseState::Done,
        };

        Ok(next)
    }

    fn browse<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> AppResult<PurchaseState> {
        let sheet = PricingSheet::from_registry(&self.config.event.name, self.charity, &*self.registry);
        console.say(&sheet.render())?;

        let quit = self.config.quit_key();
        let input = console.prompt(&format!(
            "\nEnter your seat level, or press {} to ({})uit\n",
            quit, quit
        ))?;

        let line = match input {
            Ok(line) => line,
            Err(reason) => {
                console.say_line(&format!("Unrecognized selection: {}", reason))?;
                return Ok(PurchaseState::Browsing);
            }
        };

        if self.registry.contains(&line) {
            return Ok(PurchaseState::ConfirmingSection { section: line });
        }

        if select_from_set(&line, &[quit]).is_ok() {
            return match check_pin(console, self.config)? {
                AccessOutcome::Granted => {
                    info!(sales = self.stats.sales, "Sales closed by operator");
                    Ok(PurchaseState::Done)
                }
                AccessOutcome::Denied => Ok(PurchaseState::Browsing),
            };
        }

        debug!(input = %line, "Unrecognized selection");
        console.say_line(&format!("Unrecognized selection: {}", line))?;
        Ok(PurchaseState::Browsing)
    }

    fn list_packages<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> AppResult<()> {
        for package in self.packages.iter() {
            console.say(&format!("\n{}: {}", package.number, package.label))?;
        }
        Ok(())
    }

    fn print_receipt<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        section: &str,
        package: &Package,
        sale: Money,
    ) -> AppResult<()> {
        let section = self
            .registry
            .find_by_name(section)
            .ok_or_else(|| CoreError::SectionNotFound(section.to_string()))?;

        let receipt = Receipt::issue(&self.config.event.name, section, package, sale, self.charity);
        info!(receipt = %receipt.id, cents = sale.cents(), "Receipt issued");
        self.stats.receipts += 1;

        console.say(&receipt.render())
    }
}

/// "1, 2, 3 or 4" style list of package keys.
fn describe_keys(keys: &[char]) -> String {
    match keys.split_last() {
        None => String::new(),
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => {
            let head: Vec<String> = rest.iter().map(char::to_string).collect();
            format!("{} or {}", head.join(", "), last)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(script: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), 10)
    }

    fn registry() -> SectionRegistry {
        let mut registry = SectionRegistry::new();
        registry.insert_sorted("Lower", Money::from_cents(15000)).unwrap();
        registry.insert_sorted("Upper", Money::from_cents(7500)).unwrap();
        registry
    }

    fn run(script: &str, registry: &mut SectionRegistry) -> (PurchaseStats, String) {
        let config = KioskConfig::default();
        let mut c = console(script);
        let flow = PurchaseFlow::new(&config, registry, PackageSet::default(), CharityRate::from_bps(1500));
        let stats = flow.run(&mut c).unwrap();
        (stats, String::from_utf8(c.into_output()).unwrap())
    }

    #[test]
    fn test_describe_keys() {
        assert_eq!(describe_keys(&['1', '2', '3', '4']), "1, 2, 3 or 4");
        assert_eq!(describe_keys(&['1', '2']), "1 or 2");
        assert_eq!(describe_keys(&['1']), "1");
    }

    #[test]
    fn test_purchase_with_receipt() {
        let mut registry = registry();
        let (stats, out) = run("lower\ny\n2\ny\n80202\ny\nq\n4932\n", &mut registry);

        assert_eq!(stats, PurchaseStats { sales: 1, receipts: 1 });
        assert_eq!(registry.find_by_name("Lower").unwrap().units_sold, 2);
        assert!(out.contains("\n1: Single Pack\n2: Double Pack\n3: Triple Pack\n4: Family Pack"));
        assert!(out.contains("Is this selection[Lower] correct, (y)es or (n)o?"));
        assert!(out.contains("Is this selection[2] correct, "));
        assert!(out.contains("Your cost is $300.00 Enter your 5 digit zip code"));
        assert!(out.contains("Charity Ticket Receipt"));
        assert!(out.contains("Lower : Double Pack"));
        assert!(out.contains("Total Cost: $300.00"));
        assert!(out.contains("Donation to Charity: $45.00"));
    }

    #[test]
    fn test_declining_section_returns_to_browsing() {
        let mut registry = registry();
        let (stats, out) = run("upper\nn\nq\n4932\n", &mut registry);

        assert_eq!(stats.sales, 0);
        assert_eq!(out.matches("Enter your seat level").count(), 2);
        assert!(!out.contains("Single Pack"));
    }

    #[test]
    fn test_declining_package_reprompts_without_listing_again() {
        let mut registry = registry();
        let (stats, out) = run("upper\ny\n5\n1\nn\n4\ny\n8020\n80202\nn\nq\n4932\n", &mut registry);

        assert_eq!(stats, PurchaseStats { sales: 1, receipts: 0 });
        assert_eq!(registry.find_by_name("Upper").unwrap().units_sold, 4);
        assert_eq!(out.matches("Family Pack").count(), 1);
        assert_eq!(out.matches("Enter 1, 2, 3 or 4 to select your package").count(), 3);
        assert_eq!(out.matches("Enter your 5 digit zip code").count(), 2);
        assert!(!out.contains("Charity Ticket Receipt"));
    }

    #[test]
    fn test_unrecognized_selection_is_reported() {
        let mut registry = registry();
        let (_, out) = run("club\nqq\nq\n4932\n", &mut registry);

        assert!(out.contains("Unrecognized selection: Club"));
        assert!(out.contains("Unrecognized selection: Qq"));
    }

    #[test]
    fn test_failed_quit_pin_keeps_selling() {
        let mut registry = registry();
        let (stats, out) = run("q\n1\n2\n3\n4\nlower\ny\n1\ny\n12345\nn\nq\n4932\n", &mut registry);

        assert_eq!(stats.sales, 1);
        assert_eq!(registry.find_by_name("Lower").unwrap().units_sold, 1);
        assert_eq!(out.matches("Enter admin pin").count(), 5);
    }

    #[test]
    fn test_rejected_lines_are_reported_and_pricing_redisplayed() {
        let mut registry = registry();
        let (stats, out) = run("\nupper deck box\nq\n4932\n", &mut registry);

        assert_eq!(stats.sales, 0);
        assert_eq!(out.matches("Price per person").count(), 3);
        assert!(out.contains("Unrecognized selection: input is required"));
        assert!(out.contains("Unrecognized selection: input must be at most 10 characters"));
    }
}
