//! # Admin Setup
//!
//! The PIN gate and the operator's pre-sale setup.
//!
//! ## Flow
//! ```text
//!  ┌─────────────┐  wrong × max_attempts  ┌──────────┐
//!  │ AwaitingPin │ ──────────────────────►│  Denied  │ (session ends)
//!  └──────┬──────┘                        └──────────┘
//!         │ match
//!         ▼
//!  ┌────────────────────┐ ◄──┐ "Do you want to enter another section," → yes
//!  │ CollectingSections │ ───┘
//!  └──────┬─────────────┘
//!         │ no
//!         ▼
//!  ┌──────────────────────────┐
//!  │ CollectingCharityPercent │
//!  └──────┬───────────────────┘
//!         ▼
//!  ┌─────────────────┐
//!  │ Ready{charity}  │ ──► purchase loop
//!  └─────────────────┘
//! ```
//!
//! A failed PIN check is an outcome, not an error.

use std::io::{BufRead, Write};

use kiosk_core::validation::{validate_number, validate_percentage};
use kiosk_core::{CharityRate, CoreError, Money, SectionRegistry};
use tracing::{debug, info, warn};

use crate::config::KioskConfig;
use crate::console::Console;
use crate::error::AppResult;

/// Result of a PIN check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    Granted,
    Denied,
}

/// Result of the whole admin setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminOutcome {
    /// Sections are registered and sales can start.
    Ready { charity: CharityRate },
    /// PIN attempts exhausted; nothing was set up.
    Denied,
}

/// Asks for the admin PIN up to `max_attempts` times.
///
/// Used both before setup and when a customer tries to quit the purchase
/// loop. A blank or overlong line is a failed attempt like any other.
pub fn check_pin<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &KioskConfig,
) -> AppResult<AccessOutcome> {
    let expected = config.normalized_pin();
    let max_attempts = config.admin.max_attempts;

    for attempt in 1..=max_attempts {
        let entered = console.prompt("\nEnter admin pin to set up charity ticket sales\n")?;

        if matches!(entered, Ok(ref pin) if *pin == expected) {
            info!(attempt, "Admin pin accepted");
            return Ok(AccessOutcome::Granted);
        }

        debug!(attempt, max_attempts, "Admin pin rejected");
    }

    warn!(max_attempts, "Admin pin attempts exhausted");
    Ok(AccessOutcome::Denied)
}

/// Runs the PIN gate, then collects sections and the charity percentage.
///
/// Sections are inserted into `registry` as they are entered. On `Denied`
/// the registry is left untouched.
pub fn admin_setup<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &KioskConfig,
    registry: &mut SectionRegistry,
) -> AppResult<AdminOutcome> {
    if check_pin(console, config)? == AccessOutcome::Denied {
        return Ok(AdminOutcome::Denied);
    }

    collect_sections(console, config, registry)?;
    let charity = collect_charity(console, config)?;

    info!(
        sections = registry.len(),
        charity_bps = charity.bps(),
        "Admin setup complete"
    );
    Ok(AdminOutcome::Ready { charity })
}

fn collect_sections<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &KioskConfig,
    registry: &mut SectionRegistry,
) -> AppResult<()> {
    let price_range = config.price_range();

    loop {
        let name = console.prompt_until("Enter the seat level name: ", |line| Ok(line.to_string()))?;

        if registry.contains(&name) {
            console.say_line("Section already exists!")?;
            debug!(section = %name, "Duplicate section rejected");
        } else {
            let dollars = console.prompt_until(&format!("Enter price for {}: ", name), |line| {
                validate_number(line, &price_range)
            })?;
            let price = Money::round_from_dollars(dollars);

            match registry.insert_sorted(&name, price) {
                Ok(section) => {
                    info!(section = %section.name, cents = section.price.cents(), "Section added")
                }
                Err(CoreError::AllocationFailed { name }) => {
                    warn!(section = %name, "Could not allocate section");
                    console.say_line(&format!("No memory to create section for {}", name))?;
                }
                Err(other) => return Err(other.into()),
            }
        }

        console.say("Do you want to enter another section, ")?;
        if !console.confirm(config.confirm_keys())? {
            return Ok(());
        }
    }
}

fn collect_charity<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &KioskConfig,
) -> AppResult<CharityRate> {
    let range = config.charity_range();
    console.prompt_until(
        "\nEnter the percentage of sales that will go to charity\n",
        |line| validate_percentage(line, &range),
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::io::Cursor;

    fn console(script: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), 10)
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_four_wrong_pins_deny() {
        let config = KioskConfig::default();
        let mut c = console("1111\n2222\n3333\n4444\n4932\n");

        assert_eq!(check_pin(&mut c, &config).unwrap(), AccessOutcome::Denied);
        assert_eq!(output(c).matches("Enter admin pin").count(), 4);
    }

    #[test]
    fn test_correct_pin_on_last_attempt_grants() {
        let config = KioskConfig::default();
        let mut c = console("1111\n\n12345678901\n4932\n");

        assert_eq!(check_pin(&mut c, &config).unwrap(), AccessOutcome::Granted);
    }

    #[test]
    fn test_pin_respects_configured_attempts() {
        let mut config = KioskConfig::default();
        config.admin.max_attempts = 1;
        let mut c = console("0000\n4932\n");

        assert_eq!(check_pin(&mut c, &config).unwrap(), AccessOutcome::Denied);
    }

    #[test]
    fn test_letter_pin_is_case_insensitive() {
        let mut config = KioskConfig::default();
        config.admin.pin = "abc1".to_string();
        let mut c = console("ABC1\n");

        assert_eq!(check_pin(&mut c, &config).unwrap(), AccessOutcome::Granted);
    }

    #[test]
    fn test_denied_setup_leaves_registry_empty() {
        let config = KioskConfig::default();
        let mut registry = SectionRegistry::new();
        let mut c = console("1\n2\n3\n4\nLower\n");

        let outcome = admin_setup(&mut c, &config, &mut registry).unwrap();
        assert_eq!(outcome, AdminOutcome::Denied);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_setup_collects_sections_and_charity() {
        let config = KioskConfig::default();
        let mut registry = SectionRegistry::new();
        let script = "4932\n\
                      lower\n150\ny\n\
                      upper\n9.999\nabc\n75\ny\n\
                      LOWER\ny\n\
                      club\n500.01\n500\nn\n\
                      9.99\n30.01\n15\n";
        let mut c = console(script);

        let outcome = admin_setup(&mut c, &config, &mut registry).unwrap();
        assert_eq!(
            outcome,
            AdminOutcome::Ready {
                charity: CharityRate::from_bps(1500)
            }
        );

        let names: Vec<_> = registry.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Club", "Lower", "Upper"]);
        assert_eq!(
            registry.find_by_name("Upper").unwrap().price,
            Money::from_cents(7500)
        );

        let out = output(c);
        assert_eq!(out.matches("Section already exists!").count(), 1);
        assert_eq!(out.matches("Enter price for Upper: ").count(), 3);
        assert_eq!(out.matches("Enter price for Club: ").count(), 2);
        assert_eq!(
            out.matches("Enter the percentage of sales that will go to charity")
                .count(),
            3
        );
    }

    #[test]
    fn test_price_is_rounded_to_cents() {
        let config = KioskConfig::default();
        let mut registry = SectionRegistry::new();
        let mut c = console("4932\nBox\n75.5\nn\n10\n");

        admin_setup(&mut c, &config, &mut registry).unwrap();
        assert_eq!(registry.find_by_name("Box").unwrap().price.cents(), 7550);
    }

    #[test]
    fn test_charity_with_extra_decimals_is_asked_again() {
        let config = KioskConfig::default();
        let mut registry = SectionRegistry::new();
        let mut c = console("4932\nBox\n500\nn\n9.991\n10.004\n12.34\n");

        let outcome = admin_setup(&mut c, &config, &mut registry).unwrap();
        let charity = match outcome {
            AdminOutcome::Ready { charity } => charity,
            AdminOutcome::Denied => panic!("pin was correct"),
        };
        assert_eq!(charity.bps(), 1234);
        assert_eq!(
            output(c)
                .matches("Enter the percentage of sales that will go to charity")
                .count(),
            3
        );

        // 12.34% of $500.00 is exactly $61.70
        let sale = registry.record_sale("Box", 1).unwrap();
        assert_eq!(sale.charity_share(charity), Money::from_cents(6170));
    }

    #[test]
    fn test_charity_just_above_minimum_is_stored_exactly() {
        let config = KioskConfig::default();
        let mut registry = SectionRegistry::new();
        let mut c = console("4932\nBox\n500\nn\n9.99\n9.995\n10.01\n");

        let outcome = admin_setup(&mut c, &config, &mut registry).unwrap();
        assert_eq!(
            outcome,
            AdminOutcome::Ready {
                charity: CharityRate::from_bps(1001)
            }
        );

        // 10.01% of $500.00 is $50.05
        let sale = registry.record_sale("Box", 1).unwrap();
        assert_eq!(sale.charity_share(CharityRate::from_bps(1001)).cents(), 5005);
    }

    #[test]
    fn test_setup_stops_when_input_closes() {
        let config = KioskConfig::default();
        let mut registry = SectionRegistry::new();
        let mut c = console("4932\nLower\n");

        assert!(matches!(
            admin_setup(&mut c, &config, &mut registry),
            Err(AppError::InputClosed)
        ));
        assert!(registry.is_empty());
    }
}
