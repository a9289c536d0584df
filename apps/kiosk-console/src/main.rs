//! # Charity Ticket Kiosk Entry Point
//!
//! The actual setup is in lib.rs so sessions can be driven from tests.

fn main() {
    kiosk_console::run();
}
