//! Table availability
//!
//! - **resolver**: pure display-status resolution from the manual
//!   status, the reservation and the seated order
//! - **board**: the staff floor view (every table with its resolved
//!   status and order summary)

pub mod board;
pub mod resolver;

pub use board::{BoardEntry, OrderCard, table_sort_key};
pub use resolver::{Availability, ColorTag, TableDisplay, resolve};

use shared::models::Table;

/// Smallest unused numeric label greater than the current maximum,
/// for the auto-create flow. Non-numeric labels are ignored.
pub fn next_table_number(tables: &[&Table]) -> String {
    let next = tables
        .iter()
        .filter_map(|t| t.number.parse::<u32>().ok())
        .max()
        .map_or(1, |max| max + 1);
    next.to_string()
}
