//! A till that pays out withdrawals greedily.
//!
//! The till holds a count of each denomination. Customers are served in
//! order; for each one the largest denomination not exceeding the amount
//! still owed is handed out, one unit at a time, until the amount is paid
//! (`Transaction accepted!`) or the chosen denomination has run out
//! (`Transaction stopped!`). Units handed out before a stop stay out of the
//! till, and later customers see the depleted stock.

pub mod config;
pub mod denomination;
pub mod engine;
pub mod error;
pub mod io;
pub mod logging;
pub mod output;
pub mod till;
pub mod transaction;

pub use denomination::{Denomination, DenominationSet, GreedyCheck};
pub use engine::{RunSummary, TillSimulator};
pub use error::{InputError, TillError};
pub use till::Till;
pub use transaction::{Outcome, Receipt, StopReason, WithdrawalRequest};
