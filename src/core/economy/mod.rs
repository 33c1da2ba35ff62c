//=========================================================================
// Economy
//=========================================================================
//
// Single-resource incremental economy: a ledger that accrues debt, a
// catalog of generators that raise the accrual rate, and the formatting
// used to display amounts.
//
//=========================================================================

use thiserror::Error;

pub mod format;

mod engine;
mod generator;
mod ledger;

pub use engine::{AddOutcome, EconomyEngine, EconomyState, HintState, PurchaseOutcome, RejectReason};
pub use generator::{default_catalog, Generator, GeneratorId, GeneratorSpec, DEFAULT_PRICE_GROWTH};
pub use ledger::ResourceLedger;

/// Errors raised by economy arithmetic.
///
/// Balances and prices are unsigned 64-bit counters; any operation that
/// would leave that range is refused instead of wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EconomyError {
    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),
}
