//! Money error types.

use thiserror::Error;

use crate::types::Currency;

/// Result type alias using `MoneyError`.
pub type MoneyResult<T> = Result<T, MoneyError>;

/// Errors raised by money and currency operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Operands of an addition are expressed in different currencies.
    #[error("Mismatch currency, expected {expected} got {actual}")]
    CurrencyMismatch {
        /// Currency of the left-hand operand.
        expected: Currency,
        /// Currency of the right-hand operand.
        actual: Currency,
    },

    /// Currency code is not part of the supported set.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Text could not be parsed as an amount.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Result does not fit in the decimal range.
    #[error("Amount overflow")]
    Overflow,
}
