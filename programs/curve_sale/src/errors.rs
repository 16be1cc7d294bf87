use anchor_lang::prelude::*;

#[error_code]
pub enum CurveSaleError {
    #[msg("Fee basis points exceed 10000")]
    BadFee,
    #[msg("Account does not match the expected identity")]
    BadAccount,
    #[msg("Insufficient inventory remaining on the curve")]
    InsufficientInventory,
    #[msg("Trade output violates the caller's slippage bound")]
    SlippageExceeded,
    #[msg("Input amount too small")]
    InsufficientIn,
    #[msg("Curve has graduated, buying is closed")]
    Graduated,
    #[msg("Selling is disabled before graduation")]
    SellDisabled,
    #[msg("Curve has not graduated yet")]
    NotGraduated,
    #[msg("Nothing to withdraw")]
    NothingToWithdraw,
    #[msg("Arithmetic overflow")]
    MathOverflow,
    #[msg("Division by zero")]
    DivByZero,
}
