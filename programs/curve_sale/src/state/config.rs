use anchor_lang::prelude::*;

// Basis point denominator, 10000 bps = 100%
pub const BPS_DENOMINATOR: u16 = 10_000;

#[account]
#[derive(InitSpace)]
pub struct SaleConfig {
    pub admin: Pubkey,
    pub fee_recipient: Pubkey,
    pub buy_fee_bps: u16,
    pub sell_fee_bps: u16,
    pub allow_sell_pre_grad: bool,
    pub bump: u8,
}

// admin is the only identity allowed to create curves or touch policy.
// allow_sell_pre_grad gates selling while a curve is still issuing.
