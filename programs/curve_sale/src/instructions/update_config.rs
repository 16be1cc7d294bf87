use anchor_lang::prelude::*;

use crate::errors::CurveSaleError;
use crate::state::config::{SaleConfig, BPS_DENOMINATOR};

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = ["config".as_bytes()],
        bump = config.bump,
        constraint = config.admin == admin.key() @ CurveSaleError::BadAccount,
    )]
    pub config: Account<'info, SaleConfig>,
}

impl<'info> UpdateConfig<'info> {
    /// Rewrites the policy record, admin handover included. Curves that
    /// already exist keep trading against the updated fee rates.
    pub fn update_config(&mut self, new_admin: Pubkey, new_fee_recipient: Pubkey, buy_fee_bps: u16, sell_fee_bps: u16, allow_sell_pre_grad: bool) -> Result<()> {
        require!(buy_fee_bps <= BPS_DENOMINATOR, CurveSaleError::BadFee);
        require!(sell_fee_bps <= BPS_DENOMINATOR, CurveSaleError::BadFee);

        let bump = self.config.bump;
        self.config.set_inner(SaleConfig {
            admin: new_admin,
            fee_recipient: new_fee_recipient,
            buy_fee_bps,
            sell_fee_bps,
            allow_sell_pre_grad,
            bump,
        });

        Ok(())
    }
}
