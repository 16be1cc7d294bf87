use anchor_lang::prelude::*;

use crate::errors::CurveSaleError;
use crate::state::config::{SaleConfig, BPS_DENOMINATOR};

#[derive(Accounts)]
pub struct InitConfig<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(init,
    payer = admin,
    space = 8 + SaleConfig::INIT_SPACE,
    seeds = ["config".as_bytes()],
    bump,
    )]
    pub config: Account<'info, SaleConfig>,

    pub system_program: Program<'info, System>,
}

impl<'info> InitConfig<'info> {
    pub fn init_config(&mut self, fee_recipient: Pubkey, buy_fee_bps: u16, sell_fee_bps: u16, allow_sell_pre_grad: bool, bumps: InitConfigBumps) -> Result<()> {
        require!(buy_fee_bps <= BPS_DENOMINATOR, CurveSaleError::BadFee);
        require!(sell_fee_bps <= BPS_DENOMINATOR, CurveSaleError::BadFee);

        // whoever creates the config becomes the admin
        self.config.set_inner(SaleConfig {
            admin: self.admin.key(),
            fee_recipient,
            buy_fee_bps,
            sell_fee_bps,
            allow_sell_pre_grad,
            bump: bumps.config,
        });

        Ok(())
    }
}
