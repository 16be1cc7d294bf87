/*
 Curve Sale - constant product bonding curve token sale for Solana

 Price
   ^
   |                                 /|
   |                               /
   |                             /
   |                          /
   |                      /
   |                 /
   |           _/
   |___----
   +---------------------------------> Tokens Issued

 A program owned pool mints a token against SOL at a price set by
 x * y = k over virtual reserves. Fees are taken outside the pool,
 an admin policy account controls fee rates and the pre graduation
 sell gate, and the curve closes once the supply cap is issued.
*/

use anchor_lang::prelude::*;

pub mod errors;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("FpYfpCwBtpDqGEEe27hASGtPCM3BP4xTrnN89MNWe9Hh");

#[program]
pub mod curve_sale {
    use super::*;

    pub fn init_config(ctx: Context<InitConfig>, fee_recipient: Pubkey, buy_fee_bps: u16, sell_fee_bps: u16, allow_sell_pre_grad: bool) -> Result<()> {
        ctx.accounts.init_config(fee_recipient, buy_fee_bps, sell_fee_bps, allow_sell_pre_grad, ctx.bumps)
    }

    pub fn update_config(ctx: Context<UpdateConfig>, new_admin: Pubkey, new_fee_recipient: Pubkey, buy_fee_bps: u16, sell_fee_bps: u16, allow_sell_pre_grad: bool) -> Result<()> {
        ctx.accounts.update_config(new_admin, new_fee_recipient, buy_fee_bps, sell_fee_bps, allow_sell_pre_grad)
    }

    pub fn init_curve(ctx: Context<InitCurve>, x_reserve_virtual: u64, y_reserve_virtual: u64, supply_cap: u64, take_mint_authority: bool) -> Result<()> {
        ctx.accounts.init_curve(x_reserve_virtual, y_reserve_virtual, supply_cap, take_mint_authority, ctx.bumps)
    }

    pub fn buy(ctx: Context<Trade>, max_pay_lamports: u64, min_tokens_out: u64) -> Result<()> {
        ctx.accounts.buy(max_pay_lamports, min_tokens_out)
    }

    pub fn sell(ctx: Context<Trade>, tokens_in: u64, min_payout_lamports: u64) -> Result<()> {
        ctx.accounts.sell(tokens_in, min_payout_lamports)
    }

    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        ctx.accounts.withdraw()
    }
}
