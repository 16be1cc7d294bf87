use anchor_lang::prelude::*;
use anchor_spl::{
    token_2022::{set_authority, spl_token_2022::instruction::AuthorityType, SetAuthority},
    token_interface::{Mint, TokenInterface},
};

use crate::errors::CurveSaleError;
use crate::state::config::SaleConfig;
use crate::state::curve::{BondingCurve, SCALE};

/// # InitCurve Instruction
///
/// Creates a bonding curve over an existing mint, together with the two
/// custodial PDAs the curve trades through: a data-less SOL vault that
/// collects the reserve side, and a mint-authority PDA that becomes the
/// only party able to issue the token.
///
/// The virtual reserves seed the price curve. They are bookkeeping
/// quantities, not custodied balances: a curve seeded with 1 SOL and
/// 1,000,000 tokens opens at 1 token per microSOL and steepens as
/// inventory is issued.
///
/// Admin only. Taking the mint authority is a one-way transition; no
/// instruction hands it back.
#[derive(Accounts)]
pub struct InitCurve<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        seeds = ["config".as_bytes()],
        bump = config.bump,
    )]
    pub config: Account<'info, SaleConfig>,

    #[account(mut)]
    pub token_mint: InterfaceAccount<'info, Mint>,

    /// Curve state, one per mint
    #[account(init,
    payer = admin,
    space = 8 + BondingCurve::INIT_SPACE,
    seeds = ["curve".as_bytes(), token_mint.key().as_ref()],
    bump,
    )]
    pub curve: Account<'info, BondingCurve>,

    /// Vault that collects the SOL side of every trade. Holds no data,
    /// so it never needs initialization to receive lamports.
    #[account(
        seeds = ["vault".as_bytes(), token_mint.key().as_ref()],
        bump,
    )]
    pub sol_vault: SystemAccount<'info>,

    /// CHECK: data-less PDA, only ever used as the mint authority signer
    #[account(
        seeds = ["mint_auth".as_bytes(), token_mint.key().as_ref()],
        bump,
    )]
    pub mint_authority: UncheckedAccount<'info>,

    /// Must co-sign when the curve takes over the mint authority
    pub current_mint_authority: Option<Signer<'info>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

impl<'info> InitCurve<'info> {
    pub fn init_curve(&mut self, x_reserve_virtual: u64, y_reserve_virtual: u64, supply_cap: u64, take_mint_authority: bool, bumps: InitCurveBumps) -> Result<()> {
        require_keys_eq!(self.config.admin, self.admin.key(), CurveSaleError::BadAccount);
        require!(supply_cap > 0, CurveSaleError::InsufficientInventory);
        require!(x_reserve_virtual > 0 && y_reserve_virtual > 0, CurveSaleError::InsufficientIn);

        let (x_reserve_scaled, y_reserve_scaled, k_scaled) =
            BondingCurve::scaled_reserves(x_reserve_virtual, y_reserve_virtual)?;

        self.curve.set_inner(BondingCurve {
            token_mint: self.token_mint.key(),
            sol_vault: self.sol_vault.key(),
            mint_authority: self.mint_authority.key(),
            scale: SCALE,
            x_reserve_scaled,
            y_reserve_scaled,
            k_scaled,
            supply_cap,
            issued_supply: 0,
            graduated: false,
            bump: bumps.curve,
            vault_bump: bumps.sol_vault,
            mint_auth_bump: bumps.mint_authority,
        });

        if take_mint_authority {
            // the mint's current authority must sign the handover
            let current_authority = self
                .current_mint_authority
                .as_ref()
                .ok_or(CurveSaleError::BadAccount)?;

            set_authority(
                CpiContext::new(
                    self.token_program.to_account_info(),
                    SetAuthority {
                        account_or_mint: self.token_mint.to_account_info(),
                        current_authority: current_authority.to_account_info(),
                    },
                ),
                AuthorityType::MintTokens,
                Some(self.mint_authority.key()),
            )?;
        }

        msg!("Curve launched for mint {}", self.token_mint.key());

        self.emit_launch_event(take_mint_authority);

        Ok(())
    }
}

/// Emitted when a curve opens for trading.
#[event]
pub struct CurveLaunched {
    pub token_mint: Pubkey,
    pub curve: Pubkey,
    pub x_reserve_scaled: u128,
    pub y_reserve_scaled: u128,
    pub k_scaled: u128,
    pub supply_cap: u64,
    pub mint_authority_taken: bool,
}

impl<'info> InitCurve<'info> {
    pub fn emit_launch_event(&self, mint_authority_taken: bool) {
        emit!(CurveLaunched {
            token_mint: self.token_mint.key(),
            curve: self.curve.key(),
            x_reserve_scaled: self.curve.x_reserve_scaled,
            y_reserve_scaled: self.curve.y_reserve_scaled,
            k_scaled: self.curve.k_scaled,
            supply_cap: self.curve.supply_cap,
            mint_authority_taken,
        });
    }
}
