use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};
use anchor_spl::token_interface::Mint;

use crate::errors::CurveSaleError;
use crate::state::config::SaleConfig;
use crate::state::curve::BondingCurve;

/// # Withdraw Instruction
///
/// Drains the reserve vault of a graduated curve to the admin. A curve
/// that has issued its full supply cap no longer needs its reserves to
/// back sells at the curve price, so the admin moves them out to seed
/// liquidity elsewhere.
///
/// Only the lamport side is withdrawn: the curve mints on demand and
/// never holds unsold token inventory.
#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        seeds = ["config".as_bytes()],
        bump = config.bump,
    )]
    pub config: Account<'info, SaleConfig>,

    #[account(
        seeds = ["curve".as_bytes(), token_mint.key().as_ref()],
        bump = curve.bump,
        has_one = token_mint @ CurveSaleError::BadAccount,
        has_one = sol_vault @ CurveSaleError::BadAccount,
    )]
    pub curve: Account<'info, BondingCurve>,

    #[account(
        mut,
        seeds = ["vault".as_bytes(), token_mint.key().as_ref()],
        bump = curve.vault_bump,
    )]
    pub sol_vault: SystemAccount<'info>,

    pub token_mint: InterfaceAccount<'info, Mint>,

    pub system_program: Program<'info, System>,
}

impl<'info> Withdraw<'info> {
    pub fn withdraw(&mut self) -> Result<()> {
        require!(self.admin.key() == self.config.admin, CurveSaleError::BadAccount);
        require!(self.curve.graduated, CurveSaleError::NotGraduated);

        let vault_lamports = self.sol_vault.lamports();
        require!(vault_lamports > 0, CurveSaleError::NothingToWithdraw);

        let mint_key = self.token_mint.key();
        let seeds = &[
            "vault".as_bytes(),
            mint_key.as_ref(),
            &[self.curve.vault_bump],
        ];
        let signer_seeds = &[&seeds[..]];

        transfer(
            CpiContext::new_with_signer(
                self.system_program.to_account_info(),
                Transfer {
                    from: self.sol_vault.to_account_info(),
                    to: self.admin.to_account_info(),
                },
                signer_seeds,
            ),
            vault_lamports,
        )?;

        msg!("Withdrew {} lamports from the vault", vault_lamports);

        Ok(())
    }
}
