use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{burn, mint_to, Burn, Mint, MintTo, TokenAccount, TokenInterface},
};

use crate::errors::CurveSaleError;
use crate::state::config::SaleConfig;
use crate::state::curve::BondingCurve;

#[derive(Accounts)]
pub struct Trade<'info> {
    #[account(mut)]
    pub trader: Signer<'info>,

    #[account(
        seeds = ["config".as_bytes()],
        bump = config.bump,
    )]
    pub config: Account<'info, SaleConfig>,

    #[account(
        mut,
        seeds = ["curve".as_bytes(), token_mint.key().as_ref()],
        bump = curve.bump,
        has_one = token_mint @ CurveSaleError::BadAccount,
        has_one = sol_vault @ CurveSaleError::BadAccount,
        has_one = mint_authority @ CurveSaleError::BadAccount,
    )]
    pub curve: Account<'info, BondingCurve>,

    #[account(mut)]
    pub token_mint: InterfaceAccount<'info, Mint>,

    #[account(
        init_if_needed,
        payer = trader,
        associated_token::mint = token_mint,
        associated_token::authority = trader,
    )]
    pub trader_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        seeds = ["vault".as_bytes(), token_mint.key().as_ref()],
        bump = curve.vault_bump,
    )]
    pub sol_vault: SystemAccount<'info>,

    /// CHECK: data-less PDA, signs mint CPIs with its seeds
    #[account(
        seeds = ["mint_auth".as_bytes(), token_mint.key().as_ref()],
        bump = curve.mint_auth_bump,
    )]
    pub mint_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = fee_recipient.key() == config.fee_recipient @ CurveSaleError::BadAccount,
    )]
    pub fee_recipient: SystemAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,
}

impl<'info> Trade<'info> {
    /// Buys tokens off the curve for exactly `max_pay_lamports`.
    ///
    /// `min_tokens_out` is the slippage floor. Every precondition is
    /// checked before the first transfer, so a rejected buy moves
    /// nothing.
    pub fn buy(&mut self, max_pay_lamports: u64, min_tokens_out: u64) -> Result<()> {
        require!(!self.curve.graduated, CurveSaleError::Graduated);

        let quote = self.curve.quote_buy(max_pay_lamports, self.config.buy_fee_bps)?;
        require!(quote.tokens_out >= min_tokens_out, CurveSaleError::SlippageExceeded);

        let issued_after = self
            .curve
            .issued_supply
            .checked_add(quote.tokens_out)
            .ok_or(CurveSaleError::MathOverflow)?;
        require!(issued_after <= self.curve.supply_cap, CurveSaleError::InsufficientInventory);

        if quote.fee_lamports > 0 {
            transfer(
                CpiContext::new(
                    self.system_program.to_account_info(),
                    Transfer {
                        from: self.trader.to_account_info(),
                        to: self.fee_recipient.to_account_info(),
                    },
                ),
                quote.fee_lamports,
            )?;
        }

        if quote.net_in_lamports > 0 {
            transfer(
                CpiContext::new(
                    self.system_program.to_account_info(),
                    Transfer {
                        from: self.trader.to_account_info(),
                        to: self.sol_vault.to_account_info(),
                    },
                ),
                quote.net_in_lamports,
            )?;
        }

        let mint_key = self.token_mint.key();
        let seeds = &[
            "mint_auth".as_bytes(),
            mint_key.as_ref(),
            &[self.curve.mint_auth_bump],
        ];
        let signer_seeds = &[&seeds[..]];

        mint_to(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                MintTo {
                    mint: self.token_mint.to_account_info(),
                    to: self.trader_token_account.to_account_info(),
                    authority: self.mint_authority.to_account_info(),
                },
                signer_seeds,
            ),
            quote.tokens_out,
        )?;

        let curve = &mut self.curve;
        curve.x_reserve_scaled = quote.x_after_scaled;
        curve.y_reserve_scaled = quote.y_after_scaled;
        curve.issued_supply = issued_after;

        emit!(BuyExecuted {
            token_mint: mint_key,
            buyer: self.trader.key(),
            pay_lamports: max_pay_lamports,
            fee_lamports: quote.fee_lamports,
            tokens_out: quote.tokens_out,
            x_reserve_after: curve.x_reserve_scaled,
            y_reserve_after: curve.y_reserve_scaled,
        });

        // the cap check above means the supply can only land on the cap
        if curve.issued_supply >= curve.supply_cap {
            curve.graduated = true;
            emit!(CurveGraduated {
                token_mint: mint_key,
                issued_supply: curve.issued_supply,
                x_reserve_final: curve.x_reserve_scaled,
                y_reserve_final: curve.y_reserve_scaled,
            });
        }

        Ok(())
    }

    /// Sells tokens back to the curve for lamports out of the vault.
    ///
    /// `min_payout_lamports` is the slippage floor on the net payout.
    /// Before graduation this path is subject to the policy gate.
    pub fn sell(&mut self, tokens_in: u64, min_payout_lamports: u64) -> Result<()> {
        require!(
            self.curve.graduated || self.config.allow_sell_pre_grad,
            CurveSaleError::SellDisabled
        );
        require!(tokens_in > 0, CurveSaleError::InsufficientIn);
        require!(
            tokens_in <= self.curve.issued_supply,
            CurveSaleError::InsufficientInventory
        );

        let quote = self.curve.quote_sell(tokens_in, self.config.sell_fee_bps)?;
        require!(
            quote.net_out_lamports >= min_payout_lamports,
            CurveSaleError::SlippageExceeded
        );

        // take the tokens out of circulation before releasing lamports
        burn(
            CpiContext::new(
                self.token_program.to_account_info(),
                Burn {
                    mint: self.token_mint.to_account_info(),
                    from: self.trader_token_account.to_account_info(),
                    authority: self.trader.to_account_info(),
                },
            ),
            tokens_in,
        )?;

        let mint_key = self.token_mint.key();
        let seeds = &[
            "vault".as_bytes(),
            mint_key.as_ref(),
            &[self.curve.vault_bump],
        ];
        let signer_seeds = &[&seeds[..]];

        if quote.net_out_lamports > 0 {
            transfer(
                CpiContext::new_with_signer(
                    self.system_program.to_account_info(),
                    Transfer {
                        from: self.sol_vault.to_account_info(),
                        to: self.trader.to_account_info(),
                    },
                    signer_seeds,
                ),
                quote.net_out_lamports,
            )?;
        }

        if quote.fee_lamports > 0 {
            transfer(
                CpiContext::new_with_signer(
                    self.system_program.to_account_info(),
                    Transfer {
                        from: self.sol_vault.to_account_info(),
                        to: self.fee_recipient.to_account_info(),
                    },
                    signer_seeds,
                ),
                quote.fee_lamports,
            )?;
        }

        let curve = &mut self.curve;
        curve.x_reserve_scaled = quote.x_after_scaled;
        curve.y_reserve_scaled = quote.y_after_scaled;
        curve.issued_supply = curve
            .issued_supply
            .checked_sub(tokens_in)
            .ok_or(CurveSaleError::MathOverflow)?;

        emit!(SellExecuted {
            token_mint: mint_key,
            seller: self.trader.key(),
            tokens_in,
            fee_lamports: quote.fee_lamports,
            payout_lamports: quote.net_out_lamports,
            x_reserve_after: curve.x_reserve_scaled,
            y_reserve_after: curve.y_reserve_scaled,
        });

        Ok(())
    }
}

// Emitted on every successful buy (SOL -> token)
#[event]
pub struct BuyExecuted {
    pub token_mint: Pubkey,
    pub buyer: Pubkey,
    pub pay_lamports: u64,
    pub fee_lamports: u64,
    pub tokens_out: u64,
    pub x_reserve_after: u128,
    pub y_reserve_after: u128,
}

// Emitted on every successful sell (token -> SOL)
#[event]
pub struct SellExecuted {
    pub token_mint: Pubkey,
    pub seller: Pubkey,
    pub tokens_in: u64,
    pub fee_lamports: u64,
    pub payout_lamports: u64,
    pub x_reserve_after: u128,
    pub y_reserve_after: u128,
}

// Emitted once, in the same instruction as the buy that fills the cap
#[event]
pub struct CurveGraduated {
    pub token_mint: Pubkey,
    pub issued_supply: u64,
    pub x_reserve_final: u128,
    pub y_reserve_final: u128,
}
