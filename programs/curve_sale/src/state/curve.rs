use anchor_lang::prelude::*;

use crate::errors::CurveSaleError;
use crate::state::config::BPS_DENOMINATOR;

// Fixed point scale applied to both virtual reserves
pub const SCALE: u128 = 10_000;

#[account]
#[derive(InitSpace)]
pub struct BondingCurve {
    pub token_mint: Pubkey,
    pub sol_vault: Pubkey,
    pub mint_authority: Pubkey,

    // Virtual reserves and invariant, all scaled by SCALE
    pub scale: u128,
    pub x_reserve_scaled: u128,
    pub y_reserve_scaled: u128,
    pub k_scaled: u128,

    // Inventory accounting
    pub supply_cap: u64,
    pub issued_supply: u64,
    pub graduated: bool,

    pub bump: u8,
    pub vault_bump: u8,
    pub mint_auth_bump: u8,
}

/// Result of pricing a buy against the curve.
pub struct BuyQuote {
    pub tokens_out: u64,
    pub fee_lamports: u64,
    pub net_in_lamports: u64,
    pub x_after_scaled: u128,
    pub y_after_scaled: u128,
}

/// Result of pricing a sell against the curve.
pub struct SellQuote {
    pub gross_out_lamports: u64,
    pub fee_lamports: u64,
    pub net_out_lamports: u64,
    pub x_after_scaled: u128,
    pub y_after_scaled: u128,
}

// Fee taken off the gross lamport amount, floored.
fn fee_amount(amount: u64, fee_bps: u16) -> Result<u64> {
    let fee = (amount as u128)
        .checked_mul(fee_bps as u128)
        .and_then(|v| v.checked_div(BPS_DENOMINATOR as u128))
        .ok_or(CurveSaleError::MathOverflow)?;
    Ok(fee as u64)
}

impl BondingCurve {
    /// Scales the seed reserves and fixes the invariant product.
    ///
    /// Returns `(x_reserve_scaled, y_reserve_scaled, k_scaled)` for a
    /// curve seeded with `x_reserve_virtual` lamports against
    /// `y_reserve_virtual` token units. Immediately after creation
    /// `x_reserve_scaled * y_reserve_scaled == k_scaled` holds exactly.
    pub fn scaled_reserves(x_reserve_virtual: u64, y_reserve_virtual: u64) -> Result<(u128, u128, u128)> {
        let x_scaled = (x_reserve_virtual as u128)
            .checked_mul(SCALE)
            .ok_or(CurveSaleError::MathOverflow)?;
        let y_scaled = (y_reserve_virtual as u128)
            .checked_mul(SCALE)
            .ok_or(CurveSaleError::MathOverflow)?;
        let k_scaled = x_scaled
            .checked_mul(y_scaled)
            .ok_or(CurveSaleError::MathOverflow)?;
        Ok((x_scaled, y_scaled, k_scaled))
    }

    /// Prices a buy of tokens for a gross lamport payment.
    ///
    /// The fee is taken off the top and never enters the pool, so the
    /// invariant product is untouched by fees:
    ///
    ///   net = pay - fee
    ///   x1  = x0 + net * SCALE
    ///   y1  = k / x1            (floored)
    ///   out = (y0 - y1) / SCALE (floored)
    ///
    /// Both divisions round toward zero, which shorts the buyer by at
    /// most one unit and leaves `x1 * y1 <= k`. A payment too small to
    /// move the curve by a whole token quotes zero and is rejected.
    pub fn quote_buy(&self, pay_lamports: u64, fee_bps: u16) -> Result<BuyQuote> {
        require!(fee_bps <= BPS_DENOMINATOR, CurveSaleError::BadFee);

        let fee_lamports = fee_amount(pay_lamports, fee_bps)?;
        let net_in_lamports = pay_lamports
            .checked_sub(fee_lamports)
            .ok_or(CurveSaleError::InsufficientIn)?;
        let dx_scaled = (net_in_lamports as u128)
            .checked_mul(SCALE)
            .ok_or(CurveSaleError::MathOverflow)?;

        let x_after_scaled = self
            .x_reserve_scaled
            .checked_add(dx_scaled)
            .ok_or(CurveSaleError::MathOverflow)?;
        let y_after_scaled = self
            .k_scaled
            .checked_div(x_after_scaled)
            .ok_or(CurveSaleError::DivByZero)?;

        let dy_scaled = self.y_reserve_scaled.saturating_sub(y_after_scaled);
        let tokens_out = (dy_scaled / SCALE) as u64;
        require!(tokens_out > 0, CurveSaleError::InsufficientIn);

        Ok(BuyQuote {
            tokens_out,
            fee_lamports,
            net_in_lamports,
            x_after_scaled,
            y_after_scaled,
        })
    }

    /// Prices a sell of tokens for a lamport payout.
    ///
    /// Mirror of `quote_buy` with the roles reversed. The fee is taken
    /// from the payout, outside the pool:
    ///
    ///   y1    = y0 + tokens_in * SCALE
    ///   x1    = k / y1               (floored)
    ///   gross = (x0 - x1) / SCALE    (floored)
    ///   net   = gross - fee
    pub fn quote_sell(&self, tokens_in: u64, fee_bps: u16) -> Result<SellQuote> {
        require!(fee_bps <= BPS_DENOMINATOR, CurveSaleError::BadFee);

        let dy_scaled = (tokens_in as u128)
            .checked_mul(SCALE)
            .ok_or(CurveSaleError::MathOverflow)?;
        let y_after_scaled = self
            .y_reserve_scaled
            .checked_add(dy_scaled)
            .ok_or(CurveSaleError::MathOverflow)?;
        let x_after_scaled = self
            .k_scaled
            .checked_div(y_after_scaled)
            .ok_or(CurveSaleError::DivByZero)?;

        let dx_scaled = self.x_reserve_scaled.saturating_sub(x_after_scaled);
        let gross_out_lamports = (dx_scaled / SCALE) as u64;
        require!(gross_out_lamports > 0, CurveSaleError::InsufficientIn);

        let fee_lamports = fee_amount(gross_out_lamports, fee_bps)?;
        let net_out_lamports = gross_out_lamports
            .checked_sub(fee_lamports)
            .ok_or(CurveSaleError::MathOverflow)?;

        Ok(SellQuote {
            gross_out_lamports,
            fee_lamports,
            net_out_lamports,
            x_after_scaled,
            y_after_scaled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

    fn curve(x_reserve_virtual: u64, y_reserve_virtual: u64) -> BondingCurve {
        let (x, y, k) = BondingCurve::scaled_reserves(x_reserve_virtual, y_reserve_virtual).unwrap();
        BondingCurve {
            token_mint: Pubkey::default(),
            sol_vault: Pubkey::default(),
            mint_authority: Pubkey::default(),
            scale: SCALE,
            x_reserve_scaled: x,
            y_reserve_scaled: y,
            k_scaled: k,
            supply_cap: u64::MAX,
            issued_supply: 0,
            graduated: false,
            bump: 0,
            vault_bump: 0,
            mint_auth_bump: 0,
        }
    }

    fn apply_buy(c: &mut BondingCurve, q: &BuyQuote) {
        c.x_reserve_scaled = q.x_after_scaled;
        c.y_reserve_scaled = q.y_after_scaled;
        c.issued_supply += q.tokens_out;
    }

    #[test]
    fn scaled_reserves_match_inputs() {
        let c = curve(LAMPORTS_PER_SOL, 1_000_000);
        assert_eq!(c.x_reserve_scaled, LAMPORTS_PER_SOL as u128 * SCALE);
        assert_eq!(c.y_reserve_scaled, 1_000_000u128 * SCALE);
        assert_eq!(c.k_scaled, c.x_reserve_scaled * c.y_reserve_scaled);
        assert_eq!(c.scale, 10_000);
    }

    #[test]
    fn fee_free_buy_doubles_x_and_halves_y() {
        let c = curve(LAMPORTS_PER_SOL, 1_000_000);
        let q = c.quote_buy(LAMPORTS_PER_SOL, 0).unwrap();
        assert_eq!(q.fee_lamports, 0);
        assert_eq!(q.net_in_lamports, LAMPORTS_PER_SOL);
        assert_eq!(q.x_after_scaled, 2 * c.x_reserve_scaled);
        assert_eq!(q.y_after_scaled, c.y_reserve_scaled / 2);
        assert_eq!(q.tokens_out, 500_000);
    }

    #[test]
    fn buy_fee_comes_off_the_top() {
        let c = curve(LAMPORTS_PER_SOL, 1_000_000);
        let q = c.quote_buy(LAMPORTS_PER_SOL, 250).unwrap();
        assert_eq!(q.fee_lamports, 25_000_000);
        assert_eq!(q.net_in_lamports, 975_000_000);
        assert_eq!(q.tokens_out, 493_670);
        assert!(q.x_after_scaled * q.y_after_scaled <= c.k_scaled);
    }

    #[test]
    fn sell_fee_comes_out_of_the_payout() {
        let c = curve(LAMPORTS_PER_SOL, 1_000_000);
        let q = c.quote_sell(100_000, 300).unwrap();
        assert_eq!(q.gross_out_lamports, 90_909_090);
        assert_eq!(q.fee_lamports, 2_727_272);
        assert_eq!(q.net_out_lamports, 88_181_818);
        assert!(q.x_after_scaled * q.y_after_scaled <= c.k_scaled);
    }

    #[test]
    fn fee_above_denominator_is_rejected() {
        let c = curve(LAMPORTS_PER_SOL, 1_000_000);
        assert!(c.quote_buy(LAMPORTS_PER_SOL, 10_001).is_err());
        assert!(c.quote_sell(100_000, 10_001).is_err());
    }

    #[test]
    fn dust_buy_is_rejected() {
        let c = curve(LAMPORTS_PER_SOL, 1_000_000);
        // one lamport moves the curve by a fraction of a token
        assert!(c.quote_buy(1, 0).is_err());
        assert!(c.quote_buy(0, 0).is_err());
    }

    #[test]
    fn repeated_buys_get_more_expensive() {
        let mut c = curve(LAMPORTS_PER_SOL, 1_000_000);
        let first = c.quote_buy(LAMPORTS_PER_SOL, 0).unwrap();
        apply_buy(&mut c, &first);
        let second = c.quote_buy(LAMPORTS_PER_SOL, 0).unwrap();
        assert!(second.tokens_out < first.tokens_out);
    }

    #[test]
    fn oversized_seed_reserves_are_rejected() {
        // the invariant product overflows u128 at these magnitudes
        assert!(BondingCurve::scaled_reserves(u64::MAX, u64::MAX).is_err());
        let (x, _, _) = BondingCurve::scaled_reserves(u64::MAX, 1).unwrap();
        assert_eq!(x, u64::MAX as u128 * SCALE);
    }

    #[test]
    fn full_fee_consumes_the_entire_payment() {
        let c = curve(LAMPORTS_PER_SOL, 1_000_000);
        // 10000 bps leaves nothing for the pool, so no tokens come out
        assert!(c.quote_buy(LAMPORTS_PER_SOL, 10_000).is_err());
    }

    proptest! {
        #[test]
        fn prop_buy_never_lifts_product_above_k(
            x in 1u64..1_000_000_000_000,
            y in 1u64..1_000_000_000_000,
            pay in 1u64..1_000_000_000_000,
            fee_bps in 0u16..=10_000,
        ) {
            let c = curve(x, y);
            if let Ok(q) = c.quote_buy(pay, fee_bps) {
                prop_assert!(q.x_after_scaled * q.y_after_scaled <= c.k_scaled);
                prop_assert!(q.tokens_out > 0);
                prop_assert!(q.tokens_out <= y);
                prop_assert_eq!(q.fee_lamports + q.net_in_lamports, pay);
            }
        }

        #[test]
        fn prop_sell_never_lifts_product_above_k(
            x in 1u64..1_000_000_000_000,
            y in 1u64..1_000_000_000_000,
            tokens_in in 1u64..1_000_000_000_000,
            fee_bps in 0u16..=10_000,
        ) {
            let c = curve(x, y);
            if let Ok(q) = c.quote_sell(tokens_in, fee_bps) {
                prop_assert!(q.x_after_scaled * q.y_after_scaled <= c.k_scaled);
                prop_assert!(q.gross_out_lamports <= x);
                prop_assert_eq!(q.net_out_lamports + q.fee_lamports, q.gross_out_lamports);
            }
        }

        #[test]
        fn prop_fee_free_round_trip_never_profits(
            x in 1u64..1_000_000_000_000,
            y in 1u64..1_000_000_000_000,
            pay in 1u64..1_000_000_000_000,
        ) {
            let mut c = curve(x, y);
            if let Ok(buy) = c.quote_buy(pay, 0) {
                apply_buy(&mut c, &buy);
                if let Ok(sell) = c.quote_sell(buy.tokens_out, 0) {
                    prop_assert!(sell.net_out_lamports <= pay);
                }
            }
        }
    }
}
