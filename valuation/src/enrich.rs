use chrono::NaiveDate;
use domain::{
    BondHolding, CashHolding, EnrichedBond, EnrichedCash, EnrichedGold, EnrichedStock,
    GoldHolding, PriceStatus, Quote, StockHolding,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::interest::{accrued_bond_interest, accrued_cash_interest};

/// Troy-ounce to gram conversion for the shared gold commodity quote.
pub const GRAMS_PER_TROY_OUNCE: Decimal = dec!(31.1035);

pub fn gram_price_from_ounce(ounce_price: Decimal) -> Decimal {
    ounce_price / GRAMS_PER_TROY_OUNCE
}

/// Attach live-market derived fields to a stock holding. A missing quote
/// yields `PriceStatus::Unavailable` with no derived values; the caller
/// decides how that degrades (nulls in detail views, zero contribution in
/// dashboard aggregates).
pub fn enrich_stock(holding: &StockHolding, quote: Option<&Quote>) -> EnrichedStock {
    let Some(quote) = quote else {
        return EnrichedStock {
            holding: holding.clone(),
            current_price: None,
            current_value: None,
            gain: None,
            gain_percent: None,
            day_change: None,
            day_change_percent: None,
            price_status: PriceStatus::Unavailable,
        };
    };

    let current_value = (quote.price * holding.quantity).round_dp(2);
    let gain = ((quote.price - holding.cost_basis_price) * holding.quantity).round_dp(2);
    let gain_percent = if holding.cost_basis_price.is_zero() {
        Decimal::ZERO
    } else {
        ((quote.price - holding.cost_basis_price) / holding.cost_basis_price * dec!(100))
            .round_dp(2)
    };
    let (day_change, day_change_percent) = match quote.previous_close {
        Some(prev) if !prev.is_zero() => (
            Some(((quote.price - prev) * holding.quantity).round_dp(2)),
            Some(((quote.price - prev) / prev * dec!(100)).round_dp(2)),
        ),
        _ => (None, None),
    };

    EnrichedStock {
        holding: holding.clone(),
        current_price: Some(quote.price),
        current_value: Some(current_value),
        gain: Some(gain),
        gain_percent: Some(gain_percent),
        day_change,
        day_change_percent,
        price_status: PriceStatus::Live,
    }
}

/// Value a gold holding against the shared per-gram commodity price.
pub fn enrich_gold(holding: &GoldHolding, gram_price: Option<Decimal>) -> EnrichedGold {
    let Some(gram_price) = gram_price else {
        return EnrichedGold {
            holding: holding.clone(),
            live_price_per_gram: None,
            current_value: None,
            gain: None,
            gain_percent: None,
            price_status: PriceStatus::Unavailable,
        };
    };

    let initial_investment = holding.quantity_grams * holding.cost_basis_price_per_gram;
    let current_value = (holding.quantity_grams * gram_price).round_dp(2);
    let gain = (current_value - initial_investment).round_dp(2);
    let gain_percent = if initial_investment.is_zero() {
        Decimal::ZERO
    } else {
        (gain / initial_investment * dec!(100)).round_dp(2)
    };

    EnrichedGold {
        holding: holding.clone(),
        live_price_per_gram: Some(gram_price.round_dp(2)),
        current_value: Some(current_value),
        gain: Some(gain),
        gain_percent: Some(gain_percent),
        price_status: PriceStatus::Live,
    }
}

/// Cash needs no market data: current value is the deposit plus accrued
/// monthly interest, and the gain is the interest itself.
pub fn enrich_cash(holding: &CashHolding, as_of: NaiveDate) -> EnrichedCash {
    let interest_earned = accrued_cash_interest(
        holding.amount,
        holding.monthly_interest_rate,
        holding.start_date,
        as_of,
    );
    let gain_percent = if holding.amount.is_zero() {
        Decimal::ZERO
    } else {
        (interest_earned / holding.amount * dec!(100)).round_dp(2)
    };

    EnrichedCash {
        holding: holding.clone(),
        interest_earned,
        current_value: (holding.amount + interest_earned).round_dp(2),
        gain_percent,
    }
}

pub fn enrich_bond(holding: &BondHolding, as_of: NaiveDate) -> EnrichedBond {
    let interest_accrued = accrued_bond_interest(
        holding.principal_amount,
        holding.coupon_rate,
        holding.issue_date,
        as_of,
    );

    EnrichedBond {
        holding: holding.clone(),
        interest_accrued,
        current_value: (holding.principal_amount + interest_accrued).round_dp(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stock(symbol: &str, cost: Decimal, qty: Decimal) -> StockHolding {
        StockHolding {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            symbol: symbol.to_string(),
            cost_basis_price: cost,
            quantity: qty,
        }
    }

    #[test]
    fn stock_gain_and_day_change_from_quote() {
        let holding = stock("AAPL", dec!(150), dec!(10));
        let quote = Quote {
            price: dec!(180),
            previous_close: Some(dec!(175)),
        };

        let enriched = enrich_stock(&holding, Some(&quote));
        assert_eq!(enriched.price_status, PriceStatus::Live);
        assert_eq!(enriched.current_value, Some(dec!(1800.00)));
        assert_eq!(enriched.gain, Some(dec!(300.00)));
        assert_eq!(enriched.gain_percent, Some(dec!(20.00)));
        assert_eq!(enriched.day_change, Some(dec!(50.00)));
        assert_eq!(enriched.day_change_percent, Some(dec!(2.86)));
    }

    #[test]
    fn stock_without_quote_is_tagged_unavailable() {
        let holding = stock("AAPL", dec!(150), dec!(10));
        let enriched = enrich_stock(&holding, None);
        assert_eq!(enriched.price_status, PriceStatus::Unavailable);
        assert!(enriched.current_value.is_none());
        assert!(enriched.gain.is_none());
        assert!(enriched.day_change.is_none());
    }

    #[test]
    fn stock_without_previous_close_still_prices() {
        let holding = stock("AAPL", dec!(150), dec!(10));
        let quote = Quote {
            price: dec!(180),
            previous_close: None,
        };
        let enriched = enrich_stock(&holding, Some(&quote));
        assert_eq!(enriched.price_status, PriceStatus::Live);
        assert_eq!(enriched.gain, Some(dec!(300.00)));
        assert!(enriched.day_change.is_none());
    }

    #[test]
    fn gold_values_against_gram_price() {
        let holding = GoldHolding {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            quantity_grams: dec!(100),
            cost_basis_price_per_gram: dec!(60),
            purchase_date: date(2024, 1, 1),
        };
        let enriched = enrich_gold(&holding, Some(dec!(75)));
        assert_eq!(enriched.current_value, Some(dec!(7500.00)));
        assert_eq!(enriched.gain, Some(dec!(1500.00)));
        assert_eq!(enriched.gain_percent, Some(dec!(25.00)));
    }

    #[test]
    fn ounce_quote_converts_to_grams() {
        let gram = gram_price_from_ounce(dec!(3110.35));
        assert_eq!(gram.round_dp(2), dec!(100.00));
    }

    #[test]
    fn cash_scenario_six_months_at_one_percent() {
        let holding = CashHolding {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            amount: dec!(10000),
            monthly_interest_rate: dec!(1),
            start_date: date(2025, 1, 10),
            kind: "savings".to_string(),
            bank: "First National".to_string(),
        };
        let enriched = enrich_cash(&holding, date(2025, 7, 10));
        assert_eq!(enriched.interest_earned, dec!(600.00));
        assert_eq!(enriched.current_value, dec!(10600.00));
        assert_eq!(enriched.gain_percent, dec!(6.00));
    }

    #[test]
    fn zero_amount_cash_has_zero_gain_percent() {
        let holding = CashHolding {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            amount: Decimal::ZERO,
            monthly_interest_rate: dec!(1),
            start_date: date(2025, 1, 10),
            kind: "savings".to_string(),
            bank: "First National".to_string(),
        };
        let enriched = enrich_cash(&holding, date(2025, 7, 10));
        assert_eq!(enriched.gain_percent, Decimal::ZERO);
    }

    #[test]
    fn bond_two_year_scenario() {
        let holding = BondHolding {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            bond_name: "Treasury 2027".to_string(),
            issue_date: date(2023, 6, 1),
            maturity_date: date(2027, 6, 1),
            principal_amount: dec!(5000),
            coupon_rate: dec!(5),
        };
        let enriched = enrich_bond(&holding, date(2025, 6, 1));
        assert!((enriched.interest_accrued - dec!(500)).abs() < dec!(1));
        assert!((enriched.current_value - dec!(5500)).abs() < dec!(1));
    }
}
