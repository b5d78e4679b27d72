use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Simple (non-compounding) bond interest accrued between `issue_date` and
/// `as_of`, prorated over 365.25-day years and rounded to 2 decimal places.
/// A future-dated issue accrues nothing. Accrual does not stop at maturity;
/// the stored maturity date is informational only.
pub fn accrued_bond_interest(
    principal: Decimal,
    annual_rate_percent: Decimal,
    issue_date: NaiveDate,
    as_of: NaiveDate,
) -> Decimal {
    let elapsed_days = (as_of - issue_date).num_days();
    if elapsed_days <= 0 {
        return Decimal::ZERO;
    }
    let elapsed_years = Decimal::from(elapsed_days) / dec!(365.25);
    (principal * annual_rate_percent / dec!(100) * elapsed_years).round_dp(2)
}

/// Cash deposit interest over whole elapsed months, rounded to 2 decimal
/// places. A month only counts once its day-of-month boundary has passed, so
/// a 29-day month and a 31-day month contribute identically. Never negative.
pub fn accrued_cash_interest(
    principal: Decimal,
    monthly_rate_percent: Decimal,
    start_date: NaiveDate,
    as_of: NaiveDate,
) -> Decimal {
    let mut months =
        (as_of.year() - start_date.year()) * 12 + as_of.month() as i32 - start_date.month() as i32;
    if as_of.day() < start_date.day() {
        months -= 1;
    }
    let months = months.max(0);
    (principal * monthly_rate_percent / dec!(100) * Decimal::from(months)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn bond_interest_is_zero_for_future_issue() {
        let interest =
            accrued_bond_interest(dec!(10000), dec!(5), date(2030, 1, 1), date(2025, 6, 1));
        assert_eq!(interest, Decimal::ZERO);
    }

    #[test]
    fn bond_interest_is_zero_on_issue_day() {
        let interest =
            accrued_bond_interest(dec!(10000), dec!(5), date(2025, 6, 1), date(2025, 6, 1));
        assert_eq!(interest, Decimal::ZERO);
    }

    #[test]
    fn bond_interest_one_year_is_close_to_flat_rate() {
        // 365 elapsed days vs the 365.25 divisor leaves a sub-1% gap.
        let interest =
            accrued_bond_interest(dec!(5000), dec!(5), date(2024, 3, 10), date(2025, 3, 10));
        assert!((interest - dec!(250)).abs() < dec!(0.5), "got {interest}");
    }

    #[test]
    fn bond_interest_two_year_scenario() {
        let interest =
            accrued_bond_interest(dec!(5000), dec!(5), date(2023, 6, 1), date(2025, 6, 1));
        assert!((interest - dec!(500)).abs() < dec!(1), "got {interest}");
    }

    #[test]
    fn cash_interest_counts_whole_months_on_the_boundary() {
        let interest =
            accrued_cash_interest(dec!(10000), dec!(1), date(2025, 1, 15), date(2025, 7, 15));
        assert_eq!(interest, dec!(600.00));
    }

    #[test]
    fn cash_interest_drops_partial_final_month() {
        let interest =
            accrued_cash_interest(dec!(10000), dec!(1), date(2025, 1, 15), date(2025, 7, 14));
        assert_eq!(interest, dec!(500.00));
    }

    #[test]
    fn cash_interest_is_zero_before_first_month_completes() {
        let interest =
            accrued_cash_interest(dec!(10000), dec!(1), date(2025, 7, 1), date(2025, 7, 20));
        assert_eq!(interest, Decimal::ZERO);
    }

    #[test]
    fn cash_interest_never_goes_negative_for_future_start() {
        let interest =
            accrued_cash_interest(dec!(10000), dec!(1), date(2026, 1, 1), date(2025, 7, 1));
        assert_eq!(interest, Decimal::ZERO);
    }

    #[test]
    fn cash_interest_month_length_does_not_matter() {
        // February (28 days) and March (31 days) each count as one month.
        let feb = accrued_cash_interest(dec!(1000), dec!(2), date(2025, 2, 3), date(2025, 3, 3));
        let mar = accrued_cash_interest(dec!(1000), dec!(2), date(2025, 3, 3), date(2025, 4, 3));
        assert_eq!(feb, dec!(20.00));
        assert_eq!(feb, mar);
    }
}
