use domain::{
    AllocationSlice, AssetCategory, CategorySummary, DashboardKpis, DashboardSummary,
    EnrichedBond, EnrichedCash, EnrichedGold, EnrichedStock, HoldingPerformance, MarketMover,
    PerformancePoint, PortfolioBreakdown,
};
use rust_decimal::Decimal;

/// Assemble the dashboard payload from already-enriched holdings. Holdings
/// whose market price was unavailable contribute zero to every aggregate, so
/// a partial quote outage shrinks the totals instead of failing the request.
pub fn build_dashboard(
    stocks: &[EnrichedStock],
    gold: &[EnrichedGold],
    cash: &[EnrichedCash],
    bonds: &[EnrichedBond],
    performance: Vec<PerformancePoint>,
) -> DashboardSummary {
    let breakdown = PortfolioBreakdown {
        stocks: summarize_stocks(stocks),
        gold: summarize_gold(gold),
        cash: summarize_cash(cash),
        bonds: summarize_bonds(bonds),
    };

    let kpis = DashboardKpis {
        total_portfolio_value: breakdown.stocks.value
            + breakdown.gold.value
            + breakdown.cash.value
            + breakdown.bonds.value,
        total_gain_loss: breakdown.stocks.gain
            + breakdown.gold.gain
            + breakdown.cash.gain
            + breakdown.bonds.gain,
        // Day change is only meaningful for exchange-traded stock positions.
        total_day_change: stocks
            .iter()
            .filter_map(|s| s.day_change)
            .sum::<Decimal>(),
    };

    let asset_allocation = [
        (AssetCategory::Stocks, breakdown.stocks.value),
        (AssetCategory::Gold, breakdown.gold.value),
        (AssetCategory::Cash, breakdown.cash.value),
        (AssetCategory::Bonds, breakdown.bonds.value),
    ]
    .into_iter()
    .filter(|(_, value)| *value > Decimal::ZERO)
    .map(|(category, value)| AllocationSlice {
        name: category.label().to_string(),
        value,
    })
    .collect();

    let all_holdings = rank_holdings(stocks, gold, cash, bonds, &breakdown);
    let top_performers = all_holdings
        .iter()
        .filter(|h| h.gain > Decimal::ZERO)
        .take(3)
        .cloned()
        .collect();
    let mut losers: Vec<HoldingPerformance> = all_holdings
        .iter()
        .filter(|h| h.gain < Decimal::ZERO)
        .cloned()
        .collect();
    losers.sort_by(|a, b| a.gain.cmp(&b.gain));
    losers.truncate(3);

    let market_movers = stocks
        .iter()
        .map(|s| MarketMover {
            name: s.holding.symbol.clone(),
            value: s.current_price.unwrap_or(Decimal::ZERO),
            change: s.day_change_percent,
        })
        .collect();

    DashboardSummary {
        kpis,
        breakdown,
        asset_allocation,
        performance,
        market_movers,
        top_performers,
        worst_performers: losers,
    }
}

fn summarize_stocks(stocks: &[EnrichedStock]) -> CategorySummary {
    stocks.iter().fold(CategorySummary::default(), |acc, s| {
        CategorySummary {
            value: acc.value + s.current_value.unwrap_or(Decimal::ZERO),
            gain: acc.gain + s.gain.unwrap_or(Decimal::ZERO),
        }
    })
}

fn summarize_gold(gold: &[EnrichedGold]) -> CategorySummary {
    gold.iter().fold(CategorySummary::default(), |acc, g| {
        CategorySummary {
            value: acc.value + g.current_value.unwrap_or(Decimal::ZERO),
            gain: acc.gain + g.gain.unwrap_or(Decimal::ZERO),
        }
    })
}

fn summarize_cash(cash: &[EnrichedCash]) -> CategorySummary {
    cash.iter().fold(CategorySummary::default(), |acc, c| {
        CategorySummary {
            value: acc.value + c.current_value,
            gain: acc.gain + c.interest_earned,
        }
    })
}

fn summarize_bonds(bonds: &[EnrichedBond]) -> CategorySummary {
    bonds.iter().fold(CategorySummary::default(), |acc, b| {
        CategorySummary {
            value: acc.value + b.current_value,
            gain: acc.gain + b.interest_accrued,
        }
    })
}

/// Flatten every position into one ranking, sorted by gain descending.
/// Individual gold lots collapse into a single category-level entry so a
/// stack of small lots does not crowd out other holdings.
fn rank_holdings(
    stocks: &[EnrichedStock],
    gold: &[EnrichedGold],
    cash: &[EnrichedCash],
    bonds: &[EnrichedBond],
    breakdown: &PortfolioBreakdown,
) -> Vec<HoldingPerformance> {
    let mut out: Vec<HoldingPerformance> = Vec::new();

    for s in stocks {
        out.push(HoldingPerformance {
            name: s.holding.symbol.clone(),
            category: AssetCategory::Stocks,
            current_value: s.current_value.unwrap_or(Decimal::ZERO),
            gain: s.gain.unwrap_or(Decimal::ZERO),
        });
    }
    if !gold.is_empty() {
        out.push(HoldingPerformance {
            name: "Gold".to_string(),
            category: AssetCategory::Gold,
            current_value: breakdown.gold.value,
            gain: breakdown.gold.gain,
        });
    }
    for c in cash {
        out.push(HoldingPerformance {
            name: c.holding.bank.clone(),
            category: AssetCategory::Cash,
            current_value: c.current_value,
            gain: c.interest_earned,
        });
    }
    for b in bonds {
        out.push(HoldingPerformance {
            name: b.holding.bond_name.clone(),
            category: AssetCategory::Bonds,
            current_value: b.current_value,
            gain: b.interest_accrued,
        });
    }

    out.sort_by(|a, b| b.gain.cmp(&a.gain));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::{enrich_cash, enrich_gold, enrich_stock};
    use chrono::NaiveDate;
    use domain::{CashHolding, GoldHolding, PriceStatus, Quote, StockHolding};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stock(symbol: &str, cost: Decimal, qty: Decimal, quote: Option<Quote>) -> EnrichedStock {
        let holding = StockHolding {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            symbol: symbol.to_string(),
            cost_basis_price: cost,
            quantity: qty,
        };
        enrich_stock(&holding, quote.as_ref())
    }

    fn gold_lot(grams: Decimal, cost: Decimal, gram_price: Option<Decimal>) -> EnrichedGold {
        let holding = GoldHolding {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            quantity_grams: grams,
            cost_basis_price_per_gram: cost,
            purchase_date: date(2024, 1, 1),
        };
        enrich_gold(&holding, gram_price)
    }

    fn cash_account(bank: &str, amount: Decimal) -> EnrichedCash {
        let holding = CashHolding {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            amount,
            monthly_interest_rate: dec!(1),
            start_date: date(2025, 1, 10),
            kind: "savings".to_string(),
            bank: bank.to_string(),
        };
        enrich_cash(&holding, date(2025, 7, 10))
    }

    #[test]
    fn totals_sum_category_summaries() {
        let stocks = vec![stock(
            "AAPL",
            dec!(150),
            dec!(10),
            Some(Quote {
                price: dec!(180),
                previous_close: Some(dec!(175)),
            }),
        )];
        let gold = vec![gold_lot(dec!(100), dec!(60), Some(dec!(75)))];
        let cash = vec![cash_account("First National", dec!(10000))];

        let summary = build_dashboard(&stocks, &gold, &cash, &[], Vec::new());

        assert_eq!(summary.breakdown.stocks.value, dec!(1800.00));
        assert_eq!(summary.breakdown.gold.value, dec!(7500.00));
        assert_eq!(summary.breakdown.cash.value, dec!(10600.00));
        assert_eq!(
            summary.kpis.total_portfolio_value,
            dec!(1800.00) + dec!(7500.00) + dec!(10600.00)
        );
        assert_eq!(
            summary.kpis.total_gain_loss,
            dec!(300.00) + dec!(1500.00) + dec!(600.00)
        );
        assert_eq!(summary.kpis.total_day_change, dec!(50.00));
    }

    #[test]
    fn unpriced_holdings_contribute_zero_not_failure() {
        let stocks = vec![
            stock(
                "AAPL",
                dec!(150),
                dec!(10),
                Some(Quote {
                    price: dec!(180),
                    previous_close: Some(dec!(175)),
                }),
            ),
            stock("FAIL", dec!(50), dec!(100), None),
        ];

        let summary = build_dashboard(&stocks, &[], &[], &[], Vec::new());

        assert_eq!(summary.breakdown.stocks.value, dec!(1800.00));
        assert_eq!(summary.kpis.total_gain_loss, dec!(300.00));
        // The failed symbol still shows up as a mover, priced at zero.
        let fail = summary
            .market_movers
            .iter()
            .find(|m| m.name == "FAIL")
            .unwrap();
        assert_eq!(fail.value, Decimal::ZERO);
        assert!(fail.change.is_none());
        assert_eq!(stocks[1].price_status, PriceStatus::Unavailable);
    }

    #[test]
    fn allocation_skips_empty_categories_and_uses_labels() {
        let gold = vec![gold_lot(dec!(10), dec!(60), Some(dec!(75)))];
        let summary = build_dashboard(&[], &gold, &[], &[], Vec::new());

        assert_eq!(
            summary.asset_allocation,
            vec![AllocationSlice {
                name: "Gold".to_string(),
                value: dec!(750.00),
            }]
        );
    }

    #[test]
    fn gold_lots_collapse_into_one_ranked_entry() {
        let gold = vec![
            gold_lot(dec!(10), dec!(60), Some(dec!(75))),
            gold_lot(dec!(20), dec!(50), Some(dec!(75))),
        ];
        let summary = build_dashboard(&[], &gold, &[], &[], Vec::new());

        assert_eq!(summary.top_performers.len(), 1);
        let entry = &summary.top_performers[0];
        assert_eq!(entry.name, "Gold");
        assert_eq!(entry.current_value, dec!(750.00) + dec!(1500.00));
        assert_eq!(entry.gain, dec!(150.00) + dec!(500.00));
    }

    #[test]
    fn performer_lists_are_ranked_and_capped_at_three() {
        let quote = |price: Decimal| {
            Some(Quote {
                price,
                previous_close: None,
            })
        };
        let stocks = vec![
            stock("A", dec!(100), dec!(1), quote(dec!(110))), // +10
            stock("B", dec!(100), dec!(1), quote(dec!(140))), // +40
            stock("C", dec!(100), dec!(1), quote(dec!(120))), // +20
            stock("D", dec!(100), dec!(1), quote(dec!(130))), // +30
            stock("E", dec!(100), dec!(1), quote(dec!(95))),  // -5
            stock("F", dec!(100), dec!(1), quote(dec!(60))),  // -40
            stock("G", dec!(100), dec!(1), quote(dec!(80))),  // -20
            stock("H", dec!(100), dec!(1), quote(dec!(70))),  // -30
        ];

        let summary = build_dashboard(&stocks, &[], &[], &[], Vec::new());

        let top: Vec<&str> = summary
            .top_performers
            .iter()
            .map(|h| h.name.as_str())
            .collect();
        assert_eq!(top, vec!["B", "D", "C"]);

        let worst: Vec<&str> = summary
            .worst_performers
            .iter()
            .map(|h| h.name.as_str())
            .collect();
        assert_eq!(worst, vec!["F", "H", "G"]);
    }

    #[test]
    fn zero_gain_holdings_rank_in_neither_list() {
        let stocks = vec![stock(
            "FLAT",
            dec!(100),
            dec!(1),
            Some(Quote {
                price: dec!(100),
                previous_close: None,
            }),
        )];
        let summary = build_dashboard(&stocks, &[], &[], &[], Vec::new());
        assert!(summary.top_performers.is_empty());
        assert!(summary.worst_performers.is_empty());
    }

    #[test]
    fn empty_portfolio_builds_an_empty_dashboard() {
        let summary = build_dashboard(&[], &[], &[], &[], Vec::new());
        assert_eq!(summary.kpis.total_portfolio_value, Decimal::ZERO);
        assert!(summary.asset_allocation.is_empty());
        assert!(summary.market_movers.is_empty());
        assert!(summary.top_performers.is_empty());
        assert!(summary.worst_performers.is_empty());
    }
}
