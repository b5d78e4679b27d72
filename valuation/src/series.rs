use chrono::{Duration, Local, NaiveDate};
use domain::PerformancePoint;
use rand::Rng;
use rust_decimal::Decimal;

/// Source of the dashboard's historical performance chart.
pub trait PerformanceSeries: Send + Sync {
    fn series(&self, days: u32) -> Vec<PerformancePoint>;
}

/// Placeholder series while no valuation history is persisted: a bounded
/// random walk ending today. Each call produces a fresh walk.
pub struct SyntheticPerformanceSeries {
    start_value: f64,
    daily_swing: f64,
}

impl SyntheticPerformanceSeries {
    pub fn new() -> Self {
        Self {
            start_value: 250_000.0,
            daily_swing: 7_000.0,
        }
    }

    fn walk(&self, days: u32, today: NaiveDate) -> Vec<PerformancePoint> {
        let mut rng = rand::thread_rng();
        let mut value = self.start_value;
        let mut points = Vec::with_capacity(days as usize + 1);
        for offset in (0..=days).rev() {
            let date = today - Duration::days(offset as i64);
            points.push(PerformancePoint {
                date,
                value: Decimal::from(value.round() as i64),
            });
            value += rng.gen_range(-self.daily_swing..self.daily_swing);
        }
        points
    }
}

impl Default for SyntheticPerformanceSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceSeries for SyntheticPerformanceSeries {
    fn series(&self, days: u32) -> Vec<PerformancePoint> {
        self.walk(days, Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_has_one_point_per_day_ending_today() {
        let today = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
        let points = SyntheticPerformanceSeries::new().walk(30, today);

        assert_eq!(points.len(), 31);
        assert_eq!(points.first().unwrap().date, today - Duration::days(30));
        assert_eq!(points.last().unwrap().date, today);
        for pair in points.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
    }

    #[test]
    fn walk_starts_at_the_baseline_and_stays_bounded() {
        let today = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
        let points = SyntheticPerformanceSeries::new().walk(30, today);

        assert_eq!(points[0].value, Decimal::from(250_000));
        for pair in points.windows(2) {
            let step = (pair[1].value - pair[0].value).abs();
            assert!(step <= Decimal::from(7_001), "step {step} out of range");
        }
    }
}
