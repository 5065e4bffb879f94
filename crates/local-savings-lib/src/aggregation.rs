use crate::data_structures::{AggregateState, AggregateSummary};

/// Reference monthly cost the combined savings are compared against
/// (a month of car insurance).
pub const DEFAULT_REFERENCE_MONTHLY_COST: f64 = 95.0;

/// Sums the computed categories. Returns `None` while nothing positive has
/// been computed, in which case the total display stays hidden.
pub fn aggregate(state: &AggregateState, reference_monthly_cost: f64) -> Option<AggregateSummary> {
    let total_annual = state.total_annual();
    if total_annual <= 0.0 {
        return None;
    }

    let months_covered = if reference_monthly_cost > 0.0 {
        (total_annual / reference_monthly_cost).round() as i64
    } else {
        0
    };

    Some(AggregateSummary::new(total_annual, months_covered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::Category;

    #[test]
    fn test_empty_state_has_no_summary() {
        assert_eq!(aggregate(&AggregateState::new(), DEFAULT_REFERENCE_MONTHLY_COST), None);
    }

    #[test]
    fn test_negative_total_has_no_summary() {
        let state = AggregateState::new().with_annual(Category::Grocery, -12.0);
        assert!(aggregate(&state, DEFAULT_REFERENCE_MONTHLY_COST).is_none());
    }

    #[test]
    fn test_total_sums_every_category() {
        let state = AggregateState::new()
            .with_annual(Category::Gas, 93.6)
            .with_annual(Category::Grocery, 884.0)
            .with_annual(Category::Dining, 1560.0);

        let summary = aggregate(&state, DEFAULT_REFERENCE_MONTHLY_COST).unwrap();
        assert!((summary.total_annual() - 2537.6).abs() < 1e-9);
        // 2537.6 / 95 = 26.71
        assert_eq!(summary.months_covered(), 27);
    }

    #[test]
    fn test_uncomputed_categories_contribute_zero() {
        let state = AggregateState::new().with_annual(Category::Dining, 1560.0);
        let summary = aggregate(&state, DEFAULT_REFERENCE_MONTHLY_COST).unwrap();
        assert_eq!(summary.total_annual(), 1560.0);
        assert_eq!(summary.months_covered(), 16);
    }

    #[test]
    fn test_months_round_half_up() {
        let state = AggregateState::new().with_annual(Category::Gas, 142.5);
        // 142.5 / 95 = 1.5
        assert_eq!(aggregate(&state, 95.0).unwrap().months_covered(), 2);
    }
}
