use crate::data_structures::{
    to_fixed, CategoryResult, DiningInput, GasInput, GroceryInput, Projection, WEEKS_PER_YEAR,
};

pub const GAS_PRICE_ORDER_MESSAGE: &str =
    "The expensive station price should be higher than the cheap station price.";
pub const DINING_COST_ORDER_MESSAGE: &str =
    "Home cooking cost should be less than dining out cost for savings.";

pub struct Calculator;

impl Calculator {
    pub fn new() -> Self {
        Self
    }

    pub fn project_gas(&self, input: &GasInput) -> Projection {
        if input.expensive_price() <= input.cheap_price() {
            return Projection::Rejected {
                insight: GAS_PRICE_ORDER_MESSAGE.to_string(),
            };
        }

        let gallons_per_week = input.gallons_per_week();
        let weekly_savings = gallons_per_week * input.price_difference();
        let annual_savings = weekly_savings * WEEKS_PER_YEAR;

        let mut insight = format!(
            "By choosing the cheapest gas station in Elkin, you use {} gallons per week and save {}¢ per gallon.",
            to_fixed(gallons_per_week, 1),
            to_fixed(input.price_difference() * 100.0, 1)
        );

        if annual_savings > 100.0 {
            insight.push_str(" That's enough to cover your vehicle registration fees!");
        } else if annual_savings > 50.0 {
            insight.push_str(" Every little bit helps with rising costs!");
        }

        Projection::Computed(CategoryResult::new(weekly_savings, insight))
    }

    pub fn project_grocery(&self, input: &GroceryInput) -> Projection {
        let weekly_savings = input.sale_savings() + input.coupon_savings();
        let annual_savings = weekly_savings * WEEKS_PER_YEAR;

        let savings_percentage = if input.weekly_budget() > 0.0 {
            to_fixed(weekly_savings / input.weekly_budget() * 100.0, 1)
        } else {
            "0".to_string()
        };

        let mut insight = format!(
            "You're saving {}% on your grocery budget through sales and coupons.",
            savings_percentage
        );

        if annual_savings > 500.0 {
            insight.push_str(" That's like getting a month of groceries free every year!");
        } else if annual_savings > 200.0 {
            insight.push_str(" That adds up to significant savings over time!");
        }

        Projection::Computed(CategoryResult::new(weekly_savings, insight))
    }

    pub fn project_dining(&self, input: &DiningInput) -> Projection {
        if input.average_meal_cost() <= input.home_meal_cost() {
            return Projection::Rejected {
                insight: DINING_COST_ORDER_MESSAGE.to_string(),
            };
        }

        let savings_per_meal = input.savings_per_meal();
        let weekly_savings = input.meals_to_reduce() * savings_per_meal;
        let annual_savings = weekly_savings * WEEKS_PER_YEAR;

        let mut insight = format!(
            "By cooking {} more meals at home each week, you save ${} per meal.",
            input.meals_to_reduce(),
            to_fixed(savings_per_meal, 2)
        );

        if annual_savings > 1000.0 {
            insight.push_str(" That's enough for a nice vacation!");
        } else if annual_savings > 500.0 {
            insight.push_str(" That could cover several months of utilities!");
        }

        Projection::Computed(CategoryResult::new(weekly_savings, insight))
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn computed(projection: Projection) -> CategoryResult {
        match projection {
            Projection::Computed(result) => result,
            Projection::Rejected { insight } => panic!("unexpected rejection: {}", insight),
        }
    }

    #[test]
    fn test_gas_example() {
        let calculator = Calculator::new();
        let input = GasInput::new(150.0, 25.0, 3.20, 2.90);

        let result = computed(calculator.project_gas(&input));
        assert!((input.gallons_per_week() - 6.0).abs() < 1e-12);
        assert_eq!(format!("{:.2}", result.weekly_savings()), "1.80");
        assert_eq!(format!("{:.2}", result.monthly_savings()), "7.79");
        assert_eq!(format!("{:.2}", result.annual_savings()), "93.60");
        assert_eq!(
            result.insight(),
            "By choosing the cheapest gas station in Elkin, you use 6.0 gallons per week and save 30.0¢ per gallon. Every little bit helps with rising costs!"
        );
    }

    #[test]
    fn test_gas_rejects_inverted_prices() {
        let calculator = Calculator::new();

        let equal = calculator.project_gas(&GasInput::new(150.0, 25.0, 3.0, 3.0));
        assert_eq!(equal.insight(), GAS_PRICE_ORDER_MESSAGE);
        assert!(equal.is_rejected());

        let inverted = calculator.project_gas(&GasInput::new(150.0, 25.0, 2.5, 3.0));
        assert!(inverted.is_rejected());
    }

    #[test]
    fn test_gas_top_tier_takes_precedence() {
        let calculator = Calculator::new();
        // 300 mi / 20 mpg = 15 gal, 15 * 0.25 * 52 = 195
        let result = computed(calculator.project_gas(&GasInput::new(300.0, 20.0, 3.25, 3.0)));
        assert!(result
            .insight()
            .ends_with("That's enough to cover your vehicle registration fees!"));
        assert!(!result.insight().contains("Every little bit"));
    }

    #[test]
    fn test_gas_low_savings_has_no_tier() {
        let calculator = Calculator::new();
        let result = computed(calculator.project_gas(&GasInput::new(20.0, 25.0, 3.10, 3.00)));
        assert!(result.insight().ends_with("per gallon."));
    }

    #[test]
    fn test_grocery_example() {
        let calculator = Calculator::new();
        let input = GroceryInput::new(150.0, 40.0, 20.0, 5.0);

        let result = computed(calculator.project_grocery(&input));
        assert!((result.weekly_savings() - 17.0).abs() < 1e-9);
        assert!((result.annual_savings() - 884.0).abs() < 1e-9);
        assert_eq!(
            result.insight(),
            "You're saving 11.3% on your grocery budget through sales and coupons. That's like getting a month of groceries free every year!"
        );
    }

    #[test]
    fn test_grocery_zero_budget_reports_zero_percent() {
        let calculator = Calculator::new();
        let result = computed(calculator.project_grocery(&GroceryInput::new(0.0, 40.0, 20.0, 5.0)));

        assert_eq!(result.weekly_savings(), 5.0);
        assert!(result.insight().starts_with("You're saving 0% on"));
        // 5 * 52 = 260
        assert!(result
            .insight()
            .ends_with("That adds up to significant savings over time!"));
    }

    #[test]
    fn test_dining_example() {
        let calculator = Calculator::new();
        let input = DiningInput::new(4.0, 15.0, 5.0, 3.0);

        let result = computed(calculator.project_dining(&input));
        assert_eq!(result.weekly_savings(), 30.0);
        assert_eq!(result.annual_savings(), 1560.0);
        assert_eq!(
            result.insight(),
            "By cooking 3 more meals at home each week, you save $10.00 per meal. That's enough for a nice vacation!"
        );
    }

    #[test]
    fn test_dining_middle_tier() {
        let calculator = Calculator::new();
        // 1 * 12 * 52 = 624
        let result = computed(calculator.project_dining(&DiningInput::new(3.0, 17.0, 5.0, 1.0)));
        assert!(result
            .insight()
            .ends_with("That could cover several months of utilities!"));
    }

    #[test]
    fn test_dining_rejects_cheaper_restaurant() {
        let calculator = Calculator::new();
        let projection = calculator.project_dining(&DiningInput::new(3.0, 5.0, 5.0, 2.0));
        assert_eq!(
            projection,
            Projection::Rejected {
                insight: DINING_COST_ORDER_MESSAGE.to_string()
            }
        );
    }

    proptest! {
        #[test]
        fn prop_gas_annual_matches_closed_form(
            miles in 0.0f64..2000.0,
            mpg in 1.0f64..80.0,
            cheap in 0.0f64..10.0,
            spread in 0.001f64..5.0,
        ) {
            let expensive = cheap + spread;
            prop_assume!(expensive > cheap);
            let projection = Calculator::new().project_gas(&GasInput::new(miles, mpg, expensive, cheap));
            let result = projection.result().cloned().unwrap();
            prop_assert_eq!(result.annual_savings(), (miles / mpg) * (expensive - cheap) * 52.0);
        }

        #[test]
        fn prop_gas_inverted_prices_always_rejected(
            miles in 0.0f64..2000.0,
            mpg in 1.0f64..80.0,
            expensive in 0.0f64..10.0,
            extra in 0.0f64..5.0,
        ) {
            let projection = Calculator::new().project_gas(&GasInput::new(miles, mpg, expensive, expensive + extra));
            prop_assert_eq!(projection.insight(), GAS_PRICE_ORDER_MESSAGE);
            prop_assert!(projection.is_rejected());
        }
    }
}
