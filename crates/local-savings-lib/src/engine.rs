use crate::aggregation::{aggregate, DEFAULT_REFERENCE_MONTHLY_COST};
use crate::calculator::Calculator;
use crate::data_structures::{
    fields as ids, format_currency, to_fixed, AggregateState, AggregateSummary, Category,
    DiningInput, GasInput, GroceryInput, Projection,
};
use crate::fields::{number_or_zero, FieldProvider};
use tracing::debug;

/// Runs category projections against a field provider and keeps the running
/// aggregate for the session.
pub struct SavingsEngine {
    calculator: Calculator,
    state: AggregateState,
    reference_monthly_cost: f64,
}

impl SavingsEngine {
    pub fn new() -> Self {
        Self::with_reference_cost(DEFAULT_REFERENCE_MONTHLY_COST)
    }

    pub fn with_reference_cost(reference_monthly_cost: f64) -> Self {
        Self {
            calculator: Calculator::new(),
            state: AggregateState::new(),
            reference_monthly_cost,
        }
    }

    pub fn read_gas_input<F: FieldProvider + ?Sized>(fields: &F) -> GasInput {
        GasInput::new(
            number_or_zero(fields, ids::MILES_PER_WEEK),
            fields.get_number(ids::MPG).unwrap_or(1.0),
            number_or_zero(fields, ids::EXPENSIVE_PRICE),
            number_or_zero(fields, ids::CHEAP_PRICE),
        )
    }

    pub fn read_grocery_input<F: FieldProvider + ?Sized>(fields: &F) -> GroceryInput {
        GroceryInput::new(
            number_or_zero(fields, ids::WEEKLY_GROCERY_BUDGET),
            number_or_zero(fields, ids::SALE_PERCENTAGE),
            number_or_zero(fields, ids::AVERAGE_DISCOUNT),
            number_or_zero(fields, ids::COUPON_SAVINGS),
        )
    }

    pub fn read_dining_input<F: FieldProvider + ?Sized>(fields: &F) -> DiningInput {
        DiningInput::new(
            number_or_zero(fields, ids::MEALS_OUT_PER_WEEK),
            number_or_zero(fields, ids::AVERAGE_MEAL_COST),
            number_or_zero(fields, ids::HOME_MEAL_COST),
            number_or_zero(fields, ids::MEALS_TO_REDUCE),
        )
    }

    /// Projects one category from the current field values without touching
    /// any state.
    pub fn project<F: FieldProvider + ?Sized>(&self, category: Category, fields: &F) -> Projection {
        match category {
            Category::Gas => self.calculator.project_gas(&Self::read_gas_input(fields)),
            Category::Grocery => self
                .calculator
                .project_grocery(&Self::read_grocery_input(fields)),
            Category::Dining => self
                .calculator
                .project_dining(&Self::read_dining_input(fields)),
        }
    }

    /// Recomputes `category`, writes its outputs, folds it into the aggregate
    /// and refreshes the total. A rejected projection only writes its insight.
    pub fn recalculate<F: FieldProvider + ?Sized>(
        &mut self,
        category: Category,
        fields: &mut F,
    ) -> Projection {
        let projection = self.project(category, fields);

        match &projection {
            Projection::Rejected { insight } => {
                debug!(category = %category, "projection rejected");
                fields.set_text(&category.insight_id(), insight);
            }
            Projection::Computed(result) => {
                debug!(
                    category = %category,
                    annual = result.annual_savings(),
                    "projection computed"
                );
                fields.set_text(
                    &category.weekly_output_id(),
                    &format_currency(result.weekly_savings()),
                );
                fields.set_text(
                    &category.monthly_output_id(),
                    &format_currency(result.monthly_savings()),
                );
                fields.set_text(
                    &category.annual_output_id(),
                    &format_currency(result.annual_savings()),
                );
                fields.set_text(&category.insight_id(), result.insight());

                self.state = self.state.apply(category, &projection);
                self.update_total(fields);
            }
        }

        projection
    }

    /// Writes the combined total. Does nothing while the total is not positive.
    pub fn update_total<F: FieldProvider + ?Sized>(&self, fields: &mut F) -> Option<AggregateSummary> {
        let summary = aggregate(&self.state, self.reference_monthly_cost)?;

        fields.set_visible(ids::TOTAL_SAVINGS_DISPLAY, true);
        fields.set_text(
            ids::TOTAL_ANNUAL_SAVINGS,
            &format!("${}", to_fixed(summary.total_annual(), 0)),
        );
        fields.set_text(
            ids::INSURANCE_COMPARISON,
            &summary.months_covered().to_string(),
        );

        Some(summary)
    }

    pub fn state(&self) -> &AggregateState {
        &self.state
    }

    pub fn summary(&self) -> Option<AggregateSummary> {
        aggregate(&self.state, self.reference_monthly_cost)
    }

    pub fn reference_monthly_cost(&self) -> f64 {
        self.reference_monthly_cost
    }
}

impl Default for SavingsEngine {
    fn default() -> Self {
        Self::new()
    }
}
