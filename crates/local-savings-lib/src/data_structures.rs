use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const WEEKS_PER_MONTH: f64 = 4.33;
pub const WEEKS_PER_YEAR: f64 = 52.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Gas,
    Grocery,
    Dining,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Gas, Category::Grocery, Category::Dining];

    pub fn key(&self) -> &'static str {
        match self {
            Category::Gas => "gas",
            Category::Grocery => "grocery",
            Category::Dining => "dining",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::Gas => "Gas",
            Category::Grocery => "Groceries",
            Category::Dining => "Dining Out",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::Gas => "Fill up at the cheapest station in town",
            Category::Grocery => "Shop the weekly sales and clip coupons",
            Category::Dining => "Swap a few restaurant meals for home cooking",
        }
    }

    pub fn panel_id(&self) -> String {
        format!("{}-calculator", self.key())
    }

    pub fn weekly_output_id(&self) -> String {
        format!("weekly-{}-savings", self.key())
    }

    pub fn monthly_output_id(&self) -> String {
        format!("monthly-{}-savings", self.key())
    }

    pub fn annual_output_id(&self) -> String {
        format!("annual-{}-savings", self.key())
    }

    pub fn insight_id(&self) -> String {
        format!("{}-insight", self.key())
    }

    /// Input field ids, in the order they appear on the panel.
    pub fn input_ids(&self) -> &'static [&'static str] {
        match self {
            Category::Gas => &[
                fields::MILES_PER_WEEK,
                fields::MPG,
                fields::EXPENSIVE_PRICE,
                fields::CHEAP_PRICE,
            ],
            Category::Grocery => &[
                fields::WEEKLY_GROCERY_BUDGET,
                fields::SALE_PERCENTAGE,
                fields::AVERAGE_DISCOUNT,
                fields::COUPON_SAVINGS,
            ],
            Category::Dining => &[
                fields::MEALS_OUT_PER_WEEK,
                fields::AVERAGE_MEAL_COST,
                fields::HOME_MEAL_COST,
                fields::MEALS_TO_REDUCE,
            ],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gas" => Ok(Category::Gas),
            "grocery" | "groceries" => Ok(Category::Grocery),
            "dining" => Ok(Category::Dining),
            other => Err(anyhow::anyhow!("Unknown savings category: {}", other)),
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Gas
    }
}

/// Element ids the calculators read from and write to.
pub mod fields {
    pub const MILES_PER_WEEK: &str = "miles-per-week";
    pub const MPG: &str = "mpg";
    pub const EXPENSIVE_PRICE: &str = "expensive-price";
    pub const CHEAP_PRICE: &str = "cheap-price";

    pub const WEEKLY_GROCERY_BUDGET: &str = "weekly-grocery-budget";
    pub const SALE_PERCENTAGE: &str = "sale-percentage";
    pub const AVERAGE_DISCOUNT: &str = "average-discount";
    pub const COUPON_SAVINGS: &str = "coupon-savings";

    pub const MEALS_OUT_PER_WEEK: &str = "meals-out-per-week";
    pub const AVERAGE_MEAL_COST: &str = "average-meal-cost";
    pub const HOME_MEAL_COST: &str = "home-meal-cost";
    pub const MEALS_TO_REDUCE: &str = "meals-to-reduce";

    pub const TOTAL_SAVINGS_DISPLAY: &str = "total-savings-display";
    pub const TOTAL_ANNUAL_SAVINGS: &str = "total-annual-savings";
    pub const INSURANCE_COMPARISON: &str = "insurance-comparison";
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GasInput {
    miles_per_week: f64,
    mpg: f64,
    expensive_price: f64,
    cheap_price: f64,
}

impl GasInput {
    /// A zero or non-finite `mpg` is floored to 1.
    pub fn new(miles_per_week: f64, mpg: f64, expensive_price: f64, cheap_price: f64) -> Self {
        let mpg = if mpg == 0.0 || !mpg.is_finite() { 1.0 } else { mpg };
        Self {
            miles_per_week,
            mpg,
            expensive_price,
            cheap_price,
        }
    }

    pub fn miles_per_week(&self) -> f64 {
        self.miles_per_week
    }

    pub fn mpg(&self) -> f64 {
        self.mpg
    }

    pub fn expensive_price(&self) -> f64 {
        self.expensive_price
    }

    pub fn cheap_price(&self) -> f64 {
        self.cheap_price
    }

    pub fn gallons_per_week(&self) -> f64 {
        self.miles_per_week / self.mpg
    }

    pub fn price_difference(&self) -> f64 {
        self.expensive_price - self.cheap_price
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroceryInput {
    weekly_budget: f64,
    sale_fraction: f64,
    discount_fraction: f64,
    coupon_savings: f64,
}

impl GroceryInput {
    /// Percentages are given on a 0-100 scale and stored as fractions.
    pub fn new(
        weekly_budget: f64,
        sale_percentage: f64,
        average_discount: f64,
        coupon_savings: f64,
    ) -> Self {
        Self {
            weekly_budget,
            sale_fraction: sale_percentage / 100.0,
            discount_fraction: average_discount / 100.0,
            coupon_savings,
        }
    }

    pub fn weekly_budget(&self) -> f64 {
        self.weekly_budget
    }

    pub fn sale_fraction(&self) -> f64 {
        self.sale_fraction
    }

    pub fn discount_fraction(&self) -> f64 {
        self.discount_fraction
    }

    pub fn coupon_savings(&self) -> f64 {
        self.coupon_savings
    }

    pub fn sale_savings(&self) -> f64 {
        self.weekly_budget * self.sale_fraction * self.discount_fraction
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DiningInput {
    meals_out_per_week: f64,
    average_meal_cost: f64,
    home_meal_cost: f64,
    meals_to_reduce: f64,
}

impl DiningInput {
    pub fn new(
        meals_out_per_week: f64,
        average_meal_cost: f64,
        home_meal_cost: f64,
        meals_to_reduce: f64,
    ) -> Self {
        Self {
            meals_out_per_week,
            average_meal_cost,
            home_meal_cost,
            meals_to_reduce,
        }
    }

    pub fn meals_out_per_week(&self) -> f64 {
        self.meals_out_per_week
    }

    pub fn average_meal_cost(&self) -> f64 {
        self.average_meal_cost
    }

    pub fn home_meal_cost(&self) -> f64 {
        self.home_meal_cost
    }

    pub fn meals_to_reduce(&self) -> f64 {
        self.meals_to_reduce
    }

    pub fn savings_per_meal(&self) -> f64 {
        self.average_meal_cost - self.home_meal_cost
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryResult {
    weekly_savings: f64,
    monthly_savings: f64,
    annual_savings: f64,
    insight: String,
}

impl CategoryResult {
    pub fn new(weekly_savings: f64, insight: String) -> Self {
        Self {
            weekly_savings,
            monthly_savings: weekly_savings * WEEKS_PER_MONTH,
            annual_savings: weekly_savings * WEEKS_PER_YEAR,
            insight,
        }
    }

    pub fn weekly_savings(&self) -> f64 {
        self.weekly_savings
    }

    pub fn monthly_savings(&self) -> f64 {
        self.monthly_savings
    }

    pub fn annual_savings(&self) -> f64 {
        self.annual_savings
    }

    pub fn insight(&self) -> &str {
        &self.insight
    }
}

/// Outcome of one projection run.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Computed(CategoryResult),
    /// A precondition failed; only the insight is shown and nothing else changes.
    Rejected { insight: String },
}

impl Projection {
    pub fn insight(&self) -> &str {
        match self {
            Projection::Computed(result) => result.insight(),
            Projection::Rejected { insight } => insight,
        }
    }

    pub fn result(&self) -> Option<&CategoryResult> {
        match self {
            Projection::Computed(result) => Some(result),
            Projection::Rejected { .. } => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Projection::Rejected { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AggregateState {
    gas_annual: f64,
    grocery_annual: f64,
    dining_annual: f64,
}

impl AggregateState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn annual(&self, category: Category) -> f64 {
        match category {
            Category::Gas => self.gas_annual,
            Category::Grocery => self.grocery_annual,
            Category::Dining => self.dining_annual,
        }
    }

    /// Returns the state with `category` replaced by `annual`.
    pub fn with_annual(mut self, category: Category, annual: f64) -> Self {
        match category {
            Category::Gas => self.gas_annual = annual,
            Category::Grocery => self.grocery_annual = annual,
            Category::Dining => self.dining_annual = annual,
        }
        self
    }

    /// Folds a projection in. Rejected projections leave the state as it was.
    pub fn apply(self, category: Category, projection: &Projection) -> Self {
        match projection.result() {
            Some(result) => self.with_annual(category, result.annual_savings()),
            None => self,
        }
    }

    pub fn total_annual(&self) -> f64 {
        self.gas_annual + self.grocery_annual + self.dining_annual
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateSummary {
    total_annual: f64,
    months_covered: i64,
}

impl AggregateSummary {
    pub fn new(total_annual: f64, months_covered: i64) -> Self {
        Self {
            total_annual,
            months_covered,
        }
    }

    pub fn total_annual(&self) -> f64 {
        self.total_annual
    }

    pub fn months_covered(&self) -> i64 {
        self.months_covered
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

pub fn format_currency(amount: f64) -> String {
    format!("${}", to_fixed(amount, 2))
}

/// Renders `value` with `digits` decimals. An exact half rounds away from
/// zero (`0.625` → `"0.63"`); every other value rounds to the nearest.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let label = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return label.to_string();
    }
    if value == 0.0 {
        return format!("{:.*}", digits, 0.0);
    }

    let Some(scaled) = exact_half(value.abs(), digits) else {
        return format!("{:.*}", digits, value);
    };

    // `scaled` ends in the tied 5; drop it and round up.
    let rounded = scaled / 10 + 1;
    let sign = if value < 0.0 { "-" } else { "" };
    if digits == 0 {
        return format!("{}{}", sign, rounded);
    }
    let unit = 10u128.pow(digits as u32);
    format!(
        "{}{}.{:0width$}",
        sign,
        rounded / unit,
        rounded % unit,
        width = digits
    )
}

/// `value × 10^(digits + 1)` when that is an integer ending in 5, i.e. when
/// `value` sits exactly halfway between two `digits`-decimal numbers.
fn exact_half(value: f64, digits: usize) -> Option<u128> {
    if digits > 20 || value == 0.0 {
        return None;
    }

    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    };

    // Whole numbers never tie; tiny values cannot land on a decimal half.
    if exponent >= 0 || exponent <= -128 {
        return None;
    }

    let shift = exponent.unsigned_abs();
    let scaled = u128::from(mantissa).checked_mul(10u128.pow(digits as u32 + 1))?;
    if scaled & ((1u128 << shift) - 1) != 0 {
        return None;
    }
    let scaled = scaled >> shift;
    (scaled % 10 == 5).then_some(scaled)
}
