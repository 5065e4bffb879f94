use anyhow::Result;
use clap::Subcommand;
use local_savings::data_structures::format_currency;
use local_savings::{Calculator, DiningInput, GasInput, GroceryInput, Projection};

#[derive(Subcommand, Debug)]
pub enum CalcCommand {
    /// Savings from buying gas at the cheaper station
    Gas {
        #[arg(long)]
        miles: f64,
        #[arg(long, default_value_t = 1.0)]
        mpg: f64,
        #[arg(long)]
        expensive: f64,
        #[arg(long)]
        cheap: f64,
    },
    /// Savings from sales, store discounts and coupons
    Grocery {
        #[arg(long)]
        budget: f64,
        /// Percent of the basket bought on sale
        #[arg(long, default_value_t = 0.0)]
        sale: f64,
        /// Average percent off sale items
        #[arg(long, default_value_t = 0.0)]
        discount: f64,
        /// Weekly coupon savings in dollars
        #[arg(long, default_value_t = 0.0)]
        coupons: f64,
    },
    /// Savings from cooking at home instead of eating out
    Dining {
        #[arg(long = "meals-out")]
        meals_out: f64,
        #[arg(long = "meal-cost")]
        meal_cost: f64,
        #[arg(long = "home-cost")]
        home_cost: f64,
        #[arg(long)]
        reduce: f64,
    },
}

impl CalcCommand {
    pub fn project(&self, calculator: &Calculator) -> Projection {
        match *self {
            CalcCommand::Gas {
                miles,
                mpg,
                expensive,
                cheap,
            } => calculator.project_gas(&GasInput::new(miles, mpg, expensive, cheap)),
            CalcCommand::Grocery {
                budget,
                sale,
                discount,
                coupons,
            } => calculator.project_grocery(&GroceryInput::new(budget, sale, discount, coupons)),
            CalcCommand::Dining {
                meals_out,
                meal_cost,
                home_cost,
                reduce,
            } => calculator.project_dining(&DiningInput::new(meals_out, meal_cost, home_cost, reduce)),
        }
    }
}

pub fn render(projection: &Projection) -> String {
    match projection {
        Projection::Computed(result) => format!(
            "Weekly:  {}\nMonthly: {}\nAnnual:  {}\n\n{}",
            format_currency(result.weekly_savings()),
            format_currency(result.monthly_savings()),
            format_currency(result.annual_savings()),
            result.insight()
        ),
        Projection::Rejected { insight } => insight.clone(),
    }
}

pub fn run(command: &CalcCommand) -> Result<()> {
    let projection = command.project(&Calculator::new());
    println!("{}", render(&projection));
    if projection.is_rejected() {
        return Err(anyhow::anyhow!("Invalid calculator input"));
    }
    Ok(())
}
