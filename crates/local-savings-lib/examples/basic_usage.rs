use local_savings::data_structures::fields as ids;
use local_savings::listings::{default_listings, ListingLoader};
use local_savings::prelude::*;
use local_savings::search;
use local_savings::{MemoryStore, MockWeather};
use std::env;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let listings = if args.len() >= 2 {
        println!("Loading listings from: {}", args[1]);
        ListingLoader::new().load(&args[1])?
    } else {
        default_listings()
    };

    let mut fields = FormFields::new()
        .with_input(ids::MILES_PER_WEEK, "150")
        .with_input(ids::MPG, "25")
        .with_input(ids::EXPENSIVE_PRICE, "3.20")
        .with_input(ids::CHEAP_PRICE, "2.90")
        .with_input(ids::WEEKLY_GROCERY_BUDGET, "150")
        .with_input(ids::SALE_PERCENTAGE, "40")
        .with_input(ids::AVERAGE_DISCOUNT, "20")
        .with_input(ids::COUPON_SAVINGS, "5")
        .with_input(ids::MEALS_OUT_PER_WEEK, "4")
        .with_input(ids::AVERAGE_MEAL_COST, "15")
        .with_input(ids::HOME_MEAL_COST, "5")
        .with_input(ids::MEALS_TO_REDUCE, "3");

    let now = Utc::now();
    let mut site = SiteSession::from_config(
        &SavingsConfig::default(),
        Box::new(MemoryStore::new()),
        Box::new(MockWeather::new()),
        listings,
        now,
    );
    site.init(now, &mut fields);

    for category in Category::ALL {
        site.field_changed(category.input_ids()[0], &mut fields);
    }

    println!("--- Savings ---");
    for category in Category::ALL {
        println!(
            "{}: {} / week, {} / month, {} / year",
            category.name(),
            fields.text(&category.weekly_output_id()).unwrap_or("-"),
            fields.text(&category.monthly_output_id()).unwrap_or("-"),
            fields.text(&category.annual_output_id()).unwrap_or("-"),
        );
        if let Some(insight) = fields.text(&category.insight_id()) {
            println!("  {}", insight);
        }
    }

    if let Some(summary) = site.engine().summary() {
        println!(
            "\nTotal: ${:.0} a year, about {} months of insurance",
            summary.total_annual(),
            summary.months_covered()
        );
    }

    if let Some(reading) = site.weather() {
        println!("\nWeather: {} {}", reading.temperature_label(), reading.condition().label());
    }

    println!("\n--- Events ---");
    for (event, (_, label)) in site.events().iter().zip(site.countdown_labels()) {
        println!("{}: {}", event.name, label);
    }

    println!("\n--- Stores mentioning \"save\" ---");
    for listing in search::filter(site.listings(), None, "save") {
        println!("- {} ({})", listing.name(), listing.kind().name());
    }

    Ok(())
}
