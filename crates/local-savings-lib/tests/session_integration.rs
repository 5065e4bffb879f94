use chrono::{Duration, TimeZone, Utc};
use local_savings::data_structures::fields as ids;
use local_savings::listings::ListingLoader;
use local_savings::prelude::*;
use local_savings::{JsonFileStore, ManualClock, MockWeather, SiteTask};
use local_savings::scheduler::Clock;
use std::fs;
use tempfile::TempDir;

const LISTINGS: &str = concat!(
    r#"{"id": "food-lion", "name": "Food Lion", "kind": "grocery", "deals": [{"icon": "egg", "item": "Eggs", "price": "$1.99", "savings": "Save $2.00"}]}"#,
    "\n",
    r#"{"id": "elkin-hardware", "name": "Elkin Hardware", "kind": "business"}"#,
    "\n",
);

fn open_session(dir: &TempDir, clock: &ManualClock) -> SiteSession {
    let config_path = dir.path().join("config.json");
    let config = SavingsConfig::load(&config_path).unwrap();
    let store_path = config
        .session_store
        .clone()
        .unwrap_or_else(|| dir.path().join("session.json"));
    let listings = ListingLoader::new().load(dir.path().join("listings.jsonl")).unwrap();

    SiteSession::from_config(
        &config,
        Box::new(JsonFileStore::new(store_path)),
        Box::new(MockWeather::seeded(7)),
        listings,
        clock.now(),
    )
}

fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("listings.jsonl"), LISTINGS).unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"initial_tab": "dining", "recalc_delay_ms": 250}"#,
    )
    .unwrap();
    dir
}

#[test]
fn test_favorites_survive_a_new_session() {
    let dir = setup();
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap());

    let mut first = open_session(&dir, &clock);
    first.toggle_favorite("food-lion", clock.now());
    first.toggle_favorite("elkin-hardware", clock.now());
    first.toggle_favorite("food-lion", clock.now());

    let second = open_session(&dir, &clock);
    assert!(second.favorites().is_favorite("elkin-hardware"));
    assert!(!second.favorites().is_favorite("food-lion"));
}

#[test]
fn test_full_day_of_browsing() {
    let dir = setup();
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap());
    let mut site = open_session(&dir, &clock);

    let mut fields = FormFields::new()
        .with_input(ids::MILES_PER_WEEK, "100")
        .with_input(ids::MPG, "20")
        .with_input(ids::EXPENSIVE_PRICE, "3.50")
        .with_input(ids::CHEAP_PRICE, "3.00")
        .with_input(ids::MEALS_OUT_PER_WEEK, "4")
        .with_input(ids::AVERAGE_MEAL_COST, "15")
        .with_input(ids::HOME_MEAL_COST, "5")
        .with_input(ids::MEALS_TO_REDUCE, "3");

    site.init(clock.now(), &mut fields);
    assert!(site.panels().is_active(Category::Dining));
    // 100 / 20 * 0.50 * 52
    assert_eq!(fields.text("annual-gas-savings"), Some("$130.00"));

    site.select_category(Category::Dining, clock.now());
    clock.advance(Duration::milliseconds(100));
    assert!(site.tick(clock.now(), &mut fields).is_empty());

    clock.advance(Duration::milliseconds(150));
    let fired = site.tick(clock.now(), &mut fields);
    assert_eq!(fired, vec![SiteTask::Recalculate(Category::Dining)]);
    assert_eq!(fields.text("annual-dining-savings"), Some("$1560.00"));
    assert_eq!(fields.text(ids::TOTAL_ANNUAL_SAVINGS), Some("$1690"));
    assert_eq!(fields.text(ids::INSURANCE_COMPARISON), Some("18"));
    assert!(fields.is_visible(ids::TOTAL_SAVINGS_DISPLAY));

    // Bad gas prices leave the earlier gas figure in the total.
    fields.set_input(ids::CHEAP_PRICE, "4.00");
    let projection = site.field_changed(ids::CHEAP_PRICE, &mut fields).unwrap();
    assert!(projection.is_rejected());
    assert_eq!(fields.text(ids::TOTAL_ANNUAL_SAVINGS), Some("$1690"));

    clock.advance(Duration::hours(1));
    let fired = site.tick(clock.now(), &mut fields);
    assert!(fired.contains(&SiteTask::RefreshWeather));
    assert!(site.weather().is_some());
}
