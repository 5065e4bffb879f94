//! One visitor session: every widget on the page wired to a single
//! scheduler and driven by the host's clock.

use crate::config::SavingsConfig;
use crate::countdowns::CountdownEvent;
use crate::data_structures::{Category, Projection, Severity};
use crate::deals::{urgency_badge, DealBoard};
use crate::engine::SavingsEngine;
use crate::favorites::{FavoriteIndicator, Favorites, KeyValueStore};
use crate::fields::FieldProvider;
use crate::gas::{price_spread, provider_for, GasDataProvider, PriceSpread};
use crate::listings::{Listing, ListingKind};
use crate::navigation::{back_to_top_visible, NavMenu, SCROLL_DEBOUNCE_MS};
use crate::notifications::{Notifier, ToastCenter};
use crate::panels::PanelController;
use crate::scheduler::{Debouncer, Scheduler};
use crate::weather::{WeatherProvider, WeatherReading};
use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, Offset, Utc};
use tracing::{debug, error, info};

pub const WEATHER_TEMP_ID: &str = "weather-temp";
pub const WEATHER_ICON_ID: &str = "weather-icon";
pub const LAST_UPDATED_ID: &str = "last-updated";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteTask {
    Recalculate(Category),
    RefreshCountdowns,
    RefreshWeather,
}

pub struct SiteSession {
    engine: SavingsEngine,
    panels: PanelController,
    scheduler: Scheduler<SiteTask>,
    favorites: Favorites,
    toasts: ToastCenter,
    gas: Box<dyn GasDataProvider + Send>,
    weather_provider: Box<dyn WeatherProvider + Send>,
    weather: Option<WeatherReading>,
    events: Vec<CountdownEvent>,
    countdown_labels: Vec<(String, String)>,
    deals: DealBoard,
    listings: Vec<Listing>,
    nav: NavMenu,
    scroll: Debouncer,
    scroll_y: f64,
    back_to_top: bool,
    countdown_period: Duration,
    weather_period: Duration,
    local_offset: FixedOffset,
    initialized: bool,
}

impl SiteSession {
    /// Builds a session and loads favorites from `store`.
    pub fn from_config(
        config: &SavingsConfig,
        store: Box<dyn KeyValueStore + Send>,
        weather_provider: Box<dyn WeatherProvider + Send>,
        listings: Vec<Listing>,
        now: DateTime<Utc>,
    ) -> Self {
        let gas = provider_for(
            config.gas.source,
            config.gas.prices.clone(),
            config.gas.prices_as_of,
        );

        let mut deals = DealBoard::new();
        for listing in listings.iter().filter(|l| l.kind() == ListingKind::Grocery) {
            deals.register_store(listing.id());
            for deal in listing.deals() {
                deals.add_deal(listing.id(), &deal.icon, &deal.item, &deal.price, &deal.savings);
            }
        }

        Self {
            engine: SavingsEngine::with_reference_cost(config.reference_monthly_cost),
            panels: PanelController::with_delay(
                config.initial_tab,
                Duration::milliseconds(config.recalc_delay_ms.max(0)),
            ),
            scheduler: Scheduler::new(),
            favorites: Favorites::load(store, &config.favorites_key),
            toasts: ToastCenter::with_duration(now, Duration::milliseconds(config.toast_duration_ms)),
            gas,
            weather_provider,
            weather: None,
            events: config.events.clone(),
            countdown_labels: Vec::new(),
            deals,
            listings,
            nav: NavMenu::new(),
            scroll: Debouncer::new(Duration::milliseconds(SCROLL_DEBOUNCE_MS)),
            scroll_y: 0.0,
            back_to_top: false,
            countdown_period: Duration::seconds(config.countdown_interval_secs),
            weather_period: Duration::seconds(config.weather_interval_secs),
            local_offset: Utc.fix(),
            initialized: false,
        }
    }

    /// Offset used to turn the UTC clock into local wall-clock time for
    /// countdowns and deal expiry.
    pub fn with_local_offset(mut self, offset: FixedOffset) -> Self {
        self.local_offset = offset;
        self
    }

    /// Runs the page-load sequence. Calling it again does nothing.
    pub fn init<F: FieldProvider + ?Sized>(&mut self, now: DateTime<Utc>, fields: &mut F) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        self.deals.touch(self.local_time(now).date());
        if let Some(label) = self.deals.last_updated_label() {
            fields.set_text(LAST_UPDATED_ID, &label);
        }

        self.engine.recalculate(Category::Gas, fields);
        self.refresh_countdowns(now, fields);
        self.refresh_weather(fields);

        self.scheduler
            .schedule_every(now, self.countdown_period, SiteTask::RefreshCountdowns);
        self.scheduler
            .schedule_every(now, self.weather_period, SiteTask::RefreshWeather);

        info!(
            favorites = self.favorites.set().len(),
            listings = self.listings.len(),
            gas_source = self.gas.name(),
            "site session initialized"
        );
    }

    /// Drains due timers, runs the debounced scroll check and expires toasts.
    pub fn tick<F: FieldProvider + ?Sized>(&mut self, now: DateTime<Utc>, fields: &mut F) -> Vec<SiteTask> {
        let fired = self.scheduler.poll(now);
        for task in &fired {
            match task {
                SiteTask::Recalculate(category) => {
                    self.engine.recalculate(*category, fields);
                }
                SiteTask::RefreshCountdowns => self.refresh_countdowns(now, fields),
                SiteTask::RefreshWeather => self.refresh_weather(fields),
            }
        }

        if self.scroll.poll(now) {
            self.back_to_top = back_to_top_visible(self.scroll_y);
        }

        self.toasts.prune(now);
        fired
    }

    pub fn select_category(&mut self, category: Category, now: DateTime<Utc>) {
        self.panels
            .select(category, now, &mut self.scheduler, SiteTask::Recalculate);
    }

    /// Recomputes the calculator that owns `field_id`, if any.
    pub fn field_changed<F: FieldProvider + ?Sized>(&mut self, field_id: &str, fields: &mut F) -> Option<Projection> {
        let category = Category::ALL
            .into_iter()
            .find(|category| category.input_ids().iter().any(|id| *id == field_id))?;
        Some(self.engine.recalculate(category, fields))
    }

    pub fn toggle_favorite(&mut self, id: &str, now: DateTime<Utc>) -> FavoriteIndicator {
        self.toasts.set_time(now);
        self.favorites.toggle(id, &mut self.toasts)
    }

    pub fn notify(&mut self, message: &str, severity: Severity, now: DateTime<Utc>) {
        self.toasts.set_time(now);
        self.toasts.notify(message, severity);
    }

    pub fn scrolled(&mut self, scroll_y: f64, now: DateTime<Utc>) {
        self.scroll_y = scroll_y;
        self.scroll.trigger(now);
    }

    /// Cheapest and priciest stations from the price provider, used to
    /// prefill the gas calculator. `None` for link-only providers.
    pub fn gas_price_spread(&self) -> Option<PriceSpread> {
        let spread = price_spread(&self.gas.prices())?;
        debug!(
            cheapest = %spread.cheapest.0,
            most_expensive = %spread.most_expensive.0,
            "gas price spread"
        );
        Some(spread)
    }

    /// Urgent-deal badges for listings expiring soon.
    pub fn urgent_listings(&self, now: DateTime<Utc>) -> Vec<(&Listing, String)> {
        let local = self.local_time(now);
        self.listings
            .iter()
            .filter_map(|listing| {
                let badge = urgency_badge(listing.expires()?, local)?;
                Some((listing, badge))
            })
            .collect()
    }

    fn refresh_countdowns<F: FieldProvider + ?Sized>(&mut self, now: DateTime<Utc>, fields: &mut F) {
        let local = self.local_time(now);
        self.countdown_labels = self
            .events
            .iter()
            .map(|event| (event.id.clone(), event.label(local)))
            .collect();
        for (id, label) in &self.countdown_labels {
            fields.set_text(id, label);
        }
    }

    fn refresh_weather<F: FieldProvider + ?Sized>(&mut self, fields: &mut F) {
        match self.weather_provider.fetch() {
            Ok(reading) => {
                fields.set_text(WEATHER_TEMP_ID, &reading.temperature_label());
                fields.set_text(WEATHER_ICON_ID, reading.condition().icon_class());
                self.weather = Some(reading);
            }
            Err(e) => error!("Failed to fetch weather: {}", e),
        }
    }

    fn local_time(&self, now: DateTime<Utc>) -> NaiveDateTime {
        now.with_timezone(&self.local_offset).naive_local()
    }

    pub fn engine(&self) -> &SavingsEngine {
        &self.engine
    }

    pub fn panels(&self) -> &PanelController {
        &self.panels
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn toasts(&self) -> &ToastCenter {
        &self.toasts
    }

    pub fn gas(&self) -> &dyn GasDataProvider {
        self.gas.as_ref()
    }

    pub fn weather(&self) -> Option<WeatherReading> {
        self.weather
    }

    pub fn countdown_labels(&self) -> &[(String, String)] {
        &self.countdown_labels
    }

    pub fn events(&self) -> &[CountdownEvent] {
        &self.events
    }

    pub fn deals(&self) -> &DealBoard {
        &self.deals
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn nav(&self) -> &NavMenu {
        &self.nav
    }

    pub fn nav_mut(&mut self) -> &mut NavMenu {
        &mut self.nav
    }

    pub fn back_to_top(&self) -> bool {
        self.back_to_top
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::fields as ids;
    use crate::error::WeatherError;
    use crate::favorites::MemoryStore;
    use crate::fields::FormFields;
    use crate::listings::default_listings;
    use crate::scheduler::{Clock, ManualClock};
    use crate::weather::{MockWeather, WeatherCondition};
    use chrono::TimeZone;

    struct FlakyWeather {
        calls: usize,
    }

    impl WeatherProvider for FlakyWeather {
        fn fetch(&mut self) -> Result<WeatherReading, WeatherError> {
            self.calls += 1;
            if self.calls == 1 {
                Ok(WeatherReading::new(70, WeatherCondition::Cloudy))
            } else {
                Err(WeatherError::Unavailable("offline".to_string()))
            }
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 9, 0, 0).unwrap()
    }

    fn session(config: &SavingsConfig) -> SiteSession {
        SiteSession::from_config(
            config,
            Box::new(MemoryStore::new()),
            Box::new(MockWeather::seeded(1)),
            default_listings(),
            start(),
        )
    }

    fn page() -> FormFields {
        FormFields::new()
            .with_input(ids::MILES_PER_WEEK, "150")
            .with_input(ids::MPG, "25")
            .with_input(ids::EXPENSIVE_PRICE, "3.20")
            .with_input(ids::CHEAP_PRICE, "2.90")
            .with_input(ids::WEEKLY_GROCERY_BUDGET, "150")
            .with_input(ids::SALE_PERCENTAGE, "40")
            .with_input(ids::AVERAGE_DISCOUNT, "20")
            .with_input(ids::COUPON_SAVINGS, "5")
    }

    #[test]
    fn test_init_runs_load_sequence() {
        let mut site = session(&SavingsConfig::default());
        let mut fields = page();
        site.init(start(), &mut fields);

        assert_eq!(fields.text("annual-gas-savings"), Some("$93.60"));
        assert_eq!(fields.text("countdown-pumpkin"), Some("Event has passed"));
        assert!(fields.text(WEATHER_TEMP_ID).unwrap().ends_with("°F"));
        assert_eq!(fields.text(LAST_UPDATED_ID), Some("October 14, 2026"));
        assert!(site.weather().is_some());
        assert_eq!(site.pending_tasks(), 2);
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut site = session(&SavingsConfig::default());
        let mut fields = page();
        site.init(start(), &mut fields);
        site.init(start(), &mut fields);
        assert_eq!(site.pending_tasks(), 2);
    }

    #[test]
    fn test_tab_selection_recalculates_after_delay() {
        let clock = ManualClock::new(start());
        let mut site = session(&SavingsConfig::default());
        let mut fields = page();
        site.init(clock.now(), &mut fields);

        site.select_category(Category::Grocery, clock.now());
        assert!(site.panels().is_active(Category::Grocery));
        assert_eq!(fields.text("annual-grocery-savings"), None);

        clock.advance(Duration::milliseconds(100));
        let fired = site.tick(clock.now(), &mut fields);
        assert_eq!(fired, vec![SiteTask::Recalculate(Category::Grocery)]);
        assert_eq!(fields.text("annual-grocery-savings"), Some("$884.00"));
        // 93.6 + 884 = 977.6
        assert_eq!(fields.text(ids::TOTAL_ANNUAL_SAVINGS), Some("$978"));
    }

    #[test]
    fn test_field_edit_recalculates_owning_category() {
        let mut site = session(&SavingsConfig::default());
        let mut fields = page();
        site.init(start(), &mut fields);

        fields.set_input(ids::MILES_PER_WEEK, "300");
        let projection = site.field_changed(ids::MILES_PER_WEEK, &mut fields).unwrap();
        assert_eq!(format!("{:.2}", projection.result().unwrap().annual_savings()), "187.20");
        assert!(site.field_changed("unrelated-field", &mut fields).is_none());
    }

    #[test]
    fn test_recurring_refreshes() {
        let mut site = session(&SavingsConfig::default());
        let mut fields = page();
        site.init(start(), &mut fields);

        let fired = site.tick(start() + Duration::seconds(60), &mut fields);
        assert_eq!(fired, vec![SiteTask::RefreshCountdowns]);

        let fired = site.tick(start() + Duration::hours(1), &mut fields);
        assert!(fired.contains(&SiteTask::RefreshWeather));
        assert!(fired.contains(&SiteTask::RefreshCountdowns));
    }

    #[test]
    fn test_weather_failure_keeps_previous_reading() {
        let mut site = SiteSession::from_config(
            &SavingsConfig::default(),
            Box::new(MemoryStore::new()),
            Box::new(FlakyWeather { calls: 0 }),
            Vec::new(),
            start(),
        );
        let mut fields = FormFields::new();
        site.init(start(), &mut fields);
        site.tick(start() + Duration::hours(1), &mut fields);

        assert_eq!(fields.text(WEATHER_TEMP_ID), Some("70°F"));
        assert_eq!(site.weather().unwrap().condition(), WeatherCondition::Cloudy);
    }

    #[test]
    fn test_favorite_toggle_shows_toast() {
        let mut site = session(&SavingsConfig::default());
        let indicator = site.toggle_favorite("ingles", start());

        assert!(indicator.active);
        let toast = site.toasts().visible_at(start()).unwrap();
        assert_eq!(toast.message(), "Added to favorites");

        let mut fields = FormFields::new();
        site.tick(start() + Duration::seconds(4), &mut fields);
        assert!(site.toasts().current().is_none());
    }

    #[test]
    fn test_scroll_is_debounced() {
        let mut site = session(&SavingsConfig::default());
        let mut fields = FormFields::new();

        site.scrolled(200.0, start());
        site.scrolled(650.0, start() + Duration::milliseconds(40));
        site.tick(start() + Duration::milliseconds(100), &mut fields);
        assert!(!site.back_to_top());

        site.tick(start() + Duration::milliseconds(140), &mut fields);
        assert!(site.back_to_top());
    }

    #[test]
    fn test_configured_initial_tab_and_gas_source() {
        let mut config = SavingsConfig::default();
        config.initial_tab = Category::Dining;
        config.gas.source = crate::gas::GasSource::Prices;

        let site = session(&config);
        assert!(site.panels().is_active(Category::Dining));
        assert_eq!(site.gas().prices().len(), 5);

        let spread = site.gas_price_spread().unwrap();
        assert_eq!(spread.cheapest.1, 2.89);
    }

    #[test]
    fn test_link_provider_has_no_spread() {
        let site = session(&SavingsConfig::default());
        assert!(site.gas_price_spread().is_none());
        assert_eq!(site.gas().links().len(), 3);
    }

    #[test]
    fn test_grocery_deals_are_registered() {
        let site = session(&SavingsConfig::default());
        assert_eq!(site.deals().deals_for("food-lion").len(), 2);
        assert!(site.deals().deals_for("elkin-hardware").is_empty());
    }

    #[test]
    fn test_urgent_listings() {
        let site = session(&SavingsConfig::default());
        let urgent = site.urgent_listings(start());
        // Food Lion's specials end 2026-10-17
        assert_eq!(urgent.len(), 1);
        assert_eq!(urgent[0].0.id(), "food-lion");
        assert_eq!(urgent[0].1, "3 days left!");
    }
}
