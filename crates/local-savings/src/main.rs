use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use local_savings::data_structures::{fields as ids, to_fixed};
use local_savings::listings::{default_listings, Listing};
use local_savings::navigation::{FocusTrap, NavEvent};
use local_savings::prelude::*;
use local_savings::{search, GasSource, JsonFileStore, KeyValueStore, ListingLoader, MemoryStore, MockWeather};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    DefaultTerminal, Frame,
};
use std::fs::File;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod calc;
mod widgets;
use widgets::*;

const DEFAULT_CONFIG_PATH: &str = "~/.config/local-savings/config.json";
const LOG_FILE_NAME: &str = "local-savings.log";
/// Pretend height of one listing row, for the back-to-top threshold.
const LISTING_ROW_HEIGHT: f64 = 120.0;

#[derive(Parser, Debug)]
#[clap(author = "Save in Elkin", version, about)]
struct Args {
    #[arg(short = 'v')]
    verbose: bool,

    #[arg(short = 'c', long = "config")]
    config: Option<String>,

    /// Calculator shown first: gas, grocery or dining
    #[arg(short = 't', long = "tab")]
    tab: Option<String>,

    /// Listings file or directory of .jsonl files
    #[arg(short = 'd', long = "data")]
    data: Option<String>,

    /// Gas panel source: links or prices
    #[arg(short = 'g', long = "gas-source")]
    gas_source: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one calculator and print the projection
    Calc {
        #[command(subcommand)]
        calculator: calc::CalcCommand,
    },
}

fn init_logging(verbose: bool) -> Result<PathBuf> {
    // Priority: RUST_LOG env var > -v flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let log_path = std::env::temp_dir().join(LOG_FILE_NAME);
    let file = File::create(&log_path)
        .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .compact(),
        )
        .init();

    Ok(log_path)
}

fn config_path(arg: Option<&str>) -> PathBuf {
    let raw = arg.unwrap_or(DEFAULT_CONFIG_PATH);
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

fn load_config(args: &Args) -> Result<SavingsConfig> {
    let path = config_path(args.config.as_deref());

    let mut config = SavingsConfig::load(&path).unwrap_or_else(|e| {
        warn!("Using default config: {:#}", e);
        eprintln!("Warning: Could not load config: {:#}", e);
        SavingsConfig::default()
    });

    // An explicit tab is remembered for next time
    if let Some(tab) = &args.tab {
        config.initial_tab = tab.parse()?;
        if let Err(e) = config.save(&path) {
            warn!("Could not save config: {:#}", e);
            eprintln!("Warning: Could not save config: {}", e);
        }
    }

    if let Some(source) = &args.gas_source {
        config.gas.source = source.parse::<GasSource>()?;
    }

    Ok(config)
}

fn load_listings(data: Option<&str>) -> Result<Vec<Listing>> {
    match data {
        Some(path) => {
            let path = shellexpand::tilde(path).into_owned();
            ListingLoader::new().load(path)
        }
        None => Ok(default_listings()),
    }
}

fn session_store(config: &SavingsConfig) -> Box<dyn KeyValueStore + Send> {
    match &config.session_store {
        Some(path) => {
            let path = shellexpand::tilde(&path.to_string_lossy()).into_owned();
            Box::new(JsonFileStore::new(path))
        }
        None => Box::new(MemoryStore::new()),
    }
}

fn starting_form() -> FormFields {
    FormFields::new()
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
        .with_input(ids::MEALS_TO_REDUCE, "3")
}

pub struct AppState {
    pub site: SiteSession,
    pub fields: FormFields,
    pub focus: usize,
    pub listing_cursor: usize,
    pub search_term: String,
    pub searching: bool,
}

impl AppState {
    fn new(config: &SavingsConfig, listings: Vec<Listing>) -> Self {
        let now = Utc::now();
        let site = SiteSession::from_config(
            config,
            session_store(config),
            Box::new(MockWeather::new()),
            listings,
            now,
        )
        .with_local_offset(*Local::now().offset());

        let mut state = Self {
            site,
            fields: starting_form(),
            focus: 0,
            listing_cursor: 0,
            search_term: String::new(),
            searching: false,
        };
        state.site.init(now, &mut state.fields);
        state
    }

    fn tick(&mut self) {
        self.site.tick(Utc::now(), &mut self.fields);
    }

    pub fn input_ids(&self) -> &'static [&'static str] {
        self.site.panels().active().input_ids()
    }

    pub fn focused_input(&self) -> Option<&'static str> {
        self.input_ids().get(self.focus).copied()
    }

    pub fn visible_listings(&self) -> Vec<&Listing> {
        search::filter(self.site.listings(), None, &self.search_term)
    }

    pub fn selected_listing(&self) -> Option<&Listing> {
        self.visible_listings().get(self.listing_cursor).copied()
    }

    fn select_category(&mut self, category: Category) {
        self.site.select_category(category, Utc::now());
        self.focus = 0;
    }

    fn move_focus(&mut self, backwards: bool) {
        let trap = FocusTrap::new(self.input_ids().len());
        if let Some(next) = trap.next(self.focus, backwards) {
            self.focus = next;
        }
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        if let Some(id) = self.focused_input() {
            edit(self.fields.input_mut(id));
            self.site.field_changed(id, &mut self.fields);
        }
    }

    fn move_cursor(&mut self, down: bool) {
        let count = self.visible_listings().len();
        if count == 0 {
            self.listing_cursor = 0;
            return;
        }
        self.listing_cursor = if down {
            (self.listing_cursor + 1).min(count - 1)
        } else {
            self.listing_cursor.saturating_sub(1)
        };
        self.site
            .scrolled(self.listing_cursor as f64 * LISTING_ROW_HEIGHT, Utc::now());
    }

    fn back_to_top(&mut self) {
        self.listing_cursor = 0;
        self.site.scrolled(0.0, Utc::now());
    }

    fn toggle_selected_favorite(&mut self) {
        let id = match self.selected_listing() {
            Some(listing) => listing.id().to_string(),
            None => return,
        };
        self.site.toggle_favorite(&id, Utc::now());
    }

    fn prefill_gas_prices(&mut self) {
        match self.site.gas_price_spread() {
            Some(spread) => {
                self.fields
                    .set_input(ids::EXPENSIVE_PRICE, &to_fixed(spread.most_expensive.1, 2));
                self.fields
                    .set_input(ids::CHEAP_PRICE, &to_fixed(spread.cheapest.1, 2));
                self.site.field_changed(ids::CHEAP_PRICE, &mut self.fields);
                self.site.notify(
                    &format!("Prices from {} and {}", spread.cheapest.0, spread.most_expensive.0),
                    Severity::Success,
                    Utc::now(),
                );
            }
            None => self
                .site
                .notify("No station prices available", Severity::Error, Utc::now()),
        }
    }

    fn update_search(&mut self, edit: impl FnOnce(&mut String)) {
        edit(&mut self.search_term);
        self.listing_cursor = 0;
    }
}

pub struct App {
    state: Arc<Mutex<AppState>>,
    exit: bool,
}

impl App {
    pub fn new(config: &SavingsConfig, listings: Vec<Listing>) -> Self {
        Self {
            state: Arc::new(Mutex::new(AppState::new(config, listings))),
            exit: false,
        }
    }

    pub async fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let state_clone = Arc::clone(&self.state);

        tokio::spawn(async move {
            let mut interval = interval(Duration::from_millis(100));
            loop {
                interval.tick().await;

                if let Ok(mut state) = state_clone.lock() {
                    state.tick();
                }
            }
        });

        let mut draw_interval = interval(Duration::from_millis(100));

        loop {
            tokio::select! {
                _ = draw_interval.tick() => {
                    terminal.draw(|frame| self.draw(frame))?;
                }

                _ = async {
                    if event::poll(Duration::from_millis(0)).unwrap_or(false) {
                        if let Ok(event) = event::read() {
                            self.handle_event(event);
                        }
                    }
                } => {}
            }

            if self.exit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(6),
                Constraint::Length(5),
                Constraint::Length(7),
            ])
            .split(body[1]);

        if let Ok(state) = self.state.lock() {
            let now = Utc::now();
            HeaderWidget::render(frame, chunks[0], &state);
            CalculatorWidget::render(frame, body[0], &state);
            ListingsWidget::render(frame, side[0], &state, now);
            EventsWidget::render(frame, side[1], &state);
            GasWidget::render(frame, side[2], &state);
            TotalsWidget::render(frame, chunks[2], &state);
            ShortcutsWidget::render(frame, chunks[3], &state);

            if state.site.nav().is_open() {
                MenuPopupWidget::render(frame, area, &state);
            }
            ToastWidget::render(frame, area, &state, now);
        }
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key_event) = event else {
            return;
        };
        if key_event.kind != KeyEventKind::Press {
            return;
        }
        let Ok(mut state) = self.state.lock() else {
            return;
        };

        if state.searching {
            match key_event.code {
                KeyCode::Esc | KeyCode::Enter => state.searching = false,
                KeyCode::Backspace => state.update_search(|term| {
                    term.pop();
                }),
                KeyCode::Char(c) => state.update_search(|term| term.push(c)),
                _ => {}
            }
            return;
        }

        if state.site.nav().is_open() {
            let nav_event = match key_event.code {
                KeyCode::Char('m') => NavEvent::HamburgerClicked,
                KeyCode::Esc => NavEvent::Escape,
                KeyCode::Char(c @ '1'..='3') => {
                    if let Some(category) = category_for_digit(c) {
                        state.select_category(category);
                    }
                    NavEvent::LinkFollowed
                }
                _ => NavEvent::ClickOutside,
            };
            state.site.nav_mut().handle(nav_event);
            return;
        }

        match key_event.code {
            KeyCode::Char('q') => self.exit = true,
            KeyCode::Char('m') => {
                state.site.nav_mut().handle(NavEvent::HamburgerClicked);
            }
            KeyCode::Char('/') => state.searching = true,
            KeyCode::Char('f') => state.toggle_selected_favorite(),
            KeyCode::Char('p') => state.prefill_gas_prices(),
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                state.edit_focused(|value| value.push(c));
            }
            KeyCode::Backspace => state.edit_focused(|value| {
                value.pop();
            }),
            KeyCode::Tab => state.move_focus(false),
            KeyCode::BackTab => state.move_focus(true),
            KeyCode::Right => {
                let next = state.site.panels().next();
                state.select_category(next);
            }
            KeyCode::Left => {
                let previous = state.site.panels().previous();
                state.select_category(previous);
            }
            KeyCode::Down => state.move_cursor(true),
            KeyCode::Up => state.move_cursor(false),
            KeyCode::Home => state.back_to_top(),
            KeyCode::Esc => {
                state.search_term.clear();
                state.listing_cursor = 0;
            }
            _ => {}
        }
    }
}

/// Menu shortcuts: `1` gas, `2` grocery, `3` dining.
fn category_for_digit(c: char) -> Option<Category> {
    let index = c.to_digit(10)?.checked_sub(1)? as usize;
    Category::ALL.get(index).copied()
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = init_logging(args.verbose)?;

    if let Some(Command::Calc { calculator }) = &args.command {
        return calc::run(calculator);
    }

    let config = load_config(&args)?;
    let listings = load_listings(args.data.as_deref())?;
    info!(log = %log_path.display(), listings = listings.len(), "starting dashboard");

    let mut terminal = ratatui::init();
    let mut app = App::new(&config, listings);

    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}
