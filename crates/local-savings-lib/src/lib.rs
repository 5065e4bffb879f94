pub mod aggregation;
pub mod calculator;
pub mod config;
pub mod countdowns;
pub mod data_structures;
pub mod deals;
pub mod engine;
pub mod error;
pub mod favorites;
pub mod fields;
pub mod gas;
pub mod listings;
pub mod navigation;
pub mod notifications;
pub mod panels;
pub mod scheduler;
pub mod search;
pub mod site;
pub mod weather;

pub use aggregation::aggregate;
pub use calculator::Calculator;
pub use config::SavingsConfig;
pub use data_structures::{
    AggregateState, AggregateSummary, Category, CategoryResult, DiningInput, GasInput,
    GroceryInput, Projection, Severity,
};
pub use engine::SavingsEngine;
pub use error::{StoreError, WeatherError};
pub use favorites::{Favorites, JsonFileStore, KeyValueStore, MemoryStore};
pub use fields::{FieldProvider, FormFields};
pub use gas::{GasDataProvider, GasSource};
pub use listings::{Listing, ListingKind, ListingLoader};
pub use scheduler::{Clock, ManualClock, Scheduler, SystemClock};
pub use site::{SiteSession, SiteTask};
pub use weather::{MockWeather, WeatherProvider, WeatherReading};

pub use anyhow::Result;
pub use chrono::{DateTime, Duration, Utc};

pub mod prelude {
    pub use crate::config::SavingsConfig;
    pub use crate::data_structures::{Category, Projection, Severity};
    pub use crate::engine::SavingsEngine;
    pub use crate::fields::{FieldProvider, FormFields};
    pub use crate::site::SiteSession;
    pub use anyhow::Result;
    pub use chrono::{DateTime, Utc};
}
