use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasFinderLink {
    pub name: String,
    pub url: String,
    pub description: String,
}

impl GasFinderLink {
    pub fn new(name: &str, url: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            description: description.to_string(),
        }
    }
}

/// Source of gas data for the gas finder panel.
pub trait GasDataProvider {
    fn name(&self) -> &str;

    /// Station name to price per gallon. Empty when the provider only links out.
    fn prices(&self) -> BTreeMap<String, f64>;

    fn links(&self) -> Vec<GasFinderLink> {
        Vec::new()
    }

    /// Date the prices were collected, if the provider has one.
    fn as_of(&self) -> Option<NaiveDate> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GasSource {
    #[default]
    Links,
    Prices,
}

impl std::str::FromStr for GasSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "links" => Ok(GasSource::Links),
            "prices" => Ok(GasSource::Prices),
            other => Err(anyhow::anyhow!("Unknown gas source: {}", other)),
        }
    }
}

/// Points visitors at external price trackers instead of listing prices.
pub struct StaticLinkProvider {
    links: Vec<GasFinderLink>,
}

impl StaticLinkProvider {
    pub fn new() -> Self {
        Self {
            links: vec![
                GasFinderLink::new(
                    "GasBuddy",
                    "https://www.gasbuddy.com/gasprices/north-carolina/elkin",
                    "Crowd-reported prices for Elkin stations",
                ),
                GasFinderLink::new(
                    "AAA Gas Prices",
                    "https://gasprices.aaa.com/?state=NC",
                    "State and metro averages from AAA",
                ),
                GasFinderLink::new(
                    "Google Maps",
                    "https://www.google.com/maps/search/gas+stations+elkin+nc",
                    "Stations near you with posted prices",
                ),
            ],
        }
    }

    /// Logs that a visitor followed `name` and returns its URL.
    pub fn open_link(&self, name: &str) -> Option<&str> {
        let link = self.links.iter().find(|link| link.name == name)?;
        info!("Gas finder link clicked: {}", link.name);
        Some(&link.url)
    }
}

impl Default for StaticLinkProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GasDataProvider for StaticLinkProvider {
    fn name(&self) -> &str {
        "Gas finder links"
    }

    fn prices(&self) -> BTreeMap<String, f64> {
        BTreeMap::new()
    }

    fn links(&self) -> Vec<GasFinderLink> {
        self.links.clone()
    }
}

/// A hand-collected price table. Not live data: `as_of` says when it was taken.
pub struct PriceTableProvider {
    price_table: BTreeMap<String, f64>,
    as_of: Option<NaiveDate>,
}

impl PriceTableProvider {
    pub fn new() -> Self {
        let mut price_table = BTreeMap::new();

        price_table.insert("Sheetz - N Bridge St".to_string(), 2.89);
        price_table.insert("Circle K - Standard St".to_string(), 2.95);
        price_table.insert("Speedway - CC Camp Rd".to_string(), 2.99);
        price_table.insert("Marathon - W Main St".to_string(), 3.05);
        // Interstate exit prices run higher
        price_table.insert("Shell - I-77 Exit 85".to_string(), 3.19);

        Self {
            price_table,
            as_of: NaiveDate::from_ymd_opt(2025, 9, 15),
        }
    }

    pub fn with_prices(prices: BTreeMap<String, f64>, as_of: Option<NaiveDate>) -> Self {
        Self {
            price_table: prices,
            as_of,
        }
    }

    pub fn get_price(&self, station: &str) -> Option<f64> {
        self.price_table.get(station).copied()
    }

    pub fn stations(&self) -> Vec<&String> {
        self.price_table.keys().collect()
    }
}

impl Default for PriceTableProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GasDataProvider for PriceTableProvider {
    fn name(&self) -> &str {
        "Local price table"
    }

    fn prices(&self) -> BTreeMap<String, f64> {
        self.price_table.clone()
    }

    fn as_of(&self) -> Option<NaiveDate> {
        self.as_of
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSpread {
    pub cheapest: (String, f64),
    pub most_expensive: (String, f64),
}

impl PriceSpread {
    pub fn difference(&self) -> f64 {
        self.most_expensive.1 - self.cheapest.1
    }
}

/// Cheapest and most expensive stations, ignoring non-finite prices.
/// Ties resolve to the alphabetically first station.
pub fn price_spread(prices: &BTreeMap<String, f64>) -> Option<PriceSpread> {
    let mut valid = prices.iter().filter(|(_, price)| price.is_finite());
    let (first_name, first_price) = valid.next()?;

    let mut cheapest = (first_name, *first_price);
    let mut most_expensive = (first_name, *first_price);

    for (name, price) in valid {
        if *price < cheapest.1 {
            cheapest = (name, *price);
        }
        if *price > most_expensive.1 {
            most_expensive = (name, *price);
        }
    }

    Some(PriceSpread {
        cheapest: (cheapest.0.clone(), cheapest.1),
        most_expensive: (most_expensive.0.clone(), most_expensive.1),
    })
}

pub fn provider_for(
    source: GasSource,
    prices: Option<BTreeMap<String, f64>>,
    as_of: Option<NaiveDate>,
) -> Box<dyn GasDataProvider + Send> {
    match source {
        GasSource::Links => Box::new(StaticLinkProvider::new()),
        GasSource::Prices => match prices {
            Some(prices) if !prices.is_empty() => {
                Box::new(PriceTableProvider::with_prices(prices, as_of))
            }
            _ => Box::new(PriceTableProvider::new()),
        },
    }
}
