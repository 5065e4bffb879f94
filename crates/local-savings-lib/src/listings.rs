use crate::deals::Deal;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Grocery,
    Business,
}

impl ListingKind {
    pub fn name(&self) -> &'static str {
        match self {
            ListingKind::Grocery => "Grocery",
            ListingKind::Business => "Local business",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    id: String,
    name: String,
    kind: ListingKind,
    #[serde(default)]
    description: String,
    #[serde(default)]
    deals: Vec<Deal>,
    #[serde(default)]
    expires: Option<NaiveDate>,
}

impl Listing {
    pub fn new(id: &str, name: &str, kind: ListingKind, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            description: description.to_string(),
            deals: Vec::new(),
            expires: None,
        }
    }

    pub fn with_deal(mut self, deal: Deal) -> Self {
        self.deals.push(deal);
        self
    }

    pub fn with_expiry(mut self, expires: NaiveDate) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ListingKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn expires(&self) -> Option<NaiveDate> {
        self.expires
    }

    /// Everything a visitor can read on the card, for searching.
    pub fn text(&self) -> String {
        let mut text = format!("{} {}", self.name, self.description);
        for deal in &self.deals {
            text.push(' ');
            text.push_str(&deal.item);
            text.push(' ');
            text.push_str(&deal.savings);
        }
        text
    }
}

pub struct ListingLoader;

impl ListingLoader {
    pub fn new() -> Self {
        Self
    }

    /// Reads one listing per line. Blank lines and lines that are not a
    /// listing are skipped.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Listing>> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;

        let reader = BufReader::new(file);
        let mut listings = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            if let Ok(listing) = serde_json::from_str::<Listing>(&line) {
                listings.push(listing);
            }
        }

        Ok(listings)
    }

    pub fn load_from_directory<P: AsRef<Path>>(&self, dir_path: P) -> Result<Vec<Listing>> {
        let mut listings = Vec::new();
        self.load_from_directory_recursive(dir_path.as_ref(), &mut listings)?;
        listings.sort_by(|a, b| a.name.cmp(&b.name));
        info!(count = listings.len(), "listings loaded");
        Ok(listings)
    }

    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Listing>> {
        let path = path.as_ref();
        if path.is_dir() {
            self.load_from_directory(path)
        } else if path.is_file() {
            self.load_from_file(path)
        } else {
            Err(anyhow::anyhow!("Path does not exist: {}", path.display()))
        }
    }

    fn load_from_directory_recursive(&self, dir_path: &Path, listings: &mut Vec<Listing>) -> Result<()> {
        let dir = std::fs::read_dir(dir_path)
            .with_context(|| format!("Failed to read directory: {}", dir_path.display()))?;

        for entry in dir {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if path.extension().map(|ext| ext == "jsonl").unwrap_or(false) {
                    match self.load_from_file(&path) {
                        Ok(mut file_listings) => listings.append(&mut file_listings),
                        Err(e) => warn!("Failed to load file {}: {}", path.display(), e),
                    }
                }
            } else if path.is_dir() {
                if let Err(e) = self.load_from_directory_recursive(&path, listings) {
                    warn!("Failed to load from directory {}: {}", path.display(), e);
                }
            }
        }

        Ok(())
    }
}

impl Default for ListingLoader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn default_listings() -> Vec<Listing> {
    let week_end = NaiveDate::from_ymd_opt(2026, 10, 17);

    let mut food_lion = Listing::new(
        "food-lion",
        "Food Lion",
        ListingKind::Grocery,
        "MVP card deals every Wednesday on N Bridge St",
    )
    .with_deal(Deal::new("egg", "Large eggs, dozen", "$1.99", "Save $2.00"))
    .with_deal(Deal::new("bread-slice", "Store brand bread", "$1.25", "Save $0.75"));
    if let Some(date) = week_end {
        food_lion = food_lion.with_expiry(date);
    }

    vec![
        food_lion,
        Listing::new(
            "ingles",
            "Ingles Markets",
            ListingKind::Grocery,
            "Fuel points with every grocery purchase",
        )
        .with_deal(Deal::new("drumstick-bite", "Chicken thighs, family pack", "$5.99", "Save $3.00")),
        Listing::new(
            "aldi",
            "ALDI",
            ListingKind::Grocery,
            "Low everyday prices, bring your own bags",
        )
        .with_deal(Deal::new("apple-alt", "Gala apples, 3 lb", "$2.49", "Save $1.00")),
        Listing::new(
            "lowes-foods",
            "Lowes Foods",
            ListingKind::Grocery,
            "Fresh local produce and weekly digital coupons",
        ),
        Listing::new(
            "elkin-hardware",
            "Elkin Hardware",
            ListingKind::Business,
            "Family owned hardware and garden supply, senior discount Tuesdays",
        ),
        Listing::new(
            "yadkin-thrift",
            "Yadkin Valley Thrift",
            ListingKind::Business,
            "Secondhand furniture, clothing and books",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const FOOD_LION: &str = r#"{"id": "food-lion", "name": "Food Lion", "kind": "grocery", "description": "Weekly specials"}"#;
    const HARDWARE: &str = r#"{"id": "elkin-hardware", "name": "Elkin Hardware", "kind": "business", "deals": [{"icon": "tools", "item": "Hammer", "price": "$9.99", "savings": "Save $2"}]}"#;

    #[test]
    fn test_load_from_file() {
        let loader = ListingLoader::new();
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "{}", FOOD_LION).unwrap();
        writeln!(temp_file, "{}", HARDWARE).unwrap();

        let listings = loader.load_from_file(temp_file.path()).unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].id(), "food-lion");
        assert_eq!(listings[1].kind(), ListingKind::Business);
        assert_eq!(listings[1].deals().len(), 1);
    }

    #[test]
    fn test_load_skips_blank_and_invalid_lines() {
        let loader = ListingLoader::new();
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "{}", FOOD_LION).unwrap();
        writeln!(temp_file).unwrap();
        writeln!(temp_file, r#"{{"invalid": "json"#).unwrap();
        writeln!(temp_file, r#"{{"id": "x", "name": "No kind"}}"#).unwrap();

        let listings = loader.load_from_file(temp_file.path()).unwrap();
        assert_eq!(listings.len(), 1);
    }

    #[test]
    fn test_load_from_directory_recurses() {
        let loader = ListingLoader::new();
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("shops");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(dir.path().join("grocery.jsonl"), FOOD_LION).unwrap();
        std::fs::write(nested.join("business.jsonl"), HARDWARE).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let listings = loader.load(dir.path()).unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].name(), "Elkin Hardware");
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let loader = ListingLoader::new();
        assert!(loader.load("/definitely/not/here").is_err());
    }

    #[test]
    fn test_listing_text_includes_deals() {
        let listing = default_listings().remove(0);
        let text = listing.text();
        assert!(text.contains("Food Lion"));
        assert!(text.contains("Large eggs"));
    }

    #[test]
    fn test_default_listing_ids_are_unique() {
        let listings = default_listings();
        let mut ids: Vec<_> = listings.iter().map(|l| l.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), listings.len());
    }
}
