use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

const MS_PER_DAY: i64 = 1000 * 3600 * 24;
pub const URGENT_WITHIN_DAYS: i64 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub icon: String,
    pub item: String,
    pub price: String,
    pub savings: String,
}

impl Deal {
    pub fn new(icon: &str, item: &str, price: &str, savings: &str) -> Self {
        Self {
            icon: icon.to_string(),
            item: item.to_string(),
            price: price.to_string(),
            savings: savings.to_string(),
        }
    }

    pub fn is_best_deal(&self) -> bool {
        self.savings.contains("Save $3") || self.savings.contains("Save $2")
    }

    pub fn icon_class(&self) -> String {
        format!("fas fa-{}", self.icon)
    }
}

/// Whole days until `expires` (midnight), rounded up.
pub fn days_until(expires: NaiveDate, now: NaiveDateTime) -> Option<i64> {
    let expiry = expires.and_hms_opt(0, 0, 0)?;
    let diff = (expiry - now).num_milliseconds();
    Some(diff.div_euclid(MS_PER_DAY) + i64::from(diff.rem_euclid(MS_PER_DAY) != 0))
}

/// Badge text for a deal expiring within the urgent window, if any.
pub fn urgency_badge(expires: NaiveDate, now: NaiveDateTime) -> Option<String> {
    let days = days_until(expires, now)?;
    if days > 0 && days <= URGENT_WITHIN_DAYS {
        Some(format!("{} days left!", days))
    } else {
        None
    }
}

pub fn last_updated_label(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Per-store weekly deal lists. Deals can only be added to known stores.
#[derive(Debug, Clone, Default)]
pub struct DealBoard {
    boards: BTreeMap<String, Vec<Deal>>,
    last_updated: Option<NaiveDate>,
}

impl DealBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_store(&mut self, store_id: &str) {
        self.boards.entry(store_id.to_string()).or_default();
    }

    pub fn add_deal(&mut self, store_id: &str, icon: &str, item: &str, price: &str, savings: &str) -> bool {
        match self.boards.get_mut(store_id) {
            Some(deals) => {
                deals.push(Deal::new(icon, item, price, savings));
                true
            }
            None => {
                debug!(store_id, "no deal board for store");
                false
            }
        }
    }

    pub fn deals_for(&self, store_id: &str) -> &[Deal] {
        self.boards.get(store_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn best_deals(&self) -> Vec<(&str, &Deal)> {
        self.boards
            .iter()
            .flat_map(|(store, deals)| deals.iter().map(move |deal| (store.as_str(), deal)))
            .filter(|(_, deal)| deal.is_best_deal())
            .collect()
    }

    pub fn touch(&mut self, today: NaiveDate) {
        self.last_updated = Some(today);
    }

    pub fn last_updated_label(&self) -> Option<String> {
        self.last_updated.map(last_updated_label)
    }
}
