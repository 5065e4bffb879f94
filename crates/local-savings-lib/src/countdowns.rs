use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const DEFAULT_COUNTDOWN_INTERVAL_SECS: i64 = 60;

const MS_PER_MINUTE: i64 = 60 * 1000;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownEvent {
    pub id: String,
    pub name: String,
    pub starts_at: NaiveDateTime,
}

impl CountdownEvent {
    pub fn new(id: &str, name: &str, starts_at: NaiveDateTime) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            starts_at,
        }
    }

    /// Label for the time left until the event, in local wall-clock time.
    pub fn label(&self, now: NaiveDateTime) -> String {
        countdown_label(self.starts_at, now)
    }
}

pub fn countdown_label(starts_at: NaiveDateTime, now: NaiveDateTime) -> String {
    let distance = (starts_at - now).num_milliseconds();
    if distance < 0 {
        return "Event has passed".to_string();
    }

    let days = distance / MS_PER_DAY;
    let hours = (distance % MS_PER_DAY) / MS_PER_HOUR;
    let minutes = (distance % MS_PER_HOUR) / MS_PER_MINUTE;

    if days > 30 {
        format!("{} days to go", days)
    } else if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else {
        format!("{}h {}m", hours, minutes)
    }
}

fn at(year: i32, month: u32, day: u32, hour: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, 0, 0)
}

pub fn default_events() -> Vec<CountdownEvent> {
    [
        ("countdown-pumpkin", "Pumpkin Festival", at(2025, 9, 27, 9)),
        ("countdown-wine", "Yadkin Valley Wine Festival", at(2026, 5, 16, 10)),
        ("countdown-trail", "Elkin Trail Days", at(2026, 6, 5, 9)),
    ]
    .into_iter()
    .filter_map(|(id, name, starts_at)| starts_at.map(|starts_at| CountdownEvent::new(id, name, starts_at)))
    .collect()
}
