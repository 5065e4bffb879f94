use crate::data_structures::Category;
use crate::scheduler::{Scheduler, TaskHandle};
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

pub const DEFAULT_RECALC_DELAY_MS: i64 = 100;

/// Which calculator panel is showing. Selecting a panel schedules its
/// recomputation after a short delay so the panel is laid out first.
pub struct PanelController {
    active: Category,
    recalc_delay: Duration,
    pending: Option<TaskHandle>,
}

impl PanelController {
    pub fn new(initial: Category) -> Self {
        Self::with_delay(initial, Duration::milliseconds(DEFAULT_RECALC_DELAY_MS))
    }

    pub fn with_delay(initial: Category, recalc_delay: Duration) -> Self {
        Self {
            active: initial,
            recalc_delay,
            pending: None,
        }
    }

    /// Activates `category` and schedules `make_task(category)`. A recompute
    /// still pending from an earlier selection is cancelled.
    pub fn select<T: Clone>(
        &mut self,
        category: Category,
        now: DateTime<Utc>,
        scheduler: &mut Scheduler<T>,
        make_task: impl FnOnce(Category) -> T,
    ) -> TaskHandle {
        if let Some(previous) = self.pending.take() {
            scheduler.cancel(previous);
        }

        self.active = category;
        debug!(category = %category, "panel selected");

        let handle = scheduler.schedule_after(now, self.recalc_delay, make_task(category));
        self.pending = Some(handle);
        handle
    }

    pub fn active(&self) -> Category {
        self.active
    }

    pub fn is_active(&self, category: Category) -> bool {
        self.active == category
    }

    pub fn recalc_delay(&self) -> Duration {
        self.recalc_delay
    }

    pub fn next(&self) -> Category {
        match self.active {
            Category::Gas => Category::Grocery,
            Category::Grocery => Category::Dining,
            Category::Dining => Category::Gas,
        }
    }

    pub fn previous(&self) -> Category {
        match self.active {
            Category::Gas => Category::Dining,
            Category::Grocery => Category::Gas,
            Category::Dining => Category::Grocery,
        }
    }
}

impl Default for PanelController {
    fn default() -> Self {
        Self::new(Category::default())
    }
}
