//! TUI widget modules

pub mod calculator;
pub mod events;
pub mod gas;
pub mod header;
pub mod listings;
pub mod popup;
pub mod shortcuts;
pub mod toast;
pub mod totals;

pub use calculator::*;
pub use events::*;
pub use gas::*;
pub use header::*;
pub use listings::*;
pub use popup::*;
pub use shortcuts::*;
pub use toast::*;
pub use totals::*;
