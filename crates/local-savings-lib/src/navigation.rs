pub const DEFAULT_HEADER_HEIGHT: f64 = 80.0;
pub const SCROLL_MARGIN: f64 = 20.0;
pub const BACK_TO_TOP_THRESHOLD: f64 = 400.0;
pub const SCROLL_DEBOUNCE_MS: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    HamburgerClicked,
    Escape,
    ClickOutside,
    LinkFollowed,
}

/// Mobile navigation drawer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `event`; returns whether the menu is open afterwards.
    pub fn handle(&mut self, event: NavEvent) -> bool {
        self.open = match event {
            NavEvent::HamburgerClicked => !self.open,
            NavEvent::Escape | NavEvent::ClickOutside | NavEvent::LinkFollowed => false,
        };
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

/// Scroll position for an in-page link, leaving room for the sticky header.
/// `"#"` and `""` go nowhere.
pub fn scroll_target(href: &str, target_offset_top: f64, header_height: Option<f64>) -> Option<f64> {
    if href.is_empty() || href == "#" {
        return None;
    }
    let header = header_height
        .filter(|height| *height > 0.0)
        .unwrap_or(DEFAULT_HEADER_HEIGHT);
    Some(target_offset_top - header - SCROLL_MARGIN)
}

pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_THRESHOLD
}

/// Keeps keyboard focus cycling inside a container of `len` focusable items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTrap {
    len: usize,
}

impl FocusTrap {
    pub fn new(len: usize) -> Self {
        Self { len }
    }

    pub fn first(&self) -> Option<usize> {
        (self.len > 0).then_some(0)
    }

    /// Index focused after Tab (or Shift-Tab when `backwards`) from `current`.
    pub fn next(&self, current: usize, backwards: bool) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let current = current.min(self.len - 1);
        Some(if backwards {
            if current == 0 {
                self.len - 1
            } else {
                current - 1
            }
        } else if current == self.len - 1 {
            0
        } else {
            current + 1
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
