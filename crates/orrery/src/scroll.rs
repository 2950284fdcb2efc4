use crate::host::ScrollSurface;
use serde::Serialize;

/// Style properties the lock writes onto the document body.
pub const PINNED_PROPERTIES: [&str; 4] = ["overflow", "position", "width", "top"];

/// Body styling that keeps the page visually in place while scrolling is locked:
/// the body is fixed and shifted up by the saved offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyPin {
    pub offset: f64,
}

impl BodyPin {
    pub fn at(offset: f64) -> Self {
        Self { offset }
    }

    pub fn declarations(&self) -> [(&'static str, String); 4] {
        [
            ("overflow", "hidden".to_string()),
            ("position", "fixed".to_string()),
            ("width", "100%".to_string()),
            ("top", format!("-{}px", self.offset)),
        ]
    }

    pub fn css(&self) -> String {
        self.declarations()
            .iter()
            .map(|(property, value)| format!("{property}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One holder's claim on the document's scroll position. The pin itself lives on
/// the document, so there is at most one outstanding acquisition per document no
/// matter how many locks point at it.
#[derive(Debug, Default)]
pub struct ScrollLock {
    saved_scroll_y: Option<f64>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.saved_scroll_y.is_some()
    }

    pub fn saved_offset(&self) -> Option<f64> {
        self.saved_scroll_y
    }

    /// Captures the current offset and pins the surface. Returns `false` if this
    /// lock or any other already pinned the surface, in which case nothing is touched.
    pub fn acquire<S: ScrollSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if self.is_held() {
            return false;
        }
        if let Some(pinned) = surface.pinned_offset() {
            log::debug!("Document already pinned at {}, lock not taken", pinned);
            return false;
        }
        let offset = surface.scroll_offset();
        surface.lock_scroll(offset);
        self.saved_scroll_y = Some(offset);
        log::debug!("Scroll locked at {}", offset);
        true
    }

    /// Unpins the surface and restores the captured offset. Releasing a lock
    /// that is not held is a no-op.
    pub fn release<S: ScrollSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        let Some(offset) = self.saved_scroll_y.take() else {
            return false;
        };
        surface.unlock_scroll(offset);
        log::debug!("Scroll restored to {}", offset);
        true
    }
}
