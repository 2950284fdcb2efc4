use crate::scroll::{BodyPin, PINNED_PROPERTIES};
use derive_more::{Display, From, Into};
use orbital::Size;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From, Into)]
pub struct ListenerId(u64);

pub trait Viewport {
    fn viewport_size(&self) -> Size;
}

pub trait ScrollSurface {
    fn scroll_offset(&self) -> f64;
    /// Offset the document is currently pinned at, whoever pinned it.
    fn pinned_offset(&self) -> Option<f64>;
    /// Pin the document so that content stays where it was at `offset`.
    fn lock_scroll(&mut self, offset: f64);
    /// Undo the pin and scroll back to `offset`.
    fn unlock_scroll(&mut self, offset: f64);
}

/// Registration for resize notifications. The host delivers them by
/// dispatching [`crate::events::NavEvent::Resize`] while subscribed.
pub trait ResizeSource {
    fn subscribe_resize(&mut self) -> ListenerId;
    fn unsubscribe_resize(&mut self, id: ListenerId);
}

/// Everything the navigation core needs from the document it lives in.
pub trait DocumentHost: Viewport + ScrollSurface + ResizeSource {}

impl<T: Viewport + ScrollSurface + ResizeSource + ?Sized> DocumentHost for T {}

impl<T: Viewport> Viewport for Rc<RefCell<T>> {
    fn viewport_size(&self) -> Size {
        self.borrow().viewport_size()
    }
}

impl<T: ScrollSurface> ScrollSurface for Rc<RefCell<T>> {
    fn scroll_offset(&self) -> f64 {
        self.borrow().scroll_offset()
    }

    fn pinned_offset(&self) -> Option<f64> {
        self.borrow().pinned_offset()
    }

    fn lock_scroll(&mut self, offset: f64) {
        self.borrow_mut().lock_scroll(offset)
    }

    fn unlock_scroll(&mut self, offset: f64) {
        self.borrow_mut().unlock_scroll(offset)
    }
}

impl<T: ResizeSource> ResizeSource for Rc<RefCell<T>> {
    fn subscribe_resize(&mut self) -> ListenerId {
        self.borrow_mut().subscribe_resize()
    }

    fn unsubscribe_resize(&mut self, id: ListenerId) {
        self.borrow_mut().unsubscribe_resize(id)
    }
}

/// Headless document. A pinned body behaves like `position: fixed`: the
/// document reports offset 0 and ignores scroll requests until unpinned.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    viewport: Size,
    scroll_y: f64,
    pin: Option<BodyPin>,
    body_style: BTreeMap<String, String>,
    listeners: Vec<ListenerId>,
    next_listener: u64,
    lock_calls: usize,
    unlock_calls: usize,
}

impl MemoryHost {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Returns `false` when the body is pinned and the request was dropped.
    pub fn scroll_to(&mut self, y: f64) -> bool {
        if self.pin.is_some() {
            log::debug!("Scroll to {} ignored, body is pinned", y);
            return false;
        }
        self.scroll_y = y.max(0.0);
        true
    }

    pub fn body_pin(&self) -> Option<BodyPin> {
        self.pin
    }

    pub fn body_style(&self, property: &str) -> Option<&str> {
        self.body_style.get(property).map(String::as_str)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn lock_calls(&self) -> usize {
        self.lock_calls
    }

    pub fn unlock_calls(&self) -> usize {
        self.unlock_calls
    }
}

impl Viewport for MemoryHost {
    fn viewport_size(&self) -> Size {
        self.viewport
    }
}

impl ScrollSurface for MemoryHost {
    fn scroll_offset(&self) -> f64 {
        if self.pin.is_some() { 0.0 } else { self.scroll_y }
    }

    fn pinned_offset(&self) -> Option<f64> {
        self.pin.map(|pin| pin.offset)
    }

    fn lock_scroll(&mut self, offset: f64) {
        let pin = BodyPin::at(offset);
        for (property, value) in pin.declarations() {
            self.body_style.insert(property.to_string(), value);
        }
        self.pin = Some(pin);
        self.lock_calls += 1;
    }

    fn unlock_scroll(&mut self, offset: f64) {
        for property in PINNED_PROPERTIES {
            self.body_style.remove(property);
        }
        self.pin = None;
        self.scroll_y = offset;
        self.unlock_calls += 1;
    }
}

impl ResizeSource for MemoryHost {
    fn subscribe_resize(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(id);
        id
    }

    fn unsubscribe_resize(&mut self, id: ListenerId) {
        self.listeners.retain(|l| *l != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinned_body_ignores_scrolling() {
        let mut host = MemoryHost::new(Size::new(800.0, 600.0));
        assert!(host.scroll_to(640.0));

        assert_eq!(host.pinned_offset(), None);
        host.lock_scroll(640.0);
        assert_eq!(host.scroll_offset(), 0.0);
        assert_eq!(host.pinned_offset(), Some(640.0));
        assert_eq!(host.body_style("position"), Some("fixed"));
        assert_eq!(host.body_style("top"), Some("-640px"));
        assert!(!host.scroll_to(10.0));

        host.unlock_scroll(640.0);
        assert_eq!(host.scroll_offset(), 640.0);
        assert_eq!(host.body_style("position"), None);
        assert_eq!(host.body_style("overflow"), None);
    }

    #[test]
    fn test_listeners_detach() {
        let mut host = MemoryHost::default();
        let a = host.subscribe_resize();
        let b = host.subscribe_resize();
        assert_ne!(a, b);
        assert_eq!(host.listener_count(), 2);

        host.unsubscribe_resize(a);
        host.unsubscribe_resize(a);
        assert_eq!(host.listener_count(), 1);
    }

    #[test]
    fn test_shared_host_forwards() {
        let host = MemoryHost::new(Size::new(600.0, 900.0)).shared();
        let mut handle = host.clone();

        handle.lock_scroll(15.0);
        assert!(host.borrow().body_pin().is_some());
        assert_eq!(handle.viewport_size(), Size::new(600.0, 900.0));
    }
}
