use crate::events::NavEvent;
use crate::host::{DocumentHost, ListenerId};
use crate::items::{Href, NavItems};
use crate::menu::MOBILE_BREAKPOINT;
use crate::menu::view::{Frame, HeaderFrame};
use crate::scroll::ScrollLock;
use orbital::{AnimationClock, LayoutError, OrbitalLayout, Point};

/// Validated inputs of a controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub items: NavItems,
    pub layout: OrbitalLayout,
    pub mobile_breakpoint: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            items: NavItems::defaults(),
            layout: OrbitalLayout::default(),
            mobile_breakpoint: MOBILE_BREAKPOINT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub is_open: bool,
    /// Item whose label is disclosed by hover. At most one at a time.
    pub active_index: Option<usize>,
    pub is_mobile: bool,
}

impl MenuState {
    /// Mobile has no hover, so every label is shown there.
    pub fn label_visible(&self, index: usize) -> bool {
        self.is_mobile || self.active_index == Some(index)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavEffect {
    pub should_redraw: bool,
    /// Anchor the host should scroll to.
    pub navigate: Option<Href>,
}

impl NavEffect {
    pub fn new(should_redraw: bool, navigate: Option<Href>) -> Self {
        Self {
            should_redraw,
            navigate,
        }
    }

    fn redraw(changed: bool) -> Self {
        Self::new(changed, None)
    }
}

/// Owns the menu lifecycle and is the only thing that mutates [`MenuState`]
/// or the scroll lock. Dropping it releases everything it acquired from the host.
#[derive(Debug)]
pub struct NavigationController<H: DocumentHost> {
    items: NavItems,
    layout: OrbitalLayout,
    mobile_breakpoint: f64,
    state: MenuState,
    scroll_lock: ScrollLock,
    clock: AnimationClock,
    opened_at: f64,
    resize_listener: Option<ListenerId>,
    host: H,
}

impl<H: DocumentHost> NavigationController<H> {
    /// Subscribes to resize notifications and classifies the viewport.
    pub fn mount(settings: Settings, mut host: H) -> Result<Self, LayoutError> {
        let Settings {
            items,
            layout,
            mobile_breakpoint,
        } = settings;
        layout.validate(items.len())?;

        let resize_listener = Some(host.subscribe_resize());
        let mut controller = Self {
            items,
            layout,
            mobile_breakpoint,
            state: MenuState::default(),
            scroll_lock: ScrollLock::new(),
            clock: AnimationClock::new(),
            opened_at: 0.0,
            resize_listener,
            host,
        };
        controller.check_viewport();
        log::debug!(
            "Navigation mounted with {} items, mobile={}",
            controller.items.len(),
            controller.state.is_mobile
        );
        Ok(controller)
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_lock.is_held()
    }

    /// Idempotent: an open menu keeps its single scroll lock.
    pub fn open_menu(&mut self) -> bool {
        if self.state.is_open {
            return false;
        }
        self.state.is_open = true;
        self.opened_at = self.clock.elapsed();
        self.scroll_lock.acquire(&mut self.host);
        log::debug!("Menu opened");
        true
    }

    /// Safe to call repeatedly; only the first call after an open does anything.
    pub fn close_menu(&mut self) -> bool {
        let was_open = self.state.is_open;
        self.state.is_open = false;
        self.state.active_index = None;
        let released = self.scroll_lock.release(&mut self.host);
        if was_open {
            log::debug!("Menu closed");
        }
        was_open || released
    }

    /// Desktop hover disclosure. Ignored on mobile and for unknown indices.
    pub fn set_hover(&mut self, index: Option<usize>) -> bool {
        if self.state.is_mobile {
            return false;
        }
        if let Some(i) = index
            && i >= self.items.len()
        {
            log::warn!("Ignoring hover on item {} of {}", i, self.items.len());
            return false;
        }
        let changed = self.state.active_index != index;
        self.state.active_index = index;
        changed
    }

    /// Closes the menu if the click landed beyond the dismissal radius.
    pub fn handle_overlay_click(&mut self, pointer: Point, viewport_center: Point) -> bool {
        if !(pointer.is_finite() && viewport_center.is_finite()) {
            log::warn!("Ignoring overlay click at {:?} around {:?}", pointer, viewport_center);
            return false;
        }
        if self.layout.contains(pointer, viewport_center) {
            return false;
        }
        self.close_menu()
    }

    /// An item's own control was clicked: close and hand back its anchor.
    pub fn activate_item(&mut self, index: usize) -> Option<Href> {
        if !self.state.is_open {
            return None;
        }
        let Some(item) = self.items.get(index) else {
            log::warn!("Ignoring click on item {} of {}", index, self.items.len());
            return None;
        };
        let href = item.href.clone();
        self.close_menu();
        log::debug!("Navigating to {}", href);
        Some(href)
    }

    pub fn check_viewport(&mut self) -> bool {
        let is_mobile = self.host.viewport_size().width < self.mobile_breakpoint;
        let changed = self.state.is_mobile != is_mobile;
        self.state.is_mobile = is_mobile;
        if changed {
            log::debug!("Viewport is now {}", if is_mobile { "mobile" } else { "desktop" });
        }
        changed
    }

    pub fn tick(&mut self, dt: f64) {
        self.clock.advance(dt);
    }

    pub fn labels_visible(&self) -> Vec<bool> {
        (0..self.items.len())
            .map(|i| self.state.label_visible(i))
            .collect()
    }

    /// The overlay as it should look now, or `None` while closed.
    pub fn frame(&self) -> Option<Frame> {
        self.state.is_open.then(|| {
            Frame::build(
                &self.items,
                &self.layout,
                &self.state,
                self.host.viewport_size().center(),
                self.clock.since(self.opened_at),
            )
        })
    }

    pub fn header(&self) -> HeaderFrame {
        HeaderFrame {
            compass_rotation: self.layout.compass_rotation(self.clock.elapsed()),
            menu_open: self.state.is_open,
        }
    }

    pub fn dispatch(&mut self, event: NavEvent) -> NavEffect {
        match event {
            NavEvent::Open => NavEffect::redraw(self.open_menu()),
            NavEvent::Close | NavEvent::CenterClick | NavEvent::Escape => {
                NavEffect::redraw(self.close_menu())
            }
            NavEvent::Hover(index) => NavEffect::redraw(self.set_hover(index)),
            NavEvent::OverlayClick(pointer) => {
                let center = self.host.viewport_size().center();
                NavEffect::redraw(self.handle_overlay_click(pointer, center))
            }
            NavEvent::ItemClick(index) => {
                let navigate = self.activate_item(index);
                NavEffect::new(navigate.is_some(), navigate)
            }
            NavEvent::Resize => NavEffect::redraw(self.check_viewport()),
            NavEvent::Tick(dt) => {
                self.tick(dt);
                // the header compass keeps turning while closed
                NavEffect::redraw(true)
            }
        }
    }
}

impl<H: DocumentHost> Drop for NavigationController<H> {
    fn drop(&mut self) {
        if self.scroll_lock.release(&mut self.host) {
            log::debug!("Scroll lock released on unmount");
        }
        if let Some(id) = self.resize_listener.take() {
            self.host.unsubscribe_resize(id);
        }
    }
}
