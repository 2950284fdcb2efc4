pub mod model;
pub mod view;

pub use model::{MenuState, NavEffect, NavigationController, Settings};
pub use view::{Frame, HeaderFrame, ItemFrame, ItemStyle, LabelStyle};

pub const MOBILE_BREAKPOINT: f64 = 768.0; // viewports narrower than this are mobile
pub const LABEL_DROP: f64 = 10.0; // hidden labels sit this far below their slot
pub const ITEM_BASE_Z: i32 = 40; // first item on top
pub const ITEM_Z_STEP: i32 = 10;
pub const LABEL_Z_LIFT: i32 = 5;
