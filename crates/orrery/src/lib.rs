mod macros;

pub mod config;
pub mod events;
pub mod host;
pub mod items;
pub mod menu;
pub mod scroll;
pub mod theme;

#[cfg(feature = "render")]
pub mod render;
