pub mod clock;
pub mod geometry;
pub mod layout;

pub use clock::{AnimationClock, Period};
pub use geometry::{Point, Size};
pub use layout::{LayoutError, LayoutPreset, OrbitPhase, OrbitalLayout, Placement, RadiusProfile};
