use crate::clock::{Period, triangle};
use crate::geometry::{Point, wrap_degrees};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

pub const BULGE_AMPLITUDE: f64 = 0.3; // max outward stretch at the pulse peak
pub const DISMISSAL_RADIUS: f64 = 120.0; // clicks beyond this close the overlay
pub const PULSE_PERIOD: f64 = 50.0;
pub const STAGGERED_RING_PERIOD: f64 = 50.0;
pub const UNIFORM_RING_PERIOD: f64 = 20.0;
pub const CENTER_PERIOD: f64 = 20.0; // center control, counter-clockwise
pub const COMPASS_PERIOD: f64 = 10.0; // compass glyph, clockwise
pub const STAGGERED_RADII: [f64; 4] = [30.0, 70.0, 150.0, 180.0];
pub const STAGGERED_GUIDES: [f64; 4] = [70.0, 100.0, 130.0, 160.0];
pub const UNIFORM_RADIUS: f64 = 100.0;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum LayoutPreset {
    /// Each item sits on its own orbit, nearest first.
    #[default]
    #[strum(serialize = "staggered", serialize = "stagger", serialize = "s")]
    Staggered,
    /// All items share a single orbit.
    #[strum(serialize = "uniform", serialize = "ring", serialize = "u")]
    Uniform,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Layout needs at least one item")]
    NoItems,
    #[error("Radius profile defines {found} radii for {expected} items")]
    RadiusCountMismatch { expected: usize, found: usize },
    #[error("Radius {0} must be positive and finite")]
    InvalidRadius(f64),
    #[error("The {name} period must be positive, got {value}")]
    InvalidPeriod { name: &'static str, value: f64 },
    #[error("Bulge amplitude {0} must lie in [0, 1]")]
    InvalidBulge(f64),
    #[error("Dismissal radius {0} must be positive and finite")]
    InvalidDismissalRadius(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiusProfile {
    PerItem(Vec<f64>),
    Uniform(f64),
}

impl RadiusProfile {
    pub fn radius_for(&self, index: usize) -> Option<f64> {
        match self {
            Self::PerItem(radii) => radii.get(index).copied(),
            Self::Uniform(r) => Some(*r),
        }
    }

    pub fn validate(&self, item_count: usize) -> Result<(), LayoutError> {
        let radii: &[f64] = match self {
            Self::PerItem(radii) => {
                if radii.len() != item_count {
                    return Err(LayoutError::RadiusCountMismatch {
                        expected: item_count,
                        found: radii.len(),
                    });
                }
                radii
            }
            Self::Uniform(r) => std::slice::from_ref(r),
        };

        match radii.iter().find(|r| !(r.is_finite() && **r > 0.0)) {
            Some(bad) => Err(LayoutError::InvalidRadius(*bad)),
            None => Ok(()),
        }
    }
}

/// Animation inputs for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrbitPhase {
    /// Rotation of the whole ring, degrees.
    pub ring: f64,
    /// Radial pulse progress, `0..=1`.
    pub pulse: f64,
}

impl OrbitPhase {
    pub const ZERO: Self = Self {
        ring: 0.0,
        pulse: 0.0,
    };

    pub fn new(ring: f64, pulse: f64) -> Self {
        Self { ring, pulse }
    }
}

/// Resting angle of an item, evenly distributed from 0°.
pub fn angle_for(index: usize, item_count: usize) -> f64 {
    if item_count == 0 {
        return 0.0;
    }
    index as f64 * 360.0 / item_count as f64
}

/// Radial stretch for an item resting at `angle`. Only the half of the ring
/// where `cos(angle) > 0` breathes; the other half stays at 1.0.
pub fn bulge_multiplier(angle: f64, pulse: f64, amplitude: f64) -> f64 {
    1.0 + angle.to_radians().cos().max(0.0) * amplitude * pulse.clamp(0.0, 1.0)
}

/// Position of item `index` relative to the orbit center.
pub fn position_for(index: usize, item_count: usize, base_radius: f64, phase: OrbitPhase) -> Point {
    offset_for(index, item_count, base_radius, phase, BULGE_AMPLITUDE)
}

fn offset_for(
    index: usize,
    item_count: usize,
    base_radius: f64,
    phase: OrbitPhase,
    amplitude: f64,
) -> Point {
    let angle = angle_for(index, item_count);
    let radius = base_radius * bulge_multiplier(angle, phase.pulse, amplitude);
    // bulge is evaluated in the ring's frame, then the ring is turned
    Point::polar(radius, angle).rotated(phase.ring)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub offset: Point,
    pub ring_rotation: f64,
    /// Rotation applied to the item's own content, undoing the ring's turn.
    pub content_rotation: f64,
}

impl Placement {
    /// Orientation of the content on screen after both rotations compose.
    pub fn net_content_rotation(&self) -> f64 {
        wrap_degrees(self.ring_rotation + self.content_rotation)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalLayout {
    pub radii: RadiusProfile,
    /// Decorative orbit circles drawn behind the items.
    pub guides: Vec<f64>,
    pub ring_period: Period,
    pub pulse_period: Period,
    pub center_period: Period,
    pub compass_period: Period,
    pub bulge: f64,
    pub dismissal_radius: f64,
}

impl Default for OrbitalLayout {
    fn default() -> Self {
        Self::from_preset(LayoutPreset::default())
    }
}

impl OrbitalLayout {
    pub fn from_preset(preset: LayoutPreset) -> Self {
        let (radii, guides, ring_period) = match preset {
            LayoutPreset::Staggered => (
                RadiusProfile::PerItem(STAGGERED_RADII.to_vec()),
                STAGGERED_GUIDES.to_vec(),
                STAGGERED_RING_PERIOD,
            ),
            LayoutPreset::Uniform => (
                RadiusProfile::Uniform(UNIFORM_RADIUS),
                vec![UNIFORM_RADIUS],
                UNIFORM_RING_PERIOD,
            ),
        };

        Self {
            radii,
            guides,
            ring_period: Period::new(ring_period),
            pulse_period: Period::new(PULSE_PERIOD),
            center_period: Period::new(CENTER_PERIOD),
            compass_period: Period::new(COMPASS_PERIOD),
            bulge: BULGE_AMPLITUDE,
            dismissal_radius: DISMISSAL_RADIUS,
        }
    }

    pub fn validate(&self, item_count: usize) -> Result<(), LayoutError> {
        if item_count == 0 {
            return Err(LayoutError::NoItems);
        }
        self.radii.validate(item_count)?;

        for (name, period) in [
            ("ring", self.ring_period),
            ("pulse", self.pulse_period),
            ("center", self.center_period),
            ("compass", self.compass_period),
        ] {
            if !period.is_valid() {
                return Err(LayoutError::InvalidPeriod {
                    name,
                    value: *period,
                });
            }
        }

        if !(0.0..=1.0).contains(&self.bulge) {
            return Err(LayoutError::InvalidBulge(self.bulge));
        }
        if !(self.dismissal_radius.is_finite() && self.dismissal_radius > 0.0) {
            return Err(LayoutError::InvalidDismissalRadius(self.dismissal_radius));
        }
        if let Some(bad) = self.guides.iter().find(|r| !(r.is_finite() && **r > 0.0)) {
            return Err(LayoutError::InvalidRadius(*bad));
        }
        Ok(())
    }

    pub fn phase_at(&self, elapsed: f64) -> OrbitPhase {
        OrbitPhase::new(
            self.ring_period.degrees(elapsed),
            triangle(self.pulse_period.cycle(elapsed)),
        )
    }

    pub fn placement(&self, index: usize, item_count: usize, phase: OrbitPhase) -> Option<Placement> {
        if index >= item_count {
            return None;
        }
        let base_radius = self.radii.radius_for(index)?;

        Some(Placement {
            offset: offset_for(index, item_count, base_radius, phase, self.bulge),
            ring_rotation: wrap_degrees(phase.ring),
            content_rotation: wrap_degrees(-phase.ring),
        })
    }

    pub fn placements(&self, item_count: usize, elapsed: f64) -> Vec<Placement> {
        let phase = self.phase_at(elapsed);
        (0..item_count)
            .filter_map(|i| self.placement(i, item_count, phase))
            .collect()
    }

    /// Whether `point` lies inside the interactive circle around `center`.
    /// The boundary itself counts as inside.
    pub fn contains(&self, point: Point, center: Point) -> bool {
        point.distance_to(center) <= self.dismissal_radius
    }

    /// Rotation of the center control; it turns against the ring.
    pub fn center_rotation(&self, elapsed: f64) -> f64 {
        wrap_degrees(-self.center_period.degrees(elapsed))
    }

    pub fn compass_rotation(&self, elapsed: f64) -> f64 {
        self.compass_period.degrees(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn angle_of(p: Point) -> f64 {
        wrap_degrees(p.y.atan2(p.x).to_degrees())
    }

    /// Shortest way round between two angles, in `[0, 180]`.
    fn angle_difference(a: f64, b: f64) -> f64 {
        ((a - b + 180.0).rem_euclid(360.0) - 180.0).abs()
    }

    #[test]
    fn test_preset_deserialization() {
        let cases = vec![
            ("\"staggered\"", LayoutPreset::Staggered),
            ("\"Staggered\"", LayoutPreset::Staggered),
            ("\"S\"", LayoutPreset::Staggered),
            ("\"uniform\"", LayoutPreset::Uniform),
            ("\"RING\"", LayoutPreset::Uniform),
            ("\"u\"", LayoutPreset::Uniform),
        ];

        for (json, expected) in cases {
            let deserialized: LayoutPreset = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<LayoutPreset>("\"spiral\"").is_err());
    }

    #[test]
    fn test_positions_evenly_spaced_at_rest() {
        for n in 1..=12 {
            let positions: Vec<Point> = (0..n)
                .map(|i| position_for(i, n, 100.0, OrbitPhase::ZERO))
                .collect();

            for (i, p) in positions.iter().enumerate() {
                let expected = i as f64 * 360.0 / n as f64;
                assert!(angle_difference(angle_of(*p), expected) < 1e-6, "n={n} i={i}");
                // the pulse is at rest, so every item sits on its base radius
                assert!((p.distance_to(Point::default()) - 100.0).abs() < 1e-6);
            }

            for a in 0..n {
                for b in (a + 1)..n {
                    assert!(positions[a].distance_to(positions[b]) > 1e-6, "n={n}");
                }
            }
        }
    }

    #[test]
    fn test_bulge_multiplier_bounds() {
        for step in 0..=720 {
            let angle = step as f64 * 0.5;
            for pulse in [0.0, 0.1, 0.5, 0.9, 1.0] {
                let m = bulge_multiplier(angle, pulse, BULGE_AMPLITUDE);
                assert!((1.0..=1.3 + EPS).contains(&m), "angle {angle} pulse {pulse}: {m}");
                if angle.to_radians().cos() <= 0.0 {
                    assert_eq!(m, 1.0, "angle {angle}");
                }
            }
        }
    }

    #[test]
    fn test_outward_item_bulges_inward_item_does_not() {
        let peak = OrbitPhase::new(0.0, 1.0);

        // index 0 of 4 sits at 0°, fully outward
        let outward = position_for(0, 4, 100.0, peak);
        assert!((outward.x - 130.0).abs() < EPS);
        assert!(outward.y.abs() < EPS);

        // index 2 of 4 sits at 180°, clamped to no bulge
        let inward = position_for(2, 4, 100.0, peak);
        assert!((inward.x + 100.0).abs() < EPS);
    }

    #[test]
    fn test_pulse_breathes_out_and_back() {
        let layout = OrbitalLayout::from_preset(LayoutPreset::Uniform);
        let radius_at = |t: f64| layout.placements(4, t)[0].offset.distance_to(Point::default());

        assert!((radius_at(0.0) - 100.0).abs() < EPS);
        assert!((radius_at(12.5) - 115.0).abs() < 1e-6);
        assert!((radius_at(25.0) - 130.0).abs() < 1e-6);
        assert!((radius_at(37.5) - 115.0).abs() < 1e-6);
        assert!((radius_at(50.0) - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_ring_rotation_revolves_items() {
        let layout = OrbitalLayout::from_preset(LayoutPreset::Staggered);
        // a quarter of the ring period, with the pulse back at rest on a full cycle
        let phase = OrbitPhase::new(90.0, 0.0);
        let p = layout.placement(1, 4, phase).unwrap();

        // item 1 rests at 90° on the 70 orbit, ring adds another 90°
        assert!(p.offset.distance_to(Point::new(-70.0, 0.0)) < 1e-6);
        assert!((p.ring_rotation - 90.0).abs() < EPS);
        assert!((p.content_rotation - 270.0).abs() < EPS);
    }

    #[test]
    fn test_content_stays_upright() {
        let layout = OrbitalLayout::default();
        for t in [0.0, 3.3, 12.5, 49.9, 50.0, 123.4] {
            for p in layout.placements(4, t) {
                let net = p.net_content_rotation();
                assert!(net < 1e-6 || (360.0 - net) < 1e-6, "t={t}: {net}");
            }
        }
    }

    #[test]
    fn test_ring_rotation_wraps() {
        let layout = OrbitalLayout::from_preset(LayoutPreset::Uniform);
        assert!((layout.phase_at(25.0).ring - 90.0).abs() < 1e-6);
        assert!(layout.phase_at(20.0).ring.abs() < 1e-6);
    }

    #[test]
    fn test_dismissal_boundary_is_inclusive() {
        let layout = OrbitalLayout::default();
        let center = Point::new(500.0, 400.0);

        assert!(layout.contains(Point::new(620.0, 400.0), center));
        assert!(layout.contains(Point::new(572.0, 495.0), center));
        assert!(!layout.contains(Point::new(621.0, 400.0), center));
    }

    #[test]
    fn test_center_and_compass_rotation() {
        let layout = OrbitalLayout::default();
        assert_eq!(layout.center_rotation(0.0), 0.0);
        assert!((layout.center_rotation(5.0) - 270.0).abs() < 1e-6);
        assert!((layout.compass_rotation(2.5) - 90.0).abs() < 1e-6);
    }

    #[test]
    fn test_validate() {
        let layout = OrbitalLayout::from_preset(LayoutPreset::Staggered);
        assert_eq!(layout.validate(4), Ok(()));
        assert_eq!(layout.validate(0), Err(LayoutError::NoItems));
        assert_eq!(
            layout.validate(5),
            Err(LayoutError::RadiusCountMismatch {
                expected: 5,
                found: 4
            })
        );

        let uniform = OrbitalLayout::from_preset(LayoutPreset::Uniform);
        assert_eq!(uniform.validate(7), Ok(()));

        let mut broken = uniform.clone();
        broken.bulge = 1.5;
        assert_eq!(broken.validate(4), Err(LayoutError::InvalidBulge(1.5)));

        let mut broken = uniform.clone();
        broken.ring_period = Period::new(0.0);
        assert!(matches!(
            broken.validate(4),
            Err(LayoutError::InvalidPeriod { name: "ring", .. })
        ));

        let mut broken = uniform;
        broken.radii = RadiusProfile::Uniform(-1.0);
        assert_eq!(broken.validate(4), Err(LayoutError::InvalidRadius(-1.0)));
    }

    #[test]
    fn test_placement_out_of_range() {
        let layout = OrbitalLayout::default();
        assert!(layout.placement(4, 4, OrbitPhase::ZERO).is_none());
    }
}
