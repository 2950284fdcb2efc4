use crate::items::{Href, IconRef, ItemName, NavItems};
use crate::menu::model::MenuState;
use crate::menu::{ITEM_BASE_Z, ITEM_Z_STEP, LABEL_DROP, LABEL_Z_LIFT};
use crate::theme::{self, ColorTheme};
use orbital::{OrbitalLayout, Point};
use serde::Serialize;

/// Transform of an item relative to the orbit center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemStyle {
    pub x: f64,
    pub y: f64,
    /// Rotation of the item's content, cancelling the ring rotation.
    pub rotation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelStyle {
    pub visible: bool,
    pub offset_y: f64,
}

impl LabelStyle {
    fn new(visible: bool) -> Self {
        Self {
            visible,
            offset_y: if visible { 0.0 } else { LABEL_DROP },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemFrame {
    pub name: ItemName,
    pub href: Href,
    pub icon: IconRef,
    pub theme: ColorTheme,
    pub hovered: bool,
    pub background: String,
    /// Glyph fill stops, left to right.
    pub icon_fill: [String; 2],
    pub style: ItemStyle,
    pub label: LabelStyle,
    pub z_index: i32,
    pub label_z_index: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideFrame {
    pub radius: f64,
    pub theme: ColorTheme,
    pub stops: [String; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CenterFrame {
    pub rotation: f64,
    pub compass_rotation: f64,
    pub dismissal_radius: f64,
}

/// Everything the presentation layer needs to draw the open overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Orbit center in viewport coordinates.
    pub origin: Point,
    /// Time since the overlay opened.
    pub elapsed: f64,
    pub center: CenterFrame,
    pub guides: Vec<GuideFrame>,
    pub items: Vec<ItemFrame>,
}

/// The header's menu button, drawn whether or not the overlay is open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeaderFrame {
    pub compass_rotation: f64,
    pub menu_open: bool,
}

impl Frame {
    pub fn build(
        items: &NavItems,
        layout: &OrbitalLayout,
        state: &MenuState,
        origin: Point,
        elapsed: f64,
    ) -> Self {
        let placements = layout.placements(items.len(), elapsed);

        let item_frames = items
            .iter()
            .zip(placements)
            .enumerate()
            .map(|(i, (item, placement))| {
                let hovered = state.active_index == Some(i);
                let z_index = ITEM_BASE_Z - ITEM_Z_STEP * i as i32;
                ItemFrame {
                    name: item.name.clone(),
                    href: item.href.clone(),
                    icon: item.icon.clone(),
                    theme: item.theme,
                    hovered,
                    background: theme::to_hex(item.theme.background(hovered)),
                    icon_fill: item.theme.icon_fill(hovered).map(theme::to_hex),
                    style: ItemStyle {
                        x: placement.offset.x,
                        y: placement.offset.y,
                        rotation: placement.content_rotation,
                    },
                    label: LabelStyle::new(state.label_visible(i)),
                    z_index,
                    label_z_index: z_index + LABEL_Z_LIFT,
                }
            })
            .collect::<Vec<_>>();

        let guides = layout
            .guides
            .iter()
            .enumerate()
            .map(|(i, radius)| {
                let guide_theme = items
                    .get(i % items.len())
                    .map(|item| item.theme)
                    .unwrap_or_else(|| ColorTheme::cycle(i));
                GuideFrame {
                    radius: *radius,
                    theme: guide_theme,
                    stops: guide_theme.guide_gradient().map(theme::to_hex),
                }
            })
            .collect();

        Self {
            origin,
            elapsed,
            center: CenterFrame {
                rotation: layout.center_rotation(elapsed),
                compass_rotation: layout.compass_rotation(elapsed),
                dismissal_radius: layout.dismissal_radius,
            },
            guides,
            items: item_frames,
        }
    }

    /// Item position in viewport coordinates.
    pub fn absolute(&self, index: usize) -> Option<Point> {
        self.items
            .get(index)
            .map(|item| self.origin.offset_by(Point::new(item.style.x, item.style.y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbital::LayoutPreset;

    fn state(active_index: Option<usize>, is_mobile: bool) -> MenuState {
        MenuState {
            is_open: true,
            active_index,
            is_mobile,
        }
    }

    #[test]
    fn test_frame_layers_and_labels() {
        let items = NavItems::defaults();
        let layout = OrbitalLayout::default();
        let frame = Frame::build(&items, &layout, &state(Some(1), false), Point::new(640.0, 400.0), 0.0);

        let z: Vec<i32> = frame.items.iter().map(|i| i.z_index).collect();
        assert_eq!(z, vec![40, 30, 20, 10]);
        assert_eq!(frame.items[3].label_z_index, 15);

        let labels: Vec<LabelStyle> = frame.items.iter().map(|i| i.label).collect();
        assert_eq!(labels[1], LabelStyle { visible: true, offset_y: 0.0 });
        assert_eq!(labels[0], LabelStyle { visible: false, offset_y: 10.0 });
        assert!(frame.items[1].hovered);
        assert_eq!(frame.items[1].background, "#8b5cf64d");
        assert_eq!(frame.items[1].icon_fill, ["#a1a1aaff".to_string(), "#52525bff".to_string()]);
        assert_eq!(frame.items[0].icon_fill[0], frame.items[0].icon_fill[1]);
    }

    #[test]
    fn test_frame_positions_at_rest() {
        let items = NavItems::defaults();
        let layout = OrbitalLayout::default();
        let origin = Point::new(640.0, 400.0);
        let frame = Frame::build(&items, &layout, &state(None, false), origin, 0.0);

        // Home rests at 0° on its 30 orbit, Skills at 180° on 150
        assert!(frame.absolute(0).unwrap().distance_to(Point::new(670.0, 400.0)) < 1e-9);
        assert!(frame.absolute(2).unwrap().distance_to(Point::new(490.0, 400.0)) < 1e-9);
        assert!(frame.absolute(4).is_none());
        assert_eq!(frame.center.dismissal_radius, 120.0);
    }

    #[test]
    fn test_guides_follow_preset() {
        let items = NavItems::defaults();

        let staggered = Frame::build(&items, &OrbitalLayout::default(), &state(None, false), Point::default(), 0.0);
        let radii: Vec<f64> = staggered.guides.iter().map(|g| g.radius).collect();
        assert_eq!(radii, vec![70.0, 100.0, 130.0, 160.0]);
        assert_eq!(staggered.guides[0].stops, ["#22d3ee4d".to_string(), "#0ea5e94d".to_string()]);
        assert_eq!(staggered.guides[3].theme, ColorTheme::Amber);

        let uniform = OrbitalLayout::from_preset(LayoutPreset::Uniform);
        let frame = Frame::build(&items, &uniform, &state(None, false), Point::default(), 0.0);
        assert_eq!(frame.guides.len(), 1);
        assert_eq!(frame.guides[0].radius, 100.0);
    }

    #[test]
    fn test_frame_serializes() {
        let frame = Frame::build(
            &NavItems::defaults(),
            &OrbitalLayout::default(),
            &state(None, true),
            Point::new(300.0, 400.0),
            0.0,
        );
        let json = serde_json::to_value(&frame).unwrap();

        assert_eq!(json["items"][2]["name"], "Skills");
        assert_eq!(json["items"][2]["href"], "#skills");
        assert_eq!(json["items"][2]["theme"], "rose");
        assert_eq!(json["items"][2]["label"]["visible"], true);
        assert_eq!(json["origin"]["x"], 300.0);
    }
}
