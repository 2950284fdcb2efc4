use crate::menu::view::{GuideFrame, ItemFrame};
use crate::menu::Frame;
use crate::theme::OverlayColors;
use cairo::{Context, Format, ImageSurface, LinearGradient};
use orbital::{Point, Size};
use palette::Srgba;
use std::f64::consts::PI;
use std::path::Path;
use thiserror::Error;

const ITEM_RADIUS: f64 = 28.0;
const CENTER_RADIUS: f64 = 32.0;
const COMPASS_LENGTH: f64 = 18.0;
const LABEL_GAP: f64 = 42.0;
const LABEL_FONT_SIZE: f64 = 14.0;
const ICON_FONT_SIZE: f64 = 18.0;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Cairo(#[from] cairo::Error),
    #[error(transparent)]
    Png(#[from] cairo::IoError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn add_stops(gradient: &LinearGradient, start: Srgba<f64>, end: Srgba<f64>) {
    for (offset, stop) in [(0.0, start), (1.0, end)] {
        let (r, g, b, a) = stop.into_components();
        gradient.add_color_stop_rgba(offset, r, g, b, a);
    }
}

struct ItemRenderer<'a> {
    item: &'a ItemFrame,
    center: Point,
}

impl<'a> ItemRenderer<'a> {
    fn new(item: &'a ItemFrame, origin: Point) -> Self {
        Self {
            item,
            center: origin.offset_by(Point::new(item.style.x, item.style.y)),
        }
    }

    fn draw(&self, cr: &Context, colors: &OverlayColors) -> Result<(), cairo::Error> {
        self.draw_circle(cr)?;
        // icons are opaque handles, so the item's initial stands in for the glyph
        self.draw_glyph(cr)?;
        if self.item.label.visible {
            self.draw_label(cr, colors)?;
        }
        Ok(())
    }

    fn draw_circle(&self, cr: &Context) -> Result<(), cairo::Error> {
        set_color(cr, self.item.theme.background(self.item.hovered));
        cr.arc(self.center.x, self.center.y, ITEM_RADIUS, 0.0, 2.0 * PI);
        cr.fill()
    }

    fn draw_glyph(&self, cr: &Context) -> Result<(), cairo::Error> {
        let initial: String = self.item.name.chars().take(1).collect();
        cr.save()?;
        // ring turn and counter-turn cancel, so the glyph is drawn upright
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(ICON_FONT_SIZE);
        let ext = cr.text_extents(&initial)?;
        let left = self.center.x - ext.width() / 2.0;

        let [start, end] = self.item.theme.icon_fill(self.item.hovered);
        let fill = LinearGradient::new(left, self.center.y, left + ext.width(), self.center.y);
        add_stops(&fill, start, end);
        cr.set_source(&fill)?;
        cr.move_to(left - ext.x_bearing(), self.center.y + ext.height() / 2.0);
        cr.show_text(&initial)?;
        cr.restore()
    }

    fn draw_label(&self, cr: &Context, colors: &OverlayColors) -> Result<(), cairo::Error> {
        let text = self.item.name.as_str();
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        cr.set_font_size(LABEL_FONT_SIZE);
        let ext = cr.text_extents(text)?;

        let (w, h) = (ext.width() + 24.0, ext.height() + 12.0);
        let top = self.center.y + LABEL_GAP - h / 2.0 + self.item.label.offset_y;
        set_color(cr, colors.label_background);
        cr.rectangle(self.center.x - w / 2.0, top, w, h);
        cr.fill()?;

        set_color(cr, colors.label_text);
        cr.move_to(
            self.center.x - ext.width() / 2.0 - ext.x_bearing(),
            top + h / 2.0 + ext.height() / 2.0,
        );
        cr.show_text(text)
    }
}

fn draw_guide(cr: &Context, origin: Point, guide: &GuideFrame) -> Result<(), cairo::Error> {
    let [start, end] = guide.theme.guide_gradient();
    let gradient = LinearGradient::new(
        origin.x - guide.radius,
        origin.y,
        origin.x + guide.radius,
        origin.y,
    );
    add_stops(&gradient, start, end);
    cr.set_source(&gradient)?;
    cr.set_line_width(1.0);
    cr.arc(origin.x, origin.y, guide.radius, 0.0, 2.0 * PI);
    cr.stroke()
}

fn draw_center(cr: &Context, frame: &Frame, colors: &OverlayColors) -> Result<(), cairo::Error> {
    let origin = frame.origin;

    set_color(cr, colors.center_circle);
    cr.arc(origin.x, origin.y, CENTER_RADIUS, 0.0, 2.0 * PI);
    cr.fill_preserve()?;
    set_color(cr, colors.center_border);
    cr.set_line_width(1.0);
    cr.stroke()?;

    // compass needle, turned by the center's rotation and the glyph's own spin
    let angle = frame.center.rotation + frame.center.compass_rotation;
    let tip = Point::polar(COMPASS_LENGTH, angle - 90.0);
    set_color(cr, colors.compass);
    cr.set_line_width(2.0);
    cr.move_to(origin.x - tip.x, origin.y - tip.y);
    cr.line_to(origin.x + tip.x, origin.y + tip.y);
    cr.stroke()
}

/// Paints the overlay, guides, center control and items, back to front.
pub fn draw(cr: &Context, frame: &Frame, size: Size) -> Result<(), cairo::Error> {
    let colors = OverlayColors::default();

    set_color(cr, colors.backdrop);
    cr.rectangle(0.0, 0.0, size.width, size.height);
    cr.fill()?;

    for guide in &frame.guides {
        draw_guide(cr, frame.origin, guide)?;
    }
    draw_center(cr, frame, &colors)?;

    let mut layered: Vec<&ItemFrame> = frame.items.iter().collect();
    layered.sort_by_key(|item| item.z_index);
    for item in layered {
        ItemRenderer::new(item, frame.origin).draw(cr, &colors)?;
    }
    Ok(())
}

pub fn write_png(frame: &Frame, size: Size, path: &Path) -> Result<(), RenderError> {
    let surface = ImageSurface::create(
        Format::ARgb32,
        size.width.ceil() as i32,
        size.height.ceil() as i32,
    )?;
    {
        let cr = Context::new(&surface)?;
        draw(&cr, frame, size)?;
    }
    surface.flush();

    let mut file = fs_err::File::create(path)?;
    surface.write_to_png(&mut file)?;
    log::info!("Rendered frame to {}", path.display());
    Ok(())
}
