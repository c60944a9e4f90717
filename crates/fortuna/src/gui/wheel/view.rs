use super::model::WheelState;
use super::{
    HUB_FONT_SIZE, HUB_RADIUS, POINTER_HALF_WIDTH, POINTER_HEIGHT, REFERENCE_SIZE,
    RESULT_FONT_SIZE, RESULT_LINE_SPACING, RIM_WIDTH, SEGMENT_COUNT,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use std::f64::consts::PI;

struct WheelRenderer<'a> {
    state: &'a WheelState,
    center_x: f64,
    center_y: f64,
    radius: f64,
    scale: f64,
}

impl<'a> WheelRenderer<'a> {
    fn new(state: &'a WheelState, width: f64, height: f64) -> Self {
        // the wheel fills the upper square of the allocation, result text
        // goes underneath
        let text_band = 3.0 * (RESULT_FONT_SIZE + RESULT_LINE_SPACING);
        let size = width.min(height - text_band).max(1.0);
        let scale = size / REFERENCE_SIZE;

        Self {
            state,
            center_x: width / 2.0,
            center_y: size / 2.0,
            radius: (size / 2.0) - RIM_WIDTH * scale,
            scale,
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_face(cr, colors)?;
        self.draw_rim(cr, colors)?;
        self.draw_hub(cr, colors)?;
        self.draw_pointer(cr, colors)?;
        self.draw_result(cr, colors)?;
        Ok(())
    }

    /// Colored segments, rotated to the wheel's current angle.
    fn draw_face(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let step = 2.0 * PI / SEGMENT_COUNT as f64;
        let angle = self.state.wheel_angle_deg().to_radians();

        for i in 0..SEGMENT_COUNT {
            let from = angle + i as f64 * step;
            set_source(cr, colors.segments[i % colors.segments.len()]);
            cr.move_to(self.center_x, self.center_y);
            cr.arc(self.center_x, self.center_y, self.radius, from, from + step);
            cr.close_path();
            cr.fill()?;
        }
        Ok(())
    }

    fn draw_rim(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        set_source(cr, colors.rim);
        cr.set_line_width(RIM_WIDTH * self.scale);
        cr.arc(self.center_x, self.center_y, self.radius, 0.0, 2.0 * PI);
        cr.stroke()
    }

    /// Center circle showing "?", the spin indicator or the drawn number.
    fn draw_hub(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        set_source(cr, colors.hub);
        cr.arc(
            self.center_x,
            self.center_y,
            HUB_RADIUS * self.scale,
            0.0,
            2.0 * PI,
        );
        cr.fill()?;

        set_source(cr, colors.hub_text);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(HUB_FONT_SIZE * self.scale);
        let label = self.state.hub_label();
        if let Ok(ext) = cr.text_extents(&label) {
            cr.move_to(
                self.center_x - ext.width() / 2.0,
                self.center_y + ext.height() / 2.0,
            );
            cr.show_text(&label)?;
        }
        Ok(())
    }

    /// Fixed marker at the top of the wheel; the face spins under it.
    fn draw_pointer(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let tip_y = self.center_y - self.radius + POINTER_HEIGHT * self.scale;
        let base_y = self.center_y - self.radius - POINTER_HEIGHT * self.scale / 2.0;

        set_source(cr, colors.pointer);
        cr.move_to(self.center_x, tip_y);
        cr.line_to(self.center_x - POINTER_HALF_WIDTH * self.scale, base_y);
        cr.line_to(self.center_x + POINTER_HALF_WIDTH * self.scale, base_y);
        cr.close_path();
        cr.fill()
    }

    fn draw_result(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let lines = self.state.result_lines();
        if lines.is_empty() {
            return Ok(());
        }

        set_source(cr, colors.result_text);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(RESULT_FONT_SIZE);

        let mut y = self.center_y + self.radius + RIM_WIDTH * self.scale;
        for line in lines {
            y += RESULT_FONT_SIZE + RESULT_LINE_SPACING;
            if let Ok(ext) = cr.text_extents(&line) {
                cr.move_to(self.center_x - ext.width() / 2.0, y);
                cr.show_text(&line)?;
            }
        }
        Ok(())
    }
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

pub fn draw(
    cr: &Context,
    state: &WheelState,
    width: f64,
    height: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    WheelRenderer::new(state, width, height).draw(cr, colors)
}
