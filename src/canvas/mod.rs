//! # Canvas
//!
//! Rasterizes a [`PrintJob`] into a 1-bit image the width of the printer,
//! using the Spleen bitmap font for every family.
//!
//! ## Scaling
//!
//! ```text
//! page units = columns × base advance      (42 × 12pt × 0.6 = 302.4)
//! scale      = width_dots / page units     (576 / 302.4 ≈ 1.9)
//! ```
//!
//! Each character cell is the command's per-character advance, scaled, and
//! twice as tall as it is wide (the Spleen 12×24 aspect). Bold text is
//! overstruck one dot to the right.

mod glyph;

pub use glyph::{GLYPH_HEIGHT, GLYPH_WIDTH, GlyphCache};

use image::{GrayImage, Luma};

use crate::error::SlipmarkError;
use crate::printer::PrinterConfig;
use crate::render::{DrawCommand, MonospaceMetrics, PrintJob, TextMetrics};
use crate::styled::CharStyle;
use glyph::{BASELINE_ROW, scale_bitmap};

/// A growable 1-bit drawing surface.
#[derive(Debug)]
pub struct Canvas {
    width: usize,
    height: usize,
    buffer: Vec<u8>,
    glyphs: GlyphCache,
}

impl Canvas {
    pub fn new(width: usize) -> Self {
        let initial_height = 100;
        Self {
            width,
            height: initial_height,
            buffer: vec![0u8; width * initial_height],
            glyphs: GlyphCache::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Ensure buffer has room for the given y position.
    fn ensure_height(&mut self, y: usize) {
        let needed_height = y + 1;
        if needed_height > self.height {
            let new_height = needed_height.max(self.height + 100);
            self.buffer.resize(self.width * new_height, 0);
            self.height = new_height;
        }
    }

    /// Set a pixel (1 = black). Pixels right of the print width are dropped.
    fn set_pixel(&mut self, x: usize, y: usize) {
        if x >= self.width {
            return;
        }
        self.ensure_height(y);
        self.buffer[y * self.width + x] = 1;
    }

    pub fn is_black(&self, x: usize, y: usize) -> bool {
        x < self.width && self.buffer.get(y * self.width + x).is_some_and(|&p| p != 0)
    }

    /// Count of black pixels.
    pub fn ink(&self) -> usize {
        self.buffer.iter().filter(|&&p| p != 0).count()
    }

    /// Draw one character into a cell whose top-left corner is `(x, y)`.
    fn draw_char(&mut self, ch: char, x: usize, y: usize, cell_w: usize, cell_h: usize, bold: bool) {
        if cell_w == 0 || cell_h == 0 {
            return;
        }
        let glyph = scale_bitmap(self.glyphs.get(ch), GLYPH_WIDTH, GLYPH_HEIGHT, cell_w, cell_h);
        for gy in 0..cell_h {
            for gx in 0..cell_w {
                if glyph[gy * cell_w + gx] != 0 {
                    self.set_pixel(x + gx, y + gy);
                    if bold {
                        self.set_pixel(x + gx + 1, y + gy);
                    }
                }
            }
        }
    }

    fn draw_command(&mut self, cmd: &DrawCommand, scale: f32) {
        let count = cmd.text.chars().count();
        if count == 0 {
            return;
        }
        let advance = cmd.width as f32 / count as f32 * scale;
        // A cell never needs to be wider than the paper.
        let cell_w = (advance.round() as usize).min(self.width);
        let cell_h = cell_w * 2;
        let baseline = cmd.y as f32 * scale;
        let top = (baseline - (cell_h * BASELINE_ROW / GLYPH_HEIGHT) as f32).max(0.0) as usize;
        let left = cmd.x as f32 * scale;

        for (i, ch) in cmd.text.chars().enumerate() {
            let x = (left + i as f32 * advance).round() as usize;
            if x >= self.width {
                break;
            }
            self.draw_char(ch, x, top, cell_w, cell_h, cmd.bold);
        }
    }

    /// Height after trimming trailing empty rows.
    fn trimmed_height(&self, min: usize) -> usize {
        let mut h = self.height;
        while h > 0 {
            let row_start = (h - 1) * self.width;
            if self.buffer[row_start..row_start + self.width].iter().all(|&p| p == 0) {
                h -= 1;
            } else {
                break;
            }
        }
        h.max(min)
    }

    /// The drawing as a grayscale image, white background.
    pub fn to_image(&self, min_height: usize) -> GrayImage {
        let height = self.trimmed_height(min_height.max(1));
        let mut img = GrayImage::new(self.width as u32, height as u32);
        for y in 0..height {
            for x in 0..self.width {
                let color = if self.is_black(x, y) { 0u8 } else { 255u8 };
                img.put_pixel(x as u32, y as u32, Luma([color]));
            }
        }
        img
    }
}

/// Scale from job units to printer dots.
pub fn job_scale(job: &PrintJob, printer: &PrinterConfig) -> f32 {
    let base = CharStyle {
        size: job.font_size,
        ..CharStyle::default()
    };
    let page_units = MonospaceMetrics.advance(&"0".repeat(printer.columns), &base);
    if page_units == 0 {
        return 1.0;
    }
    printer.width_dots as f32 / page_units as f32
}

/// Draw every command of a job.
pub fn rasterize(job: &PrintJob, printer: &PrinterConfig) -> Canvas {
    let scale = job_scale(job, printer);
    let mut canvas = Canvas::new(printer.width_dots as usize);
    for cmd in &job.commands {
        canvas.draw_command(cmd, scale);
    }
    tracing::debug!(commands = job.commands.len(), scale, "rasterized print job");
    canvas
}

/// Rasterize a job and encode it as PNG.
pub fn render_png(job: &PrintJob, printer: &PrinterConfig) -> Result<Vec<u8>, SlipmarkError> {
    use image::ImageEncoder;

    let min_height = (job.height as f32 * job_scale(job, printer)).ceil() as usize;
    let img = rasterize(job, printer).to_image(min_height);

    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::L8,
        )
        .map_err(|e: image::ImageError| SlipmarkError::Image(e.to_string()))?;

    Ok(png_bytes)
}
