//! Glyph bitmaps from the Spleen 12×24 bitmap font.

use std::collections::HashMap;

use spleen_font::{FONT_12X24, PSF2Font};

pub const GLYPH_WIDTH: usize = 12;
pub const GLYPH_HEIGHT: usize = 24;

/// Row of the baseline inside a 12×24 cell.
pub const BASELINE_ROW: usize = 19;

/// Glyph pixels, row-major, 1 = black.
pub type Glyph = Vec<u8>;

/// Decodes glyphs once per character.
#[derive(Debug, Default)]
pub struct GlyphCache {
    glyphs: HashMap<char, Glyph>,
}

impl GlyphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The 12×24 glyph for `ch`. Characters missing from the font are drawn
    /// as a box; whitespace is blank.
    pub fn get(&mut self, ch: char) -> &Glyph {
        self.glyphs.entry(ch).or_insert_with(|| generate_glyph(ch))
    }
}

fn generate_glyph(ch: char) -> Glyph {
    let mut glyph = vec![0u8; GLYPH_WIDTH * GLYPH_HEIGHT];
    if ch.is_whitespace() {
        return glyph;
    }

    let Ok(mut spleen) = PSF2Font::new(FONT_12X24) else {
        draw_box(&mut glyph, GLYPH_WIDTH, GLYPH_HEIGHT);
        return glyph;
    };
    let utf8 = ch.to_string();
    match spleen.glyph_for_utf8(utf8.as_bytes()) {
        Some(rows) => {
            for (row_y, row) in rows.enumerate() {
                for (col_x, on) in row.enumerate() {
                    let idx = row_y * GLYPH_WIDTH + col_x;
                    if idx < glyph.len() {
                        glyph[idx] = u8::from(on);
                    }
                }
            }
        }
        None => {
            tracing::trace!(?ch, "no glyph, drawing box");
            draw_box(&mut glyph, GLYPH_WIDTH, GLYPH_HEIGHT);
        }
    }
    glyph
}

/// Nearest-neighbour resize of a glyph bitmap.
pub fn scale_bitmap(src: &[u8], src_w: usize, src_h: usize, dst_w: usize, dst_h: usize) -> Vec<u8> {
    let mut dst = vec![0u8; dst_w * dst_h];
    for dy in 0..dst_h {
        for dx in 0..dst_w {
            let sx = dx * src_w / dst_w;
            let sy = dy * src_h / dst_h;
            if let Some(&pixel) = src.get(sy * src_w + sx) {
                dst[dy * dst_w + dx] = pixel;
            }
        }
    }
    dst
}

/// Draw a box outline in the glyph buffer.
fn draw_box(glyph: &mut [u8], width: usize, height: usize) {
    for x in 0..width {
        glyph[x] = 1;
        glyph[(height - 1) * width + x] = 1;
    }
    for y in 0..height {
        glyph[y * width] = 1;
        glyph[y * width + width - 1] = 1;
    }
}
