//! Half-block image rendering
//!
//! Each terminal cell shows two vertical pixels with `▀`: the foreground
//! is the upper pixel, the background the lower one. Images are scaled to
//! fit the area (twice its height in pixels) keeping their aspect ratio.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

const UPPER_HALF_BLOCK: &str = "\u{2580}";

/// Largest `(w, h)` with the source aspect ratio fitting in `max_w x max_h`.
pub fn fit_dimensions(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 || max_w == 0 || max_h == 0 {
        return (0, 0);
    }
    let by_width = (max_w, (u64::from(src_h) * u64::from(max_w) / u64::from(src_w)) as u32);
    if by_width.1 <= max_h {
        (by_width.0, by_width.1.max(1))
    } else {
        let w = (u64::from(src_w) * u64::from(max_h) / u64::from(src_h)) as u32;
        (w.max(1), max_h)
    }
}

/// Scale `image` to fit a cell area of `cols x rows`.
pub fn scale_to_cells(image: &RgbaImage, cols: u16, rows: u16) -> RgbaImage {
    let (w, h) = fit_dimensions(
        image.width(),
        image.height(),
        u32::from(cols),
        u32::from(rows) * 2,
    );
    if w == 0 || h == 0 {
        return RgbaImage::new(0, 0);
    }
    if w <= image.width() && h <= image.height() {
        imageops::thumbnail(image, w, h)
    } else {
        imageops::resize(image, w, h, FilterType::Nearest)
    }
}

/// Memo of the last scaled frame, keyed by path, frame and cell size.
#[derive(Debug, Default)]
pub struct ScaledFrameCache {
    key: Option<(PathBuf, usize, u16, u16)>,
    scaled: Option<RgbaImage>,
}

impl ScaledFrameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The scaled frame, rescaling only when the key changed.
    pub fn get_or_scale(
        &mut self,
        path: &Path,
        frame: usize,
        image: &RgbaImage,
        cols: u16,
        rows: u16,
    ) -> &RgbaImage {
        let hit = matches!(
            &self.key,
            Some((p, f, c, r)) if p == path && *f == frame && *c == cols && *r == rows
        );
        if !hit || self.scaled.is_none() {
            self.key = Some((path.to_path_buf(), frame, cols, rows));
            self.scaled = None;
        }
        self.scaled
            .get_or_insert_with(|| scale_to_cells(image, cols, rows))
    }

    pub fn clear(&mut self) {
        self.key = None;
        self.scaled = None;
    }
}

/// Renders an already scaled image centered in its area.
pub struct HalfBlockImage<'a> {
    image: &'a RgbaImage,
}

impl<'a> HalfBlockImage<'a> {
    pub fn new(image: &'a RgbaImage) -> Self {
        Self { image }
    }
}

/// Composite a pixel over black.
fn to_color(pixel: &Rgba<u8>) -> Color {
    let [r, g, b, a] = pixel.0;
    let blend = |c: u8| ((u16::from(c) * u16::from(a)) / 255) as u8;
    Color::Rgb(blend(r), blend(g), blend(b))
}

impl Widget for HalfBlockImage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (w, h) = self.image.dimensions();
        let cols = w.min(u32::from(area.width)) as u16;
        let rows = h.div_ceil(2).min(u32::from(area.height)) as u16;
        let x0 = area.x + (area.width - cols) / 2;
        let y0 = area.y + (area.height - rows) / 2;

        for row in 0..rows {
            for col in 0..cols {
                let px = u32::from(col);
                let upper = self.image.get_pixel(px, u32::from(row) * 2);
                let lower_y = u32::from(row) * 2 + 1;
                let lower = if lower_y < h {
                    to_color(self.image.get_pixel(px, lower_y))
                } else {
                    Color::Reset
                };
                if let Some(cell) = buf.cell_mut((x0 + col, y0 + row)) {
                    cell.set_symbol(UPPER_HALF_BLOCK)
                        .set_fg(to_color(upper))
                        .set_bg(lower);
                }
            }
        }
    }
}
