//! Terminal presentation of a [`PixelCanvas`].
//!
//! Each terminal cell shows two vertically stacked pixels using an upper
//! half block: the foreground is the top pixel, the background the bottom.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::canvas::PixelCanvas;
use crate::color::to_color;

/// Vertical pixels per terminal cell.
pub const PIXELS_PER_CELL: u16 = 2;

/// Canvas size in pixels for a terminal area.
pub fn pixel_size(area: Rect) -> (u32, u32) {
    (
        area.width as u32,
        area.height as u32 * PIXELS_PER_CELL as u32,
    )
}

impl Widget for &PixelCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                let px = col as u32;
                let py = row as u32 * PIXELS_PER_CELL as u32;
                let (Some(top), Some(bottom)) = (self.raw_pixel(px, py), self.raw_pixel(px, py + 1))
                else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_char('▀')
                        .set_fg(to_color(top))
                        .set_bg(to_color(bottom));
                }
            }
        }
    }
}
