//! Bar graph rendering onto a terminal surface.

use std::io;

use super::surface::TerminalSurface;

/// Draw one frame of vertical bars growing up from the bottom row
///
/// Bar `i` occupies column `i`; row `j` (counted from the bottom) is
/// highlighted when `j <= bins[i]`. Bars taller than the screen are
/// clipped, bars past the right edge are not drawn, and columns to the
/// right of the last bar are blanked.
pub fn render<S: TerminalSurface + ?Sized>(surface: &mut S, bins: &[u32]) -> io::Result<()> {
    let (columns, rows) = surface.size()?;

    for column in 0..columns {
        let height = bins.get(usize::from(column)).copied();
        for j in 0..rows {
            let lit = height.is_some_and(|h| u32::from(j) <= h);
            surface.move_to(column, rows - 1 - j)?;
            surface.set_highlight(lit)?;
            surface.put_blank()?;
        }
    }

    surface.set_highlight(false)?;
    surface.present()
}
