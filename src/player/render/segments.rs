//! Segmented progress bar rendering for the terminal player.
//!
//! One bar per story, separated by a one-column gap, each filled to the
//! fraction the controller last reported for it.

use std::io::Write;

use anyhow::Result;

/// One column of the segmented bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarCell {
    Filled,
    Empty,
    Gap,
}

/// Width of each segment given the total bar width.
///
/// Gaps take one column each; every segment gets at least one column.
pub fn segment_width(bar_width: usize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let gaps = count - 1;
    (bar_width.saturating_sub(gaps) / count).max(1)
}

/// Build the cells of the segmented bar.
///
/// # Arguments
/// * `bar_width` - Width available for the bar in columns
/// * `fractions` - Fill level of every segment, in order
pub fn build_segment_cells(bar_width: usize, fractions: &[f64]) -> Vec<BarCell> {
    let seg_width = segment_width(bar_width, fractions.len());
    let mut cells = Vec::with_capacity(bar_width);
    for (i, &fraction) in fractions.iter().enumerate() {
        if i > 0 {
            cells.push(BarCell::Gap);
        }
        let filled = (seg_width as f64 * fraction.clamp(0.0, 1.0)).floor() as usize;
        cells.extend(std::iter::repeat(BarCell::Filled).take(filled));
        cells.extend(std::iter::repeat(BarCell::Empty).take(seg_width - filled));
    }
    cells
}

/// Render the segmented bar at `row`.
pub fn render_segments<W: Write>(out: &mut W, width: u16, row: u16, fractions: &[f64]) -> Result<()> {
    const WHITE: &str = "\x1b[97m";
    const DARK_GREY: &str = "\x1b[90m";
    const RESET: &str = "\x1b[0m";

    let bar_width = (width as usize).saturating_sub(2); // one column of padding each side
    let cells = build_segment_cells(bar_width, fractions);

    let mut output = String::with_capacity(width as usize * 4);
    output.push_str(&format!("\x1b[{};1H\x1b[2K ", row + 1));
    let mut current: Option<BarCell> = None;
    for cell in cells {
        if current != Some(cell) {
            output.push_str(match cell {
                BarCell::Filled => WHITE,
                BarCell::Empty | BarCell::Gap => DARK_GREY,
            });
            current = Some(cell);
        }
        output.push(match cell {
            BarCell::Filled => '━',
            BarCell::Empty => '─',
            BarCell::Gap => ' ',
        });
    }
    output.push_str(RESET);
    write!(out, "{}", output)?;
    Ok(())
}
