//! Content panel: the host's stand-in for each story's image.

use std::io::Write;

use anyhow::Result;

/// Background colors cycled per story (256-color palette).
const PALETTE: &[u8] = &[24, 29, 94, 54, 130, 23, 88, 60, 100, 31];

/// Background color for story `index`.
pub fn story_color(index: usize) -> u8 {
    PALETTE[index % PALETTE.len()]
}

/// The centered caption for the panel.
pub fn content_caption(shown: usize, count: usize, finished: bool) -> String {
    if finished {
        "All stories watched - r to restart, q to quit".to_string()
    } else {
        format!("Story {} of {}", shown + 1, count)
    }
}

/// Fill rows `top..top + rows` with the story's color and caption.
pub fn render_content<W: Write>(
    out: &mut W,
    width: u16,
    top: u16,
    rows: u16,
    shown: usize,
    count: usize,
    finished: bool,
) -> Result<()> {
    if rows == 0 {
        return Ok(());
    }
    let caption = content_caption(shown, count, finished);
    let caption_len = caption.chars().count();
    let caption_row = top + rows / 2;
    let blank = " ".repeat(width as usize);
    let background = if finished { 236 } else { story_color(shown) };

    let mut output = String::with_capacity(width as usize * rows as usize + 64);
    output.push_str(&format!("\x1b[48;5;{}m\x1b[97m", background));
    for row in top..top + rows {
        output.push_str(&format!("\x1b[{};1H", row + 1));
        if row == caption_row {
            let pad = (width as usize).saturating_sub(caption_len) / 2;
            let line: String = format!("{}{}", " ".repeat(pad), caption)
                .chars()
                .take(width as usize)
                .collect();
            output.push_str(&line);
            output.push_str(&" ".repeat((width as usize).saturating_sub(line.chars().count())));
        } else {
            output.push_str(&blank);
        }
    }
    output.push_str("\x1b[0m");
    write!(out, "{}", output)?;
    Ok(())
}
