//! Band widths in terminal cells.
//!
//! A band is as wide as its widest item plus a little breathing room. Widths
//! only change when the items do, so they are cached per band.

use unicode_display_width::width as display_width_impl;

/// Extra room around the widest item, in percent.
pub const WIDTH_PADDING_PERCENT: usize = 10;

pub fn display_width(text: &str) -> usize {
    display_width_impl(text) as usize
}

/// Widest item plus [`WIDTH_PADDING_PERCENT`], rounded up.
pub fn band_width<S: AsRef<str>>(items: &[S]) -> usize {
    let widest = items
        .iter()
        .map(|item| display_width(item.as_ref()))
        .max()
        .unwrap_or(0);
    (widest * (100 + WIDTH_PADDING_PERCENT)).div_ceil(100)
}

/// Remembers the width of the last item list it measured.
#[derive(Debug, Default)]
pub struct WidthCache {
    measured: Option<(Vec<String>, usize)>,
}

impl WidthCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Width of `items`, measured only if they differ from last time.
    pub fn width(&mut self, items: &[String]) -> usize {
        match &self.measured {
            Some((cached, width)) if cached.as_slice() == items => *width,
            _ => {
                let width = band_width(items);
                self.measured = Some((items.to_vec(), width));
                width
            }
        }
    }

    pub fn cached(&self) -> Option<usize> {
        self.measured.as_ref().map(|(_, width)| *width)
    }

    pub fn invalidate(&mut self) {
        self.measured = None;
    }
}
