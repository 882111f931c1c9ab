//! Windowed cyclic layout.
//!
//! A band is a cylinder with its items written around the circumference,
//! `spacing` item slots per half revolution. Only the slots facing the viewer
//! (roughly half the cylinder) can be seen, so the layout picks that window
//! out of the cyclic item list and gives each entry its rotation angle.
//!
//! The window is computed from scratch for every offset: there is no state to
//! keep in sync between ticks.

use std::f64::consts::PI;

use smallvec::SmallVec;

/// Empirical phase scale for the sub-item remainder, divided by `spacing`.
///
/// Using the bare remainder makes one position repeat as the offset crosses
/// an integer and the window shifts by one item. Scaling by `6.3 / spacing`
/// (just over `2π / spacing`) removes the visible stutter.
pub const SMOOTHING: f64 = 6.3;

/// Smallest spacing that still shows a front and a back.
pub const MIN_SPACING: f64 = 2.0;

/// Items shown when a band is created without any.
pub const PLACEHOLDER_ITEMS: [&str; 5] = ["items", "array", "of", "strings", "- missing -"];

/// Spacing used with [`PLACEHOLDER_ITEMS`].
pub const PLACEHOLDER_SPACING: f64 = 6.0;

/// One item of the visible window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliceEntry<'a> {
    /// Index of the item in the full list.
    pub index: usize,
    pub item: &'a str,
    /// Rotation about the cylinder axis, in radians.
    pub angle: f64,
    /// True when the entry has rotated onto the back half of the cylinder.
    ///
    /// Renderers without reliable back-face culling should not draw it.
    pub hidden: bool,
}

/// The potentially visible arc of a band, topmost entry first.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibleSlice<'a> {
    entries: SmallVec<[SliceEntry<'a>; 8]>,
    before: usize,
}

impl<'a> VisibleSlice<'a> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SliceEntry<'a>] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SliceEntry<'a>> {
        self.entries.iter()
    }

    /// Number of entries placed before the anchor.
    pub fn before(&self) -> usize {
        self.before
    }

    /// The entry the window is built around (position [`before`](Self::before)).
    pub fn anchor(&self) -> Option<&SliceEntry<'a>> {
        self.entries.get(self.before)
    }

    pub fn hidden_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.hidden).count()
    }
}

impl<'s, 'a> IntoIterator for &'s VisibleSlice<'a> {
    type Item = &'s SliceEntry<'a>;
    type IntoIter = std::slice::Iter<'s, SliceEntry<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Number of entries in the window for a given spacing: `ceil(spacing / 2) + 1`.
///
/// A non-finite spacing gets the window of [`MIN_SPACING`].
pub fn window_size(spacing: f64) -> usize {
    if !spacing.is_finite() {
        return window_size(MIN_SPACING);
    }
    (spacing / 2.0).ceil() as usize + 1
}

/// Brings an offset into the range the layout works with.
///
/// Single-item lists do not rotate, so their offset is always 0, as is any
/// non-finite offset. Negative offsets are wrapped upward by whole
/// revolutions; positive offsets are left alone so forward scrolling stays
/// continuous.
pub fn normalize_offset(offset: f64, len: usize) -> f64 {
    if len <= 1 || !offset.is_finite() {
        return 0.0;
    }
    if offset >= 0.0 {
        return offset;
    }
    let len = len as f64;
    (offset + len * (-offset / len).ceil()).max(0.0)
}

/// Lays out the visible window of `items` at `offset`.
///
/// `spacing` is used as given; callers clamp it to [`MIN_SPACING`] first
/// (see [`CarouselState::new`]). An empty list gives an empty slice.
pub fn layout<S: AsRef<str>>(items: &[S], offset: f64, spacing: f64) -> VisibleSlice<'_> {
    let total = window_size(spacing);
    let before = total / 2;
    let len = items.len();

    if len == 0 {
        log::debug!("layout called without items");
        return VisibleSlice {
            entries: SmallVec::new(),
            before,
        };
    }

    let offset = normalize_offset(offset, len);
    let angle = 2.0 * PI / spacing;

    let fraction = ((offset + 0.5) % len as f64) - 0.5;
    let counter = fraction.floor();
    let phase = (fraction - counter) * SMOOTHING / spacing;

    // Centers the window on the forward-facing position.
    let slice_of_pi = 2.0 * PI - before as f64 * angle;
    let start = counter as i64 - before as i64;

    let entries = (0..total)
        .map(|position| {
            let index = (start + position as i64).rem_euclid(len as i64) as usize;
            let radians = angle * position as f64 - phase + slice_of_pi;
            SliceEntry {
                index,
                item: items[index].as_ref(),
                angle: radians,
                hidden: ((radians / PI + 0.5) % 2.0) > 1.0,
            }
        })
        .collect();

    VisibleSlice { entries, before }
}

/// Items, offset and spacing of one band.
///
/// The offset is kept normalized (see [`normalize_offset`]); the item list
/// is never empty and the spacing stays within [`MIN_SPACING`] and two slots
/// per item.
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselState {
    items: Vec<String>,
    offset: f64,
    spacing: f64,
}

impl CarouselState {
    /// Creates a state at offset 0.
    ///
    /// An empty item list is replaced by [`PLACEHOLDER_ITEMS`] with
    /// [`PLACEHOLDER_SPACING`]. A spacing below [`MIN_SPACING`] (or NaN) is
    /// raised to it, and one above two slots per item is lowered to that, so
    /// the window never holds more than a full lap.
    pub fn new<I, S>(items: I, spacing: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut items: Vec<String> = items.into_iter().map(Into::into).collect();
        let mut spacing = spacing;

        if items.is_empty() {
            log::info!("carousel items missing, using placeholder");
            items = PLACEHOLDER_ITEMS.iter().map(|item| item.to_string()).collect();
            spacing = PLACEHOLDER_SPACING;
        }

        let cap = (2.0 * items.len() as f64).max(MIN_SPACING);
        if spacing.is_nan() || spacing < MIN_SPACING {
            log::info!("carousel spacing {spacing} raised to {MIN_SPACING}");
            spacing = MIN_SPACING;
        } else if spacing > cap {
            log::info!("carousel spacing {spacing} lowered to {cap}");
            spacing = cap;
        }

        Self {
            items,
            offset: 0.0,
            spacing,
        }
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.set_offset(offset);
        self
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn set_offset(&mut self, offset: f64) {
        self.offset = normalize_offset(offset, self.items.len());
    }

    /// Index of the item nearest the front.
    pub fn selected_index(&self) -> usize {
        (self.offset.round() as usize) % self.items.len()
    }

    pub fn selected(&self) -> &str {
        &self.items[self.selected_index()]
    }

    pub fn layout(&self) -> VisibleSlice<'_> {
        layout(&self.items, self.offset, self.spacing)
    }
}
