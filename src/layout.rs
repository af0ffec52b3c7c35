//! Horizontal strip layout for sprite sheets.
//!
//! Computes effective tile dimensions, per-tile horizontal offsets, and the
//! final canvas size from an ordered list of source dimensions. Pure
//! geometry — no pixel operations, `no_std` compatible (needs `alloc`).
//!
//! # Example
//!
//! ```
//! use zensprite::{Size, Strip};
//!
//! let layout = Strip::fixed_height(100)
//!     .compute(&[Size::new(300, 200), Size::new(600, 399)])
//!     .unwrap();
//!
//! assert_eq!(layout.canvas, Size::new(300, 100));
//! assert_eq!(layout.placements[1].x, 150);
//! ```

use alloc::vec::Vec;
use core::fmt;

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either axis is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Whether the two rects share at least one pixel.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Where a single tile lands on the sheet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Dimensions of the source as decoded.
    pub natural: Size,
    /// Dimensions the tile is laid out (and resampled) at.
    pub size: Size,
    /// Horizontal offset of the tile's left edge. Tiles are always top-aligned.
    pub x: u32,
}

impl Placement {
    /// Whether the tile must be resampled before pasting.
    pub fn needs_resize(&self) -> bool {
        self.natural != self.size
    }

    /// Region of the canvas covered by this tile.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, 0, self.size.width, self.size.height)
    }
}

/// Computed placement plan for a whole sheet.
///
/// Placements are in input order; `placements[i].x` is the running sum of
/// the effective widths before `i`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SheetLayout {
    /// Final canvas dimensions.
    pub canvas: Size,
    /// One entry per input, in input order.
    pub placements: Vec<Placement>,
}

impl SheetLayout {
    /// Number of tiles on the sheet.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether the sheet has no tiles.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Horizontal offsets in input order.
    pub fn offsets(&self) -> impl Iterator<Item = u32> + '_ {
        self.placements.iter().map(|p| p.x)
    }

    /// Whether any tile needs resampling.
    pub fn needs_resize(&self) -> bool {
        self.placements.iter().any(Placement::needs_resize)
    }
}

/// Strip layout parameters.
///
/// Packs tiles left to right in input order, optionally normalising every
/// tile to a common height first.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Strip {
    pub fixed_height: Option<u32>,
}

impl Strip {
    /// Keep every tile at its natural size.
    pub const fn natural() -> Self {
        Self { fixed_height: None }
    }

    /// Rescale every tile to `height`, preserving aspect ratio.
    pub const fn fixed_height(height: u32) -> Self {
        Self {
            fixed_height: Some(height),
        }
    }

    /// Effective dimensions for one source under this strip.
    pub fn effective_size(&self, natural: Size) -> Size {
        match self.fixed_height {
            Some(h) if h != natural.height => scale_to_height(natural.width, natural.height, h),
            _ => natural,
        }
    }

    /// Compute the layout for the given source dimensions.
    pub fn compute(&self, sources: &[Size]) -> Result<SheetLayout, LayoutError> {
        if sources.is_empty() {
            return Err(LayoutError::EmptyInput);
        }
        if self.fixed_height == Some(0) {
            return Err(LayoutError::ZeroFixedHeight);
        }

        let mut placements = Vec::with_capacity(sources.len());
        let mut x: u32 = 0;
        let mut max_height: u32 = 0;
        for (index, &natural) in sources.iter().enumerate() {
            if natural.is_empty() {
                return Err(LayoutError::ZeroSourceDimension { index });
            }
            let size = self.effective_size(natural);
            placements.push(Placement { natural, size, x });
            x = x
                .checked_add(size.width)
                .ok_or(LayoutError::CanvasTooWide { index })?;
            max_height = max_height.max(size.height);
        }

        Ok(SheetLayout {
            canvas: Size::new(x, max_height),
            placements,
        })
    }
}

/// Compute a strip layout. Shorthand for [`Strip::compute`].
pub fn compute_layout(
    sources: &[Size],
    fixed_height: Option<u32>,
) -> Result<SheetLayout, LayoutError> {
    Strip { fixed_height }.compute(sources)
}

/// Proportionally rescale `width × height` to `new_height`.
///
/// Width is truncated: `floor(width * new_height / height)`, computed in
/// integer arithmetic. A result that truncates to zero is clamped to 1 so the
/// tile stays addressable. `height` must be non-zero.
pub fn scale_to_height(width: u32, height: u32, new_height: u32) -> Size {
    debug_assert!(height != 0);
    let w = (width as u64 * new_height as u64) / height as u64;
    let w = u32::try_from(w).unwrap_or(u32::MAX).max(1);
    Size::new(w, new_height)
}

/// Layout computation error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// No source images were given.
    EmptyInput,
    /// The requested fixed height is zero.
    ZeroFixedHeight,
    /// Source at `index` has zero width or height.
    ZeroSourceDimension { index: usize },
    /// Summed width overflows `u32` when adding source `index`.
    CanvasTooWide { index: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => f.write_str("no input images"),
            Self::ZeroFixedHeight => f.write_str("fixed height must be a positive integer"),
            Self::ZeroSourceDimension { index } => {
                write!(f, "input #{index} has a zero width or height")
            }
            Self::CanvasTooWide { index } => {
                write!(f, "canvas width overflows at input #{index}")
            }
        }
    }
}

impl core::error::Error for LayoutError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const PORTRAIT: Size = Size::new(192, 256);

    // ── scale_to_height ─────────────────────────────────────────────────

    #[test]
    fn scale_300x200_to_100() {
        assert_eq!(scale_to_height(300, 200, 100), Size::new(150, 100));
    }

    #[test]
    fn scale_600x399_to_100() {
        // 600 * 100 / 399 = 150.37 → 150
        assert_eq!(scale_to_height(600, 399, 100), Size::new(150, 100));
    }

    #[test]
    fn scale_truncates_not_rounds() {
        // 299 * 100 / 200 = 149.5 → 149
        assert_eq!(scale_to_height(299, 200, 100), Size::new(149, 100));
    }

    #[test]
    fn scale_exact_integer_stays_exact() {
        // 49 * 100 / 7 = 700 exactly; float math would risk 699.
        assert_eq!(scale_to_height(49, 7, 100), Size::new(700, 100));
    }

    #[test]
    fn scale_upscales() {
        assert_eq!(scale_to_height(10, 20, 100), Size::new(50, 100));
    }

    #[test]
    fn scale_clamps_zero_width() {
        assert_eq!(scale_to_height(1, 1000, 10), Size::new(1, 10));
    }

    #[test]
    fn scale_large_values_do_not_overflow() {
        assert_eq!(
            scale_to_height(u32::MAX, u32::MAX, u32::MAX),
            Size::new(u32::MAX, u32::MAX)
        );
    }

    // ── Strip::compute, natural sizes ──────────────────────────────────

    #[test]
    fn two_portraits_side_by_side() {
        let l = Strip::natural().compute(&[PORTRAIT, PORTRAIT]).unwrap();
        assert_eq!(l.canvas, Size::new(384, 256));
        assert_eq!(l.offsets().collect::<Vec<_>>(), vec![0, 192]);
        assert!(!l.needs_resize());
    }

    #[test]
    fn three_tiles_448_wide() {
        let l = Strip::natural()
            .compute(&[PORTRAIT, PORTRAIT, Size::new(64, 64)])
            .unwrap();
        assert_eq!(l.canvas, Size::new(448, 256));
        assert_eq!(l.offsets().collect::<Vec<_>>(), vec![0, 192, 384]);
        assert_eq!(l.len(), 3);
        assert!(!l.is_empty());
    }

    #[test]
    fn canvas_height_is_tallest_tile() {
        let l = Strip::natural()
            .compute(&[Size::new(10, 5), Size::new(3, 40), Size::new(7, 12)])
            .unwrap();
        assert_eq!(l.canvas, Size::new(20, 40));
    }

    #[test]
    fn order_changes_offsets_not_canvas() {
        let a = Size::new(10, 5);
        let b = Size::new(30, 8);
        let ab = Strip::natural().compute(&[a, b]).unwrap();
        let ba = Strip::natural().compute(&[b, a]).unwrap();
        assert_eq!(ab.canvas, ba.canvas);
        assert_eq!(ab.placements[1].x, 10);
        assert_eq!(ba.placements[1].x, 30);
    }

    // ── Strip::compute, fixed height ───────────────────────────────────

    #[test]
    fn fixed_height_two_portraits() {
        let l = Strip::fixed_height(100)
            .compute(&[PORTRAIT, PORTRAIT])
            .unwrap();
        // 192 * 100 / 256 = 75
        assert_eq!(l.canvas, Size::new(150, 100));
        assert!(l.placements.iter().all(|p| p.size.height == 100));
        assert!(l.needs_resize());
    }

    #[test]
    fn fixed_height_single_600x399() {
        let l = Strip::fixed_height(100).compute(&[Size::new(600, 399)]).unwrap();
        assert_eq!(l.canvas, Size::new(150, 100));
        assert_eq!(l.placements[0].natural, Size::new(600, 399));
    }

    #[test]
    fn fixed_height_equal_to_natural_is_identity() {
        let l = Strip::fixed_height(256).compute(&[PORTRAIT]).unwrap();
        assert!(!l.placements[0].needs_resize());
        assert_eq!(l.canvas, PORTRAIT);
    }

    // ── Errors ─────────────────────────────────────────────────────────

    #[test]
    fn empty_input_rejected() {
        assert_eq!(Strip::natural().compute(&[]), Err(LayoutError::EmptyInput));
        assert_eq!(
            Strip::fixed_height(10).compute(&[]),
            Err(LayoutError::EmptyInput)
        );
    }

    #[test]
    fn zero_fixed_height_rejected() {
        assert_eq!(
            Strip::fixed_height(0).compute(&[PORTRAIT]),
            Err(LayoutError::ZeroFixedHeight)
        );
    }

    #[test]
    fn zero_source_dimension_reports_index() {
        assert_eq!(
            Strip::natural().compute(&[PORTRAIT, Size::new(0, 5)]),
            Err(LayoutError::ZeroSourceDimension { index: 1 })
        );
    }

    #[test]
    fn width_overflow_rejected() {
        let huge = Size::new(u32::MAX, 1);
        assert_eq!(
            Strip::natural().compute(&[huge, Size::new(1, 1)]),
            Err(LayoutError::CanvasTooWide { index: 1 })
        );
    }

    #[test]
    fn compute_layout_matches_strip() {
        let sources = [PORTRAIT, Size::new(600, 399)];
        assert_eq!(
            compute_layout(&sources, Some(100)),
            Strip::fixed_height(100).compute(&sources)
        );
        assert_eq!(
            compute_layout(&sources, None),
            Strip::natural().compute(&sources)
        );
    }

    // ── Rect ───────────────────────────────────────────────────────────

    #[test]
    fn adjacent_rects_do_not_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 5, 10);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&Rect::new(9, 0, 5, 10)));
    }
}
