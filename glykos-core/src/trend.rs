//! Sample mapping and the circular trend buffer
//!
//! The graph keeps one pre-mapped screen-Y coordinate per horizontal pixel
//! column. Raw samples are mapped once, on the way in; the buffer never
//! holds raw values.

/// Maximum expected raw sample value (12-bit ADC range)
pub const ADC_MAX: u16 = 4095;

/// Map a raw sample to an absolute screen Y inside the graph region
///
/// Clamps to `[0, ADC_MAX]`, scales to `0..region_height`, then inverts so
/// larger samples plot closer to the top of the region.
pub fn sample_to_y(raw: u16, region_top: u16, region_height: u16) -> u16 {
    let raw = raw.min(ADC_MAX);

    // Scale to 0 .. (region_height - 1), integer arithmetic only.
    let span = region_height - 1;
    let scaled = (raw as u32 * span as u32) / ADC_MAX as u32;

    // Invert: high sample = small Y (towards the top of the screen).
    region_top + (span - scaled as u16)
}

/// Fixed-capacity circular buffer of mapped Y coordinates
///
/// `N` is the graph width in pixels; slot `i` always holds the Y last
/// drawn at column `i`. The write position wraps to column 0 after the
/// last column, overwriting the oldest sample.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrendBuffer<const N: usize> {
    samples: [u16; N],
    write_index: usize,
    initialized: bool,
}

impl<const N: usize> TrendBuffer<N> {
    /// Create an empty, uninitialized buffer
    ///
    /// The owning UI is expected to call [`reset`](Self::reset) before the
    /// first push; pushing into an uninitialized buffer is recovered by the
    /// UI's lazy-initialization guard, not signalled as an error.
    pub const fn new() -> Self {
        Self {
            samples: [0; N],
            write_index: 0,
            initialized: false,
        }
    }

    /// Fill every slot with `y`, rewind to column 0, mark initialized
    pub fn reset(&mut self, y: u16) {
        self.samples = [y; N];
        self.write_index = 0;
        self.initialized = true;
    }

    /// Store a mapped Y at the current column and advance
    ///
    /// Returns the column that was written.
    pub fn push(&mut self, y: u16) -> usize {
        let column = self.write_index;
        self.samples[column] = y;
        self.write_index = (self.write_index + 1) % N;
        column
    }

    /// Mapped Y stored at `column`, if in range
    pub fn get(&self, column: usize) -> Option<u16> {
        self.samples.get(column).copied()
    }

    /// Next column to be overwritten
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Whether [`reset`](Self::reset) has run since creation
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of columns
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for TrendBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Graph geometry used by the stock 320x240 landscape layout.
    const TOP: u16 = 60;
    const HEIGHT: u16 = 180;

    #[test]
    fn test_mapping_endpoints() {
        // Raw 0 lands on the bottom row of the region.
        assert_eq!(sample_to_y(0, TOP, HEIGHT), TOP + HEIGHT - 1);
        // Full scale lands on the top row.
        assert_eq!(sample_to_y(ADC_MAX, TOP, HEIGHT), TOP);
    }

    #[test]
    fn test_mapping_midpoint_within_one_pixel() {
        let mid = sample_to_y(2048, TOP, HEIGHT);
        let exact_mid = TOP as i32 + (HEIGHT as i32 - 1) / 2;
        assert!((mid as i32 - exact_mid).abs() <= 1);
    }

    #[test]
    fn test_mapping_clamps_overrange() {
        assert_eq!(sample_to_y(u16::MAX, TOP, HEIGHT), sample_to_y(ADC_MAX, TOP, HEIGHT));
    }

    #[test]
    fn test_push_wraps_after_capacity() {
        let mut buf: TrendBuffer<320> = TrendBuffer::new();
        buf.reset(100);

        for _ in 0..320 {
            buf.push(150);
        }
        assert_eq!(buf.write_index(), 0);

        // The (N+1)th push overwrites column 0.
        let column = buf.push(42);
        assert_eq!(column, 0);
        assert_eq!(buf.get(0), Some(42));
        assert_eq!(buf.write_index(), 1);
    }

    #[test]
    fn test_reset_fills_all_columns() {
        let mut buf: TrendBuffer<320> = TrendBuffer::new();
        assert!(!buf.is_initialized());

        let midline = sample_to_y(ADC_MAX / 2, TOP, HEIGHT);
        buf.reset(midline);
        assert!(buf.is_initialized());
        assert_eq!(buf.write_index(), 0);

        buf.push(200);
        for i in 1..buf.capacity() {
            assert_eq!(buf.get(i), Some(midline));
        }
        assert_eq!(buf.get(0), Some(200));
    }

    #[test]
    fn test_get_out_of_range() {
        let buf: TrendBuffer<8> = TrendBuffer::new();
        assert_eq!(buf.get(8), None);
    }

    proptest! {
        #[test]
        fn prop_mapping_is_order_reversing(a in 0u16..=ADC_MAX, b in 0u16..=ADC_MAX) {
            prop_assume!(a < b);
            // Larger raw values plot higher on screen (smaller Y).
            prop_assert!(sample_to_y(a, TOP, HEIGHT) >= sample_to_y(b, TOP, HEIGHT));
        }

        #[test]
        fn prop_mapping_stays_inside_region(raw in any::<u16>()) {
            let y = sample_to_y(raw, TOP, HEIGHT);
            prop_assert!(y >= TOP);
            prop_assert!(y < TOP + HEIGHT);
        }

        #[test]
        fn prop_write_index_stays_in_bounds(pushes in 0usize..1000) {
            let mut buf: TrendBuffer<320> = TrendBuffer::new();
            buf.reset(0);
            for _ in 0..pushes {
                buf.push(1);
            }
            prop_assert_eq!(buf.write_index(), pushes % 320);
        }
    }
}
