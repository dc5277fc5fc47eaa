//! Trend UI
//!
//! Application-level layout for a continuous-measurement display: a
//! header with a label and a large numeric readout over a scrolling
//! trend graph. The graph keeps one sample per pixel column and redraws
//! only the column it touches, which keeps SPI bandwidth flat no matter
//! how often samples arrive.
//!
//! Layout (landscape 320x240): top quarter is the header, the rest the
//! graph region, one data point per horizontal pixel.

use core::fmt::Write as _;

use glykos_core::label::{truncated, Label};
use glykos_core::trend::{sample_to_y, TrendBuffer, ADC_MAX};
use glykos_hal::DisplayBus;
use heapless::String;

use crate::color;
use crate::gfx::Gfx;
use crate::ili9341::Ili9341;

/// Screen width in the layout orientation
pub const SCREEN_W: u16 = 320;
/// Screen height in the layout orientation
pub const SCREEN_H: u16 = 240;
/// Header height (top quarter)
pub const TOP_H: u16 = SCREEN_H / 4;
/// Top of the graph region
pub const GRAPH_Y: u16 = TOP_H;
/// Graph region height
pub const GRAPH_H: u16 = SCREEN_H - TOP_H;
/// One data point per horizontal pixel
pub const GRAPH_POINTS: usize = SCREEN_W as usize;

/// Top of the numeric sub-region inside the header
const VALUE_Y: u16 = 36;

const TOP_BG: u16 = color::DARKGREY;
const TOP_TEXT: u16 = color::WHITE;
const GRAPH_BG: u16 = color::BLACK;
const GRAPH_AXIS: u16 = color::WHITE;
const GRAPH_TRACE: u16 = color::GREEN;

/// How consecutive samples are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TraceStyle {
    /// Isolated 3-pixel dot per column
    #[default]
    Dots,
    /// Dot plus a line segment to the previous column
    Connected,
}

/// Numeric readout + scrolling trend graph
///
/// Owns the panel driver, a text renderer, the label, and the circular
/// sample buffer; one instance per display.
pub struct TrendUi<B> {
    panel: Ili9341<B>,
    text: Gfx,
    label: Label,
    buffer: TrendBuffer<GRAPH_POINTS>,
    trace: TraceStyle,
}

fn midline_y() -> u16 {
    sample_to_y(ADC_MAX / 2, GRAPH_Y, GRAPH_H)
}

impl<B: DisplayBus> TrendUi<B> {
    /// Wrap an initialized panel
    ///
    /// The panel is expected to be in landscape orientation (the state
    /// [`Ili9341::init`] leaves it in).
    pub fn new(panel: Ili9341<B>) -> Self {
        Self {
            panel,
            text: Gfx::new(),
            label: truncated("ADC Value"),
            buffer: TrendBuffer::new(),
            trace: TraceStyle::default(),
        }
    }

    /// Take the panel back
    pub fn release(self) -> Ili9341<B> {
        self.panel
    }

    /// Direct access to the panel for application drawing
    pub fn panel_mut(&mut self) -> &mut Ili9341<B> {
        &mut self.panel
    }

    /// Current label text
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Current trace rendering style
    pub fn trace_style(&self) -> TraceStyle {
        self.trace
    }

    /// Select dot or connected-line rendering for future samples
    pub fn set_trace_style(&mut self, style: TraceStyle) {
        self.trace = style;
    }

    /// Clear the screen and paint the full static layout
    ///
    /// Also fills the sample buffer to the vertical midline and rewinds
    /// the write position to column 0.
    pub fn initialize_layout(&mut self) -> Result<(), B::Error> {
        self.panel.fill_screen(color::BLACK)?;

        // Header and graph backgrounds.
        self.panel.fill_rect(0, 0, SCREEN_W, TOP_H, TOP_BG)?;
        self.panel.fill_rect(0, GRAPH_Y, SCREEN_W, GRAPH_H, GRAPH_BG)?;

        // Divider between header and graph.
        self.panel.draw_hline(0, TOP_H, SCREEN_W, color::WHITE)?;

        self.draw_label()?;

        self.text.set_cursor(8, GRAPH_Y + 4);
        self.text.set_text_size(2);
        self.text.set_text_color(color::WHITE);
        self.text.set_background_color(GRAPH_BG);
        self.text.write_str(&mut self.panel, "Trend")?;

        // Left-edge Y axis and bottom baseline.
        self.panel.draw_vline(0, GRAPH_Y, GRAPH_H, GRAPH_AXIS)?;
        self.draw_baseline()?;

        self.buffer.reset(midline_y());
        Ok(())
    }

    /// Replace the header label and repaint only the label band
    ///
    /// The numeric readout below the label is left untouched.
    pub fn set_label(&mut self, text: &str) -> Result<(), B::Error> {
        self.label = truncated(text);
        self.panel.fill_rect(0, 0, SCREEN_W, VALUE_Y, TOP_BG)?;
        self.draw_label()
    }

    /// Render `raw` as a large decimal in the numeric sub-region
    pub fn update_current_value(&mut self, raw: u16) -> Result<(), B::Error> {
        // Clear the numeric band only, not the label above it.
        self.panel.fill_rect(0, VALUE_Y, SCREEN_W, TOP_H - VALUE_Y, TOP_BG)?;

        self.text.set_cursor(8, 40);
        self.text.set_text_size(4);
        self.text.set_text_color(TOP_TEXT);
        self.text.set_background_color(TOP_BG);

        let mut value: String<12> = String::new();
        let _ = write!(value, "{}", raw);
        self.text.write_str(&mut self.panel, &value)
    }

    /// Map, store and draw one sample at the current graph column
    ///
    /// Erases the full column, paints a 3-pixel dot (plus the connecting
    /// segment in [`TraceStyle::Connected`] mode), then advances the
    /// circular write position.
    pub fn add_sample(&mut self, raw: u16) -> Result<(), B::Error> {
        // Recover silently if the layout was never initialized.
        if !self.buffer.is_initialized() {
            self.clear_graph()?;
        }

        let y = sample_to_y(raw, GRAPH_Y, GRAPH_H);
        let x = self.buffer.push(y) as u16;

        // Erase just this column.
        self.panel.draw_vline(x, GRAPH_Y, GRAPH_H, GRAPH_BG)?;

        if self.trace == TraceStyle::Connected && x > 0 {
            if let Some(prev_y) = self.buffer.get(x as usize - 1) {
                self.panel.draw_line(x - 1, prev_y, x, y, GRAPH_TRACE)?;
            }
        }

        // 3-pixel vertical dot, clipped to the graph region.
        let dot_top = y.saturating_sub(1).max(GRAPH_Y);
        let dot_bottom = (y + 1).min(GRAPH_Y + GRAPH_H - 1);
        for yy in dot_top..=dot_bottom {
            self.panel.draw_pixel(x, yy, GRAPH_TRACE)?;
        }

        Ok(())
    }

    /// Repaint the graph region and reset the buffer to the midline
    pub fn clear_graph(&mut self) -> Result<(), B::Error> {
        self.panel.fill_rect(0, GRAPH_Y, SCREEN_W, GRAPH_H, GRAPH_BG)?;
        self.draw_baseline()?;
        self.buffer.reset(midline_y());
        Ok(())
    }

    fn draw_label(&mut self) -> Result<(), B::Error> {
        self.text.set_cursor(8, 8);
        self.text.set_text_size(2);
        self.text.set_text_color(TOP_TEXT);
        self.text.set_background_color(TOP_BG);
        self.text.write_str(&mut self.panel, self.label.as_str())
    }

    fn draw_baseline(&mut self) -> Result<(), B::Error> {
        self.panel
            .draw_hline(0, GRAPH_Y + GRAPH_H - 1, SCREEN_W, GRAPH_AXIS)
    }
}
