//! Glyph renderer
//!
//! Cursor/style state machine that turns characters into scaled filled
//! blocks dispatched through the panel driver. The state lives here; the
//! panel is borrowed per call, so one renderer can serve any number of
//! draw calls without owning the hardware.
//!
//! Background handling matches the original GFX layer: when the
//! background color equals the text color, clear bits are left untouched
//! (transparent mode); otherwise each clear bit and the spacer column are
//! painted with the background color.

use glykos_hal::DisplayBus;

use crate::color;
use crate::font::{Font, FONT_5X7, GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH, LINE_HEIGHT};
use crate::ili9341::Ili9341;

/// Text cursor and style state
pub struct Gfx {
    cursor_x: u16,
    cursor_y: u16,
    text_color: u16,
    background: u16,
    size: u16,
    wrap: bool,
    font: &'static Font,
}

impl Gfx {
    /// Renderer with default style: white on black, size 1, wrap on
    pub fn new() -> Self {
        Self {
            cursor_x: 0,
            cursor_y: 0,
            text_color: color::WHITE,
            background: color::BLACK,
            size: 1,
            wrap: true,
            font: &FONT_5X7,
        }
    }

    /// Renderer using an alternative glyph table
    pub fn with_font(font: &'static Font) -> Self {
        Self { font, ..Self::new() }
    }

    /// Reset cursor and style to the defaults
    pub fn reset(&mut self) {
        *self = Self { font: self.font, ..Self::new() };
    }

    /// Move the cursor to pixel position (x, y)
    pub fn set_cursor(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    /// Current cursor position
    pub fn cursor(&self) -> (u16, u16) {
        (self.cursor_x, self.cursor_y)
    }

    /// Set the glyph scale factor; 0 is clamped to 1
    pub fn set_text_size(&mut self, size: u16) {
        self.size = size.max(1);
    }

    /// Set the foreground color
    pub fn set_text_color(&mut self, color: u16) {
        self.text_color = color;
    }

    /// Set the background color
    ///
    /// Setting it equal to the text color selects transparent mode.
    pub fn set_background_color(&mut self, color: u16) {
        self.background = color;
    }

    /// Enable or disable wrapping at the right panel edge
    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    /// Render one character at the cursor and advance
    pub fn write_char<B: DisplayBus>(
        &mut self,
        panel: &mut Ili9341<B>,
        c: char,
    ) -> Result<(), B::Error> {
        let size = self.size;
        let advance = GLYPH_ADVANCE * size;

        if self.wrap && self.cursor_x as u32 + advance as u32 >= panel.width() as u32 {
            self.cursor_x = 0;
            self.cursor_y = self.cursor_y.saturating_add(LINE_HEIGHT * size);
        }

        let opaque = self.background != self.text_color;
        let glyph = self.font.glyph(c);

        for col in 0..GLYPH_WIDTH {
            let mut bits = glyph[col as usize];
            for row in 0..GLYPH_HEIGHT {
                let x = self.cursor_x.saturating_add(col * size);
                let y = self.cursor_y.saturating_add(row * size);
                if bits & 0x01 != 0 {
                    panel.fill_rect(x, y, size, size, self.text_color)?;
                } else if opaque {
                    panel.fill_rect(x, y, size, size, self.background)?;
                }
                bits >>= 1;
            }
        }

        // Spacer column between characters.
        if opaque {
            panel.fill_rect(
                self.cursor_x.saturating_add(GLYPH_WIDTH * size),
                self.cursor_y,
                size,
                GLYPH_HEIGHT * size,
                self.background,
            )?;
        }

        self.cursor_x = self.cursor_x.saturating_add(advance);
        Ok(())
    }

    /// Render a string; `\n` starts a new line, `\r` is ignored
    pub fn write_str<B: DisplayBus>(
        &mut self,
        panel: &mut Ili9341<B>,
        s: &str,
    ) -> Result<(), B::Error> {
        for c in s.chars() {
            match c {
                '\n' => {
                    self.cursor_x = 0;
                    self.cursor_y = self.cursor_y.saturating_add(LINE_HEIGHT * self.size);
                }
                '\r' => {}
                _ => self.write_char(panel, c)?,
            }
        }
        Ok(())
    }
}

impl Default for Gfx {
    fn default() -> Self {
        Self::new()
    }
}
