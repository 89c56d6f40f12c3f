// SSD1306 OLED Display (128×32, I²C)
//
// Implementiert den TextDisplay Trait aus occupancy-core. Gezeichnet wird
// in den Framebuffer des Treibers, erst flush() überträgt auf das Panel.

use embedded_graphics::Drawable;
use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::Point;
use embedded_graphics::text::{Baseline, Text};
use esp_hal::Blocking;
use esp_hal::i2c::master::I2c;
use occupancy_core::{DisplayError, TextDisplay};
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::{DisplayConfig, DisplayRotation, DisplaySize128x32, I2CInterface};

/// Konkreter Display-Treiber-Typ
pub type Ssd1306Display = Ssd1306<
    I2CInterface<I2c<'static, Blocking>>,
    DisplaySize128x32,
    BufferedGraphicsMode<DisplaySize128x32>,
>;

/// SSD1306 mit 8 px hohem Font
pub struct OledDisplay {
    display: Ssd1306Display,
    style: MonoTextStyle<'static, BinaryColor>,
}

impl OledDisplay {
    /// Initialisiert das Display und löscht den Bildschirm
    pub fn new(i2c: I2c<'static, Blocking>) -> Result<Self, DisplayError> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x32, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        display.init().map_err(|_| DisplayError::BusFailed)?;
        display.clear_buffer();
        display.flush().map_err(|_| DisplayError::BusFailed)?;

        let style = MonoTextStyleBuilder::new()
            .font(&FONT_5X8)
            .text_color(BinaryColor::On)
            .build();

        Ok(Self { display, style })
    }
}

impl TextDisplay for OledDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.display.clear_buffer();
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError> {
        Text::with_baseline(text, Point::new(x, y), self.style, Baseline::Top)
            .draw(&mut self.display)
            .map_err(|_| DisplayError::DrawFailed)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.display.flush().map_err(|_| DisplayError::BusFailed)
    }
}
