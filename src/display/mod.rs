//! The main API to the display: a framebuffer composed with a protocol driver. Drawing happens in
//! memory; `flush` is the only call that transmits anything.

pub mod framebuffer;

use hal::blocking::delay::DelayMs;
use hal::digital::v2::OutputPin;

use crate::command::consts::*;
use crate::config::Config;
use crate::driver::Driver;
use crate::interface;

pub use self::framebuffer::FrameBuffer;

/// A 128x64 module, the most common SSD1306 panel.
pub type Display128x64<DI, RST> = Display<DI, RST, 128, 8>;
/// A 128x32 module.
pub type Display128x32<DI, RST> = Display<DI, RST, 128, 4>;
/// A 96x64 module.
pub type Display96x64<DI, RST> = Display<DI, RST, 96, 8>;

/// An SSD1306 display `W` pixels wide and `PAGES * 8` pixels tall, with its framebuffer.
pub struct Display<DI, RST, const W: usize, const PAGES: usize>
where
    DI: interface::DisplayInterface,
{
    driver: Driver<DI, RST>,
    buffer: FrameBuffer<W, PAGES>,
}

impl<DI, RST, const W: usize, const PAGES: usize> Display<DI, RST, W, PAGES>
where
    DI: interface::DisplayInterface,
    RST: OutputPin,
{
    /// Reset and bring up the display connected to `iface`, with a cleared framebuffer. The panel
    /// RAM is not cleared until the first `flush`.
    ///
    /// Panics if the size is not one the SSD1306 can drive: at most 128 columns and between 2 and
    /// 8 pages.
    pub fn new<D>(iface: DI, rst: RST, delay: &mut D, config: Config) -> Result<Self, ()>
    where
        D: DelayMs<u8>,
    {
        if false
            || W == 0
            || W > NUM_PIXEL_COLS as usize
            || PAGES < 2
            || PAGES > NUM_PAGES as usize
        {
            panic!("Display size not supported by SSD1306.");
        }
        let driver = Driver::new(iface, rst, delay, config, (PAGES * 8) as u8)?;
        Ok(Display {
            driver,
            buffer: FrameBuffer::new(),
        })
    }

    /// Give back the interface and reset pin.
    pub fn release(self) -> (DI, RST) {
        self.driver.release()
    }
}

impl<DI, RST, const W: usize, const PAGES: usize> Display<DI, RST, W, PAGES>
where
    DI: interface::DisplayInterface,
{
    /// Write the whole framebuffer to display RAM, one page at a time. The buffer is left as is.
    pub fn flush(&mut self) -> Result<(), ()> {
        #[cfg(feature = "defmt")]
        defmt::trace!("ssd1306: flush {=usize} pages", PAGES);
        for (page, segs) in self.buffer.pages().iter().enumerate() {
            self.driver.set_page_start(page as u8)?;
            self.driver.set_column_start(0)?;
            self.driver.write_data(segs)?;
        }
        Ok(())
    }

    pub fn buffer(&self) -> &FrameBuffer<W, PAGES> {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut FrameBuffer<W, PAGES> {
        &mut self.buffer
    }

    /// Access the protocol driver, e.g. to change contrast or put the panel to sleep.
    pub fn driver_mut(&mut self) -> &mut Driver<DI, RST> {
        &mut self.driver
    }

    pub fn clear(&mut self) {
        self.buffer.clear()
    }

    pub fn fill(&mut self, byte: u8) {
        self.buffer.fill(byte)
    }

    pub fn set_pixel(&mut self, x: i16, y: i16, on: bool) {
        self.buffer.set_pixel(x, y, on)
    }

    pub fn get_pixel(&self, x: i16, y: i16) -> bool {
        self.buffer.get_pixel(x, y)
    }

    pub fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, on: bool) {
        self.buffer.draw_rect(x, y, w, h, on)
    }

    pub fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, on: bool) {
        self.buffer.fill_rect(x, y, w, h, on)
    }

    pub fn draw_char(&mut self, x: i16, y: i16, c: char) {
        self.buffer.draw_char(x, y, c)
    }

    pub fn draw_str(&mut self, x: i16, y: i16, text: &str) {
        self.buffer.draw_str(x, y, text)
    }

    pub fn draw_bitmap(&mut self, x: i16, y: i16, w: i16, h: i16, source: &[u8]) {
        self.buffer.draw_bitmap(x, y, w, h, source)
    }

    pub fn draw_number(&mut self, x: i16, y: i16, value: u16, zero_fill: bool) -> i16 {
        self.buffer.draw_number(x, y, value, zero_fill)
    }
}
