//! The protocol-level driver: hardware reset, bring-up and typed command setters.

use hal::blocking::delay::DelayMs;
use hal::digital::v2::OutputPin;

use crate::command::*;
use crate::config::Config;
use crate::interface;

/// Reset must be held high this long before the reset pulse.
const RESET_SETTLE_MS: u8 = 10;
/// Reset pulse length, long enough for the controller to load its defaults.
const RESET_PULSE_MS: u8 = 60;

/// A driver for an SSD1306, owning the byte interface and the reset line.
pub struct Driver<DI, RST>
where
    DI: interface::DisplayInterface,
{
    iface: DI,
    rst: RST,
}

impl<DI, RST> Driver<DI, RST>
where
    DI: interface::DisplayInterface,
    RST: OutputPin,
{
    /// Reset the controller and bring it up with `config` for a panel with `rows` rows. When this
    /// returns `Ok` the display is on, in page addressing mode, and ready for data. The delay is
    /// only borrowed for the two reset waits.
    pub fn new<D>(iface: DI, rst: RST, delay: &mut D, config: Config, rows: u8) -> Result<Self, ()>
    where
        D: DelayMs<u8>,
    {
        let mut driver = Driver { iface, rst };
        #[cfg(feature = "defmt")]
        defmt::debug!("ssd1306: reset and bring-up, {=u8} rows", rows);
        driver.reset(delay)?;
        config.send(&mut driver.iface, rows)?;
        #[cfg(feature = "defmt")]
        defmt::debug!("ssd1306: display on");
        Ok(driver)
    }

    fn reset<D>(&mut self, delay: &mut D) -> Result<(), ()>
    where
        D: DelayMs<u8>,
    {
        self.rst.set_high().map_err(|_| ())?;
        delay.delay_ms(RESET_SETTLE_MS);
        self.rst.set_low().map_err(|_| ())?;
        delay.delay_ms(RESET_PULSE_MS);
        self.rst.set_high().map_err(|_| ())
    }

    /// Give back the interface and reset pin.
    pub fn release(self) -> (DI, RST) {
        (self.iface, self.rst)
    }
}

impl<DI, RST> Driver<DI, RST>
where
    DI: interface::DisplayInterface,
{
    /// Send an arbitrary command.
    pub fn send(&mut self, cmd: Command) -> Result<(), ()> {
        cmd.send(&mut self.iface)
    }

    /// Write raw bytes into display RAM at the controller's current address.
    pub fn write_data(&mut self, buf: &[u8]) -> Result<(), ()> {
        self.iface.send_data(buf)
    }

    /// Control the contrast.
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), ()> {
        self.send(Command::SetContrast(contrast))
    }

    /// Switch the panel on, or put it to sleep. RAM contents are kept while sleeping.
    pub fn set_display_on(&mut self, on: bool) -> Result<(), ()> {
        self.send(Command::SetDisplayOn(on))
    }

    /// Show RAM contents normally or inverted.
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Result<(), ()> {
        self.send(Command::SetDisplayMode(mode))
    }

    /// Light every pixel regardless of RAM, or go back to showing RAM.
    pub fn set_entire_display_on(&mut self, on: bool) -> Result<(), ()> {
        self.send(Command::SetEntireDisplayOn(on))
    }

    pub fn set_addressing_mode(&mut self, mode: AddressingMode) -> Result<(), ()> {
        self.send(Command::SetAddressingMode(mode))
    }

    pub fn set_page_start(&mut self, page: u8) -> Result<(), ()> {
        self.send(Command::SetPageStart(page))
    }

    pub fn set_column_start(&mut self, column: u8) -> Result<(), ()> {
        self.send(Command::SetColumnStart(column))
    }

    /// Set the vertical pan.
    ///
    /// This uses `Command::SetStartLine` to roll the RAM rows shown on the panel, wrapping the
    /// rows above `line` to the bottom.
    pub fn set_start_line(&mut self, line: u8) -> Result<(), ()> {
        self.send(Command::SetStartLine(line))
    }

    pub fn nop(&mut self) -> Result<(), ()> {
        self.send(Command::Nop)
    }
}
