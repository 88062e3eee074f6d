//! The command set for the SSD1306.
//!
//! Note 1: The display RAM of the SSD1306 is 128 columns (segments) by 8 pages, where each page is
//! a horizontal band of 8 rows. A data byte written to RAM fills one column of one page, with bit 0
//! at the top row of the page. All commands, including their parameter bytes, are sent with D/C
//! low.

use crate::interface::DisplayInterface;

pub mod consts {
    //! Constants describing max supported display size and the display RAM layout.

    pub const NUM_PIXEL_COLS: u8 = 128;
    pub const NUM_PIXEL_ROWS: u8 = 64;
    pub const NUM_PAGES: u8 = NUM_PIXEL_ROWS / 8;
    pub const PIXEL_COL_MAX: u8 = NUM_PIXEL_COLS - 1;
    pub const PIXEL_ROW_MAX: u8 = NUM_PIXEL_ROWS - 1;
    pub const PAGE_MAX: u8 = NUM_PAGES - 1;
}

use self::consts::*;

/// The way the RAM address pointer advances as data bytes are written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressingMode {
    /// Column increments, wrapping to the next page at the end of the column range.
    Horizontal,
    /// Page increments, wrapping to the next column at the end of the page range.
    Vertical,
    /// Column increments within the current page only. The page is selected with
    /// `Command::SetPageStart`. This is the mode the framebuffer flush relies on.
    Page,
}

/// COM deselect voltage level (VCOMH), as a fraction of Vcc.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VcomhLevel {
    /// ~0.65 x Vcc.
    Low,
    /// ~0.77 x Vcc.
    Medium,
    /// ~0.83 x Vcc.
    High,
    /// Undocumented, but accepted by the chip and gives the brightest image.
    Highest,
}

/// Whether RAM contents are shown as-is or inverted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// A set RAM bit lights the pixel.
    Normal,
    /// A clear RAM bit lights the pixel.
    Inverse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Set the contrast. Range 0-255, higher is brighter.
    SetContrast(u8),
    /// Light every pixel regardless of RAM contents (`true`), or resume showing RAM (`false`).
    SetEntireDisplayOn(bool),
    /// Set normal or inverse display. See enum for details.
    SetDisplayMode(DisplayMode),
    /// Turn the panel on (`true`) or put it to sleep (`false`).
    SetDisplayOn(bool),
    /// Set the column start address for page addressing mode, sent as two nibble commands. Range
    /// is 0-127. (Note 1)
    SetColumnStart(u8),
    /// Set the RAM addressing mode. See enum for details.
    SetAddressingMode(AddressingMode),
    /// Set the column start and end address for horizontal and vertical addressing modes. Range
    /// is 0-127, where start must be <= end.
    SetColumnAddress(u8, u8),
    /// Set the page start and end address for horizontal and vertical addressing modes. Range is
    /// 0-7, where start must be <= end.
    SetPageAddress(u8, u8),
    /// Set the page start address for page addressing mode. Range is 0-7.
    SetPageStart(u8),
    /// Set the RAM row shown at the top of the display. Range is 0-63.
    SetStartLine(u8),
    /// Map column address 127 to SEG0 (`true`) instead of column address 0 (`false`). Flips the
    /// image horizontally.
    SetSegmentRemap(bool),
    /// Set the MUX ratio, the number of active COM lines (display rows). Range 16-64; the chip
    /// is sent the value minus one.
    SetMuxRatio(u8),
    /// Scan COM lines from COM[N-1] to COM0 (`true`) instead of COM0 to COM[N-1] (`false`).
    /// Flips the image vertically.
    SetComScanDirection(bool),
    /// Set the vertical shift of the COM lines. Range 0-63.
    SetDisplayOffset(u8),
    /// Set the COM pin hardware layout: sequential (`true`) or alternative pin configuration, and
    /// whether left/right COM remapping is enabled. Dictated by how the module is wired.
    SetComPinsConfig(bool, bool),
    /// Set the display clock divide ratio and oscillator frequency, both 0-15. DCLK is Fosc
    /// divided by (divide + 1).
    SetClockDivide(u8, u8),
    /// Set the pre-charge period lengths of phase 1 and phase 2 in DCLKs, both 1-15.
    SetPrechargePeriod(u8, u8),
    /// Set the COM deselect voltage level. See enum for details.
    SetVcomhLevel(VcomhLevel),
    /// Enable or disable the internal charge pump. Must be enabled before the display is turned
    /// on when the module has no external high voltage supply.
    EnableChargePump(bool),
    /// No operation.
    Nop,
}

macro_rules! ok_command {
    ($buf:ident, [$($byte:expr),+]) => {{
        let mut len = 0;
        $(
            $buf[len] = $byte;
            len += 1;
        )+
        Ok(&$buf[..len])
    }};
}

impl Command {
    /// Encode the command and transmit it as a single uninterrupted command sequence. Nothing is
    /// sent if a parameter is out of range.
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), ()>
    where
        DI: DisplayInterface,
    {
        let mut buf = [0u8; 3];
        let bytes: Result<&[u8], ()> = match self {
            Command::SetContrast(contrast) => ok_command!(buf, [0x81, contrast]),
            Command::SetEntireDisplayOn(ena) => ok_command!(
                buf,
                [match ena {
                    true => 0xA5,
                    false => 0xA4,
                }]
            ),
            Command::SetDisplayMode(mode) => ok_command!(
                buf,
                [match mode {
                    DisplayMode::Normal => 0xA6,
                    DisplayMode::Inverse => 0xA7,
                }]
            ),
            Command::SetDisplayOn(on) => ok_command!(
                buf,
                [match on {
                    true => 0xAF,
                    false => 0xAE,
                }]
            ),
            Command::SetColumnStart(col) => match col {
                0..=PIXEL_COL_MAX => ok_command!(buf, [col & 0x0F, 0x10 | (col >> 4)]),
                _ => Err(()),
            },
            Command::SetAddressingMode(mode) => {
                let m = match mode {
                    AddressingMode::Horizontal => 0x00,
                    AddressingMode::Vertical => 0x01,
                    AddressingMode::Page => 0x02,
                };
                ok_command!(buf, [0x20, m])
            }
            Command::SetColumnAddress(start, end) => match (start, end) {
                (0..=PIXEL_COL_MAX, 0..=PIXEL_COL_MAX) if start <= end => {
                    ok_command!(buf, [0x21, start, end])
                }
                _ => Err(()),
            },
            Command::SetPageAddress(start, end) => match (start, end) {
                (0..=PAGE_MAX, 0..=PAGE_MAX) if start <= end => {
                    ok_command!(buf, [0x22, start, end])
                }
                _ => Err(()),
            },
            Command::SetPageStart(page) => match page {
                0..=PAGE_MAX => ok_command!(buf, [0xB0 | page]),
                _ => Err(()),
            },
            Command::SetStartLine(line) => match line {
                0..=PIXEL_ROW_MAX => ok_command!(buf, [0x40 | line]),
                _ => Err(()),
            },
            Command::SetSegmentRemap(remap) => ok_command!(buf, [0xA0 | remap as u8]),
            Command::SetMuxRatio(rows) => match rows {
                16..=NUM_PIXEL_ROWS => ok_command!(buf, [0xA8, rows - 1]),
                _ => Err(()),
            },
            Command::SetComScanDirection(reverse) => {
                ok_command!(buf, [0xC0 | ((reverse as u8) << 3)])
            }
            Command::SetDisplayOffset(offset) => match offset {
                0..=PIXEL_ROW_MAX => ok_command!(buf, [0xD3, offset]),
                _ => Err(()),
            },
            Command::SetComPinsConfig(sequential, remap) => ok_command!(
                buf,
                [0xDA, ((sequential as u8) << 4) | ((remap as u8) << 5) | 0x02]
            ),
            Command::SetClockDivide(divide, freq) => match (divide, freq) {
                (0..=15, 0..=15) => ok_command!(buf, [0xD5, divide | (freq << 4)]),
                _ => Err(()),
            },
            Command::SetPrechargePeriod(phase_1, phase_2) => match (phase_1, phase_2) {
                (1..=15, 1..=15) => ok_command!(buf, [0xD9, phase_1 | (phase_2 << 4)]),
                _ => Err(()),
            },
            Command::SetVcomhLevel(level) => {
                let l = match level {
                    VcomhLevel::Low => 0x00,
                    VcomhLevel::Medium => 0x20,
                    VcomhLevel::High => 0x30,
                    VcomhLevel::Highest => 0x40,
                };
                ok_command!(buf, [0xDB, l])
            }
            Command::EnableChargePump(ena) => {
                ok_command!(buf, [0x8D, 0x10 | ((ena as u8) << 2)])
            }
            Command::Nop => ok_command!(buf, [0xE3]),
        };
        iface.send_commands(bytes?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::test_spy::{Sent, TestSpyInterface};

    #[test]
    fn set_contrast() {
        let mut di = TestSpyInterface::new();
        Command::SetContrast(210).send(&mut di).unwrap();
        di.check_multi(sends!(0x81, 0xD2));
    }

    #[test]
    fn single_byte_switches() {
        let mut di = TestSpyInterface::new();
        Command::SetEntireDisplayOn(false).send(&mut di).unwrap();
        Command::SetEntireDisplayOn(true).send(&mut di).unwrap();
        Command::SetDisplayMode(DisplayMode::Normal)
            .send(&mut di)
            .unwrap();
        Command::SetDisplayMode(DisplayMode::Inverse)
            .send(&mut di)
            .unwrap();
        Command::SetDisplayOn(false).send(&mut di).unwrap();
        Command::SetDisplayOn(true).send(&mut di).unwrap();
        Command::Nop.send(&mut di).unwrap();
        di.check_multi(sends!(0xA4, 0xA5, 0xA6, 0xA7, 0xAE, 0xAF, 0xE3));
    }

    #[test]
    fn set_column_start() {
        let mut di = TestSpyInterface::new();
        Command::SetColumnStart(0).send(&mut di).unwrap();
        di.check_multi(sends!(0x00, 0x10));
        di.clear();
        Command::SetColumnStart(0x5A).send(&mut di).unwrap();
        di.check_multi(sends!(0x0A, 0x15));
        di.clear();
        Command::SetColumnStart(127).send(&mut di).unwrap();
        di.check_multi(sends!(0x0F, 0x17));
        di.clear();
        assert_eq!(Command::SetColumnStart(128).send(&mut di), Err(()));
        di.check_multi(sends!());
    }

    #[test]
    fn set_addressing_mode() {
        let mut di = TestSpyInterface::new();
        Command::SetAddressingMode(AddressingMode::Horizontal)
            .send(&mut di)
            .unwrap();
        Command::SetAddressingMode(AddressingMode::Vertical)
            .send(&mut di)
            .unwrap();
        Command::SetAddressingMode(AddressingMode::Page)
            .send(&mut di)
            .unwrap();
        di.check_multi(sends!(0x20, 0x00, 0x20, 0x01, 0x20, 0x02));
    }

    #[test]
    fn set_column_address() {
        let mut di = TestSpyInterface::new();
        Command::SetColumnAddress(23, 42).send(&mut di).unwrap();
        di.check_multi(sends!(0x21, 23, 42));
        assert_eq!(Command::SetColumnAddress(128, 129).send(&mut di), Err(()));
        assert_eq!(Command::SetColumnAddress(23, 128).send(&mut di), Err(()));
        assert_eq!(Command::SetColumnAddress(42, 23).send(&mut di), Err(()));
    }

    #[test]
    fn set_page_address() {
        let mut di = TestSpyInterface::new();
        Command::SetPageAddress(0, 7).send(&mut di).unwrap();
        di.check_multi(sends!(0x22, 0, 7));
        assert_eq!(Command::SetPageAddress(0, 8).send(&mut di), Err(()));
        assert_eq!(Command::SetPageAddress(5, 2).send(&mut di), Err(()));
    }

    #[test]
    fn set_page_start() {
        let mut di = TestSpyInterface::new();
        Command::SetPageStart(0).send(&mut di).unwrap();
        Command::SetPageStart(7).send(&mut di).unwrap();
        di.check_multi(sends!(0xB0, 0xB7));
        assert_eq!(Command::SetPageStart(8).send(&mut di), Err(()));
    }

    #[test]
    fn set_start_line() {
        let mut di = TestSpyInterface::new();
        Command::SetStartLine(0).send(&mut di).unwrap();
        Command::SetStartLine(23).send(&mut di).unwrap();
        di.check_multi(sends!(0x40, 0x57));
        assert_eq!(Command::SetStartLine(64).send(&mut di), Err(()));
    }

    #[test]
    fn remap_and_scan_direction() {
        let mut di = TestSpyInterface::new();
        Command::SetSegmentRemap(false).send(&mut di).unwrap();
        Command::SetSegmentRemap(true).send(&mut di).unwrap();
        Command::SetComScanDirection(false).send(&mut di).unwrap();
        Command::SetComScanDirection(true).send(&mut di).unwrap();
        di.check_multi(sends!(0xA0, 0xA1, 0xC0, 0xC8));
    }

    #[test]
    fn set_mux_ratio() {
        let mut di = TestSpyInterface::new();
        Command::SetMuxRatio(64).send(&mut di).unwrap();
        di.check_multi(sends!(0xA8, 63));
        di.clear();
        Command::SetMuxRatio(16).send(&mut di).unwrap();
        di.check_multi(sends!(0xA8, 15));
        assert_eq!(Command::SetMuxRatio(15).send(&mut di), Err(()));
        assert_eq!(Command::SetMuxRatio(65).send(&mut di), Err(()));
    }

    #[test]
    fn set_display_offset() {
        let mut di = TestSpyInterface::new();
        Command::SetDisplayOffset(23).send(&mut di).unwrap();
        di.check_multi(sends!(0xD3, 23));
        assert_eq!(Command::SetDisplayOffset(64).send(&mut di), Err(()));
    }

    #[test]
    fn set_com_pins_config() {
        let mut di = TestSpyInterface::new();
        Command::SetComPinsConfig(true, false)
            .send(&mut di)
            .unwrap();
        Command::SetComPinsConfig(false, false)
            .send(&mut di)
            .unwrap();
        Command::SetComPinsConfig(true, true).send(&mut di).unwrap();
        di.check_multi(sends!(0xDA, 0x12, 0xDA, 0x02, 0xDA, 0x32));
    }

    #[test]
    fn set_clock_divide() {
        let mut di = TestSpyInterface::new();
        Command::SetClockDivide(0, 8).send(&mut di).unwrap();
        di.check_multi(sends!(0xD5, 0x80));
        di.clear();
        Command::SetClockDivide(15, 15).send(&mut di).unwrap();
        di.check_multi(sends!(0xD5, 0xFF));
        assert_eq!(Command::SetClockDivide(16, 0).send(&mut di), Err(()));
        assert_eq!(Command::SetClockDivide(0, 16).send(&mut di), Err(()));
    }

    #[test]
    fn set_precharge_period() {
        let mut di = TestSpyInterface::new();
        Command::SetPrechargePeriod(1, 15).send(&mut di).unwrap();
        di.check_multi(sends!(0xD9, 0xF1));
        di.clear();
        Command::SetPrechargePeriod(2, 2).send(&mut di).unwrap();
        di.check_multi(sends!(0xD9, 0x22));
        assert_eq!(Command::SetPrechargePeriod(0, 2).send(&mut di), Err(()));
        assert_eq!(Command::SetPrechargePeriod(2, 16).send(&mut di), Err(()));
    }

    #[test]
    fn set_vcomh_level() {
        let mut di = TestSpyInterface::new();
        for level in [
            VcomhLevel::Low,
            VcomhLevel::Medium,
            VcomhLevel::High,
            VcomhLevel::Highest,
        ]
        .iter()
        {
            Command::SetVcomhLevel(*level).send(&mut di).unwrap();
        }
        di.check_multi(sends!(0xDB, 0x00, 0xDB, 0x20, 0xDB, 0x30, 0xDB, 0x40));
    }

    #[test]
    fn charge_pump() {
        let mut di = TestSpyInterface::new();
        Command::EnableChargePump(true).send(&mut di).unwrap();
        Command::EnableChargePump(false).send(&mut di).unwrap();
        di.check_multi(sends!(0x8D, 0x14, 0x8D, 0x10));
    }
}
