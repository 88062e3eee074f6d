//! Defines the register values sent to the SSD1306 during bring-up.

use crate::command::*;
use crate::interface;

/// A configuration for the display. `Config::new()` holds the power-on values this driver was
/// designed around; builder methods override individual settings, and every setting is always
/// sent during bring-up.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    contrast: u8,
    segment_remap: bool,
    com_scan_reverse: bool,
    mux_ratio: Option<u8>,
    display_offset: u8,
    clock_divide: (u8, u8),
    precharge_period: (u8, u8),
    com_pins: (bool, bool),
    vcomh_level: VcomhLevel,
    charge_pump: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Create the default configuration: contrast 210, no remapping, MUX ratio matching the
    /// display height, clock divide 0 at frequency setting 8, pre-charge phases 1 and 15,
    /// sequential COM pins, low VCOMH and the internal charge pump enabled.
    pub fn new() -> Self {
        Config {
            contrast: 210,
            segment_remap: false,
            com_scan_reverse: false,
            mux_ratio: None,
            display_offset: 0,
            clock_divide: (0, 8),
            precharge_period: (1, 15),
            com_pins: (true, false),
            vcomh_level: VcomhLevel::Low,
            charge_pump: true,
        }
    }

    /// Extend this `Config` to set the initial contrast. See `Command::SetContrast`.
    pub fn contrast(self, contrast: u8) -> Self {
        Self { contrast, ..self }
    }

    /// Extend this `Config` to flip the image horizontally. See `Command::SetSegmentRemap`.
    pub fn segment_remap(self, remap: bool) -> Self {
        Self {
            segment_remap: remap,
            ..self
        }
    }

    /// Extend this `Config` to flip the image vertically. See `Command::SetComScanDirection`.
    pub fn com_scan_reverse(self, reverse: bool) -> Self {
        Self {
            com_scan_reverse: reverse,
            ..self
        }
    }

    /// Extend this `Config` to drive a number of rows other than the display height. See
    /// `Command::SetMuxRatio`.
    pub fn mux_ratio(self, rows: u8) -> Self {
        Self {
            mux_ratio: Some(rows),
            ..self
        }
    }

    /// Extend this `Config` to shift the COM lines. See `Command::SetDisplayOffset`.
    pub fn display_offset(self, offset: u8) -> Self {
        Self {
            display_offset: offset,
            ..self
        }
    }

    /// Extend this `Config` to set the display clock. See `Command::SetClockDivide`.
    pub fn clock_divide(self, divide: u8, freq: u8) -> Self {
        Self {
            clock_divide: (divide, freq),
            ..self
        }
    }

    /// Extend this `Config` to set the pre-charge phases. See `Command::SetPrechargePeriod`.
    pub fn precharge_period(self, phase_1: u8, phase_2: u8) -> Self {
        Self {
            precharge_period: (phase_1, phase_2),
            ..self
        }
    }

    /// Extend this `Config` to match the module's COM wiring. See `Command::SetComPinsConfig`.
    pub fn com_pins(self, sequential: bool, remap: bool) -> Self {
        Self {
            com_pins: (sequential, remap),
            ..self
        }
    }

    /// Extend this `Config` to set the COM deselect level. See `Command::SetVcomhLevel`.
    pub fn vcomh_level(self, level: VcomhLevel) -> Self {
        Self {
            vcomh_level: level,
            ..self
        }
    }

    /// Extend this `Config` to disable the internal charge pump, for modules with an external
    /// panel supply. See `Command::EnableChargePump`.
    pub fn charge_pump(self, enable: bool) -> Self {
        Self {
            charge_pump: enable,
            ..self
        }
    }

    /// Transmit the full bring-up command sequence for a display with `rows` rows, ending with the
    /// display switched on. The order matters: the addressing mode must be fixed before any data
    /// is written, and the charge pump must be running before the panel is switched on.
    pub(crate) fn send<DI>(&self, iface: &mut DI, rows: u8) -> Result<(), ()>
    where
        DI: interface::DisplayInterface,
    {
        Command::SetDisplayOn(false).send(iface)?;
        Command::SetColumnStart(0).send(iface)?;
        Command::SetStartLine(0).send(iface)?;
        Command::SetAddressingMode(AddressingMode::Page).send(iface)?;
        Command::SetContrast(self.contrast).send(iface)?;
        Command::SetSegmentRemap(self.segment_remap).send(iface)?;
        Command::SetComScanDirection(self.com_scan_reverse).send(iface)?;
        Command::SetMuxRatio(self.mux_ratio.unwrap_or(rows)).send(iface)?;
        Command::SetDisplayOffset(self.display_offset).send(iface)?;
        Command::SetClockDivide(self.clock_divide.0, self.clock_divide.1).send(iface)?;
        Command::SetPrechargePeriod(self.precharge_period.0, self.precharge_period.1)
            .send(iface)?;
        Command::SetComPinsConfig(self.com_pins.0, self.com_pins.1).send(iface)?;
        Command::SetVcomhLevel(self.vcomh_level).send(iface)?;
        Command::EnableChargePump(self.charge_pump).send(iface)?;
        Command::SetEntireDisplayOn(false).send(iface)?;
        Command::SetDisplayMode(DisplayMode::Normal).send(iface)?;
        Command::SetDisplayOn(true).send(iface)
    }
}
