//! Transports that move command and data bytes to the SSD1306.
//!
//! The controller is write-only: there is no status or acknowledgement path, so an `Err(())` from
//! an interface only ever means the underlying pin or SPI implementation reported a failure.

/// A byte transport to the display controller. Each call must transmit its whole slice with the
/// D/C line held at the same level throughout, so that a command opcode and its parameters are
/// never interleaved with anything else.
pub trait DisplayInterface {
    fn send_commands(&mut self, cmds: &[u8]) -> Result<(), ()>;
    fn send_data(&mut self, buf: &[u8]) -> Result<(), ()>;
}

/// Level of the D/C (data/command select) line for a byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataSelect {
    Command,
    Data,
}

pub mod bitbang {
    //! Software serial interface. Each byte is clocked out MSB first on a data pin, one clock
    //! pulse per bit, framed by chip select and tagged by the D/C line.
    //!
    //! Five-line wiring uses a chip select pin; four-line wiring (chip select tied low on the
    //! board) passes `NoPin` in its place. The reset line is owned by the `Driver`, not the
    //! interface, because it is only touched during bring-up.

    use core::convert::Infallible;

    use hal::digital::v2::OutputPin;

    use super::{DataSelect, DisplayInterface};

    /// A stand-in for a signal that is hard-wired on the board, such as a chip select tied to
    /// ground. Setting it does nothing.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct NoPin;

    impl OutputPin for NoPin {
        type Error = Infallible;

        fn set_low(&mut self) -> Result<(), Infallible> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    pub struct BitBangInterface<SCK, SDA, DC, CS = NoPin> {
        /// Serial clock (D0 on most modules).
        sck: SCK,
        /// Serial data (D1 on most modules).
        sda: SDA,
        /// Data/command select.
        dc: DC,
        /// Active-low chip select.
        cs: CS,
    }

    impl<SCK, SDA, DC, CS> BitBangInterface<SCK, SDA, DC, CS>
    where
        SCK: OutputPin,
        SDA: OutputPin,
        DC: OutputPin,
        CS: OutputPin,
    {
        /// Create a five-line interface. D/C is driven to command mode and chip select is
        /// asserted, matching the controller's state right after reset.
        pub fn new(sck: SCK, sda: SDA, dc: DC, cs: CS) -> Result<Self, ()> {
            let mut iface = Self { sck, sda, dc, cs };
            iface.dc.set_low().map_err(|_| ())?;
            iface.cs.set_low().map_err(|_| ())?;
            Ok(iface)
        }

        /// Give back the pins.
        pub fn release(self) -> (SCK, SDA, DC, CS) {
            (self.sck, self.sda, self.dc, self.cs)
        }

        /// Transmit one 8-bit frame. Chip select goes idle while D/C settles, is asserted for the
        /// eight clock pulses, and is released afterwards. The controller samples the data line
        /// on the rising clock edge.
        pub fn write_byte(&mut self, select: DataSelect, byte: u8) -> Result<(), ()> {
            self.cs.set_high().map_err(|_| ())?;
            match select {
                DataSelect::Command => self.dc.set_low(),
                DataSelect::Data => self.dc.set_high(),
            }
            .map_err(|_| ())?;
            self.cs.set_low().map_err(|_| ())?;
            self.sck.set_low().map_err(|_| ())?;

            for bit in (0..8).rev() {
                if byte & (1 << bit) != 0 {
                    self.sda.set_high()
                } else {
                    self.sda.set_low()
                }
                .map_err(|_| ())?;
                self.sck.set_high().map_err(|_| ())?;
                self.sck.set_low().map_err(|_| ())?;
            }

            self.cs.set_high().map_err(|_| ())
        }
    }

    impl<SCK, SDA, DC> BitBangInterface<SCK, SDA, DC, NoPin>
    where
        SCK: OutputPin,
        SDA: OutputPin,
        DC: OutputPin,
    {
        /// Create a four-line interface for modules whose chip select is tied low.
        pub fn without_cs(sck: SCK, sda: SDA, dc: DC) -> Result<Self, ()> {
            Self::new(sck, sda, dc, NoPin)
        }
    }

    impl<SCK, SDA, DC, CS> DisplayInterface for BitBangInterface<SCK, SDA, DC, CS>
    where
        SCK: OutputPin,
        SDA: OutputPin,
        DC: OutputPin,
        CS: OutputPin,
    {
        fn send_commands(&mut self, cmds: &[u8]) -> Result<(), ()> {
            for &cmd in cmds {
                self.write_byte(DataSelect::Command, cmd)?;
            }
            Ok(())
        }

        fn send_data(&mut self, buf: &[u8]) -> Result<(), ()> {
            for &byte in buf {
                self.write_byte(DataSelect::Data, byte)?;
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::interface::test_spy::{decode_frames, Sent, SpyLog, SpyPin};

        fn five_line(log: &SpyLog) -> BitBangInterface<SpyPin, SpyPin, SpyPin, SpyPin> {
            BitBangInterface::new(log.pin("sck"), log.pin("sda"), log.pin("dc"), log.pin("cs"))
                .unwrap()
        }

        #[test]
        fn new_selects_command_mode() {
            let log = SpyLog::new();
            let _iface = five_line(&log);
            assert_eq!(
                log.events(),
                vec![Sent::Pin("dc", false), Sent::Pin("cs", false)]
            );
        }

        #[test]
        fn byte_is_clocked_msb_first() {
            let log = SpyLog::new();
            let mut iface = five_line(&log);
            log.clear();
            iface.write_byte(DataSelect::Data, 0b1010_0110).unwrap();

            let events = log.events();
            // CS idle, D/C, CS asserted, clock low, then 8 x (data, clock high, clock low), CS idle.
            assert_eq!(events.len(), 4 + 8 * 3 + 1);
            assert_eq!(&events[..4], &[
                Sent::Pin("cs", true),
                Sent::Pin("dc", true),
                Sent::Pin("cs", false),
                Sent::Pin("sck", false),
            ]);
            let bits: Vec<bool> = events[4..28]
                .chunks(3)
                .map(|c| {
                    assert_eq!(c[1], Sent::Pin("sck", true));
                    assert_eq!(c[2], Sent::Pin("sck", false));
                    match c[0] {
                        Sent::Pin("sda", level) => level,
                        ref other => panic!("expected data bit, got {:?}", other),
                    }
                })
                .collect();
            assert_eq!(bits, vec![true, false, true, false, false, true, true, false]);
            assert_eq!(events[28], Sent::Pin("cs", true));
        }

        #[test]
        fn contrast_command_holds_command_select() {
            let log = SpyLog::new();
            let mut iface = five_line(&log);
            log.clear();
            iface.send_commands(&[0x81, 0xD2]).unwrap();
            assert_eq!(
                decode_frames(&log.events()),
                vec![(DataSelect::Command, 0x81), (DataSelect::Command, 0xD2)]
            );
        }

        #[test]
        fn data_bytes_use_data_select() {
            let log = SpyLog::new();
            let mut iface = five_line(&log);
            log.clear();
            iface.send_data(&[0x00, 0xFF, 0x3C]).unwrap();
            assert_eq!(
                decode_frames(&log.events()),
                vec![
                    (DataSelect::Data, 0x00),
                    (DataSelect::Data, 0xFF),
                    (DataSelect::Data, 0x3C)
                ]
            );
        }

        #[test]
        fn four_line_wiring_never_touches_cs() {
            let log = SpyLog::new();
            let mut iface =
                BitBangInterface::without_cs(log.pin("sck"), log.pin("sda"), log.pin("dc"))
                    .unwrap();
            iface.send_commands(&[0xAF]).unwrap();
            assert!(log.events().iter().all(|e| *e != Sent::Pin("cs", true)
                && *e != Sent::Pin("cs", false)));
            assert_eq!(
                decode_frames(&log.events()),
                vec![(DataSelect::Command, 0xAF)]
            );
        }
    }
}

pub mod spi {
    //! The SPI interface drives the "4-wire" serial mode with a hardware SPI peripheral: 8-bit
    //! words on the bus and a GPIO for D/C. Chip select, if any, is left to the SPI device.

    use super::DisplayInterface;

    pub struct SpiInterface<SPI, DC> {
        /// The SPI master device connected to the SSD1306.
        spi: SPI,
        /// A GPIO output pin connected to the D/C (data/command) pin of the SSD1306.
        dc: DC,
    }

    impl<SPI, DC> SpiInterface<SPI, DC>
    where
        SPI: hal::blocking::spi::Write<u8>,
        DC: hal::digital::v2::OutputPin,
    {
        /// Create a new SPI interface to communicate with the display driver. `spi` is the SPI
        /// master device, and `dc` is the GPIO output pin connected to the D/C pin of the SSD1306.
        pub fn new(spi: SPI, dc: DC) -> Self {
            Self { spi, dc }
        }

        /// Give back the SPI device and D/C pin.
        pub fn release(self) -> (SPI, DC) {
            (self.spi, self.dc)
        }
    }

    impl<SPI, DC> DisplayInterface for SpiInterface<SPI, DC>
    where
        SPI: hal::blocking::spi::Write<u8>,
        DC: hal::digital::v2::OutputPin,
    {
        fn send_commands(&mut self, cmds: &[u8]) -> Result<(), ()> {
            self.dc.set_low().map_err(|_| ())?;
            self.spi.write(cmds).map_err(|_| ())
        }

        fn send_data(&mut self, buf: &[u8]) -> Result<(), ()> {
            self.dc.set_high().map_err(|_| ())?;
            self.spi.write(buf).map_err(|_| ())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use embedded_hal_mock::pin::{Mock as PinMock, State as PinState, Transaction as PinTransaction};
        use embedded_hal_mock::spi::{Mock as SpiMock, Transaction as SpiTransaction};

        #[test]
        fn commands_then_data() {
            let spi = SpiMock::new(&[
                SpiTransaction::write(vec![0x81, 0xD2]),
                SpiTransaction::write(vec![0xDE, 0xAD]),
            ]);
            let dc = PinMock::new(&[
                PinTransaction::set(PinState::Low),
                PinTransaction::set(PinState::High),
            ]);
            let mut iface = SpiInterface::new(spi, dc);
            iface.send_commands(&[0x81, 0xD2]).unwrap();
            iface.send_data(&[0xDE, 0xAD]).unwrap();

            let (mut spi, mut dc) = iface.release();
            spi.done();
            dc.done();
        }
    }
}
