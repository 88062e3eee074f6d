//! Driver library for the Solomon Systech SSD1306 dot matrix OLED controller, talking the serial
//! protocol over plain GPIO pins, with an in-memory page-packed framebuffer.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate embedded_hal as hal;


pub mod command;
pub mod config;
pub mod display;
pub mod driver;
pub mod font;
pub mod interface;

// Re-exports for primary API.
pub use crate::command::{consts, AddressingMode, Command, DisplayMode, VcomhLevel};
pub use crate::config::Config;
pub use crate::display::{Display, Display128x32, Display128x64, Display96x64, FrameBuffer};
pub use crate::driver::Driver;
pub use crate::interface::bitbang::{BitBangInterface, NoPin};
pub use crate::interface::spi::SpiInterface;
