//! Full example code for setting up an SSD1306 display. This runs on an STM32F303RE, with a
//! 128x64 SSD1306 module wired for its serial mode: PA5 to D0 (clock), PA7 to D1 (data), PA8 to
//! D/C, PA9 to /RES and PA10 to /CS.

#![deny(unsafe_code)]
#![no_main]
#![no_std]

extern crate cortex_m;
extern crate stm32f30x;
extern crate stm32f30x_hal as hal;
#[macro_use]
extern crate cortex_m_rt;
extern crate panic_abort;
extern crate ssd1306_bitbang;

use cortex_m::asm;
use cortex_m_rt::ExceptionFrame;
use hal::prelude::*;
use ssd1306_bitbang as oled;

entry!(main);

exception!(*, default_handler);
exception!(HardFault, hard_fault);

fn hard_fault(_ef: &ExceptionFrame) -> ! {
    asm::bkpt();
    loop {}
}

fn default_handler(_irqn: i16) {
    loop {}
}

/// A small 8x8 smiley, packed as one 8-row band.
const SMILEY: [u8; 8] = [0x3C, 0x42, 0xA9, 0x85, 0x85, 0xA9, 0x42, 0x3C];

fn main() -> ! {
    // Get peripherals and set up RCC.
    let cp = cortex_m::Peripherals::take().unwrap();
    let dp = stm32f30x::Peripherals::take().unwrap();

    let mut flash = dp.FLASH.constrain();
    let mut rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze(&mut flash.acr);
    let mut delay = hal::delay::Delay::new(cp.SYST, clocks);

    // Get GPIO A where the display is connected. All five lines are plain push-pull outputs.
    let mut gpioa = dp.GPIOA.split(&mut rcc.ahb);
    let sck = gpioa.pa5.into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);
    let sda = gpioa.pa7.into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);
    let dc = gpioa.pa8.into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);
    let rst = gpioa.pa9.into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);
    let cs = gpioa.pa10.into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);

    // Build the interface and bring the display up. On a module with /CS tied to ground, use
    // `BitBangInterface::without_cs(sck, sda, dc)` instead.
    let iface = oled::BitBangInterface::new(sck, sda, dc, cs).unwrap();
    let mut disp: oled::Display128x64<_, _> = oled::Display::new(
        iface,
        rst,
        &mut delay,
        oled::Config::new().vcomh_level(oled::VcomhLevel::Medium),
    ).unwrap();

    // Draw a frame with some text, a counter and a bitmap, then push it to the panel.
    disp.draw_rect(0, 0, 128, 64, true);
    disp.draw_str(4, 4, "Hello, SSD1306!");
    disp.draw_bitmap(112, 48, 8, 8, &SMILEY);
    disp.flush().unwrap();

    let mut count: u16 = 0;
    loop {
        disp.fill_rect(4, 20, 30, 8, false);
        disp.draw_number(4, 20, count, true);
        disp.flush().unwrap();
        count = count.wrapping_add(1);
        delay.delay_ms(100_u16);
    }
}
