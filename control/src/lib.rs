//! Control logic of a kitchen timer built from GPIO peripherals.
//!
//! Nothing in here touches hardware directly. Raw line access, sleeping and
//! time come from a [`platform::Platform`] implemented by the host, PWM
//! outputs and the display bus come through `embedded-hal` traits.
//!
//! ```text
//!                [ Host loop ]
//!               /      |      \
//!     [ Button ]  [ Breathing ]  [ Display ] <--- [ TimerDial ] <--- [Pot]
//!        |           |   |            |
//!    read_level    now  SetDutyCycle  I2c
//!        \           |                |
//!         +------ {Platform} ---------+
//! ```

#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

#[cfg(test)]
#[macro_use]
extern crate approx;

pub mod blink;
pub mod breathing;
pub mod button;
pub mod display;
pub mod fade;
mod log;
pub mod platform;
pub mod pot;

#[cfg(test)]
mod testlib;
