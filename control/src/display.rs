//! Four digit seven-segment display driven by HT16K33.
//!
//! Digits are addressed from the left. The colon sits between the second and
//! third digit and has a register of its own.

use embedded_hal::i2c::I2c;
use heapless::Vec;

use crate::log::debug;

pub const DEFAULT_ADDRESS: u8 = 0x70;

/// Largest decimal value that fits on the display.
pub const MAX_VALUE: u16 = 9999;

/// Digit value that is rendered as an empty digit.
pub const CLEAR_DIGIT: u8 = 0x7F;

pub const POINT: u8 = 0x80;

pub const DIGITS: usize = 4;

const DIGIT_REGISTERS: [u8; DIGITS] = [0x00, 0x02, 0x06, 0x08];
const COLON_REGISTER: u8 = 0x04;
const COLON_ON: u8 = 0x02;

const SYSTEM_SETUP: u8 = 0x20;
const OSCILLATOR: u8 = 0x01;
const BLINK_COMMAND: u8 = 0x80;
const DISPLAY_ON: u8 = 0x01;
const BRIGHTNESS_COMMAND: u8 = 0xE0;
const BRIGHTNESS_HIGHEST: u8 = 0x0F;

// See https://en.wikipedia.org/wiki/Seven-segment_display
const HEX_DIGITS: [u8; 16] = [
    0x3f, 0x06, 0x5b, 0x4f, // 0, 1, 2, 3
    0x66, 0x6d, 0x7d, 0x07, // 4, 5, 6, 7
    0x7f, 0x6f, 0x77, 0x7c, // 8, 9, A, b
    0x39, 0x5e, 0x79, 0x71, // C, d, E, F
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Blink {
    #[default]
    Off,
    TwoHz,
    OneHz,
    HalfHz,
}

impl Blink {
    fn bits(self) -> u8 {
        match self {
            Blink::Off => 0x00,
            Blink::TwoHz => 0x02,
            Blink::OneHz => 0x04,
            Blink::HalfHz => 0x06,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub address: u8,
    pub blink: Blink,
    /// Between 0 (darkest) and 15 (brightest), higher values are clamped.
    pub brightness: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            blink: Blink::Off,
            brightness: BRIGHTNESS_HIGHEST,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    I2c(E),
    DigitOutOfRange(u8),
    PositionOutOfRange(usize),
    ValueOutOfRange(u16),
    TextLength(usize),
    UnsupportedCharacter(char),
}

/// Encode a hexadecimal digit into segments.
///
/// # Errors
///
/// Fails with `Error::DigitOutOfRange` for values above 15, other than
/// `CLEAR_DIGIT`.
pub fn encode_digit<E>(value: u8, point: bool) -> Result<u8, Error<E>> {
    if value == CLEAR_DIGIT {
        return Ok(0x00);
    }
    let segments = *HEX_DIGITS
        .get(usize::from(value))
        .ok_or(Error::DigitOutOfRange(value))?;
    Ok(if point { segments | POINT } else { segments })
}

/// Segments of a character, `None` when it cannot be drawn.
///
/// Letters are shown in their more legible case where the two differ.
#[must_use]
pub fn encode_char(character: char) -> Option<u8> {
    let segments = match character {
        'a' | 'A' => 0x77,
        'b' | 'B' => 0x7c,
        'c' => 0x58,
        'C' => 0x39,
        'd' | 'D' => 0x5e,
        'e' | 'E' => 0x79,
        'f' | 'F' => 0x71,
        'g' | 'G' => 0x6f,
        'h' => 0x74,
        'H' => 0x76,
        'i' => 0x04,
        'I' => 0x30,
        'j' | 'J' => 0x0e,
        'l' | 'L' => 0x38,
        'n' | 'N' => 0x54,
        'o' => 0x5c,
        'O' => 0x3f,
        'p' | 'P' => 0x73,
        'q' | 'Q' => 0x67,
        'r' | 'R' => 0x50,
        's' | 'S' => 0x6d,
        't' | 'T' => 0x78,
        'u' => 0x1c,
        'U' => 0x3e,
        'y' | 'Y' => 0x6e,
        ' ' => 0x00,
        '-' => 0x40,
        '?' => 0x53,
        '0'..='9' => HEX_DIGITS[character as usize - '0' as usize],
        _ => return None,
    };
    Some(segments)
}

/// Encode the whole text before anything gets written.
///
/// # Errors
///
/// Fails with `Error::TextLength` unless there are 1 to 4 characters and
/// with `Error::UnsupportedCharacter` on the first character that cannot
/// be drawn.
pub fn encode_text<E>(text: &str) -> Result<Vec<u8, DIGITS>, Error<E>> {
    let length = text.chars().count();
    if !(1..=DIGITS).contains(&length) {
        return Err(Error::TextLength(length));
    }

    let mut encoded = Vec::new();
    for character in text.chars() {
        let segments = encode_char(character).ok_or(Error::UnsupportedCharacter(character))?;
        // Length was checked above.
        let _: Result<_, _> = encoded.push(segments);
    }
    Ok(encoded)
}

/// Split a value into decimal digits, most significant first.
fn decimal_digits(value: u16) -> [u8; DIGITS] {
    [
        (value / 1000 % 10) as u8,
        (value / 100 % 10) as u8,
        (value / 10 % 10) as u8,
        (value % 10) as u8,
    ]
}

pub struct Display<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Display<I2C> {
    /// Turn the display on and blank it.
    ///
    /// # Errors
    ///
    /// Fails with `Error::I2c` when the bus rejects any of the setup writes.
    pub fn new(i2c: I2C, config: Config) -> Result<Self, Error<I2C::Error>> {
        let mut display = Self {
            i2c,
            address: config.address,
        };
        display.command(SYSTEM_SETUP | OSCILLATOR)?;
        display.command(BLINK_COMMAND | config.blink.bits() | DISPLAY_ON)?;
        display.command(BRIGHTNESS_COMMAND | config.brightness.min(BRIGHTNESS_HIGHEST))?;
        display.blank()?;
        debug!("Display initialized at {=u8:#x}", config.address);
        Ok(display)
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Show a hexadecimal digit at the given position.
    ///
    /// # Errors
    ///
    /// Fails on invalid position or digit, or on a bus failure.
    pub fn set_digit(
        &mut self,
        position: usize,
        value: u8,
        point: bool,
    ) -> Result<(), Error<I2C::Error>> {
        let segments = encode_digit(value, point)?;
        self.set_digit_raw(position, segments)
    }

    /// Write segments to the given position as they are.
    ///
    /// # Errors
    ///
    /// Fails on invalid position, or on a bus failure.
    pub fn set_digit_raw(&mut self, position: usize, segments: u8) -> Result<(), Error<I2C::Error>> {
        let register = *DIGIT_REGISTERS
            .get(position)
            .ok_or(Error::PositionOutOfRange(position))?;
        self.write(register, segments)
    }

    /// # Errors
    ///
    /// Fails on a bus failure.
    pub fn set_colon(&mut self, enabled: bool) -> Result<(), Error<I2C::Error>> {
        self.write(COLON_REGISTER, if enabled { COLON_ON } else { 0x00 })
    }

    /// Turn off all segments including the colon.
    ///
    /// # Errors
    ///
    /// Fails on a bus failure.
    pub fn blank(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_colon(false)?;
        for position in (0..DIGITS).rev() {
            self.set_digit_raw(position, 0x00)?;
        }
        Ok(())
    }

    /// Show `0000` without the colon.
    ///
    /// # Errors
    ///
    /// Fails on a bus failure.
    pub fn clear(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_colon(false)?;
        self.update(0)
    }

    /// Show a decimal value, padded with zeros. The colon is left as is.
    ///
    /// # Errors
    ///
    /// Fails with `Error::ValueOutOfRange` above `MAX_VALUE`, or on a bus
    /// failure.
    pub fn update(&mut self, value: u16) -> Result<(), Error<I2C::Error>> {
        if value > MAX_VALUE {
            return Err(Error::ValueOutOfRange(value));
        }
        let digits = decimal_digits(value);
        for position in (0..DIGITS).rev() {
            self.set_digit(position, digits[position], false)?;
        }
        Ok(())
    }

    /// Show up to four characters aligned to the left.
    ///
    /// Nothing is written when the text cannot be shown.
    ///
    /// # Errors
    ///
    /// Fails on text of invalid length or with unsupported characters, or
    /// on a bus failure.
    pub fn text(&mut self, text: &str) -> Result<(), Error<I2C::Error>> {
        let encoded = encode_text(text)?;
        self.blank()?;
        for (position, segments) in encoded.into_iter().enumerate() {
            self.set_digit_raw(position, segments)?;
        }
        Ok(())
    }

    fn command(&mut self, command: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c.write(self.address, &[command]).map_err(Error::I2c)
    }

    fn write(&mut self, register: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(Error::I2c)
    }
}
