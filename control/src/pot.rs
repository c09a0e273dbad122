//! Potentiometer readings and the timer dial built on top of them.

use core::time::Duration;

/// Largest raw reading of the 12-bit ADC.
pub const MAX_VALUE: u16 = 4095;

// A full turn sets a bit over 90 minutes.
const RAW_PER_MINUTE: u16 = 45;

/// ADC reference the pot is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reference {
    /// 1.8 V analog inputs.
    #[default]
    Low,
    /// 3.6 V analog inputs behind a divider.
    High,
}

impl Reference {
    pub fn volts(self) -> f32 {
        match self {
            Reference::Low => 1.8,
            Reference::High => 3.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pot {
    pub reference: Reference,
}

impl Pot {
    #[must_use]
    pub fn new(reference: Reference) -> Self {
        Self { reference }
    }

    /// Position between 0.0 and 1.0.
    #[must_use]
    pub fn ratio(&self, raw: u16) -> f32 {
        f32::from(raw.min(MAX_VALUE)) / f32::from(MAX_VALUE)
    }

    /// Approximate voltage on the pin.
    #[must_use]
    pub fn volts(&self, raw: u16) -> f32 {
        self.ratio(raw) * self.reference.volts()
    }
}

/// Timer length set by turning the pot.
///
/// A zero reading is ignored, the dial keeps its previous setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerDial {
    minutes: u16,
}

impl TimerDial {
    pub fn update(&mut self, raw: u16) {
        if raw > 0 {
            self.minutes = raw.min(MAX_VALUE) / RAW_PER_MINUTE;
        }
    }

    pub fn minutes(&self) -> u16 {
        self.minutes
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.minutes) * 60)
    }

    /// Minutes shown as `MM:00` on the four digit display.
    pub fn display_value(&self) -> u16 {
        self.minutes * 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display;

    #[test]
    fn when_pot_is_at_the_end_it_reaches_reference_voltage() {
        let pot = Pot::new(Reference::High);
        assert_relative_eq!(pot.volts(MAX_VALUE), 3.6);
        assert_relative_eq!(pot.volts(u16::MAX), 3.6);
        assert_relative_eq!(pot.volts(0), 0.0);
        assert_relative_eq!(Pot::default().volts(MAX_VALUE), 1.8);
    }

    #[test]
    fn when_pot_is_in_the_middle_ratio_is_half() {
        let pot = Pot::default();
        assert_relative_eq!(pot.ratio(2048), 0.5, epsilon = 0.001);
    }

    #[test]
    fn when_dial_is_turned_minutes_follow() {
        let mut dial = TimerDial::default();
        dial.update(450);
        assert_eq!(dial.minutes(), 10);
        assert_eq!(dial.display_value(), 1000);
        assert_eq!(dial.duration(), Duration::from_secs(600));
    }

    #[test]
    fn when_reading_is_zero_previous_setting_is_kept() {
        let mut dial = TimerDial::default();
        dial.update(900);
        dial.update(0);
        assert_eq!(dial.minutes(), 20);
    }

    #[test]
    fn when_dial_is_at_maximum_value_still_fits_on_display() {
        let mut dial = TimerDial::default();
        dial.update(u16::MAX);
        assert_eq!(dial.minutes(), 91);
        assert!(dial.display_value() <= display::MAX_VALUE);
    }
}
