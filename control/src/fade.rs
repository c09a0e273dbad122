//! LED brightness bouncing between two bounds.

use embedded_hal::pwm::SetDutyCycle;

/// Steps brightness up until the upper bound, then down until the lower
/// one, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Fade {
    brightness: u8,
    step: i16,
    min: u8,
    max: u8,
}

impl Fade {
    /// Bounds are in percent and get sorted and capped at 100.
    #[must_use]
    pub fn new(step: u8, min: u8, max: u8) -> Self {
        let (min, max) = (min.min(max).min(100), max.max(min).min(100));
        Self {
            brightness: min,
            step: i16::from(step),
            min,
            max,
        }
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Return the current brightness and move to the next one.
    pub fn tick(&mut self) -> u8 {
        let current = self.brightness;
        let next = (i16::from(current) + self.step).clamp(i16::from(self.min), i16::from(self.max));
        if next <= i16::from(self.min) || next >= i16::from(self.max) {
            self.step = -self.step;
        }
        self.brightness = next as u8;
        current
    }

    /// Write the current brightness to the LED and advance.
    ///
    /// # Errors
    ///
    /// Passes through errors of the LED.
    pub fn apply<L: SetDutyCycle>(&mut self, led: &mut L) -> Result<(), L::Error> {
        led.set_duty_cycle_percent(self.tick())
    }
}

impl Default for Fade {
    fn default() -> Self {
        Self::new(5, 0, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testlib::RecordingPwm;

    #[test]
    fn when_bound_is_reached_direction_reverses() {
        let mut fade = Fade::new(40, 0, 100);
        let sequence: Vec<u8> = (0..8).map(|_| fade.tick()).collect();
        assert_eq!(sequence, [0, 40, 80, 100, 60, 20, 0, 40]);
    }

    #[test]
    fn when_step_divides_range_bounds_are_hit_exactly() {
        let mut fade = Fade::default();
        let sequence: Vec<u8> = (0..42).map(|_| fade.tick()).collect();
        assert_eq!(sequence[20], 100);
        assert_eq!(sequence[21], 95);
        assert_eq!(sequence[40], 0);
        assert_eq!(sequence[41], 5);
    }

    #[test]
    fn when_bounds_are_swapped_they_get_sorted() {
        let fade = Fade::new(1, 200, 10);
        assert_eq!(fade.brightness(), 10);
        assert_eq!(fade.max, 100);
    }

    #[test]
    fn when_applied_led_receives_brightness() {
        let mut fade = Fade::new(10, 0, 100);
        let mut led = RecordingPwm::default();
        fade.apply(&mut led).unwrap();
        fade.apply(&mut led).unwrap();
        assert_eq!(led.duties, [0, 10]);
    }
}
