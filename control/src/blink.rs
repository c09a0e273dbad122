//! Digital output toggled at a fixed rate.

use core::time::Duration;

use crate::platform::{Level, Platform};

pub struct Blinker<P: Platform> {
    pin: P::Pin,
    half_period: Duration,
}

impl<P: Platform> Blinker<P> {
    /// Claim the pin as an output.
    ///
    /// # Errors
    ///
    /// Fails when the platform cannot claim the pin.
    pub fn new(platform: &mut P, pin: P::Pin, half_period: Duration) -> Result<Self, P::Error> {
        platform.configure_output(&pin)?;
        Ok(Self { pin, half_period })
    }

    pub fn half_period(&self) -> Duration {
        self.half_period
    }

    /// Drive the output high, then low, once per cycle. Ends low.
    ///
    /// # Errors
    ///
    /// Fails when the platform cannot set the level.
    pub fn blink(&mut self, platform: &mut P, cycles: usize) -> Result<(), P::Error> {
        for _ in 0..cycles {
            platform.set_level(&self.pin, Level::High)?;
            platform.sleep(self.half_period);
            platform.set_level(&self.pin, Level::Low)?;
            platform.sleep(self.half_period);
        }
        Ok(())
    }

    pub fn cleanup(&mut self, platform: &mut P) {
        platform.release(&self.pin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testlib::{HardwareFault, Simulation};

    #[test]
    fn when_blinking_it_alternates_levels_every_half_period() {
        let mut sim = Simulation::new();
        let mut blinker = Blinker::new(&mut sim, "USR3", Duration::from_millis(500)).unwrap();

        blinker.blink(&mut sim, 2).unwrap();

        assert_eq!(sim.outputs, ["USR3"]);
        assert_eq!(
            sim.levels,
            [
                ("USR3", Level::High),
                ("USR3", Level::Low),
                ("USR3", Level::High),
                ("USR3", Level::Low),
            ]
        );
        assert_eq!(sim.clock, Duration::from_secs(2));
    }

    #[test]
    fn when_output_cannot_be_claimed_it_fails() {
        let mut sim = Simulation::broken();
        let result = Blinker::new(&mut sim, "USR3", Duration::from_millis(500));
        assert!(matches!(result, Err(HardwareFault)));
    }
}
