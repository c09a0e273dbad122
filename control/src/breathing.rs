//! Breathing exercise guide shown through LED brightness.
//!
//! The LED fades in while inhaling, stays lit while holding the breath and
//! fades out while exhaling. Then it starts over.

use core::time::Duration;

use embedded_hal::pwm::SetDutyCycle;

use crate::button::{self, Button};
use crate::log::{debug, info};
use crate::platform::{Cancel, Platform};

const FULL: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    FadeUp,
    Hold,
    FadeDown,
}

impl Phase {
    fn next(self) -> Self {
        match self {
            Phase::FadeUp => Phase::Hold,
            Phase::Hold => Phase::FadeDown,
            Phase::FadeDown => Phase::FadeUp,
        }
    }
}

/// Length of each phase. Defaults to the 4-7-8 pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    pub fade_up: Duration,
    pub hold: Duration,
    pub fade_down: Duration,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            fade_up: Duration::from_secs(4),
            hold: Duration::from_secs(7),
            fade_down: Duration::from_secs(8),
        }
    }
}

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<B, L> {
    Button(B),
    Led(L),
}

#[derive(Debug, Clone)]
pub struct Breathing {
    durations: Durations,
    phase: Phase,
    phase_start: Duration,
}

impl Breathing {
    /// Start fading up at `now`.
    #[must_use]
    pub fn new(durations: Durations, now: Duration) -> Self {
        Self {
            durations,
            phase: Phase::FadeUp,
            phase_start: now,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Brightness in percent for given time.
    ///
    /// Once the current phase runs out, the next one starts at `now`.
    pub fn update(&mut self, now: Duration) -> u8 {
        let elapsed = now.saturating_sub(self.phase_start);
        let duration = self.duration(self.phase);
        let progress = progress(elapsed, duration);

        let brightness = match self.phase {
            Phase::FadeUp => (progress * FULL).min(FULL),
            Phase::Hold => FULL,
            Phase::FadeDown => (FULL - progress * FULL).max(0.0),
        };

        if elapsed >= duration {
            self.phase = self.phase.next();
            self.phase_start = now;
            debug!("Breathing phase {}", self.phase);
        }

        brightness as u8
    }

    fn duration(&self, phase: Phase) -> Duration {
        match phase {
            Phase::FadeUp => self.durations.fade_up,
            Phase::Hold => self.durations.hold,
            Phase::FadeDown => self.durations.fade_down,
        }
    }
}

fn progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        1.0
    } else {
        elapsed.as_secs_f32() / duration.as_secs_f32()
    }
}

/// Animate the LED every `tick` until the button is pressed.
///
/// The LED is turned off before returning, including on cancellation.
///
/// # Errors
///
/// Fails with `Error::Button` when the button cannot be read or the token
/// gets raised, and with `Error::Led` when the LED rejects a duty cycle.
pub fn breathe_until_pressed<P, T, L, C>(
    platform: &mut P,
    button: &Button<'_, P, T>,
    led: &mut L,
    breathing: &mut Breathing,
    tick: Duration,
    cancel: &C,
) -> Result<(), Error<button::Error<P::Error>, L::Error>>
where
    P: Platform,
    L: SetDutyCycle,
    C: Cancel + ?Sized,
{
    loop {
        if cancel.is_cancelled() {
            led.set_duty_cycle_fully_off().map_err(Error::Led)?;
            return Err(Error::Button(button::Error::Cancelled));
        }

        if button.is_pressed(platform).map_err(Error::Button)? {
            led.set_duty_cycle_fully_off().map_err(Error::Led)?;
            info!("Breathing stopped");
            return Ok(());
        }

        let brightness = breathing.update(platform.now());
        led.set_duty_cycle_percent(brightness).map_err(Error::Led)?;
        platform.sleep(tick);
    }
}
