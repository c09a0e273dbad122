//! Polled momentary button with press-cycle callbacks.
//!
//! The button blocks its caller until a complete press and release is
//! observed. While waiting it calls user hooks, letting the caller animate
//! LEDs or refresh a display between polls:
//!
//! ```text
//!  WAITING_FOR_PRESS ---(level != unpressed)---> WAITING_FOR_RELEASE
//!   | while unpressed      [on press]              | while pressed
//!   +-- every poll                                 +-- every poll
//!                                                  |
//!                          [on release] <---(level != pressed)
//! ```

use core::fmt;
use core::time::Duration;

use crate::log::{debug, info};
use crate::platform::{Cancel, Level, Never, Platform};

/// Zero-argument hook invoked during a press cycle.
pub type Callback<'a, T> = Box<dyn FnMut() -> T + 'a>;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Points of the press cycle where a callback can be attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hook {
    /// Called on every poll while the button is held.
    WhilePressed,
    /// Called on every poll while waiting for the press.
    WhileUnpressed,
    /// Called once when the press is detected.
    OnPress,
    /// Called once when the release is detected.
    OnRelease,
}

impl Hook {
    const COUNT: usize = 4;

    fn index(self) -> usize {
        match self {
            Hook::WhilePressed => 0,
            Hook::WhileUnpressed => 1,
            Hook::OnPress => 2,
            Hook::OnRelease => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Argument {
    Pin,
    PollInterval,
}

#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The button was configured with a missing or invalid argument.
    InvalidArgument(Argument),
    /// The platform failed to claim or read the pin.
    HardwareUnavailable(E),
    /// The wait was stopped through its cancellation token.
    Cancelled,
}

/// Construction parameters of [`Button`].
///
/// Defaults to an active-low button polled every 100 ms, with no pin.
#[derive(Debug, Clone)]
pub struct Config<Pin> {
    pub pin: Option<Pin>,
    pub poll_interval: Duration,
    /// Pull-up wiring, the line reads low while pressed.
    pub active_low: bool,
}

impl<Pin> Config<Pin> {
    pub fn new(pin: Pin) -> Self {
        Self {
            pin: Some(pin),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    #[must_use]
    pub fn active_low(mut self, active_low: bool) -> Self {
        self.active_low = active_low;
        self
    }
}

impl<Pin> Default for Config<Pin> {
    fn default() -> Self {
        Self {
            pin: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            active_low: true,
        }
    }
}

struct Slot<'a, T> {
    callback: Option<Callback<'a, T>>,
    value: Option<T>,
}

impl<T> Slot<'_, T> {
    fn fire(&mut self) {
        if let Some(callback) = self.callback.as_mut() {
            self.value = Some(callback());
        }
    }
}

impl<T> Default for Slot<'_, T> {
    fn default() -> Self {
        Self {
            callback: None,
            value: None,
        }
    }
}

/// A physical momentary button on a single input line.
///
/// The button does not own the platform. It keeps only its pin and takes
/// the platform on every operation, so several buttons can share it.
///
/// `T` is the return type of the attached callbacks. Their most recent
/// results are kept and available through [`Button::callback_value`].
pub struct Button<'a, P: Platform, T = ()> {
    pin: P::Pin,
    pressed_level: Level,
    poll_interval: Duration,
    last_press_duration: Duration,
    slots: [Slot<'a, T>; Hook::COUNT],
}

impl<'a, P: Platform, T> Button<'a, P, T> {
    /// Claim the configured pin as an input.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` when the pin is missing or the poll
    /// interval is zero, in which case the platform is not touched. Returns
    /// `Error::HardwareUnavailable` when the platform fails to claim the pin.
    pub fn new(platform: &mut P, config: Config<P::Pin>) -> Result<Self, Error<P::Error>> {
        let Some(pin) = config.pin else {
            return Err(Error::InvalidArgument(Argument::Pin));
        };
        if config.poll_interval.is_zero() {
            return Err(Error::InvalidArgument(Argument::PollInterval));
        }

        platform
            .configure_input(&pin)
            .map_err(Error::HardwareUnavailable)?;

        let pressed_level = if config.active_low {
            Level::Low
        } else {
            Level::High
        };

        Ok(Self {
            pin,
            pressed_level,
            poll_interval: config.poll_interval,
            last_press_duration: Duration::ZERO,
            slots: core::array::from_fn(|_| Slot::default()),
        })
    }

    pub fn pin(&self) -> &P::Pin {
        &self.pin
    }

    pub fn pressed_level(&self) -> Level {
        self.pressed_level
    }

    pub fn unpressed_level(&self) -> Level {
        !self.pressed_level
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Check the button without waiting.
    ///
    /// # Errors
    ///
    /// Returns `Error::HardwareUnavailable` when the pin cannot be read.
    pub fn is_pressed(&self, platform: &mut P) -> Result<bool, Error<P::Error>> {
        Ok(self.read(platform)? == self.pressed_level)
    }

    /// Block until the button gets pressed and released again.
    ///
    /// Returning only after the release means the caller never observes a
    /// press that is still in progress. There is no timeout, see
    /// [`Button::wait_for_press_until`] for a cancellable variant.
    ///
    /// # Errors
    ///
    /// Returns `Error::HardwareUnavailable` when the pin cannot be read.
    pub fn wait_for_press(&mut self, platform: &mut P) -> Result<(), Error<P::Error>> {
        self.wait_for_press_until(platform, &Never)
    }

    /// Like [`Button::wait_for_press`], checking `cancel` before every poll.
    ///
    /// A cancelled wait fires no further callbacks and leaves the last press
    /// duration untouched.
    ///
    /// # Errors
    ///
    /// Returns `Error::Cancelled` once the token is raised and
    /// `Error::HardwareUnavailable` when the pin cannot be read.
    pub fn wait_for_press_until<C>(
        &mut self,
        platform: &mut P,
        cancel: &C,
    ) -> Result<(), Error<P::Error>>
    where
        C: Cancel + ?Sized,
    {
        let unpressed_level = self.unpressed_level();

        let mut level = self.read(platform)?;
        while level == unpressed_level {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            self.slot(Hook::WhileUnpressed).fire();
            platform.sleep(self.poll_interval);
            level = self.read(platform)?;
        }

        let pressed_at = platform.now();
        debug!("Button pressed");
        self.slot(Hook::OnPress).fire();

        while self.read(platform)? == self.pressed_level {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            self.slot(Hook::WhilePressed).fire();
            platform.sleep(self.poll_interval);
        }

        self.last_press_duration = platform.now().saturating_sub(pressed_at);
        info!(
            "Button released after {} ms",
            self.last_press_duration.as_millis() as u64
        );
        self.slot(Hook::OnRelease).fire();

        Ok(())
    }

    /// Duration of the most recently completed press, zero if none.
    pub fn last_press_duration(&self) -> Duration {
        self.last_press_duration
    }

    /// Attach a callback, replacing the previous one of the same hook.
    pub fn set_callback<F>(&mut self, hook: Hook, callback: F)
    where
        F: FnMut() -> T + 'a,
    {
        self.slot(hook).callback = Some(Box::new(callback));
    }

    /// Detach the callback. Its last returned value is kept.
    pub fn clear_callback(&mut self, hook: Hook) {
        self.slot(hook).callback = None;
    }

    pub fn has_callback(&self, hook: Hook) -> bool {
        self.slots[hook.index()].callback.is_some()
    }

    /// Value returned by the latest invocation of the hook's callback,
    /// `None` if it never fired.
    pub fn callback_value(&self, hook: Hook) -> Option<&T> {
        self.slots[hook.index()].value.as_ref()
    }

    /// Release the pin. Safe to call any number of times.
    pub fn cleanup(&mut self, platform: &mut P) {
        platform.release(&self.pin);
    }

    fn slot(&mut self, hook: Hook) -> &mut Slot<'a, T> {
        &mut self.slots[hook.index()]
    }

    fn read(&self, platform: &mut P) -> Result<Level, Error<P::Error>> {
        platform
            .read_level(&self.pin)
            .map_err(Error::HardwareUnavailable)
    }
}

impl<P, T> fmt::Debug for Button<'_, P, T>
where
    P: Platform,
    P::Pin: fmt::Debug,
{
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "Button(pin: {:?}, pressed: {:?}, last press: {:?})",
            self.pin, self.pressed_level, self.last_press_duration
        )
    }
}
