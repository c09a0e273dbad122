//! Capabilities the host platform provides to the control logic.

use core::ops::Not;
use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;

/// Raw level of a digital line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    High,
    Low,
}

impl Not for Level {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Level::High => Level::Low,
            Level::Low => Level::High,
        }
    }
}

/// Access to GPIO lines and time.
///
/// A single platform is usually shared by all the peripherals of the
/// device, each of them holding only the identifier of its pin.
pub trait Platform {
    /// Opaque identifier of a physical line, e.g. a header pin name.
    type Pin;
    type Error;

    /// Claim the line as a digital input. Claiming twice is allowed.
    ///
    /// # Errors
    ///
    /// Fails when the line cannot be accessed.
    fn configure_input(&mut self, pin: &Self::Pin) -> Result<(), Self::Error>;

    /// Claim the line as a digital output.
    ///
    /// # Errors
    ///
    /// Fails when the line cannot be accessed.
    fn configure_output(&mut self, pin: &Self::Pin) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Fails when the line cannot be read.
    fn read_level(&mut self, pin: &Self::Pin) -> Result<Level, Self::Error>;

    /// # Errors
    ///
    /// Fails when the line cannot be written.
    fn set_level(&mut self, pin: &Self::Pin, level: Level) -> Result<(), Self::Error>;

    /// Give up the claim on the line. Nothing to do for plain GPIO.
    fn release(&mut self, _pin: &Self::Pin) {}

    /// Block for at least the given duration.
    fn sleep(&mut self, duration: Duration);

    /// Monotonic time since an arbitrary epoch.
    fn now(&mut self) -> Duration;
}

/// Token checked by blocking loops to stop early.
pub trait Cancel {
    fn is_cancelled(&self) -> bool;
}

/// Token that never cancels.
#[derive(Debug, Default, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Never;

impl Cancel for Never {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl Cancel for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<C: Cancel + ?Sized> Cancel for &C {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}
