//! Simulated peripherals shared by unit tests.

use std::collections::VecDeque;
use std::time::Duration;

use embedded_hal::i2c::{self, I2c, Operation};
use embedded_hal::pwm::{self, SetDutyCycle};

use crate::platform::{Level, Platform};

pub type Pin = &'static str;

#[derive(Debug, PartialEq, Eq)]
pub struct HardwareFault;

/// Platform replaying scripted input samples.
///
/// Every read consumes one sample, once the script runs out the last
/// sample is repeated. The clock moves only when sleeping.
#[derive(Debug, Default)]
pub struct Simulation {
    samples: VecDeque<Level>,
    last: Option<Level>,
    pub reads: usize,
    pub clock: Duration,
    pub sleeps: usize,
    pub inputs: Vec<Pin>,
    pub outputs: Vec<Pin>,
    pub levels: Vec<(Pin, Level)>,
    pub releases: usize,
    pub broken: bool,
}

impl Simulation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_samples(samples: &[Level]) -> Self {
        Self {
            samples: samples.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl Platform for Simulation {
    type Pin = Pin;
    type Error = HardwareFault;

    fn configure_input(&mut self, pin: &Pin) -> Result<(), HardwareFault> {
        if self.broken {
            return Err(HardwareFault);
        }
        self.inputs.push(pin);
        Ok(())
    }

    fn configure_output(&mut self, pin: &Pin) -> Result<(), HardwareFault> {
        if self.broken {
            return Err(HardwareFault);
        }
        self.outputs.push(pin);
        Ok(())
    }

    fn read_level(&mut self, _pin: &Pin) -> Result<Level, HardwareFault> {
        if self.broken {
            return Err(HardwareFault);
        }
        self.reads += 1;
        if let Some(level) = self.samples.pop_front() {
            self.last = Some(level);
        }
        Ok(self.last.unwrap_or(Level::High))
    }

    fn set_level(&mut self, pin: &Pin, level: Level) -> Result<(), HardwareFault> {
        if self.broken {
            return Err(HardwareFault);
        }
        self.levels.push((pin, level));
        Ok(())
    }

    fn release(&mut self, _pin: &Pin) {
        self.releases += 1;
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps += 1;
        self.clock += duration;
    }

    fn now(&mut self) -> Duration {
        self.clock
    }
}

/// PWM output remembering every duty cycle, in percent.
#[derive(Debug, Default)]
pub struct RecordingPwm {
    pub duties: Vec<u16>,
}

impl pwm::ErrorType for RecordingPwm {
    type Error = core::convert::Infallible;
}

impl SetDutyCycle for RecordingPwm {
    fn max_duty_cycle(&self) -> u16 {
        100
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duties.push(duty);
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct BusFault;

impl i2c::Error for BusFault {
    fn kind(&self) -> i2c::ErrorKind {
        i2c::ErrorKind::Other
    }
}

/// I2C bus remembering every written frame.
#[derive(Debug, Default)]
pub struct RecordingI2c {
    pub writes: Vec<(u8, Vec<u8>)>,
    pub broken: bool,
}

impl RecordingI2c {
    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.writes.iter().map(|(_, bytes)| bytes.clone()).collect()
    }
}

impl i2c::ErrorType for RecordingI2c {
    type Error = BusFault;
}

impl I2c for RecordingI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.broken {
            return Err(BusFault);
        }
        for operation in operations {
            if let Operation::Write(bytes) = operation {
                self.writes.push((address, bytes.to_vec()));
            }
        }
        Ok(())
    }
}
