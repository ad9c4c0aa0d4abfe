//! Sample Scheduler
//!
//! The fixed-period loop driving everything else. It busy-polls the
//! elapsed-time source and, each time one sample period has passed,
//! advances its sample boundary by exactly one period, runs the process
//! step, and services the indicator and control-update tick counters.
//!
//! Advancing by one period (rather than snapping to "now") keeps the
//! long-run sample count locked to the clock: a late iteration is paid
//! back by catch-up samples on the following polls instead of being
//! skipped.
//!
//! # Real-time Safety
//!
//! `poll()` never blocks, allocates or logs. Control updates recompute
//! filter coefficients on the same thread, between two samples.

use tracing::info;
use trieq_platform::{AnalogIn, AnalogOut, ElapsedClock, Indicator};

use crate::config::EngineConfig;
use crate::controls::{ControlInputs, ParameterUpdater};
use crate::error::{EngineError, EngineResult};
use crate::modes::ModeController;
use crate::process::EqProcessor;
use crate::timing::SampleTiming;

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Constructed, loop not started
    Idle,
    /// Sample boundary established, polling
    Running,
}

/// Counters accumulated since `start()`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Sample periods processed
    pub samples: u64,
    /// Parameter refreshes performed
    pub control_updates: u64,
    /// Indicator state changes
    pub indicator_toggles: u64,
    /// Samples processed while a further period was already due
    pub catch_up_samples: u64,
}

/// The board peripherals the loop drives directly
pub struct Peripherals<C, I, O, L> {
    pub clock: C,
    pub input: I,
    pub output: O,
    pub indicator: L,
}

pub struct SampleScheduler<C, I, O, L, K> {
    peripherals: Peripherals<C, I, O, L>,
    processor: EqProcessor,
    updater: ParameterUpdater<K>,
    timing: SampleTiming,
    control_divisor: u32,
    state: SchedulerState,
    /// Clock reading of the last sample boundary
    boundary: u64,
    ticks: u32,
    indicator_on: bool,
    stats: SchedulerStats,
}

impl<C, I, O, L, K> SampleScheduler<C, I, O, L, K>
where
    C: ElapsedClock,
    I: AnalogIn,
    O: AnalogOut,
    L: Indicator,
    K: AnalogIn,
{
    /// Build the scheduler
    ///
    /// The sample period is derived from the clock's resolution and the
    /// filters are designed at the resulting actual rate. `modes` must
    /// already be attached to its switches.
    pub fn new(
        config: &EngineConfig,
        peripherals: Peripherals<C, I, O, L>,
        controls: ControlInputs<K>,
        modes: &ModeController,
    ) -> EngineResult<Self> {
        config.validate()?;

        let timing = SampleTiming::new(
            config.target_sample_rate,
            peripherals.clock.ticks_per_second(),
        )?;
        let bank = config.build_filter_bank(timing.actual_rate())?;
        let processor = EqProcessor::new(bank, modes.flags(), config.dc_offset);
        let updater = ParameterUpdater::new(
            controls,
            config.low_cutoff_range,
            config.high_cutoff_range,
        )?;

        Ok(Self {
            peripherals,
            processor,
            updater,
            timing,
            control_divisor: config.control_update_divisor,
            state: SchedulerState::Idle,
            boundary: 0,
            ticks: 0,
            indicator_on: false,
            stats: SchedulerStats::default(),
        })
    }

    /// Establish the first sample boundary at the current clock reading
    pub fn start(&mut self) -> EngineResult<()> {
        if self.state == SchedulerState::Running {
            return Err(EngineError::AlreadyRunning);
        }

        self.indicator_on = false;
        self.peripherals.indicator.set(false);
        self.boundary = self.peripherals.clock.elapsed();
        self.state = SchedulerState::Running;

        info!(
            "Scheduler started: target {} Hz, actual {} Hz, period {} ticks",
            self.timing.target_rate(),
            self.timing.actual_rate(),
            self.timing.period_ticks()
        );
        Ok(())
    }

    /// One non-blocking loop iteration
    ///
    /// Returns whether a sample was processed. Does nothing while idle.
    ///
    /// # Real-time Safety
    /// No allocations, no locks, no logging.
    #[inline]
    pub fn poll(&mut self) -> bool {
        if self.state != SchedulerState::Running {
            return false;
        }

        let period = self.timing.period_ticks();
        let now = self.peripherals.clock.elapsed();
        if now.saturating_sub(self.boundary) < period {
            return false;
        }
        self.boundary += period;
        if now - self.boundary >= period {
            self.stats.catch_up_samples += 1;
        }

        let raw = self.peripherals.input.read();
        let out = self.processor.process(raw);
        self.peripherals.output.write(out);
        self.stats.samples += 1;

        self.ticks += 1;
        if self.ticks == self.timing.indicator_ticks() {
            self.indicator_on = !self.indicator_on;
            self.peripherals.indicator.set(self.indicator_on);
            self.stats.indicator_toggles += 1;
            self.ticks = 0;
        }
        if self.ticks % self.control_divisor == 0 {
            self.updater.update_controls(self.processor.bank_mut());
            self.stats.control_updates += 1;
        }

        true
    }

    /// Start and poll forever
    pub fn run(&mut self) -> EngineResult<std::convert::Infallible> {
        self.start()?;
        loop {
            if !self.poll() {
                std::hint::spin_loop();
            }
        }
    }

    /// Poll until `duration_ticks` clock ticks have elapsed
    ///
    /// Returns the number of samples processed during the call.
    pub fn run_for(&mut self, duration_ticks: u64) -> EngineResult<u64> {
        if self.state != SchedulerState::Running {
            return Err(EngineError::NotRunning);
        }

        let deadline = self.peripherals.clock.elapsed().saturating_add(duration_ticks);
        let before = self.stats.samples;
        while self.peripherals.clock.elapsed() < deadline {
            if !self.poll() {
                std::hint::spin_loop();
            }
        }
        Ok(self.stats.samples - before)
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    pub fn timing(&self) -> &SampleTiming {
        &self.timing
    }

    pub fn processor(&self) -> &EqProcessor {
        &self.processor
    }

    pub fn peripherals(&self) -> &Peripherals<C, I, O, L> {
        &self.peripherals
    }

    pub fn peripherals_mut(&mut self) -> &mut Peripherals<C, I, O, L> {
        &mut self.peripherals
    }
}
