//! TriEQ Simulator - the equalizer loop on simulated peripherals
//!
//! The main thread runs the sample scheduler against a wall clock. Side
//! threads play the part of the outside world: a tone generator feeds the
//! input converter, a level meter drains the output converter, and a
//! stdin control panel flips switches and turns knobs.

mod panel;
mod signal;

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use rtrb::{Consumer, Producer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use trieq_core::{EngineConfig, ModeController, ModeSwitch, Peripherals, SampleScheduler};
use trieq_platform::sim::{input_ring, output_ring, MonotonicClock, SimIndicator};
use trieq_platform::ElapsedClock;

use crate::panel::{Panel, PanelCommand};
use crate::signal::{to_db, PeakMeter, ToneGenerator};

/// Ring capacity of both simulated converters (samples)
const RING_CAPACITY: usize = 4096;

/// Tone amplitude around the bias point
const TONE_AMPLITUDE: f32 = 0.25;

/// Back-off for side threads when their ring is full or empty
const IDLE_BACKOFF: Duration = Duration::from_millis(1);

#[derive(Parser)]
#[command(name = "trieq_sim")]
#[command(author, version, about = "Run the TriEQ loop on simulated peripherals", long_about = None)]
struct Args {
    /// Engine configuration (JSON); defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many seconds; runs until killed when omitted
    #[arg(short, long)]
    seconds: Option<f64>,

    /// Test tone frequency in Hz
    #[arg(short, long, default_value = "440")]
    tone: f32,
}

fn spawn_tone(
    mut producer: Producer<f32>,
    mut tone: ToneGenerator,
    running: Arc<AtomicBool>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("trieq-tone".into())
        .spawn(move || {
            while running.load(Ordering::Relaxed) {
                if producer.is_full() {
                    thread::sleep(IDLE_BACKOFF);
                    continue;
                }
                if producer.push(tone.next_sample()).is_err() {
                    break;
                }
            }
        })
}

fn spawn_meter(
    mut consumer: Consumer<f32>,
    mut meter: PeakMeter,
    running: Arc<AtomicBool>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("trieq-meter".into())
        .spawn(move || {
            while running.load(Ordering::Relaxed) {
                match consumer.pop() {
                    Ok(sample) => {
                        if let Some(peak) = meter.push(sample) {
                            info!("Output peak {:.4} ({:.1} dB)", peak, to_db(peak));
                        }
                    }
                    Err(_) => thread::sleep(IDLE_BACKOFF),
                }
            }
        })
}

/// Read panel commands from stdin until EOF
///
/// Not joined on shutdown: the thread is parked in a blocking read.
fn spawn_panel(panel: Panel) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("trieq-panel".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("Control panel input closed: {}", e);
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<PanelCommand>() {
                    Ok(command) => {
                        info!("Panel: {:?}", command);
                        panel.apply(command);
                    }
                    Err(e) => warn!("{}", e),
                }
            }
        })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trieq=info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {:?}", path))?,
        None => EngineConfig::default(),
    };

    info!("Starting TriEQ simulator");

    let panel = Panel::new();
    let modes = ModeController::new();
    modes.attach(ModeSwitch::Low, panel.switch(ModeSwitch::Low))?;
    modes.attach(ModeSwitch::High, panel.switch(ModeSwitch::High))?;

    let clock = MonotonicClock::new();
    let ticks_per_second = clock.ticks_per_second();
    let (feed, input) = input_ring(RING_CAPACITY, config.dc_offset);
    let (output, drain) = output_ring(RING_CAPACITY);
    let peripherals = Peripherals {
        clock,
        input,
        output,
        indicator: SimIndicator::new(),
    };

    let mut scheduler = SampleScheduler::new(&config, peripherals, panel.controls(), &modes)
        .context("Failed to build sample scheduler")?;
    let actual_rate = scheduler.timing().actual_rate();

    let running = Arc::new(AtomicBool::new(true));
    let tone = ToneGenerator::new(args.tone, actual_rate, TONE_AMPLITUDE, config.dc_offset);
    let meter = PeakMeter::new(config.dc_offset, scheduler.timing().indicator_ticks());

    let tone_thread = spawn_tone(feed, tone, Arc::clone(&running))?;
    let meter_thread = spawn_meter(drain, meter, Arc::clone(&running))?;
    spawn_panel(panel)?;

    let seconds = match args.seconds {
        Some(seconds) => seconds,
        None => match scheduler.run()? {},
    };

    scheduler.start()?;
    let duration_ticks = (seconds.max(0.0) * ticks_per_second as f64) as u64;
    let processed = scheduler.run_for(duration_ticks)?;

    running.store(false, Ordering::Relaxed);
    let _ = tone_thread.join();
    let _ = meter_thread.join();

    let stats = scheduler.stats();
    let peripherals = scheduler.peripherals();
    info!(
        "Processed {} samples ({} catch-up), {} control updates, {} indicator toggles",
        processed, stats.catch_up_samples, stats.control_updates, stats.indicator_toggles
    );
    info!(
        "Input underruns: {}, output overruns: {}",
        peripherals.input.underruns(),
        peripherals.output.overruns()
    );

    Ok(())
}
