//! Hosted Peripheral Simulation
//!
//! Software stand-ins for the board peripherals so the equalizer loop can
//! run on a desktop and under test:
//!
//! | Peripheral    | Simulation       | Backing                    |
//! |---------------|------------------|----------------------------|
//! | Timer         | `MonotonicClock` | `std::time::Instant`       |
//! | Timer (test)  | `ManualClock`    | `AtomicU64`, stepped by hand |
//! | Potentiometer | `SimKnob`        | `AtomicU32` (f32 bits)     |
//! | Mode switch   | `SimSwitch`      | `AtomicBool` + subscribers |
//! | Audio in/out  | `RingInput` / `RingOutput` | `rtrb` SPSC ring |
//! | LED           | `SimIndicator`   | `AtomicBool` + counter     |
//!
//! All handles are cheap to clone where the simulation needs a second owner
//! (a control thread turning a knob while the loop reads it).

mod clock;
mod indicator;
mod knob;
mod ring;
mod switch;

pub use clock::{ManualClock, MonotonicClock, MICROS_PER_SECOND};
pub use indicator::SimIndicator;
pub use knob::SimKnob;
pub use ring::{input_ring, output_ring, RingInput, RingOutput};
pub use switch::SimSwitch;
