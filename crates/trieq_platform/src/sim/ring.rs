//! Analog ports backed by SPSC ring buffers
//!
//! A producer thread feeds `RingInput`; a consumer thread drains
//! `RingOutput`. Neither side ever blocks the sample loop.

use rtrb::{Consumer, Producer, RingBuffer};

use crate::traits::{AnalogIn, AnalogOut};

/// Create an input port and the producer that feeds it
///
/// Until the first sample arrives, and whenever the ring runs dry, the port
/// holds `idle_level`/the last sample read.
pub fn input_ring(capacity: usize, idle_level: f32) -> (Producer<f32>, RingInput) {
    let (producer, consumer) = RingBuffer::<f32>::new(capacity);
    (
        producer,
        RingInput {
            consumer,
            last: idle_level,
            underruns: 0,
        },
    )
}

/// Create an output port and the consumer that drains it
pub fn output_ring(capacity: usize) -> (RingOutput, Consumer<f32>) {
    let (producer, consumer) = RingBuffer::<f32>::new(capacity);
    (
        RingOutput {
            producer,
            overruns: 0,
        },
        consumer,
    )
}

/// ADC stand-in reading from a ring buffer
pub struct RingInput {
    consumer: Consumer<f32>,
    last: f32,
    underruns: u64,
}

impl RingInput {
    /// Reads that found the ring empty
    pub fn underruns(&self) -> u64 {
        self.underruns
    }

    /// Whether the producer side has been dropped
    pub fn is_abandoned(&self) -> bool {
        self.consumer.is_abandoned()
    }
}

impl AnalogIn for RingInput {
    #[inline]
    fn read(&mut self) -> f32 {
        match self.consumer.pop() {
            Ok(sample) => {
                self.last = sample;
                sample
            }
            Err(_) => {
                self.underruns += 1;
                self.last
            }
        }
    }
}

/// DAC stand-in writing into a ring buffer
pub struct RingOutput {
    producer: Producer<f32>,
    overruns: u64,
}

impl RingOutput {
    /// Writes dropped because the ring was full
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    pub fn is_abandoned(&self) -> bool {
        self.producer.is_abandoned()
    }
}

impl AnalogOut for RingOutput {
    #[inline]
    fn write(&mut self, value: f32) {
        if self.producer.push(value).is_err() {
            self.overruns += 1;
        }
    }
}
