//! Control Panel - text commands standing in for the front panel
//!
//! One command per line:
//! - `low on|off`, `high on|off` flip a mode switch (firing its edge handlers)
//! - `knob <low-cut|high-cut|low-gain|mid-gain|high-gain> <0..1>` turns a knob

use std::str::FromStr;

use thiserror::Error;
use trieq_core::{ControlInputs, ModeSwitch};
use trieq_platform::sim::{SimKnob, SimSwitch};

/// The five front-panel knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Knob {
    LowCut,
    HighCut,
    LowGain,
    MidGain,
    HighGain,
}

impl FromStr for Knob {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low-cut" => Ok(Knob::LowCut),
            "high-cut" => Ok(Knob::HighCut),
            "low-gain" => Ok(Knob::LowGain),
            "mid-gain" => Ok(Knob::MidGain),
            "high-gain" => Ok(Knob::HighGain),
            other => Err(PanelError::UnknownKnob(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelCommand {
    Mode { switch: ModeSwitch, on: bool },
    Knob { knob: Knob, value: f32 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PanelError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Unknown knob: {0}")]
    UnknownKnob(String),

    #[error("Expected on|off, got: {0}")]
    InvalidLevel(String),

    #[error("Knob value must be a number in [0, 1], got: {0}")]
    InvalidValue(String),

    #[error("Missing argument for {0}")]
    MissingArgument(&'static str),

    #[error("Unexpected trailing input: {0}")]
    TrailingInput(String),
}

fn parse_level(word: Option<&str>, command: &'static str) -> Result<bool, PanelError> {
    match word {
        Some("on") => Ok(true),
        Some("off") => Ok(false),
        Some(other) => Err(PanelError::InvalidLevel(other.to_string())),
        None => Err(PanelError::MissingArgument(command)),
    }
}

fn parse_value(word: Option<&str>) -> Result<f32, PanelError> {
    let word = word.ok_or(PanelError::MissingArgument("knob"))?;
    match word.parse::<f32>() {
        Ok(value) if (0.0..=1.0).contains(&value) => Ok(value),
        _ => Err(PanelError::InvalidValue(word.to_string())),
    }
}

impl FromStr for PanelCommand {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let command = match words.next() {
            Some("low") => PanelCommand::Mode {
                switch: ModeSwitch::Low,
                on: parse_level(words.next(), "low")?,
            },
            Some("high") => PanelCommand::Mode {
                switch: ModeSwitch::High,
                on: parse_level(words.next(), "high")?,
            },
            Some("knob") => {
                let knob = words
                    .next()
                    .ok_or(PanelError::MissingArgument("knob"))?
                    .parse()?;
                PanelCommand::Knob {
                    knob,
                    value: parse_value(words.next())?,
                }
            }
            Some(other) => return Err(PanelError::UnknownCommand(other.to_string())),
            None => return Err(PanelError::Empty),
        };

        let rest: Vec<&str> = words.collect();
        if !rest.is_empty() {
            return Err(PanelError::TrailingInput(rest.join(" ")));
        }
        Ok(command)
    }
}

/// Handles onto the simulated switches and knobs
///
/// Clones share state with the scheduler's copies, so commands applied
/// here are seen by the loop.
#[derive(Clone)]
pub struct Panel {
    low: SimSwitch,
    high: SimSwitch,
    knobs: ControlInputs<SimKnob>,
}

impl Panel {
    /// Both switches off, cutoff knobs centred, gains fully up
    pub fn new() -> Self {
        Self {
            low: SimSwitch::new("low", false),
            high: SimSwitch::new("high", false),
            knobs: ControlInputs {
                low_cutoff: SimKnob::new(0.5),
                high_cutoff: SimKnob::new(0.5),
                low_gain: SimKnob::new(1.0),
                mid_gain: SimKnob::new(1.0),
                high_gain: SimKnob::new(1.0),
            },
        }
    }

    pub fn switch(&self, switch: ModeSwitch) -> &SimSwitch {
        match switch {
            ModeSwitch::Low => &self.low,
            ModeSwitch::High => &self.high,
        }
    }

    pub fn knob(&self, knob: Knob) -> &SimKnob {
        match knob {
            Knob::LowCut => &self.knobs.low_cutoff,
            Knob::HighCut => &self.knobs.high_cutoff,
            Knob::LowGain => &self.knobs.low_gain,
            Knob::MidGain => &self.knobs.mid_gain,
            Knob::HighGain => &self.knobs.high_gain,
        }
    }

    /// Knob handles for the parameter updater
    pub fn controls(&self) -> ControlInputs<SimKnob> {
        self.knobs.clone()
    }

    pub fn apply(&self, command: PanelCommand) {
        match command {
            PanelCommand::Mode { switch, on } => {
                self.switch(switch).set_level(on);
            }
            PanelCommand::Knob { knob, value } => self.knob(knob).set(value),
        }
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trieq_core::ModeController;
    use trieq_platform::{AnalogIn, BinarySwitch};

    #[test]
    fn test_parse_mode_commands() {
        assert_eq!(
            "low on".parse::<PanelCommand>(),
            Ok(PanelCommand::Mode {
                switch: ModeSwitch::Low,
                on: true
            })
        );
        assert_eq!(
            "  high   off ".parse::<PanelCommand>(),
            Ok(PanelCommand::Mode {
                switch: ModeSwitch::High,
                on: false
            })
        );
    }

    #[test]
    fn test_parse_knob_commands() {
        assert_eq!(
            "knob mid-gain 0.25".parse::<PanelCommand>(),
            Ok(PanelCommand::Knob {
                knob: Knob::MidGain,
                value: 0.25
            })
        );
        assert_eq!(
            "knob high-cut 1".parse::<PanelCommand>(),
            Ok(PanelCommand::Knob {
                knob: Knob::HighCut,
                value: 1.0
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<PanelCommand>(), Err(PanelError::Empty));
        assert_eq!(
            "mid on".parse::<PanelCommand>(),
            Err(PanelError::UnknownCommand("mid".into()))
        );
        assert_eq!(
            "low maybe".parse::<PanelCommand>(),
            Err(PanelError::InvalidLevel("maybe".into()))
        );
        assert_eq!(
            "high".parse::<PanelCommand>(),
            Err(PanelError::MissingArgument("high"))
        );
        assert_eq!(
            "knob bass 0.5".parse::<PanelCommand>(),
            Err(PanelError::UnknownKnob("bass".into()))
        );
        assert_eq!(
            "knob low-cut 1.5".parse::<PanelCommand>(),
            Err(PanelError::InvalidValue("1.5".into()))
        );
        assert_eq!(
            "knob low-cut NaN".parse::<PanelCommand>(),
            Err(PanelError::InvalidValue("NaN".into()))
        );
        assert_eq!(
            "low on now".parse::<PanelCommand>(),
            Err(PanelError::TrailingInput("now".into()))
        );
    }

    #[test]
    fn test_apply_drives_mode_flags() {
        let panel = Panel::new();
        let modes = ModeController::new();
        modes.attach(ModeSwitch::Low, panel.switch(ModeSwitch::Low)).unwrap();
        modes.attach(ModeSwitch::High, panel.switch(ModeSwitch::High)).unwrap();

        panel.apply("high on".parse().unwrap());
        assert!(modes.snapshot().high);
        assert!(!modes.snapshot().low);
        assert!(panel.switch(ModeSwitch::High).read());

        panel.apply("high off".parse().unwrap());
        assert!(!modes.snapshot().high);
    }

    #[test]
    fn test_apply_turns_shared_knob() {
        let panel = Panel::new();
        let mut controls = panel.controls();

        panel.apply("knob low-gain 0.125".parse().unwrap());
        assert_eq!(controls.low_gain.read(), 0.125);
        assert_eq!(controls.high_gain.read(), 1.0);
    }
}
