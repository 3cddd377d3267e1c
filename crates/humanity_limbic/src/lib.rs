//! # Humanity Limbic System
//!
//! Owns the agent's mood as a single point in PAD space and everything that
//! moves it:
//!
//! - **Stimuli**: discrete emotional events pull the mood toward fixed anchors
//! - **Decay**: every completed turn relaxes the mood toward neutral
//! - **Sensors**: auxiliary affect readings (e.g. a face camera) blend in at low weight
//!
//! It also hosts the idle-thought generator used while nobody is talking.

mod idle;
mod sensor;
mod system;

pub use idle::IdleThoughts;
pub use sensor::{SensorEmotion, SensorReading, SENSOR_BLEND_WEIGHT, SENSOR_MIN_CONFIDENCE};
pub use system::{AffectModel, DECAY_RATE, STIMULUS_GAIN};
