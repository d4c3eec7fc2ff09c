//! Phase sequencer
//!
//! Decides, once per tick, which device actions to issue for the active
//! phase and step. Guards that are not yet satisfied hold the current step
//! and are re-evaluated on the next tick; nothing ever blocks.

pub mod action;
pub mod executor;
pub mod sensors;

pub use action::{stop_actions, Action, Outcome, MAX_ACTIONS};
pub use executor::{Sequencer, SequencerState};
pub use sensors::{SensorSnapshot, SensorView};
