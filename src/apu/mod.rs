//! NES APU (Audio Processing Unit) emulation.
//!
//! - **Pulse** (×2): square waves with duty, envelope, sweep, length counter.
//! - **Noise**: LFSR-based, envelope, length counter.
//! - **Frame sequencer**: 4-step or 5-step mode; clocks envelopes, length counters and sweeps.
//! - **Mixer**: NES-style non-linear mix, sampled at a configurable rate (44.1 kHz default).
//!
//! Triangle and DMC are not implemented; their registers are ignored.

pub mod apu;
pub mod noise;
pub mod pulse;
pub mod units;
