//! Acoustic physics engine: panel absorption, reverberation time, speech
//! intelligibility and room modes.

pub mod absorption;
pub mod modes;
pub mod rt60;
pub mod sti;
pub mod treatment;
