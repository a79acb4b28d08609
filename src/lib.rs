//! Skirmish - turn-based tactical combat resolution

pub mod combat;
pub mod core;
pub mod ports;
