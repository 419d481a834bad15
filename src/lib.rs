//! Particle-flow reconstruction content algorithms over an in-memory event
//! store: visual monitoring of the event's object lists and cluster-list
//! preparation for particle-flow object creation, sequenced per event by a
//! configuration-driven pipeline.

pub mod algorithms;
pub mod config;
pub mod display;
pub mod errors;
pub mod event;
pub mod logging;
pub mod pipeline;
pub mod settings;
