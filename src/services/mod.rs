// src/services/mod.rs
pub mod generator;
pub mod orchestrator;
pub mod persona;
pub mod synthesizer;
