// src/learning/mod.rs — Pattern learning core

pub mod engine;
pub mod events;
pub mod extractor;
pub mod feedback;
pub mod miner;
pub mod pattern;
pub mod ranker;
pub mod scorer;
pub mod server;
