// src/lib.rs — Library root for Lessonsmith

pub mod api;
pub mod cli;
pub mod infra;
pub mod learning;
pub mod storage;
