//! Core library for the LIHTC QAP score calculator.
//!
//! The `scoring` module carries the domain: project location state, static
//! reference data, state-specific scoring templates, the mock proximity
//! heuristic, and the score report generator. `config`, `telemetry`, and
//! `error` provide the shared runtime surface used by the API service.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
