//! Deterministic resume screening.
//!
//! Resume and job-description text is turned into comparable signals (skills, degrees,
//! years of experience) and scored with a banded rule pipeline whose every component is
//! reported back in the result.

pub mod config;
pub mod error;
pub mod screening;
pub mod telemetry;
