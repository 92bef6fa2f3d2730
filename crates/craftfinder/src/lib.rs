//! CraftFinder: a short crafting-preference quiz and the engines that turn
//! its answers into a recommendation.

pub mod config;
pub mod error;
pub mod quiz;
pub mod telemetry;
