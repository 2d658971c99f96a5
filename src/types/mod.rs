pub mod appraisal;
pub mod config;
pub mod roster;
