pub mod cards;
pub mod config;
