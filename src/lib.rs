pub mod algorithms;
pub mod comparison;
pub mod config;
pub mod controller;
pub mod error;
pub mod grid;
pub mod statistics;
