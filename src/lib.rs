pub mod catalog;
pub mod chart;
pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod lines;
pub mod loader;
pub mod output;
pub mod record;
pub mod series;
pub mod session;
pub mod stats;
