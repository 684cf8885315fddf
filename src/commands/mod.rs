//! Command implementations

pub mod export;

pub use export::run as export_run;
