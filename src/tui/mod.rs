//! Terminal stepper for the datapath.
//!
//! Provides an interactive terminal view with:
//! - Program listing with the next statement marked
//! - Register, bus and flag panels
//! - Memory view
//! - Execution trace and clock-driven run/pause

mod app;
mod ui;

pub use app::{StepperApp, run_stepper};
