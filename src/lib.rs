//! Time-off policy period and balance accrual engine.
//!
//! This crate computes the recurring accrual periods of an employee's
//! time-off policy assignments and the boundaries a balance ledger needs:
//! cycle starts, validity dates, and the windows to recalculate when an
//! assignment changes.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
