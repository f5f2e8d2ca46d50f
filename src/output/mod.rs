//! Result records and their presentation

pub mod formatter;
pub mod report;
