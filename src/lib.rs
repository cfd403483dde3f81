//! AntiCopyPaster trigger core
//!
//! Flags freshly written code fragments whose size is anomalous compared
//! with the fragments already seen in the project, marking them as likely
//! copy-paste candidates. Feature extraction and presentation live
//! elsewhere; this crate only makes the decision.

pub mod config;
pub mod trigger;

pub use trigger::{MetricSource, MetricVector, TriggerEngine, TriggerError};
