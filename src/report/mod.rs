//! Governance report and exporter
//!
//! A [`GovernanceReport`] is a plain nested snapshot of every monitor's
//! summary, bounded history and the active configuration. [`ReportExporter`]
//! writes it as JSON and flattens the latest results into gauge series.

mod exporter;
mod types;

#[cfg(test)]
mod tests;

pub use exporter::ReportExporter;
pub use types::{
    BiasSection, DriftSection, EscalationSection, GaugeSample, GovernanceReport, ValidationSection,
};
