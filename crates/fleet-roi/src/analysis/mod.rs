//! Metric categorization, formatting, and the intermediate analysis consumed by
//! the narrative layer.

pub mod batch;
pub mod domain;
pub mod format;
mod processor;
pub mod rules;
mod validation;
pub mod views;
mod warnings;

pub use batch::{read_batch, BatchError, BatchRow};
pub use domain::VehicleInput;
pub use processor::MetricProcessor;
pub use rules::{CategoryResult, MetricFamily};
pub use validation::{validate_payload, ValidationError};
pub use views::{
    BreakEvenSection, CostStructureSection, IntermediateAnalysis, MarginSection, RoiSection,
    TcoSection, UnitInfo,
};
pub use warnings::evaluate_dynamic_conditions;
