//! Rule-based ROI categorization and narrative synthesis for logistics
//! vehicles.

pub mod analysis;
pub mod config;
pub mod error;
pub mod locale;
pub mod narrative;
pub mod router;
pub mod service;
pub mod telemetry;

pub use analysis::{IntermediateAnalysis, MetricProcessor, ValidationError, VehicleInput};
pub use narrative::{NarrativeReport, NarrativeSynthesizer};
pub use router::analysis_router;
pub use service::{AnalysisResponse, BatchEntry, Evaluation, RoiAnalysisService};
