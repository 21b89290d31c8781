//! Narrative synthesis: collaborator delegation, deterministic fallback, and
//! the business rules both paths must honour.

mod business;
mod fallback;
mod gateway;
mod output;
mod prompt;
mod sanitize;
mod simulation;
mod synthesizer;

pub use business::BusinessNarrative;
pub use fallback::{build_neutral_report, non_leasing_bep_sentence};
pub use gateway::{
    DisabledGateway, GatewayError, GeminiGateway, NarrativeGateway, NarrativeRequest,
};
pub use output::{
    BreakEvenNarrative, CostSplitNarrative, MarginNarrative, MonthlySimulation, NarrativeReport,
    OverallInsight, PieChartData, RoiNarrative, TcoNarrative, REPORT_SECTIONS,
};
pub use prompt::{build_prompt, SYSTEM_INSTRUCTION};
pub use sanitize::sanitize_neutral;
pub use simulation::{MonthlyCashflow, NOT_APPLICABLE};
pub use synthesizer::{NarrativeFailure, NarrativeSynthesizer};
