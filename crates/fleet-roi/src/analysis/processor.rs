use super::domain::VehicleInput;
use super::format::{format_bep_duration, format_currency, format_distance, format_percentage};
use super::rules::{
    categorize_bep, categorize_contribution_margin, categorize_cost_per_km,
    categorize_cost_structure, categorize_roi,
};
use super::views::{
    BreakEvenSection, CostStructureSection, IntermediateAnalysis, MarginSection, RoiSection,
    TcoSection, UnitInfo,
};
use super::warnings::evaluate_dynamic_conditions;

/// Stateless orchestrator combining formatting, rule tables, and dynamic
/// conditions into an [`IntermediateAnalysis`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricProcessor;

impl MetricProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&self, input: &VehicleInput) -> IntermediateAnalysis {
        IntermediateAnalysis {
            unit_info: UnitInfo {
                name: input.unit_name.clone(),
                segment: input.segment.clone(),
                price: format_currency(input.unit_price),
                uses_leasing: input.uses_leasing,
            },
            roi_analysis: RoiSection {
                value: format_percentage(input.roi, 1),
                category: categorize_roi(input.roi),
            },
            tco_analysis: TcoSection {
                total: format_currency(input.tco),
                annual: format_currency(input.annual_tco),
                per_km: format_currency(input.cost_per_km),
                efficiency: categorize_cost_per_km(input.cost_per_km),
            },
            cost_structure: CostStructureSection {
                owning_percentage: format_percentage(input.owning_pct, 0),
                operational_percentage: format_percentage(input.operational_pct, 0),
                structure: categorize_cost_structure(input.owning_pct),
            },
            bep_analysis: BreakEvenSection {
                years_formatted: format_bep_duration(input.bep_years),
                kilometers: format_distance(input.bep_km),
                category: categorize_bep(input.bep_years),
            },
            margin_analysis: MarginSection {
                per_km: format_currency(input.contribution_margin),
                revenue_per_km: format_currency(input.revenue_per_km),
                total_revenue: format_currency(input.total_revenue),
                category: categorize_contribution_margin(input.contribution_margin),
            },
            dynamic_warnings: evaluate_dynamic_conditions(input),
        }
    }
}
