use super::rules::CategoryResult;

#[derive(Debug, Clone, PartialEq)]
pub struct UnitInfo {
    pub name: String,
    pub segment: String,
    pub price: String,
    pub uses_leasing: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoiSection {
    pub value: String,
    pub category: CategoryResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TcoSection {
    pub total: String,
    pub annual: String,
    pub per_km: String,
    pub efficiency: CategoryResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CostStructureSection {
    pub owning_percentage: String,
    pub operational_percentage: String,
    pub structure: CategoryResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakEvenSection {
    pub years_formatted: String,
    pub kilometers: String,
    pub category: CategoryResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarginSection {
    pub per_km: String,
    pub revenue_per_km: String,
    pub total_revenue: String,
    pub category: CategoryResult,
}

/// Formatted, categorized view of one vehicle. Produced once per request and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct IntermediateAnalysis {
    pub unit_info: UnitInfo,
    pub roi_analysis: RoiSection,
    pub tco_analysis: TcoSection,
    pub cost_structure: CostStructureSection,
    pub bep_analysis: BreakEvenSection,
    pub margin_analysis: MarginSection,
    pub dynamic_warnings: Vec<String>,
}
