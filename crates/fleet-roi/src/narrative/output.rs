use serde::{Deserialize, Serialize};

use super::sanitize::sanitize_neutral;

/// Section keys every report carries, in presentation order.
pub const REPORT_SECTIONS: [&str; 6] = [
    "roi",
    "tco",
    "owning_vs_operational",
    "break_even_point",
    "contribution_margin_per_km",
    "overall_insight",
];

/// Final six-section narrative returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeReport {
    pub roi: RoiNarrative,
    pub tco: TcoNarrative,
    pub owning_vs_operational: CostSplitNarrative,
    pub break_even_point: BreakEvenNarrative,
    pub contribution_margin_per_km: MarginNarrative,
    pub overall_insight: OverallInsight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiNarrative {
    pub percentage: String,
    pub category: String,
    pub short_sentence: String,
    pub insight_narrative: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TcoNarrative {
    pub amount_rp: String,
    pub category: String,
    pub short_sentence: String,
    pub insight_narrative: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSplitNarrative {
    pub owning_percentage: i64,
    pub operational_percentage: i64,
    pub category: String,
    pub short_sentence: String,
    pub cashflow_implication: String,
    pub pie_chart_data: PieChartData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieChartData {
    pub owning_cost: i64,
    pub operational_cost: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenNarrative {
    pub period: String,
    pub bep_km: String,
    pub category: String,
    pub short_sentence: String,
    pub monthly_simulation: MonthlySimulation,
    pub bep_insight: String,
}

/// Display strings for one month of cash flow; `Tidak berlaku (tanpa leasing)`
/// in every field when the unit is not leased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySimulation {
    pub installment: String,
    pub revenue: String,
    pub net_cashflow: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginNarrative {
    pub margin_rp: String,
    pub category: String,
    pub short_sentence: String,
    pub margin_insight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallInsight {
    pub summary: String,
    #[serde(default)]
    pub key_insight: String,
}

impl NarrativeReport {
    /// Run every free-text sentence through the neutrality filter. Labels,
    /// figures, and the monthly simulation are left untouched.
    pub fn sanitize_free_text(&mut self) {
        for text in [
            &mut self.roi.short_sentence,
            &mut self.roi.insight_narrative,
            &mut self.tco.short_sentence,
            &mut self.tco.insight_narrative,
            &mut self.owning_vs_operational.short_sentence,
            &mut self.owning_vs_operational.cashflow_implication,
            &mut self.break_even_point.short_sentence,
            &mut self.break_even_point.bep_insight,
            &mut self.contribution_margin_per_km.short_sentence,
            &mut self.contribution_margin_per_km.margin_insight,
            &mut self.overall_insight.summary,
            &mut self.overall_insight.key_insight,
        ] {
            *text = sanitize_neutral(text);
        }
    }
}
