use serde::Serialize;

use crate::analysis::views::UnitInfo;

use super::output::NarrativeReport;

/// Markdown rendering of a finished report, one block per section. Every line
/// comes from the already sanitized report, so the text stays descriptive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessNarrative {
    #[serde(rename = "ROI")]
    pub roi: String,
    #[serde(rename = "TCO")]
    pub tco: String,
    #[serde(rename = "CostStructure")]
    pub cost_structure: String,
    #[serde(rename = "BreakEven")]
    pub break_even: String,
    #[serde(rename = "Margin")]
    pub margin: String,
    #[serde(rename = "Overall")]
    pub overall: String,
}

impl BusinessNarrative {
    pub fn render(report: &NarrativeReport, unit: &UnitInfo) -> Self {
        let roi = &report.roi;
        let tco = &report.tco;
        let split = &report.owning_vs_operational;
        let bep = &report.break_even_point;
        let margin = &report.contribution_margin_per_km;
        let overall = &report.overall_insight;
        let simulation = &bep.monthly_simulation;

        let monthly = if unit.uses_leasing {
            format!(
                "Simulasi bulanan: cicilan **{}**, pendapatan **{}**, net cashflow **{}**.",
                simulation.installment, simulation.revenue, simulation.net_cashflow
            )
        } else {
            format!("Simulasi bulanan: {}.", simulation.installment)
        };

        Self {
            roi: section(
                "ROI",
                &format!("{} | {}", roi.percentage, roi.category),
                &[roi.short_sentence.as_str(), roi.insight_narrative.as_str()],
            ),
            tco: section(
                "TCO",
                &format!("{} per km | {}", tco.amount_rp, tco.category),
                &[tco.short_sentence.as_str(), tco.insight_narrative.as_str()],
            ),
            cost_structure: section(
                "Owning vs Operational Cost",
                &format!(
                    "Owning {}% | Operational {}% | {}",
                    split.owning_percentage, split.operational_percentage, split.category
                ),
                &[split.short_sentence.as_str(), split.cashflow_implication.as_str()],
            ),
            break_even: section(
                "Break Even Point",
                &format!("{} | {} | {}", bep.period, bep.bep_km, bep.category),
                &[bep.short_sentence.as_str(), bep.bep_insight.as_str(), monthly.as_str()],
            ),
            margin: section(
                "Contribution Margin per KM",
                &format!("{} | {}", margin.margin_rp, margin.category),
                &[margin.short_sentence.as_str(), margin.margin_insight.as_str()],
            ),
            overall: format!(
                "### Overall Insight\n\n**{}** di segmen *{}*.\n{}\n**Key Insight:** {}",
                unit.name, unit.segment, overall.summary, overall.key_insight
            ),
        }
    }
}

fn section(title: &str, headline: &str, lines: &[&str]) -> String {
    let body: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| !line.is_empty())
        .collect();
    format!("### {title}\n\n**{headline}**\n{}", body.join("\n"))
}
