use crate::analysis::domain::VehicleInput;
use crate::analysis::format::{format_currency, whole_percent};
use crate::analysis::views::IntermediateAnalysis;

use super::output::{
    BreakEvenNarrative, CostSplitNarrative, MarginNarrative, NarrativeReport, OverallInsight,
    PieChartData, RoiNarrative, TcoNarrative,
};
use super::simulation::MonthlyCashflow;

const NON_LEASING_PHRASINGS: [&str; 10] = [
    "Periode {period} dikategorikan {category}. Simulasi bulanan tidak diterapkan karena tanpa leasing.",
    "BEP {period} termasuk {category}. Tidak ada simulasi cicilan bulanan (tanpa leasing).",
    "Estimasi balik modal {period}, kategori {category}. Simulasi bulanan tidak relevan (tanpa leasing).",
    "Balik modal diperkirakan {period} ({category}). Tidak ada komponen cicilan bulanan.",
    "Horizon BEP {period} diklasifikasikan {category}. Perhitungan arus kas bulanan tidak digunakan karena tidak ada leasing.",
    "Durasi BEP {period}: {category}. Simulasi cicilan bulanan tidak berlaku.",
    "Waktu impas {period} ({category}). Bagian simulasi bulanan diabaikan (tanpa leasing).",
    "Perkiraan BEP {period} pada kategori {category}. Tidak terdapat cicilan bulanan.",
    "BEP {period}: {category}. Modul simulasi bulanan tidak aktif (tanpa leasing).",
    "BEP {period} tergolong {category}. Simulasi bulanan tidak disertakan (non-leasing).",
];

/// Break-even sentence for units without leasing. The phrasing is chosen by a
/// stable hash of `seed` (the unit name); an empty seed always picks the first.
pub fn non_leasing_bep_sentence(period: &str, category: &str, seed: &str) -> String {
    let index = if seed.is_empty() {
        0
    } else {
        let digest = blake3::hash(seed.as_bytes());
        let mut word = [0_u8; 8];
        word.copy_from_slice(&digest.as_bytes()[..8]);
        (u64::from_le_bytes(word) % NON_LEASING_PHRASINGS.len() as u64) as usize
    };

    NON_LEASING_PHRASINGS[index]
        .replace("{period}", period)
        .replace("{category}", category)
}

/// Build the complete report from computed figures alone. Pure; never calls
/// out and never fails.
pub fn build_neutral_report(analysis: &IntermediateAnalysis, input: &VehicleInput) -> NarrativeReport {
    let roi = &analysis.roi_analysis;
    let tco = &analysis.tco_analysis;
    let split = &analysis.cost_structure;
    let bep = &analysis.bep_analysis;
    let margin = &analysis.margin_analysis;

    let cashflow = MonthlyCashflow::compute(input);
    let bep_insight = match cashflow.installment {
        Some(installment) => format!(
            "Periode {} dikategorikan {}. Simulasi bulanan: cicilan {}, pendapatan {}, net cashflow {}.",
            bep.years_formatted,
            bep.category.label,
            format_currency(installment),
            format_currency(cashflow.revenue),
            format_currency(cashflow.net),
        ),
        None => non_leasing_bep_sentence(
            &bep.years_formatted,
            bep.category.label,
            &analysis.unit_info.name,
        ),
    };

    let owning = whole_percent(input.owning_pct);
    let operational = whole_percent(input.operational_pct);

    let mut report = NarrativeReport {
        roi: RoiNarrative {
            percentage: roi.value.clone(),
            category: roi.category.label.to_string(),
            short_sentence: format!(
                "ROI tercatat {} dengan kategori {}.",
                roi.value, roi.category.label
            ),
            insight_narrative: format!(
                "Nilai ROI {} merefleksikan kinerja pengembalian sesuai kategori {} berdasarkan indikator internal.",
                roi.value, roi.category.label
            ),
        },
        tco: TcoNarrative {
            amount_rp: tco.per_km.clone(),
            category: tco.efficiency.label.to_string(),
            short_sentence: format!(
                "Biaya operasional per kilometer {} dengan klasifikasi {}.",
                tco.per_km, tco.efficiency.label
            ),
            insight_narrative: format!(
                "Biaya per kilometer {} menunjukkan tingkat efisiensi operasional pada kategori {} menurut parameter yang digunakan.",
                tco.per_km, tco.efficiency.label
            ),
        },
        owning_vs_operational: CostSplitNarrative {
            owning_percentage: owning,
            operational_percentage: operational,
            category: split.structure.label.to_string(),
            short_sentence: format!(
                "Komposisi biaya: Owning {}, Operational {} ({}).",
                split.owning_percentage, split.operational_percentage, split.structure.label
            ),
            cashflow_implication: format!(
                "Komposisi tersebut mencerminkan struktur biaya pada kategori {} sesuai pembobotan persentase.",
                split.structure.label
            ),
            pie_chart_data: PieChartData {
                owning_cost: owning,
                operational_cost: operational,
            },
        },
        break_even_point: BreakEvenNarrative {
            period: bep.years_formatted.clone(),
            bep_km: bep.kilometers.clone(),
            category: bep.category.label.to_string(),
            short_sentence: format!(
                "Perkiraan BEP {} dengan jarak {}.",
                bep.years_formatted, bep.kilometers
            ),
            monthly_simulation: cashflow.simulation(),
            bep_insight,
        },
        contribution_margin_per_km: MarginNarrative {
            margin_rp: margin.per_km.clone(),
            category: margin.category.label.to_string(),
            short_sentence: format!(
                "Margin kontribusi per km {} (kategori {}).",
                margin.per_km, margin.category.label
            ),
            margin_insight: format!(
                "Nilai margin {} menggambarkan kontribusi per kilometer sesuai kategori {} berdasarkan perhitungan internal.",
                margin.per_km, margin.category.label
            ),
        },
        overall_insight: OverallInsight {
            summary: format!(
                "Analisis menunjukkan ROI {}, biaya per kilometer {}, komposisi biaya Owning {} dan Operational {}, serta perkiraan BEP {}. Informasi tersebut menggambarkan kondisi finansial unit berdasarkan parameter yang digunakan.",
                roi.value,
                tco.per_km,
                split.owning_percentage,
                split.operational_percentage,
                bep.years_formatted
            ),
            key_insight: format!(
                "Kondisi umum selaras dengan kategori ROI: {}.",
                roi.category.label
            ),
        },
    };

    report.sanitize_free_text();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::MetricProcessor;
    use crate::narrative::simulation::NOT_APPLICABLE;

    fn report_for(input: &VehicleInput) -> NarrativeReport {
        let analysis = MetricProcessor::new().process(input);
        build_neutral_report(&analysis, input)
    }

    #[test]
    fn fills_every_section_from_computed_figures() {
        let input = VehicleInput {
            uses_leasing: true,
            owning_pct: 0.55,
            operational_pct: 0.45,
            ..VehicleInput::sample()
        };
        let report = report_for(&input);

        assert_eq!(report.roi.percentage, "115.0%");
        assert_eq!(report.roi.category, "Layak");
        assert_eq!(
            report.roi.short_sentence,
            "ROI tercatat 115.0% dengan kategori Layak."
        );
        assert_eq!(report.tco.amount_rp, "Rp 5.000");
        assert_eq!(report.owning_vs_operational.owning_percentage, 55);
        assert_eq!(
            report.owning_vs_operational.pie_chart_data,
            PieChartData {
                owning_cost: 55,
                operational_cost: 45
            }
        );
        assert_eq!(report.break_even_point.period, "2 tahun 6 bulan");
        assert_eq!(
            report.break_even_point.monthly_simulation.installment,
            "Rp 20.000.000 per bulan"
        );
        assert!(report
            .break_even_point
            .bep_insight
            .contains("cicilan Rp 20.000.000"));
        assert_eq!(
            report.overall_insight.key_insight,
            "Kondisi umum selaras dengan kategori ROI: Layak."
        );
    }

    #[test]
    fn filtered_label_is_cut_in_sentences_but_kept_as_category() {
        let input = VehicleInput {
            roi: 0.6,
            ..VehicleInput::sample()
        };
        let report = report_for(&input);

        assert_eq!(report.roi.category, "Tidak Disarankan");
        assert_eq!(
            report.roi.short_sentence,
            "ROI tercatat 60.0% dengan kategori Tidak."
        );
        assert_eq!(
            report.roi.insight_narrative,
            "Nilai ROI 60.0% merefleksikan kinerja pengembalian sesuai kategori Tidak."
        );
        assert_eq!(
            report.overall_insight.key_insight,
            "Kondisi umum selaras dengan kategori ROI: Tidak."
        );
    }

    #[test]
    fn non_leasing_report_never_shows_monthly_figures() {
        let report = report_for(&VehicleInput::sample());
        let simulation = &report.break_even_point.monthly_simulation;
        assert_eq!(simulation.installment, NOT_APPLICABLE);
        assert_eq!(simulation.revenue, NOT_APPLICABLE);
        assert_eq!(simulation.net_cashflow, NOT_APPLICABLE);
        assert!(!report.break_even_point.bep_insight.contains("Rp"));
    }

    #[test]
    fn zero_break_even_horizon_is_handled() {
        let input = VehicleInput {
            uses_leasing: false,
            bep_years: 0.0,
            ..VehicleInput::sample()
        };
        let report = report_for(&input);
        assert_eq!(report.break_even_point.period, "0 bulan");
        assert_eq!(
            report.break_even_point.monthly_simulation.revenue,
            NOT_APPLICABLE
        );
    }

    #[test]
    fn phrasing_is_stable_per_unit_name() {
        let first = non_leasing_bep_sentence("2 tahun", "Cepat", "Truk Hino 500");
        let again = non_leasing_bep_sentence("2 tahun", "Cepat", "Truk Hino 500");
        assert_eq!(first, again);
        assert!(first.contains("2 tahun"));
        assert!(first.contains("Cepat"));
    }

    #[test]
    fn empty_seed_uses_first_phrasing() {
        assert_eq!(
            non_leasing_bep_sentence("3 tahun", "Cepat", ""),
            "Periode 3 tahun dikategorikan Cepat. Simulasi bulanan tidak diterapkan karena tanpa leasing."
        );
    }

    #[test]
    fn unit_names_spread_across_phrasings() {
        let distinct: std::collections::HashSet<String> = (0..40)
            .map(|unit| non_leasing_bep_sentence("1 tahun", "Sangat Cepat", &format!("Unit {unit}")))
            .collect();
        assert!(distinct.len() > 1);
    }

    #[test]
    fn sentences_pass_neutrality_filter_unchanged() {
        let report = report_for(&VehicleInput::sample());
        let mut again = report.clone();
        again.sanitize_free_text();
        assert_eq!(report, again);
    }
}
