use crate::infra::cli_service;
use chrono::{DateTime, Local};
use clap::Args;
use fleet_roi::analysis::{read_batch, validate_payload};
use fleet_roi::error::AppError;
use fleet_roi::{BatchEntry, Evaluation, VehicleInput};
use serde_json::Value;
use std::fmt::Write;
use std::fs::File;
use std::path::PathBuf;

const BAR_WIDTH: i64 = 40;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// JSON file holding one vehicle payload
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Skip the narrative collaborator and use deterministic text only
    #[arg(long)]
    pub(crate) offline: bool,
    /// Print the raw response JSON instead of the terminal report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with one vehicle per row, headers named after payload fields
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Skip the narrative collaborator and use deterministic text only
    #[arg(long)]
    pub(crate) offline: bool,
}

pub(crate) async fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.input)?;
    let payload: Value = serde_json::from_str(&raw)?;
    let input = validate_payload(&payload)?;

    let service = cli_service(args.offline)?;
    let evaluation = service.evaluate(&input).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&evaluation.response)?);
    } else {
        print!("{}", render_evaluation(&evaluation, Local::now()));
    }
    Ok(())
}

pub(crate) fn run_sample() -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(&VehicleInput::sample())?);
    Ok(())
}

pub(crate) async fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let rows = read_batch(File::open(&args.csv)?)?;
    let service = cli_service(args.offline)?;
    let entries = service.analyze_batch(rows).await;
    print!("{}", render_batch(&entries));
    Ok(())
}

pub(crate) fn render_evaluation(evaluation: &Evaluation, generated_at: DateTime<Local>) -> String {
    let unit = &evaluation.analysis.unit_info;
    let report = &evaluation.response.report;
    let mut out = String::new();

    writeln!(&mut out, "Analisis ROI Kendaraan: {} ({})", unit.name, unit.segment)
        .expect("write headline");
    writeln!(&mut out, "Harga unit: {}", unit.price).expect("write price");
    writeln!(
        &mut out,
        "Leasing: {}",
        if unit.uses_leasing { "Ya" } else { "Tidak" }
    )
    .expect("write leasing");
    writeln!(&mut out, "Dibuat: {}", generated_at.format("%Y-%m-%d %H:%M"))
        .expect("write timestamp");

    let roi = &report.roi;
    section(
        &mut out,
        "ROI",
        &format!("{} ({})", roi.percentage, roi.category),
        &[&roi.short_sentence, &roi.insight_narrative],
    );

    let tco = &report.tco;
    section(
        &mut out,
        "TCO per km",
        &format!("{} ({})", tco.amount_rp, tco.category),
        &[&tco.short_sentence, &tco.insight_narrative],
    );

    let split = &report.owning_vs_operational;
    section(
        &mut out,
        "Owning vs Operational",
        &split.category,
        &[&split.short_sentence, &split.cashflow_implication],
    );
    writeln!(
        &mut out,
        "  Owning      {:>3}% {}",
        split.pie_chart_data.owning_cost,
        bar(split.pie_chart_data.owning_cost)
    )
    .expect("write owning bar");
    writeln!(
        &mut out,
        "  Operational {:>3}% {}",
        split.pie_chart_data.operational_cost,
        bar(split.pie_chart_data.operational_cost)
    )
    .expect("write operational bar");

    let bep = &report.break_even_point;
    section(
        &mut out,
        "Break Even Point",
        &format!("{} | {} ({})", bep.period, bep.bep_km, bep.category),
        &[&bep.short_sentence, &bep.bep_insight],
    );
    let simulation = &bep.monthly_simulation;
    writeln!(&mut out, "  Cicilan bulanan:    {}", simulation.installment)
        .expect("write installment");
    writeln!(&mut out, "  Pendapatan bulanan: {}", simulation.revenue).expect("write revenue");
    writeln!(&mut out, "  Net cashflow:       {}", simulation.net_cashflow)
        .expect("write net cashflow");

    let margin = &report.contribution_margin_per_km;
    section(
        &mut out,
        "Contribution Margin per km",
        &format!("{} ({})", margin.margin_rp, margin.category),
        &[&margin.short_sentence, &margin.margin_insight],
    );

    let overall = &report.overall_insight;
    section(
        &mut out,
        "Overall Insight",
        &overall.key_insight,
        &[&overall.summary],
    );

    let warnings = &evaluation.analysis.dynamic_warnings;
    if warnings.is_empty() {
        writeln!(&mut out, "\nCatatan kondisi: tidak ada").expect("write empty advisories");
    } else {
        writeln!(&mut out, "\nCatatan kondisi").expect("write advisory heading");
        for warning in warnings {
            writeln!(&mut out, "- {warning}").expect("write advisory");
        }
    }

    out
}

pub(crate) fn render_batch(entries: &[BatchEntry]) -> String {
    let mut out = String::new();
    let mut failed = 0;

    for entry in entries {
        match &entry.result {
            Ok(evaluation) => {
                let analysis = &evaluation.analysis;
                writeln!(
                    &mut out,
                    "Baris {}: {} | ROI {} ({}) | BEP {} ({}) | {} catatan",
                    entry.row,
                    analysis.unit_info.name,
                    analysis.roi_analysis.value,
                    analysis.roi_analysis.category.label,
                    analysis.bep_analysis.years_formatted,
                    analysis.bep_analysis.category.label,
                    analysis.dynamic_warnings.len()
                )
                .expect("write batch row");
            }
            Err(err) => {
                failed += 1;
                writeln!(
                    &mut out,
                    "Baris {}: tidak valid ({})",
                    entry.row,
                    err.details().join("; ")
                )
                .expect("write invalid row");
            }
        }
    }

    writeln!(
        &mut out,
        "\n{} baris dianalisis, {} tidak valid",
        entries.len() - failed,
        failed
    )
    .expect("write batch totals");
    out
}

fn section(out: &mut String, title: &str, headline: &str, lines: &[&String]) {
    writeln!(out, "\n{title}: {headline}").expect("write section headline");
    for line in lines.iter().filter(|line| !line.is_empty()) {
        writeln!(out, "  {line}").expect("write section line");
    }
}

fn bar(percent: i64) -> String {
    let filled = (percent.clamp(0, 100) * BAR_WIDTH / 100) as usize;
    "#".repeat(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use fleet_roi::analysis::BatchRow;
    use fleet_roi::{NarrativeSynthesizer, RoiAnalysisService, ValidationError};

    fn service() -> RoiAnalysisService {
        RoiAnalysisService::new(NarrativeSynthesizer::offline())
    }

    fn timestamp() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 3, 1, 9, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[tokio::test]
    async fn terminal_report_lists_sections_and_advisories() {
        let evaluation = service().evaluate(&VehicleInput::sample()).await;
        let text = render_evaluation(&evaluation, timestamp());

        assert!(text.starts_with("Analisis ROI Kendaraan: Truk Hino 500 (Urban Logistics)\n"));
        assert!(text.contains("Dibuat: 2025-03-01 09:30"));
        assert!(text.contains("\nROI: 115.0% (Layak)\n"));
        assert!(text.contains("  Owning       65% "));
        assert!(text.contains("  Cicilan bulanan:    Tidak berlaku (tanpa leasing)"));
        assert!(text.contains("\nCatatan kondisi\n- Risiko Ketahanan Profit"));
    }

    #[tokio::test]
    async fn batch_summary_counts_invalid_rows() {
        let entries = service()
            .analyze_batch(vec![
                BatchRow {
                    row: 1,
                    outcome: Ok(VehicleInput::sample()),
                },
                BatchRow {
                    row: 2,
                    outcome: Err(ValidationError::Invalid {
                        details: vec!["tco is required".to_string()],
                    }),
                },
            ])
            .await;

        let text = render_batch(&entries);
        assert!(text.contains("Baris 1: Truk Hino 500 | ROI 115.0% (Layak)"));
        assert!(text.contains("Baris 2: tidak valid (tco is required)"));
        assert!(text.ends_with("1 baris dianalisis, 1 tidak valid\n"));
    }

    #[test]
    fn bar_scales_to_width() {
        assert_eq!(bar(50).len(), 20);
        assert_eq!(bar(0), "");
        assert_eq!(bar(150).len(), 40);
    }
}
