use crate::analysis::domain::VehicleInput;
use crate::analysis::format::whole_percent;
use crate::analysis::views::IntermediateAnalysis;

use super::simulation::MonthlyCashflow;

pub const SYSTEM_INSTRUCTION: &str = "Anda menghasilkan deskripsi objektif. \
Dilarang memberi saran, rekomendasi, atau ajakan bertindak. \
Seluruh keluaran harus netral dan informatif.";

/// Prompt embedding every computed metric and the exact JSON skeleton the
/// collaborator must fill.
pub fn build_prompt(
    analysis: &IntermediateAnalysis,
    input: &VehicleInput,
    cashflow: &MonthlyCashflow,
) -> String {
    let unit = &analysis.unit_info;
    let roi = &analysis.roi_analysis;
    let tco = &analysis.tco_analysis;
    let split = &analysis.cost_structure;
    let bep = &analysis.bep_analysis;
    let margin = &analysis.margin_analysis;
    let simulation = cashflow.simulation();
    let owning = whole_percent(input.owning_pct);
    let operational = whole_percent(input.operational_pct);
    let leasing = if input.uses_leasing { "Ya" } else { "Tidak" };

    format!(
        r#"PERAN: Anda adalah sistem peringkas data yang menghasilkan deskripsi objektif (bukan saran).

TUJUAN: Hasilkan ringkasan netral, singkat, dan jelas (tanpa rekomendasi/daftar).

DATA KENDARAAN:
- Nama: {name}
- Segmen: {segment}
- Harga Unit: {price}
- Menggunakan Leasing: {leasing}
- Residual Value: {residual}%

METRIK:
- ROI: {roi_value} [{roi_category}]
- TCO/km: {per_km} [{efficiency}]
- Struktur Biaya: Owning {owning_label}, Operational {operational_label} [{structure}]
- BEP: {period} [{bep_category}], {kilometers}
- Margin/km: {margin_value} [{margin_category}]
- {monthly_line}

INSTRUKSI OUTPUT (WAJIB):
- Keluaran hanya JSON, tanpa teks lain, tanpa daftar/bullet, tanpa saran/ajakan bertindak.
- Nada netral dan deskriptif.
- Format PASTI:

{{
  "roi": {{
    "percentage": "{roi_value}",
    "category": "{roi_category}",
    "short_sentence": "…",
    "insight_narrative": "…"
  }},
  "tco": {{
    "amount_rp": "{per_km}",
    "category": "{efficiency}",
    "short_sentence": "…",
    "insight_narrative": "…"
  }},
  "owning_vs_operational": {{
    "owning_percentage": {owning},
    "operational_percentage": {operational},
    "category": "{structure}",
    "short_sentence": "…",
    "cashflow_implication": "…",
    "pie_chart_data": {{
      "owning_cost": {owning},
      "operational_cost": {operational}
    }}
  }},
  "break_even_point": {{
    "period": "{period}",
    "bep_km": "{kilometers}",
    "category": "{bep_category}",
    "short_sentence": "…",
    "monthly_simulation": {{
      "installment": "{installment}",
      "revenue": "{revenue}",
      "net_cashflow": "{net_cashflow}"
    }},
    "bep_insight": "…"
  }},
  "contribution_margin_per_km": {{
    "margin_rp": "{margin_value}",
    "category": "{margin_category}",
    "short_sentence": "…",
    "margin_insight": "…"
  }},
  "overall_insight": {{
    "summary": "Paragraf ringkas (≤4 kalimat) bersifat deskriptif dan netral.",
    "key_insight": "1 kalimat simpulan faktual (mis. selaras dengan kategori ROI)."
  }}
}}"#,
        name = unit.name,
        segment = unit.segment,
        price = unit.price,
        leasing = leasing,
        residual = whole_percent(input.residual_value_pct),
        roi_value = roi.value,
        roi_category = roi.category.label,
        per_km = tco.per_km,
        efficiency = tco.efficiency.label,
        owning_label = split.owning_percentage,
        operational_label = split.operational_percentage,
        structure = split.structure.label,
        period = bep.years_formatted,
        bep_category = bep.category.label,
        kilometers = bep.kilometers,
        margin_value = margin.per_km,
        margin_category = margin.category.label,
        monthly_line = cashflow.prompt_line(),
        owning = owning,
        operational = operational,
        installment = simulation.installment,
        revenue = simulation.revenue,
        net_cashflow = simulation.net_cashflow,
    )
}
