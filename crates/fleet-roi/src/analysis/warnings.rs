use super::domain::VehicleInput;

const PREMIUM_TCO_THRESHOLD: f64 = 1_500_000_000.0;

struct DynamicCondition {
    triggered: fn(&VehicleInput) -> bool,
    advisory: &'static str,
}

// Checks are independent; emitted advisories keep this order.
static DYNAMIC_CONDITIONS: [DynamicCondition; 7] = [
    DynamicCondition {
        triggered: |input| input.roi < 1.0,
        advisory: "Evaluasi Profitabilitas: ROI di bawah 100% menunjukkan investasi tidak menguntungkan. Pertimbangkan revisi strategi pricing atau efisiensi operasional.",
    },
    DynamicCondition {
        triggered: |input| input.bep_years > 3.0,
        advisory: "Risiko Durasi Balik Modal: Break-even point lebih dari 3 tahun meningkatkan eksposur risiko pasar dan teknologi. Evaluasi skenario worst-case.",
    },
    DynamicCondition {
        triggered: |input| input.contribution_margin < 5000.0,
        advisory: "Risiko Ketahanan Profit: Margin kontribusi rendah membuat bisnis rentan terhadap fluktuasi biaya operasional dan kompetisi harga.",
    },
    DynamicCondition {
        triggered: |input| input.owning_pct > 0.65,
        advisory: "Optimasi Struktur Modal: Owning cost dominan (>65%) - pertimbangkan opsi leasing atau perpanjangan masa pakai untuk mengurangi beban CAPEX.",
    },
    DynamicCondition {
        triggered: |input| input.cost_per_km > 5500.0,
        advisory: "Tinjauan Efisiensi: Biaya per km tinggi (>Rp 5.500) memerlukan audit operasional untuk identifikasi area penghematan biaya.",
    },
    DynamicCondition {
        triggered: |input| input.revenue_per_km < 7000.0,
        advisory: "Evaluasi Tarif: Revenue per km rendah (<Rp 7.000) - analisis kompetitif pricing dan potensi segmen premium diperlukan.",
    },
    DynamicCondition {
        triggered: |input| input.tco > PREMIUM_TCO_THRESHOLD,
        advisory: "Validasi Premium Investment: TCO tinggi (>Rp 1.5M) memerlukan justifikasi premium melalui revenue superior atau efisiensi operasional yang terbukti.",
    },
];

/// Scan raw input for threshold conditions that deserve an advisory note.
pub fn evaluate_dynamic_conditions(input: &VehicleInput) -> Vec<String> {
    DYNAMIC_CONDITIONS
        .iter()
        .filter(|condition| (condition.triggered)(input))
        .map(|condition| condition.advisory.to_string())
        .collect()
}
