use serde::Serialize;

pub const DEFAULT_RESIDUAL_VALUE_PCT: f64 = 0.30;

/// Financial profile of a single vehicle after it passed the validation gate.
///
/// The ten monetary/ratio fields are guaranteed strictly positive and the three
/// share fields lie within `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleInput {
    pub unit_name: String,
    pub segment: String,
    pub uses_leasing: bool,
    pub unit_price: f64,
    pub tco: f64,
    pub annual_tco: f64,
    pub cost_per_km: f64,
    pub revenue_per_km: f64,
    pub contribution_margin: f64,
    pub total_revenue: f64,
    pub roi: f64,
    pub bep_years: f64,
    pub bep_km: f64,
    pub owning_pct: f64,
    pub operational_pct: f64,
    pub residual_value_pct: f64,
}

impl VehicleInput {
    /// Demo profile used by the CLI `sample` command and tests.
    pub fn sample() -> Self {
        Self {
            unit_name: "Truk Hino 500".to_string(),
            segment: "Urban Logistics".to_string(),
            uses_leasing: false,
            unit_price: 800_000_000.0,
            tco: 1_200_000_000.0,
            annual_tco: 240_000_000.0,
            cost_per_km: 5_000.0,
            revenue_per_km: 7_500.0,
            contribution_margin: 2_500.0,
            total_revenue: 1_500_000_000.0,
            roi: 1.15,
            bep_years: 2.5,
            bep_km: 150_000.0,
            owning_pct: 0.65,
            operational_pct: 0.35,
            residual_value_pct: DEFAULT_RESIDUAL_VALUE_PCT,
        }
    }
}
