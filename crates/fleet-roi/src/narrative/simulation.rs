use crate::analysis::domain::VehicleInput;
use crate::analysis::format::format_currency;

use super::output::MonthlySimulation;

pub const NOT_APPLICABLE: &str = "Tidak berlaku (tanpa leasing)";

/// Monthly cash flow derived from the raw input. `installment` is `None` when
/// the unit is not leased, in which case net cash flow equals revenue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyCashflow {
    pub installment: Option<f64>,
    pub revenue: f64,
    pub net: f64,
}

impl MonthlyCashflow {
    pub fn compute(input: &VehicleInput) -> Self {
        // A non-positive horizon means there is nothing to spread revenue over.
        let revenue = if input.bep_years > 0.0 {
            input.total_revenue / (input.bep_years * 12.0)
        } else {
            0.0
        };

        if input.uses_leasing {
            let installment = input.annual_tco / 12.0;
            Self {
                installment: Some(installment),
                revenue,
                net: revenue - installment,
            }
        } else {
            Self {
                installment: None,
                revenue,
                net: revenue,
            }
        }
    }

    pub fn is_leased(&self) -> bool {
        self.installment.is_some()
    }

    /// Display record; every field reads "not applicable" without leasing.
    pub fn simulation(&self) -> MonthlySimulation {
        match self.installment {
            Some(installment) => MonthlySimulation {
                installment: per_month(installment),
                revenue: per_month(self.revenue),
                net_cashflow: per_month(self.net),
            },
            None => MonthlySimulation {
                installment: NOT_APPLICABLE.to_string(),
                revenue: NOT_APPLICABLE.to_string(),
                net_cashflow: NOT_APPLICABLE.to_string(),
            },
        }
    }

    pub(crate) fn prompt_line(&self) -> String {
        match self.installment {
            Some(installment) => format!(
                "Simulasi Bulanan: cicilan {}, pendapatan {}, net cashflow {}",
                format_currency(installment),
                format_currency(self.revenue),
                format_currency(self.net)
            ),
            None => "Simulasi Bulanan: tidak berlaku (tanpa leasing)".to_string(),
        }
    }
}

fn per_month(amount: f64) -> String {
    format!("{} per bulan", format_currency(amount))
}
