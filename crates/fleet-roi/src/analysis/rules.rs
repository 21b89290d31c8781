//! Ordered categorization tables. Each table is evaluated top to bottom and the
//! first matching rule wins; boundaries are chosen so that every in-domain
//! value lands in exactly one bucket.

pub const UNCATEGORIZED_LABEL: &str = "Tidak Terkategori";

/// Edge of a rule's interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Unbounded,
    Inclusive(f64),
    Exclusive(f64),
}

impl Bound {
    fn admits_from_below(self, value: f64) -> bool {
        match self {
            Bound::Unbounded => true,
            Bound::Inclusive(edge) => value >= edge,
            Bound::Exclusive(edge) => value > edge,
        }
    }

    fn admits_from_above(self, value: f64) -> bool {
        match self {
            Bound::Unbounded => true,
            Bound::Inclusive(edge) => value <= edge,
            Bound::Exclusive(edge) => value < edge,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryRule {
    pub lower: Bound,
    pub upper: Bound,
    pub label: &'static str,
    pub message: &'static str,
}

impl CategoryRule {
    pub fn matches(&self, value: f64) -> bool {
        !value.is_nan() && self.lower.admits_from_below(value) && self.upper.admits_from_above(value)
    }
}

/// Metric families with a categorization table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricFamily {
    Roi,
    CostPerKm,
    BepYears,
    ContributionMargin,
    CostStructure,
}

impl MetricFamily {
    pub const ALL: [MetricFamily; 5] = [
        MetricFamily::Roi,
        MetricFamily::CostPerKm,
        MetricFamily::BepYears,
        MetricFamily::ContributionMargin,
        MetricFamily::CostStructure,
    ];

    pub fn rules(self) -> &'static [CategoryRule] {
        match self {
            MetricFamily::Roi => ROI_RULES,
            MetricFamily::CostPerKm => COST_PER_KM_RULES,
            MetricFamily::BepYears => BEP_YEARS_RULES,
            MetricFamily::ContributionMargin => CONTRIBUTION_MARGIN_RULES,
            MetricFamily::CostStructure => COST_STRUCTURE_RULES,
        }
    }

    fn uncategorized_message(self) -> &'static str {
        match self {
            MetricFamily::Roi => "ROI tidak dapat dikategorikan",
            MetricFamily::CostPerKm => "Biaya tidak dapat dikategorikan",
            MetricFamily::BepYears => "BEP tidak dapat dikategorikan",
            MetricFamily::ContributionMargin => "Margin tidak dapat dikategorikan",
            MetricFamily::CostStructure => "Struktur tidak dapat dikategorikan",
        }
    }

    pub fn categorize(self, value: f64) -> CategoryResult {
        self.rules()
            .iter()
            .find(|rule| rule.matches(value))
            .map(|rule| CategoryResult {
                label: rule.label,
                message: rule.message,
            })
            .unwrap_or(CategoryResult {
                label: UNCATEGORIZED_LABEL,
                message: self.uncategorized_message(),
            })
    }
}

/// Label plus the short fixed message attached to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryResult {
    pub label: &'static str,
    pub message: &'static str,
}

impl CategoryResult {
    pub fn is_uncategorized(&self) -> bool {
        self.label == UNCATEGORIZED_LABEL
    }
}

pub static ROI_RULES: &[CategoryRule] = &[
    CategoryRule {
        lower: Bound::Exclusive(1.5),
        upper: Bound::Unbounded,
        label: "Sangat Layak",
        message: "Pengembalian luar biasa di atas standar industri",
    },
    CategoryRule {
        lower: Bound::Exclusive(1.0),
        upper: Bound::Inclusive(1.5),
        label: "Layak",
        message: "Investasi sehat dengan margin memadai",
    },
    CategoryRule {
        lower: Bound::Exclusive(0.7),
        upper: Bound::Inclusive(1.0),
        label: "Perlu Dievaluasi",
        message: "Profit tipis dan sensitif terhadap fluktuasi",
    },
    CategoryRule {
        lower: Bound::Exclusive(0.5),
        upper: Bound::Inclusive(0.7),
        label: "Tidak Disarankan",
        message: "Pengembalian rendah dan berisiko",
    },
    CategoryRule {
        lower: Bound::Unbounded,
        upper: Bound::Inclusive(0.5),
        label: "Rugi",
        message: "Berpotensi rugi signifikan",
    },
];

// Published edges are whole rupiah (4800 / 4801, ...); fractional values
// between two edges go to the upper bucket.
pub static COST_PER_KM_RULES: &[CategoryRule] = &[
    CategoryRule {
        lower: Bound::Inclusive(0.0),
        upper: Bound::Inclusive(4800.0),
        label: "Sangat Efisien",
        message: "Biaya sangat rendah, keunggulan kompetitif",
    },
    CategoryRule {
        lower: Bound::Exclusive(4800.0),
        upper: Bound::Inclusive(5200.0),
        label: "Efisien",
        message: "Biaya kompetitif, aman untuk profit",
    },
    CategoryRule {
        lower: Bound::Exclusive(5200.0),
        upper: Bound::Inclusive(5500.0),
        label: "Kurang Efisien",
        message: "Biaya mulai menekan margin",
    },
    CategoryRule {
        lower: Bound::Exclusive(5500.0),
        upper: Bound::Unbounded,
        label: "Tidak Efisien",
        message: "Biaya tinggi, kurang kompetitif",
    },
];

pub static BEP_YEARS_RULES: &[CategoryRule] = &[
    CategoryRule {
        lower: Bound::Unbounded,
        upper: Bound::Inclusive(2.0),
        label: "Sangat Cepat",
        message: "Balik modal sangat cepat",
    },
    CategoryRule {
        lower: Bound::Exclusive(2.0),
        upper: Bound::Inclusive(3.0),
        label: "Cepat",
        message: "Waktu impas kompetitif",
    },
    CategoryRule {
        lower: Bound::Exclusive(3.0),
        upper: Bound::Inclusive(4.0),
        label: "Lambat",
        message: "Balik modal lama",
    },
    CategoryRule {
        lower: Bound::Exclusive(4.0),
        upper: Bound::Unbounded,
        label: "Sangat Lambat",
        message: "Balik modal terlalu lama",
    },
];

pub static CONTRIBUTION_MARGIN_RULES: &[CategoryRule] = &[
    CategoryRule {
        lower: Bound::Inclusive(6000.0),
        upper: Bound::Unbounded,
        label: "Sangat Tinggi",
        message: "Margin kuat dan tahan fluktuasi",
    },
    CategoryRule {
        lower: Bound::Inclusive(5500.0),
        upper: Bound::Exclusive(6000.0),
        label: "Tinggi",
        message: "Margin sehat dan stabil",
    },
    CategoryRule {
        lower: Bound::Inclusive(5000.0),
        upper: Bound::Exclusive(5500.0),
        label: "Cukup",
        message: "Margin moderat",
    },
    CategoryRule {
        lower: Bound::Unbounded,
        upper: Bound::Exclusive(5000.0),
        label: "Rendah",
        message: "Margin tipis",
    },
];

pub static COST_STRUCTURE_RULES: &[CategoryRule] = &[
    CategoryRule {
        lower: Bound::Inclusive(0.40),
        upper: Bound::Inclusive(0.60),
        label: "Seimbang",
        message: "Struktur sehat",
    },
    CategoryRule {
        lower: Bound::Exclusive(0.60),
        upper: Bound::Unbounded,
        label: "Owning Dominan",
        message: "CAPEX berat",
    },
    CategoryRule {
        lower: Bound::Unbounded,
        upper: Bound::Exclusive(0.40),
        label: "Operational Dominan",
        message: "OPEX berat",
    },
];

pub fn categorize_roi(roi: f64) -> CategoryResult {
    MetricFamily::Roi.categorize(roi)
}

pub fn categorize_cost_per_km(cost: f64) -> CategoryResult {
    MetricFamily::CostPerKm.categorize(cost)
}

pub fn categorize_bep(bep_years: f64) -> CategoryResult {
    MetricFamily::BepYears.categorize(bep_years)
}

pub fn categorize_contribution_margin(margin: f64) -> CategoryResult {
    MetricFamily::ContributionMargin.categorize(margin)
}

pub fn categorize_cost_structure(owning_pct: f64) -> CategoryResult {
    MetricFamily::CostStructure.categorize(owning_pct)
}
