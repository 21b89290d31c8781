//! Indonesian display formatting for currency, ratios, durations, and distance.

const GROUP_SEPARATOR: char = '.';

/// `Rp 1.200.000.000`. Rounds half away from zero; non-finite values degrade
/// to a saturating integer cast instead of failing.
pub fn format_currency(value: f64) -> String {
    format!("Rp {}", group_thousands(to_whole(value)))
}

/// `1.25` with one decimal renders `125.0%`.
pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value * 100.0)
}

/// Split fractional years into whole years and rounded months, carrying a
/// rounded twelfth month into the next year.
pub fn format_bep_duration(bep_years: f64) -> String {
    let mut years = bep_years.trunc() as i64;
    let mut months = ((bep_years - bep_years.trunc()) * 12.0).round() as i64;
    if months == 12 {
        years += 1;
        months = 0;
    }

    if years == 0 {
        format!("{months} bulan")
    } else if months == 0 {
        format!("{years} tahun")
    } else {
        format!("{years} tahun {months} bulan")
    }
}

/// `150.000 km`.
pub fn format_distance(km: f64) -> String {
    format!("{} km", group_thousands(to_whole(km)))
}

/// Integer percentage for chart data (`0.55` -> `55`).
pub fn whole_percent(fraction: f64) -> i64 {
    to_whole(fraction * 100.0)
}

fn to_whole(value: f64) -> i64 {
    if value.is_finite() {
        value.round() as i64
    } else {
        value as i64
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }

    let lead = digits.len() % 3;
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (index + 3 - lead) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }
    grouped
}
