//! Neutrality filter applied to every free-text sentence.

/// Advisory or action-oriented phrases. Text is cut at the earliest hit.
const ADVISORY_PHRASES: [&str; 15] = [
    "namun",
    "di sisi lain",
    "rekomendasi",
    "strategi",
    "harus",
    "segera",
    "prioritas",
    "tantangan",
    "disarankan",
    "anjurkan",
    "sebaiknya",
    "langkah",
    "action",
    "mitigasi",
    "optimasi",
];

/// Truncate at the first advisory phrase (case-insensitive), trim trailing
/// spaces, commas, periods, and newlines, then close with a single period.
/// Empty input, or input that starts with an advisory phrase, yields `""`.
pub fn sanitize_neutral(text: &str) -> String {
    let trimmed = text.trim();
    // ASCII lowering keeps byte offsets aligned with `trimmed`.
    let lowered = trimmed.to_ascii_lowercase();
    let cut = ADVISORY_PHRASES
        .iter()
        .filter_map(|phrase| lowered.find(phrase))
        .min()
        .unwrap_or(trimmed.len());

    let kept = trimmed[..cut].trim_end_matches([' ', '.', ',', '\n']);
    if kept.is_empty() {
        String::new()
    } else {
        format!("{kept}.")
    }
}
