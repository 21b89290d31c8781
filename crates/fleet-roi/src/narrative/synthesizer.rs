use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::analysis::domain::VehicleInput;
use crate::analysis::views::IntermediateAnalysis;
use crate::config::NarrativeConfig;

use super::fallback::{build_neutral_report, non_leasing_bep_sentence};
use super::gateway::{
    DisabledGateway, GatewayError, GeminiGateway, NarrativeGateway, NarrativeRequest,
};
use super::output::{NarrativeReport, REPORT_SECTIONS};
use super::prompt::{build_prompt, SYSTEM_INSTRUCTION};
use super::simulation::MonthlyCashflow;

/// Reasons a collaborator answer was discarded.
#[derive(Debug, thiserror::Error)]
pub enum NarrativeFailure {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("narrative collaborator timed out after {0:?}")]
    Timeout(Duration),
    #[error("narrative response is not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),
    #[error("narrative response is missing section '{0}'")]
    MissingSection(&'static str),
    #[error("narrative response does not match the report schema: {0}")]
    Schema(#[source] serde_json::Error),
}

/// Produces a complete [`NarrativeReport`] for every analysis, preferring the
/// collaborator and falling back to deterministic templates.
#[derive(Debug, Clone)]
pub struct NarrativeSynthesizer {
    gateway: Arc<dyn NarrativeGateway>,
    timeout: Duration,
}

impl NarrativeSynthesizer {
    pub fn new(gateway: Arc<dyn NarrativeGateway>, timeout: Duration) -> Self {
        Self { gateway, timeout }
    }

    /// Gemini when a credential is configured, deterministic-only otherwise.
    pub fn from_config(config: &NarrativeConfig) -> Result<Self, GatewayError> {
        let gateway: Arc<dyn NarrativeGateway> = match &config.api_key {
            Some(key) => Arc::new(GeminiGateway::new(key.clone(), config)?),
            None => {
                warn!("GEMINI_API_KEY not set; narratives will use deterministic templates");
                Arc::new(DisabledGateway)
            }
        };
        Ok(Self::new(gateway, config.timeout))
    }

    pub fn offline() -> Self {
        Self::new(Arc::new(DisabledGateway), NarrativeConfig::default().timeout)
    }

    /// Always returns a complete report. Collaborator failures are logged and
    /// replaced by the deterministic narrative.
    pub async fn synthesize(
        &self,
        analysis: &IntermediateAnalysis,
        input: &VehicleInput,
    ) -> NarrativeReport {
        match self.delegate(analysis, input).await {
            Ok(report) => report,
            Err(NarrativeFailure::Gateway(GatewayError::Disabled)) => {
                debug!(unit = %input.unit_name, "collaborator disabled; deterministic narrative");
                build_neutral_report(analysis, input)
            }
            Err(failure) => {
                warn!(
                    unit = %input.unit_name,
                    error = %failure,
                    "narrative collaborator failed; falling back to deterministic narrative"
                );
                build_neutral_report(analysis, input)
            }
        }
    }

    /// Collaborator path only. Any contract violation is returned as an error
    /// and nothing from the answer is kept.
    pub async fn delegate(
        &self,
        analysis: &IntermediateAnalysis,
        input: &VehicleInput,
    ) -> Result<NarrativeReport, NarrativeFailure> {
        let cashflow = MonthlyCashflow::compute(input);
        let request = NarrativeRequest {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            prompt: build_prompt(analysis, input, &cashflow),
        };

        let raw = tokio::time::timeout(self.timeout, self.gateway.generate(&request))
            .await
            .map_err(|_| NarrativeFailure::Timeout(self.timeout))??;

        let mut document = parse_document(&raw)?;
        for section in REPORT_SECTIONS {
            if !document.get(section).is_some_and(Value::is_object) {
                return Err(NarrativeFailure::MissingSection(section));
            }
        }

        enforce_business_rules(&mut document, analysis, &cashflow);

        let mut report: NarrativeReport =
            serde_json::from_value(document).map_err(NarrativeFailure::Schema)?;
        report.sanitize_free_text();
        Ok(report)
    }
}

fn parse_document(raw: &str) -> Result<Value, NarrativeFailure> {
    let trimmed = raw.trim();
    match serde_json::from_str(trimmed) {
        Ok(document) => Ok(document),
        Err(err) => match strip_code_fence(trimmed) {
            Some(inner) => serde_json::from_str(inner).map_err(NarrativeFailure::MalformedJson),
            None => Err(NarrativeFailure::MalformedJson(err)),
        },
    }
}

fn strip_code_fence(text: &str) -> Option<&str> {
    let (marker, start) = ["```json", "```"]
        .iter()
        .find_map(|marker| text.find(marker).map(|start| (*marker, start)))?;
    let body = &text[start + marker.len()..];
    let end = body.find("```").unwrap_or(body.len());
    Some(body[..end].trim())
}

/// Overwrite what the collaborator cannot be trusted with. Sections are known
/// to be objects at this point.
fn enforce_business_rules(
    document: &mut Value,
    analysis: &IntermediateAnalysis,
    cashflow: &MonthlyCashflow,
) {
    if let Some(split) = document
        .get_mut("owning_vs_operational")
        .and_then(Value::as_object_mut)
    {
        if !split.contains_key("pie_chart_data") {
            let owning = split.get("owning_percentage").cloned().unwrap_or(Value::Null);
            let operational = split
                .get("operational_percentage")
                .cloned()
                .unwrap_or(Value::Null);
            split.insert(
                "pie_chart_data".to_string(),
                json!({ "owning_cost": owning, "operational_cost": operational }),
            );
        }
    }

    if let Some(bep) = document
        .get_mut("break_even_point")
        .and_then(Value::as_object_mut)
    {
        let simulation = cashflow.simulation();
        bep.insert(
            "monthly_simulation".to_string(),
            json!({
                "installment": simulation.installment,
                "revenue": simulation.revenue,
                "net_cashflow": simulation.net_cashflow,
            }),
        );

        if !cashflow.is_leased() {
            let period = bep
                .get("period")
                .and_then(Value::as_str)
                .unwrap_or(&analysis.bep_analysis.years_formatted)
                .to_string();
            let category = bep
                .get("category")
                .and_then(Value::as_str)
                .unwrap_or(analysis.bep_analysis.category.label)
                .to_string();
            bep.insert(
                "bep_insight".to_string(),
                Value::String(non_leasing_bep_sentence(
                    &period,
                    &category,
                    &analysis.unit_info.name,
                )),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::MetricProcessor;
    use crate::narrative::simulation::NOT_APPLICABLE;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct ScriptedGateway {
        answer: Result<String, fn() -> GatewayError>,
        calls: AtomicUsize,
    }

    impl ScriptedGateway {
        fn text(text: &str) -> Self {
            Self {
                answer: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(error: fn() -> GatewayError) -> Self {
            Self {
                answer: Err(error),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl NarrativeGateway for ScriptedGateway {
        async fn generate(&self, _request: &NarrativeRequest) -> Result<String, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.answer {
                Ok(text) => Ok(text.clone()),
                Err(error) => Err(error()),
            }
        }
    }

    #[derive(Debug)]
    struct StalledGateway;

    #[async_trait]
    impl NarrativeGateway for StalledGateway {
        async fn generate(&self, _request: &NarrativeRequest) -> Result<String, GatewayError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok("{}".to_string())
        }
    }

    fn collaborator_answer() -> Value {
        json!({
            "roi": {
                "percentage": "115.0%",
                "category": "Layak",
                "short_sentence": "ROI berada pada kategori Layak",
                "insight_narrative": "Pengembalian stabil, namun sebaiknya dipantau."
            },
            "tco": {
                "amount_rp": "Rp 5.000",
                "category": "Efisien",
                "short_sentence": "Biaya per km efisien.",
                "insight_narrative": "Biaya terkendali."
            },
            "owning_vs_operational": {
                "owning_percentage": 65,
                "operational_percentage": 35,
                "category": "Owning Dominan",
                "short_sentence": "Owning lebih besar.",
                "cashflow_implication": "Beban tetap dominan."
            },
            "break_even_point": {
                "period": "2 tahun 6 bulan",
                "bep_km": "150.000 km",
                "category": "Cepat",
                "short_sentence": "BEP tercapai cepat.",
                "monthly_simulation": {
                    "installment": "Rp 99 per bulan",
                    "revenue": "Rp 99 per bulan",
                    "net_cashflow": "Rp 0 per bulan"
                },
                "bep_insight": "Arus kas bulanan mengikuti jadwal cicilan leasing."
            },
            "contribution_margin_per_km": {
                "margin_rp": "Rp 2.500",
                "category": "Rendah",
                "short_sentence": "Margin rendah.",
                "margin_insight": "Margin tipis. Strategi harga perlu ditinjau."
            },
            "overall_insight": {
                "summary": "Kinerja unit memadai.",
                "key_insight": "Selaras dengan kategori ROI Layak."
            }
        })
    }

    fn fixture(uses_leasing: bool) -> (IntermediateAnalysis, VehicleInput) {
        let input = VehicleInput {
            uses_leasing,
            ..VehicleInput::sample()
        };
        (MetricProcessor::new().process(&input), input)
    }

    fn synthesizer(gateway: impl NarrativeGateway + 'static) -> NarrativeSynthesizer {
        NarrativeSynthesizer::new(Arc::new(gateway), Duration::from_millis(200))
    }

    #[tokio::test]
    async fn collaborator_text_is_post_processed() {
        let (analysis, input) = fixture(true);
        let report = synthesizer(ScriptedGateway::text(&collaborator_answer().to_string()))
            .delegate(&analysis, &input)
            .await
            .expect("collaborator answer accepted");

        assert_eq!(report.roi.short_sentence, "ROI berada pada kategori Layak.");
        assert_eq!(report.roi.insight_narrative, "Pengembalian stabil.");
        assert_eq!(report.contribution_margin_per_km.margin_insight, "Margin tipis.");
        assert_eq!(report.owning_vs_operational.pie_chart_data.owning_cost, 65);
        assert_eq!(report.owning_vs_operational.pie_chart_data.operational_cost, 35);
        assert_eq!(
            report.break_even_point.monthly_simulation.installment,
            "Rp 20.000.000 per bulan"
        );
        assert_eq!(
            report.break_even_point.monthly_simulation.net_cashflow,
            "Rp 30.000.000 per bulan"
        );
        assert_eq!(
            report.break_even_point.bep_insight,
            "Arus kas bulanan mengikuti jadwal cicilan leasing."
        );
    }

    #[tokio::test]
    async fn non_leasing_overrides_collaborator_figures() {
        let (analysis, input) = fixture(false);
        let report = synthesizer(ScriptedGateway::text(&collaborator_answer().to_string()))
            .synthesize(&analysis, &input)
            .await;

        let simulation = &report.break_even_point.monthly_simulation;
        assert_eq!(simulation.installment, NOT_APPLICABLE);
        assert_eq!(simulation.revenue, NOT_APPLICABLE);
        assert_eq!(simulation.net_cashflow, NOT_APPLICABLE);
        assert_eq!(
            report.break_even_point.bep_insight,
            non_leasing_bep_sentence("2 tahun 6 bulan", "Cepat", "Truk Hino 500")
        );
        assert_eq!(report.roi.short_sentence, "ROI berada pada kategori Layak.");
    }

    #[tokio::test]
    async fn fenced_answer_is_unwrapped() {
        let (analysis, input) = fixture(true);
        let fenced = format!("Berikut hasilnya:\n```json\n{}\n```", collaborator_answer());
        let report = synthesizer(ScriptedGateway::text(&fenced))
            .delegate(&analysis, &input)
            .await
            .expect("fenced answer accepted");
        assert_eq!(report.tco.category, "Efisien");
    }

    #[tokio::test]
    async fn missing_section_is_rejected() {
        let (analysis, input) = fixture(true);
        let mut answer = collaborator_answer();
        answer
            .as_object_mut()
            .expect("object answer")
            .remove("overall_insight");

        let err = synthesizer(ScriptedGateway::text(&answer.to_string()))
            .delegate(&analysis, &input)
            .await
            .expect_err("incomplete answer rejected");
        assert!(matches!(
            err,
            NarrativeFailure::MissingSection("overall_insight")
        ));
    }

    #[tokio::test]
    async fn wrong_field_shape_is_rejected() {
        let (analysis, input) = fixture(true);
        let mut answer = collaborator_answer();
        answer["owning_vs_operational"]["owning_percentage"] = json!("enam puluh lima");

        let err = synthesizer(ScriptedGateway::text(&answer.to_string()))
            .delegate(&analysis, &input)
            .await
            .expect_err("schema mismatch rejected");
        assert!(matches!(err, NarrativeFailure::Schema(_)));
    }

    #[tokio::test]
    async fn malformed_answer_falls_back_completely() {
        let (analysis, input) = fixture(false);
        let gateway = synthesizer(ScriptedGateway::text("{\"roi\": {\"percentage\": "));
        let err = gateway
            .delegate(&analysis, &input)
            .await
            .expect_err("malformed answer rejected");
        assert!(matches!(err, NarrativeFailure::MalformedJson(_)));

        let report = gateway.synthesize(&analysis, &input).await;
        assert_eq!(report, build_neutral_report(&analysis, &input));
    }

    #[tokio::test]
    async fn blocked_answer_falls_back() {
        let (analysis, input) = fixture(true);
        let report = synthesizer(ScriptedGateway::failing(|| GatewayError::Blocked))
            .synthesize(&analysis, &input)
            .await;
        assert_eq!(report, build_neutral_report(&analysis, &input));
    }

    #[tokio::test]
    async fn stalled_collaborator_times_out() {
        let (analysis, input) = fixture(false);
        let stalled = synthesizer(StalledGateway);
        let err = stalled
            .delegate(&analysis, &input)
            .await
            .expect_err("timeout reported");
        assert!(matches!(err, NarrativeFailure::Timeout(_)));

        let report = stalled.synthesize(&analysis, &input).await;
        assert_eq!(
            report.break_even_point.monthly_simulation.installment,
            NOT_APPLICABLE
        );
        assert!(!report.overall_insight.summary.is_empty());
    }

    #[tokio::test]
    async fn offline_synthesizer_never_calls_out() {
        let (analysis, input) = fixture(true);
        let report = NarrativeSynthesizer::offline()
            .synthesize(&analysis, &input)
            .await;
        assert_eq!(report, build_neutral_report(&analysis, &input));
    }

    #[test]
    fn strips_plain_and_json_fences() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), Some("{\"a\":1}"));
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), Some("{\"a\":1}"));
        assert_eq!(strip_code_fence("{\"a\":1}"), None);
    }

    #[tokio::test]
    async fn gateway_is_called_once_per_report() {
        let (analysis, input) = fixture(true);
        let gateway = Arc::new(ScriptedGateway::text(&collaborator_answer().to_string()));
        let synthesizer = NarrativeSynthesizer::new(gateway.clone(), Duration::from_secs(1));
        synthesizer.synthesize(&analysis, &input).await;
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    }
}
