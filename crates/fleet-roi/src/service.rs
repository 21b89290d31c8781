use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::analysis::{
    validate_payload, BatchRow, IntermediateAnalysis, MetricProcessor, ValidationError,
    VehicleInput,
};
use crate::narrative::{BusinessNarrative, NarrativeReport, NarrativeSynthesizer};

/// Body returned by `POST /analyze`: the six report sections at the top level
/// plus the markdown business narrative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResponse {
    #[serde(flatten)]
    pub report: NarrativeReport,
    pub business_narrative: BusinessNarrative,
}

/// Everything one evaluation produced, for callers that also render the
/// intermediate figures and advisories.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub analysis: IntermediateAnalysis,
    pub response: AnalysisResponse,
}

#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub row: usize,
    pub result: Result<Evaluation, ValidationError>,
}

/// Facade running validation, metric processing, and narrative synthesis.
#[derive(Debug, Clone)]
pub struct RoiAnalysisService {
    processor: MetricProcessor,
    synthesizer: NarrativeSynthesizer,
}

impl RoiAnalysisService {
    pub fn new(synthesizer: NarrativeSynthesizer) -> Self {
        Self {
            processor: MetricProcessor::new(),
            synthesizer,
        }
    }

    /// Validate a raw payload and analyze it. Only validation can fail.
    pub async fn analyze(&self, payload: &Value) -> Result<AnalysisResponse, ValidationError> {
        let input = validate_payload(payload)?;
        Ok(self.evaluate(&input).await.response)
    }

    pub async fn evaluate(&self, input: &VehicleInput) -> Evaluation {
        let analysis = self.processor.process(input);
        debug!(
            unit = %input.unit_name,
            warnings = analysis.dynamic_warnings.len(),
            roi_category = analysis.roi_analysis.category.label,
            "metrics processed"
        );

        let report = self.synthesizer.synthesize(&analysis, input).await;
        let business_narrative = BusinessNarrative::render(&report, &analysis.unit_info);

        Evaluation {
            analysis,
            response: AnalysisResponse {
                report,
                business_narrative,
            },
        }
    }

    /// Evaluate every valid row in order; invalid rows keep their validation
    /// error and do not stop the batch.
    pub async fn analyze_batch(&self, rows: Vec<BatchRow>) -> Vec<BatchEntry> {
        let mut entries = Vec::with_capacity(rows.len());
        for BatchRow { row, outcome } in rows {
            let result = match outcome {
                Ok(input) => Ok(self.evaluate(&input).await),
                Err(err) => Err(err),
            };
            entries.push(BatchEntry { row, result });
        }

        let failed = entries.iter().filter(|entry| entry.result.is_err()).count();
        info!(rows = entries.len(), failed, "batch analysis finished");
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::read_batch;
    use serde_json::json;

    fn service() -> RoiAnalysisService {
        RoiAnalysisService::new(NarrativeSynthesizer::offline())
    }

    #[tokio::test]
    async fn response_flattens_report_sections() {
        let payload = serde_json::to_value(VehicleInput::sample()).expect("sample serializes");
        let response = service().analyze(&payload).await.expect("sample analyzes");
        let body = serde_json::to_value(&response).expect("response serializes");

        for key in [
            "roi",
            "tco",
            "owning_vs_operational",
            "break_even_point",
            "contribution_margin_per_km",
            "overall_insight",
            "business_narrative",
        ] {
            assert!(body.get(key).is_some(), "missing {key}");
        }
        assert_eq!(body["roi"]["category"], "Layak");
    }

    #[tokio::test]
    async fn invalid_payload_is_rejected_before_processing() {
        let err = service()
            .analyze(&json!({ "unit_name": "Unit" }))
            .await
            .expect_err("invalid payload");
        assert!(err.details().len() > 10);
    }

    #[tokio::test]
    async fn evaluation_exposes_advisories() {
        let evaluation = service().evaluate(&VehicleInput::sample()).await;
        assert!(!evaluation.analysis.dynamic_warnings.is_empty());
        assert_eq!(evaluation.response.report.tco.category, "Efisien");
    }

    #[tokio::test]
    async fn batch_keeps_going_past_invalid_rows() {
        let csv = "unit_name,segment,unit_price,tco,annual_tco,cost_per_km,revenue_per_km,contribution_margin,total_revenue,roi,bep_years,bep_km\n\
                   ,Urban,1,1,1,1,1,1,1,1,1,1\n\
                   Unit B,Urban,800000000,1200000000,240000000,5000,7500,2500,1500000000,1.15,2.5,150000\n";
        let rows = read_batch(csv.as_bytes()).expect("csv parses");
        let entries = service().analyze_batch(rows).await;

        assert_eq!(entries.len(), 2);
        assert!(entries[0].result.is_err());
        let evaluation = entries[1].result.as_ref().expect("second row analyzed");
        assert_eq!(evaluation.analysis.unit_info.name, "Unit B");
    }
}
