use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use studio_core::estimate::{
    EstimateBody, EstimateForm, EstimateResp, FormEdit, PricingEntry, PricingTable, Provider,
};
use studio_core::{Result, StudioError};
use studio_interaction::{CostBackend, EstimateService};

fn entry(provider: Provider, model: &str) -> PricingEntry {
    PricingEntry {
        provider,
        model: model.to_string(),
        input_per_1k: 0.15,
        output_per_1k: 0.6,
        latency_ms: 400.0,
        currency: Some("EUR".to_string()),
    }
}

fn sample_response() -> EstimateResp {
    EstimateResp {
        cost_per_request: 0.01,
        daily_cost: 10.0,
        monthly_cost: 300.0,
        yearly_cost: 3650.0,
        tokens_in_per_req: 200.0,
        tokens_out_per_req: 300.0,
    }
}

struct MockCost {
    pricing: Result<PricingTable>,
    estimate: Result<EstimateResp>,
    calls: AtomicUsize,
}

impl MockCost {
    fn new(pricing: Result<PricingTable>, estimate: Result<EstimateResp>) -> Self {
        Self {
            pricing,
            estimate,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CostBackend for MockCost {
    async fn pricing(&self) -> Result<PricingTable> {
        self.pricing.clone()
    }

    async fn estimate(&self, _body: &EstimateBody) -> Result<EstimateResp> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.estimate.clone()
    }
}

fn table() -> PricingTable {
    PricingTable::new(vec![
        entry(Provider::OpenAi, "gpt-4o-mini"),
        entry(Provider::Anthropic, "claude-3-haiku"),
        entry(Provider::Anthropic, "claude-3-sonnet"),
    ])
}

#[tokio::test]
async fn test_pricing_load_reconciles_model() {
    let service = EstimateService::new(MockCost::new(Ok(table()), Ok(sample_response())));
    let mut form = EstimateForm::new();
    form.update(FormEdit::Provider(Provider::Anthropic));

    let loaded = service.load_pricing(&mut form).await;

    assert_eq!(loaded.map(|t| t.entries().len()), Some(3));
    assert_eq!(form.body().model, "claude-3-haiku");
    assert!(form.error().is_none());
}

#[tokio::test]
async fn test_pricing_load_keeps_priced_model() {
    let service = EstimateService::new(MockCost::new(Ok(table()), Ok(sample_response())));
    let mut form = EstimateForm::new();

    service.load_pricing(&mut form).await;

    assert_eq!(form.body().model, "gpt-4o-mini");
}

#[tokio::test]
async fn test_pricing_failure_is_reported() {
    let service = EstimateService::new(MockCost::new(
        Err(StudioError::http(502, None)),
        Ok(sample_response()),
    ));
    let mut form = EstimateForm::new();

    assert!(service.load_pricing(&mut form).await.is_none());
    assert_eq!(form.error(), Some("/pricing 502"));

    let service = EstimateService::new(MockCost::new(
        Err(StudioError::network("refused")),
        Ok(sample_response()),
    ));
    service.load_pricing(&mut form).await;
    assert_eq!(form.error(), Some("Failed to load pricing"));
}

#[tokio::test]
async fn test_submit_records_result() {
    let service = EstimateService::new(MockCost::new(Ok(table()), Ok(sample_response())));
    let mut form = EstimateForm::new();

    assert!(service.submit(&mut form).await);
    assert_eq!(form.result(), Some(&sample_response()));
    assert!(form.error().is_none());
}

#[tokio::test]
async fn test_failed_submit_keeps_form_values() {
    let service = EstimateService::new(MockCost::new(
        Ok(table()),
        Err(StudioError::http(500, Some("boom".into()))),
    ));
    let mut form = EstimateForm::new();
    form.update(FormEdit::RequestsPerDay(4200.0));
    let before = form.body().clone();

    assert!(!service.submit(&mut form).await);
    assert_eq!(form.error(), Some("estimate 500"));
    assert!(form.result().is_none());
    assert_eq!(form.body(), &before);
}

#[tokio::test]
async fn test_invalid_form_makes_no_request() {
    let backend = MockCost::new(Ok(table()), Ok(sample_response()));
    let service = EstimateService::new(backend);
    let mut form = EstimateForm::new();
    form.update(FormEdit::CacheHitRate(1.5));

    assert!(!service.submit(&mut form).await);
    assert_eq!(form.error(), Some("cache hit rate must be between 0 and 1"));
    assert_eq!(service.backend().calls.load(Ordering::SeqCst), 0);
}
