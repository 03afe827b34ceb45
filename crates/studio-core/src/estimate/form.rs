//! Local state of the cost estimation form.

use crate::error::{Result, StudioError};

use super::model::{EstimateBody, EstimateResp, PricingEntry, Provider};
use super::preset::{FieldHints, Preset, SAMPLE_NUMBERS, preset_hints};
use super::pricing::PricingTable;

/// One free-form edit of a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEdit {
    Provider(Provider),
    Model(String),
    RequestsPerDay(f64),
    InputTokens(f64),
    OutputTokens(f64),
    CacheHitRate(f64),
    Streaming(bool),
}

/// Form values plus the outcome of the last submission.
///
/// The body is only ever changed by explicit edits, presets or model
/// reconciliation. A failed submission leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EstimateForm {
    body: EstimateBody,
    active_preset: Option<Preset>,
    result: Option<EstimateResp>,
    error: Option<String>,
}

impl EstimateForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(body: EstimateBody) -> Self {
        Self {
            body,
            ..Self::default()
        }
    }

    pub fn body(&self) -> &EstimateBody {
        &self.body
    }

    pub fn result(&self) -> Option<&EstimateResp> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn active_preset(&self) -> Option<&Preset> {
        self.active_preset.as_ref()
    }

    pub fn preset_note(&self) -> Option<&str> {
        self.active_preset.as_ref().and_then(|p| p.note.as_deref())
    }

    /// Hints for the numeric fields; empty unless a preset is active.
    pub fn field_hints(&self) -> FieldHints {
        self.active_preset
            .as_ref()
            .map(|p| preset_hints(&p.id))
            .unwrap_or_default()
    }

    /// Overwrites requests/day, token counts and cache rate from `preset`.
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.body.requests_per_day = preset.requests_per_day;
        self.body.avg_input_tokens = preset.avg_input_tokens;
        self.body.avg_output_tokens = preset.avg_output_tokens;
        self.body.cache_hit_rate = preset.cache_hit_rate;
        self.active_preset = Some(preset.clone());
        self.clear_outcome();
    }

    pub fn apply_sample_numbers(&mut self) {
        self.body.requests_per_day = SAMPLE_NUMBERS.requests_per_day;
        self.body.avg_input_tokens = SAMPLE_NUMBERS.avg_input_tokens;
        self.body.avg_output_tokens = SAMPLE_NUMBERS.avg_output_tokens;
        self.body.cache_hit_rate = SAMPLE_NUMBERS.cache_hit_rate;
        self.active_preset = None;
        self.clear_outcome();
    }

    /// Applies a single field edit. The active preset stays selected so its
    /// hints remain visible; the previous result is discarded.
    pub fn update(&mut self, edit: FormEdit) {
        match edit {
            FormEdit::Provider(provider) => self.body.provider = provider,
            FormEdit::Model(model) => self.body.model = model,
            FormEdit::RequestsPerDay(v) => self.body.requests_per_day = v,
            FormEdit::InputTokens(v) => self.body.avg_input_tokens = v,
            FormEdit::OutputTokens(v) => self.body.avg_output_tokens = v,
            FormEdit::CacheHitRate(v) => self.body.cache_hit_rate = v,
            FormEdit::Streaming(v) => self.body.streaming = v,
        }
        self.clear_outcome();
    }

    /// Resets the model to the provider's first priced model when the
    /// current one is not in `pricing`. Returns true when the model changed.
    pub fn reconcile_model(&mut self, pricing: &PricingTable) -> bool {
        if pricing.find(self.body.provider, &self.body.model).is_some() {
            return false;
        }
        match pricing.first_model_for(self.body.provider) {
            Some(first) => {
                tracing::debug!(
                    provider = %self.body.provider,
                    from = %self.body.model,
                    to = %first.model,
                    "model not priced for provider, falling back"
                );
                self.body.model = first.model.clone();
                true
            }
            None => false,
        }
    }

    /// Pricing entry of the currently selected provider and model.
    pub fn selected_pricing<'a>(&self, pricing: &'a PricingTable) -> Option<&'a PricingEntry> {
        pricing.find(self.body.provider, &self.body.model)
    }

    /// Checks the body before it is sent.
    pub fn validate(&self) -> Result<()> {
        let b = &self.body;
        if b.model.trim().is_empty() {
            return Err(StudioError::validation("model must not be empty"));
        }
        if !(b.requests_per_day.is_finite() && b.requests_per_day > 0.0) {
            return Err(StudioError::validation("requests per day must be positive"));
        }
        if !(b.avg_input_tokens.is_finite() && b.avg_input_tokens >= 0.0) {
            return Err(StudioError::validation("input tokens must not be negative"));
        }
        if !(b.avg_output_tokens.is_finite() && b.avg_output_tokens >= 0.0) {
            return Err(StudioError::validation("output tokens must not be negative"));
        }
        if !(0.0..=1.0).contains(&b.cache_hit_rate) {
            return Err(StudioError::validation("cache hit rate must be between 0 and 1"));
        }
        Ok(())
    }

    pub fn record_result(&mut self, resp: EstimateResp) {
        self.error = None;
        self.result = Some(resp);
    }

    /// Records a failed submission; form values are kept as they are.
    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.result = None;
        self.error = Some(message.into());
    }

    fn clear_outcome(&mut self) {
        self.result = None;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::preset::find_preset;

    fn pricing() -> PricingTable {
        let entry = |provider, model: &str| PricingEntry {
            provider,
            model: model.to_string(),
            input_per_1k: 0.1,
            output_per_1k: 0.2,
            latency_ms: 300.0,
            currency: None,
        };
        PricingTable::new(vec![
            entry(Provider::OpenAi, "gpt-4o"),
            entry(Provider::OpenAi, "gpt-4o-mini"),
            entry(Provider::Anthropic, "claude-3-5-sonnet"),
            entry(Provider::Anthropic, "claude-3-haiku"),
        ])
    }

    fn sample_resp() -> EstimateResp {
        EstimateResp {
            cost_per_request: 0.01,
            daily_cost: 10.0,
            monthly_cost: 300.0,
            yearly_cost: 3650.0,
            tokens_in_per_req: 200.0,
            tokens_out_per_req: 300.0,
        }
    }

    #[test]
    fn test_helpdesk_preset_overrides_prior_values() {
        let mut form = EstimateForm::new();
        form.update(FormEdit::RequestsPerDay(42.0));
        form.update(FormEdit::InputTokens(7.0));
        form.update(FormEdit::CacheHitRate(0.0));
        form.update(FormEdit::Streaming(true));

        let helpdesk = find_preset("helpdesk").unwrap();
        form.apply_preset(&helpdesk);

        let body = form.body();
        assert_eq!(body.requests_per_day, 2000.0);
        assert_eq!(body.avg_input_tokens, 1500.0);
        assert_eq!(body.avg_output_tokens, 120.0);
        assert_eq!(body.cache_hit_rate, 0.10);
        // Fields outside the preset are kept.
        assert!(body.streaming);
        assert_eq!(body.model, "gpt-4o-mini");
        assert_eq!(
            form.preset_note(),
            Some("Ticket thread + metadata → concise summary")
        );
        assert!(form.field_hints().requests_per_day.is_some());
    }

    #[test]
    fn test_sample_numbers_clear_preset() {
        let mut form = EstimateForm::new();
        form.apply_preset(&find_preset("rag-qa").unwrap());
        form.apply_sample_numbers();
        assert_eq!(form.body().requests_per_day, 5000.0);
        assert_eq!(form.body().avg_output_tokens, 500.0);
        assert_eq!(form.body().cache_hit_rate, 0.2);
        assert!(form.active_preset().is_none());
        assert_eq!(form.field_hints(), FieldHints::default());
    }

    #[test]
    fn test_edit_clears_previous_result() {
        let mut form = EstimateForm::new();
        form.record_result(sample_resp());
        assert!(form.result().is_some());
        form.update(FormEdit::OutputTokens(10.0));
        assert!(form.result().is_none());
    }

    #[test]
    fn test_failure_leaves_form_untouched() {
        let mut form = EstimateForm::new();
        form.apply_preset(&find_preset("product-desc").unwrap());
        let before = form.body().clone();
        form.record_failure("Request failed");
        assert_eq!(form.body(), &before);
        assert_eq!(form.error(), Some("Request failed"));
        assert!(form.result().is_none());
    }

    #[test]
    fn test_reconcile_falls_back_to_first_model() {
        let table = pricing();
        let mut form = EstimateForm::new();
        assert!(!form.reconcile_model(&table));
        assert_eq!(form.body().model, "gpt-4o-mini");

        form.update(FormEdit::Provider(Provider::Anthropic));
        assert!(form.reconcile_model(&table));
        assert_eq!(form.body().model, "claude-3-5-sonnet");
        assert!(form.selected_pricing(&table).is_some());
    }

    #[test]
    fn test_reconcile_without_provider_models_keeps_model() {
        let mut form = EstimateForm::new();
        form.update(FormEdit::Provider(Provider::Mistral));
        assert!(!form.reconcile_model(&pricing()));
        assert_eq!(form.body().model, "gpt-4o-mini");
    }

    #[test]
    fn test_validate() {
        let mut form = EstimateForm::new();
        assert!(form.validate().is_ok());

        form.update(FormEdit::CacheHitRate(1.5));
        assert!(form.validate().unwrap_err().is_validation());

        form.update(FormEdit::CacheHitRate(0.5));
        form.update(FormEdit::RequestsPerDay(0.0));
        assert!(form.validate().is_err());

        form.update(FormEdit::RequestsPerDay(1.0));
        form.update(FormEdit::InputTokens(-1.0));
        assert!(form.validate().is_err());
    }
}
