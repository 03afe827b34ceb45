//! Pricing load and estimate submission for the cost form.

use studio_core::StudioError;
use studio_core::estimate::{EstimateForm, PricingTable};

use crate::cost::CostBackend;

pub const PRICING_LOAD_FAILED: &str = "Failed to load pricing";
pub const ESTIMATE_REQUEST_FAILED: &str = "Request failed";

pub struct EstimateService<B> {
    backend: B,
}

impl<B: CostBackend> EstimateService<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Loads the pricing table and reconciles the form's model with it.
    /// On failure the message is recorded on the form and `None` returned.
    pub async fn load_pricing(&self, form: &mut EstimateForm) -> Option<PricingTable> {
        match self.backend.pricing().await {
            Ok(table) => {
                if form.reconcile_model(&table) {
                    tracing::info!(model = %form.body().model, "model reset to first priced model");
                }
                Some(table)
            }
            Err(err) => {
                tracing::warn!(error = %err, "pricing unavailable");
                form.record_failure(failure_text("/pricing", &err, PRICING_LOAD_FAILED));
                None
            }
        }
    }

    /// Validates and submits the form. Returns true when a result was
    /// recorded; the form values are never changed here.
    pub async fn submit(&self, form: &mut EstimateForm) -> bool {
        if let Err(err) = form.validate() {
            form.record_failure(err.user_message());
            return false;
        }
        match self.backend.estimate(form.body()).await {
            Ok(resp) => {
                if !resp.is_well_formed() {
                    tracing::warn!(?resp, "estimate contains negative or non-finite figures");
                }
                form.record_result(resp);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "estimate failed");
                form.record_failure(failure_text("estimate", &err, ESTIMATE_REQUEST_FAILED));
                false
            }
        }
    }
}

/// `"<what> <status>"` for rejected requests, `fallback` otherwise.
fn failure_text(what: &str, err: &StudioError, fallback: &str) -> String {
    match err {
        StudioError::Http { status, .. } => format!("{what} {status}"),
        _ => fallback.to_string(),
    }
}
