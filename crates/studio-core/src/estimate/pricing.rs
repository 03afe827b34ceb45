//! The pricing table served by `GET /pricing`.

use serde::{Deserialize, Serialize};

use super::model::{PricingEntry, Provider};

/// Currency symbol used when a pricing entry names none.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "€";

/// All known model prices, in server order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PricingTable {
    entries: Vec<PricingEntry>,
}

impl PricingTable {
    pub fn new(entries: Vec<PricingEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PricingEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of one provider, in table order.
    pub fn models_for(&self, provider: Provider) -> impl Iterator<Item = &PricingEntry> {
        self.entries.iter().filter(move |e| e.provider == provider)
    }

    pub fn find(&self, provider: Provider, model: &str) -> Option<&PricingEntry> {
        self.models_for(provider).find(|e| e.model == model)
    }

    pub fn first_model_for(&self, provider: Provider) -> Option<&PricingEntry> {
        self.models_for(provider).next()
    }

    /// Providers that have at least one entry, first-seen order.
    pub fn providers(&self) -> Vec<Provider> {
        let mut seen = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.provider) {
                seen.push(entry.provider);
            }
        }
        seen
    }
}

impl PricingEntry {
    pub fn currency_symbol(&self) -> &str {
        match self.currency.as_deref() {
            Some("EUR") | Some("eur") | None => DEFAULT_CURRENCY_SYMBOL,
            Some("USD") | Some("usd") => "$",
            Some(other) => other,
        }
    }

    /// `€0.15 in / €0.60 out per 1k tokens`
    pub fn unit_price_hint(&self) -> String {
        let cur = self.currency_symbol();
        format!(
            "{cur}{:.2} in / {cur}{:.2} out per 1k tokens",
            self.input_per_1k, self.output_per_1k,
        )
    }

    /// Input and output share of one uncached request.
    pub fn price_breakdown(&self, input_tokens: f64, output_tokens: f64) -> PriceBreakdown {
        let input = input_tokens / 1000.0 * self.input_per_1k;
        let output = output_tokens / 1000.0 * self.output_per_1k;
        PriceBreakdown {
            input,
            output,
            total: input + output,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBreakdown {
    pub input: f64,
    pub output: f64,
    pub total: f64,
}
