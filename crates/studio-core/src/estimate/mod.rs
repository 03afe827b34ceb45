//! Cost estimator: wire types, presets, pricing table and form state.

pub mod currency;
mod form;
mod model;
mod preset;
mod pricing;

pub use form::{EstimateForm, FormEdit};
pub use model::{EstimateBody, EstimateResp, PricingEntry, Provider};
pub use preset::{
    CACHE_QUICK_PICKS, FieldHints, Preset, SAMPLE_NUMBERS, SampleNumbers, default_presets,
    find_preset, preset_hints,
};
pub use pricing::{DEFAULT_CURRENCY_SYMBOL, PriceBreakdown, PricingTable};
