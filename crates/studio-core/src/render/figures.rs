//! Estimate response as labelled display rows.

use serde::Serialize;

use crate::estimate::EstimateResp;
use crate::estimate::currency::format_eur;

/// Fraction digits for the per-request figure.
pub const PER_REQUEST_DECIMALS: usize = 3;
/// Fraction digits for the daily/monthly/yearly figures.
pub const PERIOD_DECIMALS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub label: &'static str,
    pub value: String,
}

/// The four monetary figures followed by the token counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateFigures {
    pub costs: Vec<Figure>,
    pub tokens: Vec<Figure>,
}

impl EstimateFigures {
    pub fn from_response(resp: &EstimateResp) -> Self {
        let money = |label, amount: f64, decimals| Figure {
            label,
            value: format_eur(amount, decimals),
        };
        // Token counts are shown as the service sent them.
        let count = |label, value: f64| Figure {
            label,
            value: value.to_string(),
        };
        Self {
            costs: vec![
                money("Per request", resp.cost_per_request, PER_REQUEST_DECIMALS),
                money("Per day", resp.daily_cost, PERIOD_DECIMALS),
                money("Per month", resp.monthly_cost, PERIOD_DECIMALS),
                money("Per year", resp.yearly_cost, PERIOD_DECIMALS),
            ],
            tokens: vec![
                count("Input tokens / request", resp.tokens_in_per_req),
                count("Output tokens / request", resp.tokens_out_per_req),
            ],
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &Figure> {
        self.costs.iter().chain(self.tokens.iter())
    }
}
