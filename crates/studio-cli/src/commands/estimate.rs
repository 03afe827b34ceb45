use std::str::FromStr;

use clap::Args;
use colored::Colorize;
use studio_core::estimate::currency::{format_decimal, format_grouped};
use studio_core::estimate::{
    CACHE_QUICK_PICKS, EstimateForm, FormEdit, PricingTable, Provider, SAMPLE_NUMBERS,
    default_presets, find_preset,
};
use studio_core::render::EstimateFigures;
use studio_interaction::runner::PRICING_LOAD_FAILED;
use studio_interaction::EstimateService;

use crate::context::AppContext;
use crate::ui;

#[derive(Args, Debug, Default)]
pub struct EstimateArgs {
    /// openai, anthropic, meta or mistral
    #[arg(long, value_parser = Provider::from_str)]
    provider: Option<Provider>,

    #[arg(long)]
    model: Option<String>,

    /// Preset id or label, see `studio presets`
    #[arg(long)]
    preset: Option<String>,

    /// Start from the sample numbers instead of a preset
    #[arg(long, conflicts_with = "preset")]
    sample: bool,

    #[arg(long)]
    requests_per_day: Option<f64>,

    #[arg(long)]
    input_tokens: Option<f64>,

    #[arg(long)]
    output_tokens: Option<f64>,

    /// Cache hit rate between 0 and 1
    #[arg(long)]
    cache: Option<f64>,

    #[arg(long)]
    streaming: bool,
}

impl EstimateArgs {
    /// Field edits given explicitly, applied after any preset.
    fn edits(&self) -> Vec<FormEdit> {
        let mut edits = Vec::new();
        if let Some(model) = &self.model {
            edits.push(FormEdit::Model(model.clone()));
        }
        if let Some(v) = self.requests_per_day {
            edits.push(FormEdit::RequestsPerDay(v));
        }
        if let Some(v) = self.input_tokens {
            edits.push(FormEdit::InputTokens(v));
        }
        if let Some(v) = self.output_tokens {
            edits.push(FormEdit::OutputTokens(v));
        }
        if let Some(v) = self.cache {
            edits.push(FormEdit::CacheHitRate(v));
        }
        if self.streaming {
            edits.push(FormEdit::Streaming(true));
        }
        edits
    }
}

pub async fn run(ctx: &AppContext, args: EstimateArgs) {
    let service = EstimateService::new(ctx.cost_client());
    let mut form = EstimateForm::new();

    if let Some(provider) = args.provider {
        form.update(FormEdit::Provider(provider));
    }
    let pricing = service.load_pricing(&mut form).await;
    if let Some(message) = form.error() {
        ui::error(message);
    }

    if let Some(key) = &args.preset {
        match find_preset(key) {
            Some(preset) => form.apply_preset(&preset),
            None => {
                let ids: Vec<String> = default_presets().into_iter().map(|p| p.id).collect();
                ui::error(&format!("unknown preset '{key}' (known: {})", ids.join(", ")));
                return;
            }
        }
    } else if args.sample {
        form.apply_sample_numbers();
    }
    for edit in args.edits() {
        form.update(edit);
    }

    print_form(&form, pricing.as_ref());

    if service.submit(&mut form).await {
        if let Some(resp) = form.result() {
            ui::heading("Estimate");
            ui::print_figures(&EstimateFigures::from_response(resp));
        }
    } else if let Some(message) = form.error() {
        ui::error(message);
    }
}

fn print_form(form: &EstimateForm, pricing: Option<&PricingTable>) {
    let body = form.body();
    let hints = form.field_hints();

    ui::heading("Inputs");
    println!("  {:<18} {} / {}", "Model", body.provider, body.model.bold());
    if let Some(entry) = pricing.and_then(|table| form.selected_pricing(table)) {
        println!("  {:<18} {}", "", ui::muted(&entry.unit_price_hint()));
        let share = entry.price_breakdown(body.avg_input_tokens, body.avg_output_tokens);
        let cur = entry.currency_symbol();
        println!(
            "  {:<18} {}",
            "",
            ui::muted(&format!(
                "{cur}{} in + {cur}{} out = {cur}{} per uncached request",
                format_decimal(share.input, 4),
                format_decimal(share.output, 4),
                format_decimal(share.total, 4),
            ))
        );
    } else if pricing.is_some() {
        ui::notice(&format!("  no listed price for {}", body.model));
    }

    field("Requests / day", &format_grouped(body.requests_per_day), hints.requests_per_day);
    field("Input tokens", &format_grouped(body.avg_input_tokens), hints.input_tokens);
    field("Output tokens", &format_grouped(body.avg_output_tokens), hints.output_tokens);

    let picks: Vec<String> = CACHE_QUICK_PICKS
        .iter()
        .map(|p| format!("{:.0}%", p * 100.0))
        .collect();
    println!(
        "  {:<18} {:.0}%  {}",
        "Cache hit rate",
        body.cache_hit_rate * 100.0,
        ui::muted(&format!("(quick picks: {})", picks.join(" / ")))
    );
    println!("  {:<18} {}", "Streaming", if body.streaming { "yes" } else { "no" });

    if let Some(preset) = form.active_preset() {
        println!("\n  {} {}", "Preset:".bold(), preset.label);
    }
    if let Some(note) = form.preset_note() {
        println!("  {}", ui::muted(note));
    }
}

fn field(label: &str, value: &str, hint: Option<&str>) {
    match hint {
        Some(hint) => println!("  {label:<18} {value}  {}", ui::muted(hint)),
        None => println!("  {label:<18} {value}"),
    }
}

pub async fn pricing(ctx: &AppContext) {
    let service = EstimateService::new(ctx.cost_client());
    let mut scratch = EstimateForm::new();
    let Some(table) = service.load_pricing(&mut scratch).await else {
        ui::error(scratch.error().unwrap_or(PRICING_LOAD_FAILED));
        return;
    };
    print_pricing(&table);
}

fn print_pricing(table: &PricingTable) {
    if table.is_empty() {
        ui::notice("No prices published.");
        return;
    }
    for provider in table.providers() {
        ui::heading(&provider.to_string());
        for entry in table.models_for(provider) {
            println!(
                "  {:<28} {}  {}",
                entry.model,
                entry.unit_price_hint(),
                ui::muted(&format!("~{} ms", format_grouped(entry.latency_ms.round())))
            );
        }
    }
}

pub fn presets() {
    ui::heading("Presets");
    for preset in default_presets() {
        println!(
            "  {:<14} {}  {} req/day · {} in · {} out · cache {:.0}%",
            preset.id.bold(),
            preset.label,
            format_grouped(preset.requests_per_day),
            format_grouped(preset.avg_input_tokens),
            format_grouped(preset.avg_output_tokens),
            preset.cache_hit_rate * 100.0,
        );
        if let Some(note) = &preset.note {
            println!("  {:<14} {}", "", ui::muted(note));
        }
    }
    println!(
        "\n  {:<14} {} req/day · {} in · {} out · cache {:.0}%",
        "--sample".bold(),
        format_grouped(SAMPLE_NUMBERS.requests_per_day),
        format_grouped(SAMPLE_NUMBERS.avg_input_tokens),
        format_grouped(SAMPLE_NUMBERS.avg_output_tokens),
        SAMPLE_NUMBERS.cache_hit_rate * 100.0,
    );
}
