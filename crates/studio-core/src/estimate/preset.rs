//! Named usage presets for the cost estimator.
//!
//! A preset bundles typical request volume and token counts for a use case
//! so the form can be filled in one step. Applying a preset overwrites
//! requests/day, input tokens, output tokens and cache hit rate; every other
//! field keeps its current value.

use serde::{Deserialize, Serialize};

/// A named bundle of form values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Stable identifier (e.g., "helpdesk")
    pub id: String,
    /// Display label of the preset
    pub label: String,
    pub requests_per_day: f64,
    pub avg_input_tokens: f64,
    pub avg_output_tokens: f64,
    pub cache_hit_rate: f64,
    /// What kind of traffic the numbers describe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Explanations shown under the numeric fields while a preset is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldHints {
    pub requests_per_day: Option<&'static str>,
    pub input_tokens: Option<&'static str>,
    pub output_tokens: Option<&'static str>,
}

/// Values behind the "Use sample numbers" shortcut.
pub const SAMPLE_NUMBERS: SampleNumbers = SampleNumbers {
    requests_per_day: 5000.0,
    avg_input_tokens: 300.0,
    avg_output_tokens: 500.0,
    cache_hit_rate: 0.2,
};

/// Cache hit rates offered as one-click choices.
pub const CACHE_QUICK_PICKS: [f64; 3] = [0.0, 0.2, 0.5];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleNumbers {
    pub requests_per_day: f64,
    pub avg_input_tokens: f64,
    pub avg_output_tokens: f64,
    pub cache_hit_rate: f64,
}

fn preset(
    id: &str,
    label: &str,
    (requests_per_day, avg_input_tokens, avg_output_tokens, cache_hit_rate): (f64, f64, f64, f64),
    note: &str,
) -> Preset {
    Preset {
        id: id.to_string(),
        label: label.to_string(),
        requests_per_day,
        avg_input_tokens,
        avg_output_tokens,
        cache_hit_rate,
        note: Some(note.to_string()),
    }
}

/// Returns the built-in presets in display order.
pub fn default_presets() -> Vec<Preset> {
    vec![
        preset(
            "helpdesk",
            "Helpdesk summaries",
            (2000.0, 1500.0, 120.0, 0.10),
            "Ticket thread + metadata → concise summary",
        ),
        preset(
            "product-desc",
            "Product descriptions",
            (800.0, 200.0, 120.0, 0.15),
            "Attributes + brief → 2–3 sentences",
        ),
        preset(
            "rag-qa",
            "RAG Q&A (internal)",
            (1200.0, 2000.0, 400.0, 0.20),
            "Query + retrieved snippets → short answer",
        ),
    ]
}

/// Looks up a built-in preset by id or (case-insensitive) label.
pub fn find_preset(key: &str) -> Option<Preset> {
    default_presets()
        .into_iter()
        .find(|p| p.id == key || p.label.eq_ignore_ascii_case(key))
}

/// Field hints for a preset id; unknown ids have none.
pub fn preset_hints(id: &str) -> FieldHints {
    let (rpd, inp, out) = match id {
        "helpdesk" => (
            "≈ average helpdesk volume for a medium-sized company",
            "≈ 1,100–1,300 words (~4–6 paragraphs) across thread + metadata",
            "≈ 2 short paragraphs (concise summary)",
        ),
        "product-desc" => (
            "≈ daily catalog enrichment throughput",
            "Structured attributes + short brief",
            "2–3 sentences product copy",
        ),
        "rag-qa" => (
            "Common internal Q&A usage across teams",
            "Query + 2–3 retrieved snippets",
            "Short direct answer",
        ),
        "meeting-notes" => (
            "Daily meetings across a small org",
            "Transcript chunk for 30–45 min meeting",
            "Bullets + action items",
        ),
        "code-review" => (
            "Active team with daily PRs",
            "Diff + rules; varies by PR size",
            "Targeted review comments",
        ),
        "emails" => (
            "Daily outbound variants across segments",
            "Brief + audience profile",
            "Customized email body",
        ),
        "translation" => (
            "Short docs or UI strings at scale",
            "Source text",
            "Translated text (similar length)",
        ),
        "doc-extract" => (
            "Forms/invoices pipeline throughput",
            "Page text + extraction schema",
            "Structured JSON fields",
        ),
        _ => return FieldHints::default(),
    };
    FieldHints {
        requests_per_day: Some(rpd),
        input_tokens: Some(inp),
        output_tokens: Some(out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_presets_have_unique_ids() {
        let presets = default_presets();
        let mut ids = std::collections::HashSet::new();
        for preset in &presets {
            assert!(
                ids.insert(preset.id.clone()),
                "Preset IDs must be unique, found duplicate: {}",
                preset.id
            );
        }
        assert_eq!(presets.len(), 3);
    }

    #[test]
    fn test_helpdesk_preset_configuration() {
        let helpdesk = find_preset("helpdesk").expect("Helpdesk preset should exist");
        assert_eq!(helpdesk.label, "Helpdesk summaries");
        assert_eq!(helpdesk.requests_per_day, 2000.0);
        assert_eq!(helpdesk.avg_input_tokens, 1500.0);
        assert_eq!(helpdesk.avg_output_tokens, 120.0);
        assert_eq!(helpdesk.cache_hit_rate, 0.10);
    }

    #[test]
    fn test_find_by_label() {
        let rag = find_preset("rag q&a (internal)").expect("lookup by label");
        assert_eq!(rag.id, "rag-qa");
        assert!(find_preset("unknown").is_none());
    }

    #[test]
    fn test_every_preset_has_hints() {
        for preset in default_presets() {
            let hints = preset_hints(&preset.id);
            assert!(hints.requests_per_day.is_some(), "{}", preset.id);
            assert!(hints.input_tokens.is_some(), "{}", preset.id);
            assert!(hints.output_tokens.is_some(), "{}", preset.id);
        }
        assert_eq!(preset_hints("nope"), FieldHints::default());
    }
}
