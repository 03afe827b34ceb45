//! Card mapping of discovery insights and sentiment records.

use super::card::{Card, Section, labeled, section};
use crate::insight::{InsightReport, SentimentRecord};

/// Placeholder for a missing card title or preview.
pub const MISSING: &str = "—";

fn title(value: Option<&String>) -> String {
    value.cloned().unwrap_or_else(|| MISSING.to_string())
}

/// Sections of a discovery report, in display order. Empty categories are
/// left out entirely.
pub fn insight_sections(report: &InsightReport) -> Vec<Section> {
    [
        section("Pain Points", &report.pain_points, |pp| {
            Card::new(
                title(pp.description.as_ref()),
                [
                    labeled("Impact: ", pp.impact.as_ref()),
                    pp.quote.as_ref().map(|q| format!("“{q}”")),
                ],
            )
        }),
        section("Jobs-to-be-Done", &report.jobs_to_be_done, |j| {
            Card::new(
                title(j.functional_job.as_ref()),
                [
                    labeled("Emotional: ", j.emotional_job.as_ref()),
                    labeled("Context: ", j.context.as_ref()),
                ],
            )
        }),
        section("Workarounds", &report.workarounds, |w| {
            Card::new(
                title(w.what_they_do.as_ref()),
                [
                    labeled("Why: ", w.why_needed.as_ref()),
                    labeled("Cost: ", w.cost.as_ref()),
                ],
            )
        }),
        section("Desired Outcomes", &report.desired_outcomes, |d| {
            Card::new(
                title(d.outcome.as_ref()),
                [labeled("Gap: ", d.current_gap.as_ref())],
            )
        }),
        section("Behavioral Signals", &report.behavioral_signals, |b| {
            Card::new(
                title(b.observation.as_ref()),
                [labeled("Reveals: ", b.what_it_reveals.as_ref())],
            )
        }),
        section("Mental Models", &report.mental_models, |m| {
            Card::new(
                title(m.description.as_ref()),
                [
                    labeled("Metaphor: ", m.metaphor_or_analogy.as_ref()),
                    labeled("Mismatch: ", m.mismatch_with_reality.as_ref()),
                ],
            )
        }),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// One card per sentiment record: `AAPL — 2024-05-01` with a
/// `positive · 82%` badge.
pub fn sentiment_cards(records: &[SentimentRecord]) -> Vec<Card> {
    records.iter().map(sentiment_card).collect()
}

fn sentiment_card(record: &SentimentRecord) -> Card {
    let header = format!(
        "{} — {}",
        record.asset_id.as_deref().unwrap_or(MISSING),
        record.date.as_deref().unwrap_or(MISSING)
    );
    let Some(insight) = record.insight.as_ref() else {
        return Card::new(header, []);
    };

    let badge = match (insight.tone.as_ref(), insight.confidence_percent()) {
        (Some(tone), Some(pct)) => Some(format!("{tone} · {pct}%")),
        (Some(tone), None) => Some(tone.clone()),
        (None, Some(pct)) => Some(format!("{pct}%")),
        (None, None) => None,
    };

    Card::new(
        header,
        [
            insight.summary.clone(),
            labeled("method: ", insight.method.as_ref()),
        ],
    )
    .with_badge(badge)
    .with_list("Drivers", insight.drivers.as_deref())
    .with_list("Risks", insight.risks.as_deref())
}

/// Preview rows, or a single placeholder row when none arrived.
pub fn preview_lines(rows: Option<&[String]>) -> Vec<String> {
    match rows {
        Some(rows) if !rows.is_empty() => rows.to_vec(),
        _ => vec![MISSING.to_string()],
    }
}
