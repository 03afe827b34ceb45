//! Terminal rendering of cards, chips and panels.

use colored::{ColoredString, Colorize};
use studio_core::parking::StyledSegment;
use studio_core::render::{Card, EstimateFigures, Section};

pub fn heading(text: &str) {
    println!("\n{}", text.bright_magenta().bold());
}

pub fn error(message: &str) {
    eprintln!("{}", format!("Error: {message}").red());
}

pub fn notice(message: &str) {
    println!("{}", message.yellow());
}

pub fn muted(text: &str) -> ColoredString {
    text.dimmed()
}

/// One step chip, `[label]`.
pub fn chip(label: &str, done: bool) -> ColoredString {
    let text = format!("[{label}]");
    if done { text.green().bold() } else { text.cyan() }
}

pub fn print_card(card: &Card) {
    match &card.badge {
        Some(badge) => println!("  {}  {}", card.title.bold(), badge.yellow()),
        None => println!("  {}", card.title.bold()),
    }
    for line in &card.lines {
        println!("    {line}");
    }
    for list in &card.lists {
        println!("    {}", format!("{}:", list.label).dimmed());
        for item in &list.items {
            println!("      - {item}");
        }
    }
}

pub fn print_section(section: &Section) {
    println!("\n{}", section.heading().cyan().bold());
    for card in &section.cards {
        print_card(card);
    }
}

pub fn print_figures(figures: &EstimateFigures) {
    let width = figures.rows().map(|f| f.label.len()).max().unwrap_or(0);
    for figure in &figures.costs {
        println!("  {:<width$}  {}", figure.label, figure.value.green().bold());
    }
    for figure in &figures.tokens {
        println!("  {:<width$}  {}", figure.label, figure.value);
    }
}

/// Segment label drawn in its availability colour, with a bar whose length
/// follows the stroke weight.
pub fn print_segment(segment: &StyledSegment) {
    let (r, g, b) = segment.style.level.rgb();
    let bar_len = (segment.style.weight * 4.0).round() as usize;
    let bar = "█".repeat(bar_len).truecolor(r, g, b);
    println!(
        "  {bar} {} {}",
        segment.label,
        format!(
            "{:>3.0}% {} ({})",
            segment.probability * 100.0,
            segment.style.level,
            segment.style.color
        )
        .dimmed()
    );
}
