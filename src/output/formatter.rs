use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::rank::{DashboardSummary, ScoredLead};
use crate::scoring::engine::{
    CONFIDENCE_MAX_POINTS, CONTACT_MAX_POINTS, INTERACTION_MAX_POINTS, SIGNAL_VOLUME_MAX_POINTS,
};
use crate::scoring::LeadTier;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn paint_score(padded: &str, tier: LeadTier) -> String {
    match tier {
        LeadTier::Hot => padded.green().bold().to_string(),
        LeadTier::Cold => padded.to_string(),
        _ => padded.yellow().to_string(),
    }
}

/// Format leads as a ranked table: Index, Score, Tier, Name, Location
/// No headers. Score column is right-aligned, 3 chars wide (fits "100").
pub fn format_scored_table(leads: &[ScoredLead], use_colors: bool) -> String {
    if leads.is_empty() {
        return "No leads found.".to_string();
    }

    let term_width = get_terminal_width();

    let index_width = 4; // "999."
    let score_width = 3;
    let tier_width = 14; // "high-potential"
    let separator = "  ";

    leads
        .iter()
        .enumerate()
        .map(|(idx, lead)| {
            let index_str = format!("{:>3}.", idx + 1);
            let score_str = format!("{:>width$}", lead.score(), width = score_width);
            let tier_str = format!("{:<width$}", lead.tier.label(), width = tier_width);
            let location = lead.entity.location();

            let fixed_width = index_width
                + 1
                + score_width
                + tier_width
                + separator.len() * 3
                + location.chars().count();

            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate(&lead.entity.name, width - fixed_width)
                }
                // Very narrow terminal, show truncated
                Some(_) => truncate(&lead.entity.name, 20),
                // No terminal (pipe), don't truncate
                None => lead.entity.name.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    paint_score(&score_str, lead.tier),
                    separator,
                    tier_str.dimmed(),
                    separator,
                    name.bold(),
                    separator,
                    location.cyan()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str, score_str, separator, tier_str, separator, name, separator, location
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format leads as tab-separated values for scripting
/// Columns: score, tier, id, name, location (no headers, no colors)
pub fn format_tsv(leads: &[ScoredLead]) -> String {
    leads
        .iter()
        .map(|lead| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                lead.score(),
                lead.tier.label(),
                lead.entity.id,
                lead.entity.name,
                lead.entity.location()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn component_line(label: &str, points: f64, max: f64) -> String {
    format!("    {:<22}{:>6.1} / {}", label, points, max)
}

/// Multi-line detail view with the full score breakdown
pub fn format_lead_detail(lead: &ScoredLead, use_colors: bool) -> String {
    let entity = &lead.entity;
    let breakdown = &lead.engagement.breakdown;
    let c = &breakdown.components;

    let header = if use_colors {
        format!(
            "{}  {}",
            entity.name.bold(),
            format!("[{}]", entity.id).dimmed()
        )
    } else {
        format!("{}  [{}]", entity.name, entity.id)
    };

    let mut lines = vec![header];
    lines.push(format!(
        "  Industry: {}",
        entity.industry.as_deref().unwrap_or("-")
    ));
    lines.push(format!("  Location: {}", entity.location()));
    if let Some(ref website) = entity.website {
        lines.push(format!("  Website: {}", website));
    }

    let score_str = lead.score().to_string();
    let score_display = if use_colors {
        paint_score(&score_str, lead.tier)
    } else {
        score_str
    };
    lines.push(format!("  Score: {} ({})", score_display, lead.tier.label()));
    lines.push(component_line("Signal volume", c.signal_volume, SIGNAL_VOLUME_MAX_POINTS));
    lines.push(component_line("Signal confidence", c.confidence, CONFIDENCE_MAX_POINTS));
    lines.push(component_line("Contact completeness", c.contact, CONTACT_MAX_POINTS));
    lines.push(component_line("Interactions", c.interaction, INTERACTION_MAX_POINTS));
    lines.push(format!(
        "  Signals: {}  Contacts: {}  Avg confidence: {:.2}",
        breakdown.signal_count, breakdown.contact_count, breakdown.confidence_avg
    ));
    lines.push(format!("  {}", breakdown.explanation));

    for signal in &entity.signals {
        let kind = signal.signal_type.as_deref().unwrap_or("signal");
        let confidence = signal
            .confidence
            .map(|c| format!("{:.0}%", c * 100.0))
            .unwrap_or_else(|| "n/a".to_string());
        let description = signal.description.as_deref().unwrap_or("");
        let line = format!("    - {} ({}) {}", kind, confidence, description);
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

fn join_ids(ids: &[String]) -> String {
    if ids.is_empty() {
        "-".to_string()
    } else {
        ids.join(", ")
    }
}

/// Dashboard summary block
pub fn format_summary(summary: &DashboardSummary, use_colors: bool) -> String {
    let mut lines = vec![
        format!("Leads: {}", summary.total_leads),
        format!("Signals: {}", summary.total_signals),
        format!("Average score: {:.1}", summary.average_score),
        format!(
            "Outreach ready: {} ({}%)",
            summary.ready_count, summary.ready_percent
        ),
    ];

    lines.push("Tiers:".to_string());
    for tier_count in &summary.tiers {
        lines.push(format!(
            "  {:<15}{}",
            tier_count.tier.label(),
            tier_count.count
        ));
    }

    let high = join_ids(&summary.high_potential);
    let opportunities = join_ids(&summary.opportunities);

    if use_colors {
        lines.push(format!("High potential: {}", high.green()));
        lines.push(format!("Opportunities: {}", opportunities.yellow()));
    } else {
        lines.push(format!("High potential: {}", high));
        lines.push(format!("Opportunities: {}", opportunities));
    }

    lines.join("\n")
}
