//! Field capture and line rendering for engine events.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::Level;

use crate::{elapsed_secs, mark_evaluate_start};

#[derive(Debug, Default)]
pub(crate) struct EventVisitor {
    pub(crate) event: Option<String>,
    pub(crate) rule: Option<String>,
    pub(crate) reference_date: Option<String>,
    pub(crate) group_by: Option<String>,
    pub(crate) value: Option<String>,
    pub(crate) kind: Option<String>,
    pub(crate) raw: Option<String>,
    pub(crate) record_count: Option<u64>,
    pub(crate) rule_count: Option<u64>,
    pub(crate) match_count: Option<u64>,
    pub(crate) violation_count: Option<u64>,
    pub(crate) group_count: Option<u64>,
    pub(crate) ungrouped: Option<u64>,
    pub(crate) occurrences: Option<u64>,
    pub(crate) duration_ms: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_str(field, s.trim_matches('"'));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "record_count" => self.record_count = Some(value),
            "rule_count" => self.rule_count = Some(value),
            "match_count" => self.match_count = Some(value),
            "violation_count" => self.violation_count = Some(value),
            "group_count" => self.group_count = Some(value),
            "ungrouped" => self.ungrouped = Some(value),
            "occurrences" => self.occurrences = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let slot = match field.name() {
            "event" => &mut self.event,
            "rule" => &mut self.rule,
            "reference_date" => &mut self.reference_date,
            "group_by" => &mut self.group_by,
            "value" => &mut self.value,
            "kind" => &mut self.kind,
            "raw" => &mut self.raw,
            _ => return,
        };
        *slot = Some(value.to_string());
    }
}

pub(crate) fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "evaluate_start" => format_evaluate_start(v),
        "evaluate_end" => format_evaluate_end(v),
        "rule_end" => format_rule_end(v),
        "rule_skipped" => format_rule_skipped(v),
        "group_end" => format_group_end(v),
        "unrecognized_stage" => format_unrecognized_stage(v),
        "coerce_failed" if level == Level::TRACE || level == Level::DEBUG => {
            format_coerce_failed(v)
        }
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

fn format_evaluate_start(v: &EventVisitor) -> String {
    mark_evaluate_start();
    let records = v.record_count.unwrap_or(0);
    let rules = v.rule_count.unwrap_or(0);

    let mut output = format!(
        "{} {} Evaluating │ {} records │ {} rules",
        format_elapsed(),
        "▶".bright_green().bold(),
        count(records).bright_yellow(),
        count(rules).bright_yellow(),
    );

    if let Some(ref date) = v.reference_date {
        output.push_str(&format!(" │ as of {}", date.bright_white()));
    }

    output
}

fn format_evaluate_end(v: &EventVisitor) -> String {
    let violations = v.violation_count.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);

    let status = if violations == 0 {
        "CLEAN".bright_green().bold().to_string()
    } else {
        "NEEDS ATTENTION".bright_red().bold().to_string()
    };

    format!(
        "{} {} Evaluation complete │ {} │ {} violations │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(duration).yellow(),
        format_violation_count(violations),
        status
    )
}

fn format_rule_end(v: &EventVisitor) -> String {
    let rule = v.rule.as_deref().unwrap_or("?");
    let matches = v.match_count.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);

    format!(
        "{} {} {:<4} │ {:>8} matches │ {}",
        format_elapsed(),
        "·".bright_blue(),
        rule.white().bold(),
        format_violation_count(matches),
        format_duration_ms(duration).bright_black()
    )
}

fn format_rule_skipped(v: &EventVisitor) -> String {
    format!(
        "{} {} {:<4} │ disabled",
        format_elapsed(),
        "○".bright_black(),
        v.rule.as_deref().unwrap_or("?").bright_black()
    )
}

fn format_group_end(v: &EventVisitor) -> String {
    let groups = v.group_count.unwrap_or(0);
    let ungrouped = v.ungrouped.unwrap_or(0);

    let mut output = format!(
        "{} {} Grouped │ {} groups",
        format_elapsed(),
        "◆".bright_magenta(),
        count(groups).bright_yellow()
    );
    if let Some(ref by) = v.group_by {
        output.push_str(&format!(" by {}", by.white()));
    }
    if ungrouped > 0 {
        output.push_str(&format!(
            " │ {} without owner",
            count(ungrouped).bright_red()
        ));
    }
    output
}

fn format_unrecognized_stage(v: &EventVisitor) -> String {
    format!(
        "{} {} Unrecognized stage {:?} │ {} rows",
        format_elapsed(),
        "!".yellow().bold(),
        v.value.as_deref().unwrap_or(""),
        count(v.occurrences.unwrap_or(0)).yellow()
    )
}

fn format_coerce_failed(v: &EventVisitor) -> String {
    format!(
        "{} {} Unparseable {} {:?}",
        format_elapsed(),
        "!".bright_black(),
        v.kind.as_deref().unwrap_or("value"),
        v.raw.as_deref().unwrap_or("")
    )
    .bright_black()
    .to_string()
}

fn format_violation_count(n: u64) -> String {
    if n == 0 {
        count(n).bright_green().to_string()
    } else {
        count(n).bright_red().to_string()
    }
}

pub(crate) fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visitor(event: &str) -> EventVisitor {
        EventVisitor {
            event: Some(event.to_string()),
            ..EventVisitor::default()
        }
    }

    #[test]
    fn test_duration_formatting() {
        assert_eq!(format_duration_ms(12), "12ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_evaluate_start_line() {
        let mut v = visitor("evaluate_start");
        v.record_count = Some(12_345);
        v.rule_count = Some(14);
        v.reference_date = Some("2025-03-15".to_string());

        let line = format_event(&v, Level::INFO);
        assert!(line.contains("Evaluating"));
        assert!(line.contains("12,345"));
        assert!(line.contains("14"));
        assert!(line.contains("2025-03-15"));
    }

    #[test]
    fn test_evaluate_end_status() {
        let mut clean = visitor("evaluate_end");
        clean.violation_count = Some(0);
        assert!(format_event(&clean, Level::INFO).contains("CLEAN"));

        let mut dirty = visitor("evaluate_end");
        dirty.violation_count = Some(3);
        dirty.duration_ms = Some(40);
        let line = format_event(&dirty, Level::INFO);
        assert!(line.contains("NEEDS ATTENTION"));
        assert!(line.contains("40ms"));
    }

    #[test]
    fn test_rule_and_group_lines() {
        let mut rule = visitor("rule_end");
        rule.rule = Some("R07".to_string());
        rule.match_count = Some(2);
        assert!(format_event(&rule, Level::DEBUG).contains("R07"));

        let mut group = visitor("group_end");
        group.group_count = Some(4);
        group.ungrouped = Some(1);
        let line = format_event(&group, Level::INFO);
        assert!(line.contains("groups"));
        assert!(line.contains("without owner"));
    }

    #[test]
    fn test_coerce_failed_only_at_debug() {
        let mut v = visitor("coerce_failed");
        v.kind = Some("amount".to_string());
        v.raw = Some("n/a".to_string());
        assert!(format_event(&v, Level::INFO).is_empty());
        assert!(format_event(&v, Level::DEBUG).contains("amount"));
    }

    #[test]
    fn test_unknown_event_is_silent() {
        assert!(format_event(&visitor("something_else"), Level::INFO).is_empty());
        assert!(format_event(&EventVisitor::default(), Level::INFO).is_empty());
    }
}
