//! Console formatting shared by the persona views.

use crate::model::project::Priority;
use crate::model::task::TaskStatus;
use chrono::{Duration, NaiveDate};
use std::io::{self, Write};

const BAR_CELLS: usize = 10;

/// Single-line text capped at `max_chars`, with `...` only when cut.
pub fn truncate(value: &str, max_chars: usize) -> String {
    crate::logging::sanitize_message(value, max_chars)
}

/// Whole number with comma thousands separators, e.g. `1,250,000`.
pub fn thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}

/// Capitalizes every alphabetic run: `not_started` -> `Not_Started`.
pub fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                result.extend(ch.to_uppercase());
            } else {
                result.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(ch);
            at_word_start = true;
        }
    }
    result
}

/// Ten-cell bar, one filled cell per full 10 percent.
pub fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 10.0).floor().max(0.0) as usize).min(BAR_CELLS);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_CELLS - filled))
}

/// Weekly utilization label for `percent` of a 40h week.
pub fn utilization_label(percent: f64) -> &'static str {
    if percent > 100.0 {
        "🔥 OVERLOADED"
    } else if percent > 80.0 {
        "⚠️  HIGH"
    } else {
        "✅ NORMAL"
    }
}

pub fn priority_icon(priority: Priority) -> &'static str {
    match priority {
        Priority::Critical => "🚨",
        Priority::High => "📈",
        Priority::Medium | Priority::Low => "📋",
    }
}

/// Department swimlane icon: blockers first, then progress.
pub fn swimlane_icon(blocked_tasks: i64, progress_pct: f64) -> &'static str {
    if blocked_tasks > 0 {
        "🔥"
    } else if progress_pct > 75.0 {
        "🚀"
    } else if progress_pct < 25.0 {
        "⚠️"
    } else {
        "📈"
    }
}

/// Readiness of a handoff from the giving task's status.
pub fn handoff_status(giver_status: TaskStatus) -> &'static str {
    match giver_status {
        TaskStatus::Completed => "✅ READY",
        TaskStatus::InProgress => "⏳ WAITING",
        _ => "🚫 BLOCKED",
    }
}

/// Prints the `[Label] - description` action menu under `icon`.
pub(crate) fn write_actions(
    out: &mut impl Write,
    icon: &str,
    actions: &[(&str, &str)],
) -> io::Result<()> {
    writeln!(out, "\n{icon} AVAILABLE ACTIONS:")?;
    for (label, description) in actions {
        writeln!(out, "  [{label}] - {description}")?;
    }
    Ok(())
}

pub(crate) fn write_components(out: &mut impl Write, components: &[&str]) -> io::Result<()> {
    writeln!(out, "\n💡 UI COMPONENTS NEEDED:")?;
    for component in components {
        writeln!(out, "  • {component}")?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskUrgency {
    Overdue,
    DueSoon,
    Normal,
}

impl TaskUrgency {
    /// Overdue before `today`, due soon within two days.
    pub fn classify(due_date: NaiveDate, today: NaiveDate) -> Self {
        if due_date < today {
            Self::Overdue
        } else if due_date <= today + Duration::days(2) {
            Self::DueSoon
        } else {
            Self::Normal
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overdue => "OVERDUE",
            Self::DueSoon => "DUE_SOON",
            Self::Normal => "NORMAL",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Overdue => "🔥",
            Self::DueSoon => "⚠️",
            Self::Normal => "📅",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        progress_bar, swimlane_icon, thousands, title_case, truncate, utilization_label,
        TaskUrgency,
    };
    use chrono::NaiveDate;

    #[test]
    fn thousands_groups_digits() {
        assert_eq!(thousands(0.0), "0");
        assert_eq!(thousands(999.4), "999");
        assert_eq!(thousands(1_250_000.0), "1,250,000");
        assert_eq!(thousands(-12_345.6), "-12,346");
    }

    #[test]
    fn title_case_matches_word_starts() {
        assert_eq!(title_case("not_started"), "Not_Started");
        assert_eq!(title_case("at_risk"), "At_Risk");
        assert_eq!(title_case("completed"), "Completed");
    }

    #[test]
    fn truncate_marks_only_cut_text() {
        assert_eq!(truncate("short", 50), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }

    #[test]
    fn bars_and_labels_follow_thresholds() {
        assert_eq!(progress_bar(0.0), "░░░░░░░░░░");
        assert_eq!(progress_bar(57.5), "█████░░░░░");
        assert_eq!(progress_bar(100.0), "██████████");
        assert_eq!(utilization_label(100.0), "⚠️  HIGH");
        assert_eq!(utilization_label(100.1), "🔥 OVERLOADED");
        assert_eq!(utilization_label(80.0), "✅ NORMAL");
        assert_eq!(swimlane_icon(1, 90.0), "🔥");
        assert_eq!(swimlane_icon(0, 90.0), "🚀");
        assert_eq!(swimlane_icon(0, 10.0), "⚠️");
        assert_eq!(swimlane_icon(0, 50.0), "📈");
    }

    #[test]
    fn urgency_uses_two_day_window() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let day = |d| NaiveDate::from_ymd_opt(2026, 3, d).unwrap();
        assert_eq!(TaskUrgency::classify(day(1), today), TaskUrgency::Overdue);
        assert_eq!(TaskUrgency::classify(day(2), today), TaskUrgency::DueSoon);
        assert_eq!(TaskUrgency::classify(day(4), today), TaskUrgency::DueSoon);
        assert_eq!(TaskUrgency::classify(day(5), today), TaskUrgency::Normal);
    }
}
