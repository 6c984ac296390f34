//! Frequency normalization and purpose extraction.
//!
//! Turns a free-text descriptor ("three times daily for pneumonia") into a
//! canonical frequency label with concrete dose slots. The rules are checked
//! in a fixed order and the first match wins; the fallback guarantees every
//! descriptor normalizes to something, so this is total.

use std::sync::LazyLock;

use regex::Regex;

/// Canonical frequency with its expanded dose slots.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFrequency {
    pub label: String,
    pub time_slots: Vec<String>,
}

static EVERY_N_HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"every\s+(\d+)\s+hours?").unwrap());

static PURPOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(for|to treat)\s+[a-zA-Z\s,]+").unwrap());

// "afternoon" before "noon" so the longer mention wins.
static DAY_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(morning|evening|night|afternoon|noon|bedtime)").unwrap());

struct Rule {
    matches: fn(&str) -> bool,
    label: &'static str,
    slots: &'static [&'static str],
}

// First match wins. The interval rule runs before as-needed so that
// "every 6 hours as needed" keeps its interval schedule.
const RULES: &[Rule] = &[
    Rule {
        matches: |f| f.contains("once daily") || f.contains("qd"),
        label: "Once daily",
        slots: &["Take once in the Morning"],
    },
    Rule {
        matches: |f| f.contains("twice daily") || f.contains("bid"),
        label: "Twice daily",
        slots: &["Take morning dose", "Take evening dose"],
    },
    Rule {
        matches: |f| f.contains("three times daily") || f.contains("tid"),
        label: "Three times daily",
        slots: &["Take morning dose", "Take noon dose", "Take evening dose"],
    },
    Rule {
        matches: |f| f.contains("four times daily") || f.contains("qid"),
        label: "Four times daily",
        slots: &[
            "Take morning dose",
            "Take noon dose",
            "Take evening dose",
            "Take night dose",
        ],
    },
    Rule {
        matches: |f| f.contains("at bedtime") || f.contains("hs"),
        label: "At bedtime",
        slots: &["Take at bedtime"],
    },
];

fn every_n_hours(lower: &str) -> Option<NormalizedFrequency> {
    let caps = EVERY_N_HOURS.captures(lower)?;
    let n: u32 = caps[1].parse().ok()?;
    if n == 0 {
        return None;
    }
    let slots = 24 / n;
    if slots == 0 {
        return None;
    }
    let time_slots = (0..slots)
        .map(|i| format!("Take dose at hour {}", (i * n) % 24))
        .collect();
    Some(NormalizedFrequency {
        label: format!("Every {n} hours"),
        time_slots,
    })
}

/// Day-part mentions, distinct case-insensitively, in order of first
/// appearance. The label stays the descriptor verbatim.
fn named_day_parts(descriptor: &str, lower: &str) -> Option<NormalizedFrequency> {
    let mut found: Vec<&str> = Vec::new();
    for part in DAY_PART.find_iter(lower) {
        if !found.contains(&part.as_str()) {
            found.push(part.as_str());
        }
    }
    if found.is_empty() {
        return None;
    }

    let time_slots = found
        .iter()
        .map(|part| {
            let mut cased = part.to_string();
            cased[..1].make_ascii_uppercase();
            format!("Take {cased} dose")
        })
        .collect();
    Some(NormalizedFrequency {
        label: descriptor.to_string(),
        time_slots,
    })
}

/// Normalize a raw frequency descriptor. Never fails: unrecognized text
/// keeps its own label and gets a single "As prescribed" slot.
pub fn normalize_frequency(descriptor: &str) -> NormalizedFrequency {
    let descriptor = descriptor.trim();
    let descriptor = if descriptor.is_empty() {
        "As prescribed"
    } else {
        descriptor
    };
    let lower = descriptor.to_lowercase();

    for rule in RULES {
        if (rule.matches)(&lower) {
            return NormalizedFrequency {
                label: rule.label.to_string(),
                time_slots: rule.slots.iter().map(|s| s.to_string()).collect(),
            };
        }
    }
    if let Some(normalized) = every_n_hours(&lower) {
        return normalized;
    }
    if lower.contains("as needed") || lower.contains("prn") {
        return NormalizedFrequency {
            label: "As needed".to_string(),
            time_slots: vec!["Take as needed for symptoms".to_string()],
        };
    }
    if let Some(normalized) = named_day_parts(descriptor, &lower) {
        return normalized;
    }

    NormalizedFrequency {
        label: descriptor.to_string(),
        time_slots: vec!["As prescribed".to_string()],
    }
}

/// Pull a treatment purpose ("for pneumonia") out of the descriptor.
pub fn extract_purpose(descriptor: &str) -> String {
    match PURPOSE.find(descriptor) {
        Some(found) => found.as_str().trim().to_string(),
        None => "As prescribed by doctor".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_daily_single_morning_slot() {
        let norm = normalize_frequency("once daily with food");
        assert_eq!(norm.label, "Once daily");
        assert_eq!(norm.time_slots, vec!["Take once in the Morning"]);
    }

    #[test]
    fn abbreviations_map_like_their_phrases() {
        assert_eq!(normalize_frequency("1 tab po qd").label, "Once daily");
        assert_eq!(normalize_frequency("two tabs bid").label, "Twice daily");
        assert_eq!(normalize_frequency("one tab tid").label, "Three times daily");
        assert_eq!(normalize_frequency("one tab qid").label, "Four times daily");
        assert_eq!(normalize_frequency("one tab prn pain").label, "As needed");
    }

    #[test]
    fn three_times_daily_slots() {
        let norm = normalize_frequency("three times daily for pneumonia");
        assert_eq!(norm.label, "Three times daily");
        assert_eq!(
            norm.time_slots,
            vec!["Take morning dose", "Take noon dose", "Take evening dose"]
        );
    }

    #[test]
    fn interval_expands_to_hour_slots() {
        let norm = normalize_frequency("every 8 hours");
        assert_eq!(norm.label, "Every 8 hours");
        assert_eq!(
            norm.time_slots,
            vec![
                "Take dose at hour 0",
                "Take dose at hour 8",
                "Take dose at hour 16"
            ]
        );
    }

    #[test]
    fn interval_wins_over_as_needed() {
        let norm = normalize_frequency("every 6 hours as needed");
        assert_eq!(norm.label, "Every 6 hours");
        assert_eq!(norm.time_slots.len(), 4);
    }

    #[test]
    fn oversized_interval_falls_through() {
        // 24 / 30 truncates to zero slots, so the interval rule cannot apply.
        let norm = normalize_frequency("every 30 hours");
        assert_eq!(norm.label, "every 30 hours");
        assert_eq!(norm.time_slots, vec!["As prescribed"]);
    }

    #[test]
    fn bedtime_slot() {
        let norm = normalize_frequency("at bedtime");
        assert_eq!(norm.label, "At bedtime");
        assert_eq!(norm.time_slots, vec!["Take at bedtime"]);
    }

    #[test]
    fn day_parts_in_first_appearance_order() {
        let norm = normalize_frequency("evening and morning doses");
        assert_eq!(norm.label, "evening and morning doses");
        assert_eq!(
            norm.time_slots,
            vec!["Take Evening dose", "Take Morning dose"]
        );
    }

    #[test]
    fn afternoon_does_not_also_count_as_noon() {
        let norm = normalize_frequency("each afternoon");
        assert_eq!(norm.time_slots, vec!["Take Afternoon dose"]);
    }

    #[test]
    fn repeated_day_part_yields_one_slot() {
        let norm = normalize_frequency("Morning, then again in the morning if missed");
        assert_eq!(norm.time_slots, vec!["Take Morning dose"]);
    }

    #[test]
    fn unrecognized_text_keeps_its_label() {
        let norm = normalize_frequency("with plenty of water");
        assert_eq!(norm.label, "with plenty of water");
        assert_eq!(norm.time_slots, vec!["As prescribed"]);
    }

    #[test]
    fn empty_descriptor_gets_placeholder_label() {
        let norm = normalize_frequency("   ");
        assert_eq!(norm.label, "As prescribed");
        assert_eq!(norm.time_slots, vec!["As prescribed"]);
    }

    #[test]
    fn every_descriptor_yields_at_least_one_slot() {
        for descriptor in ["", "xyzzy", "???", "sig unclear", "every 0 hours"] {
            assert!(!normalize_frequency(descriptor).time_slots.is_empty());
        }
    }

    #[test]
    fn purpose_extracted_from_descriptor() {
        assert_eq!(
            extract_purpose("three times daily for pneumonia"),
            "for pneumonia"
        );
        assert_eq!(
            extract_purpose("once daily to treat high blood pressure"),
            "to treat high blood pressure"
        );
    }

    #[test]
    fn purpose_defaults_when_absent() {
        assert_eq!(extract_purpose("twice daily"), "As prescribed by doctor");
    }
}
