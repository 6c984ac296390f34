//! Medication candidate scanner.
//!
//! A left-to-right word scan over normalized discharge text. Each candidate
//! is a capitalized name run, a dosage (`<number> <unit>`), and the trailing
//! descriptor up to the next candidate's name or end of text. Candidates
//! never overlap: the scan advances past a consumed match before searching
//! again.

/// One medication candidate found in the text.
#[derive(Debug, Clone, PartialEq)]
pub struct MedMatch {
    pub name: String,
    pub dosage: String,
    pub descriptor: String,
    /// Byte span in the normalized text, name start to descriptor end.
    pub span: (usize, usize),
}

/// Recognized dosage units, longest first so "units" wins over "unit".
const DOSAGE_UNITS: &[&str] = &[
    "tablets", "tablet", "units", "unit", "puffs", "puff", "mcg", "ml", "mg", "g",
];

/// Collapse newlines and repeated whitespace to single spaces.
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug)]
struct Word<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

fn tokenize(text: &str) -> Vec<Word<'_>> {
    let mut words = Vec::new();
    let mut offset = 0;
    for part in text.split(' ') {
        if !part.is_empty() {
            words.push(Word {
                text: part,
                start: offset,
                end: offset + part.len(),
            });
        }
        offset += part.len() + 1;
    }
    words
}

fn strip_trailing_punct(word: &str) -> &str {
    word.trim_end_matches(|c: char| !c.is_ascii_alphanumeric() && c != ')')
}

/// A word that may belong to a drug-name run: letters, hyphens, parentheses.
fn is_name_word(word: &str) -> bool {
    !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == '-' || c == '(' || c == ')')
}

fn starts_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Split "500" / "2.5" off the front of a word; returns (number, rest).
fn split_number(word: &str) -> Option<(&str, &str)> {
    let digits = word.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let mut split = digits;
    let rest = &word[digits..];
    if let Some(frac) = rest.strip_prefix('.') {
        let frac_digits = frac.chars().take_while(|c| c.is_ascii_digit()).count();
        if frac_digits > 0 {
            split = digits + 1 + frac_digits;
        }
    }
    Some((&word[..split], &word[split..]))
}

fn is_unit(word: &str) -> bool {
    DOSAGE_UNITS.iter().any(|u| word.eq_ignore_ascii_case(u))
}

/// Try to read a dosage starting at word `i`.
///
/// Returns the dosage text and how many words it consumed: either a fused
/// "500mg" (one word) or "2 puffs" (number word + unit word).
fn parse_dosage<'a>(words: &[Word<'a>], i: usize) -> Option<(String, usize)> {
    let head = strip_trailing_punct(words[i].text);
    let (number, rest) = split_number(head)?;
    if rest.is_empty() {
        let unit = strip_trailing_punct(words.get(i + 1)?.text);
        if is_unit(unit) {
            return Some((format!("{number} {unit}"), 2));
        }
        None
    } else if is_unit(rest) {
        Some((head.to_string(), 1))
    } else {
        None
    }
}

struct Anchor {
    name_start: usize,
    dosage_end: usize,
    name: String,
    dosage: String,
    keep: bool,
}

/// Scan normalized text for medication candidates.
///
/// Zero candidates is a valid empty result, not an error. Candidates with a
/// name shorter than 3 characters are consumed but discarded.
pub fn scan_medications(text: &str) -> Vec<MedMatch> {
    let words = tokenize(text);
    let mut anchors: Vec<Anchor> = Vec::new();

    // Pass 1: find name+dosage anchors left to right.
    let mut i = 0;
    let mut floor = 0; // first word a name run may reach back to
    while i < words.len() {
        let Some((dosage, consumed)) = parse_dosage(&words, i) else {
            i += 1;
            continue;
        };

        let mut run_start = i;
        while run_start > floor && is_name_word(words[run_start - 1].text) {
            run_start -= 1;
        }
        let name_start = (run_start..i).find(|&j| starts_capitalized(words[j].text));

        if let Some(name_start) = name_start {
            let name = words[name_start..i]
                .iter()
                .map(|w| w.text)
                .collect::<Vec<_>>()
                .join(" ");
            let keep = name.len() >= 3;
            anchors.push(Anchor {
                name_start,
                dosage_end: i + consumed,
                name,
                dosage,
                keep,
            });
            floor = i + consumed;
            i += consumed;
        } else {
            i += 1;
        }
    }

    // Pass 2: descriptors run from each dosage to the next anchor's name.
    let mut matches = Vec::new();
    for (t, anchor) in anchors.iter().enumerate() {
        if !anchor.keep {
            continue;
        }

        let boundary = anchors
            .get(t + 1)
            .map(|next| next.name_start)
            .unwrap_or(words.len());

        let mut desc_start = anchor.dosage_end;
        // A single separator dash after the dosage belongs to neither side.
        if desc_start < boundary && matches!(words[desc_start].text, "-" | "–") {
            desc_start += 1;
        }

        let descriptor = words[desc_start..boundary]
            .iter()
            .map(|w| w.text)
            .collect::<Vec<_>>()
            .join(" ");

        let span_start = words[anchor.name_start].start;
        let span_end = if boundary > desc_start {
            words[boundary - 1].end
        } else {
            words[anchor.dosage_end - 1].end
        };

        matches.push(MedMatch {
            name: anchor.name.clone(),
            dosage: anchor.dosage.clone(),
            descriptor,
            span: (span_start, span_end),
        });
    }

    matches
}
