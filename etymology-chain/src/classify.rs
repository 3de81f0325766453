//! Mention classifier: decides, mention by mention, whether a language span in
//! etymology prose names an ancestor.
//!
//! The scanner keeps a byte cursor into the immutable paragraph text. Every
//! marker search runs against the not-yet-consumed remainder `text[cursor..]`,
//! and the cursor only moves forward.
//!
//! Rules, in order, for a mention at relative index `i`:
//! 1. inside an unclosed `(` group → skip past the next `)`
//! 2. sentence end and `Cognate` / `Compare` / `Related to` before `i` → stop
//! 3. `related` / `cognate` before `i` → stop (strict mode: only after a sentence end)
//! 4. `influenced by` before `i` → skip
//! 5. `From` / `from` / `of` / `based on` before `i` → origin
//! 6. otherwise → skip

use tracing::{debug, trace, warn};

use crate::config::StopRuleMode;
use crate::document::Mention;

const SENTENCE_END: &str = ".";
const COMPARISON_MARKERS: [&str; 3] = ["Cognate", "Compare", "Related to"];
const RELATION_MARKERS: [&str; 2] = ["related", "cognate"];
// Suffix match so both "Influenced by" and "influenced by" hit.
const INFLUENCE_MARKER: &str = "nfluenced by";
const TRIGGER_MARKERS: [&str; 4] = ["From", "from", "of", "based on"];

/// What the classifier decided for one mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Accepted ancestry candidate.
    Origin,
    /// Inside an open parenthetical group.
    Parenthetical,
    /// Follows an "influenced by" phrase.
    Influence,
    /// No trigger keyword precedes it.
    NoTrigger,
    /// Offset out of range or in consumed text, or the name is not found.
    Unlocated,
    /// A comparison digression started; the rest of the paragraph is ignored.
    Stop,
}

impl Verdict {
    /// True when scanning of the paragraph must end.
    pub fn is_stop(self) -> bool {
        matches!(self, Verdict::Stop)
    }
}

/// First-occurrence positions of every marker in the remaining text.
#[derive(Debug)]
struct Markers {
    sentence_end: Option<usize>,
    comparison: Option<usize>,
    relation: Option<usize>,
    influence: Option<usize>,
}

impl Markers {
    fn scan(remaining: &str) -> Self {
        Self {
            sentence_end: remaining.find(SENTENCE_END),
            comparison: first_of(remaining, &COMPARISON_MARKERS),
            relation: first_of(remaining, &RELATION_MARKERS),
            influence: remaining.find(INFLUENCE_MARKER),
        }
    }
}

/// Why a mention could not be placed in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Miss {
    OutOfRange,
    Consumed,
    NotFound,
}

/// Forward-only cursor over one paragraph.
#[derive(Debug)]
pub struct ParagraphScanner<'a> {
    text: &'a str,
    cursor: usize,
    stop_rules: StopRuleMode,
}

impl<'a> ParagraphScanner<'a> {
    pub fn new(text: &'a str, stop_rules: StopRuleMode) -> Self {
        Self {
            text,
            cursor: 0,
            stop_rules,
        }
    }

    /// Not-yet-consumed part of the paragraph.
    pub fn remaining(&self) -> &'a str {
        &self.text[self.cursor..]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Classifies `mention` and advances the cursor accordingly.
    pub fn classify(&mut self, mention: &Mention) -> Verdict {
        let abs = match self.locate(mention) {
            Ok(abs) => abs,
            Err(Miss::Consumed) => {
                debug!(mention = %mention.name, offset = mention.offset, "mention in consumed text");
                return Verdict::Unlocated;
            }
            Err(miss) => {
                warn!(mention = %mention.name, offset = mention.offset, ?miss, "malformed mention offset; skipped");
                return Verdict::Unlocated;
            }
        };
        let end = abs + mention.name.len();
        let remaining = self.remaining();
        let i = abs - self.cursor;

        if in_open_parenthetical(&remaining[..i]) {
            self.cursor = match self.text[end..].find(')') {
                Some(rel) => end + rel + 1,
                None => end,
            };
            trace!(mention = %mention.name, cursor = self.cursor, "inside parentheses");
            return Verdict::Parenthetical;
        }

        let markers = Markers::scan(remaining);
        let sentence_ended = before(markers.sentence_end, i);

        if sentence_ended && before(markers.comparison, i) {
            debug!(mention = %mention.name, "comparison after sentence end; stop");
            return Verdict::Stop;
        }

        let relation = before(markers.relation, i);
        let relation_stops = match self.stop_rules {
            StopRuleMode::Permissive => relation,
            StopRuleMode::Strict => relation && sentence_ended,
        };
        if relation_stops {
            debug!(mention = %mention.name, "relation marker; stop");
            return Verdict::Stop;
        }

        self.cursor = end;

        if before(markers.influence, i) {
            trace!(mention = %mention.name, "influence, not ancestry");
            return Verdict::Influence;
        }

        // The character right before the mention is excluded from the search.
        let head = &remaining[..prev_char_start(remaining, i)];
        if TRIGGER_MARKERS.iter().any(|kw| head.contains(kw)) {
            trace!(mention = %mention.name, "origin");
            Verdict::Origin
        } else {
            trace!(mention = %mention.name, "no trigger keyword");
            Verdict::NoTrigger
        }
    }

    /// Absolute byte position of the mention at or after its declared offset.
    /// Offsets that fall in already-consumed text are not resolved.
    fn locate(&self, mention: &Mention) -> Result<usize, Miss> {
        if mention.name.is_empty() || mention.offset > self.text.len() {
            return Err(Miss::OutOfRange);
        }
        let mut from = mention.offset;
        while !self.text.is_char_boundary(from) {
            from -= 1;
        }
        if from < self.cursor {
            return Err(Miss::Consumed);
        }
        self.text[from..]
            .find(mention.name.as_str())
            .map(|rel| from + rel)
            .ok_or(Miss::NotFound)
    }
}

fn first_of(haystack: &str, needles: &[&str]) -> Option<usize> {
    needles.iter().filter_map(|n| haystack.find(n)).min()
}

fn before(pos: Option<usize>, i: usize) -> bool {
    matches!(pos, Some(p) if p < i)
}

fn in_open_parenthetical(prefix: &str) -> bool {
    let open = prefix.matches('(').count();
    let close = prefix.matches(')').count();
    open > close
}

/// Byte index where the character ending at `i` starts (0 when `i == 0`).
fn prev_char_start(s: &str, i: usize) -> usize {
    s[..i].char_indices().next_back().map_or(0, |(j, _)| j)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Paragraph;

    fn verdicts(text: &str, names: &[&str], mode: StopRuleMode) -> Vec<Verdict> {
        let p = Paragraph::with_mentions_found(text, names);
        let mut scanner = ParagraphScanner::new(p.text(), mode);
        let mut out = Vec::new();
        for m in p.mentions() {
            let v = scanner.classify(m);
            out.push(v);
            if v.is_stop() {
                break;
            }
        }
        out
    }

    fn permissive(text: &str, names: &[&str]) -> Vec<Verdict> {
        verdicts(text, names, StopRuleMode::Permissive)
    }

    #[test]
    fn from_triggers_origin() {
        assert_eq!(
            permissive("From Old French, from Latin.", &["Old French", "Latin"]),
            vec![Verdict::Origin, Verdict::Origin]
        );
    }

    #[test]
    fn mention_without_trigger_is_skipped() {
        assert_eq!(permissive("Latin word.", &["Latin"]), vec![Verdict::NoTrigger]);
    }

    #[test]
    fn trigger_must_precede_the_character_before_mention() {
        // "of" ends right before the mention's preceding character.
        assert_eq!(permissive("ofLatin", &["Latin"]), vec![Verdict::NoTrigger]);
        assert_eq!(permissive("of Latin", &["Latin"]), vec![Verdict::Origin]);
    }

    #[test]
    fn based_on_and_of_trigger() {
        assert_eq!(
            permissive("Calque based on German", &["German"]),
            vec![Verdict::Origin]
        );
        assert_eq!(
            permissive("Borrowing of Dutch", &["Dutch"]),
            vec![Verdict::Origin]
        );
    }

    #[test]
    fn parenthetical_mentions_are_skipped() {
        let v = permissive(
            "From Latin (compare Greek and Sanskrit), from Etruscan.",
            &["Latin", "Greek", "Sanskrit", "Etruscan"],
        );
        // Greek opens the skip past ')', Sanskrit then lies in consumed text.
        assert_eq!(
            v,
            vec![
                Verdict::Origin,
                Verdict::Parenthetical,
                Verdict::Unlocated,
                Verdict::Origin
            ]
        );
    }

    #[test]
    fn nested_parentheses_count() {
        let v = permissive(
            "From Latin (a (b) Greek) from Oscan",
            &["Latin", "Greek", "Oscan"],
        );
        assert_eq!(v, vec![Verdict::Origin, Verdict::Parenthetical, Verdict::Origin]);
    }

    #[test]
    fn unclosed_parenthesis_skips_only_the_mention() {
        let p = Paragraph::with_mentions_found("From Latin (see Greek", &["Latin", "Greek"]);
        let mut scanner = ParagraphScanner::new(p.text(), StopRuleMode::Permissive);
        assert_eq!(scanner.classify(&p.mentions()[0]), Verdict::Origin);
        assert_eq!(scanner.classify(&p.mentions()[1]), Verdict::Parenthetical);
        assert_eq!(scanner.remaining(), "");

        // Only the mention is consumed; later text is still scanned.
        let v = permissive("From Latin (see Greek, from Oscan", &["Latin", "Greek", "Oscan"]);
        assert_eq!(
            v,
            vec![Verdict::Origin, Verdict::Parenthetical, Verdict::Origin]
        );
    }

    #[test]
    fn offset_in_consumed_text_does_not_borrow_a_later_occurrence() {
        let p = Paragraph::with_mentions_found(
            "From Latin (compare Greek and Oscan), from Umbrian, from Oscan.",
            &["Latin", "Greek", "Oscan", "Umbrian", "Oscan"],
        );
        let mut scanner = ParagraphScanner::new(p.text(), StopRuleMode::Permissive);
        let v: Vec<_> = p.mentions().iter().map(|m| scanner.classify(m)).collect();
        assert_eq!(
            v,
            vec![
                Verdict::Origin,
                Verdict::Parenthetical,
                Verdict::Unlocated,
                Verdict::Origin,
                Verdict::Origin
            ]
        );
    }

    #[test]
    fn cognate_after_sentence_end_stops() {
        let v = permissive(
            "From Latin. Cognate with Greek.",
            &["Latin", "Greek"],
        );
        assert_eq!(v, vec![Verdict::Origin, Verdict::Stop]);
    }

    #[test]
    fn compare_without_sentence_end_does_not_stop() {
        let v = permissive("Compare from Gothic", &["Gothic"]);
        assert_eq!(v, vec![Verdict::Origin]);
    }

    #[test]
    fn lowercase_related_stops_in_permissive_mode() {
        let v = permissive(
            "From Latin, related to Greek",
            &["Latin", "Greek"],
        );
        assert_eq!(v, vec![Verdict::Origin, Verdict::Stop]);
    }

    #[test]
    fn strict_mode_needs_sentence_end_for_relation_stop() {
        let v = verdicts(
            "From Latin, cognate of Greek",
            &["Latin", "Greek"],
            StopRuleMode::Strict,
        );
        assert_eq!(v, vec![Verdict::Origin, Verdict::Origin]);

        let v = verdicts(
            "From Latin. Its cognate is from Greek",
            &["Latin", "Greek"],
            StopRuleMode::Strict,
        );
        assert_eq!(v, vec![Verdict::Origin, Verdict::Stop]);
    }

    #[test]
    fn influence_skips_without_stopping() {
        let v = permissive(
            "From Old English, influenced by Old Norse",
            &["Old English", "Old Norse"],
        );
        assert_eq!(v, vec![Verdict::Origin, Verdict::Influence]);

        let v = permissive(
            "Influenced by Latin; from Greek",
            &["Latin", "Greek"],
        );
        assert_eq!(v, vec![Verdict::Influence, Verdict::Origin]);
    }

    #[test]
    fn markers_are_searched_in_remaining_text_only() {
        // The first "from" is consumed with Latin; Greek has no trigger of its own.
        let v = permissive("from Latin Greek", &["Latin", "Greek"]);
        assert_eq!(v, vec![Verdict::Origin, Verdict::NoTrigger]);
    }

    #[test]
    fn mention_at_last_character_is_not_truncated() {
        let p = Paragraph::with_mentions_found("From Old French, from Latin", &["Old French", "Latin"]);
        let mut scanner = ParagraphScanner::new(p.text(), StopRuleMode::Permissive);
        assert_eq!(scanner.classify(&p.mentions()[0]), Verdict::Origin);
        assert_eq!(scanner.remaining(), ", from Latin");
        assert_eq!(scanner.classify(&p.mentions()[1]), Verdict::Origin);
        assert_eq!(scanner.cursor(), p.text().len());
    }

    #[test]
    fn out_of_range_offset_is_unlocated() {
        let mut scanner = ParagraphScanner::new("From Latin.", StopRuleMode::Permissive);
        assert_eq!(scanner.classify(&Mention::new("Latin", 500)), Verdict::Unlocated);
        assert_eq!(scanner.cursor(), 0);
        assert_eq!(scanner.locate(&Mention::new("Latin", 500)), Err(Miss::OutOfRange));
        assert_eq!(scanner.locate(&Mention::new("Greek", 0)), Err(Miss::NotFound));

        assert_eq!(scanner.classify(&Mention::new("Latin", 0)), Verdict::Origin);
        assert_eq!(scanner.locate(&Mention::new("Latin", 5)), Err(Miss::Consumed));
    }

    #[test]
    fn offset_inside_multibyte_char_is_floored() {
        let text = "Från Latin";
        let mut scanner = ParagraphScanner::new(text, StopRuleMode::Permissive);
        // Byte 3 is inside 'å'.
        assert_eq!(scanner.classify(&Mention::new("Latin", 3)), Verdict::NoTrigger);

        let text = "from é Latin";
        let mut scanner = ParagraphScanner::new(text, StopRuleMode::Permissive);
        // A character-based offset (7) is below the byte offset (8) and still resolves.
        assert_eq!(scanner.classify(&Mention::new("Latin", 7)), Verdict::Origin);
    }

    #[test]
    fn prev_char_start_handles_multibyte() {
        assert_eq!(prev_char_start("aé", 3), 1);
        assert_eq!(prev_char_start("abc", 0), 0);
    }
}
