//! Paragraph walker: runs the classifier over an etymology subsection.

use tracing::debug;

use crate::chain::EtymologyChain;
use crate::classify::{ParagraphScanner, Verdict};
use crate::config::StopRuleMode;
use crate::document::Paragraph;

/// Raw (unfiltered) walk output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk {
    pub description: String,
    pub chain: EtymologyChain,
}

/// Visits `paragraphs` in order, accumulating their text into the description
/// and accepted origins into a chain rooted at `target`.
///
/// Stops after the first paragraph that contributes an origin.
pub fn walk(paragraphs: &[&Paragraph], target: &str, stop_rules: StopRuleMode) -> Walk {
    let mut description = format!("{target}. ");
    let mut chain = EtymologyChain::new(target);

    for (idx, paragraph) in paragraphs.iter().enumerate() {
        description.push_str(paragraph.text());

        let mut scanner = ParagraphScanner::new(paragraph.text(), stop_rules);
        for mention in paragraph.mentions() {
            match scanner.classify(mention) {
                Verdict::Stop => break,
                Verdict::Origin => {
                    if !chain.push_unique(&mention.name) {
                        debug!(mention = %mention.name, "duplicate origin dropped");
                    }
                }
                _ => {}
            }
        }

        if !chain.is_trivial() {
            debug!(paragraph = idx, origins = chain.len() - 1, "origins found; stop walking");
            break;
        }
    }

    Walk { description, chain }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(text: &str, names: &[&str]) -> Paragraph {
        Paragraph::with_mentions_found(text, names)
    }

    #[test]
    fn collects_origins_in_order() {
        let p = para("From Old French, from Latin.", &["Old French", "Latin"]);
        let w = walk(&[&p], "French", StopRuleMode::Permissive);
        assert_eq!(w.chain.as_slice(), ["French", "Old French", "Latin"]);
        assert_eq!(w.description, "French. From Old French, from Latin.");
    }

    #[test]
    fn stops_after_first_productive_paragraph() {
        let a = para("Unknown.", &[]);
        let b = para("From Latin.", &["Latin"]);
        let c = para("From Greek.", &["Greek"]);
        let w = walk(&[&a, &b, &c], "English", StopRuleMode::Permissive);
        assert_eq!(w.chain.as_slice(), ["English", "Latin"]);
        assert_eq!(w.description, "English. Unknown.From Latin.");
    }

    #[test]
    fn skipped_mentions_stay_in_description() {
        let p = para("Latin word (Greek).", &["Latin", "Greek"]);
        let w = walk(&[&p], "English", StopRuleMode::Permissive);
        assert!(w.chain.is_trivial());
        assert!(w.description.contains("(Greek)"));
    }

    #[test]
    fn duplicates_are_dropped_silently() {
        let p = para("From Latin, from Latin, from Greek", &["Latin", "Latin", "Greek"]);
        let w = walk(&[&p], "English", StopRuleMode::Permissive);
        assert_eq!(w.chain.as_slice(), ["English", "Latin", "Greek"]);
    }

    #[test]
    fn target_mention_is_not_duplicated() {
        let p = para("From earlier English, from Latin", &["English", "Latin"]);
        let w = walk(&[&p], "English", StopRuleMode::Permissive);
        assert_eq!(w.chain.as_slice(), ["English", "Latin"]);
    }

    #[test]
    fn stop_rule_keeps_origins_found_so_far() {
        let p = para(
            "From Latin lingua. Cognate with Greek glossa.",
            &["Latin", "Greek"],
        );
        let w = walk(&[&p], "English", StopRuleMode::Permissive);
        assert_eq!(w.chain.as_slice(), ["English", "Latin"]);
    }

    #[test]
    fn parenthetical_repeat_keeps_later_origins() {
        let p = para(
            "From Latin (compare Greek and Oscan), from Umbrian, from Oscan.",
            &["Latin", "Greek", "Oscan", "Umbrian", "Oscan"],
        );
        let w = walk(&[&p], "English", StopRuleMode::Permissive);
        assert_eq!(w.chain.as_slice(), ["English", "Latin", "Umbrian", "Oscan"]);
    }

    #[test]
    fn no_paragraphs_yields_target_only() {
        let w = walk(&[], "English", StopRuleMode::Permissive);
        assert_eq!(w.chain.as_slice(), ["English"]);
        assert_eq!(w.description, "English. ");
    }
}
