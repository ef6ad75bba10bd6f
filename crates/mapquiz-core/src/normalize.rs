//! Guess normalization.
//!
//! Guesses are folded into a canonical form before they are compared with
//! the accepted spellings of a region:
//!
//! 1. lowercase
//! 2. drop one leading `"the "`
//! 3. hyphens become spaces
//! 4. runs of two or more whitespace characters become one space
//! 5. trim
//! 6. decompose (NFD) and drop combining diacritical marks
//!
//! Accent folding runs last so that the earlier steps see the text as the
//! user typed it. A single pass is not always a fixed point (`"the the x"`,
//! or a combining mark sitting between two spaces), so the pipeline is
//! repeated until the output stops changing.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static EXCESS_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\s+").expect("static regex"));

/// Normalize a raw guess. Pure and deterministic.
///
/// After the first pass the text is lowercase and accent-free, so a pass
/// that changes anything only removes characters and the loop terminates.
pub fn normalize(raw: &str) -> String {
    let mut current = single_pass(raw);
    loop {
        let next = single_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn single_pass(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let without_article = lowered.strip_prefix("the ").unwrap_or(&lowered);
    let spaced = without_article.replace('-', " ");
    let collapsed = EXCESS_WHITESPACE.replace_all(&spaced, " ");
    collapsed
        .trim()
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect()
}

/// Combining Diacritical Marks block, U+0300..=U+036F.
fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_article_and_folds_accents() {
        assert_eq!(normalize("The Río de la Plata"), "rio de la plata");
    }

    #[test]
    fn hyphens_become_single_spaces() {
        assert_eq!(normalize("Bosnia-Herzegovina"), "bosnia herzegovina");
        assert_eq!(normalize("Guinea - Bissau"), "guinea bissau");
    }

    #[test]
    fn collapses_and_trims_whitespace() {
        assert_eq!(normalize("  United    Kingdom \t"), "united kingdom");
    }

    #[test]
    fn single_whitespace_character_is_kept() {
        // Only runs of two or more are collapsed.
        assert_eq!(normalize("new\tzealand"), "new\tzealand");
    }

    #[test]
    fn article_only_stripped_at_start() {
        assert_eq!(normalize("Isle of the Dead"), "isle of the dead");
        assert_eq!(normalize("theodore"), "theodore");
    }

    #[test]
    fn folds_decomposed_and_precomposed_forms_alike() {
        assert_eq!(normalize("Côte d’Ivoire"), normalize("Co\u{0302}te d’Ivoire"));
        assert_eq!(normalize("São Tomé"), "sao tome");
    }

    #[test]
    fn repeated_article_settles() {
        assert_eq!(normalize("The the Gambia"), "gambia");
    }

    #[test]
    fn many_leading_articles_settle_in_one_call() {
        let raw = format!("{}x", "the ".repeat(20));
        let once = normalize(&raw);
        assert_eq!(once, "x");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    proptest! {
        #[test]
        fn repeated_articles_are_idempotent(s in "((The|the)[ -]+){0,40}[a-z -]{0,8}") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalize_is_idempotent(s in "\\PC{0,40}") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalize_is_idempotent_on_name_like_input(
            s in "(The |the )?[A-Za-zÀ-ÿ' -]{0,30}"
        ) {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once.clone());
            prop_assert!(!once.contains('-'));
            prop_assert!(!once.contains("  "));
        }
    }
}
