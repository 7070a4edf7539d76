//! Deterministic validation and capping of provider content.

use std::collections::HashMap;
use std::fmt::Write;
use std::num::NonZeroUsize;

use super::ContentItem;
use crate::config::DisplayConfig;

/// Caps applied by [`filter_and_limit`]. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentLimits {
    pub max_categories: Option<NonZeroUsize>,
    pub max_per_category: Option<NonZeroUsize>,
}

impl ContentLimits {
    pub fn new(max_categories: usize, max_per_category: usize) -> Self {
        Self {
            max_categories: NonZeroUsize::new(max_categories),
            max_per_category: NonZeroUsize::new(max_per_category),
        }
    }

    pub fn from_config(config: &DisplayConfig) -> Self {
        Self {
            max_categories: config.category_limit(),
            max_per_category: config.per_category_limit(),
        }
    }

    /// Most items that can ever be accepted, if bounded.
    pub fn max_total(&self) -> Option<usize> {
        let categories = self.max_categories?.get();
        let per_category = self.max_per_category?.get();
        Some(categories.saturating_mul(per_category))
    }
}

/// Normalized category key.
///
/// Lower-cased; ASCII letters and digits are kept, every other character
/// (`_` included) becomes `_{hex code point}_`. Encoded runs are delimited
/// and `_` never appears literally, so distinct categories never share a
/// key: "non-finite" is `non_2d_finite`, "nonfinite" stays `nonfinite`.
pub fn category_key(category: &str) -> String {
    let mut key = String::with_capacity(category.len());
    for c in category.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            key.push(c);
        } else {
            let _ = write!(key, "_{:x}_", c as u32);
        }
    }
    key
}

/// Single forward pass keeping valid items within the caps.
///
/// Once the category cap is reached no new category is admitted, but
/// already seen categories keep filling up to their own cap. Accepted items
/// keep their input order; the pass stops early once nothing more can fit.
pub fn filter_and_limit<I, F>(items: I, validate: F, limits: &ContentLimits) -> Vec<ContentItem>
where
    I: IntoIterator<Item = ContentItem>,
    F: Fn(&str) -> bool,
{
    let max_categories = limits.max_categories.map_or(usize::MAX, NonZeroUsize::get);
    let max_per_category = limits.max_per_category.map_or(usize::MAX, NonZeroUsize::get);
    let max_total = limits.max_total();

    let mut accepted = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for item in items {
        // Checked before registering the category, so a category whose
        // meanings are all invalid never takes a slot.
        if !validate(&item.text) {
            continue;
        }

        let key = category_key(&item.category);
        if !counts.contains_key(&key) && counts.len() >= max_categories {
            continue;
        }
        let count = counts.entry(key).or_insert(0);

        if *count >= max_per_category {
            continue;
        }
        *count += 1;
        accepted.push(item);

        if max_total.is_some_and(|max| accepted.len() >= max) {
            break;
        }
    }

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(category: &str, text: &str) -> ContentItem {
        ContentItem::new(category, text)
    }

    fn non_empty(s: &str) -> bool {
        !s.is_empty()
    }

    #[test]
    fn category_key_encodes_non_word_characters() {
        assert_eq!(category_key("Noun"), "noun");
        assert_eq!(category_key("non-finite"), "non_2d_finite");
        assert_ne!(category_key("non-finite"), category_key("nonfinite"));
        assert_eq!(category_key("phrasal verb"), "phrasal_20_verb");
        assert_eq!(category_key("snake_case"), "snake_5f_case");
    }

    #[test]
    fn encoded_characters_never_alias_literal_text() {
        let tricky = [
            "a-", "a2d", "a_2d_", "a 2", "a2 ", "a_", "a5f", "_", "-", "--", "-2d", "é", "e9", "_e9_",
        ];
        for (i, a) in tricky.iter().enumerate() {
            for b in &tricky[i + 1..] {
                assert_ne!(category_key(a), category_key(b), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn near_identical_categories_fill_separately() {
        let items = vec![item("a-", "x"), item("a2d", "y"), item("A-", "z")];
        let out = filter_and_limit(items, non_empty, &ContentLimits::new(2, 1));
        let texts: Vec<_> = out.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["x", "y"]);
    }

    #[test]
    fn caps_categories_and_items() {
        let items = vec![
            item("noun", "a"),
            item("verb", "b"),
            item("noun", "c"),
            item("adjective", "d"),
            item("noun", "e"),
            item("verb", "f"),
        ];
        let out = filter_and_limit(items, non_empty, &ContentLimits::new(2, 2));
        let texts: Vec<_> = out.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c", "f"]);
    }

    #[test]
    fn seen_categories_fill_after_category_cap() {
        let items = vec![
            item("noun", "a"),
            item("verb", "b"),
            item("noun", "c"),
            item("noun", "d"),
        ];
        let out = filter_and_limit(items, non_empty, &ContentLimits::new(1, 3));
        let texts: Vec<_> = out.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "c", "d"]);
    }

    #[test]
    fn invalid_items_do_not_claim_a_category() {
        let items = vec![item("noun", ""), item("verb", "b"), item("noun", "c")];
        let out = filter_and_limit(items, non_empty, &ContentLimits::new(1, 5));
        assert_eq!(out, vec![item("verb", "b")]);
    }

    #[test]
    fn categories_compare_case_insensitively() {
        let items = vec![item("Noun", "a"), item("noun", "b"), item("NOUN", "c")];
        let out = filter_and_limit(items, non_empty, &ContentLimits::new(1, 2));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn unbounded_limits_keep_every_valid_item() {
        let items: Vec<_> = (0..50).map(|i| item(&format!("c{}", i % 7), "x")).collect();
        let out = filter_and_limit(items, non_empty, &ContentLimits::default());
        assert_eq!(out.len(), 50);
    }

    #[test]
    fn stops_consuming_input_once_full() {
        let consumed = std::cell::Cell::new(0);
        let items = (0..100).map(|i| {
            consumed.set(consumed.get() + 1);
            item("noun", &i.to_string())
        });
        let out = filter_and_limit(items, non_empty, &ContentLimits::new(1, 3));
        assert_eq!(out.len(), 3);
        assert_eq!(consumed.get(), 3);
    }

    #[test]
    fn output_respects_all_bounds_for_mixed_input() {
        let categories = ["noun", "verb", "adjective", "adverb", "non-finite", "nonfinite"];
        for max_categories in 1..=4 {
            for max_per in 1..=3 {
                let items: Vec<_> = (0..40)
                    .map(|i| {
                        let text = if i % 5 == 0 { String::new() } else { format!("m{}", i) };
                        item(categories[(i * 7 + i / 3) % categories.len()], &text)
                    })
                    .collect();
                let out = filter_and_limit(
                    items.clone(),
                    non_empty,
                    &ContentLimits::new(max_categories, max_per),
                );

                assert!(out.len() <= max_categories * max_per);
                let mut per: HashMap<String, usize> = HashMap::new();
                for i in &out {
                    *per.entry(category_key(&i.category)).or_default() += 1;
                }
                assert!(per.len() <= max_categories);
                assert!(per.values().all(|&n| n <= max_per));

                // Subsequence of the valid input.
                let mut valid = items.iter().filter(|i| !i.text.is_empty());
                for accepted in &out {
                    assert!(valid.any(|i| i == accepted));
                }
            }
        }
    }
}
