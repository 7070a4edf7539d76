//! Mock-up entry shown in test mode.

use super::{ContentItem, Headline, Lookup};

/// A fixed "Lorem Ipsum" entry spanning three parts of speech, with
/// meanings of very different lengths to exercise the overlay layout.
pub fn mock_lookup() -> Lookup {
    Lookup {
        headline: Headline {
            word: "Lorem Ipsum".to_string(),
            pronunciation: Some("/ˌlɔː.ɹəm ˈɪp.səm/".to_string()),
        },
        items: vec![
            ContentItem::new(
                "noun",
                "Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut \
                 aliquip ex ea commodo consequat. Duis aute irure dolor in reprehenderit in \
                 voluptate velit esse cillum dolore eu fugiat nulla pariatur.",
            ),
            ContentItem::new(
                "noun",
                "Odio eu feugiat pretium nibh ipsum consequat nisl. Vel elit scelerisque \
                 mauris pellentesque pulvinar pellentesque habitant. Tempus imperdiet nulla \
                 malesuada pellentesque elit.",
            ),
            ContentItem::new(
                "noun",
                "Dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt \
                 ut labore et dolore magna aliqua.",
            ),
            ContentItem::new(
                "verb",
                "Sed diam nonumy eirmod tempor invidunt ut labore et dolore magna aliquyam \
                 erat, sed diam voluptua.",
            ),
            ContentItem::new(
                "adjective",
                "Faucibus a pellentesque sit amet porttitor. Pellentesque habitant morbi \
                 tristique senectus. Elit eget gravida cum sociis natoque.",
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentLimits, filter_and_limit};

    #[test]
    fn mock_spans_three_categories() {
        let lookup = mock_lookup();
        assert_eq!(lookup.items.len(), 5);
        let limited = filter_and_limit(
            lookup.items,
            |s| !s.is_empty(),
            &ContentLimits::new(2, 2),
        );
        let categories: Vec<_> = limited.iter().map(|i| i.category.as_str()).collect();
        assert_eq!(categories, vec!["noun", "noun", "verb"]);
    }
}
