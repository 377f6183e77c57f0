#![forbid(unsafe_code)]

//! Static grouping of CSS properties for the inspector panel.
//!
//! Computed styles enumerate longhand properties only, so the table lists
//! longhands (`margin-top`, not `margin`).

use crate::snapshot::ComputedStyleSnapshot;

/// Values that carry no information in a category listing.
pub const UNINTERESTING_VALUES: [&str; 3] = ["none", "normal", "0px"];

/// Check whether a resolved value is one of the sentinel values hidden from
/// category listings.
#[inline]
pub fn is_uninteresting(value: &str) -> bool {
    UNINTERESTING_VALUES.contains(&value)
}

/// Display category of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Layout,
    Spacing,
    Typography,
    Visual,
    Flex,
    Grid,
    Transform,
}

/// Every category in display order.
pub const CATEGORY_TABLE: [Category; 7] = [
    Category::Layout,
    Category::Spacing,
    Category::Typography,
    Category::Visual,
    Category::Flex,
    Category::Grid,
    Category::Transform,
];

impl Category {
    /// Heading shown in the panel.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Layout => "Layout",
            Self::Spacing => "Spacing",
            Self::Typography => "Typography",
            Self::Visual => "Visual",
            Self::Flex => "Flex",
            Self::Grid => "Grid",
            Self::Transform => "Transform",
        }
    }

    /// Stable lowercase identifier (CSS classes, diagnostics).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Layout => "layout",
            Self::Spacing => "spacing",
            Self::Typography => "typography",
            Self::Visual => "visual",
            Self::Flex => "flex",
            Self::Grid => "grid",
            Self::Transform => "transform",
        }
    }

    /// Properties of interest, in display order.
    pub const fn properties(self) -> &'static [&'static str] {
        match self {
            Self::Layout => &[
                "display",
                "position",
                "top",
                "right",
                "bottom",
                "left",
                "width",
                "height",
                "min-width",
                "min-height",
                "max-width",
                "max-height",
                "box-sizing",
                "overflow-x",
                "overflow-y",
                "float",
                "z-index",
            ],
            Self::Spacing => &[
                "margin-top",
                "margin-right",
                "margin-bottom",
                "margin-left",
                "padding-top",
                "padding-right",
                "padding-bottom",
                "padding-left",
            ],
            Self::Typography => &[
                "font-family",
                "font-size",
                "font-weight",
                "font-style",
                "line-height",
                "letter-spacing",
                "text-align",
                "text-decoration-line",
                "text-transform",
                "white-space",
                "color",
            ],
            Self::Visual => &[
                "background-color",
                "background-image",
                "border-top-width",
                "border-right-width",
                "border-bottom-width",
                "border-left-width",
                "border-top-style",
                "border-top-color",
                "border-top-left-radius",
                "border-top-right-radius",
                "border-bottom-right-radius",
                "border-bottom-left-radius",
                "box-shadow",
                "opacity",
                "visibility",
                "cursor",
            ],
            Self::Flex => &[
                "flex-direction",
                "flex-wrap",
                "justify-content",
                "align-items",
                "align-content",
                "align-self",
                "flex-grow",
                "flex-shrink",
                "flex-basis",
                "order",
                "row-gap",
                "column-gap",
            ],
            Self::Grid => &[
                "grid-template-columns",
                "grid-template-rows",
                "grid-template-areas",
                "grid-auto-flow",
                "grid-auto-columns",
                "grid-auto-rows",
                "grid-column-start",
                "grid-column-end",
                "grid-row-start",
                "grid-row-end",
                "justify-items",
                "justify-self",
            ],
            Self::Transform => &[
                "transform",
                "transform-origin",
                "perspective",
                "translate",
                "rotate",
                "scale",
                "transition-property",
                "transition-duration",
                "animation-name",
            ],
        }
    }

    /// Entries of this category present in `snapshot` whose value is not a
    /// sentinel, in table order.
    pub fn filter<'a>(self, snapshot: &'a ComputedStyleSnapshot) -> Vec<(&'static str, &'a str)> {
        self.properties()
            .iter()
            .filter_map(|&name| {
                snapshot
                    .get(name)
                    .filter(|value| !is_uninteresting(value))
                    .map(|value| (name, value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sentinels() {
        assert!(is_uninteresting("none"));
        assert!(is_uninteresting("normal"));
        assert!(is_uninteresting("0px"));
        assert!(!is_uninteresting("0"));
        assert!(!is_uninteresting("block"));
        assert!(!is_uninteresting("None"));
    }

    #[test]
    fn table_has_seven_categories_in_order() {
        let labels: Vec<&str> = CATEGORY_TABLE.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            ["Layout", "Spacing", "Typography", "Visual", "Flex", "Grid", "Transform"]
        );
    }

    #[test]
    fn property_lists_have_no_duplicates() {
        for category in CATEGORY_TABLE {
            let props = category.properties();
            let unique: HashSet<_> = props.iter().collect();
            assert_eq!(unique.len(), props.len(), "{}", category.label());
        }
    }

    #[test]
    fn filter_drops_sentinels_and_missing() {
        let snapshot = ComputedStyleSnapshot::from_pairs([
            ("display", "none"),
            ("position", "relative"),
            ("width", "200px"),
            ("float", "none"),
        ]);
        let listed = Category::Layout.filter(&snapshot);
        assert_eq!(listed, vec![("position", "relative"), ("width", "200px")]);
    }

    #[test]
    fn filter_follows_table_order_not_snapshot_order() {
        let snapshot = ComputedStyleSnapshot::from_pairs([
            ("padding-left", "4px"),
            ("margin-top", "8px"),
        ]);
        let listed = Category::Spacing.filter(&snapshot);
        assert_eq!(listed, vec![("margin-top", "8px"), ("padding-left", "4px")]);
    }

    #[test]
    fn filter_empty_snapshot() {
        let snapshot = ComputedStyleSnapshot::new();
        for category in CATEGORY_TABLE {
            assert!(category.filter(&snapshot).is_empty());
        }
    }
}
