#![forbid(unsafe_code)]

//! Panel view model.
//!
//! [`PanelModel`] is what the inspector panel shows: a summary of the target,
//! one section per category, and the unfiltered raw dump. Hosts turn it into
//! markup; [`PanelModel::to_text`] renders it as plain text.

use std::fmt::Write as _;

use crate::category::{CATEGORY_TABLE, Category};
use crate::config::{EmptyCategories, InspectorConfig};
use crate::geometry::Geometry;
use crate::snapshot::ComputedStyleSnapshot;

/// Summary block under the panel header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSummary {
    /// Width rounded to whole pixels.
    pub width: i64,
    /// Height rounded to whole pixels.
    pub height: i64,
    /// Resolved `position`, empty when the host reported none.
    pub position: String,
    /// Resolved `display`, empty when the host reported none.
    pub display: String,
}

/// Filtered listing of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySection {
    pub category: Category,
    pub entries: Vec<(String, String)>,
}

impl CategorySection {
    /// Heading text, including the number of listed properties.
    pub fn heading(&self) -> String {
        format!("{} ({})", self.category.label(), self.entries.len())
    }

    /// Check if nothing survived the filter.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything rendered inside the inspector panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelModel {
    pub title: String,
    pub summary: PanelSummary,
    pub sections: Vec<CategorySection>,
    /// Every captured property, unfiltered, in capture order.
    pub raw: Vec<(String, String)>,
    /// Whether the raw disclosure starts expanded.
    pub raw_open: bool,
}

impl PanelModel {
    /// Build the model for `snapshot` and `geometry`.
    pub fn build(
        snapshot: &ComputedStyleSnapshot,
        geometry: &Geometry,
        config: &InspectorConfig,
    ) -> Self {
        let summary = PanelSummary {
            width: geometry.rounded_width(),
            height: geometry.rounded_height(),
            position: snapshot.get("position").unwrap_or_default().to_owned(),
            display: snapshot.get("display").unwrap_or_default().to_owned(),
        };

        let sections = CATEGORY_TABLE
            .iter()
            .map(|&category| CategorySection {
                category,
                entries: category
                    .filter(snapshot)
                    .into_iter()
                    .map(|(name, value)| (name.to_owned(), value.to_owned()))
                    .collect(),
            })
            .filter(|section| {
                config.empty_categories == EmptyCategories::ShowHeading || !section.is_empty()
            })
            .collect();

        let raw = snapshot
            .iter()
            .map(|(name, value)| (name.to_owned(), value.to_owned()))
            .collect();

        Self {
            title: config.panel_title.clone(),
            summary,
            sections,
            raw,
            raw_open: config.raw_open,
        }
    }

    /// Summary line for the raw disclosure.
    pub fn raw_heading(&self) -> String {
        format!("All computed properties ({})", self.raw.len())
    }

    /// Find a section by category.
    pub fn section(&self, category: Category) -> Option<&CategorySection> {
        self.sections.iter().find(|s| s.category == category)
    }

    /// Plain-text rendering. The raw dump is included only when `raw_open`
    /// is set, mirroring the collapsed disclosure.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let summary = &self.summary;
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "  size: {} x {} px", summary.width, summary.height);
        let _ = writeln!(
            out,
            "  position: {}  display: {}",
            summary.position, summary.display
        );
        for section in &self.sections {
            let _ = writeln!(out, "[{}]", section.heading());
            for (name, value) in &section.entries {
                let _ = writeln!(out, "  {name}: {value}");
            }
        }
        let marker = if self.raw_open { 'v' } else { '>' };
        let _ = writeln!(out, "{marker} {}", self.raw_heading());
        if self.raw_open {
            for (name, value) in &self.raw {
                let _ = writeln!(out, "  {name}: {value}");
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snapshot() -> ComputedStyleSnapshot {
        ComputedStyleSnapshot::from_pairs([
            ("display", "none"),
            ("position", "absolute"),
            ("margin-top", "0px"),
            ("padding-left", "12px"),
            ("font-weight", "normal"),
            ("color", "rgb(0, 0, 0)"),
            ("transform", "none"),
            ("-webkit-custom", "x"),
        ])
    }

    fn geometry() -> Geometry {
        Geometry::new(0.0, 0.0, 120.6, 33.2)
    }

    #[test]
    fn summary_rounds_and_reports_position_display() {
        let model = PanelModel::build(&snapshot(), &geometry(), &InspectorConfig::default());
        assert_eq!(
            model.summary,
            PanelSummary {
                width: 121,
                height: 33,
                position: "absolute".into(),
                display: "none".into(),
            }
        );
    }

    #[test]
    fn sentinel_display_is_excluded_but_heading_remains() {
        let model = PanelModel::build(&snapshot(), &geometry(), &InspectorConfig::default());
        let layout = model.section(Category::Layout).unwrap();
        assert!(!layout.entries.iter().any(|(n, _)| n == "display"));
        assert_eq!(layout.entries, vec![("position".into(), "absolute".into())]);
        assert_eq!(model.sections.len(), CATEGORY_TABLE.len());
    }

    #[test]
    fn empty_categories_keep_heading_by_default() {
        let model = PanelModel::build(&snapshot(), &geometry(), &InspectorConfig::default());
        let transform = model.section(Category::Transform).unwrap();
        assert!(transform.is_empty());
        assert_eq!(transform.heading(), "Transform (0)");
    }

    #[test]
    fn empty_categories_can_be_hidden() {
        let config = InspectorConfig::default().with_empty_categories(EmptyCategories::Hide);
        let model = PanelModel::build(&snapshot(), &geometry(), &config);
        let shown: Vec<Category> = model.sections.iter().map(|s| s.category).collect();
        assert_eq!(
            shown,
            [Category::Layout, Category::Spacing, Category::Typography]
        );
    }

    #[test]
    fn raw_lists_every_key_unfiltered() {
        let snap = snapshot();
        let model = PanelModel::build(&snap, &geometry(), &InspectorConfig::default());
        let raw_names: Vec<&str> = model.raw.iter().map(|(n, _)| n.as_str()).collect();
        let snap_names: Vec<&str> = snap.iter().map(|(n, _)| n).collect();
        assert_eq!(raw_names, snap_names);
        assert!(model.raw.contains(&("display".into(), "none".into())));
        assert_eq!(model.raw_heading(), "All computed properties (8)");
    }

    #[test]
    fn missing_summary_fields_are_blank() {
        let model = PanelModel::build(
            &ComputedStyleSnapshot::new(),
            &Geometry::default(),
            &InspectorConfig::default(),
        );
        assert_eq!(model.summary.position, "");
        assert_eq!(model.summary.display, "");
        assert!(model.raw.is_empty());
        assert!(model.sections.iter().all(CategorySection::is_empty));
    }

    #[test]
    fn text_rendering() {
        let config = InspectorConfig::default()
            .with_empty_categories(EmptyCategories::Hide)
            .with_raw_open(true);
        let snap = ComputedStyleSnapshot::from_pairs([("display", "block"), ("opacity", "0.5")]);
        let model = PanelModel::build(&snap, &Geometry::new(0.0, 0.0, 10.0, 20.0), &config);
        assert_eq!(
            model.to_text(),
            "Computed Styles\n\
             \x20 size: 10 x 20 px\n\
             \x20 position:   display: block\n\
             [Layout (1)]\n\
             \x20 display: block\n\
             [Visual (1)]\n\
             \x20 opacity: 0.5\n\
             v All computed properties (2)\n\
             \x20 display: block\n\
             \x20 opacity: 0.5\n"
        );
    }

    #[test]
    fn collapsed_text_omits_raw_entries() {
        let snap = ComputedStyleSnapshot::from_pairs([("display", "block")]);
        let model = PanelModel::build(&snap, &Geometry::default(), &InspectorConfig::default());
        let text = model.to_text();
        assert!(text.ends_with("> All computed properties (1)\n"));
        assert!(text.contains("[Grid (0)]\n"));
    }
}
