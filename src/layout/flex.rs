//! # Column Width Resolution
//!
//! Divides a horizontal span among fixed and flexible columns. Fixed columns
//! get exactly what they ask for; whatever is left after fixed widths and
//! inter-column spacing is shared evenly by the flex columns.

use serde::{Deserialize, Serialize};

/// Width request of a single column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum ColumnWidth {
    /// Exactly this many points.
    Fixed(f64),
    /// An equal share of the remaining span.
    #[default]
    Flex,
}

/// Resolve column requests into concrete widths over `span`.
///
/// With at least one flex column the widths plus `spacing × (n − 1)` add up
/// to `span`. A flex share may come out negative when fixed columns already
/// overflow; that is left to surface as visual overlap.
pub fn resolve_widths(specs: &[ColumnWidth], span: f64, spacing: f64) -> Vec<f64> {
    if specs.is_empty() {
        return Vec::new();
    }

    let total_spacing = spacing * (specs.len() - 1) as f64;
    let mut fixed_total = 0.0;
    let mut flex_count = 0usize;
    for spec in specs {
        match spec {
            ColumnWidth::Fixed(w) => fixed_total += w,
            ColumnWidth::Flex => flex_count += 1,
        }
    }

    let flex_width = if flex_count > 0 {
        (span - fixed_total - total_spacing) / flex_count as f64
    } else {
        0.0
    };

    specs
        .iter()
        .map(|spec| match spec {
            ColumnWidth::Fixed(w) => *w,
            ColumnWidth::Flex => flex_width,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_flex_fixed_with_spacing() {
        let widths = resolve_widths(
            &[ColumnWidth::Fixed(160.0), ColumnWidth::Flex, ColumnWidth::Fixed(70.0)],
            595.0,
            20.0,
        );
        assert_eq!(widths, vec![160.0, 325.0, 70.0]);
    }

    #[test]
    fn flex_columns_share_evenly() {
        let widths = resolve_widths(&[ColumnWidth::Flex, ColumnWidth::Flex], 100.0, 0.0);
        assert_eq!(widths, vec![50.0, 50.0]);
    }

    #[test]
    fn widths_and_spacing_reproduce_span() {
        let specs = [
            ColumnWidth::Flex,
            ColumnWidth::Fixed(40.0),
            ColumnWidth::Fixed(65.0),
            ColumnWidth::Flex,
            ColumnWidth::Fixed(45.0),
            ColumnWidth::Flex,
        ];
        for &(span, spacing) in &[(515.0, 0.0), (333.3, 7.25), (1000.0, 12.0)] {
            let widths = resolve_widths(&specs, span, spacing);
            let total: f64 = widths.iter().sum::<f64>() + spacing * (specs.len() - 1) as f64;
            assert!((total - span).abs() < 1e-9, "span {span} resolved to {total}");
        }
    }

    #[test]
    fn no_flex_columns_keep_fixed_widths() {
        let widths = resolve_widths(&[ColumnWidth::Fixed(30.0), ColumnWidth::Fixed(40.0)], 500.0, 5.0);
        assert_eq!(widths, vec![30.0, 40.0]);
    }

    #[test]
    fn empty_specs_resolve_to_nothing() {
        assert!(resolve_widths(&[], 500.0, 10.0).is_empty());
    }
}
