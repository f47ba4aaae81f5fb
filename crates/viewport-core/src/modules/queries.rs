//! Media-query builder.
//!
//! Turns a breakpoint table into one CSS media query per breakpoint. Ranges
//! are built from the widest breakpoint down, since each range's upper bound
//! depends on its wider neighbour.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use viewport_types::{BreakpointTable, MediaFeature, MediaQueryRange};

#[derive(Debug, Clone, PartialEq)]
struct QueryEntry {
    name: String,
    range: MediaQueryRange,
    min: Option<f64>,
    max: Option<f64>,
}

impl QueryEntry {
    fn contains(&self, width: f64) -> bool {
        self.min.map_or(true, |min| width >= min) && self.max.map_or(true, |max| width <= max)
    }
}

/// Built queries, kept in ascending width order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaQueries {
    entries: Vec<QueryEntry>,
}

impl MediaQueries {
    pub fn get(&self, name: &str) -> Option<&MediaQueryRange> {
        self.entries.iter().find(|entry| entry.name == name).map(|entry| &entry.range)
    }

    /// Index of `name` in ascending width order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MediaQueryRange)> {
        self.entries.iter().map(|entry| (entry.name.as_str(), &entry.range))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Breakpoints whose range contains a viewport `width` in px.
    pub fn matching(&self, width: f64) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.contains(width))
            .map(|entry| entry.name.as_str())
            .collect()
    }
}

impl Serialize for MediaQueries {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.range)?;
        }
        map.end()
    }
}

/// Render a px value with at most four decimals and no trailing zeros.
fn format_px(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    format!("{}px", rounded)
}

/// Build non-overlapping media queries for every breakpoint in `table`.
///
/// `delta` separates adjacent boundaries. In `MinWidth` mode the narrowest
/// range starts at 1px and the widest is unbounded above.
pub fn build_queries(table: &BreakpointTable, feature: MediaFeature, delta: f64) -> MediaQueries {
    let sorted = table.sorted();
    let mut entries = Vec::with_capacity(sorted.len());

    for (index, &(name, size)) in sorted.iter().enumerate().rev() {
        let next_size = sorted.get(index + 1).map(|&(_, width)| f64::from(width));
        let prev_size =
            index.checked_sub(1).and_then(|i| sorted.get(i)).map(|&(_, width)| f64::from(width));

        let (min, max) = match feature {
            MediaFeature::MinWidth => {
                let min = if index > 0 { f64::from(size) } else { 1.0 };
                (Some(min), next_size.map(|next| next - delta))
            }
            MediaFeature::MaxWidth => (prev_size.map(|prev| prev + delta), Some(f64::from(size))),
        };

        let media_query = match (min, max) {
            (Some(min), Some(max)) => {
                format!("(min-width: {}) and (max-width: {})", format_px(min), format_px(max))
            }
            (Some(min), None) => format!("(min-width: {})", format_px(min)),
            (None, Some(max)) => format!("(max-width: {})", format_px(max)),
            (None, None) => String::new(),
        };

        entries.push(QueryEntry {
            name: name.to_string(),
            range: MediaQueryRange { media_query, size },
            min,
            max,
        });
    }

    entries.reverse();
    MediaQueries { entries }
}
