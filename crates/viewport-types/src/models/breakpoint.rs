//! Breakpoint tables and device-class defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::device::DeviceClass;

/// Mapping from breakpoint name to its configured pixel width.
///
/// Callers may declare entries in any order; [`BreakpointTable::sorted`] is the
/// one ordering used for both query building and comparisons.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct BreakpointTable(BTreeMap<String, u32>);

impl BreakpointTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a breakpoint.
    pub fn insert(&mut self, name: impl Into<String>, width: u32) -> Option<u32> {
        self.0.insert(name.into(), width)
    }

    /// Configured width for `name`, if present.
    pub fn width(&self, name: &str) -> Option<u32> {
        self.0.get(name).copied()
    }

    /// Whether `name` is a configured breakpoint.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(name, width)| (name.as_str(), *width))
    }

    /// Entries ordered ascending by width, ties broken by name.
    pub fn sorted(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<(&str, u32)> = self.iter().collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Breakpoint names in ascending width order.
    pub fn names_ascending(&self) -> Vec<String> {
        self.sorted().into_iter().map(|(name, _)| name.to_string()).collect()
    }
}

impl<N: Into<String>> FromIterator<(N, u32)> for BreakpointTable {
    fn from_iter<I: IntoIterator<Item = (N, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(name, width)| (name.into(), width)).collect())
    }
}

/// Mapping from a coarse device class (`mobile`, `tablet`, ...) to a breakpoint name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct DefaultBreakpointsMap(BTreeMap<String, String>);

impl DefaultBreakpointsMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, device: impl Into<String>, breakpoint: impl Into<String>) {
        self.0.insert(device.into(), breakpoint.into());
    }

    /// Breakpoint mapped to `device`, if any.
    pub fn resolve(&self, device: &DeviceClass) -> Option<&str> {
        self.0.get(device.as_str()).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(device, breakpoint)| (device.as_str(), breakpoint.as_str()))
    }
}

impl<D: Into<String>, B: Into<String>> FromIterator<(D, B)> for DefaultBreakpointsMap {
    fn from_iter<I: IntoIterator<Item = (D, B)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(d, b)| (d.into(), b.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_ignores_declaration_order() {
        let table: BreakpointTable =
            [("desktop", 1024), ("mobile", 320), ("tablet", 768)].into_iter().collect();

        assert_eq!(table.names_ascending(), vec!["mobile", "tablet", "desktop"]);
    }

    #[test]
    fn test_sorted_breaks_ties_by_name() {
        let table: BreakpointTable =
            [("wide", 1200), ("phablet", 600), ("compact", 600)].into_iter().collect();

        assert_eq!(table.names_ascending(), vec!["compact", "phablet", "wide"]);
    }

    #[test]
    fn test_default_map_resolves_by_device_name() {
        let map: DefaultBreakpointsMap = [("tv", "desktopWide")].into_iter().collect();

        assert_eq!(map.resolve(&DeviceClass::Tv), Some("desktopWide"));
        assert_eq!(map.resolve(&DeviceClass::Mobile), None);
    }

    #[test]
    fn test_table_serializes_as_plain_object() {
        let table: BreakpointTable = [("mobile", 320)].into_iter().collect();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"mobile":320}"#);
    }
}
