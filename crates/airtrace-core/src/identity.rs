//! Identity and detail types for scanned signal sources

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Title used for networks that do not broadcast their name
const HIDDEN_SSID: &str = "***";

/// Unique identity of a series: network name plus hardware address
///
/// Two scans refer to the same series iff both fields match.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DetailKey {
    pub ssid: String,
    pub bssid: String,
}

impl DetailKey {
    /// Create a new key
    pub fn new(ssid: impl Into<String>, bssid: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            bssid: bssid.into(),
        }
    }

    /// Check whether the network name is hidden
    pub fn is_hidden(&self) -> bool {
        self.ssid.is_empty()
    }
}

impl fmt::Display for DetailKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ssid = if self.is_hidden() {
            HIDDEN_SSID
        } else {
            self.ssid.as_str()
        };
        write!(f, "{} ({})", ssid, self.bssid)
    }
}

/// One signal source as reported by a scan
///
/// Equality, ordering and hashing only look at [`DetailKey`], so a detail
/// stays the "same" element of a set across ticks while its level changes.
/// `frequency` and `capabilities` are carried along for display and are never
/// inspected by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detail {
    pub key: DetailKey,
    /// Signal level in dBm
    pub level: i32,
    /// Primary frequency in MHz
    #[serde(default)]
    pub frequency: u32,
    #[serde(default)]
    pub capabilities: String,
}

impl Detail {
    /// Create a detail with no extra metadata
    pub fn new(ssid: impl Into<String>, bssid: impl Into<String>, level: i32) -> Self {
        Self {
            key: DetailKey::new(ssid, bssid),
            level,
            frequency: 0,
            capabilities: String::new(),
        }
    }

    /// Attach the frequency
    pub fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }

    /// Attach the capabilities string
    pub fn with_capabilities(mut self, capabilities: impl Into<String>) -> Self {
        self.capabilities = capabilities.into();
        self
    }

    /// Series title for this detail
    pub fn title(&self) -> String {
        self.key.to_string()
    }
}

impl PartialEq for Detail {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Detail {}

impl PartialOrd for Detail {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Detail {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl Hash for Detail {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

/// A plotted point: tick on the x-axis, signal level on the y-axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: u64,
    pub y: i32,
}

impl DataPoint {
    /// Create a new data point
    pub fn new(x: u64, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for DataPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_detail_key_display() {
        let key = DetailKey::new("home", "aa:bb:cc:dd:ee:ff");
        assert_eq!(key.to_string(), "home (aa:bb:cc:dd:ee:ff)");

        let hidden = DetailKey::new("", "aa:bb:cc:dd:ee:ff");
        assert!(hidden.is_hidden());
        assert_eq!(hidden.to_string(), "*** (aa:bb:cc:dd:ee:ff)");
    }

    #[test]
    fn test_detail_identity_ignores_level() {
        let a = Detail::new("home", "bssid", -40);
        let b = Detail::new("home", "bssid", -75).with_frequency(5180);
        assert_eq!(a, b);

        let mut set = BTreeSet::new();
        set.insert(a);
        assert!(!set.insert(b));
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next().map(|d| d.level), Some(-40));
    }

    #[test]
    fn test_detail_identity_needs_both_fields() {
        let a = Detail::new("home", "bssid-1", -40);
        let b = Detail::new("home", "bssid-2", -40);
        let c = Detail::new("office", "bssid-1", -40);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_detail_ordering() {
        let set: BTreeSet<_> = [
            Detail::new("b", "1", -50),
            Detail::new("a", "2", -50),
            Detail::new("a", "1", -50),
        ]
        .into_iter()
        .collect();
        let titles: Vec<_> = set.iter().map(Detail::title).collect();
        assert_eq!(titles, vec!["a (1)", "a (2)", "b (1)"]);
    }

    #[test]
    fn test_detail_from_ron() {
        let detail: Detail =
            ron::from_str(r#"(key: (ssid: "cafe", bssid: "01:02"), level: -61)"#).unwrap();
        assert_eq!(detail.key, DetailKey::new("cafe", "01:02"));
        assert_eq!(detail.level, -61);
        assert_eq!(detail.frequency, 0);
        assert!(detail.capabilities.is_empty());
    }
}
