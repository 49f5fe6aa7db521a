use serde::{Deserialize, Serialize};
use std::fmt;

/// Infrastructure bucket a module type falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Database,
    Broker,
    Cache,
    Volume,
    Stateless,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Database => "database",
            ResourceKind::Broker => "broker",
            ResourceKind::Cache => "cache",
            ResourceKind::Volume => "volume",
            ResourceKind::Stateless => "stateless",
        }
    }

    /// Whether removing or reconfiguring a resource of this kind risks data loss.
    ///
    /// Caches are ephemeral by default and therefore not stateful.
    pub fn is_stateful(self) -> bool {
        matches!(
            self,
            ResourceKind::Database | ResourceKind::Broker | ResourceKind::Volume
        )
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
