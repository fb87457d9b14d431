//! Per-URI failures of a batch operation.

use crate::error::{ErrorKind, RedfishError};
use std::collections::BTreeMap;

/// Mapping from URI to the error that URI produced.
///
/// Returned alongside the successful items of every batch; callers decide
/// whether a non-empty report is fatal for them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FailureReport(BTreeMap<String, RedfishError>);

impl FailureReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, uri: impl Into<String>, error: RedfishError) {
        self.0.insert(uri.into(), error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, uri: &str) -> Option<&RedfishError> {
        self.0.get(uri)
    }

    pub fn kind_of(&self, uri: &str) -> Option<ErrorKind> {
        self.get(uri).map(RedfishError::kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RedfishError)> {
        self.0.iter().map(|(uri, e)| (uri.as_str(), e))
    }

    pub fn uris(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn extend(&mut self, other: FailureReport) {
        self.0.extend(other.0);
    }
}

impl IntoIterator for FailureReport {
    type Item = (String, RedfishError);
    type IntoIter = std::collections::btree_map::IntoIter<String, RedfishError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_basics() {
        let mut report = FailureReport::new();
        assert!(report.is_empty());

        report.insert(
            "/redfish/v1/Chassis/2",
            RedfishError::NotFound {
                uri: "/redfish/v1/Chassis/2".into(),
            },
        );
        let mut other = FailureReport::new();
        other.insert(
            "/redfish/v1/Chassis/3",
            RedfishError::Cancelled {
                uri: "/redfish/v1/Chassis/3".into(),
            },
        );
        report.extend(other);

        assert_eq!(report.len(), 2);
        assert_eq!(report.kind_of("/redfish/v1/Chassis/2"), Some(ErrorKind::NotFound));
        assert_eq!(report.kind_of("/redfish/v1/Chassis/3"), Some(ErrorKind::Cancelled));
        assert_eq!(report.kind_of("/redfish/v1/Chassis/1"), None);
        assert_eq!(report.uris().count(), 2);
    }
}
