//! Mission data structures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A mission entry discovered on the catalog index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionStub {
    /// Whitespace-collapsed anchor text, unique within a run
    pub title: String,

    /// Absolute URL of the mission's detail page
    pub url: String,
}

impl MissionStub {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// A mission harvested from its detail page.
///
/// Serializes as a flat object: `name`, every attribute, then `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MissionRecord {
    /// Mission name, copied from the index entry
    pub name: String,

    /// Canonical attribute key to collapsed cell text
    #[serde(flatten)]
    pub attributes: BTreeMap<String, String>,

    /// Sequential id, 0 until the pipeline numbers the final collection
    #[serde(default)]
    pub id: u32,
}

impl MissionRecord {
    /// Start an empty record for an index entry.
    pub fn from_stub(stub: &MissionStub) -> Self {
        Self {
            name: stub.title.clone(),
            attributes: BTreeMap::new(),
            id: 0,
        }
    }

    /// Set an attribute, replacing any earlier value under the same key.
    ///
    /// A `name` row renames the record. An `id` row is accepted but its
    /// value is dropped, since `finalize` numbers every record. Returns
    /// `false` only when the key or value is empty.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        let value = value.into();
        if key.is_empty() || value.is_empty() {
            return false;
        }
        match key.as_str() {
            "name" => self.name = value,
            "id" => {}
            _ => {
                self.attributes.insert(key, value);
            }
        }
        true
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Reverse extraction order and number the result from 1.
///
/// The catalog lists missions oldest first; the output presents the most
/// recently listed mission first.
pub fn finalize(mut records: Vec<MissionRecord>) -> Vec<MissionRecord> {
    records.reverse();
    for (position, record) in records.iter_mut().enumerate() {
        record.id = position as u32 + 1;
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> MissionRecord {
        let mut record = MissionRecord::from_stub(&MissionStub::new(name, "https://example.com"));
        record.set_attribute("orbit_type", "LEO");
        record
    }

    #[test]
    fn test_set_attribute_last_wins() {
        let mut record = record("Chandrayaan-3");
        assert!(record.set_attribute("launch_date", "14 July 2023"));
        assert!(record.set_attribute("launch_date", "July 14, 2023"));
        assert_eq!(record.get("launch_date"), Some("July 14, 2023"));
        assert_eq!(record.attributes.len(), 2);
    }

    #[test]
    fn test_set_attribute_rejects_empty_pairs() {
        let mut record = MissionRecord::from_stub(&MissionStub::new("X", "https://example.com"));
        assert!(!record.set_attribute("orbit_type", ""));
        assert!(!record.set_attribute("", "LEO"));
        assert!(!record.set_attribute("name", ""));
        assert!(record.attributes.is_empty());
        assert_eq!(record.name, "X");
    }

    #[test]
    fn test_set_attribute_name_and_id_rows() {
        let mut record = MissionRecord::from_stub(&MissionStub::new("GSAT-7", "https://example.com"));
        assert!(record.set_attribute("name", "GSAT-7 (Rukmini)"));
        assert!(record.set_attribute("id", "GSAT-7A"));
        assert_eq!(record.name, "GSAT-7 (Rukmini)");
        assert!(record.attributes.is_empty());

        let records = finalize(vec![record]);
        assert_eq!(records[0].id, 1);
        let value = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(value["id"], 1);
    }

    #[test]
    fn test_finalize_reverses_and_numbers() {
        let records = finalize(vec![record("A"), record("B"), record("C")]);
        let order: Vec<_> = records.iter().map(|r| (r.name.as_str(), r.id)).collect();
        assert_eq!(order, vec![("C", 1), ("B", 2), ("A", 3)]);
    }

    #[test]
    fn test_finalize_empty() {
        assert!(finalize(Vec::new()).is_empty());
    }

    #[test]
    fn test_serializes_flat() {
        let mut record = record("Aditya-L1");
        record.id = 4;
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["name"], "Aditya-L1");
        assert_eq!(value["orbit_type"], "LEO");
        assert_eq!(value["id"], 4);
        assert!(value.get("attributes").is_none());
    }

    #[test]
    fn test_deserializes_flat() {
        let json = r#"{"name": "GSAT-7", "launch_date": "Aug 30, 2013", "id": 2}"#;
        let record: MissionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 2);
        assert_eq!(record.get("launch_date"), Some("Aug 30, 2013"));
        assert_eq!(record.attributes.len(), 1);
    }
}
