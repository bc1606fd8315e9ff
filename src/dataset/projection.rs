use std::collections::HashMap;
use rayon::prelude::*;
use serde::{Serialize, Deserialize};
use crate::core::types::{FieldValue, GameRecord};

/// Below this many rows projections stay on the calling thread
const PARALLEL_THRESHOLD: usize = 10_000;

/// Lightweight record view holding only the requested columns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    pub fields: HashMap<String, FieldValue>,
}

impl Row {
    pub fn from_record(record: &GameRecord, fields: &[&str]) -> Self {
        Row {
            fields: fields
                .iter()
                .map(|name| (name.to_string(), record.field(name)))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_f64)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Project every record, keeping load order.
pub fn project_all(records: &[GameRecord], fields: &[&str]) -> Vec<Row> {
    if records.len() < PARALLEL_THRESHOLD {
        return records.iter().map(|r| Row::from_record(r, fields)).collect();
    }

    // Indexed parallel iterators collect in input order
    records
        .par_iter()
        .map(|r| Row::from_record(r, fields))
        .collect()
}

/// Project the records at `indices`, in the order given.
pub fn project_indices(records: &[GameRecord], indices: &[usize], fields: &[&str]) -> Vec<Row> {
    if indices.len() < PARALLEL_THRESHOLD {
        return indices
            .iter()
            .map(|&i| Row::from_record(&records[i], fields))
            .collect();
    }

    indices
        .par_iter()
        .map(|&i| Row::from_record(&records[i], fields))
        .collect()
}
