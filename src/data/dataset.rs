use itertools::Itertools;
use serde::Serialize;

use crate::data::parser::Measurement;

/// A measurement tagged with the method (source file stem) that produced it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Record {
    pub method: String,
    pub index: u64,
    pub elapsed_seconds: f64,
    pub size_bytes: u64,
}

impl Record {
    pub fn new(method: impl Into<String>, m: Measurement) -> Self {
        Self {
            method: method.into(),
            index: m.index,
            elapsed_seconds: m.elapsed_seconds,
            size_bytes: m.size_bytes,
        }
    }
}

/// Ordered records of every loaded file. Built once per load and never mutated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct methods in order of first appearance.
    pub fn methods(&self) -> Vec<String> {
        self.records.iter().map(|r| r.method.as_str()).unique().map(String::from).collect()
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self { records: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
