//! Common test utilities for apiwrap integration tests
//!
//! Provides a recording logger for asserting on emitted log records and
//! small helpers for building ordered parameter maps.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use serde_json::Value as JsonValue;

use apiwrap::{LogLevel, Logger, ParamMap};

/// Logger that records every emitted record for later assertions
#[derive(Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<(LogLevel, JsonValue)>>,
}

impl RecordingLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn records(&self) -> Vec<(LogLevel, JsonValue)> {
        self.records.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: LogLevel, message: &JsonValue) {
        self.records.lock().unwrap().push((level, message.clone()));
    }
}

/// Build an ordered parameter map from string pairs
pub fn map(pairs: &[(&str, &str)]) -> ParamMap {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}
