//! Conversion history records.

use crate::core::rates::Conversion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A completed conversion. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub result: f64,
    pub rate: f64,
    pub at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Records a successful conversion, stamped with the time the rate was
    /// fetched.
    pub fn record(from: &str, to: &str, amount: f64, conversion: &Conversion) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            from: from.to_string(),
            to: to.to_string(),
            amount,
            result: conversion.result,
            rate: conversion.rate,
            at: conversion.fetched_at,
        }
    }
}
