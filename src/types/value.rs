use std::cmp::Ordering;

use chrono::NaiveDateTime;

/// Orderable content of a cell, used by column sorting.
///
/// Ordering is defined within a variant. Across variants (and for NaN
/// floats) values compare as having no defined order; under the stable sort
/// used by the sorter such pairs keep their relative positions.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    Date(NaiveDateTime),
    /// No orderable content.
    None,
}

impl CellValue {
    /// Compare two values for sorting. `None` sorts before any value, as in
    /// the null-first convention of the comparator this replaces.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::None, CellValue::None) => Ordering::Equal,
            (CellValue::None, _) => Ordering::Less,
            (_, CellValue::None) => Ordering::Greater,
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Float(a), CellValue::Float(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (CellValue::Int(a), CellValue::Float(b)) => {
                (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (CellValue::Float(a), CellValue::Int(b)) => {
                a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal)
            }
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            // Mixed types: no defined order.
            _ => Ordering::Equal,
        }
    }
}
