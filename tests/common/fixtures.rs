//! Test fixtures and data factories

use bulk_import::{ImportRecord, RawRow, UserType};
use serde_json::{Value, json};

/// Factory for raw input rows
pub struct RowFactory;

impl RowFactory {
    /// A row that passes every rule
    pub fn valid(index: usize) -> RawRow {
        Self::from_value(json!({
            "username": format!("user_{}", index),
            "email": format!("user{}@example.com", index),
            "password": "Str0ng!Pass",
            "userType": "2",
            "isActive": "true",
        }))
    }

    /// `count` distinct valid rows
    pub fn many(count: usize) -> Vec<RawRow> {
        (0..count).map(Self::valid).collect()
    }

    /// A valid row with one field replaced
    pub fn with(index: usize, field: &str, value: Value) -> RawRow {
        let mut row = Self::valid(index);
        row.insert(field.to_string(), value);
        row
    }

    pub fn from_value(value: Value) -> RawRow {
        match value {
            Value::Object(map) => map,
            other => panic!("row fixture must be an object, got {}", other),
        }
    }
}

/// Factory for validated records
pub struct RecordFactory;

impl RecordFactory {
    pub fn create(index: usize) -> ImportRecord {
        ImportRecord {
            username: format!("user_{}", index),
            email: format!("user{}@example.com", index),
            password: "Str0ng!Pass".to_string(),
            user_type: UserType::new(2).expect("2 is a valid user type"),
            is_active: true,
        }
    }

    pub fn many(count: usize) -> Vec<ImportRecord> {
        (0..count).map(Self::create).collect()
    }
}
