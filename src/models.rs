//! Frontend Models
//!
//! Data structures matching backend JSON shapes.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// User account (matches `/api/v1/users`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub bin_company: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub moderator_id: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub bin_company: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub moderator_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Moderator {
    pub id: u64,
    pub name: String,
}

/// Minimal `{id, name}` reference embedded in other resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteCategory {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalWasteTypeRef {
    pub id: u64,
    #[serde(default)]
    pub final_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waste {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub category_id: Option<u64>,
    #[serde(default)]
    pub final_waste_type_id: Option<u64>,
    #[serde(default)]
    pub category: Option<NamedRef>,
    #[serde(default, alias = "finalWasteType")]
    pub final_waste_type: Option<FinalWasteTypeRef>,
}

impl Waste {
    pub fn effective_category_id(&self) -> Option<u64> {
        self.category_id.or_else(|| self.category.as_ref().map(|c| c.id))
    }

    pub fn effective_final_type_id(&self) -> Option<u64> {
        self.final_waste_type_id
            .or_else(|| self.final_waste_type.as_ref().map(|t| t.id))
    }

    pub fn category_name(&self) -> &str {
        self.category.as_ref().map(|c| c.name.as_str()).unwrap_or("Без категории")
    }

    pub fn final_type_name(&self) -> &str {
        self.final_waste_type
            .as_ref()
            .map(|t| t.final_name.as_str())
            .unwrap_or("Не указан")
    }
}

/// Aggregation bucket for final-processing reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalWasteType {
    pub id: u64,
    pub final_name: String,
    pub type_operation: String,
    #[serde(deserialize_with = "number_from_any")]
    pub factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteRecordItem {
    pub waste_id: u64,
    #[serde(deserialize_with = "number_from_any")]
    pub amount: f64,
    #[serde(default, deserialize_with = "optional_number_from_any")]
    pub factor: Option<f64>,
    #[serde(default)]
    pub waste: Option<NamedRef>,
}

/// Dated delivery event with waste line items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteRecord {
    pub id: u64,
    pub company_id: u64,
    pub moderator_id: u64,
    #[serde(default)]
    pub car_num: Option<String>,
    #[serde(default)]
    pub driv_name: Option<String>,
    pub record_date: String,
    #[serde(default)]
    pub items: Vec<WasteRecordItem>,
    #[serde(default)]
    pub company: Option<NamedRef>,
    #[serde(default)]
    pub moderator: Option<NamedRef>,
}

impl WasteRecord {
    /// `YYYY-MM-DD` part of the record date
    pub fn date_only(&self) -> &str {
        self.record_date.split('T').next().unwrap_or(&self.record_date)
    }
}

// ========================
// Request payloads
// ========================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPayload {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WastePayload {
    pub name: String,
    pub slug: String,
    pub category_id: u64,
    pub final_waste_type_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalWasteTypePayload {
    pub final_name: String,
    pub type_operation: String,
    pub factor: f64,
}

/// New account; the password is only ever sent on create
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub bin_company: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub role: String,
    pub bin_company: String,
    pub description: String,
}

// ========================
// Envelopes
// ========================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub last_page: Option<u32>,
}

fn first_page() -> u32 {
    1
}

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: Option<PageMeta>,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self { data: Vec::new(), meta: None }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Paginated<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Shape<T> {
            Paged {
                data: Vec<T>,
                #[serde(default)]
                meta: Option<PageMeta>,
            },
            Bare(Vec<T>),
        }

        Ok(match Shape::deserialize(deserializer)? {
            Shape::Paged { data, meta } => Paginated { data, meta },
            Shape::Bare(data) => Paginated { data, meta: None },
        })
    }
}

/// A resource returned either bare or wrapped in `{ "data": ... }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } | Envelope::Bare(data) => data,
        }
    }
}

/// `{ "user": ... }` body returned by register/update
#[derive(Debug, Clone, Deserialize)]
pub struct UserEnvelope {
    pub user: User,
}

// ========================
// Lenient numbers
// ========================

/// Accept JSON numbers and numeric strings (decimal columns arrive as strings)
pub fn lenient_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn number_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    lenient_f64(&value).ok_or_else(|| D::Error::custom(format!("expected a number, got {}", value)))
}

/// Null, blank or non-numeric values read as zero
pub(crate) fn number_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_f64(&value).unwrap_or(0.0))
}

pub(crate) fn optional_number_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        Value::String(ref s) if s.trim().is_empty() => Ok(None),
        other => lenient_f64(&other)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a number, got {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_type_factor_accepts_string() {
        let t: FinalWasteType = serde_json::from_str(
            r#"{"id":3,"final_name":"Пластик","type_operation":"Переработка","factor":"1.50"}"#,
        )
        .unwrap();
        assert_eq!(t.factor, 1.5);
    }

    #[test]
    fn test_waste_nested_refs() {
        let w: Waste = serde_json::from_str(
            r#"{"id":1,"name":"ПЭТ","slug":"pet","category":{"id":4,"name":"Пластик"},"finalWasteType":{"id":9,"final_name":"Вторсырьё"}}"#,
        )
        .unwrap();
        assert_eq!(w.effective_category_id(), Some(4));
        assert_eq!(w.effective_final_type_id(), Some(9));
        assert_eq!(w.category_name(), "Пластик");
        assert_eq!(w.final_type_name(), "Вторсырьё");
    }

    #[test]
    fn test_waste_without_refs() {
        let w: Waste = serde_json::from_str(r#"{"id":2,"name":"Стекло"}"#).unwrap();
        assert_eq!(w.category_name(), "Без категории");
        assert_eq!(w.final_type_name(), "Не указан");
    }

    #[test]
    fn test_paginated_both_shapes() {
        let paged: Paginated<Moderator> = serde_json::from_str(
            r#"{"data":[{"id":1,"name":"A"}],"meta":{"current_page":2,"per_page":10,"total":11}}"#,
        )
        .unwrap();
        assert_eq!(paged.data.len(), 1);
        assert_eq!(paged.meta.as_ref().map(|m| m.current_page), Some(2));

        let bare: Paginated<Moderator> = serde_json::from_str(r#"[{"id":1,"name":"A"},{"id":2,"name":"B"}]"#).unwrap();
        assert_eq!(bare.data.len(), 2);
        assert!(bare.meta.is_none());
    }

    #[test]
    fn test_envelope_both_shapes() {
        let wrapped: Envelope<WasteCategory> =
            serde_json::from_str(r#"{"data":{"id":1,"name":"Пластик","slug":"plastik"}}"#).unwrap();
        let bare: Envelope<WasteCategory> = serde_json::from_str(r#"{"id":1,"name":"Пластик","slug":"plastik"}"#).unwrap();
        assert_eq!(wrapped.into_inner(), bare.into_inner());
    }

    #[test]
    fn test_record_item_factor_nullable() {
        let item: WasteRecordItem = serde_json::from_str(r#"{"waste_id":5,"amount":"2.5","factor":null}"#).unwrap();
        assert_eq!(item.amount, 2.5);
        assert_eq!(item.factor, None);
    }

    #[test]
    fn test_record_date_only() {
        let record: WasteRecord = serde_json::from_str(
            r#"{"id":1,"company_id":2,"moderator_id":3,"record_date":"2024-01-05T00:00:00.000000Z"}"#,
        )
        .unwrap();
        assert_eq!(record.date_only(), "2024-01-05");
    }
}
