//! Waste Record Form
//!
//! Editable record header plus line items, kept as typed strings until
//! `validate` turns them into a request payload.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::models::WasteRecord;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub waste_id: String,
    pub amount: String,
    /// Optional per-line override of the final type's factor
    pub factor: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordForm {
    pub company_id: String,
    pub moderator_id: String,
    pub car_num: String,
    pub driv_name: String,
    pub record_date: String,
    pub items: Vec<ItemDraft>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadItem {
    pub waste_id: u64,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WasteRecordPayload {
    pub company_id: u64,
    pub moderator_id: u64,
    pub car_num: String,
    pub driv_name: String,
    pub record_date: String,
    pub items: Vec<PayloadItem>,
}

impl RecordForm {
    /// Blank form for a fixed moderator, dated `today`
    pub fn for_moderator(moderator_id: u64, today: NaiveDate) -> Self {
        Self {
            moderator_id: moderator_id.to_string(),
            record_date: today.format("%Y-%m-%d").to_string(),
            ..Default::default()
        }
    }

    /// Pre-fill from an existing record for editing
    pub fn from_record(record: &WasteRecord) -> Self {
        Self {
            company_id: record.company_id.to_string(),
            moderator_id: record.moderator_id.to_string(),
            car_num: record.car_num.clone().unwrap_or_default(),
            driv_name: record.driv_name.clone().unwrap_or_default(),
            record_date: record.date_only().to_string(),
            items: record
                .items
                .iter()
                .map(|item| ItemDraft {
                    waste_id: item.waste_id.to_string(),
                    amount: item.amount.to_string(),
                    factor: item.factor.map(|f| f.to_string()).unwrap_or_default(),
                })
                .collect(),
        }
    }

    /// Line items may only be added once the owning company (and moderator) is chosen
    pub fn can_add_item(&self, needs_moderator: bool) -> bool {
        !self.company_id.is_empty() && (!needs_moderator || !self.moderator_id.is_empty())
    }

    pub fn add_item(&mut self) {
        self.items.push(ItemDraft::default());
    }

    pub fn remove_item(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    pub fn validate(&self) -> ApiResult<WasteRecordPayload> {
        if self.items.is_empty() {
            return Err(ApiError::validation("Необходимо добавить хотя бы один отход"));
        }

        let required = || ApiError::validation("Заполните все обязательные поля");
        let company_id = parse_id(&self.company_id).ok_or_else(required)?;
        let moderator_id = parse_id(&self.moderator_id).ok_or_else(required)?;
        if self.record_date.trim().is_empty() {
            return Err(required());
        }

        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| item.validate(index + 1))
            .collect::<ApiResult<Vec<_>>>()?;

        Ok(WasteRecordPayload {
            company_id,
            moderator_id,
            car_num: self.car_num.trim().to_string(),
            driv_name: self.driv_name.trim().to_string(),
            record_date: self.record_date.trim().to_string(),
            items,
        })
    }
}

impl ItemDraft {
    /// `number` is the 1-based position shown in messages
    fn validate(&self, number: usize) -> ApiResult<PayloadItem> {
        let waste_id = parse_id(&self.waste_id);
        let amount = self.amount.trim();
        let Some(waste_id) = waste_id.filter(|_| !amount.is_empty()) else {
            return Err(ApiError::validation(format!("Заполните все поля для отхода #{}", number)));
        };

        let amount = parse_decimal(amount)
            .filter(|a| *a > 0.0)
            .ok_or_else(|| ApiError::validation(format!("Объем отхода #{} должен быть больше нуля", number)))?;

        let factor = match self.factor.trim() {
            "" => None,
            raw => match parse_decimal(raw) {
                Some(f) if f == 0.0 => None,
                Some(f) if f > 0.0 => Some(f),
                _ => {
                    return Err(ApiError::validation(format!(
                        "Коэффициент отхода #{} должен быть положительным числом",
                        number
                    )))
                }
            },
        };

        Ok(PayloadItem { waste_id, amount, factor })
    }
}

fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse().ok().filter(|id| *id > 0)
}

fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RecordForm {
        RecordForm {
            company_id: "2".into(),
            moderator_id: "3".into(),
            car_num: " 123ABC02 ".into(),
            driv_name: "Иван".into(),
            record_date: "2024-01-05".into(),
            items: vec![ItemDraft {
                waste_id: "5".into(),
                amount: "1.5".into(),
                factor: String::new(),
            }],
        }
    }

    fn message(form: &RecordForm) -> String {
        form.validate().unwrap_err().user_message("")
    }

    #[test]
    fn test_valid_form() {
        let payload = filled().validate().unwrap();
        assert_eq!(payload.company_id, 2);
        assert_eq!(payload.car_num, "123ABC02");
        assert_eq!(payload.items, vec![PayloadItem { waste_id: 5, amount: 1.5, factor: None }]);
    }

    #[test]
    fn test_moderator_form_prefill() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let form = RecordForm::for_moderator(12, day);

        assert_eq!(form.moderator_id, "12");
        assert_eq!(form.record_date, "2024-03-07");
        assert!(!form.can_add_item(false));
    }

    #[test]
    fn test_no_items() {
        let mut form = filled();
        form.items.clear();
        assert_eq!(message(&form), "Необходимо добавить хотя бы один отход");
    }

    #[test]
    fn test_missing_header_fields() {
        let clears: [fn(&mut RecordForm); 3] = [
            |f| f.company_id.clear(),
            |f| f.moderator_id.clear(),
            |f| f.record_date.clear(),
        ];
        for clear in clears {
            let mut form = filled();
            clear(&mut form);
            assert_eq!(message(&form), "Заполните все обязательные поля");
        }
    }

    #[test]
    fn test_item_numbering_and_checks() {
        let mut form = filled();
        form.items.push(ItemDraft { waste_id: String::new(), amount: "1".into(), factor: String::new() });
        assert_eq!(message(&form), "Заполните все поля для отхода #2");

        form.items[1] = ItemDraft { waste_id: "6".into(), amount: "0".into(), factor: String::new() };
        assert_eq!(message(&form), "Объем отхода #2 должен быть больше нуля");

        form.items[1].amount = "-3".into();
        assert_eq!(message(&form), "Объем отхода #2 должен быть больше нуля");
    }

    #[test]
    fn test_factor_rules() {
        let mut form = filled();

        form.items[0].factor = "0".into();
        assert_eq!(form.validate().unwrap().items[0].factor, None);

        form.items[0].factor = "0,75".into();
        assert_eq!(form.validate().unwrap().items[0].factor, Some(0.75));

        form.items[0].factor = "-1".into();
        assert_eq!(message(&form), "Коэффициент отхода #1 должен быть положительным числом");

        form.items[0].factor = "abc".into();
        assert_eq!(message(&form), "Коэффициент отхода #1 должен быть положительным числом");
    }

    #[test]
    fn test_from_record_strips_time() {
        let record: WasteRecord = serde_json::from_value(serde_json::json!({
            "id": 1, "company_id": 2, "moderator_id": 3,
            "record_date": "2024-01-05T10:00:00Z",
            "items": [{"waste_id": 5, "amount": "2.5", "factor": "0.5"}]
        }))
        .unwrap();

        let form = RecordForm::from_record(&record);
        assert_eq!(form.record_date, "2024-01-05");
        assert_eq!(form.items[0].amount, "2.5");
        assert_eq!(form.items[0].factor, "0.5");
    }

    #[test]
    fn test_add_item_gate() {
        let mut form = RecordForm::default();
        assert!(!form.can_add_item(false));
        form.company_id = "1".into();
        assert!(form.can_add_item(false));
        assert!(!form.can_add_item(true));
        form.moderator_id = "2".into();
        assert!(form.can_add_item(true));

        form.add_item();
        form.add_item();
        form.remove_item(0);
        form.remove_item(7);
        assert_eq!(form.items.len(), 1);
    }
}
