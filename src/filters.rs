//! Report & List Filters
//!
//! Filter state for report pages and list screens, required-field checks,
//! and conversion to query parameters.

use chrono::{Datelike, NaiveDate};

use crate::api::Query;
use crate::config::DEFAULT_PAGE_SIZE;
use crate::session::Role;

/// Who a report is scoped to; decides required fields and extra parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScope {
    /// Admin category report: dates, moderator and at least one company
    Admin,
    /// Admin final-processing report: dates only
    FinalProcessing,
    /// Signed-in moderator's own companies
    Moderator { moderator_id: u64 },
    /// Signed-in company
    Company { company_id: u64 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilters {
    pub start_date: String,
    pub end_date: String,
    pub moderator_id: String,
    pub company_ids: Vec<String>,
    pub car_num: String,
    pub driv_name: String,
}

impl ReportFilters {
    /// Filters covering the calendar month of `today`
    pub fn current_month(today: NaiveDate) -> Self {
        let (start_date, end_date) = month_range(today);
        Self {
            start_date,
            end_date,
            ..Default::default()
        }
    }

    /// Selecting another moderator invalidates the company selection
    pub fn set_moderator(&mut self, moderator_id: String) {
        if self.moderator_id != moderator_id {
            self.company_ids.clear();
        }
        self.moderator_id = moderator_id;
    }

    pub fn toggle_company(&mut self, company_id: &str) {
        if let Some(pos) = self.company_ids.iter().position(|id| id == company_id) {
            self.company_ids.remove(pos);
        } else {
            self.company_ids.push(company_id.to_string());
        }
    }

    /// First missing required field for the scope, as a display message
    pub fn missing(&self, scope: ReportScope) -> Option<&'static str> {
        if self.start_date.trim().is_empty() || self.end_date.trim().is_empty() {
            return Some(match scope {
                ReportScope::FinalProcessing => "Выберите период для отчета",
                _ => "Пожалуйста, выберите даты начала и окончания периода",
            });
        }
        if scope == ReportScope::Admin {
            if self.moderator_id.trim().is_empty() {
                return Some("Выберите модератора");
            }
            if self.company_ids.is_empty() {
                return Some("Выберите хотя бы одну компанию");
            }
        }
        None
    }

    /// Whether the search/export actions may fire
    pub fn is_ready(&self, scope: ReportScope) -> bool {
        self.missing(scope).is_none()
    }

    pub fn to_query(&self, scope: ReportScope) -> Query {
        let mut query = Query::new();
        push_non_empty(&mut query, "start_date", &self.start_date);
        push_non_empty(&mut query, "end_date", &self.end_date);

        match scope {
            ReportScope::Admin | ReportScope::FinalProcessing => {
                push_non_empty(&mut query, "moderator_id", &self.moderator_id);
            }
            ReportScope::Moderator { moderator_id } => {
                query.push(("moderator_id".into(), moderator_id.to_string()));
            }
            ReportScope::Company { company_id } => {
                query.push(("company_id".into(), company_id.to_string()));
                query.push(("role".into(), Role::Company.as_str().into()));
            }
        }

        for id in &self.company_ids {
            query.push(("company_ids[]".into(), id.clone()));
        }
        push_non_empty(&mut query, "car_num", &self.car_num);
        push_non_empty(&mut query, "driv_name", &self.driv_name);

        if scope == ReportScope::FinalProcessing {
            query.push(("view_type".into(), "operations".into()));
        }
        query
    }
}

/// Search form of the waste-record screen
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFilters {
    pub company_name: String,
    pub bin: String,
    pub start_date: String,
    pub end_date: String,
    pub moderator_id: String,
    pub driv_name: String,
    pub car_num: String,
    pub per_page: u32,
}

impl Default for RecordFilters {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            bin: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            moderator_id: String::new(),
            driv_name: String::new(),
            car_num: String::new(),
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl RecordFilters {
    /// `page` is 1-based, as the backend expects
    pub fn to_query(&self, page: u32) -> Query {
        let mut query = Query::new();
        push_non_empty(&mut query, "company_name", &self.company_name);
        push_non_empty(&mut query, "bin", &self.bin);
        push_non_empty(&mut query, "start_date", &self.start_date);
        push_non_empty(&mut query, "end_date", &self.end_date);
        push_non_empty(&mut query, "moderator_id", &self.moderator_id);
        push_non_empty(&mut query, "driv_name", &self.driv_name);
        push_non_empty(&mut query, "car_num", &self.car_num);
        query.push(("page".into(), page.max(1).to_string()));
        query.push(("per_page".into(), self.per_page.to_string()));
        query
    }
}

/// Users table query
#[derive(Debug, Clone, PartialEq)]
pub struct UserQuery {
    /// 0-based, as displayed
    pub page: u32,
    pub per_page: u32,
    pub search: String,
    pub role: Option<Role>,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: DEFAULT_PAGE_SIZE,
            search: String::new(),
            role: None,
        }
    }
}

impl UserQuery {
    pub fn to_query(&self) -> Query {
        let mut query = vec![
            ("page".to_string(), (self.page + 1).to_string()),
            ("per_page".to_string(), self.per_page.to_string()),
        ];
        push_non_empty(&mut query, "search", &self.search);
        if let Some(role) = self.role {
            query.push(("role".into(), role.as_str().into()));
        }
        query
    }
}

fn push_non_empty(query: &mut Query, key: &str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        query.push((key.to_string(), value.to_string()));
    }
}

/// First and last day of the month containing `day`, as `YYYY-MM-DD`
pub fn month_range(day: NaiveDate) -> (String, String) {
    let first = day.with_day(1).unwrap_or(day);
    let (year, month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    let last = NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(first);

    (first.format("%Y-%m-%d").to_string(), last.format("%Y-%m-%d").to_string())
}

/// Today's date in the browser's local time zone
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
