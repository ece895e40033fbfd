//! Waste records: filtered, paginated search with edit and delete.

use leptos::prelude::*;

use super::{launch, replace, splice_remove, ResourceState};
use crate::api::{ApiClient, Navigator, Transport};
use crate::context::{use_app_context, AppContext};
use crate::error::ApiResult;
use crate::filters::RecordFilters;
use crate::models::{PageMeta, Paginated, WasteRecord};
use crate::record_form::WasteRecordPayload;
use crate::storage::KeyValueStore;

const LOAD_ERROR: &str = "Ошибка загрузки записей";
const SAVE_ERROR: &str = "Ошибка при сохранении";
const DELETE_ERROR: &str = "Ошибка при удалении записи";
const CREATE_ERROR: &str = "Не удалось создать запись";

/// Create (`id` = None) or update, then reload the page currently shown
pub async fn save_record_and_reload<T, S, N>(
    api: &ApiClient<T, S, N>,
    id: Option<u64>,
    payload: &WasteRecordPayload,
    filters: &RecordFilters,
    page: u32,
) -> ApiResult<Paginated<WasteRecord>>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    match id {
        Some(id) => api.update_waste_record(id, payload).await?,
        None => api.create_waste_record(payload).await?,
    }
    api.filter_waste_records(filters, page).await
}

/// Drop a deleted record from the visible page and its total
pub fn remove_record(page: &mut Paginated<WasteRecord>, id: u64) {
    let before = page.data.len();
    splice_remove(&mut page.data, id);
    if page.data.len() < before {
        if let Some(meta) = page.meta.as_mut() {
            meta.total = meta.total.saturating_sub(1);
        }
    }
}

#[derive(Clone, Copy)]
pub struct WasteRecordsHook {
    pub state: RwSignal<ResourceState<Paginated<WasteRecord>>>,
    pub filters: RwSignal<RecordFilters>,
    /// 1-based
    pub page: RwSignal<u32>,
    ctx: StoredValue<AppContext>,
}

pub fn use_waste_records() -> WasteRecordsHook {
    let hook = WasteRecordsHook {
        state: RwSignal::new(ResourceState::default()),
        filters: RwSignal::new(RecordFilters::default()),
        page: RwSignal::new(1),
        ctx: StoredValue::new(use_app_context()),
    };
    hook.reload();
    hook
}

impl WasteRecordsHook {
    /// Fetch the current page with the current filters
    pub fn reload(&self) {
        let api = self.ctx.get_value().api;
        let filters = self.filters.get_untracked();
        let page = self.page.get_untracked();
        launch(
            self.state,
            LOAD_ERROR,
            async move { api.filter_waste_records(&filters, page).await },
            replace,
            || {},
        );
    }

    /// New search from the first page
    pub fn search(&self) {
        self.page.set(1);
        self.reload();
    }

    pub fn reset_filters(&self) {
        let per_page = self.filters.get_untracked().per_page;
        self.filters.set(RecordFilters { per_page, ..Default::default() });
        self.search();
    }

    pub fn go_to(&self, page: u32) {
        self.page.set(page.max(1));
        self.reload();
    }

    pub fn set_per_page(&self, per_page: u32) {
        self.filters.update(|f| f.per_page = per_page);
        self.search();
    }

    pub fn save(&self, id: Option<u64>, payload: WasteRecordPayload, on_success: impl FnOnce() + 'static) {
        let api = self.ctx.get_value().api;
        let filters = self.filters.get_untracked();
        let page = self.page.get_untracked();
        launch(
            self.state,
            SAVE_ERROR,
            async move { save_record_and_reload(&api, id, &payload, &filters, page).await },
            replace,
            on_success,
        );
    }

    pub fn delete(&self, id: u64) {
        let api = self.ctx.get_value().api;
        launch(
            self.state,
            DELETE_ERROR,
            async move { api.delete_waste_record(id).await.map(|()| id) },
            remove_record,
            || {},
        );
    }

    pub fn last_page(&self) -> u32 {
        self.state.with(|s| {
            s.data
                .meta
                .as_ref()
                .map(|m| m.last_page.unwrap_or_else(|| page_count(m)))
                .unwrap_or(1)
                .max(1)
        })
    }
}

/// Pages needed for `total` rows, saturating at `u32::MAX`
fn page_count(meta: &PageMeta) -> u32 {
    let per_page = u64::from(meta.per_page.max(1));
    u32::try_from(meta.total.div_ceil(per_page)).unwrap_or(u32::MAX)
}

/// Submit state of the "add record" forms
#[derive(Clone, Copy)]
pub struct RecordSubmission {
    pub state: RwSignal<ResourceState<()>>,
    ctx: StoredValue<AppContext>,
}

pub fn use_record_submission() -> RecordSubmission {
    RecordSubmission {
        state: RwSignal::new(ResourceState::default()),
        ctx: StoredValue::new(use_app_context()),
    }
}

impl RecordSubmission {
    pub fn submit(&self, payload: WasteRecordPayload, on_success: impl FnOnce() + 'static) {
        let api = self.ctx.get_value().api;
        launch(
            self.state,
            CREATE_ERROR,
            async move { api.create_waste_record(&payload).await },
            replace,
            on_success,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::record_form::PayloadItem;
    use crate::testing::test_client;
    use futures::executor::block_on;
    use serde_json::json;

    fn record(id: u64) -> WasteRecord {
        WasteRecord {
            id,
            company_id: 2,
            moderator_id: 3,
            car_num: None,
            driv_name: None,
            record_date: "2024-01-05".into(),
            items: Vec::new(),
            company: None,
            moderator: None,
        }
    }

    #[test]
    fn test_remove_record_adjusts_total() {
        let mut page = Paginated {
            data: vec![record(1), record(2)],
            meta: Some(PageMeta { current_page: 1, per_page: 10, total: 2, last_page: None }),
        };

        remove_record(&mut page, 1);
        remove_record(&mut page, 99);

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.meta.unwrap().total, 1);
    }

    #[test]
    fn test_page_count_rounds_up_and_saturates() {
        let meta = |per_page, total| PageMeta { current_page: 1, per_page, total, last_page: None };

        assert_eq!(page_count(&meta(10, 21)), 3);
        assert_eq!(page_count(&meta(0, 2)), 2);
        assert_eq!(page_count(&meta(1, u64::MAX)), u32::MAX);
    }

    #[test]
    fn test_save_reloads_current_page() {
        let (client, transport, _, _) = test_client();
        transport.reply_json(200, json!({"message": "ok"}));
        transport.reply_json(200, json!({"data": [], "meta": {"current_page": 3, "per_page": 10, "total": 20}}));

        let payload = WasteRecordPayload {
            company_id: 2,
            moderator_id: 3,
            car_num: String::new(),
            driv_name: String::new(),
            record_date: "2024-01-05".into(),
            items: vec![PayloadItem { waste_id: 1, amount: 1.0, factor: None }],
        };
        let page = block_on(save_record_and_reload(&client, Some(7), &payload, &RecordFilters::default(), 3)).unwrap();

        assert_eq!(page.meta.map(|m| m.current_page), Some(3));
        let sent = transport.requests();
        assert_eq!(sent[0].method, Method::Put);
        assert_eq!(sent[0].url, "http://api.test/api/v1/management/waste-records/7");
        assert!(sent[1].query.contains(&("page".into(), "3".into())));
    }

    #[test]
    fn test_failed_save_skips_reload() {
        let (client, transport, _, _) = test_client();
        transport.reply_json(422, json!({"message": "Некорректная дата"}));

        let payload = WasteRecordPayload {
            company_id: 2,
            moderator_id: 3,
            car_num: String::new(),
            driv_name: String::new(),
            record_date: "bad".into(),
            items: Vec::new(),
        };
        let err = block_on(save_record_and_reload(&client, None, &payload, &RecordFilters::default(), 1)).unwrap_err();

        assert_eq!(err.user_message(SAVE_ERROR), "Некорректная дата");
        assert_eq!(transport.request_count(), 1);
    }
}
