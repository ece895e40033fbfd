//! Final waste types: always loaded fresh, writes spliced into the list.

use leptos::prelude::*;

use super::{launch, replace, splice_remove, splice_upsert, ResourceState};
use crate::api::{ApiClient, Navigator, Transport};
use crate::cache::ReferenceCache;
use crate::context::{use_app_context, AppContext};
use crate::error::ApiResult;
use crate::models::{FinalWasteType, FinalWasteTypePayload};
use crate::storage::KeyValueStore;

const LOAD_ERROR: &str = "Ошибка загрузки типов";
const SAVE_ERROR: &str = "Ошибка при сохранении типа";
const DELETE_ERROR: &str = "Ошибка при удалении типа";

/// Create (`id` = None) or update; the cached copies used by waste forms go stale
pub async fn save_final_type<T, S, N>(
    api: &ApiClient<T, S, N>,
    cache: &ReferenceCache,
    id: Option<u64>,
    payload: &FinalWasteTypePayload,
) -> ApiResult<FinalWasteType>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    let saved = match id {
        Some(id) => api.update_final_waste_type(id, payload).await?,
        None => api.create_final_waste_type(payload).await?,
    };
    cache.final_types.invalidate();
    cache.wastes.invalidate();
    Ok(saved)
}

pub async fn delete_final_type<T, S, N>(api: &ApiClient<T, S, N>, cache: &ReferenceCache, id: u64) -> ApiResult<u64>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    api.delete_final_waste_type(id).await?;
    cache.final_types.invalidate();
    cache.wastes.invalidate();
    Ok(id)
}

#[derive(Clone, Copy)]
pub struct FinalWasteTypesHook {
    pub state: RwSignal<ResourceState<Vec<FinalWasteType>>>,
    ctx: StoredValue<AppContext>,
}

pub fn use_final_waste_types() -> FinalWasteTypesHook {
    let hook = FinalWasteTypesHook {
        state: RwSignal::new(ResourceState::default()),
        ctx: StoredValue::new(use_app_context()),
    };
    hook.refresh();
    hook
}

impl FinalWasteTypesHook {
    pub fn refresh(&self) {
        let AppContext { api, cache, .. } = self.ctx.get_value();
        launch(
            self.state,
            LOAD_ERROR,
            async move { super::load_final_types(&api, &cache, true).await },
            replace,
            || {},
        );
    }

    pub fn save(&self, id: Option<u64>, payload: FinalWasteTypePayload, on_success: impl FnOnce() + 'static) {
        let AppContext { api, cache, .. } = self.ctx.get_value();
        launch(
            self.state,
            SAVE_ERROR,
            async move { save_final_type(&api, &cache, id, &payload).await },
            splice_upsert,
            on_success,
        );
    }

    pub fn delete(&self, id: u64) {
        let AppContext { api, cache, .. } = self.ctx.get_value();
        launch(
            self.state,
            DELETE_ERROR,
            async move { delete_final_type(&api, &cache, id).await },
            splice_remove,
            || {},
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::testing::test_client;
    use futures::executor::block_on;
    use serde_json::json;

    fn recycling() -> FinalWasteType {
        FinalWasteType {
            id: 1,
            final_name: "Вторсырьё".into(),
            type_operation: "Переработка".into(),
            factor: 1.0,
        }
    }

    #[test]
    fn test_update_spliced_into_list() {
        let (client, transport, _, _) = test_client();
        let cache = ReferenceCache::new();
        cache.final_types.set(vec![recycling()]);
        transport.reply_json(
            200,
            json!({"id": 1, "final_name": "Вторсырьё", "type_operation": "Переработка", "factor": "0.9"}),
        );

        let payload = FinalWasteTypePayload {
            final_name: "Вторсырьё".into(),
            type_operation: "Переработка".into(),
            factor: 0.9,
        };
        let result = block_on(save_final_type(&client, &cache, Some(1), &payload));

        let mut state = ResourceState { data: vec![recycling()], loading: true, error: None };
        assert!(state.apply(result, SAVE_ERROR, splice_upsert));
        assert_eq!(state.data.len(), 1);
        assert_eq!(state.data[0].factor, 0.9);
        assert_eq!(transport.request_count(), 1);
        assert!(!cache.final_types.is_cached());
    }

    #[test]
    fn test_delete_failure_keeps_row() {
        let (client, transport, _, _) = test_client();
        let cache = ReferenceCache::new();
        transport.reply_json(422, json!({"message": "Тип используется"}));

        let result = block_on(delete_final_type(&client, &cache, 1));

        let mut state = ResourceState { data: vec![recycling()], loading: true, error: None };
        assert!(!state.apply(result, DELETE_ERROR, splice_remove));
        assert_eq!(state.data, vec![recycling()]);
        assert_eq!(state.error.as_deref(), Some("Тип используется"));
        assert_eq!(transport.last_request().method, Method::Delete);
    }
}
