//! Waste types plus the final-type options their form needs.
//! Same policy as categories: cache-first, refetch after every write.

use leptos::prelude::*;

use super::{launch, replace, ResourceState};
use crate::api::{ApiClient, Navigator, Transport};
use crate::cache::ReferenceCache;
use crate::context::{use_app_context, AppContext};
use crate::error::ApiResult;
use crate::models::{FinalWasteType, Waste, WastePayload};
use crate::storage::KeyValueStore;

const LOAD_ERROR: &str = "Ошибка загрузки отходов";
const FINAL_TYPES_ERROR: &str = "Ошибка загрузки типов";
const SAVE_ERROR: &str = "Ошибка при сохранении отхода";
const DELETE_ERROR: &str = "Ошибка при удалении отхода";

pub async fn load_wastes<T, S, N>(api: &ApiClient<T, S, N>, cache: &ReferenceCache, force: bool) -> ApiResult<Vec<Waste>>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    if !force {
        if let Some(cached) = cache.wastes.get() {
            return Ok(cached);
        }
    }
    let fresh = api.list_wastes().await?;
    cache.wastes.set(fresh.clone());
    Ok(fresh)
}

pub async fn load_final_types<T, S, N>(
    api: &ApiClient<T, S, N>,
    cache: &ReferenceCache,
    force: bool,
) -> ApiResult<Vec<FinalWasteType>>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    if !force {
        if let Some(cached) = cache.final_types.get() {
            return Ok(cached);
        }
    }
    let fresh = api.list_final_waste_types().await?;
    cache.final_types.set(fresh.clone());
    Ok(fresh)
}

/// Write a waste (`id` = None creates), then reload the list from the server
pub async fn save_waste_and_reload<T, S, N>(
    api: &ApiClient<T, S, N>,
    cache: &ReferenceCache,
    id: Option<u64>,
    payload: &WastePayload,
) -> ApiResult<Vec<Waste>>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    match id {
        Some(id) => api.update_waste(id, payload).await?,
        None => api.create_waste(payload).await?,
    };
    cache.wastes.invalidate();
    load_wastes(api, cache, true).await
}

pub async fn delete_waste_and_reload<T, S, N>(
    api: &ApiClient<T, S, N>,
    cache: &ReferenceCache,
    id: u64,
) -> ApiResult<Vec<Waste>>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    api.delete_waste(id).await?;
    cache.wastes.invalidate();
    load_wastes(api, cache, true).await
}

#[derive(Clone, Copy)]
pub struct WastesHook {
    pub state: RwSignal<ResourceState<Vec<Waste>>>,
    pub final_types: RwSignal<ResourceState<Vec<FinalWasteType>>>,
    ctx: StoredValue<AppContext>,
}

pub fn use_wastes() -> WastesHook {
    let hook = WastesHook {
        state: RwSignal::new(ResourceState::default()),
        final_types: RwSignal::new(ResourceState::default()),
        ctx: StoredValue::new(use_app_context()),
    };
    hook.refresh(false);
    hook
}

impl WastesHook {
    pub fn refresh(&self, force: bool) {
        let AppContext { api, cache, .. } = self.ctx.get_value();
        let (types_api, types_cache) = (api.clone(), cache.clone());
        launch(
            self.state,
            LOAD_ERROR,
            async move { load_wastes(&api, &cache, force).await },
            replace,
            || {},
        );
        launch(
            self.final_types,
            FINAL_TYPES_ERROR,
            async move { load_final_types(&types_api, &types_cache, force).await },
            replace,
            || {},
        );
    }

    pub fn save(&self, id: Option<u64>, payload: WastePayload, on_success: impl FnOnce() + 'static) {
        let AppContext { api, cache, .. } = self.ctx.get_value();
        launch(
            self.state,
            SAVE_ERROR,
            async move { save_waste_and_reload(&api, &cache, id, &payload).await },
            replace,
            on_success,
        );
    }

    pub fn delete(&self, id: u64) {
        let AppContext { api, cache, .. } = self.ctx.get_value();
        launch(
            self.state,
            DELETE_ERROR,
            async move { delete_waste_and_reload(&api, &cache, id).await },
            replace,
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

    #[test]
    fn test_wastes_cached_between_mounts() {
        let (client, transport, _, _) = test_client();
        let cache = ReferenceCache::new();
        transport.reply_json(200, json!([{"id": 1, "name": "ПЭТ"}]));

        block_on(load_wastes(&client, &cache, false)).unwrap();
        let again = block_on(load_wastes(&client, &cache, false)).unwrap();

        assert_eq!(again.len(), 1);
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn test_update_then_refetch() {
        let (client, transport, _, _) = test_client();
        let cache = ReferenceCache::new();
        cache.wastes.set(Vec::new());
        transport.reply_json(200, json!({"id": 4, "name": "Стекло", "category_id": 2}));
        transport.reply_json(200, json!([{"id": 4, "name": "Стекло", "category_id": 2}]));

        let payload = WastePayload {
            name: "Стекло".into(),
            slug: "steklo".into(),
            category_id: 2,
            final_waste_type_id: Some(1),
        };
        let list = block_on(save_waste_and_reload(&client, &cache, Some(4), &payload)).unwrap();

        assert_eq!(list[0].id, 4);
        let sent = transport.requests();
        assert_eq!(sent[0].method, Method::Put);
        assert_eq!(sent[0].url, "http://api.test/api/wastes/4");
        assert_eq!(sent[1].method, Method::Get);
    }

    #[test]
    fn test_failed_save_leaves_cache() {
        let (client, transport, _, _) = test_client();
        let cache = ReferenceCache::new();
        cache.wastes.set(Vec::new());
        transport.fail_network("offline");

        let payload = WastePayload {
            name: "X".into(),
            slug: "x".into(),
            category_id: 1,
            final_waste_type_id: None,
        };
        assert!(block_on(save_waste_and_reload(&client, &cache, None, &payload)).is_err());
        assert!(cache.wastes.is_cached());
    }

    #[test]
    fn test_final_types_cached() {
        let (client, transport, _, _) = test_client();
        let cache = ReferenceCache::new();
        transport.reply_json(
            200,
            json!([{"id": 1, "final_name": "Вторсырьё", "type_operation": "Переработка", "factor": 1}]),
        );

        block_on(load_final_types(&client, &cache, false)).unwrap();
        block_on(load_final_types(&client, &cache, false)).unwrap();

        assert_eq!(transport.request_count(), 1);
        assert_eq!(transport.last_request().url, "http://api.test/api/final-waste-types");
    }
}
