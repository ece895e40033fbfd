//! Waste categories: cache-first load, full refetch after every write.

use leptos::prelude::*;

use super::{launch, replace, ResourceState};
use crate::api::{ApiClient, Navigator, Transport};
use crate::cache::ReferenceCache;
use crate::context::{use_app_context, AppContext};
use crate::error::ApiResult;
use crate::models::{CategoryPayload, WasteCategory};
use crate::storage::KeyValueStore;

const LOAD_ERROR: &str = "Ошибка загрузки категорий";
const SAVE_ERROR: &str = "Ошибка при сохранении категории";
const DELETE_ERROR: &str = "Ошибка при удалении категории";

/// Categories from the cache, or from the server when forced or not cached yet
pub async fn load_categories<T, S, N>(
    api: &ApiClient<T, S, N>,
    cache: &ReferenceCache,
    force: bool,
) -> ApiResult<Vec<WasteCategory>>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    if !force {
        if let Some(cached) = cache.categories.get() {
            return Ok(cached);
        }
    }
    let fresh = api.list_categories().await?;
    cache.categories.set(fresh.clone());
    Ok(fresh)
}

/// Wastes embed their category, so both lists go stale on a write
fn invalidate(cache: &ReferenceCache) {
    cache.categories.invalidate();
    cache.wastes.invalidate();
}

pub async fn create_category_and_reload<T, S, N>(
    api: &ApiClient<T, S, N>,
    cache: &ReferenceCache,
    payload: &CategoryPayload,
) -> ApiResult<Vec<WasteCategory>>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    api.create_category(payload).await?;
    invalidate(cache);
    load_categories(api, cache, true).await
}

pub async fn update_category_and_reload<T, S, N>(
    api: &ApiClient<T, S, N>,
    cache: &ReferenceCache,
    id: u64,
    payload: &CategoryPayload,
) -> ApiResult<Vec<WasteCategory>>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    api.update_category(id, payload).await?;
    invalidate(cache);
    load_categories(api, cache, true).await
}

pub async fn delete_category_and_reload<T, S, N>(
    api: &ApiClient<T, S, N>,
    cache: &ReferenceCache,
    id: u64,
) -> ApiResult<Vec<WasteCategory>>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    api.delete_category(id).await?;
    invalidate(cache);
    load_categories(api, cache, true).await
}

#[derive(Clone, Copy)]
pub struct WasteCategoriesHook {
    pub state: RwSignal<ResourceState<Vec<WasteCategory>>>,
    ctx: StoredValue<AppContext>,
}

/// Categories list, loaded on first use
pub fn use_waste_categories() -> WasteCategoriesHook {
    let hook = WasteCategoriesHook {
        state: RwSignal::new(ResourceState::default()),
        ctx: StoredValue::new(use_app_context()),
    };
    hook.refresh(false);
    hook
}

impl WasteCategoriesHook {
    pub fn refresh(&self, force: bool) {
        let AppContext { api, cache, .. } = self.ctx.get_value();
        launch(
            self.state,
            LOAD_ERROR,
            async move { load_categories(&api, &cache, force).await },
            replace,
            || {},
        );
    }

    pub fn create(&self, payload: CategoryPayload, on_success: impl FnOnce() + 'static) {
        let AppContext { api, cache, .. } = self.ctx.get_value();
        launch(
            self.state,
            SAVE_ERROR,
            async move { create_category_and_reload(&api, &cache, &payload).await },
            replace,
            on_success,
        );
    }

    pub fn update(&self, id: u64, payload: CategoryPayload, on_success: impl FnOnce() + 'static) {
        let AppContext { api, cache, .. } = self.ctx.get_value();
        launch(
            self.state,
            SAVE_ERROR,
            async move { update_category_and_reload(&api, &cache, id, &payload).await },
            replace,
            on_success,
        );
    }

    pub fn delete(&self, id: u64) {
        let AppContext { api, cache, .. } = self.ctx.get_value();
        launch(
            self.state,
            DELETE_ERROR,
            async move { delete_category_and_reload(&api, &cache, id).await },
            replace,
            || {},
        );
    }
}
