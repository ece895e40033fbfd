//! State Hooks
//!
//! One hook per resource. Each keeps `{data, loading, error}` in a signal and
//! runs requests through controller functions that take the client and cache
//! explicitly, so the request/cache/splice logic is testable without a browser.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::error::ApiResult;
use crate::models::{FinalWasteType, User, Waste, WasteCategory, WasteRecord};

mod categories;
mod companies;
mod final_types;
mod records;
mod reports;
mod users;
mod wastes;

pub use categories::*;
pub use companies::*;
pub use final_types::*;
pub use records::*;
pub use reports::*;
pub use users::*;
pub use wastes::*;

/// Load state of one resource
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T: Default> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            data: T::default(),
            loading: false,
            error: None,
        }
    }
}

impl<T> ResourceState<T> {
    pub fn start(&mut self) {
        self.loading = true;
    }

    /// Replace the data on success; on failure keep it and record the error
    pub fn settle(&mut self, result: ApiResult<T>, context: &str) -> bool {
        self.apply(result, context, |data, fresh| *data = fresh)
    }

    /// Merge a mutation result into the data on success
    pub fn apply<R>(&mut self, result: ApiResult<R>, context: &str, splice: impl FnOnce(&mut T, R)) -> bool {
        self.loading = false;
        match result {
            Ok(value) => {
                splice(&mut self.data, value);
                self.error = None;
                true
            }
            Err(err) => {
                tracing::warn!(context, "{}", err);
                self.error = Some(err.user_message(context));
                false
            }
        }
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

/// Entities addressed by numeric id
pub trait Identified {
    fn id(&self) -> u64;
}

macro_rules! identified {
    ($($ty:ty),*) => {
        $(impl Identified for $ty {
            fn id(&self) -> u64 {
                self.id
            }
        })*
    };
}

identified!(WasteCategory, Waste, FinalWasteType, WasteRecord, User);

/// Replace the entry with the same id, or append
pub fn splice_upsert<T: Identified>(list: &mut Vec<T>, item: T) {
    match list.iter_mut().find(|existing| existing.id() == item.id()) {
        Some(existing) => *existing = item,
        None => list.push(item),
    }
}

pub fn splice_remove<T: Identified>(list: &mut Vec<T>, id: u64) {
    list.retain(|existing| existing.id() != id);
}

/// Splice that swaps in the fresh value
pub(crate) fn replace<T>(data: &mut T, fresh: T) {
    *data = fresh;
}

/// Run `request` in the background and fold its result into `state`.
///
/// A state signal disposed before the response arrives (page left) is skipped.
pub(crate) fn launch<T, R, Fut, F, Done>(
    state: RwSignal<ResourceState<T>>,
    context: &'static str,
    request: Fut,
    splice: F,
    on_success: Done,
) where
    T: Send + Sync + 'static,
    R: 'static,
    Fut: Future<Output = ApiResult<R>> + 'static,
    F: FnOnce(&mut T, R) + 'static,
    Done: FnOnce() + 'static,
{
    state.update(ResourceState::start);
    spawn_local(async move {
        let result = request.await;
        let applied = state.try_update(|s| s.apply(result, context, splice)).unwrap_or(false);
        if applied {
            on_success();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    fn category(id: u64, name: &str) -> WasteCategory {
        WasteCategory { id, name: name.into(), slug: String::new() }
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let mut state = ResourceState { data: vec![category(1, "А")], loading: false, error: None };
        state.start();
        assert!(state.loading);

        let ok = state.settle(Err(ApiError::Http { status: 500, message: None }), "Ошибка загрузки");

        assert!(!ok);
        assert!(!state.loading);
        assert_eq!(state.data, vec![category(1, "А")]);
        assert_eq!(state.error.as_deref(), Some("Ошибка загрузки (500)"));
    }

    #[test]
    fn test_success_clears_error() {
        let mut state: ResourceState<Vec<WasteCategory>> = ResourceState::default();
        state.fail("old");

        assert!(state.settle(Ok(vec![category(2, "Б")]), "ctx"));
        assert_eq!(state.error, None);
        assert_eq!(state.data.len(), 1);
    }

    #[test]
    fn test_splices() {
        let mut list = vec![category(1, "А"), category(2, "Б")];
        splice_upsert(&mut list, category(2, "В"));
        splice_upsert(&mut list, category(3, "Г"));
        splice_remove(&mut list, 1);

        let names: Vec<&str> = list.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["В", "Г"]);
    }

    #[test]
    fn test_apply_with_splice() {
        let mut state = ResourceState { data: vec![category(1, "А")], loading: true, error: None };
        assert!(state.apply(Ok(1u64), "ctx", |list, id| splice_remove(list, id)));
        assert!(state.data.is_empty());
        assert!(!state.loading);
    }
}
