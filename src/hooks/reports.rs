//! Report pages: filter state, search, and spreadsheet export.
//!
//! Required filters are checked before any request fires. Export runs
//! beside the report state and never replaces the report on screen.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{launch, ResourceState};
use crate::api::{ApiClient, Navigator, Transport};
use crate::config::{FINAL_PROCESSING_FILE_NAME, REPORT_FILE_NAME};
use crate::context::{use_app_context, AppContext};
use crate::download::save_bytes;
use crate::error::{ApiError, ApiResult};
use crate::filters::{today, ReportFilters, ReportScope};
use crate::pivot::{CategoryReport, OperationsReport};
use crate::session::{Role, Session};
use crate::storage::KeyValueStore;

const REPORT_ERROR: &str = "Ошибка загрузки отчета";
const EXPORT_ERROR: &str = "Ошибка при экспорте отчета";
const MISSING_USER: &str = "Информация о пользователе не найдена. Пожалуйста, перезайдите в систему.";

/// Report scope of the signed-in user
pub fn session_scope(session: &Session) -> ApiResult<ReportScope> {
    match session.active_role() {
        Some(Role::Admin) => Ok(ReportScope::Admin),
        Some(Role::Moderator) => session
            .user_id()
            .map(|moderator_id| ReportScope::Moderator { moderator_id })
            .ok_or_else(|| ApiError::validation(MISSING_USER)),
        Some(Role::Company) => session
            .user_id()
            .map(|company_id| ReportScope::Company { company_id })
            .ok_or_else(|| ApiError::validation(MISSING_USER)),
        None => Err(ApiError::validation(MISSING_USER)),
    }
}

fn check(filters: &ReportFilters, scope: ReportScope) -> ApiResult<()> {
    match filters.missing(scope) {
        Some(message) => Err(ApiError::validation(message)),
        None => Ok(()),
    }
}

/// Category report; admins read the management endpoint, other roles `/api/reports`
pub async fn fetch_report<T, S, N>(
    api: &ApiClient<T, S, N>,
    filters: &ReportFilters,
    scope: ReportScope,
) -> ApiResult<CategoryReport>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    check(filters, scope)?;
    let query = filters.to_query(scope);
    match scope {
        ReportScope::Admin | ReportScope::FinalProcessing => api.management_report(query).await,
        ReportScope::Moderator { .. } | ReportScope::Company { .. } => api.role_report(query).await,
    }
}

pub async fn fetch_final_processing<T, S, N>(api: &ApiClient<T, S, N>, filters: &ReportFilters) -> ApiResult<OperationsReport>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    check(filters, ReportScope::FinalProcessing)?;
    api.final_processing_report(filters.to_query(ReportScope::FinalProcessing)).await
}

/// Spreadsheet bytes for the scope's report
pub async fn fetch_export<T, S, N>(api: &ApiClient<T, S, N>, filters: &ReportFilters, scope: ReportScope) -> ApiResult<Vec<u8>>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    check(filters, scope)?;
    let query = filters.to_query(scope);
    match scope {
        ReportScope::FinalProcessing => api.export_final_processing_report(query).await,
        _ => api.export_report(query).await,
    }
}

pub fn export_file_name(scope: ReportScope) -> &'static str {
    match scope {
        ReportScope::FinalProcessing => FINAL_PROCESSING_FILE_NAME,
        _ => REPORT_FILE_NAME,
    }
}

/// Download the export, recording failures in `state.error` and nothing else
fn run_export<D>(ctx: StoredValue<AppContext>, state: RwSignal<ResourceState<D>>, exporting: RwSignal<bool>, filters: ReportFilters, scope: ReportScope)
where
    D: Send + Sync + 'static,
{
    if let Some(message) = filters.missing(scope) {
        state.update(|s| s.error = Some(message.to_string()));
        return;
    }
    let api = ctx.get_value().api;
    exporting.set(true);
    spawn_local(async move {
        let outcome = match fetch_export(&api, &filters, scope).await {
            Ok(bytes) => save_bytes(&bytes, export_file_name(scope)).map_err(|e| e.to_string()),
            Err(err) => {
                tracing::warn!("export failed: {}", err);
                Err(err.user_message(EXPORT_ERROR))
            }
        };
        exporting.try_set(false);
        if let Err(message) = outcome {
            state.try_update(|s| s.error = Some(message));
        }
    });
}

#[derive(Clone, Copy)]
pub struct ReportHook {
    pub state: RwSignal<ResourceState<Option<CategoryReport>>>,
    pub filters: RwSignal<ReportFilters>,
    pub exporting: RwSignal<bool>,
    pub scope: ReportScope,
    ctx: StoredValue<AppContext>,
}

/// Category report for `scope`, starting from `filters`. Nothing loads until `search`.
pub fn use_report(scope: ReportScope, filters: ReportFilters) -> ReportHook {
    ReportHook {
        state: RwSignal::new(ResourceState::default()),
        filters: RwSignal::new(filters),
        exporting: RwSignal::new(false),
        scope,
        ctx: StoredValue::new(use_app_context()),
    }
}

/// Category report preset to the current calendar month
pub fn use_month_report(scope: ReportScope) -> ReportHook {
    use_report(scope, ReportFilters::current_month(today()))
}

impl ReportHook {
    pub fn is_ready(&self) -> bool {
        self.filters.with(|f| f.is_ready(self.scope))
    }

    pub fn search(&self) {
        let api = self.ctx.get_value().api;
        let filters = self.filters.get_untracked();
        let scope = self.scope;
        launch(
            self.state,
            REPORT_ERROR,
            async move { fetch_report(&api, &filters, scope).await },
            |slot, report| *slot = Some(report),
            || {},
        );
    }

    pub fn export(&self) {
        run_export(self.ctx, self.state, self.exporting, self.filters.get_untracked(), self.scope);
    }

    /// Back to `filters` with the report cleared
    pub fn reset(&self, filters: ReportFilters) {
        self.filters.set(filters);
        self.state.set(ResourceState::default());
    }
}

#[derive(Clone, Copy)]
pub struct FinalProcessingHook {
    pub state: RwSignal<ResourceState<Option<OperationsReport>>>,
    pub filters: RwSignal<ReportFilters>,
    pub exporting: RwSignal<bool>,
    ctx: StoredValue<AppContext>,
}

pub fn use_final_processing_report() -> FinalProcessingHook {
    FinalProcessingHook {
        state: RwSignal::new(ResourceState::default()),
        filters: RwSignal::new(ReportFilters::default()),
        exporting: RwSignal::new(false),
        ctx: StoredValue::new(use_app_context()),
    }
}

impl FinalProcessingHook {
    pub fn is_ready(&self) -> bool {
        self.filters.with(|f| f.is_ready(ReportScope::FinalProcessing))
    }

    pub fn search(&self) {
        let api = self.ctx.get_value().api;
        let filters = self.filters.get_untracked();
        launch(
            self.state,
            REPORT_ERROR,
            async move { fetch_final_processing(&api, &filters).await },
            |slot, report| *slot = Some(report),
            || {},
        );
    }

    pub fn export(&self) {
        run_export(
            self.ctx,
            self.state,
            self.exporting,
            self.filters.get_untracked(),
            ReportScope::FinalProcessing,
        );
    }

    pub fn clear(&self) {
        self.filters.set(ReportFilters::default());
        self.state.set(ResourceState::default());
    }
}
