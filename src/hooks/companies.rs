//! Read-only pick lists: companies, moderators and waste options.

use leptos::prelude::*;

use super::{launch, replace, ResourceState};
use crate::api::{ApiClient, Navigator, Transport};
use crate::context::{use_app_context, AppContext};
use crate::error::ApiResult;
use crate::models::{Company, Moderator, NewUser, User, Waste};
use crate::session::Role;
use crate::storage::KeyValueStore;

const COMPANIES_ERROR: &str = "Ошибка загрузки компаний";
const MODERATORS_ERROR: &str = "Ошибка загрузки модераторов";
const WASTE_OPTIONS_ERROR: &str = "Ошибка загрузки отходов";
const CREATE_COMPANY_ERROR: &str = "Ошибка при создании компании";

/// Companies of one moderator, or every company when `moderator_id` is None.
/// An empty id yields an empty list without a request.
pub async fn load_companies<T, S, N>(api: &ApiClient<T, S, N>, moderator_id: Option<&str>) -> ApiResult<Vec<Company>>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    match moderator_id.map(str::trim) {
        None => api.list_companies(None).await,
        Some("") => Ok(Vec::new()),
        Some(raw) => match raw.parse::<u64>() {
            Ok(id) => api.list_companies(Some(id)).await,
            Err(_) => Ok(Vec::new()),
        },
    }
}

/// Register a company account under the signed-in moderator
pub async fn register_company<T, S, N>(api: &ApiClient<T, S, N>, mut company: NewUser) -> ApiResult<User>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    company.role = Role::Company.as_str().to_string();
    api.create_user(&company).await
}

#[derive(Clone, Copy)]
pub struct CompaniesHook {
    pub state: RwSignal<ResourceState<Vec<Company>>>,
    ctx: StoredValue<AppContext>,
}

/// Company pick list; pass `Some(moderator_id)` to narrow it
pub fn use_companies(moderator_id: Option<String>) -> CompaniesHook {
    let hook = CompaniesHook {
        state: RwSignal::new(ResourceState::default()),
        ctx: StoredValue::new(use_app_context()),
    };
    hook.load(moderator_id);
    hook
}

impl CompaniesHook {
    pub fn load(&self, moderator_id: Option<String>) {
        let api = self.ctx.get_value().api;
        launch(
            self.state,
            COMPANIES_ERROR,
            async move { load_companies(&api, moderator_id.as_deref()).await },
            replace,
            || {},
        );
    }

    /// Companies assigned to a moderator through the moderator endpoint
    pub fn load_for_moderator(&self, moderator_id: u64) {
        let api = self.ctx.get_value().api;
        launch(
            self.state,
            COMPANIES_ERROR,
            async move { api.moderator_companies(moderator_id).await },
            replace,
            || {},
        );
    }

    pub fn clear(&self) {
        self.state.set(ResourceState::default());
    }
}

/// Companies of the given moderator, loaded once
pub fn use_moderator_companies(moderator_id: u64) -> CompaniesHook {
    let hook = CompaniesHook {
        state: RwSignal::new(ResourceState::default()),
        ctx: StoredValue::new(use_app_context()),
    };
    hook.load_for_moderator(moderator_id);
    hook
}

pub fn use_moderators() -> RwSignal<ResourceState<Vec<Moderator>>> {
    let state = RwSignal::new(ResourceState::default());
    let api = use_app_context().api;
    launch(
        state,
        MODERATORS_ERROR,
        async move { api.list_moderators().await },
        replace,
        || {},
    );
    state
}

/// Wastes offered in record line items
pub fn use_waste_options() -> RwSignal<ResourceState<Vec<Waste>>> {
    let state = RwSignal::new(ResourceState::default());
    let api = use_app_context().api;
    launch(
        state,
        WASTE_OPTIONS_ERROR,
        async move { api.list_waste_options().await },
        replace,
        || {},
    );
    state
}

/// Submit state of the add-company form
#[derive(Clone, Copy)]
pub struct CompanyRegistration {
    pub state: RwSignal<ResourceState<Option<User>>>,
    ctx: StoredValue<AppContext>,
}

pub fn use_company_registration() -> CompanyRegistration {
    CompanyRegistration {
        state: RwSignal::new(ResourceState::default()),
        ctx: StoredValue::new(use_app_context()),
    }
}

impl CompanyRegistration {
    pub fn submit(&self, company: NewUser, on_success: impl FnOnce() + 'static) {
        let api = self.ctx.get_value().api;
        launch(
            self.state,
            CREATE_COMPANY_ERROR,
            async move { register_company(&api, company).await },
            |slot, user| *slot = Some(user),
            on_success,
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
    fn test_blank_moderator_skips_request() {
        let (client, transport, _, _) = test_client();

        let companies = block_on(load_companies(&client, Some(" "))).unwrap();

        assert!(companies.is_empty());
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_moderator_narrows_companies() {
        let (client, transport, _, _) = test_client();
        transport.reply_json(200, json!({"data": [{"id": 4, "name": "ТОО Эко"}]}));

        let companies = block_on(load_companies(&client, Some("5"))).unwrap();

        assert_eq!(companies[0].id, 4);
        assert_eq!(transport.last_request().query, vec![("moderator_id".to_string(), "5".to_string())]);
    }

    #[test]
    fn test_register_company_forces_role() {
        let (client, transport, _, _) = test_client();
        transport.reply_json(
            201,
            json!({"user": {"id": 9, "name": "ТОО Эко", "email": "eco@example.kz", "role": "company"}}),
        );

        let company = NewUser {
            name: "ТОО Эко".into(),
            email: "eco@example.kz".into(),
            password: "secret123".into(),
            role: "admin".into(),
            bin_company: "123456789012".into(),
            description: String::new(),
        };
        let user = block_on(register_company(&client, company)).unwrap();

        assert_eq!(user.id, 9);
        let sent = transport.last_request();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.body.as_ref().and_then(|b| b.get("role")).and_then(|r| r.as_str()), Some("company"));
    }
}
