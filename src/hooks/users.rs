//! User accounts: paged list with search and role filter, writes spliced in.

use leptos::prelude::*;

use super::{launch, replace, splice_remove, splice_upsert, ResourceState};
use crate::api::users::UserPage;
use crate::context::{use_app_context, AppContext};
use crate::filters::UserQuery;
use crate::models::{NewUser, User, UserUpdate};
use crate::session::Role;

const LOAD_ERROR: &str = "Ошибка при загрузке пользователей";
const CREATE_ERROR: &str = "Ошибка при создании пользователя";
const UPDATE_ERROR: &str = "Ошибка при обновлении пользователя";
const DELETE_ERROR: &str = "Ошибка при удалении пользователя";

/// A new account goes first, as the newest row
pub fn insert_user(page: &mut UserPage, user: User) {
    page.data.insert(0, user);
    page.meta.total += 1;
}

pub fn update_user(page: &mut UserPage, user: User) {
    splice_upsert(&mut page.data, user);
}

pub fn remove_user(page: &mut UserPage, id: u64) {
    let before = page.data.len();
    splice_remove(&mut page.data, id);
    if page.data.len() < before {
        page.meta.total = page.meta.total.saturating_sub(1);
    }
}

#[derive(Clone, Copy)]
pub struct UsersHook {
    pub state: RwSignal<ResourceState<UserPage>>,
    pub query: RwSignal<UserQuery>,
    ctx: StoredValue<AppContext>,
}

pub fn use_users() -> UsersHook {
    let hook = UsersHook {
        state: RwSignal::new(ResourceState::default()),
        query: RwSignal::new(UserQuery::default()),
        ctx: StoredValue::new(use_app_context()),
    };
    hook.reload();
    hook
}

impl UsersHook {
    pub fn reload(&self) {
        let api = self.ctx.get_value().api;
        let query = self.query.get_untracked();
        launch(
            self.state,
            LOAD_ERROR,
            async move { api.list_users(&query).await },
            replace,
            || {},
        );
    }

    pub fn set_search(&self, search: String) {
        self.query.update(|q| {
            q.search = search;
            q.page = 0;
        });
        self.reload();
    }

    pub fn set_role(&self, role: Option<Role>) {
        self.query.update(|q| {
            q.role = role;
            q.page = 0;
        });
        self.reload();
    }

    /// `page` is 0-based
    pub fn go_to(&self, page: u32) {
        self.query.update(|q| q.page = page);
        self.reload();
    }

    pub fn set_per_page(&self, per_page: u32) {
        self.query.update(|q| {
            q.per_page = per_page;
            q.page = 0;
        });
        self.reload();
    }

    pub fn create(&self, user: NewUser, on_success: impl FnOnce() + 'static) {
        let api = self.ctx.get_value().api;
        launch(
            self.state,
            CREATE_ERROR,
            async move { api.create_user(&user).await },
            insert_user,
            on_success,
        );
    }

    pub fn update(&self, id: u64, user: UserUpdate, on_success: impl FnOnce() + 'static) {
        let api = self.ctx.get_value().api;
        launch(
            self.state,
            UPDATE_ERROR,
            async move { api.update_user(id, &user).await },
            update_user,
            on_success,
        );
    }

    pub fn delete(&self, id: u64, on_success: impl FnOnce() + 'static) {
        let api = self.ctx.get_value().api;
        launch(
            self.state,
            DELETE_ERROR,
            async move { api.delete_user(id).await.map(|()| id) },
            remove_user,
            on_success,
        );
    }
}
