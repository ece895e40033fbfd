//! Admin: Users

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::components::{Alert, ConfirmDialog, Modal, Pagination, Severity};
use crate::hooks::use_users;
use crate::models::{NewUser, User, UserUpdate};
use crate::session::Role;

const SUCCESS_HIDE_MS: u32 = 3_000;

#[derive(Debug, Clone, PartialEq)]
struct Draft {
    name: String,
    email: String,
    password: String,
    role: String,
    bin_company: String,
    description: String,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            role: Role::Company.as_str().to_string(),
            bin_company: String::new(),
            description: String::new(),
        }
    }
}

impl Draft {
    fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            password: String::new(),
            role: user.role.clone(),
            bin_company: user.bin_company.clone().unwrap_or_default(),
            description: user.description.clone().unwrap_or_default(),
        }
    }

    fn check(&self, creating: bool) -> Result<(), &'static str> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err("Заполните имя и email");
        }
        if creating && self.password.is_empty() {
            return Err("Введите пароль");
        }
        Ok(())
    }

    fn new_user(&self) -> Result<NewUser, &'static str> {
        self.check(true)?;
        Ok(NewUser {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: self.role.clone(),
            bin_company: self.bin_company.trim().to_string(),
            description: self.description.trim().to_string(),
        })
    }

    fn update(&self) -> Result<UserUpdate, &'static str> {
        self.check(false)?;
        Ok(UserUpdate {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            role: self.role.clone(),
            bin_company: self.bin_company.trim().to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

fn role_label(role: &str) -> &str {
    Role::parse(role).map(Role::label).unwrap_or(role)
}

#[component]
pub fn UsersPage() -> impl IntoView {
    let users = use_users();
    let query = users.query;

    let (editing, set_editing) = signal::<Option<Option<u64>>>(None);
    let draft = RwSignal::new(Draft::default());
    let (show_password, set_show_password) = signal(false);
    let deleting = RwSignal::new(None::<u64>);
    let (success, set_success) = signal::<Option<String>>(None);
    let (search, set_search) = signal(String::new());

    let announce = move |message: &'static str| {
        set_success.set(Some(message.to_string()));
        Timeout::new(SUCCESS_HIDE_MS, move || {
            set_success.try_set(None);
        })
        .forget();
    };
    let close = move || set_editing.set(None);

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let result = match editing.get_untracked() {
            Some(None) => draft.with_untracked(Draft::new_user).map(|user| {
                users.create(user, move || {
                    close();
                    announce("Пользователь успешно добавлен");
                })
            }),
            Some(Some(id)) => draft.with_untracked(Draft::update).map(|update| {
                users.update(id, update, move || {
                    close();
                    announce("Пользователь успешно обновлен");
                })
            }),
            None => Ok(()),
        };
        if let Err(message) = result {
            users.state.update(|s| s.fail(message));
        }
    };

    let text_field = move |label: &'static str, kind: &'static str, read: fn(&Draft) -> &String, write: fn(&mut Draft, String)| {
        view! {
            <label class="field">
                <span>{label}</span>
                <input
                    type=kind
                    prop:value=move || draft.with(|d| read(d).clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| write(d, value));
                    }
                />
            </label>
        }
    };

    view! {
        <div class="page">
            <div class="page-header">
                <h1 class="page-title">"Пользователи"</h1>
                <div class="page-actions">
                    <button
                        class="btn btn-primary"
                        on:click=move |_| {
                            draft.set(Draft::default());
                            set_show_password.set(false);
                            set_editing.set(Some(None));
                        }
                    >
                        "Добавить пользователя"
                    </button>
                </div>
            </div>

            <Alert message=success severity=Severity::Success on_close=Callback::new(move |_| set_success.set(None)) />
            <Alert
                message=Signal::derive(move || users.state.with(|s| s.error.clone()))
                on_close=Callback::new(move |_| users.state.update(|s| s.clear_error()))
            />

            <form
                class="panel filters"
                on:submit=move |ev: web_sys::SubmitEvent| {
                    ev.prevent_default();
                    users.set_search(search.get_untracked());
                }
            >
                <label class="field grow">
                    <span>"Поиск"</span>
                    <input
                        type="search"
                        placeholder="Имя или email"
                        prop:value=move || search.get()
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span>"Роль"</span>
                    <select on:change=move |ev| users.set_role(Role::parse(&event_target_value(&ev)))>
                        <option value="all">"Все"</option>
                        <option value="moderator">"Модератор"</option>
                        <option value="company">"Компания"</option>
                    </select>
                </label>
                <div class="filter-actions">
                    <button type="submit" class="btn btn-primary">"Найти"</button>
                </div>
            </form>

            <Show when=move || users.state.with(|s| s.loading)>
                <div class="spinner">"Загрузка..."</div>
            </Show>

            <table class="table">
                <thead>
                    <tr>
                        <th>"Имя"</th>
                        <th>"Email"</th>
                        <th>"Роль"</th>
                        <th>"БИН"</th>
                        <th>"Описание"</th>
                        <th>"Действия"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        users
                            .state
                            .with(|s| s.data.data.clone())
                            .into_iter()
                            .map(|user| {
                                let id = user.id;
                                let prefill = Draft::from_user(&user);
                                let role = role_label(&user.role).to_string();
                                view! {
                                    <tr>
                                        <td>{user.name}</td>
                                        <td>{user.email}</td>
                                        <td>{role}</td>
                                        <td>{user.bin_company.unwrap_or_default()}</td>
                                        <td>{user.description.unwrap_or_default()}</td>
                                        <td class="row-actions">
                                            <button
                                                class="btn btn-small"
                                                on:click=move |_| {
                                                    draft.set(prefill.clone());
                                                    set_editing.set(Some(Some(id)));
                                                }
                                            >
                                                "Изменить"
                                            </button>
                                            <button class="btn btn-small btn-danger" on:click=move |_| deleting.set(Some(id))>
                                                "Удалить"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>

            <Pagination
                page=Signal::derive(move || query.with(|q| q.page + 1))
                last_page=Signal::derive(move || {
                    users.state.with(|s| {
                        let meta = &s.data.meta;
                        meta.last_page.unwrap_or_else(|| meta.total.div_ceil(u64::from(meta.per_page.max(1))) as u32).max(1)
                    })
                })
                per_page=Signal::derive(move || query.with(|q| q.per_page))
                total=Signal::derive(move || users.state.with(|s| s.data.meta.total))
                on_page=Callback::new(move |page: u32| users.go_to(page.saturating_sub(1)))
                on_per_page=Callback::new(move |size: u32| users.set_per_page(size))
            />

            <Modal
                open=Signal::derive(move || editing.get().is_some())
                title=Signal::derive(move || {
                    if matches!(editing.get(), Some(Some(_))) { "Редактировать пользователя" } else { "Новый пользователь" }.to_string()
                })
                on_close=Callback::new(move |_| close())
            >
                <form class="form" on:submit=save>
                    {text_field("Имя *", "text", |d| &d.name, |d, v| d.name = v)}
                    {text_field("Email *", "email", |d| &d.email, |d, v| d.email = v)}
                    <Show when=move || editing.get() == Some(None)>
                        <label class="field">
                            <span>"Пароль *"</span>
                            <div class="password-field">
                                <input
                                    type=move || if show_password.get() { "text" } else { "password" }
                                    autocomplete="new-password"
                                    prop:value=move || draft.with(|d| d.password.clone())
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        draft.update(|d| d.password = value);
                                    }
                                />
                                <button
                                    type="button"
                                    class="btn-icon"
                                    title="Показать пароль"
                                    on:click=move |_| set_show_password.update(|v| *v = !*v)
                                >
                                    {move || if show_password.get() { "🙈" } else { "👁" }}
                                </button>
                            </div>
                        </label>
                    </Show>
                    <label class="field">
                        <span>"Роль"</span>
                        <select on:change=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.role = value);
                        }>
                            {Role::ALL
                                .iter()
                                .map(|role| {
                                    let role = *role;
                                    view! {
                                        <option
                                            value=role.as_str()
                                            selected=move || draft.with(|d| d.role == role.as_str())
                                        >
                                            {role.label()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </label>
                    {text_field("БИН компании", "text", |d| &d.bin_company, |d, v| d.bin_company = v)}
                    {text_field("Описание", "text", |d| &d.description, |d, v| d.description = v)}
                    <div class="modal-actions">
                        <button type="button" class="btn" on:click=move |_| close()>"Отмена"</button>
                        <button type="submit" class="btn btn-primary" disabled=move || users.state.with(|s| s.loading)>
                            "Сохранить"
                        </button>
                    </div>
                </form>
            </Modal>

            <ConfirmDialog
                pending=deleting
                message="Вы уверены, что хотите удалить этого пользователя?"
                on_confirm=Callback::new(move |id: u64| {
                    users.delete(id, move || announce("Пользователь успешно удален"))
                })
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_required_only_on_create() {
        let draft = Draft {
            name: "ТОО Эко".into(),
            email: "eco@example.kz".into(),
            ..Default::default()
        };

        assert_eq!(draft.new_user(), Err("Введите пароль"));
        assert_eq!(draft.update().map(|u| u.role), Ok("company".to_string()));
    }

    #[test]
    fn test_edit_prefill_drops_password() {
        let user = User {
            id: 3,
            name: "Модератор".into(),
            email: "m@example.kz".into(),
            role: "moderator".into(),
            bin_company: None,
            description: Some("Север".into()),
            moderator_id: None,
            created_at: None,
        };

        let draft = Draft::from_user(&user);

        assert!(draft.password.is_empty());
        assert_eq!(draft.description, "Север");
        assert_eq!(role_label(&draft.role), "Модератор");
        assert_eq!(role_label("user"), "user");
    }
}
