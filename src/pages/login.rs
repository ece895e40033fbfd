//! Login Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::access::HOME_PATH;
use crate::components::Alert;
use crate::context::use_app_context;

const LOGIN_ERROR: &str = "Ошибка авторизации";

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = StoredValue::new(use_app_context());
    let navigate = use_navigate();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let email = email.get_untracked().trim().to_string();
        let password = password.get_untracked();
        if email.is_empty() || password.is_empty() {
            set_error.set(Some("Введите email и пароль".into()));
            return;
        }

        set_loading.set(true);
        set_error.set(None);
        let ctx = ctx.get_value();
        let navigate = navigate.clone();
        spawn_local(async move {
            match ctx.api.login(&email, &password).await {
                Ok(session) => {
                    ctx.login(session);
                    navigate(HOME_PATH, Default::default());
                }
                Err(err) => {
                    tracing::warn!("login failed: {}", err);
                    set_error.try_set(Some(err.user_message(LOGIN_ERROR)));
                }
            }
            set_loading.try_set(false);
        });
    };

    view! {
        <div class="login-page">
            <form class="login-card" on:submit=submit>
                <h1>"Вход в систему"</h1>
                <Alert message=error />
                <label class="field">
                    <span>"Email"</span>
                    <input
                        type="email"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span>"Пароль"</span>
                    <div class="password-field">
                        <input
                            type=move || if show_password.get() { "text" } else { "password" }
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
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
                <button type="submit" class="btn btn-primary" disabled=move || loading.get()>
                    {move || if loading.get() { "Вход..." } else { "Войти" }}
                </button>
            </form>
        </div>
    }
}
