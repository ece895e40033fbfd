//! Sidebar Component
//!
//! Navigation generated from the permission table, user name and logout.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::access::{menu, MenuNode, LOGIN_PATH};
use crate::context::use_app_context;
use crate::store::{store_role, store_toggle_sidebar, store_user, use_app_store, AppStateStoreFields};

#[component]
pub fn Sidebar() -> impl IntoView {
    let store = use_app_store();
    let ctx = StoredValue::new(use_app_context());
    let navigate = use_navigate();

    let open = move || store.sidebar_open().get();
    let user_name = move || store_user(&store).map(|u| u.name).unwrap_or_default();
    let role_label = move || store_role(&store).map(|r| r.label()).unwrap_or_default();

    let logout = move |_| {
        ctx.with_value(|ctx| ctx.logout());
        navigate(LOGIN_PATH, Default::default());
    };

    view! {
        <aside class="sidebar" class:collapsed=move || !open()>
            <div class="sidebar-header">
                <button class="sidebar-toggle" title="Свернуть меню" on:click=move |_| store_toggle_sidebar(&store)>
                    "☰"
                </button>
                <Show when=open>
                    <div class="sidebar-user">
                        <span class="sidebar-user-name">{user_name}</span>
                        <span class="sidebar-user-role">{role_label}</span>
                    </div>
                </Show>
            </div>
            <Show when=open>
                <nav class="sidebar-nav">
                    {move || {
                        store_role(&store)
                            .map(|role| menu(role).into_iter().map(menu_node).collect_view())
                    }}
                </nav>
            </Show>
            <button class="sidebar-logout" on:click=logout>
                {move || if open() { "Выйти" } else { "⏻" }}
            </button>
        </aside>
    }
}

fn menu_node(node: MenuNode) -> AnyView {
    match node {
        MenuNode::Link { label, path } => view! {
            <A href=path attr:class="sidebar-link">{label}</A>
        }
        .into_any(),
        MenuNode::Group { label, links } => {
            let (expanded, set_expanded) = signal(true);
            view! {
                <div class="sidebar-group">
                    <button class="sidebar-group-title" on:click=move |_| set_expanded.update(|e| *e = !*e)>
                        {label}
                        <span class="sidebar-group-arrow">{move || if expanded.get() { "▾" } else { "▸" }}</span>
                    </button>
                    <Show when=move || expanded.get()>
                        <div class="sidebar-group-links">
                            {links
                                .clone()
                                .into_iter()
                                .map(|(label, path)| view! {
                                    <A href=path attr:class="sidebar-link nested">{label}</A>
                                })
                                .collect_view()}
                        </div>
                    </Show>
                </div>
            }
            .into_any()
        }
    }
}
