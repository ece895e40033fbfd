//! Access Control
//!
//! Static permission table: which role reaches which page, and under which
//! capability. The router and the sidebar both read it.

use crate::session::{Role, Session};

/// What a route lets the user do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ViewAllReports,
    ViewFinalProcessing,
    CreateRecords,
    ManageReferenceData,
    ManageRecords,
    ManageUsers,
    ViewModeratedReports,
    RegisterCompanies,
    ViewOwnReports,
}

impl Role {
    pub fn capabilities(self) -> &'static [Capability] {
        use Capability::*;
        match self {
            Role::Admin => &[
                ViewAllReports,
                ViewFinalProcessing,
                CreateRecords,
                ManageReferenceData,
                ManageRecords,
                ManageUsers,
            ],
            Role::Moderator => &[ViewModeratedReports, RegisterCompanies, CreateRecords],
            Role::Company => &[ViewOwnReports],
        }
    }

    pub fn can(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

/// Screens the shell can render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    AdminDashboard,
    AdminAddRecord,
    WasteCategories,
    FinalWasteTypes,
    Wastes,
    WasteRecords,
    FinalProcessingReports,
    Users,
    ModeratorDashboard,
    AddCompany,
    ModeratorAddRecord,
    CompanyDashboard,
    CompanyReports,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub role: Role,
    pub path: &'static str,
    pub page: Page,
    pub capability: Capability,
    /// Sidebar label; routes without one stay out of the menu
    pub label: Option<&'static str>,
    pub group: Option<&'static str>,
}

const fn route(
    role: Role,
    path: &'static str,
    page: Page,
    capability: Capability,
    label: Option<&'static str>,
    group: Option<&'static str>,
) -> RouteEntry {
    RouteEntry { role, path, page, capability, label, group }
}

pub const HOME_PATH: &str = "/dashboard";
pub const LOGIN_PATH: &str = "/";

/// In sidebar order
pub static ROUTES: &[RouteEntry] = &[
    // admin
    route(Role::Admin, "/dashboard", Page::AdminDashboard, Capability::ViewAllReports, Some("Отчеты"), None),
    route(Role::Admin, "/add-report", Page::AdminAddRecord, Capability::CreateRecords, Some("Добавление отчета"), None),
    route(Role::Admin, "/waste-categories", Page::WasteCategories, Capability::ManageReferenceData, Some("Добавление категории"), Some("Отходы")),
    route(Role::Admin, "/final-waste-types", Page::FinalWasteTypes, Capability::ManageReferenceData, Some("Добавления типа таб.5"), Some("Отходы")),
    route(Role::Admin, "/waste-add", Page::Wastes, Capability::ManageReferenceData, Some("Добавления отхода"), Some("Отходы")),
    route(Role::Admin, "/waste-record-edit", Page::WasteRecords, Capability::ManageRecords, Some("Редактирование записей отходов"), Some("Отходы")),
    route(Role::Admin, "/final-processing-reports", Page::FinalProcessingReports, Capability::ViewFinalProcessing, Some("Отчеты"), Some("Отчет 5")),
    route(Role::Admin, "/users", Page::Users, Capability::ManageUsers, Some("Пользователи"), None),
    // moderator
    route(Role::Moderator, "/dashboard", Page::ModeratorDashboard, Capability::ViewModeratedReports, Some("Панель управления"), None),
    route(Role::Moderator, "/add-company", Page::AddCompany, Capability::RegisterCompanies, Some("Добавить компанию"), None),
    route(Role::Moderator, "/add-report", Page::ModeratorAddRecord, Capability::CreateRecords, Some("Добавить запись"), None),
    // company
    route(Role::Company, "/dashboard", Page::CompanyDashboard, Capability::ViewOwnReports, Some("Панель управления"), None),
    route(Role::Company, "/reports", Page::CompanyReports, Capability::ViewOwnReports, None, None),
];

/// Outcome of matching the current location against the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Signed out, on the login path
    Login,
    /// Signed out elsewhere: go to the login path
    RedirectToLogin,
    /// Signed in but not allowed here: go to the dashboard
    RedirectHome,
    Page(Page),
}

pub fn resolve(session: &Session, path: &str) -> Resolution {
    let path = normalize(path);
    let Some(role) = session.active_role() else {
        return if path == LOGIN_PATH {
            Resolution::Login
        } else {
            Resolution::RedirectToLogin
        };
    };

    ROUTES
        .iter()
        .find(|entry| entry.role == role && entry.path == path && role.can(entry.capability))
        .map(|entry| Resolution::Page(entry.page))
        .unwrap_or(Resolution::RedirectHome)
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.trim_end_matches('/') {
        "" => LOGIN_PATH,
        trimmed => trimmed,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuNode {
    Link { label: &'static str, path: &'static str },
    Group { label: &'static str, links: Vec<(&'static str, &'static str)> },
}

/// Sidebar entries for a role, groups placed where their first link appears
pub fn menu(role: Role) -> Vec<MenuNode> {
    let mut nodes: Vec<MenuNode> = Vec::new();
    for entry in ROUTES.iter().filter(|e| e.role == role && role.can(e.capability)) {
        let Some(label) = entry.label else { continue };
        match entry.group {
            None => nodes.push(MenuNode::Link { label, path: entry.path }),
            Some(group) => {
                let existing = nodes.iter_mut().find_map(|node| match node {
                    MenuNode::Group { label: l, links } if *l == group => Some(links),
                    _ => None,
                });
                match existing {
                    Some(links) => links.push((label, entry.path)),
                    None => nodes.push(MenuNode::Group {
                        label: group,
                        links: vec![(label, entry.path)],
                    }),
                }
            }
        }
    }
    nodes
}
