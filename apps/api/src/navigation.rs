use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Login,
    Register,
    Dashboard,
    Doctors,
    Appointments,
    Profile,
}

impl Page {
    /// Sidebar order.
    pub const MENU: [Page; 4] = [Page::Dashboard, Page::Doctors, Page::Appointments, Page::Profile];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Login => "/login",
            Page::Register => "/register",
            Page::Dashboard => "/dashboard",
            Page::Doctors => "/dashboard/doctors",
            Page::Appointments => "/dashboard/appointment",
            Page::Profile => "/dashboard/profile",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Login => "Login",
            Page::Register => "Register",
            Page::Dashboard => "Dashboard",
            Page::Doctors => "Doctors",
            Page::Appointments => "Appointments",
            Page::Profile => "Profile",
        }
    }

    pub fn is_dashboard(&self) -> bool {
        Page::MENU.contains(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    Page {
        page: Page,
        label: &'static str,
        path: &'static str,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        menu: Vec<MenuItem>,
    },
    Redirect {
        to: &'static str,
    },
    NotFound {
        path: String,
    },
}

/// Map a client path to what should be shown. `/` goes to the login page;
/// anything unknown, inside or outside the dashboard, is not found.
pub fn resolve(path: &str) -> Resolution {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let normalized = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };

    if normalized == "/" {
        return Resolution::Redirect { to: Page::Login.path() };
    }

    let page = [
        Page::Login,
        Page::Register,
        Page::Dashboard,
        Page::Doctors,
        Page::Appointments,
        Page::Profile,
    ]
    .into_iter()
    .find(|page| page.path() == normalized);

    match page {
        Some(page) => Resolution::Page {
            page,
            label: page.label(),
            path: page.path(),
            menu: if page.is_dashboard() { menu(page) } else { Vec::new() },
        },
        None => Resolution::NotFound {
            path: path.to_string(),
        },
    }
}

fn menu(active: Page) -> Vec<MenuItem> {
    Page::MENU
        .iter()
        .map(|page| MenuItem {
            label: page.label(),
            href: page.path(),
            active: *page == active,
        })
        .collect()
}
