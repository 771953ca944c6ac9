//! Route table of the client.

use std::fmt;

pub const ROOT: &str = "/";
pub const MENU: &str = "/menu";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Menu,
    Dashboard,
    Calendar,
    Members,
}

impl Route {
    /// Entries of the menu shown to a logged in member.
    pub const MENU_ENTRIES: [Route; 3] = [Route::Dashboard, Route::Calendar, Route::Members];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => ROOT,
            Route::Register => "/register",
            Route::Menu => MENU,
            Route::Dashboard => "/menu/dashboard",
            Route::Calendar => "/menu/calendar",
            Route::Members => "/menu/members",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Register => "Register",
            Route::Menu => "Menu",
            Route::Dashboard => "Dashboard",
            Route::Calendar => "Calendar",
            Route::Members => "Members",
        }
    }

    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            Route::Menu | Route::Dashboard | Route::Calendar | Route::Members
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title(), self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Show(Route),
    Redirect(&'static str),
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.trim_end_matches('/') {
        "" => ROOT,
        trimmed => trimmed,
    }
}

/// Resolve `path` for a visitor with or without a session.
pub fn resolve(path: &str, authenticated: bool) -> Navigation {
    let route = match normalize(path) {
        ROOT if authenticated => return Navigation::Redirect(MENU),
        ROOT => Route::Login,
        "/register" => Route::Register,
        MENU => Route::Menu,
        "/menu/dashboard" => Route::Dashboard,
        "/menu/calendar" => Route::Calendar,
        "/menu/members" => Route::Members,
        _ => return Navigation::Redirect(ROOT),
    };
    if route.requires_session() && !authenticated {
        return Navigation::Redirect(ROOT);
    }
    Navigation::Show(route)
}

/// Follow redirects until a route is shown.
pub fn follow(path: &str, authenticated: bool) -> Route {
    let mut path = path;
    loop {
        match resolve(path, authenticated) {
            Navigation::Show(route) => return route,
            Navigation::Redirect(target) => path = target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root() {
        assert_eq!(resolve("/", false), Navigation::Show(Route::Login));
        assert_eq!(resolve("/", true), Navigation::Redirect(MENU));
        assert_eq!(follow("/", true), Route::Menu);
    }

    #[test]
    fn test_register_is_public() {
        assert_eq!(resolve("/register", false), Navigation::Show(Route::Register));
        assert_eq!(resolve("/register", true), Navigation::Show(Route::Register));
    }

    #[test]
    fn test_menu_requires_session() {
        for path in ["/menu", "/menu/dashboard", "/menu/calendar", "/menu/members"] {
            assert_eq!(resolve(path, false), Navigation::Redirect(ROOT));
            assert_eq!(follow(path, false), Route::Login);
        }
        assert_eq!(resolve("/menu/members/", true), Navigation::Show(Route::Members));
        assert_eq!(resolve("/menu?tab=1", true), Navigation::Show(Route::Menu));
    }

    #[test]
    fn test_unknown_redirects_to_root() {
        assert_eq!(resolve("/admin", true), Navigation::Redirect(ROOT));
        assert_eq!(resolve("/menu/settings", true), Navigation::Redirect(ROOT));
        assert_eq!(follow("/nope", true), Route::Menu);
        assert_eq!(follow("/nope", false), Route::Login);
    }

    #[test]
    fn test_route_paths_resolve_to_themselves() {
        for route in Route::MENU_ENTRIES {
            assert_eq!(resolve(route.path(), true), Navigation::Show(route));
        }
    }
}
