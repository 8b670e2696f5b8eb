//! Site navigation table
//!
//! The menu is a fixed, ordered list. Entries flagged with `auth` are only
//! shown to (and only reachable by) signed-in users.

/// Route every visitor lands on
pub const RECIPES_ROUTE: &str = "/recipes";

/// Route used when a guarded page is opened without a session
pub const SIGN_IN_ROUTE: &str = "/signin";

/// Registration page route
pub const SIGN_UP_ROUTE: &str = "/signup";

/// A single menu item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationEntry {
    /// Display label
    pub title: &'static str,
    /// Target route path
    pub href: &'static str,
    /// Whether the entry is visible only to authenticated users
    pub auth: bool,
}

impl NavigationEntry {
    pub const fn new(title: &'static str, href: &'static str, auth: bool) -> Self {
        Self { title, href, auth }
    }

    /// Public entries are always visible, private ones only with a session
    pub fn is_visible(&self, authenticated: bool) -> bool {
        !self.auth || authenticated
    }
}

static NAVIGATION: [NavigationEntry; 5] = [
    NavigationEntry::new("Recipes", RECIPES_ROUTE, false),
    NavigationEntry::new("My Subscriptions", "/subscriptions", true),
    NavigationEntry::new("Create recipe", "/recipes/create", true),
    NavigationEntry::new("Favourite", "/favorites", true),
    NavigationEntry::new("Shopping list", "/cart", true),
];

/// The full menu in display order
pub fn navigation() -> &'static [NavigationEntry] {
    &NAVIGATION
}

/// Menu entries the current visitor should see, order preserved
pub fn visible_entries(authenticated: bool) -> impl Iterator<Item = &'static NavigationEntry> {
    NAVIGATION
        .iter()
        .filter(move |entry| entry.is_visible(authenticated))
}

/// Look up the menu entry for a route path
pub fn find_entry(path: &str) -> Option<&'static NavigationEntry> {
    let path = normalize_path(path);
    NAVIGATION.iter().find(|entry| entry.href == path)
}

/// Outcome of opening a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Render the page
    Allowed,
    /// Send the visitor elsewhere instead
    Redirect(&'static str),
}

/// Decide whether a route may be rendered for the current visitor.
///
/// Paths that are not in the menu are not guarded here.
pub fn route_access(path: &str, authenticated: bool) -> RouteAccess {
    match find_entry(path) {
        Some(entry) if !entry.is_visible(authenticated) => RouteAccess::Redirect(SIGN_IN_ROUTE),
        _ => RouteAccess::Allowed,
    }
}

/// Like [`route_access`], for a session that may still be resolving.
///
/// `None` means the session is not known yet. Guarded routes then have no
/// decision, while unguarded ones are allowed right away.
pub fn pending_route_access(path: &str, session: Option<bool>) -> Option<RouteAccess> {
    match (find_entry(path), session) {
        (Some(entry), None) if entry.auth => None,
        (_, session) => Some(route_access(path, session.unwrap_or(false))),
    }
}

fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
