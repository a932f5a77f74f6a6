//! Static route table.

use crate::domain::{Route, ViewId};

/// Legacy Spanish fragments still accepted in addresses.
const ALIASES: &[(&str, ViewId)] = &[
    ("", ViewId::Home),
    ("inicio", ViewId::Home),
    ("soporte", ViewId::Support),
    ("soporte-tecnico", ViewId::Support),
    ("seguridad", ViewId::Security),
    ("terminos", ViewId::Terms),
];

/// Immutable map from fragment to [`Route`].
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: ViewId::ALL.iter().map(|v| Route::for_view(*v)).collect(),
        }
    }

    /// Looks up a fragment such as `#login` or `Soporte`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use companyplus::domain::ViewId;
    /// use companyplus::navigation::RouteTable;
    ///
    /// let table = RouteTable::new();
    /// assert_eq!(table.resolve("#soporte").map(|r| r.view), Some(ViewId::Support));
    /// assert!(table.resolve("#nowhere").is_none());
    /// ```
    #[must_use]
    pub fn resolve(&self, fragment: &str) -> Option<&Route> {
        let key = fragment.trim().trim_start_matches('#').trim_start_matches('/').to_ascii_lowercase();

        self.routes
            .iter()
            .find(|r| r.path == key)
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == key)
                    .map(|(_, view)| self.route(*view))
            })
    }

    /// The route for `view`. Every view has exactly one.
    #[must_use]
    pub fn route(&self, view: ViewId) -> &Route {
        self.routes
            .iter()
            .find(|r| r.view == view)
            .unwrap_or(&self.routes[0])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_view_resolves_by_path() {
        let table = RouteTable::new();
        for view in ViewId::ALL {
            assert_eq!(table.resolve(view.path()).map(|r| r.view), Some(view));
            assert_eq!(table.route(view).view, view);
        }
    }

    #[test]
    fn fragment_normalisation() {
        let table = RouteTable::new();
        assert_eq!(table.resolve("#").map(|r| r.view), Some(ViewId::Home));
        assert_eq!(table.resolve("  #LOGIN ").map(|r| r.view), Some(ViewId::Login));
        assert_eq!(table.resolve("#/faq").map(|r| r.view), Some(ViewId::Faq));
        assert_eq!(table.resolve("terminos").map(|r| r.view), Some(ViewId::Terms));
    }
}
