//! Navigable page surface.

/// A page the shell can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Products,
    Cart,
}

impl Route {
    /// Resolve a path. Anything unrecognised falls back to the product listing.
    pub fn resolve(path: &str) -> Route {
        let path = path.trim();
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        match trimmed {
            "" => Route::Landing,
            "/products" => Route::Products,
            "/cart" => Route::Cart,
            _ => Route::Products,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Products => "/products",
            Route::Cart => "/cart",
        }
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}
