//! Route access policy.
//!
//! A thin layer over the session's authenticated flag deciding whether a
//! view may render. Public routes bounce already-authenticated users back
//! to the home view; the private home view bounces anonymous users to the
//! login view.

/// The navigable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Login form. Public.
    Login,
    /// Contact-admin page for users without an account. Public.
    ContactAdmin,
    /// The tracker itself. Requires authentication.
    Home,
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The requested route may render.
    Allow,
    /// The caller should navigate to this route instead.
    RedirectTo(Route),
}

/// Decides whether `route` may render for the given authentication state.
pub fn resolve(route: Route, authenticated: bool) -> Access {
    match route {
        Route::Home => {
            if authenticated {
                Access::Allow
            } else {
                Access::RedirectTo(Route::Login)
            }
        }
        Route::Login | Route::ContactAdmin => {
            if authenticated {
                Access::RedirectTo(Route::Home)
            } else {
                Access::Allow
            }
        }
    }
}
