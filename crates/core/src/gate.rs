//! The authorization gate.
//!
//! A capability check with no state of its own: given the current identity
//! (or none) and an optionally required role, decide whether a view may be
//! reached. The gate wraps every role-restricted view and is re-evaluated on
//! every navigation — decisions are never cached.

use crate::identity::{Identity, Role};

/// Outcome of a gate check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    /// The view may be rendered.
    Allow,
    /// No authenticated identity; send the caller to the login view.
    RedirectToLogin,
    /// Authenticated, but the role does not match; send the caller to the
    /// unauthorized view.
    RedirectToUnauthorized,
}

/// Decides access to a view.
///
/// No identity → login redirect. Identity present but not matching a
/// required role → unauthorized redirect. Otherwise allow.
pub fn check_route(identity: Option<&Identity>, required: Option<Role>) -> RouteAccess {
    let Some(identity) = identity else {
        return RouteAccess::RedirectToLogin;
    };
    match required {
        Some(role) if identity.role != role => RouteAccess::RedirectToUnauthorized,
        _ => RouteAccess::Allow,
    }
}

/// The dashboard landing route for an identity.
///
/// Mirrors the marketplace's post-login redirect: admins and doctors get
/// their own dashboards, customers land on the generic one, and an
/// unauthenticated caller is sent to login.
pub fn dashboard_route(identity: Option<&Identity>) -> &'static str {
    match identity {
        None => "/login",
        Some(identity) => match identity.role {
            Role::Admin => "/admin",
            Role::Doctor => "/doctor",
            Role::Customer => "/dashboard",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docspot_types::{EmailAddress, NonEmptyText};

    fn identity(role: Role) -> Identity {
        Identity {
            id: "1".into(),
            email: EmailAddress::parse("someone@example.com").expect("valid email"),
            name: NonEmptyText::new("Someone").expect("valid name"),
            role,
            avatar: None,
        }
    }

    #[test]
    fn no_identity_redirects_to_login() {
        assert_eq!(check_route(None, None), RouteAccess::RedirectToLogin);
        assert_eq!(
            check_route(None, Some(Role::Admin)),
            RouteAccess::RedirectToLogin
        );
    }

    #[test]
    fn matching_role_is_allowed() {
        let admin = identity(Role::Admin);
        assert_eq!(
            check_route(Some(&admin), Some(Role::Admin)),
            RouteAccess::Allow
        );
    }

    #[test]
    fn mismatched_role_redirects_to_unauthorized() {
        let customer = identity(Role::Customer);
        for required in [Role::Doctor, Role::Admin] {
            assert_eq!(
                check_route(Some(&customer), Some(required)),
                RouteAccess::RedirectToUnauthorized
            );
        }
    }

    #[test]
    fn any_identity_passes_when_no_role_is_required() {
        for role in [Role::Customer, Role::Doctor, Role::Admin] {
            assert_eq!(check_route(Some(&identity(role)), None), RouteAccess::Allow);
        }
    }

    #[test]
    fn dashboard_routes_per_role() {
        assert_eq!(dashboard_route(None), "/login");
        assert_eq!(dashboard_route(Some(&identity(Role::Admin))), "/admin");
        assert_eq!(dashboard_route(Some(&identity(Role::Doctor))), "/doctor");
        assert_eq!(
            dashboard_route(Some(&identity(Role::Customer))),
            "/dashboard"
        );
    }
}
