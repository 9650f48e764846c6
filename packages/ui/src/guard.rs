//! Route guard: where an operator may be, given whether they hold a session.
//!
//! The guard is a pure function of the current path and session presence and
//! is evaluated once per route render. It never checks whether the token is
//! still accepted by the server; a rejected token surfaces later as a failed
//! API call, which signs the operator out.

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const ADMIN_PATH: &str = "/admin";

/// Where the guard sends the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    Admin,
}

impl Redirect {
    pub fn path(self) -> &'static str {
        match self {
            Redirect::Login => LOGIN_PATH,
            Redirect::Admin => ADMIN_PATH,
        }
    }
}

/// Strip query, fragment and trailing slashes: `"/login/?next=x"` → `"/login"`.
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        ROOT_PATH
    } else {
        trimmed
    }
}

/// Redirect decision for a navigation to `path`.
///
/// - signed in, on `/login` or `/` → `/admin`
/// - anonymous, anywhere but `/login` → `/login`
pub fn redirect_for(path: &str, signed_in: bool) -> Option<Redirect> {
    let path = normalize(path);
    if signed_in {
        (path == LOGIN_PATH || path == ROOT_PATH).then_some(Redirect::Admin)
    } else {
        (path != LOGIN_PATH).then_some(Redirect::Login)
    }
}

/// Destination for paths that match no route.
pub fn fallback_for(signed_in: bool) -> Redirect {
    if signed_in {
        Redirect::Admin
    } else {
        Redirect::Login
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_in_operator_leaves_login_and_root() {
        assert_eq!(redirect_for("/login", true), Some(Redirect::Admin));
        assert_eq!(redirect_for("/", true), Some(Redirect::Admin));
        assert_eq!(redirect_for("", true), Some(Redirect::Admin));
        assert_eq!(redirect_for("/admin", true), None);
    }

    #[test]
    fn anonymous_operator_is_sent_to_login() {
        assert_eq!(redirect_for("/admin", false), Some(Redirect::Login));
        assert_eq!(redirect_for("/", false), Some(Redirect::Login));
        assert_eq!(redirect_for("/anything/else", false), Some(Redirect::Login));
        assert_eq!(redirect_for("/login", false), None);
    }

    #[test]
    fn query_fragment_and_trailing_slash_are_ignored() {
        assert_eq!(redirect_for("/login/", false), None);
        assert_eq!(redirect_for("/login?error=expired", false), None);
        assert_eq!(redirect_for("/login#top", true), Some(Redirect::Admin));
        assert_eq!(redirect_for("/admin/", true), None);
    }

    #[test]
    fn unknown_paths_fall_back_by_session() {
        assert_eq!(fallback_for(true).path(), "/admin");
        assert_eq!(fallback_for(false).path(), "/login");
    }

    #[test]
    fn decision_is_stable_across_repeated_navigation() {
        for _ in 0..3 {
            assert_eq!(redirect_for("/admin", true), None);
            assert_eq!(redirect_for("/admin", false), Some(Redirect::Login));
        }
    }
}
