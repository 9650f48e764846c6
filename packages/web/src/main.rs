use api::ApiClient;
use dioxus::prelude::*;
use store::AdminConfig;
use tracing::{error, info, Level};

use ui::{fallback_for, redirect_for, use_session, Navbar, Redirect, SessionProvider};
use views::{Admin, Login, NotFound, Root};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Guard)]
        #[route("/")]
        Root {},
        #[route("/login")]
        Login {},
        #[route("/admin")]
        Admin {},
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

impl From<Redirect> for Route {
    fn from(redirect: Redirect) -> Self {
        match redirect {
            Redirect::Login => Route::Login {},
            Redirect::Admin => Route::Admin {},
        }
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const ADMIN_TOML: &str = include_str!("../admin.toml");

fn main() {
    dioxus::logger::init(Level::INFO).expect("failed to initialise logger");
    dioxus::launch(App);
}

/// Embedded `admin.toml`, with `MANDOWN_API_URL` (read at build time)
/// replacing the API base URL when set.
fn load_config() -> Result<AdminConfig, store::ConfigError> {
    let config = AdminConfig::from_toml(ADMIN_TOML)?;
    Ok(match option_env!("MANDOWN_API_URL") {
        Some(url) if !url.trim().is_empty() => config.with_base_url(url),
        _ => config,
    })
}

fn page_origin() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()?.location().origin().ok()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

fn connect() -> Result<(AdminConfig, ApiClient), String> {
    let config = load_config().map_err(|e| e.to_string())?;
    let endpoint = config
        .endpoint_url(page_origin().as_deref())
        .map_err(|e| e.to_string())?;
    let client = ApiClient::new(endpoint.as_str())
        .map_err(|e| format!("invalid API endpoint `{endpoint}`: {e}"))?;
    info!(%endpoint, "API endpoint configured");
    Ok((config, client))
}

#[component]
fn App() -> Element {
    let setup = use_hook(connect);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        match setup {
            Ok((config, client)) => rsx! {
                Console { config, client }
            },
            Err(message) => {
                error!("console is misconfigured: {message}");
                rsx! {
                    div { class: "misconfigured", role: "alert", "{message}" }
                }
            }
        }
    }
}

#[component]
fn Console(config: AdminConfig, client: ApiClient) -> Element {
    use_context_provider(|| config);
    use_context_provider(|| client);

    rsx! {
        SessionProvider {
            Router::<Route> {}
        }
    }
}

/// Layout wrapping every route: redirects by session presence, then renders
/// the navbar and the matched view.
#[component]
fn Guard() -> Element {
    let session = use_session();
    let route = use_route::<Route>();
    let nav = use_navigator();

    let signed_in = session.is_signed_in();
    let redirect = match &route {
        Route::NotFound { .. } => Some(fallback_for(signed_in)),
        route => redirect_for(&route.to_string(), signed_in),
    };
    if let Some(target) = redirect {
        nav.replace(Route::from(target));
        return rsx! {};
    }

    rsx! {
        Navbar {
            on_logout: move |_| {
                nav.replace(Route::Login {});
            },
        }
        main {
            class: "content",
            Outlet::<Route> {}
        }
    }
}
