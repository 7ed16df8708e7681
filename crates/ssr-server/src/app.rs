//! Demo application served by the binary.
//!
//! A small site exercising every render feature: per-route code-split
//! modules, auth-dependent content, a data preload, in-render navigation
//! and head management.

use std::sync::Arc;

use serde_json::json;
use ssr_render::{from_fn, preload_fn, Component, Loadable, MetaTag, Preload, Redirect, RenderError, RenderScope, Router};
use ssr_store::Action;

/// Root component: navigation bar plus the routed page.
pub fn root() -> Arc<dyn Component> {
    let pages = Router::new()
        .route("/", Loadable::new("Home", from_fn(home)))
        .route("/profile", Loadable::new("Profile", profile()))
        .route("/login", Loadable::new("Login", from_fn(login)))
        .route("/private", Redirect::to("/login"))
        .fallback(Loadable::new("NotFound", from_fn(not_found)));

    Arc::new(from_fn(move |scope| {
        let lang = scope.locale().locale.clone();
        let description = scope.t("app.description");
        let head = scope.head_mut();
        head.set_html_attribute("lang", lang);
        head.add_meta(MetaTag::name("description", &description));

        scope.element("nav", &[], nav)?;
        scope.element("main", &[], |s| s.render(&pages))
    }))
}

fn nav(scope: &mut RenderScope<'_>) -> Result<(), RenderError> {
    link(scope, "/", "nav.home")?;
    if scope.auth().is_authenticated() {
        link(scope, "/profile", "nav.profile")
    } else {
        link(scope, "/login", "nav.login")
    }
}

fn link(scope: &mut RenderScope<'_>, href: &str, label: &str) -> Result<(), RenderError> {
    let text = scope.t(label);
    scope.element("a", &[("href", href)], |s| {
        s.text(&text);
        Ok(())
    })
}

fn home(scope: &mut RenderScope<'_>) -> Result<(), RenderError> {
    let title = scope.t("app.title");
    scope.head_mut().set_title(title);

    let greeting = match scope.auth().user() {
        Some(user) => scope.t_with("home.welcome", &[("name", user)]),
        None => scope.t("home.guest"),
    };
    scope.element("h1", &[], |s| {
        s.text(&greeting);
        Ok(())
    })
}

/// Profile page. Anonymous visitors are sent to the login page; signed-in
/// users get their profile preloaded.
fn profile() -> impl Component {
    let details: Arc<dyn Preload> = Arc::new(preload_fn("profile", |ctx| async move {
        let user = ctx
            .auth
            .user()
            .ok_or_else(|| anyhow::anyhow!("profile requested without a user"))?
            .to_string();
        anyhow::Ok(vec![Action::data_loaded(
            "profile",
            json!({ "name": user, "posts": 0 }),
        )])
    }));

    from_fn(move |scope| {
        if !scope.auth().is_authenticated() {
            scope.redirect("/login");
            return Ok(());
        }

        let title = scope.t("profile.title");
        scope.head_mut().set_title(title.clone());
        if !scope.preload(details.clone()) {
            return Ok(());
        }

        let name = scope
            .data("profile")
            .and_then(|p| p.get("name"))
            .and_then(|n| n.as_str())
            .unwrap_or_default()
            .to_string();
        scope.element("h1", &[], |s| {
            s.text(&title);
            Ok(())
        })?;
        scope.element("p", &[("class", "profile-name")], |s| {
            s.text(&name);
            Ok(())
        })
    })
}

fn login(scope: &mut RenderScope<'_>) -> Result<(), RenderError> {
    let title = scope.t("login.title");
    scope.head_mut().set_title(title.clone());
    scope.element("form", &[("method", "post"), ("action", "/login")], |s| {
        s.element("h1", &[], |s| {
            s.text(&title);
            Ok(())
        })?;
        s.write_raw(r#"<input name="user"><button type="submit">"#);
        s.text(&title);
        s.write_raw("</button>");
        Ok(())
    })
}

fn not_found(scope: &mut RenderScope<'_>) -> Result<(), RenderError> {
    let title = scope.t("notfound.title");
    scope.head_mut().set_title(title.clone());
    scope.element("h1", &[], |s| {
        s.text(&title);
        Ok(())
    })
}
