//! End-to-end render tests driving the HTTP router.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::Router;
use http::{header, Request, StatusCode};
use serde_json::{json, Value};
use ssr_assets::AssetManifest;
use ssr_core::OrchestratorConfig;
use ssr_locale::LocaleRegistry;
use ssr_render::{from_fn, preload_fn, Component, Fragment, Loadable, Preload};
use ssr_server::{app, router, Orchestrator};
use ssr_store::Action;
use tempfile::TempDir;
use tower::ServiceExt;

const TEMPLATE: &str = r#"<!DOCTYPE html><html><head><meta charset="utf-8"><title>React App</title></head><body><div id="root"></div></body></html>"#;

const MANIFEST: &str = r#"{
  "files": {
    "main.js": "/static/js/main.1a2b.js",
    "Footer.js": "static/js/Footer.3c4d.chunk.js",
    "Header.js": "/static/js/Header.5e6f.chunk.js",
    "Unused.js": "/static/js/Unused.7a8b.chunk.js",
    "main.css": "/static/css/main.9c0d.css",
    "Home.js": "/static/js/Home.1111.chunk.js",
    "Profile.js": "/static/js/Profile.2222.chunk.js"
  }
}"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), TEMPLATE).unwrap();
        Self { dir }
    }

    fn without_template() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            template_path: self.dir.path().join("index.html"),
            manifest_path: self.dir.path().join("asset-manifest.json"),
            ..OrchestratorConfig::default()
        }
    }

    fn app(&self, root: Arc<dyn Component>) -> Router {
        self.app_with(self.config(), root)
    }

    fn app_with(&self, config: OrchestratorConfig, root: Arc<dyn Component>) -> Router {
        let manifest = AssetManifest::from_json(MANIFEST).unwrap();
        let orchestrator = Orchestrator::new(
            config,
            Arc::new(manifest),
            Arc::new(LocaleRegistry::builtin()),
            root,
        );
        router(Arc::new(orchestrator))
    }
}

struct Reply {
    status: StatusCode,
    location: Option<String>,
    body: String,
}

async fn get(app: Router, uri: &str, headers: &[(&str, &str)]) -> Reply {
    let mut builder = Request::builder().uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    Reply {
        status,
        location,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

/// Parse the JSON assigned to `window.<name>` in an inline script.
fn embedded(html: &str, name: &str) -> Value {
    let marker = format!("<script>window.{} = ", name);
    let start = html.find(&marker).unwrap() + marker.len();
    let end = start + html[start..].find("</script>").unwrap();
    serde_json::from_str(&html[start..end]).unwrap()
}

fn script_srcs(html: &str) -> Vec<&str> {
    html.match_indices(r#"<script type="text/javascript" src=""#)
        .map(|(i, m)| {
            let rest = &html[i + m.len()..];
            &rest[..rest.find('"').unwrap()]
        })
        .collect()
}

fn component(module: &'static str, text: &'static str) -> Loadable {
    Loadable::new(
        module,
        from_fn(move |scope| {
            scope.text(text);
            Ok(())
        }),
    )
}

#[tokio::test]
async fn test_anonymous_home_page() {
    let fixture = Fixture::new();
    let reply = get(fixture.app(app::root()), "/", &[]).await;

    assert_eq!(reply.status, StatusCode::OK);

    let state = embedded(&reply.body, "__PRELOADED_STATE__");
    assert_eq!(state["auth"], json!({ "status": "logged_out" }));
    assert_eq!(state["router"]["location"]["pathname"], "/");

    let intl = embedded(&reply.body, "__INTL_CONFIG__");
    assert_eq!(intl["locale"], "en-US");
    assert_eq!(intl["key"], "en");

    assert!(reply.body.contains(r#"<html lang="en-US">"#));
    assert!(reply.body.contains("<title>My Website</title>"));
    assert!(!reply.body.contains("React App"));
    assert!(reply.body.contains("Welcome! Please log in."));
    assert_eq!(script_srcs(&reply.body), vec!["/static/js/Home.1111.chunk.js"]);
}

#[tokio::test]
async fn test_missing_template_is_404() {
    let fixture = Fixture::without_template();
    let reply = get(
        fixture.app(app::root()),
        "/profile",
        &[("cookie", "mywebsite=alice")],
    )
    .await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.body.is_empty());
}

#[tokio::test]
async fn test_malformed_template_is_404() {
    let fixture = Fixture::without_template();
    std::fs::write(fixture.dir.path().join("index.html"), "<html></html>").unwrap();

    let reply = get(fixture.app(app::root()), "/", &[]).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.body.is_empty());
}

#[tokio::test]
async fn test_in_render_navigation_redirects() {
    let fixture = Fixture::new();
    let reply = get(fixture.app(app::root()), "/private", &[]).await;

    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(reply.location.as_deref(), Some("/login"));
    assert!(reply.body.is_empty());
}

#[tokio::test]
async fn test_anonymous_profile_redirects_to_login() {
    let fixture = Fixture::new();
    let reply = get(fixture.app(app::root()), "/profile", &[]).await;

    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(reply.location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_authenticated_profile_is_preloaded() {
    let fixture = Fixture::new();
    let reply = get(
        fixture.app(app::root()),
        "/profile",
        &[("cookie", "mywebsite=alice; theme=dark")],
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);

    let state = embedded(&reply.body, "__PRELOADED_STATE__");
    assert_eq!(state["auth"], json!({ "status": "authenticated", "user": "alice" }));
    assert_eq!(state["data"]["profile"]["name"], "alice");

    assert!(reply.body.contains(r#"<p class="profile-name">alice</p>"#));
    assert_eq!(script_srcs(&reply.body), vec!["/static/js/Profile.2222.chunk.js"]);
}

#[tokio::test]
async fn test_empty_auth_cookie_is_logged_out() {
    let fixture = Fixture::new();
    let reply = get(fixture.app(app::root()), "/", &[("cookie", "mywebsite=")]).await;

    let state = embedded(&reply.body, "__PRELOADED_STATE__");
    assert_eq!(state["auth"]["status"], "logged_out");
}

#[tokio::test]
async fn test_two_code_split_components_in_manifest_order() {
    let fixture = Fixture::new();
    let root = Fragment::new()
        .child(component("Header", "header"))
        .child(component("Footer", "footer"))
        .child(component("Header", "header again"))
        .child(component("NoChunk", "inline"));

    let reply = get(fixture.app(Arc::new(root)), "/", &[]).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        script_srcs(&reply.body),
        vec![
            "/static/js/Footer.3c4d.chunk.js",
            "/static/js/Header.5e6f.chunk.js",
        ]
    );
}

#[tokio::test]
async fn test_hostile_state_is_escaped() {
    let fixture = Fixture::new();
    let payload = "</script><script>alert(1)</script><!--";
    let preload: Arc<dyn Preload> = Arc::new(preload_fn("note", move |_| async move {
        anyhow::Ok(vec![Action::data_loaded("note", json!(payload))])
    }));
    let root = from_fn(move |scope| {
        if scope.preload(preload.clone()) {
            scope.text("loaded");
        }
        Ok(())
    });

    let reply = get(fixture.app(Arc::new(root)), "/", &[]).await;

    let marker = "<script>window.__PRELOADED_STATE__ = ";
    let start = reply.body.find(marker).unwrap() + marker.len();
    let end = start + reply.body[start..].find("</script>").unwrap();
    assert!(!reply.body[start..end].contains('<'));

    let state = embedded(&reply.body, "__PRELOADED_STATE__");
    assert_eq!(state["data"]["note"], payload);
    assert!(reply.body.contains("<div id=\"root\">loaded</div>"));
}

#[tokio::test]
async fn test_failed_preload_still_renders() {
    let fixture = Fixture::new();
    let preload: Arc<dyn Preload> = Arc::new(preload_fn("broken", |_| async {
        Err::<Vec<Action>, _>(anyhow::anyhow!("upstream down"))
    }));
    let root = from_fn(move |scope| {
        if scope.preload(preload.clone()) {
            let text = if scope.data("broken").is_some() { "data" } else { "fallback" };
            scope.text(text);
        }
        Ok(())
    });

    let reply = get(fixture.app(Arc::new(root)), "/", &[]).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("<div id=\"root\">fallback</div>"));
}

#[tokio::test]
async fn test_render_error_is_404() {
    let fixture = Fixture::new();
    let root = from_fn(|_| Err(ssr_render::RenderError::component("broken widget")));

    let reply = get(fixture.app(Arc::new(root)), "/", &[]).await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.body.is_empty());
}

#[tokio::test]
async fn test_locale_negotiation() {
    let fixture = Fixture::new();

    let reply = get(
        fixture.app(app::root()),
        "/",
        &[("accept-language", "zh-CN,zh;q=0.9,en;q=0.8")],
    )
    .await;
    assert_eq!(embedded(&reply.body, "__INTL_CONFIG__")["locale"], "zh-CN");

    let reply = get(
        fixture.app(app::root()),
        "/?lang=en",
        &[("accept-language", "zh-CN")],
    )
    .await;
    assert_eq!(embedded(&reply.body, "__INTL_CONFIG__")["locale"], "en-US");

    let reply = get(fixture.app(app::root()), "/", &[("cookie", "locale=zh")]).await;
    assert_eq!(embedded(&reply.body, "__INTL_CONFIG__")["key"], "zh");
}

#[tokio::test]
async fn test_unknown_default_locale_is_404() {
    let fixture = Fixture::new();
    let config = OrchestratorConfig {
        default_locale: "fr".to_string(),
        ..fixture.config()
    };

    let reply = get(fixture.app_with(config, app::root()), "/", &[]).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_render_deadline() {
    let fixture = Fixture::new();
    let slow: Arc<dyn Preload> = Arc::new(preload_fn("slow", |_| async {
        tokio::time::sleep(std::time::Duration::from_secs(10)).await;
        anyhow::Ok(Vec::new())
    }));
    let root = from_fn(move |scope| {
        scope.preload(slow.clone());
        Ok(())
    });
    let mut config = fixture.config();
    config.render_deadline_ms = 50;
    config.preload.timeout_ms = 0;

    let reply = get(fixture.app_with(config, Arc::new(root)), "/", &[]).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_zero_render_deadline_waits_for_preloads() {
    let fixture = Fixture::new();
    let quick: Arc<dyn Preload> = Arc::new(preload_fn("quick", |_| async {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        anyhow::Ok(Vec::new())
    }));
    let root = from_fn(move |scope| {
        if scope.preload(quick.clone()) {
            scope.text("settled");
        }
        Ok(())
    });
    let mut config = fixture.config();
    config.render_deadline_ms = 0;

    let reply = get(fixture.app_with(config, Arc::new(root)), "/", &[]).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("<div id=\"root\">settled</div>"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_keep_their_own_auth() {
    let fixture = Fixture::new();
    let app = fixture.app(app::root());

    let (alice, bob, anonymous) = tokio::join!(
        get(app.clone(), "/profile", &[("cookie", "mywebsite=alice")]),
        get(app.clone(), "/profile", &[("cookie", "theme=dark; mywebsite=bob")]),
        get(app, "/", &[]),
    );

    assert_eq!(alice.status, StatusCode::OK);
    let state = embedded(&alice.body, "__PRELOADED_STATE__");
    assert_eq!(state["auth"], json!({ "status": "authenticated", "user": "alice" }));
    assert_eq!(state["data"]["profile"]["name"], "alice");

    assert_eq!(bob.status, StatusCode::OK);
    let state = embedded(&bob.body, "__PRELOADED_STATE__");
    assert_eq!(state["auth"], json!({ "status": "authenticated", "user": "bob" }));
    assert_eq!(state["data"]["profile"]["name"], "bob");

    assert_eq!(anonymous.status, StatusCode::OK);
    let state = embedded(&anonymous.body, "__PRELOADED_STATE__");
    assert_eq!(state["auth"], json!({ "status": "logged_out" }));
}
