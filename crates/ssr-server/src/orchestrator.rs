//! Per-request orchestration.
//!
//! Ties the pieces together for one request: read the template, resolve
//! the locale bundle, seed a fresh store, run the render pipeline, check
//! for a redirect and compose the document.

use std::sync::Arc;

use ssr_assets::{resolve_scripts, AssetManifest};
use ssr_core::{LifecyclePhase, OrchestratorConfig, RenderRequest, ResponseOutcome, TimingContext};
use ssr_html::{compose, serialize_state, Fragments, Template};
use ssr_locale::{IntlPayload, LocaleRegistry};
use ssr_render::{check_redirect, Component, PreloadPolicy, RenderPipeline};
use ssr_store::Store;
use tracing::{debug, error, info, info_span, Instrument};

use crate::ServerError;

/// Turns a `RenderRequest` into a `ResponseOutcome`.
///
/// The manifest and locale registry are loaded once and shared read-only
/// by every request; everything mutable is created per request.
pub struct Orchestrator {
    config: OrchestratorConfig,
    manifest: Arc<AssetManifest>,
    locales: Arc<LocaleRegistry>,
    pipeline: RenderPipeline,
}

impl Orchestrator {
    /// Create an orchestrator from loaded build output.
    pub fn new(
        config: OrchestratorConfig,
        manifest: Arc<AssetManifest>,
        locales: Arc<LocaleRegistry>,
        root: Arc<dyn Component>,
    ) -> Self {
        let pipeline = RenderPipeline::new(root, PreloadPolicy::from(&config.preload));
        Self {
            config,
            manifest,
            locales,
            pipeline,
        }
    }

    /// Load the manifest and locale bundles named by `config`.
    ///
    /// Falls back to the built-in bundles when no locales directory is set.
    pub fn from_config(
        config: OrchestratorConfig,
        root: Arc<dyn Component>,
    ) -> Result<Self, ServerError> {
        let manifest = AssetManifest::load(&config.manifest_path)?;
        let locales = match &config.locales_dir {
            Some(dir) => LocaleRegistry::load_dir(dir)?,
            None => LocaleRegistry::builtin(),
        };

        info!(
            manifest_entries = manifest.len(),
            locales = ?locales.keys(),
            "build output loaded"
        );

        Ok(Self::new(config, Arc::new(manifest), Arc::new(locales), root))
    }

    /// Orchestration settings.
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Shared asset manifest.
    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    /// Shared locale registry.
    pub fn locales(&self) -> &LocaleRegistry {
        &self.locales
    }

    /// Locale keys offered during negotiation.
    pub fn supported_locales(&self) -> Vec<String> {
        if self.config.supported_locales.is_empty() {
            self.locales.keys().into_iter().map(str::to_string).collect()
        } else {
            self.config.supported_locales.clone()
        }
    }

    /// Handle one request.
    pub async fn handle(&self, request: &RenderRequest) -> ResponseOutcome {
        let span = info_span!(
            "render",
            request_id = %request.request_id,
            url = %request.url,
            locale = %request.locale_key,
        );

        async {
            let mut timing = TimingContext::new();
            timing.phase(&LifecyclePhase::Start);

            let outcome = self.run(request, &mut timing).await;

            info!(
                outcome = outcome.label(),
                status = outcome.status(),
                total_ms = timing.elapsed().as_millis() as u64,
                render_ms = timing.render_time().map(|d| d.as_millis() as u64),
                "request finished"
            );
            outcome
        }
        .instrument(span)
        .await
    }

    async fn run(&self, request: &RenderRequest, timing: &mut TimingContext) -> ResponseOutcome {
        let template = match Template::load_async(&self.config.template_path).await {
            Ok(template) => template,
            Err(err) => {
                error!(error = %err, "failed to load template");
                timing.phase(&LifecyclePhase::Error(err.to_string()));
                return ResponseOutcome::TemplateMissing;
            }
        };
        timing.phase(&LifecyclePhase::TemplateLoaded);

        let bundle = match self.locales.resolve(&request.locale_key) {
            Ok(bundle) => bundle,
            Err(err) => {
                error!(error = %err, "failed to resolve locale");
                timing.phase(&LifecyclePhase::Error(err.to_string()));
                return ResponseOutcome::RenderFailed;
            }
        };

        let mut store = Store::create_seeded(&request.url, &request.cookies, &self.config.auth_cookie);
        timing.phase(&LifecyclePhase::StoreSeeded);

        let render = self.pipeline.render(&mut store, &bundle);
        let rendered = match self.config.render_deadline() {
            Some(deadline) => match tokio::time::timeout(deadline, render).await {
                Ok(rendered) => rendered,
                Err(_) => {
                    error!(deadline_ms = deadline.as_millis() as u64, "render deadline exceeded");
                    timing.phase(&LifecyclePhase::Error("deadline".to_string()));
                    return ResponseOutcome::RenderFailed;
                }
            },
            None => render.await,
        };
        let outcome = match rendered {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(error = %err, "render failed");
                timing.phase(&LifecyclePhase::Error(err.to_string()));
                return ResponseOutcome::RenderFailed;
            }
        };
        timing.phase(&LifecyclePhase::Rendered);

        if let Some(location) = check_redirect(&outcome) {
            timing.phase(&LifecyclePhase::Redirected);
            info!(location, "render redirected");
            return ResponseOutcome::Redirect(location.to_string());
        }
        let Some(page) = outcome.into_page() else {
            return ResponseOutcome::RenderFailed;
        };

        let intl = IntlPayload::new(&request.locale_key, &bundle);
        let (state_json, intl_json) = match (serialize_state(store.state()), serialize_state(&intl)) {
            (Ok(state), Ok(intl)) => (state, intl),
            (Err(err), _) | (_, Err(err)) => {
                error!(error = %err, "failed to serialize hydration state");
                timing.phase(&LifecyclePhase::Error(err.to_string()));
                return ResponseOutcome::RenderFailed;
            }
        };

        let scripts: Vec<String> = resolve_scripts(&self.manifest, &page.modules)
            .iter()
            .map(ToString::to_string)
            .collect();
        debug!(
            title = ?page.head.title(),
            modules = ?page.modules.iter().collect::<Vec<_>>(),
            scripts = scripts.len(),
            "page rendered"
        );

        let fragments = Fragments {
            html_attributes: page.head.html_attributes(),
            title: page.head.title_tag(),
            meta: page.head.meta_tags(),
            body: page.markup,
            state_json,
            intl_json,
            scripts,
        };
        let html = compose(&template, &fragments);
        timing.phase(&LifecyclePhase::Composed);

        ResponseOutcome::Success(html)
    }
}
