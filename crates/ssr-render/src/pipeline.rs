//! Preload phase and final render.
//!
//! A render runs in passes. Each collect pass renders the tree, gathers the
//! preloads it registered and settles them concurrently; their actions are
//! dispatched into the store and the tree is rendered again. The first pass
//! that registers nothing new is the final render. Once `max_passes`
//! collect passes have run, one last pass renders in final mode with
//! whatever data is present.

use std::any::Any;
use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use futures::FutureExt;
use ssr_core::PreloadConfig;
use ssr_locale::LocaleBundle;
use ssr_store::{Action, Store};
use thiserror::Error;
use tracing::{debug, warn};

use crate::scope::{PassOutput, PendingPreload};
use crate::{Component, Preload, PreloadContext, RenderError, RenderMode, RenderOutcome, RenderScope, RenderedPage};

/// How preloads are run and how their failures are treated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadPolicy {
    /// Render anyway when a preload fails or times out.
    pub continue_on_error: bool,
    /// Per-preload limit. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Collect passes before the render is forced final. `0` disables preloading.
    pub max_passes: usize,
}

impl Default for PreloadPolicy {
    fn default() -> Self {
        Self {
            continue_on_error: true,
            timeout: Some(Duration::from_secs(5)),
            max_passes: 4,
        }
    }
}

impl From<&PreloadConfig> for PreloadPolicy {
    fn from(config: &PreloadConfig) -> Self {
        Self {
            continue_on_error: config.continue_on_error,
            timeout: config.timeout(),
            max_passes: config.max_passes,
        }
    }
}

#[derive(Error, Debug)]
enum PreloadFailure {
    #[error("timed out after {0:?}")]
    TimedOut(Duration),
    #[error("{0:#}")]
    Failed(anyhow::Error),
    #[error("panicked: {0}")]
    Panicked(String),
}

/// Renders a component tree against a request store.
pub struct RenderPipeline {
    root: Arc<dyn Component>,
    policy: PreloadPolicy,
}

impl RenderPipeline {
    /// Create a pipeline for a root component.
    pub fn new(root: Arc<dyn Component>, policy: PreloadPolicy) -> Self {
        Self { root, policy }
    }

    /// Preload policy in effect.
    pub fn policy(&self) -> &PreloadPolicy {
        &self.policy
    }

    /// Run the preload phase and the final render.
    ///
    /// A navigation is only honored from a pass with nothing left to
    /// preload, so components that redirect based on loaded data see that
    /// data first.
    pub async fn render(
        &self,
        store: &mut Store,
        bundle: &LocaleBundle,
    ) -> Result<RenderOutcome, RenderError> {
        let mut settled = HashSet::new();
        let mut passes = 0;

        loop {
            let mode = if passes < self.policy.max_passes {
                RenderMode::Collect
            } else {
                RenderMode::Final
            };
            let output = self.render_pass(store, bundle, &settled, mode)?;
            passes += 1;

            if output.pending.is_empty() {
                debug!(passes, modules = output.modules.len(), "render complete");
                return Ok(match output.navigation {
                    Some(location) => RenderOutcome::Redirect { location },
                    None => RenderOutcome::Rendered(RenderedPage {
                        markup: output.markup,
                        modules: output.modules,
                        head: output.head,
                    }),
                });
            }

            debug!(pass = passes, pending = output.pending.len(), "settling preloads");
            self.settle(store, &mut settled, output.pending).await?;
        }
    }

    fn render_pass(
        &self,
        store: &Store,
        bundle: &LocaleBundle,
        settled: &HashSet<String>,
        mode: RenderMode,
    ) -> Result<PassOutput, RenderError> {
        let result = catch_unwind(AssertUnwindSafe(|| {
            let mut scope = RenderScope::new(store.state(), bundle, settled, mode);
            self.root.render(&mut scope)?;
            Ok(scope.finish())
        }));

        match result {
            Ok(output) => output,
            Err(payload) => Err(RenderError::Panicked(panic_message(payload.as_ref()))),
        }
    }

    /// Run pending preloads concurrently and dispatch their actions in
    /// registration order. Every key is settled, whether it loaded or not.
    async fn settle(
        &self,
        store: &mut Store,
        settled: &mut HashSet<String>,
        pending: Vec<PendingPreload>,
    ) -> Result<(), RenderError> {
        let state = store.state();
        let results = join_all(pending.iter().map(|p| {
            let ctx = PreloadContext {
                location: state.router.location.clone(),
                auth: state.auth.clone(),
                params: p.params.clone(),
            };
            async move { self.load(p.preload.as_ref(), &ctx).await }
        }))
        .await;

        for (p, result) in pending.into_iter().zip(results) {
            settled.insert(p.key.clone());
            match result {
                Ok(actions) => {
                    debug!(key = %p.key, actions = actions.len(), "preload settled");
                    for action in actions {
                        store.dispatch(action);
                    }
                }
                Err(failure) if self.policy.continue_on_error => {
                    warn!(key = %p.key, error = %failure, "preload failed, rendering without it");
                }
                Err(failure) => {
                    return Err(RenderError::Preload {
                        key: p.key,
                        message: failure.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    async fn load(
        &self,
        preload: &dyn Preload,
        ctx: &PreloadContext,
    ) -> Result<Vec<Action>, PreloadFailure> {
        let fut = AssertUnwindSafe(preload.load(ctx)).catch_unwind();

        let result = match self.policy.timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| PreloadFailure::TimedOut(limit))?,
            None => fut.await,
        };

        match result {
            Ok(loaded) => loaded.map_err(PreloadFailure::Failed),
            Err(payload) => Err(PreloadFailure::Panicked(panic_message(payload.as_ref()))),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
