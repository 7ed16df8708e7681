//! Data-preload declarations.

use std::future::Future;

use async_trait::async_trait;
use ssr_store::{Action, AuthState, Location};

use crate::RouteParams;

/// What a preload can see of the request.
#[derive(Debug, Clone)]
pub struct PreloadContext {
    /// Location being rendered.
    pub location: Location,
    /// Auth slice at the time the preload runs.
    pub auth: AuthState,
    /// Parameters of the route that registered the preload.
    pub params: RouteParams,
}

/// A data dependency declared by a component.
///
/// Preloads are identified by `key`; registering the same key twice in one
/// render runs it once. The returned actions are dispatched into the store
/// before the final render.
#[async_trait]
pub trait Preload: Send + Sync {
    /// Identity of this preload within a render.
    fn key(&self) -> String;

    /// Fetch the data.
    async fn load(&self, ctx: &PreloadContext) -> anyhow::Result<Vec<Action>>;
}

/// A preload backed by an async closure.
pub struct FnPreload<F> {
    key: String,
    f: F,
}

/// Build a preload from a key and an async closure.
///
/// ```rust,ignore
/// let posts = preload_fn("posts", |ctx| async move {
///     let posts = api::posts(ctx.params.get("user")).await?;
///     Ok(vec![Action::data_loaded("posts", posts)])
/// });
/// ```
pub fn preload_fn<F, Fut>(key: impl Into<String>, f: F) -> FnPreload<F>
where
    F: Fn(PreloadContext) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Vec<Action>>> + Send + 'static,
{
    FnPreload { key: key.into(), f }
}

#[async_trait]
impl<F, Fut> Preload for FnPreload<F>
where
    F: Fn(PreloadContext) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Vec<Action>>> + Send + 'static,
{
    fn key(&self) -> String {
        self.key.clone()
    }

    async fn load(&self, ctx: &PreloadContext) -> anyhow::Result<Vec<Action>> {
        (self.f)(ctx.clone()).await
    }
}
