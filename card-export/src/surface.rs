//! The on-screen card surface.
//!
//! Holds the live [`Scene`] and a frame signal. Every mutation bumps the
//! scene revision; the presenter calls [`RenderSurface::present`] once the
//! frame for that revision is on screen. Exporters wait on
//! [`RenderSurface::rendered`] instead of sleeping for a guessed delay.

use std::sync::{PoisonError, RwLock};

use card_core::Scene;
use tokio::sync::watch;

/// Live scene plus a "frame presented" signal.
#[derive(Debug)]
pub struct RenderSurface {
    scene: RwLock<Scene>,
    presented: watch::Sender<u64>,
}

impl RenderSurface {
    /// Wrap a scene. Its current revision counts as already presented.
    #[must_use]
    pub fn new(scene: Scene) -> Self {
        let (presented, _) = watch::channel(scene.revision());
        Self {
            scene: RwLock::new(scene),
            presented,
        }
    }

    /// Mutate the scene. The change is not visible to exporters until the
    /// next [`present`](Self::present).
    pub fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Scene) -> R,
    {
        let mut scene = self.scene.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut scene)
    }

    /// Current scene revision.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.scene
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .revision()
    }

    /// Last revision the presenter reported as on screen.
    #[must_use]
    pub fn presented_revision(&self) -> u64 {
        *self.presented.borrow()
    }

    /// Mark the current revision as presented and wake any waiting exports.
    pub fn present(&self) {
        let revision = self.revision();
        tracing::trace!(revision, "frame presented");
        self.presented.send_replace(revision);
    }

    /// Clone of the scene as it is right now, presented or not.
    #[must_use]
    pub fn snapshot(&self) -> Scene {
        self.scene
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Wait until the latest scene revision has been presented, then return
    /// a snapshot of exactly that revision.
    ///
    /// Returns immediately when nothing is pending.
    pub async fn rendered(&self) -> Scene {
        let mut rx = self.presented.subscribe();
        loop {
            let target = self.revision();
            // The sender lives in `self`, so the channel cannot close while we wait.
            let _ = rx.wait_for(|presented| *presented >= target).await;

            let scene = self.snapshot();
            if scene.revision() == target {
                return scene;
            }
            tracing::trace!(
                target,
                current = scene.revision(),
                "scene changed while waiting for frame"
            );
        }
    }
}

impl Default for RenderSurface {
    fn default() -> Self {
        Self::new(Scene::default())
    }
}
