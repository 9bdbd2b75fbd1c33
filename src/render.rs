use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    assets::load_assets,
    compose::Compositor,
    config::{CANVAS_HEIGHT, CANVAS_WIDTH, Geometry, TemplateConfig},
    error::{LaureaError, LaureaResult},
    recipient::RecipientProfile,
    surface::CpuSurface,
};

/// The finished certificate: an immutable premultiplied RGBA8 pixel
/// buffer at the fixed canvas size. May be encoded any number of times
/// without re-rendering.
#[derive(Clone, Debug)]
pub struct Artifact {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Vec<u8>,
}

/// Drives one certificate render per call: await the asset batch, then a
/// single sequential compositor pass over a fresh surface.
///
/// The generation counter resolves re-trigger races: a render that
/// discovers a newer generation after its assets settle bails with
/// [`LaureaError::Superseded`] instead of completing stale work.
#[derive(Debug, Default)]
pub struct Renderer {
    generation: AtomicU64,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    #[tracing::instrument(skip_all, fields(course = %cfg.course))]
    pub async fn render(
        &self,
        cfg: &TemplateConfig,
        recipient: &RecipientProfile,
    ) -> LaureaResult<Artifact> {
        cfg.validate()?;
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.render_generation(cfg, recipient, token).await
    }

    async fn render_generation(
        &self,
        cfg: &TemplateConfig,
        recipient: &RecipientProfile,
        token: u64,
    ) -> LaureaResult<Artifact> {
        let name = recipient.display_name();
        tracing::debug!(recipient = %name, token, "starting certificate render");

        let assets = load_assets(&cfg.logo, &cfg.stamp, &cfg.signature).await;
        if self.generation.load(Ordering::SeqCst) != token {
            tracing::debug!(token, "render superseded during asset load");
            return Err(LaureaError::Superseded);
        }

        render_with_assets(cfg, &name, &assets)
    }
}

/// One-shot render: load assets and composite once, with no generation
/// tracking. Convenience over [`Renderer::render`].
pub async fn render_certificate(
    cfg: &TemplateConfig,
    recipient: &RecipientProfile,
) -> LaureaResult<Artifact> {
    Renderer::new().render(cfg, recipient).await
}

/// Synchronous compositor pass over already-settled assets.
///
/// All drawing happens sequentially on the calling thread; the surface is
/// owned exclusively by this invocation for its entire lifetime.
pub fn render_with_assets(
    cfg: &TemplateConfig,
    recipient_name: &str,
    assets: &crate::assets::LoadedAssets,
) -> LaureaResult<Artifact> {
    let geo = Geometry::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    let mut surface = CpuSurface::new(CANVAS_WIDTH, CANVAS_HEIGHT)?;
    Compositor::new(&mut surface, cfg, &geo, assets, recipient_name).run()?;
    Ok(surface.into_artifact())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn render_rejects_invalid_config() {
        let mut cfg = TemplateConfig::builtin();
        cfg.course = String::new();
        let err = render_certificate(&cfg, &RecipientProfile::named("A"))
            .await
            .unwrap_err();
        assert!(matches!(err, LaureaError::Validation(_)));
    }

    #[tokio::test]
    async fn stale_generation_is_reported_as_superseded() {
        let cfg = TemplateConfig::builtin();
        let renderer = Renderer::new();

        // First render takes token 1, then a second render starts before
        // the first one's asset batch settles.
        let stale_token = renderer.generation.fetch_add(1, Ordering::SeqCst) + 1;
        renderer.generation.fetch_add(1, Ordering::SeqCst);

        let err = renderer
            .render_generation(&cfg, &RecipientProfile::named("First"), stale_token)
            .await
            .unwrap_err();
        assert!(matches!(err, LaureaError::Superseded));
    }
}
