use std::{path::PathBuf, sync::Arc};

pub mod decode;

pub use decode::decode_image;

/// An opaque byte source for one named template asset.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum AssetRef {
    /// No asset configured; always resolves to absent.
    None,
    /// Bytes read from the filesystem at render time.
    Path(PathBuf),
    /// Bytes embedded in the configuration.
    Bytes(Vec<u8>),
}

/// A successfully decoded bitmap with premultiplied RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct DecodedAsset {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl DecodedAsset {
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }
}

/// The three template assets as one render invocation sees them.
///
/// `None` is the "absent" sentinel: the compositor skips the stage (or,
/// for the signature, substitutes a generated stroke).
#[derive(Clone, Debug, Default)]
pub struct LoadedAssets {
    pub logo: Option<DecodedAsset>,
    pub stamp: Option<DecodedAsset>,
    pub signature: Option<DecodedAsset>,
}

/// Load and decode the three template assets concurrently, resolving once
/// all have settled.
///
/// A failed read or decode resolves that asset to `None`; this function
/// never fails the render.
pub async fn load_assets(
    logo: &AssetRef,
    stamp: &AssetRef,
    signature: &AssetRef,
) -> LoadedAssets {
    let (logo, stamp, signature) = futures::join!(
        load_asset("logo", logo),
        load_asset("stamp", stamp),
        load_asset("signature", signature),
    );
    LoadedAssets {
        logo,
        stamp,
        signature,
    }
}

async fn load_asset(name: &str, asset: &AssetRef) -> Option<DecodedAsset> {
    let decoded = match asset {
        AssetRef::None => return None,
        AssetRef::Bytes(bytes) => decode_image(bytes),
        AssetRef::Path(path) => match tokio::fs::read(path).await {
            Ok(bytes) => decode_image(&bytes),
            Err(err) => {
                tracing::warn!(asset = name, path = %path.display(), %err, "asset read failed; treating as absent");
                return None;
            }
        },
    };

    match decoded {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            tracing::warn!(asset = name, %err, "asset decode failed; treating as absent");
            None
        }
    }
}
