use serde::Deserialize;

use crate::error::ContentError;

/// Manifest format version this build understands.
pub const MANIFEST_VERSION: u32 = 1;

fn default_menu() -> String {
    "menu.json".to_string()
}

/// `manifest.json` at the root of a content directory.
#[derive(Deserialize, Clone, Debug)]
pub struct InputManifest {
    pub version: u32,
    /// Document files, relative to the manifest, in corpus order.
    pub documents: Vec<String>,
    /// Menu file, relative to the manifest.
    #[serde(default = "default_menu")]
    pub menu: String,
}

impl InputManifest {
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.version != MANIFEST_VERSION {
            return Err(ContentError::Manifest(format!(
                "unsupported version {} (expected {})",
                self.version, MANIFEST_VERSION
            )));
        }
        if let Some(name) = self.documents.iter().find(|name| name.trim().is_empty()) {
            return Err(ContentError::Manifest(format!(
                "empty document file name {:?}",
                name
            )));
        }
        Ok(())
    }
}
