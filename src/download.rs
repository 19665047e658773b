use crate::error::ExportError;
use crate::export::ExportArtifact;

/// Where exported files go on native targets
#[derive(Debug, Clone, Default)]
pub struct Downloader {
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    dir: Option<std::path::PathBuf>,
}

impl Downloader {
    pub fn new(dir: Option<std::path::PathBuf>) -> Self {
        Self { dir }
    }

    /// Write the artifact into the export directory and return its path
    #[cfg(not(target_arch = "wasm32"))]
    pub fn deliver(&self, artifact: &ExportArtifact) -> Result<std::path::PathBuf, ExportError> {
        let dir = self.dir.clone().unwrap_or_else(|| std::path::PathBuf::from("."));
        std::fs::create_dir_all(&dir)?;

        let path = dir.join(artifact.file_name());
        std::fs::write(&path, artifact.bytes())?;
        log::info!("Saved {}", path.display());
        Ok(path)
    }

    /// Hand the artifact to the browser as a file download
    #[cfg(target_arch = "wasm32")]
    pub fn deliver(&self, artifact: &ExportArtifact) -> Result<(), ExportError> {
        web::download(artifact).map_err(|err| ExportError::Download(format!("{err:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast as _, JsValue};

    use crate::export::ExportArtifact;

    pub fn download(artifact: &ExportArtifact) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;

        let data = js_sys::Uint8Array::from(artifact.bytes());
        let blob_parts = js_sys::Array::new();
        blob_parts.push(&data);

        let options = web_sys::BlobPropertyBag::new();
        options.set_type(artifact.mime());
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&blob_parts, &options)?;

        let url = web_sys::Url::create_object_url_with_blob(&blob)?;
        let anchor = document
            .create_element("a")?
            .dyn_into::<web_sys::HtmlAnchorElement>()?;
        anchor.set_href(&url);
        anchor.set_download(&artifact.file_name());
        anchor.click();

        // Revoke on the next tick, after the browser has picked up the download
        let revoke = Closure::once_into_js(move || {
            if let Err(err) = web_sys::Url::revoke_object_url(&url) {
                log::warn!("Failed to revoke object url: {:?}", err);
            }
        });
        window.set_timeout_with_callback_and_timeout_and_arguments_0(
            revoke.unchecked_ref::<js_sys::Function>(),
            0,
        )?;
        log::info!("Downloaded {}", artifact.file_name());
        Ok(())
    }
}
