use thiserror::Error;

/// Errors raised while (re)allocating the raster surface
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("cannot allocate a {width}x{height} surface")]
    InvalidSize { width: u32, height: u32 },
}

/// Errors raised while encoding or delivering an exported image
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[error("pixel buffer does not match surface dimensions")]
    BufferSize,

    #[error("browser download failed: {0}")]
    Download(String),
}

/// Anything the controller can fail at while reacting to an event
#[derive(Debug, Error)]
pub enum DrawError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

pub type DrawResult<T> = Result<T, DrawError>;
