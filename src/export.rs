use crate::error::ExportError;
use crate::surface::RasterSink;

/// Content type of every exported file
pub const PNG_MIME: &str = "image/png";

/// A point-in-time PNG snapshot of the surface, ready to hand to the user
#[derive(Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    stem: String,
    timestamp_ms: u64,
    bytes: Vec<u8>,
}

impl std::fmt::Debug for ExportArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportArtifact")
            .field("stem", &self.stem)
            .field("bytes", &format!("<{} bytes>", self.bytes.len()))
            .finish()
    }
}

impl ExportArtifact {
    /// `<prefix><timestamp>`
    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn file_name(&self) -> String {
        format!("{}.png", self.stem)
    }

    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }

    pub fn mime(&self) -> &'static str {
        PNG_MIME
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Names exports and guarantees no two in a session share a timestamp
#[derive(Debug, Clone)]
pub struct Exporter {
    prefix: String,
    last_stamp: Option<u64>,
}

impl Exporter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            last_stamp: None,
        }
    }

    /// Claim a stamp for an export happening at `now_ms`.
    /// A clock that has not moved past the previous export is bumped by one.
    pub fn next_stamp(&mut self, now_ms: u64) -> u64 {
        let stamp = match self.last_stamp {
            Some(last) if now_ms <= last => last + 1,
            _ => now_ms,
        };
        self.last_stamp = Some(stamp);
        stamp
    }

    /// Encode `sink` and name the result after `now_ms`
    pub fn export<S: RasterSink + ?Sized>(
        &mut self,
        sink: &S,
        now_ms: u64,
    ) -> Result<ExportArtifact, ExportError> {
        let bytes = sink.encode_png()?;
        let timestamp_ms = self.next_stamp(now_ms);
        Ok(ExportArtifact {
            stem: format!("{}{}", self.prefix, timestamp_ms),
            timestamp_ms,
            bytes,
        })
    }
}
