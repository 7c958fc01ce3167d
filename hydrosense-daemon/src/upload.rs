//! Upload handling and temporary file lifecycle.
//!
//! An uploaded network file is written to a named temporary file, read back
//! into sections and handed to the pipeline. The file is removed when the
//! [`UploadedFile`] guard drops, which covers success, errors and panics.

use axum::body::Bytes;
use axum::extract::Multipart;
use hydrosense_core::Sections;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::ApiError;

/// Multipart field carrying the network file.
pub const FILE_FIELD: &str = "file";

/// A network file received from a client.
#[derive(Debug)]
pub struct Upload {
    pub filename: String,
    pub bytes: Bytes,
}

/// Pull the `file` part out of a multipart body.
///
/// Parts with other names, or a `file` part sent as a plain form value
/// (no filename), are ignored.
pub async fn receive_upload(multipart: &mut Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        if filename.is_empty() {
            return Err(ApiError::EmptyFilename);
        }

        let bytes = field.bytes().await?;
        debug!("Received {} ({} bytes)", filename, bytes.len());
        return Ok(Upload { filename, bytes });
    }

    Err(ApiError::MissingFile)
}

/// Temporary on-disk copy of an upload. Deleted on drop.
#[derive(Debug)]
pub struct UploadedFile {
    file: NamedTempFile,
}

impl UploadedFile {
    /// Write `bytes` to a new temporary file in `dir` (system temp dir if `None`).
    pub fn create(dir: Option<&Path>, bytes: &[u8]) -> std::io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("hydrosense-").suffix(".inp");

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(bytes)?;
        file.flush()?;

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Read the stored file back and split it into sections.
    pub fn read_sections(&self) -> std::io::Result<Sections> {
        let bytes = std::fs::read(self.path())?;
        Ok(Sections::from_bytes(&bytes))
    }
}

/// Store `bytes` temporarily, parse them and run `work` on the sections.
///
/// The temporary file is gone by the time this returns, whatever `work` does.
pub fn process_upload<T>(
    dir: Option<PathBuf>,
    bytes: &[u8],
    work: impl FnOnce(&Sections) -> Result<T, ApiError>,
) -> Result<T, ApiError> {
    let upload = UploadedFile::create(dir.as_deref(), bytes)?;
    debug!("Stored upload at {:?}", upload.path());

    let sections = upload.read_sections()?;
    work(&sections)
}
