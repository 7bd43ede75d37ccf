//! File attachments uploaded to tickets.

use std::path::Path;

use crate::error::FreshdeskError;

/// A file to upload as a ticket attachment.
///
/// The content is held in memory and sent as one `attachments[]` part of a
/// multipart request.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// File name reported to the API.
    pub file_name: String,

    /// MIME type, e.g. `application/pdf`. When `None` the part is sent
    /// without an explicit content type.
    pub content_type: Option<String>,

    /// File content.
    pub data: Vec<u8>,
}

impl Attachment {
    /// Creates an attachment from in-memory bytes.
    pub fn new(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            data: data.into(),
        }
    }

    /// Sets the MIME type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Reads a file from disk; the file name is taken from the path.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Io` if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, FreshdeskError> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());

        Ok(Self::new(file_name, data))
    }

    /// Builds the multipart form for this attachment.
    ///
    /// An unparseable MIME type is reported as `FreshdeskError::Config`.
    pub(crate) fn to_form(&self) -> Result<reqwest::multipart::Form, FreshdeskError> {
        let mut part =
            reqwest::multipart::Part::bytes(self.data.clone()).file_name(self.file_name.clone());
        if let Some(content_type) = &self.content_type {
            part = part.mime_str(content_type).map_err(|_| {
                FreshdeskError::invalid_config(format!(
                    "invalid content type {:?} for attachment {}",
                    content_type, self.file_name
                ))
            })?;
        }
        Ok(reqwest::multipart::Form::new().part("attachments[]", part))
    }
}

/// Result of uploading one attachment to a freshly created ticket.
#[derive(Debug)]
pub struct AttachmentOutcome {
    /// File name of the attachment.
    pub file_name: String,

    /// `None` when the upload succeeded.
    pub error: Option<FreshdeskError>,
}

impl AttachmentOutcome {
    /// Returns true if the upload succeeded.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
