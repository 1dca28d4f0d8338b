//! Request construction for the extraction endpoints.
//!
//! Building a request is pure: it only decides the endpoint and lays out the
//! multipart fields. The client turns the result into a reqwest form when
//! sending.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::error::{ClientError, Result};
use crate::types::ExtractionOptions;

/// Multipart field carrying each file.
pub const FILES_FIELD: &str = "files";
pub const DOCUMENT_TYPE_FIELD: &str = "document_type";
pub const USE_NAME_FIELD: &str = "use_name_for_rename";
pub const USE_PASSPORT_FIELD: &str = "use_passport_for_rename";

const PDF_MIME: &str = "application/pdf";

/// A selected file, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlob {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl FileBlob {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, naming it after its final path component.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }
}

/// Which extraction endpoint a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Extract,
    ExtractWithRename,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Extract => "/extract",
            Endpoint::ExtractWithRename => "/extract-with-rename",
        }
    }
}

/// One multipart field, in send order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    File { field: &'static str, blob: FileBlob },
    Text { field: &'static str, value: String },
}

impl FormPart {
    pub fn field(&self) -> &'static str {
        match self {
            FormPart::File { field, .. } | FormPart::Text { field, .. } => *field,
        }
    }
}

/// Transport-ready extraction request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub endpoint: Endpoint,
    pub parts: Vec<FormPart>,
}

impl ExtractionRequest {
    /// Lay out `files` and `options` for the matching endpoint.
    ///
    /// Files keep their submission order. Rename flags are only included
    /// when renaming is enabled.
    pub fn build(files: Vec<FileBlob>, options: ExtractionOptions) -> Result<Self> {
        if files.is_empty() {
            return Err(ClientError::InvalidRequest("no files selected".into()));
        }

        let endpoint = if options.rename_enabled {
            Endpoint::ExtractWithRename
        } else {
            Endpoint::Extract
        };

        let mut parts: Vec<FormPart> = files
            .into_iter()
            .map(|blob| FormPart::File {
                field: FILES_FIELD,
                blob,
            })
            .collect();

        parts.push(FormPart::Text {
            field: DOCUMENT_TYPE_FIELD,
            value: options.document_type.as_str().to_string(),
        });

        if options.rename_enabled {
            parts.push(FormPart::Text {
                field: USE_NAME_FIELD,
                value: options.use_name_for_rename.to_string(),
            });
            parts.push(FormPart::Text {
                field: USE_PASSPORT_FIELD,
                value: options.use_passport_for_rename.to_string(),
            });
        }

        Ok(Self { endpoint, parts })
    }

    /// Names of the files in submission order.
    pub fn filenames(&self) -> Vec<String> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                FormPart::File { blob, .. } => Some(blob.name.clone()),
                FormPart::Text { .. } => None,
            })
            .collect()
    }

    pub fn rename_enabled(&self) -> bool {
        self.endpoint == Endpoint::ExtractWithRename
    }

    /// Value of a text field, if present.
    pub fn text_field(&self, field: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match p {
            FormPart::Text { field: f, value } if *f == field => Some(value.as_str()),
            _ => None,
        })
    }

    pub(crate) fn into_form(self) -> Result<Form> {
        let mut form = Form::new();
        for part in self.parts {
            form = match part {
                FormPart::File { field, blob } => {
                    let part = Part::bytes(blob.bytes)
                        .file_name(blob.name)
                        .mime_str(PDF_MIME)
                        .map_err(ClientError::from_transport)?;
                    form.part(field, part)
                }
                FormPart::Text { field, value } => form.text(field, value),
            };
        }
        Ok(form)
    }
}
