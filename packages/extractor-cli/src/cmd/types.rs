//! Supported document types

use anyhow::Result;
use colored::Colorize;
use tracing::warn;

use extractor_client::{DocumentType, DocumentTypeInfo, ExtractorClient};

use crate::render;

/// The service's catalogue, or the built-in one when it cannot be fetched.
pub async fn catalogue(client: &ExtractorClient) -> (Vec<DocumentTypeInfo>, bool) {
    match client.document_types().await {
        Ok(types) => (types, true),
        Err(e) => {
            warn!(error = %e, "Falling back to built-in document types");
            (builtin(), false)
        }
    }
}

pub fn builtin() -> Vec<DocumentTypeInfo> {
    DocumentType::ALL.into_iter().map(Into::into).collect()
}

pub async fn run(client: &ExtractorClient) -> Result<()> {
    if let Ok(info) = client.service_info().await {
        println!("{} {}", info.message.bold(), info.version.dimmed());
        println!();
    }

    let (types, from_service) = catalogue(client).await;
    print!("{}", render::document_types(&types));
    if !from_service {
        println!();
        println!(
            "{}",
            "Service unreachable; showing the built-in list.".yellow()
        );
    }
    Ok(())
}
