//! Writing the catalog as a gettext template (`.pot`).

use std::{fs, path::Path};

use anyhow::{Context, Result};
use polib::catalog::Catalog;
use polib::message::Message;
use polib::metadata::CatalogMetadata;

use crate::config::HeaderConfig;
use crate::core::catalog::{self, CatalogBuilder};

fn create_metadata(headers: &HeaderConfig) -> CatalogMetadata {
    let mut metadata = CatalogMetadata::new();
    metadata.project_id_version = headers.project_id_version.clone();
    metadata.language = headers.language.clone();
    metadata.mime_version = String::from("1.0");
    metadata.content_type = String::from("text/plain; charset=UTF-8");
    metadata.content_transfer_encoding = String::from("8bit");
    metadata
}

fn to_po_message(message: &catalog::Message) -> Message {
    let mut builder = match &message.text_plural {
        Some(plural) => {
            let mut builder = Message::build_plural();
            builder
                .with_msgid(message.text.clone())
                .with_msgid_plural(plural.clone())
                .with_msgstr_plural(vec![String::new(), String::new()]);
            builder
        }
        None => {
            let mut builder = Message::build_singular();
            builder.with_msgid(message.text.clone());
            builder
        }
    };

    if !message.context.is_empty() {
        builder.with_msgctxt(message.context.clone());
    }
    if !message.references.is_empty() {
        builder.with_source(message.references.join("\n"));
    }
    if !message.comments.is_empty() {
        builder.with_comments(message.comments.join("\n"));
    }
    builder.done()
}

/// Build a template catalog in the builder's sorted order.
pub fn create_catalog(builder: &CatalogBuilder, headers: &HeaderConfig) -> Catalog {
    let mut catalog = Catalog::new(create_metadata(headers));
    for message in builder.messages() {
        catalog.append_or_update(to_po_message(message));
    }
    catalog
}

pub fn write_catalog(catalog: &Catalog, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Could not create {}", parent.display()))?;
    }
    polib::po_file::write(catalog, output_path)
        .with_context(|| format!("Writing messages to {}", output_path.display()))
}
