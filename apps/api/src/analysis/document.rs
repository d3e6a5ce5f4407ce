//! Document Loader: turns uploaded PDF bytes into pages of plain text.
//!
//! `lopdf` provides the page tree and the image check. Page text comes from
//! `pdf-extract`, which breaks lines on text-position moves inside a text
//! object. lopdf's own `extract_text` only breaks at `ET`, so it is used just
//! when pdf-extract cannot handle the file.
//!
//! Loading is CPU-bound: callers on the async runtime run it through
//! `tokio::task::spawn_blocking`.

use std::collections::BTreeMap;
use std::panic;

use lopdf::{Dictionary, Document as PdfDocument, Object, ObjectId};
use tracing::{debug, warn};

use crate::errors::AnalysisError;

/// Guards the `/Parent` walk against cyclic page trees.
const MAX_PAGE_TREE_DEPTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number.
    pub number: u32,
    pub text: String,
    /// True when the page's resources include a raster image XObject.
    pub has_images: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pages: Vec<Page>,
}

impl Document {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All page texts joined in page order.
    pub fn text(&self) -> String {
        self.pages.iter().map(|p| p.text.as_str()).collect()
    }
}

/// Parses `bytes` as a PDF. Returns the document and its plain text.
pub fn load_document(bytes: &[u8]) -> Result<(Document, String), AnalysisError> {
    if bytes.is_empty() {
        return Err(AnalysisError::UnreadableDocument("empty upload".to_string()));
    }

    let pdf = PdfDocument::load_mem(bytes)
        .map_err(|e| AnalysisError::UnreadableDocument(e.to_string()))?;
    if pdf.is_encrypted() {
        return Err(AnalysisError::UnreadableDocument(
            "document is encrypted".to_string(),
        ));
    }

    let page_ids = pdf.get_pages();
    if page_ids.is_empty() {
        return Err(AnalysisError::UnreadableDocument(
            "document has no pages".to_string(),
        ));
    }

    let page_texts = page_texts(&pdf, bytes, &page_ids);
    let pages: Vec<Page> = page_ids
        .iter()
        .zip(page_texts)
        .map(|((&number, &page_id), text)| Page {
            number,
            text,
            has_images: page_has_images(&pdf, page_id),
        })
        .collect();

    let document = Document::new(pages);
    let text = document.text();
    debug!(
        "Loaded document: {} pages, {} chars",
        document.page_count(),
        text.len()
    );
    Ok((document, text))
}

/// One text per entry of `page_ids`, in page order.
fn page_texts(pdf: &PdfDocument, bytes: &[u8], page_ids: &BTreeMap<u32, ObjectId>) -> Vec<String> {
    // pdf-extract panics on some malformed font programs.
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes)) {
        Ok(Ok(texts)) if texts.len() == page_ids.len() => return texts,
        Ok(Ok(texts)) => warn!(
            "pdf-extract returned {} pages for a {}-page document; using lopdf text",
            texts.len(),
            page_ids.len()
        ),
        Ok(Err(e)) => warn!("pdf-extract failed, using lopdf text: {e}"),
        Err(_) => warn!("pdf-extract panicked, using lopdf text"),
    }

    page_ids
        .keys()
        .map(|&number| {
            pdf.extract_text(&[number]).unwrap_or_else(|e| {
                warn!("Failed to extract text from page {number}: {e}");
                String::new()
            })
        })
        .collect()
}

/// Looks for an image XObject in the page's resources, following inherited
/// `/Resources` up the page tree.
fn page_has_images(pdf: &PdfDocument, page_id: ObjectId) -> bool {
    let mut node_id = page_id;
    for _ in 0..MAX_PAGE_TREE_DEPTH {
        let Ok(node) = pdf.get_dictionary(node_id) else {
            return false;
        };
        if let Ok(resources) = node.get(b"Resources") {
            return resolve_dictionary(pdf, resources)
                .map(|res| resources_have_images(pdf, res))
                .unwrap_or(false);
        }
        match node.get(b"Parent").and_then(|p| p.as_reference()) {
            Ok(parent) => node_id = parent,
            Err(_) => return false,
        }
    }
    false
}

fn resources_have_images(pdf: &PdfDocument, resources: &Dictionary) -> bool {
    let Some(xobjects) = resources
        .get(b"XObject")
        .ok()
        .and_then(|o| resolve_dictionary(pdf, o))
    else {
        return false;
    };

    xobjects.iter().any(|(_, obj)| {
        let stream = match obj {
            Object::Reference(r) => pdf.get_object(*r).ok(),
            other => Some(other),
        };
        match stream {
            Some(Object::Stream(s)) => s
                .dict
                .get(b"Subtype")
                .and_then(|t| t.as_name())
                .map(|name| name == b"Image")
                .unwrap_or(false),
            _ => false,
        }
    })
}

fn resolve_dictionary<'a>(pdf: &'a PdfDocument, obj: &'a Object) -> Option<&'a Dictionary> {
    match obj {
        Object::Reference(r) => pdf.get_dictionary(*r).ok(),
        Object::Dictionary(d) => Some(d),
        _ => None,
    }
}
