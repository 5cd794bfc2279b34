//! Writes a [`Document`] as a PDF 1.5 file.
//!
//! Object graph: Catalog → Pages → one Page per laid-out page. All pages share a single
//! resources dictionary exposing Helvetica as `/F1`. Each line becomes its own
//! `BT … ET` block with an absolute `Td`. No timestamps are written, so the same
//! document always serializes to the same bytes.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, Stream};

use crate::layout::{Document, Page, PageGeometry};
use crate::pdf::encoding::encode_win_ansi;
use crate::pdf::PdfError;

const FONT_NAME: &str = "F1";
const PDF_TITLE: &str = "Contrato de Prestação de Serviços";
const PRODUCER: &str = concat!("contrato-api ", env!("CARGO_PKG_VERSION"));

/// Serializes the laid-out document to PDF bytes.
pub fn write_pdf(document: &Document) -> Result<Vec<u8>, PdfError> {
    let geometry = &document.geometry;
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { FONT_NAME => font_id },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(document.pages.len());
    for page in &document.pages {
        let content = page_content(page, geometry)?;
        let encoded = content
            .encode()
            .map_err(|e| PdfError::Encode(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(lopdf::Dictionary::new(), encoded));
        let media_box: Vec<Object> = vec![
            0.into(),
            0.into(),
            Object::Real(geometry.width),
            Object::Real(geometry.height),
        ];

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let title = encode_win_ansi(PDF_TITLE).unwrap_or_default();
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(title),
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| PdfError::Save(e.to_string()))?;
    Ok(output)
}

/// Builds the content stream for one page: black Helvetica text, one block per line.
fn page_content(page: &Page, geometry: &PageGeometry) -> Result<Content, PdfError> {
    let mut operations = Vec::with_capacity(page.lines.len() * 6);

    for (n, line) in page.lines.iter().enumerate() {
        let bytes = encode_win_ansi(&line.text).map_err(|ch| PdfError::Unencodable {
            ch,
            page: page.index + 1,
            line: n + 1,
        })?;

        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![FONT_NAME.into(), Object::Real(geometry.font_size)],
        ));
        operations.push(Operation::new("rg", vec![0.into(), 0.into(), 0.into()]));
        operations.push(Operation::new(
            "Td",
            vec![Object::Real(line.x), Object::Real(line.y)],
        ));
        operations.push(Operation::new("Tj", vec![Object::string_literal(bytes)]));
        operations.push(Operation::new("ET", vec![]));
    }

    Ok(Content { operations })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
