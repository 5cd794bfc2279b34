//! Contract generation pipeline: validate → render → layout → serialize.
//!
//! Everything here is synchronous and CPU-bound. Handlers run it inside
//! `tokio::task::spawn_blocking`; tests call it directly.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::contract::fields::ContractFields;
use crate::contract::template::{clause_headings, SignatureDate, TemplateVersion};
use crate::errors::AppError;
use crate::layout::{layout_with, Document, LineBreaker, PageGeometry};
use crate::pdf::write_pdf;

/// Fixed inputs of the pipeline, built once at startup.
#[derive(Clone)]
pub struct GenerationSettings {
    pub geometry: PageGeometry,
    pub template: TemplateVersion,
    pub breaker: Arc<dyn LineBreaker>,
}

/// A generated PDF plus the layout figures worth logging.
#[derive(Debug, Clone)]
pub struct ContractPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub line_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractPreview {
    pub template_version: TemplateVersion,
    pub text: String,
    pub clause_count: usize,
    pub page_count: usize,
    pub line_count: usize,
}

/// Renders and lays out the contract. Fails only on invalid fields.
pub fn compose(
    fields: &ContractFields,
    settings: &GenerationSettings,
    date: SignatureDate,
) -> Result<(String, Document), AppError> {
    fields.validate()?;
    let text = settings.template.render(fields, date);
    let document = layout_with(&text, &settings.geometry, settings.breaker.as_ref());
    Ok((text, document))
}

/// Produces the downloadable PDF. The signature date is left blank for signing by hand.
pub fn generate_pdf(
    fields: &ContractFields,
    settings: &GenerationSettings,
) -> Result<ContractPdf, AppError> {
    let (_, document) = compose(fields, settings, SignatureDate::Blank)?;
    let bytes = write_pdf(&document)?;
    Ok(ContractPdf {
        bytes,
        page_count: document.page_count(),
        line_count: document.line_count(),
    })
}

/// Produces the on-screen preview, dated `today`.
pub fn build_preview(
    fields: &ContractFields,
    settings: &GenerationSettings,
    today: NaiveDate,
) -> Result<ContractPreview, AppError> {
    let (text, document) = compose(fields, settings, SignatureDate::On(today))?;
    Ok(ContractPreview {
        template_version: settings.template,
        clause_count: clause_headings(&text).len(),
        page_count: document.page_count(),
        line_count: document.line_count(),
        text,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::fields::FieldKey;
    use crate::layout::{FixedWidth, WordWrap};

    fn settings() -> GenerationSettings {
        GenerationSettings {
            geometry: PageGeometry::A4,
            template: TemplateVersion::CANONICAL,
            breaker: Arc::new(FixedWidth::default()),
        }
    }

    fn scenario() -> ContractFields {
        ContractFields {
            contratante: "Ana".to_string(),
            cpf_contratante: "111".to_string(),
            contratado: "Beto".to_string(),
            cpf_contratado: "222".to_string(),
            local: "Recife".to_string(),
            servico: "consultoria".to_string(),
            valor: "1000".to_string(),
            data_inicio: "2024-01-01".to_string(),
            data_fim: "2024-02-01".to_string(),
        }
    }

    #[test]
    fn test_scenario_first_line_at_top_baseline() {
        let (text, document) = compose(&scenario(), &settings(), SignatureDate::Blank).unwrap();
        assert!(text.contains("R$1000"));
        assert!(document.page_count() >= 1);
        let first = &document.pages[0].lines[0];
        assert_eq!(first.y, PageGeometry::A4.height - PageGeometry::A4.margin);
        assert_eq!(first.text, "CONTRATO DE PRESTAÇÃO DE SERVIÇOS");
    }

    #[test]
    fn test_compose_twice_is_identical() {
        let a = compose(&scenario(), &settings(), SignatureDate::Blank).unwrap();
        let b = compose(&scenario(), &settings(), SignatureDate::Blank).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_long_servico_wraps_in_90_char_pieces() {
        let mut fields = scenario();
        fields.servico = "w".repeat(300);
        let (_, document) = compose(&fields, &settings(), SignatureDate::Blank).unwrap();
        assert!(document.lines().all(|l| l.text.chars().count() <= 90));
        let pieces: Vec<usize> = document
            .lines()
            .filter(|l| l.text.contains('w') && l.text.chars().all(|c| c == 'w'))
            .map(|l| l.text.chars().count())
            .collect();
        assert!(pieces.iter().filter(|&&n| n == 90).count() >= 2);
    }

    #[test]
    fn test_generate_pdf_rejects_missing_fields() {
        let mut fields = scenario();
        fields.data_fim.clear();
        match generate_pdf(&fields, &settings()) {
            Err(AppError::Validation(err)) => assert_eq!(err.missing, vec![FieldKey::DataFim]),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_generate_pdf_produces_parseable_document() {
        let pdf = generate_pdf(&scenario(), &settings()).unwrap();
        let doc = lopdf::Document::load_mem(&pdf.bytes).unwrap();
        assert_eq!(doc.get_pages().len(), pdf.page_count);
        assert!(pdf.page_count >= 2, "14 clauses do not fit one A4 page");
    }

    #[test]
    fn test_generate_pdf_unencodable_value_is_pdf_error() {
        let mut fields = scenario();
        fields.contratante = "Ana 😀".to_string();
        assert!(matches!(
            generate_pdf(&fields, &settings()),
            Err(AppError::Pdf(_))
        ));
    }

    #[test]
    fn test_preview_is_dated_and_counts_clauses() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let preview = build_preview(&scenario(), &settings(), today).unwrap();
        assert!(preview.text.contains("Recife, 18/10/2026"));
        assert_eq!(preview.clause_count, 14);
        assert_eq!(preview.template_version, TemplateVersion::V2);
        assert!(preview.line_count > preview.clause_count);
    }

    #[test]
    fn test_word_wrap_settings_change_layout_only() {
        let mut word = settings();
        word.breaker = Arc::new(WordWrap::default());
        let (fixed_text, fixed_doc) = compose(&scenario(), &settings(), SignatureDate::Blank).unwrap();
        let (word_text, word_doc) = compose(&scenario(), &word, SignatureDate::Blank).unwrap();
        assert_eq!(fixed_text, word_text);
        assert_ne!(fixed_doc, word_doc);
    }
}
