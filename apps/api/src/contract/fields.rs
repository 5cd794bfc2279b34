//! The nine user-supplied contract fields and their validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Field keys
// ────────────────────────────────────────────────────────────────────────────

/// A named contract field. Serializes to its JSON key (`cpfContratante`, `dataInicio`, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Contratante,
    CpfContratante,
    Contratado,
    CpfContratado,
    Servico,
    Local,
    Valor,
    DataInicio,
    DataFim,
}

/// How the form should render the input for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Textarea,
    Date,
}

impl FieldKey {
    /// All keys in form order.
    pub const ALL: [FieldKey; 9] = [
        FieldKey::Contratante,
        FieldKey::CpfContratante,
        FieldKey::Contratado,
        FieldKey::CpfContratado,
        FieldKey::Servico,
        FieldKey::Local,
        FieldKey::Valor,
        FieldKey::DataInicio,
        FieldKey::DataFim,
    ];

    /// The JSON key and template placeholder name.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Contratante => "contratante",
            FieldKey::CpfContratante => "cpfContratante",
            FieldKey::Contratado => "contratado",
            FieldKey::CpfContratado => "cpfContratado",
            FieldKey::Servico => "servico",
            FieldKey::Local => "local",
            FieldKey::Valor => "valor",
            FieldKey::DataInicio => "dataInicio",
            FieldKey::DataFim => "dataFim",
        }
    }

    pub fn from_name(name: &str) -> Option<FieldKey> {
        FieldKey::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// Form label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            FieldKey::Contratante => "Nome do Contratante",
            FieldKey::CpfContratante => "CPF do Contratante",
            FieldKey::Contratado => "Nome do Contratado",
            FieldKey::CpfContratado => "CPF do Contratado",
            FieldKey::Servico => "Serviço Prestado",
            FieldKey::Local => "Cidade",
            FieldKey::Valor => "Valor (R$)",
            FieldKey::DataInicio => "Data de Início",
            FieldKey::DataFim => "Data de Término",
        }
    }

    pub fn input_kind(self) -> InputKind {
        match self {
            FieldKey::Servico => InputKind::Textarea,
            FieldKey::DataInicio | FieldKey::DataFim => InputKind::Date,
            _ => InputKind::Text,
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ContractFields
// ────────────────────────────────────────────────────────────────────────────

/// Field values as posted by the form.
///
/// Keys absent from the JSON body deserialize as empty strings, so a partial body is
/// reported by [`ContractFields::validate`] rather than rejected by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractFields {
    pub contratante: String,
    pub cpf_contratante: String,
    pub contratado: String,
    pub cpf_contratado: String,
    pub local: String,
    pub servico: String,
    pub valor: String,
    pub data_inicio: String,
    pub data_fim: String,
}

impl ContractFields {
    pub fn get(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Contratante => &self.contratante,
            FieldKey::CpfContratante => &self.cpf_contratante,
            FieldKey::Contratado => &self.contratado,
            FieldKey::CpfContratado => &self.cpf_contratado,
            FieldKey::Servico => &self.servico,
            FieldKey::Local => &self.local,
            FieldKey::Valor => &self.valor,
            FieldKey::DataInicio => &self.data_inicio,
            FieldKey::DataFim => &self.data_fim,
        }
    }

    /// Keys whose value is empty after trimming, in form order.
    pub fn missing(&self) -> Vec<FieldKey> {
        FieldKey::ALL
            .into_iter()
            .filter(|&k| self.get(k).trim().is_empty())
            .collect()
    }

    /// Every field must be non-empty after trimming. Values themselves are not altered.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required fields: {}", join_keys(.missing))]
pub struct ValidationError {
    pub missing: Vec<FieldKey>,
}

fn join_keys(keys: &[FieldKey]) -> String {
    keys.iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
