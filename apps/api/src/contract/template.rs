//! Contract template versions and rendering.
//!
//! Templates are static text with `{name}` placeholders, where `name` is a field key
//! (`{contratante}`, `{cpfContratado}`, …) or `{dataAssinatura}` for the date on the
//! signature line. Substitution is a single left-to-right pass, so braces inside a user
//! value are copied as-is and never expanded.
//!
//! `V2` (14 clauses) is the canonical version. `V1` (7 clauses) is kept for
//! reproducing older documents.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::contract::fields::{ContractFields, FieldKey};

const SIGNATURE_DATE_PLACEHOLDER: &str = "dataAssinatura";
const BLANK_DATE: &str = "___/___/____";
const CLAUSE_PREFIX: &str = "Cláusula ";

// ────────────────────────────────────────────────────────────────────────────
// Template text
// ────────────────────────────────────────────────────────────────────────────

const TEMPLATE_V1: &str = r#"
CONTRATO DE PRESTAÇÃO DE SERVIÇOS

Pelo presente instrumento particular, de um lado {contratante}, inscrito no CPF {cpfContratante}, e de outro lado {contratado}, inscrito no CPF {cpfContratado}, têm entre si justo e contratado o seguinte:

Cláusula 1ª - Objeto
O contratado prestará os serviços de {servico} com início em {dataInicio} e término em {dataFim}, conforme as condições aqui estipuladas.

Cláusula 2ª - Remuneração
O valor acordado para a prestação dos serviços é de R${valor}. O pagamento será efetuado da seguinte forma: 50% no início do serviço e 50% na entrega final, salvo acordo diferente entre as partes por escrito.

Cláusula 3ª - Alterações no Escopo
Caso o contratante solicite modificações, ampliações ou ajustes no serviço que não tenham sido previamente acordados neste contrato, o valor total será revisto, podendo haver acréscimos conforme o novo escopo. Tais alterações deverão ser registradas por escrito e aprovadas por ambas as partes.

Cláusula 4ª - Obrigações do Contratante
O contratante deverá fornecer todas as informações e documentos necessários para a execução dos serviços, bem como efetuar os pagamentos nos prazos acordados.

Cláusula 5ª - Prazo e Rescisão
O contrato vigorará pelo prazo estipulado, podendo ser rescindido por qualquer das partes mediante aviso prévio de 30 (trinta) dias, sem prejuízo do cumprimento das obrigações pendentes.

Cláusula 6ª - Confidencialidade
Ambas as partes se comprometem a manter em sigilo todas as informações confidenciais obtidas durante a vigência deste contrato.

Cláusula 7ª - Foro
Para dirimir quaisquer controvérsias oriundas deste contrato, fica eleito o foro da comarca de {local}, com renúncia a qualquer outro. E, por estarem assim justos e contratados, firmam o presente contrato em duas vias de igual teor.

{local}, {dataAssinatura}

Assinatura CONTRATANTE: _______________________

Assinatura CONTRATADO: _______________________
"#;

const TEMPLATE_V2: &str = r#"
CONTRATO DE PRESTAÇÃO DE SERVIÇOS

Pelo presente instrumento particular, de um lado {contratante}, inscrito no CPF {cpfContratante}, e de outro lado {contratado}, inscrito no CPF {cpfContratado}, têm entre si justo e contratado o seguinte:

Cláusula 1ª - Objeto
O contratado prestará os serviços de {servico} com início em {dataInicio} e término em {dataFim}, conforme as condições aqui estipuladas.

Cláusula 2ª - Remuneração
O valor acordado para a prestação dos serviços é de R${valor}. O pagamento será efetuado da seguinte forma: 50% no início do serviço e 50% na entrega final, salvo acordo diferente entre as partes por escrito.

Cláusula 3ª - Alterações no Escopo
Caso o contratante solicite modificações, ampliações ou ajustes no serviço que não tenham sido previamente acordados neste contrato, o valor total será revisto, podendo haver acréscimos conforme o novo escopo. Tais alterações deverão ser registradas por escrito e aprovadas por ambas as partes.

Cláusula 4ª - Obrigações do Contratado
O contratado se compromete a executar os serviços com zelo, diligência e conforme as normas técnicas aplicáveis.

Cláusula 5ª - Obrigações do Contratante
O contratante deverá fornecer todas as informações e documentos necessários para a execução dos serviços, bem como efetuar os pagamentos nos prazos acordados.

Cláusula 6ª - Prazo e Rescisão
O contrato vigorará pelo prazo estipulado, podendo ser rescindido por qualquer das partes mediante aviso prévio de 30 (trinta) dias, sem prejuízo do cumprimento das obrigações pendentes.

Cláusula 7ª - Confidencialidade
Ambas as partes se comprometem a manter em sigilo todas as informações confidenciais obtidas durante a vigência deste contrato.

Cláusula 8ª - Foro
Para dirimir quaisquer controvérsias oriundas deste contrato, fica eleito o foro da comarca de {local}, com renúncia a qualquer outro. E, por estarem assim justos e contratados, firmam o presente contrato em duas vias de igual teor.

Cláusula 9ª - Responsabilidade Civil
O contratado será responsável por eventuais danos causados ao contratante decorrentes de dolo ou negligência comprovada na execução dos serviços.

Cláusula 10ª - Propriedade Intelectual
Todos os materiais, produtos ou resultados gerados durante a prestação dos serviços serão de propriedade do contratante, salvo acordo prévio por escrito.

Cláusula 11ª - Subcontratação
O contratado não poderá transferir ou subcontratar total ou parcialmente os serviços objeto deste contrato sem autorização prévia e por escrito do contratante.

Cláusula 12ª - Comunicação entre as Partes
Toda e qualquer comunicação relacionada a este contrato deverá ser feita por escrito e enviada aos endereços de e-mail fornecidos pelas partes no momento da assinatura.

Cláusula 13ª - Caso Fortuito e Força Maior
As partes não serão responsabilizadas por eventuais falhas no cumprimento das obrigações aqui pactuadas quando decorrentes de caso fortuito ou força maior, nos termos do artigo 393 do Código Civil.

Cláusula 14ª - Validade
Se qualquer cláusula deste contrato for considerada inválida ou inexequível por um tribunal competente, as demais cláusulas permanecerão em pleno vigor e efeito.

{local}, {dataAssinatura}

Assinatura CONTRATANTE: _______________________

Assinatura CONTRATADO: _______________________
"#;

// ────────────────────────────────────────────────────────────────────────────
// Version and signature date
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateVersion {
    /// 7 clauses.
    V1,
    /// 14 clauses.
    V2,
}

impl TemplateVersion {
    pub const CANONICAL: TemplateVersion = TemplateVersion::V2;

    fn source(self) -> &'static str {
        match self {
            TemplateVersion::V1 => TEMPLATE_V1,
            TemplateVersion::V2 => TEMPLATE_V2,
        }
    }

    pub fn clause_count(self) -> usize {
        clause_headings(self.source()).len()
    }

    /// Interpolates `fields` into this version's text.
    ///
    /// Assumes the fields were validated; values are inserted verbatim.
    pub fn render(self, fields: &ContractFields, date: SignatureDate) -> String {
        let date_text = date.to_string();
        let rendered = interpolate(self.source(), |name| {
            if name == SIGNATURE_DATE_PLACEHOLDER {
                Some(date_text.as_str())
            } else {
                FieldKey::from_name(name).map(|key| fields.get(key))
            }
        });
        rendered.trim().to_string()
    }
}

impl Default for TemplateVersion {
    fn default() -> Self {
        TemplateVersion::CANONICAL
    }
}

impl std::str::FromStr for TemplateVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(TemplateVersion::V1),
            "v2" | "2" => Ok(TemplateVersion::V2),
            other => Err(format!("unknown template version '{other}' (expected v1|v2)")),
        }
    }
}

impl fmt::Display for TemplateVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateVersion::V1 => f.write_str("v1"),
            TemplateVersion::V2 => f.write_str("v2"),
        }
    }
}

/// Date printed next to the city on the signature line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureDate {
    /// `___/___/____`, filled in by hand.
    Blank,
    /// Printed as `dd/mm/yyyy`.
    On(NaiveDate),
}

impl fmt::Display for SignatureDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureDate::Blank => f.write_str(BLANK_DATE),
            SignatureDate::On(date) => write!(f, "{}", date.format("%d/%m/%Y")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public helpers
// ────────────────────────────────────────────────────────────────────────────

/// Renders the canonical template with a blank signature date.
#[allow(dead_code)]
pub fn render(fields: &ContractFields) -> String {
    TemplateVersion::CANONICAL.render(fields, SignatureDate::Blank)
}

/// Clause heading lines ("Cláusula Nª - Título") in order of appearance.
pub fn clause_headings(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| is_clause_heading(line))
        .collect()
}

fn is_clause_heading(line: &str) -> bool {
    let Some(rest) = line.strip_prefix(CLAUSE_PREFIX) else {
        return false;
    };
    let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && rest[digits..].starts_with("ª - ")
}

/// Single-pass `{name}` substitution. Unknown or unterminated placeholders are kept.
fn interpolate<'a, F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match lookup(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

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
    fn test_scenario_contains_values() {
        let text = render(&scenario());
        for needle in ["Ana", "Beto", "R$1000", "Recife", "111", "222", "consultoria"] {
            assert!(text.contains(needle), "missing {needle}");
        }
        assert!(text.contains("com início em 2024-01-01 e término em 2024-02-01"));
    }

    #[test]
    fn test_canonical_has_fourteen_clauses() {
        let text = render(&scenario());
        let headings = clause_headings(&text);
        assert_eq!(headings.len(), 14);
        assert_eq!(headings[0], "Cláusula 1ª - Objeto");
        assert_eq!(headings[13], "Cláusula 14ª - Validade");
        assert_eq!(TemplateVersion::CANONICAL.clause_count(), 14);
    }

    #[test]
    fn test_v1_has_seven_clauses() {
        let text = TemplateVersion::V1.render(&scenario(), SignatureDate::Blank);
        assert_eq!(clause_headings(&text).len(), 7);
        assert!(text.contains("Cláusula 7ª - Foro"));
        assert_eq!(TemplateVersion::V1.clause_count(), 7);
    }

    #[test]
    fn test_output_is_trimmed() {
        let text = render(&scenario());
        assert!(text.starts_with("CONTRATO DE PRESTAÇÃO DE SERVIÇOS"));
        assert!(text.ends_with("Assinatura CONTRATADO: _______________________"));
    }

    #[test]
    fn test_no_placeholders_left() {
        let text = render(&scenario());
        assert!(!text.contains('{'));
        assert!(!text.contains('}'));
    }

    #[test]
    fn test_signature_date_blank_and_dated() {
        let blank = render(&scenario());
        assert!(blank.contains("Recife, ___/___/____"));

        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let dated = TemplateVersion::V2.render(&scenario(), SignatureDate::On(date));
        assert!(dated.contains("Recife, 07/03/2024"));
    }

    #[test]
    fn test_values_are_not_re_expanded() {
        let mut fields = scenario();
        fields.contratante = "{local} & {cpfContratado}".to_string();
        let text = render(&fields);
        assert!(text.contains("de um lado {local} & {cpfContratado}, inscrito"));
    }

    #[test]
    fn test_newlines_and_long_runs_pass_through() {
        let mut fields = scenario();
        fields.servico = format!("linha um\nlinha dois {}", "z".repeat(300));
        let text = render(&fields);
        assert!(text.contains(&fields.servico));
    }

    #[test]
    fn test_render_is_deterministic() {
        assert_eq!(render(&scenario()), render(&scenario()));
    }

    #[test]
    fn test_interpolate_keeps_unknown_and_unterminated() {
        let out = interpolate("a {x} b {y", |name| (name == "y").then_some("Y"));
        assert_eq!(out, "a {x} b {y");
    }

    #[test]
    fn test_version_parse_and_display() {
        assert_eq!("v1".parse::<TemplateVersion>().unwrap(), TemplateVersion::V1);
        assert_eq!("V2".parse::<TemplateVersion>().unwrap(), TemplateVersion::V2);
        assert!("v3".parse::<TemplateVersion>().is_err());
        assert_eq!(TemplateVersion::default().to_string(), "v2");
    }

    #[test]
    fn test_clause_heading_detection() {
        assert!(is_clause_heading("Cláusula 10ª - Propriedade Intelectual"));
        assert!(!is_clause_heading("Cláusula sem número"));
        assert!(!is_clause_heading("Se qualquer cláusula deste contrato"));
    }

    proptest! {
        /// Any non-empty values appear verbatim and the clause count never changes.
        #[test]
        fn render_contains_every_value(values in proptest::collection::vec("[A-Za-z0-9çã ./-]{1,40}", 9)) {
            let fields = ContractFields {
                contratante: values[0].clone(),
                cpf_contratante: values[1].clone(),
                contratado: values[2].clone(),
                cpf_contratado: values[3].clone(),
                local: values[4].clone(),
                servico: values[5].clone(),
                valor: values[6].clone(),
                data_inicio: values[7].clone(),
                data_fim: values[8].clone(),
            };
            let text = render(&fields);
            for key in FieldKey::ALL {
                prop_assert!(text.contains(fields.get(key)));
            }
            prop_assert_eq!(clause_headings(&text).len(), 14);
        }
    }
}
