//! Message template engine — three named placeholders, nothing more.
//!
//! `{nome}`, `{valor}` and `{vencimento}` are replaced with data from
//! the record; every other character passes through untouched.

use crate::error::{CobrancaError, Result};
use crate::records::ContactRecord;

/// A reminder message template.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    text: String,
}

impl MessageTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Render the template for one record. An unknown or unclosed
    /// placeholder is a per-record `Template` error.
    pub fn render(&self, record: &ContactRecord) -> Result<String> {
        let mut out = String::with_capacity(self.text.len() + 32);
        let mut rest = self.text.as_str();

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after
                .find('}')
                .ok_or_else(|| CobrancaError::Template("unclosed '{' in template".into()))?;
            match &after[..end] {
                "nome" => out.push_str(&record.nome),
                "valor" => out.push_str(&format_valor(record.valor)),
                "vencimento" => out.push_str(&record.data_vencimento),
                other => {
                    return Err(CobrancaError::Template(format!(
                        "unknown placeholder '{{{other}}}'"
                    )));
                }
            }
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

/// Amounts print the way a human writes them on an invoice: no
/// decimals when whole, two otherwise.
fn format_valor(valor: f64) -> String {
    if valor.fract() == 0.0 {
        format!("{valor:.0}")
    } else {
        format!("{valor:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ContactRecord {
        ContactRecord {
            nome: "Ana".into(),
            telefone: "11987654321".into(),
            valor: 100.0,
            data_vencimento: "10/08".into(),
        }
    }

    #[test]
    fn test_substitutes_all_three_placeholders() {
        let template = MessageTemplate::new("Hello {nome}, R${valor} due {vencimento}");
        let msg = template.render(&record()).unwrap();
        assert_eq!(msg, "Hello Ana, R$100 due 10/08");
    }

    #[test]
    fn test_surrounding_text_untouched() {
        let template = MessageTemplate::new("a {nome} b {nome} c");
        assert_eq!(template.render(&record()).unwrap(), "a Ana b Ana c");
    }

    #[test]
    fn test_no_placeholders_is_identity() {
        let template = MessageTemplate::new("pague agora");
        assert_eq!(template.render(&record()).unwrap(), "pague agora");
    }

    #[test]
    fn test_fractional_valor_keeps_two_decimals() {
        let mut r = record();
        r.valor = 59.9;
        let template = MessageTemplate::new("R${valor}");
        assert_eq!(template.render(&r).unwrap(), "R$59.90");
    }

    #[test]
    fn test_unknown_placeholder_errors() {
        let template = MessageTemplate::new("oi {cliente}");
        let err = template.render(&record()).unwrap_err();
        assert!(matches!(err, CobrancaError::Template(_)));
    }

    #[test]
    fn test_unclosed_placeholder_errors() {
        let template = MessageTemplate::new("oi {nome");
        assert!(template.render(&record()).is_err());
    }

    #[test]
    fn test_default_template_renders() {
        let template = MessageTemplate::new(crate::config::CobrancaConfig::default().template);
        let msg = template.render(&record()).unwrap();
        assert!(msg.contains("Ana"));
        assert!(msg.contains("R$100"));
        assert!(msg.contains("10/08"));
    }
}
