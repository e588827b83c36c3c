use std::fmt;
use std::str::FromStr;

use crate::error::DteError;

/// Two-character DTE classification code (`identificacion.tipoDte`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocumentType {
    Factura,
    CreditoFiscal,
    NotaRemision,
    NotaCredito,
    NotaDebito,
    Retencion,
    Liquidacion,
    LiquidacionContable,
    FacturaExportacion,
    SujetoExcluido,
    Donacion,
}

impl DocumentType {
    pub const ALL: [DocumentType; 11] = [
        DocumentType::Factura,
        DocumentType::CreditoFiscal,
        DocumentType::NotaRemision,
        DocumentType::NotaCredito,
        DocumentType::NotaDebito,
        DocumentType::Retencion,
        DocumentType::Liquidacion,
        DocumentType::LiquidacionContable,
        DocumentType::FacturaExportacion,
        DocumentType::SujetoExcluido,
        DocumentType::Donacion,
    ];

    pub fn code(self) -> &'static str {
        match self {
            DocumentType::Factura => "01",
            DocumentType::CreditoFiscal => "03",
            DocumentType::NotaRemision => "04",
            DocumentType::NotaCredito => "05",
            DocumentType::NotaDebito => "06",
            DocumentType::Retencion => "07",
            DocumentType::Liquidacion => "08",
            DocumentType::LiquidacionContable => "09",
            DocumentType::FacturaExportacion => "11",
            DocumentType::SujetoExcluido => "14",
            DocumentType::Donacion => "15",
        }
    }

    /// Official Spanish name of the document class
    pub fn name(self) -> &'static str {
        match self {
            DocumentType::Factura => "Factura",
            DocumentType::CreditoFiscal => "Comprobante de Crédito Fiscal",
            DocumentType::NotaRemision => "Nota de Remisión",
            DocumentType::NotaCredito => "Nota de Crédito",
            DocumentType::NotaDebito => "Nota de Débito",
            DocumentType::Retencion => "Comprobante de Retención",
            DocumentType::Liquidacion => "Comprobante de Liquidación",
            DocumentType::LiquidacionContable => "Documento Contable de Liquidación",
            DocumentType::FacturaExportacion => "Factura de Exportación",
            DocumentType::SujetoExcluido => "Factura de Sujeto Excluido",
            DocumentType::Donacion => "Comprobante de Donación",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DocumentType {
    type Err = DteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        DocumentType::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or_else(|| DteError::UnknownDocumentType(s.to_string()))
    }
}
