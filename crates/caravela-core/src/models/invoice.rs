//! Tenant invoice configuration
//!
//! Owned by the dossier backend; this layer reads and patches it.

use serde::{Deserialize, Serialize};

/// Invoice configuration for the current tenant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceConfig {
    /// General terms and conditions, as HTML, printed on invoices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cgv_html: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_cgv_is_omitted() {
        let config = InvoiceConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, "{}");

        let parsed: InvoiceConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, config);
    }
}
