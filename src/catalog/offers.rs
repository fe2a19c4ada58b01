//! Mocked bank offers. Every borrower sees the same list regardless of their
//! answers.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bank {
    pub id: &'static str,
    /// Short name shown on the offer card.
    pub name: &'static str,
    /// Full name used once an application is underway.
    pub legal_name: &'static str,
    pub max_amount: &'static str,
    pub roi: &'static str,
    pub emi_amount: &'static str,
    pub max_tenure: &'static str,
}

pub const BANKS: &[Bank] = &[
    Bank {
        id: "icici",
        name: "ICICI Bank",
        legal_name: "ICICI Bank",
        max_amount: "₹52,00,000",
        roi: "8.7%",
        emi_amount: "₹42,575",
        max_tenure: "25 years",
    },
    Bank {
        id: "hdfc",
        name: "HDFC Bank",
        legal_name: "HDFC Bank",
        max_amount: "₹52,00,000",
        roi: "8.8%",
        emi_amount: "₹42,752",
        max_tenure: "25 years",
    },
    Bank {
        id: "sbi",
        name: "SBI",
        legal_name: "State Bank of India",
        max_amount: "₹52,00,000",
        roi: "9.2%",
        emi_amount: "₹44,353",
        max_tenure: "25 years",
    },
    Bank {
        id: "pnb",
        name: "PNB",
        legal_name: "Punjab National Bank",
        max_amount: "₹52,00,000",
        roi: "8.45%",
        emi_amount: "₹41,697",
        max_tenure: "25 years",
    },
    Bank {
        id: "kotak",
        name: "Kotak Mahindra",
        legal_name: "Kotak Mahindra Bank",
        max_amount: "₹52,00,000",
        roi: "8.75%",
        emi_amount: "₹42,752",
        max_tenure: "25 years",
    },
];

/// Tenure picker values in years. Display only; offers do not change.
pub const TENURE_YEARS: &[u32] = &[10, 15, 20, 25, 30];
pub const DEFAULT_TENURE_INDEX: usize = 3;

pub fn bank_by_id(id: &str) -> Option<&'static Bank> {
    BANKS.iter().find(|b| b.id == id)
}

/// Full bank name for an id, or a generic fallback for unknown ids.
pub fn bank_display_name(id: &str) -> &'static str {
    bank_by_id(id).map(|b| b.legal_name).unwrap_or("Your Bank")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_display_name() {
        assert_eq!(bank_display_name("sbi"), "State Bank of India");
        assert_eq!(bank_display_name("kotak"), "Kotak Mahindra Bank");
        assert_eq!(bank_display_name("nope"), "Your Bank");
    }

    #[test]
    fn test_default_tenure_is_25_years() {
        assert_eq!(TENURE_YEARS[DEFAULT_TENURE_INDEX], 25);
    }
}
