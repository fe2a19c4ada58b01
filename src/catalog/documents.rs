use std::fmt;

/// The fixed set of documents a borrower can upload. Each kind owns at most
/// one upload slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentKind {
    Income,
    Bank,
    Residence,
    Property,
    Form16,
}

impl DocumentKind {
    pub fn id(self) -> &'static str {
        match self {
            DocumentKind::Income => "income",
            DocumentKind::Bank => "bank",
            DocumentKind::Residence => "residence",
            DocumentKind::Property => "property",
            DocumentKind::Form16 => "form16",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentSpec {
    pub kind: DocumentKind,
    pub title: &'static str,
    pub description: &'static str,
    pub required: bool,
}

pub const DOCUMENTS: &[DocumentSpec] = &[
    DocumentSpec {
        kind: DocumentKind::Income,
        title: "Proof of Income",
        description: "Salary slips for the last 3 months",
        required: true,
    },
    DocumentSpec {
        kind: DocumentKind::Bank,
        title: "Statement of Primary Bank Account",
        description: "Last 6 months statements",
        required: true,
    },
    DocumentSpec {
        kind: DocumentKind::Residence,
        title: "Proof of Permanent Residence",
        description: "Utility bills, Rental agreement, or Passport",
        required: true,
    },
    DocumentSpec {
        kind: DocumentKind::Property,
        title: "Property Documents",
        description: "Sale deed, Property tax receipts",
        required: true,
    },
    DocumentSpec {
        kind: DocumentKind::Form16,
        title: "Latest Form 16",
        description: "Tax form from your employer",
        required: true,
    },
];
