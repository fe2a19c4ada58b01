//! Question content for each wizard step.

/// One selectable answer. `value` is what gets stored, `label` is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

const fn choice(value: &'static str, label: &'static str) -> Choice {
    Choice { value, label }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Question {
    pub title: &'static str,
    pub subtitle: Option<&'static str>,
    /// Empty for free-form questions.
    pub options: &'static [Choice],
}

impl Question {
    pub fn accepts(&self, value: &str) -> bool {
        self.options.iter().any(|c| c.value == value)
    }

    pub fn label_for(&self, value: &str) -> Option<&'static str> {
        self.options.iter().find(|c| c.value == value).map(|c| c.label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmploymentKind {
    Salaried,
    SelfEmployed,
}

impl EmploymentKind {
    pub fn value(self) -> &'static str {
        match self {
            EmploymentKind::Salaried => "salaried",
            EmploymentKind::SelfEmployed => "self-employed",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "salaried" => Some(EmploymentKind::Salaried),
            "self-employed" => Some(EmploymentKind::SelfEmployed),
            _ => None,
        }
    }
}

const PROPERTY_FINALIZED: &[Choice] = &[
    choice("yes", "Yes, I have"),
    choice("no", "No, I am still looking"),
];

const PROPERTY_VALUE: &[Choice] = &[
    choice("15-25", "15-25 lakhs"),
    choice("25-50", "25-50 lakhs"),
    choice("50-75", "50-75 lakhs"),
    choice("75-100", "75 lakhs-1cr"),
    choice("100-150", "1-1.5 crore"),
    choice("150-200", "1.5-2 crore"),
    choice("200+", "Above 2 crore"),
];

const PROPERTY_LOCATION: &[Choice] = &[choice("ahmedabad", "Ahmedabad"), choice("other", "Other")];

const AGE: &[Choice] = &[
    choice("21-40", "21-40 years old"),
    choice("41-50", "41-50 years old"),
    choice("51+", "Over 51 years"),
];

const EMPLOYMENT: &[Choice] = &[
    choice("salaried", "I make a salary"),
    choice("self-employed", "I am self-employed"),
];

const SALARIED_INCOME: &[Choice] = &[
    choice("below-50k", "Below 50k"),
    choice("50k-70k", "50k - 70k"),
    choice("70k-1l", "70k - 1 lakh"),
    choice("1l-1.5l", "1 lakh - 1.5 lakhs"),
    choice("1.5l-2l", "1.5 lakhs - 2 lakhs"),
    choice("2l-2.5l", "2 lakhs - 2.5 lakhs"),
    choice("2.5l-3l", "2.5 lakhs - 3 lakhs"),
    choice("above-3l", "Above 3 lakhs"),
];

const SELF_EMPLOYED_INCOME: &[Choice] = &[
    choice("below-25l", "Below 25 lakhs"),
    choice("25l-50l", "25 lakhs - 50 lakhs"),
    choice("50l-75l", "50 lakhs - 75 lakhs"),
    choice("75l-1cr", "75 lakhs - 1 crore"),
    choice("1cr-1.5cr", "1 crore - 1.5 crore"),
    choice("1.5cr-2cr", "1.5 crore - 2 crore"),
    choice("above-2cr", "Above 2 crore"),
];

/// The full set of questions the wizard asks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Questionnaire {
    pub property_finalized: Question,
    pub property_value: Question,
    pub property_location: Question,
    pub age: Question,
    pub employment: Question,
    pub salaried_income: Question,
    pub self_employed_income: Question,
    pub emi: Question,
}

impl Questionnaire {
    pub fn builtin() -> Self {
        Self {
            property_finalized: Question {
                title: "Have you finalized a property?",
                subtitle: None,
                options: PROPERTY_FINALIZED,
            },
            property_value: Question {
                title: "What is your property's value?",
                subtitle: None,
                options: PROPERTY_VALUE,
            },
            property_location: Question {
                title: "Where is your property?",
                subtitle: None,
                options: PROPERTY_LOCATION,
            },
            age: Question {
                title: "How old are you?",
                subtitle: None,
                options: AGE,
            },
            employment: Question {
                title: "How are you employed?",
                subtitle: None,
                options: EMPLOYMENT,
            },
            salaried_income: Question {
                title: "Gross Monthly Income",
                subtitle: Some("This should include salary + other income sources"),
                options: SALARIED_INCOME,
            },
            self_employed_income: Question {
                title: "How much profit did you book in your last year's ITR?",
                subtitle: None,
                options: SELF_EMPLOYED_INCOME,
            },
            emi: Question {
                title: "Do you pay any EMIs?",
                subtitle: Some("Include the total of all EMIs being paid. Leave empty if none."),
                options: &[],
            },
        }
    }

    pub fn income(&self, kind: EmploymentKind) -> &Question {
        match kind {
            EmploymentKind::Salaried => &self.salaried_income,
            EmploymentKind::SelfEmployed => &self.self_employed_income,
        }
    }
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::builtin()
    }
}
