use crate::catalog::EmploymentKind;
use std::fmt;

/// Names of the answer fields a step can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PropertyFinalized,
    PropertyValue,
    PropertyLocation,
    Age,
    EmploymentType,
    Income,
    Emi,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::PropertyFinalized => "propertyFinalized",
            Field::PropertyValue => "propertyValue",
            Field::PropertyLocation => "propertyLocation",
            Field::Age => "age",
            Field::EmploymentType => "employmentType",
            Field::Income => "income",
            Field::Emi => "emi",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Employment answer. The income brackets on offer depend on the kind, so
/// the income lives inside the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmploymentAnswer {
    Salaried { income: Option<String> },
    SelfEmployed { income: Option<String> },
}

impl EmploymentAnswer {
    pub fn new(kind: EmploymentKind) -> Self {
        match kind {
            EmploymentKind::Salaried => EmploymentAnswer::Salaried { income: None },
            EmploymentKind::SelfEmployed => EmploymentAnswer::SelfEmployed { income: None },
        }
    }

    pub fn kind(&self) -> EmploymentKind {
        match self {
            EmploymentAnswer::Salaried { .. } => EmploymentKind::Salaried,
            EmploymentAnswer::SelfEmployed { .. } => EmploymentKind::SelfEmployed,
        }
    }

    pub fn income(&self) -> Option<&str> {
        match self {
            EmploymentAnswer::Salaried { income } | EmploymentAnswer::SelfEmployed { income } => {
                income.as_deref()
            }
        }
    }

    fn set_income(&mut self, value: String) {
        match self {
            EmploymentAnswer::Salaried { income } | EmploymentAnswer::SelfEmployed { income } => {
                *income = Some(value);
            }
        }
    }
}

/// Everything the borrower has answered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormAnswers {
    pub property_finalized: String,
    pub property_value: String,
    pub property_location: String,
    pub age: String,
    pub employment: Option<EmploymentAnswer>,
    /// An employment type outside the known kinds, kept as written.
    pub employment_other: Option<String>,
    pub emi: Option<String>,
}

impl FormAnswers {
    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::PropertyFinalized => self.property_finalized.as_str(),
            Field::PropertyValue => self.property_value.as_str(),
            Field::PropertyLocation => self.property_location.as_str(),
            Field::Age => self.age.as_str(),
            Field::EmploymentType => {
                return self
                    .employment
                    .as_ref()
                    .map(|e| e.kind().value())
                    .or(self.employment_other.as_deref())
            }
            Field::Income => return self.employment.as_ref().and_then(|e| e.income()),
            Field::Emi => return self.emi.as_deref(),
        };
        (!value.is_empty()).then_some(value)
    }

    /// Write a field. Writes are never rejected for being outside the step's
    /// options; the navigator refuses to advance instead.
    pub fn set(&mut self, field: Field, value: &str) {
        match field {
            Field::PropertyFinalized => self.property_finalized = value.to_string(),
            Field::PropertyValue => self.property_value = value.to_string(),
            Field::PropertyLocation => self.property_location = value.to_string(),
            Field::Age => self.age = value.to_string(),
            Field::EmploymentType => match EmploymentKind::from_value(value) {
                Some(kind) if self.employment.as_ref().map(|e| e.kind()) == Some(kind) => {}
                Some(kind) => {
                    self.employment = Some(EmploymentAnswer::new(kind));
                    self.employment_other = None;
                }
                None => {
                    // No income brackets exist for an unknown kind
                    self.employment = None;
                    self.employment_other = (!value.is_empty()).then(|| value.to_string());
                }
            },
            Field::Income => match self.employment.as_mut() {
                Some(employment) => employment.set_income(value.to_string()),
                None => tracing::debug!(value, "income written before employment type, dropped"),
            },
            Field::Emi => {
                let trimmed = value.trim();
                self.emi = (!trimmed.is_empty()).then(|| trimmed.to_string());
            }
        }
    }

    /// True once every mandatory field has a value. EMI is optional.
    pub fn is_complete(&self) -> bool {
        [
            Field::PropertyFinalized,
            Field::PropertyValue,
            Field::PropertyLocation,
            Field::Age,
            Field::EmploymentType,
            Field::Income,
        ]
        .iter()
        .all(|f| self.get(*f).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switching_employment_drops_income() {
        let mut answers = FormAnswers::default();
        answers.set(Field::EmploymentType, "salaried");
        answers.set(Field::Income, "50k-70k");
        assert_eq!(answers.get(Field::Income), Some("50k-70k"));

        // Re-selecting the same kind keeps the income
        answers.set(Field::EmploymentType, "salaried");
        assert_eq!(answers.get(Field::Income), Some("50k-70k"));

        answers.set(Field::EmploymentType, "self-employed");
        assert_eq!(answers.get(Field::EmploymentType), Some("self-employed"));
        assert_eq!(answers.get(Field::Income), None);
    }

    #[test]
    fn test_unknown_employment_type_is_kept() {
        let mut answers = FormAnswers::default();
        answers.set(Field::EmploymentType, "salaried");
        answers.set(Field::Income, "50k-70k");
        answers.set(Field::EmploymentType, "freelance");
        assert_eq!(answers.get(Field::EmploymentType), Some("freelance"));
        assert_eq!(answers.get(Field::Income), None);
        assert!(!answers.is_complete());

        answers.set(Field::EmploymentType, "salaried");
        assert_eq!(answers.get(Field::EmploymentType), Some("salaried"));
        assert_eq!(answers.employment_other, None);

        answers.set(Field::EmploymentType, "");
        assert_eq!(answers.get(Field::EmploymentType), None);
    }

    #[test]
    fn test_income_without_employment_is_dropped() {
        let mut answers = FormAnswers::default();
        answers.set(Field::Income, "50k-70k");
        assert_eq!(answers.get(Field::Income), None);
        assert_eq!(answers.employment, None);
    }

    #[test]
    fn test_emi_is_optional_and_trimmed() {
        let mut answers = FormAnswers::default();
        answers.set(Field::Emi, " 12000 ");
        assert_eq!(answers.get(Field::Emi), Some("12000"));
        answers.set(Field::Emi, "");
        assert_eq!(answers.get(Field::Emi), None);
    }

    #[test]
    fn test_is_complete() {
        let mut answers = FormAnswers::default();
        assert!(!answers.is_complete());
        answers.set(Field::PropertyFinalized, "yes");
        answers.set(Field::PropertyValue, "25-50");
        answers.set(Field::PropertyLocation, "other");
        answers.set(Field::Age, "21-40");
        answers.set(Field::EmploymentType, "self-employed");
        assert!(!answers.is_complete());
        answers.set(Field::Income, "below-25l");
        assert!(answers.is_complete());
    }
}
