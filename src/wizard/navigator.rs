//! Linear step navigation for the borrower intake flow.
//!
//! The navigator owns the current step index and the accumulated answers.
//! It never branches: the income question is part of the employment step
//! and only changes what that step requires.

use super::answers::{Field, FormAnswers};
use crate::catalog::{Question, Questionnaire};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Landing,
    PropertyFinalized,
    PropertyValue,
    PropertyLocation,
    Age,
    Employment,
    Emi,
    Results,
}

impl WizardStep {
    pub const ALL: [WizardStep; 8] = [
        WizardStep::Landing,
        WizardStep::PropertyFinalized,
        WizardStep::PropertyValue,
        WizardStep::PropertyLocation,
        WizardStep::Age,
        WizardStep::Employment,
        WizardStep::Emi,
        WizardStep::Results,
    ];

    pub fn id(self) -> &'static str {
        match self {
            WizardStep::Landing => "landing",
            WizardStep::PropertyFinalized => "property-finalized",
            WizardStep::PropertyValue => "property-value",
            WizardStep::PropertyLocation => "property-location",
            WizardStep::Age => "age",
            WizardStep::Employment => "employment",
            WizardStep::Emi => "emi",
            WizardStep::Results => "results",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Landing => "Start",
            WizardStep::PropertyFinalized => "Property Status",
            WizardStep::PropertyValue => "Property Value",
            WizardStep::PropertyLocation => "Location",
            WizardStep::Age => "Age",
            WizardStep::Employment => "Employment",
            WizardStep::Emi => "EMI",
            WizardStep::Results => "Results",
        }
    }

    /// The single-choice field a step writes, if it has one.
    pub fn field(self) -> Option<Field> {
        match self {
            WizardStep::PropertyFinalized => Some(Field::PropertyFinalized),
            WizardStep::PropertyValue => Some(Field::PropertyValue),
            WizardStep::PropertyLocation => Some(Field::PropertyLocation),
            WizardStep::Age => Some(Field::Age),
            WizardStep::Employment => Some(Field::EmploymentType),
            WizardStep::Emi => Some(Field::Emi),
            WizardStep::Landing | WizardStep::Results => None,
        }
    }
}

/// Result of asking the navigator to move forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    /// The current step is not answered yet (or the wizard is finished).
    Blocked,
    /// The last question was answered; answers are ready for offer selection.
    Completed,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    questions: Questionnaire,
    index: usize,
    answers: FormAnswers,
}

impl Navigator {
    pub fn new(questions: Questionnaire) -> Self {
        Self {
            questions,
            index: 0,
            answers: FormAnswers::default(),
        }
    }

    pub fn current_step(&self) -> WizardStep {
        WizardStep::ALL[self.index]
    }

    pub fn step_index(&self) -> usize {
        self.index
    }

    pub fn answers(&self) -> &FormAnswers {
        &self.answers
    }

    pub fn into_answers(self) -> FormAnswers {
        self.answers
    }

    pub fn is_completed(&self) -> bool {
        self.current_step() == WizardStep::Results
    }

    /// Leave the landing page for the first question.
    pub fn start(&mut self) {
        if self.current_step() == WizardStep::Landing {
            self.index = 1;
            tracing::info!("wizard started");
        }
    }

    /// Continue an earlier application. Nothing is saved between sessions,
    /// so this behaves exactly like [`Navigator::start`].
    pub fn resume(&mut self) {
        self.start();
    }

    pub fn set_field(&mut self, field: Field, value: &str) {
        self.answers.set(field, value);
    }

    /// The question shown for the current step, if it is a question step.
    pub fn question(&self) -> Option<&Question> {
        let q = &self.questions;
        match self.current_step() {
            WizardStep::PropertyFinalized => Some(&q.property_finalized),
            WizardStep::PropertyValue => Some(&q.property_value),
            WizardStep::PropertyLocation => Some(&q.property_location),
            WizardStep::Age => Some(&q.age),
            WizardStep::Employment => Some(&q.employment),
            WizardStep::Emi => Some(&q.emi),
            WizardStep::Landing | WizardStep::Results => None,
        }
    }

    /// The income follow-up, shown once an employment type is chosen.
    pub fn income_question(&self) -> Option<&Question> {
        self.answers
            .employment
            .as_ref()
            .map(|e| self.questions.income(e.kind()))
    }

    fn answered(&self, field: Field, question: &Question) -> bool {
        self.answers
            .get(field)
            .is_some_and(|value| question.accepts(value))
    }

    pub fn can_advance(&self) -> bool {
        let q = &self.questions;
        match self.current_step() {
            WizardStep::Landing | WizardStep::Emi => true,
            WizardStep::PropertyFinalized => {
                self.answered(Field::PropertyFinalized, &q.property_finalized)
            }
            WizardStep::PropertyValue => self.answered(Field::PropertyValue, &q.property_value),
            WizardStep::PropertyLocation => {
                self.answered(Field::PropertyLocation, &q.property_location)
            }
            WizardStep::Age => self.answered(Field::Age, &q.age),
            WizardStep::Employment => match self.income_question() {
                Some(income) => self.answered(Field::Income, income),
                None => false,
            },
            WizardStep::Results => false,
        }
    }

    pub fn advance(&mut self) -> StepOutcome {
        if !self.can_advance() {
            return StepOutcome::Blocked;
        }
        let from = self.current_step();
        self.index += 1;
        if self.is_completed() {
            tracing::info!("wizard completed");
            return StepOutcome::Completed;
        }
        tracing::debug!(from = from.id(), to = self.current_step().id(), "wizard advanced");
        StepOutcome::Moved
    }

    pub fn retreat(&mut self) {
        if self.index == 0 || self.is_completed() {
            return;
        }
        self.index -= 1;
        tracing::debug!(to = self.current_step().id(), "wizard went back");
    }

    /// Fraction of the flow completed, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        self.index as f64 / (WizardStep::ALL.len() - 1) as f64
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Questionnaire::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_current(nav: &mut Navigator) {
        match nav.current_step() {
            WizardStep::PropertyFinalized => nav.set_field(Field::PropertyFinalized, "yes"),
            WizardStep::PropertyValue => nav.set_field(Field::PropertyValue, "50-75"),
            WizardStep::PropertyLocation => nav.set_field(Field::PropertyLocation, "ahmedabad"),
            WizardStep::Age => nav.set_field(Field::Age, "41-50"),
            WizardStep::Employment => {
                nav.set_field(Field::EmploymentType, "salaried");
                nav.set_field(Field::Income, "1l-1.5l");
            }
            WizardStep::Emi => nav.set_field(Field::Emi, "15000"),
            WizardStep::Landing | WizardStep::Results => {}
        }
    }

    #[test]
    fn test_start_and_resume_leave_landing() {
        let mut nav = Navigator::default();
        assert_eq!(nav.current_step(), WizardStep::Landing);
        nav.start();
        assert_eq!(nav.current_step(), WizardStep::PropertyFinalized);

        let mut nav = Navigator::default();
        nav.resume();
        assert_eq!(nav.step_index(), 1);

        // start is a no-op once past the landing page
        nav.set_field(Field::PropertyFinalized, "no");
        nav.advance();
        nav.start();
        assert_eq!(nav.current_step(), WizardStep::PropertyValue);
    }

    #[test]
    fn test_advance_blocked_until_answered() {
        let mut nav = Navigator::default();
        nav.start();
        for step in &WizardStep::ALL[1..6] {
            assert_eq!(nav.current_step(), *step);
            let before = nav.answers().clone();
            assert_eq!(nav.advance(), StepOutcome::Blocked);
            assert_eq!(nav.current_step(), *step);
            assert_eq!(nav.answers(), &before);
            answer_current(&mut nav);
            assert_eq!(nav.advance(), StepOutcome::Moved);
        }
        assert_eq!(nav.current_step(), WizardStep::Emi);
    }

    #[test]
    fn test_advance_rejects_values_outside_options() {
        let mut nav = Navigator::default();
        nav.start();
        nav.set_field(Field::PropertyFinalized, "maybe");
        assert_eq!(nav.answers().get(Field::PropertyFinalized), Some("maybe"));
        assert_eq!(nav.advance(), StepOutcome::Blocked);
        nav.set_field(Field::PropertyFinalized, "");
        assert_eq!(nav.advance(), StepOutcome::Blocked);
    }

    #[test]
    fn test_employment_needs_income_for_chosen_kind() {
        let mut nav = Navigator::default();
        nav.start();
        while nav.current_step() != WizardStep::Employment {
            answer_current(&mut nav);
            nav.advance();
        }
        nav.set_field(Field::EmploymentType, "self-employed");
        assert!(nav.income_question().is_some());
        assert_eq!(nav.advance(), StepOutcome::Blocked);

        // A salaried bracket is not a valid self-employed answer
        nav.set_field(Field::Income, "below-50k");
        assert_eq!(nav.advance(), StepOutcome::Blocked);

        nav.set_field(Field::Income, "25l-50l");
        assert_eq!(nav.advance(), StepOutcome::Moved);
    }

    #[test]
    fn test_unknown_employment_type_blocks_advance() {
        let mut nav = Navigator::default();
        nav.start();
        while nav.current_step() != WizardStep::Employment {
            answer_current(&mut nav);
            nav.advance();
        }
        nav.set_field(Field::EmploymentType, "freelance");
        assert_eq!(nav.answers().get(Field::EmploymentType), Some("freelance"));
        assert!(nav.income_question().is_none());
        assert_eq!(nav.advance(), StepOutcome::Blocked);
    }

    #[test]
    fn test_emi_is_optional_and_completes() {
        let mut nav = Navigator::default();
        nav.start();
        while nav.current_step() != WizardStep::Emi {
            answer_current(&mut nav);
            assert_eq!(nav.advance(), StepOutcome::Moved);
        }
        assert_eq!(nav.advance(), StepOutcome::Completed);
        assert!(nav.is_completed());
        assert!(nav.answers().is_complete());
        assert_eq!(nav.answers().emi, None);

        // Terminal: neither direction moves
        assert_eq!(nav.advance(), StepOutcome::Blocked);
        nav.retreat();
        assert!(nav.is_completed());
    }

    #[test]
    fn test_retreat_then_advance_is_idempotent() {
        let mut nav = Navigator::default();
        nav.retreat();
        assert_eq!(nav.step_index(), 0);

        nav.start();
        answer_current(&mut nav);
        nav.advance();
        answer_current(&mut nav);
        nav.advance();
        let step = nav.current_step();
        let answers = nav.answers().clone();

        nav.retreat();
        assert_eq!(nav.current_step(), WizardStep::PropertyValue);
        assert_eq!(nav.advance(), StepOutcome::Moved);
        assert_eq!(nav.current_step(), step);
        assert_eq!(nav.answers(), &answers);
    }

    #[test]
    fn test_progress_fraction() {
        let mut nav = Navigator::default();
        assert_eq!(nav.progress(), 0.0);
        nav.start();
        assert!((nav.progress() - 1.0 / 7.0).abs() < f64::EPSILON);
        while !nav.is_completed() {
            answer_current(&mut nav);
            nav.advance();
        }
        assert_eq!(nav.progress(), 1.0);
    }
}
