use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::*;
use crate::catalog::{BANKS, TENURE_YEARS};
use crate::tracking::ExternalAction;
use crate::upload::{SubmissionState, TickOutcome};
use crate::wizard::{Field, StepOutcome, WizardStep};
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Actions available on the tracking screen whatever the stage.
const SCREEN_ACTIONS: [ExternalAction; 2] = [ExternalAction::ContactSupport, ExternalAction::ScheduleCall];

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent)
        }
        AppEvent::UploadTick { upload_id } => {
            if let Screen::Documents(docs) = &mut state.screen {
                if docs.simulator.tick(upload_id) != TickOutcome::Ignored {
                    state.dirty = true;
                }
            }
            vec![]
        }
        AppEvent::SubmissionDelivered => {
            let bank_id = match &mut state.screen {
                Screen::Documents(docs) => docs.simulator.complete_submission().then_some(docs.bank_id),
                _ => None,
            };
            if let Some(bank_id) = bank_id {
                state.show_tracking(bank_id);
            }
            vec![]
        }
        AppEvent::StatusAdvance => {
            if let Screen::Tracking(tracking) = &mut state.screen {
                if tracking.tracker.auto_advance() {
                    state.dirty = true;
                }
            }
            vec![]
        }
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, key),
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

/// True while a text field has the keyboard, so letters are typed rather
/// than treated as shortcuts.
fn editing_text(state: &AppState) -> bool {
    match &state.screen {
        Screen::Wizard(w) => w.navigator.current_step() == WizardStep::Emi,
        Screen::Documents(d) => d.path_prompt.is_some(),
        _ => false,
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }
    if key.code == KeyCode::Char('q') && !editing_text(state) {
        return vec![Action::Quit];
    }

    match state.screen {
        Screen::Wizard(_) => handle_wizard_key(state, key),
        Screen::Offers(_) => handle_offers_key(state, key),
        Screen::Documents(_) => handle_documents_key(state, key),
        Screen::Tracking(_) => handle_tracking_key(state, key),
    }
}

fn handle_wizard_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let Screen::Wizard(wizard) = &mut state.screen else {
        return vec![];
    };
    let step = wizard.navigator.current_step();

    if step == WizardStep::Landing {
        match key.code {
            KeyCode::Enter => wizard.navigator.start(),
            KeyCode::Char('c') => wizard.navigator.resume(),
            _ => return vec![],
        }
        wizard.sync_cursor();
        return vec![];
    }

    if step == WizardStep::Emi {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => wizard.emi_input.insert_char(c),
            KeyCode::Backspace => wizard.emi_input.delete_back(),
            KeyCode::Delete => wizard.emi_input.delete_forward(),
            KeyCode::Left => wizard.emi_input.move_left(),
            KeyCode::Right => wizard.emi_input.move_right(),
            KeyCode::Home => wizard.emi_input.move_home(),
            KeyCode::End => wizard.emi_input.move_end(),
            KeyCode::Esc => {
                let text = wizard.emi_input.take_text();
                wizard.navigator.set_field(Field::Emi, &text);
                wizard.navigator.retreat();
                wizard.sync_cursor();
            }
            KeyCode::Enter => {
                let text = wizard.emi_input.text.clone();
                wizard.navigator.set_field(Field::Emi, &text);
                return continue_wizard(state);
            }
            _ => {}
        }
        return vec![];
    }

    let option_count = wizard.focused_question().map(|q| q.options.len()).unwrap_or(0);
    match key.code {
        KeyCode::Up => {
            wizard.cursor = wizard.cursor.saturating_sub(1);
        }
        KeyCode::Down => {
            if wizard.cursor + 1 < option_count {
                wizard.cursor += 1;
            }
        }
        KeyCode::Char(' ') => select_highlighted(wizard),
        KeyCode::Enter => {
            select_highlighted(wizard);
            // On the employment step Enter first moves on to the income list
            if step == WizardStep::Employment && wizard.focus == QuestionFocus::Primary {
                wizard.focus = QuestionFocus::Income;
                wizard.sync_cursor();
                return vec![];
            }
            return continue_wizard(state);
        }
        KeyCode::Tab if step == WizardStep::Employment => {
            if wizard.focus == QuestionFocus::Primary && wizard.navigator.income_question().is_some() {
                wizard.focus = QuestionFocus::Income;
            } else {
                wizard.focus = QuestionFocus::Primary;
            }
            wizard.sync_cursor();
        }
        KeyCode::Esc | KeyCode::Backspace => {
            if wizard.focus == QuestionFocus::Income {
                wizard.focus = QuestionFocus::Primary;
            } else {
                wizard.navigator.retreat();
            }
            wizard.sync_cursor();
        }
        _ => {}
    }
    vec![]
}

/// Write the highlighted option into the field the focused question answers.
fn select_highlighted(wizard: &mut WizardScreen) {
    let field = match wizard.focus {
        QuestionFocus::Income => Some(Field::Income),
        QuestionFocus::Primary => wizard.navigator.current_step().field(),
    };
    let value = wizard
        .focused_question()
        .and_then(|q| q.options.get(wizard.cursor))
        .map(|c| c.value);
    if let (Some(field), Some(value)) = (field, value) {
        wizard.navigator.set_field(field, value);
    }
}

fn continue_wizard(state: &mut AppState) -> Vec<Action> {
    let Screen::Wizard(wizard) = &mut state.screen else {
        return vec![];
    };
    match wizard.navigator.advance() {
        StepOutcome::Moved => {
            wizard.focus = QuestionFocus::Primary;
            wizard.sync_cursor();
            state.status_message = None;
        }
        StepOutcome::Blocked => {
            state.status_message = Some("Please choose an option to continue".to_string());
        }
        StepOutcome::Completed => {
            let answers = std::mem::take(&mut wizard.navigator).into_answers();
            state.show_offers(answers);
        }
    }
    vec![]
}

fn handle_offers_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let Screen::Offers(offers) = &mut state.screen else {
        return vec![];
    };
    match key.code {
        KeyCode::Up => offers.selected = offers.selected.saturating_sub(1),
        KeyCode::Down => {
            if offers.selected + 1 < BANKS.len() {
                offers.selected += 1;
            }
        }
        KeyCode::Char('t') => {
            offers.tenure_index = (offers.tenure_index + 1) % TENURE_YEARS.len();
        }
        KeyCode::Enter => {
            if let Some(bank) = BANKS.get(offers.selected) {
                let answers = std::mem::take(&mut offers.answers);
                state.show_documents(answers, bank.id);
            }
        }
        _ => {}
    }
    vec![]
}

fn handle_documents_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let Screen::Documents(docs) = &mut state.screen else {
        return vec![];
    };

    if docs.simulator.submission() != SubmissionState::Editing {
        return vec![];
    }

    if let Some(prompt) = docs.path_prompt.as_mut() {
        match key.code {
            KeyCode::Esc => docs.path_prompt = None,
            KeyCode::Enter => {
                let path = prompt.take_text();
                docs.path_prompt = None;
                let path = path.trim().to_string();
                match docs.selected_kind() {
                    Some(kind) if !path.is_empty() => return vec![Action::ChooseFile { kind, path }],
                    _ => {}
                }
            }
            KeyCode::Backspace => prompt.delete_back(),
            KeyCode::Delete => prompt.delete_forward(),
            KeyCode::Left => prompt.move_left(),
            KeyCode::Right => prompt.move_right(),
            KeyCode::Home => prompt.move_home(),
            KeyCode::End => prompt.move_end(),
            KeyCode::Char(c) => prompt.insert_char(c),
            _ => {}
        }
        return vec![];
    }

    let total = docs.simulator.catalogue().len();
    match key.code {
        KeyCode::Up => docs.selected = docs.selected.saturating_sub(1),
        KeyCode::Down => {
            if docs.selected + 1 < total {
                docs.selected += 1;
            }
        }
        KeyCode::Enter => docs.path_prompt = Some(InputState::new()),
        KeyCode::Char('d') => {
            if let Some(kind) = docs.selected_kind() {
                docs.simulator.remove_slot(kind);
            }
        }
        KeyCode::Char('x') => docs.simulator.clear(),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            docs.simulator.dismiss_error(index);
        }
        KeyCode::Char('0') => docs.simulator.dismiss_all_errors(),
        KeyCode::Char('s') => match docs.simulator.submit() {
            Ok(()) => state.status_message = Some("Submitting your application...".to_string()),
            Err(e) => state.status_message = Some(e.to_string()),
        },
        KeyCode::Esc => state.back_to_offers(),
        _ => {}
    }
    vec![]
}

fn handle_tracking_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let Screen::Tracking(tracking) = &mut state.screen else {
        return vec![];
    };
    let KeyCode::Char(c) = key.code else {
        return vec![];
    };

    if c == 'a' {
        match tracking.tracker.advance_stage() {
            Ok(stage) => state.status_message = Some(format!("{} completed", stage.title())),
            Err(e) => state.status_message = Some(e.to_string()),
        }
        return vec![];
    }

    let offered = tracking
        .tracker
        .stages()
        .iter()
        .flat_map(|s| s.actions.iter().copied())
        .chain(SCREEN_ACTIONS)
        .find(|a| a.key() == c);
    match offered {
        Some(action) => vec![Action::External(action)],
        None => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DocumentKind, DOCUMENTS};
    use crate::config::AppConfig;
    use crate::tracking::clock::{FixedClock, FixedIds};
    use crate::tracking::Stage;
    use crate::upload::{ChosenFile, UploadStatus};
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn make_state() -> (AppState, UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        let state = AppState::with_sources(
            AppConfig::default(),
            tx,
            Arc::new(clock),
            Box::new(FixedIds("APP123456")),
        );
        (state, rx)
    }

    fn press(state: &mut AppState, code: KeyCode) -> Vec<Action> {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        handle_event(state, AppEvent::Terminal(CEvent::Key(key)))
    }

    fn wizard(state: &AppState) -> &WizardScreen {
        match &state.screen {
            Screen::Wizard(w) => w,
            _ => panic!("expected wizard screen, got {}", state.screen.name()),
        }
    }

    fn documents(state: &mut AppState) -> &mut DocumentsScreen {
        match &mut state.screen {
            Screen::Documents(d) => d,
            _ => panic!("expected documents screen"),
        }
    }

    /// Answer every question with its first option.
    fn complete_wizard(state: &mut AppState) {
        press(state, KeyCode::Enter);
        while matches!(state.screen, Screen::Wizard(_)) {
            press(state, KeyCode::Enter);
        }
    }

    fn open_documents(state: &mut AppState) {
        complete_wizard(state);
        press(state, KeyCode::Down);
        press(state, KeyCode::Enter);
        assert!(matches!(state.screen, Screen::Documents(_)));
    }

    #[test]
    fn test_ctrl_c_and_q_quit() {
        let (mut state, _rx) = make_state();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let actions = handle_event(&mut state, AppEvent::Terminal(CEvent::Key(key)));
        assert_eq!(actions, vec![Action::Quit]);
        assert_eq!(press(&mut state, KeyCode::Char('q')), vec![Action::Quit]);
    }

    #[test]
    fn test_landing_resume_key() {
        let (mut state, _rx) = make_state();
        press(&mut state, KeyCode::Char('c'));
        assert_eq!(wizard(&state).navigator.current_step(), WizardStep::PropertyFinalized);
    }

    #[test]
    fn test_space_selects_without_advancing() {
        let (mut state, _rx) = make_state();
        press(&mut state, KeyCode::Enter);
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Char(' '));
        let w = wizard(&state);
        assert_eq!(w.navigator.current_step(), WizardStep::PropertyFinalized);
        assert_eq!(w.navigator.answers().get(Field::PropertyFinalized), Some("no"));

        press(&mut state, KeyCode::Enter);
        assert_eq!(wizard(&state).navigator.current_step(), WizardStep::PropertyValue);

        // Going back highlights the stored answer
        press(&mut state, KeyCode::Esc);
        assert_eq!(wizard(&state).cursor, 1);
    }

    #[test]
    fn test_employment_enter_moves_to_income() {
        let (mut state, _rx) = make_state();
        press(&mut state, KeyCode::Enter);
        while wizard(&state).navigator.current_step() != WizardStep::Employment {
            press(&mut state, KeyCode::Enter);
        }
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Enter);
        let w = wizard(&state);
        assert_eq!(w.focus, QuestionFocus::Income);
        assert_eq!(w.navigator.answers().get(Field::EmploymentType), Some("self-employed"));
        assert_eq!(w.navigator.current_step(), WizardStep::Employment);

        press(&mut state, KeyCode::Enter);
        let w = wizard(&state);
        assert_eq!(w.navigator.current_step(), WizardStep::Emi);
        assert_eq!(w.navigator.answers().get(Field::Income), Some("below-25l"));
    }

    #[test]
    fn test_emi_accepts_digits_only() {
        let (mut state, _rx) = make_state();
        press(&mut state, KeyCode::Enter);
        while wizard(&state).navigator.current_step() != WizardStep::Emi {
            press(&mut state, KeyCode::Enter);
        }
        for c in ['1', 'x', '5', '0', 'q', '0'] {
            press(&mut state, KeyCode::Char(c));
        }
        assert_eq!(wizard(&state).emi_input.text, "1500");
        assert!(!state.should_quit);

        press(&mut state, KeyCode::Enter);
        match &state.screen {
            Screen::Offers(o) => {
                assert!(o.answers.is_complete());
                assert_eq!(o.answers.emi.as_deref(), Some("1500"));
            }
            _ => panic!("expected offers"),
        }
    }

    #[test]
    fn test_offers_tenure_cycles() {
        let (mut state, _rx) = make_state();
        complete_wizard(&mut state);
        let Screen::Offers(o) = &state.screen else { panic!("expected offers") };
        assert_eq!(o.tenure_years(), 25);
        press(&mut state, KeyCode::Char('t'));
        press(&mut state, KeyCode::Char('t'));
        let Screen::Offers(o) = &state.screen else { panic!("expected offers") };
        assert_eq!(o.tenure_years(), 10);
    }

    #[tokio::test]
    async fn test_path_prompt_emits_choose_file() {
        let (mut state, _rx) = make_state();
        open_documents(&mut state);
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Enter);
        for c in "~/statement.pdf".chars() {
            press(&mut state, KeyCode::Char(c));
        }
        let actions = press(&mut state, KeyCode::Enter);
        assert_eq!(
            actions,
            vec![Action::ChooseFile {
                kind: DocumentKind::Bank,
                path: "~/statement.pdf".to_string()
            }]
        );
        assert!(documents(&mut state).path_prompt.is_none());
    }

    #[tokio::test]
    async fn test_submit_blocked_until_documents_uploaded() {
        let (mut state, _rx) = make_state();
        open_documents(&mut state);
        press(&mut state, KeyCode::Char('s'));
        assert_eq!(documents(&mut state).simulator.submission(), SubmissionState::Editing);
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("missing required documents")));
    }

    #[tokio::test]
    async fn test_rejected_file_listed_and_dismissed() {
        let (mut state, _rx) = make_state();
        open_documents(&mut state);
        state.file_chosen(DocumentKind::Income, "a.exe", Ok(ChosenFile::new("a.exe", 10)));
        state.file_chosen(DocumentKind::Income, "b.exe", Ok(ChosenFile::new("b.exe", 10)));
        assert_eq!(documents(&mut state).simulator.errors().len(), 2);
        assert!(documents(&mut state).simulator.slot(DocumentKind::Income).is_none());

        press(&mut state, KeyCode::Char('2'));
        let errors = documents(&mut state).simulator.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "a.exe is not a supported file type");
    }

    #[tokio::test]
    async fn test_errors_past_ninth_dismissed_all_at_once() {
        let (mut state, _rx) = make_state();
        open_documents(&mut state);
        for i in 0..12 {
            let name = format!("scan{}.exe", i);
            state.file_chosen(DocumentKind::Income, &name, Ok(ChosenFile::new(&name, 10)));
        }
        assert_eq!(documents(&mut state).simulator.errors().len(), 12);

        press(&mut state, KeyCode::Char('0'));
        assert!(documents(&mut state).simulator.errors().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_file_marks_slot_failed() {
        let (mut state, _rx) = make_state();
        open_documents(&mut state);
        state.file_chosen(DocumentKind::Property, "/nope.pdf", Err(anyhow::anyhow!("not found")));
        let slot = documents(&mut state).simulator.slot(DocumentKind::Property).cloned().unwrap();
        assert_eq!(slot.status, UploadStatus::Error);
        assert_eq!(slot.file_name, "nope.pdf");
        assert_eq!(slot.error.as_deref(), Some("not found"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_to_offers_drops_uploads() {
        let (mut state, mut rx) = make_state();
        open_documents(&mut state);
        state.file_chosen(DocumentKind::Income, "slip.pdf", Ok(ChosenFile::new("slip.pdf", 10)));
        press(&mut state, KeyCode::Esc);
        let Screen::Offers(o) = &state.screen else { panic!("expected offers") };
        assert_eq!(o.selected, 1);
        assert!(o.answers.is_complete());

        // The ticker went with the simulator
        let waited = tokio::time::timeout(std::time::Duration::from_secs(5), rx.recv()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_application() {
        let (mut state, mut rx) = make_state();

        complete_wizard(&mut state);
        let Screen::Offers(o) = &state.screen else { panic!("expected offers") };
        assert!(o.answers.is_complete());
        assert_eq!(o.answers.get(Field::PropertyFinalized), Some("yes"));
        assert_eq!(o.answers.get(Field::Income), Some("below-50k"));

        press(&mut state, KeyCode::Enter);
        assert_eq!(documents(&mut state).bank_id, BANKS[0].id);

        for doc in DOCUMENTS {
            let name = format!("{}.pdf", doc.kind);
            state.file_chosen(doc.kind, &name, Ok(ChosenFile::new(&name, 1024)));
        }
        while !documents(&mut state).simulator.required_outstanding().is_empty() {
            let event = rx.recv().await.unwrap();
            handle_event(&mut state, event);
        }
        assert!(documents(&mut state)
            .simulator
            .slots()
            .all(|s| s.status == UploadStatus::Success && s.progress == 100));
        assert_eq!(documents(&mut state).simulator.active_tickers(), 0);

        press(&mut state, KeyCode::Char('s'));
        assert_eq!(documents(&mut state).simulator.submission(), SubmissionState::Submitting);
        // Input is ignored while submitting
        press(&mut state, KeyCode::Esc);
        assert!(matches!(state.screen, Screen::Documents(_)));

        while matches!(state.screen, Screen::Documents(_)) {
            let event = rx.recv().await.unwrap();
            handle_event(&mut state, event);
        }
        let Screen::Tracking(t) = &state.screen else { panic!("expected tracking") };
        assert_eq!(t.tracker.stage_index(), 0);
        assert_eq!(t.tracker.application_id(), "APP123456");
        assert_eq!(t.tracker.bank_name(), BANKS[0].legal_name);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tracking_keys() {
        let (mut state, mut rx) = make_state();
        state.show_tracking("sbi");

        press(&mut state, KeyCode::Char('a'));
        assert_eq!(
            state.status_message.as_deref(),
            Some("the bank is still reviewing your application")
        );
        // Approval letter is not offered before approval
        assert!(press(&mut state, KeyCode::Char('l')).is_empty());
        assert_eq!(
            press(&mut state, KeyCode::Char('h')),
            vec![Action::External(ExternalAction::ContactSupport)]
        );

        while let Screen::Tracking(t) = &state.screen {
            if !t.tracker.is_auto_advancing() {
                break;
            }
            let event = rx.recv().await.unwrap();
            handle_event(&mut state, event);
        }
        assert_eq!(
            press(&mut state, KeyCode::Char('l')),
            vec![Action::External(ExternalAction::DownloadApprovalLetter)]
        );

        press(&mut state, KeyCode::Char('a'));
        press(&mut state, KeyCode::Char('a'));
        let Screen::Tracking(t) = &state.screen else { panic!("expected tracking") };
        assert_eq!(t.tracker.current_stage(), Stage::Disbursement);
        assert_eq!(state.status_message.as_deref(), Some("Loan Disbursement completed"));
    }
}
