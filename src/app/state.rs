use crate::app::event::AppEvent;
use crate::catalog::{bank_by_id, DocumentKind, Question, BANKS, DEFAULT_TENURE_INDEX, DOCUMENTS, TENURE_YEARS};
use crate::config::AppConfig;
use crate::tracking::{Clock, IdSource, RandomIds, StatusTracker, SystemClock};
use crate::upload::{ChosenFile, UploadSimulator};
use crate::wizard::{Field, FormAnswers, Navigator, WizardStep};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Single-line text entry used for the EMI amount and the file path prompt.
#[derive(Debug, Default)]
pub struct InputState {
    pub text: String,
    pub cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn take_text(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }
}

/// Which list has the highlight on the employment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionFocus {
    Primary,
    Income,
}

pub struct WizardScreen {
    pub navigator: Navigator,
    /// Highlighted option in the focused question.
    pub cursor: usize,
    pub focus: QuestionFocus,
    pub emi_input: InputState,
}

impl WizardScreen {
    pub fn new() -> Self {
        Self {
            navigator: Navigator::default(),
            cursor: 0,
            focus: QuestionFocus::Primary,
            emi_input: InputState::new(),
        }
    }

    /// The question the highlight currently moves through.
    pub fn focused_question(&self) -> Option<&Question> {
        match self.focus {
            QuestionFocus::Income => self.navigator.income_question(),
            QuestionFocus::Primary => self.navigator.question(),
        }
    }

    /// Put the highlight on the stored answer for the current step, or the
    /// first option when there is none.
    pub fn sync_cursor(&mut self) {
        let step = self.navigator.current_step();
        let selected = match (self.focus, step.field()) {
            (QuestionFocus::Income, _) => self.navigator.answers().get(Field::Income),
            (QuestionFocus::Primary, Some(field)) => self.navigator.answers().get(field),
            (QuestionFocus::Primary, None) => None,
        };
        self.cursor = match (self.focused_question(), selected) {
            (Some(q), Some(value)) => q.options.iter().position(|c| c.value == value).unwrap_or(0),
            _ => 0,
        };
        if step == WizardStep::Emi {
            self.emi_input.text = self.navigator.answers().emi.clone().unwrap_or_default();
            self.emi_input.move_end();
        }
    }
}

impl Default for WizardScreen {
    fn default() -> Self {
        Self::new()
    }
}

pub struct OffersScreen {
    pub answers: FormAnswers,
    pub selected: usize,
    pub tenure_index: usize,
}

impl OffersScreen {
    pub fn new(answers: FormAnswers) -> Self {
        Self {
            answers,
            selected: 0,
            tenure_index: DEFAULT_TENURE_INDEX,
        }
    }

    pub fn tenure_years(&self) -> u32 {
        TENURE_YEARS[self.tenure_index % TENURE_YEARS.len()]
    }
}

pub struct DocumentsScreen {
    pub answers: FormAnswers,
    pub bank_id: &'static str,
    pub simulator: UploadSimulator,
    pub selected: usize,
    /// Open while the borrower is typing a file path.
    pub path_prompt: Option<InputState>,
}

impl DocumentsScreen {
    pub fn selected_kind(&self) -> Option<DocumentKind> {
        self.simulator.catalogue().get(self.selected).map(|d| d.kind)
    }
}

pub struct TrackingScreen {
    pub tracker: StatusTracker,
}

/// The visible stage of the flow. Replacing the screen drops everything the
/// previous one owned, timers included.
pub enum Screen {
    Wizard(WizardScreen),
    Offers(OffersScreen),
    Documents(DocumentsScreen),
    Tracking(TrackingScreen),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Wizard(_) => "wizard",
            Screen::Offers(_) => "offers",
            Screen::Documents(_) => "documents",
            Screen::Tracking(_) => "tracking",
        }
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub screen: Screen,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
    pub clock: Arc<dyn Clock>,
    pub ids: Box<dyn IdSource>,
    pub should_quit: bool,
    pub dirty: bool,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self::with_sources(config, event_tx, Arc::new(SystemClock), Box::new(RandomIds))
    }

    pub fn with_sources(
        config: AppConfig,
        event_tx: mpsc::UnboundedSender<AppEvent>,
        clock: Arc<dyn Clock>,
        ids: Box<dyn IdSource>,
    ) -> Self {
        Self {
            config,
            screen: Screen::Wizard(WizardScreen::new()),
            event_tx,
            clock,
            ids,
            should_quit: false,
            dirty: true,
            status_message: None,
        }
    }

    fn set_screen(&mut self, screen: Screen) {
        tracing::debug!(from = self.screen.name(), to = screen.name(), "screen changed");
        self.screen = screen;
        self.status_message = None;
        self.dirty = true;
    }

    pub fn show_offers(&mut self, answers: FormAnswers) {
        self.set_screen(Screen::Offers(OffersScreen::new(answers)));
    }

    /// Open the document checklist for the chosen bank with a fresh simulator.
    pub fn show_documents(&mut self, answers: FormAnswers, bank_id: &'static str) {
        let simulator = UploadSimulator::new(
            self.config.upload.clone(),
            self.config.submission.clone(),
            DOCUMENTS,
            self.event_tx.clone(),
        );
        tracing::info!(bank = bank_id, "offer applied");
        self.set_screen(Screen::Documents(DocumentsScreen {
            answers,
            bank_id,
            simulator,
            selected: 0,
            path_prompt: None,
        }));
    }

    /// Leave the document checklist for the offer list. The simulator and all
    /// of its uploads are dropped.
    pub fn back_to_offers(&mut self) {
        let Screen::Documents(docs) = &mut self.screen else {
            return;
        };
        let answers = std::mem::take(&mut docs.answers);
        let selected = BANKS.iter().position(|b| b.id == docs.bank_id).unwrap_or(0);
        self.show_offers(answers);
        if let Screen::Offers(offers) = &mut self.screen {
            offers.selected = selected;
        }
    }

    pub fn show_tracking(&mut self, bank_id: &str) {
        let tracker = StatusTracker::begin(
            bank_id,
            &self.config.tracking,
            self.clock.clone(),
            self.ids.as_mut(),
            self.event_tx.clone(),
        );
        self.set_screen(Screen::Tracking(TrackingScreen { tracker }));
    }

    /// Apply the result of reading a picked file to the slot for `kind`.
    pub fn file_chosen(&mut self, kind: DocumentKind, path: &str, file: anyhow::Result<ChosenFile>) {
        let Screen::Documents(docs) = &mut self.screen else {
            tracing::debug!(%kind, "file chosen after leaving documents, ignored");
            return;
        };
        match file {
            Ok(file) => {
                if let Err(e) = docs.simulator.choose_file(kind, file) {
                    self.status_message = Some(e.to_string());
                }
            }
            Err(e) => {
                let message = format!("{:#}", e);
                docs.simulator.record_failure(kind, path, message.clone());
                self.status_message = Some(message);
            }
        }
        self.dirty = true;
    }

    pub fn selected_bank_name(&self) -> Option<&'static str> {
        match &self.screen {
            Screen::Offers(o) => BANKS.get(o.selected).map(|b| b.name),
            Screen::Documents(d) => bank_by_id(d.bank_id).map(|b| b.name),
            _ => None,
        }
    }
}
