use ratatui::widgets::{ListState, TableState};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::assistant::{self, Message};
use crate::config::Config;
use crate::store::{Candidate, CandidateStatus, FixtureStore, InterviewRound};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Candidates,
    Schedule,
    Interview,
    Reports,
    Analysis,
}

impl Screen {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dashboard" => Some(Screen::Dashboard),
            "candidates" => Some(Screen::Candidates),
            "schedule" => Some(Screen::Schedule),
            "interview" => Some(Screen::Interview),
            "reports" => Some(Screen::Reports),
            "analysis" => Some(Screen::Analysis),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Screen::Dashboard => "dashboard",
            Screen::Candidates => "candidates",
            Screen::Schedule => "schedule",
            Screen::Interview => "interview",
            Screen::Reports => "reports",
            Screen::Analysis => "analysis",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleFocus {
    Upcoming,
    Completed,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub screen: Screen,
    pub input_mode: InputMode,

    // Candidate list state
    pub candidate_filter: String,
    pub status_filter: Option<CandidateStatus>,
    pub candidate_state: TableState,

    // Schedule state
    pub schedule_focus: ScheduleFocus,
    pub upcoming_state: ListState,
    pub completed_state: ListState,

    // Interview screen (opened from the schedule)
    pub active_round_id: Option<String>,
    pub question_scroll: u16,

    // Reports
    pub report_state: TableState,

    // Assistant panel (chat transcript lives only while the panel is open)
    pub show_assistant: bool,
    pub assistant_input: String,
    pub assistant_cursor: usize,
    pub messages: Vec<Message>,
    pub composing: bool,
    pub reply_task: Option<JoinHandle<String>>,
    pub chat_scroll: u16,
    pub chat_height: u16,
    pub chat_width: u16,
    pub animation_frame: u8,
    pub reply_delay: Duration,

    // Data
    pub store: FixtureStore,
}

impl App {
    pub fn new(store: FixtureStore, config: &Config) -> Self {
        let screen = config
            .start_screen
            .as_deref()
            .and_then(Screen::from_name)
            .unwrap_or(Screen::Dashboard);

        let mut candidate_state = TableState::default();
        if !store.candidates().is_empty() {
            candidate_state.select(Some(0));
        }

        let mut upcoming_state = ListState::default();
        if !store.upcoming_rounds().is_empty() {
            upcoming_state.select(Some(0));
        }

        let mut completed_state = ListState::default();
        if !store.completed_rounds().is_empty() {
            completed_state.select(Some(0));
        }

        let mut report_state = TableState::default();
        if !store.completed_rounds().is_empty() {
            report_state.select(Some(0));
        }

        Self {
            should_quit: false,
            screen,
            input_mode: InputMode::Normal,

            candidate_filter: String::new(),
            status_filter: None,
            candidate_state,

            schedule_focus: ScheduleFocus::Upcoming,
            upcoming_state,
            completed_state,

            active_round_id: None,
            question_scroll: 0,

            report_state,

            show_assistant: false,
            assistant_input: String::new(),
            assistant_cursor: 0,
            messages: Vec::new(),
            composing: false,
            reply_task: None,
            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,
            animation_frame: 0,
            reply_delay: config.reply_delay(),

            store,
        }
    }

    // Candidate list helpers

    pub fn filtered_candidates(&self) -> Vec<&Candidate> {
        self.store
            .search_candidates(&self.candidate_filter, self.status_filter)
    }

    pub fn selected_candidate(&self) -> Option<&Candidate> {
        self.candidate_state
            .selected()
            .and_then(|i| self.filtered_candidates().get(i).copied())
    }

    pub fn candidate_nav_down(&mut self) {
        let len = self.filtered_candidates().len();
        if len > 0 {
            let i = self.candidate_state.selected().unwrap_or(0);
            self.candidate_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn candidate_nav_up(&mut self) {
        let i = self.candidate_state.selected().unwrap_or(0);
        self.candidate_state.select(Some(i.saturating_sub(1)));
    }

    pub fn candidate_nav_first(&mut self) {
        if !self.filtered_candidates().is_empty() {
            self.candidate_state.select(Some(0));
        }
    }

    pub fn candidate_nav_last(&mut self) {
        let len = self.filtered_candidates().len();
        if len > 0 {
            self.candidate_state.select(Some(len - 1));
        }
    }

    /// Reset the selection after the filter text or status changed.
    pub fn reset_candidate_selection(&mut self) {
        if self.filtered_candidates().is_empty() {
            self.candidate_state.select(None);
        } else {
            self.candidate_state.select(Some(0));
        }
    }

    pub fn cycle_status_filter(&mut self) {
        self.status_filter = match self.status_filter {
            None => Some(CandidateStatus::ALL[0]),
            Some(current) => CandidateStatus::ALL
                .iter()
                .position(|&s| s == current)
                .and_then(|i| CandidateStatus::ALL.get(i + 1))
                .copied(),
        };
        self.reset_candidate_selection();
    }

    pub fn clear_candidate_filters(&mut self) {
        self.candidate_filter.clear();
        self.status_filter = None;
        self.reset_candidate_selection();
    }

    // Schedule helpers

    pub fn schedule_nav_down(&mut self) {
        match self.schedule_focus {
            ScheduleFocus::Upcoming => {
                let len = self.store.upcoming_rounds().len();
                if len > 0 {
                    let i = self.upcoming_state.selected().unwrap_or(0);
                    self.upcoming_state.select(Some((i + 1).min(len - 1)));
                }
            }
            ScheduleFocus::Completed => {
                let len = self.store.completed_rounds().len();
                if len > 0 {
                    let i = self.completed_state.selected().unwrap_or(0);
                    self.completed_state.select(Some((i + 1).min(len - 1)));
                }
            }
        }
    }

    pub fn schedule_nav_up(&mut self) {
        match self.schedule_focus {
            ScheduleFocus::Upcoming => {
                let i = self.upcoming_state.selected().unwrap_or(0);
                self.upcoming_state.select(Some(i.saturating_sub(1)));
            }
            ScheduleFocus::Completed => {
                let i = self.completed_state.selected().unwrap_or(0);
                self.completed_state.select(Some(i.saturating_sub(1)));
            }
        }
    }

    pub fn toggle_schedule_focus(&mut self) {
        self.schedule_focus = match self.schedule_focus {
            ScheduleFocus::Upcoming => ScheduleFocus::Completed,
            ScheduleFocus::Completed => ScheduleFocus::Upcoming,
        };
    }

    /// The round under the cursor in the focused schedule list.
    pub fn selected_round(&self) -> Option<&InterviewRound> {
        match self.schedule_focus {
            ScheduleFocus::Upcoming => self
                .upcoming_state
                .selected()
                .and_then(|i| self.store.upcoming_rounds().get(i).copied()),
            ScheduleFocus::Completed => self
                .completed_state
                .selected()
                .and_then(|i| self.store.completed_rounds().get(i).copied()),
        }
    }

    /// Open the selected round in the interview screen.
    pub fn open_selected_round(&mut self) {
        if let Some(id) = self.selected_round().map(|r| r.id.clone()) {
            self.active_round_id = Some(id);
            self.question_scroll = 0;
            self.screen = Screen::Interview;
        }
    }

    pub fn active_round(&self) -> Option<&InterviewRound> {
        self.active_round_id
            .as_deref()
            .and_then(|id| self.store.round(id))
    }

    // Reports

    pub fn report_nav_down(&mut self) {
        let len = self.store.completed_rounds().len();
        if len > 0 {
            let i = self.report_state.selected().unwrap_or(0);
            self.report_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn report_nav_up(&mut self) {
        let i = self.report_state.selected().unwrap_or(0);
        self.report_state.select(Some(i.saturating_sub(1)));
    }

    // Assistant panel

    pub fn open_assistant(&mut self) {
        self.show_assistant = true;
    }

    /// Close the panel: abort any pending reply and discard the transcript.
    pub fn close_assistant(&mut self) {
        if let Some(task) = self.reply_task.take() {
            task.abort();
        }
        self.composing = false;
        self.messages.clear();
        self.assistant_input.clear();
        self.assistant_cursor = 0;
        self.chat_scroll = 0;
        self.show_assistant = false;
    }

    /// Append the user message and start the simulated reply. No-op for
    /// whitespace-only input or while a reply is already composing.
    pub fn submit_assistant_input(&mut self) {
        if self.composing {
            return;
        }

        let text = self.assistant_input.trim().to_string();
        if text.is_empty() {
            return;
        }

        self.messages.push(Message::user(text.clone()));
        self.assistant_input.clear();
        self.assistant_cursor = 0;
        self.composing = true;

        // Scroll so the thinking indicator is visible
        self.scroll_chat_to_bottom();

        // Simulated latency before the canned reply lands
        let delay = self.reply_delay;
        self.reply_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            assistant::select_reply(&text).to_string()
        }));
    }

    /// Called from the event loop on every tick; appends the reply once the
    /// simulated delay has elapsed.
    pub async fn poll_assistant_reply(&mut self) {
        let finished = self
            .reply_task
            .as_ref()
            .map(|task| task.is_finished())
            .unwrap_or(false);
        if !finished {
            return;
        }

        if let Some(task) = self.reply_task.take() {
            if let Ok(text) = task.await {
                self.messages.push(Message::assistant(text));
                self.scroll_chat_to_bottom();
            }
            self.composing = false;
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.composing {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    /// Scroll the transcript so the newest entry (or the thinking indicator)
    /// is visible.
    pub fn scroll_chat_to_bottom(&mut self) {
        // Use actual chat width for wrap calculation, default to 50 if not set
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total_lines: u16 = 0;

        for msg in &self.messages {
            total_lines += 1; // Role line
            for line in msg.text.lines() {
                // Character count, not byte length, for proper UTF-8 handling
                let char_count = line.chars().count();
                if char_count == 0 {
                    total_lines += 1;
                } else {
                    total_lines += ((char_count / wrap_width) + 1) as u16;
                }
            }
            total_lines += 1; // Blank line after message
        }

        if self.composing {
            total_lines += 2; // Role line + thinking indicator
        }

        let visible_height = if self.chat_height > 0 {
            self.chat_height
        } else {
            20
        };

        self.chat_scroll = total_lines.saturating_sub(visible_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::Role;

    fn test_app(reply_delay_ms: u64) -> App {
        let store = FixtureStore::load_embedded().expect("bundled fixtures must parse");
        let config = Config {
            reply_delay_ms: Some(reply_delay_ms),
            start_screen: None,
        };
        App::new(store, &config)
    }

    async fn wait_for_reply(app: &mut App) {
        for _ in 0..200 {
            tokio::time::sleep(Duration::from_millis(5)).await;
            app.poll_assistant_reply().await;
            if !app.composing {
                return;
            }
        }
        panic!("assistant reply never resolved");
    }

    #[tokio::test]
    async fn whitespace_submission_is_ignored() {
        let mut app = test_app(10);
        app.open_assistant();

        app.assistant_input = "   \t ".to_string();
        app.submit_assistant_input();

        assert!(app.messages.is_empty());
        assert!(!app.composing);
        assert!(app.reply_task.is_none());
    }

    #[tokio::test]
    async fn submission_appends_user_then_assistant() {
        let mut app = test_app(10);
        app.open_assistant();

        app.assistant_input = "本月候选人质量怎么样".to_string();
        app.submit_assistant_input();

        assert!(app.composing);
        assert_eq!(app.messages.len(), 1);
        assert_eq!(app.messages[0].role, Role::User);
        assert!(app.assistant_input.is_empty());

        wait_for_reply(&mut app).await;

        assert_eq!(app.messages.len(), 2);
        assert_eq!(app.messages[0].role, Role::User);
        assert_eq!(app.messages[1].role, Role::Assistant);
        assert!(app.messages[1]
            .text
            .starts_with("根据AI分析，当前候选人整体质量评分为7.8/10"));
        assert!(app.messages[1].timestamp >= app.messages[0].timestamp);
    }

    #[tokio::test]
    async fn submissions_while_composing_are_rejected() {
        let mut app = test_app(50);
        app.open_assistant();

        app.assistant_input = "面试通过率怎么样".to_string();
        app.submit_assistant_input();
        assert_eq!(app.messages.len(), 1);

        // Guard holds until the pending reply resolves
        app.assistant_input = "再问一次".to_string();
        app.submit_assistant_input();
        assert_eq!(app.messages.len(), 1);
        assert_eq!(app.assistant_input, "再问一次");

        wait_for_reply(&mut app).await;
        assert_eq!(app.messages.len(), 2);

        // After resolution the guard is released
        app.submit_assistant_input();
        assert_eq!(app.messages.len(), 3);
        assert!(app.composing);
    }

    #[tokio::test]
    async fn closing_the_panel_discards_transcript_and_pending_reply() {
        let mut app = test_app(10_000);
        app.open_assistant();

        app.assistant_input = "推荐几个人".to_string();
        app.submit_assistant_input();
        assert!(app.composing);

        app.close_assistant();

        assert!(!app.show_assistant);
        assert!(!app.composing);
        assert!(app.messages.is_empty());
        assert!(app.reply_task.is_none());

        // A later poll must not resurrect the aborted reply
        app.poll_assistant_reply().await;
        assert!(app.messages.is_empty());
    }

    #[tokio::test]
    async fn candidate_filter_navigation_stays_in_bounds() {
        let mut app = test_app(10);

        app.candidate_filter = "后端".to_string();
        app.reset_candidate_selection();
        let len = app.filtered_candidates().len();
        assert_eq!(len, 3);

        for _ in 0..10 {
            app.candidate_nav_down();
        }
        assert_eq!(app.candidate_state.selected(), Some(len - 1));

        app.candidate_nav_first();
        assert_eq!(app.candidate_state.selected(), Some(0));
    }

    #[tokio::test]
    async fn status_filter_cycles_back_to_none() {
        let mut app = test_app(10);
        assert!(app.status_filter.is_none());

        for _ in 0..CandidateStatus::ALL.len() {
            app.cycle_status_filter();
            assert!(app.status_filter.is_some());
        }
        app.cycle_status_filter();
        assert!(app.status_filter.is_none());
    }

    #[tokio::test]
    async fn opening_a_round_switches_to_the_interview_screen() {
        let mut app = test_app(10);
        app.screen = Screen::Schedule;

        app.open_selected_round();

        assert_eq!(app.screen, Screen::Interview);
        let round = app.active_round().expect("round should resolve");
        assert_eq!(round.id, app.active_round_id.clone().unwrap());
    }

    #[test]
    fn screen_names_round_trip() {
        for screen in [
            Screen::Dashboard,
            Screen::Candidates,
            Screen::Schedule,
            Screen::Interview,
            Screen::Reports,
            Screen::Analysis,
        ] {
            assert_eq!(Screen::from_name(screen.name()), Some(screen));
        }
        assert_eq!(Screen::from_name("settings"), None);
    }
}
