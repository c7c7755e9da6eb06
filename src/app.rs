use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::{Config, ScreenGeometry};
use crate::event::Event;
use crate::menu::MenuInput;
use crate::scene::Scene;
use crate::scores::{self, ScoreEntry};
use crate::screens::game_over::{HOME, RETRY};
use crate::screens::high_scores::BACK;
use crate::screens::{GameOver, HighScores, ScreenError};

/// What the player chose on the game-over screen, handed back to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Retry,
    Home,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Retry => "retry",
            Outcome::Home => "home",
        }
    }
}

pub enum Screen {
    GameOver,
    HighScores(HighScores),
}

pub struct App {
    pub should_quit: bool,
    pub outcome: Option<Outcome>,
    pub scene: Scene,
    pub screen: Screen,
    // Stays alive while the high-score table is up so its selection survives
    game_over: GameOver,
    config: Config,
    geometry: ScreenGeometry,
    recorded: bool,
}

impl App {
    pub fn new(config: Config, geometry: ScreenGeometry, current_score: u32) -> Result<Self, ScreenError> {
        let mut scene = Scene::new();
        let game_over = GameOver::open(&config, geometry, &mut scene, current_score)?;
        Ok(Self {
            should_quit: false,
            outcome: None,
            scene,
            screen: Screen::GameOver,
            game_over,
            config,
            geometry,
            recorded: false,
        })
    }

    pub fn on_event(&mut self, event: &Event) {
        match event {
            Event::Tick => self.on_tick(),
            Event::Resize(w, h) => self.on_resize(ScreenGeometry::new(*w, *h)),
            Event::Key(key) => self.on_key(*key),
            Event::Mouse(_) => {}
        }
        if self.should_quit {
            return;
        }
        if let Some(raw) = event.as_terminal() {
            self.on_menu_input(MenuInput::from_event(&raw));
        }
    }

    pub fn on_tick(&mut self) {
        match &mut self.screen {
            Screen::GameOver => self.game_over.update(&mut self.scene),
            Screen::HighScores(high_scores) => high_scores.update(&mut self.scene),
        }
    }

    fn on_resize(&mut self, geometry: ScreenGeometry) {
        self.geometry = geometry;
        match &mut self.screen {
            Screen::GameOver => self.game_over.relayout(geometry, &mut self.scene),
            Screen::HighScores(high_scores) => high_scores.relayout(geometry, &mut self.scene),
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.quit(),
            KeyCode::Char('h') | KeyCode::Char('H') if matches!(self.screen, Screen::GameOver) => {
                self.open_high_scores()
            }
            KeyCode::Esc if matches!(self.screen, Screen::HighScores(_)) => self.close_high_scores(),
            _ => {}
        }
    }

    fn on_menu_input(&mut self, input: MenuInput) {
        let confirmed = match &mut self.screen {
            Screen::GameOver => self.game_over.handle_event(input),
            Screen::HighScores(high_scores) => high_scores.handle_event(input),
        };
        let Some(choice) = confirmed else { return };
        let on_table = matches!(self.screen, Screen::HighScores(_));
        match (on_table, choice) {
            (true, BACK) => self.close_high_scores(),
            (false, RETRY) => self.finish(Outcome::Retry),
            (false, HOME) => self.finish(Outcome::Home),
            _ => {}
        }
    }

    fn open_high_scores(&mut self) {
        match HighScores::open(&self.config, self.geometry, &mut self.scene) {
            Ok(high_scores) => {
                self.game_over.clear(&mut self.scene);
                self.screen = Screen::HighScores(high_scores);
                log::debug!("Scene now holds {} visuals", self.scene.len());
            }
            Err(e) => log::error!("Could not open high scores: {}", e),
        }
    }

    fn close_high_scores(&mut self) {
        if let Screen::HighScores(high_scores) = &mut self.screen {
            high_scores.clear(&mut self.scene);
        }
        self.screen = Screen::GameOver;
        self.game_over.relayout(self.geometry, &mut self.scene);
    }

    /// Leave without choosing; the run still counts.
    fn quit(&mut self) {
        self.record_run();
        self.should_quit = true;
        log::info!("Quit from game over");
    }

    fn finish(&mut self, outcome: Outcome) {
        self.record_run();
        self.game_over.clear(&mut self.scene);
        debug_assert!(self.scene.is_empty());
        self.outcome = Some(outcome);
        self.should_quit = true;
        log::info!("Leaving game over with {:?}", outcome);
    }

    fn record_run(&mut self) {
        if !self.config.record_runs || self.recorded {
            return;
        }
        self.recorded = true;
        let score = self.game_over.current_score();
        // The placeholder table is only for display and never reaches the file
        let mut store = self.game_over.scores().for_recording();
        match store.record(ScoreEntry::new(score, scores::today())) {
            Some(rank) => {
                log::info!("Run of {} placed #{}", score, rank);
                if let Err(e) = store.save(&self.config.scores_path) {
                    log::error!("Could not save scores: {}", e);
                }
            }
            None => log::debug!("Run of {} not recorded", score),
        }
    }

    pub fn game_over(&self) -> &GameOver {
        &self.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scores::ScoreStore;
    use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
    use std::fs;

    fn app_with(score: u32, record_runs: bool) -> (tempfile::TempDir, App) {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            scores_path: dir.path().join("scores.json"),
            record_runs,
            ..Config::default()
        };
        let app = App::new(config, ScreenGeometry::default(), score).unwrap();
        (dir, app)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn down_enter_goes_home() {
        let (_dir, mut app) = app_with(0, false);
        app.on_event(&key(KeyCode::Down));
        assert_eq!(app.game_over().menu().selected(), HOME);
        assert!(!app.should_quit);
        app.on_event(&key(KeyCode::Enter));
        assert!(app.should_quit);
        assert_eq!(app.outcome, Some(Outcome::Home));
        assert!(app.scene.is_empty());
    }

    #[test]
    fn clicking_retry_records_the_run() {
        let (dir, mut app) = app_with(55, true);
        let retry = app.game_over().menu().options()[RETRY].bounds;
        app.on_event(&Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: retry.x + 1,
            row: retry.y + 1,
            modifiers: KeyModifiers::NONE,
        }));
        assert_eq!(app.outcome, Some(Outcome::Retry));

        let saved = ScoreStore::load(&dir.path().join("scores.json")).unwrap();
        let scores: Vec<u32> = saved.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![55]);
    }

    #[test]
    fn recorded_run_joins_an_existing_table() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, r#"[[80,"01-01-24"],[10,"01-02-24"]]"#).unwrap();
        let config = Config {
            scores_path: path.clone(),
            ..Config::default()
        };
        let mut app = App::new(config, ScreenGeometry::default(), 55).unwrap();
        app.on_event(&key(KeyCode::Enter));

        let saved = ScoreStore::load(&path).unwrap();
        let scores: Vec<u32> = saved.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![80, 55, 10]);
    }

    #[test]
    fn quitting_still_records_the_run_once() {
        let (dir, mut app) = app_with(55, true);
        app.on_event(&key(KeyCode::Char('q')));
        assert!(app.should_quit);
        assert_eq!(app.outcome, None);
        // A second quit (e.g. Ctrl+C right after q) must not add it again
        app.on_event(&Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));

        let saved = ScoreStore::load(&dir.path().join("scores.json")).unwrap();
        let scores: Vec<u32> = saved.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![55]);
    }

    #[test]
    fn runs_are_not_saved_when_disabled() {
        let (dir, mut app) = app_with(55, false);
        app.on_event(&key(KeyCode::Enter));
        assert_eq!(app.outcome, Some(Outcome::Retry));
        assert!(!dir.path().join("scores.json").exists());
    }

    #[test]
    fn high_scores_round_trip_keeps_selection() {
        let (_dir, mut app) = app_with(0, false);
        app.on_event(&key(KeyCode::Down));
        app.on_event(&key(KeyCode::Char('h')));
        assert!(matches!(app.screen, Screen::HighScores(_)));

        // Enter on the table means "back", not a game-over choice
        app.on_event(&key(KeyCode::Enter));
        assert!(matches!(app.screen, Screen::GameOver));
        assert!(!app.should_quit);
        assert_eq!(app.game_over().menu().selected(), HOME);
        assert!(!app.scene.is_empty());
    }

    #[test]
    fn corrupt_file_keeps_game_over_up() {
        let (dir, mut app) = app_with(0, false);
        fs::write(dir.path().join("scores.json"), "[[1,").unwrap();
        let before = app.scene.len();
        app.on_event(&key(KeyCode::Char('h')));
        assert!(matches!(app.screen, Screen::GameOver));
        assert_eq!(app.scene.len(), before);
    }

    #[test]
    fn resize_and_quit() {
        let (_dir, mut app) = app_with(0, false);
        app.on_event(&Event::Resize(100, 40));
        let retry = app.game_over().menu().options()[RETRY].bounds;
        assert_eq!(retry, ScreenGeometry::new(100, 40).centered(14, 3, 23));

        app.on_event(&Event::Tick);
        app.on_event(&key(KeyCode::Char('q')));
        assert!(app.should_quit);
        assert_eq!(app.outcome, None);
    }
}
