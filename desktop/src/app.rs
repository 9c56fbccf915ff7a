use crate::storage::BestTimeStore;
use eframe::egui;
use sq_core::best_time::judge;
use sq_core::config::{GameConfig, TERMINAL_VALUE};
use sq_core::session::{Outcome, Session};
use std::collections::VecDeque;
use std::time::Duration;

const CORRECT_COLOR: egui::Color32 = egui::Color32::from_rgb(50, 205, 50);
const WRONG_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 20, 60);

#[derive(Debug, Clone, Copy, PartialEq)]
enum Feedback {
    None,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DialogKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
struct Dialog {
    kind: DialogKind,
    title: String,
    message: String,
}

impl Dialog {
    fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

pub struct SubtractApp {
    session: Session,
    store: BestTimeStore,
    best_time: Option<f64>,
    answer_input: String,
    feedback: Feedback,
    dialogs: VecDeque<Dialog>,
}

impl SubtractApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: GameConfig) -> Self {
        Self::with_store(config, BestTimeStore::new())
    }

    pub fn with_store(config: GameConfig, store: BestTimeStore) -> Self {
        let best_time = store.load();
        Self {
            session: Session::new(config),
            store,
            best_time,
            answer_input: String::new(),
            feedback: Feedback::None,
            dialogs: VecDeque::new(),
        }
    }

    fn submit_answer(&mut self) {
        let outcome = self.session.submit(&self.answer_input);
        if outcome == Outcome::Ignored {
            return;
        }
        self.answer_input.clear();

        match outcome {
            Outcome::Invalid | Outcome::Wrong { .. } => self.feedback = Feedback::Wrong,
            Outcome::CannotContinue => {
                self.feedback = Feedback::Wrong;
                self.dialogs
                    .push_back(Dialog::error("Cannot subtract any further."));
            }
            Outcome::Accepted { .. } => self.feedback = Feedback::Correct,
            Outcome::Exhausted { .. } => {
                self.feedback = Feedback::Correct;
                self.dialogs
                    .push_back(Dialog::info("Info", "Cannot subtract any further."));
            }
            Outcome::Finished { elapsed } => {
                self.feedback = Feedback::Correct;
                self.dialogs.push_back(Dialog::info(
                    "Info",
                    format!("Maximum Number ({}) reached! Game over.", TERMINAL_VALUE),
                ));
                self.record_finish(elapsed);
            }
            Outcome::Ignored => {}
        }
    }

    fn record_finish(&mut self, elapsed: Duration) {
        let verdict = judge(self.best_time, elapsed.as_secs_f64());
        if verdict.should_save() {
            match self.store.save(verdict.best()) {
                Ok(()) => self.best_time = Some(verdict.best()),
                Err(e) => {
                    log::error!("could not save best time: {}", e);
                    self.dialogs.push_back(Dialog::error(format!(
                        "Error when saving your personal best:\n{}",
                        e
                    )));
                }
            }
        }
        self.dialogs
            .push_back(Dialog::info(verdict.title(), verdict.message()));
    }

    fn new_game(&mut self) {
        self.session = Session::new(*self.session.config());
        self.answer_input.clear();
        self.feedback = Feedback::None;
        self.dialogs.clear();
    }

    fn show_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.dialogs.front() else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new(dialog.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                let text = egui::RichText::new(dialog.message.as_str());
                match dialog.kind {
                    DialogKind::Info => ui.label(text),
                    DialogKind::Error => ui.label(text.color(WRONG_COLOR)),
                };
                ui.add_space(10.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.dialogs.pop_front();
        }
    }
}

impl eframe::App for SubtractApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.session.tick();
        if self.session.is_running() {
            ctx.request_repaint_after(self.session.config().tick_interval());
        }

        let running = self.session.is_running();
        let dialog_open = !self.dialogs.is_empty();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!dialog_open, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(10.0);
                    ui.label(
                        egui::RichText::new(format!(
                            "Current Number: {}",
                            self.session.current_value()
                        ))
                        .size(20.0),
                    );
                    ui.add_space(10.0);

                    ui.horizontal(|ui| {
                        ui.add_space((ui.available_width() / 2.0 - 80.0).max(0.0));
                        let response = ui.add_enabled(
                            running,
                            egui::TextEdit::singleline(&mut self.answer_input)
                                .font(egui::TextStyle::Heading)
                                .desired_width(120.0)
                                .horizontal_align(egui::Align::Center),
                        );

                        if response.lost_focus()
                            && ui.input(|i| i.key_pressed(egui::Key::Enter))
                        {
                            self.submit_answer();
                        }
                        if running {
                            response.request_focus();
                        }

                        match self.feedback {
                            Feedback::None => {}
                            Feedback::Correct => {
                                ui.label(
                                    egui::RichText::new("✔").size(20.0).color(CORRECT_COLOR),
                                );
                            }
                            Feedback::Wrong => {
                                ui.label(
                                    egui::RichText::new("✘").size(20.0).color(WRONG_COLOR),
                                );
                            }
                        }
                    });

                    ui.add_space(10.0);
                    if ui
                        .add_enabled(running, egui::Button::new("Check Input"))
                        .clicked()
                    {
                        self.submit_answer();
                    }

                    if !running {
                        ui.add_space(5.0);
                        if ui.small_button("New game").clicked() {
                            self.new_game();
                        }
                    }
                });

                ui.add_space(15.0);
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label(format!("Time: {:.1}s", self.session.elapsed().as_secs_f64()));
                    if let Some(best) = self.best_time {
                        ui.separator();
                        ui.label(format!("Best: {:.2}s", best));
                    }
                });
            });
        });

        self.show_dialog(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sq_core::session::Phase;
    use std::fs;
    use tempfile::tempdir;

    const STEPS: [&str; 14] = [
        "93", "86", "79", "72", "65", "58", "51", "44", "37", "30", "23", "16", "9", "2",
    ];

    fn type_and_submit(app: &mut SubtractApp, input: &str) {
        app.answer_input = input.to_string();
        app.submit_answer();
    }

    fn play_through(app: &mut SubtractApp) {
        for step in STEPS {
            type_and_submit(app, step);
        }
    }

    #[test]
    fn wrong_and_invalid_input_mark_failure_and_clear() {
        let dir = tempdir().unwrap();
        let mut app = SubtractApp::with_store(
            GameConfig::default(),
            BestTimeStore::with_path(dir.path().join("best.json")),
        );

        type_and_submit(&mut app, "abc");
        assert_eq!(app.feedback, Feedback::Wrong);
        assert!(app.answer_input.is_empty());

        type_and_submit(&mut app, "92");
        assert_eq!(app.feedback, Feedback::Wrong);
        assert_eq!(app.session.current_value(), 100);

        type_and_submit(&mut app, "93");
        assert_eq!(app.feedback, Feedback::Correct);
        assert_eq!(app.session.current_value(), 93);
        assert!(app.dialogs.is_empty());
    }

    #[test]
    fn first_finish_writes_record() {
        let dir = tempdir().unwrap();
        let store = BestTimeStore::with_path(dir.path().join("best.json"));
        let mut app = SubtractApp::with_store(GameConfig::default(), store.clone());
        play_through(&mut app);

        assert_eq!(app.session.phase(), Phase::Finished);
        let elapsed = app.session.elapsed().as_secs_f64();
        assert_eq!(store.load(), Some(elapsed));
        assert_eq!(app.best_time, Some(elapsed));

        let titles: Vec<_> = app.dialogs.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, ["Info", "New Personal Best!"]);
    }

    #[test]
    fn slower_finish_keeps_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("best.json");
        fs::write(&path, r#"{"best_time": 0.0}"#).unwrap();
        let store = BestTimeStore::with_path(&path);
        let mut app = SubtractApp::with_store(GameConfig::default(), store.clone());
        play_through(&mut app);

        assert_eq!(store.load(), Some(0.0));
        assert_eq!(app.dialogs.back().map(|d| d.title.as_str()), Some("Info"));
    }

    #[test]
    fn faster_finish_replaces_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("best.json");
        fs::write(&path, r#"{"best_time": 100000.0}"#).unwrap();
        let store = BestTimeStore::with_path(&path);
        let mut app = SubtractApp::with_store(GameConfig::default(), store.clone());
        play_through(&mut app);

        assert_eq!(store.load(), Some(app.session.elapsed().as_secs_f64()));
    }

    #[test]
    fn save_failure_is_reported_and_game_still_ends() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let mut app = SubtractApp::with_store(
            GameConfig::default(),
            BestTimeStore::with_path(blocker.join("best.json")),
        );
        play_through(&mut app);

        assert_eq!(app.session.phase(), Phase::Finished);
        assert_eq!(app.best_time, None);
        assert!(app.dialogs.iter().any(|d| {
            d.kind == DialogKind::Error
                && d.message.starts_with("Error when saving your personal best:")
        }));
    }

    #[test]
    fn input_after_finish_is_ignored() {
        let dir = tempdir().unwrap();
        let mut app = SubtractApp::with_store(
            GameConfig::default(),
            BestTimeStore::with_path(dir.path().join("best.json")),
        );
        play_through(&mut app);
        let dialogs = app.dialogs.len();

        type_and_submit(&mut app, "-5");
        assert_eq!(app.session.current_value(), 2);
        assert_eq!(app.dialogs.len(), dialogs);
    }

    #[test]
    fn exhausted_session_records_nothing() {
        let dir = tempdir().unwrap();
        let store = BestTimeStore::with_path(dir.path().join("best.json"));
        let config = GameConfig {
            start_value: 11,
            decrement: 4,
            ..GameConfig::default()
        };
        let mut app = SubtractApp::with_store(config, store.clone());
        type_and_submit(&mut app, "7");
        type_and_submit(&mut app, "3");

        assert_eq!(app.session.phase(), Phase::Exhausted);
        assert_eq!(store.load(), None);
        assert_eq!(
            app.dialogs.front().map(|d| d.message.as_str()),
            Some("Cannot subtract any further.")
        );
    }

    #[test]
    fn new_game_starts_over() {
        let dir = tempdir().unwrap();
        let mut app = SubtractApp::with_store(
            GameConfig::default(),
            BestTimeStore::with_path(dir.path().join("best.json")),
        );
        play_through(&mut app);
        app.new_game();

        assert!(app.session.is_running());
        assert_eq!(app.session.current_value(), 100);
        assert_eq!(app.feedback, Feedback::None);
        assert!(app.dialogs.is_empty());
        assert!(app.best_time.is_some());
    }

    #[test]
    fn new_game_keeps_the_configured_rule() {
        let dir = tempdir().unwrap();
        let config = GameConfig {
            start_value: 16,
            ..GameConfig::default()
        };
        let mut app =
            SubtractApp::with_store(config, BestTimeStore::with_path(dir.path().join("best.json")));
        type_and_submit(&mut app, "9");
        type_and_submit(&mut app, "2");
        assert_eq!(app.session.phase(), Phase::Finished);

        app.new_game();
        assert_eq!(app.session.current_value(), 16);
        assert_eq!(app.session.config(), &config);
    }
}
