pub mod game_over;
pub mod high_scores;

use ratatui::style::Color;
use thiserror::Error;

use crate::assets::{self, Sprite};
use crate::menu::MenuError;
use crate::scores::ScoreError;

pub use game_over::GameOver;
pub use high_scores::HighScores;

#[derive(Error, Debug)]
pub enum ScreenError {
    #[error(transparent)]
    Scores(#[from] ScoreError),
    #[error(transparent)]
    Menu(#[from] MenuError),
}

static MISSING: Sprite = Sprite {
    name: "missing",
    art: "?",
    color: Color::Rgb(255, 0, 255),
};

fn sprite_or_missing(name: &str) -> &'static Sprite {
    assets::sprite(name).unwrap_or_else(|| {
        log::warn!("No sprite named {:?}", name);
        &MISSING
    })
}
