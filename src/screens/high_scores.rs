use ratatui::layout::Rect;

use crate::config::{Config, ScreenGeometry};
use crate::menu::{MenuInput, MenuOption, SelectionMenu};
use crate::scene::{Layer, Scene, ScreenVisuals, Visual};
use crate::scores::{ScoreEntry, ScoreStore};
use crate::screens::{sprite_or_missing, ScreenError};

pub const BACK: usize = 0;

const BUTTON_WIDTH: u16 = 12;
const BUTTON_HEIGHT: u16 = 3;

fn back_bounds(geometry: &ScreenGeometry) -> Rect {
    let y = i32::from(geometry.height) - 3;
    geometry.centered(BUTTON_WIDTH, BUTTON_HEIGHT, y)
}

fn entry_text(entry: &ScoreEntry) -> String {
    format!("{:>5}         {}", entry.score, entry.date)
}

/// The score table with a single "back" option.
pub struct HighScores {
    scores: ScoreStore,
    menu: SelectionMenu,
    visuals: ScreenVisuals,
}

impl HighScores {
    pub fn open(config: &Config, geometry: ScreenGeometry, scene: &mut Scene) -> Result<Self, ScreenError> {
        let scores = ScoreStore::load(&config.scores_path)?;
        let menu = SelectionMenu::new(vec![MenuOption {
            id: "back",
            bounds: back_bounds(&geometry),
        }])?;

        let mut screen = Self {
            scores,
            menu,
            visuals: ScreenVisuals::default(),
        };
        screen.register_fixed(&geometry, scene);
        screen.update(scene);
        log::info!("High scores opened with {} entries", screen.scores.len());
        Ok(screen)
    }

    fn register_fixed(&mut self, geometry: &ScreenGeometry, scene: &mut Scene) {
        let cy = i32::from(geometry.center_y());
        self.visuals.add(scene, Visual::Backdrop, &[Layer::Overlay]);
        self.visuals.add(
            scene,
            Visual::Banner {
                sprite: sprite_or_missing("score_title"),
                center_y: cy - 8,
            },
            &[Layer::Ui],
        );

        if self.scores.is_empty() {
            self.visuals.add(
            scene,
                Visual::Text {
                    text: "No scores yet".to_string(),
                    center_y: cy - 4,
                },
                &[Layer::Ui],
            );
        }

        // Rows that would run into the back button are not drawn
        let first_row = cy - 4;
        let last_row = i32::from(back_bounds(geometry).y) - 1;
        for (i, entry) in self.scores.entries().iter().enumerate() {
            let center_y = first_row + i as i32;
            if center_y >= last_row {
                break;
            }
            self.visuals.add(
            scene,
                Visual::Text {
                    text: entry_text(entry),
                    center_y,
                },
                &[Layer::Ui],
            );
        }
    }

    pub fn handle_event(&mut self, input: MenuInput) -> Option<usize> {
        self.menu.handle_input(input)
    }

    pub fn update(&mut self, scene: &mut Scene) {
        self.visuals.refresh_buttons(scene, &self.menu);
    }

    pub fn relayout(&mut self, geometry: ScreenGeometry, scene: &mut Scene) {
        self.menu.relayout(&[back_bounds(&geometry)]);
        self.visuals.clear_fixed(scene);
        self.register_fixed(&geometry, scene);
        self.update(scene);
    }

    pub fn clear(&mut self, scene: &mut Scene) {
        self.visuals.clear(scene);
    }

    #[cfg(test)]
    pub fn menu(&self) -> &SelectionMenu {
        &self.menu
    }

    #[cfg(test)]
    pub fn scores(&self) -> &ScoreStore {
        &self.scores
    }
}
