use ratatui::layout::Rect;

use crate::config::{Config, ScreenGeometry};
use crate::menu::{MenuInput, MenuOption, SelectionMenu};
use crate::scene::{Layer, Scene, ScreenVisuals, Visual};
use crate::scores::ScoreStore;
use crate::screens::{sprite_or_missing, ScreenError};

pub const RETRY: usize = 0;
pub const HOME: usize = 1;

const OPTION_IDS: [&str; 2] = ["retry", "home"];
const BUTTON_WIDTH: u16 = 14;
const BUTTON_HEIGHT: u16 = 3;

pub struct GameOver {
    scores: ScoreStore,
    best_score: u32,
    current_score: u32,
    menu: SelectionMenu,
    visuals: ScreenVisuals,
}

/// Retry above home, laid out as one block so clamping to a short screen
/// moves both together. The gap row goes first when there is no room.
fn button_bounds(geometry: &ScreenGeometry) -> Vec<Rect> {
    let height = BUTTON_HEIGHT.min(geometry.height / 2);
    let gap = u16::from(geometry.height > 2 * BUTTON_HEIGHT);
    let block = 2 * height + gap;
    let top = (geometry.center_y() + 2).min(geometry.height.saturating_sub(block));
    let width = BUTTON_WIDTH.min(geometry.width);
    let x = geometry.center_x().saturating_sub(width / 2);
    vec![
        Rect::new(x, top, width, height),
        Rect::new(x, top + height + gap, width, height),
    ]
}

impl GameOver {
    pub fn open(config: &Config, geometry: ScreenGeometry, scene: &mut Scene, current_score: u32) -> Result<Self, ScreenError> {
        let scores = ScoreStore::load(&config.scores_path)?;
        let best_score = scores.best_score();

        let options = OPTION_IDS
            .iter()
            .zip(button_bounds(&geometry))
            .map(|(&id, bounds)| MenuOption { id, bounds })
            .collect();
        let menu = SelectionMenu::new(options)?;

        let mut screen = Self {
            scores,
            best_score,
            current_score,
            menu,
            visuals: ScreenVisuals::default(),
        };
        screen.register_fixed(&geometry, scene);
        screen.update(scene);
        log::info!("Game over: score {} (best {})", current_score, best_score);
        Ok(screen)
    }

    fn register_fixed(&mut self, geometry: &ScreenGeometry, scene: &mut Scene) {
        let cy = i32::from(geometry.center_y());
        self.visuals.add(scene, Visual::Backdrop, &[Layer::Overlay]);
        self.visuals.add(
            scene,
            Visual::Banner {
                sprite: sprite_or_missing("gameover"),
                center_y: cy - 7,
            },
            &[Layer::Ui],
        );
        self.visuals.add(
            scene,
            Visual::ScoreLine {
                label: sprite_or_missing("best"),
                score: self.best_score,
                center_y: cy - 3,
            },
            &[Layer::Ui],
        );
        self.visuals.add(
            scene,
            Visual::ScoreLine {
                label: sprite_or_missing("score"),
                score: self.current_score,
                center_y: cy - 1,
            },
            &[Layer::Ui],
        );
    }

    pub fn handle_event(&mut self, input: MenuInput) -> Option<usize> {
        let choice = self.menu.handle_input(input);
        if let Some(i) = choice {
            log::debug!("Game over option {:?} confirmed", self.menu.option_id(i));
        }
        choice
    }

    /// Rebuild the buttons so the highlight follows the selection.
    pub fn update(&mut self, scene: &mut Scene) {
        self.visuals.refresh_buttons(scene, &self.menu);
    }

    pub fn relayout(&mut self, geometry: ScreenGeometry, scene: &mut Scene) {
        self.menu.relayout(&button_bounds(&geometry));
        self.visuals.clear_fixed(scene);
        self.register_fixed(&geometry, scene);
        self.update(scene);
    }

    /// Remove everything this screen put on the scene.
    pub fn clear(&mut self, scene: &mut Scene) {
        self.visuals.clear(scene);
    }

    #[cfg(test)]
    pub fn menu(&self) -> &SelectionMenu {
        &self.menu
    }

    pub fn scores(&self) -> &ScoreStore {
        &self.scores
    }

    #[cfg(test)]
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn current_score(&self) -> u32 {
        self.current_score
    }
}
