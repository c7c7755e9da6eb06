use ratatui::layout::Rect;

use crate::assets::Sprite;
use crate::menu::SelectionMenu;

/// Draw order: every overlay visual is drawn before any UI visual.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Overlay,
    Ui,
}

impl Layer {
    pub fn all() -> &'static [Layer] {
        &[Layer::Overlay, Layer::Ui]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Visual {
    /// Dims everything under it
    Backdrop,
    Banner {
        sprite: &'static Sprite,
        center_y: i32,
    },
    ScoreLine {
        label: &'static Sprite,
        score: u32,
        center_y: i32,
    },
    Text {
        text: String,
        center_y: i32,
    },
    Button {
        sprite: &'static Sprite,
        bounds: Rect,
        highlighted: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VisualId(u64);

struct Registered {
    id: VisualId,
    visual: Visual,
    layers: Vec<Layer>,
}

/// Everything currently on screen. Screens register what they own and
/// unregister it when they close.
#[derive(Default)]
pub struct Scene {
    entries: Vec<Registered>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, visual: Visual, layers: &[Layer]) -> VisualId {
        let id = VisualId(self.next_id);
        self.next_id += 1;
        self.entries.push(Registered {
            id,
            visual,
            layers: layers.to_vec(),
        });
        id
    }

    pub fn unregister(&mut self, id: VisualId) -> Option<Visual> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos).visual)
    }

    pub fn unregister_all(&mut self, ids: &mut Vec<VisualId>) {
        for id in ids.drain(..) {
            self.unregister(id);
        }
    }

    /// Visuals on `layer`, in registration order
    pub fn visuals(&self, layer: Layer) -> impl Iterator<Item = &Visual> {
        self.entries
            .iter()
            .filter(move |e| e.layers.contains(&layer))
            .map(|e| &e.visual)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What one screen has on the scene: visuals registered when it opens or
/// relayouts, and option buttons rebuilt from the menu on every update.
#[derive(Debug, Default)]
pub struct ScreenVisuals {
    fixed: Vec<VisualId>,
    buttons: Vec<VisualId>,
}

impl ScreenVisuals {
    pub fn add(&mut self, scene: &mut Scene, visual: Visual, layers: &[Layer]) {
        self.fixed.push(scene.register(visual, layers));
    }

    /// Replace the buttons so the highlight follows the selection.
    pub fn refresh_buttons(&mut self, scene: &mut Scene, menu: &SelectionMenu) {
        scene.unregister_all(&mut self.buttons);
        for visual in option_visuals(menu) {
            self.buttons.push(scene.register(visual, &[Layer::Ui]));
        }
    }

    pub fn clear_fixed(&mut self, scene: &mut Scene) {
        scene.unregister_all(&mut self.fixed);
    }

    pub fn clear(&mut self, scene: &mut Scene) {
        scene.unregister_all(&mut self.fixed);
        scene.unregister_all(&mut self.buttons);
    }
}

/// One button per option; only the selected one is highlighted.
pub fn option_visuals(menu: &SelectionMenu) -> Vec<Visual> {
    menu.options()
        .iter()
        .enumerate()
        .filter_map(|(i, option)| {
            let Some(sprite) = crate::assets::sprite(option.id) else {
                log::warn!("No sprite for menu option {:?}", option.id);
                return None;
            };
            Some(Visual::Button {
                sprite,
                bounds: option.bounds,
                highlighted: i == menu.selected(),
            })
        })
        .collect()
}
