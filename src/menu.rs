use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::{Position, Rect};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum MenuError {
    #[error("a menu needs at least one option")]
    Empty,
}

/// The slice of terminal input a menu reacts to
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MenuInput {
    MoveUp,
    MoveDown,
    Confirm,
    Click { button: MouseButton, at: Position },
    Hover { at: Position },
    Ignored,
}

impl MenuInput {
    pub fn from_event(event: &Event) -> Self {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Up => MenuInput::MoveUp,
                KeyCode::Down => MenuInput::MoveDown,
                KeyCode::Enter => MenuInput::Confirm,
                _ => MenuInput::Ignored,
            },
            Event::Mouse(mouse) => {
                let at = Position::new(mouse.column, mouse.row);
                match mouse.kind {
                    MouseEventKind::Down(button) => MenuInput::Click { button, at },
                    MouseEventKind::Moved => MenuInput::Hover { at },
                    _ => MenuInput::Ignored,
                }
            }
            _ => MenuInput::Ignored,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuOption {
    pub id: &'static str,
    pub bounds: Rect,
}

/// A fixed list of options with one of them selected.
///
/// `selected` is always a valid index into `options`; moving past either end
/// wraps around.
#[derive(Clone, Debug)]
pub struct SelectionMenu {
    options: Vec<MenuOption>,
    selected: usize,
}

impl SelectionMenu {
    pub fn new(options: Vec<MenuOption>) -> Result<Self, MenuError> {
        if options.is_empty() {
            return Err(MenuError::Empty);
        }
        Ok(Self {
            options,
            selected: 0,
        })
    }

    /// Returns the confirmed option index, if the input committed a choice.
    pub fn handle_input(&mut self, input: MenuInput) -> Option<usize> {
        let count = self.options.len();
        match input {
            MenuInput::MoveUp => {
                self.selected = (self.selected + count - 1) % count;
                None
            }
            MenuInput::MoveDown => {
                self.selected = (self.selected + 1) % count;
                None
            }
            MenuInput::Confirm => Some(self.selected),
            MenuInput::Click {
                button: MouseButton::Left,
                at,
            } => self.hit(at),
            MenuInput::Hover { at } => {
                if let Some(i) = self.hit(at) {
                    self.selected = i;
                }
                None
            }
            MenuInput::Click { .. } | MenuInput::Ignored => None,
        }
    }

    fn hit(&self, at: Position) -> Option<usize> {
        self.options.iter().position(|o| o.bounds.contains(at))
    }

    /// Swap in new bounds after the screen geometry changed. Extra or missing
    /// rects are ignored; the selection is left alone.
    pub fn relayout(&mut self, bounds: &[Rect]) {
        for (option, rect) in self.options.iter_mut().zip(bounds) {
            option.bounds = *rect;
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn option_id(&self, index: usize) -> Option<&'static str> {
        self.options.get(index).map(|o| o.id)
    }

    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers, MouseEvent};

    fn menu(ids: &[&'static str]) -> SelectionMenu {
        let options = ids
            .iter()
            .enumerate()
            .map(|(i, &id)| MenuOption {
                id,
                bounds: Rect::new(10, 2 + 4 * i as u16, 12, 3),
            })
            .collect();
        SelectionMenu::new(options).unwrap()
    }

    #[test]
    fn empty_menu_is_rejected() {
        assert_eq!(SelectionMenu::new(vec![]).unwrap_err(), MenuError::Empty);
    }

    #[test]
    fn moving_down_count_times_returns_to_start() {
        let ids = ["a", "b", "c", "d", "e"];
        for n in 1..=ids.len() {
            let mut m = menu(&ids[..n]);
            m.handle_input(MenuInput::MoveDown);
            let start = m.selected();
            for _ in 0..n {
                assert_eq!(m.handle_input(MenuInput::MoveDown), None);
            }
            assert_eq!(m.selected(), start, "count {n}");
        }
    }

    #[test]
    fn up_undoes_down() {
        for n in 1..=4 {
            let ids = ["a", "b", "c", "d"];
            let mut m = menu(&ids[..n]);
            for start in 0..n {
                while m.selected() != start {
                    m.handle_input(MenuInput::MoveDown);
                }
                m.handle_input(MenuInput::MoveDown);
                m.handle_input(MenuInput::MoveUp);
                assert_eq!(m.selected(), start);
                m.handle_input(MenuInput::MoveUp);
                m.handle_input(MenuInput::MoveDown);
                assert_eq!(m.selected(), start);
            }
        }
    }

    #[test]
    fn up_from_first_wraps_to_last() {
        let mut m = menu(&["retry", "home"]);
        m.handle_input(MenuInput::MoveUp);
        assert_eq!(m.option_id(m.selected()), Some("home"));
    }

    #[test]
    fn confirm_returns_selection_without_moving_it() {
        let mut m = menu(&["retry", "home"]);
        m.handle_input(MenuInput::MoveDown);
        assert_eq!(m.handle_input(MenuInput::Confirm), Some(1));
        assert_eq!(m.handle_input(MenuInput::Confirm), Some(1));
        assert_eq!(m.selected(), 1);
    }

    #[test]
    fn hover_selects_option_under_pointer() {
        let mut m = menu(&["retry", "home"]);
        let inside_second = Position::new(12, 7);
        assert_eq!(m.handle_input(MenuInput::Hover { at: inside_second }), None);
        assert_eq!(m.selected(), 1);
        assert_eq!(m.handle_input(MenuInput::Hover { at: inside_second }), None);
        assert_eq!(m.selected(), 1);

        m.handle_input(MenuInput::Hover { at: Position::new(0, 0) });
        assert_eq!(m.selected(), 1);
    }

    #[test]
    fn left_click_confirms_clicked_option() {
        let mut m = menu(&["retry", "home"]);
        let click = |button, x, y| MenuInput::Click {
            button,
            at: Position::new(x, y),
        };
        assert_eq!(m.handle_input(click(MouseButton::Left, 21, 6)), Some(1));
        assert_eq!(m.selected(), 0);
        assert_eq!(m.handle_input(click(MouseButton::Left, 22, 6)), None);
        assert_eq!(m.handle_input(click(MouseButton::Right, 12, 3)), None);
        assert_eq!(m.handle_input(click(MouseButton::Left, 12, 3)), Some(0));
    }

    #[test]
    fn relayout_moves_hit_areas_only() {
        let mut m = menu(&["retry", "home"]);
        m.handle_input(MenuInput::MoveDown);
        m.relayout(&[Rect::new(0, 0, 4, 1), Rect::new(0, 1, 4, 1)]);
        assert_eq!(m.selected(), 1);
        assert_eq!(
            m.handle_input(MenuInput::Click {
                button: MouseButton::Left,
                at: Position::new(1, 0),
            }),
            Some(0)
        );
    }

    #[test]
    fn terminal_events_translate() {
        let key = |code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        assert_eq!(MenuInput::from_event(&key(KeyCode::Up)), MenuInput::MoveUp);
        assert_eq!(MenuInput::from_event(&key(KeyCode::Down)), MenuInput::MoveDown);
        assert_eq!(MenuInput::from_event(&key(KeyCode::Enter)), MenuInput::Confirm);
        assert_eq!(MenuInput::from_event(&key(KeyCode::Char('x'))), MenuInput::Ignored);

        let mouse = |kind| {
            Event::Mouse(MouseEvent {
                kind,
                column: 3,
                row: 4,
                modifiers: KeyModifiers::NONE,
            })
        };
        assert_eq!(
            MenuInput::from_event(&mouse(MouseEventKind::Down(MouseButton::Left))),
            MenuInput::Click {
                button: MouseButton::Left,
                at: Position::new(3, 4)
            }
        );
        assert_eq!(
            MenuInput::from_event(&mouse(MouseEventKind::Moved)),
            MenuInput::Hover { at: Position::new(3, 4) }
        );
        assert_eq!(
            MenuInput::from_event(&mouse(MouseEventKind::ScrollDown)),
            MenuInput::Ignored
        );
        assert_eq!(MenuInput::from_event(&Event::Resize(80, 24)), MenuInput::Ignored);
    }
}
