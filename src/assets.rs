use ratatui::style::Color;

/// Text art looked up by symbolic name
#[derive(Debug, PartialEq)]
pub struct Sprite {
    pub name: &'static str,
    pub art: &'static str,
    pub color: Color,
}

impl Sprite {
    pub fn lines(&self) -> impl Iterator<Item = &'static str> {
        self.art.lines()
    }

    pub fn height(&self) -> u16 {
        self.art.lines().count() as u16
    }

    pub fn width(&self) -> u16 {
        self.art
            .lines()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0) as u16
    }
}

const GAME_OVER_ART: &str = "\
 ▄▄▄  ▄▄▄ ▄   ▄ ▄▄▄▄   ▄▄▄  ▄   ▄ ▄▄▄▄ ▄▄▄
█     █▄█ █▀▄▀█ █▄▄   █   █ ▀▄ ▄▀ █▄▄  █▄▄▀
▀▄▄█▀ █ █ █   █ █▄▄▄   ▀▄▄▀   █   █▄▄▄ █  █";

const SCORE_TITLE_ART: &str = "\
█ █ █ █▀▀ █ █   █▀▀ █▀▀ █▀█ █▀█ █▀▀ █▀▀
█▀█ █ █ █ █▀█   ▀▀█ █   █ █ █▀▄ █▀▀ ▀▀█
▀ ▀ ▀ ▀▀▀ ▀ ▀   ▀▀▀ ▀▀▀ ▀▀▀ ▀ ▀ ▀▀▀ ▀▀▀";

static SPRITES: [Sprite; 7] = [
    Sprite { name: "gameover", art: GAME_OVER_ART, color: Color::Rgb(255, 120, 60) },
    Sprite { name: "score_title", art: SCORE_TITLE_ART, color: Color::Rgb(255, 220, 80) },
    Sprite { name: "best", art: "BEST ", color: Color::Rgb(255, 215, 0) },
    Sprite { name: "score", art: "SCORE ", color: Color::Rgb(80, 200, 255) },
    Sprite { name: "retry", art: "↻ RETRY", color: Color::Rgb(80, 220, 80) },
    Sprite { name: "home", art: "⌂ HOME", color: Color::Rgb(100, 180, 255) },
    Sprite { name: "back", art: "← BACK", color: Color::Rgb(200, 120, 255) },
];

pub fn sprite(name: &str) -> Option<&'static Sprite> {
    SPRITES.iter().find(|s| s.name == name)
}

/// Score digits with a gap between each, the way the score sprites are laid out
pub fn spaced_digits(score: u32) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() * 2);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}
