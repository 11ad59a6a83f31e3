use ratatui::style::Color;

pub struct Theme {
  pub name: &'static str,
  pub bg: Color,
  pub fg: Color,
  pub accent: Color,
  pub muted: Color,
  pub border: Color,
  pub highlight_fg: Color,
  pub highlight_bg: Color,
  pub stripe_bg: Color,
  pub status: Color,
  pub error: Color,
  pub key_fg: Color,
  pub key_bg: Color,
}

pub const THEMES: [Theme; 3] = [
  Theme {
    name: "Hyperspace",
    bg: Color::Rgb(12, 14, 24),
    fg: Color::Rgb(220, 224, 240),
    accent: Color::Rgb(255, 232, 31),
    muted: Color::Rgb(118, 124, 150),
    border: Color::Rgb(54, 60, 88),
    highlight_fg: Color::Rgb(12, 14, 24),
    highlight_bg: Color::Rgb(255, 232, 31),
    stripe_bg: Color::Rgb(18, 21, 34),
    status: Color::Rgb(110, 200, 255),
    error: Color::Rgb(255, 92, 92),
    key_fg: Color::Rgb(12, 14, 24),
    key_bg: Color::Rgb(118, 124, 150),
  },
  Theme {
    name: "Dune",
    bg: Color::Rgb(40, 30, 22),
    fg: Color::Rgb(240, 222, 196),
    accent: Color::Rgb(232, 150, 64),
    muted: Color::Rgb(160, 136, 110),
    border: Color::Rgb(96, 76, 58),
    highlight_fg: Color::Rgb(40, 30, 22),
    highlight_bg: Color::Rgb(232, 150, 64),
    stripe_bg: Color::Rgb(48, 37, 28),
    status: Color::Rgb(190, 210, 120),
    error: Color::Rgb(230, 86, 70),
    key_fg: Color::Rgb(40, 30, 22),
    key_bg: Color::Rgb(160, 136, 110),
  },
  Theme {
    name: "Terminal",
    bg: Color::Reset,
    fg: Color::Reset,
    accent: Color::Cyan,
    muted: Color::DarkGray,
    border: Color::Gray,
    highlight_fg: Color::Black,
    highlight_bg: Color::Cyan,
    stripe_bg: Color::Reset,
    status: Color::Green,
    error: Color::Red,
    key_fg: Color::Black,
    key_bg: Color::Gray,
  },
];

/// Index of the theme called `name` (case-insensitive), defaulting to the first.
pub fn index_of(name: Option<&str>) -> usize {
  name.and_then(|n| THEMES.iter().position(|t| t.name.eq_ignore_ascii_case(n))).unwrap_or(0)
}
