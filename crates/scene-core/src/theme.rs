// File: crates/scene-core/src/theme.rs
// Summary: Light/Dark theming for scene frames and the ordinal series palette.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `#rrggbb` (alpha is emitted separately as opacity by the SVG writer).
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Tableau 10.
pub const CATEGORY10: [Color; 10] = [
    Color::rgb(0x4e, 0x79, 0xa7),
    Color::rgb(0xf2, 0x8e, 0x2c),
    Color::rgb(0xe1, 0x57, 0x59),
    Color::rgb(0x76, 0xb7, 0xb2),
    Color::rgb(0x59, 0xa1, 0x4f),
    Color::rgb(0xed, 0xc9, 0x49),
    Color::rgb(0xaf, 0x7a, 0xa1),
    Color::rgb(0xff, 0x9d, 0xa7),
    Color::rgb(0x9c, 0x75, 0x5f),
    Color::rgb(0xba, 0xb0, 0xab),
];

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub grid: Color,
    pub axis_line: Color,
    pub axis_label: Color,
    pub tick: Color,
    pub title: Color,
    pub caption: Color,
    pub error: Color,
    pub annotation: Color,
    /// Stroke for series whose label is not in the color domain.
    pub neutral: Color,
    pub palette: &'static [Color],
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::rgb(255, 255, 255),
            grid: Color::rgb(232, 232, 236),
            axis_line: Color::rgb(60, 60, 70),
            axis_label: Color::rgb(20, 20, 30),
            tick: Color::rgb(100, 100, 110),
            title: Color::rgb(47, 79, 79), // darkslategray
            caption: Color::rgb(40, 40, 48),
            error: Color::rgb(200, 40, 40),
            annotation: Color::rgb(120, 120, 130),
            neutral: Color::rgb(150, 150, 160),
            palette: &CATEGORY10,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::rgb(18, 18, 20),
            grid: Color::rgb(40, 40, 45),
            axis_line: Color::rgb(180, 180, 190),
            axis_label: Color::rgb(235, 235, 245),
            tick: Color::rgb(150, 150, 160),
            title: Color::rgb(235, 235, 245),
            caption: Color::rgb(210, 210, 220),
            error: Color::rgb(255, 110, 110),
            annotation: Color::rgb(160, 160, 170),
            neutral: Color::rgb(110, 110, 120),
            palette: &CATEGORY10,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::light()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}

/// Stable label → color assignment by position in the color domain.
#[derive(Clone, Debug)]
pub struct OrdinalPalette {
    domain: Vec<String>,
    colors: Vec<Color>,
    unknown: Color,
}

impl OrdinalPalette {
    pub fn new(domain: &[String], colors: &[Color], unknown: Color) -> Self {
        Self { domain: domain.to_vec(), colors: colors.to_vec(), unknown }
    }

    pub fn from_theme(domain: &[String], theme: &Theme) -> Self {
        Self::new(domain, theme.palette, theme.neutral)
    }

    pub fn color_for(&self, label: &str) -> Color {
        if self.colors.is_empty() {
            return self.unknown;
        }
        match self.domain.iter().position(|d| d == label) {
            Some(i) => self.colors[i % self.colors.len()],
            None => self.unknown,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, Color)> + '_ {
        self.domain.iter().map(move |d| (d.as_str(), self.color_for(d)))
    }
}
