use ratatui::style::Color;

/// Nord palette with the semantic aliases the screens use.
pub struct NordTheme {
    // Polar Night
    pub nord0: Color,
    pub nord1: Color,
    pub nord2: Color,
    pub nord3: Color,

    // Snow Storm
    pub nord4: Color,
    pub nord5: Color,
    pub nord6: Color,

    // Frost
    pub nord7: Color,
    pub nord8: Color,
    pub nord9: Color,
    pub nord10: Color,

    // Aurora
    pub nord11: Color,
    pub nord12: Color,
    pub nord13: Color,
    pub nord14: Color,
}

impl Default for NordTheme {
    fn default() -> Self {
        Self {
            nord0: Color::Rgb(46, 52, 64),
            nord1: Color::Rgb(59, 66, 82),
            nord2: Color::Rgb(76, 86, 106),
            nord3: Color::Rgb(129, 138, 154),
            nord4: Color::Rgb(216, 222, 233),
            nord5: Color::Rgb(229, 233, 240),
            nord6: Color::Rgb(236, 239, 244),
            nord7: Color::Rgb(143, 188, 187),
            nord8: Color::Rgb(136, 192, 208),
            nord9: Color::Rgb(129, 161, 193),
            nord10: Color::Rgb(94, 129, 172),
            nord11: Color::Rgb(191, 97, 106),
            nord12: Color::Rgb(208, 135, 112),
            nord13: Color::Rgb(235, 203, 139),
            nord14: Color::Rgb(163, 190, 140),
        }
    }
}

impl NordTheme {
    pub fn bg(&self) -> Color {
        self.nord0
    }
    pub fn bg_secondary(&self) -> Color {
        self.nord1
    }
    pub fn border(&self) -> Color {
        self.nord2
    }
    pub fn muted(&self) -> Color {
        self.nord3
    }

    pub fn fg(&self) -> Color {
        self.nord4
    }
    pub fn fg_bright(&self) -> Color {
        self.nord6
    }

    pub fn frost_mint(&self) -> Color {
        self.nord7
    }
    pub fn frost_ice(&self) -> Color {
        self.nord8
    }
    pub fn frost_dark(&self) -> Color {
        self.nord10
    }

    // Form controls
    pub fn active_field(&self) -> Color {
        self.frost_ice()
    }
    pub fn inactive_field(&self) -> Color {
        self.border()
    }
    pub fn highlight_bg(&self) -> Color {
        self.frost_dark()
    }
    pub fn link(&self) -> Color {
        self.nord9
    }

    // Status
    pub fn danger(&self) -> Color {
        self.nord11
    }
    pub fn warning(&self) -> Color {
        self.nord12
    }
    pub fn calm(&self) -> Color {
        self.nord13
    }
    pub fn success(&self) -> Color {
        self.nord14
    }
}
