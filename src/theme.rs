use eframe::egui;

/// Page theme. Two states, no intermediates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark_mode(dark: bool) -> Self {
        if dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    fn egui_theme(self) -> egui::Theme {
        match self {
            ThemeMode::Light => egui::Theme::Light,
            ThemeMode::Dark => egui::Theme::Dark,
        }
    }
}

/// Tracks the requested theme and pushes it to the egui context once per
/// transition.
#[derive(Debug)]
pub struct ThemeSwitch {
    current: ThemeMode,
    applied: Option<ThemeMode>,
}

impl ThemeSwitch {
    pub fn new(initial: ThemeMode) -> Self {
        ThemeSwitch {
            current: initial,
            applied: None,
        }
    }

    pub fn current(&self) -> ThemeMode {
        self.current
    }

    /// Feed the dark-mode input. Returns whether the theme changed.
    pub fn set_dark_mode(&mut self, dark: bool) -> bool {
        let next = ThemeMode::from_dark_mode(dark);
        if next == self.current {
            return false;
        }
        log::debug!("Theme {:?} -> {:?}", self.current, next);
        self.current = next;
        true
    }

    /// The theme still waiting to be applied, if any.
    pub fn pending(&self) -> Option<ThemeMode> {
        (self.applied != Some(self.current)).then_some(self.current)
    }

    pub fn apply(&mut self, ctx: &egui::Context) {
        if let Some(theme) = self.pending() {
            ctx.set_theme(theme.egui_theme());
            self.applied = Some(theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_light_and_applies_once() {
        let ctx = egui::Context::default();
        let mut switch = ThemeSwitch::new(ThemeMode::default());
        assert_eq!(switch.current(), ThemeMode::Light);
        assert_eq!(switch.pending(), Some(ThemeMode::Light));

        switch.apply(&ctx);
        assert_eq!(switch.pending(), None);
    }

    #[test]
    fn transitions_on_every_change() {
        let ctx = egui::Context::default();
        let mut switch = ThemeSwitch::new(ThemeMode::Light);
        switch.apply(&ctx);

        assert!(switch.set_dark_mode(true));
        assert!(switch.current().is_dark());
        assert_eq!(switch.pending(), Some(ThemeMode::Dark));
        switch.apply(&ctx);
        assert_eq!(ctx.theme(), egui::Theme::Dark);

        assert!(!switch.set_dark_mode(true));
        assert_eq!(switch.pending(), None);

        assert!(switch.set_dark_mode(false));
        switch.apply(&ctx);
        assert_eq!(ctx.theme(), egui::Theme::Light);
    }
}
