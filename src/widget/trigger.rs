/// Clickable icon control attached to the search bar.
///
/// A trigger carries no data of its own. The controller drives two flags on it:
/// `suppressed` hides it for the current value, `inert` disables it while the whole
/// widget is disabled.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct IconTrigger {
    glyph: String,
    suppressed: bool,
    inert: bool,
}

impl IconTrigger {
    pub fn new(glyph: impl Into<String>) -> Self {
        Self {
            glyph: glyph.into(),
            suppressed: false,
            inert: false,
        }
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn set_glyph(&mut self, glyph: impl Into<String>) {
        self.glyph = glyph.into();
    }

    pub fn set_suppressed(&mut self, suppressed: bool) {
        self.suppressed = suppressed;
    }

    pub fn set_inert(&mut self, inert: bool) {
        self.inert = inert;
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn is_inert(&self) -> bool {
        self.inert
    }

    /// Whether a click on this trigger should reach the controller.
    pub fn is_interactive(&self) -> bool {
        !self.suppressed && !self.inert
    }
}
