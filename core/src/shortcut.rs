/// Platform-neutral keydown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub code: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
    pub repeat: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardShortcut {
    ToggleEditMode,
}

/// Ctrl+Shift+E, with Cmd standing in for Ctrl.
pub fn match_shortcut(press: &KeyPress) -> Option<BoardShortcut> {
    if press.repeat || press.alt || !press.shift || !(press.ctrl || press.meta) {
        return None;
    }
    let is_e = press.code == "KeyE" || press.key.eq_ignore_ascii_case("e");
    is_e.then_some(BoardShortcut::ToggleEditMode)
}
