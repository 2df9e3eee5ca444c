/// Commands the video window understands from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Quit,
    TogglePause,
}

impl KeyCommand {
    pub fn from_key(key: egui::Key) -> Option<Self> {
        match key {
            egui::Key::Q => Some(KeyCommand::Quit),
            egui::Key::Space => Some(KeyCommand::TogglePause),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            KeyCommand::Quit => "q",
            KeyCommand::TogglePause => "space",
        }
    }
}
