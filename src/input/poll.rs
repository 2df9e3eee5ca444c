use crate::input::KeyCommand;

/// First recognized key press among this frame's events. Later presses in
/// the same frame are ignored.
pub fn first_command(events: &[egui::Event]) -> Option<KeyCommand> {
    events.iter().find_map(|event| match event {
        egui::Event::Key {
            key,
            pressed: true,
            repeat: false,
            modifiers,
            ..
        } if modifiers.is_none() => KeyCommand::from_key(*key),
        _ => None,
    })
}

pub fn poll_key(input: &egui::InputState) -> Option<KeyCommand> {
    let command = first_command(&input.events);
    if let Some(command) = command {
        log::debug!("Key command: {:?}", command);
    }
    command
}
