use crate::input::{first_command, KeyCommand};

fn press(key: egui::Key) -> egui::Event {
    egui::Event::Key {
        key,
        physical_key: None,
        pressed: true,
        repeat: false,
        modifiers: egui::Modifiers::NONE,
    }
}

#[test]
fn test_key_mapping() {
    assert_eq!(KeyCommand::from_key(egui::Key::Q), Some(KeyCommand::Quit));
    assert_eq!(KeyCommand::from_key(egui::Key::Space), Some(KeyCommand::TogglePause));
    assert_eq!(KeyCommand::from_key(egui::Key::P), None);
    assert_eq!(KeyCommand::from_key(egui::Key::Escape), None);
}

#[test]
fn test_only_first_command_is_taken() {
    let events = vec![press(egui::Key::Space), press(egui::Key::Q)];
    assert_eq!(first_command(&events), Some(KeyCommand::TogglePause));
}

#[test]
fn test_unrecognized_keys_are_skipped() {
    let events = vec![press(egui::Key::A), press(egui::Key::Q)];
    assert_eq!(first_command(&events), Some(KeyCommand::Quit));
}

#[test]
fn test_releases_and_repeats_are_ignored() {
    let release = egui::Event::Key {
        key: egui::Key::Space,
        physical_key: None,
        pressed: false,
        repeat: false,
        modifiers: egui::Modifiers::NONE,
    };
    let repeat = egui::Event::Key {
        key: egui::Key::Space,
        physical_key: None,
        pressed: true,
        repeat: true,
        modifiers: egui::Modifiers::NONE,
    };
    assert_eq!(first_command(&[release, repeat]), None);
}

#[test]
fn test_modified_keys_are_ignored() {
    let ctrl_q = egui::Event::Key {
        key: egui::Key::Q,
        physical_key: None,
        pressed: true,
        repeat: false,
        modifiers: egui::Modifiers::CTRL,
    };
    assert_eq!(first_command(&[ctrl_q]), None);
}

#[test]
fn test_no_events() {
    assert_eq!(first_command(&[]), None);
}
