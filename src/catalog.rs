//! The fixed list of commands the plugin offers.
//!
//! Label → key tables are plain data; `commands()` turns them into host
//! `Command`s once and hands out the same immutable list afterwards.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::command::{Command, CommandInput, CommandInputType, CommandType, SelectionOption};
use crate::platform::KeyCode;

/// Input field holding the key (or the text, for `CommandType::Text`).
pub const VALUE_INPUT: &str = "value";
/// Input field holding the comma-joined modifier codes.
pub const MODIFIER_INPUT: &str = "modifier";

pub const SPECIAL_KEYS: &[(&str, KeyCode)] = &[
    ("Space", KeyCode::Space),
    ("Arrow Up", KeyCode::Up),
    ("Arrow Down", KeyCode::Down),
    ("Arrow Left", KeyCode::Left),
    ("Arrow Right", KeyCode::Right),
    ("Enter", KeyCode::Enter),
    ("Tab", KeyCode::Tab),
    ("Backspace", KeyCode::Backspace),
    ("Escape", KeyCode::Escape),
    ("F1", KeyCode::F1),
    ("F2", KeyCode::F2),
    ("F3", KeyCode::F3),
    ("F4", KeyCode::F4),
    ("F5", KeyCode::F5),
    ("F6", KeyCode::F6),
    ("F7", KeyCode::F7),
    ("F8", KeyCode::F8),
    ("F9", KeyCode::F9),
    ("F10", KeyCode::F10),
    ("F11", KeyCode::F11),
    ("F12", KeyCode::F12),
    ("Print Screen", KeyCode::PrintScreen),
    ("Insert", KeyCode::Insert),
    ("Home", KeyCode::Home),
    ("End", KeyCode::End),
    ("Page Up", KeyCode::PageUp),
    ("Page Down", KeyCode::PageDown),
    ("Delete", KeyCode::Delete),
];

pub const KEYPRESS_KEYS: &[(&str, KeyCode)] = &[
    ("1", KeyCode::Key1),
    ("2", KeyCode::Key2),
    ("3", KeyCode::Key3),
    ("4", KeyCode::Key4),
    ("5", KeyCode::Key5),
    ("6", KeyCode::Key6),
    ("7", KeyCode::Key7),
    ("8", KeyCode::Key8),
    ("9", KeyCode::Key9),
    ("0", KeyCode::Key0),
    ("A", KeyCode::A),
    ("B", KeyCode::B),
    ("C", KeyCode::C),
    ("D", KeyCode::D),
    ("E", KeyCode::E),
    ("F", KeyCode::F),
    ("G", KeyCode::G),
    ("H", KeyCode::H),
    ("I", KeyCode::I),
    ("J", KeyCode::J),
    ("K", KeyCode::K),
    ("L", KeyCode::L),
    ("M", KeyCode::M),
    ("N", KeyCode::N),
    ("O", KeyCode::O),
    ("P", KeyCode::P),
    ("Q", KeyCode::Q),
    ("R", KeyCode::R),
    ("S", KeyCode::S),
    ("T", KeyCode::T),
    ("U", KeyCode::U),
    ("V", KeyCode::V),
    ("W", KeyCode::W),
    ("X", KeyCode::X),
    ("Y", KeyCode::Y),
    ("Z", KeyCode::Z),
    (",", KeyCode::Comma),
    (".", KeyCode::Period),
    ("/", KeyCode::Slash),
    (";", KeyCode::Semicolon),
    ("'", KeyCode::Apostrophe),
    ("[", KeyCode::LeftBracket),
    ("]", KeyCode::RightBracket),
    ("\\", KeyCode::Backslash),
    ("`", KeyCode::Backtick),
];

pub const MEDIA_KEYS: &[(&str, KeyCode)] = &[
    ("Play / Pause", KeyCode::MediaPlayPause),
    ("Next Track", KeyCode::MediaNext),
    ("Previous Track", KeyCode::MediaPrev),
    ("Stop", KeyCode::MediaStop),
    ("Mute", KeyCode::VolumeMute),
    ("Decrease Volume", KeyCode::VolumeDown),
    ("Increase Volume", KeyCode::VolumeUp),
];

/// Left-hand modifiers offered on every key command.
pub const MODIFIER_KEYS: &[(&str, KeyCode)] = &[
    ("Control", KeyCode::Ctrl),
    ("Shift", KeyCode::Shift),
    ("Alt", KeyCode::Alt),
    ("Windows", KeyCode::Meta),
];

static COMMANDS: Lazy<Vec<Command>> = Lazy::new(|| {
    vec![
        key_command(CommandType::SpecialKey, "Special Key", SPECIAL_KEYS),
        key_command(CommandType::KeyPress, "Keypress", KEYPRESS_KEYS),
        key_command(CommandType::Media, "Media Keys", MEDIA_KEYS),
        text_command(),
    ]
});

/// Special Key, Keypress, Media Keys, and Text, in that order.
pub fn commands() -> &'static [Command] {
    &COMMANDS
}

fn selection_options(keys: &[(&str, KeyCode)]) -> Vec<SelectionOption> {
    keys.iter()
        .map(|&(name, key)| SelectionOption {
            name: name.to_owned(),
            data: key.code().to_string(),
        })
        .collect()
}

fn select_input(name: &str, multiple: bool, keys: &[(&str, KeyCode)]) -> CommandInput {
    CommandInput {
        name: name.to_owned(),
        input_type: CommandInputType::Select,
        multiple,
        selection_options: Some(selection_options(keys)),
    }
}

fn key_command(command_type: CommandType, name: &str, keys: &[(&str, KeyCode)]) -> Command {
    let command_inputs = BTreeMap::from([
        (VALUE_INPUT.to_owned(), select_input("Key", false, keys)),
        (
            MODIFIER_INPUT.to_owned(),
            select_input("Modifier", true, MODIFIER_KEYS),
        ),
    ]);
    Command {
        name: name.to_owned(),
        command_type,
        command_inputs,
        data: None,
    }
}

fn text_command() -> Command {
    let value = CommandInput {
        name: "Key".to_owned(),
        input_type: CommandInputType::Text,
        multiple: false,
        selection_options: None,
    };
    Command {
        name: "Text".to_owned(),
        command_type: CommandType::Text,
        command_inputs: BTreeMap::from([(VALUE_INPUT.to_owned(), value)]),
        data: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn options<'a>(command: &'a Command, input: &str) -> &'a [SelectionOption] {
        command.command_inputs[input]
            .selection_options
            .as_deref()
            .unwrap_or_default()
    }

    #[test]
    fn four_commands_in_fixed_order() {
        let names: Vec<(&str, CommandType)> = commands()
            .iter()
            .map(|c| (c.name.as_str(), c.command_type))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Special Key", CommandType::SpecialKey),
                ("Keypress", CommandType::KeyPress),
                ("Media Keys", CommandType::Media),
                ("Text", CommandType::Text),
            ]
        );
    }

    #[test]
    fn repeated_calls_return_the_same_list() {
        assert!(std::ptr::eq(commands(), commands()));
        assert!(commands().iter().all(|c| c.data.is_none()));
    }

    #[test]
    fn option_data_parses_back_to_its_key() {
        let tables = [SPECIAL_KEYS, KEYPRESS_KEYS, MEDIA_KEYS];
        for (command, table) in commands().iter().zip(tables) {
            let opts = options(command, VALUE_INPUT);
            assert_eq!(opts.len(), table.len(), "{}", command.name);
            for (option, &(label, key)) in opts.iter().zip(table) {
                assert_eq!(option.name, label);
                let code: u32 = option.data.parse().unwrap();
                assert_eq!(code, key.code(), "{label}");
                assert_eq!(KeyCode::from_code(code), Some(key), "{label}");
            }
        }
    }

    #[test]
    fn key_commands_offer_a_single_select_key_and_multi_select_modifiers() {
        for command in &commands()[..3] {
            let value = &command.command_inputs[VALUE_INPUT];
            assert_eq!(value.name, "Key");
            assert_eq!(value.input_type, CommandInputType::Select);
            assert!(!value.multiple);

            let modifier = &command.command_inputs[MODIFIER_INPUT];
            assert_eq!(modifier.name, "Modifier");
            assert_eq!(modifier.input_type, CommandInputType::Select);
            assert!(modifier.multiple);

            let labels: Vec<&str> = options(command, MODIFIER_INPUT)
                .iter()
                .map(|o| o.name.as_str())
                .collect();
            assert_eq!(labels, vec!["Control", "Shift", "Alt", "Windows"]);
            let codes: Vec<String> = options(command, MODIFIER_INPUT)
                .iter()
                .map(|o| o.data.clone())
                .collect();
            let expected: Vec<String> = [KeyCode::Ctrl, KeyCode::Shift, KeyCode::Alt, KeyCode::Meta]
                .iter()
                .map(|k| k.code().to_string())
                .collect();
            assert_eq!(codes, expected);
        }
    }

    #[test]
    fn text_command_has_one_free_text_input() {
        let text = &commands()[3];
        assert_eq!(text.command_inputs.len(), 1);
        let value = &text.command_inputs[VALUE_INPUT];
        assert_eq!(value.name, "Key");
        assert_eq!(value.input_type, CommandInputType::Text);
        assert!(value.selection_options.is_none());
    }

    #[test]
    fn labels_are_unique_within_each_table() {
        for table in [SPECIAL_KEYS, KEYPRESS_KEYS, MEDIA_KEYS, MODIFIER_KEYS] {
            let labels: HashSet<&str> = table.iter().map(|&(label, _)| label).collect();
            assert_eq!(labels.len(), table.len());
        }
    }

    #[test]
    fn catalog_serializes_in_host_shape() {
        let json = serde_json::to_value(&commands()[1]).unwrap();
        assert_eq!(json["name"], "Keypress");
        assert_eq!(json["type"], 0);
        assert_eq!(json["commandInputs"]["modifier"]["multiple"], true);
        assert_eq!(
            json["commandInputs"]["value"]["selectionOptions"][10],
            serde_json::json!({ "name": "A", "data": KeyCode::A.code().to_string() })
        );
        assert!(json.get("data").is_none());
    }
}
