use std::collections::BTreeMap;

/// The closed set of beamer commands. Each variant maps to a fixed 2-byte
/// opcode on the wire; the external camelCase names are the identifiers used
/// on both the MQTT command topic and the HTTP API.
///
/// External strings are converted to this enum at the front-end boundary, so
/// everything past the adapters works with an already-validated command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    InputHdmi,
    InputPc,
    InputComponent1,
    InputComponent2,
    InputSVideo,
    InputVideo,
    VolumeUp,
    VolumeDown,
    VolumeMute,
    VolumeUnmute,
    PowerOn,
    PowerOff,
    MenuToggle,
    MenuUp,
    MenuDown,
    MenuLeft,
    MenuRight,
    MenuOk,
    PictureMute,
    PictureUnmute,
    PictureFreeze,
    PictureUnfreeze,
    PictureContrastUp,
    PictureContrastDown,
    PictureBrightnessUp,
    PictureBrightnessDown,
}

impl Command {
    pub const ALL: [Command; 26] = [
        Command::InputHdmi,
        Command::InputPc,
        Command::InputComponent1,
        Command::InputComponent2,
        Command::InputSVideo,
        Command::InputVideo,
        Command::VolumeUp,
        Command::VolumeDown,
        Command::VolumeMute,
        Command::VolumeUnmute,
        Command::PowerOn,
        Command::PowerOff,
        Command::MenuToggle,
        Command::MenuUp,
        Command::MenuDown,
        Command::MenuLeft,
        Command::MenuRight,
        Command::MenuOk,
        Command::PictureMute,
        Command::PictureUnmute,
        Command::PictureFreeze,
        Command::PictureUnfreeze,
        Command::PictureContrastUp,
        Command::PictureContrastDown,
        Command::PictureBrightnessUp,
        Command::PictureBrightnessDown,
    ];

    /// External name, exact and case-sensitive.
    pub fn name(self) -> &'static str {
        match self {
            Command::InputHdmi => "inputHdmi",
            Command::InputPc => "inputPc",
            Command::InputComponent1 => "inputComponent1",
            Command::InputComponent2 => "inputComponent2",
            Command::InputSVideo => "inputSVideo",
            Command::InputVideo => "inputVideo",
            Command::VolumeUp => "volumeUp",
            Command::VolumeDown => "volumeDown",
            Command::VolumeMute => "volumeMute",
            Command::VolumeUnmute => "volumeUnmute",
            Command::PowerOn => "powerOn",
            Command::PowerOff => "powerOff",
            Command::MenuToggle => "menuToggle",
            Command::MenuUp => "menuUp",
            Command::MenuDown => "menuDown",
            Command::MenuLeft => "menuLeft",
            Command::MenuRight => "menuRight",
            Command::MenuOk => "menuOk",
            Command::PictureMute => "pictureMute",
            Command::PictureUnmute => "pictureUnmute",
            Command::PictureFreeze => "pictureFreeze",
            Command::PictureUnfreeze => "pictureUnfreeze",
            Command::PictureContrastUp => "pictureContrastUp",
            Command::PictureContrastDown => "pictureContrastDown",
            Command::PictureBrightnessUp => "pictureBrightnessUp",
            Command::PictureBrightnessDown => "pictureBrightnessDown",
        }
    }

    /// The 2-byte opcode appended to the wire header for this command.
    pub fn opcode(self) -> [u8; 2] {
        match self {
            Command::InputHdmi => [0xcd, 0x13],
            Command::InputPc => [0xd0, 0x13],
            Command::InputComponent1 => [0xd1, 0x13],
            Command::InputComponent2 => [0xd2, 0x13],
            Command::InputSVideo => [0xcf, 0x13],
            Command::InputVideo => [0xce, 0x13],
            Command::VolumeUp => [0xfa, 0x13],
            Command::VolumeDown => [0xfb, 0x13],
            Command::VolumeMute => [0xfc, 0x13],
            Command::VolumeUnmute => [0xfd, 0x13],
            Command::PowerOn => [0x04, 0x00],
            Command::PowerOff => [0x05, 0x00],
            Command::MenuToggle => [0x1d, 0x14],
            Command::MenuUp => [0x1e, 0x14],
            Command::MenuDown => [0x1f, 0x14],
            Command::MenuLeft => [0x20, 0x14],
            Command::MenuRight => [0x21, 0x14],
            Command::MenuOk => [0x23, 0x14],
            Command::PictureMute => [0xee, 0x13],
            Command::PictureUnmute => [0xef, 0x13],
            Command::PictureFreeze => [0xf0, 0x13],
            Command::PictureUnfreeze => [0xf1, 0x13],
            Command::PictureContrastUp => [0xf6, 0x13],
            Command::PictureContrastDown => [0xf7, 0x13],
            Command::PictureBrightnessUp => [0xf5, 0x13],
            Command::PictureBrightnessDown => [0xf4, 0x13],
        }
    }

    /// Resolve an external name. Exact match only; no aliasing, no case
    /// folding.
    pub fn from_name(name: &str) -> Option<Command> {
        Command::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// Presentation group of this command, see [`group_of`].
    pub fn group(self) -> &'static str {
        group_of(self.name())
    }
}

/// Presentation group for a command name: the prefix before the first
/// lowercase-to-uppercase transition. Names with no transition fall into
/// `other`.
pub fn group_of(name: &str) -> &str {
    match name.find(|c: char| c.is_ascii_uppercase()) {
        Some(idx) if idx > 0 => &name[..idx],
        _ => "other",
    }
}

/// Group view over the whole table, recomputed on demand. `BTreeMap` keeps
/// the group order stable for API consumers.
pub fn command_groups() -> BTreeMap<&'static str, Vec<&'static str>> {
    let mut groups: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
    for command in Command::ALL {
        groups.entry(command.group()).or_default().push(command.name());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let names: HashSet<&str> = Command::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), Command::ALL.len());
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        assert_eq!(Command::from_name("volumeUp"), Some(Command::VolumeUp));
        assert_eq!(Command::from_name("volumeup"), None);
        assert_eq!(Command::from_name("VolumeUp"), None);
        assert_eq!(Command::from_name(""), None);
    }

    #[test]
    fn roundtrips_through_name() {
        for command in Command::ALL {
            assert_eq!(Command::from_name(command.name()), Some(command));
        }
    }

    #[test]
    fn opcodes_match_the_device_table() {
        assert_eq!(Command::VolumeUp.opcode(), [0xfa, 0x13]);
        assert_eq!(Command::PowerOn.opcode(), [0x04, 0x00]);
        assert_eq!(Command::PowerOff.opcode(), [0x05, 0x00]);
        assert_eq!(Command::MenuOk.opcode(), [0x23, 0x14]);
    }

    #[test]
    fn groups_split_at_first_case_transition() {
        assert_eq!(Command::InputHdmi.group(), "input");
        assert_eq!(Command::InputPc.group(), "input");
        assert_eq!(Command::PowerOn.group(), "power");
        assert_eq!(Command::PowerOff.group(), "power");
    }

    #[test]
    fn flat_case_names_fall_into_other() {
        assert_eq!(group_of("standby"), "other");
        assert_eq!(group_of("Reset"), "other");
    }

    #[test]
    fn group_view_covers_every_command() {
        let groups = command_groups();
        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, Command::ALL.len());
        assert_eq!(
            groups.keys().copied().collect::<Vec<_>>(),
            vec!["input", "menu", "picture", "power", "volume"]
        );
        assert!(groups["volume"].contains(&"volumeUp"));
    }
}
