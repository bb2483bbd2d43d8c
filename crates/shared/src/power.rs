/// Last power command the beamer is known to have accepted. Nothing is read
/// back from the device, so this reflects what was sent, not what the beamer
/// actually did. Starts at `Unknown` on every process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerState {
    #[default]
    Unknown,
    On,
    Off,
}

impl PowerState {
    /// Wire shape used by the status API: `true`, `false`, or `null`.
    pub fn last_power_command(self) -> Option<bool> {
        match self {
            PowerState::Unknown => None,
            PowerState::On => Some(true),
            PowerState::Off => Some(false),
        }
    }
}
