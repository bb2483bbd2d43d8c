//! The command dispatcher: the single path from a resolved command to bytes
//! on the wire. Both front ends (MQTT and HTTP) route through [`Dispatcher`],
//! so they cannot diverge in encoding, sending, or power-state bookkeeping.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

use device::{codec, SessionError, Transport};
use shared::command::Command;
use shared::power::PowerState;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// The name is not in the command table. No network attempt was made.
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error(transparent)]
    Transport(#[from] SessionError),
}

pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    /// Single copyable value behind one lock, so a concurrent read can never
    /// observe a torn update. Last writer wins between concurrent power
    /// commands.
    power: RwLock<PowerState>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            power: RwLock::new(PowerState::Unknown),
        }
    }

    /// Resolve an external command name and dispatch it. Unknown names are
    /// rejected here, before any encoding or I/O.
    pub async fn dispatch_name(&self, name: &str) -> Result<(), DispatchError> {
        let command = Command::from_name(name)
            .ok_or_else(|| DispatchError::UnknownCommand(name.to_string()))?;
        self.dispatch(command).await
    }

    /// Encode and send one command. On success only, a power command updates
    /// the shared power state; every other command leaves it untouched.
    pub async fn dispatch(&self, command: Command) -> Result<(), DispatchError> {
        let payload = codec::encode(command.opcode());
        if let Err(error) = self.transport.send(&payload).await {
            warn!(command = command.name(), %error, "command not delivered");
            return Err(error.into());
        }

        match command {
            Command::PowerOn => *self.power.write().await = PowerState::On,
            Command::PowerOff => *self.power.write().await = PowerState::Off,
            _ => {}
        }
        info!(command = command.name(), "command delivered");
        Ok(())
    }

    pub async fn power_state(&self) -> PowerState {
        *self.power.read().await
    }
}
