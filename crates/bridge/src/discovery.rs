//! Home Assistant MQTT discovery. One retained config document per command,
//! so every beamer command shows up as a button entity. Pure data formatting.

use rumqttc::{AsyncClient, ClientError, QoS};
use tracing::debug;

use shared::command::Command;

use crate::config::Settings;
use crate::mqtt::{COMMAND_TOPIC, STATUS_TOPIC};
use crate::version;

pub fn discovery_topic(command: Command) -> String {
    format!("homeassistant/button/r3beamerremote_{}/config", command.name())
}

pub fn discovery_document(settings: &Settings, command: Command) -> serde_json::Value {
    let name = command.name();
    serde_json::json!({
        "name": name,
        "icon": "mdi:remote",
        "command_topic": COMMAND_TOPIC,
        "unique_id": format!("r3beamerremote_{}_{}", name, settings.host_id),
        "payload_press": name,
        "availability_topic": STATUS_TOPIC,
        "payload_available": "online",
        "payload_not_available": "offline",
        "device": {
            "identifiers": &settings.host_id,
            "name": &settings.hostname,
            "model": "Rust MQTT Beamer Remote",
            "manufacturer": "realraum",
            "sw_version": version::sw_version(),
        },
    })
}

pub async fn publish_discovery(
    client: &AsyncClient,
    settings: &Settings,
) -> Result<(), ClientError> {
    for command in Command::ALL {
        let topic = discovery_topic(command);
        let document = discovery_document(settings, command);
        debug!(%topic, "publishing discovery config");
        client
            .publish(topic, QoS::AtLeastOnce, true, document.to_string())
            .await?;
    }
    Ok(())
}
