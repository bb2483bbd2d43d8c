//! MQTT front end. The event loop forwards raw command names into a queue; a
//! single consumer task dispatches them, so no device I/O runs on the polling
//! loop. The bus has no reply channel — outcomes are logged only.

use std::sync::Arc;
use std::time::Duration;

use rumqttc::{AsyncClient, ClientError, Event, LastWill, MqttOptions, Packet, QoS};
use tokio::sync::mpsc;
use tracing::{info, warn};

use control::Dispatcher;
use shared::command::Command;

use crate::config::Settings;
use crate::discovery::publish_discovery;

pub const COMMAND_TOPIC: &str = "r3beamerremote/command";
pub const STATUS_TOPIC: &str = "r3beamerremote/status";

const QUEUE_DEPTH: usize = 32;

/// Capacity of the rumqttc request channel. It must hold the whole
/// post-connect burst (subscribe, `online`, one discovery document per
/// command), because the channel only drains while `poll()` runs.
fn request_queue_capacity() -> usize {
    Command::ALL.len() + 8
}

/// Run the MQTT side of the bridge. Failure to reach the broker before the
/// first ConnAck is a startup error and aborts the process; after that,
/// connection drops are logged and rumqttc reconnects, at which point the
/// broker has already published the retained `offline` will on our behalf.
pub async fn run(settings: Settings, dispatcher: Arc<Dispatcher>) -> anyhow::Result<()> {
    let client_id = format!("r3beamerremote-{}", settings.host_id);
    let mut options = MqttOptions::new(client_id, &settings.mqtt_host, settings.mqtt_port);
    options.set_keep_alive(Duration::from_secs(60));
    options.set_last_will(LastWill::new(
        STATUS_TOPIC,
        "offline",
        QoS::AtLeastOnce,
        true,
    ));

    let (client, mut eventloop) = AsyncClient::new(options, request_queue_capacity());
    let (queue_tx, queue_rx) = mpsc::channel::<String>(QUEUE_DEPTH);
    tokio::spawn(consume_commands(queue_rx, dispatcher));

    let mut connected_once = false;
    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                connected_once = true;
                info!(
                    host = %settings.mqtt_host,
                    port = settings.mqtt_port,
                    "connected to mqtt broker"
                );
                // Queue the announcements from their own task; awaiting them
                // here would stall poll(), which is what drains the request
                // channel they are waiting on.
                let client = client.clone();
                let settings = settings.clone();
                tokio::spawn(async move {
                    if let Err(error) = announce(&client, &settings).await {
                        warn!(%error, "post-connect announcements failed");
                    }
                });
            }
            Ok(Event::Incoming(Packet::Publish(publish)))
                if publish.topic == COMMAND_TOPIC =>
            {
                match std::str::from_utf8(&publish.payload) {
                    Ok(name) => {
                        let name = name.trim().to_string();
                        info!(command = %name, "bus command received");
                        if queue_tx.send(name).await.is_err() {
                            // consumer task is gone, nothing left to do here
                            return Ok(());
                        }
                    }
                    Err(_) => warn!("dropping non-utf8 payload on command topic"),
                }
            }
            Ok(_) => {}
            Err(error) if !connected_once => {
                return Err(anyhow::Error::new(error)
                    .context("initial mqtt broker connection failed"));
            }
            Err(error) => {
                warn!(%error, "mqtt connection error, retrying");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    }
}

async fn announce(client: &AsyncClient, settings: &Settings) -> Result<(), ClientError> {
    client.subscribe(COMMAND_TOPIC, QoS::AtLeastOnce).await?;
    client
        .publish(STATUS_TOPIC, QoS::AtLeastOnce, true, "online")
        .await?;
    publish_discovery(client, settings).await
}

async fn consume_commands(mut queue: mpsc::Receiver<String>, dispatcher: Arc<Dispatcher>) {
    while let Some(name) = queue.recv().await {
        // Unknown names and transport failures both end here; the bus offers
        // no way to report them back.
        if let Err(error) = dispatcher.dispatch_name(&name).await {
            warn!(command = %name, %error, "bus command failed");
        }
    }
}
