use std::collections::HashMap;
use std::fs;

#[derive(Debug, Clone)]
pub struct Settings {
    pub beamer_host: String,
    pub beamer_port: u16,
    pub http_bind: String,
    pub mqtt_host: String,
    pub mqtt_port: u16,
    /// Device name reported in Home Assistant discovery.
    pub hostname: String,
    /// Stable per-host identifier used in discovery unique_ids.
    pub host_id: String,
    pub www_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        let hostname =
            std::env::var("HOSTNAME").unwrap_or_else(|_| "beamer-bridge".to_string());
        Self {
            beamer_host: "192.168.25.11".into(),
            beamer_port: 41794,
            http_bind: "0.0.0.0:8080".into(),
            mqtt_host: "mqtt.realraum.at".into(),
            mqtt_port: 1883,
            host_id: hostname.clone(),
            hostname,
            www_dir: "www".into(),
        }
    }
}

/// Defaults, overlaid by an optional flat `bridge.toml` in the working
/// directory, overlaid by environment variables. Unparseable ports keep the
/// previous value.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("bridge.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("beamer_host") {
                settings.beamer_host = v.clone();
            }
            if let Some(v) = file_cfg.get("beamer_port") {
                settings.beamer_port = parse_port(v, settings.beamer_port);
            }
            if let Some(v) = file_cfg.get("http_bind") {
                settings.http_bind = v.clone();
            }
            if let Some(v) = file_cfg.get("mqtt_host") {
                settings.mqtt_host = v.clone();
            }
            if let Some(v) = file_cfg.get("mqtt_port") {
                settings.mqtt_port = parse_port(v, settings.mqtt_port);
            }
            if let Some(v) = file_cfg.get("hostname") {
                settings.hostname = v.clone();
            }
            if let Some(v) = file_cfg.get("host_id") {
                settings.host_id = v.clone();
            }
            if let Some(v) = file_cfg.get("www_dir") {
                settings.www_dir = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("BEAMER_HOST") {
        settings.beamer_host = v;
    }
    if let Ok(v) = std::env::var("BEAMER_PORT") {
        settings.beamer_port = parse_port(&v, settings.beamer_port);
    }
    if let Ok(v) = std::env::var("HTTP_BIND") {
        settings.http_bind = v;
    }
    if let Ok(v) = std::env::var("MQTT_HOST") {
        settings.mqtt_host = v;
    }
    if let Ok(v) = std::env::var("MQTT_PORT") {
        settings.mqtt_port = parse_port(&v, settings.mqtt_port);
    }
    if let Ok(v) = std::env::var("BRIDGE_HOSTNAME") {
        settings.hostname = v;
    }
    if let Ok(v) = std::env::var("BRIDGE_HOST_ID") {
        settings.host_id = v;
    }
    if let Ok(v) = std::env::var("WWW_DIR") {
        settings.www_dir = v;
    }

    settings
}

fn parse_port(raw: &str, fallback: u16) -> u16 {
    raw.trim().parse().unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_realraum_beamer() {
        let settings = Settings::default();
        assert_eq!(settings.beamer_host, "192.168.25.11");
        assert_eq!(settings.beamer_port, 41794);
        assert_eq!(settings.mqtt_port, 1883);
        assert_eq!(settings.www_dir, "www");
    }

    #[test]
    fn host_id_defaults_to_hostname() {
        let settings = Settings::default();
        assert_eq!(settings.host_id, settings.hostname);
    }

    #[test]
    fn bad_port_keeps_previous_value() {
        assert_eq!(parse_port("not-a-port", 41794), 41794);
        assert_eq!(parse_port("", 1883), 1883);
        assert_eq!(parse_port(" 9000 ", 1883), 9000);
    }
}
