// ESP-NOW als MessageChannel
//
// Kodiert Nachrichten als JSON-Nutzlast (playground_core::Payload) und
// verschickt sie verbindungslos per ESP-NOW. Unbekannte oder für diese
// Rolle unpassende Nutzlasten werden beim Empfang verworfen.

use defmt::{debug, info, warn};
use embassy_time::Instant;
use esp_radio::esp_now::{EspNow, EspNowWifiInterface, PeerInfo};
use esp_radio::wifi::{ClientConfig, ModeConfig, WifiController};
use playground_core::protocol::MAX_PAYLOAD_LEN;
use playground_core::{
    Address, ChannelError, Inbound, Inbox, Message, MessageChannel, Payload, Role,
};

use crate::config::ESPNOW_CHANNEL;

/// Initialisiert Funk-Controller und ESP-NOW
///
/// Der WiFi-Controller läuft im Station-Modus ohne Verbindung zu einem
/// Access Point und bleibt für die gesamte Laufzeit aktiv.
pub fn init_esp_now(wifi: esp_hal::peripherals::WIFI<'static>) -> EspNow<'static> {
    static RADIO_INIT: static_cell::StaticCell<esp_radio::Controller> =
        static_cell::StaticCell::new();
    let radio_init =
        RADIO_INIT.init(esp_radio::init().expect("Failed to initialize radio controller"));

    let (controller, interfaces) = esp_radio::wifi::new(radio_init, wifi, Default::default())
        .expect("Failed to initialize Wi-Fi");

    static CONTROLLER: static_cell::StaticCell<WifiController<'static>> =
        static_cell::StaticCell::new();
    let controller = CONTROLLER.init(controller);

    controller
        .set_config(&ModeConfig::Client(ClientConfig::default()))
        .expect("Failed to configure Wi-Fi station mode");
    controller.start().expect("Failed to start Wi-Fi");

    let mac = Address::new(interfaces.sta.mac_address());
    info!("Radio: own MAC {}", mac);

    let esp_now = interfaces.esp_now;
    esp_now
        .set_channel(ESPNOW_CHANNEL)
        .expect("Failed to set ESP-NOW channel");
    info!("Radio: ESP-NOW ready on channel {}", ESPNOW_CHANNEL);

    esp_now
}

/// MessageChannel über ESP-NOW
pub struct EspNowChannel<'a> {
    esp_now: EspNow<'a>,
    role: Role,
}

impl<'a> EspNowChannel<'a> {
    /// `role`: bestimmt, wie empfangene Nutzlasten interpretiert werden
    pub fn new(esp_now: EspNow<'a>, role: Role) -> Self {
        Self { esp_now, role }
    }

    fn ensure_peer(&mut self, address: Address) -> Result<(), ChannelError> {
        let peer_address = address.octets();
        if self.esp_now.peer_exists(&peer_address) {
            return Ok(());
        }

        self.esp_now
            .add_peer(PeerInfo {
                interface: EspNowWifiInterface::Sta,
                peer_address,
                lmk: None,
                channel: None,
                encrypt: false,
            })
            .map_err(|_| ChannelError::PeerUnknown)?;
        debug!("Radio: added peer {}", address);
        Ok(())
    }
}

impl MessageChannel for EspNowChannel<'_> {
    fn send(&mut self, to: Address, message: &Message) -> Result<(), ChannelError> {
        self.ensure_peer(to)?;

        let mut buf = [0u8; MAX_PAYLOAD_LEN];
        let len = Payload::from(message)
            .encode(&mut buf)
            .map_err(|_| ChannelError::PayloadTooLarge)?;

        self.esp_now
            .send(&to.octets(), &buf[..len])
            .map_err(|_| ChannelError::SendFailed)?
            .wait()
            .map_err(|_| ChannelError::SendFailed)
    }

    fn broadcast(&mut self, message: &Message) -> Result<(), ChannelError> {
        self.send(Address::BROADCAST, message)
    }

    fn poll(&mut self) -> Inbox {
        let mut inbox = Inbox::new();
        let now = Instant::now().as_millis();

        while !inbox.is_full() {
            let Some(received) = self.esp_now.receive() else {
                break;
            };
            let from = Address::new(received.info.src_address);

            match Payload::decode(received.data()) {
                Ok(payload) => match payload.into_message(self.role) {
                    Some(message) => {
                        // Kapazität oben geprüft
                        let _ = inbox.push(Inbound::new(from, message, now));
                    }
                    None => debug!("Radio: payload not for {} from {}", self.role, from),
                },
                Err(e) => warn!("Radio: dropping malformed payload from {}: {}", from, e),
            }
        }

        inbox
    }
}
