// WiFi Telemetrie-Link - WLAN, DNS und TCP über esp-radio + embassy-net
//
// Implementiert TelemetryLink aus occupancy-core. Die WLAN-Verbindung wird
// nur für die Dauer eines Uploads gehalten, danach wieder getrennt.
// Jeder Netzwerk-Schritt hat einen eigenen Timeout.

use core::net::Ipv4Addr;

use defmt::{Debug2Format, error, info, warn};
use embassy_net::tcp::TcpSocket;
use embassy_net::{IpAddress, Stack, dns::DnsQueryType};
use embassy_time::{Duration, with_timeout};
use esp_radio::wifi::{ClientConfig, ModeConfig, WifiController};
use occupancy_core::{TelemetryConnection, TelemetryError, TelemetryLink};

use crate::config::{
    DHCP_TIMEOUT_SECS, DNS_TIMEOUT_SECS, TCP_RX_BUFFER_SIZE, TCP_TIMEOUT_SECS, TCP_TX_BUFFER_SIZE,
    WIFI_CONNECT_TIMEOUT_SECS, WIFI_PASSWORD, WIFI_SSID,
};

/// Netzwerk-Zugang für den Telemetrie-Task
///
/// Besitzt den WiFi-Controller und die TCP-Puffer. Eine offene
/// [`TcpConnection`] leiht sich die Puffer, daher ist immer höchstens
/// eine Verbindung gleichzeitig offen.
pub struct WifiTelemetryLink {
    controller: WifiController<'static>,
    stack: Stack<'static>,
    rx_buffer: [u8; TCP_RX_BUFFER_SIZE],
    tx_buffer: [u8; TCP_TX_BUFFER_SIZE],
}

impl WifiTelemetryLink {
    pub fn new(controller: WifiController<'static>, stack: Stack<'static>) -> Self {
        Self {
            controller,
            stack,
            rx_buffer: [0u8; TCP_RX_BUFFER_SIZE],
            tx_buffer: [0u8; TCP_TX_BUFFER_SIZE],
        }
    }

    /// Konfiguriert den Station-Mode und startet das Radio (nur beim ersten Mal)
    async fn ensure_started(&mut self) -> Result<(), TelemetryError> {
        if matches!(self.controller.is_started(), Ok(true)) {
            return Ok(());
        }

        info!("WiFi: Configuring and starting...");
        let client_config = ModeConfig::Client(
            ClientConfig::default()
                .with_ssid(WIFI_SSID.into())
                .with_password(WIFI_PASSWORD.into()),
        );

        if let Err(e) = self.controller.set_config(&client_config) {
            error!("WiFi: Failed to set configuration: {}", Debug2Format(&e));
            return Err(TelemetryError::AssociationFailed);
        }

        if let Err(e) = self.controller.start_async().await {
            error!("WiFi: Failed to start: {}", Debug2Format(&e));
            return Err(TelemetryError::AssociationFailed);
        }

        info!("WiFi: Started successfully");
        Ok(())
    }
}

impl TelemetryLink for WifiTelemetryLink {
    type Connection<'a>
        = TcpConnection<'a>
    where
        Self: 'a;

    async fn associate(&mut self) -> Result<(), TelemetryError> {
        self.ensure_started().await?;

        info!("WiFi: Connecting to '{}'...", WIFI_SSID);
        match with_timeout(
            Duration::from_secs(WIFI_CONNECT_TIMEOUT_SECS),
            self.controller.connect_async(),
        )
        .await
        {
            Ok(Ok(())) => info!("WiFi: Connected"),
            Ok(Err(e)) => {
                error!("WiFi: Connection failed: {}", Debug2Format(&e));
                return Err(TelemetryError::AssociationFailed);
            }
            Err(_) => {
                warn!("WiFi: Connection timed out");
                return Err(TelemetryError::AssociationTimeout);
            }
        }

        // Auf DHCP-Lease warten
        if with_timeout(
            Duration::from_secs(DHCP_TIMEOUT_SECS),
            self.stack.wait_config_up(),
        )
        .await
        .is_err()
        {
            warn!("WiFi: No IP address from DHCP");
            return Err(TelemetryError::AssociationTimeout);
        }

        if let Some(config) = self.stack.config_v4() {
            info!("WiFi: IP {}", Debug2Format(&config.address.address()));
        }
        Ok(())
    }

    async fn resolve(&mut self, host: &str) -> Result<Ipv4Addr, TelemetryError> {
        let result = with_timeout(
            Duration::from_secs(DNS_TIMEOUT_SECS),
            self.stack.dns_query(host, DnsQueryType::A),
        )
        .await;

        match result {
            Ok(Ok(addrs)) => {
                for addr in addrs {
                    if let IpAddress::Ipv4(ipv4) = addr {
                        return Ok(ipv4);
                    }
                }
                Err(TelemetryError::DnsResolutionFailed)
            }
            Ok(Err(_)) => Err(TelemetryError::DnsResolutionFailed),
            Err(_) => Err(TelemetryError::DnsTimeout),
        }
    }

    async fn connect(
        &mut self,
        addr: Ipv4Addr,
        port: u16,
    ) -> Result<Self::Connection<'_>, TelemetryError> {
        let mut socket = TcpSocket::new(self.stack, &mut self.rx_buffer, &mut self.tx_buffer);
        socket.set_timeout(Some(Duration::from_secs(TCP_TIMEOUT_SECS)));

        if let Err(e) = socket.connect((addr, port)).await {
            warn!("TCP: Connect failed: {}", Debug2Format(&e));
            socket.abort();
            return Err(TelemetryError::ConnectionFailed);
        }

        info!("TCP: Connected to {}:{}", Debug2Format(&addr), port);
        Ok(TcpConnection { socket })
    }

    async fn disassociate(&mut self) {
        match self.controller.disconnect_async().await {
            Ok(()) => info!("WiFi: Disconnected"),
            Err(e) => warn!("WiFi: Disconnect failed: {}", Debug2Format(&e)),
        }
    }
}

/// Offene TCP-Verbindung zum Telemetrie-Endpunkt
pub struct TcpConnection<'a> {
    socket: TcpSocket<'a>,
}

impl TelemetryConnection for TcpConnection<'_> {
    async fn write_all(&mut self, mut bytes: &[u8]) -> Result<(), TelemetryError> {
        while !bytes.is_empty() {
            match self.socket.write(bytes).await {
                Ok(0) | Err(_) => return Err(TelemetryError::WriteFailed),
                Ok(n) => bytes = &bytes[n..],
            }
        }
        self.socket
            .flush()
            .await
            .map_err(|_| TelemetryError::WriteFailed)
    }

    async fn close(mut self) {
        self.socket.close();
        // FIN noch rausschicken, Antwort wird nicht gelesen
        if with_timeout(Duration::from_secs(TCP_TIMEOUT_SECS), self.socket.flush())
            .await
            .is_err()
        {
            self.socket.abort();
        }
    }
}
