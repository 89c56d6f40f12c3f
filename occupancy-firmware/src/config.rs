// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen

// ============================================================================
// Taster Konfiguration
// ============================================================================
//
// Beide Taster sind active-low mit internem Pull-up.
//   Eintritt (Admit)   → GPIO4
//   Austritt (Release) → GPIO5

/// Wartezeit nach dem Abtasten der Taster in Millisekunden
pub const POLL_SETTLE_MS: u64 = 20;

/// Zusätzliche kurze Pause vor dem nächsten Durchlauf in Millisekunden
pub const POLL_IDLE_MS: u64 = 10;

// ============================================================================
// LED-Matrix Konfiguration
// ============================================================================
//
//   Datenleitung 5×5 Matrix (WS2812/Neopixel) → GPIO8 (RMT Kanal 0)

/// Helligkeits-Level für die Matrix (0-255)
/// Wert ist gedimmt für Augenschonung
pub const LED_BRIGHTNESS: u8 = 32;

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

// ============================================================================
// Display Konfiguration
// ============================================================================
//
//   I²C SDA → GPIO6
//   I²C SCL → GPIO7

/// I²C Taktfrequenz für das SSD1306 in kHz
pub const DISPLAY_I2C_KHZ: u32 = 400;

// ============================================================================
// Buzzer Konfiguration
// ============================================================================
//
//   Buzzer → GPIO3 (LEDC Low-Speed Kanal 0)

/// Tastverhältnis des Rechtecksignals in Prozent
pub const BUZZER_DUTY_PCT: u8 = 50;

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Timeout für den Verbindungsaufbau zum Access Point in Sekunden
pub const WIFI_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Timeout bis DHCP eine IP-Adresse geliefert hat in Sekunden
pub const DHCP_TIMEOUT_SECS: u64 = 10;

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

// ============================================================================
// Telemetrie Konfiguration
// ============================================================================

/// API Key für den Telemetrie-Endpunkt (ThingSpeak Write Key)
/// Wird zur Build-Zeit aus der Environment Variable TELEMETRY_API_KEY geladen
pub const TELEMETRY_API_KEY: &str = env!(
    "TELEMETRY_API_KEY",
    "Telemetry API Key nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Hostname des Telemetrie-Endpunkts (ohne http://)
/// Wird zur Build-Zeit aus der Environment Variable TELEMETRY_HOST geladen
pub const TELEMETRY_HOST: &str = env!(
    "TELEMETRY_HOST",
    "Telemetry Host nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// DNS Query Timeout in Sekunden
pub const DNS_TIMEOUT_SECS: u64 = 10;

/// TCP Connect/Write Timeout in Sekunden
pub const TCP_TIMEOUT_SECS: u64 = 10;

/// TCP RX Buffer-Größe in Bytes
/// Die Antwort wird nicht gelesen, ein kleiner Puffer reicht
pub const TCP_RX_BUFFER_SIZE: usize = 512;

/// TCP TX Buffer-Größe in Bytes
/// Muss die komplette GET-Anfrage aufnehmen
pub const TCP_TX_BUFFER_SIZE: usize = 512;

/// Anzahl Sockets im embassy-net Stack (DHCP + DNS + 1 TCP)
pub const NET_SOCKET_COUNT: usize = 3;
