// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Heap Allocator (WiFi benötigt dynamischen Speicher)
extern crate alloc;

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, StackResources};
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::ledc::timer::Timer as LedcTimer;
use esp_hal::ledc::{LSGlobalClkSource, Ledc, LowSpeed};
use esp_hal::rng::Rng;
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use occupancy_core::matrix::ALARM_TONE_HZ;
use occupancy_counter::config::{
    DISPLAY_I2C_KHZ, EXTRA_HEAP_SIZE, NET_SOCKET_COUNT, WIFI_HEAP_SIZE,
};
use occupancy_counter::hal::{OledDisplay, PwmBuzzer, WifiTelemetryLink, tone_timer};
use occupancy_counter::tasks::{counter_task, net_task, telemetry_task};
use occupancy_counter::{CountWatch, LinkStatusChannel};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware, WiFi, startet Embassy Runtime und spawnt Tasks.
/// Fehler bei der Initialisierung sind fatal (Panic mit Backtrace).
/// Danach schläft main() - alle Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Heap Allocator initialisieren (WiFi braucht dynamischen Speicher!)
    // Zwei Bereiche: reclaimed RAM (64 KB) + extra (36 KB) = 100 KB total
    esp_alloc::heap_allocator!(
        #[esp_hal::ram(reclaimed)]
        size: WIFI_HEAP_SIZE
    );
    esp_alloc::heap_allocator!(size: EXTRA_HEAP_SIZE);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // WiFi Hardware initialisieren
    static RADIO_INIT: static_cell::StaticCell<esp_radio::Controller> =
        static_cell::StaticCell::new();
    let radio_init =
        RADIO_INIT.init(esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller"));

    let (wifi_controller, wifi_interface) =
        esp_radio::wifi::new(radio_init, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi");

    // Netzwerk-Stack erstellen
    // Random seed für TCP/IP Stack (von Hardware RNG)
    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    // Static resources für embassy-net (DHCP + DNS + 1 TCP)
    static RESOURCES: static_cell::StaticCell<StackResources<NET_SOCKET_COUNT>> =
        static_cell::StaticCell::new();
    let resources = RESOURCES.init(StackResources::new());

    // embassy-net erstellt Stack + Runner (nutzt STA interface für Client-Modus)
    let (stack, runner) = embassy_net::new(
        wifi_interface.sta,
        NetConfig::dhcpv4(Default::default()),
        resources,
        seed,
    );

    // OLED Display über I²C (SDA → GPIO6, SCL → GPIO7)
    let i2c = I2c::new(
        peripherals.I2C0,
        I2cConfig::default().with_frequency(Rate::from_khz(DISPLAY_I2C_KHZ)),
    )
    .expect("Failed to initialize I2C")
    .with_sda(peripherals.GPIO6)
    .with_scl(peripherals.GPIO7);
    let display = OledDisplay::new(i2c).expect("Failed to initialize display");

    // Buzzer über LEDC (GPIO3), Timer fest auf die Alarm-Frequenz gestimmt
    // Timer muss 'static sein, der Kanal hält eine Referenz darauf
    let mut ledc = Ledc::new(peripherals.LEDC);
    ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);
    static TONE_TIMER: static_cell::StaticCell<LedcTimer<'static, LowSpeed>> =
        static_cell::StaticCell::new();
    let tone_timer =
        TONE_TIMER.init(tone_timer(&ledc, ALARM_TONE_HZ).expect("Failed to configure LEDC timer"));
    let buzzer = PwmBuzzer::new(&ledc, tone_timer, peripherals.GPIO3, ALARM_TONE_HZ)
        .expect("Failed to initialize buzzer");

    // Zählerstand-Watch (Zähler → Telemetrie)
    // Watch hält nur den letzten Wert, Telemetrie liest beim Upload
    static COUNT_WATCH: static_cell::StaticCell<CountWatch> = static_cell::StaticCell::new();
    let count_watch = &*COUNT_WATCH.init(CountWatch::new());
    let count_sender = count_watch.sender();
    let count_receiver = count_watch.receiver().unwrap();

    // Status-Channel (Telemetrie → Zähler, für die Offline-Anzeige)
    static STATUS_CHANNEL: static_cell::StaticCell<LinkStatusChannel> =
        static_cell::StaticCell::new();
    let status_channel = &*STATUS_CHANNEL.init(LinkStatusChannel::new());

    // Spawn Zähler Task (Taster, Display, Matrix, Buzzer)
    spawner
        .spawn(counter_task(
            peripherals.GPIO4,
            peripherals.GPIO5,
            peripherals.GPIO8,
            peripherals.RMT,
            display,
            buzzer,
            count_sender,
            status_channel.receiver(),
        ))
        .unwrap();

    // Spawn Netzwerk Tasks
    spawner.spawn(net_task(runner)).unwrap();
    spawner
        .spawn(telemetry_task(
            WifiTelemetryLink::new(wifi_controller, stack),
            count_receiver,
            status_channel.sender(),
        ))
        .unwrap();

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
