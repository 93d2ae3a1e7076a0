#![no_std]
#![no_main]

use panic_halt as _;
use rp_pico::entry;
use rp_pico::hal::{
    Clock, Sio, Timer, clocks::init_clocks_and_plls, pac, pio::PIOExt, watchdog::Watchdog,
};
use rtt_target::{rprintln, rtt_init_print};
use ws2812_pio::Ws2812;

use rp_pico_demos::time::{HardwareTimer, Instant};

use rainbow_heartbeat::{
    Config, DEFAULT_PIXEL_COUNT, DelayIdle, PinHeartbeat, Rainbow, RainbowScheduler,
    SmartLedsSink,
};

/// Reference timing and color; tweak with the `with_*` setters.
const CONFIG: Config = Config::DEFAULT;

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("=== RP Pico Rainbow Heartbeat ===");

    // Get peripherals
    let mut pac = pac::Peripherals::take().unwrap();

    // Set up watchdog driver
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    // Configure clocks (125 MHz)
    let clocks = init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    // Set up the Single Cycle IO (for GPIO access)
    let sio = Sio::new(pac.SIO);

    // Set the pins to their default state
    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

    // WS2812 strip data on GPIO16, driven by PIO0
    let (mut pio, sm0, _, _, _) = pac.PIO0.split(&mut pac.RESETS);
    let ws = Ws2812::new(
        pins.gpio16.into_function(),
        &mut pio,
        sm0,
        clocks.peripheral_clock.freq(),
        timer.count_down(),
    );
    let strip = SmartLedsSink::new(ws);

    // Heartbeat on the onboard LED (GPIO25)
    let heartbeat = PinHeartbeat::new(pins.led.into_push_pull_output());

    rprintln!("Strip on GPIO16, heartbeat on GPIO25");

    let time_source = HardwareTimer::new(timer);

    let mut scheduler: RainbowScheduler<Instant, _, _, _, Rainbow, DEFAULT_PIXEL_COUNT> =
        RainbowScheduler::new(CONFIG, strip, heartbeat, &time_source).unwrap();

    rprintln!("Scheduler started");

    // The timer also serves as the idle delay; it is Copy
    scheduler.run(&mut DelayIdle::new(timer))
}
