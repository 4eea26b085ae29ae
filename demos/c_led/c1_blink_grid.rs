#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::{convert::Infallible, panic};

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use led_reel::{Result, clock::SystemClock, display::DefmtSink, screen::Screen};
use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(_spawner: Spawner) -> Result<Infallible> {
    let _p = embassy_rp::init(Default::default());

    let mut screen: Screen<'_, _, _> = Screen::new(DefmtSink, SystemClock);
    screen.begin()?;

    // Corners blink at different rates, the middle stays on.
    screen.blink(0, 0, 100);
    screen.blink(11, 0, 250);
    screen.blink(0, 7, 500);
    screen.blink_index(95, 1000);
    screen.led(5, 3, true);
    screen.led(6, 4, true);

    // Light the top row in one write.
    screen.set_auto_show(false);
    for x in 1..11 {
        screen.led(x, 0, true);
    }
    screen.show();
    screen.set_auto_show(true);

    let mut ticks = 0_u32;
    loop {
        screen.update_blinks();
        ticks = ticks.wrapping_add(1);
        if ticks == 1000 {
            // After ten seconds, stop the corners; the steady LEDs stay lit.
            screen.no_blink_all();
        }
        Timer::after(Duration::from_millis(10)).await;
    }
}
