#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::{convert::Infallible, panic};

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use led_reel::{
    Result,
    canvas::ScrollDirection,
    clock::{FrameClock, SystemClock},
    display::DefmtSink,
    frame::Rotation,
    motion::oscillate_int,
    screen::Screen,
};
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

    // Static shapes, shown once.
    screen.draw(|canvas| {
        canvas.rect(0, 0, 12, 8);
        canvas.fill(true);
        canvas.circle(5, 3, 5);
    });
    Timer::after(Duration::from_secs(2)).await;

    // The same picture upside down.
    screen.set_rotation(Rotation::Deg180);
    screen.end_draw();
    Timer::after(Duration::from_secs(2)).await;
    screen.set_rotation(Rotation::Deg0);

    // A bouncing ball under scrolling text.
    let mut frames = 0_u32;
    loop {
        let now = screen.clock().now();
        let ball_x = oscillate_int(0, 11, Duration::from_millis(1200), 0.0, now);
        screen.begin_draw();
        let canvas = screen.canvas_mut();
        canvas.no_fill();
        canvas.scroll_text("HI PICO", 0, ScrollDirection::Left, now);
        canvas.point(ball_x, 7);
        screen.end_draw();

        frames = frames.wrapping_add(1);
        if frames % 500 == 0 {
            defmt::info!("b1: {} frames drawn", frames);
        }
        Timer::after(Duration::from_millis(20)).await;
    }
}
