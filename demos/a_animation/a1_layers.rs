#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::{convert::Infallible, panic};

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use led_reel::{
    Result,
    animation::{Animation, PlayMode},
    clock::SystemClock,
    display::DefmtSink,
    screen::Screen,
};
use {defmt_rtt as _, panic_probe as _};

// A dot walking along the top row, three frames at 150 ms.
static WALKER: [[u32; 4]; 3] = [
    [0x8000_0000, 0, 0, 150],
    [0x4000_0000, 0, 0, 150],
    [0x2000_0000, 0, 0, 150],
];

// The bottom-right corner blinking slowly.
static CORNER: [[u32; 4]; 2] = [[0, 0, 0x0000_0001, 500], [0, 0, 0, 500]];

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(_spawner: Spawner) -> Result<Infallible> {
    let _p = embassy_rp::init(Default::default());

    let mut screen: Screen<'_, _, _> = Screen::new(DefmtSink, SystemClock);
    screen.begin()?;

    screen.play(Animation::new(&WALKER), PlayMode::Boomerang);
    if let Some(corner) = screen.add_layer() {
        screen.play_on_layer(corner, Animation::new(&CORNER), PlayMode::Loop);
    }
    // A second walker going the other way, shifted right and down.
    if let Some(echo) = screen.add_layer() {
        screen.play_range_on_layer(echo, Animation::new(&WALKER), PlayMode::Loop, 3, 1);
        screen.set_position_on_layer(echo, 4, 2);
    }

    loop {
        screen.update();
        Timer::after(Duration::from_millis(10)).await;
    }
}
