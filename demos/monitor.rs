//! Print input events as JSON lines and light each button's LED while it is held.
//!
//! Usage: `cargo run --example monitor [config.toml]`

use stratcom::{Config, Context, InputEvent, InputEvents, LedState, ReadStatus};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path).expect("load config"),
        None => Config::default(),
    };
    let timeout = config.read_timeout();

    let mut ctx = Context::init_with_config(config).expect("init hidapi");
    let mut device = ctx.open_device().expect("open device");
    device
        .set_blink_interval(10, 10)
        .expect("set blink interval");

    let mut last = device.input_state();
    loop {
        match device.read_input_with_timeout(timeout) {
            Ok(ReadStatus::Updated) => {}
            Ok(ReadStatus::NoData) => continue,
            Err(e) => {
                eprintln!("read failed: {e}");
                break;
            }
        }

        let now = device.input_state();
        let events = match InputEvents::from_states(&last, &now) {
            Ok(events) => events,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        last = now;

        for event in &events {
            println!("{}", serde_json::to_string(event).expect("serialize event"));
            if let InputEvent::Button { button, pressed } = *event {
                if let Some(led) = button.led() {
                    let state = if pressed { LedState::On } else { LedState::Off };
                    device.set_button_led_state_without_flushing(led, state);
                }
            }
        }
        if device.has_unflushed_led_changes() {
            if let Err(e) = device.flush_button_led_state() {
                eprintln!("LED flush failed: {e}");
            }
        }
    }
}
