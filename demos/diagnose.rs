use stratcom::Context;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut ctx = Context::init().expect("init hidapi");
    let devices = ctx.enumerate().expect("enumerate devices");
    if devices.is_empty() {
        println!("No Strategic Commander connected");
        return;
    }
    for meta in devices {
        println!(
            "VID:PID={:04x}:{:04x} iface={:?} prod={:?} manu={:?} ser={:?} path={}",
            meta.vid,
            meta.pid,
            meta.interface_number,
            meta.product_string,
            meta.manufacturer_string,
            meta.serial_number,
            meta.path
        );
        match ctx.open_device_on_path(&meta.path) {
            Ok(device) => println!(
                "  leds=0x{:04x} blink={:?}",
                device.led_mask().bits(),
                device.blink_interval()
            ),
            Err(e) => println!("  open failed: {e}"),
        }
    }
}
