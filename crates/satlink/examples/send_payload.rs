//! Stage a payload for satellite broadcast and put the modem to sleep.
//!
//! Demonstrates the typical duty cycle of a battery-powered tracker:
//! connect, set a manual position, stage the payload, then sleep until the
//! next scheduled satellite pass.
//!
//! # Requirements
//!
//! - A Hiber-class modem connected via USB serial
//! - The serial port path adjusted for your system (e.g., `/dev/ttyUSB0`
//!   on Linux, `COM3` on Windows)
//!
//! # Usage
//!
//! ```sh
//! cargo run -p satlink --example send_payload
//! ```

use satlink::modem::{ModemBuilder, SleepStatus};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Adjust this to match your system's serial port.
    let serial_port = "/dev/ttyUSB0";

    println!("Connecting to modem on {}...", serial_port);

    let mut modem = ModemBuilder::new()
        .serial_port(serial_port)
        .baud_rate(19_200)
        .build()
        .await?;

    println!("Firmware: {}", modem.firmware_version().await?);
    println!("Modem clock: {}", modem.datetime().await?);

    // No GPS on this installation: disable the receiver and set the
    // position by hand (Amsterdam).
    modem.set_gps_mode(false).await?;
    modem.set_location(52.37403, 4.88969, 0.0).await?;

    println!("Staging payload...");
    modem.send_payload(b"hello from the ground").await?;

    let wakeup = modem.next_wakeup_time().await?;
    println!(
        "Next wakeup: reason {} in {} s",
        wakeup.reason, wakeup.seconds_left
    );

    match modem.go_to_sleep().await? {
        SleepStatus::Sleeping {
            reason,
            seconds_left,
        } => {
            println!("Modem sleeping (reason {}, {} s)", reason, seconds_left);
        }
        SleepStatus::WakeupPinHigh => {
            println!("Modem refused to sleep: wakeup pin is high");
        }
    }

    println!("Done.");
    Ok(())
}
