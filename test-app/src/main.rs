// satlink test application -- CLI tool for exercising a satellite modem
// against real hardware or a mock transport.
//
// Usage:
//   satlink-test-app --port /dev/ttyUSB0 info
//   satlink-test-app --port /dev/ttyUSB0 payload "hello from the ground"
//   satlink-test-app --port /dev/ttyUSB0 location 52.37403 4.88969 0.0
//   satlink-test-app --port /dev/ttyUSB0 gps fix
//   satlink-test-app --port /dev/ttyUSB0 sleep
//   satlink-test-app --port /dev/ttyUSB0 raw get_datetime --args 1
//   satlink-test-app --mock info
//
// The --mock flag replaces the serial port with a scripted transport that
// answers each command with a canned response. Useful for verifying CLI
// parsing and builder wiring without hardware.
//
// Set RUST_LOG=satlink_protocol=debug to see every wire exchange.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use satlink::modem::{Modem, ModemBuilder, SleepStatus, MAX_PAYLOAD_LEN};
use satlink::protocol::{Command as WireCommand, Decoded};
use satlink_test_harness::MockTransport;

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// satlink test application -- exercises modem operations from the command line.
#[derive(Parser)]
#[command(name = "satlink-test-app", version, about)]
struct Cli {
    /// Serial port path (e.g. /dev/ttyUSB0, COM3).
    /// Required unless --mock is used.
    #[arg(long)]
    port: Option<String>,

    /// Baud rate for the serial link.
    #[arg(long, default_value_t = 19_200)]
    baud: u32,

    /// Response read timeout in milliseconds.
    #[arg(long, default_value_t = 7000)]
    timeout_ms: u64,

    /// How many times to resend the last command after a boot banner.
    #[arg(long, default_value_t = 1)]
    boot_retries: u32,

    /// Use a mock transport with canned responses instead of a real
    /// serial port.
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print firmware version, modem clock, and next scheduled wakeup.
    Info,

    /// Stage a payload for the next satellite broadcast.
    Payload {
        /// Payload text (UTF-8, at most 144 bytes on the wire).
        data: String,
    },

    /// Forward an NMEA sentence to the GPS receiver.
    Nmea {
        /// The sentence, e.g. "$GPGGA,123519,4807.038,N".
        sentence: String,
    },

    /// Print the next scheduled wakeup.
    Wakeup,

    /// Modem clock operations.
    Datetime {
        /// New clock value as ISO 8601 text; omit to read the clock.
        value: Option<String>,
    },

    /// GPS operations.
    Gps {
        #[command(subcommand)]
        action: GpsAction,
    },

    /// Set the modem's position manually (requires GPS disabled).
    Location {
        /// Latitude in decimal degrees.
        latitude: f64,
        /// Longitude in decimal degrees.
        longitude: f64,
        /// Altitude in meters.
        altitude: f64,
    },

    /// Request that the modem power down until its next wakeup.
    Sleep,

    /// Send an arbitrary command and print the decoded response.
    Raw {
        /// Command name, e.g. get_datetime.
        name: String,

        /// String arguments to append, each quoted and escaped.
        #[arg(long)]
        args: Vec<String>,

        /// Maximum number of response arguments to decode.
        #[arg(long, default_value_t = 2)]
        max_args: usize,
    },
}

#[derive(Subcommand)]
enum GpsAction {
    /// Enable the GPS receiver.
    Enable,
    /// Disable the GPS receiver.
    Disable,
    /// Ask the modem to acquire a GPS fix.
    Fix,
}

// ---------------------------------------------------------------------------
// Modem construction
// ---------------------------------------------------------------------------

async fn create_modem(cli: &Cli) -> Result<Modem> {
    let builder = ModemBuilder::new()
        .baud_rate(cli.baud)
        .read_timeout(Duration::from_millis(cli.timeout_ms))
        .boot_retries(cli.boot_retries);

    if cli.mock {
        let mock = scripted_mock(&cli.command);
        println!("Connected (mock transport)");
        return Ok(builder.build_with_transport(Box::new(mock)));
    }

    let port = cli
        .port
        .as_deref()
        .context("--port is required when not using --mock")?;
    let modem = builder
        .serial_port(port)
        .build()
        .await
        .with_context(|| format!("failed to open {port}"))?;
    println!("Connected -- {port} @ {} baud", cli.baud);
    Ok(modem)
}

/// Stage canned responses matching the wire traffic each subcommand will
/// generate, so every mock run exercises the full encode/decode path.
fn scripted_mock(command: &Command) -> MockTransport {
    let mut mock = MockTransport::new();
    match command {
        Command::Info => {
            mock.expect(b"get_firmware_version\r\n", b"API(600: \"1.4.2\")\r\n");
            mock.expect(b"get_datetime\r\n", b"API(600: \"2026-08-29T12:00:00Z\")\r\n");
            mock.expect(b"get_next_wakeup_time\r\n", b"API(600: 3; 86400)\r\n");
        }
        Command::Payload { data } => {
            let announce = format!("set_payload({})\r\n", data.len());
            mock.expect(announce.as_bytes(), b"API(600)\r\n");
            mock.expect(data.as_bytes(), b"API(600)\r\n");
        }
        Command::Nmea { sentence } => {
            let wire = WireCommand::new("run_nmea").arg_str(sentence).into_bytes();
            mock.expect(&wire, b"API(600)\r\n");
        }
        Command::Wakeup => {
            mock.expect(b"get_next_wakeup_time\r\n", b"API(600: 3; 86400)\r\n");
        }
        Command::Datetime { value: None } => {
            mock.expect(b"get_datetime\r\n", b"API(600: \"2026-08-29T12:00:00Z\")\r\n");
        }
        Command::Datetime { value: Some(value) } => {
            let wire = WireCommand::new("set_datetime").arg_str(value).into_bytes();
            let reply = format!("API(600: \"{value}\")\r\n");
            mock.expect(&wire, reply.as_bytes());
        }
        Command::Gps { action } => match action {
            GpsAction::Enable => mock.expect(b"set_gps_mode(true)\r\n", b"API(600: true)\r\n"),
            GpsAction::Disable => mock.expect(b"set_gps_mode(false)\r\n", b"API(600: false)\r\n"),
            GpsAction::Fix => mock.expect(b"do_gps_fix\r\n", b"API(600)\r\n"),
        },
        Command::Location {
            latitude,
            longitude,
            altitude,
        } => {
            let wire = WireCommand::new("set_location")
                .arg_float(*latitude)
                .arg_float(*longitude)
                .arg_float(*altitude)
                .into_bytes();
            let reply = format!("API(600: \"{latitude:.5}\"; \"{longitude:.5}\")\r\n");
            mock.expect(&wire, reply.as_bytes());
        }
        Command::Sleep => {
            mock.expect(b"go_to_sleep\r\n", b"API(602: 3; 600)\r\n");
        }
        Command::Raw { name, args, .. } => {
            let mut cmd = WireCommand::new(name);
            for arg in args {
                cmd = cmd.arg_str(arg);
            }
            mock.expect(&cmd.into_bytes(), b"API(600)\r\n");
        }
    }
    mock
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

async fn cmd_info(modem: &mut Modem) -> Result<()> {
    println!("Firmware:    {}", modem.firmware_version().await?);
    println!("Modem clock: {}", modem.datetime().await?);
    let wakeup = modem.next_wakeup_time().await?;
    println!(
        "Next wakeup: reason {} in {} s",
        wakeup.reason, wakeup.seconds_left
    );
    Ok(())
}

async fn cmd_payload(modem: &mut Modem, data: &str) -> Result<()> {
    let bytes = data.as_bytes();
    if bytes.len() > MAX_PAYLOAD_LEN {
        bail!(
            "payload is {} bytes, the modem accepts at most {MAX_PAYLOAD_LEN}",
            bytes.len()
        );
    }
    modem.send_payload(bytes).await?;
    println!("Payload staged ({} bytes)", bytes.len());
    Ok(())
}

async fn cmd_wakeup(modem: &mut Modem) -> Result<()> {
    let wakeup = modem.next_wakeup_time().await?;
    println!("reason:       {}", wakeup.reason);
    println!("seconds left: {}", wakeup.seconds_left);
    Ok(())
}

async fn cmd_sleep(modem: &mut Modem) -> Result<()> {
    match modem.go_to_sleep().await? {
        SleepStatus::Sleeping {
            reason,
            seconds_left,
        } if reason == 0 => {
            println!("Sleeping; only the wakeup pin will wake the modem ({seconds_left} s reported)");
        }
        SleepStatus::Sleeping {
            reason,
            seconds_left,
        } => {
            println!("Sleeping; wakeup reason {reason} in {seconds_left} s");
        }
        SleepStatus::WakeupPinHigh => {
            println!("Refused: the wakeup pin is held high");
        }
    }
    Ok(())
}

async fn cmd_raw(modem: &mut Modem, name: &str, args: &[String], max_args: usize) -> Result<()> {
    let mut cmd = WireCommand::new(name);
    for arg in args {
        cmd = cmd.arg_str(arg);
    }

    let decoded = modem.session().send_and_receive(cmd, max_args).await?;
    match decoded {
        Decoded::Response { code, args } => {
            println!("status {code} ({:?}/{:?})", code.category(), code.code_type());
            for (i, arg) in args.iter().enumerate() {
                println!("arg[{i}]: {arg:?}");
            }
        }
        Decoded::Booted(banner) => {
            println!("modem rebooted: build {} ({})", banner.build, banner.date);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut modem = create_modem(&cli).await?;

    let result = match &cli.command {
        Command::Info => cmd_info(&mut modem).await,
        Command::Payload { data } => cmd_payload(&mut modem, data).await,
        Command::Nmea { sentence } => {
            modem.send_nmea(sentence).await?;
            println!("Sentence forwarded");
            Ok(())
        }
        Command::Wakeup => cmd_wakeup(&mut modem).await,
        Command::Datetime { value: None } => {
            println!("{}", modem.datetime().await?);
            Ok(())
        }
        Command::Datetime { value: Some(value) } => {
            modem.set_datetime(value).await?;
            println!("Clock set to {value}");
            Ok(())
        }
        Command::Gps { action } => match action {
            GpsAction::Enable => {
                modem.set_gps_mode(true).await?;
                println!("GPS enabled");
                Ok(())
            }
            GpsAction::Disable => {
                modem.set_gps_mode(false).await?;
                println!("GPS disabled");
                Ok(())
            }
            GpsAction::Fix => {
                modem.gps_fix().await?;
                println!("GPS fix requested");
                Ok(())
            }
        },
        Command::Location {
            latitude,
            longitude,
            altitude,
        } => {
            modem.set_location(*latitude, *longitude, *altitude).await?;
            println!("Location set to {latitude}, {longitude} ({altitude} m)");
            Ok(())
        }
        Command::Sleep => cmd_sleep(&mut modem).await,
        Command::Raw {
            name,
            args,
            max_args,
        } => cmd_raw(&mut modem, name, args, *max_args).await,
    };

    if let Some(line) = modem.last_response() {
        if result.is_err() {
            eprintln!("last response line: {line:?}");
        }
    }
    modem.close().await.ok();
    result
}
