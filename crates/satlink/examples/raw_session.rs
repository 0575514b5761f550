//! Drive the protocol layer directly, without the typed modem wrappers.
//!
//! Useful for firmware commands that have no wrapper in `satlink-modem`
//! yet: build the command by hand, run the round trip, and inspect the
//! decoded status code and arguments.
//!
//! # Usage
//!
//! ```sh
//! cargo run -p satlink --example raw_session
//! ```

use satlink::protocol::{Command, Decoded, Session};
use satlink::transport::SerialTransport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let transport = SerialTransport::open("/dev/ttyUSB0", 19_200).await?;
    let mut session = Session::new(Box::new(transport));

    // get_datetime returns one quoted string argument.
    let decoded = session
        .send_and_receive(Command::new("get_datetime"), 1)
        .await?;

    match decoded {
        Decoded::Response { code, args } => {
            println!("status {}: {:?}", code, args);
        }
        Decoded::Booted(banner) => {
            println!("modem rebooted: build {} ({})", banner.build, banner.date);
        }
    }

    println!("raw line: {:?}", session.last_response());
    Ok(())
}
