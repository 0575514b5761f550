//! End-to-end exercises through the facade crate only: everything here
//! reaches the protocol engine and modem operations via `satlink`'s
//! re-exports, the way an application would.

use satlink::modem::{ModemBuilder, SleepStatus};
use satlink::protocol::{Command, Decoded, Session};
use satlink::{Error, StatusCode};
use satlink_test_harness::MockTransport;

#[tokio::test]
async fn modem_duty_cycle() {
    let mut mock = MockTransport::new();
    mock.expect(b"get_firmware_version\r\n", b"API(600: \"1.4.2\")\r\n");
    mock.expect(b"set_payload(5)\r\n", b"API(600)\r\n");
    mock.expect(b"hello", b"API(600)\r\n");
    mock.expect(b"go_to_sleep\r\n", b"API(602: 3; 600)\r\n");
    let probe = mock.clone();

    let mut modem = ModemBuilder::new().build_with_transport(Box::new(mock));

    assert_eq!(modem.firmware_version().await.unwrap(), "1.4.2");
    modem.send_payload(b"hello").await.unwrap();
    assert_eq!(
        modem.go_to_sleep().await.unwrap(),
        SleepStatus::Sleeping {
            reason: 3,
            seconds_left: 600
        }
    );
    assert_eq!(probe.remaining_expectations(), 0);
}

#[tokio::test]
async fn raw_session_round_trip() {
    let mut mock = MockTransport::new();
    mock.expect(b"get_datetime\r\n", b"API(600: \"2026-08-29T12:00:00Z\")\r\n");

    let mut session = Session::new(Box::new(mock));
    let decoded = session
        .send_and_receive(Command::new("get_datetime"), 1)
        .await
        .unwrap();

    match decoded {
        Decoded::Response { code, args } => {
            assert_eq!(code, StatusCode::OK);
            assert_eq!(args, vec!["2026-08-29T12:00:00Z"]);
        }
        other => panic!("expected Response, got {other:?}"),
    }
}

#[tokio::test]
async fn device_errors_carry_the_status_code() {
    let mut mock = MockTransport::new();
    mock.expect(
        b"set_location(\"52.37403\",\"4.88969\",\"0.00000\")\r\n",
        b"API(633)\r\n",
    );

    let mut modem = ModemBuilder::new().build_with_transport(Box::new(mock));
    let result = modem.set_location(52.37403, 4.88969, 0.0).await;

    match result {
        Err(Error::Device(code)) => {
            assert_eq!(code, StatusCode::GPS_ENABLED);
            assert!(code.is_error());
        }
        other => panic!("expected device error, got {other:?}"),
    }
}
