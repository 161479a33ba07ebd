//! End-to-end: PeriodicNotifier writing through TracingLogSink

use chime_core::application::PeriodicNotifier;
use chime_core::port::time_provider::mocks::FixedTimeProvider;
use chime_infra_log::{TracingLogSink, NOTIFIER_TARGET};
use chrono::{TimeZone, Utc};
use std::io;
use std::sync::{Arc, Mutex};
use tokio_test::assert_ok;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Buffer {
    type Writer = Buffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn test_notifier_record_reaches_subscriber_as_json() {
    let buffer = Buffer::default();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_writer(buffer.clone())
        .finish();

    let notifier = PeriodicNotifier::new(
        Arc::new(TracingLogSink::new()),
        Arc::new(FixedTimeProvider::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 5).unwrap(),
        )),
    );

    tracing::subscriber::with_default(subscriber, || {
        assert_ok!(notifier.on_tick());
    });

    let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("\"level\":\"INFO\""), "{}", lines[0]);
    assert!(lines[0].contains(NOTIFIER_TARGET), "{}", lines[0]);
    assert!(
        lines[0].contains("Logging an event at 2024-01-01T00:00:05.000Z"),
        "{}",
        lines[0]
    );
}
