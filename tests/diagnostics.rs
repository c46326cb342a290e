use erased_delegate::{Delegate, SyncDelegate};
use log::{Level, LevelFilter, Log, Metadata, Record};
use parking_lot::{const_mutex, Mutex};
use std::{
    rc::{self, Rc},
    sync::Arc,
    thread::{self, ThreadId},
};

/// Keeps every record of this crate, tagged with the thread that logged it
struct Capture {
    records: Mutex<Vec<(ThreadId, Level, String)>>,
}

static CAPTURE: Capture = Capture {
    records: const_mutex(Vec::new()),
};

impl Log for Capture {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with("erased_delegate")
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.records.lock().push((
                thread::current().id(),
                record.level(),
                record.args().to_string(),
            ));
        }
    }

    fn flush(&self) {}
}

/// Run `f` and return what it logged on the current thread
fn captured(f: impl FnOnce()) -> Vec<(Level, String)> {
    let _ = log::set_logger(&CAPTURE);
    log::set_max_level(LevelFilter::Trace);

    let thread = thread::current().id();
    CAPTURE.records.lock().retain(|(id, ..)| *id != thread);

    f();

    CAPTURE
        .records
        .lock()
        .iter()
        .filter(|(id, ..)| *id == thread)
        .map(|(_, level, message)| (*level, message.clone()))
        .collect()
}

#[derive(Debug, thiserror::Error)]
#[error("gauge overflow")]
struct Overflow;

struct Gauge;

impl Gauge {
    fn set(&self, _: i32) {}

    fn set_checked(&self, value: i32) -> Result<(), Overflow> {
        if value > 100 {
            return Err(Overflow);
        }

        Ok(())
    }

    fn set_or_panic(&self, _: i32) {
        panic!("needle snapped");
    }
}

#[test]
fn delivered_calls_are_quiet() {
    let gauge = Rc::new(Gauge);
    let mut delegate = Delegate::new();
    delegate.connect::<(i32,), _, _>(&gauge, Gauge::set);

    let records = captured(|| {
        delegate.call((1_i32,));
        Delegate::new().call((1_i32,));
    });

    assert!(records.is_empty(), "{records:?}");
}

#[test]
fn mismatch_is_a_warning() {
    let gauge = Rc::new(Gauge);
    let mut delegate = Delegate::new();
    delegate.connect::<(i32,), _, _>(&gauge, Gauge::set);

    let records = captured(|| delegate.call((true,)));

    assert_eq!(
        records,
        [(
            Level::Warn,
            String::from("delegate call dropped: method takes (i32) but was invoked with (bool)")
        )]
    );
}

#[test]
fn failures_and_panics_are_warnings() {
    let gauge = Rc::new(Gauge);
    let mut delegate = Delegate::new();

    delegate.connect::<(i32,), _, _>(&gauge, Gauge::set_checked);
    let failed = captured(|| delegate.call((500_i32,)));

    delegate.connect::<(i32,), _, _>(&gauge, Gauge::set_or_panic);
    let panicked = captured(|| delegate.call((5_i32,)));

    assert_eq!(
        failed,
        [(
            Level::Warn,
            String::from("delegate call dropped: receiver method failed: gauge overflow")
        )]
    );
    assert_eq!(
        panicked,
        [(
            Level::Warn,
            String::from("delegate call dropped: receiver method panicked: needle snapped")
        )]
    );
}

#[test]
fn dropped_receiver_stays_below_warn() {
    let gauge = Rc::new(Gauge);
    let mut delegate = Delegate::new();
    delegate.connect::<(i32,), _, _>(&gauge, Gauge::set);
    drop(gauge);

    let records = captured(|| {
        delegate.call((1_i32,));
        delegate.connect_weak::<(i32,), _, _>(rc::Weak::<Gauge>::new(), Gauge::set);
    });

    assert_eq!(
        records,
        [
            (Level::Trace, String::from("delegate receiver has been dropped")),
            (Level::Debug, String::from("ignoring connect to a dropped receiver")),
        ]
    );
    assert!(records.iter().all(|(level, _)| *level > Level::Warn));
}

#[test]
fn sync_delegate_reports_the_same_way() {
    let gauge = Arc::new(Gauge);
    let delegate = SyncDelegate::new();
    delegate.connect::<(i32,), _, _>(&gauge, Gauge::set_checked);

    let records = captured(|| {
        delegate.call((1_i32,));
        delegate.call((1_u8,));
        delegate.call((101_i32,));
    });

    let levels: Vec<_> = records.iter().map(|(level, _)| *level).collect();
    assert_eq!(levels, [Level::Warn, Level::Warn]);
    assert!(records[0].1.contains("invoked with (u8)"));
    assert!(records[1].1.ends_with("gauge overflow"));
}
