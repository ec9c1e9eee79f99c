use std::sync::{Arc, Mutex};

use record_reshape::processing::{
    group_by, index_by, CompositeObserver, DropReason, ReshapeContext, ReshapeMode,
    ReshapeObserver, ReshapeOptions, ReshapeStats, StdErrObserver,
};
use record_reshape::types::{KeyPath, Value};

#[derive(Default)]
struct RecordingObserver {
    drops: Mutex<Vec<(usize, DropReason)>>,
    finished: Mutex<Vec<(ReshapeMode, ReshapeStats)>>,
    alerts: Mutex<Vec<ReshapeStats>>,
}

impl ReshapeObserver for RecordingObserver {
    fn on_dropped(&self, _ctx: &ReshapeContext, record_index: usize, reason: &DropReason) {
        self.drops.lock().unwrap().push((record_index, reason.clone()));
    }

    fn on_finished(&self, ctx: &ReshapeContext, stats: ReshapeStats) {
        self.finished.lock().unwrap().push((ctx.mode, stats));
    }

    fn on_alert(&self, _ctx: &ReshapeContext, stats: ReshapeStats) {
        self.alerts.lock().unwrap().push(stats);
    }
}

fn rows() -> Vec<Value> {
    vec![
        Value::record([("dept", Value::from("x")), ("site", Value::from("n"))]),
        Value::record([("dept", Value::from("x"))]),
        Value::record([("site", Value::from("s"))]),
        Value::record([("dept", Value::from("y")), ("site", Value::from("s"))]),
    ]
}

#[test]
fn observer_receives_drops_and_stats_without_alert_below_threshold() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = ReshapeOptions {
        observer: Some(obs.clone()),
        alert_after_drops: Some(3),
        ..Default::default()
    };

    let out = group_by(&rows(), &KeyPath::new(["dept", "site"]).unwrap(), &opts);

    assert_eq!(out.leaf_records().len(), 2);
    assert_eq!(
        *obs.drops.lock().unwrap(),
        vec![
            (1, DropReason::MissingKey { key: "site".to_string() }),
            (2, DropReason::MissingKey { key: "dept".to_string() }),
        ]
    );
    assert_eq!(
        *obs.finished.lock().unwrap(),
        vec![(ReshapeMode::Group, ReshapeStats { input: 4, accepted: 2, dropped: 2 })]
    );
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn composite_observer_fans_out_and_alerts() {
    let a = Arc::new(RecordingObserver::default());
    let b = Arc::new(RecordingObserver::default());
    let observers: Vec<Arc<dyn ReshapeObserver>> =
        vec![a.clone(), b.clone(), Arc::new(StdErrObserver)];
    let composite = CompositeObserver::new(observers);
    let opts = ReshapeOptions {
        observer: Some(Arc::new(composite)),
        alert_after_drops: Some(1),
        ..Default::default()
    };

    let _ = group_by(&rows(), &KeyPath::from("site"), &opts);

    for obs in [&a, &b] {
        assert_eq!(obs.drops.lock().unwrap().len(), 1);
        assert_eq!(
            *obs.alerts.lock().unwrap(),
            vec![ReshapeStats { input: 4, accepted: 3, dropped: 1 }]
        );
    }
}

#[test]
fn zero_threshold_alerts_only_when_something_was_dropped() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = ReshapeOptions {
        observer: Some(obs.clone()),
        alert_after_drops: Some(0),
        ..Default::default()
    };

    let complete = vec![
        Value::record([("dept", "x")]),
        Value::record([("dept", "y")]),
    ];
    let _ = index_by(&complete, &KeyPath::from("dept"), &opts);
    assert!(obs.alerts.lock().unwrap().is_empty());
    assert_eq!(obs.finished.lock().unwrap().len(), 1);

    let _ = index_by(&rows(), &KeyPath::from("dept"), &opts);
    assert_eq!(
        *obs.alerts.lock().unwrap(),
        vec![ReshapeStats { input: 4, accepted: 3, dropped: 1 }]
    );
}

#[test]
fn drop_reasons_render_readably() {
    assert_eq!(
        DropReason::MissingKey { key: "dept".into() }.to_string(),
        "missing key 'dept'"
    );
    assert_eq!(
        DropReason::UnkeyableValue { key: "tags".into() }.to_string(),
        "value of 'tags' cannot be used as a key"
    );
}
