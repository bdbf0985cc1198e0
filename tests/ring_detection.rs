//! Ring detection task running under the task queue

use std::sync::{Arc, Mutex};

use robot_tasks::core::scheduler::{EventKind, RobotEvent, TaskQueue};
use robot_tasks::core::telemetry::TelemetryBuffer;
use robot_tasks::core::traits::MockTime;
use robot_tasks::devices::vision::{Detection, MockVision};
use robot_tasks::parameters::{DetectionParams, ParamValue, ParameterStore};
use robot_tasks::tasks::{DetectionKind, RingDetectionTask, RingLabels};

struct Rig {
    queue: TaskQueue<MockTime>,
    vision: MockVision,
    time: MockTime,
}

fn rig(configure: impl FnOnce(&mut RingDetectionTask<MockVision, MockTime>)) -> Rig {
    let time = MockTime::new();
    let vision = MockVision::new();
    let mut task = RingDetectionTask::new(vision.clone(), time.clone());
    configure(&mut task);

    let mut queue = TaskQueue::new(time.clone());
    queue.add_task(task);
    Rig {
        queue,
        vision,
        time,
    }
}

fn detections(event: &RobotEvent) -> Vec<Detection> {
    event.detections().unwrap_or_default().to_vec()
}

fn quad(w: f32, h: f32) -> Detection {
    Detection::new("Quad", w, h, 0.8)
}

fn single(w: f32, h: f32) -> Detection {
    Detection::new("Single", w, h, 0.8)
}

#[test]
fn all_policy_posts_whole_batch() {
    let mut rig = rig(|_| {});
    let batch = vec![Detection::new("Mystery", 1.0, 2.0, 0.4), quad(3.0, 3.0)];
    rig.vision.push_batch(batch.clone());

    rig.queue.run_round();

    let events = rig.queue.drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind(), EventKind::ObjectsDetected);
    assert_eq!(detections(&events[0]), batch);
}

#[test]
fn quad_policy_posts_only_quads() {
    let mut rig = rig(|task| task.set_detection_kind(DetectionKind::QuadRing));
    rig.vision
        .push_batch(vec![quad(1.0, 1.0), single(1.0, 1.0), quad(2.0, 2.0)]);
    rig.vision.push_batch(vec![single(1.0, 1.0), single(2.0, 2.0)]);

    rig.queue.run_round();
    rig.queue.run_round();

    let events = rig.queue.drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(detections(&events[0]), vec![quad(1.0, 1.0), quad(2.0, 2.0)]);
}

#[test]
fn largest_single_policy_posts_singleton() {
    let mut rig = rig(|task| task.set_detection_kind(DetectionKind::LargestSingleRing));
    rig.vision.push_batch(vec![
        single(2.0, 5.0),
        single(5.0, 10.0),
        single(3.0, 10.0),
    ]);
    let first = single(10.0, 5.0).at(10.0, 0.0);
    let second = single(5.0, 10.0).at(90.0, 0.0);
    rig.vision.push_batch(vec![first.clone(), second]);

    rig.queue.run_round();
    rig.queue.run_round();

    let events = rig.queue.drain_events();
    assert_eq!(events.len(), 2);
    assert_eq!(detections(&events[0]), vec![single(5.0, 10.0)]);
    assert_eq!(detections(&events[1]), vec![first]);
}

#[test]
fn unknown_policy_posts_nothing() {
    let mut rig = rig(|task| task.set_detection_kind(DetectionKind::Unknown));
    rig.vision.push_batch(vec![quad(1.0, 1.0), single(1.0, 1.0)]);

    rig.queue.run_round();

    assert_eq!(rig.vision.fetch_count(), 1);
    assert_eq!(rig.queue.pending_events(), 0);
}

#[test]
fn empty_batches_post_nothing() {
    let mut rig = rig(|_| {});
    for _ in 0..5 {
        rig.queue.run_round();
    }
    assert_eq!(rig.vision.fetch_count(), 5);
    assert_eq!(rig.queue.pending_events(), 0);
}

#[test]
fn rate_limit_gates_fetches() {
    let mut rig = rig(|task| task.set_rate_limit_ms(200));
    rig.vision.push_batch(vec![quad(1.0, 1.0)]);

    // Interval counts from start
    rig.time.advance_ms(150);
    rig.queue.run_round();
    assert_eq!(rig.vision.fetch_count(), 0);
    assert_eq!(rig.queue.pending_events(), 0);

    rig.time.advance_ms(50);
    rig.queue.run_round();
    assert_eq!(rig.vision.fetch_count(), 1);
    assert_eq!(rig.queue.pending_events(), 1);

    // Counter restarted by the fetch
    rig.time.advance_ms(199);
    rig.queue.run_round();
    assert_eq!(rig.vision.fetch_count(), 1);

    rig.time.advance_ms(1);
    rig.queue.run_round();
    assert_eq!(rig.vision.fetch_count(), 2);
}

#[test]
fn sub_millisecond_progress_does_not_count() {
    let mut rig = rig(|task| task.set_rate_limit_ms(1));

    rig.time.advance(999);
    rig.queue.run_round();
    assert_eq!(rig.vision.fetch_count(), 0);

    rig.time.advance(1);
    rig.queue.run_round();
    assert_eq!(rig.vision.fetch_count(), 1);
}

#[test]
fn stop_deactivates_vision() {
    let mut rig = rig(|_| {});
    assert!(rig.vision.is_active());

    rig.queue.stop_all();

    assert!(!rig.vision.is_active());
    assert_eq!(rig.vision.deactivations(), 1);
    assert!(rig.queue.is_empty());
}

#[test]
fn unavailable_vision_leaves_inert_task() {
    let time = MockTime::new();
    let vision = MockVision::unavailable();
    let telemetry = Arc::new(Mutex::new(TelemetryBuffer::new()));
    let task = RingDetectionTask::new(vision.clone(), time.clone())
        .with_telemetry(Arc::clone(&telemetry));

    let mut queue = TaskQueue::new(time);
    let id = queue.add_task(task);
    vision.push_batch(vec![quad(1.0, 1.0)]);
    queue.run_round();

    assert!(queue.contains(id));
    assert_eq!(queue.stats().start_failures, 1);
    assert_eq!(vision.fetch_count(), 0);
    assert_eq!(queue.pending_events(), 0);
    assert_eq!(
        telemetry.lock().unwrap().latest("Sorry!"),
        Some("This device is not compatible with TFOD")
    );
}

#[test]
fn configured_from_parameter_store() {
    let mut store = ParameterStore::new();
    DetectionParams::register_defaults(&mut store).unwrap();
    store.set("RDET_KIND", ParamValue::Int(2)).unwrap();
    store.set("RDET_SNGL_LBL", ParamValue::string("Donut")).unwrap();
    let params = DetectionParams::from_store(&store);
    assert!(params.is_valid());

    let time = MockTime::new();
    let vision = MockVision::new();
    let mut queue = TaskQueue::new(time.clone());
    queue.add_task(RingDetectionTask::from_params(vision.clone(), time, &params));

    let donut = Detection::new("Donut", 1.0, 1.0, 0.6);
    vision.push_batch(vec![single(1.0, 1.0), donut.clone()]);
    queue.run_round();

    let events = queue.drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(detections(&events[0]), vec![donut]);

    let labels = RingLabels {
        quad: "Quad".into(),
        single: "Donut".into(),
    };
    assert_eq!(params.labels, labels);
}
