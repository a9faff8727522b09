use std::cell::RefCell;
use std::rc::Rc;

use kinetic_motion_core::{
    AnimOptions, AnimateOpts, ClockState, Config, Easing, EntityId, EntityResolver, QueueOpts,
    Scheduler, SchedulerEvent, StopOpts, VisualUpdate,
};

fn recorder() -> (Rc<RefCell<Vec<(EntityId, f32)>>>, VisualUpdate) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let cb: VisualUpdate = Rc::new(move |entity: EntityId, progress: f32, _opts: &AnimOptions| {
        sink.borrow_mut().push((entity, progress));
    });
    (log, cb)
}

fn linear_opts(duration_ms: f64) -> AnimateOpts {
    AnimateOpts {
        duration_ms,
        easing: Easing::Linear,
        ..AnimateOpts::default()
    }
}

#[test]
fn animate_returns_one_member_per_entity() {
    let mut sched = Scheduler::new(Config::default());
    let a = EntityId(1);
    let b = EntityId(2);
    let (_, cb) = recorder();

    let set = sched.animate(&[a, b], cb, 0.0, linear_opts(100.0));
    assert_eq!(set.len(), 2);
    assert_eq!(set.entities(), &[a, b]);
    assert!(set.poll().is_none());

    sched.tick(100.0);
    assert_eq!(set.poll(), Some(Ok(vec![a, b])), "resolved in creation order");
}

#[test]
fn set_rejects_fail_fast_when_one_member_is_stopped() {
    let mut sched = Scheduler::new(Config::default());
    let a = EntityId(3);
    let b = EntityId(4);
    let (_, cb) = recorder();

    let set = sched.animate(&[a, b], cb, 0.0, linear_opts(1000.0));
    sched.stop(&[a], StopOpts { finish: false });

    assert_eq!(
        set.poll(),
        Some(Err(a)),
        "one rejection settles the set while the other member still runs"
    );
    assert!(sched.is_animating(b));
}

#[test]
fn stop_set_forwards_to_every_member() {
    let mut sched = Scheduler::new(Config::default());
    let a = EntityId(5);
    let b = EntityId(6);
    let (log, cb) = recorder();

    let set = sched.animate(&[a, b], cb, 0.0, linear_opts(1000.0));
    sched.stop_set(&set, StopOpts { finish: true });

    let log = log.borrow();
    assert!(log.contains(&(a, 1.0)));
    assert!(log.contains(&(b, 1.0)));
    assert_eq!(set.poll(), Some(Ok(vec![a, b])));
    assert_eq!(sched.active_animation_count(), 0);
}

struct ListResolver(Vec<EntityId>);

impl EntityResolver for ListResolver {
    fn resolve(&mut self, _selector: &str) -> Vec<EntityId> {
        self.0.clone()
    }
}

#[test]
fn animate_matching_goes_through_the_resolver() {
    let mut sched = Scheduler::new(Config::default());
    let mut resolver = ListResolver(vec![EntityId(7), EntityId(8)]);
    let (_, cb) = recorder();

    let set = sched.animate_matching(&mut resolver, ".box", cb, 0.0, linear_opts(100.0));
    assert_eq!(set.entities(), &[EntityId(7), EntityId(8)]);
    assert!(sched.is_animating(EntityId(7)));
    assert!(sched.is_animating(EntityId(8)));
}

#[test]
fn delay_alone_keeps_the_clock_alive() {
    let mut sched = Scheduler::new(Config::default());
    let node = EntityId(9);

    sched.delay(node, 32.0, QueueOpts::default());
    assert_eq!(sched.clock_state(), ClockState::Running);

    sched.tick(0.0);
    sched.tick(16.0);
    assert_eq!(sched.clock_state(), ClockState::Running);

    sched.tick(32.0);
    assert_eq!(sched.clock_state(), ClockState::Idle);
    assert!(!sched.has_work());
}

#[test]
fn events_serialize_to_json() {
    let event = SchedulerEvent::QueueFailed {
        entity: EntityId(1),
        queue: "default".to_string(),
        message: "queue operation failed: boom".to_string(),
    };
    let json = serde_json::to_value(&event).expect("event serializes");
    let text = json.to_string();
    assert!(text.contains("QueueFailed"));
    assert!(text.contains("boom"));
}

#[test]
fn easing_defaults_match_the_public_contract() {
    let opts = AnimateOpts::default();
    assert_eq!(opts.duration_ms, 1000.0);
    assert_eq!(opts.easing, Easing::EaseInOut);
    assert!(!opts.infinite);
    assert!(!opts.debug);

    let stop = StopOpts::default();
    assert!(stop.finish);
}
