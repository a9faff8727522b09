use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kinetic_motion_core::{
    AnimOptions, AnimateOpts, Config, Easing, EntityId, QueueOpts, Scheduler, VisualUpdate,
};

fn bench_tick_many_animations(c: &mut Criterion) {
    c.bench_function("tick_1000_infinite_animations", |b| {
        let mut sched = Scheduler::new(Config::default());
        let entities: Vec<EntityId> = (0u32..1000).map(EntityId).collect();
        let cb: VisualUpdate = Rc::new(|_e: EntityId, p: f32, _o: &AnimOptions| {
            black_box(p);
        });
        sched.animate(
            &entities,
            cb,
            0.0,
            AnimateOpts {
                duration_ms: 1000.0,
                easing: Easing::EaseInOut,
                infinite: true,
                ..AnimateOpts::default()
            },
        );
        let mut now = 0.0;
        b.iter(|| {
            now += 16.0;
            let out = sched.tick(now);
            black_box(out.events.len());
        });
    });
}

fn bench_queue_churn(c: &mut Criterion) {
    c.bench_function("enqueue_and_drain_100_ops", |b| {
        let mut sched = Scheduler::new(Config::default());
        let node = EntityId(0);
        let mut now = 0.0;
        b.iter(|| {
            for _ in 0..100 {
                sched.queue(
                    node,
                    |_s: &mut Scheduler, _e| Ok(kinetic_motion_core::OpOutcome::Complete),
                    QueueOpts::default(),
                );
            }
            now += 16.0;
            black_box(sched.tick(now).events.len());
        });
    });
}

criterion_group!(benches, bench_tick_many_animations, bench_queue_churn);
criterion_main!(benches);
