//! A ticking observer driven by a virtual clock

use reflux::{
    CompositeDisposable, DateScheduler, Disposable, Event, Observer, SerialDisposable,
    TestScheduler,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

fn main() {
    // A virtual clock that only moves when we advance it
    let scheduler = Arc::new(TestScheduler::new(0));

    let observer: Observer<u64, String> = Observer::builder()
        .on_next(|tick| println!("tick {}", tick))
        .on_completed(|| println!("completed"))
        .build();

    // Emit a tick every 10 units of virtual time
    let counter = Arc::new(AtomicU64::new(0));
    let ticks = {
        let observer = observer.clone();
        let counter = counter.clone();
        scheduler
            .schedule_recurring(10, 10, Box::new(move || {
                let tick = counter.fetch_add(1, Ordering::SeqCst) + 1;
                observer.send_next(tick);
            }))
            .unwrap()
    };

    // Everything the stream owns lives in one composite
    let resources = Arc::new(CompositeDisposable::new());
    resources.add(ticks);
    resources.add_action(|| println!("resources released"));

    // Completion is scheduled through a serial slot so it can be pushed back
    let completion = Arc::new(SerialDisposable::new());
    let complete_at = |date| {
        let observer = observer.clone();
        let resources = resources.clone();
        scheduler.schedule_after_date(
            date,
            Box::new(move || {
                observer.send(Event::Completed);
                resources.dispose();
            }),
        )
    };
    completion.set_inner(Some(complete_at(35)));

    scheduler.advance_to_date(30).unwrap();
    println!("clock at {}, postponing completion", scheduler.current_date());
    completion.set_inner(Some(complete_at(55)));

    scheduler.run().unwrap();

    assert_eq!(counter.load(Ordering::SeqCst), 5);
    assert!(resources.is_disposed());
    println!("pending after run: {}", scheduler.pending_count());
}
