use proptest::prelude::*;
use reflux_disposables::{
    ActionDisposable, CompositeDisposable, Disposable, DisposableHandle, DisposableRef,
    SimpleDisposable,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;

fn recorder(log: &Arc<Mutex<Vec<usize>>>, id: usize) -> DisposableRef {
    let log = log.clone();
    Arc::new(ActionDisposable::new(move || {
        log.lock().unwrap().push(id);
    }))
}

#[test]
fn test_disposes_in_reverse_insertion_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let composite = CompositeDisposable::new();

    composite.add(recorder(&log, 1));
    composite.add(recorder(&log, 2));
    composite.add(recorder(&log, 3));
    assert_eq!(composite.len(), 3);

    composite.dispose();
    assert_eq!(*log.lock().unwrap(), vec![3, 2, 1]);
    assert!(composite.is_disposed());
    assert!(composite.is_empty());
}

#[test]
fn test_initial_disposables_are_owned() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let composite =
        CompositeDisposable::with_disposables((1..=3).map(|id| recorder(&log, id)));
    composite.add(recorder(&log, 4));

    composite.dispose();
    assert_eq!(*log.lock().unwrap(), vec![4, 3, 2, 1]);
}

#[test]
fn test_dispose_is_idempotent() {
    let count = Arc::new(AtomicUsize::new(0));
    let composite = CompositeDisposable::new();
    {
        let count = count.clone();
        composite.add_action(move || {
            count.fetch_add(1, Ordering::SeqCst);
        });
    }

    for _ in 0..5 {
        composite.dispose();
    }
    assert!(composite.is_disposed());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_handle_removal_detaches_without_disposing() {
    let d = Arc::new(SimpleDisposable::new());
    let composite = CompositeDisposable::new();

    let handle = composite.add(d.clone());
    handle.remove();
    assert_eq!(composite.len(), 0);

    composite.dispose();
    assert!(!d.is_disposed());
}

#[test]
fn test_handle_removal_is_idempotent() {
    let composite = CompositeDisposable::new();
    let keep = Arc::new(SimpleDisposable::new());
    let drop_me = Arc::new(SimpleDisposable::new());

    composite.add(keep.clone());
    let handle = composite.add(drop_me.clone());

    handle.remove();
    handle.remove();
    assert_eq!(composite.len(), 1);

    composite.dispose();
    assert!(keep.is_disposed());
    assert!(!drop_me.is_disposed());
}

#[test]
fn test_add_after_dispose_disposes_immediately() {
    let composite = CompositeDisposable::new();
    composite.dispose();

    let d = Arc::new(SimpleDisposable::new());
    let handle = composite.add(d.clone());

    assert!(d.is_disposed());
    assert_eq!(composite.len(), 0);
    handle.remove();
}

#[test]
fn test_add_absent_returns_empty_handle() {
    let composite = CompositeDisposable::new();
    let handle = composite.add_optional(None);
    handle.remove();

    assert_eq!(composite.len(), 0);
    assert!(!composite.is_disposed());
}

#[test]
fn test_handle_does_not_keep_composite_alive() {
    let composite = Arc::new(CompositeDisposable::new());
    let d = Arc::new(SimpleDisposable::new());
    let handle = composite.add(d.clone());

    let weak = Arc::downgrade(&composite);
    drop(composite);
    assert!(weak.upgrade().is_none());

    // Composite is gone; removal silently does nothing.
    handle.remove();
    assert!(!d.is_disposed());
}

#[test]
fn test_remove_after_dispose_is_noop() {
    let composite = CompositeDisposable::new();
    let d = Arc::new(SimpleDisposable::new());
    let handle = composite.add(d.clone());

    composite.dispose();
    handle.remove();
    assert!(d.is_disposed());
}

#[test]
fn test_empty_handle_debug() {
    let handle = DisposableHandle::empty();
    let rendered = format!("{:?}", handle);
    assert!(rendered.contains("attached: false"));
}

#[test]
fn test_nested_composites() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let outer = CompositeDisposable::new();
    let inner = Arc::new(CompositeDisposable::new());

    outer.add(recorder(&log, 1));
    outer.add(inner.clone());
    inner.add(recorder(&log, 2));
    inner.add(recorder(&log, 3));
    outer.add(recorder(&log, 4));

    outer.dispose();
    assert!(inner.is_disposed());
    assert_eq!(*log.lock().unwrap(), vec![4, 3, 2, 1]);
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_concurrent_add_and_dispose_leaks_nothing() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 200;

    for _ in 0..20 {
        let composite = Arc::new(CompositeDisposable::new());
        let barrier = Arc::new(Barrier::new(THREADS + 1));
        let created = Arc::new(Mutex::new(Vec::new()));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let composite = composite.clone();
                let barrier = barrier.clone();
                let created = created.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..PER_THREAD {
                        let d = Arc::new(SimpleDisposable::new());
                        created.lock().unwrap().push(d.clone());
                        composite.add(d);
                    }
                })
            })
            .collect();

        barrier.wait();
        composite.dispose();

        for h in handles {
            h.join().unwrap();
        }

        // Whether added before or after disposal, every entry ends up disposed.
        let created = created.lock().unwrap();
        assert_eq!(created.len(), THREADS * PER_THREAD);
        assert!(created.iter().all(|d| d.is_disposed()));
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_concurrent_handle_removal() {
    const THREADS: usize = 4;
    const PER_THREAD: usize = 500;

    let composite = Arc::new(CompositeDisposable::new());
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let composite = composite.clone();
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    let handle = composite.add(Arc::new(SimpleDisposable::new()));
                    if i % 2 == 0 {
                        handle.remove();
                    }
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(composite.len(), THREADS * PER_THREAD / 2);
}

proptest! {
    #[test]
    fn prop_disposal_order_is_reverse_of_survivors(
        detach in prop::collection::vec(any::<bool>(), 1..64),
    ) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let composite = CompositeDisposable::new();

        let handles: Vec<_> = (0..detach.len())
            .map(|id| composite.add(recorder(&log, id)))
            .collect();

        let mut expected = Vec::new();
        for (id, handle) in handles.iter().enumerate() {
            if detach[id] {
                handle.remove();
            } else {
                expected.push(id);
            }
        }
        expected.reverse();

        composite.dispose();
        prop_assert_eq!(log.lock().unwrap().clone(), expected);
    }
}
