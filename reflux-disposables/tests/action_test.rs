use reflux_disposables::{
    ActionDisposable, Disposable, DisposableRef, ScopedDisposable, SimpleDisposable,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, OnceLock};
use std::thread;

fn counting_action(counter: &Arc<AtomicUsize>) -> ActionDisposable {
    let counter = counter.clone();
    ActionDisposable::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn test_action_runs_once() {
    let counter = Arc::new(AtomicUsize::new(0));
    let disposable = counting_action(&counter);

    assert!(!disposable.is_disposed());
    disposable.dispose();
    assert!(disposable.is_disposed());

    for _ in 0..10 {
        disposable.dispose();
    }
    assert!(disposable.is_disposed());
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_action_may_reenter_its_disposable() {
    let seen_disposed = Arc::new(AtomicUsize::new(0));
    let slot: Arc<OnceLock<Arc<ActionDisposable>>> = Arc::new(OnceLock::new());

    let disposable = {
        let slot = slot.clone();
        let seen_disposed = seen_disposed.clone();
        Arc::new(ActionDisposable::new(move || {
            if let Some(me) = slot.get() {
                if me.is_disposed() {
                    seen_disposed.fetch_add(1, Ordering::SeqCst);
                }
                me.dispose();
            }
        }))
    };
    let _ = slot.set(disposable.clone());

    disposable.dispose();
    assert_eq!(seen_disposed.load(Ordering::SeqCst), 1);
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_concurrent_dispose_runs_action_once() {
    const THREADS: usize = 16;

    for _ in 0..50 {
        let counter = Arc::new(AtomicUsize::new(0));
        let disposable = Arc::new(counting_action(&counter));
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let disposable = disposable.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    disposable.dispose();
                    assert!(disposable.is_disposed());
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}

#[test]
fn test_simple_disposable_flag() {
    let disposable = SimpleDisposable::new();
    assert!(!disposable.is_disposed());

    disposable.dispose();
    disposable.dispose();
    assert!(disposable.is_disposed());
}

#[test]
fn test_shared_pointers_forward_disposal() {
    let simple = Arc::new(SimpleDisposable::new());
    let erased: DisposableRef = simple.clone();
    let boxed: Box<dyn Disposable> = Box::new(simple.clone());

    assert!(!boxed.is_disposed());
    erased.dispose();
    assert!(simple.is_disposed());
    assert!(boxed.is_disposed());
}

#[test]
fn test_scoped_disposes_on_drop() {
    let counter = Arc::new(AtomicUsize::new(0));
    {
        let scoped = ScopedDisposable::new(counting_action(&counter));
        assert!(!scoped.is_disposed());
    }
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_scoped_explicit_dispose_then_drop() {
    let counter = Arc::new(AtomicUsize::new(0));
    let scoped = ScopedDisposable::new(counting_action(&counter));

    scoped.dispose();
    assert!(scoped.is_disposed());
    drop(scoped);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_scoped_into_inner_does_not_dispose() {
    let counter = Arc::new(AtomicUsize::new(0));
    let scoped = ScopedDisposable::new(counting_action(&counter));

    let inner = scoped.into_inner();
    assert!(!inner.is_disposed());
    assert_eq!(counter.load(Ordering::SeqCst), 0);

    inner.dispose();
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_scoped_derefs_to_inner() {
    let counter = Arc::new(AtomicUsize::new(0));
    let scoped = ScopedDisposable::new(counting_action(&counter));

    let inner: &ActionDisposable = &scoped;
    inner.dispose();
    assert!(scoped.is_disposed());
    drop(scoped);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_simple_flag_visible_across_threads() {
    let simple = Arc::new(SimpleDisposable::new());

    let disposer = {
        let simple = simple.clone();
        thread::spawn(move || simple.dispose())
    };
    disposer.join().unwrap();

    let observers: Vec<_> = (0..4)
        .map(|_| {
            let simple = simple.clone();
            thread::spawn(move || simple.is_disposed())
        })
        .collect();
    for h in observers {
        assert!(h.join().unwrap());
    }
}
