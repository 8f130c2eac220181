use assert_matches::assert_matches;
use stream_assert::{assert_closed, assert_next_eq, assert_pending};

use eyeball_queue::{
    CollectionChange, DispatchContext, Error, Notification, ObservableQueue, Property,
};

use crate::{batch, Recorder};

fn queue<T: Clone + Send + Sync + 'static>() -> ObservableQueue<T> {
    ObservableQueue::with_context(DispatchContext::inline())
}

#[test]
fn fifo_order() {
    let mut ob = queue();
    for i in 1..=5 {
        ob.enqueue(i);
    }

    let out: Vec<_> = (0..5).map(|_| ob.dequeue().unwrap()).collect();
    assert_eq!(out, [1, 2, 3, 4, 5]);
    assert!(ob.is_empty());
}

#[test]
fn enqueue_dequeue_trace() {
    let mut ob = queue();
    let recorder = Recorder::new();
    let _subscription = ob.observe(recorder.clone());

    ob.enqueue(5);
    ob.enqueue(7);
    assert_eq!(ob.len(), 2);
    assert_eq!(ob.to_vec(), [5, 7]);

    assert_eq!(ob.dequeue(), Ok(5));
    assert_eq!(ob.len(), 1);

    let expected: Vec<_> = [
        batch(CollectionChange::Add { item: 5, index: 0 }),
        batch(CollectionChange::Add { item: 7, index: 1 }),
        batch(CollectionChange::Remove { item: 5, index: 0 }),
    ]
    .into_iter()
    .flatten()
    .collect();
    assert_eq!(recorder.take(), expected);
}

#[test]
fn len_matches_contents() {
    let mut ob = queue();
    for step in 0..20 {
        if step % 3 == 2 {
            ob.dequeue().unwrap();
        } else {
            ob.enqueue(step);
        }
        assert_eq!(ob.len(), ob.to_vec().len());
        assert_eq!(ob.len(), ob.iter().count());
    }
}

#[test]
fn empty() {
    let mut ob: ObservableQueue<i32> = queue();
    let mut sub = ob.subscribe();

    assert_matches!(ob.dequeue(), Err(Error::EmptyContainer));
    assert_matches!(ob.peek(), Err(Error::EmptyContainer));
    assert!(ob.is_empty());
    assert_pending!(sub);

    ob.enqueue(1);
    ob.clear();
    assert_matches!(ob.peek(), Err(Error::EmptyContainer));
}

#[test]
fn peek() {
    let mut ob = queue();
    let mut sub = ob.subscribe();
    ob.enqueue("a");
    ob.enqueue("b");
    for n in batch(CollectionChange::Add { item: "a", index: 0 }) {
        assert_next_eq!(sub, n);
    }
    for n in batch(CollectionChange::Add { item: "b", index: 1 }) {
        assert_next_eq!(sub, n);
    }

    assert_eq!(ob.peek(), Ok(&"a"));
    assert_eq!(ob.peek(), Ok(&"a"));
    assert_eq!(ob.len(), 2);
    assert_pending!(sub);
}

#[test]
fn clear() {
    let mut ob: ObservableQueue<i32> = (0..100).collect();
    assert_eq!(ob.len(), 100);
    let mut sub = ob.subscribe();

    ob.clear();
    assert!(ob.is_empty());
    for n in batch(CollectionChange::Reset) {
        assert_next_eq!(sub, n);
    }
    assert_pending!(sub);

    // Clearing an empty queue is still reported.
    ob.clear();
    for n in batch(CollectionChange::Reset) {
        assert_next_eq!(sub, n);
    }
    assert_pending!(sub);

    ob.enqueue(1);
    assert_next_eq!(sub, Notification::PropertyChanged(Property::Count));
    assert_next_eq!(sub, Notification::PropertyChanged(Property::Indexer));
    assert_next_eq!(
        sub,
        Notification::CollectionChanged(CollectionChange::Add { item: 1, index: 0 })
    );

    drop(ob);
    assert_closed!(sub);
}

#[test]
fn read_operations() {
    let mut ob = queue();
    let mut sub = ob.subscribe();

    ob.enqueue(String::from("x"));
    ob.enqueue(String::from("y"));
    while sub.next_now().is_some() {}

    assert!(ob.contains(&"y".to_owned()));
    assert!(!ob.contains(&"z".to_owned()));

    let mut dest = vec![String::new(); 4];
    ob.copy_to(&mut dest, 1).unwrap();
    assert_eq!(dest, ["", "x", "y", ""]);
    ob.copy_to(&mut dest, 2).unwrap();
    assert_eq!(dest, ["", "x", "x", "y"]);

    assert_matches!(
        ob.copy_to(&mut dest, 3),
        Err(Error::InvalidArgument { name: "dest", .. })
    );
    assert_matches!(
        ob.copy_to(&mut dest, 5),
        Err(Error::InvalidArgument { name: "offset", .. })
    );
    assert_eq!(dest, ["", "x", "x", "y"]);

    ob.shrink_to_fit();
    assert_eq!((&ob).into_iter().collect::<Vec<_>>(), ["x", "y"]);
    assert_pending!(sub);

    assert_eq!(ob.into_inner(), ["x", "y"]);
}

#[test]
fn capacity() {
    let ob = ObservableQueue::<u64>::with_capacity_and_context(32, DispatchContext::inline());
    assert!(ob.is_empty());
    assert!(ob.into_inner().capacity() >= 32);

    assert_matches!(
        ObservableQueue::<u64>::try_with_capacity(usize::MAX),
        Err(Error::InvalidArgument { name: "capacity", .. })
    );
}

#[test]
fn from_items() {
    let ob = ObservableQueue::from(vec![3, 1, 2]);
    assert_eq!(ob.peek(), Ok(&3));
    assert_eq!(ob.to_vec(), [3, 1, 2]);

    let ob = ObservableQueue::from_iter_with_context("abc".chars(), DispatchContext::inline());
    assert_eq!(ob.iter().collect::<String>(), "abc");
}

#[test]
fn unsubscribe() {
    let mut ob = queue();
    let recorder = Recorder::new();
    let subscription = ob.observe(recorder.clone());

    ob.enqueue(1);
    assert_eq!(recorder.take().len(), 3);

    drop(subscription);
    ob.enqueue(2);
    ob.dequeue().unwrap();
    assert!(recorder.take().is_empty());

    let detached = Recorder::new();
    ob.observe(detached.clone()).detach();
    ob.enqueue(3);
    assert_eq!(detached.take().len(), 3);
}

#[test]
fn mirror() {
    let mut ob = queue();
    let mut sub = ob.subscribe();
    let mut mirror = Vec::new();

    ob.enqueue(10);
    ob.enqueue(20);
    ob.dequeue().unwrap();
    ob.enqueue(30);
    ob.clear();
    ob.enqueue(40);
    ob.enqueue(50);
    ob.dequeue().unwrap();

    while let Some(notification) = sub.next_now() {
        if let Notification::CollectionChanged(change) = notification {
            change.map(|x| x * 2).apply(&mut mirror);
        }
    }
    assert_eq!(mirror, [100]);
    assert_eq!(ob.to_vec(), [50]);
}
