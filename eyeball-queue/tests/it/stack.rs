use assert_matches::assert_matches;
use stream_assert::{assert_closed, assert_next_eq, assert_pending};

use eyeball_queue::{CollectionChange, DispatchContext, Error, Notification, ObservableStack};

use crate::batch;

#[test]
fn lifo_order() {
    let mut ob = ObservableStack::with_context(DispatchContext::inline());
    ob.push('a');
    ob.push('b');
    ob.push('c');

    assert_eq!(ob.peek(), Ok(&'c'));
    assert_eq!(ob.to_vec(), ['c', 'b', 'a']);
    assert_eq!(ob.pop(), Ok('c'));
    assert_eq!(ob.pop(), Ok('b'));
    assert_eq!(ob.pop(), Ok('a'));
    assert_matches!(ob.pop(), Err(Error::EmptyContainer));
    assert_matches!(ob.peek(), Err(Error::EmptyContainer));
}

#[test]
fn top_is_index_zero() {
    let mut ob = ObservableStack::with_context(DispatchContext::inline());
    let mut sub = ob.subscribe();

    ob.push(1);
    ob.push(2);
    assert_eq!(ob.pop(), Ok(2));

    let expected = [
        batch(CollectionChange::Add { item: 1, index: 0 }),
        batch(CollectionChange::Add { item: 2, index: 0 }),
        batch(CollectionChange::Remove { item: 2, index: 0 }),
    ];
    for n in expected.into_iter().flatten() {
        assert_next_eq!(sub, n);
    }
    assert_pending!(sub);

    assert_matches!(ob.pop(), Ok(1));
    assert_matches!(ob.pop(), Err(Error::EmptyContainer));
    for n in batch(CollectionChange::Remove { item: 1, index: 0 }) {
        assert_next_eq!(sub, n);
    }
    assert_pending!(sub);

    drop(ob);
    assert_closed!(sub);
}

#[test]
fn mirror() {
    let mut ob: ObservableStack<u32> = vec![1, 2].into();
    let mut sub = ob.subscribe();
    let mut mirror = ob.to_vec();

    ob.push(3);
    ob.pop().unwrap();
    ob.pop().unwrap();
    ob.push(4);
    ob.push(5);
    ob.clear();
    ob.push(6);
    ob.push(7);

    while let Some(notification) = sub.next_now() {
        if let Notification::CollectionChanged(change) = notification {
            change.apply(&mut mirror);
        }
    }
    assert_eq!(mirror, ob.to_vec());
    assert_eq!(mirror, [7, 6]);
}

#[test]
fn read_operations() {
    let ob = ObservableStack::from_iter_with_context(0..4, DispatchContext::inline());
    assert_eq!(ob.len(), 4);
    assert!(ob.contains(&0));
    assert!(!ob.contains(&4));
    assert_eq!(ob.iter().copied().collect::<Vec<_>>(), [3, 2, 1, 0]);

    let mut dest = [0; 4];
    ob.copy_to(&mut dest, 0).unwrap();
    assert_eq!(dest, [3, 2, 1, 0]);
    assert_matches!(ob.copy_to(&mut dest, 1), Err(Error::InvalidArgument { .. }));

    assert_eq!(ob.into_inner(), [0, 1, 2, 3]);
}

#[test]
fn capacity() {
    let mut ob = ObservableStack::<u8>::with_capacity(64);
    ob.push(1);
    assert!(ob.into_inner().capacity() >= 64);

    let mut ob = ObservableStack::<u8>::with_capacity(64);
    ob.push(1);
    ob.shrink_to_fit();
    assert_eq!(ob.len(), 1);

    assert_matches!(
        ObservableStack::<u64>::try_with_capacity(usize::MAX),
        Err(Error::InvalidArgument { name: "capacity", .. })
    );
}
