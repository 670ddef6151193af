use super::*;

#[test]
fn fires_in_due_order_then_insertion_order() {
    let mut q = TimerQueue::new();
    q.schedule(Millis(800), "settle");
    q.schedule(Millis(200), "tail");
    q.schedule(Millis(800), "debounce");

    assert_eq!(q.next_due(), Some(Millis(200)));
    assert_eq!(q.pop_due(Millis(100)), None);
    assert_eq!(q.pop_due(Millis(1000)), Some((Millis(200), "tail")));
    assert_eq!(q.pop_due(Millis(1000)), Some((Millis(800), "settle")));
    assert_eq!(q.pop_due(Millis(1000)), Some((Millis(800), "debounce")));
    assert!(q.is_empty());
}

#[test]
fn cancelled_timers_never_fire() {
    let mut q = TimerQueue::new();
    let id = q.schedule(Millis(10), 1);
    q.schedule(Millis(20), 2);
    assert_eq!(id.due(), Millis(10));
    assert_eq!(q.cancel(id), Some(1));
    assert_eq!(q.cancel(id), None);
    assert_eq!(q.pop_due(Millis(30)), Some((Millis(20), 2)));
}

#[test]
fn cancel_where_filters_by_event() {
    let mut q = TimerQueue::new();
    q.schedule(Millis(1), 'a');
    q.schedule(Millis(2), 'b');
    q.schedule(Millis(3), 'a');
    assert_eq!(q.cancel_where(|e| *e == 'a'), 2);
    assert_eq!(q.len(), 1);
}
