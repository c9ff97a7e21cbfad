use std::collections::{BTreeMap, HashMap};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
pub struct TimerQueue<E> {
    pending: BTreeMap<(DeadlineKey, TimerId), E>,
    deadlines: HashMap<TimerId, DeadlineKey>,
    next_id: u64,
}

#[derive(Clone, Copy, Debug)]
struct DeadlineKey(f64);

impl PartialEq for DeadlineKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0).is_eq()
    }
}

impl Eq for DeadlineKey {}

impl PartialOrd for DeadlineKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DeadlineKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            pending: BTreeMap::new(),
            deadlines: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<E> TimerQueue<E> {
    pub fn schedule(&mut self, deadline: f64, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let key = DeadlineKey(deadline);
        self.pending.insert((key, id), event);
        self.deadlines.insert(id, key);
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let Some(key) = self.deadlines.remove(&id) else {
            return false;
        };
        self.pending.remove(&(key, id)).is_some()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    pub fn pop_due(&mut self, now: f64) -> Option<(f64, E)> {
        let (&(key, id), _) = self.pending.first_key_value()?;
        if key.0 > now {
            return None;
        }
        self.deadlines.remove(&id);
        self.pending
            .remove(&(key, id))
            .map(|event| (key.0, event))
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.pending.first_key_value().map(|(&(key, _), _)| key.0)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.deadlines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_deadline_order() {
        let mut queue = TimerQueue::default();
        queue.schedule(2.0, "late");
        queue.schedule(1.0, "early");
        assert_eq!(queue.pop_due(5.0), Some((1.0, "early")));
        assert_eq!(queue.pop_due(5.0), Some((2.0, "late")));
        assert_eq!(queue.pop_due(5.0), None);
    }

    #[test]
    fn equal_deadlines_keep_schedule_order() {
        let mut queue = TimerQueue::default();
        queue.schedule(1.0, 'a');
        queue.schedule(1.0, 'b');
        assert_eq!(queue.pop_due(1.0).map(|(_, e)| e), Some('a'));
        assert_eq!(queue.pop_due(1.0).map(|(_, e)| e), Some('b'));
    }

    #[test]
    fn not_due_stays_pending() {
        let mut queue = TimerQueue::default();
        let id = queue.schedule(1.5, ());
        assert_eq!(queue.pop_due(1.49), None);
        assert!(queue.is_pending(id));
        assert_eq!(queue.next_deadline(), Some(1.5));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut queue = TimerQueue::default();
        let id = queue.schedule(1.0, ());
        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));
        assert_eq!(queue.pop_due(10.0), None);
        assert_eq!(queue.len(), 0);
    }
}
