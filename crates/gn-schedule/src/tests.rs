//! Unit tests for gn-schedule.

#[cfg(test)]
mod wake_queue {
    use gn_core::{AgentId, Tick};

    use crate::WakeQueue;

    #[test]
    fn empty() {
        let q = WakeQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.next_tick(), None);
        assert_eq!(q.tick_count(), 0);
    }

    #[test]
    fn push_and_len() {
        let mut q = WakeQueue::new();
        q.push(Tick(300), AgentId(0));
        q.push(Tick(300), AgentId(1));
        q.push(Tick(600), AgentId(2));
        assert_eq!(q.len(), 3);
        assert_eq!(q.tick_count(), 2);
        assert_eq!(q.next_tick(), Some(Tick(300)));
    }

    #[test]
    fn drain_sorts_agents() {
        let mut q = WakeQueue::new();
        q.push(Tick(5), AgentId(9));
        q.push(Tick(5), AgentId(2));
        q.push(Tick(5), AgentId(4));
        assert_eq!(q.drain_tick(Tick(5)), Some(vec![AgentId(2), AgentId(4), AgentId(9)]));
        assert!(q.is_empty());
        assert_eq!(q.drain_tick(Tick(5)), None);
    }

    #[test]
    fn pop_due_respects_horizon() {
        let mut q = WakeQueue::new();
        q.push(Tick(100), AgentId(0));
        q.push(Tick(200), AgentId(1));
        assert_eq!(q.pop_due(Tick(50)), None);
        assert_eq!(q.pop_due(Tick(150)), Some((Tick(100), vec![AgentId(0)])));
        assert_eq!(q.pop_due(Tick(150)), None);
        assert_eq!(q.pop_due(Tick(200)), Some((Tick(200), vec![AgentId(1)])));
        assert!(q.is_empty());
    }

    #[test]
    fn cancel_removes_single_entry() {
        let mut q = WakeQueue::new();
        q.push(Tick(10), AgentId(0));
        q.push(Tick(10), AgentId(1));
        assert!(q.cancel(Tick(10), AgentId(0)));
        assert_eq!(q.len(), 1);
        assert_eq!(q.drain_tick(Tick(10)), Some(vec![AgentId(1)]));
    }

    #[test]
    fn cancel_last_entry_removes_tick() {
        let mut q = WakeQueue::new();
        q.push(Tick(10), AgentId(0));
        q.push(Tick(20), AgentId(1));
        assert!(q.cancel(Tick(10), AgentId(0)));
        assert_eq!(q.tick_count(), 1);
        assert_eq!(q.next_tick(), Some(Tick(20)));
    }

    #[test]
    fn cancel_missing_is_false() {
        let mut q = WakeQueue::new();
        q.push(Tick(10), AgentId(0));
        assert!(!q.cancel(Tick(11), AgentId(0)));
        assert!(!q.cancel(Tick(10), AgentId(5)));
        assert_eq!(q.len(), 1);
    }
}
