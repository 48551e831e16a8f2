//! Unit tests for gn-net.

use gn_core::{AgentId, Cell, RecipientId, SessionId};

use crate::PositionUpdate;

fn update(agent: u32, x: i32, y: i32) -> PositionUpdate {
    PositionUpdate::new(AgentId(agent), Cell::new(x, y))
}

#[cfg(test)]
mod memory {
    use std::sync::Arc;

    use super::*;
    use crate::{Broadcaster, Envelope, MemoryBroadcaster};

    #[test]
    fn records_in_order_with_routing() {
        let b = MemoryBroadcaster::new();
        b.broadcast(&update(0, 1, 1), None, SessionId(3));
        b.broadcast(&update(1, 2, 1), Some(RecipientId(9)), SessionId(3));

        assert_eq!(b.envelopes(), vec![
            Envelope { update: update(0, 1, 1), exclude: None, session: SessionId(3) },
            Envelope { update: update(1, 2, 1), exclude: Some(RecipientId(9)), session: SessionId(3) },
        ]);
    }

    #[test]
    fn take_empties() {
        let b = MemoryBroadcaster::new();
        b.broadcast(&update(0, 0, 0), None, SessionId(0));
        assert_eq!(b.take().len(), 1);
        assert!(b.is_empty());
    }

    #[test]
    fn arc_forwards() {
        let b = Arc::new(MemoryBroadcaster::new());
        let shared: Arc<dyn Broadcaster> = b.clone();
        shared.broadcast(&update(4, 5, 6), None, SessionId(0));
        assert_eq!(b.updates(), vec![update(4, 5, 6)]);
    }

    #[test]
    fn update_cell_round_trips() {
        assert_eq!(update(0, -3, 7).cell(), Cell::new(-3, 7));
    }
}

#[cfg(test)]
mod channel {
    use super::*;
    use crate::{Broadcaster, ChannelBroadcaster};

    #[test]
    fn unbounded_delivers_everything() {
        let (b, rx) = ChannelBroadcaster::unbounded();
        for i in 0..100 {
            b.broadcast(&update(0, i, 0), None, SessionId(1));
        }
        let xs: Vec<i32> = rx.try_iter().map(|e| e.update.x).collect();
        assert_eq!(xs, (0..100).collect::<Vec<_>>());
        assert_eq!(b.dropped(), 0);
    }

    #[test]
    fn bounded_drops_when_full() {
        let (b, rx) = ChannelBroadcaster::bounded(2);
        for i in 0..5 {
            b.broadcast(&update(0, i, 0), None, SessionId(0));
        }
        assert_eq!(b.dropped(), 3);
        // The earliest updates survive.
        let xs: Vec<i32> = rx.try_iter().map(|e| e.update.x).collect();
        assert_eq!(xs, vec![0, 1]);
    }

    #[test]
    fn disconnected_receiver_counts_drops() {
        let (b, rx) = ChannelBroadcaster::unbounded();
        drop(rx);
        b.broadcast(&update(0, 0, 0), None, SessionId(0));
        b.broadcast(&update(0, 1, 0), None, SessionId(0));
        assert_eq!(b.dropped(), 2);
    }

    #[test]
    fn exclusion_travels_with_envelope() {
        let (b, rx) = ChannelBroadcaster::unbounded();
        b.broadcast(&update(2, 0, 0), Some(RecipientId(5)), SessionId(8));
        let e = rx.try_recv().unwrap();
        assert_eq!(e.exclude, Some(RecipientId(5)));
        assert_eq!(e.session, SessionId(8));
    }
}

#[cfg(test)]
mod event_log {
    use super::*;
    use crate::{Broadcaster, CsvBroadcaster};

    #[test]
    fn header_and_rows() {
        let log = CsvBroadcaster::new(Vec::new()).unwrap();
        log.broadcast(&update(0, 1, 2), None, SessionId(7));
        log.broadcast(&update(3, 4, 4), Some(RecipientId(1)), SessionId(7));
        assert_eq!(log.rows(), 2);

        let bytes = log.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "agent_id,x,y,session\n0,1,2,7\n3,4,4,7\n");
    }

    #[test]
    fn file_log_readable_by_csv_reader() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("moves.csv");

        let log = CsvBroadcaster::create(&path).unwrap();
        for x in 0..3 {
            log.broadcast(&update(1, x, 0), None, SessionId(0));
        }
        log.flush().unwrap();
        assert!(log.take_error().is_none());

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["agent_id", "x", "y", "session"]);
        let xs: Vec<String> = rdr.records().map(|r| r.unwrap()[1].to_owned()).collect();
        assert_eq!(xs, ["0", "1", "2"]);
    }
}
