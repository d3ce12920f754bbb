use std::collections::VecDeque;
use std::time::{Duration, Instant};

use raycast_maze::GameEvent;

/// How long a message stays up once it reaches the front of the queue.
const SHOW_FOR: Duration = Duration::from_secs(2);

/// On-screen messages, shown one at a time in arrival order.
pub struct Notifications {
    queue: VecDeque<String>,
    front_since: Instant,
}

impl Notifications {
    pub fn new(now: Instant) -> Self {
        Self {
            queue: VecDeque::new(),
            front_since: now,
        }
    }

    pub fn push(&mut self, text: impl Into<String>, now: Instant) {
        if self.queue.is_empty() {
            self.front_since = now;
        }
        self.queue.push_back(text.into());
    }

    /// Drops the front message once it has been shown long enough.
    pub fn update(&mut self, now: Instant) {
        if !self.queue.is_empty() && now.duration_since(self.front_since) > SHOW_FOR {
            self.queue.pop_front();
            self.front_since = now;
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.queue.front().map(String::as_str)
    }

    pub fn on_event(&mut self, event: GameEvent, now: Instant) {
        match event {
            GameEvent::ExitReached => self.push("MAZE ESCAPED!", now),
            GameEvent::AttackTriggered => self.push("Swing!", now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_expire_in_order() {
        let t0 = Instant::now();
        let mut notes = Notifications::new(t0);
        notes.push("Find the exit!", t0);
        notes.push("MAZE ESCAPED!", t0 + Duration::from_millis(500));
        assert_eq!(notes.current(), Some("Find the exit!"));

        notes.update(t0 + Duration::from_millis(1500));
        assert_eq!(notes.current(), Some("Find the exit!"));

        let t1 = t0 + Duration::from_millis(2100);
        notes.update(t1);
        assert_eq!(notes.current(), Some("MAZE ESCAPED!"));

        // the second message gets its own full two seconds
        notes.update(t1 + Duration::from_millis(1900));
        assert_eq!(notes.current(), Some("MAZE ESCAPED!"));
        notes.update(t1 + Duration::from_millis(2100));
        assert_eq!(notes.current(), None);
    }
}
