//! Ordering of the tokens generated for one input token.
//!
//! Subwords and concatenations are produced as they are discovered, which is
//! not the order downstream consumers expect. They are queued here and
//! replayed sorted by start offset, with larger position increments first
//! among tokens that start at the same offset.

use std::cmp::Reverse;
use std::collections::VecDeque;

use crate::analysis::token::Token;

#[derive(Clone, Debug)]
struct Pending {
    start_offset: usize,
    position_increment: usize,
    token: Token,
}

/// Queue of generated tokens awaiting replay.
#[derive(Clone, Debug, Default)]
pub struct OutputScheduler {
    pending: VecDeque<Pending>,
    sorted: bool,
}

impl OutputScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a token. Must not be called once replay has started.
    pub fn push(&mut self, token: Token) {
        debug_assert!(!self.sorted, "push after replay started");
        self.pending.push_back(Pending {
            start_offset: token.start_offset,
            position_increment: token.position_increment,
            token,
        });
    }

    /// Take the next token in replay order, sorting on the first call.
    pub fn pop(&mut self) -> Option<Token> {
        if !self.sorted {
            // stable: equal keys keep generation order
            self.pending
                .make_contiguous()
                .sort_by_key(|p| (p.start_offset, Reverse(p.position_increment)));
            self.sorted = true;
        }
        self.pending.pop_front().map(|p| p.token)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Drop any queued tokens and accept new ones.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.sorted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str, start: usize, pos_inc: usize) -> Token {
        Token::with_offsets(text, 0, start, start + text.len()).with_position_increment(pos_inc)
    }

    #[test]
    fn test_sorted_replay() {
        let mut scheduler = OutputScheduler::new();
        scheduler.push(token("fi", 3, 1));
        scheduler.push(token("wi", 0, 0));
        scheduler.push(token("wifi", 0, 1));

        assert_eq!(scheduler.len(), 3);
        assert_eq!(scheduler.pop().unwrap().text, "wifi");
        assert_eq!(scheduler.pop().unwrap().text, "wi");
        assert_eq!(scheduler.pop().unwrap().text, "fi");
        assert!(scheduler.pop().is_none());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let mut scheduler = OutputScheduler::new();
        scheduler.push(token("first", 0, 0));
        scheduler.push(token("second", 0, 0));
        scheduler.push(token("third", 0, 0));

        let order: Vec<String> = std::iter::from_fn(|| scheduler.pop()).map(|t| t.text).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_clear_allows_reuse() {
        let mut scheduler = OutputScheduler::new();
        scheduler.push(token("a", 0, 1));
        assert!(scheduler.pop().is_some());
        scheduler.clear();

        scheduler.push(token("b", 5, 1));
        scheduler.push(token("c", 2, 1));
        assert_eq!(scheduler.pop().unwrap().text, "c");
        assert_eq!(scheduler.pop().unwrap().text, "b");
    }
}
