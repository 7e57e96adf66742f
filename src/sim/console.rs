//! src/sim/console.rs
//!
//! Bounded console log: the free-text sink every action writes to.

use std::collections::VecDeque;

/// Append-only from the caller's view; oldest lines fall off the front.
#[derive(Debug)]
pub struct Console {
    lines: VecDeque<String>,
    max_lines: usize,
}

impl Console {
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(max_lines),
            max_lines,
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new(200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_bounded_and_drops_oldest() {
        let mut c = Console::new(3);
        for i in 0..5 {
            c.push(format!("line {i}"));
        }
        assert_eq!(c.len(), 3);
        let lines: Vec<_> = c.lines().collect();
        assert_eq!(lines, vec!["line 2", "line 3", "line 4"]);
    }
}
