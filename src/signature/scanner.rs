//! Character-level scanner consumed by the signature parser
//!
//! Every lookahead is a *test* that records how far a match would reach
//! without moving the cursor; `consume` then commits the last successful
//! test. Backtracking is a stack of saved cursor positions.

use regex::Regex;

#[derive(Debug, Clone)]
pub struct TextScanner<'a> {
    input: &'a str,
    position: usize,
    /// End offset of the last successful test, cleared on consume/restore
    matched_end: Option<usize>,
    checkpoints: Vec<usize>,
}

impl<'a> TextScanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            matched_end: None,
            checkpoints: Vec::new(),
        }
    }

    /// Byte offset of the cursor from the start of the input
    pub fn offset(&self) -> usize {
        self.position
    }

    /// Unconsumed text
    pub fn remainder(&self) -> &'a str {
        &self.input[self.position..]
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    pub fn peek_char(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    /// Test whether the remainder starts with `literal`
    pub fn test_literal(&mut self, literal: &str) -> bool {
        if !literal.is_empty() && self.remainder().starts_with(literal) {
            self.matched_end = Some(self.position + literal.len());
            true
        } else {
            self.matched_end = None;
            false
        }
    }

    /// Test a set of literal alternatives, first match in declaration order wins.
    /// Returns the index of the matching alternative.
    pub fn test_any(&mut self, alternatives: &[&str]) -> Option<usize> {
        let found = alternatives
            .iter()
            .position(|alt| !alt.is_empty() && self.remainder().starts_with(alt));
        self.matched_end = found.map(|i| self.position + alternatives[i].len());
        found
    }

    /// Test a regex anchored at the cursor. Patterns are expected to start with `^`.
    pub fn test_regex(&mut self, pattern: &Regex) -> bool {
        match pattern.find(self.remainder()) {
            Some(m) if m.start() == 0 && !m.as_str().is_empty() => {
                self.matched_end = Some(self.position + m.end());
                true
            }
            _ => {
                self.matched_end = None;
                false
            }
        }
    }

    /// Advance past the last successful test and return the matched text.
    /// Returns an empty slice when no test is pending.
    pub fn consume(&mut self) -> &'a str {
        match self.matched_end.take() {
            Some(end) => {
                let text = &self.input[self.position..end];
                self.position = end;
                text
            }
            None => "",
        }
    }

    /// Test and consume a single character
    pub fn next_char(&mut self, c: char) -> bool {
        if self.peek_char() == Some(c) {
            self.position += c.len_utf8();
            self.matched_end = None;
            true
        } else {
            false
        }
    }

    /// Push the cursor onto the checkpoint stack
    pub fn save(&mut self) {
        self.checkpoints.push(self.position);
    }

    /// Pop the most recent checkpoint and move the cursor back to it
    pub fn restore(&mut self) {
        if let Some(position) = self.checkpoints.pop() {
            self.position = position;
        }
        self.matched_end = None;
    }

    /// Pop the most recent checkpoint, keeping the current cursor
    pub fn release(&mut self) {
        self.checkpoints.pop();
    }

    /// Number of live checkpoints
    pub fn depth(&self) -> usize {
        self.checkpoints.len()
    }

    /// Run `attempt` and rewind to the current cursor whatever it returns
    pub fn lookahead<F>(&mut self, attempt: F) -> bool
    where
        F: FnOnce(&mut Self) -> bool,
    {
        self.save();
        let recognized = attempt(self);
        self.restore();
        recognized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_then_consume() {
        let mut s = TextScanner::new("Ljava/lang/Object;");
        assert!(s.test_literal("L"));
        assert_eq!(s.offset(), 0);
        assert_eq!(s.consume(), "L");
        assert_eq!(s.remainder(), "java/lang/Object;");
    }

    #[test]
    fn test_failed_test_clears_pending_match() {
        let mut s = TextScanner::new("abc");
        assert!(s.test_literal("a"));
        assert!(!s.test_literal("x"));
        assert_eq!(s.consume(), "");
        assert_eq!(s.offset(), 0);
    }

    #[test]
    fn test_any_declaration_order() {
        let mut s = TextScanner::new("int");
        assert_eq!(s.test_any(&["I", "in", "int"]), Some(1));
        assert_eq!(s.consume(), "in");
    }

    #[test]
    fn test_regex_is_anchored() {
        let re = Regex::new("^[a-z]+").unwrap();
        let mut s = TextScanner::new("9abc");
        assert!(!s.test_regex(&re));
        assert!(s.next_char('9'));
        assert!(s.test_regex(&re));
        assert_eq!(s.consume(), "abc");
        assert!(s.is_at_end());
    }

    #[test]
    fn test_save_restore_nesting() {
        let mut s = TextScanner::new("abcd");
        s.save();
        s.next_char('a');
        s.save();
        s.next_char('b');
        s.restore();
        assert_eq!(s.remainder(), "bcd");
        s.restore();
        assert_eq!(s.remainder(), "abcd");
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn test_lookahead_never_consumes() {
        let mut s = TextScanner::new("xy");
        assert!(s.lookahead(|s| s.next_char('x') && s.next_char('y')));
        assert_eq!(s.offset(), 0);
        assert!(!s.lookahead(|s| s.next_char('x') && s.next_char('z')));
        assert_eq!(s.offset(), 0);
    }
}
