//! Line framing over a growable byte buffer: append bytes, extract complete
//! CR/LF (or bare LF) terminated lines, enforce the hard buffer cap. Kept
//! free of any socket type so it can be exercised directly in tests.

use crate::constants::INBOUND_BUFFER_CAP;

#[derive(Debug, Default)]
pub struct LineFramer {
    buf: Vec<u8>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum FeedResult {
    Ok,
    Overflow,
}

impl LineFramer {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Appends newly-read bytes. Returns `Overflow` if this would push the
    /// buffer past the hard cap; the caller must terminate the connection
    /// in that case without looking for further lines.
    pub fn feed(&mut self, bytes: &[u8]) -> FeedResult {
        if self.buf.len() + bytes.len() > INBOUND_BUFFER_CAP {
            return FeedResult::Overflow;
        }
        self.buf.extend_from_slice(bytes);
        FeedResult::Ok
    }

    /// Pops the next complete line (CRLF or bare LF terminated), if any,
    /// decoded as UTF-8. A line that is not valid UTF-8 is dropped (the
    /// caller should log it) rather than terminating the connection.
    pub fn next_line(&mut self) -> Option<Option<String>> {
        let newline_pos = self.buf.iter().position(|&b| b == b'\n')?;
        let mut line: Vec<u8> = self.buf.drain(..=newline_pos).collect();
        line.pop(); // trailing \n
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if line.is_empty() {
            return Some(None);
        }
        match String::from_utf8(line) {
            Ok(s) => Some(Some(s)),
            Err(_) => Some(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_crlf_line() {
        let mut f = LineFramer::new();
        assert_eq!(f.feed(b"NICK alice\r\n"), FeedResult::Ok);
        assert_eq!(f.next_line(), Some(Some("NICK alice".to_string())));
        assert_eq!(f.next_line(), None);
    }

    #[test]
    fn tolerates_bare_lf() {
        let mut f = LineFramer::new();
        f.feed(b"PING x\n");
        assert_eq!(f.next_line(), Some(Some("PING x".to_string())));
    }

    #[test]
    fn empty_line_yields_none_inner() {
        let mut f = LineFramer::new();
        f.feed(b"\r\n");
        assert_eq!(f.next_line(), Some(None));
    }

    #[test]
    fn splits_multiple_lines_in_one_feed() {
        let mut f = LineFramer::new();
        f.feed(b"A\r\nB\r\n");
        assert_eq!(f.next_line(), Some(Some("A".to_string())));
        assert_eq!(f.next_line(), Some(Some("B".to_string())));
        assert_eq!(f.next_line(), None);
    }

    #[test]
    fn exactly_at_cap_is_accepted() {
        let mut f = LineFramer::new();
        let body = vec![b'x'; INBOUND_BUFFER_CAP];
        assert_eq!(f.feed(&body), FeedResult::Ok);
    }

    #[test]
    fn one_byte_over_cap_overflows() {
        let mut f = LineFramer::new();
        let body = vec![b'x'; INBOUND_BUFFER_CAP + 1];
        assert_eq!(f.feed(&body), FeedResult::Overflow);
    }

    #[test]
    fn partial_line_waits_for_more_bytes() {
        let mut f = LineFramer::new();
        f.feed(b"NICK al");
        assert_eq!(f.next_line(), None);
        f.feed(b"ice\r\n");
        assert_eq!(f.next_line(), Some(Some("NICK alice".to_string())));
    }
}
