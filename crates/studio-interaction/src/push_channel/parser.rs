//! Incremental `text/event-stream` decoder.

use super::PushEvent;

/// Event name the server uses when a frame carries no `event:` field.
const DEFAULT_EVENT: &str = "message";

/// Splits a byte stream into server-sent events.
///
/// Chunks may end anywhere, including inside a line or a multi-byte
/// character; incomplete input is kept until the next [`SseParser::feed`].
#[derive(Debug, Default)]
pub struct SseParser {
    pending: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
    // last chunk ended on `\r`; a leading `\n` in the next one belongs to it
    after_cr: bool,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes a chunk and returns every event it completed.
    ///
    /// Lines end with `\n`, `\r\n` or a lone `\r`.
    pub fn feed(&mut self, mut chunk: &[u8]) -> Vec<PushEvent> {
        if self.after_cr && !chunk.is_empty() {
            self.after_cr = false;
            if chunk[0] == b'\n' {
                chunk = &chunk[1..];
            }
        }
        self.pending.extend_from_slice(chunk);
        let mut events = Vec::new();
        while let Some(pos) = self
            .pending
            .iter()
            .position(|b| *b == b'\n' || *b == b'\r')
        {
            let mut consumed = pos + 1;
            if self.pending[pos] == b'\r' {
                match self.pending.get(pos + 1) {
                    Some(b'\n') => consumed += 1,
                    Some(_) => {}
                    None => self.after_cr = true,
                }
            }
            let line: Vec<u8> = self.pending.drain(..consumed).take(pos).collect();
            let line = String::from_utf8_lossy(&line);
            if let Some(event) = self.process_line(&line) {
                events.push(event);
            }
        }
        events
    }

    /// Dispatches a trailing event that was not followed by a blank line.
    pub fn finish(&mut self) -> Option<PushEvent> {
        self.after_cr = false;
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            let line = String::from_utf8_lossy(&rest).into_owned();
            if let Some(event) = self.process_line(&line) {
                return Some(event);
            }
        }
        self.dispatch()
    }

    fn process_line(&mut self, line: &str) -> Option<PushEvent> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            // id / retry are not used by this client
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<PushEvent> {
        let event = self.event.take();
        if self.data.is_empty() {
            return None;
        }
        let data = std::mem::take(&mut self.data).join("\n");
        match event {
            Some(name) if !name.is_empty() && name != DEFAULT_EVENT => {
                Some(PushEvent::Named { event: name, data })
            }
            _ => Some(PushEvent::Message(data)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlabeled_and_named_events() {
        let mut parser = SseParser::new();
        let events = parser.feed(b"data: loading rows\n\nevent: status\ndata: done\n\n");
        assert_eq!(
            events,
            vec![
                PushEvent::Message("loading rows".into()),
                PushEvent::Named {
                    event: "status".into(),
                    data: "done".into()
                },
            ]
        );
    }

    #[test]
    fn test_chunk_boundaries_anywhere() {
        let stream = "data: first\r\n\r\n: keep-alive\n\ndata: sec\ndata: ond\n\nevent: status\ndata: done\n\n";
        let bytes = stream.as_bytes();
        for split in 1..bytes.len() {
            let mut parser = SseParser::new();
            let mut events = parser.feed(&bytes[..split]);
            events.extend(parser.feed(&bytes[split..]));
            assert_eq!(events.len(), 3, "split at {split}");
            assert_eq!(events[0], PushEvent::Message("first".into()));
            assert_eq!(events[1], PushEvent::Message("sec\nond".into()));
            assert!(events[2].is_status());
        }
    }

    #[test]
    fn test_bare_carriage_return_line_endings() {
        let stream = "data: a\r\revent: status\rdata: done\r\rdata: b\r\n\r\n";
        let bytes = stream.as_bytes();
        for split in 0..=bytes.len() {
            let mut parser = SseParser::new();
            let mut events = parser.feed(&bytes[..split]);
            events.extend(parser.feed(&bytes[split..]));
            assert_eq!(
                events,
                vec![
                    PushEvent::Message("a".into()),
                    PushEvent::Named {
                        event: "status".into(),
                        data: "done".into()
                    },
                    PushEvent::Message("b".into()),
                ],
                "split at {split}"
            );
        }
    }

    #[test]
    fn test_multibyte_split() {
        let bytes = "data: größe\n\n".as_bytes();
        let mut parser = SseParser::new();
        assert!(parser.feed(&bytes[..9]).is_empty());
        assert_eq!(parser.feed(&bytes[9..]), vec![PushEvent::Message("größe".into())]);
    }

    #[test]
    fn test_event_without_data_is_dropped() {
        let mut parser = SseParser::new();
        assert!(parser.feed(b"event: status\n\n").is_empty());
        assert_eq!(parser.feed(b"data: x\n\n"), vec![PushEvent::Message("x".into())]);
    }

    #[test]
    fn test_finish_flushes_trailing_event() {
        let mut parser = SseParser::new();
        assert!(parser.feed(b"event: status\ndata: done").is_empty());
        assert_eq!(
            parser.finish(),
            Some(PushEvent::Named {
                event: "status".into(),
                data: "done".into()
            })
        );
        assert_eq!(parser.finish(), None);
    }
}
