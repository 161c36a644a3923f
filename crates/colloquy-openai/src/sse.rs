//! Incremental decoder for the SSE-style line framing of chat-completion
//! streams.
//!
//! Transport reads arrive at arbitrary byte boundaries: one read may carry
//! zero, one or many complete lines, or cut a line anywhere (inside the
//! `data: ` prefix, inside the JSON payload, even inside a multi-byte UTF-8
//! scalar).  The decoder keeps every unterminated tail in a carry-over
//! buffer and only ever interprets complete lines, so the decoded frame
//! sequence is independent of how the transport happened to chunk the bytes.

use crate::api_v1::ChatCompletionChunkResponse;

/// Field prefix of the event lines that carry payloads.
const DATA_PREFIX: &[u8] = b"data: ";
/// Literal payload marking the end of the stream.
const DONE_SENTINEL: &str = "[DONE]";

/// One decoded unit of the wire stream.
#[derive(Debug)]
pub(crate) enum Frame {
    /// A parsed chunk envelope, carrying zero or more characters of delta text.
    Delta(ChatCompletionChunkResponse),
    /// The termination sentinel; no further frames follow.
    Done,
}

#[derive(Debug, Default)]
pub(crate) struct FrameDecoder {
    /// Unconsumed tail of the previous read, up to the next newline.
    buf: Vec<u8>,
    /// Latched once the sentinel is seen; later input is discarded.
    done: bool,
    /// Recognised event lines whose payload failed to decode.
    dropped: u64,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one transport read and return every frame it completed.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Frame> {
        let mut frames = Vec::new();
        if self.done {
            return frames;
        }
        self.buf.extend_from_slice(bytes);

        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            if let Some(frame) = self.decode_line(&line[..pos]) {
                let terminal = matches!(frame, Frame::Done);
                frames.push(frame);
                if terminal {
                    self.done = true;
                    self.buf.clear();
                    break;
                }
            }
        }
        frames
    }

    /// Flush a trailing line the transport never newline-terminated.  Call
    /// once when the byte stream reports end-of-data.
    pub fn finish(&mut self) -> Option<Frame> {
        if self.done || self.buf.is_empty() {
            return None;
        }
        let line = std::mem::take(&mut self.buf);
        let frame = self.decode_line(&line);
        if matches!(frame, Some(Frame::Done)) {
            self.done = true;
        }
        frame
    }

    /// Number of recognised event lines dropped because their payload did
    /// not decode.  Dropping is silent by contract; this counter exists for
    /// diagnostics only.
    #[allow(dead_code)]
    pub fn dropped_frames(&self) -> u64 {
        self.dropped
    }

    fn decode_line(&mut self, raw: &[u8]) -> Option<Frame> {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);

        // Blank separators, keep-alive comments and other SSE fields carry
        // no payload for us.
        let payload = raw.strip_prefix(DATA_PREFIX)?;

        let Ok(payload) = std::str::from_utf8(payload) else {
            self.dropped += 1;
            #[cfg(feature = "tracing")]
            tracing::debug!("dropping non-UTF-8 stream frame");
            return None;
        };

        if payload.trim() == DONE_SENTINEL {
            return Some(Frame::Done);
        }

        match serde_json::from_str::<ChatCompletionChunkResponse>(payload) {
            Ok(parsed) => Some(Frame::Delta(parsed)),
            Err(_err) => {
                // A single undecodable event must not fail the stream; only
                // that line's content is lost.
                self.dropped += 1;
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %_err, "dropping undecodable stream frame");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The canonical two-delta stream: a bare `llo` noise line (no prefix)
    /// sits between the frames and must stay inert.
    const STREAM: &str = "data: {\"choices\":[{\"delta\":{\"content\":\"He\"}}]}\n\
                          llo\n\
                          data: {\"choices\":[{\"delta\":{\"content\":\"llo\"}}]}\n\
                          data: [DONE]\n";

    const MULTIBYTE_STREAM: &str =
        "data: {\"choices\":[{\"delta\":{\"content\":\"a🦀b\"}}]}\n\
         data: {\"choices\":[{\"delta\":{\"content\":\"héllo\"}}]}\n\
         data: [DONE]\n";

    fn frame_text(frame: Frame) -> Option<String> {
        match frame {
            Frame::Delta(chunk) => chunk
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.delta.content),
            Frame::Done => None,
        }
    }

    /// Decode `parts` as successive transport reads, returning the extracted
    /// delta texts and whether the sentinel was observed.
    fn decode_parts(parts: &[&[u8]]) -> (Vec<String>, bool) {
        let mut decoder = FrameDecoder::new();
        let mut texts = Vec::new();
        let mut done = false;
        for part in parts {
            for frame in decoder.feed(part) {
                match frame {
                    Frame::Done => done = true,
                    delta => texts.extend(frame_text(delta)),
                }
            }
        }
        match decoder.finish() {
            Some(Frame::Done) => done = true,
            Some(delta) => texts.extend(frame_text(delta)),
            None => {}
        }
        (texts, done)
    }

    #[test]
    fn split_position_never_changes_decoded_output() {
        let bytes = STREAM.as_bytes();
        let (reference, done) = decode_parts(&[bytes]);
        assert_eq!(reference, vec!["He".to_owned(), "llo".to_owned()]);
        assert!(done);

        for cut in 0..=bytes.len() {
            let (texts, done) = decode_parts(&[&bytes[..cut], &bytes[cut..]]);
            assert_eq!(texts, reference, "split at byte {cut}");
            assert!(done, "split at byte {cut}");
        }
    }

    #[test]
    fn multibyte_scalars_survive_any_read_stride() {
        let bytes = MULTIBYTE_STREAM.as_bytes();
        let (reference, _) = decode_parts(&[bytes]);
        assert_eq!(reference, vec!["a🦀b".to_owned(), "héllo".to_owned()]);

        for stride in 1..=7 {
            let parts: Vec<&[u8]> = bytes.chunks(stride).collect();
            let (texts, done) = decode_parts(&parts);
            assert_eq!(texts, reference, "stride {stride}");
            assert!(done, "stride {stride}");
        }
    }

    #[test]
    fn split_inside_second_frame_prefix_keeps_noise_line_inert() {
        let first: &[u8] = b"data: {\"choices\":[{\"delta\":{\"content\":\"He\"}}]}\nllo\nda";
        let second: &[u8] =
            b"ta: {\"choices\":[{\"delta\":{\"content\":\"llo\"}}]}\ndata: [DONE]\n";

        let (texts, done) = decode_parts(&[first, second]);

        assert_eq!(texts, vec!["He".to_owned(), "llo".to_owned()]);
        assert!(done);
    }

    #[test]
    fn sentinel_latches_and_later_input_is_discarded() {
        let mut decoder = FrameDecoder::new();

        let frames = decoder.feed(
            b"data: [DONE]\ndata: {\"choices\":[{\"delta\":{\"content\":\"late\"}}]}\n",
        );
        assert_eq!(frames.len(), 1);
        assert!(matches!(frames[0], Frame::Done));

        let after = decoder.feed(b"data: {\"choices\":[{\"delta\":{\"content\":\"x\"}}]}\n");
        assert!(after.is_empty());
        assert!(decoder.finish().is_none());
    }

    #[test]
    fn end_of_data_flushes_an_unterminated_trailing_line() {
        let mut decoder = FrameDecoder::new();

        let frames = decoder.feed(b"data: {\"choices\":[{\"delta\":{\"content\":\"tail\"}}]}");
        assert!(frames.is_empty());

        let flushed = decoder.finish().expect("trailing line decodes");
        assert_eq!(frame_text(flushed).as_deref(), Some("tail"));
        assert!(decoder.finish().is_none());
    }

    #[test]
    fn malformed_payload_is_dropped_without_aborting() {
        let mut decoder = FrameDecoder::new();
        let mut texts = Vec::new();
        let mut done = false;

        let input = b"data: {\"choices\":[{\"delta\":{\"content\":\"He\"}}]}\n\
                      data: {definitely not json\n\
                      data: {\"choices\":[{\"delta\":{\"content\":\"llo\"}}]}\n\
                      data: [DONE]\n";
        for frame in decoder.feed(input) {
            match frame {
                Frame::Done => done = true,
                delta => texts.extend(frame_text(delta)),
            }
        }

        assert_eq!(texts, vec!["He".to_owned(), "llo".to_owned()]);
        assert!(done);
        assert_eq!(decoder.dropped_frames(), 1);
    }

    #[test]
    fn non_event_lines_are_ignored_without_counting_as_drops() {
        let mut decoder = FrameDecoder::new();

        let input = b"\n\
                      : keep-alive\n\
                      event: message\n\
                      data: {\"choices\":[{\"delta\":{\"content\":\"hi\"}}]}\n";
        let texts: Vec<String> = decoder
            .feed(input)
            .into_iter()
            .filter_map(frame_text)
            .collect();

        assert_eq!(texts, vec!["hi".to_owned()]);
        assert_eq!(decoder.dropped_frames(), 0);
    }

    #[test]
    fn crlf_line_endings_decode_like_bare_newlines() {
        let input = b"data: {\"choices\":[{\"delta\":{\"content\":\"hi\"}}]}\r\n\
                      data: [DONE]\r\n";
        let (texts, done) = decode_parts(&[input]);

        assert_eq!(texts, vec!["hi".to_owned()]);
        assert!(done);
    }

    #[test]
    fn empty_and_absent_deltas_produce_frames_with_no_text() {
        let input = b"data: {\"choices\":[{\"delta\":{}}]}\n\
                      data: {\"choices\":[]}\n\
                      data: {\"choices\":[{\"delta\":{\"content\":\"\"},\"finish_reason\":\"stop\"}]}\n";
        let mut decoder = FrameDecoder::new();

        let frames = decoder.feed(input);
        assert_eq!(frames.len(), 3);
        let texts: Vec<String> = frames.into_iter().filter_map(frame_text).collect();
        // the only extracted text is the explicit empty string
        assert_eq!(texts, vec![String::new()]);
        assert_eq!(decoder.dropped_frames(), 0);
    }
}
