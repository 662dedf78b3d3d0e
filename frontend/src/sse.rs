//! Incremental decoder for the gateway's Server-Sent-Events chat stream.
//!
//! The gateway answers a chat request with newline-delimited `data: {json}`
//! frames shaped like chat-completion streaming deltas and conceptually
//! terminated by `data: [DONE]`. Network chunk boundaries fall anywhere, so
//! the decoder buffers bytes, extracts complete lines, and accumulates
//! `choices[0].delta.content` fragments into one running assistant message.
//! It is independent of the transport so it can be exercised without a
//! network (see the tests below).

use crate::models::ChatMessage;

const DATA_PREFIX: &str = "data: ";
const DONE_SENTINEL: &str = "[DONE]";

#[derive(Default)]
pub struct SseDecoder {
    /// Bytes held back until they form complete UTF-8 characters.
    pending: Vec<u8>,
    /// Decoded text not yet consumed as complete lines.
    buffer: String,
    /// Concatenation of every non-empty delta seen so far.
    accumulated: String,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The assistant message reconstructed so far.
    pub fn accumulated(&self) -> &str {
        &self.accumulated
    }

    /// Feeds one raw chunk from the network. A multi-byte character split
    /// across chunks is held back until its remaining bytes arrive.
    /// Returns the deltas extracted from this chunk, in frame order.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(bytes);

        let valid_len = match std::str::from_utf8(&self.pending) {
            Ok(_) => self.pending.len(),
            Err(e) => match e.error_len() {
                // Genuinely invalid bytes: decode the lot lossily rather
                // than wedging the stream.
                Some(_) => self.pending.len(),
                // Incomplete trailing character: wait for the rest.
                None => e.valid_up_to(),
            },
        };
        if valid_len == 0 {
            return Vec::new();
        }

        let ready: Vec<u8> = self.pending.drain(..valid_len).collect();
        let text = String::from_utf8_lossy(&ready).into_owned();
        self.push_chunk(&text)
    }

    /// Feeds one chunk of already-decoded text.
    pub fn push_chunk(&mut self, chunk: &str) -> Vec<String> {
        self.buffer.push_str(chunk);

        let mut deltas = Vec::new();
        while let Some(newline) = self.buffer.find('\n') {
            let mut line: String = self.buffer.drain(..=newline).collect();
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }

            let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
                continue;
            };
            let payload = payload.trim();
            if payload == DONE_SENTINEL {
                // No more frames are expected; whatever follows in the
                // buffer waits for the next chunk.
                break;
            }

            match serde_json::from_str::<serde_json::Value>(payload) {
                Ok(frame) => {
                    // Optional navigation: a well-formed frame without a
                    // content delta is a no-op, not a failure.
                    if let Some(delta) = frame["choices"][0]["delta"]["content"].as_str() {
                        if !delta.is_empty() {
                            self.accumulated.push_str(delta);
                            deltas.push(delta.to_string());
                        }
                    }
                }
                Err(_) => {
                    // A chunk boundary split the frame mid-JSON: put the line
                    // back (with its newline) and retry it whole on the next
                    // chunk instead of dropping it.
                    self.buffer.insert(0, '\n');
                    self.buffer.insert_str(0, &line);
                    break;
                }
            }
        }
        deltas
    }
}

/// Applies the running assistant text to the transcript: the tail message is
/// replaced in place while it is an assistant message, otherwise a new
/// assistant message is appended. Earlier messages are never touched.
pub fn apply_assistant_text(messages: &mut Vec<ChatMessage>, text: &str) {
    match messages.last_mut() {
        Some(last) if last.is_assistant() => last.content = text.to_string(),
        _ => messages.push(ChatMessage::assistant(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(content: &str) -> String {
        format!(
            "data: {}\n",
            serde_json::json!({ "choices": [{ "delta": { "content": content } }] })
        )
    }

    fn decode_all(chunks: &[&str]) -> (String, Vec<String>) {
        let mut decoder = SseDecoder::new();
        let mut deltas = Vec::new();
        for chunk in chunks {
            deltas.extend(decoder.push_chunk(chunk));
        }
        (decoder.accumulated().to_string(), deltas)
    }

    #[test]
    fn accumulates_deltas_in_frame_order() {
        let stream = format!("{}{}{}data: [DONE]\n", frame("The "), frame("court "), frame("held"));
        let (acc, deltas) = decode_all(&[&stream]);
        assert_eq!(acc, "The court held");
        assert_eq!(deltas, vec!["The ", "court ", "held"]);
    }

    #[test]
    fn chunk_boundaries_do_not_change_the_result() {
        let stream = format!("{}{}{}data: [DONE]\n", frame("Sec"), frame("tion "), frame("302"));
        let whole = decode_all(&[&stream]).0;

        // Split at every byte position, including mid-prefix and mid-JSON.
        for split in 1..stream.len() {
            if !stream.is_char_boundary(split) {
                continue;
            }
            let (a, b) = stream.split_at(split);
            assert_eq!(decode_all(&[a, b]).0, whole, "split at byte {split}");
        }
    }

    #[test]
    fn a_line_split_across_chunks_matches_single_chunk_delivery() {
        let line = frame("bail granted");
        let (head, tail) = line.split_at(line.len() / 2);

        let mut split_decoder = SseDecoder::new();
        assert!(split_decoder.push_chunk(head).is_empty());
        let deltas = split_decoder.push_chunk(tail);

        assert_eq!(deltas, vec!["bail granted"]);
        assert_eq!(split_decoder.accumulated(), decode_all(&[&line]).0);
    }

    #[test]
    fn unparsable_line_is_pushed_back_and_halts_extraction_for_the_chunk() {
        let mut decoder = SseDecoder::new();
        let chunk = format!("{}data: {{\"broken\n{}", frame("kept "), frame("lost?"));
        let deltas = decoder.push_chunk(&chunk);

        // The frame before the broken line was applied; the one after it
        // stays buffered behind the retried line.
        assert_eq!(deltas, vec!["kept "]);
        assert_eq!(decoder.accumulated(), "kept ");
    }

    #[test]
    fn done_sentinel_stops_line_extraction_for_the_chunk() {
        let mut decoder = SseDecoder::new();
        let chunk = format!("{}data: [DONE]\n{}", frame("final"), frame("after done"));
        let deltas = decoder.push_chunk(&chunk);
        assert_eq!(deltas, vec!["final"]);
        assert_eq!(decoder.accumulated(), "final");
    }

    #[test]
    fn done_sentinel_alone_creates_no_message() {
        let mut decoder = SseDecoder::new();
        let mut messages: Vec<ChatMessage> = Vec::new();
        for _ in decoder.push_chunk("data: [DONE]\n") {
            apply_assistant_text(&mut messages, decoder.accumulated());
        }
        assert!(messages.is_empty());
        assert_eq!(decoder.accumulated(), "");
    }

    #[test]
    fn empty_and_missing_deltas_are_ignored() {
        let stream = concat!(
            "data: {\"choices\":[{\"delta\":{\"content\":\"\"}}]}\n",
            "data: {\"choices\":[{\"delta\":{}}]}\n",
            "data: {\"choices\":[]}\n",
            "data: {\"id\":\"cmpl-1\"}\n",
        );
        let (acc, deltas) = decode_all(&[stream]);
        assert_eq!(acc, "");
        assert!(deltas.is_empty());
    }

    #[test]
    fn non_data_lines_are_skipped() {
        let stream = format!(": keep-alive\nevent: message\n\n{}", frame("x"));
        let (acc, _) = decode_all(&[&stream]);
        assert_eq!(acc, "x");
    }

    #[test]
    fn carriage_returns_are_stripped_from_line_ends() {
        let stream = "data: {\"choices\":[{\"delta\":{\"content\":\"crlf\"}}]}\r\n";
        let (acc, _) = decode_all(&[stream]);
        assert_eq!(acc, "crlf");
    }

    #[test]
    fn partial_line_at_end_of_stream_is_dropped_silently() {
        let mut decoder = SseDecoder::new();
        decoder.push_chunk(&frame("kept"));
        decoder.push_chunk("data: {\"choices\":[{\"delta\":{\"content\":\"no newline");
        // Stream ends here; the partial line simply never decodes.
        assert_eq!(decoder.accumulated(), "kept");
    }

    #[test]
    fn multibyte_character_split_across_byte_chunks_survives() {
        let line = frame("धारा 302");
        let bytes = line.as_bytes();
        // Split inside the first Devanagari character.
        let split = line.find('ध').unwrap() + 1;
        assert!(!line.is_char_boundary(split));

        let mut decoder = SseDecoder::new();
        assert!(decoder.push_bytes(&bytes[..split]).is_empty());
        decoder.push_bytes(&bytes[split..]);
        assert_eq!(decoder.accumulated(), "धारा 302");
    }

    #[test]
    fn tail_assistant_message_is_replaced_others_never_touched() {
        let mut messages = vec![
            ChatMessage::user("What is the sentence range?"),
            ChatMessage::assistant("Under"),
        ];
        apply_assistant_text(&mut messages, "Under IPC 302");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "What is the sentence range?");
        assert_eq!(messages[1].content, "Under IPC 302");
    }

    #[test]
    fn a_user_tail_gets_a_new_assistant_message_appended() {
        let mut messages = vec![ChatMessage::user("Any precedent?")];
        apply_assistant_text(&mut messages, "Yes, ");
        assert_eq!(messages.len(), 2);
        assert!(messages[1].is_assistant());
        assert_eq!(messages[1].content, "Yes, ");
    }
}
