/// One recognised script line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// 1-based physical line number.
    pub line: usize,
    /// Leading run of ASCII lowercase letters.
    pub command: String,
    /// Rest of the line, leading whitespace removed, without the terminator.
    pub args: String,
}

impl Record {
    /// Build a record from its parts.
    pub fn new(line: usize, command: impl Into<String>, args: impl Into<String>) -> Self {
        Self {
            line,
            command: command.into(),
            args: args.into(),
        }
    }
}

/// Incremental line splitter.
///
/// Chunks may end anywhere, including mid-line. The unterminated tail of each chunk is kept in
/// a pending buffer and completed by the next chunk, so a record is only produced once its
/// `\n` (or [`Tokenizer::finish`]) has been seen.
#[derive(Debug, Default)]
pub struct Tokenizer {
    pending: String,
    line: usize,
}

impl Tokenizer {
    /// Create a tokenizer positioned before line 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of physical lines consumed so far.
    pub fn lines_seen(&self) -> usize {
        self.line
    }

    /// Feed one chunk and return every record completed by it, in input order.
    pub fn feed(&mut self, chunk: &str) -> Vec<Record> {
        let mut out = Vec::new();
        if chunk.is_empty() {
            return out;
        }

        let carried = self.pending.len();
        self.pending.push_str(chunk);
        // Only the new chunk can hold a newline; the carried tail never does.
        let Some(last_nl) = chunk.rfind('\n') else {
            return out;
        };

        let rest = self.pending.split_off(carried + last_nl + 1);
        let complete = std::mem::replace(&mut self.pending, rest);
        for text in complete.split_terminator('\n') {
            self.line += 1;
            if let Some(rec) = parse_line(self.line, text) {
                out.push(rec);
            }
        }
        out
    }

    /// Flush the final line when the stream ended without a trailing newline.
    pub fn finish(&mut self) -> Option<Record> {
        if self.pending.is_empty() {
            return None;
        }
        let text = std::mem::take(&mut self.pending);
        self.line += 1;
        parse_line(self.line, &text)
    }
}

/// Tokenize a whole in-memory script.
pub fn tokenize(src: &str) -> Vec<Record> {
    let mut t = Tokenizer::new();
    let mut out = t.feed(src);
    out.extend(t.finish());
    out
}

fn parse_line(line: usize, text: &str) -> Option<Record> {
    let text = text.strip_suffix('\r').unwrap_or(text);
    let cmd_len = text
        .bytes()
        .take_while(|b| b.is_ascii_lowercase())
        .count();
    if cmd_len == 0 {
        if !text.trim().is_empty() {
            tracing::trace!(line, "skipping line without a command");
        }
        return None;
    }

    let (command, args) = text.split_at(cmd_len);
    Some(Record::new(line, command, args.trim_start()))
}

#[cfg(test)]
#[path = "../../tests/unit/script/tokenizer.rs"]
mod tests;
