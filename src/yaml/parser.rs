//! Line-oriented parser building the lossless mapping model.
//!
//! The parser only understands block mappings. Everything it does not model
//! structurally (block scalars, sequences, flow collections, aliases) is kept
//! as raw lines under the owning entry. Input is expected to have passed
//! `serde_yaml` validation already, so the parser can stay strict and report
//! anything unexpected as [`YamlBuddyError::UnsupportedDocument`].

use super::model::{Entry, Mapping, Node, Scalar, ScalarStyle};
use crate::core::YamlBuddyError;

/// Parse document lines (without line terminators) into a root mapping.
pub(crate) fn parse_lines(lines: &[&str], path: &str) -> Result<Mapping, YamlBuddyError> {
    let mut parser = Parser {
        lines,
        pos: 0,
        pending: Vec::new(),
        path,
    };
    parser.parse_root()
}

struct Head {
    raw_key: String,
    key: String,
    value: String,
    comment: Option<String>,
}

struct Parser<'a> {
    lines: &'a [&'a str],
    pos: usize,
    pending: Vec<String>,
    path: &'a str,
}

impl<'a> Parser<'a> {
    fn parse_root(&mut self) -> Result<Mapping, YamlBuddyError> {
        // Document start marker and directives only make sense before content.
        while let Some(&line) = self.lines.get(self.pos) {
            let content = line.trim_start();
            if is_trivia(line) || content.starts_with("---") || content.starts_with('%') {
                self.pending.push(line.to_string());
                self.pos += 1;
            } else {
                break;
            }
        }

        let Some(&first) = self.lines.get(self.pos) else {
            return Ok(Mapping {
                trailer: std::mem::take(&mut self.pending),
                ..Mapping::default()
            });
        };

        if first.trim() == "{}" {
            self.pending.push(first.to_string());
            self.pos += 1;
            self.skip_trivia();
            if self.pos < self.lines.len() {
                return Err(self.unsupported("content after a flow mapping root"));
            }
            return Ok(Mapping {
                trailer: std::mem::take(&mut self.pending),
                flow_placeholder: true,
                ..Mapping::default()
            });
        }

        let indent = indent_of(first);
        let mut root = self.parse_mapping(indent)?;
        self.skip_trivia();
        if self.pos < self.lines.len() {
            return Err(self.unsupported("line is indented less than the document root"));
        }
        root.trailer = std::mem::take(&mut self.pending);
        Ok(root)
    }

    fn parse_mapping(&mut self, indent: usize) -> Result<Mapping, YamlBuddyError> {
        let mut mapping = Mapping::with_indent(indent);

        loop {
            self.skip_trivia();
            let Some(&line) = self.lines.get(self.pos) else {
                break;
            };

            let line_indent = indent_of(line);
            if line_indent < indent {
                break;
            }
            if line_indent > indent {
                return Err(self.unsupported("unexpected indentation"));
            }

            let content = &line[line_indent..];
            if is_sequence_item(content) {
                return Err(self.unsupported("sequence item where a mapping key was expected"));
            }

            let head = self.parse_head(content)?;
            if mapping.position(&head.key).is_some() {
                return Err(self.unsupported(&format!("duplicate key '{}'", head.key)));
            }

            self.pos += 1;
            let leading = std::mem::take(&mut self.pending);
            let value = self.parse_value(indent, &head.value)?;

            mapping.entries.push(Entry {
                key: head.key,
                raw_key: head.raw_key,
                indent,
                head: line.to_string(),
                comment: head.comment,
                leading,
                value,
            });
        }

        Ok(mapping)
    }

    fn parse_value(&mut self, indent: usize, value: &str) -> Result<Node, YamlBuddyError> {
        let style = classify(value);
        if style != ScalarStyle::Empty {
            let continuation = self.take_block(style, |line_indent, _| line_indent > indent);
            return Ok(Node::Scalar(Scalar {
                raw: value.to_string(),
                style,
                continuation,
            }));
        }

        match self.peek_significant() {
            Some((line_indent, content)) if line_indent >= indent && is_sequence_item(content) => {
                let continuation = self.take_block(ScalarStyle::Collection, |line_indent, content| {
                    line_indent > indent || (line_indent == indent && is_sequence_item(content))
                });
                Ok(Node::Scalar(Scalar {
                    raw: value.to_string(),
                    style: ScalarStyle::Collection,
                    continuation,
                }))
            }
            Some((line_indent, content)) if line_indent > indent && !is_entry(content) => {
                // A value written on the lines below its key.
                let style = classify(content);
                let continuation = self.take_block(style, |line_indent, _| line_indent > indent);
                Ok(Node::Scalar(Scalar {
                    raw: value.to_string(),
                    style,
                    continuation,
                }))
            }
            Some((line_indent, _)) if line_indent > indent => {
                Ok(Node::Mapping(self.parse_mapping(line_indent)?))
            }
            _ => Ok(Node::Scalar(Scalar {
                raw: value.to_string(),
                style: ScalarStyle::Empty,
                continuation: Vec::new(),
            })),
        }
    }

    /// Consume the raw lines of a multi-line value.
    ///
    /// Blank lines are taken while the value continues; blank (and, outside
    /// block scalars, comment) lines at the very end are handed back so that
    /// they stay in front of the next entry.
    fn take_block(
        &mut self,
        style: ScalarStyle,
        belongs: impl Fn(usize, &str) -> bool,
    ) -> Vec<String> {
        let mut taken = Vec::new();
        while let Some(&line) = self.lines.get(self.pos) {
            let line_indent = indent_of(line);
            if line.trim().is_empty() || belongs(line_indent, &line[line_indent..]) {
                taken.push(line.to_string());
                self.pos += 1;
            } else {
                break;
            }
        }

        while let Some(last) = taken.last() {
            let trailing_trivia = last.trim().is_empty()
                || (style != ScalarStyle::Block && last.trim_start().starts_with('#'));
            if !trailing_trivia {
                break;
            }
            taken.pop();
            self.pos -= 1;
        }
        taken
    }

    fn skip_trivia(&mut self) {
        while let Some(&line) = self.lines.get(self.pos) {
            if !is_trivia(line) {
                break;
            }
            self.pending.push(line.to_string());
            self.pos += 1;
        }
    }

    fn peek_significant(&self) -> Option<(usize, &'a str)> {
        let lines = self.lines;
        lines[self.pos..].iter().copied().find(|line| !is_trivia(line)).map(|line| {
            let line_indent = indent_of(line);
            (line_indent, &line[line_indent..])
        })
    }

    fn parse_head(&self, content: &str) -> Result<Head, YamlBuddyError> {
        if content.starts_with('?') {
            return Err(self.unsupported("complex mapping key"));
        }
        if content.starts_with('{') || content.starts_with('[') {
            return Err(self.unsupported("flow collection where a mapping key was expected"));
        }

        let (raw_key, key, rest) = if content.starts_with('"') || content.starts_with('\'') {
            let close = closing_quote(content)
                .ok_or_else(|| self.unsupported("unterminated quoted key"))?;
            let raw_key = &content[..=close];
            let rest = content[close + 1..].trim_start();
            let Some(rest) = rest.strip_prefix(':') else {
                return Err(self.unsupported("expected ':' after quoted key"));
            };
            let key = serde_yaml::from_str::<String>(raw_key)
                .map_err(|e| self.unsupported(&format!("invalid quoted key: {e}")))?;
            (raw_key.to_string(), key, rest)
        } else {
            let colon = plain_key_end(content)
                .ok_or_else(|| self.unsupported("expected a 'key: value' entry"))?;
            let raw_key = content[..colon].trim_end();
            (raw_key.to_string(), raw_key.to_string(), &content[colon + 1..])
        };

        if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
            return Err(self.unsupported("expected whitespace after ':'"));
        }

        let (value, comment) = split_comment(rest.trim());
        Ok(Head {
            raw_key,
            key,
            value: value.to_string(),
            comment: comment.map(str::to_string),
        })
    }

    fn unsupported(&self, reason: &str) -> YamlBuddyError {
        YamlBuddyError::UnsupportedDocument {
            path: self.path.to_string(),
            line: self.pos + 1,
            reason: reason.to_string(),
        }
    }
}

/// Blank lines, comment lines and the document end marker.
pub(crate) fn is_trivia(line: &str) -> bool {
    let content = line.trim();
    content.is_empty() || content.starts_with('#') || content == "..."
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn is_sequence_item(content: &str) -> bool {
    content == "-" || content.starts_with("- ") || content.starts_with("-\t")
}

/// Whether `content` starts a `key: value` entry rather than a scalar.
fn is_entry(content: &str) -> bool {
    if content.starts_with('?') {
        return true;
    }
    if content.starts_with('"') || content.starts_with('\'') {
        return closing_quote(content)
            .is_some_and(|close| content[close + 1..].trim_start().starts_with(':'));
    }
    plain_key_end(content).is_some()
}

/// Classify the value text found after a key's colon.
fn classify(value: &str) -> ScalarStyle {
    let mut rest = value;
    // Anchors and tags decorate the value; they do not change its shape.
    while rest.starts_with('&') || rest.starts_with('!') {
        rest = rest.split_once(char::is_whitespace).map_or("", |(_, tail)| tail.trim_start());
    }

    match rest.chars().next() {
        None => ScalarStyle::Empty,
        Some('|' | '>') => ScalarStyle::Block,
        Some('[' | '{') => ScalarStyle::Collection,
        Some('*') => ScalarStyle::Alias,
        Some('"' | '\'') => ScalarStyle::Quoted,
        Some(_) => ScalarStyle::Plain,
    }
}

/// Byte index of the colon ending a plain key, if the line is an entry.
fn plain_key_end(content: &str) -> Option<usize> {
    let bytes = content.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'#' && i > 0 && bytes[i - 1].is_ascii_whitespace() {
            return None;
        }
        if b == b':' && bytes.get(i + 1).is_none_or(u8::is_ascii_whitespace) {
            return Some(i);
        }
    }
    None
}

/// Index of the quote closing the quoted string that starts `text`.
fn closing_quote(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let quote = *bytes.first()?;
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if quote == b'"' => i += 2,
            b'\'' if quote == b'\'' && bytes.get(i + 1) == Some(&b'\'') => i += 2,
            b if b == quote => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Split a value into its text and trailing `# comment`.
fn split_comment(value: &str) -> (&str, Option<&str>) {
    if value.starts_with('#') {
        return ("", Some(value));
    }

    let search_from = if value.starts_with('"') || value.starts_with('\'') {
        closing_quote(value).map_or(value.len(), |close| close + 1)
    } else {
        0
    };

    let bytes = value.as_bytes();
    for i in search_from.max(1)..bytes.len() {
        if bytes[i] == b'#' && bytes[i - 1].is_ascii_whitespace() {
            return (value[..i].trim_end(), Some(&value[i..]));
        }
    }
    (value, None)
}
