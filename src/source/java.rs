//! Annotated string literals in Java source.
//!
//! This is a lexical scan, not a Java parser. It is enough to find string
//! literals inside annotation argument lists:
//!
//! ```java
//! @Value("${server.port}")
//! @Value(value = "${app.url}" + "/${app.path}")
//! ```
//!
//! Comments, character literals and text blocks are masked out first, so
//! nothing inside them is mistaken for an annotation or a literal. Annotation
//! names are resolved to fully-qualified names through the file's `package`
//! and `import` declarations.

use regex::Regex;
use std::sync::LazyLock;

static ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@\s*([A-Za-z_$][\w$]*(?:\s*\.\s*[A-Za-z_$][\w$]*)*)\s*\(")
        .expect("annotation pattern is a valid regex")
});

static PACKAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*package\s+([\w$.\s]+?)\s*;").expect("package pattern is a valid regex")
});

static IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*import\s+(static\s+)?([\w$.\s]+?)(\.\s*\*)?\s*;")
        .expect("import pattern is a valid regex")
});

/// A string literal found inside an annotation's argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedLiteral {
    /// Literal content between the quotes, escapes left as written
    pub text: String,
    /// Byte offset of the first content character (opening quote + 1)
    pub content_offset: usize,
    /// Fully-qualified name of the innermost enclosing annotation
    pub annotation: String,
}

struct Literal {
    start: usize,
    end: usize,
}

/// Find every string literal that is an argument of an annotation.
///
/// `known` lists fully-qualified annotation names used to resolve a simple
/// name brought in by an on-demand import (`import a.b.*;`). Literals are
/// returned in source order.
#[must_use]
pub fn scan_java(text: &str, known: &[String]) -> Vec<AnnotatedLiteral> {
    let (code, literals) = mask(text);
    let imports = Imports::parse(&code);

    let annotations: Vec<(usize, usize, String)> = ANNOTATION
        .captures_iter(&code)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let open = whole.end() - 1;
            let close = matching_paren(&code, open)?;
            let name: String = cap.get(1)?.as_str().split_whitespace().collect();
            Some((open, close, imports.resolve(&name, known)))
        })
        .collect();

    literals
        .iter()
        .filter_map(|literal| {
            // Innermost annotation: the one opening last before the literal.
            let (_, _, annotation) = annotations
                .iter()
                .filter(|(open, close, _)| *open < literal.start && literal.end < *close)
                .max_by_key(|(open, _, _)| *open)?;
            Some(AnnotatedLiteral {
                text: text[literal.start..literal.end].to_string(),
                content_offset: literal.start,
                annotation: annotation.clone(),
            })
        })
        .collect()
}

/// Blank out comments and literal contents, keeping byte offsets.
///
/// Returns the masked code and the content ranges of string literals.
fn mask(text: &str) -> (String, Vec<Literal>) {
    let bytes = text.as_bytes();
    let mut code = bytes.to_vec();
    let mut literals = Vec::new();
    let mut i = 0;

    let blank = |code: &mut Vec<u8>, from: usize, to: usize| {
        for b in &mut code[from..to] {
            if *b != b'\n' {
                *b = b' ';
            }
        }
    };

    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                let end = find_from(bytes, i, b"\n").unwrap_or(bytes.len());
                blank(&mut code, i, end);
                i = end;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let end = find_from(bytes, i + 2, b"*/").map_or(bytes.len(), |p| p + 2);
                blank(&mut code, i, end);
                i = end;
            }
            b'"' if bytes[i..].starts_with(b"\"\"\"") => {
                let end = text_block_end(bytes, i + 3);
                blank(&mut code, i, end);
                i = end;
            }
            quote @ (b'"' | b'\'') => {
                let (content_end, next) = quoted_end(bytes, i + 1, quote);
                blank(&mut code, i + 1, content_end);
                if quote == b'"' && next > content_end {
                    literals.push(Literal {
                        start: i + 1,
                        end: content_end,
                    });
                }
                i = next;
            }
            _ => i += 1,
        }
    }

    // Masking only writes ASCII spaces over whole characters.
    let code = String::from_utf8(code)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned());
    (code, literals)
}

fn find_from(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes[from..].windows(needle.len()).position(|w| w == needle).map(|p| p + from)
}

/// End of a quoted literal whose content starts at `from`.
///
/// Returns `(content_end, next)` where `next` is just past the closing quote.
/// An unterminated literal ends at the line break, with `next == content_end`.
fn quoted_end(bytes: &[u8], from: usize, quote: u8) -> (usize, usize) {
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return (i, i),
            b if b == quote => return (i, i + 1),
            _ => i += 1,
        }
    }
    (bytes.len(), bytes.len())
}

fn text_block_end(bytes: &[u8], from: usize) -> usize {
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 2;
        } else if bytes[i..].starts_with(b"\"\"\"") {
            return i + 3;
        } else {
            i += 1;
        }
    }
    bytes.len()
}

/// Index of the `)` matching the `(` at `open`.
fn matching_paren(code: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in code.bytes().enumerate().skip(open) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

#[derive(Debug, Default)]
struct Imports {
    package: Option<String>,
    single: Vec<String>,
    on_demand: Vec<String>,
}

impl Imports {
    fn parse(code: &str) -> Self {
        let compact = |s: &str| s.split_whitespace().collect::<String>();

        let package = PACKAGE.captures(code).and_then(|cap| cap.get(1)).map(|m| compact(m.as_str()));
        let mut imports = Self {
            package,
            ..Self::default()
        };

        for cap in IMPORT.captures_iter(code) {
            if cap.get(1).is_some() {
                continue;
            }
            let Some(name) = cap.get(2).map(|m| compact(m.as_str())) else {
                continue;
            };
            if cap.get(3).is_some() {
                imports.on_demand.push(name);
            } else {
                imports.single.push(name);
            }
        }
        imports
    }

    /// Fully-qualified name for an annotation as written.
    fn resolve(&self, name: &str, known: &[String]) -> String {
        if name.contains('.') {
            return name.to_string();
        }

        let suffix = format!(".{name}");
        if let Some(imported) = self.single.iter().find(|import| import.ends_with(&suffix)) {
            return imported.clone();
        }

        if let Some(known) = known.iter().find(|known| {
            known.strip_suffix(&suffix).is_some_and(|package| {
                self.on_demand.iter().any(|p| p == package) || self.package.as_deref() == Some(package)
            })
        }) {
            return known.clone();
        }

        match &self.package {
            Some(package) => format!("{package}.{name}"),
            None => name.to_string(),
        }
    }
}
