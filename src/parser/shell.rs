//! Shell tokenization and command splitting
//!
//! Provides utilities for tokenizing and splitting shell command lines.

/// Tokenize a shell command into words
/// Uses shlex for proper shell quoting handling
pub fn tokenize(command: &str) -> Option<Vec<String>> {
    shlex::split(command)
}

/// Tokenize, falling back to whitespace splitting when quotes are unbalanced
pub fn tokenize_lossy(command: &str) -> Vec<String> {
    tokenize(command)
        .unwrap_or_else(|| command.split_whitespace().map(String::from).collect())
}

/// Split a command line on `;`, `&&`, `||`, `|`, `&` and newlines
///
/// Separators inside single or double quotes, or escaped with a backslash,
/// are ignored, as is the `&` of redirections like `2>&1`. Empty segments
/// are dropped.
pub fn split_compound_command(command: &str) -> Vec<&str> {
    let bytes = command.as_bytes();
    let mut segments = Vec::new();
    let mut start = 0;
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if let Some(q) = quote {
            if b == b'\\' && q == b'"' {
                i += 2;
                continue;
            }
            if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }

        let sep_len = match b {
            b'\\' => {
                i += 2;
                continue;
            }
            b'\'' | b'"' => {
                quote = Some(b);
                0
            }
            b';' | b'\n' => 1,
            b'&' | b'|' if bytes.get(i + 1) == Some(&b) => 2,
            b'|' => 1,
            b'&' if !is_redirect_amp(bytes, i) => 1,
            _ => 0,
        };

        if sep_len == 0 {
            i += 1;
            continue;
        }

        push_segment(&mut segments, &command[start..i]);
        i += sep_len;
        start = i;
    }

    if start < command.len() {
        push_segment(&mut segments, &command[start..]);
    }

    segments
}

fn push_segment<'a>(segments: &mut Vec<&'a str>, segment: &'a str) {
    let segment = segment.trim();
    if !segment.is_empty() {
        segments.push(segment);
    }
}

/// `&` that belongs to a redirection (`2>&1`, `<&3`, `&>file`)
fn is_redirect_amp(bytes: &[u8], i: usize) -> bool {
    let prev = i.checked_sub(1).and_then(|p| bytes.get(p));
    matches!(prev, Some(b'>') | Some(b'<')) || bytes.get(i + 1) == Some(&b'>')
}
