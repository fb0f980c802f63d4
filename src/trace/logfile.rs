//! Request-log traces
//!
//! Turns a Common-Log-Format access log (host - - [ts] "METHOD path
//! HTTP/x.x" status size) into an integer access trace by interning each
//! distinct request path as a dense id in first-seen order. Malformed lines
//! are skipped; log encodings that are not valid UTF-8 are read lossily.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::Item;

/// Extract the request path from one log line, if it is well formed.
pub fn request_path(line: &str) -> Option<&str> {
    let start = line.find('"')? + 1;
    let rest = &line[start..];
    let request = &rest[..rest.find('"')?];

    let mut fields = request.split_whitespace();
    let method = fields.next()?;
    let path = fields.next()?;
    let protocol = fields.next()?;
    if method.is_empty() || !method.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }
    if !protocol.starts_with("HTTP") {
        return None;
    }
    Some(path)
}

/// Intern an iterator of request paths into a dense integer trace.
///
/// Ids are assigned in first-seen order. Returns the trace and the number of
/// distinct items.
pub fn intern_requests<'a, I>(paths: I, max_requests: Option<usize>) -> (Vec<Item>, usize)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ids: HashMap<String, Item> = HashMap::new();
    let mut trace = Vec::new();
    for path in paths {
        if let Some(cap) = max_requests {
            if trace.len() >= cap {
                break;
            }
        }
        let next_id = ids.len() as Item;
        let id = *ids.entry(path.to_owned()).or_insert(next_id);
        trace.push(id);
    }
    let unique = ids.len();
    (trace, unique)
}

/// Read an access log from disk into an integer trace.
///
/// `max_requests` caps how many parsed requests are kept; lines that do not
/// carry a well-formed request field are skipped without counting.
pub fn read_trace<P: AsRef<Path>>(
    path: P,
    max_requests: Option<usize>,
) -> io::Result<(Vec<Item>, usize)> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut ids: HashMap<String, Item> = HashMap::new();
    let mut trace = Vec::new();
    let mut raw = Vec::new();

    loop {
        if let Some(cap) = max_requests {
            if trace.len() >= cap {
                break;
            }
        }
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&raw);
        if let Some(path) = request_path(&line) {
            let next_id = ids.len() as Item;
            let id = *ids.entry(path.to_owned()).or_insert(next_id);
            trace.push(id);
        }
    }
    let unique = ids.len();
    Ok((trace, unique))
}
