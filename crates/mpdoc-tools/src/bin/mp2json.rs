//! Read MessagePack from standard input, pretty-print JSON to standard
//! output. A stream with more than one top-level value is wrapped in an
//! array. Silent on malformed input; always exits 0.

use std::io::{self, Read};

use mpdoc::Node;

fn main() {
    let mut input = Vec::new();
    if io::stdin().read_to_end(&mut input).is_err() {
        return;
    }

    let Ok(mut roots) = mpdoc::unpack(&input) else {
        return;
    };

    let doc = if roots.len() == 1 {
        roots.remove(0)
    } else {
        Node::Arr(roots)
    };

    if let Ok(json) = mpdoc::to_json(&doc) {
        println!("{json}");
    }
}
