//! Read a JSON document from standard input, write MessagePack bytes to
//! standard output. Silent on unparsable input; always exits 0.

use std::io::{self, Read, Write};

fn main() {
    let mut input = String::new();
    if io::stdin().read_to_string(&mut input).is_err() {
        return;
    }

    let Ok(doc) = mpdoc::from_json(&input) else {
        return;
    };

    let _ = io::stdout().write_all(&mpdoc::pack(&doc));
}
