//! Example of nested lookups on a parsed document.
//!
//! cargo run --package mpdoc --example nested_access

use mpdoc::Node;

fn main() -> Result<(), mpdoc::Error> {
    let doc = mpdoc::from_json(r#"{"users": [{"name": "Amy"}, {"name": "Bob"}]}"#)?;

    let name = doc
        .get_key("users")
        .and_then(|users| users.get(1))
        .and_then(|user| user.get_key("name"))
        .and_then(Node::as_str)
        .expect("document has users[1].name");

    println!("{name}");

    // The same document survives a trip through the wire format.
    let bytes = mpdoc::pack(&doc);
    let roots = mpdoc::unpack(&bytes)?;
    assert_eq!(roots[0], doc);

    Ok(())
}
