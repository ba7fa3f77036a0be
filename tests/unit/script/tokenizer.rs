use super::*;

fn pairs(records: &[Record]) -> Vec<(&str, &str)> {
    records
        .iter()
        .map(|r| (r.command.as_str(), r.args.as_str()))
        .collect()
}

#[test]
fn records_straddling_chunks_are_reassembled() {
    let mut t = Tokenizer::new();
    let mut out = t.feed("var A=\"1\"\nrange x 0");
    assert_eq!(pairs(&out), vec![("var", "A=\"1\"")]);

    out.extend(t.feed(" 10 2\nimg b p.png\n"));
    out.extend(t.finish());

    let whole = tokenize("var A=\"1\"\nrange x 0 10 2\nimg b p.png\n");
    assert_eq!(
        pairs(&out),
        vec![("var", "A=\"1\""), ("range", "x 0 10 2"), ("img", "b p.png")]
    );
    assert_eq!(out, whole);
}

#[test]
fn every_split_point_yields_the_same_records() {
    let src = "var NAME=\"a b\"\n\nrange x 0 6 2\r\n# comment\nimg fg tile.png\nmiff bg.miff";
    let whole = tokenize(src);
    assert_eq!(whole.len(), 4);

    for cut in 0..=src.len() {
        let mut t = Tokenizer::new();
        let mut out = t.feed(&src[..cut]);
        out.extend(t.feed(&src[cut..]));
        out.extend(t.finish());
        assert_eq!(out, whole, "split at {cut}");
    }
}

#[test]
fn line_numbers_count_skipped_lines() {
    let out = tokenize("\n  indented\n# note\nrange y 1 2 1\nVAR X=\"1\"\nimg a b\n");
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].line, 4);
    assert_eq!(out[0].command, "range");
    assert_eq!(out[1].line, 6);
    assert_eq!(out[1].args, "a b");
}

#[test]
fn empty_stream_yields_nothing() {
    let mut t = Tokenizer::new();
    assert!(t.feed("").is_empty());
    assert!(t.finish().is_none());
    assert_eq!(t.lines_seen(), 0);
}

#[test]
fn unterminated_final_line_is_emitted_on_finish() {
    let mut t = Tokenizer::new();
    assert!(t.feed("miff start.miff").is_empty());
    let rec = t.finish().unwrap();
    assert_eq!(rec, Record::new(1, "miff", "start.miff"));
    assert!(t.finish().is_none());
}

#[test]
fn command_is_the_lowercase_run_only() {
    let out = tokenize("range2 0 1\nimg\n");
    assert_eq!(pairs(&out), vec![("range", "2 0 1"), ("img", "")]);
}

#[test]
fn carriage_returns_are_stripped() {
    let out = tokenize("var A=\"x\"\r\n");
    assert_eq!(out[0].args, "A=\"x\"");
}

#[test]
fn long_line_fed_one_byte_at_a_time() {
    let path = "p".repeat(200_000);
    let src = format!("img fg {path}\nmiff m.miff\n");

    let mut t = Tokenizer::new();
    let mut out = Vec::new();
    for (i, _) in src.char_indices() {
        out.extend(t.feed(&src[i..i + 1]));
        if i < path.len() + 7 {
            assert!(out.is_empty(), "record emitted early at byte {i}");
        }
    }
    out.extend(t.finish());

    assert_eq!(out.len(), 2);
    assert_eq!(out[0], Record::new(1, "img", format!("fg {path}")));
    assert_eq!(out[1], Record::new(2, "miff", "m.miff"));
    assert_eq!(t.lines_seen(), 2);
}
