use serde_json::json;
use storylog::{BufferConfig, Level, LogBuffer, NoopRecorder, Recorder, StoryError};

fn handle_request(log: &mut dyn Recorder, id: u64) -> Result<u64, StoryError> {
    log.print(&[&"request ", &id]);
    log.record("id", json!(id))?;
    if id == 0 {
        log.panic(&[&"invalid id ", &id])?;
    }
    Ok(id * 2)
}

#[test]
fn count_is_records_plus_sentinel() {
    let mut log = LogBuffer::new();
    for n in 0..7 {
        log.record("n", json!(n)).unwrap();
    }
    assert_eq!(log.count(), 8);
}

#[test]
fn dump_renders_entries_plus_two_and_resets() {
    let mut log = LogBuffer::new();
    log.record("latency", json!(42)).unwrap();
    log.print(&[&"done"]);
    let before = log.count();

    let text = log.dump(false);
    assert_eq!(text.lines().count(), before + 2);
    assert!(text
        .lines()
        .any(|l| l.contains("DEBUG  001  ") && l.ends_with(&format!("{:<30}42", "latency"))));

    assert_eq!(log.count(), 1);
    assert_eq!(log.last_entry().unwrap().name, "START");

    // reusable after a dump
    log.print(&[&"again"]);
    assert_eq!(log.dump(false).lines().count(), 4);
}

#[test]
fn story_flattens_without_draining() {
    let mut story = LogBuffer::story();
    story.push("step", None);
    story.push("result", Some(json!(7)));

    let flat = story.flatten();
    assert_eq!(serde_json::to_value(&flat).unwrap(), json!({"000000": "step", "000001.result": 7}));
    assert_eq!(story.count(), 2);
    assert_eq!(story.flatten(), flat);
}

#[test]
fn panic_propagates_with_entry_kept() {
    let mut log = LogBuffer::new();
    let err = handle_request(&mut log, 0).unwrap_err();
    assert_eq!(err.to_string(), "panic: invalid id 0");

    let last = log.last_entry().unwrap();
    assert_eq!(last.level, Level::Panic);
    assert_eq!(last.name, "invalid id 0");
}

#[test]
fn unset_sinks_accept_everything() {
    assert_eq!(handle_request(&mut NoopRecorder, 4).unwrap(), 8);

    let mut unset: Option<LogBuffer> = None;
    assert_eq!(handle_request(&mut unset, 5).unwrap(), 10);
    assert!(handle_request(&mut unset, 0).is_err());
}

#[test]
fn captured_output_matches_returned_text() {
    let mut log = LogBuffer::with_config(BufferConfig {
        pad: 8,
        ..BufferConfig::default()
    });
    log.record("rows", json!(3)).unwrap();

    let mut sink = Vec::new();
    let text = log.dump_to(&mut sink).unwrap();
    let written = String::from_utf8(sink).unwrap();

    assert_eq!(written.lines().collect::<Vec<_>>(), text.lines().collect::<Vec<_>>());
    assert!(written.contains("rows    3"));
}
