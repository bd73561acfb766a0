//! Library-level tests for the script, writer, and surface pipeline

use std::time::Duration;

use typeline::script::{Script, StepKind};
use typeline::surface::{Surface, TextRegion};
use typeline::writer::{Options, Phase, Writer};

use super::helpers::load_fixture;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn quick_fixture_parses() {
    let script = Script::parse_str(&load_fixture("quick.twl")).unwrap();

    assert_eq!(script.header.title.as_deref(), Some("quick"));
    assert_eq!(script.header.type_delay, Some(0));
    assert_eq!(script.steps.len(), 3);
    assert_eq!(script.steps[0].kind, StepKind::Write("Hello".to_string()));
    assert_eq!(script.steps[1].kind, StepKind::Erase(2));
}

#[test]
fn quick_fixture_plays_to_final_text() {
    let script = Script::parse_str(&load_fixture("quick.twl")).unwrap();
    let options = script.options_over(Options::default());

    let mut writer = Writer::new(TextRegion::new("typeline"), options);
    script.apply(&mut writer).unwrap();
    writer.start().unwrap();

    writer.advance_to(Duration::ZERO);
    assert_eq!(writer.surface().text(), "Help!");
    assert_eq!(writer.phase(), Phase::Done);
}

#[test]
fn seeded_fixture_types_over_initial_text() {
    let script = Script::parse_str(&load_fixture("seeded.twl")).unwrap();
    let options = script.options_over(Options::default());

    let seed = script.header.initial_text.clone().unwrap_or_default();
    let mut writer = Writer::new(TextRegion::with_text("typeline", &seed), options);
    script.apply(&mut writer).unwrap();
    writer.start().unwrap();

    writer.advance_to(Duration::ZERO);
    assert_eq!(writer.surface().text(), "> hi\nbye");
}

#[test]
fn looping_fixture_rearms_after_each_pass() {
    let script = Script::parse_str(&load_fixture("looping.twl")).unwrap();
    let options = script.options_over(Options::default());
    assert!(options.looping);

    let mut writer = Writer::new(TextRegion::new("typeline"), options);
    script.apply(&mut writer).unwrap();
    writer.start().unwrap();

    // Each call applies one full pass; the loop keeps appending.
    writer.advance_to(Duration::ZERO);
    assert_eq!(writer.surface().text(), "spin");
    assert_eq!(writer.loops_completed(), 1);

    writer.advance_to(Duration::ZERO);
    assert_eq!(writer.surface().text(), "spinspin");
    assert_eq!(writer.loops_completed(), 2);
    assert_ne!(writer.phase(), Phase::Done);
}

#[test]
fn erase_fixture_follows_step_delays() {
    let script = Script::parse_str(&load_fixture("erase.twl")).unwrap();
    let options = script.options_over(Options::default());

    let mut writer = Writer::new(TextRegion::new("typeline"), options);
    script.apply(&mut writer).unwrap();
    writer.start().unwrap();

    writer.advance_to(Duration::ZERO);
    assert_eq!(writer.surface().text(), "abc");

    writer.advance_to(ms(50));
    assert_eq!(writer.surface().text(), "ab");

    writer.advance_to(ms(100));
    assert_eq!(writer.surface().text(), "abd");
    assert_eq!(writer.phase(), Phase::Done);
}

#[test]
fn script_roundtrip_matches_source() {
    let script = Script::parse_str(&load_fixture("quick.twl")).unwrap();
    let rendered = script.to_string().unwrap();

    insta::assert_snapshot!(rendered, @r#"
    {"version":1,"title":"quick","type_delay":0}
    [0,"w","Hello"]
    [0,"e",2]
    [0,"w","p!"]
    "#);
}
