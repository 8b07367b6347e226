//! Batch annotation and group counter tests.

use std::sync::Arc;

use autoname::annotation::{AnnotationBuilder, AnnotationConfig, GroupCounter};
use autoname::types::{HighlightColor, Request, Response, Transaction};

fn tx(path: &str, body: Option<&str>) -> Transaction {
    let url = format!("https://example.com{path}");
    let request = Request::from_url("GET", &url).expect("valid url");
    Transaction::new(
        request,
        body.map(|b| Response {
            body: b.to_owned(),
        }),
    )
}

fn grouped_config() -> AnnotationConfig {
    AnnotationConfig {
        prepend: "idor".to_owned(),
        append: "check".to_owned(),
        tag_groups: true,
        ..AnnotationConfig::default()
    }
}

#[test]
fn batch_of_three_advances_counter_once() {
    let counter = Arc::new(GroupCounter::new());
    let builder = AnnotationBuilder::new(Arc::clone(&counter));
    let batch = vec![tx("/a", None), tx("/b", None), tx("/c", None)];

    let notes = builder.build(&batch, &grouped_config());

    assert_eq!(counter.current(), 1);
    assert_eq!(notes.len(), 3);
    for annotation in &notes {
        assert_eq!(annotation.notes, "idor  1  check");
    }
}

#[test]
fn single_transaction_does_not_advance_counter() {
    let counter = Arc::new(GroupCounter::new());
    let builder = AnnotationBuilder::new(Arc::clone(&counter));

    let notes = builder.build(&[tx("/a", None)], &grouped_config());

    assert_eq!(counter.current(), 0);
    assert_eq!(notes[0].notes, "idor  check");
}

#[test]
fn grouping_disabled_never_advances() {
    let counter = Arc::new(GroupCounter::new());
    let builder = AnnotationBuilder::new(Arc::clone(&counter));
    let config = AnnotationConfig {
        tag_groups: false,
        ..grouped_config()
    };

    for _ in 0..5 {
        builder.build(&[tx("/a", None), tx("/b", None)], &config);
    }
    assert_eq!(counter.current(), 0);
}

#[test]
fn successive_batches_get_successive_groups() {
    let counter = Arc::new(GroupCounter::new());
    let builder = AnnotationBuilder::new(Arc::clone(&counter));
    let batch = vec![tx("/a", None), tx("/b", None)];

    let first = builder.build(&batch, &grouped_config());
    let second = builder.build(&batch, &grouped_config());

    assert_eq!(first[0].notes, "idor  1  check");
    assert_eq!(second[1].notes, "idor  2  check");
    assert_eq!(counter.current(), 2);
}

#[test]
fn counter_is_shared_between_builders() {
    let counter = Arc::new(GroupCounter::new());
    let one = AnnotationBuilder::new(Arc::clone(&counter));
    let two = AnnotationBuilder::new(Arc::clone(&counter));
    let batch = vec![tx("/a", None), tx("/b", None)];

    one.build(&batch, &grouped_config());
    let notes = two.build(&batch, &grouped_config());

    assert_eq!(notes[0].notes, "idor  2  check");
}

#[test]
fn title_is_included_only_when_found() {
    let counter = Arc::new(GroupCounter::new());
    let builder = AnnotationBuilder::new(counter);
    let config = AnnotationConfig {
        prepend: "p".to_owned(),
        append: "s".to_owned(),
        use_title: true,
        ..AnnotationConfig::default()
    };
    let batch = vec![
        tx("/a", Some("<head><title>Login</title></head>")),
        tx("/b", Some("<body>no head</body>")),
        tx("/c", None),
    ];

    let notes = builder.build(&batch, &config);

    assert_eq!(notes[0].notes, "p  Login  s");
    assert_eq!(notes[1].notes, "p  s");
    assert_eq!(notes[2].notes, "p  s");
}

#[test]
fn title_ignored_when_disabled() {
    let builder = AnnotationBuilder::new(Arc::new(GroupCounter::new()));
    let config = AnnotationConfig::default();
    let notes = builder.build(
        &[tx("/a", Some("<head><title>Login</title></head>"))],
        &config,
    );
    assert_eq!(notes[0].notes, "  ");
}

#[test]
fn highlight_applies_to_whole_batch() {
    let builder = AnnotationBuilder::new(Arc::new(GroupCounter::new()));
    let config = AnnotationConfig {
        highlight_color: HighlightColor::Magenta,
        ..AnnotationConfig::default()
    };
    let notes = builder.build(&[tx("/a", None), tx("/b", None)], &config);
    assert!(notes.iter().all(|n| n.highlight == HighlightColor::Magenta));
}

#[test]
fn empty_batch_yields_no_notes() {
    let counter = Arc::new(GroupCounter::new());
    let builder = AnnotationBuilder::new(Arc::clone(&counter));
    assert!(builder.build(&[], &grouped_config()).is_empty());
    assert_eq!(counter.current(), 0);
}
