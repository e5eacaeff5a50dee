//! The facade is enough to build a tree and drive a console.

use std::sync::Arc;

use orbit::prelude::*;
use orbit::{FixedScreen, RenderCaps, SharedSink};

fn status(repo: &str, ok: bool) -> orbit::Result<Renderable> {
    let mark = if ok {
        Renderable::styled("ok", TextStyle::fore(ConsoleColor::Green))
    } else {
        Renderable::styled("failed", TextStyle::fore(ConsoleColor::Red))
    };
    let link = HyperLink::new(repo, format!("https://git.example.com/{repo}"))?;
    Ok(Renderable::from(link).boxed(Padding::horizontal(1)).add_right(mark))
}

#[test]
fn builds_and_prints_a_summary() {
    let summary = status("repo-a", true)
        .unwrap()
        .add_below(status("repo-b", false).unwrap());
    assert_eq!((summary.width(), summary.height()), (14, 2));

    let sink = SharedSink::new();
    let console = Console::new(
        sink.clone(),
        RenderCaps::PLAIN,
        Arc::new(FixedScreen::new(80)),
        ConsoleConfig::default(),
    );
    console.display(&summary, true);
    assert_eq!(sink.text(), " repo-a ok    \n repo-b failed\n");
}

#[test]
fn invalid_link_converts_to_facade_error() {
    let err = status(" spaced", true).unwrap_err();
    assert!(matches!(err, Error::Widget(_)));
    assert_eq!(err.to_string(), "invalid hyperlink text: must not have surrounding whitespace");
}
