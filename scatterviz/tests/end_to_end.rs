// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end runs through the public API.

use std::path::PathBuf;
use std::time::Duration;

use kurbo::Point;
use scatterviz::{
    Axis, Command, Config, DataError, Dataset, Event, Host, Outcome, Reply, Session, XField,
    YField,
};
use scatterviz_core::MarkPayload;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../static/data/clean_team_stats.csv")
}

fn mounted(csv: &str) -> Host {
    let dataset = Dataset::from_reader(csv.as_bytes()).expect("valid csv");
    let mut host = Host::new("scatter", Config::default());
    host.mount(dataset, Duration::ZERO).expect("mount");
    host
}

const TWO_TEAMS: &str = "\
abbr,yards_per_pass_attempt,total_points,passing_touchdowns,rushing_touchdowns,total_offensive_plays,total_touchdowns
NE,7.9,436,35,18,1075,55
NYJ,6.1,333,20,9,1001,31
";

#[test]
fn sample_data_renders_every_team() {
    let dataset = Dataset::from_path(sample_path()).expect("sample data loads");
    let teams = dataset.len();
    let mut host = Host::new("scatter", Config::default());
    host.mount(dataset, Duration::ZERO).expect("mount");
    let svg = host.snapshot(Duration::ZERO).expect("mounted");
    assert_eq!(svg.matches("<circle ").count(), teams);
}

#[test]
fn tooltip_after_switching_both_axes() {
    let mut host = mounted(TWO_TEAMS);
    assert!(matches!(
        host.dispatch(Event::ClickXLabel(XField::PassingTouchdowns), Duration::ZERO),
        Outcome::Reselected { axis: Axis::X, .. }
    ));
    assert!(matches!(
        host.dispatch(Event::ClickYLabel(YField::TotalTouchdowns), Duration::ZERO),
        Outcome::Reselected { axis: Axis::Y, .. }
    ));

    let settled = Duration::from_millis(1000);
    let chart = host.chart().expect("mounted");
    let ne = chart.marks().glyphs[0];
    let center = chart
        .stage()
        .displayed(ne, settled)
        .and_then(|m| match m.payload {
            MarkPayload::Circle(c) => Some(c.center),
            _ => None,
        })
        .expect("NE glyph");
    let pointer = center + chart.layout().plot_offset();

    assert_eq!(host.dispatch(Event::PointerMove(pointer), settled), Outcome::TooltipShown);
    let popup = host.chart().and_then(|c| c.popup()).expect("popup");
    assert_eq!(popup.html, "NE<br>Passing Touchdowns: 35<br>Total Touchdowns:  55");
    assert_eq!(popup.anchor, Point::new(pointer.x, pointer.y - 8.0));

    assert_eq!(host.dispatch(Event::PointerLeave, settled), Outcome::TooltipHidden);
}

#[test]
fn session_script_runs_to_completion() {
    let out = std::env::temp_dir().join(format!("scatterviz-e2e-{}.svg", std::process::id()));
    let script = format!(
        "# comment\n\
         click x rushing_touchdowns\n\
         click x rushing_touchdowns\n\
         advance 1000\n\
         click-at 510 495\n\
         snapshot {}\n\
         state\n",
        out.display()
    );
    let mut session = Session::new(mounted(TWO_TEAMS));
    let mut replies = Vec::new();
    for line in script.lines() {
        if let Some(command) = Command::parse_line(line).expect("valid line") {
            replies.push(session.apply(command).expect("command runs"));
        }
    }

    assert!(matches!(
        replies[0],
        Reply::Dispatched(Outcome::Reselected { axis: Axis::X, .. })
    ));
    assert_eq!(replies[1], Reply::Dispatched(Outcome::Unchanged));
    // The third x title is "Rushing Touchdowns", already active.
    assert_eq!(replies[3], Reply::Dispatched(Outcome::Unchanged));
    assert_eq!(replies[4], Reply::Written(out.clone()));
    assert_eq!(
        replies[5],
        Reply::State("x=rushing_touchdowns y=total_points t=1000ms".to_string())
    );

    let svg = std::fs::read_to_string(&out).expect("snapshot written");
    assert!(svg.contains(r#"data-x="rushing_touchdowns""#));
    let _ = std::fs::remove_file(&out);
}

#[test]
fn resize_resets_selection() {
    let mut session = Session::new(mounted(TWO_TEAMS));
    session
        .apply(Command::ClickY(YField::TotalOffensivePlays))
        .expect("click");
    assert_eq!(
        session.apply(Command::Resize(1280.0, 720.0)).expect("resize"),
        Reply::Resized
    );
    let chart = session.host().chart().expect("mounted");
    assert_eq!(chart.selection().y, YField::TotalPoints);
}

#[test]
fn missing_column_fails_load() {
    let err = Dataset::from_reader("abbr,total_points\nNE,436\n".as_bytes()).unwrap_err();
    assert!(matches!(err, DataError::MissingColumn(_)));
}
