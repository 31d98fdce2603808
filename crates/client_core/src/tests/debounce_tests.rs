use super::*;

const QUIET: Duration = Duration::from_millis(500);

#[test]
fn draft_commits_only_after_quiet_period() {
    let start = Instant::now();
    let mut debouncer = SearchDebouncer::new(QUIET);

    debouncer.input("d", start);
    debouncer.input("du", start + Duration::from_millis(120));
    assert_eq!(debouncer.poll(start + Duration::from_millis(400)), None);
    assert_eq!(debouncer.committed(), "");

    assert_eq!(
        debouncer.poll(start + Duration::from_millis(620)),
        Some("du")
    );
    assert_eq!(debouncer.committed(), "du");
    assert_eq!(debouncer.deadline(), None);
}

#[test]
fn each_keystroke_restarts_the_quiet_period() {
    let start = Instant::now();
    let mut debouncer = SearchDebouncer::new(QUIET);

    debouncer.input("e", start);
    debouncer.input("em", start + Duration::from_millis(450));
    assert_eq!(debouncer.poll(start + Duration::from_millis(700)), None);
    assert_eq!(
        debouncer.deadline(),
        Some(start + Duration::from_millis(950))
    );
    assert_eq!(
        debouncer.poll(start + Duration::from_millis(950)),
        Some("em")
    );
}

#[test]
fn unchanged_draft_does_not_commit_again() {
    let start = Instant::now();
    let mut debouncer = SearchDebouncer::new(QUIET);
    debouncer.commit_now("dune");

    debouncer.input("dun", start);
    debouncer.input("dune", start + Duration::from_millis(10));
    assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);
    assert_eq!(debouncer.committed(), "dune");
}

#[test]
fn poll_without_input_is_a_no_op() {
    let mut debouncer = SearchDebouncer::default();
    assert_eq!(debouncer.quiet_period(), DEFAULT_SEARCH_QUIET_PERIOD);
    assert_eq!(debouncer.poll(Instant::now()), None);
}
