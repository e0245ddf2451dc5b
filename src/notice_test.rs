use super::*;

#[test]
fn notice_defaults() {
    let notice = Notice::new("Saved", "Your settings were saved.", 2000);
    assert_eq!(notice.variant, NoticeVariant::Default);
    assert_eq!(notice.duration, Duration::from_millis(2000));
    assert_eq!(notice.destructive().variant, NoticeVariant::Destructive);
}

#[test]
fn notices_expire_after_duration() {
    let board = NoticeBoard::new();
    let start = Instant::now();
    board.push_at(Notice::new("short", "", 1000), start);
    board.push_at(Notice::new("long", "", 5000), start);

    let titles: Vec<_> = board.active_at(start + Duration::from_millis(500)).into_iter().map(|n| n.title).collect();
    assert_eq!(titles, vec!["short", "long"]);

    let titles: Vec<_> = board.active_at(start + Duration::from_millis(1000)).into_iter().map(|n| n.title).collect();
    assert_eq!(titles, vec!["long"]);

    assert!(board.active_at(start + Duration::from_secs(6)).is_empty());
    assert!(board.titles().is_empty());
}

#[test]
fn push_prunes_expired_notices() {
    let board = NoticeBoard::new();
    let start = Instant::now();
    board.push_at(Notice::new("first", "", 1000), start);
    board.push_at(Notice::new("second", "", 3000), start);

    board.push_at(Notice::new("third", "", 1000), start + Duration::from_secs(2));

    assert_eq!(board.titles(), vec!["second", "third"]);
}

#[test]
fn dismiss_removes_one() {
    let board = NoticeBoard::new();
    let keep = Notice::new("keep", "", 5000);
    let gone = Notice::new("drop", "", 5000);
    let gone_id = gone.id;
    board.push(keep);
    board.push(gone);

    assert!(board.dismiss(gone_id));
    assert!(!board.dismiss(gone_id));
    assert_eq!(board.titles(), vec!["keep"]);
}

#[test]
fn drain_empties_the_board() {
    let board = NoticeBoard::new();
    let shared = board.clone();
    shared.push(Notice::new("a", "", 10));
    shared.push(Notice::new("b", "", 10));
    let drained: Vec<_> = board.drain().into_iter().map(|n| n.title).collect();
    assert_eq!(drained, vec!["a", "b"]);
    assert!(shared.titles().is_empty());
}
