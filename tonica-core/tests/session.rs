mod common;

use common::{pc, set};
use tonica_core::config::Config;
use tonica_core::Session;
use tonica_types::{Mode, NoteEvent};

#[test]
fn test_manual_editing_with_undo() {
    let mut session = Session::new(Config::embedded().engine_params());
    for n in [0, 4, 7] {
        session.toggle(pc(n));
    }
    assert_eq!(session.selection(), set(&[0, 4, 7]));
    assert_eq!(session.analyze().best().map(|c| c.name()).as_deref(), Some("C Major"));

    session.toggle(pc(11));
    session.toggle(pc(2));
    assert!(session.undo());
    assert!(session.undo());
    assert_eq!(session.selection(), set(&[0, 4, 7]));
    let len = session.history().len();

    // a new edit after undo drops both redo entries
    session.toggle(pc(9));
    assert!(!session.can_redo());
    assert_eq!(session.history().len(), len - 1);
}

#[test]
fn test_loaded_file_keeps_emphasis() {
    let mut session = Session::default();
    session.load_events(&[
        NoteEvent::new(pc(7), 6.0),
        NoteEvent::new(pc(11), 1.0),
        NoteEvent::new(pc(2), 2.0),
        NoteEvent::new(pc(7), 2.0),
    ]);
    let best = session.analyze();
    let best = best.best().expect("best guess");
    assert_eq!((best.root, best.mode), (pc(7), Mode::Major));

    // an added C weighs far less than anything the file played
    session.toggle(pc(0));
    assert!(session.weights().get(pc(0)) < 1.0);
    let ranking = session.analyze();
    assert_eq!(ranking.best().map(|c| c.name()).as_deref(), Some("G Major"));

    assert!(session.undo());
    assert_eq!(session.selection(), set(&[2, 7, 11]));
}

#[test]
fn test_clear_and_undo_restores_selection() {
    let mut session = Session::default();
    session.set_selection(set(&[0, 3, 7]));
    session.clear_selection();
    assert!(session.analyze().is_empty());
    assert!(session.undo());
    assert_eq!(session.selection(), set(&[0, 3, 7]));
}
