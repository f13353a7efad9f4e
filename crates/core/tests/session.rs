use alcove::{
    data::{
        self,
        preprocess::{self, RawTableau},
        UNCLASSIFIED,
    },
    session::LoadState,
    Command, Effect, Session, SessionConfig, SessionRenderer, Viewport,
};

/// Build records the same way the preprocess command does
fn records() -> Vec<alcove::TableauRecord> {
    let valid = "[[1, 2, 3]]\n[[1, 2, 3]]\n[[1, 2, 3]]\n[[4, 5, 6]]\n";
    let invalid = "[[1, 2, 3]]\n[[1, 1, 2]]\n";
    let mut raw: Vec<RawTableau> =
        preprocess::read_tableaux(valid.as_bytes(), true).unwrap();
    raw.extend(preprocess::read_tableaux(invalid.as_bytes(), false).unwrap());
    let (records, _) = preprocess::build_records(raw, 1).unwrap();
    records
}

#[test]
fn test_preprocessed_records() {
    let records = records();
    assert_eq!(records.len(), 6);
    // [1, 2, 3] has 4 members, [4, 5, 6] and [1, 1, 2] are too small
    assert_eq!(records[0].class_id, 1);
    assert_eq!(records[4].class_id, 1);
    assert_eq!(records[3].class_id, UNCLASSIFIED);
    assert_eq!(records[5].class_id, UNCLASSIFIED);
    // One of each bucket balances out to the origin
    assert_eq!(records[0].alcove_coordinates.a, 0.0);
    assert_eq!(records[0].alcove_coordinates.b, 0.0);

    // Records survive the JSON format that sessions load from
    let json = serde_json::to_string(&records).unwrap();
    assert_eq!(data::parse_records(&json).unwrap(), records);
}

#[test]
fn test_full_workflow() {
    let (mut session, ticket) =
        Session::new(SessionConfig::default(), Viewport::new(1024.0, 768.0))
            .unwrap();
    let mut records = records();
    // Move one record off the fundamental alcove so something gets drawn
    records[3].alcove_coordinates = alcove::AlcoveCoordinate::new(-1.0, 0.0);
    records[3].class_id = 2;

    session
        .dispatch(Command::DataLoaded { ticket, records })
        .unwrap();
    assert_eq!(session.load_state(), &LoadState::Loaded);
    // Most records sit on the fundamental alcove, which is never highlighted.
    // The moved record and the [1, 1, 2] tableau each get a triangle.
    assert_eq!(session.highlights().len(), 2);
    assert_eq!(session.highlights()[0].record, 3);
    assert_eq!(session.highlights()[1].record, 5);
    assert_eq!(
        session.controls().map(|c| c.class_id).collect::<Vec<_>>(),
        vec![1, 2]
    );

    session
        .dispatch(Command::ToggleClass {
            class_id: 2,
            checked: true,
        })
        .unwrap();
    // Checking twice is a no-op
    session
        .dispatch(Command::ToggleClass {
            class_id: 2,
            checked: true,
        })
        .unwrap();
    assert_eq!(session.borders().len(), 1);

    let svg = SessionRenderer::new(&session).render_as_svg();
    assert!(svg.contains("triangle-border"));

    // Resizing throws everything away and asks for a refetch
    let effect = session
        .dispatch(Command::Resize(Viewport::new(800.0, 600.0)))
        .unwrap();
    assert!(matches!(effect, Effect::Fetch(t) if t.generation() == 2));
    assert!(session.borders().is_empty());
    assert_eq!(session.controls().count(), 0);
    assert_eq!(session.drawn().len(), 1);
    assert!(session.highlights().is_empty());
}

#[test]
fn test_failed_load_still_renders_geometry() {
    let (mut session, ticket) =
        Session::new(SessionConfig::default(), Viewport::new(640.0, 480.0))
            .unwrap();
    session
        .dispatch(Command::LoadFailed {
            ticket,
            error: "file not found".into(),
        })
        .unwrap();
    assert!(matches!(session.load_state(), LoadState::Failed { .. }));

    let html = SessionRenderer::new(&session).render_as_html();
    assert!(html.contains("Loading..."));
    assert!(html.contains("fundamental-alcove"));
}

#[test]
fn test_resize_to_invalid_viewport_keeps_layout() {
    let (mut session, _) =
        Session::new(SessionConfig::default(), Viewport::new(640.0, 480.0))
            .unwrap();
    let before = session.tessellation().fundamental().id();
    assert!(session
        .dispatch(Command::Resize(Viewport::new(-5.0, 480.0)))
        .is_err());
    assert_eq!(session.generation(), 1);
    assert_eq!(session.tessellation().fundamental().id(), before);
}

#[test]
fn test_session_snapshot_serializes() {
    let (session, _) =
        Session::new(SessionConfig::default(), Viewport::new(300.0, 200.0))
            .unwrap();
    let json = serde_json::to_value(&session).unwrap();
    assert_eq!(json["generation"], 1);
    assert_eq!(json["load_state"]["state"], "pending");
    assert!(json["tessellation"]["triangles"].is_array());
}
