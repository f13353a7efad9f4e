//! Interactive state layered on top of a [Tessellation]. A [Session] owns
//! the current layout plus everything the user has done to it: which
//! triangles are highlighted, which classes have borders turned on, what's
//! hovered, and the zoom transform.
//!
//! Sessions are driven entirely through [Session::dispatch]. Each
//! [Command] produces a state transition and possibly an [Effect], which is
//! a request for the host to do something outside the session (fetch data,
//! set a timer). This keeps the whole interaction model testable without
//! any UI attached.
//!
//! ## Load Ordering
//! Every layout has a generation number. Building a session or resizing it
//! starts a new generation and hands out a [LoadTicket]. Data deliveries
//! carry the ticket they were fetched under, and any delivery from an older
//! generation is dropped. A resize therefore cancels whatever fetch was in
//! flight for the old layout.

pub mod panel;

use crate::{
    config::SessionConfig,
    data::{self, ClassControl, ClassId, TableauRecord},
    session::panel::{InfoPanel, HIDE_DELAY},
    tessellation::{AlcoveCoordinate, Tessellation, TriangleId, Viewport},
    timed,
    util::unit::{Point2, Vector2},
};
use anyhow::{anyhow, Context};
use fnv::FnvHashSet;
use indexmap::IndexMap;
use log::{debug, error, info, trace};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum::{Display, EnumString};

/// Proof that a data fetch was requested for a particular layout
/// generation. Hand it back along with the fetched data.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Identifies one pending panel hide. Only the most recent hide can take
/// effect, so a stale timer firing late does nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HideToken(u64);

/// Where the data for the current layout is at
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum LoadState {
    /// Waiting on a fetch. The loading indicator is showing.
    Pending { ticket: LoadTicket },
    Loaded,
    /// The fetch failed. Nothing is retried, and the loading indicator is
    /// left up.
    Failed { error: String },
}

/// Everything a session can be told to do
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// The viewport changed size. Throws away all state and rebuilds.
    Resize(Viewport),
    /// A fetch finished successfully
    DataLoaded {
        ticket: LoadTicket,
        records: Vec<TableauRecord>,
    },
    /// A fetch failed
    LoadFailed { ticket: LoadTicket, error: String },
    /// A class checkbox was checked or unchecked
    ToggleClass { class_id: ClassId, checked: bool },
    /// Collapse or expand the class checkbox list
    ToggleControls,
    /// The pointer entered a triangle
    HoverEnter(TriangleId),
    /// The pointer left whatever triangle it was on
    HoverLeave,
    /// A hide timer set by [Effect::ScheduleHide] fired
    HidePanel(HideToken),
    /// Set the zoom/pan transform. The scale is clamped to the configured
    /// bounds.
    Zoom { scale: f64, translate: Vector2 },
}

/// Work the host needs to do after a command
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    None,
    /// Fetch the data, then dispatch [Command::DataLoaded] or
    /// [Command::LoadFailed] with this ticket
    Fetch(LoadTicket),
    /// Wait for the delay, then dispatch [Command::HidePanel] with this
    /// token
    ScheduleHide { token: HideToken, delay: Duration },
}

/// Whether a highlighted triangle's record is a cluster variable. Controls
/// the fill color.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    PartialEq,
    Eq,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HighlightKind {
    Standard,
    Cluster,
}

/// A triangle filled in on behalf of a record
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub triangle: TriangleId,
    /// Index of the record that claimed this triangle first
    pub record: usize,
    pub class_id: ClassId,
    pub kind: HighlightKind,
}

/// A border overlay drawn around a triangle because its class is selected
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BorderAnnotation {
    pub class_id: ClassId,
    pub alcove: AlcoveCoordinate,
    /// Centroid of the bordered triangle
    pub center: Point2,
    pub triangle: TriangleId,
}

impl BorderAnnotation {
    /// Element id for the rendered border
    pub fn element_id(&self) -> String {
        format!(
            "border-{}-{}-{}",
            self.class_id, self.alcove.a, self.alcove.b
        )
    }
}

/// Ids of triangles that have already been filled in, so that multiple
/// records landing on the same triangle only draw it once
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawnTriangleSet(FnvHashSet<TriangleId>);

impl DrawnTriangleSet {
    /// Mark a triangle as drawn. Returns `false` if it already was.
    pub fn insert(&mut self, id: TriangleId) -> bool {
        self.0.insert(id)
    }

    pub fn contains(&self, id: TriangleId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    pub fn iter(&self) -> impl Iterator<Item = TriangleId> + '_ {
        self.0.iter().copied()
    }
}

/// Zoom and pan applied to the whole canvas
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    pub scale: f64,
    pub translate: Vector2,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate: Vector2::ZERO,
        }
    }
}

/// A tessellation plus all the interactive state on top of it
#[derive(Clone, Debug, Serialize)]
pub struct Session {
    config: SessionConfig,
    tessellation: Tessellation,

    /// Bumped on every rebuild. See the module docs on load ordering.
    generation: u64,
    load_state: LoadState,

    records: Vec<TableauRecord>,
    controls: IndexMap<ClassId, ClassControl>,
    selected_classes: FnvHashSet<ClassId>,
    controls_collapsed: bool,

    /// In the order they were drawn
    highlights: Vec<Highlight>,
    drawn: DrawnTriangleSet,
    borders: Vec<BorderAnnotation>,

    hovered: Option<TriangleId>,
    panel: Option<InfoPanel>,
    /// Bumped on every hover change, used to invalidate pending hides
    hover_seq: u64,

    zoom: ZoomTransform,
}

impl Session {
    /// Build a new session for a viewport. Returns the ticket for the
    /// initial data fetch. Fails if the config is invalid or the viewport
    /// can't hold any triangles.
    pub fn new(
        config: SessionConfig,
        viewport: Viewport,
    ) -> anyhow::Result<(Self, LoadTicket)> {
        validator::Validate::validate(&config)
            .context("invalid session config")?;
        let tessellation = Tessellation::build(viewport, config.tessellation)?;
        let ticket = LoadTicket { generation: 1 };
        let mut session = Self {
            config,
            tessellation,
            generation: ticket.generation,
            load_state: LoadState::Pending { ticket },
            records: Vec::new(),
            controls: IndexMap::new(),
            selected_classes: FnvHashSet::default(),
            controls_collapsed: false,
            highlights: Vec::new(),
            drawn: DrawnTriangleSet::default(),
            borders: Vec::new(),
            hovered: None,
            panel: None,
            hover_seq: 0,
            zoom: ZoomTransform::default(),
        };
        session.mark_fundamental_drawn();
        Ok((session, ticket))
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn tessellation(&self) -> &Tessellation {
        &self.tessellation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn records(&self) -> &[TableauRecord] {
        &self.records
    }

    /// One entry per selectable class, in order of first appearance
    pub fn controls(&self) -> impl Iterator<Item = &ClassControl> {
        self.controls.values()
    }

    pub fn is_class_selected(&self, class_id: ClassId) -> bool {
        self.selected_classes.contains(&class_id)
    }

    pub fn controls_collapsed(&self) -> bool {
        self.controls_collapsed
    }

    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    pub fn drawn(&self) -> &DrawnTriangleSet {
        &self.drawn
    }

    pub fn borders(&self) -> &[BorderAnnotation] {
        &self.borders
    }

    pub fn hovered(&self) -> Option<TriangleId> {
        self.hovered
    }

    pub fn panel(&self) -> Option<&InfoPanel> {
        self.panel.as_ref()
    }

    pub fn zoom(&self) -> ZoomTransform {
        self.zoom
    }

    /// Apply a command to the session. Returns whatever follow-up work the
    /// host needs to do. Errors leave the session unchanged.
    pub fn dispatch(&mut self, command: Command) -> anyhow::Result<Effect> {
        trace!("Dispatching {:?}", command);
        match command {
            Command::Resize(viewport) => self.resize(viewport),
            Command::DataLoaded { ticket, records } => {
                if self.accept_ticket(ticket) {
                    self.load_records(records);
                }
                Ok(Effect::None)
            }
            Command::LoadFailed { ticket, error } => {
                if self.accept_ticket(ticket) {
                    error!("Error loading tableau data: {}", error);
                    self.load_state = LoadState::Failed { error };
                }
                Ok(Effect::None)
            }
            Command::ToggleClass { class_id, checked } => {
                self.toggle_class(class_id, checked)?;
                Ok(Effect::None)
            }
            Command::ToggleControls => {
                self.controls_collapsed = !self.controls_collapsed;
                Ok(Effect::None)
            }
            Command::HoverEnter(id) => {
                self.hover_enter(id);
                Ok(Effect::None)
            }
            Command::HoverLeave => Ok(self.hover_leave()),
            Command::HidePanel(token) => {
                // Only the latest hide counts, and only if nothing has been
                // hovered since it was scheduled
                if token == HideToken(self.hover_seq) && self.hovered.is_none()
                {
                    self.panel = None;
                }
                Ok(Effect::None)
            }
            Command::Zoom { scale, translate } => {
                self.zoom = ZoomTransform {
                    scale: self.config.render.zoom.clamp(scale),
                    translate,
                };
                Ok(Effect::None)
            }
        }
    }

    /// Rebuild everything for a new viewport. All derived state is thrown
    /// away, including loaded data, and a new fetch is requested.
    fn resize(&mut self, viewport: Viewport) -> anyhow::Result<Effect> {
        // Build first, so a failure leaves the old layout intact
        let tessellation =
            Tessellation::build(viewport, self.config.tessellation)?;
        info!(
            "Redrawing for viewport {}x{}",
            viewport.width, viewport.height
        );

        self.generation += 1;
        let ticket = LoadTicket {
            generation: self.generation,
        };
        self.tessellation = tessellation;
        self.load_state = LoadState::Pending { ticket };
        self.records.clear();
        self.controls.clear();
        self.selected_classes.clear();
        self.highlights.clear();
        self.drawn.clear();
        self.borders.clear();
        self.hovered = None;
        self.panel = None;
        self.hover_seq += 1;
        self.mark_fundamental_drawn();

        Ok(Effect::Fetch(ticket))
    }

    fn mark_fundamental_drawn(&mut self) {
        let id = self.tessellation.fundamental().id();
        self.drawn.insert(id);
    }

    /// Check that a data delivery belongs to the current layout and that
    /// the layout is still waiting on it
    fn accept_ticket(&self, ticket: LoadTicket) -> bool {
        match &self.load_state {
            LoadState::Pending { ticket: expected } if *expected == ticket => {
                true
            }
            _ => {
                debug!(
                    "Ignoring data for generation {} (current generation {})",
                    ticket.generation, self.generation
                );
                false
            }
        }
    }

    fn load_records(&mut self, records: Vec<TableauRecord>) {
        self.controls = data::class_controls(&records);
        self.records = records;
        self.load_state = LoadState::Loaded;
        timed!("Highlighting", {
            for i in 0..self.records.len() {
                self.highlight(i);
            }
        });
        info!(
            "Highlighted {} triangles for {} records, {} classes available",
            self.highlights.len(),
            self.records.len(),
            self.controls.len()
        );
    }

    /// Fill in the triangle for a record, unless it's already been drawn or
    /// is the fundamental alcove
    fn highlight(&mut self, record_index: usize) {
        let record = &self.records[record_index];
        let triangle = match self.tessellation.resolve(record.alcove_coordinates)
        {
            Some(triangle) => triangle,
            None => return,
        };
        if self.drawn.contains(triangle.id())
            || self.tessellation.is_fundamental(triangle)
        {
            return;
        }

        let highlight = Highlight {
            triangle: triangle.id(),
            record: record_index,
            class_id: record.class_id,
            kind: if record.is_cluster {
                HighlightKind::Cluster
            } else {
                HighlightKind::Standard
            },
        };
        self.drawn.insert(highlight.triangle);
        self.highlights.push(highlight);
    }

    fn toggle_class(
        &mut self,
        class_id: ClassId,
        checked: bool,
    ) -> anyhow::Result<()> {
        let members = self
            .controls
            .get(&class_id)
            .ok_or_else(|| anyhow!("no class with id {}", class_id))?
            .members
            .clone();

        if checked == self.selected_classes.contains(&class_id) {
            // Checkbox is already in that state
            return Ok(());
        }

        if checked {
            self.selected_classes.insert(class_id);
            for i in members {
                self.add_border(i);
            }
        } else {
            self.selected_classes.remove(&class_id);
            for i in members {
                self.remove_border(i);
            }
        }
        debug!(
            "Class {} {}, {} borders now drawn",
            class_id,
            if checked { "selected" } else { "deselected" },
            self.borders.len()
        );
        Ok(())
    }

    /// Draw a border around a record's triangle, unless some border is
    /// already drawn there
    fn add_border(&mut self, record_index: usize) {
        let record = &self.records[record_index];
        let epsilon = self.tessellation.config().epsilon;
        let triangle = match self.tessellation.resolve(record.alcove_coordinates)
        {
            Some(triangle) => triangle,
            None => return,
        };
        let center = triangle.center();
        if self
            .borders
            .iter()
            .any(|border| border.center.distance_to(center) < epsilon)
        {
            return;
        }

        self.borders.push(BorderAnnotation {
            class_id: record.class_id,
            alcove: record.alcove_coordinates,
            center,
            triangle: triangle.id(),
        });
    }

    /// Remove any border for this record's class near the record's lattice
    /// position
    fn remove_border(&mut self, record_index: usize) {
        let record = &self.records[record_index];
        let epsilon = self.tessellation.config().epsilon;
        let target = self.tessellation.alcove_center(record.alcove_coordinates);
        let class_id = record.class_id;
        self.borders.retain(|border| {
            !(border.class_id == class_id
                && border.center.distance_to(target) < epsilon)
        });
    }

    /// Only highlighted triangles respond to hovering
    fn hover_enter(&mut self, id: TriangleId) {
        let highlight = match self.highlights.iter().find(|h| h.triangle == id)
        {
            Some(highlight) => *highlight,
            None => {
                trace!("Ignoring hover on undrawn triangle {}", id);
                return;
            }
        };
        let anchor = match self.tessellation.get(id) {
            Some(triangle) => triangle.center(),
            None => return,
        };

        self.hover_seq += 1;
        self.hovered = Some(id);
        self.panel = Some(InfoPanel::new(
            highlight.record,
            &self.records[highlight.record],
            anchor,
            self.tessellation.viewport(),
        ));
    }

    fn hover_leave(&mut self) -> Effect {
        if self.hovered.take().is_none() {
            return Effect::None;
        }
        self.hover_seq += 1;
        Effect::ScheduleHide {
            token: HideToken(self.hover_seq),
            delay: HIDE_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(class_id: ClassId, a: f64, b: f64, is_cluster: bool) -> TableauRecord {
        TableauRecord {
            class_id,
            alcove_coordinates: AlcoveCoordinate::new(a, b),
            is_cluster,
            weight_vector: vec![class_id as i64],
            tableau: vec![vec![1, 2], vec![3]],
        }
    }

    fn new_session() -> (Session, LoadTicket) {
        Session::new(SessionConfig::default(), Viewport::new(800.0, 600.0))
            .unwrap()
    }

    fn loaded_session(records: Vec<TableauRecord>) -> Session {
        let (mut session, ticket) = new_session();
        session
            .dispatch(Command::DataLoaded { ticket, records })
            .unwrap();
        session
    }

    #[test]
    fn test_new_session_marks_fundamental() {
        let (session, ticket) = new_session();
        assert_eq!(ticket.generation(), 1);
        assert_eq!(session.load_state(), &LoadState::Pending { ticket });
        let fundamental = session.tessellation().fundamental().id();
        assert_eq!(session.drawn().iter().collect::<Vec<_>>(), vec![fundamental]);
    }

    #[test]
    fn test_highlight_dedup_and_fundamental_skip() {
        let session = loaded_session(vec![
            record(1, 0.0, 0.0, false), // fundamental, skipped
            record(1, -1.0, 0.0, true),
            record(2, -1.0, 0.0, false), // same triangle, skipped
            record(2, 1.0, 1.0, false),
            record(2, 500.0, 500.0, false), // off the map
        ]);
        assert_eq!(session.load_state(), &LoadState::Loaded);
        let highlights = session.highlights();
        assert_eq!(highlights.len(), 2);
        assert_eq!(highlights[0].record, 1);
        assert_eq!(highlights[0].kind, HighlightKind::Cluster);
        assert_eq!(highlights[1].record, 3);
        assert_eq!(highlights[1].kind, HighlightKind::Standard);
        // Fundamental + 2 highlights
        assert_eq!(session.drawn().len(), 3);
    }

    #[test]
    fn test_stale_ticket_ignored() {
        let (mut session, stale) = new_session();
        let effect = session
            .dispatch(Command::Resize(Viewport::new(640.0, 480.0)))
            .unwrap();
        let fresh = match effect {
            Effect::Fetch(ticket) => ticket,
            other => panic!("expected fetch, got {:?}", other),
        };
        assert_eq!(fresh.generation(), 2);

        session
            .dispatch(Command::DataLoaded {
                ticket: stale,
                records: vec![record(1, -1.0, 0.0, false)],
            })
            .unwrap();
        assert!(session.records().is_empty());
        assert_eq!(session.load_state(), &LoadState::Pending { ticket: fresh });

        session
            .dispatch(Command::DataLoaded {
                ticket: fresh,
                records: vec![record(1, -1.0, 0.0, false)],
            })
            .unwrap();
        assert_eq!(session.records().len(), 1);
        assert_eq!(session.highlights().len(), 1);

        // A second delivery for the same ticket is ignored too
        session
            .dispatch(Command::DataLoaded {
                ticket: fresh,
                records: vec![],
            })
            .unwrap();
        assert_eq!(session.records().len(), 1);
    }

    #[test]
    fn test_load_failed() {
        let (mut session, ticket) = new_session();
        session
            .dispatch(Command::LoadFailed {
                ticket,
                error: "not found".into(),
            })
            .unwrap();
        assert_eq!(
            session.load_state(),
            &LoadState::Failed {
                error: "not found".into()
            }
        );
        assert!(session.highlights().is_empty());
    }

    #[test]
    fn test_toggle_class_round_trip() {
        let mut session = loaded_session(vec![
            record(1, -1.0, 0.0, false),
            record(1, 1.0, 1.0, false),
            record(2, 0.0, -1.0, false),
        ]);
        session
            .dispatch(Command::ToggleClass {
                class_id: 2,
                checked: true,
            })
            .unwrap();
        let before = session.borders().to_vec();
        assert_eq!(before.len(), 1);

        session
            .dispatch(Command::ToggleClass {
                class_id: 1,
                checked: true,
            })
            .unwrap();
        assert_eq!(session.borders().len(), 3);
        assert!(session.is_class_selected(1));

        session
            .dispatch(Command::ToggleClass {
                class_id: 1,
                checked: false,
            })
            .unwrap();
        assert_eq!(session.borders(), before.as_slice());
        assert!(!session.is_class_selected(1));
    }

    #[test]
    fn test_border_not_duplicated_across_classes() {
        let mut session = loaded_session(vec![
            record(1, 1.0, 1.0, false),
            record(2, 1.0, 1.0, false),
        ]);
        for class_id in &[1, 2] {
            session
                .dispatch(Command::ToggleClass {
                    class_id: *class_id,
                    checked: true,
                })
                .unwrap();
        }
        assert_eq!(session.borders().len(), 1);
        assert_eq!(session.borders()[0].class_id, 1);
        assert_eq!(session.borders()[0].element_id(), "border-1-1-1");
    }

    #[test]
    fn test_toggle_unknown_class() {
        let mut session = loaded_session(vec![record(0, -1.0, 0.0, false)]);
        // Class 0 never gets a control
        assert!(session
            .dispatch(Command::ToggleClass {
                class_id: 0,
                checked: true
            })
            .is_err());
    }

    #[test]
    fn test_resize_regenerates_drawn_set() {
        let mut session = loaded_session(vec![record(1, -1.0, 0.0, false)]);
        session
            .dispatch(Command::ToggleClass {
                class_id: 1,
                checked: true,
            })
            .unwrap();
        let old_ids: Vec<_> = session.drawn().iter().collect();
        assert_eq!(old_ids.len(), 2);

        let ticket = match session
            .dispatch(Command::Resize(Viewport::new(1000.0, 700.0)))
            .unwrap()
        {
            Effect::Fetch(ticket) => ticket,
            other => panic!("expected fetch, got {:?}", other),
        };
        let fundamental = session.tessellation().fundamental().id();
        assert_eq!(session.drawn().iter().collect::<Vec<_>>(), vec![fundamental]);
        assert!(session.highlights().is_empty());
        assert!(session.borders().is_empty());
        assert!(!session.is_class_selected(1));

        session
            .dispatch(Command::DataLoaded {
                ticket,
                records: vec![record(1, -1.0, 0.0, false)],
            })
            .unwrap();
        let expected = session
            .tessellation()
            .resolve(AlcoveCoordinate::new(-1.0, 0.0))
            .unwrap()
            .id();
        let mut ids: Vec<_> = session.drawn().iter().collect();
        ids.sort();
        let mut want = vec![fundamental, expected];
        want.sort();
        assert_eq!(ids, want);
    }

    #[test]
    fn test_hover_and_hide() {
        let mut session = loaded_session(vec![record(1, -1.0, 0.0, true)]);
        let id = session.highlights()[0].triangle;

        session.dispatch(Command::HoverEnter(id)).unwrap();
        assert_eq!(session.hovered(), Some(id));
        assert_eq!(session.panel().unwrap().record, 0);

        let token = match session.dispatch(Command::HoverLeave).unwrap() {
            Effect::ScheduleHide { token, delay } => {
                assert_eq!(delay, HIDE_DELAY);
                token
            }
            other => panic!("expected hide, got {:?}", other),
        };
        // Panel lingers until the timer fires
        assert!(session.panel().is_some());
        session.dispatch(Command::HidePanel(token)).unwrap();
        assert!(session.panel().is_none());
    }

    #[test]
    fn test_hover_cancels_pending_hide() {
        let mut session = loaded_session(vec![record(1, -1.0, 0.0, true)]);
        let id = session.highlights()[0].triangle;

        session.dispatch(Command::HoverEnter(id)).unwrap();
        let token = match session.dispatch(Command::HoverLeave).unwrap() {
            Effect::ScheduleHide { token, .. } => token,
            other => panic!("expected hide, got {:?}", other),
        };
        session.dispatch(Command::HoverEnter(id)).unwrap();
        session.dispatch(Command::HidePanel(token)).unwrap();
        assert!(session.panel().is_some());
    }

    #[test]
    fn test_hover_undrawn_triangle_ignored() {
        let mut session = loaded_session(vec![]);
        let fundamental = session.tessellation().fundamental().id();
        session.dispatch(Command::HoverEnter(fundamental)).unwrap();
        assert_eq!(session.hovered(), None);
        assert_eq!(session.dispatch(Command::HoverLeave).unwrap(), Effect::None);
    }

    #[test]
    fn test_zoom_clamped() {
        let (mut session, _) = new_session();
        session
            .dispatch(Command::Zoom {
                scale: 100.0,
                translate: Vector2::new(5.0, -5.0),
            })
            .unwrap();
        assert_eq!(session.zoom().scale, 10.0);
        assert_eq!(session.zoom().translate, Vector2::new(5.0, -5.0));
    }

    #[test]
    fn test_toggle_controls() {
        let (mut session, _) = new_session();
        assert!(!session.controls_collapsed());
        session.dispatch(Command::ToggleControls).unwrap();
        assert!(session.controls_collapsed());
    }
}
