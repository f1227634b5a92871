//! Notifications sent from the search engine to whatever surface is watching it.
//!
//! The engine never draws anything itself. It reports each discovered vertex, each finalized
//! vertex and each edge of the reconstructed path to a [`SearchObserver`], which may be the
//! terminal board, a recorder used by tests, a logger, or nothing at all.

use log::trace;

use crate::coordinate::Coordinate;

/// Callback interface consumed by the search engine.
///
/// Every method has an empty default body so observers only implement what they render.
pub trait SearchObserver {
    /// A vertex was added to the frontier for the first time.
    fn processing(&mut self, _coordinate: Coordinate) {}

    /// A vertex was removed from the frontier and finalized.
    fn processed(&mut self, _coordinate: Coordinate) {}

    /// One edge of the reconstructed path, reported from the end towards the start.
    fn path_edge(&mut self, _from: Coordinate, _to: Coordinate) {}
}

/// The unit observer ignores every notification.
impl SearchObserver for () {}

/// A single notification, as captured by [`EventRecorder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchEvent {
    /// See [`SearchObserver::processing`].
    Processing(Coordinate),
    /// See [`SearchObserver::processed`].
    Processed(Coordinate),
    /// See [`SearchObserver::path_edge`].
    PathEdge(Coordinate, Coordinate),
}

/// Observer that keeps every notification in arrival order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventRecorder {
    /// Recorded notifications.
    pub events: Vec<SearchEvent>,
}

impl EventRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Coordinates reported as processed, in order.
    pub fn processed_coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.events.iter().filter_map(|event| match event {
            SearchEvent::Processed(coordinate) => Some(*coordinate),
            SearchEvent::Processing(_) | SearchEvent::PathEdge(..) => None,
        })
    }

    /// Coordinates reported as processing, in order.
    pub fn processing_coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.events.iter().filter_map(|event| match event {
            SearchEvent::Processing(coordinate) => Some(*coordinate),
            SearchEvent::Processed(_) | SearchEvent::PathEdge(..) => None,
        })
    }

    /// Path edges, in the end-to-start order they were reported.
    pub fn path_edges(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.events.iter().filter_map(|event| match event {
            SearchEvent::PathEdge(from, to) => Some((*from, *to)),
            SearchEvent::Processing(_) | SearchEvent::Processed(_) => None,
        })
    }
}

impl SearchObserver for EventRecorder {
    fn processing(&mut self, coordinate: Coordinate) {
        self.events.push(SearchEvent::Processing(coordinate));
    }

    fn processed(&mut self, coordinate: Coordinate) {
        self.events.push(SearchEvent::Processed(coordinate));
    }

    fn path_edge(&mut self, from: Coordinate, to: Coordinate) {
        self.events.push(SearchEvent::PathEdge(from, to));
    }
}

/// Observer forwarding every notification to the `trace` log level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl SearchObserver for LogObserver {
    fn processing(&mut self, coordinate: Coordinate) {
        trace!("processing {coordinate}");
    }

    fn processed(&mut self, coordinate: Coordinate) {
        trace!("processed {coordinate}");
    }

    fn path_edge(&mut self, from: Coordinate, to: Coordinate) {
        trace!("path edge {from} -> {to}");
    }
}

/// Forwards notifications to both observers in turn.
impl<A: SearchObserver, B: SearchObserver> SearchObserver for (A, B) {
    fn processing(&mut self, coordinate: Coordinate) {
        self.0.processing(coordinate);
        self.1.processing(coordinate);
    }

    fn processed(&mut self, coordinate: Coordinate) {
        self.0.processed(coordinate);
        self.1.processed(coordinate);
    }

    fn path_edge(&mut self, from: Coordinate, to: Coordinate) {
        self.0.path_edge(from, to);
        self.1.path_edge(from, to);
    }
}
