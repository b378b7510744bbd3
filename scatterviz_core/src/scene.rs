// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layered retained scene and diffing.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

use crate::mark::{Mark, MarkId};

/// Identifies a group of marks owned by one renderer (an axis, the glyphs, the labels).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u32);

/// A change to one mark produced by [`Scene::tick_layer`].
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A mark that did not exist before.
    Enter {
        /// Mark id.
        id: MarkId,
        /// The new mark.
        new: Box<Mark>,
    },
    /// A mark whose content changed.
    Update {
        /// Mark id.
        id: MarkId,
        /// The previous target mark.
        old: Box<Mark>,
        /// The new target mark.
        new: Box<Mark>,
    },
    /// A mark that is no longer produced.
    Exit {
        /// Mark id.
        id: MarkId,
        /// The removed mark.
        old: Box<Mark>,
    },
}

impl MarkDiff {
    /// Returns the id this diff applies to.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }

    /// Returns `true` for [`MarkDiff::Enter`].
    pub fn is_enter(&self) -> bool {
        matches!(self, Self::Enter { .. })
    }

    /// Returns `true` for [`MarkDiff::Exit`].
    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Exit { .. })
    }
}

/// Retained target state of every mark, grouped by layer.
#[derive(Debug, Default)]
pub struct Scene {
    marks: HashMap<MarkId, Mark>,
    layers: HashMap<LayerId, Vec<MarkId>>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the contents of `layer` with `marks` and returns what changed.
    ///
    /// Diffs come in submission order (enters and updates), followed by exits in the layer's
    /// previous order. A mark submitted unchanged produces no diff. Later duplicates of an id
    /// within one submission are dropped.
    pub fn tick_layer(&mut self, layer: LayerId, marks: Vec<Mark>) -> Vec<MarkDiff> {
        let previous = self.layers.remove(&layer).unwrap_or_default();
        let mut seen: HashSet<MarkId> = HashSet::with_capacity(marks.len());
        let mut order = Vec::with_capacity(marks.len());
        let mut diffs = Vec::new();

        for mark in marks {
            let id = mark.id;
            if !seen.insert(id) {
                continue;
            }
            order.push(id);
            match self.marks.insert(id, mark.clone()) {
                None => diffs.push(MarkDiff::Enter {
                    id,
                    new: Box::new(mark),
                }),
                Some(old) if old != mark => diffs.push(MarkDiff::Update {
                    id,
                    old: Box::new(old),
                    new: Box::new(mark),
                }),
                Some(_) => {}
            }
        }

        for id in previous {
            if seen.contains(&id) {
                continue;
            }
            if let Some(old) = self.marks.remove(&id) {
                diffs.push(MarkDiff::Exit {
                    id,
                    old: Box::new(old),
                });
            }
        }

        self.layers.insert(layer, order);
        diffs
    }

    /// Returns the current target of `id`.
    pub fn get(&self, id: MarkId) -> Option<&Mark> {
        self.marks.get(&id)
    }

    /// Returns the ids of `layer` in submission order.
    pub fn layer(&self, layer: LayerId) -> &[MarkId] {
        self.layers.get(&layer).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of marks across all layers.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if the scene holds no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Iterates all marks in render order: `(z_index, id)`.
    pub fn sorted(&self) -> impl Iterator<Item = &Mark> {
        let mut marks: Vec<&Mark> = self.marks.values().collect();
        marks.sort_by_key(|m| (m.z_index, m.id));
        marks.into_iter()
    }
}
