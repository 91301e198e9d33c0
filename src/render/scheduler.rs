//! Selective recomputation of region visuals.
//!
//! The composed map view is memoized on exactly three inputs: the store
//! revision, the selected id and the paint handler's identity. Nothing else
//! (menus, panels, the armed tool) can reach it. Inside a composition, a
//! region recomputes only when its [`VisualKey`] changed.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::regions::{HandlerId, RegionId, RegionStore, Selection};

use super::visual::{render_region, RegionVisual, VisualKey};

/// Inputs the map view is memoized against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewInputs {
    pub revision: u64,
    pub selected: Option<RegionId>,
    pub handler: HandlerId,
}

impl ViewInputs {
    pub fn capture(store: &RegionStore, selection: &Selection, handler: HandlerId) -> Self {
        Self {
            revision: store.revision(),
            selected: selection.id().cloned(),
            handler,
        }
    }
}

#[derive(Debug)]
struct CachedNode {
    key: VisualKey,
    visual: RegionVisual,
    recomputes: u64,
}

/// Regions whose visuals must be pushed to their sprites
#[derive(Debug, Default)]
pub struct RenderPlan {
    pub redraw: Vec<(RegionId, RegionVisual)>,
}

impl RenderPlan {
    pub fn is_empty(&self) -> bool {
        self.redraw.is_empty()
    }
}

#[derive(Resource, Debug, Default)]
pub struct RenderScheduler {
    regions: Vec<RegionId>,
    last_inputs: Option<ViewInputs>,
    nodes: HashMap<RegionId, CachedNode>,
    compositions: u64,
}

impl RenderScheduler {
    /// Set the regions on the map, in draw order. Drops every cached visual.
    pub fn set_regions(&mut self, regions: Vec<RegionId>) {
        self.regions = regions;
        self.nodes.clear();
        self.last_inputs = None;
    }

    pub fn regions(&self) -> &[RegionId] {
        &self.regions
    }

    /// Diff the current state against the cached one.
    pub fn schedule(
        &mut self,
        store: &RegionStore,
        selection: &Selection,
        handler: HandlerId,
    ) -> RenderPlan {
        let inputs = ViewInputs::capture(store, selection, handler);
        if self.last_inputs.as_ref() == Some(&inputs) {
            return RenderPlan::default();
        }
        self.compositions += 1;

        let mut plan = RenderPlan::default();
        for id in &self.regions {
            let key = VisualKey::derive(&store.record(id), selection.is_selected(id));

            match self.nodes.get_mut(id) {
                Some(node) if node.key == key => {}
                Some(node) => {
                    node.visual = render_region(&key);
                    node.key = key;
                    node.recomputes += 1;
                    plan.redraw.push((id.clone(), node.visual));
                }
                None => {
                    let visual = render_region(&key);
                    self.nodes.insert(
                        id.clone(),
                        CachedNode {
                            key,
                            visual,
                            recomputes: 1,
                        },
                    );
                    plan.redraw.push((id.clone(), visual));
                }
            }
        }

        self.last_inputs = Some(inputs);
        plan
    }

    /// How many times the region's visual has been computed
    pub fn recompute_count(&self, id: &RegionId) -> u64 {
        self.nodes.get(id).map_or(0, |n| n.recomputes)
    }

    /// How many times the map view missed its memo and was recomposed
    pub fn compositions(&self) -> u64 {
        self.compositions
    }

    /// Last computed visual of a region
    pub fn visual(&self, id: &RegionId) -> Option<&RegionVisual> {
        self.nodes.get(id).map(|n| &n.visual)
    }
}
