//! In-memory library of named floor plans.
//!
//! Saving copies the current element list into the library: the first save
//! of a fresh drawing appends a new plan (named `Floor plan N`) and makes it
//! current; later saves replace that plan's elements. Nothing is written to
//! disk.

#[cfg(test)]
#[path = "plans_test.rs"]
mod plans_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::doc::Element;

/// Unique identifier for a saved floor plan.
pub type PlanId = Uuid;

/// A saved floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    pub id: PlanId,
    pub name: String,
    pub elements: Vec<Element>,
}

/// Saved plans plus the one currently being edited, if it was ever saved.
#[derive(Debug, Clone, Default)]
pub struct PlanLibrary {
    plans: Vec<FloorPlan>,
    current: Option<PlanId>,
}

impl PlanLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Save `elements` into the current plan, or into a new plan if none is current.
    pub fn save(&mut self, elements: &[Element]) -> &FloorPlan {
        let existing = self.current.and_then(|id| self.plans.iter().position(|p| p.id == id));
        let index = if let Some(index) = existing {
            self.plans[index].elements = elements.to_vec();
            index
        } else {
            let plan = FloorPlan {
                id: Uuid::new_v4(),
                name: format!("Floor plan {}", self.plans.len() + 1),
                elements: elements.to_vec(),
            };
            self.current = Some(plan.id);
            self.plans.push(plan);
            self.plans.len() - 1
        };
        &self.plans[index]
    }

    /// Detach from the current plan so the next save creates a new one.
    pub fn start_new(&mut self) {
        self.current = None;
    }

    /// Make the plan with `id` current and return it.
    pub fn open(&mut self, id: &PlanId) -> Option<&FloorPlan> {
        let index = self.plans.iter().position(|p| p.id == *id)?;
        self.current = Some(*id);
        Some(&self.plans[index])
    }

    /// The plan currently being edited, if it has been saved.
    #[must_use]
    pub fn current(&self) -> Option<&FloorPlan> {
        let id = self.current?;
        self.plans.iter().find(|p| p.id == id)
    }

    /// All saved plans in creation order.
    #[must_use]
    pub fn plans(&self) -> &[FloorPlan] {
        &self.plans
    }
}
