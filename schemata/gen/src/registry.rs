//! Memoized generator slots keyed by element identity.
//!
//! The [`Registry`] hands out exactly one [`Slot`] per [`ElementPath`]. A
//! slot moves `Vacant -> Claimed -> Ready` once: the caller that wins
//! [`Slot::try_claim`] generates and [`Slot::fill`]s it, every other caller
//! sees the identity as taken and moves on without waiting. Claiming before
//! generating is what keeps cyclic schema graphs finite.
//!
//! [`EmissionLog`] is the last line of defense at collection time: it
//! accepts one declaration per identity and rejects a second, different one.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use indexmap::IndexMap;
use strum::Display;

use crate::decl::TypeDeclaration;
use crate::errors::GeneratorError;
use crate::locate::ElementPath;

/// Lifecycle of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SlotPhase {
    Vacant,
    Claimed,
    Ready,
}

#[derive(Debug)]
enum SlotState<O> {
    Vacant,
    Claimed,
    Ready(O),
}

/// A memoized generator and its outcome.
#[derive(Debug)]
pub struct Slot<G, O> {
    generator: G,
    state: Mutex<SlotState<O>>,
}

impl<G, O: Clone> Slot<G, O> {
    fn new(generator: G) -> Self {
        Self {
            generator,
            state: Mutex::new(SlotState::Vacant),
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Moves `Vacant -> Claimed`. Returns `true` for the single caller that
    /// must now generate.
    pub fn try_claim(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match *state {
            SlotState::Vacant => {
                *state = SlotState::Claimed;
                true
            }
            SlotState::Claimed | SlotState::Ready(_) => false,
        }
    }

    /// Stores the outcome. Only the claiming caller calls this.
    pub fn fill(&self, outcome: O) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state = SlotState::Ready(outcome);
    }

    /// The outcome, once ready.
    pub fn outcome(&self) -> Option<O> {
        match &*self.state.lock().unwrap_or_else(PoisonError::into_inner) {
            SlotState::Ready(outcome) => Some(outcome.clone()),
            _ => None,
        }
    }

    pub fn phase(&self) -> SlotPhase {
        match *self.state.lock().unwrap_or_else(PoisonError::into_inner) {
            SlotState::Vacant => SlotPhase::Vacant,
            SlotState::Claimed => SlotPhase::Claimed,
            SlotState::Ready(_) => SlotPhase::Ready,
        }
    }
}

/// Identity-keyed slots with atomic get-or-create.
///
/// ## Examples
///
/// ```
/// use std::sync::Arc;
/// use schemata_gen::locate::ElementPath;
/// use schemata_gen::registry::Registry;
///
/// let registry: Registry<&str, u32> = Registry::new();
/// let path = ElementPath::component("Pet");
///
/// let first = registry.get_or_create(&path, || "generator");
/// let second = registry.get_or_create(&path, || "another generator");
///
/// assert!(Arc::ptr_eq(&first, &second));
/// assert_eq!(*second.generator(), "generator");
/// ```
#[derive(Debug)]
pub struct Registry<G, O> {
    slots: Mutex<HashMap<ElementPath, Arc<Slot<G, O>>>>,
}

impl<G, O: Clone> Default for Registry<G, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G, O: Clone> Registry<G, O> {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the slot for `path`, creating it with `create` if absent.
    ///
    /// The lookup and insertion happen under one lock, so concurrent callers
    /// for the same identity always receive the same slot.
    pub fn get_or_create(&self, path: &ElementPath, create: impl FnOnce() -> G) -> Arc<Slot<G, O>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            slots
                .entry(path.clone())
                .or_insert_with(|| Arc::new(Slot::new(create()))),
        )
    }

    pub fn get(&self, path: &ElementPath) -> Option<Arc<Slot<G, O>>> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Declarations accepted for emission, one per identity.
#[derive(Debug, Default)]
pub struct EmissionLog {
    entries: IndexMap<ElementPath, TypeDeclaration>,
}

impl EmissionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `declaration` for `identity`.
    ///
    /// Returns `Ok(true)` when newly recorded and `Ok(false)` when the same
    /// declaration was already recorded.
    ///
    /// ## Errors
    ///
    /// Returns `DuplicateIdentity` when a different declaration is already
    /// recorded for `identity`.
    pub fn record(
        &mut self,
        identity: &ElementPath,
        declaration: &TypeDeclaration,
    ) -> Result<bool, GeneratorError> {
        match self.entries.get(identity) {
            Some(existing) if existing == declaration => Ok(false),
            Some(_) => Err(GeneratorError::DuplicateIdentity {
                path: identity.clone(),
            }),
            None => {
                self.entries.insert(identity.clone(), declaration.clone());
                Ok(true)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
