//! In-Memory-Szene für Tests und Headless-Betrieb.

use std::collections::HashMap;

use super::{EntityId, InputKind, ListenerHandle, SceneEngine, SceneEntity};
use crate::core::SimTime;

/// Szenen-Engine ohne Rendering: verwaltet Entities, Abonnements und
/// eine stellbare Uhr.
#[derive(Debug, Default)]
pub struct MemoryScene {
    entities: HashMap<EntityId, SceneEntity>,
    subscriptions: HashMap<ListenerHandle, InputKind>,
    next_entity: EntityId,
    next_listener: u64,
    clock: SimTime,
}

impl MemoryScene {
    /// Erstellt eine leere Szene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stellt die Szenen-Uhr.
    pub fn set_clock(&mut self, time: SimTime) {
        self.clock = time;
    }

    /// Anzahl lebender Entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Liefert eine Entity (read-only).
    pub fn entity(&self, id: EntityId) -> Option<&SceneEntity> {
        self.entities.get(&id)
    }

    /// Anzahl aktiver Eingabe-Abonnements.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

impl SceneEngine for MemoryScene {
    fn create_entity(&mut self, entity: SceneEntity) -> EntityId {
        self.next_entity += 1;
        let id = self.next_entity;
        self.entities.insert(id, entity);
        id
    }

    fn update_entity(&mut self, id: EntityId, entity: SceneEntity) -> bool {
        match self.entities.get_mut(&id) {
            Some(slot) => {
                *slot = entity;
                true
            }
            None => false,
        }
    }

    fn remove_entity(&mut self, id: EntityId) -> bool {
        self.entities.remove(&id).is_some()
    }

    fn subscribe(&mut self, kind: InputKind) -> ListenerHandle {
        self.next_listener += 1;
        let handle = ListenerHandle(self.next_listener);
        self.subscriptions.insert(handle, kind);
        handle
    }

    fn unsubscribe(&mut self, handle: ListenerHandle) -> bool {
        self.subscriptions.remove(&handle).is_some()
    }

    fn clock(&self) -> SimTime {
        self.clock
    }
}
