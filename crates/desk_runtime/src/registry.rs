//! Shared window registry over the durable key/value store.
//!
//! The registry is stateless between calls: every operation re-reads the
//! persisted containers, mutates, and writes back whole containers. That
//! keeps multiple surfaces (and multiple tabs) converging on the store as the
//! single source of truth, at the cost of last-write-wins races at container
//! granularity.

use std::rc::Rc;

use desk_contract::AppId;
use desk_host::{keys, load_typed_with, save_typed_with, KeyValueStore};
use thiserror::Error;

use crate::model::RegistrySnapshot;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failure while persisting a registry container.
pub enum RegistryError {
    /// The durable store rejected a write.
    #[error("failed to write {key}: {message}")]
    Write {
        /// Container that failed.
        key: String,
        /// Store-reported reason.
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What a launcher click on an application resolved to.
pub enum ToggleOutcome {
    /// The window is frontmost and should minimize. The registry is
    /// untouched; the commit happens after the window's minimize animation.
    MinimizeRequested,
    /// The window was minimized and is now restored to the front.
    Restored,
    /// The window was absent and is now open at the front.
    Opened,
}

#[derive(Clone)]
/// Handle to the persisted open stack and minimized set.
pub struct Registry {
    store: Rc<dyn KeyValueStore>,
}

impl Registry {
    /// Wraps a durable store.
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Reads both containers and normalizes them into a consistent view.
    ///
    /// Unknown names are skipped, duplicates keep their first occurrence,
    /// and an id present in both containers counts as open only.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let open_stack = dedupe(self.read_list(keys::OPEN_STACK));
        let minimized = dedupe(self.read_list(keys::MINIMIZED_SET))
            .into_iter()
            .filter(|id| !open_stack.contains(id))
            .collect();
        RegistrySnapshot {
            open_stack,
            minimized,
        }
    }

    /// Opens `id` at the front of the stack, restoring it from the minimized
    /// set if needed.
    ///
    /// Returns `Ok(false)` without writing when `id` is already frontmost
    /// and not minimized, so focus clicks on the active window stay cheap.
    pub fn open(&self, id: AppId) -> Result<bool, RegistryError> {
        let snapshot = self.snapshot();
        if snapshot.frontmost() == Some(id) && !snapshot.is_minimized(id) {
            return Ok(false);
        }

        let mut open_stack = vec![id];
        open_stack.extend(snapshot.open_stack.iter().copied().filter(|e| *e != id));
        self.write_list(keys::OPEN_STACK, &open_stack)?;

        if snapshot.is_minimized(id) {
            let minimized: Vec<AppId> = snapshot
                .minimized
                .iter()
                .copied()
                .filter(|e| *e != id)
                .collect();
            self.write_list(keys::MINIMIZED_SET, &minimized)?;
        }
        Ok(true)
    }

    /// Brings a minimized window back to the front. Restoring something
    /// that is not minimized behaves like [`Registry::open`].
    pub fn restore(&self, id: AppId) -> Result<bool, RegistryError> {
        self.open(id)
    }

    /// Removes `id` from both containers. Called after the closing
    /// animation finishes.
    pub fn close_committed(&self, id: AppId) -> Result<(), RegistryError> {
        let snapshot = self.snapshot();
        let open_stack: Vec<AppId> = snapshot
            .open_stack
            .iter()
            .copied()
            .filter(|e| *e != id)
            .collect();
        let minimized: Vec<AppId> = snapshot
            .minimized
            .iter()
            .copied()
            .filter(|e| *e != id)
            .collect();
        self.write_list(keys::OPEN_STACK, &open_stack)?;
        self.write_list(keys::MINIMIZED_SET, &minimized)
    }

    /// Moves `id` from the open stack to the front of the minimized set.
    /// Called after the minimize animation finishes.
    pub fn minimize_committed(&self, id: AppId) -> Result<(), RegistryError> {
        let snapshot = self.snapshot();
        let open_stack: Vec<AppId> = snapshot
            .open_stack
            .iter()
            .copied()
            .filter(|e| *e != id)
            .collect();
        let mut minimized = vec![id];
        minimized.extend(snapshot.minimized.iter().copied().filter(|e| *e != id));
        self.write_list(keys::OPEN_STACK, &open_stack)?;
        self.write_list(keys::MINIMIZED_SET, &minimized)
    }

    /// Resolves a launcher click.
    ///
    /// Frontmost asks for a minimize without mutating anything; minimized
    /// restores to the front; open but behind another window promotes to
    /// the front; absent opens fresh.
    pub fn toggle_from_launcher(&self, id: AppId) -> Result<ToggleOutcome, RegistryError> {
        let snapshot = self.snapshot();
        if snapshot.frontmost() == Some(id) {
            return Ok(ToggleOutcome::MinimizeRequested);
        }
        if snapshot.is_minimized(id) {
            self.restore(id)?;
            Ok(ToggleOutcome::Restored)
        } else {
            self.open(id)?;
            Ok(ToggleOutcome::Opened)
        }
    }

    fn read_list(&self, key: &str) -> Vec<AppId> {
        let names: Vec<String> = load_typed_with(self.store.as_ref(), key, Vec::new);
        names
            .iter()
            .filter_map(|name| AppId::from_name(name))
            .collect()
    }

    fn write_list(&self, key: &str, ids: &[AppId]) -> Result<(), RegistryError> {
        let names: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
        save_typed_with(self.store.as_ref(), key, &names).map_err(|message| {
            RegistryError::Write {
                key: key.to_owned(),
                message,
            }
        })
    }
}

fn dedupe(ids: Vec<AppId>) -> Vec<AppId> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use desk_host::MemoryStore;
    use pretty_assertions::assert_eq;

    use super::*;

    fn registry() -> (Registry, MemoryStore) {
        let store = MemoryStore::new();
        (Registry::new(Rc::new(store.clone())), store)
    }

    #[test]
    fn empty_store_yields_empty_snapshot() {
        let (registry, _store) = registry();
        assert_eq!(registry.snapshot(), RegistrySnapshot::default());
    }

    #[test]
    fn open_prepends_and_dedupes() {
        let (registry, _store) = registry();
        assert!(registry.open(AppId::Finder).expect("open"));
        assert!(registry.open(AppId::Safari).expect("open"));
        assert!(registry.open(AppId::Finder).expect("refocus"));

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.open_stack, vec![AppId::Finder, AppId::Safari]);
        assert_eq!(snapshot.rank_of(AppId::Safari), Some(1));
    }

    #[test]
    fn opening_the_frontmost_window_writes_nothing() {
        let (registry, store) = registry();
        registry.open(AppId::Gmail).expect("open");
        let before = store.load(keys::OPEN_STACK);

        assert!(!registry.open(AppId::Gmail).expect("noop"));
        assert_eq!(store.load(keys::OPEN_STACK), before);
    }

    #[test]
    fn minimize_then_restore_round_trips() {
        let (registry, _store) = registry();
        registry.open(AppId::Finder).expect("open");
        registry.open(AppId::Safari).expect("open");

        registry.minimize_committed(AppId::Safari).expect("minimize");
        let snapshot = registry.snapshot();
        assert_eq!(snapshot.open_stack, vec![AppId::Finder]);
        assert_eq!(snapshot.minimized, vec![AppId::Safari]);

        assert!(registry.restore(AppId::Safari).expect("restore"));
        let snapshot = registry.snapshot();
        assert_eq!(snapshot.open_stack, vec![AppId::Safari, AppId::Finder]);
        assert_eq!(snapshot.minimized, Vec::<AppId>::new());
    }

    #[test]
    fn minimized_set_is_front_biased() {
        let (registry, _store) = registry();
        registry.open(AppId::Finder).expect("open");
        registry.open(AppId::Safari).expect("open");
        registry.minimize_committed(AppId::Finder).expect("minimize");
        registry.minimize_committed(AppId::Safari).expect("minimize");

        assert_eq!(
            registry.snapshot().minimized,
            vec![AppId::Safari, AppId::Finder]
        );
    }

    #[test]
    fn close_removes_from_both_containers() {
        let (registry, _store) = registry();
        registry.open(AppId::Gmail).expect("open");
        registry.minimize_committed(AppId::Gmail).expect("minimize");

        registry.close_committed(AppId::Gmail).expect("close");
        assert_eq!(registry.snapshot(), RegistrySnapshot::default());
    }

    #[test]
    fn launcher_toggle_covers_all_three_outcomes() {
        let (registry, _store) = registry();

        assert_eq!(
            registry.toggle_from_launcher(AppId::GitHub).expect("toggle"),
            ToggleOutcome::Opened
        );
        registry.minimize_committed(AppId::GitHub).expect("minimize");
        assert_eq!(
            registry.toggle_from_launcher(AppId::GitHub).expect("toggle"),
            ToggleOutcome::Restored
        );
        assert_eq!(
            registry.toggle_from_launcher(AppId::GitHub).expect("toggle"),
            ToggleOutcome::MinimizeRequested
        );
        // The minimize request itself must not touch the containers.
        assert_eq!(registry.snapshot().open_stack, vec![AppId::GitHub]);
    }

    #[test]
    fn launcher_toggle_promotes_a_background_window() {
        let (registry, _store) = registry();
        registry.open(AppId::Finder).expect("open");
        registry.open(AppId::Safari).expect("open");

        // Finder is open but behind Safari; a launcher click brings it
        // forward instead of asking it to minimize.
        assert_eq!(
            registry.toggle_from_launcher(AppId::Finder).expect("toggle"),
            ToggleOutcome::Opened
        );
        assert_eq!(
            registry.snapshot().open_stack,
            vec![AppId::Finder, AppId::Safari]
        );
    }

    #[test]
    fn malformed_containers_read_as_empty() {
        let (registry, store) = registry();
        store.save(keys::OPEN_STACK, "{broken").expect("save");
        store.save(keys::MINIMIZED_SET, "42").expect("save");

        assert_eq!(registry.snapshot(), RegistrySnapshot::default());
    }

    #[test]
    fn unknown_and_duplicate_names_are_dropped_on_read() {
        let (registry, store) = registry();
        store
            .save(
                keys::OPEN_STACK,
                r#"["Finder","Paint","Safari","Finder"]"#,
            )
            .expect("save");

        assert_eq!(
            registry.snapshot().open_stack,
            vec![AppId::Finder, AppId::Safari]
        );
    }

    #[test]
    fn overlapping_containers_resolve_as_open() {
        let (registry, store) = registry();
        store.save(keys::OPEN_STACK, r#"["Gmail"]"#).expect("save");
        store
            .save(keys::MINIMIZED_SET, r#"["Gmail","Finder"]"#)
            .expect("save");

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.open_stack, vec![AppId::Gmail]);
        assert_eq!(snapshot.minimized, vec![AppId::Finder]);
    }

    #[test]
    fn concurrent_writers_race_at_container_granularity() {
        // Two handles over the same store, each re-reading before writing,
        // still clobber each other when the reads interleave. The container
        // is the unit of atomicity; this pins that limitation.
        let store = MemoryStore::new();
        let left = Registry::new(Rc::new(store.clone()));
        let right = Registry::new(Rc::new(store.clone()));

        left.open(AppId::Finder).expect("open");
        // `right` reads the stack as ["Finder"], then `left` opens Safari,
        // then `right` writes its stale view back.
        let stale = right.snapshot();
        left.open(AppId::Safari).expect("open");
        store
            .save(
                keys::OPEN_STACK,
                &serde_json::to_string(
                    &stale
                        .open_stack
                        .iter()
                        .map(|id| id.as_str())
                        .collect::<Vec<_>>(),
                )
                .expect("encode"),
            )
            .expect("save");

        // Safari's open is lost; both handles converge on the last write.
        assert_eq!(left.snapshot().open_stack, vec![AppId::Finder]);
        assert_eq!(right.snapshot().open_stack, vec![AppId::Finder]);
    }
}
