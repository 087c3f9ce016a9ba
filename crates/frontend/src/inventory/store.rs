//! Dashboard store: one state container, one reactive pipeline.
//!
//! Filter state changes only through [`dispatch`](DashboardStore::dispatch).
//! A memo derives the [`ViewIntent`] from it, and exactly one effect reacts
//! to intent changes by running a fetch cycle. Cycle completions go through
//! the fence before touching any rendered state.

use std::collections::HashMap;

use leptos::prelude::*;
use leptos::task::spawn_local;

use contracts::inventory::catalog::PartBranchMap;

use gloo_timers::future::TimeoutFuture;

use super::api;
use super::fetch;
use super::intent::{
    apply_action, derive_intent, FilterAction, FilterState, ViewIntent, PAGE_SIZE,
};
use super::loading::{
    completion_action, settle_delay_ms, CompletionAction, FetchFence, LoadingFlags, PROGRESS_DONE,
};
use super::reconcile::ViewModel;

#[derive(Clone, Copy)]
pub struct DashboardStore {
    filters: RwSignal<FilterState>,
    pub intent: Memo<ViewIntent>,

    pub entities: RwSignal<Vec<String>>,
    pub entity_branches: RwSignal<HashMap<String, Vec<String>>>,
    part_branch_map: RwSignal<PartBranchMap>,

    pub view: RwSignal<ViewModel>,
    pub loading: RwSignal<LoadingFlags>,
    pub error: RwSignal<Option<String>>,

    fence: StoredValue<FetchFence>,
    bootstrapped: RwSignal<bool>,
}

impl DashboardStore {
    pub fn new() -> Self {
        let filters = RwSignal::new(FilterState::default());
        let intent = Memo::new(move |_| derive_intent(&filters.get()));
        Self {
            filters,
            intent,
            entities: RwSignal::new(Vec::new()),
            entity_branches: RwSignal::new(HashMap::new()),
            part_branch_map: RwSignal::new(PartBranchMap::new()),
            view: RwSignal::new(ViewModel::default()),
            loading: RwSignal::new(LoadingFlags::default()),
            error: RwSignal::new(None),
            fence: StoredValue::new(FetchFence::default()),
            bootstrapped: RwSignal::new(false),
        }
    }

    pub fn filters(&self) -> ReadSignal<FilterState> {
        self.filters.read_only()
    }

    /// Apply one user action to the filter state. The intent memo and the
    /// pipeline effect take it from there.
    pub fn dispatch(&self, action: FilterAction) {
        log::debug!("Filter action: {:?}", action);
        self.filters.update(|state| *state = apply_action(state, action));
    }

    pub fn dismiss_error(&self) {
        self.error.set(None);
    }

    pub fn total_pages(&self) -> usize {
        pages_for(self.view.with(|v| v.total_inventory_count))
    }

    /// Branches for the currently selected entity, for the branch dropdown.
    pub fn branches_for_selected(&self) -> Vec<String> {
        let entity = self.filters.with(|f| f.entity.clone());
        match entity {
            Some(entity) => self
                .entity_branches
                .with(|map| map.get(&entity).cloned().unwrap_or_default()),
            None => Vec::new(),
        }
    }

    /// Load the entity catalog, then the part-branch map. The catalog
    /// gates the first fetch cycle; the map does not, since enrichment
    /// falls back to page-local detection until it arrives.
    pub fn init(&self) {
        let store = *self;
        spawn_local(async move {
            match api::fetch_entity_catalog().await {
                Ok(catalog) => {
                    log::info!(
                        "Loaded {} entities across {} branch lists",
                        catalog.entities.len(),
                        catalog.entity_branches.len()
                    );
                    store.entities.set(catalog.entities);
                    store.entity_branches.set(catalog.entity_branches);
                }
                Err(e) => {
                    log::error!("Entity catalog load failed: {}", e);
                    store.error.set(Some(format!("Failed to load entities: {}", e)));
                }
            }
            store.loading.update(|l| l.finish_initializing());
            store.bootstrapped.set(true);

            match api::fetch_part_branch_map().await {
                Ok(map) => {
                    log::info!("Loaded part-branch map with {} parts", map.len());
                    store.part_branch_map.set(map);
                }
                Err(e) => {
                    log::warn!("Part-branch map load failed, enrichment degraded: {}", e);
                }
            }
        });
    }

    /// Install the one effect that reacts to intent changes.
    pub fn start_pipeline(&self) {
        let store = *self;
        Effect::new(move |_| {
            let intent = store.intent.get();
            if !store.bootstrapped.get() {
                return;
            }
            store.run_cycle(intent);
        });
    }

    fn run_cycle(&self, intent: ViewIntent) {
        let store = *self;
        let mut generation = 0;
        self.fence.update_value(|f| generation = f.begin());
        self.loading.update(|l| l.begin_cycle());
        self.error.set(None);
        log::debug!("Cycle {} starts: {:?}", generation, intent);

        spawn_local(async move {
            let prior_entity_count = store.entities.with_untracked(|e| e.len() as i64);
            let map = store.part_branch_map.get_untracked();
            let outcome = fetch::run_cycle(&intent, prior_entity_count, &map, |step| {
                if store.fence.with_value(|f| f.latest()) == generation {
                    store.loading.update(|l| l.progress = step);
                }
            })
            .await;
            store.complete_cycle(generation, intent, outcome).await;
        });
    }

    async fn complete_cycle(
        self,
        generation: u64,
        intent: ViewIntent,
        outcome: Result<ViewModel, String>,
    ) {
        let latest = self.fence.with_value(|f| f.latest());
        let latest_is_home = self.intent.get_untracked().is_home();

        match completion_action(generation, latest, latest_is_home) {
            CompletionAction::Apply => {
                match outcome {
                    Ok(view) => {
                        log::debug!(
                            "Cycle {} applied: {} rows, total {}",
                            generation,
                            view.items.len(),
                            view.total_inventory_count
                        );
                        self.view.set(view);
                        self.loading.update(|l| l.progress = PROGRESS_DONE);
                    }
                    Err(message) => {
                        self.view.set(ViewModel::empty());
                        self.error.set(Some(message));
                    }
                }
                TimeoutFuture::new(settle_delay_ms(intent.is_home())).await;
                if self.fence.with_value(|f| f.latest()) == generation {
                    self.loading.update(|l| l.clear_cycle());
                }
            }
            CompletionAction::DropAndClear => {
                log::warn!(
                    "Cycle {} superseded by {}; dropping results, clearing flags for home view",
                    generation,
                    latest
                );
                self.loading.update(|l| l.clear_cycle());
            }
            CompletionAction::Drop => {
                log::warn!(
                    "Cycle {} superseded by {}; dropping results",
                    generation,
                    latest
                );
            }
        }
    }
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

fn pages_for(total_count: i64) -> usize {
    let total = total_count.max(0) as usize;
    total.div_ceil(PAGE_SIZE).max(1)
}

pub fn provide_dashboard_store() -> DashboardStore {
    let store = DashboardStore::new();
    provide_context(store);
    store
}

pub fn use_dashboard() -> DashboardStore {
    use_context::<DashboardStore>().expect("DashboardStore should be provided at the app root")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_for_rounds_up() {
        assert_eq!(pages_for(0), 1);
        assert_eq!(pages_for(1), 1);
        assert_eq!(pages_for(20), 1);
        assert_eq!(pages_for(21), 2);
        assert_eq!(pages_for(400), 20);
        assert_eq!(pages_for(-5), 1);
    }
}
