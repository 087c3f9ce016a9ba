//! Filter state, reducer actions and view-intent derivation.
//!
//! All user-controlled dashboard state lives in one [`FilterState`] value
//! mutated exclusively through [`FilterAction`]s. [`derive_intent`] projects
//! that state into an immutable [`ViewIntent`] snapshot, which is the only
//! input the fetch pipeline reacts to.

use std::collections::HashMap;

use contracts::inventory::summary::TabKind;

/// Rows per inventory page. The API is paged with limit/offset.
pub const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn wire(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    /// Column key as the API expects it, e.g. "partNumber".
    pub key: String,
    pub direction: SortDirection,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self {
            key: "partNumber".to_string(),
            direction: SortDirection::Ascending,
        }
    }
}

/// Multi-entity/branch selection, distinct from the single entity/branch
/// dropdowns. `selected_branches` is keyed by entity; it is ignored when
/// `show_all_branches` is set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdvancedFilter {
    pub selected_entities: Vec<String>,
    pub selected_branches: HashMap<String, Vec<String>>,
    pub show_all_branches: bool,
}

impl AdvancedFilter {
    /// An advanced filter with no entities selects nothing and is treated
    /// as "not active".
    pub fn is_empty(&self) -> bool {
        self.selected_entities.is_empty()
    }

    /// Branches to scope to, flattened in entity order. Empty when
    /// `show_all_branches` is set or nothing is picked.
    pub fn effective_branches(&self) -> Vec<String> {
        if self.show_all_branches {
            return Vec::new();
        }
        let mut out = Vec::new();
        for entity in &self.selected_entities {
            if let Some(branches) = self.selected_branches.get(entity) {
                for branch in branches {
                    if !out.contains(branch) {
                        out.push(branch.clone());
                    }
                }
            }
        }
        out
    }
}

/// The full user-controlled filter state. `page` is 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub entity: Option<String>,
    pub branch: Option<String>,
    pub advanced: Option<AdvancedFilter>,
    pub active_tab: TabKind,
    pub search_query: String,
    pub sort: SortOrder,
    pub page: usize,
    pub network_status: Option<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            entity: None,
            branch: None,
            advanced: None,
            active_tab: TabKind::Overview,
            search_query: String::new(),
            sort: SortOrder::default(),
            page: 1,
            network_status: None,
        }
    }
}

/// Every way the user can change what they are looking at.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterAction {
    SetEntity(Option<String>),
    SetBranch(Option<String>),
    ApplyAdvanced(AdvancedFilter),
    ClearAdvanced,
    SetTab(TabKind),
    SubmitSearch(String),
    ToggleSort(String),
    SetNetworkStatus(Option<String>),
    SetPage(usize),
    ClearAll,
}

/// Pure reducer over [`FilterState`].
///
/// Scope changes are mutually exclusive: picking an entity drops any
/// advanced filter, applying an advanced filter drops entity and branch.
/// Anything that changes what rows qualify resets to page 1.
pub fn apply_action(state: &FilterState, action: FilterAction) -> FilterState {
    let mut next = state.clone();
    match action {
        FilterAction::SetEntity(entity) => {
            next.entity = entity;
            next.branch = None;
            next.advanced = None;
            next.search_query = String::new();
            next.page = 1;
        }
        FilterAction::SetBranch(branch) => {
            // A branch without an entity is meaningless.
            if next.entity.is_some() {
                next.branch = branch;
                next.search_query = String::new();
                next.page = 1;
            }
        }
        FilterAction::ApplyAdvanced(filter) => {
            if filter.is_empty() {
                next.advanced = None;
            } else {
                next.advanced = Some(filter);
                next.entity = None;
                next.branch = None;
            }
            next.page = 1;
        }
        FilterAction::ClearAdvanced => {
            next.advanced = None;
            next.page = 1;
        }
        FilterAction::SetTab(tab) => {
            next.active_tab = tab;
            next.page = 1;
        }
        FilterAction::SubmitSearch(query) => {
            next.search_query = query.trim().to_string();
            next.page = 1;
        }
        FilterAction::ToggleSort(key) => {
            if next.sort.key == key {
                next.sort.direction = next.sort.direction.toggled();
            } else {
                next.sort = SortOrder {
                    key,
                    direction: SortDirection::Ascending,
                };
            }
            next.page = 1;
        }
        FilterAction::SetNetworkStatus(status) => {
            next.network_status = status.filter(|s| !s.is_empty());
            next.page = 1;
        }
        FilterAction::SetPage(page) => {
            next.page = page.max(1);
        }
        FilterAction::ClearAll => {
            next = FilterState::default();
        }
    }
    next
}

/// Immutable snapshot of what the user wants to see. One fetch cycle is
/// issued per distinct intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewIntent {
    pub entity: Option<String>,
    pub branch: Option<String>,
    pub advanced: Option<AdvancedFilter>,
    pub tab: TabKind,
    pub search: String,
    pub sort: SortOrder,
    pub page: usize,
    pub network_status: Option<String>,
}

impl ViewIntent {
    /// The default "all branches, all entities" view.
    pub fn is_home(&self) -> bool {
        self.entity.is_none() && self.advanced.is_none()
    }

    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1) * PAGE_SIZE
    }

    pub fn strategy(&self) -> FetchStrategy<'_> {
        if let Some(adv) = &self.advanced {
            FetchStrategy::Advanced(adv)
        } else if let Some(entity) = &self.entity {
            FetchStrategy::Entity {
                entity,
                branch: self.branch.as_deref(),
            }
        } else {
            FetchStrategy::AllBranches
        }
    }
}

/// Which endpoint family a fetch cycle hits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStrategy<'a> {
    AllBranches,
    Entity {
        entity: &'a str,
        branch: Option<&'a str>,
    },
    Advanced(&'a AdvancedFilter),
}

/// Project filter state into a view intent. Pure and deterministic.
///
/// Enforces the scope invariant even if the state was built by hand:
/// a branch without an entity is dropped, as is an empty advanced filter.
pub fn derive_intent(state: &FilterState) -> ViewIntent {
    let entity = state.entity.clone().filter(|e| !e.is_empty());
    let branch = if entity.is_some() {
        state.branch.clone().filter(|b| !b.is_empty())
    } else {
        None
    };
    let advanced = state.advanced.clone().filter(|f| !f.is_empty());

    ViewIntent {
        branch: if advanced.is_some() { None } else { branch },
        entity: if advanced.is_some() { None } else { entity },
        advanced,
        tab: state.active_tab,
        search: state.search_query.trim().to_string(),
        sort: state.sort.clone(),
        page: state.page.max(1),
        network_status: state.network_status.clone(),
    }
}
