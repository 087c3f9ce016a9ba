//! Loading flags and the fetch-cycle fence.
//!
//! Cycles cannot be cancelled once in flight. Instead every cycle captures
//! a generation number when it starts; on completion the number is checked
//! against the latest issued, and a superseded cycle's results are dropped
//! so stale data is never presented as current. The home view is the one
//! exception: its flags always clear, so the default screen can never be
//! stuck on a spinner by a completion race.

/// UI-gating flags for one dashboard. `progress` is a coarse indicator
/// stepped at fixed points through a cycle, not a measure of work done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingFlags {
    pub is_initializing: bool,
    pub is_loading_entity: bool,
    pub is_tab_changing: bool,
    pub is_filter_counts_loading: bool,
    pub progress: u8,
}

impl Default for LoadingFlags {
    fn default() -> Self {
        Self {
            is_initializing: true,
            is_loading_entity: false,
            is_tab_changing: false,
            is_filter_counts_loading: false,
            progress: 0,
        }
    }
}

pub const PROGRESS_START: u8 = 10;
pub const PROGRESS_FETCHED: u8 = 40;
pub const PROGRESS_PARSED: u8 = 70;
pub const PROGRESS_DONE: u8 = 100;

impl LoadingFlags {
    pub fn begin_cycle(&mut self) {
        self.is_loading_entity = true;
        self.is_tab_changing = true;
        self.is_filter_counts_loading = true;
        self.progress = PROGRESS_START;
    }

    pub fn finish_initializing(&mut self) {
        self.is_initializing = false;
    }

    /// Clear everything a cycle set. Initialization state is separate and
    /// survives until startup finishes.
    pub fn clear_cycle(&mut self) {
        self.is_loading_entity = false;
        self.is_tab_changing = false;
        self.is_filter_counts_loading = false;
        self.progress = 0;
    }

    pub fn any_loading(&self) -> bool {
        self.is_initializing
            || self.is_loading_entity
            || self.is_tab_changing
            || self.is_filter_counts_loading
    }
}

/// Monotonic generation counter. One bump per fetch cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchFence {
    latest: u64,
}

impl FetchFence {
    /// Start a new cycle, superseding all in-flight ones.
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}

/// What a completing cycle is allowed to do with its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionAction {
    /// Still the latest cycle: apply results and clear flags.
    Apply,
    /// Superseded, but the latest intent is the home view: drop results
    /// and clear flags anyway.
    DropAndClear,
    /// Superseded: drop results and leave the flags to the newer cycle.
    Drop,
}

/// Decide what a cycle that fetched under `completed` may do now that the
/// fence stands at `latest`.
pub fn completion_action(completed: u64, latest: u64, latest_is_home: bool) -> CompletionAction {
    if completed == latest {
        CompletionAction::Apply
    } else if latest_is_home {
        CompletionAction::DropAndClear
    } else {
        CompletionAction::Drop
    }
}

/// Anti-flicker delay before clearing flags after a cycle settles. The
/// home view settles fast and gets a short delay; scoped views hold a
/// little longer to bridge follow-on state changes.
pub fn settle_delay_ms(is_home: bool) -> u32 {
    if is_home {
        300
    } else {
        1_000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fence_is_monotonic() {
        let mut fence = FetchFence::default();
        let first = fence.begin();
        let second = fence.begin();
        assert!(second > first);
        assert_eq!(fence.latest(), second);
    }

    #[test]
    fn test_current_cycle_applies() {
        let mut fence = FetchFence::default();
        let generation = fence.begin();
        assert_eq!(
            completion_action(generation, fence.latest(), false),
            CompletionAction::Apply
        );
    }

    #[test]
    fn test_superseded_cycle_is_dropped() {
        // a fetch for one entity is in flight when the user picks another
        let mut fence = FetchFence::default();
        let east = fence.begin();
        let west = fence.begin();

        assert_eq!(
            completion_action(east, fence.latest(), false),
            CompletionAction::Drop
        );
        // the newer cycle still applies its own outcome
        assert_eq!(
            completion_action(west, fence.latest(), false),
            CompletionAction::Apply
        );
    }

    #[test]
    fn test_home_intent_always_clears_flags() {
        let mut fence = FetchFence::default();
        let stale = fence.begin();
        fence.begin();
        assert_eq!(
            completion_action(stale, fence.latest(), true),
            CompletionAction::DropAndClear
        );
    }

    #[test]
    fn test_flag_lifecycle() {
        let mut flags = LoadingFlags::default();
        assert!(flags.is_initializing);
        assert!(flags.any_loading());

        flags.finish_initializing();
        assert!(!flags.any_loading());

        flags.begin_cycle();
        assert!(flags.is_loading_entity);
        assert!(flags.is_tab_changing);
        assert!(flags.is_filter_counts_loading);
        assert_eq!(flags.progress, PROGRESS_START);

        flags.clear_cycle();
        assert!(!flags.any_loading());
        assert_eq!(flags.progress, 0);
    }

    #[test]
    fn test_settle_delay_by_view() {
        assert_eq!(settle_delay_ms(true), 300);
        assert_eq!(settle_delay_ms(false), 1_000);
    }
}
