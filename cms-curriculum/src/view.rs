//! Progressive-disclosure view state for one curriculum widget instance.
//!
//! Each widget owns its own [`CurriculumView`]; there is no shared cache, so
//! multiple widgets on one page can never corrupt each other. Fetches are
//! guarded by a monotonic request token: the view reflects the response to
//! the newest request, and a response (or error) for a superseded request is
//! dropped instead of overwriting fresher data.

use crate::client::{CurriculumClient, FetchError};
use crate::model::{Curriculum, Section};

/// Number of sections shown when collapsed (the collapse policy shows all
/// sections when there are fewer).
pub const COLLAPSED_SECTIONS: usize = 2;

/// Where the view is in its fetch lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum Phase {
    /// No fetch has been started yet.
    #[default]
    Idle,
    /// A fetch is in flight; nothing is shown, not even stale data.
    Loading,
    /// The last fetch resolved; `visible_sections` reflects the policy.
    Ready,
    /// The last fetch failed; the message is displayable and the retry
    /// affordance is another `begin_fetch`.
    Failed(String),
}

/// Identifies one fetch request. Only the newest token can resolve the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// State machine behind the curriculum widget.
#[derive(Debug, Default)]
pub struct CurriculumView {
    phase: Phase,
    full: Curriculum,
    expanded: bool,
    seq: u64,
}

impl CurriculumView {
    /// A fresh, idle view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch: enter `Loading`, clear any previously shown sections,
    /// and mint the token the eventual response must present.
    ///
    /// Calling this again before the previous fetch resolves supersedes it;
    /// the old token goes stale and its response will be dropped.
    pub fn begin_fetch(&mut self) -> RequestToken {
        self.seq += 1;
        self.phase = Phase::Loading;
        self.full.clear();
        self.expanded = false;
        RequestToken(self.seq)
    }

    /// Deliver a fetch outcome. Returns `false` when the token is stale and
    /// the outcome was dropped.
    ///
    /// A current-token success stores the curriculum and reapplies the
    /// collapse policy; a current-token failure enters `Failed` with a
    /// displayable message.
    pub fn resolve(
        &mut self,
        token: RequestToken,
        outcome: Result<Curriculum, FetchError>,
    ) -> bool {
        if token.0 != self.seq {
            tracing::debug!(stale = token.0, current = self.seq, "dropping stale response");
            return false;
        }
        match outcome {
            Ok(curriculum) => {
                self.full = curriculum;
                self.expanded = false;
                self.phase = Phase::Ready;
            }
            Err(e) => {
                self.phase = Phase::Failed(e.to_string());
            }
        }
        true
    }

    /// Reveal every fetched section. No effect unless `Ready`.
    pub fn expand(&mut self) {
        if self.phase == Phase::Ready {
            self.expanded = true;
        }
    }

    /// Reapply the collapse policy.
    pub fn collapse(&mut self) {
        self.expanded = false;
    }

    /// The sections the widget should render right now.
    ///
    /// Empty unless `Ready`. Collapsed: all sections when there are fewer
    /// than [`COLLAPSED_SECTIONS`], otherwise the first two.
    #[must_use]
    pub fn visible_sections(&self) -> &[Section] {
        if self.phase != Phase::Ready {
            return &[];
        }
        if self.expanded {
            return &self.full;
        }
        let shown = self.full.len().min(COLLAPSED_SECTIONS);
        &self.full[..shown]
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Total number of fetched sections, independent of the collapse policy.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.full.len()
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Whether the full section list is revealed.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// The failure message, when the last fetch failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Fetch through a [`CurriculumClient`] and resolve in one step.
    ///
    /// Returns `false` when the response was stale (a newer `begin_fetch`
    /// happened while this one was in flight).
    pub async fn refresh(&mut self, client: &CurriculumClient, slug: &str) -> bool {
        let token = self.begin_fetch();
        let outcome = client.fetch(slug).await;
        self.resolve(token, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Lecture;

    fn section(id: u64, name: &str) -> Section {
        Section {
            id,
            name: name.to_owned(),
            lectures: vec![Lecture {
                id: id * 10,
                name: format!("{name} lecture"),
            }],
        }
    }

    fn curriculum(n: u64) -> Curriculum {
        (1..=n)
            .map(|i| section(i, &format!("Section {i}")))
            .collect()
    }

    #[test]
    fn test_new_view_is_idle_and_empty() {
        let view = CurriculumView::new();
        assert_eq!(*view.phase(), Phase::Idle);
        assert!(view.visible_sections().is_empty());
        assert!(!view.is_loading());
    }

    #[test]
    fn test_zero_sections_renders_nothing_and_is_not_loading() {
        let mut view = CurriculumView::new();
        let token = view.begin_fetch();
        assert!(view.is_loading());
        assert!(view.resolve(token, Ok(curriculum(0))));
        assert!(!view.is_loading());
        assert_eq!(*view.phase(), Phase::Ready);
        assert!(view.visible_sections().is_empty());
    }

    #[test]
    fn test_single_section_shown_collapsed_and_expanded() {
        let mut view = CurriculumView::new();
        let token = view.begin_fetch();
        view.resolve(token, Ok(curriculum(1)));

        assert_eq!(view.visible_sections().len(), 1);
        view.expand();
        assert_eq!(view.visible_sections().len(), 1);
        view.collapse();
        assert_eq!(view.visible_sections().len(), 1);
    }

    #[test]
    fn test_three_sections_collapse_policy_and_toggle() {
        let mut view = CurriculumView::new();
        let token = view.begin_fetch();
        view.resolve(token, Ok(curriculum(3)));

        let collapsed: Vec<u64> = view.visible_sections().iter().map(|s| s.id).collect();
        assert_eq!(collapsed, [1, 2]);
        assert!(!view.is_expanded());

        view.expand();
        assert!(view.is_expanded());
        assert_eq!(view.visible_sections().len(), 3);

        view.collapse();
        let re_collapsed: Vec<u64> = view.visible_sections().iter().map(|s| s.id).collect();
        assert_eq!(re_collapsed, [1, 2]);
    }

    #[test]
    fn test_loading_hides_previous_sections() {
        let mut view = CurriculumView::new();
        let token = view.begin_fetch();
        view.resolve(token, Ok(curriculum(3)));
        assert_eq!(view.visible_sections().len(), 2);

        view.begin_fetch();
        assert!(view.is_loading());
        assert!(view.visible_sections().is_empty());
    }

    #[test]
    fn test_stale_response_dropped_newest_request_wins() {
        // Course slug changes while the first fetch is in flight; the first
        // response arrives last but must not overwrite the newer one.
        let mut view = CurriculumView::new();
        let first = view.begin_fetch();
        let second = view.begin_fetch();

        assert!(view.resolve(second, Ok(curriculum(1))));
        assert_eq!(view.visible_sections().len(), 1);

        assert!(!view.resolve(first, Ok(curriculum(3))));
        assert_eq!(*view.phase(), Phase::Ready);
        assert_eq!(view.visible_sections().len(), 1, "stale response applied");
    }

    #[test]
    fn test_stale_error_does_not_clobber_fresh_data() {
        let mut view = CurriculumView::new();
        let first = view.begin_fetch();
        let second = view.begin_fetch();

        view.resolve(second, Ok(curriculum(2)));
        assert!(!view.resolve(first, Err(FetchError::Status(500))));
        assert_eq!(*view.phase(), Phase::Ready);
        assert!(view.error().is_none());
    }

    #[test]
    fn test_failed_fetch_is_distinct_from_empty_and_loading() {
        let mut view = CurriculumView::new();
        let token = view.begin_fetch();
        assert!(view.resolve(token, Err(FetchError::Status(502))));

        assert!(!view.is_loading());
        assert!(view.visible_sections().is_empty());
        assert_eq!(
            view.error(),
            Some("curriculum endpoint returned status 502")
        );

        // Retry affordance: a new fetch leaves the failed state.
        view.begin_fetch();
        assert!(view.is_loading());
        assert!(view.error().is_none());
    }

    #[test]
    fn test_expand_ignored_while_loading_or_failed() {
        let mut view = CurriculumView::new();
        view.begin_fetch();
        view.expand();
        assert!(!view.is_expanded());

        let token = view.begin_fetch();
        view.resolve(token, Err(FetchError::Status(404)));
        view.expand();
        assert!(!view.is_expanded());
    }

    #[test]
    fn test_response_resets_to_collapsed() {
        let mut view = CurriculumView::new();
        let token = view.begin_fetch();
        view.resolve(token, Ok(curriculum(3)));
        view.expand();

        let token = view.begin_fetch();
        view.resolve(token, Ok(curriculum(3)));
        assert!(!view.is_expanded());
        assert_eq!(view.visible_sections().len(), 2);
    }
}
