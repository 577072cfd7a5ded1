use crate::detail::DetailState;
use crate::listing::ListingState;
use crate::submission::SubmissionState;
use crate::view_model::{AppViewModel, HomeView, PageView};
use crate::{Effect, Route};

/// Identifies one mounting of a page. Every request carries the id of the
/// mount that issued it; responses for any other mount are dropped.
pub type MountId = u64;

/// Back-navigation depth; the oldest entries are dropped beyond this.
pub const MAX_HISTORY: usize = 50;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    route: Route,
    history: Vec<Route>,
    mounted: bool,
    next_mount: MountId,
    dark_mode: bool,
    submission: Option<SubmissionState>,
    listing: Option<ListingState>,
    detail: Option<DetailState>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dark_mode(mut self, dark_mode: bool) -> Self {
        self.dark_mode = dark_mode;
        self
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    pub fn submission(&self) -> Option<&SubmissionState> {
        self.submission.as_ref()
    }

    pub fn listing(&self) -> Option<&ListingState> {
        self.listing.as_ref()
    }

    pub fn detail(&self) -> Option<&DetailState> {
        self.detail.as_ref()
    }

    pub fn view(&self) -> AppViewModel {
        let page = match (&self.route, &self.submission, &self.listing, &self.detail) {
            (Route::Home, Some(submission), Some(listing), _) => PageView::Home(HomeView {
                submission: submission.view(),
                listing: listing.view(),
            }),
            (Route::Job(_), _, _, Some(detail)) => PageView::Detail(detail.view()),
            _ => PageView::Blank,
        };
        AppViewModel {
            dark_mode: self.dark_mode,
            page,
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn submission_mut(&mut self) -> Option<&mut SubmissionState> {
        self.submission.as_mut()
    }

    pub(crate) fn listing_mut(&mut self) -> Option<&mut ListingState> {
        self.listing.as_mut()
    }

    pub(crate) fn detail_mut(&mut self) -> Option<&mut DetailState> {
        self.detail.as_mut()
    }

    pub(crate) fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
        self.mark_dirty();
    }

    pub(crate) fn start(&mut self) -> Vec<Effect> {
        if self.mounted {
            return Vec::new();
        }
        self.mount_current()
    }

    pub(crate) fn navigate(&mut self, route: Route) -> Vec<Effect> {
        if route == self.route && self.mounted {
            return Vec::new();
        }
        let previous = std::mem::replace(&mut self.route, route);
        if self.history.len() == MAX_HISTORY {
            self.history.remove(0);
        }
        self.history.push(previous.clone());
        self.transition(previous)
    }

    pub(crate) fn navigate_back(&mut self) -> Vec<Effect> {
        let target = self.history.pop().unwrap_or_default();
        if target == self.route && self.mounted {
            return Vec::new();
        }
        let previous = std::mem::replace(&mut self.route, target);
        self.transition(previous)
    }

    fn transition(&mut self, previous: Route) -> Vec<Effect> {
        if !self.mounted {
            return self.mount_current();
        }
        // Same page, different id: the detail page stays mounted and refetches.
        if let (Route::Job(_), Route::Job(next_id)) = (&previous, &self.route) {
            let next_id = next_id.clone();
            let mount = self.allocate_mount();
            if let Some(detail) = self.detail.as_mut() {
                let effect = detail.retarget(mount, next_id);
                self.mark_dirty();
                return vec![effect];
            }
        }
        let mut effects = self.unmount();
        effects.extend(self.mount_current());
        effects
    }

    fn allocate_mount(&mut self) -> MountId {
        self.next_mount += 1;
        self.next_mount
    }

    fn mount_current(&mut self) -> Vec<Effect> {
        let mount = self.allocate_mount();
        self.mounted = true;
        self.mark_dirty();
        match self.route.clone() {
            Route::Home => {
                self.submission = Some(SubmissionState::new(mount));
                let mut listing = ListingState::new(mount);
                let fetch = listing.begin_fetch();
                self.listing = Some(listing);
                vec![
                    fetch,
                    Effect::OpenLiveFeed { mount },
                    Effect::SubscribeJobSubmitted { mount },
                ]
            }
            Route::Job(job_id) => {
                let (detail, fetch) = DetailState::open(mount, job_id);
                self.detail = Some(detail);
                vec![fetch]
            }
        }
    }

    /// Tears down whatever page is up. The listing's connection and
    /// subscription are released no matter what state they are in.
    fn unmount(&mut self) -> Vec<Effect> {
        self.mounted = false;
        self.submission = None;
        self.detail = None;
        match self.listing.take() {
            Some(listing) => {
                let mount = listing.mount();
                vec![
                    Effect::CloseLiveFeed { mount },
                    Effect::UnsubscribeJobSubmitted { mount },
                ]
            }
            None => Vec::new(),
        }
    }
}
