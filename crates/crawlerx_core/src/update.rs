use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => state.start(),
        Msg::Navigate(route) => state.navigate(route),
        Msg::NavigateBack => state.navigate_back(),
        Msg::ThemeToggled => {
            state.toggle_theme();
            Vec::new()
        }
        Msg::UrlInputChanged(text) => {
            let changed = state
                .submission_mut()
                .is_some_and(|submission| submission.set_input(text));
            if changed {
                state.mark_dirty();
            }
            Vec::new()
        }
        // Enter in the input box behaves exactly like the button.
        Msg::SubmitClicked | Msg::UrlInputEnter => {
            match state.submission_mut().and_then(|submission| submission.submit()) {
                Some(effect) => {
                    state.mark_dirty();
                    vec![effect]
                }
                None => Vec::new(),
            }
        }
        Msg::JobCreated { mount, result } => {
            // The job exists server-side even if the form has gone away.
            let effects = match &result {
                Ok(job) => vec![Effect::PublishJobSubmitted { job: job.clone() }],
                Err(_) => Vec::new(),
            };
            if let Some(submission) = state
                .submission_mut()
                .filter(|submission| submission.mount() == mount)
            {
                submission.finish(&result);
                state.mark_dirty();
            }
            effects
        }
        Msg::SearchChanged(query) => {
            let changed = state
                .listing_mut()
                .is_some_and(|listing| listing.set_query(query));
            if changed {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::StatusFilterChanged(filter) => {
            let changed = state
                .listing_mut()
                .is_some_and(|listing| listing.set_status_filter(filter));
            if changed {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ClearFilters => {
            let changed = state
                .listing_mut()
                .is_some_and(|listing| listing.clear_filters());
            if changed {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::RefreshClicked => match state.listing_mut() {
            Some(listing) => {
                let effect = listing.begin_fetch();
                state.mark_dirty();
                vec![effect]
            }
            None => Vec::new(),
        },
        Msg::JobsFetched { mount, result } => {
            if let Some(listing) = current_listing(&mut state, mount) {
                listing.apply_fetched(result);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::LiveFeed { mount, event } => match current_listing(&mut state, mount) {
            Some(listing) => {
                let (effects, changed) = listing.apply_live(event);
                if changed {
                    state.mark_dirty();
                }
                effects
            }
            None => Vec::new(),
        },
        Msg::JobSubmittedNotice { mount, job: _ } => match current_listing(&mut state, mount) {
            Some(listing) => {
                let effect = listing.begin_fetch();
                state.mark_dirty();
                vec![effect]
            }
            None => Vec::new(),
        },
        Msg::JobFetched {
            mount,
            job_id,
            result,
        } => {
            let applied = state
                .detail_mut()
                .is_some_and(|detail| detail.apply_fetched(mount, &job_id, result));
            if applied {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::TabSelected(tab) => {
            let changed = state
                .detail_mut()
                .is_some_and(|detail| detail.select_tab(tab));
            if changed {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ExportRequested { job_id, format } => vec![Effect::OpenExport { job_id, format }],
        Msg::OpenUrl(url) => vec![Effect::OpenUrl { url }],
    };

    (state, effects)
}

fn current_listing(state: &mut AppState, mount: crate::MountId) -> Option<&mut crate::ListingState> {
    state
        .listing_mut()
        .filter(|listing| listing.mount() == mount)
}
