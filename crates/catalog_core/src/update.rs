use crate::{AppState, Effect, LoadStatus, Msg, StatusClassifier};

/// Pure update function: applies a message to state and returns any effects.
pub fn update<C: StatusClassifier>(
    mut state: AppState<C>,
    msg: Msg,
) -> (AppState<C>, Vec<Effect>) {
    let effects = match msg {
        Msg::SessionStarted => {
            if *state.load_status() == LoadStatus::Idle {
                let request = state.begin_collection_fetch();
                vec![Effect::FetchCollection { request }]
            } else {
                Vec::new()
            }
        }
        Msg::ReloadRequested => {
            state.reset_session();
            let request = state.begin_collection_fetch();
            vec![Effect::FetchCollection { request }]
        }
        Msg::CollectionLoaded { request, result } => {
            state.apply_collection(request, result);
            Vec::new()
        }
        Msg::SearchChanged(term) => {
            state.set_search_term(term);
            Vec::new()
        }
        Msg::StatusFilterChanged(status) => {
            state.set_status_filter(status);
            Vec::new()
        }
        Msg::FiltersCleared => {
            state.clear_filters();
            Vec::new()
        }
        Msg::PageRequested(page) => navigate(&mut state, page),
        Msg::NextPage => {
            let page = state.current_page().saturating_add(1);
            navigate(&mut state, page)
        }
        Msg::PrevPage => {
            // Page 1 maps to 0, which navigation rejects.
            let page = state.current_page().saturating_sub(1);
            navigate(&mut state, page)
        }
        Msg::DetailRequested(id) => {
            let request = state.begin_detail(id.clone());
            vec![Effect::FetchDetail { request, id }]
        }
        Msg::DetailLoaded { request, result } => {
            state.apply_detail(request, result);
            Vec::new()
        }
        Msg::BackToCatalog => {
            state.close_detail();
            // Arriving at the catalog through a detail link still needs the
            // collection.
            if *state.load_status() == LoadStatus::Idle {
                let request = state.begin_collection_fetch();
                vec![Effect::FetchCollection { request }]
            } else {
                Vec::new()
            }
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn navigate<C: StatusClassifier>(state: &mut AppState<C>, page: usize) -> Vec<Effect> {
    if state.navigate(page) {
        vec![Effect::ScrollToTop]
    } else {
        Vec::new()
    }
}
