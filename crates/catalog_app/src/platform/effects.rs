use std::time::Duration;

use catalog_core::{ComicRecord, Effect, Msg};
use catalog_engine::{ComicPayload, EngineEvent, EngineHandle, FetchError};
use engine_logging::{engine_debug, engine_info, engine_warn};

/// Executes core effects against the fetch engine and feeds completions back
/// as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// Run engine-bound effects. Returns true if the view asked to scroll
    /// back to the top.
    pub fn enqueue(&self, effects: Vec<Effect>) -> bool {
        let mut scroll_to_top = false;
        for effect in effects {
            match effect {
                Effect::FetchCollection { request } => {
                    engine_info!("FetchCollection request={}", request);
                    self.engine.fetch_collection(request);
                }
                Effect::FetchDetail { request, id } => {
                    engine_info!("FetchDetail request={} id={}", request, id);
                    self.engine.fetch_detail(request, id.as_str());
                }
                Effect::ScrollToTop => scroll_to_top = true,
            }
        }
        scroll_to_top
    }

    /// Next engine completion as a message, waiting up to `timeout`.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::CollectionFetched { request, result } => Msg::CollectionLoaded {
            request,
            result: map_result("collection", result),
        },
        EngineEvent::DetailFetched {
            request,
            id,
            result,
        } => {
            engine_debug!("Detail lookup for {} finished", id);
            Msg::DetailLoaded {
                request,
                result: map_result("detail", result),
            }
        }
    }
}

fn map_result(
    what: &str,
    result: Result<Vec<ComicPayload>, FetchError>,
) -> Result<Vec<ComicRecord>, String> {
    match result {
        Ok(payloads) => Ok(payloads.into_iter().map(map_comic).collect()),
        Err(err) => {
            engine_warn!("{} fetch failed: {}", what, err);
            Err(err.to_string())
        }
    }
}

fn map_comic(payload: ComicPayload) -> ComicRecord {
    ComicRecord {
        id: payload.id.into(),
        title: payload.title,
        author: payload.author,
        genre: payload.genre,
        picture: payload.picture,
        hyperlink: payload.hyperlink,
        crawl_date: payload.crawl_date,
        last_updated: payload.last_updated,
        access: payload.access,
        episodes: payload.episodes,
        episode_count: payload.episode_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_engine::FailureKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn collection_event_becomes_loaded_records() {
        let payload = ComicPayload {
            id: "7".to_string(),
            title: "Alpha".to_string(),
            access: Some("需要追漫券".to_string()),
            episode_count: Some(12),
            ..ComicPayload::default()
        };
        let msg = map_event(EngineEvent::CollectionFetched {
            request: 3,
            result: Ok(vec![payload]),
        });
        let (request, result) = match msg {
            Msg::CollectionLoaded { request, result } => (request, result),
            other => panic!("unexpected message: {other:?}"),
        };
        assert_eq!(request, 3);
        let records = result.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.as_str(), "7");
        assert_eq!(records[0].status_text(), "需要追漫券");
        assert_eq!(records[0].episode_count, Some(12));
    }

    #[test]
    fn failed_detail_keeps_error_text() {
        let msg = map_event(EngineEvent::DetailFetched {
            request: 9,
            id: "7".to_string(),
            result: Err(FetchError {
                kind: FailureKind::HttpStatus(500),
                message: "server error".to_string(),
            }),
        });
        let (request, result) = match msg {
            Msg::DetailLoaded { request, result } => (request, result),
            other => panic!("unexpected message: {other:?}"),
        };
        assert_eq!(request, 9);
        let error = result.unwrap_err();
        assert!(error.contains("server error"), "{error}");
    }
}
