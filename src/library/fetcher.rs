//! Recording library access.

use async_trait::async_trait;
use futures::stream::{self, Stream};

use crate::api::types::Session;
use crate::error::{Error, Result};
use crate::library::window::DateWindow;
use crate::media::Recording;

/// Remote source of recording metadata.
#[async_trait]
pub trait RecordingLibrary: Send + Sync {
    /// Establish an authenticated session.
    async fn login(&self, email: &str, password: &str) -> Result<Session>;

    /// List the recordings created within `window`, in upstream order.
    async fn fetch_library(&self, session: &Session, window: &DateWindow)
        -> Result<Vec<Recording>>;
}

struct FetchState<'a, L: ?Sized, I> {
    library: &'a L,
    session: &'a Session,
    windows: I,
    pending: std::vec::IntoIter<Recording>,
    failed: bool,
}

/// Stream every recording of every window, querying one window at a time.
///
/// A window is only queried once all recordings of the previous one have been
/// pulled. A failed query yields a single [`Error::Fetch`] and ends the stream.
pub fn fetch_recordings<'a, L, W>(
    library: &'a L,
    session: &'a Session,
    windows: W,
) -> impl Stream<Item = Result<Recording>> + 'a
where
    L: RecordingLibrary + ?Sized,
    W: IntoIterator<Item = DateWindow>,
    W::IntoIter: 'a,
{
    let state = FetchState {
        library,
        session,
        windows: windows.into_iter(),
        pending: Vec::new().into_iter(),
        failed: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if state.failed {
                return None;
            }

            if let Some(recording) = state.pending.next() {
                return Some((Ok(recording), state));
            }

            let window = state.windows.next()?;
            tracing::info!("Fetching library for {}", window);

            match state.library.fetch_library(state.session, &window).await {
                Ok(recordings) => {
                    tracing::debug!("{} recording(s) for {}", recordings.len(), window);
                    state.pending = recordings.into_iter();
                }
                Err(e) => {
                    state.failed = true;
                    return Some((Err(Error::fetch(window, e)), state));
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindowStrategy;
    use crate::library::window::plan_windows;
    use chrono::{Local, TimeZone};
    use futures::StreamExt;
    use std::sync::Mutex;

    /// Library serving one canned response per query, in order.
    struct ScriptedLibrary {
        responses: Mutex<Vec<Result<Vec<Recording>>>>,
        queried: Mutex<Vec<DateWindow>>,
    }

    impl ScriptedLibrary {
        fn new(mut responses: Vec<Result<Vec<Recording>>>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                queried: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RecordingLibrary for ScriptedLibrary {
        async fn login(&self, _email: &str, _password: &str) -> Result<Session> {
            unreachable!("not used by the fetcher")
        }

        async fn fetch_library(
            &self,
            _session: &Session,
            window: &DateWindow,
        ) -> Result<Vec<Recording>> {
            self.queried.lock().unwrap().push(*window);
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn session() -> Session {
        Session {
            token: "token".into(),
            user_id: "user".into(),
        }
    }

    fn rec(id: &str) -> Recording {
        Recording::new(id, 0, format!("https://example.com/{}", id))
    }

    fn windows(days: u32) -> crate::library::window::DateWindows {
        let now = Local.with_ymd_and_hms(2024, 5, 20, 8, 0, 0).unwrap();
        plan_windows(days, now, WindowStrategy::Daily)
    }

    #[tokio::test]
    async fn test_emits_windows_in_order() {
        let library = ScriptedLibrary::new(vec![
            Ok(vec![rec("a"), rec("b")]),
            Ok(vec![]),
            Ok(vec![rec("c")]),
        ]);
        let session = session();

        let ids: Vec<String> = fetch_recordings(&library, &session, windows(2))
            .map(|r| r.unwrap().unique_id)
            .collect()
            .await;

        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(library.queried.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_fails_fast_on_query_error() {
        let library = ScriptedLibrary::new(vec![
            Ok(vec![rec("a")]),
            Err(Error::Api("boom".into())),
            Ok(vec![rec("never")]),
        ]);
        let session = session();
        let planned: Vec<_> = windows(2).collect();

        let results: Vec<_> = fetch_recordings(&library, &session, planned.clone())
            .collect()
            .await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().unique_id, "a");
        match &results[1] {
            Err(Error::Fetch { window, .. }) => assert_eq!(*window, planned[1]),
            other => panic!("expected fetch error, got {:?}", other),
        }
        // The third window is never queried
        assert_eq!(library.queried.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_queries_lazily() {
        let library = ScriptedLibrary::new(vec![Ok(vec![rec("a"), rec("b")]), Ok(vec![rec("c")])]);
        let session = session();
        let mut stream = Box::pin(fetch_recordings(&library, &session, windows(1)));

        assert_eq!(stream.next().await.unwrap().unwrap().unique_id, "a");
        assert_eq!(library.queried.lock().unwrap().len(), 1);
        assert_eq!(stream.next().await.unwrap().unwrap().unique_id, "b");
        assert_eq!(library.queried.lock().unwrap().len(), 1);
        assert_eq!(stream.next().await.unwrap().unwrap().unique_id, "c");
        assert_eq!(library.queried.lock().unwrap().len(), 2);
        assert!(stream.next().await.is_none());
    }
}
