//! Search Controller Tests
//!
//! Driven by the scripted service double on tokio's paused clock.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::config::ClientConfig;
    use crate::controller::{CursorMove, QueryOutcome, SearchController, SearchPhase, Services, ToggleOutcome};
    use crate::domain::{ApiError, CityRef, ClientError, RecordId};
    use crate::session::{MemorySessionStore, SessionStore};
    use crate::testing::{server_error, suggestion, MockApi, TokioTimer};

    fn setup_with(session: MemorySessionStore) -> (Arc<MockApi>, Arc<MemorySessionStore>, SearchController) {
        let api = Arc::new(MockApi::new());
        let session = Arc::new(session);
        let services = Services::from_api(api.clone(), session.clone());
        let controller = SearchController::new(&services, Arc::new(TokioTimer), ClientConfig::default());
        (api, session, controller)
    }

    fn setup() -> (Arc<MockApi>, Arc<MemorySessionStore>, SearchController) {
        setup_with(MemorySessionStore::signed_in("tok", "u1"))
    }

    // ========================
    // Autocomplete
    // ========================

    #[tokio::test(start_paused = true)]
    async fn test_short_query_never_fetches() {
        let (api, _session, search) = setup();

        for text in ["p", "pa"] {
            assert_eq!(search.change_query(text).await, QueryOutcome::TooShort);
        }
        assert!(api.calls().is_empty());
        assert_eq!(search.snapshot().query, "pa");
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_fetches_once_with_last_value() {
        let (api, _session, search) = setup();

        let (a, b, c) = tokio::join!(
            search.change_query("lon"),
            async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                search.change_query("lond").await
            },
            async {
                tokio::time::sleep(Duration::from_millis(250)).await;
                search.change_query("londo").await
            },
        );

        assert_eq!((a, b, c), (QueryOutcome::Superseded, QueryOutcome::Superseded, QueryOutcome::Fetched));
        assert_eq!(api.calls(), ["GET /weather/autocomplete/londo"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_change_query_clears_error_and_resets_cursor() {
        let (api, _session, search) = setup();
        api.script.lock().suggestions = vec![suggestion("Paris", "France"), suggestion("Parma", "Italy")];

        search.submit_search(Some("  ")).await.unwrap_err();
        assert!(search.snapshot().error.is_some());

        assert_eq!(search.change_query("par").await, QueryOutcome::Fetched);
        let state = search.snapshot();
        assert_eq!(state.error, None);
        assert_eq!(state.cursor, Some(0));
        assert_eq!(state.suggestions.len(), 2);
        assert_eq!(state.phase, SearchPhase::SuggestionsReady);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_suggestions_dropped() {
        let (api, _session, search) = setup();
        api.script.lock().autocomplete_latency = Some(Duration::from_millis(500));

        let (first, second) = tokio::join!(search.change_query("lis"), async {
            // lands while the first fetch is still in flight
            tokio::time::sleep(Duration::from_millis(400)).await;
            search.change_query("lisb").await
        });

        assert_eq!(first, QueryOutcome::Superseded);
        assert_eq!(second, QueryOutcome::Fetched);
        assert_eq!(
            api.calls(),
            ["GET /weather/autocomplete/lis", "GET /weather/autocomplete/lisb"]
        );
    }

    #[tokio::test]
    async fn test_autocomplete_failure_clears_suggestions() {
        let (api, _session, search) = setup();
        api.script.lock().suggestions = vec![suggestion("Paris", "France")];
        search.fetch_suggestions("par").await;
        assert_eq!(search.snapshot().suggestions.len(), 1);

        api.script.lock().autocomplete_error = Some(ApiError::Transport("offline".to_string()));
        search.fetch_suggestions("pari").await;

        let state = search.snapshot();
        assert!(state.suggestions.is_empty());
        assert_eq!(state.error, None);
    }

    // ========================
    // Cursor
    // ========================

    #[tokio::test]
    async fn test_cursor_wraps() {
        let (api, _session, search) = setup();
        api.script.lock().suggestions = vec![
            suggestion("Paris", "France"),
            suggestion("Parma", "Italy"),
            suggestion("Paro", "Bhutan"),
        ];
        search.fetch_suggestions("par").await;

        assert_eq!(search.move_cursor(CursorMove::Down), Some(0));
        assert_eq!(search.move_cursor(CursorMove::Up), Some(2));
        assert_eq!(search.move_cursor(CursorMove::Down), Some(0));
        assert_eq!(search.move_cursor(CursorMove::Down), Some(1));
        assert_eq!(search.move_cursor(CursorMove::Down), Some(2));
        assert_eq!(search.move_cursor(CursorMove::Down), Some(0));
    }

    #[tokio::test]
    async fn test_cursor_from_no_selection_up_goes_last() {
        let (api, _session, search) = setup();
        api.script.lock().suggestions = vec![suggestion("Paris", "France"), suggestion("Parma", "Italy")];
        search.fetch_suggestions("par").await;

        assert_eq!(search.snapshot().cursor, None);
        assert_eq!(search.move_cursor(CursorMove::Up), Some(1));
    }

    #[test]
    fn test_cursor_ignored_without_suggestions() {
        let (_api, _session, search) = setup();
        assert_eq!(search.move_cursor(CursorMove::Down), None);
        assert_eq!(search.snapshot().cursor, None);
    }

    // ========================
    // Search
    // ========================

    #[tokio::test]
    async fn test_search_requires_sign_in() {
        let (api, _session, search) = setup_with(MemorySessionStore::new());

        let err = search.submit_search(Some("Paris")).await.unwrap_err();
        assert_eq!(err, ClientError::Unauthenticated);
        assert!(api.calls().is_empty());
        assert_eq!(search.snapshot().phase, SearchPhase::Error);
    }

    #[tokio::test]
    async fn test_search_success() {
        let (api, _session, search) = setup();
        api.script.lock().is_favorite = true;

        let report = search.submit_search(Some("Lima,Peru")).await.unwrap();
        assert_eq!(report.city, "Lima, Peru");

        let state = search.snapshot();
        assert_eq!(state.weather.as_ref().map(|w| w.city.as_str()), Some("Lima, Peru"));
        assert!(state.suggestions.is_empty());
        assert!(state.is_favorite);
        assert_eq!(state.phase, SearchPhase::ResultReady);
        assert_eq!(
            api.calls(),
            ["GET /weather/Lima,Peru", "GET /favorites/check?city=lima, peru"]
        );
    }

    #[tokio::test]
    async fn test_failed_search_keeps_previous_report() {
        let (api, _session, search) = setup();
        search.submit_search(Some("Lima,Peru")).await.unwrap();

        api.script.lock().weather_error = Some(server_error(404, "City not found"));
        let err = search.submit_search(Some("Atlantis")).await.unwrap_err();
        assert_eq!(err, ClientError::Remote("City not found".to_string()));

        let state = search.snapshot();
        assert_eq!(state.error.as_deref(), Some("City not found"));
        assert_eq!(state.weather.map(|w| w.city), Some("Lima, Peru".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_cancels_earlier_keystroke() {
        let (api, _session, search) = setup();

        let (outcome, report) = tokio::join!(search.change_query("ber"), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            search.submit_search(Some("Lima,Peru")).await
        });

        assert!(report.is_ok());
        assert_eq!(outcome, QueryOutcome::Superseded);
        assert!(api.calls_starting_with("GET /weather/autocomplete").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_keystroke_during_search_still_fetches() {
        let (api, _session, search) = setup();
        {
            let mut script = api.script.lock();
            script.weather_latency = Some(Duration::from_millis(200));
            script.suggestions = vec![suggestion("Berlin", "Germany")];
        }

        let (report, outcome) = tokio::join!(search.submit_search(Some("Lima,Peru")), async {
            // typed while the weather request is still out
            tokio::time::sleep(Duration::from_millis(50)).await;
            search.change_query("ber").await
        });

        assert!(report.is_ok());
        assert_eq!(outcome, QueryOutcome::Fetched);
        assert_eq!(api.calls_starting_with("GET /weather/autocomplete"), ["GET /weather/autocomplete/ber"]);
        assert_eq!(search.snapshot().suggestions.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_search_generic_message() {
        let (api, _session, search) = setup();
        api.script.lock().weather_error = Some(ApiError::Transport("refused".to_string()));

        search.submit_search(Some("Lima")).await.unwrap_err();
        assert_eq!(search.snapshot().error.as_deref(), Some("Failed to fetch weather"));
    }

    #[tokio::test]
    async fn test_blank_search_makes_no_request() {
        let (api, _session, search) = setup();
        assert_eq!(search.submit_search(None).await.unwrap_err(), ClientError::EmptyQuery);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_favorite_check_failure_reads_false() {
        let (api, _session, search) = setup();
        api.script.lock().check_error = Some(ApiError::Transport("offline".to_string()));
        assert!(!search.check_favorite_status("Lima, Peru").await);

        assert!(!search.check_favorite_status("   ").await);
        assert_eq!(api.calls_starting_with("GET /favorites/check").len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_on_suggestion_searches_it() {
        let (api, session, search) = setup();
        api.script.lock().suggestions = vec![suggestion("Paris", "France")];

        assert_eq!(search.change_query("par").await, QueryOutcome::Fetched);
        let report = search.submit_selection().await.unwrap();

        assert_eq!(report.city, "Paris, France");
        assert!(api.calls().contains(&"GET /weather/Paris,France".to_string()));
        assert_eq!(search.snapshot().query, "Paris,France");
        assert_eq!(session.history().entries(), ["Paris,France"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_without_suggestions_searches_query() {
        let (api, session, search) = setup();
        assert_eq!(search.change_query("Quito").await, QueryOutcome::Fetched);
        assert!(search.snapshot().suggestions.is_empty());

        search.submit_selection().await.unwrap();
        assert!(api.calls().contains(&"GET /weather/Quito".to_string()));
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_select_city_moves_history_entry_to_front() {
        let (_api, session, search) = setup();
        session.record_search("madrid,es", 30);
        session.record_search("Lima,Peru", 30);

        search.select_city(&CityRef::new("Madrid", Some("ES"))).await.unwrap();
        assert_eq!(session.history().entries(), ["Madrid,ES", "Lima,Peru"]);
    }

    #[tokio::test]
    async fn test_failed_select_leaves_history() {
        let (api, session, search) = setup();
        api.script.lock().weather_error = Some(server_error(500, "Upstream down"));

        search.select_city(&CityRef::new("Madrid", Some("ES"))).await.unwrap_err();
        assert!(session.history().is_empty());
    }

    // ========================
    // Favorite toggle
    // ========================

    #[tokio::test]
    async fn test_toggle_adds_favorite() {
        let (api, _session, search) = setup();
        search.submit_search(Some("Lima,Peru")).await.unwrap();

        let outcome = search.toggle_favorite().await.unwrap();
        assert_eq!(outcome, ToggleOutcome::Applied { favorite: true });
        assert!(search.snapshot().is_favorite);
        assert_eq!(api.calls_starting_with("POST /favorites"), ["POST /favorites Lima, Peru"]);
    }

    #[tokio::test]
    async fn test_toggle_failure_reverts() {
        let (api, _session, search) = setup();
        search.submit_search(Some("Lima,Peru")).await.unwrap();
        api.script.lock().favorite_write_error = Some(server_error(500, "Database unavailable"));

        let outcome = search.toggle_favorite().await.unwrap();
        assert_eq!(
            outcome,
            ToggleOutcome::Reverted {
                favorite: false,
                error: ClientError::Remote("Database unavailable".to_string()),
            }
        );
        assert!(!search.snapshot().is_favorite);
    }

    #[tokio::test]
    async fn test_toggle_removes_by_resolved_id() {
        let (api, _session, search) = setup();
        {
            let mut script = api.script.lock();
            script.is_favorite = true;
            script.favorite_id = Some(RecordId::new("31"));
        }
        search.submit_search(Some("Lima,Peru")).await.unwrap();

        let outcome = search.toggle_favorite().await.unwrap();
        assert_eq!(outcome, ToggleOutcome::Applied { favorite: false });
        assert!(!search.snapshot().is_favorite);

        let calls = api.calls();
        assert_eq!(&calls[calls.len() - 2..], ["GET /favorites/by-city/Lima, Peru", "DELETE /favorites/31"]);
    }

    #[tokio::test]
    async fn test_remove_failure_reverts_to_favorite() {
        let (api, _session, search) = setup();
        {
            let mut script = api.script.lock();
            script.is_favorite = true;
            script.favorite_id = Some(RecordId::new("31"));
            script.favorite_write_error = Some(ApiError::Transport("offline".to_string()));
        }
        search.submit_search(Some("Lima,Peru")).await.unwrap();

        let outcome = search.toggle_favorite().await.unwrap();
        assert!(matches!(outcome, ToggleOutcome::Reverted { favorite: true, .. }));
        assert!(search.snapshot().is_favorite);
    }

    #[tokio::test]
    async fn test_missing_record_reconciles_to_not_favorite() {
        let (api, _session, search) = setup();
        api.script.lock().is_favorite = true;
        search.submit_search(Some("Lima,Peru")).await.unwrap();

        let outcome = search.toggle_favorite().await.unwrap();
        assert_eq!(
            outcome,
            ToggleOutcome::Reconciled { favorite: false, error: ClientError::NotFound }
        );
        assert!(!search.snapshot().is_favorite);
        assert!(api.calls_starting_with("DELETE").is_empty());
    }

    #[tokio::test]
    async fn test_double_toggle_is_dropped() {
        let (api, _session, search) = setup();
        search.submit_search(Some("Lima,Peru")).await.unwrap();

        let (first, second) = tokio::join!(search.toggle_favorite(), search.toggle_favorite());
        assert_eq!(first.unwrap(), ToggleOutcome::Applied { favorite: true });
        assert_eq!(second.unwrap(), ToggleOutcome::Skipped);
        assert_eq!(api.calls_starting_with("POST /favorites").len(), 1);
        assert!(search.snapshot().is_favorite);
    }

    #[tokio::test]
    async fn test_toggle_requires_sign_in() {
        let (api, session, search) = setup();
        search.submit_search(Some("Lima,Peru")).await.unwrap();
        session.sign_out();
        let before = api.calls().len();

        assert_eq!(search.toggle_favorite().await.unwrap_err(), ClientError::Unauthenticated);
        assert_eq!(api.calls().len(), before);
    }

    #[tokio::test]
    async fn test_toggle_without_weather() {
        let (_api, _session, search) = setup();
        assert_eq!(search.toggle_favorite().await.unwrap_err(), ClientError::NoWeather);
    }
}
