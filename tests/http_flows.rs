use std::time::Duration;

use anyhow::Result;
#[cfg(feature = "async")]
use http::StatusCode;
#[cfg(feature = "blocking")]
use skyscanner_sdk::BlockingClient;
use skyscanner_sdk::{AutoSuggestRequest, LocalDate, PlaceId, QueryLeg, SearchQuery};
#[cfg(feature = "async")]
use skyscanner_sdk::{
    Client, Error, ErrorKind, PlaceType, ResultAction, ResultStatus, TransportErrorKind,
};
use serde_json::json;
#[cfg(feature = "blocking")]
use tokio::task;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path, query_param},
};

const API_KEY: &str = "prtl-test-key";

fn lhr_to_jfk() -> SearchQuery {
    SearchQuery::new("UK", "en-GB", "GBP").leg(QueryLeg::new(
        PlaceId::iata("LHR"),
        PlaceId::iata("JFK"),
        LocalDate::new(2026, 12, 1),
    ))
}

fn search_body(token: &str, status: &str) -> serde_json::Value {
    json!({
        "sessionToken": token,
        "status": status,
        "action": "RESULT_ACTION_REPLACED",
        "content": {
            "results": {
                "itineraries": {
                    "it-1": {
                        "pricingOptions": [{
                            "price": {"amount": "41250", "unit": "PRICE_UNIT_CENTI"},
                            "agentIds": ["ba"]
                        }],
                        "legIds": ["leg-1"]
                    }
                },
                "legs": {
                    "leg-1": {
                        "originPlaceId": "95565050",
                        "destinationPlaceId": "95565058",
                        "durationInMinutes": 470,
                        "stopCount": 0,
                        "segmentIds": ["seg-1"]
                    }
                },
                "places": {
                    "95565050": {"entityId": "95565050", "iata": "LHR", "name": "London Heathrow", "type": "PLACE_TYPE_AIRPORT"}
                }
            },
            "sortingOptions": {
                "cheapest": [{"score": 1.0, "itineraryId": "it-1"}]
            }
        }
    })
}

#[cfg(feature = "async")]
async fn mock_get(server: &MockServer, endpoint: &str, response: ResponseTemplate, expected: u64) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .and(header("x-api-key", API_KEY))
        .respond_with(response)
        .expect(expected)
        .up_to_n_times(expected)
        .mount(server)
        .await;
}

#[cfg(feature = "async")]
fn client_for(server: &MockServer) -> Result<Client> {
    Ok(Client::builder(API_KEY).base_url(server.uri()).build()?)
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_create_then_poll_search() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/apiservices/v3/flights/live/search/create"))
        .and(header("x-api-key", API_KEY))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "query": {
                "market": "UK",
                "query_legs": [{"originPlaceId": {"iata": "LHR"}}]
            }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_body("tok-123", "RESULT_STATUS_INCOMPLETE")),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/apiservices/v3/flights/live/search/poll/tok-123"))
        .and(header("x-api-key", API_KEY))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_body("tok-123", "RESULT_STATUS_COMPLETE")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::builder(API_KEY)
        .base_url(format!("{}/apiservices/v3", server.uri()))
        .build()?;

    let created = client.flights().create_search(&lhr_to_jfk()).await?;
    assert_eq!(created.session_token.as_str(), "tok-123");
    assert_eq!(created.status, ResultStatus::INCOMPLETE);
    assert_eq!(created.action, ResultAction::REPLACED);

    let polled = client.flights().poll_search(&created.session_token).await?;
    assert!(polled.is_complete());

    let results = &polled.content.results;
    let itinerary = &results.itineraries["it-1"];
    let cheapest = itinerary.cheapest_option().expect("priced itinerary");
    assert_eq!(cheapest.price.to_f64()?, 412.5);
    assert_eq!(results.itinerary_legs(itinerary).count(), 1);
    assert_eq!(
        polled.content.sorting_options.cheapest[0].itinerary_id,
        "it-1"
    );

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_structured_error_keeps_vendor_envelope() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/culture/locales",
        ResponseTemplate::new(403).set_body_json(json!({"code": 403, "message": "forbidden"})),
        1,
    )
    .await;

    let err = client_for(&server)?
        .culture()
        .list_locales()
        .await
        .expect_err("expected HTTP error");

    assert!(err.is_auth_error());
    assert!(err.is_vendor());
    assert_eq!(err.code(), 403);
    assert_eq!(err.message(), "forbidden");
    match err {
        Error::Auth(http) => {
            assert_eq!(http.status, StatusCode::FORBIDDEN);
            assert!(http.structured);
            assert_eq!(http.path(), "/culture/locales");
        }
        other => panic!("unexpected error variant: {other:?}"),
    }

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_unstructured_error_falls_back_to_status_and_body() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/culture/currencies",
        ResponseTemplate::new(502).set_body_string("upstream exploded"),
        1,
    )
    .await;

    let err = client_for(&server)?
        .culture()
        .list_currencies()
        .await
        .expect_err("expected HTTP error");

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.code(), 502);
    assert_eq!(err.message(), "upstream exploded");
    assert!(err.is_retryable());
    assert!(!err.http().expect("vendor error").structured);

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_non_200_success_statuses_are_vendor_errors() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/culture/locales",
        ResponseTemplate::new(202).set_body_string("queued"),
        1,
    )
    .await;
    mock_get(&server, "/culture/currencies", ResponseTemplate::new(204), 1).await;

    let client = client_for(&server)?;

    let err = client
        .culture()
        .list_locales()
        .await
        .expect_err("202 is not a result");
    assert_eq!(err.kind(), ErrorKind::Api);
    assert!(err.is_vendor());
    assert_eq!(err.code(), 202);
    assert_eq!(err.message(), "queued");

    let err = client
        .culture()
        .list_currencies()
        .await
        .expect_err("204 is not a result");
    assert!(err.is_vendor());
    assert_eq!(err.status(), Some(StatusCode::NO_CONTENT));
    assert_eq!(err.code(), 204);

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_error_body_redacts_api_key() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/culture/locales",
        ResponseTemplate::new(401).set_body_json(json!({
            "code": 16,
            "message": format!("key {API_KEY} is not valid")
        })),
        1,
    )
    .await;

    let err = client_for(&server)?
        .culture()
        .list_locales()
        .await
        .expect_err("expected HTTP error");

    assert_eq!(err.code(), 16);
    assert_eq!(err.message(), "key <redacted> is not valid");
    let snippet = err
        .http()
        .and_then(|http| http.body_snippet.as_deref())
        .unwrap_or_default();
    assert!(!snippet.contains(API_KEY));
    assert!(snippet.contains("<redacted>"));

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_malformed_success_body_is_decode_error() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/culture/locales",
        ResponseTemplate::new(200).set_body_string("{not json"),
        1,
    )
    .await;

    let err = client_for(&server)?
        .culture()
        .list_locales()
        .await
        .expect_err("expected decode error");

    assert_eq!(err.kind(), ErrorKind::Decode);
    assert_eq!(err.code(), 500);
    assert_eq!(err.status(), Some(StatusCode::OK));
    assert!(!err.is_vendor());

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_culture_lookups_route_locale_and_ip() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/culture/markets/en-GB",
        ResponseTemplate::new(200).set_body_json(json!({
            "status": "RESULT_STATUS_COMPLETE",
            "markets": [{"code": "UK", "name": "United Kingdom"}]
        })),
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/culture/nearestculture"))
        .and(query_param("ipAddress", "90.216.134.197"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "RESULT_STATUS_COMPLETE",
            "market": {"code": "UK", "name": "United Kingdom"},
            "locale": {"code": "en-GB", "name": "English (United Kingdom)"},
            "currency": {"code": "GBP", "symbol": "£"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;

    let markets = client.culture().list_markets("en-GB").await?;
    assert_eq!(markets.markets.len(), 1);
    assert_eq!(markets.markets[0].code, "UK");

    let nearest = client.culture().nearest_culture("90.216.134.197").await?;
    assert_eq!(nearest.locale.code, "en-GB");
    assert_eq!(nearest.currency.code, "GBP");

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_auto_suggest_posts_query() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/autosuggest/flights"))
        .and(header("x-api-key", API_KEY))
        .and(body_partial_json(json!({
            "query": {"market": "UK", "locale": "en-GB", "searchTerm": "Lond"},
            "limit": 2
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "places": [
                {"entityId": "27544008", "name": "London", "type": "PLACE_TYPE_CITY", "highlighting": [[0, 4]]},
                {"entityId": "95565050", "iataCode": "LHR", "name": "London Heathrow", "type": "PLACE_TYPE_AIRPORT"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = AutoSuggestRequest::new("UK", "en-GB", "Lond").limit(2);
    let response = client_for(&server)?
        .autosuggest()
        .auto_suggest_flights(&request)
        .await?;

    assert_eq!(response.places.len(), 2);
    assert_eq!(response.places[0].place_type, PlaceType::CITY);
    assert_eq!(response.places[1].iata_code, "LHR");

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_invalid_input_never_reaches_the_wire() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server)?;

    let err = client
        .flights()
        .create_search(&SearchQuery::new("UK", "en-GB", "GBP"))
        .await
        .expect_err("query without legs");
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    assert_eq!(err.code(), 500);

    let err = client.flights().poll_search("").await.expect_err("empty token");
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);

    let err = client
        .autosuggest()
        .auto_suggest_flights(&AutoSuggestRequest::new("UK", "en-GB", "Lond").limit(0))
        .await
        .expect_err("zero limit");
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_timeout_is_a_transport_error() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/culture/locales",
        ResponseTemplate::new(200)
            .set_body_json(json!({"locales": []}))
            .set_delay(Duration::from_millis(500)),
        1,
    )
    .await;

    let client = Client::builder(API_KEY)
        .base_url(server.uri())
        .timeout(Duration::from_millis(100))
        .build()?;

    let err = client
        .culture()
        .list_locales()
        .await
        .expect_err("expected timeout");

    match &err {
        Error::Transport { kind, .. } => assert_eq!(*kind, TransportErrorKind::Timeout),
        other => panic!("unexpected error variant: {other:?}"),
    }
    assert_eq!(err.code(), 500);
    assert!(err.is_retryable());
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_concurrent_calls_share_one_client() -> Result<()> {
    let server = MockServer::start().await;

    let cases = [("en-GB", "UK"), ("de-DE", "DE"), ("fr-FR", "FR"), ("es-ES", "ES")];
    for (locale, market) in cases {
        mock_get(
            &server,
            &format!("/culture/markets/{locale}"),
            ResponseTemplate::new(200)
                .set_body_json(json!({"markets": [{"code": market, "name": market}]}))
                .set_delay(Duration::from_millis(20)),
            1,
        )
        .await;
    }

    let client = client_for(&server)?;
    let mut handles = Vec::new();
    for (locale, market) in cases {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            let markets = client.culture().list_markets(locale).await?;
            anyhow::ensure!(markets.markets[0].code == market, "{locale} got wrong market");
            Ok::<_, anyhow::Error>(())
        }));
    }
    for handle in handles {
        handle.await??;
    }

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_request_hook_sees_key_and_can_add_headers() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/culture/locales"))
        .and(header("x-api-key", API_KEY))
        .and(header("x-trace", "abc"))
        .and(header("x-default", "on"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"locales": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::builder(API_KEY)
        .base_url(server.uri())
        .default_header(
            http::HeaderName::from_static("x-default"),
            http::HeaderValue::from_static("on"),
        )
        .request_hook(|ctx| {
            assert!(ctx.headers.contains_key("x-api-key"));
            ctx.headers
                .insert("x-trace", http::HeaderValue::from_static("abc"));
            Ok(())
        })
        .build()?;

    let locales = client.culture().list_locales().await?;
    assert!(locales.locales.is_empty());

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_create_then_poll_search() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/flights/live/search/create"))
        .and(header("x-api-key", API_KEY))
        .and(header("content-type", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_body("tok-9", "RESULT_STATUS_INCOMPLETE")),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/flights/live/search/poll/tok-9"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_body("tok-9", "RESULT_STATUS_COMPLETE")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let base_url = server.uri();
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder(API_KEY).base_url(base_url).build()?;

        let created = client.flights().create_search(&lhr_to_jfk())?;
        assert!(!created.is_complete());

        let polled = client.flights().poll_search(created.session_token)?;
        assert!(polled.is_complete());
        assert!(polled.content.results.place("95565050").is_some());
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_errors_match_async_semantics() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/culture/markets/xx-XX"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"code": 3, "message": "unsupported locale"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/culture/nearestculture"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = server.uri();
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder(API_KEY).base_url(base_url).build()?;

        let err = client
            .culture()
            .list_markets("xx-XX")
            .expect_err("expected HTTP error");
        assert_eq!(err.code(), 3);
        assert_eq!(err.message(), "unsupported locale");

        let err = client
            .culture()
            .nearest_culture("127.0.0.1")
            .expect_err("expected HTTP error");
        assert_eq!(err.code(), 503);
        assert_eq!(err.message(), "maintenance");
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_auto_suggest_and_hook() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/autosuggest/flights"))
        .and(header("x-hooked", "yes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "places": [{"entityId": "27544008", "name": "London"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = server.uri();
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder(API_KEY)
            .base_url(base_url)
            .timeout(Duration::from_secs(5))
            .request_hook(|ctx| {
                assert!(ctx.body.is_some());
                ctx.headers
                    .insert("x-hooked", http::HeaderValue::from_static("yes"));
                Ok(())
            })
            .build()?;

        let response = client
            .autosuggest()
            .auto_suggest_flights(&AutoSuggestRequest::new("UK", "en-GB", "Lond"))?;
        assert_eq!(response.places[0].name, "London");
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}
