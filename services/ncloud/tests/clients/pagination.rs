// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::time::Duration;

use super::mock::{test_credential, MockHttpSend};
use anyhow::Result;
use ncpsign_core::ErrorKind;
use ncpsign_ncloud::{ActivityLogClient, ActivityQuery};
use pretty_assertions::assert_eq;
use serde_json::json;

const MORE: &str = r#"{"items":[{"n":1}],"hasMore":true}"#;
const LAST: &str = r#"{"items":[{"n":2}],"hasMore":false}"#;

fn init_client(mock: &MockHttpSend) -> ActivityLogClient {
    let _ = env_logger::builder().is_test(true).try_init();

    ActivityLogClient::new(mock.context(), test_credential())
}

fn page_indexes(mock: &MockHttpSend) -> Vec<u64> {
    mock.requests()
        .iter()
        .map(|r| r.body_json()["pageIndex"].as_u64().expect("pageIndex must be sent"))
        .collect()
}

#[tokio::test]
async fn test_stops_when_no_more() -> Result<()> {
    let mock = MockHttpSend::new().respond(200, MORE).respond(200, LAST);
    let client = init_client(&mock);

    let mut pages = client.pages(
        ActivityQuery::new()
            .with_from_event_time(1_000)
            .with_to_event_time(2_000)
            .with_page_size(100),
    );

    let first = pages.next_page().await?.expect("first page");
    assert!(first.has_more);
    let second = pages.next_page().await?.expect("second page");
    assert!(!second.has_more);
    assert!(pages.next_page().await?.is_none());
    assert!(pages.is_done());

    assert_eq!(page_indexes(&mock), vec![0, 1]);
    for req in mock.requests() {
        let body = req.body_json();
        assert_eq!(body["fromEventTime"], json!(1_000));
        assert_eq!(body["toEventTime"], json!(2_000));
        assert_eq!(body["pageSize"], json!(100));
    }
    Ok(())
}

#[tokio::test]
async fn test_single_page_run_terminates_immediately() -> Result<()> {
    let mock = MockHttpSend::new().respond(200, r#"{"items":[{"x":1}],"hasMore":false}"#);
    let client = init_client(&mock);

    let items = client
        .pages(ActivityQuery::new().with_page_size(1))
        .collect_items()
        .await?;
    assert_eq!(items, vec![json!({"x": 1})]);
    assert_eq!(mock.requests().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_window_is_pinned_across_pages() -> Result<()> {
    let mock = MockHttpSend::new()
        .respond(200, MORE)
        .respond(200, MORE)
        .respond(200, LAST);
    let client = init_client(&mock);

    let items = client.pages(ActivityQuery::new()).collect_items().await?;
    assert_eq!(items.len(), 3);
    assert_eq!(page_indexes(&mock), vec![0, 1, 2]);

    let bodies: Vec<_> = mock.requests().iter().map(|r| r.body_json()).collect();
    let from = bodies[0]["fromEventTime"].as_i64().unwrap();
    let to = bodies[0]["toEventTime"].as_i64().unwrap();
    assert_eq!(to - from, 30 * 24 * 60 * 60 * 1000);
    for body in &bodies {
        assert_eq!(body["fromEventTime"], json!(from));
        assert_eq!(body["toEventTime"], json!(to));
        assert_eq!(body["pageSize"], json!(100));
    }
    Ok(())
}

#[tokio::test]
async fn test_starts_at_given_page_index() -> Result<()> {
    let mock = MockHttpSend::new().respond(200, MORE).respond(200, LAST);
    let client = init_client(&mock);

    client
        .pages(ActivityQuery::new().with_page_index(5))
        .collect_items()
        .await?;
    assert_eq!(page_indexes(&mock), vec![5, 6]);
    Ok(())
}

#[tokio::test]
async fn test_max_pages_guard() -> Result<()> {
    let mock = MockHttpSend::new()
        .respond(200, MORE)
        .respond(200, MORE)
        .respond(200, MORE);
    let client = init_client(&mock);

    let mut pages = client.pages(ActivityQuery::new()).with_max_pages(2);
    let items = pages.collect_items().await?;
    assert_eq!(items.len(), 2);
    assert_eq!(pages.pages_fetched(), 2);
    assert_eq!(mock.requests().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_restart_replays_from_start() -> Result<()> {
    let mock = MockHttpSend::new()
        .respond(200, MORE)
        .respond(200, LAST)
        .respond(200, MORE)
        .respond(200, LAST);
    let client = init_client(&mock);

    let mut pages = client.pages(ActivityQuery::new());
    let window = pages.query().clone();
    pages.collect_items().await?;

    pages.restart();
    assert_eq!(pages.query(), &window);
    assert_eq!(pages.next_page_index(), 0);
    pages.collect_items().await?;

    assert_eq!(page_indexes(&mock), vec![0, 1, 0, 1]);
    Ok(())
}

#[tokio::test]
async fn test_error_page_is_retried_in_place() -> Result<()> {
    let mock = MockHttpSend::new()
        .respond(200, MORE)
        .respond(500, "<error>busy</error>")
        .respond(200, LAST);
    let client = init_client(&mock);

    let mut pages = client.pages(ActivityQuery::new());
    pages.next_page().await?;

    let err = pages.next_page().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResponseInvalid);
    assert_eq!(pages.next_page_index(), 1);

    let page = pages.next_page().await?.expect("retried page");
    assert!(!page.has_more);
    assert_eq!(page_indexes(&mock), vec![0, 1, 1]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_delay_between_pages() -> Result<()> {
    let mock = MockHttpSend::new()
        .respond(200, MORE)
        .respond(200, MORE)
        .respond(200, LAST);
    let client = init_client(&mock);

    let start = tokio::time::Instant::now();
    let mut pages = client
        .pages(ActivityQuery::new())
        .with_delay(Duration::from_secs(1));

    pages.next_page().await?;
    assert_eq!(start.elapsed(), Duration::ZERO);

    pages.collect_items().await?;
    assert!(start.elapsed() >= Duration::from_secs(2));
    assert_eq!(mock.requests().len(), 3);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_restart_does_not_wait_before_first_page() -> Result<()> {
    let mock = MockHttpSend::new()
        .respond(200, MORE)
        .respond(200, LAST)
        .respond(200, LAST);
    let client = init_client(&mock);

    let mut pages = client
        .pages(ActivityQuery::new())
        .with_delay(Duration::from_secs(1));
    pages.collect_items().await?;

    pages.restart();
    let start = tokio::time::Instant::now();
    pages.next_page().await?;
    assert_eq!(start.elapsed(), Duration::ZERO);
    assert_eq!(page_indexes(&mock), vec![0, 1, 0]);
    Ok(())
}
