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

use chrono::TimeDelta;
use log::debug;
use ncpsign_core::time::{now, timestamp_millis};
use ncpsign_core::Result;
use serde_json::Value;

use crate::activity::{ActivityLogClient, ActivityQuery, PageResult};
use crate::constants::*;

/// Lazy page sequence over one activity log query.
///
/// The window and page size are pinned when the sequence is created, so every
/// page of a run is cut from the same result set:
///
/// - absent `to_event_time` becomes now
/// - absent `from_event_time` becomes 30 days before `to_event_time`
/// - absent `page_size` becomes 100
///
/// Pages are only requested when [`ActivityPages::next_page`] is awaited;
/// dropping the sequence stops the run.
///
/// ```no_run
/// use ncpsign_ncloud::{ActivityLogClient, ActivityQuery};
/// use std::time::Duration;
///
/// # async fn example(client: ActivityLogClient) -> ncpsign_core::Result<()> {
/// let mut pages = client
///     .pages(ActivityQuery::new())
///     .with_max_pages(50)
///     .with_delay(Duration::from_secs(1));
///
/// while let Some(page) = pages.next_page().await? {
///     for item in page.items {
///         println!("{item}");
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ActivityPages<'a> {
    client: &'a ActivityLogClient,
    query: ActivityQuery,
    start_index: u32,
    next_index: u32,
    fetched: usize,
    requested: bool,
    max_pages: Option<usize>,
    delay: Option<Duration>,
    done: bool,
}

impl<'a> ActivityPages<'a> {
    pub(crate) fn new(client: &'a ActivityLogClient, mut query: ActivityQuery) -> Self {
        let to = *query
            .to_event_time
            .get_or_insert_with(|| timestamp_millis(now()));
        query.from_event_time.get_or_insert_with(|| {
            to.saturating_sub(TimeDelta::days(ACTIVITY_DEFAULT_WINDOW_DAYS).num_milliseconds())
        });
        query.page_size.get_or_insert(ACTIVITY_MAX_PAGE_SIZE);

        let start_index = query.page_index.unwrap_or(0);
        Self {
            client,
            query,
            start_index,
            next_index: start_index,
            fetched: 0,
            requested: false,
            max_pages: None,
            delay: None,
            done: false,
        }
    }

    /// Stop after `n` pages even if the service reports more.
    pub fn with_max_pages(mut self, n: usize) -> Self {
        self.max_pages = Some(n);
        self
    }

    /// Sleep `delay` between two requests, never before the first one of a run.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// The pinned query, `page_index` is the start of the run.
    pub fn query(&self) -> &ActivityQuery {
        &self.query
    }

    /// Page index the next request will carry.
    pub fn next_page_index(&self) -> u32 {
        self.next_index
    }

    /// Pages yielded since creation or the last restart.
    pub fn pages_fetched(&self) -> usize {
        self.fetched
    }

    /// Whether the run is over.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Rewind to the first page, keeping the pinned window.
    pub fn restart(&mut self) {
        self.next_index = self.start_index;
        self.fetched = 0;
        self.requested = false;
        self.done = false;
    }

    /// Fetch the next page.
    ///
    /// Returns `Ok(None)` once a page without more results was returned or
    /// `max_pages` is reached. On error the position is kept, so calling it
    /// again retries the same page.
    pub async fn next_page(&mut self) -> Result<Option<PageResult>> {
        if self.done {
            return Ok(None);
        }
        if self.max_pages.is_some_and(|max| self.fetched >= max) {
            debug!("stop paging after {} pages", self.fetched);
            self.done = true;
            return Ok(None);
        }

        if let Some(delay) = self.delay.filter(|_| self.requested) {
            tokio::time::sleep(delay).await;
        }
        self.requested = true;

        let mut query = self.query.clone();
        query.page_index = Some(self.next_index);
        debug!("fetching activity page {}", self.next_index);
        let page = self.client.query(&query).await?;

        self.fetched += 1;
        match self.next_index.checked_add(1) {
            Some(v) if page.has_more => self.next_index = v,
            _ => self.done = true,
        }

        Ok(Some(page))
    }

    /// Fetch all remaining pages and concatenate their items.
    pub async fn collect_items(&mut self) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await? {
            items.extend(page.items);
        }

        Ok(items)
    }
}
