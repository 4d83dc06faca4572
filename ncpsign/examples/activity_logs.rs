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

use anyhow::Result;
use log::info;
use ncpsign::ncloud::{ActivityQuery, Config};
use ncpsign::time::{now, timestamp_millis};

const WINDOW_DAYS: i64 = 90;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let ctx = ncpsign::default_context();
    let cred = Config::new().from_env(&ctx).credential()?;
    let client = ncpsign::ncloud::ActivityLogClient::new(ctx, cred);

    // Peek at the latest record first.
    let page = client
        .query(&ActivityQuery::new().with_page_index(0).with_page_size(1))
        .await?;
    match page.items.first() {
        Some(item) => println!("latest activity: {item}"),
        None => println!("no activity in the default window"),
    }

    let to = timestamp_millis(now());
    let from = to - WINDOW_DAYS * 24 * 60 * 60 * 1000;
    let mut pages = client
        .pages(
            ActivityQuery::new()
                .with_from_event_time(from)
                .with_to_event_time(to),
        )
        .with_delay(Duration::from_secs(1));

    let mut total = 0;
    while let Some(page) = pages.next_page().await? {
        total += page.items.len();
        info!("page {} done, {total} logs so far", pages.pages_fetched());
    }
    println!("{total} activity logs in the last {WINDOW_DAYS} days");

    Ok(())
}
