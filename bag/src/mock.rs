//! In-memory page source for tests, enabled by the `mock` feature.

use std::cell::RefCell;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;
use url::Url;

use crate::{
    error::FetchError,
    feature::{Feature, Page},
    fetch::PageSource,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub base: Url,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Clone)]
enum Mode {
    /// n-th request gets a page of the n-th size, whatever it asked for.
    Scripted(Vec<usize>),
    /// Honours limit/offset over this many features.
    Dataset(usize),
}

#[derive(Debug)]
pub struct MockPages {
    mode: Mode,
    total_count: Option<u64>,
    fail_at: Option<(usize, StatusCode)>,
    requests: RefCell<Vec<Request>>,
}

/// A small square pand footprint in Delft, shifted east by `i` * 25 m.
pub fn pand_feature(i: usize) -> Feature {
    let x = 84_000.0 + 25.0 * i as f64;
    let y = 447_000.0;
    Feature(json!({
        "type": "Feature",
        "id": format!("pand-{i}"),
        "geometry": {
            "type": "Polygon",
            "coordinates": [[[x, y], [x + 20.0, y], [x + 20.0, y + 20.0], [x, y + 20.0], [x, y]]]
        },
        "properties": { "identificatie": format!("pand-{i}") }
    }))
}

impl MockPages {
    pub fn scripted(sizes: impl IntoIterator<Item = usize>, total_count: Option<u64>) -> Self {
        Self {
            mode: Mode::Scripted(sizes.into_iter().collect()),
            total_count,
            fail_at: None,
            requests: RefCell::default(),
        }
    }

    pub fn dataset(len: usize, declare_total: bool) -> Self {
        Self {
            mode: Mode::Dataset(len),
            total_count: declare_total.then_some(len as u64),
            fail_at: None,
            requests: RefCell::default(),
        }
    }

    /// The request with this (zero based) index answers with `status`.
    pub fn failing_at(mut self, request: usize, status: StatusCode) -> Self {
        self.fail_at = Some((request, status));
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    pub fn offsets(&self) -> Vec<usize> {
        self.requests.borrow().iter().map(|r| r.offset).collect()
    }

    fn features(&self, n: usize, limit: usize, offset: usize) -> Vec<Feature> {
        match &self.mode {
            Mode::Scripted(sizes) => {
                let start: usize = sizes.iter().take(n).sum();
                let size = sizes.get(n).copied().unwrap_or(0);
                (start..start + size).map(pand_feature).collect()
            }
            Mode::Dataset(len) => (offset.min(*len)..(offset + limit).min(*len))
                .map(pand_feature)
                .collect(),
        }
    }
}

#[async_trait(?Send)]
impl PageSource for MockPages {
    async fn fetch_page(
        &self,
        base: &Url,
        limit: usize,
        offset: usize,
    ) -> Result<Page, FetchError> {
        let n = {
            let mut requests = self.requests.borrow_mut();
            requests.push(Request {
                base: base.clone(),
                limit,
                offset,
            });
            requests.len() - 1
        };

        if let Some((at, status)) = self.fail_at {
            if at == n {
                return Err(FetchError::Status {
                    status,
                    url: base.to_string(),
                });
            }
        }

        Ok(Page {
            features: self.features(n, limit, offset),
            total_count: self.total_count,
        })
    }
}
