//! # Collection Engine
//!
//! Enumerates a Redfish collection into a typed, ordered sequence.
//!
//! ```text
//!  GET page 1 ──► Members ──┐
//!  GET nextLink ─► Members ─┤ discovery order
//!  ...                      ▼
//!            [m0, m1, m2, m3, ...] ──► bounded fan-out (Semaphore) ──► re-sort ──► Batch
//! ```
//!
//! - Members are read from `Members` or, for older services, `Links.Members`.
//! - `Members@odata.nextLink` is followed until absent or empty. Revisiting a
//!   page URI (a self-referencing cursor included) fails with `PaginationCycle`.
//! - Members that arrive expanded (they carry an `Id`) are decoded in place,
//!   without a member GET.
//! - Member GETs run concurrently, at most `max_concurrency` at a time, on
//!   tasks joined before return. Results are re-ordered to discovery order.
//! - A member failure lands in the [`FailureReport`]; it never fails the batch.
//!   Entries without a usable URI are reported under `<page>#/Members/<n>`.
//! - After cancellation no new fetch starts. Members that did not complete
//!   are reported as `Cancelled`; completed ones are still returned.

use crate::client::Client;
use crate::entity::{decode, nullable, Resource};
use crate::error::{ErrorKind, RedfishError, Result};
use crate::failure::FailureReport;
use serde::Deserialize;
use serde_json::value::RawValue;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Items that loaded plus the URIs that did not.
#[derive(Debug)]
pub struct Batch<R> {
    pub items: Vec<R>,
    pub failures: FailureReport,
}

impl<R> Default for Batch<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            failures: FailureReport::new(),
        }
    }
}

impl<R> Batch<R> {
    /// True when no URI failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.items.iter()
    }

    /// Treats any failure as fatal.
    pub fn into_result(self) -> Result<Vec<R>> {
        if self.failures.is_empty() {
            Ok(self.items)
        } else {
            Err(RedfishError::PartialFailure(self.failures))
        }
    }
}

impl<R> IntoIterator for Batch<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[derive(Deserialize)]
struct Page {
    #[serde(rename = "Members", default, deserialize_with = "nullable")]
    members: Vec<Box<RawValue>>,
    #[serde(rename = "Members@odata.count", default)]
    count: Option<u64>,
    #[serde(rename = "Members@odata.nextLink", default, deserialize_with = "nullable")]
    next_link: String,
    #[serde(rename = "Links", default, deserialize_with = "nullable")]
    links: PageLinks,
}

#[derive(Default, Deserialize)]
struct PageLinks {
    #[serde(rename = "Members", default, deserialize_with = "nullable")]
    members: Vec<Box<RawValue>>,
}

#[derive(Deserialize)]
struct MemberRef {
    #[serde(rename = "@odata.id", default, deserialize_with = "nullable")]
    odata_id: String,
    #[serde(default, deserialize_with = "nullable")]
    href: String,
    #[serde(rename = "Id", default)]
    id: Option<serde_json::Value>,
}

pub(crate) enum Member {
    Link(String),
    Embedded { uri: String, raw: Box<RawValue> },
}

impl Member {
    /// Reads one `Members` entry. `slot` names the entry in failure reports
    /// when it carries no usable URI.
    fn discover(raw: Box<RawValue>, slot: &str) -> Result<Self> {
        let bytes = raw.get().as_bytes();
        let entry: MemberRef =
            serde_json::from_str(raw.get()).map_err(|e| RedfishError::decode(slot, &e, bytes))?;
        let uri = if entry.odata_id.is_empty() {
            entry.href
        } else {
            entry.odata_id
        };
        if uri.is_empty() {
            let e = <serde_json::Error as serde::de::Error>::missing_field("@odata.id");
            return Err(RedfishError::decode(slot, &e, bytes));
        }
        Ok(match entry.id {
            Some(_) => Member::Embedded { uri, raw },
            None => Member::Link(uri),
        })
    }
}

#[tracing::instrument(skip(client), fields(kind = R::KIND))]
pub(crate) async fn enumerate<R: Resource>(client: &Client, uri: &str) -> Result<Batch<R>> {
    let mut failures = FailureReport::new();
    let mut members = Vec::new();
    let mut visited = HashSet::new();
    let mut next = uri.to_string();

    loop {
        if !visited.insert(next.clone()) {
            warn!(page = %next, "Pagination cycle");
            return Err(RedfishError::PaginationCycle { uri: next });
        }
        let first = visited.len() == 1;
        let page = match fetch_page(client, &next).await {
            Ok(page) => page,
            Err(e) if first && e.kind() != ErrorKind::Cancelled => return Err(e),
            Err(e) => {
                warn!(page = %next, error = %e, "Stopping pagination");
                failures.insert(next.clone(), e);
                break;
            }
        };
        debug!(page = %next, members = page.members.len(), count = ?page.count, "Page");

        for (index, raw) in page.members.into_iter().chain(page.links.members).enumerate() {
            let slot = format!("{next}#/Members/{index}");
            match Member::discover(raw, &slot) {
                Ok(member) => members.push(member),
                Err(e) => {
                    warn!(%slot, error = %e, "Unusable member entry");
                    failures.insert(slot, e);
                }
            }
        }
        if page.next_link.is_empty() {
            break;
        }
        next = page.next_link;
    }

    Ok(fan_out(client, members, failures).await)
}

async fn fetch_page(client: &Client, uri: &str) -> Result<Page> {
    let response = client.fetch(uri).await?;
    serde_json::from_slice(&response.body).map_err(|e| RedfishError::decode(uri, &e, &response.body))
}

/// Loads every member, at most `max_concurrency` in flight, preserving input order.
pub(crate) async fn fan_out<R: Resource>(
    client: &Client,
    members: Vec<Member>,
    mut failures: FailureReport,
) -> Batch<R> {
    let semaphore = Arc::new(Semaphore::new(client.config().concurrency()));
    let mut tasks = JoinSet::new();
    let mut uris = Vec::with_capacity(members.len());
    let mut outcomes: Vec<Option<Result<R>>> = Vec::with_capacity(members.len());

    for (index, member) in members.into_iter().enumerate() {
        match member {
            Member::Embedded { uri, raw } => {
                let outcome = decode::<R>(raw.get().as_bytes(), &uri, None).map(|mut item| {
                    item.attach(client.clone());
                    item
                });
                uris.push(uri);
                outcomes.push(Some(outcome));
            }
            Member::Link(uri) => {
                let client = client.clone();
                let semaphore = semaphore.clone();
                let target = uri.clone();
                tasks.spawn(async move {
                    let outcome = match semaphore.acquire_owned().await {
                        Ok(_permit) if client.cancellation().is_cancelled() => {
                            Err(RedfishError::Cancelled { uri: target })
                        }
                        Ok(_permit) => client.get::<R>(&target).await,
                        Err(_) => Err(RedfishError::Cancelled { uri: target }),
                    };
                    (index, outcome)
                });
                uris.push(uri);
                outcomes.push(None);
            }
        }
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, outcome)) => outcomes[index] = Some(outcome),
            Err(e) => warn!(error = %e, "Member task aborted"),
        }
    }

    let mut items = Vec::with_capacity(uris.len());
    for (uri, outcome) in uris.into_iter().zip(outcomes) {
        match outcome {
            Some(Ok(item)) => items.push(item),
            Some(Err(e)) => {
                warn!(%uri, error = %e, "Member failed");
                failures.insert(uri, e);
            }
            None if client.cancellation().is_cancelled() => {
                failures.insert(uri.clone(), RedfishError::Cancelled { uri });
            }
            None => {
                let error = RedfishError::Transport {
                    uri: uri.clone(),
                    status: None,
                    message: "member fetch task aborted".to_string(),
                    extended_info: Vec::new(),
                };
                failures.insert(uri, error);
            }
        }
    }
    debug!(items = items.len(), failures = failures.len(), "Batch complete");
    Batch { items, failures }
}

/// Bulk resolution of known member URIs.
pub(crate) async fn load_all<R: Resource>(client: &Client, uris: Vec<String>) -> Batch<R> {
    let members = uris.into_iter().map(Member::Link).collect();
    fan_out(client, members, FailureReport::new()).await
}
