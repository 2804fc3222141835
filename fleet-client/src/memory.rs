//! In-process double of the fleet API
//!
//! Holds records as JSON, answers `Get` by id or by a simple
//! `field = "value"` where clause, and enforces version tokens on `Set`
//! the way the real service does. Failures and latency can be scripted
//! per call so callers' error and race paths can be exercised.

use crate::{ClientError, ClientResult, FleetApi};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use shared::{Entity, Search};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

/// API method, for call recording and failure scripting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Set,
}

/// One call received by the double
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: Method,
    pub type_name: &'static str,
    pub search: Option<Search>,
}

#[derive(Debug, Default)]
struct Store {
    records: HashMap<&'static str, Vec<Value>>,
    failures: HashMap<(Method, &'static str), VecDeque<String>>,
    delays: VecDeque<Duration>,
    calls: Vec<RecordedCall>,
    next_version: u64,
}

impl Store {
    fn next_version(&mut self) -> String {
        self.next_version += 1;
        format!("{:016x}", self.next_version)
    }

    fn take_failure(&mut self, method: Method, type_name: &'static str) -> Option<ClientError> {
        let message = self.failures.get_mut(&(method, type_name))?.pop_front()?;
        Some(ClientError::Api {
            name: "ScriptedFailure".into(),
            message,
        })
    }
}

/// In-memory fleet API
#[derive(Debug, Clone, Default)]
pub struct InMemoryFleet {
    store: Arc<Mutex<Store>>,
}

impl InMemoryFleet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record as-is; a missing version token is assigned one
    pub fn insert<T: Entity>(&self, record: &T) -> ClientResult<()> {
        let mut value = serde_json::to_value(record)?;
        let mut store = self.store.lock();
        if value.get("version").is_none_or(Value::is_null)
            && let Some(obj) = value.as_object_mut()
        {
            obj.insert("version".into(), Value::String(store.next_version()));
        }
        store.records.entry(T::TYPE_NAME).or_default().push(value);
        Ok(())
    }

    /// Current stored records of `T`
    pub fn records<T: Entity>(&self) -> ClientResult<Vec<T>> {
        let store = self.store.lock();
        store
            .records
            .get(T::TYPE_NAME)
            .map(|values| {
                values
                    .iter()
                    .map(|v| serde_json::from_value(v.clone()))
                    .collect::<Result<Vec<T>, _>>()
            })
            .transpose()
            .map(Option::unwrap_or_default)
            .map_err(Into::into)
    }

    /// Stored record of `T` with the given id
    pub fn record<T: Entity>(&self, id: &str) -> ClientResult<Option<T>> {
        Ok(self
            .records::<T>()?
            .into_iter()
            .find(|r| r.entity_id() == Some(id)))
    }

    /// Simulate another user deleting a record
    pub fn remove<T: Entity>(&self, id: &str) -> bool {
        let mut store = self.store.lock();
        let Some(values) = store.records.get_mut(T::TYPE_NAME) else {
            return false;
        };
        let before = values.len();
        values.retain(|v| id_of(v) != Some(id));
        values.len() != before
    }

    /// Simulate another writer: give the stored record a new version token
    pub fn bump_version<T: Entity>(&self, id: &str) -> bool {
        let mut store = self.store.lock();
        let version = store.next_version();
        let Some(value) = store
            .records
            .get_mut(T::TYPE_NAME)
            .and_then(|values| values.iter_mut().find(|v| id_of(v) == Some(id)))
        else {
            return false;
        };
        value["version"] = Value::String(version);
        true
    }

    /// Make the next `method` call on `T` fail with `message`
    pub fn fail_next<T: Entity>(&self, method: Method, message: impl Into<String>) {
        self.store
            .lock()
            .failures
            .entry((method, T::TYPE_NAME))
            .or_default()
            .push_back(message.into());
    }

    /// Delay the next calls, one duration per call in arrival order
    pub fn delay_next_calls(&self, delays: impl IntoIterator<Item = Duration>) {
        self.store.lock().delays.extend(delays);
    }

    /// Every call received so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.store.lock().calls.clone()
    }

    /// Number of calls of one method
    pub fn call_count(&self, method: Method) -> usize {
        self.store
            .lock()
            .calls
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    /// Record the call and compute its answer at arrival time
    fn receive(
        &self,
        method: Method,
        type_name: &'static str,
        search: Option<&Search>,
    ) -> (Duration, Option<ClientError>) {
        let mut store = self.store.lock();
        store.calls.push(RecordedCall {
            method,
            type_name,
            search: search.cloned(),
        });
        let delay = store.delays.pop_front().unwrap_or_default();
        (delay, store.take_failure(method, type_name))
    }
}

fn id_of(value: &Value) -> Option<&str> {
    value.get("id").and_then(Value::as_str)
}

/// Parse `field = "value"`
fn parse_where_clause(clause: &str) -> ClientResult<(&str, &str)> {
    let invalid = || ClientError::Api {
        name: "InvalidWhereClause".into(),
        message: clause.to_string(),
    };
    let (field, value) = clause.split_once('=').ok_or_else(invalid)?;
    let field = field.trim();
    let value = value
        .trim()
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or_else(invalid)?;
    if field.is_empty() {
        return Err(invalid());
    }
    Ok((field, value))
}

fn matches_search(value: &Value, search: &Search) -> ClientResult<bool> {
    if let Some(id) = &search.id
        && id_of(value) != Some(id.as_str())
    {
        return Ok(false);
    }
    if let Some(clause) = &search.where_clause {
        let (field, expected) = parse_where_clause(clause)?;
        let top = value.get(field).and_then(Value::as_str);
        let nested = value
            .get("details")
            .and_then(|d| d.get(field))
            .and_then(Value::as_str);
        if top != Some(expected) && nested != Some(expected) {
            return Ok(false);
        }
    }
    Ok(true)
}

#[async_trait]
impl FleetApi for InMemoryFleet {
    async fn get<T: Entity>(&self, search: Option<&Search>) -> ClientResult<Vec<T>> {
        let (delay, failure) = self.receive(Method::Get, T::TYPE_NAME, search);

        // Answer reflects the store when the request arrived
        let answer = match failure {
            Some(err) => Err(err),
            None => {
                let store = self.store.lock();
                let mut out = Vec::new();
                for value in store.records.get(T::TYPE_NAME).into_iter().flatten() {
                    if let Some(search) = search
                        && !matches_search(value, search)?
                    {
                        continue;
                    }
                    out.push(serde_json::from_value(value.clone())?);
                }
                Ok(out)
            }
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        answer
    }

    async fn set<T: Entity>(&self, entity: &T) -> ClientResult<()> {
        let (delay, failure) = self.receive(Method::Set, T::TYPE_NAME, None);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = failure {
            return Err(err);
        }

        let id = entity
            .entity_id()
            .ok_or_else(|| ClientError::NotFound(format!("{} without id", T::TYPE_NAME)))?
            .to_string();
        let mut submitted = serde_json::to_value(entity)?;

        let mut store = self.store.lock();
        let version = store.next_version();
        let stored = store
            .records
            .get_mut(T::TYPE_NAME)
            .and_then(|values| values.iter_mut().find(|v| id_of(v) == Some(id.as_str())))
            .ok_or_else(|| ClientError::NotFound(format!("{} {}", T::TYPE_NAME, id)))?;

        if stored.get("version") != submitted.get("version") {
            return Err(ClientError::VersionConflict(format!(
                "{} {} was modified since it was read",
                T::TYPE_NAME,
                id
            )));
        }

        submitted["version"] = Value::String(version);
        *stored = submitted;
        Ok(())
    }
}
