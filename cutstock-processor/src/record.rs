use anyhow::{Result, anyhow};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use slotmap::{DefaultKey, Key, KeyData, SlotMap};
use std::sync::Mutex;

/// Request to archive a request/response pair, as accepted by `/cutRecord/add`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordRequest {
    /// Kind of the archived request, `bar` or `plane` for solves
    #[serde(rename = "type")]
    pub record_type: String,
    /// Serialized request body
    pub request: String,
    /// Serialized response body
    pub response: String,
    #[serde(default)]
    pub name: String,
}

/// An archived request/response pair
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CutRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub request: String,
    pub response: String,
    /// RFC 3339 timestamp of the moment the record was saved
    pub create_time: String,
    /// Human readable code: `<TYPE>-<sequence>`
    pub code: String,
    pub name: String,
}

/// Filter applied by [`RecordStore::find`]. Every present field must match.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordFilter {
    /// Substring of the record name
    #[serde(default)]
    pub name: Option<String>,
    /// Exact record type
    #[serde(default, rename = "type")]
    pub record_type: Option<String>,
    /// Lower bound on the creation time in epoch milliseconds (inclusive)
    #[serde(default)]
    pub start_time: Option<i64>,
    /// Upper bound on the creation time in epoch milliseconds (inclusive)
    #[serde(default)]
    pub end_time: Option<i64>,
}

/// 1-based page selection
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    #[serde(default = "default_current")]
    pub current: usize,
    #[serde(default = "default_size")]
    pub size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            current: default_current(),
            size: default_size(),
        }
    }
}

fn default_current() -> usize {
    1
}

fn default_size() -> usize {
    10
}

/// Body of `/cutRecord/list`: a filter and a page selection side by side
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ListQuery {
    #[serde(flatten)]
    pub filter: RecordFilter,
    #[serde(flatten)]
    pub page: PageRequest,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub records: Vec<T>,
    /// Number of records matching the filter, over all pages
    pub total: usize,
    pub current: usize,
    pub size: usize,
}

/// Persistence boundary for archived solves.
#[cfg_attr(test, mockall::automock)]
pub trait RecordStore: Send + Sync {
    /// Stores a new record and returns its id
    fn save(&self, request: RecordRequest) -> Result<String>;

    /// Returns the requested page of records matching `filter`, newest first
    fn find(&self, filter: &RecordFilter, page: PageRequest) -> Result<Page<CutRecord>>;

    /// Removes the record with the given id, returns false if no such record exists
    fn delete(&self, id: &str) -> Result<bool>;
}

struct StoredRecord {
    seq: u64,
    created: Timestamp,
    request: RecordRequest,
}

#[derive(Default)]
struct RecordTable {
    records: SlotMap<DefaultKey, StoredRecord>,
    next_seq: u64,
}

/// [`RecordStore`] which keeps all records in memory for the lifetime of the process.
#[derive(Default)]
pub struct MemoryRecordStore {
    table: Mutex<RecordTable>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> Result<std::sync::MutexGuard<'_, RecordTable>> {
        self.table
            .lock()
            .map_err(|_| anyhow!("record table lock poisoned"))
    }
}

impl RecordStore for MemoryRecordStore {
    fn save(&self, request: RecordRequest) -> Result<String> {
        let mut table = self.table()?;
        table.next_seq += 1;
        let seq = table.next_seq;
        let key = table.records.insert(StoredRecord {
            seq,
            created: Timestamp::now(),
            request,
        });
        Ok(key_to_id(key))
    }

    fn find(&self, filter: &RecordFilter, page: PageRequest) -> Result<Page<CutRecord>> {
        let table = self.table()?;

        let mut matching = table
            .records
            .iter()
            .filter(|(_, r)| matches(filter, r))
            .collect::<Vec<_>>();
        //newest first, insertion order breaks ties within the same millisecond
        matching.sort_by(|(_, a), (_, b)| b.created.cmp(&a.created).then(b.seq.cmp(&a.seq)));

        let total = matching.len();
        let skip = page.current.saturating_sub(1).saturating_mul(page.size);
        let records = matching
            .into_iter()
            .skip(skip)
            .take(page.size)
            .map(|(key, r)| to_cut_record(key, r))
            .collect();

        Ok(Page {
            records,
            total,
            current: page.current,
            size: page.size,
        })
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let Some(key) = id_to_key(id) else {
            return Ok(false);
        };
        Ok(self.table()?.records.remove(key).is_some())
    }
}

fn matches(filter: &RecordFilter, record: &StoredRecord) -> bool {
    let created_ms = record.created.as_millisecond();
    filter
        .name
        .as_ref()
        .is_none_or(|n| record.request.name.contains(n.as_str()))
        && filter
            .record_type
            .as_ref()
            .is_none_or(|t| &record.request.record_type == t)
        && filter.start_time.is_none_or(|s| created_ms >= s)
        && filter.end_time.is_none_or(|e| created_ms <= e)
}

fn to_cut_record(key: DefaultKey, record: &StoredRecord) -> CutRecord {
    let r = &record.request;
    CutRecord {
        id: key_to_id(key),
        record_type: r.record_type.clone(),
        request: r.request.clone(),
        response: r.response.clone(),
        create_time: record.created.to_string(),
        code: format!("{}-{:06}", r.record_type.to_uppercase(), record.seq),
        name: r.name.clone(),
    }
}

fn key_to_id(key: DefaultKey) -> String {
    key.data().as_ffi().to_string()
}

fn id_to_key(id: &str) -> Option<DefaultKey> {
    let ffi = id.parse::<u64>().ok()?;
    Some(KeyData::from_ffi(ffi).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(record_type: &str, name: &str) -> RecordRequest {
        RecordRequest {
            record_type: record_type.to_string(),
            request: "{}".to_string(),
            response: "[]".to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn save_then_find_returns_newest_first() {
        let store = MemoryRecordStore::new();
        let first = store.save(request("bar", "kitchen")).unwrap();
        let second = store.save(request("plane", "wardrobe")).unwrap();

        let page = store
            .find(&RecordFilter::default(), PageRequest::default())
            .unwrap();
        assert_eq!(page.total, 2);
        let ids = page.records.iter().map(|r| r.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids, vec![second, first]);
        assert_eq!(page.records[0].code, "PLANE-000002");
        assert_eq!(page.records[1].code, "BAR-000001");
        assert!(page.records[0].create_time.parse::<Timestamp>().is_ok());
    }

    #[test]
    fn filters_by_name_substring_and_exact_type() {
        let store = MemoryRecordStore::new();
        store.save(request("bar", "kitchen rails")).unwrap();
        store.save(request("bar", "garage")).unwrap();
        store.save(request("plane", "kitchen doors")).unwrap();

        let filter = RecordFilter {
            name: Some("kitchen".to_string()),
            ..Default::default()
        };
        assert_eq!(store.find(&filter, PageRequest::default()).unwrap().total, 2);

        let filter = RecordFilter {
            name: Some("kitchen".to_string()),
            record_type: Some("bar".to_string()),
            ..Default::default()
        };
        let page = store.find(&filter, PageRequest::default()).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.records[0].name, "kitchen rails");

        let filter = RecordFilter {
            record_type: Some("ba".to_string()),
            ..Default::default()
        };
        assert_eq!(store.find(&filter, PageRequest::default()).unwrap().total, 0);
    }

    #[test]
    fn time_bounds_are_inclusive() {
        let store = MemoryRecordStore::new();
        store.save(request("bar", "a")).unwrap();
        let created = store
            .find(&RecordFilter::default(), PageRequest::default())
            .unwrap()
            .records[0]
            .create_time
            .parse::<Timestamp>()
            .unwrap()
            .as_millisecond();

        let exact = RecordFilter {
            start_time: Some(created),
            end_time: Some(created),
            ..Default::default()
        };
        assert_eq!(store.find(&exact, PageRequest::default()).unwrap().total, 1);

        let later = RecordFilter {
            start_time: Some(created + 1),
            ..Default::default()
        };
        assert_eq!(store.find(&later, PageRequest::default()).unwrap().total, 0);
    }

    #[test]
    fn pages_are_one_based() {
        let store = MemoryRecordStore::new();
        for i in 0..5 {
            store.save(request("bar", &format!("r{i}"))).unwrap();
        }
        let page = |current| {
            store
                .find(&RecordFilter::default(), PageRequest { current, size: 2 })
                .unwrap()
        };
        assert_eq!(page(1).records.len(), 2);
        assert_eq!(page(1).records[0].name, "r4");
        assert_eq!(page(3).records.len(), 1);
        assert_eq!(page(3).records[0].name, "r0");
        assert!(page(4).records.is_empty());
        assert_eq!(page(4).total, 5);
    }

    #[test]
    fn delete_removes_once() {
        let store = MemoryRecordStore::new();
        let id = store.save(request("bar", "a")).unwrap();
        assert!(store.delete(&id).unwrap());
        assert!(!store.delete(&id).unwrap());
        assert!(!store.delete("not-an-id").unwrap());
        assert_eq!(
            store
                .find(&RecordFilter::default(), PageRequest::default())
                .unwrap()
                .total,
            0
        );
    }

    #[test]
    fn list_query_reads_flat_wire_shape() {
        let query: ListQuery = serde_json::from_str(
            r#"{"name":"kit","type":"bar","startTime":0,"current":2,"size":5}"#,
        )
        .unwrap();
        assert_eq!(query.filter.name.as_deref(), Some("kit"));
        assert_eq!(query.filter.record_type.as_deref(), Some("bar"));
        assert_eq!(query.filter.start_time, Some(0));
        assert_eq!(query.filter.end_time, None);
        assert_eq!(query.page, PageRequest { current: 2, size: 5 });
    }
}
