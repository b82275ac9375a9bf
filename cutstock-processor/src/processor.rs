use crate::envelope::{ErrorKind, RequestEnvelope, ResponseEnvelope, Route};
use crate::record::{ListQuery, RecordRequest, RecordStore};
use anyhow::{Context, Result, anyhow};
use cutopt::config::CutOptConfig;
use cutopt::run::{run_bar, run_plane};
use cutstock::CutError;
use cutstock::probs::bar::io::ext_repr::ExtBarRequest;
use cutstock::probs::plane::io::ext_repr::ExtPlaneRequest;
use log::{debug, error, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::{Semaphore, broadcast, mpsc};
use tokio::task::JoinSet;

/// Default bound on the number of requests processed at the same time
pub const DEFAULT_MAX_CONCURRENT: usize = 20;

/// Serialized parts of a finished solve
struct Solved {
    data: Value,
    summary: Value,
    unplaced: Value,
}

impl Solved {
    fn new(data: &impl Serialize, summary: &impl Serialize, unplaced: &impl Serialize) -> Result<Self> {
        Ok(Self {
            data: serde_json::to_value(data)?,
            summary: serde_json::to_value(summary)?,
            unplaced: serde_json::to_value(unplaced)?,
        })
    }
}

/// Dispatches request envelopes to the solvers and the record store.
/// Every processed request results in exactly one response on the output channel.
#[derive(Clone)]
pub struct CutProcessor {
    store: Arc<dyn RecordStore>,
    config: CutOptConfig,
    output: mpsc::UnboundedSender<ResponseEnvelope>,
}

impl CutProcessor {
    pub fn new(
        store: Arc<dyn RecordStore>,
        config: CutOptConfig,
        output: mpsc::UnboundedSender<ResponseEnvelope>,
    ) -> Self {
        Self {
            store,
            config,
            output,
        }
    }

    fn emit(&self, response: ResponseEnvelope) -> Result<()> {
        debug!(
            "[PROC] emitting response: id={}, ok={}",
            response.id, response.ok
        );
        self.output
            .send(response)
            .map_err(|_| anyhow!("response channel closed"))
    }

    /// Processes a single request line.
    /// A response is emitted for every line, including unparsable ones.
    /// Returns an error only if the line was not a valid envelope or the response could not be emitted.
    pub async fn process_message(&self, line: &str) -> Result<()> {
        let request: RequestEnvelope = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                let error_msg = format!(
                    "failed to parse request envelope: {}. Line (first 200 chars): {}",
                    e,
                    line.chars().take(200).collect::<String>()
                );
                error!("[PROC] {}", error_msg);
                //answer under the request id if one can still be recovered
                let id = serde_json::from_str::<Value>(line)
                    .ok()
                    .and_then(|v| v.get("id").and_then(|id| id.as_str()).map(String::from))
                    .unwrap_or_default();
                self.emit(ResponseEnvelope::failure(id, ErrorKind::Malformed, &error_msg))?;
                return Err(anyhow!(error_msg));
            }
        };

        info!(
            "[PROC] processing request: id={}, route={}",
            request.id, request.route
        );

        let (response, archive) = self.handle(&request).await;
        if let Some(kind) = response.error_kind() {
            warn!("[PROC] request {} failed ({:?})", request.id, kind);
        }
        self.emit(response)?;

        if let Some(record) = archive {
            match self.store.save(record) {
                Ok(record_id) => info!("[PROC] archived request {} as record {}", request.id, record_id),
                Err(e) => error!("[PROC] failed to archive request {}: {:#}", request.id, e),
            }
        }
        Ok(())
    }

    /// Produces the response to a request, and the record to archive once the response is out
    async fn handle(&self, request: &RequestEnvelope) -> (ResponseEnvelope, Option<RecordRequest>) {
        let Some(route) = Route::parse(&request.route) else {
            let response = ResponseEnvelope::failure(
                &request.id,
                ErrorKind::NotFound,
                format!("no such route: {}", request.route),
            );
            return (response, None);
        };

        match route {
            Route::CutBar => {
                self.solve(request, "bar", |req: &ExtBarRequest, config| {
                    let run = run_bar(req, config)?;
                    let sol = &run.ext_solution;
                    Solved::new(&sol.plans, &sol.summary, &sol.unplaced)
                })
                .await
            }
            Route::CutPlane => {
                self.solve(request, "plane", |req: &ExtPlaneRequest, config| {
                    let run = run_plane(req, config)?;
                    let sol = &run.ext_solution;
                    Solved::new(&sol.bins, &sol.summary, &sol.unplaced)
                })
                .await
            }
            Route::RecordAdd => (self.add_record(request), None),
            Route::RecordList => (self.list_records(request), None),
            Route::RecordDelete(id) => (self.delete_record(request, &id), None),
        }
    }

    async fn solve<R, F>(
        &self,
        request: &RequestEnvelope,
        record_type: &str,
        run: F,
    ) -> (ResponseEnvelope, Option<RecordRequest>)
    where
        R: DeserializeOwned + Send + 'static,
        F: FnOnce(&R, &CutOptConfig) -> Result<Solved> + Send + 'static,
    {
        let ext_request = match parse_body::<R>(request) {
            Ok(r) => r,
            Err(response) => return (response, None),
        };

        //solves are CPU bound, keep them off the async workers
        let config = self.config;
        let outcome = tokio::task::spawn_blocking(move || run(&ext_request, &config))
            .await
            .context("solver task did not complete");

        let solved = match outcome {
            Ok(Ok(solved)) => solved,
            Ok(Err(e)) => {
                let kind = match e.downcast_ref::<CutError>() {
                    Some(cut_err) if cut_err.is_validation() => ErrorKind::Validation,
                    _ => ErrorKind::Internal,
                };
                return (ResponseEnvelope::failure(&request.id, kind, format!("{e:#}")), None);
            }
            Err(e) => {
                let response =
                    ResponseEnvelope::failure(&request.id, ErrorKind::Internal, format!("{e:#}"));
                return (response, None);
            }
        };

        let record = RecordRequest {
            record_type: record_type.to_string(),
            request: request.body.to_string(),
            response: json!({
                "data": solved.data,
                "summary": solved.summary,
                "unplaced": solved.unplaced,
            })
            .to_string(),
            name: request.name.clone().unwrap_or_else(|| request.id.clone()),
        };

        let response = ResponseEnvelope {
            summary: Some(solved.summary),
            unplaced: Some(solved.unplaced),
            ..ResponseEnvelope::success(&request.id, solved.data)
        };
        (response, Some(record))
    }

    fn add_record(&self, request: &RequestEnvelope) -> ResponseEnvelope {
        let record = match parse_body::<RecordRequest>(request) {
            Ok(r) => r,
            Err(response) => return response,
        };
        match self.store.save(record) {
            Ok(record_id) => ResponseEnvelope::success(&request.id, Value::String(record_id)),
            Err(e) => ResponseEnvelope::failure(&request.id, ErrorKind::Internal, format!("{e:#}")),
        }
    }

    fn list_records(&self, request: &RequestEnvelope) -> ResponseEnvelope {
        let query = if request.body.is_null() {
            ListQuery::default()
        } else {
            match parse_body::<ListQuery>(request) {
                Ok(q) => q,
                Err(response) => return response,
            }
        };
        if query.page.current == 0 || query.page.size == 0 {
            return ResponseEnvelope::failure(
                &request.id,
                ErrorKind::Validation,
                format!(
                    "page selection is 1-based and non-empty, got current={}, size={}",
                    query.page.current, query.page.size
                ),
            );
        }

        let page = self
            .store
            .find(&query.filter, query.page)
            .and_then(|page| Ok(serde_json::to_value(page)?));
        match page {
            Ok(page) => ResponseEnvelope::success(&request.id, page),
            Err(e) => ResponseEnvelope::failure(&request.id, ErrorKind::Internal, format!("{e:#}")),
        }
    }

    fn delete_record(&self, request: &RequestEnvelope, record_id: &str) -> ResponseEnvelope {
        match self.store.delete(record_id) {
            Ok(deleted) => ResponseEnvelope::success(&request.id, Value::Bool(deleted)),
            Err(e) => ResponseEnvelope::failure(&request.id, ErrorKind::Internal, format!("{e:#}")),
        }
    }

    /// Reads request lines from `input` until it is exhausted or a shutdown signal arrives,
    /// processing up to `max_concurrent` of them at the same time.
    /// Requests still in flight are completed before returning.
    pub async fn listen_and_process<I>(
        &self,
        input: I,
        max_concurrent: usize,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<()>
    where
        I: AsyncBufRead + Unpin,
    {
        info!(
            "[PROC] listening for requests (max {} concurrent)",
            max_concurrent
        );

        let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
        let mut tasks = JoinSet::new();
        let mut lines = input.lines();

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("[PROC] received shutdown signal");
                    break;
                }
                line = lines.next_line() => {
                    let Some(line) = line.context("failed to read request line")? else {
                        info!("[PROC] input closed");
                        break;
                    };
                    if line.trim().is_empty() {
                        continue;
                    }

                    //waits while max_concurrent requests are in flight
                    let permit = semaphore
                        .clone()
                        .acquire_owned()
                        .await
                        .context("request semaphore closed")?;
                    let processor = self.clone();
                    tasks.spawn(async move {
                        let _permit = permit;
                        if let Err(e) = processor.process_message(&line).await {
                            error!("[PROC] error during request processing: {:#}", e);
                        }
                    });
                }
            }

            while let Some(joined) = tasks.try_join_next() {
                if let Err(e) = joined {
                    error!("[PROC] request task failed: {}", e);
                }
            }
        }

        debug!("[PROC] waiting for {} in-flight requests", tasks.len());
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                error!("[PROC] request task failed: {}", e);
            }
        }

        info!("[PROC] worker exiting gracefully");
        Ok(())
    }
}

fn parse_body<T: DeserializeOwned>(request: &RequestEnvelope) -> Result<T, ResponseEnvelope> {
    serde_json::from_value(request.body.clone()).map_err(|e| {
        ResponseEnvelope::failure(
            &request.id,
            ErrorKind::Malformed,
            format!("invalid body for {}: {}", request.route, e),
        )
    })
}
