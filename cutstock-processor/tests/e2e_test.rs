use cutstock_processor::record::{PageRequest, RecordFilter};
use cutstock_processor::{CutProcessor, ErrorKind, MemoryRecordStore, RecordStore, ResponseEnvelope};
use cutopt::config::CutOptConfig;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::sync::{broadcast, mpsc};
use tokio_test::assert_ok;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn asset(name: &str) -> Value {
    let path = format!("{}/../assets/{}", env!("CARGO_MANIFEST_DIR"), name);
    let text = std::fs::read_to_string(&path).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn line(id: &str, route: &str, body: Value) -> String {
    json!({ "id": id, "route": route, "body": body }).to_string()
}

/// Feeds all lines through a fresh processor and collects the responses by request id
async fn process_all(
    store: Arc<MemoryRecordStore>,
    lines: &[String],
) -> HashMap<String, ResponseEnvelope> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let processor = CutProcessor::new(store, CutOptConfig::default(), tx);
    let (_shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);

    let input = lines.join("\n");
    assert_ok!(
        processor
            .listen_and_process(BufReader::new(input.as_bytes()), 4, shutdown_rx)
            .await
    );
    drop(processor);

    let mut responses = HashMap::new();
    while let Some(response) = rx.recv().await {
        responses.insert(response.id.clone(), response);
    }
    responses
}

#[tokio::test]
async fn solves_every_asset_and_archives_them() {
    init_logger();
    let store = Arc::new(MemoryRecordStore::new());

    let lines = vec![
        line("profiles", "/cut/bar", asset("bar_profiles.json")),
        line("uniform", "/cut/bar", asset("bar_uniform.json")),
        line("cabinet", "/cut/plane", asset("plane_cabinet.json")),
        line("sheet", "/cut/plane", asset("plane_default_sheet.json")),
    ];
    let responses = process_all(store.clone(), &lines).await;
    assert_eq!(responses.len(), 4);

    for (id, response) in &responses {
        assert!(response.ok, "request {id} failed: {:?}", response.error);
        assert!(response.summary.is_some());
        assert!(response.unplaced.is_some());
    }

    let uniform = responses["uniform"].data.as_ref().unwrap();
    assert_eq!(uniform[0]["cuts"], json!([5.0, 5.0]));
    assert_eq!(uniform[1]["cuts"], json!([3.0]));
    assert_eq!(uniform[1]["used"], json!(3.0));
    assert_eq!(uniform[1]["remaining"], json!(7.0));

    for id in ["cabinet", "sheet"] {
        for bin in responses[id].data.as_ref().unwrap().as_array().unwrap() {
            let (w, h) = (
                bin["materialWidth"].as_f64().unwrap(),
                bin["materialHeight"].as_f64().unwrap(),
            );
            for piece in bin["pieces"].as_array().unwrap() {
                let x = piece["x"].as_f64().unwrap();
                let y = piece["y"].as_f64().unwrap();
                assert!(x >= 0.0 && x + piece["w"].as_f64().unwrap() <= w + 1e-9);
                assert!(y >= 0.0 && y + piece["h"].as_f64().unwrap() <= h + 1e-9);
            }
        }
    }

    //archival happens after each response, all of them are done once the processor returns
    let archived = store
        .find(&RecordFilter::default(), PageRequest { current: 1, size: 10 })
        .unwrap();
    assert_eq!(archived.total, 4);
    let bar_records = store
        .find(
            &RecordFilter {
                record_type: Some("bar".to_string()),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .unwrap();
    assert_eq!(bar_records.total, 2);
    assert!(bar_records.records.iter().all(|r| r.code.starts_with("BAR-")));

    let uniform_record = store
        .find(
            &RecordFilter {
                name: Some("uniform".to_string()),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .unwrap();
    let archived_response: Value = serde_json::from_str(&uniform_record.records[0].response).unwrap();
    assert_eq!(&archived_response["data"], uniform);
}

#[tokio::test]
async fn identical_requests_yield_identical_data() {
    init_logger();
    let store = Arc::new(MemoryRecordStore::new());

    let body = asset("plane_cabinet.json");
    let lines = vec![
        line("first", "/cut/plane", body.clone()),
        line("second", "/cut/plane", body),
    ];
    let responses = process_all(store, &lines).await;

    assert_eq!(responses["first"].data, responses["second"].data);
    assert_eq!(responses["first"].unplaced, responses["second"].unplaced);
}

#[tokio::test]
async fn infeasible_piece_is_reported_not_dropped() {
    init_logger();
    let store = Arc::new(MemoryRecordStore::new());

    let body = json!({
        "items": [{ "label": "panel", "width": 6, "height": 4 }],
        "materials": [{ "name": "offcut", "width": 5, "height": 5, "availableCount": 3 }]
    });
    let responses = process_all(store, &[line("p", "/cut/plane", body)]).await;

    let response = &responses["p"];
    assert!(response.ok);
    assert_eq!(response.data, Some(json!([])));
    let unplaced = response.unplaced.as_ref().unwrap();
    assert_eq!(unplaced[0]["label"], json!("panel"));
    assert_eq!(unplaced[0]["reason"], json!("infeasible"));
}

#[tokio::test]
async fn record_lifecycle_over_the_wire() {
    init_logger();
    let store = Arc::new(MemoryRecordStore::new());

    let add = json!({ "type": "bar", "request": "{}", "response": "[]", "name": "kitchen" });
    let responses = process_all(store.clone(), &[line("add", "/cutRecord/add", add)]).await;
    let id = responses["add"].data.as_ref().unwrap().as_str().unwrap().to_string();

    let lines = vec![
        line("list", "/cutRecord/list", json!({ "name": "kit", "current": 1, "size": 5 })),
        line("missing", "/cutRecord/list", json!({ "type": "plane", "current": 1, "size": 5 })),
    ];
    let responses = process_all(store.clone(), &lines).await;
    let page = responses["list"].data.as_ref().unwrap();
    assert_eq!(page["total"], json!(1));
    assert_eq!(page["records"][0]["id"], json!(id));
    assert_eq!(page["records"][0]["code"], json!("BAR-000001"));
    assert_eq!(responses["missing"].data.as_ref().unwrap()["total"], json!(0));

    let delete_route = format!("/cutRecord/delete/{id}");
    let responses = process_all(store.clone(), &[line("del", &delete_route, Value::Null)]).await;
    assert_eq!(responses["del"].data, Some(json!(true)));
    let responses = process_all(store, &[line("del", &delete_route, Value::Null)]).await;
    assert_eq!(responses["del"].data, Some(json!(false)));
}

#[tokio::test]
async fn bad_requests_get_typed_errors() {
    init_logger();
    let store = Arc::new(MemoryRecordStore::new());

    let lines = vec![
        line(
            "weight",
            "/cut/bar",
            json!({ "items": [1], "newMaterialLength": 10, "utilizationWeight": 2 }),
        ),
        line("shape", "/cut/bar", json!({ "items": {} })),
        line("route", "/cut/cube", json!({})),
        r#"{"id":"envelope"}"#.to_string(),
    ];
    let responses = process_all(store.clone(), &lines).await;

    assert_eq!(responses["weight"].error_kind(), Some(ErrorKind::Validation));
    assert_eq!(responses["shape"].error_kind(), Some(ErrorKind::Malformed));
    assert_eq!(responses["route"].error_kind(), Some(ErrorKind::NotFound));
    assert_eq!(responses["envelope"].error_kind(), Some(ErrorKind::Malformed));

    let archived = store
        .find(&RecordFilter::default(), PageRequest::default())
        .unwrap();
    assert_eq!(archived.total, 0);
}
