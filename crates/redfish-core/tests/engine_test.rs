use async_trait::async_trait;
use redfish_core::mock::MockTransport;
use redfish_core::{
    writable_fields, BoxError, CancellationToken, Client, ClientConfig, Entity, ErrorKind, Link,
    Method, Request, Resource, Response, Transport, UpdateOutcome, WritableField,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

// --- Test Resource ---

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Sensor {
    #[serde(skip)]
    entity: Entity,
    user_label: Option<String>,
    reading: Option<f64>,
    #[serde(rename = "Links", default)]
    links: SensorLinks,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct SensorLinks {
    chassis: Link,
}

impl Resource for Sensor {
    const KIND: &'static str = "Sensor";

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn writable_fields() -> &'static [WritableField<Self>] {
        writable_fields!(Sensor { "UserLabel" => value(user_label) })
    }
}

impl Sensor {
    async fn chassis(&self) -> redfish_core::Result<Option<Sensor>> {
        self.entity.follow(&self.links.chassis).await
    }
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Summary {
    #[serde(skip)]
    entity: Entity,
    total: Option<u32>,
}

impl Resource for Summary {
    const KIND: &'static str = "Summary";

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

const SENSORS: &str = "/redfish/v1/Chassis/1/Sensors";

fn sensor_uri(n: usize) -> String {
    format!("{SENSORS}/{n}")
}

fn sensor_body(n: usize) -> serde_json::Value {
    json!({
        "@odata.id": sensor_uri(n),
        "@odata.etag": format!("\"{n}\""),
        "Id": n.to_string(),
        "Reading": n as f64 * 1.5,
        "UserLabel": format!("sensor-{n}")
    })
}

fn member(n: usize) -> serde_json::Value {
    json!({ "@odata.id": sensor_uri(n) })
}

// --- Collection Engine ---

#[tokio::test]
async fn test_pages_are_concatenated_in_order() {
    let mock = MockTransport::new();
    mock.expect_get(SENSORS).return_json(json!({
        "Members": [member(0), member(1), member(2)],
        "Members@odata.count": 5,
        "Members@odata.nextLink": format!("{SENSORS}?$skip=3")
    }));
    mock.expect_get(format!("{SENSORS}?$skip=3")).return_json(json!({
        "Members": [member(3), member(4)]
    }));
    for n in 0..5 {
        mock.expect_get(sensor_uri(n)).return_json(sensor_body(n));
    }

    let client = Client::new(mock.clone());
    let batch = client.enumerate::<Sensor>(SENSORS).await.unwrap();

    assert!(batch.is_complete());
    let ids: Vec<&str> = batch.iter().map(|s| s.entity().id()).collect();
    assert_eq!(ids, vec!["0", "1", "2", "3", "4"]);
    assert!(batch.iter().all(|s| s.entity().is_attached()));
    mock.verify();
}

#[tokio::test]
async fn test_self_referencing_next_link_is_a_cycle() {
    let mock = MockTransport::new();
    mock.expect_get(SENSORS).return_json(json!({
        "Members": [member(0)],
        "Members@odata.nextLink": SENSORS
    }));

    let client = Client::new(mock.clone());
    let err = client.enumerate::<Sensor>(SENSORS).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::PaginationCycle);
    assert_eq!(err.uri(), Some(SENSORS));
    assert!(mock.call_count() <= 2);
}

#[tokio::test]
async fn test_longer_cycle_is_detected() {
    let mock = MockTransport::new();
    let second = format!("{SENSORS}?page=2");
    mock.expect_get(SENSORS).return_json(json!({
        "Members": [], "Members@odata.nextLink": second.clone()
    }));
    mock.expect_get(second.clone()).return_json(json!({
        "Members": [], "Members@odata.nextLink": SENSORS
    }));

    let client = Client::new(mock);
    let err = client.enumerate::<Sensor>(SENSORS).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PaginationCycle);
}

#[tokio::test]
async fn test_member_not_found_is_reported() {
    let mock = MockTransport::new();
    mock.expect_get(SENSORS).return_json(json!({
        "Members": [member(0), member(1), member(2), member(3)]
    }));
    for n in [0, 1, 3] {
        mock.expect_get(sensor_uri(n)).return_json(sensor_body(n));
    }
    mock.expect_get(sensor_uri(2)).return_status(404);

    let client = Client::new(mock.clone());
    let batch = client.enumerate::<Sensor>(SENSORS).await.unwrap();

    assert_eq!(batch.len(), 3);
    assert_eq!(batch.failures.len(), 1);
    assert_eq!(batch.failures.kind_of(&sensor_uri(2)), Some(ErrorKind::NotFound));
    let ids: Vec<&str> = batch.iter().map(|s| s.entity().id()).collect();
    assert_eq!(ids, vec!["0", "1", "3"]);
}

#[tokio::test]
async fn test_first_page_failure_is_an_error() {
    let mock = MockTransport::new();
    mock.expect_get(SENSORS).return_status(503);

    let client = Client::new(mock);
    let err = client.enumerate::<Sensor>(SENSORS).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_later_page_failure_keeps_earlier_members() {
    let mock = MockTransport::new();
    let second = format!("{SENSORS}?$skip=1");
    mock.expect_get(SENSORS).return_json(json!({
        "Members": [member(0)], "Members@odata.nextLink": second.clone()
    }));
    mock.expect_get(second.clone()).return_status(500);
    mock.expect_get(sensor_uri(0)).return_json(sensor_body(0));

    let client = Client::new(mock);
    let batch = client.enumerate::<Sensor>(SENSORS).await.unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch.failures.kind_of(&second), Some(ErrorKind::Transport));
}

#[tokio::test]
async fn test_expanded_and_legacy_members() {
    let mock = MockTransport::new();
    mock.expect_get(SENSORS).return_json(json!({
        "Members": [sensor_body(0)],
        "Links": { "Members": [member(1)] }
    }));
    mock.expect_get(sensor_uri(1)).return_json(sensor_body(1));

    let client = Client::new(mock.clone());
    let batch = client.enumerate::<Sensor>(SENSORS).await.unwrap();

    assert_eq!(batch.len(), 2);
    assert_eq!(batch.items[0].entity().self_uri(), sensor_uri(0));
    assert_eq!(batch.items[0].reading, Some(0.0));
    assert_eq!(mock.calls_with(Method::Get).len(), 2);
    mock.verify();
}

#[tokio::test]
async fn test_unusable_member_entries_are_reported() {
    let mock = MockTransport::new();
    mock.expect_get(SENSORS).return_json(json!({
        "Members": [member(0), {"Name": "no link"}, 7]
    }));
    mock.expect_get(sensor_uri(0)).return_json(sensor_body(0));

    let client = Client::new(mock.clone());
    let batch = client.enumerate::<Sensor>(SENSORS).await.unwrap();

    assert_eq!(batch.len(), 1);
    assert!(!batch.is_complete());
    assert_eq!(batch.failures.len(), 2);
    let slot = format!("{SENSORS}#/Members/1");
    assert_eq!(batch.failures.kind_of(&slot), Some(ErrorKind::Decode));
    assert_eq!(
        batch.failures.kind_of(&format!("{SENSORS}#/Members/2")),
        Some(ErrorKind::Decode)
    );
    assert_eq!(mock.call_count(), 2);
}

#[tokio::test]
async fn test_cancellation_returns_partial_results() {
    let mock = MockTransport::new();
    mock.expect_get(SENSORS).return_json(json!({
        "Members": (0..5).map(member).collect::<Vec<_>>()
    }));
    mock.expect_get(sensor_uri(0)).return_json(sensor_body(0));
    for n in 1..5 {
        mock.expect_get(sensor_uri(n))
            .with_delay(Duration::from_secs(30))
            .return_json(sensor_body(n));
    }

    let token = CancellationToken::new();
    let config = ClientConfig::default().with_max_concurrency(8);
    let client = Client::with_config(mock, config).with_cancellation(token.clone());
    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let batch = client.enumerate::<Sensor>(SENSORS).await.unwrap();
    canceller.await.unwrap();

    assert_eq!(batch.len(), 1);
    assert_eq!(batch.items[0].entity().id(), "0");
    assert_eq!(batch.failures.len(), 4);
    for n in 1..5 {
        assert_eq!(batch.failures.kind_of(&sensor_uri(n)), Some(ErrorKind::Cancelled));
    }
}

/// Counts how many requests are in flight at once.
#[derive(Clone, Default)]
struct Gauge {
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

#[async_trait]
impl Transport for Gauge {
    async fn send(&self, request: Request) -> Result<Response, BoxError> {
        if request.uri == SENSORS {
            return Ok(Response::json(
                200,
                &json!({ "Members": (0..10).map(member).collect::<Vec<_>>() }),
            ));
        }
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(10)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        let n: usize = request.uri.rsplit('/').next().unwrap_or("0").parse()?;
        Ok(Response::json(200, &sensor_body(n)))
    }
}

#[tokio::test]
async fn test_fan_out_is_bounded() {
    let gauge = Gauge::default();
    let client = Client::with_config(gauge.clone(), ClientConfig::default().with_max_concurrency(2));

    let batch = client.enumerate::<Sensor>(SENSORS).await.unwrap();

    assert_eq!(batch.len(), 10);
    assert!(gauge.peak.load(Ordering::SeqCst) <= 2);
    let ids: Vec<String> = batch.iter().map(|s| s.entity().id().to_string()).collect();
    let expected: Vec<String> = (0..10).map(|n| n.to_string()).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_get_many_reports_per_uri() {
    let mock = MockTransport::new();
    mock.expect_get(sensor_uri(0)).return_json(sensor_body(0));
    mock.expect_get(sensor_uri(1)).return_status(404);

    let client = Client::new(mock);
    let batch = client
        .get_many::<Sensor>(vec![sensor_uri(0), sensor_uri(1)])
        .await;
    assert_eq!(batch.len(), 1);
    assert_eq!(batch.failures.kind_of(&sensor_uri(1)), Some(ErrorKind::NotFound));
    assert_eq!(
        batch.into_result().unwrap_err().kind(),
        ErrorKind::PartialFailure
    );
}

// --- Link Resolver ---

#[tokio::test]
async fn test_absent_link_makes_no_traffic() {
    let mock = MockTransport::new();
    mock.expect_get(sensor_uri(0)).return_json(sensor_body(0));

    let client = Client::new(mock.clone());
    let sensor: Sensor = client.get(&sensor_uri(0)).await.unwrap();

    assert!(sensor.chassis().await.unwrap().is_none());
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_accessors_do_not_cache() {
    let mock = MockTransport::new();
    let mut body = sensor_body(0);
    body["Links"] = json!({"Chassis": {"@odata.id": sensor_uri(9)}});
    mock.expect_get(sensor_uri(0)).return_json(body);
    mock.expect_get(sensor_uri(9)).return_json(sensor_body(9));
    mock.expect_get(sensor_uri(9)).return_status(404);

    let client = Client::new(mock.clone());
    let sensor: Sensor = client.get(&sensor_uri(0)).await.unwrap();

    let first = sensor.chassis().await.unwrap().unwrap();
    assert_eq!(first.entity().id(), "9");
    let second = sensor.chassis().await.unwrap_err();
    assert_eq!(second.kind(), ErrorKind::NotFound);
    mock.verify();
}

// --- Differential Updater ---

#[tokio::test]
async fn test_update_sends_if_match_and_only_changed_fields() {
    let mock = MockTransport::new();
    mock.expect_get(sensor_uri(0)).return_json(sensor_body(0));
    mock.expect_patch(sensor_uri(0))
        .return_response(Response::new(204).with_header("ETag", "\"1\""));

    let client = Client::new(mock.clone());
    let mut sensor: Sensor = client.get(&sensor_uri(0)).await.unwrap();
    sensor.user_label = Some("renamed".into());
    sensor.reading = Some(99.0);

    let outcome = sensor.update().await.unwrap();
    assert_eq!(
        outcome,
        UpdateOutcome::Patched {
            fields: vec!["UserLabel".into()]
        }
    );

    let patch = &mock.calls_with(Method::Patch)[0];
    assert_eq!(patch.json(), Some(json!({"UserLabel": "renamed"})));
    assert_eq!(patch.headers.get("If-Match"), Some("\"0\""));
    assert_eq!(sensor.entity().etag(), "\"1\"");

    // The merged baseline makes the next update a no-op.
    assert_eq!(sensor.update().await.unwrap(), UpdateOutcome::Unchanged);
    assert_eq!(mock.call_count(), 2);
}

#[tokio::test]
async fn test_update_adopts_returned_representation() {
    let mock = MockTransport::new();
    mock.expect_get(sensor_uri(0)).return_json(sensor_body(0));
    let mut returned = sensor_body(0);
    returned["UserLabel"] = json!("server-side");
    returned["@odata.etag"] = json!("\"5\"");
    mock.expect_patch(sensor_uri(0)).return_json(returned.clone());

    let client = Client::new(mock.clone());
    let mut sensor: Sensor = client.get(&sensor_uri(0)).await.unwrap();
    sensor.user_label = Some("mine".into());
    sensor.update().await.unwrap();

    assert_eq!(sensor.entity().etag(), "\"5\"");
    assert_eq!(
        sensor.entity().raw_original(),
        Some(returned.to_string().as_bytes())
    );
    // Baseline now says "server-side", so "mine" is still a pending change.
    mock.expect_patch(sensor_uri(0)).return_status(204);
    sensor.update().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn test_body_etag_wins_over_header_after_patch() {
    let mock = MockTransport::new();
    mock.expect_get(sensor_uri(0)).return_json(sensor_body(0));
    let mut returned = sensor_body(0);
    returned["UserLabel"] = json!("renamed");
    returned["@odata.etag"] = json!("\"body\"");
    mock.expect_patch(sensor_uri(0)).return_response(
        Response::json(200, &returned).with_header("ETag", "\"header\""),
    );

    let client = Client::new(mock);
    let mut sensor: Sensor = client.get(&sensor_uri(0)).await.unwrap();
    sensor.user_label = Some("renamed".into());
    sensor.update().await.unwrap();

    assert_eq!(sensor.entity().etag(), "\"body\"");
}

#[tokio::test]
async fn test_precondition_failure_keeps_baseline() {
    let mock = MockTransport::new();
    mock.expect_get(sensor_uri(0)).return_json(sensor_body(0));
    mock.expect_patch(sensor_uri(0)).return_status(412);

    let client = Client::new(mock.clone());
    let mut sensor: Sensor = client.get(&sensor_uri(0)).await.unwrap();
    let baseline = sensor.entity().raw_original().map(<[u8]>::to_vec);
    sensor.user_label = Some("stale".into());

    let err = sensor.update().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PreconditionFailed);
    assert_eq!(err.uri(), Some(sensor_uri(0).as_str()));
    assert_eq!(sensor.entity().raw_original().map(<[u8]>::to_vec), baseline);
    assert_eq!(sensor.entity().etag(), "\"0\"");
}

#[tokio::test]
async fn test_etag_workarounds() {
    let mock = MockTransport::new();
    mock.expect_get(sensor_uri(0)).return_json(sensor_body(0));
    mock.expect_patch(sensor_uri(0)).return_status(204);

    let config = ClientConfig::default().with_strip_etag_quotes(true);
    let client = Client::with_config(mock.clone(), config);
    let mut sensor: Sensor = client.get(&sensor_uri(0)).await.unwrap();
    sensor.user_label = Some("x".into());
    sensor.update().await.unwrap();

    let patch = &mock.calls_with(Method::Patch)[0];
    assert_eq!(patch.headers.get("If-Match"), Some("0"));
}

#[tokio::test]
async fn test_update_without_self_uri() {
    let mut sensor = Sensor::load(br#"{"Id": "0", "UserLabel": "a"}"#).unwrap();
    sensor.user_label = Some("b".into());
    let err = sensor.update().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingSelfUri);
}

#[tokio::test]
async fn test_refresh_reloads_from_self_uri() {
    let mock = MockTransport::new();
    mock.expect_get(sensor_uri(0)).return_json(sensor_body(0));
    let mut newer = sensor_body(0);
    newer["Reading"] = json!(42.0);
    mock.expect_get(sensor_uri(0)).return_json(newer);

    let client = Client::new(mock.clone());
    let mut sensor: Sensor = client.get(&sensor_uri(0)).await.unwrap();
    sensor.refresh().await.unwrap();

    assert_eq!(sensor.reading, Some(42.0));
    mock.verify();
}

#[tokio::test]
async fn test_update_on_read_only_kind_is_unsupported() {
    let mock = MockTransport::new();
    mock.expect_get("/redfish/v1/Summary").return_json(json!({
        "@odata.id": "/redfish/v1/Summary",
        "Id": "Summary",
        "Total": 3
    }));

    let client = Client::new(mock.clone());
    let mut summary: Summary = client.get("/redfish/v1/Summary").await.unwrap();
    summary.total = Some(4);

    let err = summary.update().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpdateUnsupported);
    assert_eq!(err.uri(), Some("/redfish/v1/Summary"));
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_update_without_original_is_unsupported() {
    let mock = MockTransport::new();
    let mut sensor = Sensor {
        user_label: Some("built locally".into()),
        ..Sensor::default()
    };
    sensor.attach(Client::new(mock.clone()));

    let err = sensor.update().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpdateUnsupported);
    assert_eq!(mock.call_count(), 0);
}

// --- Action Dispatcher ---

const WITH_ACTION: &str = r##"{
    "@odata.id": "/redfish/v1/Chassis/1/Sensors/0",
    "Id": "0",
    "Actions": {
        "#Sensor.ResetMetrics": {"target": "/redfish/v1/Chassis/1/Sensors/0/Actions/Sensor.ResetMetrics"}
    }
}"##;

#[tokio::test]
async fn test_action_without_self_uri() {
    let mock = MockTransport::new();
    let mut sensor = Sensor::load(
        br##"{"Id": "0", "Actions": {"#Sensor.ResetMetrics": {"target": "/redfish/v1/x"}}}"##,
    )
    .unwrap();
    sensor.attach(Client::new(mock.clone()));

    let err = sensor
        .entity()
        .invoke_empty("#Sensor.ResetMetrics")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingSelfUri);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_action_on_detached_resource() {
    let mock = MockTransport::new();
    let sensor = Sensor::load(WITH_ACTION.as_bytes()).unwrap();

    let err = sensor
        .entity()
        .invoke_empty("#Sensor.ResetMetrics")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Detached);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_attached_action_posts_to_target() {
    let mock = MockTransport::new();
    mock.expect_post("/redfish/v1/Chassis/1/Sensors/0/Actions/Sensor.ResetMetrics")
        .return_status(204);
    let mut sensor = Sensor::load(WITH_ACTION.as_bytes()).unwrap();
    sensor.attach(Client::new(mock.clone()));

    sensor
        .entity()
        .invoke_empty("#Sensor.ResetMetrics")
        .await
        .unwrap();
    assert_eq!(mock.calls()[0].body, None);
    mock.verify();
}

