//! Integration tests for the qsim HTTP API.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use qsim_adapter_sim::SimulatorConfig;
use qsim_hal::{
    BackendInfo, Counts, ExecutionResult, HalError, HalResult, HardwareProvider, JobId, JobStatus,
    SubmitOptions,
};
use qsim_ir::Circuit;
use qsim_server::{AppState, ServerConfig, create_router};
use serde_json::{Value, json};

// ============================================================================
// Test helpers
// ============================================================================

/// In-memory provider with one device and two known jobs.
#[derive(Default)]
struct MockProvider {
    submissions: Mutex<Vec<(String, usize, SubmitOptions)>>,
}

#[async_trait]
impl HardwareProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list_backends(&self) -> HalResult<Vec<BackendInfo>> {
        Ok(vec![
            BackendInfo::quantum("mock_device", 5)
                .with_description("Mock device")
                .with_status("active"),
        ])
    }

    async fn submit(
        &self,
        backend: &str,
        circuit: &Circuit,
        options: &SubmitOptions,
    ) -> HalResult<JobId> {
        self.submissions.lock().unwrap().push((
            backend.to_string(),
            circuit.num_qubits(),
            *options,
        ));
        Ok(JobId::new("job-42"))
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        match job_id.0.as_str() {
            "done" => Ok(JobStatus::Completed),
            "queued" => Ok(JobStatus::Queued),
            other => Err(HalError::JobNotFound(other.to_string())),
        }
    }

    async fn result(&self, _job_id: &JobId) -> HalResult<ExecutionResult> {
        let counts: Counts = [("00".to_string(), 510), ("11".to_string(), 514)]
            .into_iter()
            .collect();
        Ok(ExecutionResult::new(counts, 1024))
    }
}

/// Provider whose listing always fails.
struct OfflineProvider;

#[async_trait]
impl HardwareProvider for OfflineProvider {
    fn name(&self) -> &str {
        "offline"
    }

    async fn list_backends(&self) -> HalResult<Vec<BackendInfo>> {
        Err(HalError::BackendUnavailable("maintenance".into()))
    }

    async fn submit(&self, _: &str, _: &Circuit, _: &SubmitOptions) -> HalResult<JobId> {
        Err(HalError::BackendUnavailable("maintenance".into()))
    }

    async fn status(&self, _: &JobId) -> HalResult<JobStatus> {
        Err(HalError::BackendUnavailable("maintenance".into()))
    }

    async fn result(&self, _: &JobId) -> HalResult<ExecutionResult> {
        Err(HalError::BackendUnavailable("maintenance".into()))
    }
}

fn test_config() -> ServerConfig {
    ServerConfig {
        simulator: SimulatorConfig::default().with_seed(7),
        ..ServerConfig::default()
    }
}

fn test_state() -> AppState {
    AppState::with_config(test_config())
}

fn test_server(state: AppState) -> TestServer {
    TestServer::new(create_router(Arc::new(state))).expect("test server")
}

fn bell_request(backend: &str, shots: i64) -> Value {
    json!({
        "circuit": {
            "numQubits": 2,
            "gates": [
                {"name": "cx", "qubits": [0, 1], "position": 1},
                {"name": "h", "qubits": [0], "position": 0}
            ]
        },
        "options": {"backend": backend, "shots": shots}
    })
}

fn re(value: &Value) -> f64 {
    value["re"].as_f64().unwrap()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_returns_ok() {
    let server = test_server(test_state());
    let response = server.get("/api/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

// ============================================================================
// Simulation
// ============================================================================

#[tokio::test]
async fn test_run_bell_circuit() {
    let server = test_server(test_state());
    let response = server
        .post("/api/circuits/run")
        .json(&bell_request("simulator", 1000))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["circuit"]["numQubits"], 2);
    assert_eq!(body["circuit"]["depth"], 2);

    let sv = body["statevector"].as_array().unwrap();
    assert_eq!(sv.len(), 4);
    let half = std::f64::consts::FRAC_1_SQRT_2;
    assert!((re(&sv[0]) - half).abs() < 1e-9);
    assert!((re(&sv[3]) - half).abs() < 1e-9);
    assert!(re(&sv[1]).abs() < 1e-9);

    let counts = body["counts"].as_object().unwrap();
    let total: u64 = counts.values().map(|v| v.as_u64().unwrap()).sum();
    assert_eq!(total, 1000);
    assert!(counts.keys().all(|k| k == "00" || k == "11"));

    let rho = body["density_matrix"].as_array().unwrap();
    assert_eq!(rho.len(), 4);
    assert!((re(&rho[0][3]) - 0.5).abs() < 1e-9);

    let reduced = body["reduced_density_matrices"].as_array().unwrap();
    assert_eq!(reduced.len(), 2);
    assert!((re(&reduced[0][0][0]) - 0.5).abs() < 1e-9);
    assert!(re(&reduced[0][0][1]).abs() < 1e-9);

    for entropy in body["entanglement_entropies"].as_array().unwrap() {
        assert!((entropy.as_f64().unwrap() - 1.0).abs() < 1e-9);
    }
    assert!(body.get("warnings").is_none());
}

#[tokio::test]
async fn test_run_defaults_to_simulator_and_1024_shots() {
    let server = test_server(test_state());
    let response = server
        .post("/api/circuits/run")
        .json(&json!({
            "circuit": {
                "numQubits": 1,
                "initialStates": ["1"],
                "gates": [{"name": "measure", "qubits": [0], "position": 0}]
            }
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["counts"], json!({"1": 1024}));
    assert_eq!(body["entanglement_entropies"], json!([0.0]));
}

#[tokio::test]
async fn test_all_local_backends_simulate() {
    let server = test_server(test_state());
    for backend in ["simulator", "statevector_simulator", "qasm_simulator"] {
        let response = server
            .post("/api/circuits/run")
            .json(&bell_request(backend, 10))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert!(body["statevector"].is_array(), "{backend}");
    }
}

#[tokio::test]
async fn test_unknown_gate_returns_400() {
    let server = test_server(test_state());
    let response = server
        .post("/api/circuits/run")
        .json(&json!({
            "circuit": {
                "numQubits": 1,
                "gates": [{"name": "rx", "qubits": [0], "position": 0}]
            }
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("rx"));
}

#[tokio::test]
async fn test_out_of_range_qubit_returns_400() {
    let server = test_server(test_state());
    let response = server
        .post("/api/circuits/run")
        .json(&json!({
            "circuit": {
                "numQubits": 2,
                "gates": [{"name": "cx", "qubits": [0, 2], "position": 0}]
            }
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_zero_qubits_returns_400() {
    let server = test_server(test_state());
    let response = server
        .post("/api/circuits/run")
        .json(&json!({"circuit": {"numQubits": 0, "gates": []}}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bad_options_return_400() {
    let server = test_server(test_state());
    for options in [
        json!({"shots": 0}),
        json!({"shots": -3}),
        json!({"optimization_level": 4}),
    ] {
        let response = server
            .post("/api/circuits/run")
            .json(&json!({
                "circuit": {"numQubits": 1, "gates": []},
                "options": options
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_capacity_exceeded_returns_400() {
    let server = test_server(test_state());
    let response = server
        .post("/api/circuits/run")
        .json(&json!({"circuit": {"numQubits": 13, "gates": []}}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("density matrix"));
}

#[tokio::test]
async fn test_malformed_json_returns_400_with_error_body() {
    let server = test_server(test_state());
    let response = server
        .post("/api/circuits/run")
        .json(&json!({"circuit": {"numQubits": "two"}}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].is_string());
}

// ============================================================================
// Hardware path
// ============================================================================

#[tokio::test]
async fn test_unknown_backend_without_provider_returns_400() {
    let server = test_server(test_state());
    let response = server
        .post("/api/circuits/run")
        .json(&bell_request("ibm_torino", 100))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"], "Backend ibm_torino not available");
}

#[tokio::test]
async fn test_submit_to_provider_backend() {
    let provider = Arc::new(MockProvider::default());
    let server = test_server(test_state().with_provider(provider.clone()));

    let mut request = bell_request("mock_device", 256);
    request["options"]["optimization_level"] = json!(3);
    let response = server.post("/api/circuits/run").json(&request).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(
        body,
        json!({"job_id": "job-42", "status": "submitted", "backend": "mock_device"})
    );

    let submissions = provider.submissions.lock().unwrap();
    assert_eq!(submissions.len(), 1);
    let (backend, width, options) = &submissions[0];
    assert_eq!(backend, "mock_device");
    assert_eq!(*width, 2);
    assert_eq!(options.shots, 256);
    assert_eq!(options.optimization_level, 3);
}

#[tokio::test]
async fn test_backend_unknown_to_provider_returns_400() {
    let server = test_server(test_state().with_provider(Arc::new(MockProvider::default())));
    let response = server
        .post("/api/circuits/run")
        .json(&bell_request("other_device", 100))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_provider_outage_returns_502() {
    let server = test_server(test_state().with_provider(Arc::new(OfflineProvider)));
    let response = server
        .post("/api/circuits/run")
        .json(&bell_request("mock_device", 100))
        .await;
    response.assert_status(StatusCode::BAD_GATEWAY);
}

// ============================================================================
// Backends
// ============================================================================

#[tokio::test]
async fn test_list_local_backends() {
    let server = test_server(test_state());
    let response = server.get("/api/backends").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let backends = body.as_array().unwrap();
    let names: Vec<&str> = backends
        .iter()
        .map(|b| b["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        ["simulator", "statevector_simulator", "qasm_simulator"]
    );
    assert!(backends.iter().all(|b| b["type"] == "simulator"));
    assert!(backends.iter().all(|b| b["num_qubits"] == 12));
}

#[tokio::test]
async fn test_advertised_width_runs() {
    let config = ServerConfig {
        simulator: SimulatorConfig::default()
            .with_seed(7)
            .with_max_density_qubits(6),
        ..ServerConfig::default()
    };
    let server = test_server(AppState::with_config(config));
    let body: Value = server.get("/api/backends").await.json();
    let width = body[0]["num_qubits"].as_u64().unwrap() as usize;
    assert_eq!(width, 6);

    let gates: Vec<Value> = (0..width)
        .map(|q| json!({"name": "h", "qubits": [q], "position": q}))
        .collect();
    let response = server
        .post("/api/circuits/run")
        .json(&json!({
            "circuit": {"numQubits": width, "gates": gates},
            "options": {"shots": 8}
        }))
        .await;
    response.assert_status_ok();

    let run: Value = response.json();
    assert_eq!(run["circuit"]["numQubits"], width);
    assert_eq!(run["reduced_density_matrices"].as_array().unwrap().len(), width);

    let response = server
        .post("/api/circuits/run")
        .json(&json!({"circuit": {"numQubits": width + 1, "gates": []}}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_includes_provider_backends() {
    let server = test_server(test_state().with_provider(Arc::new(MockProvider::default())));
    let body: Value = server.get("/api/backends").await.json();
    let backends = body.as_array().unwrap();
    assert_eq!(backends.len(), 4);
    assert_eq!(backends[3]["name"], "mock_device");
    assert_eq!(backends[3]["type"], "quantum");
    assert_eq!(backends[3]["status"], "active");
}

#[tokio::test]
async fn test_provider_listing_failure_keeps_local_backends() {
    let server = test_server(test_state().with_provider(Arc::new(OfflineProvider)));
    let response = server.get("/api/backends").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 3);
}

// ============================================================================
// Jobs
// ============================================================================

#[tokio::test]
async fn test_job_without_provider_returns_400() {
    let server = test_server(test_state());
    let response = server.get("/api/jobs/abc").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"], "Hardware provider not available");
}

#[tokio::test]
async fn test_completed_job_returns_counts() {
    let server = test_server(test_state().with_provider(Arc::new(MockProvider::default())));
    let response = server.get("/api/jobs/done").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["job_id"], "done");
    assert_eq!(body["status"], "DONE");
    assert_eq!(body["counts"], json!({"00": 510, "11": 514}));
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_pending_job_returns_message() {
    let server = test_server(test_state().with_provider(Arc::new(MockProvider::default())));
    let body: Value = server.get("/api/jobs/queued").await.json();
    assert_eq!(body["status"], "QUEUED");
    assert!(body["message"].is_string());
    assert!(body.get("counts").is_none());
}

#[tokio::test]
async fn test_missing_job_returns_404() {
    let server = test_server(test_state().with_provider(Arc::new(MockProvider::default())));
    let response = server.get("/api/jobs/nope").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

// ============================================================================
// Code generation
// ============================================================================

#[tokio::test]
async fn test_code_generation() {
    let server = test_server(test_state());
    let response = server
        .post("/api/circuits/code")
        .json(&json!({
            "circuit": {
                "numQubits": 2,
                "initialStates": ["1", "0"],
                "gates": [
                    {"name": "cx", "qubits": [0, 1], "position": 1},
                    {"name": "h", "qubits": [0], "position": 0}
                ]
            }
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let code = body["code"].as_str().unwrap();
    assert!(code.contains("QuantumCircuit(2"));
    let h = code.find("qc.h(0)").unwrap();
    let cx = code.find("qc.cx(0, 1)").unwrap();
    assert!(h < cx);
}

#[tokio::test]
async fn test_code_generation_rejects_invalid_circuit() {
    let server = test_server(test_state());
    let response = server
        .post("/api/circuits/code")
        .json(&json!({"circuit": {"numQubits": 1, "gates": [{"name": "cx", "qubits": [0]}]}}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}
