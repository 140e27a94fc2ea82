//! End-to-end checks of the simulator through the `Backend` trait.

use std::f64::consts::PI;

use qhunt_adapter_sim::{SimulatorBackend, Statevector};
use qhunt_hal::{Backend, BackendConfig, BackendFactory, JobStatus};
use qhunt_ir::{Circuit, QubitId};

fn uniform(n: u32) -> Circuit {
    let mut circuit = Circuit::with_size("uniform", n, n);
    for q in 0..n {
        circuit.h(QubitId(q)).unwrap();
    }
    circuit
}

#[tokio::test]
async fn test_backend_behind_trait_object() {
    let backend: Box<dyn Backend> = Box::new(SimulatorBackend::with_seed(3));

    let mut circuit = uniform(2);
    circuit.measure_all().unwrap();

    let job_id = backend.submit(&circuit, 400).await.unwrap();
    assert_eq!(backend.status(&job_id).await.unwrap(), JobStatus::Completed);

    let result = backend.wait(&job_id).await.unwrap();
    assert_eq!(result.counts.total_shots(), 400);
    for key in ["00", "01", "10", "11"] {
        let count = result.counts.get(key);
        assert!(count > 50, "{key} drawn only {count} times");
    }
}

#[tokio::test]
async fn test_factory_seed_is_reproducible() {
    let config = BackendConfig::from_json(r#"{"name": "sim", "seed": 99}"#).unwrap();
    let a = SimulatorBackend::from_config(config.clone()).unwrap();
    let b = SimulatorBackend::from_config(config).unwrap();

    let mut circuit = uniform(4);
    circuit.measure_all().unwrap();

    let ra = a.wait(&a.submit(&circuit, 256).await.unwrap()).await.unwrap();
    let rb = b.wait(&b.submit(&circuit, 256).await.unwrap()).await.unwrap();
    assert_eq!(ra.counts, rb.counts);
}

#[tokio::test]
async fn test_unmeasured_circuit_reads_all_qubits() {
    let backend = SimulatorBackend::new();

    let mut circuit = Circuit::with_size("plain", 2, 0);
    circuit.x(QubitId(1)).unwrap();

    let result = backend
        .wait(&backend.submit(&circuit, 5).await.unwrap())
        .await
        .unwrap();
    assert_eq!(result.counts.get("10"), 5);
}

#[test]
fn test_rz_matches_phase_up_to_global_phase() {
    let mut with_p = uniform(1);
    with_p.p(PI / 3.0, QubitId(0)).unwrap();
    let mut with_rz = uniform(1);
    with_rz.rz(PI / 3.0, QubitId(0)).unwrap();

    let a = Statevector::from_circuit(&with_p);
    let b = Statevector::from_circuit(&with_rz);
    let ratio0 = a.amplitudes()[0] / b.amplitudes()[0];
    let ratio1 = a.amplitudes()[1] / b.amplitudes()[1];
    assert!((ratio0 - ratio1).norm() < 1e-12);
}

#[test]
fn test_toffoli_equals_two_control_mcx() {
    for input in 0..8u32 {
        let mut ccx = Circuit::with_size("ccx", 3, 0);
        let mut mcx = Circuit::with_size("mcx", 3, 0);
        for q in 0..3 {
            if input >> q & 1 == 1 {
                ccx.x(QubitId(q)).unwrap();
                mcx.x(QubitId(q)).unwrap();
            }
        }
        ccx.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();
        mcx.mcx(&[QubitId(0), QubitId(1)], QubitId(2)).unwrap();

        assert_eq!(
            Statevector::from_circuit(&ccx).probabilities(),
            Statevector::from_circuit(&mcx).probabilities()
        );
    }
}
