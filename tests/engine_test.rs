use async_trait::async_trait;
use cubesat_node::core::{Sensor, SensorError, Transmitter};
use cubesat_node::{Device, FileTransmitter, Hub, Module, NodeError, TelemetryEngine};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// Reads an increasing counter so each cycle is distinguishable.
struct Counter(AtomicU32);

impl Sensor for Counter {
    fn initialize(&mut self, _settings: &serde_json::Value) -> Result<(), SensorError> {
        Ok(())
    }

    fn read_sensor(&mut self) -> Result<String, SensorError> {
        Ok(self.0.fetch_add(1, Ordering::SeqCst).to_string())
    }
}

#[derive(Clone, Default)]
struct RecordingTransmitter {
    sent: Arc<Mutex<Vec<(String, bool)>>>,
}

#[async_trait]
impl Transmitter for RecordingTransmitter {
    async fn transmit(&self, stream: &str, is_hub: bool) -> cubesat_node::Result<()> {
        self.sent.lock().unwrap().push((stream.to_string(), is_hub));
        Ok(())
    }
}

struct DownLink;

#[async_trait]
impl Transmitter for DownLink {
    async fn transmit(&self, _stream: &str, _is_hub: bool) -> cubesat_node::Result<()> {
        Err(NodeError::TransmissionError {
            message: "radio off".to_string(),
        })
    }
}

fn counter_module(is_hub: bool) -> Module {
    let device = Device::new(1, "COUNTER", Box::new(Counter(AtomicU32::new(0))));
    if is_hub {
        Hub::new(1, vec![device]).into()
    } else {
        Module::new(false, 2, vec![device])
    }
}

#[tokio::test]
async fn test_run_cycle_transmits_fresh_stream() {
    let transmitter = RecordingTransmitter::default();
    let engine = TelemetryEngine::new(counter_module(false), transmitter.clone());

    assert_eq!(engine.run_cycle().await.unwrap(), "2:1:0:;");
    assert_eq!(engine.run_cycle().await.unwrap(), "2:1:1:;");
    assert_eq!(engine.data_stream(), "2:1:1:;");

    let sent = transmitter.sent.lock().unwrap().clone();
    assert_eq!(
        sent,
        vec![("2:1:0:;".to_string(), false), ("2:1:1:;".to_string(), false)]
    );
}

#[tokio::test]
async fn test_run_stops_after_max_cycles() {
    let transmitter = RecordingTransmitter::default();
    let engine = TelemetryEngine::new(counter_module(true), transmitter.clone());

    let cycles = engine.run(Duration::from_millis(1), Some(3)).await.unwrap();
    assert_eq!(cycles, 3);

    let sent = transmitter.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 3);
    assert!(sent.iter().all(|(_, is_hub)| *is_hub));
    assert_eq!(sent[2].0, "1:1:2:;");
}

#[tokio::test]
async fn test_transmission_failure_does_not_stop_the_loop() {
    let engine = TelemetryEngine::new(counter_module(false), DownLink);

    assert!(engine.run_cycle().await.is_err());

    let cycles = engine.run(Duration::from_millis(1), Some(2)).await.unwrap();
    assert_eq!(cycles, 2);

    let module = engine.into_module();
    assert_eq!(module.data_stream(), "2:1:2:;");
}

#[tokio::test]
async fn test_streams_land_in_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("streams.log");
    let engine = TelemetryEngine::new(
        counter_module(false),
        Box::new(FileTransmitter::new(&path)) as Box<dyn Transmitter>,
    );

    engine.run(Duration::from_millis(1), Some(2)).await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "2:1:0:;\n2:1:1:;\n");
}

#[test]
fn test_refresh_is_serialized_across_threads() {
    let engine = Arc::new(TelemetryEngine::new(
        counter_module(false),
        RecordingTransmitter::default(),
    ));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            std::thread::spawn(move || {
                (0..25).map(|_| engine.refresh().0).collect::<Vec<_>>()
            })
        })
        .collect();

    let mut readings: Vec<u32> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .map(|stream| {
            let record = cubesat_node::core::ModuleRecord::parse(&stream).unwrap();
            record.devices[0].datums[0].parse().unwrap()
        })
        .collect();
    readings.sort_unstable();

    assert_eq!(readings, (0..100).collect::<Vec<u32>>());
}

#[test]
fn test_blocking_cycle_with_tokio_test() {
    let engine = TelemetryEngine::new(counter_module(false), RecordingTransmitter::default());
    let stream = tokio_test::block_on(engine.run_cycle()).unwrap();
    assert_eq!(stream, "2:1:0:;");
}
