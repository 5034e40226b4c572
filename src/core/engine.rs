use crate::core::module::Module;
use crate::domain::ports::Transmitter;
use crate::utils::error::Result;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Drives refresh cycles and hands each stream to the transmitter.
///
/// The module sits behind a mutex so a refresh cycle is one atomic unit of
/// work even when the engine is shared between tasks.
pub struct TelemetryEngine<T: Transmitter> {
    module: Mutex<Module>,
    transmitter: T,
}

impl<T: Transmitter> TelemetryEngine<T> {
    pub fn new(module: Module, transmitter: T) -> Self {
        Self {
            module: Mutex::new(module),
            transmitter,
        }
    }

    // The stream is rebuilt from scratch on every refresh, so a guard
    // poisoned by a panicking caller is still safe to reuse.
    fn lock(&self) -> MutexGuard<'_, Module> {
        self.module.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Runs one refresh cycle and returns a copy of the new stream.
    pub fn refresh(&self) -> (String, bool) {
        let mut module = self.lock();
        let stream = module.refresh_data_stream().to_string();
        (stream, module.check_is_hub())
    }

    /// Latest stream without triggering a refresh.
    pub fn data_stream(&self) -> String {
        self.lock().data_stream().to_string()
    }

    pub async fn run_cycle(&self) -> Result<String> {
        let (stream, is_hub) = self.refresh();
        self.transmitter.transmit(&stream, is_hub).await?;
        Ok(stream)
    }

    /// Refreshes every `interval` until `max_cycles` have run or Ctrl-C.
    ///
    /// A failed transmission is logged and the loop carries on; the next
    /// cycle produces a fresh stream anyway. Returns the number of cycles run.
    pub async fn run(&self, interval: Duration, max_cycles: Option<u64>) -> Result<u64> {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let mut cycles = 0u64;

        tracing::info!(?interval, ?max_cycles, "Starting telemetry loop");

        while max_cycles.map_or(true, |max| cycles < max) {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupt received, stopping telemetry loop");
                    break;
                }
            }

            match self.run_cycle().await {
                Ok(stream) => tracing::debug!(cycle = cycles, %stream, "cycle transmitted"),
                Err(e) => tracing::warn!(
                    cycle = cycles,
                    error = %e,
                    "transmission failed: {}",
                    e.recovery_suggestion()
                ),
            }
            cycles += 1;
        }

        tracing::info!(cycles, "Telemetry loop finished");
        Ok(cycles)
    }

    pub fn into_module(self) -> Module {
        self.module
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
