use crate::core::codec;
use crate::core::discriminators::Discriminators;
use crate::domain::model::DeviceId;
use crate::domain::ports::{Sensor, SensorError};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// One physical sensor attached to a module.
///
/// Owns the online/offline status and the last serialized fragment. The
/// status starts `true` and is only ever cleared by a failed read; nothing in
/// this type sets it back automatically.
pub struct Device {
    device_id: DeviceId,
    device_type: String,
    status: bool,
    data_stream: String,
    sensor: Box<dyn Sensor>,
}

impl Device {
    pub fn new(device_id: DeviceId, device_type: impl Into<String>, sensor: Box<dyn Sensor>) -> Self {
        Self {
            device_id,
            device_type: device_type.into(),
            status: true,
            data_stream: String::new(),
            sensor,
        }
    }

    /// (Re)configures the underlying transducer and sets the status to
    /// whether the hardware came up. Returns the new status.
    pub fn initialize(&mut self, settings: &serde_json::Value) -> bool {
        match self.sensor.initialize(settings) {
            Ok(()) => {
                tracing::debug!(device_id = self.device_id, device_type = %self.device_type, "device initialized");
                self.status = true;
            }
            Err(e) => {
                tracing::warn!(
                    device_id = self.device_id,
                    device_type = %self.device_type,
                    error = %e,
                    "device initialization failed, marking offline"
                );
                self.status = false;
            }
        }
        self.status
    }

    /// Performs one physical reading.
    ///
    /// A panic inside the driver is reported as [`SensorError::Panicked`];
    /// a reading holding a device or module discriminator is rejected.
    pub fn read_sensor(&mut self) -> Result<String, SensorError> {
        let sensor = &mut self.sensor;
        let reading = panic::catch_unwind(AssertUnwindSafe(|| sensor.read_sensor()))
            .map_err(|payload| SensorError::Panicked(panic_message(payload.as_ref())))??;

        if codec::breaks_fragment(&reading) {
            return Err(SensorError::MalformedReading { reading });
        }
        Ok(reading)
    }

    /// Reads the sensor and stores `reading + ':'` as the fragment.
    ///
    /// On failure the device goes offline, the fragment is cleared and the
    /// fault is handed back for the caller to log; it is never propagated as
    /// a panic.
    pub fn refresh_data_stream(&mut self) -> Result<&str, SensorError> {
        match self.read_sensor() {
            Ok(mut reading) => {
                reading.push(Discriminators::DEVICE);
                self.data_stream = reading;
                Ok(&self.data_stream)
            }
            Err(e) => {
                self.status = false;
                self.data_stream.clear();
                Err(e)
            }
        }
    }

    pub fn device_id(&self) -> DeviceId {
        self.device_id
    }

    pub fn device_type(&self) -> &str {
        &self.device_type
    }

    pub fn status(&self) -> bool {
        self.status
    }

    pub fn set_status(&mut self, status: bool) {
        self.status = status;
    }

    pub fn data_stream(&self) -> &str {
        &self.data_stream
    }
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("device_id", &self.device_id)
            .field("device_type", &self.device_type)
            .field("status", &self.status)
            .field("data_stream", &self.data_stream)
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Scripted {
        readings: VecDeque<Result<String, SensorError>>,
        init_ok: bool,
    }

    impl Scripted {
        fn new(readings: Vec<Result<String, SensorError>>) -> Self {
            Self {
                readings: readings.into(),
                init_ok: true,
            }
        }
    }

    impl Sensor for Scripted {
        fn initialize(&mut self, _settings: &serde_json::Value) -> Result<(), SensorError> {
            if self.init_ok {
                Ok(())
            } else {
                Err(SensorError::InitFailed("no ack on bus".into()))
            }
        }

        fn read_sensor(&mut self) -> Result<String, SensorError> {
            self.readings
                .pop_front()
                .unwrap_or(Err(SensorError::ReadFailed("script exhausted".into())))
        }
    }

    struct Panicking;

    impl Sensor for Panicking {
        fn initialize(&mut self, _settings: &serde_json::Value) -> Result<(), SensorError> {
            Ok(())
        }

        fn read_sensor(&mut self) -> Result<String, SensorError> {
            panic!("i2c bus locked up")
        }
    }

    #[test]
    fn test_new_device_is_online_with_empty_fragment() {
        let device = Device::new(4, "SCRIPTED", Box::new(Scripted::new(vec![])));
        assert!(device.status());
        assert_eq!(device.data_stream(), "");
        assert_eq!(device.device_id(), 4);
        assert_eq!(device.device_type(), "SCRIPTED");
    }

    #[test]
    fn test_refresh_appends_device_discriminator() {
        let mut device = Device::new(
            1,
            "SCRIPTED",
            Box::new(Scripted::new(vec![Ok("20.5,101.3,55.0".into())])),
        );
        assert_eq!(device.refresh_data_stream().unwrap(), "20.5,101.3,55.0:");
        assert_eq!(device.data_stream(), "20.5,101.3,55.0:");
        assert!(device.status());
    }

    #[test]
    fn test_failed_read_marks_offline_and_clears_fragment() {
        let mut device = Device::new(
            1,
            "SCRIPTED",
            Box::new(Scripted::new(vec![
                Ok("1.0".into()),
                Err(SensorError::ReadFailed("crc mismatch".into())),
            ])),
        );
        device.refresh_data_stream().unwrap();

        let err = device.refresh_data_stream().unwrap_err();
        assert_eq!(err, SensorError::ReadFailed("crc mismatch".into()));
        assert!(!device.status());
        assert_eq!(device.data_stream(), "");
    }

    #[test]
    fn test_panicking_driver_is_contained() {
        let mut device = Device::new(2, "PANIC", Box::new(Panicking));
        let err = device.refresh_data_stream().unwrap_err();
        assert_eq!(err, SensorError::Panicked("i2c bus locked up".into()));
        assert!(!device.status());
    }

    #[test]
    fn test_reading_with_discriminator_is_rejected() {
        let mut device = Device::new(
            3,
            "SCRIPTED",
            Box::new(Scripted::new(vec![Ok("12:30".into())])),
        );
        assert!(matches!(
            device.refresh_data_stream(),
            Err(SensorError::MalformedReading { .. })
        ));
        assert!(!device.status());
    }

    #[test]
    fn test_initialize_sets_status_from_hardware() {
        let mut sensor = Scripted::new(vec![]);
        sensor.init_ok = false;
        let mut device = Device::new(5, "SCRIPTED", Box::new(sensor));
        assert!(!device.initialize(&serde_json::Value::Null));
        assert!(!device.status());

        device.set_status(true);
        assert!(device.status());
    }
}
