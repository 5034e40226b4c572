use crate::core::discriminators::Discriminators;
use crate::domain::model::{DeviceId, DeviceRecord, ModuleId, ModuleRecord};
use crate::utils::error::{NodeError, Result};
use std::fmt::Display;

/// Joins values with the datum discriminator.
pub fn encode_datums<I>(values: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut out = String::new();
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            out.push(Discriminators::DATUM);
        }
        out.push_str(&value.to_string());
    }
    out
}

/// True when `text` could not be embedded in a device fragment unambiguously.
pub fn breaks_fragment(text: &str) -> bool {
    text.contains(Discriminators::DEVICE) || text.contains(Discriminators::MODULE)
}

fn format_error(message: impl Into<String>) -> NodeError {
    NodeError::StreamFormatError {
        message: message.into(),
    }
}

fn parse_id<T: std::str::FromStr>(what: &str, text: &str) -> Result<T> {
    text.parse()
        .map_err(|_| format_error(format!("{} '{}' is not an integer", what, text)))
}

impl ModuleRecord {
    /// Parses exactly one module stream, e.g. `"7:1:20.5,101.3,55.0:;"`.
    pub fn parse(stream: &str) -> Result<Self> {
        let body = stream
            .strip_suffix(Discriminators::MODULE)
            .ok_or_else(|| format_error("stream does not end with the module discriminator"))?;
        if body.contains(Discriminators::MODULE) {
            return Err(format_error("stream holds more than one module record"));
        }
        let body = body
            .strip_suffix(Discriminators::DEVICE)
            .ok_or_else(|| format_error("module id prefix is not terminated"))?;

        let mut parts = body.split(Discriminators::DEVICE);
        let module_id: ModuleId = parse_id("module id", parts.next().unwrap_or_default())?;

        let mut devices = Vec::new();
        while let Some(id_text) = parts.next() {
            let device_id: DeviceId = parse_id("device id", id_text)?;
            let datum_text = parts.next().ok_or_else(|| {
                format_error(format!("device {} has no fragment", device_id))
            })?;
            let datums = if datum_text.is_empty() {
                Vec::new()
            } else {
                datum_text
                    .split(Discriminators::DATUM)
                    .map(str::to_string)
                    .collect()
            };
            devices.push(DeviceRecord { device_id, datums });
        }

        Ok(Self { module_id, devices })
    }

    /// Parses back-to-back module streams, as relayed by a hub.
    pub fn parse_many(streams: &str) -> Result<Vec<Self>> {
        streams
            .split_inclusive(Discriminators::MODULE)
            .map(Self::parse)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_datums() {
        assert_eq!(encode_datums(["20.5", "101.3", "55.0"]), "20.5,101.3,55.0");
        assert_eq!(encode_datums([1, 2]), "1,2");
        assert_eq!(encode_datums(Vec::<i32>::new()), "");
    }

    #[test]
    fn test_parse_single_device_stream() {
        let record = ModuleRecord::parse("7:1:20.5,101.3,55.0:;").unwrap();
        assert_eq!(record.module_id, 7);
        assert_eq!(
            record.devices,
            vec![DeviceRecord {
                device_id: 1,
                datums: vec!["20.5".into(), "101.3".into(), "55.0".into()],
            }]
        );
    }

    #[test]
    fn test_parse_empty_module_and_empty_fragment() {
        let record = ModuleRecord::parse("1:;").unwrap();
        assert_eq!(record.module_id, 1);
        assert!(record.devices.is_empty());

        let record = ModuleRecord::parse("4:9::;").unwrap();
        assert_eq!(record.devices[0].device_id, 9);
        assert!(record.devices[0].datums.is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_streams() {
        assert!(ModuleRecord::parse("7:1:20.5:").is_err());
        assert!(ModuleRecord::parse("7;").is_err());
        assert!(ModuleRecord::parse("7:1:;").is_err());
        assert!(ModuleRecord::parse("x:;").is_err());
        assert!(ModuleRecord::parse("1:;;").is_err());
    }

    #[test]
    fn test_parse_many_hub_relay() {
        let records = ModuleRecord::parse_many("1:;2:5:3.0:;").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].module_id, 2);
        assert_eq!(records[1].devices[0].datums, vec!["3.0".to_string()]);
    }
}
