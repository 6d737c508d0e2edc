use ncrb_core::error::NcrbError;
use serde::Serialize;

pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String, NcrbError> {
    Ok(serde_json::to_string_pretty(value)?)
}
