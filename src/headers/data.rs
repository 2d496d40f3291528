use std::fmt;

use super::{LayerView, Region};
use crate::error::{DecodeError, Layer};

/// Bytes left over with no decoder to interpret them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataView<'a> {
    region: Region<'a>,
}

/// Never fails for an offset inside `bytes`; an empty remainder is valid.
pub fn decode_data(bytes: &[u8], offset: usize) -> Result<DataView<'_>, DecodeError> {
    if offset > bytes.len() {
        return Err(DecodeError::Truncated {
            layer: Layer::Data,
            needed: offset,
            available: bytes.len(),
        });
    }

    Ok(DataView {
        region: Region::new(bytes, offset, offset, bytes.len()),
    })
}

impl<'a> LayerView<'a> for DataView<'a> {
    const LAYER: Layer = Layer::Data;

    fn region(&self) -> Region<'a> {
        self.region
    }
}

impl fmt::Display for DataView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data {} bytes", self.payload_len())
    }
}
