//! Errors reported by the hardware collaborators

use display_interface::DisplayError;

use crate::pins::Pin;

/// Failure of a single bus, transport or panel operation
#[derive(Debug, Clone)]
pub enum BusError {
    /// The controller unit is still claimed by an earlier trial
    InUse,
    /// ESP-IDF returned an error code
    Driver(i32),
    /// Panel transport failed to write
    Display(DisplayError),
    /// Pixel buffer does not match the draw area
    Geometry { expected: usize, actual: usize },
    /// Pin cannot be used for the requested role
    InvalidPin(Pin),
}

impl PartialEq for BusError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (BusError::InUse, BusError::InUse) => true,
            (BusError::Driver(a), BusError::Driver(b)) => a == b,
            // DisplayError has no PartialEq, its variants carry no data
            (BusError::Display(a), BusError::Display(b)) => {
                core::mem::discriminant(a) == core::mem::discriminant(b)
            }
            (
                BusError::Geometry { expected, actual },
                BusError::Geometry {
                    expected: other_expected,
                    actual: other_actual,
                },
            ) => expected == other_expected && actual == other_actual,
            (BusError::InvalidPin(a), BusError::InvalidPin(b)) => a == b,
            _ => false,
        }
    }
}

impl From<DisplayError> for BusError {
    fn from(err: DisplayError) -> Self {
        BusError::Display(err)
    }
}

impl std::fmt::Display for BusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusError::InUse => write!(f, "controller already in use"),
            BusError::Driver(code) => write!(f, "driver error {} (0x{:X})", code, code),
            BusError::Display(err) => write!(f, "panel transport error: {:?}", err),
            BusError::Geometry { expected, actual } => {
                write!(f, "expected {} pixels, got {}", expected, actual)
            }
            BusError::InvalidPin(pin) => write!(f, "GPIO{} not usable", pin),
        }
    }
}

impl std::error::Error for BusError {}
