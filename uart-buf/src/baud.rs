//! Baud-rate selection.

/// Serial data rate selector.
///
/// One of a fixed set of four rates, each pre-resolved at build time into a
/// divisor/modulation pair for a 1 MHz peripheral clock with low-frequency
/// baud generation. There is no runtime baud computation and no validation
/// against the clock the peripheral actually runs from.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baud {
    /// 1200 bits per second.
    B1200,
    /// 2400 bits per second.
    B2400,
    /// 4800 bits per second.
    B4800,
    /// 9600 bits per second.
    B9600,
}

impl Baud {
    /// Clock divisor for this rate.
    pub const fn divisor(self) -> u16 {
        match self {
            Baud::B1200 => 833,
            Baud::B2400 => 416,
            Baud::B4800 => 208,
            Baud::B9600 => 104,
        }
    }

    /// Modulation pattern compensating the fractional part of the division.
    pub const fn modulation(self) -> u8 {
        match self {
            Baud::B1200 => 2,
            Baud::B2400 => 5,
            Baud::B4800 => 2,
            Baud::B9600 => 1,
        }
    }
}
