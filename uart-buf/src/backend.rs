//! The register seam between the channel and the serial peripheral.

use crate::baud::Baud;

/// Hardware operations the channel needs from a serial peripheral.
///
/// An implementation is the sole owner of the peripheral's control, baud
/// generation and data registers; no other code may touch them concurrently.
/// On target hardware this is typically a zero-sized register poker, on the
/// host a test mock. All methods take `&self`: the implementation is shared
/// between the main-line half and the interrupt half of the channel.
pub trait UartBackend {
    /// Route the peripheral pins and program the frame format (8 data bits,
    /// no parity, 1 stop bit) and the divisor/modulation pair for `baud`.
    ///
    /// There is no error return; a constant that does not match the actual
    /// peripheral clock silently produces incorrect bit timing.
    fn configure(&self, baud: Baud);

    /// Hand one byte to the hardware transmit data register.
    fn write_data(&self, byte: u8);

    /// Read the hardware receive data register.
    fn read_data(&self) -> u8;

    /// Enable generation of transmit-ready interrupts.
    ///
    /// Must be a no-op when the source is already armed.
    fn arm_tx_interrupt(&self);

    /// Disable generation of transmit-ready interrupts without touching the
    /// global interrupt mask.
    fn disarm_tx_interrupt(&self);

    /// Enable generation of receive-ready interrupts.
    fn enable_rx_interrupt(&self);

    /// Enable the global interrupt mask.
    fn unmask_interrupts(&self);
}
