//! Integration with the `embedded-hal-nb` serial traits and `core::fmt`.
//!
//! The port's only failure mode is unavailability, so the error type is
//! [`Infallible`] and a full transmit buffer or an empty receive buffer
//! surfaces as [`nb::Error::WouldBlock`].

use core::convert::Infallible;

use embedded_hal_nb::nb;
use embedded_hal_nb::serial::{ErrorType, Read, Write};

use crate::backend::UartBackend;
use crate::channel::UartPort;

impl<B: UartBackend, const N: usize> ErrorType for UartPort<'_, B, N> {
    type Error = Infallible;
}

impl<B: UartBackend, const N: usize> Read<u8> for UartPort<'_, B, N> {
    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        self.try_recv().ok_or(nb::Error::WouldBlock)
    }
}

impl<B: UartBackend, const N: usize> Write<u8> for UartPort<'_, B, N> {
    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        self.try_send(word).map_err(|_| nb::Error::WouldBlock)
    }

    /// Ready once the transmit ring is drained; bytes already handed to the
    /// data register are the peripheral's problem.
    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        if self.pending_out() == 0 {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}

impl<B: UartBackend, const N: usize> core::fmt::Write for UartPort<'_, B, N> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.send_str(s);

        Ok(())
    }
}
