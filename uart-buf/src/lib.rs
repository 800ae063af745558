//! An interrupt-buffered serial channel for no-alloc systems.
//!
//! The channel sits between main-line code and a hardware UART: a blocking
//! byte API on one side, the transmit-ready/receive-ready interrupt handlers
//! on the other, and a lock-free SPSC ring buffer in each direction. Sending
//! enqueues and lazily arms the transmit interrupt; the handler drains one
//! byte per peripheral-ready event and disarms itself when the buffer runs
//! dry. Receiving dequeues what the receive handler has deposited.
//!
//! The hardware seam is the [`backend::UartBackend`] trait, so the channel
//! logic runs unchanged against a register poker on target hardware or a
//! mock on the host.
//!
//! ```
//! use uart_buf::backend::UartBackend;
//! use uart_buf::baud::Baud;
//! use uart_buf::make_uart;
//!
//! /// Register stub standing in for a real peripheral.
//! struct Registers;
//!
//! impl UartBackend for Registers {
//!     fn configure(&self, _baud: Baud) {}
//!     fn write_data(&self, _byte: u8) {}
//!     fn read_data(&self) -> u8 {
//!         0
//!     }
//!     fn arm_tx_interrupt(&self) {}
//!     fn disarm_tx_interrupt(&self) {}
//!     fn enable_rx_interrupt(&self) {}
//!     fn unmask_interrupts(&self) {}
//! }
//!
//! let (mut port, mut irq) = make_uart!(Registers, Registers, 8, Baud::B9600);
//!
//! // Main-line side: bytes are buffered, not yet on the wire.
//! port.send_str("ok");
//! assert_eq!(port.pending_out(), 2);
//!
//! // Interrupt side: one transmit-ready event drains one byte.
//! irq.on_tx_ready();
//! assert_eq!(port.pending_out(), 1);
//! ```

#![no_std]
#![deny(missing_docs)]

pub mod backend;
pub mod baud;
pub mod channel;
mod fmt;
mod hal;

#[cfg(test)]
mod mock;

pub use portable_atomic;

#[cfg(test)]
#[macro_use]
extern crate std;
