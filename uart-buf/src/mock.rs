//! Host-side test double for [`UartBackend`].

use std::collections::VecDeque;
use std::sync::Mutex;
use std::vec::Vec;

use portable_atomic::{AtomicBool, Ordering};

use crate::backend::UartBackend;
use crate::baud::Baud;

/// A backend that records every register interaction.
///
/// Bytes written to the data register accumulate on [`MockUart::wire`];
/// bytes queued with [`MockUart::feed`] are returned by successive data
/// register reads, simulating receive-ready events.
pub struct MockUart {
    baud: Mutex<Option<Baud>>,
    tx_irq_armed: AtomicBool,
    rx_irq_enabled: AtomicBool,
    interrupts_unmasked: AtomicBool,
    wire: Mutex<Vec<u8>>,
    incoming: Mutex<VecDeque<u8>>,
}

impl MockUart {
    /// Create an idle mock with nothing configured.
    pub const fn new() -> Self {
        Self {
            baud: Mutex::new(None),
            tx_irq_armed: AtomicBool::new(false),
            rx_irq_enabled: AtomicBool::new(false),
            interrupts_unmasked: AtomicBool::new(false),
            wire: Mutex::new(Vec::new()),
            incoming: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue one byte for the next data register read.
    pub fn feed(&self, byte: u8) {
        self.incoming.lock().unwrap().push_back(byte);
    }

    /// Queue every byte of `s` for subsequent data register reads.
    pub fn feed_str(&self, s: &str) {
        for byte in s.bytes() {
            self.feed(byte);
        }
    }

    /// Everything written to the data register so far, in order.
    pub fn wire(&self) -> Vec<u8> {
        self.wire.lock().unwrap().clone()
    }

    /// The last configured baud rate, if any.
    pub fn baud(&self) -> Option<Baud> {
        *self.baud.lock().unwrap()
    }

    /// Is the transmit-ready interrupt source armed?
    pub fn tx_irq_armed(&self) -> bool {
        self.tx_irq_armed.load(Ordering::SeqCst)
    }

    /// Is the receive-ready interrupt source enabled?
    pub fn rx_irq_enabled(&self) -> bool {
        self.rx_irq_enabled.load(Ordering::SeqCst)
    }

    /// Has the global interrupt mask been enabled?
    pub fn interrupts_unmasked(&self) -> bool {
        self.interrupts_unmasked.load(Ordering::SeqCst)
    }
}

impl UartBackend for MockUart {
    fn configure(&self, baud: Baud) {
        *self.baud.lock().unwrap() = Some(baud);
    }

    fn write_data(&self, byte: u8) {
        self.wire.lock().unwrap().push(byte);
    }

    fn read_data(&self) -> u8 {
        self.incoming.lock().unwrap().pop_front().unwrap_or(0)
    }

    fn arm_tx_interrupt(&self) {
        self.tx_irq_armed.store(true, Ordering::SeqCst);
    }

    fn disarm_tx_interrupt(&self) {
        self.tx_irq_armed.store(false, Ordering::SeqCst);
    }

    fn enable_rx_interrupt(&self) {
        self.rx_irq_enabled.store(true, Ordering::SeqCst);
    }

    fn unmask_interrupts(&self) {
        self.interrupts_unmasked.store(true, Ordering::SeqCst);
    }
}
