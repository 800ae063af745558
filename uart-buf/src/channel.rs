//! The interrupt-buffered serial channel and its split halves.
//!
//! A [`UartChannel`] owns the peripheral backend and one SPSC ring per
//! direction. [`UartChannel::split`] performs the one-time initialization and
//! hands out the two role halves: [`UartPort`] for main-line code and
//! [`UartIrq`] for the interrupt vectors. The halves make the
//! single-producer/single-consumer discipline structural: the port is the
//! only transmit producer and the only receive consumer, the irq half the
//! reverse.

use uart_buf_common::ring::Ring;

#[doc(hidden)]
pub use critical_section;

use crate::backend::UartBackend;
use crate::baud::Baud;

/// Error for a send refused by a full transmit buffer.
///
/// Carries the rejected byte so a blocking caller can retry it.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full(pub u8);

/// An interrupt-buffered serial channel. `N` sets the depth of both ring
/// buffers and must be a power of two; one slot per ring stays free, so the
/// usable depth is `N - 1`.
///
/// The channel is constructed `const` and lives in a `static`, one instance
/// per physical peripheral. All post-construction access goes through the
/// halves returned by [`UartChannel::split`].
pub struct UartChannel<B, const N: usize = 8> {
    backend: B,
    tx: Ring<N>,
    rx: Ring<N>,
}

impl<B: UartBackend, const N: usize> UartChannel<B, N> {
    /// Create a new channel around `backend`.
    pub const fn new(backend: B) -> Self {
        Self {
            backend,
            tx: Ring::new(),
            rx: Ring::new(),
        }
    }

    /// Initialize the peripheral and split the channel into its role halves.
    ///
    /// Configures pin routing, framing and the divisor for `baud`, resets
    /// both ring buffers, enables the receive-ready interrupt, leaves the
    /// transmit-ready interrupt disarmed (it is armed lazily on the first
    /// send) and unconditionally unmasks global interrupts.
    pub fn split(&mut self, baud: Baud) -> (UartPort<'_, B, N>, UartIrq<'_, B, N>) {
        self.backend.configure(baud);

        self.tx.reset();
        self.rx.reset();

        self.backend.enable_rx_interrupt();
        self.backend.disarm_tx_interrupt();
        self.backend.unmask_interrupts();

        (UartPort(self), UartIrq(self))
    }
}

/// Creates a split channel with `'static` lifetime.
///
/// Takes the backend type, a `const` expression constructing it, the ring
/// depth and the baud rate. Each macro call site owns its own hidden
/// `static`; calling the same site twice panics.
#[macro_export]
macro_rules! make_uart {
    ($backend:ty, $init:expr, $size:expr, $baud:expr) => {{
        static mut CHANNEL: $crate::channel::UartChannel<$backend, $size> =
            $crate::channel::UartChannel::new($init);

        static CHECK: $crate::portable_atomic::AtomicU8 = $crate::portable_atomic::AtomicU8::new(0);

        $crate::channel::critical_section::with(|_| {
            if CHECK.load(::core::sync::atomic::Ordering::Relaxed) != 0 {
                panic!("call to the same `make_uart` instance twice");
            }

            CHECK.store(1, ::core::sync::atomic::Ordering::Relaxed);
        });

        // SAFETY: This is safe as we hide the static mut from others to access it.
        // Only this point is where the mutable access happens.
        #[allow(static_mut_refs)]
        unsafe {
            CHANNEL.split($baud)
        }
    }};
}

// -------- Main-line half

/// The main-line half of a channel: blocking byte I/O.
///
/// Sole producer of the transmit ring and sole consumer of the receive ring.
/// The blocking operations spin on conditions only the interrupt half can
/// change, so they must never run with interrupts masked.
pub struct UartPort<'a, B, const N: usize>(&'a UartChannel<B, N>);

impl<B: UartBackend, const N: usize> UartPort<'_, B, N> {
    /// Send one byte, blocking while the transmit buffer is full.
    ///
    /// Returns once the byte is accepted into the buffer, not once it is
    /// physically transmitted. Arms the transmit-ready interrupt so the
    /// hardware drains the buffer asynchronously.
    pub fn send(&mut self, byte: u8) {
        let mut byte = byte;
        loop {
            match self.try_send(byte) {
                Ok(()) => return,
                Err(Full(rejected)) => {
                    byte = rejected;
                    core::hint::spin_loop();
                }
            }
        }
    }

    /// Send one byte if the transmit buffer has room, non-blocking.
    pub fn try_send(&mut self, byte: u8) -> Result<(), Full> {
        self.0.tx.push(byte).map_err(Full)?;
        self.0.backend.arm_tx_interrupt();

        Ok(())
    }

    /// Send every byte of `s`, inserting a carriage return before each line
    /// feed.
    ///
    /// Blocks like [`UartPort::send`] whenever the transmit buffer is full.
    pub fn send_str(&mut self, s: &str) {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.send(b'\r');
            }
            self.send(byte);
        }
    }

    /// Receive one byte, blocking while the receive buffer is empty.
    ///
    /// There is no timeout: a caller that is never sent anything spins
    /// forever. Use [`UartPort::has_pending`] or [`UartPort::try_recv`] to
    /// poll cooperatively instead.
    pub fn recv(&mut self) -> u8 {
        loop {
            if let Some(byte) = self.try_recv() {
                return byte;
            }

            core::hint::spin_loop();
        }
    }

    /// Receive one byte if one is buffered, non-blocking.
    pub fn try_recv(&mut self) -> Option<u8> {
        self.0.rx.pop()
    }

    /// Is at least one received byte waiting?
    ///
    /// Idempotent between receive events.
    pub fn has_pending(&self) -> bool {
        !self.0.rx.is_empty()
    }

    /// Number of bytes queued for transmission but not yet on the wire.
    pub fn pending_out(&self) -> u8 {
        self.0.tx.len()
    }

    /// The peripheral backend this channel drives.
    pub fn backend(&self) -> &B {
        &self.0.backend
    }
}

impl<B, const N: usize> core::fmt::Debug for UartPort<'_, B, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "UartPort")
    }
}

#[cfg(feature = "defmt-03")]
impl<B, const N: usize> defmt::Format for UartPort<'_, B, N> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "UartPort")
    }
}

// -------- Interrupt half

/// The interrupt half of a channel: the two vector entry points.
///
/// Sole consumer of the transmit ring and sole producer of the receive ring.
/// Register these against the peripheral's transmit-ready and receive-ready
/// vectors; neither entry point ever blocks.
pub struct UartIrq<'a, B, const N: usize>(&'a UartChannel<B, N>);

impl<B: UartBackend, const N: usize> UartIrq<'_, B, N> {
    /// Transmit-ready event: feed the next buffered byte to the hardware.
    ///
    /// When the transmit buffer is empty the source disarms itself instead,
    /// so the peripheral stops generating transmit-ready events until the
    /// next send re-arms it.
    pub fn on_tx_ready(&mut self) {
        match self.0.tx.pop() {
            Some(byte) => self.0.backend.write_data(byte),
            None => self.0.backend.disarm_tx_interrupt(),
        }
    }

    /// Receive-ready event: move the received byte into the receive buffer.
    ///
    /// There is no overflow check: if main-line code has not kept up, the
    /// write silently overruns the oldest unread byte.
    pub fn on_rx_ready(&mut self) {
        self.0.rx.push_overwrite(self.0.backend.read_data());
    }

    /// The peripheral backend this channel drives.
    pub fn backend(&self) -> &B {
        &self.0.backend
    }
}

impl<B, const N: usize> core::fmt::Debug for UartIrq<'_, B, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "UartIrq")
    }
}

#[cfg(feature = "defmt-03")]
impl<B, const N: usize> defmt::Format for UartIrq<'_, B, N> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "UartIrq")
    }
}
