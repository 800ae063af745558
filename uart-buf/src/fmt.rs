//! Formatted decimal and hexadecimal helpers layered on the byte API.
//!
//! Pure compositions of [`UartPort::send`] and [`UartPort::recv`]; nothing
//! here touches the rings or the backend directly.

use heapless::Vec;

use crate::backend::UartBackend;
use crate::channel::UartPort;

fn hex_digit(nibble: u8) -> u8 {
    if nibble > 9 {
        nibble + 7 + b'0'
    } else {
        nibble + b'0'
    }
}

impl<B: UartBackend, const N: usize> UartPort<'_, B, N> {
    /// Write `value` in decimal with `decimals` fractional digits.
    ///
    /// A space or `-` sign is written first, then the digits with a `.`
    /// placed `decimals` positions from the right; short values are padded
    /// with leading zeros up to `decimals + 2` digit positions, so e.g.
    /// 5 with two fractional digits renders as ` 0.05`.
    pub fn write_dec(&mut self, value: i32, decimals: u8) {
        let mut digits: Vec<u8, 16> = Vec::new();

        let sign = if value < 0 { b'-' } else { b' ' };
        let mut rest = value.unsigned_abs();
        let want = u32::from(decimals) + 2;
        let mut count = 0u32;

        loop {
            let _ = digits.push(b'0' + (rest % 10) as u8);
            rest /= 10;
            count += 1;
            if count == u32::from(decimals) {
                let _ = digits.push(b'.');
                count += 1;
            }
            if rest == 0 && count >= want {
                break;
            }
        }

        self.send(sign);
        while let Some(digit) = digits.pop() {
            self.send(digit);
        }
    }

    /// Write `value` as two uppercase hexadecimal digits.
    pub fn write_hex_u8(&mut self, value: u8) {
        self.send(hex_digit(value >> 4));
        self.send(hex_digit(value & 0x0F));
    }

    /// Write `value` as four uppercase hexadecimal digits.
    pub fn write_hex_u16(&mut self, value: u16) {
        self.write_hex_u8((value >> 8) as u8);
        self.write_hex_u8((value & 0xFF) as u8);
    }

    /// Read `digits` hex characters, echoing each one back.
    fn read_hex(&mut self, digits: u8) -> u16 {
        let mut value = 0u16;

        for _ in 0..digits {
            let mut c = self.recv();
            self.send(c);
            // Letter digits, either case, collapse onto 0xA..0xF.
            if c > 0x40 {
                c -= 7;
            }
            value = (value << 4) | u16::from(c & 0x0F);
        }

        value
    }

    /// Read two hexadecimal characters, blocking until both arrive.
    ///
    /// Every received character is echoed back over the transmit side.
    /// Upper- and lowercase digits are accepted; there is no rejection of
    /// non-hex input.
    pub fn read_hex_u8(&mut self) -> u8 {
        self.read_hex(2) as u8
    }

    /// Read four hexadecimal characters, blocking until all four arrive.
    ///
    /// Every received character is echoed back over the transmit side.
    pub fn read_hex_u16(&mut self) -> u16 {
        self.read_hex(4)
    }
}
