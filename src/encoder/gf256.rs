/// GF(256) arithmetic for QR Reed-Solomon codes
/// Field defined by the primitive polynomial x^8 + x^4 + x^3 + x^2 + 1 (0x11D)
use std::sync::OnceLock;

/// Primitive polynomial of the QR field
pub const PRIMITIVE_POLY: u16 = 0x11D;

/// Order of the multiplicative group
const GROUP_ORDER: usize = 255;

struct Tables {
    // exp[i] = alpha^(i mod 255), long enough to index log[a] + log[b] directly
    exp: [u8; 512],
    log: [u8; 256],
}

static TABLES: OnceLock<Tables> = OnceLock::new();

fn build_tables() -> Tables {
    let mut exp = [0u8; 512];
    let mut log = [0u8; 256];

    let mut x: u16 = 1;
    for i in 0..GROUP_ORDER {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE_POLY;
        }
    }
    // alpha^255 == 1, so the cycle simply repeats
    for i in GROUP_ORDER..exp.len() {
        exp[i] = exp[i - GROUP_ORDER];
    }

    Tables { exp, log }
}

fn tables() -> &'static Tables {
    TABLES.get_or_init(|| {
        tracing::trace!("building GF(256) exp/log tables");
        build_tables()
    })
}

/// GF(256) field operations using log/exp tables
pub struct Gf256;

impl Gf256 {
    /// Build the lookup tables now instead of on first use.
    ///
    /// Safe to call from any number of threads; only the first call does work.
    pub fn init() {
        tables();
    }

    /// alpha^i for any exponent
    pub fn exp(i: usize) -> u8 {
        tables().exp[i % GROUP_ORDER]
    }

    /// Discrete logarithm of a nonzero element; `None` for zero
    pub fn log(v: u8) -> Option<u8> {
        if v == 0 {
            return None;
        }
        Some(tables().log[v as usize])
    }

    /// Field multiplication; zero if either operand is zero
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let t = tables();
        let log_a = t.log[a as usize] as usize;
        let log_b = t.log[b as usize] as usize;
        t.exp[log_a + log_b]
    }

    /// a^n; 0^0 is 1
    pub fn pow(a: u8, n: usize) -> u8 {
        if a == 0 {
            return if n == 0 { 1 } else { 0 };
        }
        let t = tables();
        let log_a = t.log[a as usize] as usize;
        t.exp[(log_a * (n % GROUP_ORDER)) % GROUP_ORDER]
    }
}
