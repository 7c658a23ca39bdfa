//! Reference SZDD expander, used only to check that compressed output
//! decodes back to the original bytes.
//!
//! Written independently of the crate so it can serve as an oracle: the
//! window starts filled with spaces, writing starts at slot N - 16, and each
//! back-reference copies from an absolute window slot.

const N: usize = 4096;
const F: usize = 16;
const THRESHOLD: usize = 3;
const HEADER_SIZE: usize = 14;
const MAGIC: [u8; 8] = [0x53, 0x5A, 0x44, 0x44, 0x88, 0xF0, 0x27, 0x33];

/// Expand a complete SZDD file, checking the header and the recorded length
pub fn expand(data: &[u8]) -> Result<Vec<u8>, String> {
    if data.len() < HEADER_SIZE {
        return Err(format!("truncated header: {} bytes", data.len()));
    }
    if data[0..8] != MAGIC {
        return Err(format!("bad magic: {:02x?}", &data[0..8]));
    }
    if data[8] != 0x41 {
        return Err(format!("unsupported method 0x{:02x}", data[8]));
    }
    let length = u32::from_le_bytes([data[10], data[11], data[12], data[13]]) as usize;
    expand_raw(&data[HEADER_SIZE..], Some(length))
}

/// Expand a bare token stream. With `limit`, the stream must produce exactly
/// that many bytes and carry nothing after them.
pub fn expand_raw(body: &[u8], limit: Option<usize>) -> Result<Vec<u8>, String> {
    let mut window = [b' '; N];
    let mut pos = N - F;
    let mut out = Vec::with_capacity(limit.unwrap_or(body.len() * 2));
    let mut src = 0;

    let done = |out: &Vec<u8>| limit.map_or(false, |l| out.len() >= l);

    while src < body.len() && !done(&out) {
        let flags = body[src];
        src += 1;

        for bit in 0..8 {
            if src >= body.len() || done(&out) {
                break;
            }
            if flags & (1 << bit) != 0 {
                let byte = body[src];
                src += 1;
                out.push(byte);
                window[pos] = byte;
                pos = (pos + 1) & (N - 1);
            } else {
                if src + 1 >= body.len() {
                    return Err(format!("truncated back-reference at offset {}", src));
                }
                let lo = body[src] as usize;
                let hi = body[src + 1] as usize;
                src += 2;

                let start = lo | ((hi & 0xF0) << 4);
                let length = (hi & 0x0F) + THRESHOLD;
                for k in 0..length {
                    let byte = window[(start + k) & (N - 1)];
                    out.push(byte);
                    window[pos] = byte;
                    pos = (pos + 1) & (N - 1);
                }
            }
        }
    }

    if let Some(limit) = limit {
        if out.len() != limit {
            return Err(format!("expanded {} bytes, header says {}", out.len(), limit));
        }
        if src != body.len() {
            return Err(format!("{} trailing bytes after the last token", body.len() - src));
        }
    }
    Ok(out)
}
