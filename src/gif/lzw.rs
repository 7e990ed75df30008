
use super::errors::Malformed;



const MAX_CODES: usize = 4096;
const MAX_WIDTH: u8 = 12;


/// LSB-first reader of variable width codes.
struct BitReader<'a> {
    data: &'a [u8],
    acc: u32,
    bits: u8,
}

impl<'a> BitReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        BitReader { data, acc: 0, bits: 0 }
    }

    fn read(&mut self, width: u8) -> Option<u16> {
        while self.bits < width {
            let (&byte, rest) = self.data.split_first()?;
            self.acc |= u32::from(byte) << self.bits;
            self.bits += 8;
            self.data = rest;
        }
        let code = (self.acc & ((1 << width) - 1)) as u16;
        self.acc >>= width;
        self.bits -= width;
        Some(code)
    }
}


/// Decompresses GIF image data into at most `limit` color indices.
///
/// Stops at the end-of-information code or when the data runs out; a short result is
/// left for the caller to judge.
pub fn decode(data: &[u8], min_code_size: u8, limit: usize) -> Result<Vec<u8>, Malformed> {
    let clear = 1u16 << min_code_size;
    let end = clear + 1;

    let mut prefix = [0u16; MAX_CODES];
    let mut suffix = [0u8; MAX_CODES];
    let mut length = [0u16; MAX_CODES];
    for code in 0 .. clear as usize {
        suffix[code] = code as u8;
        length[code] = 1;
    }

    let mut reader = BitReader::new(data);
    let mut width = min_code_size + 1;
    let mut next = clear + 2;
    let mut prev: Option<u16> = None;
    let mut out = Vec::with_capacity(limit);

    while out.len() < limit {
        let code = match reader.read(width) {
            Some(code) => code,
            None => break,
        };

        if code == clear {
            width = min_code_size + 1;
            next = clear + 2;
            prev = None;
            continue;
        }
        if code == end {
            break;
        }

        let start = out.len();
        let first = match prev {
            _ if code < clear || (end < code && code < next) => {
                let len = length[code as usize] as usize;
                out.resize(start + len, 0);
                let mut c = code as usize;
                for i in (start .. start + len).rev() {
                    out[i] = suffix[c];
                    c = prefix[c] as usize;
                }
                out[start]
            },
            // The code being defined right now: previous string plus its own first byte
            Some(p) if code == next => {
                let len = length[p as usize] as usize;
                out.resize(start + len, 0);
                let mut c = p as usize;
                for i in (start .. start + len).rev() {
                    out[i] = suffix[c];
                    c = prefix[c] as usize;
                }
                let first = out[start];
                out.push(first);
                first
            },
            _ => return Err(Malformed::Lzw(code)),
        };

        if let Some(p) = prev {
            if (next as usize) < MAX_CODES {
                prefix[next as usize] = p;
                suffix[next as usize] = first;
                length[next as usize] = length[p as usize] + 1;
                next += 1;
                if next == 1 << width && width < MAX_WIDTH {
                    width += 1;
                }
            }
        }
        prev = Some(code);
    }

    out.truncate(limit);
    Ok(out)
}
