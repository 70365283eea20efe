//! Stream helpers.
//!
//! # Design
//! Response capture drains ureq's body reader through `copy`, so a failed
//! read surfaces as `Error::Io` and the connection is released once the
//! reader is dropped.

use std::io::{self, Read, Write};

/// Copy everything from `from` into `to` and flush `to`.
///
/// Returns the number of bytes copied.
pub fn copy<R, W>(from: &mut R, to: &mut W) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let total = io::copy(from, to)?;
    to.flush()?;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_across_chunk_boundaries() {
        let data: Vec<u8> = (0..3000u32).map(|i| (i % 251) as u8).collect();
        let mut out = Vec::new();
        let n = copy(&mut data.as_slice(), &mut out).unwrap();
        assert_eq!(n, 3000);
        assert_eq!(out, data);
    }

    #[test]
    fn flushes_buffered_writer() {
        let mut inner = Vec::new();
        {
            let mut writer = io::BufWriter::new(&mut inner);
            copy(&mut &b"buffered"[..], &mut writer).unwrap();
            assert_eq!(writer.buffer().len(), 0);
        }
        assert_eq!(inner, b"buffered");
    }

    #[test]
    fn empty_source_copies_nothing() {
        let mut out = Vec::new();
        assert_eq!(copy(&mut io::empty(), &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn read_failure_propagates() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
            }
        }
        let err = copy(&mut Broken, &mut Vec::new()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
    }
}
