//! Byte sources and the named handle used for uploads.

use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom};

/// Minimal capability set of an upload source.
///
/// Reading comes from [`Read`]. Seeking is optional and unsupported by
/// default. Closing is a no-op unless the source has something to flush or
/// shut down; dropping the source remains the caller's business.
pub trait ByteStream: Read + Send {
    /// Current position, in bytes from the start of the stream.
    fn tell(&mut self) -> io::Result<u64>;

    /// Reposition the stream.
    fn seek_to(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "stream is not seekable",
        ))
    }

    /// Release whatever the source holds open.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ByteStream for File {
    fn tell(&mut self) -> io::Result<u64> {
        self.stream_position()
    }

    fn seek_to(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Seek::seek(self, pos)
    }
}

impl<T: AsRef<[u8]> + Send> ByteStream for Cursor<T> {
    fn tell(&mut self) -> io::Result<u64> {
        Ok(self.position())
    }

    fn seek_to(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Seek::seek(self, pos)
    }
}

impl<S: ByteStream + ?Sized> ByteStream for Box<S> {
    fn tell(&mut self) -> io::Result<u64> {
        (**self).tell()
    }

    fn seek_to(&mut self, pos: SeekFrom) -> io::Result<u64> {
        (**self).seek_to(pos)
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// Forward-only adapter for sources without a position, such as sockets,
/// pipes or stdin. The position is the number of bytes read so far.
#[derive(Debug)]
pub struct Sequential<R> {
    inner: R,
    position: u64,
}

impl<R: Read> Sequential<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for Sequential<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.position += n as u64;
        Ok(n)
    }
}

impl<R: Read + Send> ByteStream for Sequential<R> {
    fn tell(&mut self) -> io::Result<u64> {
        Ok(self.position)
    }
}

/// A borrowed byte source presented under an explicit remote filename.
///
/// The name given here is what the server records, whatever the source calls
/// itself. Every stream operation is forwarded unchanged. The handle never
/// closes the source on drop.
pub struct NamedFileHandle<'a, S: ?Sized> {
    name: String,
    stream: &'a mut S,
}

impl<'a, S: ByteStream + ?Sized> NamedFileHandle<'a, S> {
    pub fn new(name: impl Into<String>, stream: &'a mut S) -> Self {
        Self {
            name: name.into(),
            stream,
        }
    }

    /// Remote-visible filename.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_mut(&mut self) -> &mut S {
        self.stream
    }
}

impl<S: ByteStream + ?Sized> Read for NamedFileHandle<'_, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }

    fn read_to_end(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        self.stream.read_to_end(buf)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.stream.read_exact(buf)
    }
}

impl<S: ByteStream + ?Sized> ByteStream for NamedFileHandle<'_, S> {
    fn tell(&mut self) -> io::Result<u64> {
        self.stream.tell()
    }

    fn seek_to(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.stream.seek_to(pos)
    }

    fn close(&mut self) -> io::Result<()> {
        self.stream.close()
    }
}

impl<S: ?Sized> std::fmt::Debug for NamedFileHandle<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamedFileHandle")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_name_overrides_file_name() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"hello world").unwrap();
        let mut file = tmp.reopen().unwrap();

        let handle = NamedFileHandle::new("T1w.nii.gz", &mut file);
        assert_eq!(handle.name(), "T1w.nii.gz");
    }

    #[test]
    fn test_reads_identical_bytes() {
        let data: Vec<u8> = (0..4096u32).map(|i| (i * 7 % 256) as u8).collect();

        let mut direct = Cursor::new(data.clone());
        let mut expected = Vec::new();
        direct.read_to_end(&mut expected).unwrap();

        let mut source = Cursor::new(data);
        let mut handle = NamedFileHandle::new("x.bin", &mut source);
        let mut first = [0u8; 10];
        handle.read_exact(&mut first).unwrap();
        let mut rest = Vec::new();
        handle.read_to_end(&mut rest).unwrap();

        assert_eq!(&expected[..10], &first);
        assert_eq!(&expected[10..], rest.as_slice());
    }

    #[test]
    fn test_tell_and_seek_forwarded() {
        let mut source = Cursor::new(b"0123456789".to_vec());
        {
            let mut handle = NamedFileHandle::new("digits.txt", &mut source);
            let mut buf = [0u8; 4];
            handle.read_exact(&mut buf).unwrap();
            assert_eq!(handle.tell().unwrap(), 4);
            assert_eq!(handle.seek_to(SeekFrom::Start(8)).unwrap(), 8);
            handle.close().unwrap();
        }
        assert_eq!(source.position(), 8);
    }

    #[test]
    fn test_file_seek_through_trait() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"abcdef").unwrap();
        let mut file = tmp.reopen().unwrap();

        let mut handle = NamedFileHandle::new("renamed", &mut file);
        handle.seek_to(SeekFrom::Start(3)).unwrap();
        let mut rest = String::new();
        handle.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "def");
        assert_eq!(handle.tell().unwrap(), 6);
    }

    #[test]
    fn test_sequential_counts_and_refuses_seek() {
        let mut source = Sequential::new(&b"stream"[..]);
        let mut handle = NamedFileHandle::new("s", &mut source);
        let mut buf = [0u8; 3];
        handle.read_exact(&mut buf).unwrap();
        assert_eq!(handle.tell().unwrap(), 3);
        let err = handle.seek_to(SeekFrom::Start(0)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }

    #[test]
    fn test_dyn_stream_handle() {
        let mut source: Box<dyn ByteStream> = Box::new(Cursor::new(vec![1u8, 2, 3]));
        let mut handle = NamedFileHandle::new("boxed", &mut *source);
        let mut out = Vec::new();
        handle.read_to_end(&mut out).unwrap();
        assert_eq!(out, [1, 2, 3]);
    }
}
