//! Socket primitive contract.
//!
//! The buffer layer never opens or closes sockets. The connection manager
//! owns the handle and hands it to the adapters per call; this trait is the
//! seam between the two. Whether a call blocks is decided by how the owner
//! configured the socket - the buffer logic itself never blocks.

use std::io::{self, Read, Write};

/// Bounded read/write primitives supplied by the external connection manager.
///
/// `recv` returns the number of bytes placed in `buf`, with `Ok(0)` meaning
/// no data this call. `send` may accept fewer bytes than offered; the caller
/// resumes from the first unaccepted byte. Errors are returned as-is.
pub trait SocketIo {
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize>;
    fn send(&mut self, buf: &[u8]) -> io::Result<usize>;
}

impl SocketIo for std::net::TcpStream {
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Read::read(self, buf)
    }

    fn send(&mut self, buf: &[u8]) -> io::Result<usize> {
        Write::write(self, buf)
    }
}

#[cfg(unix)]
impl SocketIo for std::os::unix::net::UnixStream {
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Read::read(self, buf)
    }

    fn send(&mut self, buf: &[u8]) -> io::Result<usize> {
        Write::write(self, buf)
    }
}
