//! A transport is a source and sink of protocol frames.  It knows how to find frame boundaries in
//! a byte stream and nothing else; the JSON inside each frame is opaque at this level.
//!
//! The only production transport is the plugin's own stdin/stdout, see [`stdio`].  Anything that
//! implements [`AsyncRead`] and [`AsyncWrite`] can be turned into a transport with [`framed`],
//! which is how the tests drive the plugin over an in-memory pipe.
use std::borrow::Cow;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::{FutureExt, SinkExt, StreamExt, TryFutureExt};
use pin_project::pin_project;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio_util::codec::{Framed, LengthDelimitedCodec, length_delimited};

use crate::PluginConfig;

/// Width of the little-endian length header in front of every frame.
pub const LENGTH_HEADER_BYTES: usize = 8;

pub trait Transport: Send + Sized + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Transport-specific identifier of the host, useful for logging and debugging.
    fn remote_peer(&self) -> Cow<'static, str>;

    /// Send one frame.  Should not complete until the frame has been handed off to the
    /// underlying I/O and flushed.
    fn send_message(&mut self, message: Bytes) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

    /// Receive one frame.
    ///
    /// This future must be cancelation-safe, since the service races it against its cancellation
    /// token.
    ///
    /// Returns `Ok(None)` once the host has closed its end and no more frames will arrive.
    fn receive_message(&mut self) -> impl Future<Output = Result<Option<Bytes>, Self::Error>> + Send + '_;
}

impl<Io> Transport for Framed<Io, LengthDelimitedCodec>
where
    Io: Send + Unpin + AsyncRead + AsyncWrite + 'static,
{
    type Error = io::Error;

    fn remote_peer(&self) -> Cow<'static, str> {
        Cow::Borrowed(std::any::type_name::<Io>())
    }

    fn send_message(&mut self, message: Bytes) -> impl Future<Output = Result<(), Self::Error>> + Send + '_ {
        self.send(message)
    }

    fn receive_message(&mut self) -> impl Future<Output = Result<Option<Bytes>, Self::Error>> + Send + '_ {
        // `StreamExt::next` doesn't take ownership of the stream and the codec keeps partial
        // frames in its own buffer, so dropping this future loses nothing.
        self.next()
            .map(|opt_result| opt_result.transpose().map(|frame| frame.map(|frame| frame.freeze())))
    }
}

/// Codec settings for the plugin protocol: 8-byte little-endian length header, payload only.
pub fn codec(config: &PluginConfig) -> length_delimited::Builder {
    let mut builder = LengthDelimitedCodec::builder();
    builder
        .length_field_length(LENGTH_HEADER_BYTES)
        .little_endian()
        .max_frame_length(config.max_message_bytes);
    builder
}

/// Wrap any duplex byte stream in the plugin protocol's framing.
pub fn framed<Io>(io: Io, config: &PluginConfig) -> Framed<Io, LengthDelimitedCodec>
where
    Io: AsyncRead + AsyncWrite,
{
    codec(config).new_framed(io)
}

/// The transport the plugin executable uses: frames in on stdin, frames out on stdout.
pub fn stdio(config: &PluginConfig) -> Framed<Stdio, LengthDelimitedCodec> {
    framed(
        Stdio {
            stdin: tokio::io::stdin(),
            stdout: tokio::io::stdout(),
        },
        config,
    )
}

/// The process's stdin and stdout, together working as a duplex channel implementing
/// [`AsyncRead`] and [`AsyncWrite`] both.
#[derive(Debug)]
#[pin_project]
pub struct Stdio {
    #[pin]
    stdin: tokio::io::Stdin,
    #[pin]
    stdout: tokio::io::Stdout,
}

impl AsyncRead for Stdio {
    fn poll_read(self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        AsyncRead::poll_read(self.project().stdin, cx, buf)
    }
}

impl AsyncWrite for Stdio {
    fn poll_write(self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
        AsyncWrite::poll_write(self.project().stdout, cx, buf)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        AsyncWrite::poll_flush(self.project().stdout, cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        AsyncWrite::poll_shutdown(self.project().stdout, cx)
    }
}

/// Erase the transport's error type, the way the service reports it.
pub(crate) fn boxed_error<E>(e: E) -> crate::PluginError
where
    E: std::error::Error + Send + Sync + 'static,
{
    crate::PluginError::Transport { source: Box::new(e) }
}

/// Send a frame and map the transport's error to [`crate::PluginError`].
pub(crate) fn send<T: Transport>(
    transport: &mut T,
    message: Bytes,
) -> impl Future<Output = crate::Result<()>> + Send + '_ {
    transport.send_message(message).map_err(boxed_error)
}
