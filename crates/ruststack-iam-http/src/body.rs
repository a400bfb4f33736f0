//! IAM HTTP response body type.

use std::convert::Infallible;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body::Body;
use http_body_util::Full;

/// Response body for IAM HTTP responses.
///
/// Every IAM answer is a buffered XML document. Responses to HEAD requests
/// keep their status and headers but carry no body.
#[derive(Debug)]
pub enum IamResponseBody {
    /// A buffered XML document.
    Xml(Full<Bytes>),
    /// No payload (HEAD responses).
    Empty,
}

impl IamResponseBody {
    /// Wrap a serialized XML document.
    #[must_use]
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        Self::Xml(Full::new(data.into()))
    }

    /// A body with no payload.
    #[must_use]
    pub fn empty() -> Self {
        Self::Empty
    }
}

impl Body for IamResponseBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<http_body::Frame<Bytes>, Infallible>>> {
        match self.get_mut() {
            Self::Xml(doc) => Pin::new(doc).poll_frame(cx),
            Self::Empty => Poll::Ready(None),
        }
    }

    fn is_end_stream(&self) -> bool {
        match self {
            Self::Xml(doc) => doc.is_end_stream(),
            Self::Empty => true,
        }
    }

    fn size_hint(&self) -> http_body::SizeHint {
        match self {
            Self::Xml(doc) => doc.size_hint(),
            Self::Empty => http_body::SizeHint::with_exact(0),
        }
    }
}
