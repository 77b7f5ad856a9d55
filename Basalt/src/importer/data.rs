//! Input buffers handed to importers

use std::ops::Deref;
use std::sync::Arc;

/// Bytes passed to [`Importer::open_data`](super::Importer::open_data)
///
/// The variant tells the importer who owns the memory. Owned and shared
/// buffers are adopted as-is; borrowed ones are copied before `open_data`
/// returns, since the caller may reuse them right after.
#[derive(Debug, Clone)]
pub enum InputData<'a> {
    /// Ownership is transferred to the importer
    Owned(Vec<u8>),
    /// Externally owned memory kept alive by reference counting
    Shared(Arc<[u8]>),
    /// Memory the importer must not hold on to
    Borrowed(&'a [u8]),
}

impl InputData<'_> {
    /// View the bytes without taking ownership
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Self::Owned(data) => data,
            Self::Shared(data) => data,
            Self::Borrowed(data) => data,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Whether the importer may keep the buffer without copying
    #[must_use]
    pub fn is_transferable(&self) -> bool {
        !matches!(self, Self::Borrowed(_))
    }

    /// Take the bytes into importer-owned storage, copying only borrowed data
    #[must_use]
    pub fn into_bytes(self) -> ContainerBytes {
        match self {
            Self::Owned(data) => ContainerBytes::Owned(data),
            Self::Shared(data) => ContainerBytes::Shared(data),
            Self::Borrowed(data) => ContainerBytes::Owned(data.to_vec()),
        }
    }
}

impl From<Vec<u8>> for InputData<'_> {
    fn from(data: Vec<u8>) -> Self {
        Self::Owned(data)
    }
}

impl From<Arc<[u8]>> for InputData<'_> {
    fn from(data: Arc<[u8]>) -> Self {
        Self::Shared(data)
    }
}

impl<'a> From<&'a [u8]> for InputData<'a> {
    fn from(data: &'a [u8]) -> Self {
        Self::Borrowed(data)
    }
}

/// Container bytes held by an opened importer
#[derive(Debug, Clone)]
pub enum ContainerBytes {
    Owned(Vec<u8>),
    Shared(Arc<[u8]>),
}

impl Deref for ContainerBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Owned(data) => data,
            Self::Shared(data) => data,
        }
    }
}
