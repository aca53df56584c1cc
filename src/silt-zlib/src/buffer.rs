use std::{borrow::Cow, ops::Deref};

/// A contiguous view over block bytes, either aliasing caller
/// memory or owning a copy of it.
///
/// The codec operations only ever read flat byte slices. Callers
/// whose data already lives in one borrow it for free; callers
/// with non-contiguous or otherwise unreadable backings gather a
/// copy once through [`ByteView::from_chunks`] and pay nothing
/// further.
#[derive(Debug, Clone)]
pub struct ByteView<'a>(Cow<'a, [u8]>);

impl<'a> ByteView<'a> {
    /// Creates a view that borrows the given slice without copying.
    #[inline]
    pub const fn borrowed(buf: &'a [u8]) -> Self {
        Self(Cow::Borrowed(buf))
    }

    /// Creates a view that owns the given byte vector.
    #[inline]
    pub const fn owned(buf: Vec<u8>) -> Self {
        Self(Cow::Owned(buf))
    }

    /// Gathers non-contiguous chunks into a single owned view.
    ///
    /// This is the explicit copy path for backings which cannot
    /// expose one flat slice.
    pub fn from_chunks<I>(chunks: I) -> ByteView<'static>
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut buf = Vec::new();
        for chunk in chunks {
            buf.extend_from_slice(chunk);
        }

        ByteView(Cow::Owned(buf))
    }

    /// Re-slices the view to `len` bytes starting at `offset`.
    ///
    /// Returns [`None`] when `offset + len` exceeds the bounds of
    /// the backing region. The sub-view borrows from `self`, no
    /// bytes are copied.
    pub fn view(&self, offset: usize, len: usize) -> Option<ByteView<'_>> {
        let end = offset.checked_add(len)?;
        self.0.get(offset..end).map(ByteView::borrowed)
    }
}

impl<'a> From<&'a [u8]> for ByteView<'a> {
    fn from(buf: &'a [u8]) -> Self {
        Self::borrowed(buf)
    }
}

impl From<Vec<u8>> for ByteView<'static> {
    fn from(buf: Vec<u8>) -> Self {
        Self::owned(buf)
    }
}

impl Deref for ByteView<'_> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for ByteView<'_> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
