use std::ops::Deref;
use std::sync::Arc;

/// Immutable slice referencing a shared text buffer.
///
/// The slice keeps an `Arc<str>` alive so that it can be freely cloned and
/// moved around without worrying about lifetimes. It implements `Deref<Target =
/// str>` which allows it to be used transparently as `&str` in most places.
///
/// Equality compares the text. Use [`TextSlice::same_span`] to check that two
/// slices are the very same view into the very same buffer.
#[derive(Clone)]
pub struct TextSlice {
    buffer: Arc<str>,
    start: usize,
    end: usize,
}

impl TextSlice {
    /// Creates a new slice from the given shared buffer and byte range.
    pub fn new(buffer: Arc<str>, start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        debug_assert!(end <= buffer.len());
        Self { buffer, start, end }
    }

    /// Creates a slice that covers the entire buffer.
    pub fn from_arc(buffer: Arc<str>) -> Self {
        let end = buffer.len();
        Self {
            buffer,
            start: 0,
            end,
        }
    }

    /// Creates a slice over a freshly allocated buffer.
    pub fn from_string(text: String) -> Self {
        Self::from_arc(Arc::from(text))
    }

    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the slice is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the underlying shared buffer.
    pub fn buffer(&self) -> Arc<str> {
        Arc::clone(&self.buffer)
    }

    /// Returns the start offset.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the end offset.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns a sub-slice using offsets relative to the start of this slice.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        debug_assert!(start <= end && end <= self.len());
        Self::new(self.buffer(), self.start + start, self.start + end)
    }

    /// Returns `true` when both slices view the same range of the same buffer.
    pub fn same_span(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && Arc::ptr_eq(&self.buffer, &other.buffer)
    }

    /// Returns the text as a plain `&str`.
    pub fn as_str(&self) -> &str {
        &self.buffer[self.start..self.end]
    }
}

impl std::fmt::Debug for TextSlice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}@{}..{}", self.as_str(), self.start, self.end)
    }
}

impl std::fmt::Display for TextSlice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Deref for TextSlice {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for TextSlice {
    fn as_ref(&self) -> &str {
        self
    }
}

impl From<&str> for TextSlice {
    fn from(value: &str) -> Self {
        Self::from_arc(Arc::from(value))
    }
}

impl PartialEq<&str> for TextSlice {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<str> for TextSlice {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<TextSlice> for &str {
    fn eq(&self, other: &TextSlice) -> bool {
        *self == other.as_str()
    }
}

impl PartialEq for TextSlice {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for TextSlice {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_views_buffer() {
        let buffer: Arc<str> = Arc::from("select [name] from t");
        let slice = TextSlice::new(buffer.clone(), 7, 13);
        assert_eq!(slice, "[name]");
        assert_eq!(slice.len(), 6);
        assert!(Arc::ptr_eq(&slice.buffer(), &buffer));
    }

    #[test]
    fn test_sub_slice_is_relative() {
        let slice = TextSlice::new(Arc::from("xx[abc]xx"), 2, 7);
        let inner = slice.slice(1, 4);
        assert_eq!(inner, "abc");
        assert_eq!(inner.start(), 3);
        assert_eq!(inner.end(), 6);
    }

    #[test]
    fn test_equality_is_textual() {
        let a = TextSlice::from("abc");
        let b = TextSlice::new(Arc::from("xabc"), 1, 4);
        assert_eq!(a, b);
        assert!(!a.same_span(&b));
        assert!(a.same_span(&a.clone()));
    }

    #[test]
    fn test_empty_slice() {
        let slice = TextSlice::new(Arc::from("abc"), 1, 1);
        assert!(slice.is_empty());
        assert_eq!(slice.to_string(), "");
    }
}
