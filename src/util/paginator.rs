//! Fixed-size pagination over ordered result slices.

use std::fmt;
use std::ops::Deref;
use std::slice::Chunks;

use crate::error::{Result, XiphosError};

/// One page: a borrowed, contiguous sub-slice of the results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a, T> {
    items: &'a [T],
}

impl<'a, T> Page<'a, T> {
    pub fn items(&self) -> &'a [T] {
        self.items
    }
}

impl<T> Deref for Page<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.items
    }
}

impl<T: fmt::Display> fmt::Display for Page<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in self.items {
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

/// Splits a slice into pages of `page_size` items; the last page may be
/// shorter. Pages are produced lazily and iteration can be restarted.
#[derive(Debug, Clone, Copy)]
pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: usize,
}

impl<'a, T> Paginator<'a, T> {
    pub fn new(items: &'a [T], page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(XiphosError::invalid_argument("page size must be positive"));
        }
        Ok(Paginator { items, page_size })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.items.len().div_ceil(self.page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> Pages<'a, T> {
        Pages {
            chunks: self.items.chunks(self.page_size),
        }
    }
}

impl<'a, T> IntoIterator for &Paginator<'a, T> {
    type Item = Page<'a, T>;
    type IntoIter = Pages<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for Paginator<'a, T> {
    type Item = Page<'a, T>;
    type IntoIter = Pages<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the pages of a [`Paginator`].
#[derive(Debug, Clone)]
pub struct Pages<'a, T> {
    chunks: Chunks<'a, T>,
}

impl<'a, T> Iterator for Pages<'a, T> {
    type Item = Page<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next().map(|items| Page { items })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl<T> ExactSizeIterator for Pages<'_, T> {}

/// Paginate `items` into pages of `page_size`.
///
/// # Examples
///
/// ```
/// use xiphos::util::paginate;
///
/// let results = [1, 2, 3, 4, 5];
/// let pages: Vec<Vec<i32>> = paginate(&results, 2)
///     .unwrap()
///     .iter()
///     .map(|page| page.to_vec())
///     .collect();
///
/// assert_eq!(pages, vec![vec![1, 2], vec![3, 4], vec![5]]);
/// ```
pub fn paginate<T>(items: &[T], page_size: usize) -> Result<Paginator<'_, T>> {
    Paginator::new(items, page_size)
}
