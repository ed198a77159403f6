use crate::types::DataValue;
use alloc::vec::Vec;
use core::slice;

/// Ordered, variable-length list (`SEQUENCE OF` / BACnetLIST).
///
/// Duplicates are allowed; callers that need set-like behaviour check
/// [`contains`](Self::contains) before pushing. Positions are 1-based.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SequenceOf<T = DataValue> {
    values: Vec<T>,
}

impl<T> Default for SequenceOf<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SequenceOf<T> {
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Element at 1-based `position`.
    pub fn get(&self, position: usize) -> Option<&T> {
        position.checked_sub(1).and_then(|i| self.values.get(i))
    }

    pub fn push(&mut self, value: T) {
        self.values.push(value);
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.values.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<T> {
        self.values
    }
}

impl<T: PartialEq> SequenceOf<T> {
    /// Value equality, not identity.
    pub fn contains(&self, value: &T) -> bool {
        self.values.contains(value)
    }

    /// Removes the first element equal to `value`; returns whether one was found.
    pub fn remove_first(&mut self, value: &T) -> bool {
        match self.values.iter().position(|v| v == value) {
            Some(i) => {
                self.values.remove(i);
                true
            }
            None => false,
        }
    }
}

impl<T> From<Vec<T>> for SequenceOf<T> {
    fn from(values: Vec<T>) -> Self {
        Self { values }
    }
}

impl<T> FromIterator<T> for SequenceOf<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for SequenceOf<T> {
    type Item = T;
    type IntoIter = alloc::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a SequenceOf<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Ordered array whose length does not change through element writes.
///
/// Indices are 1-based; index 0 ("the whole array" in some services) never
/// addresses an element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FixedArray<T = DataValue> {
    values: Vec<T>,
}

impl<T> Default for FixedArray<T> {
    fn default() -> Self {
        Self { values: Vec::new() }
    }
}

impl<T> FixedArray<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: u32) -> Option<&T> {
        self.slot(index).map(|i| &self.values[i])
    }

    /// Replaces the element at 1-based `index` and returns the old element,
    /// or `None` (dropping `value`) when `index` is outside `1..=len`.
    pub fn set(&mut self, index: u32, value: T) -> Option<T> {
        let i = self.slot(index)?;
        Some(core::mem::replace(&mut self.values[i], value))
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.values.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<T> {
        self.values
    }

    fn slot(&self, index: u32) -> Option<usize> {
        let i = usize::try_from(index).ok()?.checked_sub(1)?;
        (i < self.values.len()).then_some(i)
    }
}

impl<T> From<Vec<T>> for FixedArray<T> {
    fn from(values: Vec<T>) -> Self {
        Self { values }
    }
}

impl<'a, T> IntoIterator for &'a FixedArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
