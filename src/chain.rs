//! Chain: the owned singly linked list behind one bucket.

use crate::{Key, Value};

struct Entry {
    key: Key,
    value: Value,
    next: Option<Box<Entry>>,
}

/// Head of a bucket's chain. Every `Entry` is owned by exactly one `next`
/// edge (or by `head`), so unlinking a node drops exactly that node.
#[derive(Default)]
pub struct Chain {
    head: Option<Box<Entry>>,
}

/// Iterator over `(key, value)` pairs in chain order, head first.
pub struct Iter<'a> {
    cur: Option<&'a Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (Key, Value);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e = self.cur?;
        self.cur = e.next.as_deref();
        Some((e.key, e.value))
    }
}

impl Chain {
    pub const fn new() -> Self {
        Self { head: None }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of entries, found by walking the chain.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn get(&self, key: Key) -> Option<Value> {
        self.iter().find(|&(k, _)| k == key).map(|(_, v)| v)
    }

    /// Replace the value for `key` in place, or prepend a new entry.
    /// Returns the previous value when the key was already present.
    pub fn upsert(&mut self, key: Key, value: Value) -> Option<Value> {
        let mut cur = self.head.as_deref_mut();
        while let Some(e) = cur {
            if e.key == key {
                return Some(core::mem::replace(&mut e.value, value));
            }
            cur = e.next.as_deref_mut();
        }
        let next = self.head.take();
        self.head = Some(Box::new(Entry { key, value, next }));
        None
    }

    /// Unlink the entry for `key`, relinking its predecessor to its successor.
    pub fn remove(&mut self, key: Key) -> Option<Value> {
        let mut link = &mut self.head;
        while link.as_ref().is_some_and(|e| e.key != key) {
            link = &mut link.as_mut()?.next;
        }
        let removed = *link.take()?;
        *link = removed.next;
        Some(removed.value)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            cur: self.head.as_deref(),
        }
    }
}

// Walks the chain instead of recursing through `Box<Entry>`.
impl core::fmt::Debug for Chain {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Drop for Chain {
    // Iterative so a degenerate chain cannot blow the stack through
    // recursive `Box<Entry>` drops.
    fn drop(&mut self) {
        let mut cur = self.head.take();
        while let Some(mut e) = cur {
            cur = e.next.take();
        }
    }
}
