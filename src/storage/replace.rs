//! The replacement engine: ordered splices over the code-unit buffer.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

use super::{Component, Repr, UrlStorage, UrlStructure, COMPACT_MAX};
use crate::encoding::{EncodeSet, PercentEncoded};

/// One splice of [`UrlStorage::multi_replace_subrange`]: removes
/// `subrange` and writes `insert_count` fresh bytes in its place.
pub struct ReplaceCommand<'a> {
    /// Byte range of the source buffer being replaced.
    pub subrange: Range<usize>,
    /// Number of bytes written in place of `subrange`.
    pub insert_count: usize,
    /// Fills the zero-initialized destination slice and returns the
    /// number of bytes written, which must equal `insert_count`.
    ///
    /// May be `None` only when `insert_count` is 0 (pure removal).
    pub writer: Option<Box<dyn FnMut(&mut [u8]) -> usize + 'a>>,
}

impl fmt::Debug for ReplaceCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplaceCommand")
            .field("subrange", &self.subrange)
            .field("insert_count", &self.insert_count)
            .field("writes", &self.writer.is_some())
            .finish()
    }
}

impl UrlStorage {
    /// Splices `insert_count` freshly written bytes in place of
    /// `subrange` and adopts `new_structure`.
    ///
    /// The writer receives a zero-initialized destination slice of
    /// exactly `insert_count` bytes and must return the number of bytes
    /// it wrote.
    ///
    /// # Panics
    ///
    /// Panics if the writer does not fill the destination exactly, if
    /// `subrange` is out of bounds, or if `new_structure` does not
    /// describe the resulting buffer.
    pub fn replace_subrange<'a>(
        &mut self,
        subrange: Range<usize>,
        insert_count: usize,
        new_structure: UrlStructure,
        writer: impl FnMut(&mut [u8]) -> usize + 'a,
    ) {
        self.multi_replace_subrange(
            vec![ReplaceCommand {
                subrange,
                insert_count,
                writer: Some(Box::new(writer)),
            }],
            new_structure,
        );
    }

    /// Removes `subrange` and adopts `new_structure`.
    ///
    /// # Panics
    ///
    /// As [`replace_subrange`](Self::replace_subrange).
    pub fn remove_subrange(&mut self, subrange: Range<usize>, new_structure: UrlStructure) {
        self.multi_replace_subrange(
            vec![ReplaceCommand {
                subrange,
                insert_count: 0,
                writer: None,
            }],
            new_structure,
        );
    }

    /// Applies an ordered list of non-overlapping splices and
    /// atomically adopts `new_structure`.
    ///
    /// When the buffer is uniquely owned and the resulting length stays
    /// on the current header footprint, the commands are applied in
    /// place in reverse order, which keeps the indices of the earlier
    /// commands valid while the tail moves. Otherwise a fresh buffer of
    /// the optimal footprint is written front to back: for each
    /// command, the source bytes up to its subrange are copied, then
    /// its writer fills the destination slice.
    ///
    /// Capacity and footprint transitions are transparent; this
    /// operation never fails recoverably.
    ///
    /// # Panics
    ///
    /// Panics if the commands are not sorted ascending, overlap, or
    /// reach out of bounds; if a command with a positive `insert_count`
    /// has no writer; if a writer under- or over-fills its destination;
    /// or if `new_structure` does not describe the resulting buffer.
    pub fn multi_replace_subrange(
        &mut self,
        mut commands: Vec<ReplaceCommand<'_>>,
        new_structure: UrlStructure,
    ) {
        let old_count = self.len();
        let mut prev_end = 0;
        let mut new_count = old_count;
        for cmd in &commands {
            assert!(
                prev_end <= cmd.subrange.start
                    && cmd.subrange.start <= cmd.subrange.end
                    && cmd.subrange.end <= old_count,
                "replacement commands must be sorted, non-overlapping, and in bounds"
            );
            assert!(
                cmd.writer.is_some() || cmd.insert_count == 0,
                "a command inserting bytes needs a writer"
            );
            prev_end = cmd.subrange.end;
            new_count = new_count + cmd.insert_count - cmd.subrange.len();
        }
        assert!(
            new_count == new_structure.url_length(),
            "structure describes {} code units, buffer will hold {new_count}",
            new_structure.url_length()
        );
        debug_assert!(new_structure.invariants_hold());

        let fits_compact = new_count <= COMPACT_MAX;
        if let Some(repr) = self.repr_mut() {
            match repr {
                Repr::Compact(inner) if fits_compact => {
                    apply_in_place(&mut inner.code_units, &mut commands);
                    inner.structure = new_structure.convert();
                    return;
                }
                Repr::Wide(inner) if !fits_compact => {
                    apply_in_place(&mut inner.code_units, &mut commands);
                    inner.structure = new_structure;
                    return;
                }
                _ => {}
            }
        }

        let code_units = rebuild(self.code_units(), &mut commands, new_count);
        self.install(new_structure, code_units);
    }

    /// Sets a component whose change does not affect its siblings:
    /// the port, query, or fragment.
    ///
    /// With `new_value` of `None` the component's range is removed and
    /// its length zeroed. Otherwise the value is measured under
    /// `encode_set` in a first pass, then the component's range is
    /// replaced by the `prefix` byte (`:`, `?`, or `#`) followed by the
    /// value, percent-encoded only when the first pass found anything
    /// to change.
    ///
    /// # Panics
    ///
    /// Panics if `component` is not one of port, query, or fragment.
    pub fn set_simple_component(
        &mut self,
        component: Component,
        new_value: Option<&[u8]>,
        prefix: u8,
        encode_set: &EncodeSet,
    ) {
        assert!(
            matches!(
                component,
                Component::Port | Component::Query | Component::Fragment
            ),
            "component cannot be set independently of its siblings"
        );
        let structure = self.structure();
        let subrange = structure.replacement_range(component);

        let Some(value) = new_value else {
            let mut new_structure = structure;
            new_structure.set_length(component, 0);
            self.remove_subrange(subrange, new_structure);
            return;
        };

        let mut encoded_length = 0;
        let needs_encoding = PercentEncoded::new(value.iter().copied(), encode_set)
            .write_buffered(|chunk| encoded_length += chunk.len());
        let new_length = 1 + encoded_length;

        let mut new_structure = structure;
        new_structure.set_length(component, new_length);
        self.replace_subrange(subrange, new_length, new_structure, |dest| {
            dest[0] = prefix;
            if needs_encoding {
                let mut written = 1;
                PercentEncoded::new(value.iter().copied(), encode_set).write_buffered(|chunk| {
                    dest[written..written + chunk.len()].copy_from_slice(chunk);
                    written += chunk.len();
                });
                written
            } else {
                dest[1..].copy_from_slice(value);
                1 + value.len()
            }
        });
    }
}

/// Applies the commands to the buffer in reverse order.
fn apply_in_place(code_units: &mut Vec<u8>, commands: &mut [ReplaceCommand<'_>]) {
    for cmd in commands.iter_mut().rev() {
        let (start, end) = (cmd.subrange.start, cmd.subrange.end);
        let removed = end - start;
        let old_len = code_units.len();
        if cmd.insert_count > removed {
            let grow = cmd.insert_count - removed;
            code_units.resize(old_len + grow, 0);
            code_units.copy_within(end..old_len, end + grow);
        } else if cmd.insert_count < removed {
            let shrink = removed - cmd.insert_count;
            code_units.copy_within(end..old_len, end - shrink);
            code_units.truncate(old_len - shrink);
        }
        if let Some(writer) = &mut cmd.writer {
            let dest = &mut code_units[start..start + cmd.insert_count];
            dest.fill(0);
            run_writer(writer, dest);
        }
    }
}

/// Writes a fresh buffer of `new_count` bytes: source gaps are copied,
/// command destinations are filled by their writers.
fn rebuild(old: &[u8], commands: &mut [ReplaceCommand<'_>], new_count: usize) -> Vec<u8> {
    let mut out = vec![0; new_count];
    let mut src = 0;
    let mut dst = 0;
    for cmd in commands.iter_mut() {
        let keep = cmd.subrange.start - src;
        out[dst..dst + keep].copy_from_slice(&old[src..cmd.subrange.start]);
        dst += keep;
        if let Some(writer) = &mut cmd.writer {
            run_writer(writer, &mut out[dst..dst + cmd.insert_count]);
        }
        dst += cmd.insert_count;
        src = cmd.subrange.end;
    }
    out[dst..].copy_from_slice(&old[src..]);
    out
}

fn run_writer(writer: &mut Box<dyn FnMut(&mut [u8]) -> usize + '_>, dest: &mut [u8]) {
    let count = dest.len();
    let written = writer(dest);
    assert!(
        written == count,
        "writer reported {written} bytes for a {count}-byte destination"
    );
}
